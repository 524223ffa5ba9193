//! Keybinding dispatcher for mindcheck.
//!
//! Translates crossterm key and mouse events into `AppState` mutations and
//! returns a `KeyAction` telling the event loop what to do next. Actions that
//! need the network come back as requests; the loop hands them to a worker.
//! Dispatch branches on the help overlay first, then on the active view.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use mindcheck_core::{ChatRequest, CATALOG};
use ratatui::layout::Position;

use crate::app::{AppState, HomeCard, Mode, View};
use crate::worker::SubmitRequest;

/// What the event loop should do after a key or mouse event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// Nothing beyond the state change; redraw on the next render tick.
    Continue,
    /// Exit cleanly.
    Quit,
    /// Post the survey to the prediction service.
    Submit(SubmitRequest),
    /// Queue a chat message.
    SendChat(ChatRequest),
    /// The user retook the survey; drop the server-side conversation too.
    ResetConversation,
}

/// Dispatches a key event according to the overlay, mode, and view.
pub fn handle_key(key: KeyEvent, state: &mut AppState) -> KeyAction {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && key.code == KeyCode::Char('c') {
        return KeyAction::Quit;
    }
    if state.mode == Mode::HelpOverlay {
        return handle_help(key, state);
    }
    match state.current_view() {
        View::Home => handle_home(key, state),
        View::Survey => handle_survey(key, state),
        View::Results => handle_results(key, state),
        View::Chat if state.mode == Mode::Insert => handle_chat_insert(key, state),
        View::Chat => handle_chat_normal(key, state),
    }
}

/// Keys that behave the same on every view outside text entry.
fn handle_global(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match key.code {
        KeyCode::Char('?') => {
            state.help_scroll = 0;
            state.mode = Mode::HelpOverlay;
            KeyAction::Continue
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => KeyAction::Quit,
        _ => KeyAction::Continue,
    }
}

fn retake(state: &mut AppState) -> KeyAction {
    state.retake();
    KeyAction::ResetConversation
}

// ---------------------------------------------------------------------------
// Home
// ---------------------------------------------------------------------------

fn handle_home(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match key.code {
        KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::BackTab
        | KeyCode::Char('h') | KeyCode::Char('l') => {
            state.home_card = state.home_card.toggle();
            KeyAction::Continue
        }
        KeyCode::Enter => {
            state.navigate_to(state.home_card.target());
            KeyAction::Continue
        }
        KeyCode::Char('s') => {
            state.navigate_to(View::Survey);
            KeyAction::Continue
        }
        KeyCode::Char('c') => {
            state.navigate_to(View::Chat);
            KeyAction::Continue
        }
        _ => handle_global(key, state),
    }
}

// ---------------------------------------------------------------------------
// Survey
// ---------------------------------------------------------------------------

fn handle_survey(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => state.next_question(),
        KeyCode::Up | KeyCode::Char('k') => state.prev_question(),
        KeyCode::Char('g') | KeyCode::Home => state.set_question_cursor(0),
        KeyCode::Char('G') | KeyCode::End => state.set_question_cursor(CATALOG.len() - 1),
        KeyCode::Right | KeyCode::Char('l') => state.next_option(),
        KeyCode::Left | KeyCode::Char('h') => state.prev_option(),
        KeyCode::Char(c @ '1'..='9') => {
            let option = c as usize - '1' as usize;
            state.choose_option(option);
        }
        KeyCode::Enter | KeyCode::Char('S') => {
            return match state.begin_submission() {
                Some(request) => KeyAction::Submit(request),
                None => KeyAction::Continue,
            };
        }
        KeyCode::Esc => state.navigate_to(View::Home),
        _ => return handle_global(key, state),
    }
    KeyAction::Continue
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

fn handle_results(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match key.code {
        KeyCode::Char('c') | KeyCode::Enter => {
            state.navigate_to(View::Chat);
            KeyAction::Continue
        }
        KeyCode::Char('r') => retake(state),
        KeyCode::Esc | KeyCode::Char('h') => {
            state.navigate_to(View::Home);
            KeyAction::Continue
        }
        _ => handle_global(key, state),
    }
}

// ---------------------------------------------------------------------------
// Chat
// ---------------------------------------------------------------------------

/// Typing into the input line. Every printable key is text here, so `q`
/// and `?` do not quit or open help.
fn handle_chat_insert(key: KeyEvent, state: &mut AppState) -> KeyAction {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('r') if ctrl => retake(state),
        KeyCode::Enter => match state.send_chat() {
            Some(request) => KeyAction::SendChat(request),
            None => KeyAction::Continue,
        },
        KeyCode::Char(c) if !ctrl => {
            state.chat_input.push(c);
            KeyAction::Continue
        }
        KeyCode::Backspace => {
            state.chat_input.pop();
            KeyAction::Continue
        }
        KeyCode::Esc => {
            state.mode = Mode::Normal;
            KeyAction::Continue
        }
        KeyCode::PageUp => {
            state.scroll_chat_up(state.chat_page());
            KeyAction::Continue
        }
        KeyCode::PageDown => {
            state.scroll_chat_down(state.chat_page());
            KeyAction::Continue
        }
        _ => KeyAction::Continue,
    }
}

fn handle_chat_normal(key: KeyEvent, state: &mut AppState) -> KeyAction {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('i') | KeyCode::Enter => state.mode = Mode::Insert,
        KeyCode::Char('r') => return retake(state),
        KeyCode::Char('k') | KeyCode::Up => state.scroll_chat_up(1),
        KeyCode::Char('j') | KeyCode::Down => state.scroll_chat_down(1),
        KeyCode::Char('u') if ctrl => state.scroll_chat_up(state.chat_page() / 2),
        KeyCode::Char('d') if ctrl => state.scroll_chat_down(state.chat_page() / 2),
        KeyCode::PageUp => state.scroll_chat_up(state.chat_page()),
        KeyCode::PageDown => state.scroll_chat_down(state.chat_page()),
        KeyCode::Char('G') => state.chat_scroll = 0,
        KeyCode::Esc | KeyCode::Char('h') => state.navigate_to(View::Home),
        _ => return handle_global(key, state),
    }
    KeyAction::Continue
}

// ---------------------------------------------------------------------------
// Help overlay
// ---------------------------------------------------------------------------

fn handle_help(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            state.help_scroll = state.help_scroll.saturating_add(1);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.help_scroll = state.help_scroll.saturating_sub(1);
        }
        KeyCode::Char('g') => state.help_scroll = 0,
        KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q') => {
            // Back to whatever mode the view opens with.
            state.navigate_to(state.current_view());
        }
        _ => {}
    }
    KeyAction::Continue
}

// ---------------------------------------------------------------------------
// Mouse events
// ---------------------------------------------------------------------------

/// Left click opens a home card; the wheel moves through the survey or
/// scrolls the chat transcript.
pub fn handle_mouse(mouse: MouseEvent, state: &mut AppState) -> KeyAction {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            handle_mouse_click(mouse.column, mouse.row, state)
        }
        MouseEventKind::ScrollUp => handle_mouse_scroll(state, true),
        MouseEventKind::ScrollDown => handle_mouse_scroll(state, false),
        _ => KeyAction::Continue,
    }
}

fn handle_mouse_click(col: u16, row: u16, state: &mut AppState) -> KeyAction {
    if state.current_view() != View::Home || state.mode == Mode::HelpOverlay {
        return KeyAction::Continue;
    }
    let pos = Position { x: col, y: row };
    let [survey, chat] = state.home_card_rects;
    if survey.contains(pos) {
        state.home_card = HomeCard::Survey;
        state.navigate_to(View::Survey);
    } else if chat.contains(pos) {
        state.home_card = HomeCard::Chat;
        state.navigate_to(View::Chat);
    }
    KeyAction::Continue
}

fn handle_mouse_scroll(state: &mut AppState, up: bool) -> KeyAction {
    if state.mode == Mode::HelpOverlay {
        state.help_scroll = if up {
            state.help_scroll.saturating_sub(3)
        } else {
            state.help_scroll.saturating_add(3)
        };
        return KeyAction::Continue;
    }
    match (state.current_view(), up) {
        (View::Survey, true) => state.prev_question(),
        (View::Survey, false) => state.next_question(),
        (View::Chat, true) => state.scroll_chat_up(3),
        (View::Chat, false) => state.scroll_chat_down(3),
        _ => {}
    }
    KeyAction::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;
    use ratatui::layout::Rect;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent {
            code: KeyCode::Char(c),
            modifiers: KeyModifiers::CONTROL,
            kind: crossterm::event::KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn type_text(state: &mut AppState, text: &str) {
        for c in text.chars() {
            assert_eq!(handle_key(key(KeyCode::Char(c)), state), KeyAction::Continue);
        }
    }

    #[test]
    fn home_enter_opens_selected_card() {
        let mut state = AppState::default();
        handle_key(key(KeyCode::Right), &mut state);
        assert_eq!(state.home_card, HomeCard::Chat);
        handle_key(key(KeyCode::Enter), &mut state);
        assert_eq!(state.current_view(), View::Chat);
        assert_eq!(state.mode, Mode::Insert);
    }

    #[test]
    fn survey_keys_answer_and_submit() {
        let mut state = AppState::default();
        handle_key(key(KeyCode::Char('s')), &mut state);
        assert_eq!(state.current_view(), View::Survey);

        assert_eq!(handle_key(key(KeyCode::Enter), &mut state), KeyAction::Continue);
        assert!(state.survey_notice.is_some(), "empty form is refused");

        for i in 0..CATALOG.len() {
            state.set_question_cursor(i);
            handle_key(key(KeyCode::Char('2')), &mut state);
        }
        match handle_key(key(KeyCode::Enter), &mut state) {
            KeyAction::Submit(request) => {
                assert_eq!(request.submission.len(), CATALOG.len());
                assert_eq!(request.submission.get("Gender"), Some("Male"));
            }
            other => panic!("expected Submit, got {other:?}"),
        }
    }

    #[test]
    fn number_beyond_options_is_ignored() {
        let mut state = AppState::default();
        state.navigate_to(View::Survey);
        handle_key(key(KeyCode::Char('9')), &mut state);
        assert_eq!(state.survey.selected(0), None);
    }

    #[test]
    fn chat_typing_includes_q_and_sends_on_enter() {
        let mut state = AppState::default();
        state.navigate_to(View::Chat);
        type_text(&mut state, "quiet?");
        assert_eq!(state.chat_input, "quiet?");
        match handle_key(key(KeyCode::Enter), &mut state) {
            KeyAction::SendChat(request) => assert_eq!(request.message, "quiet?"),
            other => panic!("expected SendChat, got {other:?}"),
        }
        assert!(state.chat_input.is_empty());
    }

    #[test]
    fn blank_chat_enter_does_nothing() {
        let mut state = AppState::default();
        state.navigate_to(View::Chat);
        type_text(&mut state, "   ");
        assert_eq!(handle_key(key(KeyCode::Enter), &mut state), KeyAction::Continue);
        assert!(state.chat.is_empty());
    }

    #[test]
    fn ctrl_r_in_chat_retakes_and_resets_conversation() {
        let mut state = AppState::default();
        state.navigate_to(View::Chat);
        type_text(&mut state, "hi");
        handle_key(key(KeyCode::Enter), &mut state);
        assert_eq!(handle_key(ctrl('r'), &mut state), KeyAction::ResetConversation);
        assert_eq!(state.current_view(), View::Survey);
        assert!(state.chat.is_empty());
    }

    #[test]
    fn ctrl_c_quits_even_while_typing() {
        let mut state = AppState::default();
        state.navigate_to(View::Chat);
        assert_eq!(handle_key(ctrl('c'), &mut state), KeyAction::Quit);
    }

    #[test]
    fn help_overlay_restores_view_mode() {
        let mut state = AppState::default();
        state.navigate_to(View::Results);
        handle_key(key(KeyCode::Char('?')), &mut state);
        assert_eq!(state.mode, Mode::HelpOverlay);
        assert_eq!(handle_key(key(KeyCode::Char('q')), &mut state), KeyAction::Continue);
        assert_eq!(state.mode, Mode::Normal);
        assert_eq!(state.current_view(), View::Results);
    }

    #[test]
    fn click_on_home_card_opens_it() {
        let mut state = AppState::default();
        state.home_card_rects = [Rect::new(10, 5, 30, 6), Rect::new(50, 5, 30, 6)];
        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 60,
            row: 7,
            modifiers: KeyModifiers::NONE,
        };
        handle_mouse(click, &mut state);
        assert_eq!(state.current_view(), View::Chat);
    }
}
