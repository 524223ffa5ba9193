//! UI rendering module for mindcheck.
//!
//! `render()` is the single entry point called from the event loop's
//! `terminal.draw()` closure. Shared chrome and layout arithmetic live in
//! `layout.rs`; each view has its own module.

mod layout;
pub mod chat;
pub mod help;
pub mod home;
pub mod keybindings;
pub mod results;
pub mod survey;

use ratatui::Frame;

use crate::app::{AppState, Mode, View};
use crate::theme::Theme;
use layout::{compute_layout, render_status_bar, render_title_bar};

/// Renders one complete frame: title bar, the active view, status bar, and
/// the help overlay when open.
///
/// Views cache geometry (card rects, transcript height) into `state` for the
/// next input event, hence the mutable borrow.
pub fn render(frame: &mut Frame, state: &mut AppState, theme: &Theme) {
    let [title_bar, body, status_bar] = compute_layout(frame);

    render_title_bar(frame, title_bar, theme);

    match state.current_view() {
        View::Home => home::render_home(frame, body, state, theme),
        View::Survey => survey::render_survey(frame, body, state, theme),
        View::Results => results::render_results(frame, body, state, theme),
        View::Chat => chat::render_chat(frame, body, state, theme),
    }

    render_status_bar(frame, status_bar, state, theme);

    // Overlay last so it sits on top.
    if state.mode == Mode::HelpOverlay {
        help::render_help_overlay(frame, theme, state.help_scroll);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::worker::PredictionOutcome;
    use mindcheck_core::{RiskClass, CATALOG};
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;
    use ratatui::style::Modifier;
    use ratatui::Terminal;

    fn draw(state: &mut AppState, theme: &Theme) -> Buffer {
        draw_sized(state, theme, 100, 30)
    }

    fn draw_sized(state: &mut AppState, theme: &Theme, width: u16, height: u16) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| render(frame, state, theme)).unwrap();
        terminal.backend().buffer().clone()
    }

    fn row_text(buffer: &Buffer, y: u16) -> String {
        (0..buffer.area.width).map(|x| buffer[(x, y)].symbol()).collect()
    }

    /// Finds the first row containing `needle`; returns (column, row).
    fn find(buffer: &Buffer, needle: &str) -> Option<(u16, u16)> {
        (0..buffer.area.height).find_map(|y| {
            let row = row_text(buffer, y);
            let byte = row.find(needle)?;
            Some((row[..byte].chars().count() as u16, y))
        })
    }

    #[test]
    fn home_shows_both_cards() {
        let mut state = AppState::default();
        let buffer = draw(&mut state, &Theme::dark());
        assert!(find(&buffer, "Take Survey").is_some());
        assert!(find(&buffer, "Personal Assistance").is_some());
        assert!(find(&buffer, "Mental Health Assessment & Chatbot").is_some());
        assert!(state.home_card_rects[0].width > 0, "card rects cached for mouse hits");
    }

    #[test]
    fn high_risk_result_is_rendered_with_alert_emphasis() {
        let theme = Theme::dark();
        let mut state = AppState::default();
        state.navigate_to(View::Survey);
        for i in 0..CATALOG.len() {
            state.set_question_cursor(i);
            state.choose_option(0);
        }
        let request = state.begin_submission().unwrap();
        state.apply_prediction(PredictionOutcome {
            generation: request.generation,
            result: Ok(RiskClass::High),
        });
        assert_eq!(state.current_view(), View::Results);

        let buffer = draw(&mut state, &theme);
        let (x, y) = find(&buffer, "Your assessment indicates a high risk")
            .expect("high-risk advisory on screen");
        let cell = &buffer[(x, y)];
        assert_eq!(cell.fg, theme.alert);
        assert!(cell.modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn moderate_result_is_not_alert_styled() {
        let theme = Theme::dark();
        let mut state = AppState::default();
        state.prediction = Some(RiskClass::Moderate);
        state.navigate_to(View::Results);

        let buffer = draw(&mut state, &theme);
        let (x, y) = find(&buffer, "moderate level of concern").unwrap();
        assert_ne!(buffer[(x, y)].fg, theme.alert);
    }

    #[test]
    fn survey_failure_banner_is_visible() {
        let mut state = AppState::default();
        state.navigate_to(View::Survey);
        state.submission = crate::app::SubmissionStatus::Failed("service returned 500: boom".into());
        let buffer = draw(&mut state, &Theme::dark());
        assert!(find(&buffer, "Submission failed").is_some());
        assert!(find(&buffer, "0/13 answered").is_some());
    }

    #[test]
    fn unreachable_service_failure_keeps_retry_hint_and_full_reason() {
        let reason = "could not reach the service: error sending request for url \
                      (http://localhost:5001/predict_mood)";
        for width in [80, 100] {
            let mut state = AppState::default();
            state.navigate_to(View::Survey);
            state.submission = crate::app::SubmissionStatus::Failed(reason.into());
            let buffer = draw_sized(&mut state, &Theme::dark(), width, 30);

            let (_, hint_row) = find(&buffer, "Press Enter to retry").expect("retry hint on screen");
            let (_, url_row) = find(&buffer, "predict_mood").expect("whole reason on screen");
            let (_, question_row) = find(&buffer, "1. What is your gender?").expect("question list");
            assert!(hint_row < url_row, "hint comes before the reason at width {width}");
            assert!(url_row < question_row, "reason is not overdrawn by the list at width {width}");
        }
    }

    #[test]
    fn long_notice_is_not_clipped() {
        let mut state = AppState::default();
        state.navigate_to(View::Survey);
        assert!(state.begin_submission().is_none());
        let buffer = draw_sized(&mut state, &Theme::dark(), 60, 30);
        let (_, tail_row) = find(&buffer, "13).").expect("end of the notice on screen");
        let (_, question_row) = find(&buffer, "1. What is your gender?").unwrap();
        assert!(tail_row < question_row);
    }

    #[test]
    fn chat_labels_turns() {
        let mut state = AppState::default();
        state.navigate_to(View::Chat);
        state.chat_input = "hello".into();
        let request = state.send_chat().unwrap();
        state.apply_chat_reply(crate::worker::ChatReply {
            generation: request.generation,
            result: Ok("Hi there".into()),
        });
        let buffer = draw(&mut state, &Theme::dark());
        let (_, user_row) = find(&buffer, "  hello").unwrap();
        let (_, reply_row) = find(&buffer, "  Hi there").unwrap();
        assert!(user_row < reply_row);
        assert!(row_text(&buffer, user_row - 1).contains("You"));
        assert!(row_text(&buffer, reply_row - 1).contains("Therapist"));
    }
}
