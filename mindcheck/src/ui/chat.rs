//! Chat view: transcript panel above a one-line input box.
//!
//! The transcript is wrapped by hand so the total line count is known, then
//! only the visible window is handed to ratatui. `state.chat_scroll` counts
//! lines up from the bottom, so 0 always shows the newest turn.

use mindcheck_core::{Role, Turn};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::{AppState, Mode};
use crate::theme::Theme;
use crate::ui::layout::{inner_rect, panel_block};

pub fn render_chat(frame: &mut Frame, area: Rect, state: &mut AppState, theme: &Theme) {
    let [transcript_area, input_area] =
        area.layout(&Layout::vertical([Constraint::Fill(1), Constraint::Length(3)]));

    let typing = state.mode == Mode::Insert;
    frame.render_widget(panel_block(" Chat with Our Therapist Assistant ", !typing, theme), transcript_area);
    let inner = inner_rect(transcript_area);
    state.chat_viewport_height = inner.height;

    let lines = transcript_lines(state, inner.width as usize, theme);
    let height = inner.height as usize;
    let max_scroll = lines.len().saturating_sub(height);
    state.chat_scroll = state.chat_scroll.min(max_scroll);
    let start = lines.len().saturating_sub(height + state.chat_scroll);
    let end = (start + height).min(lines.len());
    frame.render_widget(Paragraph::new(lines[start..end].to_vec()), inner);

    render_input(frame, input_area, state, typing, theme);
}

fn transcript_lines(state: &AppState, width: usize, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    if state.chat.is_empty() && state.chat.awaiting_replies() == 0 {
        lines.push(Line::from(Span::styled(
            "Say hello to start the conversation.",
            Style::default().fg(theme.muted),
        )));
        return lines;
    }
    for turn in state.chat.turns() {
        push_turn(&mut lines, turn, width, theme);
    }
    if state.chat.awaiting_replies() > 0 {
        lines.push(Line::from(Span::styled(
            "Therapist is typing...",
            Style::default().fg(theme.muted).add_modifier(Modifier::ITALIC),
        )));
    }
    lines
}

fn push_turn(lines: &mut Vec<Line<'static>>, turn: &Turn, width: usize, theme: &Theme) {
    let (label, label_color) = match turn.role {
        Role::User => ("You", theme.user_label),
        Role::Assistant => ("Therapist", theme.assistant_label),
    };
    lines.push(Line::from(Span::styled(
        label,
        Style::default().fg(label_color).add_modifier(Modifier::BOLD),
    )));
    let body_style = if turn.is_error_placeholder() {
        Style::default().fg(theme.error)
    } else {
        Style::default().fg(theme.text)
    };
    for row in wrap_text(&turn.content, width.saturating_sub(2)) {
        lines.push(Line::from(Span::styled(format!("  {row}"), body_style)));
    }
    lines.push(Line::from(""));
}

fn render_input(frame: &mut Frame, area: Rect, state: &AppState, typing: bool, theme: &Theme) {
    frame.render_widget(panel_block(" Message ", typing, theme), area);
    let inner = inner_rect(area);
    let width = inner.width as usize;

    if state.chat_input.is_empty() && !typing {
        frame.render_widget(
            Paragraph::new(Span::styled("Press i to type your message...", Style::default().fg(theme.muted))),
            inner,
        );
        return;
    }

    // Keep the tail of long input visible, leaving one cell for the cursor.
    let chars: Vec<char> = state.chat_input.chars().collect();
    let skip = chars.len().saturating_sub(width.saturating_sub(1));
    let visible: String = chars[skip..].iter().collect();
    let cursor_x = inner.x + (chars.len() - skip) as u16;
    frame.render_widget(Paragraph::new(visible), inner);

    if typing && inner.width > 0 {
        frame.set_cursor_position(Position { x: cursor_x, y: inner.y });
    }
}

/// Greedy word wrap to `width` columns. Words longer than a line are split.
/// Explicit newlines are kept; an empty input yields one empty row.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows = Vec::new();
    for paragraph in text.split('\n') {
        let mut current = String::new();
        let mut current_len = 0;
        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();
            while word.len() > width {
                if current_len > 0 {
                    rows.push(std::mem::take(&mut current));
                    current_len = 0;
                }
                rows.push(word.drain(..width).collect());
            }
            let needed = if current_len == 0 { word.len() } else { current_len + 1 + word.len() };
            if needed > width {
                rows.push(std::mem::take(&mut current));
                current_len = 0;
            }
            if current_len > 0 {
                current.push(' ');
                current_len += 1;
            }
            current.extend(word.iter());
            current_len += word.len();
        }
        rows.push(current);
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_breaks_on_word_boundaries() {
        assert_eq!(
            wrap_text("the quick brown fox jumps", 10),
            ["the quick", "brown fox", "jumps"]
        );
    }

    #[test]
    fn wrap_splits_overlong_words() {
        assert_eq!(wrap_text("abcdefghij xy", 4), ["abcd", "efgh", "ij", "xy"]);
    }

    #[test]
    fn wrap_keeps_explicit_newlines() {
        assert_eq!(wrap_text("one\n\ntwo", 20), ["one", "", "two"]);
        assert_eq!(wrap_text("", 20), [""]);
    }
}
