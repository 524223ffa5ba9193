//! Screen layout and the chrome shared by every view.
//!
//! Pure layout arithmetic plus the title and status bars. Called inside
//! `terminal.draw()` on every render so each frame reflects the live size.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Margin, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph},
};

use crate::app::{AppState, Mode, SubmissionStatus, View};
use crate::theme::Theme;

pub const APP_TITLE: &str = "Mental Health Assessment & Chatbot";

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

/// Returns `[title_bar, body, status_bar]` for the current frame.
pub fn compute_layout(frame: &Frame) -> [Rect; 3] {
    frame.area().layout(&Layout::vertical([
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
    ]))
}

/// Inner `Rect` of a bordered panel.
pub fn inner_rect(area: Rect) -> Rect {
    area.inner(Margin { vertical: 1, horizontal: 1 })
}

/// Bordered block; focused panels get a thick border in the active color.
pub fn panel_block<'a>(title: &'a str, is_focused: bool, theme: &'a Theme) -> Block<'a> {
    let border_style = if is_focused {
        Style::default().fg(theme.border_active)
    } else {
        Style::default().fg(theme.border_inactive)
    };
    let border_type = if is_focused { BorderType::Thick } else { BorderType::Plain };

    Block::bordered().title(title).border_type(border_type).border_style(border_style)
}

pub fn render_title_bar(frame: &mut Frame, area: Rect, theme: &Theme) {
    let title = Line::from(Span::styled(
        format!(" {APP_TITLE}"),
        Style::default().add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(
        Paragraph::new(title).style(Style::default().bg(theme.title_bar_bg).fg(theme.title_bar_fg)),
        area,
    );
}

/// Renders the 1-row status bar: mode, view, busy indicator, key hints.
pub fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let (mode_text, mode_fg) = match state.mode {
        Mode::Insert => (" INSERT ", theme.status_mode_insert),
        Mode::Normal | Mode::HelpOverlay => (" NORMAL ", theme.status_mode_normal),
    };

    let mut spans = vec![
        Span::styled(mode_text, Style::default().fg(mode_fg).add_modifier(Modifier::BOLD)),
        Span::raw(format!(" {} ", state.current_view().label())),
    ];

    if let Some(busy) = busy_text(state) {
        let frame_char = SPINNER[state.spinner_frame % SPINNER.len()];
        spans.push(Span::raw(format!(" {frame_char} {busy} ")));
    }

    spans.push(Span::raw(format!(" {}", hints(state))));

    frame.render_widget(
        Paragraph::new(Line::from(spans))
            .style(Style::default().bg(theme.status_bar_bg).fg(theme.status_bar_fg)),
        area,
    );
}

fn busy_text(state: &AppState) -> Option<&'static str> {
    if state.submission == SubmissionStatus::Pending {
        Some("Submitting survey...")
    } else if state.chat.awaiting_replies() > 0 {
        Some("Waiting for reply...")
    } else {
        None
    }
}

fn hints(state: &AppState) -> &'static str {
    if state.mode == Mode::HelpOverlay {
        return "j/k scroll  ?/Esc close";
    }
    match (state.current_view(), state.mode) {
        (View::Home, _) => "←/→ choose  Enter open  s survey  c chat  ? help  q quit",
        (View::Survey, _) => "↑/↓ question  ←/→ answer  Enter submit  Esc home  ? help",
        (View::Results, _) => "c chat  r retake  Esc home  ? help  q quit",
        (View::Chat, Mode::Insert) => "Enter send  Esc stop typing  PgUp/PgDn scroll  Ctrl-R retake",
        (View::Chat, _) => "i type  r retake  j/k scroll  Esc home  q quit",
    }
}
