//! Help overlay renderer.
//!
//! Draws a centred modal over the current view. `Clear` erases the area
//! first, inside the same `terminal.draw()` closure as everything else.

use ratatui::{
    Frame,
    layout::Constraint,
    text::{Line, Text},
    widgets::{Block, Clear, Paragraph, Wrap},
};

use crate::theme::Theme;

/// Renders the help overlay, scrolled by `help_scroll` rows.
///
/// Skipped on terminals narrower than 40 columns.
pub fn render_help_overlay(frame: &mut Frame, theme: &Theme, help_scroll: u16) {
    if frame.area().width < 40 {
        return;
    }

    let overlay_area = frame.area().centered(Constraint::Percentage(80), Constraint::Percentage(80));

    frame.render_widget(Clear, overlay_area);

    let block = Block::bordered()
        .title(" Help  (j/k scroll, ? or Esc to dismiss) ")
        .border_style(ratatui::style::Style::default().fg(theme.border_active));

    frame.render_widget(
        Paragraph::new(build_help_text())
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((help_scroll, 0)),
        overlay_area,
    );
}

fn build_help_text() -> Text<'static> {
    Text::from(vec![
        Line::from("Home"),
        Line::from("  ← / → / Tab   Choose Take Survey or Personal Assistance"),
        Line::from("  Enter         Open the chosen card"),
        Line::from("  s / c         Jump straight to the survey / chat"),
        Line::from(""),
        Line::from("Survey"),
        Line::from("  ↑ / ↓ (k / j) Previous / next question"),
        Line::from("  ← / → (h / l) Change the answer to the highlighted question"),
        Line::from("  1-9           Pick an answer by number"),
        Line::from("  Enter / S     Submit (every question needs an answer)"),
        Line::from("  Esc           Back to home"),
        Line::from(""),
        Line::from("Results"),
        Line::from("  c / Enter     Proceed to chat"),
        Line::from("  r             Retake the survey"),
        Line::from("  Esc           Back to home"),
        Line::from(""),
        Line::from("Chat"),
        Line::from("  Enter         Send the message"),
        Line::from("  Esc           Stop typing (i to resume)"),
        Line::from("  PgUp / PgDn   Scroll the conversation"),
        Line::from("  Ctrl-R / r    Retake the survey (clears the conversation)"),
        Line::from(""),
        Line::from("General"),
        Line::from("  ?             Open / close this help"),
        Line::from("  q             Quit (outside the chat input)"),
        Line::from("  Ctrl-C        Quit from anywhere"),
    ])
}
