//! Home view: two entry cards side by side.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::{AppState, HomeCard};
use crate::theme::Theme;
use crate::ui::layout::{inner_rect, panel_block};

const CARDS: [(HomeCard, &str, &str); 2] = [
    (HomeCard::Survey, "Take Survey", "Mental health assessment (optional)"),
    (HomeCard::Chat, "Personal Assistance", "Chat with a therapist assistant"),
];

/// Renders the cards and records their areas in `state.home_card_rects`.
pub fn render_home(frame: &mut Frame, area: Rect, state: &mut AppState, theme: &Theme) {
    let [band] = area.layout(&Layout::vertical([Constraint::Length(6)]).flex(Flex::Center));
    let horizontal = Layout::horizontal([Constraint::Max(40), Constraint::Max(40)])
        .flex(Flex::Center)
        .spacing(4);
    let rects: [Rect; 2] = band.layout(&horizontal);
    state.home_card_rects = rects;

    for ((card, title, subtitle), rect) in CARDS.into_iter().zip(rects) {
        let focused = state.home_card == card;
        frame.render_widget(panel_block("", focused, theme), rect);

        let title_style = if focused {
            Style::default().fg(theme.border_active).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD)
        };
        let body = vec![
            Line::from(""),
            Line::from(Span::styled(title, title_style)),
            Line::from(Span::styled(subtitle, Style::default().fg(theme.muted))),
        ];
        frame.render_widget(Paragraph::new(body).alignment(Alignment::Center), inner_rect(rect));
    }
}
