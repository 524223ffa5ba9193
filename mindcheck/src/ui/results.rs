//! Results view: the advisory for the predicted risk class.

use mindcheck_core::RiskClass;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use crate::app::AppState;
use crate::theme::Theme;
use crate::ui::layout::{inner_rect, panel_block};

pub fn render_results(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    frame.render_widget(panel_block(" Your Mental Health Assessment ", true, theme), area);
    let inner = inner_rect(area);
    let [_, message_area, actions_area] = inner.layout(&Layout::vertical([
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(2),
    ]));

    let message = match state.prediction {
        Some(class) => advisory_lines(class, theme),
        // Results is only reached with a prediction; a direct jump lands here.
        None => vec![Line::from(Span::styled(
            "No assessment yet. Take the survey first.",
            Style::default().fg(theme.muted),
        ))],
    };
    frame.render_widget(
        Paragraph::new(message).alignment(Alignment::Center).wrap(Wrap { trim: true }),
        message_area,
    );

    let actions = Line::from(vec![
        Span::styled("[c] Proceed to Chat", Style::default().fg(theme.border_active)),
        Span::raw("    "),
        Span::styled("[r] Retake Survey", Style::default().fg(theme.muted)),
    ]);
    frame.render_widget(Paragraph::new(actions).alignment(Alignment::Center), actions_area);
}

/// Label and advisory; the high-risk advisory gets bold alert emphasis.
fn advisory_lines(class: RiskClass, theme: &Theme) -> Vec<Line<'static>> {
    let label_color = match class {
        RiskClass::Low => theme.risk_low,
        RiskClass::Moderate => theme.risk_moderate,
        RiskClass::High => theme.alert,
    };
    let advisory_style = if class.is_alert() {
        Style::default().fg(theme.alert).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.text)
    };
    vec![
        Line::from(Span::styled(
            class.label(),
            Style::default().fg(label_color).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(class.advisory(), advisory_style)),
    ]
}
