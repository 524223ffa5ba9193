//! Survey view.
//!
//! One list item per catalog question: a prompt line with an answered mark
//! and an options line with the chosen option filled in. The list is driven
//! by `state.survey_list_state`, so ratatui keeps the highlighted question
//! scrolled into view.

use mindcheck_core::{Question, SurveyResponse, CATALOG};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
};

use crate::app::{AppState, SubmissionStatus};
use crate::theme::Theme;
use crate::ui::chat::wrap_text;
use crate::ui::layout::{inner_rect, panel_block};

pub fn render_survey(frame: &mut Frame, area: Rect, state: &mut AppState, theme: &Theme) {
    let block = panel_block(" Mental Health Survey ", true, theme);
    let inner = inner_rect(area);
    frame.render_widget(block, area);

    let banner = banner_lines(state, inner.width as usize, theme);
    let [header, list_area] = inner.layout(&Layout::vertical([
        Constraint::Length(1 + banner.len() as u16),
        Constraint::Fill(1),
    ]));

    let answered = state.survey.answered_count();
    let mut header_lines = vec![Line::from(vec![
        Span::styled(
            format!("{answered}/{} answered", CATALOG.len()),
            Style::default().fg(if answered == CATALOG.len() { theme.answered } else { theme.muted }),
        ),
        Span::styled("   Enter to submit", Style::default().fg(theme.muted)),
    ])];
    header_lines.extend(banner);
    frame.render_widget(Paragraph::new(header_lines), header);

    let items: Vec<ListItem> = CATALOG
        .iter()
        .enumerate()
        .map(|(i, q)| question_item(i, q, &state.survey, theme))
        .collect();
    let list = List::new(items).highlight_style(Style::default().bg(theme.highlight_bg));
    frame.render_stateful_widget(list, list_area, &mut state.survey_list_state);
}

/// Submission progress, failure, or validation rows shown under the progress
/// line, already wrapped to `width` so the header height is exact.
///
/// The retry hint gets its own row ahead of the reason, which can be long
/// (transport errors carry the full URL).
fn banner_lines(state: &AppState, width: usize, theme: &Theme) -> Vec<Line<'static>> {
    let error = Style::default().fg(theme.error).add_modifier(Modifier::BOLD);
    let mut rows: Vec<(String, Style)> = Vec::new();
    match &state.submission {
        SubmissionStatus::Pending => {
            rows.push(("Submitting...".to_owned(), Style::default().fg(theme.muted)));
        }
        SubmissionStatus::Failed(reason) => {
            rows.push(("Submission failed. Press Enter to retry.".to_owned(), error));
            rows.push((reason.clone(), Style::default().fg(theme.error)));
        }
        SubmissionStatus::Idle => {}
    }
    if let Some(notice) = &state.survey_notice {
        rows.push((notice.clone(), error));
    }
    rows.into_iter()
        .flat_map(|(text, style)| {
            wrap_text(&text, width)
                .into_iter()
                .map(move |row| Line::from(Span::styled(row, style)))
        })
        .collect()
}

fn question_item(index: usize, question: &Question, survey: &SurveyResponse, theme: &Theme) -> ListItem<'static> {
    let selected = survey.selected(index);
    let mark = match selected {
        Some(_) => Span::styled("[x] ", Style::default().fg(theme.answered)),
        None => Span::styled("[ ] ", Style::default().fg(theme.muted)),
    };
    let prompt = Line::from(vec![
        mark,
        Span::styled(
            format!("{:>2}. {}", index + 1, question.prompt),
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        ),
    ]);

    let mut options = vec![Span::raw("      ")];
    for (o, label) in question.options.iter().enumerate() {
        let chosen = selected == Some(o);
        let (marker, style) = if chosen {
            ("(*)", Style::default().fg(theme.answered).add_modifier(Modifier::BOLD))
        } else {
            ("( )", Style::default().fg(theme.muted))
        };
        options.push(Span::styled(format!("{marker} {} {label}   ", o + 1), style));
    }

    ListItem::new(vec![prompt, Line::from(options)])
}
