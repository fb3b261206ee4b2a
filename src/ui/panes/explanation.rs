//! Explanation pane: the description of the current step

use crate::trace::TraceEntry;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn render_explanation_pane(frame: &mut Frame, area: Rect, entry: Option<&TraceEntry>) {
    let block = Block::default()
        .title(" Explanation ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border_normal));

    let lines = match entry {
        Some(entry) => {
            let line_label = if entry.line == 0 {
                "done".to_string()
            } else {
                format!("line {}", entry.line)
            };
            vec![
                Line::from(vec![
                    Span::styled(
                        format!("#{} ", entry.id),
                        Style::default().fg(DEFAULT_THEME.comment),
                    ),
                    Span::styled(
                        line_label,
                        Style::default()
                            .fg(DEFAULT_THEME.secondary)
                            .add_modifier(Modifier::BOLD),
                    ),
                ]),
                Line::styled(entry.description.clone(), Style::default().fg(DEFAULT_THEME.fg)),
            ]
        }
        None => vec![Line::styled(
            "No steps: the inputs do not fit this problem.",
            Style::default().fg(DEFAULT_THEME.error),
        )],
    };

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}
