//! Inputs pane: the current input values, with an inline editor

use crate::registry::InputMap;
use crate::trace::value::Value;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Text being typed for the input under the cursor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputEdit {
    pub key: String,
    pub buffer: String,
}

/// Text to seed the editor with, in the form `Value::parse` accepts
pub fn editable_text(value: &Value) -> String {
    fn cells(row: &[Option<i64>]) -> String {
        row.iter()
            .map(|cell| cell.map_or_else(|| "_".to_string(), |n| n.to_string()))
            .collect::<Vec<_>>()
            .join(", ")
    }

    match value {
        Value::Sequence(items) => items
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join(", "),
        Value::Matrix(rows) => rows.iter().map(|row| cells(row)).collect::<Vec<_>>().join("; "),
        other => other.to_string(),
    }
}

pub fn input_lines(inputs: &InputMap, cursor: usize, edit: Option<&InputEdit>) -> Vec<Line<'static>> {
    inputs
        .iter()
        .enumerate()
        .map(|(i, (key, value))| {
            let is_cursor = i == cursor;
            let key_style = if is_cursor {
                Style::default()
                    .fg(DEFAULT_THEME.secondary)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.primary)
            };

            let value_span = match edit {
                Some(edit) if is_cursor && edit.key == *key => Span::styled(
                    format!("{}▏", edit.buffer),
                    Style::default()
                        .fg(DEFAULT_THEME.fg)
                        .bg(DEFAULT_THEME.current_line_bg),
                ),
                _ => Span::styled(value.to_string(), Style::default().fg(DEFAULT_THEME.number)),
            };

            Line::from(vec![
                Span::styled(if is_cursor { "▶ " } else { "  " }, key_style),
                Span::styled(format!("{} = ", key), key_style),
                value_span,
            ])
        })
        .collect()
}

pub fn render_inputs_pane(
    frame: &mut Frame,
    area: Rect,
    inputs: &InputMap,
    cursor: usize,
    edit: Option<&InputEdit>,
    is_focused: bool,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let title = if edit.is_some() {
        " Inputs (Enter apply, Esc cancel) "
    } else {
        " Inputs "
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);

    let paragraph = Paragraph::new(input_lines(inputs, cursor, edit))
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
