//! Visualizer pane: draws the traced variables a problem declares
//!
//! Each [`VisualizerSpec`] names a variable and how to draw it. A variable
//! missing from the entry draws nothing; [`Value::Empty`] draws as `null`.
//! Highlights color cells by role and their labels are listed under the
//! structure they annotate.

use crate::registry::{Layout as VisualLayout, VisualConfig, VisualizerKind, VisualizerSpec};
use crate::trace::value::Value;
use crate::trace::{Highlight, Role, Target, TraceEntry};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use std::collections::BTreeMap;

/// Which role wins when several highlights land on one cell
fn priority(role: Role) -> u8 {
    match role {
        Role::Violation => 3,
        Role::Resolved => 2,
        Role::Current => 1,
        Role::Reference => 0,
    }
}

/// The highlight to paint at `target`, if any
pub fn highlight_at(highlights: &[Highlight], target: Target) -> Option<&Highlight> {
    highlights
        .iter()
        .filter(|h| h.target == target)
        .max_by_key(|h| priority(h.role))
}

fn cell_style(highlight: Option<&Highlight>) -> Style {
    match highlight {
        Some(h) => Style::default()
            .bg(DEFAULT_THEME.role(h.role))
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD),
        None => Style::default().fg(DEFAULT_THEME.fg),
    }
}

fn cell_text(cell: Option<i64>, width: usize) -> String {
    match cell {
        Some(n) => format!("{:>width$}", n, width = width),
        None => format!("{:>width$}", "·", width = width),
    }
}

/// Labels attached to highlights, e.g. `i→[2]  found→[0]`
fn legend(highlights: &[Highlight]) -> Option<Line<'static>> {
    let spans: Vec<Span> = highlights
        .iter()
        .filter_map(|h| {
            let label = h.label.as_ref()?;
            Some(Span::styled(
                format!("{}→{}  ", label, h.target),
                Style::default().fg(DEFAULT_THEME.role(h.role)),
            ))
        })
        .collect();

    if spans.is_empty() {
        None
    } else {
        Some(Line::from(spans))
    }
}

/// Index header plus one row of cells
pub fn array_lines(items: &[i64], highlights: &[Highlight]) -> Vec<Line<'static>> {
    let width = items
        .iter()
        .map(|n| n.to_string().len())
        .chain(std::iter::once(items.len().saturating_sub(1).to_string().len()))
        .max()
        .unwrap_or(1);

    let header: Vec<Span> = (0..items.len())
        .map(|i| {
            Span::styled(
                format!(" {:>width$} ", i, width = width),
                Style::default().fg(DEFAULT_THEME.comment),
            )
        })
        .collect();

    let cells: Vec<Span> = items
        .iter()
        .enumerate()
        .map(|(i, &n)| {
            let hl = highlight_at(highlights, Target::Index(i));
            Span::styled(format!("[{}]", cell_text(Some(n), width)), cell_style(hl))
        })
        .collect();

    let mut lines = vec![Line::from(header), Line::from(cells)];
    if items.is_empty() {
        lines = vec![Line::styled("[]", Style::default().fg(DEFAULT_THEME.comment))];
    }
    lines.extend(legend(highlights));
    lines
}

pub fn grid_lines(rows: &[Vec<Option<i64>>], highlights: &[Highlight]) -> Vec<Line<'static>> {
    let width = rows
        .iter()
        .flatten()
        .map(|cell| cell.map_or(1, |n| n.to_string().len()))
        .max()
        .unwrap_or(1);

    let mut lines: Vec<Line> = rows
        .iter()
        .enumerate()
        .map(|(r, row)| {
            let mut spans = vec![Span::styled(
                format!("{:>2} ", r),
                Style::default().fg(DEFAULT_THEME.comment),
            )];
            spans.extend(row.iter().enumerate().map(|(c, &cell)| {
                let hl = highlight_at(highlights, Target::Cell { row: r, col: c });
                Span::styled(format!(" {} ", cell_text(cell, width)), cell_style(hl))
            }));
            Line::from(spans)
        })
        .collect();

    if rows.is_empty() {
        lines.push(Line::styled("[]", Style::default().fg(DEFAULT_THEME.comment)));
    }
    lines.extend(legend(highlights));
    lines
}

pub fn map_lines(map: &BTreeMap<i64, i64>, highlights: &[Highlight]) -> Vec<Line<'static>> {
    if map.is_empty() {
        return vec![Line::styled("{}", Style::default().fg(DEFAULT_THEME.comment))];
    }
    let mut lines: Vec<Line> = map
        .iter()
        .map(|(&k, v)| {
            let key_style = match highlight_at(highlights, Target::Key(k)) {
                Some(hl) => cell_style(Some(hl)),
                None => Style::default().fg(DEFAULT_THEME.number),
            };
            Line::from(vec![
                Span::styled(format!("{:>6}", k), key_style),
                Span::styled(" → ", Style::default().fg(DEFAULT_THEME.comment)),
                Span::styled(v.to_string(), Style::default().fg(DEFAULT_THEME.fg)),
            ])
        })
        .collect();
    lines.extend(legend(highlights));
    lines
}

fn value_line(label: &str, value: &Value) -> Line<'static> {
    let style = if value.is_empty_value() {
        Style::default()
            .fg(DEFAULT_THEME.comment)
            .add_modifier(Modifier::ITALIC)
    } else {
        Style::default()
            .fg(DEFAULT_THEME.secondary)
            .add_modifier(Modifier::BOLD)
    };
    Line::from(vec![
        Span::styled(format!("{}: ", label), Style::default().fg(DEFAULT_THEME.fg)),
        Span::styled(value.to_string(), style),
    ])
}

/// Lines for one visualizer, or None when the variable is absent
pub fn visualizer_lines(spec: &VisualizerSpec, entry: &TraceEntry) -> Option<Vec<Line<'static>>> {
    let value = entry.variable(spec.variable)?;
    let highlights = entry.highlights_for(spec.variable);

    let lines = match (spec.kind, value) {
        (VisualizerKind::Array, Value::Sequence(items)) => array_lines(items, highlights),
        (VisualizerKind::Grid, Value::Matrix(rows)) => grid_lines(rows, highlights),
        (VisualizerKind::Map, Value::Map(map)) => map_lines(map, highlights),
        (VisualizerKind::Value, value) => return Some(vec![value_line(spec.label, value)]),
        // kind and value disagree: show the raw value instead of guessing a layout
        (_, value) => vec![Line::raw(value.to_string())],
    };

    let mut out = vec![Line::styled(
        spec.label.to_string(),
        Style::default()
            .fg(DEFAULT_THEME.primary)
            .add_modifier(Modifier::BOLD),
    )];
    out.extend(lines);
    out.push(Line::raw(""));
    Some(out)
}

fn is_structure(spec: &VisualizerSpec) -> bool {
    matches!(spec.kind, VisualizerKind::Grid | VisualizerKind::Array)
}

fn collect(specs: &[&VisualizerSpec], entry: &TraceEntry) -> Vec<Line<'static>> {
    specs
        .iter()
        .filter_map(|spec| visualizer_lines(spec, entry))
        .flatten()
        .collect()
}

/// Render the visualization pane
pub fn render_visualizer_pane(
    frame: &mut Frame,
    area: Rect,
    config: &VisualConfig,
    entry: Option<&TraceEntry>,
) {
    let block = Block::default()
        .title(" Visualization ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border_normal));

    let Some(entry) = entry else {
        let paragraph = Paragraph::new("Nothing to visualize yet (inputs do not match this problem)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
        return;
    };

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let all: Vec<&VisualizerSpec> = config.visualizers.iter().collect();
    match config.layout {
        VisualLayout::Split => {
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
                .split(inner);
            let (structures, scalars): (Vec<&VisualizerSpec>, Vec<&VisualizerSpec>) =
                all.into_iter().partition(|spec| is_structure(spec));
            frame.render_widget(Paragraph::new(collect(&structures, entry)), columns[0]);
            frame.render_widget(Paragraph::new(collect(&scalars, entry)), columns[1]);
        }
        VisualLayout::Grid | VisualLayout::Array => {
            frame.render_widget(Paragraph::new(collect(&all, entry)), inner);
        }
    }
}
