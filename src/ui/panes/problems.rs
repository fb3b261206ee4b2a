//! Problem sidebar: collapsible categories with their problems

use crate::registry::{AlgorithmDescriptor, Category, Registry};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use rustc_hash::FxHashSet;

/// Category ids expanded when the app starts
pub const DEFAULT_EXPANDED: [&str; 2] = ["arrays", "dp"];

/// Ids of the categories whose problems are listed
pub type Expanded = FxHashSet<&'static str>;

/// A row the sidebar cursor can rest on
#[derive(Debug, Clone, Copy)]
pub enum SidebarRow<'a> {
    Category(&'a Category),
    Problem(&'a AlgorithmDescriptor),
}

/// Selectable rows in display order: every header, plus the problems of
/// expanded categories
pub fn sidebar_rows<'a>(registry: &'a Registry, expanded: &Expanded) -> Vec<SidebarRow<'a>> {
    let mut rows = Vec::new();
    for category in registry.categories() {
        rows.push(SidebarRow::Category(category));
        if expanded.contains(category.id) {
            rows.extend(category.problems.iter().map(SidebarRow::Problem));
        }
    }
    rows
}

fn header_line(category: &Category, is_open: bool, is_cursor: bool) -> Line<'static> {
    let mut style = if category.problems.is_empty() {
        Style::default().fg(DEFAULT_THEME.comment)
    } else {
        Style::default()
            .fg(DEFAULT_THEME.primary)
            .add_modifier(Modifier::BOLD)
    };
    if is_cursor {
        style = style.bg(DEFAULT_THEME.current_line_bg);
    }
    let arrow = if is_open { "▾ " } else { "▸ " };
    Line::styled(format!("{}{}", arrow, category.title), style)
}

fn problem_line(problem: &AlgorithmDescriptor, is_selected: bool, is_cursor: bool) -> Line<'static> {
    let marker = if is_selected { "● " } else { "  " };
    let mut style = Style::default().fg(if is_selected {
        DEFAULT_THEME.secondary
    } else {
        DEFAULT_THEME.fg
    });
    if is_cursor {
        style = style.bg(DEFAULT_THEME.current_line_bg).add_modifier(Modifier::BOLD);
    }
    Line::from(vec![
        Span::raw("  "),
        Span::styled(format!("{}{}", marker, problem.title), style),
    ])
}

/// Sidebar lines plus the line index of the cursor row
pub fn problem_lines(
    registry: &Registry,
    expanded: &Expanded,
    cursor: usize,
    selected_id: &str,
) -> (Vec<Line<'static>>, usize) {
    let mut lines = Vec::new();
    let mut cursor_line = 0;

    for (row, item) in sidebar_rows(registry, expanded).into_iter().enumerate() {
        let is_cursor = row == cursor;
        if is_cursor {
            cursor_line = lines.len();
        }
        match item {
            SidebarRow::Category(category) => {
                let is_open = expanded.contains(category.id);
                lines.push(header_line(category, is_open, is_cursor));
                if is_open && category.problems.is_empty() {
                    lines.push(Line::styled(
                        "    Coming soon",
                        Style::default()
                            .fg(DEFAULT_THEME.comment)
                            .add_modifier(Modifier::ITALIC),
                    ));
                }
            }
            SidebarRow::Problem(problem) => {
                lines.push(problem_line(problem, problem.id == selected_id, is_cursor));
            }
        }
    }

    (lines, cursor_line)
}

pub fn render_problems_pane(
    frame: &mut Frame,
    area: Rect,
    registry: &Registry,
    expanded: &Expanded,
    cursor: usize,
    selected_id: &str,
    is_focused: bool,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(" Problems ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let (lines, cursor_line) = problem_lines(registry, expanded, cursor, selected_id);
    let visible = area.height.saturating_sub(2) as usize;
    let offset = (cursor_line + 1).saturating_sub(visible);

    let paragraph = Paragraph::new(lines)
        .block(block)
        .scroll((offset as u16, 0));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::registry;

    fn expanded(ids: &[&'static str]) -> Expanded {
        ids.iter().copied().collect()
    }

    #[test]
    fn test_collapsed_categories_show_only_headers() {
        let registry = registry();
        let (lines, _) = problem_lines(registry, &Expanded::default(), 0, "two-sum");
        assert_eq!(lines.len(), registry.categories().len());
        assert!(lines[0].spans[0].content.starts_with('▸'));
    }

    #[test]
    fn test_expanded_category_lists_its_problems() {
        let registry = registry();
        let rows = sidebar_rows(registry, &expanded(&DEFAULT_EXPANDED));
        let problems: Vec<&str> = rows
            .iter()
            .filter_map(|row| match row {
                SidebarRow::Problem(p) => Some(p.id),
                SidebarRow::Category(_) => None,
            })
            .collect();
        assert_eq!(problems, vec!["two-sum", "unique-paths"]);
    }

    #[test]
    fn test_empty_expanded_category_says_coming_soon() {
        let registry = registry();
        let (lines, _) = problem_lines(registry, &expanded(&["stack"]), 0, "two-sum");
        let stack = lines
            .iter()
            .position(|l| l.spans[0].content.contains("Stack"))
            .unwrap();
        assert!(lines[stack].spans[0].content.starts_with('▾'));
        assert!(lines[stack + 1].spans[0].content.contains("Coming soon"));
    }

    #[test]
    fn test_cursor_row_points_at_problem() {
        let registry = registry();
        let (lines, row) = problem_lines(registry, &expanded(&["arrays"]), 1, "two-sum");
        // first category header, then its first problem
        assert_eq!(row, 1);
        assert!(lines[row].spans[1].content.contains("Two Sum"));
        assert!(lines[row].spans[1].content.starts_with('●'));
    }
}
