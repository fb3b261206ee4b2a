//! Code listing pane with syntax highlighting
//!
//! Renders the problem's reference listing with the active line of the
//! current trace entry marked. The listing is display text only.
//!
//! # Features
//!
//! - Keyword, builtin, number and comment highlighting for the Python listings
//! - Current line highlighting with arrow indicator
//! - Keeps the active line at a stable visual row while stepping
//!
//! # Rendering
//!
//! The pane uses a simple character-by-character tokenizer to apply syntax
//! highlighting styles without requiring a full lexer.

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Simple syntax highlighting for a Python-like listing line
fn highlight_source_code(line: &str) -> Line<'_> {
    let mut spans = Vec::new();
    let mut current_word = String::new();

    let chars: Vec<(usize, char)> = line.char_indices().collect();
    let mut i = 0;

    while i < chars.len() {
        let (byte_idx, c) = chars[i];

        // Comments run to end of line
        if c == '#' {
            if !current_word.is_empty() {
                spans.push(word_span(std::mem::take(&mut current_word), false));
            }
            spans.push(Span::styled(
                line[byte_idx..].to_string(),
                Style::default().fg(DEFAULT_THEME.comment),
            ));
            return Line::from(spans);
        }

        if !c.is_alphanumeric() && c != '_' {
            if !current_word.is_empty() {
                let is_call = c == '(';
                spans.push(word_span(std::mem::take(&mut current_word), is_call));
            }

            let style = match c {
                '{' | '}' | '(' | ')' | '[' | ']' => Style::default().fg(DEFAULT_THEME.primary),
                _ => Style::default().fg(DEFAULT_THEME.fg),
            };
            spans.push(Span::styled(c.to_string(), style));
            i += 1;
            continue;
        }

        current_word.push(c);
        i += 1;
    }

    if !current_word.is_empty() {
        spans.push(word_span(current_word, false));
    }

    Line::from(spans)
}

fn word_span(word: String, is_call: bool) -> Span<'static> {
    let style = get_keyword_style(&word, is_call);
    Span::styled(word, style)
}

fn get_keyword_style(word: &str, is_call: bool) -> Style {
    match word {
        "int" | "bool" | "List" | "None" | "True" | "False" => {
            Style::default().fg(DEFAULT_THEME.type_name)
        }
        "class" | "def" | "return" | "if" | "elif" | "else" | "while" | "for" | "in"
        | "or" | "and" | "not" => Style::default()
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::BOLD),
        "self" => Style::default()
            .fg(DEFAULT_THEME.secondary)
            .add_modifier(Modifier::ITALIC),
        _ if word.chars().all(|c| c.is_ascii_digit()) => {
            Style::default().fg(DEFAULT_THEME.number)
        }
        _ if is_call => Style::default().fg(DEFAULT_THEME.function),
        _ => Style::default().fg(DEFAULT_THEME.fg),
    }
}

/// Scroll state for the source pane
#[derive(Debug, Default)]
pub struct SourceScrollState {
    pub offset: usize,
    /// Visual row the active line is pinned to (None = center on first render)
    pub target_line_row: Option<usize>,
}

/// First visible listing line (0-based) that keeps `current_line` at `target_row`
pub fn scroll_offset(current_line: usize, total_lines: usize, visible: usize, target_row: usize) -> usize {
    if current_line == 0 || current_line > total_lines || total_lines <= visible {
        return 0;
    }
    let offset = (current_line - 1).saturating_sub(target_row);
    offset.min(total_lines - visible)
}

/// Render the code listing pane
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    source_code: &str,
    current_line: usize,
    is_focused: bool,
    scroll_state: &mut SourceScrollState,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(border_style);

    let lines: Vec<&str> = source_code.lines().collect();
    let visible_height = area.height.saturating_sub(2).max(1) as usize;

    let target_row = scroll_state
        .target_line_row
        .unwrap_or(visible_height / 2)
        .min(visible_height.saturating_sub(1));
    scroll_state.target_line_row = Some(target_row);

    if current_line > 0 {
        scroll_state.offset = scroll_offset(current_line, lines.len(), visible_height, target_row);
    }

    let visible_lines: Vec<Line> = lines
        .iter()
        .enumerate()
        .skip(scroll_state.offset)
        .take(visible_height)
        .map(|(idx, line)| {
            let line_num = idx + 1;
            let is_current = line_num == current_line;

            let (marker, num_style) = if is_current {
                (
                    "▶",
                    Style::default()
                        .fg(DEFAULT_THEME.secondary)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                (" ", Style::default().fg(DEFAULT_THEME.comment))
            };

            let mut content_line = highlight_source_code(line);
            if is_current {
                let bg = Style::default().bg(DEFAULT_THEME.current_line_bg);
                for span in &mut content_line.spans {
                    span.style = span.style.patch(bg);
                }
            }

            let mut final_spans = vec![Span::styled(format!("{}{:3} ", marker, line_num), num_style)];
            final_spans.extend(content_line.spans);
            Line::from(final_spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}
