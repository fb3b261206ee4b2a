//! Status bar rendering with keybindings and state indicators

use crate::playback::Playback;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// `Step i/N`, or `Step 0/0` for an empty trace
pub fn step_text(playback: &Playback) -> String {
    if playback.is_empty() {
        " Step 0/0 ".to_string()
    } else {
        format!(" Step {}/{} ", playback.cursor() + 1, playback.len())
    }
}

/// Badge for the right edge, if the position or mode warrants one
pub fn badge(playback: &Playback) -> Option<(&'static str, Color)> {
    if playback.is_empty() {
        Some((" NO TRACE ", DEFAULT_THEME.error))
    } else if playback.is_playing() {
        Some((" ▶ PLAYING ", DEFAULT_THEME.secondary))
    } else if playback.is_at_end() {
        Some((" END ", DEFAULT_THEME.error))
    } else if playback.is_at_start() {
        Some((" START ", DEFAULT_THEME.success))
    } else {
        None
    }
}

/// Render the status bar at the bottom.
pub fn render_status_bar(frame: &mut Frame, area: Rect, message: &str, playback: &Playback) {
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    let bar = Style::default().bg(DEFAULT_THEME.current_line_bg);

    let left_spans = vec![
        Span::styled(
            step_text(playback),
            Style::default()
                .bg(if playback.is_empty() {
                    DEFAULT_THEME.error
                } else {
                    DEFAULT_THEME.primary
                })
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {}ms ", playback.speed().as_millis()),
            bar.fg(DEFAULT_THEME.secondary),
        ),
        Span::styled(" | ", bar.fg(DEFAULT_THEME.comment)),
        Span::styled(format!(" {} ", message), bar.fg(DEFAULT_THEME.fg)),
    ];

    let left_paragraph = Paragraph::new(Line::from(left_spans))
        .style(bar)
        .alignment(Alignment::Left);
    frame.render_widget(left_paragraph, layout[0]);

    // Right side: keybinds with visual grouping
    let key_style = Style::default().bg(DEFAULT_THEME.comment).fg(Color::Black);
    let desc_style = bar.fg(DEFAULT_THEME.fg);
    let sep_style = bar.fg(DEFAULT_THEME.comment);

    let mut right_spans = Vec::new();
    for (i, (key, desc)) in [
        (" ←/→ ", " step "),
        (" ⎵ ", " play "),
        (" ⌫ ", " reset "),
        (" [/] ", " speed "),
        (" ⇥ ", " focus "),
        ("q", " quit "),
    ]
    .into_iter()
    .enumerate()
    {
        if i > 0 {
            right_spans.push(Span::styled("│", sep_style));
            right_spans.push(Span::styled(" ", desc_style));
        }
        right_spans.push(Span::styled(key, key_style));
        right_spans.push(Span::styled(desc, desc_style));
    }

    if let Some((text, color)) = badge(playback) {
        right_spans.push(Span::styled("│", sep_style));
        right_spans.push(Span::styled(
            text,
            Style::default()
                .bg(color)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ));
    }

    let right_paragraph = Paragraph::new(Line::from(right_spans))
        .style(bar)
        .alignment(Alignment::Right);
    frame.render_widget(right_paragraph, layout[1]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playback::DEFAULT_SPEED;
    use crate::trace::{Trace, TraceRecorder, Variables};
    use std::sync::Arc;
    use std::time::Instant;

    fn playback(len: usize) -> Playback {
        let mut recorder = TraceRecorder::default();
        for line in 0..len {
            recorder
                .record(line + 1, "step", Variables::new(), Default::default())
                .unwrap();
        }
        Playback::new(Arc::new(recorder.finish()), DEFAULT_SPEED)
    }

    #[test]
    fn test_step_text_is_one_based() {
        let mut p = playback(3);
        assert_eq!(step_text(&p), " Step 1/3 ");
        p.step_forward();
        assert_eq!(step_text(&p), " Step 2/3 ");
        assert_eq!(step_text(&Playback::new(Arc::new(Trace::empty()), DEFAULT_SPEED)), " Step 0/0 ");
    }

    #[test]
    fn test_badges_follow_position_and_mode() {
        let mut p = playback(3);
        assert_eq!(badge(&p).map(|b| b.0), Some(" START "));
        p.step_forward();
        assert_eq!(badge(&p), None);
        p.play(Instant::now());
        assert_eq!(badge(&p).map(|b| b.0), Some(" ▶ PLAYING "));
        p.pause();
        p.step_forward();
        assert_eq!(badge(&p).map(|b| b.0), Some(" END "));
    }
}
