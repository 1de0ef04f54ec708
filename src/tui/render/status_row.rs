use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_segmentation::UnicodeSegmentation;

use crate::tui::app::{App, Mode, View};
use crate::util::unicode::{byte_offset_to_display_col, display_width, truncate_to_width};

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;
    let dim = Style::default().fg(app.theme.dim).bg(bg);

    let (mut spans, hint): (Vec<Span>, String) = match app.mode {
        Mode::Prompt => {
            let Some(prompt) = &app.prompt else {
                return;
            };
            let label = format!(" {}: ", prompt.label());
            let hint = "Enter save  Esc cancel";
            let label_w = display_width(&label);
            let avail = width.saturating_sub(label_w + 1);
            let (start, cursor_col) = visible_window(&prompt.buffer, prompt.cursor, avail);

            let x = area.x + (label_w + cursor_col).min(width.saturating_sub(1)) as u16;
            frame.set_cursor_position(Position::new(x, area.y));

            let spans = vec![
                Span::styled(
                    label,
                    Style::default()
                        .fg(app.theme.highlight)
                        .bg(bg)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    prompt.buffer[start..].to_string(),
                    Style::default().fg(app.theme.text_bright).bg(bg),
                ),
            ];
            (spans, hint.to_string())
        }
        Mode::Move => (
            vec![badge(app, " MOVE ")],
            "j/k move  g/G top/bottom  Enter done  Esc cancel".to_string(),
        ),
        Mode::Drag => (vec![badge(app, " DRAG ")], "release to drop".to_string()),
        Mode::Navigate => {
            let mut spans = Vec::new();
            if let Some(msg) = &app.status_message {
                spans.push(Span::styled(
                    format!(" {}", truncate_to_width(msg, width.saturating_sub(1))),
                    Style::default().fg(app.theme.highlight).bg(bg),
                ));
            } else if app.config.ui.show_key_hints {
                spans.push(Span::styled(format!(" {}", key_hints(app.view)), dim));
            }
            let counts = format!(
                "{} open \u{00B7} {} done ",
                app.board.active().len(),
                app.board.completed().len()
            );
            (spans, counts)
        }
    };

    // Right-aligned hint when there is room
    let content_width: usize = spans.iter().map(|s| display_width(&s.content)).sum();
    let hint_width = display_width(&hint);
    if content_width + hint_width < width {
        let padding = width - content_width - hint_width;
        spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
        spans.push(Span::styled(hint, dim));
    }

    let para = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(para, area);
}

fn badge<'a>(app: &App, text: &'a str) -> Span<'a> {
    Span::styled(
        text,
        Style::default()
            .fg(app.theme.background)
            .bg(app.theme.highlight)
            .add_modifier(Modifier::BOLD),
    )
}

fn key_hints(view: View) -> &'static str {
    match view {
        View::Tasks => "a add  e edit  x done  d delete  m move  ? help  q quit",
        View::Completed => "r restore  e edit  d delete  ? help  q quit",
    }
}

/// Byte offset to start drawing `buffer` from, and the cursor's column
/// relative to that start, so the cursor stays within `avail` columns.
fn visible_window(buffer: &str, cursor: usize, avail: usize) -> (usize, usize) {
    let mut col = byte_offset_to_display_col(buffer, cursor);
    let mut start = 0;
    for (i, g) in buffer.grapheme_indices(true) {
        if col <= avail || i >= cursor {
            break;
        }
        col -= display_width(g);
        start = i + g.len();
    }
    (start, col)
}
