use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph};

use crate::model::{Card, ListKind};
use crate::ops::reorder::CardSpan;
use crate::tui::app::{App, Mode};
use crate::util::unicode::wrap_to_width;

/// Columns taken by a card's borders and padding
const CARD_CHROME: u16 = 4;
/// Width of the drag handle / check mark prefix
const PREFIX_WIDTH: u16 = 2;

fn side_margin(maximized: bool) -> u16 {
    if maximized { 0 } else { 1 }
}

/// Columns available for card text in a list area `width` columns wide
fn text_width(width: u16, maximized: bool) -> usize {
    width
        .saturating_sub(2 * side_margin(maximized) + CARD_CHROME + PREFIX_WIDTH)
        .max(1) as usize
}

/// Vertical layout of `cards` in content rows: each card is its wrapped
/// text plus a border row above and below, stacked without gaps.
pub fn card_spans(cards: &[Card], width: u16, maximized: bool) -> Vec<CardSpan> {
    let wrap = text_width(width, maximized);
    let mut top = 0;
    cards
        .iter()
        .map(|card| {
            let height = wrap_to_width(&card.text, wrap).len() + 2;
            let span = CardSpan { top, height };
            top += height;
            span
        })
        .collect()
}

/// First card to draw so that the cursor card is fully visible, moving the
/// previous value as little as possible.
pub fn scroll_to_cursor(spans: &[CardSpan], first: usize, cursor: usize, height: usize) -> usize {
    if spans.is_empty() {
        return 0;
    }
    let cursor = cursor.min(spans.len() - 1);
    let mut first = first.min(cursor);
    let bottom = spans[cursor].top + spans[cursor].height;
    while first < cursor && bottom > spans[first].top + height {
        first += 1;
    }
    first
}

/// Render the card list for the current view
pub fn render_board_view(frame: &mut Frame, app: &mut App, area: Rect) {
    app.list_area = Some(area);
    let kind = app.view.list();

    if app.board.list(kind).is_empty() {
        let msg = match kind {
            ListKind::Active => " No tasks. Press a to add one.",
            ListKind::Completed => " Nothing completed yet.",
        };
        let para = Paragraph::new(Span::styled(
            msg,
            Style::default().fg(app.theme.dim).bg(app.theme.background),
        ));
        frame.render_widget(para, area);
        return;
    }

    let spans = card_spans(app.board.list(kind), area.width, app.maximized);
    let view = app.view;
    let state = *app.view_state(view);
    let first = scroll_to_cursor(&spans, state.first_visible, state.cursor, area.height as usize);
    app.view_state_mut(view).first_visible = first;

    let moving = match app.mode {
        Mode::Move => app.move_state.map(|m| m.card),
        Mode::Drag => app.drag.map(|d| d.card),
        _ => None,
    };
    let margin = side_margin(app.maximized);
    let wrap = text_width(area.width, app.maximized);
    let origin = spans[first].top;

    for (i, (card, span)) in app.board.list(kind).iter().zip(&spans).enumerate().skip(first) {
        let y = span.top - origin;
        if y >= area.height as usize {
            break;
        }
        let rect = Rect {
            x: area.x + margin,
            y: area.y + y as u16,
            width: area.width.saturating_sub(2 * margin),
            height: span.height.min(area.height as usize - y) as u16,
        };
        let look = if moving == Some(card.id()) {
            CardLook::Lifted
        } else if i == state.cursor {
            CardLook::Selected
        } else {
            CardLook::Plain
        };
        render_card(frame, app, card, kind, look, wrap, rect);
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum CardLook {
    Plain,
    Selected,
    /// Being dragged or moved
    Lifted,
}

fn render_card(
    frame: &mut Frame,
    app: &App,
    card: &Card,
    kind: ListKind,
    look: CardLook,
    wrap: usize,
    rect: Rect,
) {
    let theme = &app.theme;
    let card_bg = match look {
        CardLook::Plain => theme.background,
        CardLook::Selected | CardLook::Lifted => theme.selection_bg,
    };
    let (border_color, border_type) = match look {
        CardLook::Plain => (theme.card_border, BorderType::Rounded),
        CardLook::Selected => (theme.highlight, BorderType::Rounded),
        CardLook::Lifted => (theme.cyan, BorderType::Thick),
    };

    let (prefix, prefix_style, text_style) = match kind {
        ListKind::Active => (
            "\u{2261} ",
            Style::default().fg(theme.cyan).bg(card_bg),
            Style::default().fg(theme.text).bg(card_bg),
        ),
        ListKind::Completed => (
            "\u{2713} ",
            Style::default().fg(theme.green).bg(card_bg),
            Style::default().fg(theme.dim).bg(card_bg),
        ),
    };
    let text_style = if look == CardLook::Plain {
        text_style
    } else {
        text_style.fg(theme.text_bright).add_modifier(Modifier::BOLD)
    };

    let lines: Vec<Line> = wrap_to_width(&card.text, wrap)
        .into_iter()
        .enumerate()
        .map(|(i, text)| {
            let lead = if i == 0 { prefix } else { "  " };
            Line::from(vec![
                Span::styled(lead, prefix_style),
                Span::styled(text, text_style),
            ])
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(Style::default().fg(border_color).bg(card_bg))
        .padding(Padding::horizontal(1))
        .style(Style::default().bg(card_bg));

    frame.render_widget(Paragraph::new(lines).block(block), rect);
}

#[cfg(test)]
mod tests {
    use super::super::test_helpers::*;
    use super::*;
    use crate::model::Board;
    use crate::tui::app::View;

    fn cards(texts: &[&str]) -> Vec<Card> {
        Board::from_texts(texts.iter().map(|s| s.to_string()), Vec::new())
            .active()
            .to_vec()
    }

    #[test]
    fn spans_stack_without_gaps() {
        // 30 columns leave 22 for text
        let spans = card_spans(
            &cards(&["short", "Prepare AI Steering Committee slides", "x"]),
            30,
            false,
        );
        assert_eq!(
            spans,
            vec![
                CardSpan { top: 0, height: 3 },
                CardSpan { top: 3, height: 4 },
                CardSpan { top: 7, height: 3 },
            ]
        );
    }

    #[test]
    fn maximized_cards_are_wider() {
        let text = ["abcdefghijklmnopqrstuvwxy"];
        assert_eq!(card_spans(&cards(&text), 31, false)[0].height, 4);
        assert_eq!(card_spans(&cards(&text), 31, true)[0].height, 3);
    }

    #[test]
    fn scroll_keeps_cursor_visible() {
        let spans: Vec<CardSpan> = (0..10).map(|i| CardSpan { top: i * 3, height: 3 }).collect();
        // 9 rows show three cards
        assert_eq!(scroll_to_cursor(&spans, 0, 2, 9), 0);
        assert_eq!(scroll_to_cursor(&spans, 0, 3, 9), 1);
        assert_eq!(scroll_to_cursor(&spans, 0, 9, 9), 7);
        // Scrolling up snaps to the cursor
        assert_eq!(scroll_to_cursor(&spans, 7, 4, 9), 4);
        // A card taller than the area is pinned to the top
        assert_eq!(scroll_to_cursor(&spans, 0, 5, 2), 5);
        assert_eq!(scroll_to_cursor(&[], 3, 3, 9), 0);
    }

    #[test]
    fn renders_cards_with_handle() {
        let mut app = app_with(&["Buy milk", "Call mom"], &[]);
        let out = render_to_string(40, 10, |frame, area| {
            render_board_view(frame, &mut app, area)
        });
        assert!(out.contains("\u{2261} Buy milk"));
        assert!(out.contains("\u{2261} Call mom"));
        assert!(out.contains('\u{256D}'));
    }

    #[test]
    fn renders_completed_with_check() {
        let mut app = app_with(&[], &["Pay rent"]);
        app.view = View::Completed;
        let out = render_to_string(40, 10, |frame, area| {
            render_board_view(frame, &mut app, area)
        });
        assert!(out.contains("\u{2713} Pay rent"));
    }

    #[test]
    fn empty_lists_show_hint() {
        let mut app = app_with(&[], &[]);
        let out = render_to_string(40, 5, |frame, area| {
            render_board_view(frame, &mut app, area)
        });
        assert!(out.contains("No tasks. Press a to add one."));
        app.view = View::Completed;
        let out = render_to_string(40, 5, |frame, area| {
            render_board_view(frame, &mut app, area)
        });
        assert!(out.contains("Nothing completed yet."));
    }

    #[test]
    fn long_lists_scroll_to_cursor() {
        let texts: Vec<String> = (1..=10).map(|i| format!("card {i}")).collect();
        let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
        let mut app = app_with(&refs, &[]);
        app.tasks_state.cursor = 9;
        let out = render_to_string(40, 9, |frame, area| {
            render_board_view(frame, &mut app, area)
        });
        assert!(out.contains("card 10"));
        assert!(!out.contains("card 7"));
        assert_eq!(app.tasks_state.first_visible, 7);
    }
}
