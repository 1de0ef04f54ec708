use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position;

use crate::ops::reorder::{self, DragState};
use crate::tui::app::{App, HitTarget, Mode, View};
use crate::tui::render::board_view::scroll_to_cursor;

use super::*;

pub(super) fn handle_mouse(app: &mut App, event: MouseEvent) {
    if app.show_help {
        if matches!(event.kind, MouseEventKind::Down(_)) {
            app.show_help = false;
        }
        return;
    }

    match event.kind {
        MouseEventKind::Down(MouseButton::Left) => mouse_down(app, event.column, event.row),
        MouseEventKind::Drag(MouseButton::Left) => mouse_drag(app, event.row),
        MouseEventKind::Up(MouseButton::Left) => mouse_up(app),
        MouseEventKind::ScrollDown if app.mode == Mode::Navigate => move_cursor(app, 1),
        MouseEventKind::ScrollUp if app.mode == Mode::Navigate => move_cursor(app, -1),
        _ => {}
    }
}

fn mouse_down(app: &mut App, column: u16, row: u16) {
    if app.mode != Mode::Navigate {
        return;
    }
    let pos = Position::new(column, row);

    let target = app
        .hit_areas
        .iter()
        .find(|(rect, _)| rect.contains(pos))
        .map(|(_, target)| *target);
    if let Some(target) = target {
        match target {
            HitTarget::Tab(view) => switch_view(app, view),
            HitTarget::Add => begin_add(app),
            HitTarget::Minimize => app.suspend_requested = true,
            HitTarget::Maximize => app.maximized = !app.maximized,
            HitTarget::Close => app.should_quit = true,
        }
        return;
    }

    let Some(index) = card_at(app, pos) else {
        return;
    };
    app.view_state_mut(app.view).cursor = index;

    // Only active cards can be dragged
    if app.view == View::Tasks
        && let Some(drag) = DragState::begin(&app.board, index)
    {
        app.drag = Some(drag);
        app.mode = Mode::Drag;
    }
}

fn mouse_drag(app: &mut App, row: u16) {
    let (Some(mut drag), Some(pointer)) = (app.drag, content_row(app, row)) else {
        return;
    };
    let Some(area) = app.list_area else {
        return;
    };
    let spans = app.card_spans(area.width);
    if reorder::drag_to(&mut app.board, &mut drag, &spans, pointer) {
        app.tasks_state.cursor = drag.index;
    }
    app.drag = Some(drag);
}

/// Releasing the button ends the drag and persists the board
fn mouse_up(app: &mut App) {
    if app.drag.take().is_none() {
        return;
    }
    app.mode = Mode::Navigate;
    app.save();
}

/// Content row under a screen row, given the current scroll. Rows above the
/// list count as its first row.
fn content_row(app: &App, row: u16) -> Option<usize> {
    let area = app.list_area?;
    let spans = app.card_spans(area.width);
    let state = app.view_state(app.view);
    let first = scroll_to_cursor(&spans, state.first_visible, state.cursor, area.height as usize);
    let origin = spans.get(first).map_or(0, |s| s.top);
    Some(row.saturating_sub(area.y) as usize + origin)
}

/// Index of the card drawn at `pos`, if any
fn card_at(app: &App, pos: Position) -> Option<usize> {
    let area = app.list_area?;
    if !area.contains(pos) {
        return None;
    }
    let row = content_row(app, pos.y)?;
    app.card_spans(area.width)
        .iter()
        .position(|span| span.contains(row))
}
