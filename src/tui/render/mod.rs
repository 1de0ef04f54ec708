pub mod board_view;
pub mod help_overlay;
pub mod status_row;
pub mod tab_bar;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;

use super::app::{App, Mode};

/// Main render function: dispatches to sub-renderers
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    app.hit_areas.clear();

    // Maximized hides the chrome; the status row comes back while typing or moving
    let show_tabs = !app.maximized;
    let show_status = !app.maximized || app.mode != Mode::Navigate;

    // Layout: tab bar (2 rows) | content | status row (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(if show_tabs { 2 } else { 0 }),
            Constraint::Min(1),
            Constraint::Length(if show_status { 1 } else { 0 }),
        ])
        .split(area);

    if show_tabs {
        tab_bar::render_tab_bar(frame, app, chunks[0]);
    }

    board_view::render_board_view(frame, app, chunks[1]);

    if show_status {
        status_row::render_status_row(frame, app, chunks[2]);
    }

    // Help overlay (rendered on top of everything)
    if app.show_help {
        help_overlay::render_help_overlay(frame, app, frame.area());
    }
}
