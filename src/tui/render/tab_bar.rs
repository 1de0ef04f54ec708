use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, HitTarget, View};
use crate::util::unicode::display_width;

/// Window controls drawn at the right edge, in order
const CONTROLS: [(&str, HitTarget); 3] = [
    (" _ ", HitTarget::Minimize),
    (" \u{25A1} ", HitTarget::Maximize),
    (" \u{00D7} ", HitTarget::Close),
];

/// Render the tab bar with a separator line below, recording clickable regions
pub fn render_tab_bar(frame: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // tabs
            Constraint::Length(1), // separator
        ])
        .split(area);

    render_tabs(frame, app, chunks[0]);
    render_separator(frame, app, chunks[1]);
}

/// Appends spans left to right and remembers where each clickable one landed
struct RowBuilder<'a> {
    spans: Vec<Span<'a>>,
    col: u16,
    hits: Vec<(u16, u16, HitTarget)>,
}

impl<'a> RowBuilder<'a> {
    fn push(&mut self, span: Span<'a>) {
        self.col += display_width(&span.content) as u16;
        self.spans.push(span);
    }

    fn push_hit(&mut self, span: Span<'a>, target: HitTarget) {
        let start = self.col;
        self.push(span);
        self.hits.push((start, self.col - start, target));
    }
}

fn render_tabs(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.theme.background;
    let bg_style = Style::default().bg(bg);
    let sep = Span::styled("\u{2502}", Style::default().fg(app.theme.dim).bg(bg));

    let mut row = RowBuilder {
        spans: Vec::new(),
        col: 0,
        hits: Vec::new(),
    };

    // Leading icon and title
    row.push(Span::styled(" ", bg_style));
    row.push(Span::styled("\u{25B6}", Style::default().fg(app.theme.purple).bg(bg)));
    row.push(Span::styled(
        " TASKBOARD ",
        Style::default()
            .fg(app.theme.cyan)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    ));
    row.push(sep.clone());

    for view in [View::Tasks, View::Completed] {
        let count = app.board.list(view.list()).len();
        let label = format!(" {} ({}) ", view.list().label(), count);
        row.push_hit(Span::styled(label, tab_style(app, app.view == view)), HitTarget::Tab(view));
        row.push(sep.clone());
    }

    row.push_hit(
        Span::styled(
            " + ",
            Style::default()
                .fg(app.theme.green)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
        HitTarget::Add,
    );

    // Right-aligned window controls, if they fit
    let controls_width: u16 = CONTROLS.iter().map(|(s, _)| display_width(s) as u16).sum();
    if row.col + controls_width <= area.width {
        let pad = area.width - row.col - controls_width;
        row.push(Span::styled(" ".repeat(pad as usize), bg_style));
        for (label, target) in CONTROLS {
            let color = if target == HitTarget::Close {
                app.theme.red
            } else {
                app.theme.dim
            };
            row.push_hit(Span::styled(label, Style::default().fg(color).bg(bg)), target);
        }
    }

    for (x, width, target) in row.hits {
        if x >= area.width {
            continue;
        }
        let rect = Rect {
            x: area.x + x,
            y: area.y,
            width: width.min(area.width - x),
            height: 1,
        };
        app.hit_areas.push((rect, target));
    }

    let tabs = Paragraph::new(Line::from(row.spans)).style(bg_style);
    frame.render_widget(tabs, area);
}

fn render_separator(frame: &mut Frame, app: &App, area: Rect) {
    let line = Line::from(Span::styled(
        "\u{2500}".repeat(area.width as usize),
        Style::default().fg(app.theme.dim).bg(app.theme.background),
    ));
    frame.render_widget(Paragraph::new(line), area);
}

fn tab_style(app: &App, is_current: bool) -> Style {
    if is_current {
        Style::default()
            .fg(app.theme.text_bright)
            .bg(app.theme.selection_bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.dim).bg(app.theme.background)
    }
}
