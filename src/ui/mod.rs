pub mod help;
pub mod specs;
pub mod statusbar;
pub mod tabs;
pub mod theme;
pub mod usage;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;

use crate::app::{App, Tab};

pub fn draw(frame: &mut Frame, app: &mut App) {
    frame.render_widget(
        Block::default().style(Style::default().bg(app.theme.surface_bg)),
        frame.area(),
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    tabs::render_title(frame, chunks[0], &app.report.brand, &app.theme);
    tabs::render_tabs(frame, chunks[1], app.tab, &app.theme);

    // Borders take one column on each side
    app.set_specs_width(chunks[2].width.saturating_sub(2));

    match app.tab {
        Tab::Specs => specs::render(frame, chunks[2], &app.report, app.specs_scroll, &app.theme),
        Tab::Usage => usage::render(frame, chunks[2], &app.slots, app.core_columns, &app.theme),
    }

    statusbar::render(
        frame,
        chunks[3],
        app.tab,
        &app.keybinds,
        app.sampling_error.as_deref(),
        app.refresh_rate_ms,
        &app.theme,
    );

    // Help overlay, rendered last to appear on top
    if app.show_help() {
        help::render(frame, frame.area(), &app.help_entries(), &app.theme);
    }
}
