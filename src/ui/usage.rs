use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Gauge, Paragraph};

use crate::format::format_percent;
use crate::system::report::UsageSample;
use crate::ui::theme::Theme;

const TOTAL_LABEL: &str = "Total CPU Usage:";
const PERCENT_WIDTH: u16 = 5;
const MIN_GAUGE_WIDTH: u16 = 6;

/// Display slots allocated once from the startup logical processor count.
#[derive(Debug, Clone, PartialEq)]
pub struct UsageSlots {
    total: f32,
    cores: Vec<f32>,
}

impl UsageSlots {
    pub fn new(core_slots: usize) -> Self {
        UsageSlots {
            total: 0.0,
            cores: vec![0.0; core_slots],
        }
    }

    /// Writes a sample into the slots and returns how many indicators changed
    /// (the total plus one per core). Per-core writes stop at whichever of the
    /// sample or the slot array is shorter.
    pub fn apply(&mut self, sample: &UsageSample) -> usize {
        self.total = sample.total_percent;
        let written = self.cores.len().min(sample.core_percents.len());
        self.cores[..written].copy_from_slice(&sample.core_percents[..written]);
        1 + written
    }

    pub fn total(&self) -> f32 {
        self.total
    }

    pub fn cores(&self) -> &[f32] {
        &self.cores
    }
}

/// Widens the grid when the configured column count would not fit every core.
pub fn effective_columns(cores: usize, configured: u16, rows_available: u16) -> u16 {
    let configured = configured.max(1);
    if cores == 0 || rows_available == 0 {
        return configured;
    }
    let needed = cores.div_ceil(rows_available as usize) as u16;
    configured.max(needed)
}

pub fn render(frame: &mut Frame, area: Rect, slots: &UsageSlots, columns: u16, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    render_total_row(frame, chunks[0], slots.total(), theme);

    let heading = Line::from(Span::styled(
        "Per-Core Usage",
        Style::default()
            .fg(theme.text_primary)
            .add_modifier(Modifier::BOLD),
    ))
    .centered();
    frame.render_widget(Paragraph::new(heading), chunks[2]);

    render_core_grid(frame, chunks[3], slots.cores(), columns, theme);
}

fn render_total_row(frame: &mut Frame, area: Rect, total: f32, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(TOTAL_LABEL.len() as u16 + 1),
            Constraint::Min(MIN_GAUGE_WIDTH),
            Constraint::Length(PERCENT_WIDTH + 1),
        ])
        .split(area);

    frame.render_widget(
        Paragraph::new(Span::styled(
            TOTAL_LABEL,
            Style::default().fg(theme.text_primary),
        )),
        chunks[0],
    );
    frame.render_widget(usage_gauge(total, theme), chunks[1]);
    frame.render_widget(
        Paragraph::new(Span::styled(
            format!(" {}", format_percent(total)),
            Style::default()
                .fg(theme.text_primary)
                .add_modifier(Modifier::BOLD),
        )),
        chunks[2],
    );
}

fn render_core_grid(frame: &mut Frame, area: Rect, cores: &[f32], columns: u16, theme: &Theme) {
    if area.height == 0 || area.width == 0 || cores.is_empty() {
        return;
    }

    let columns = effective_columns(cores.len(), columns, area.height);
    let cell_width = area.width / columns;
    if cell_width == 0 {
        return;
    }
    let label_width = format!("Core {}:", cores.len()).len() as u16 + 1;

    for (i, &percent) in cores.iter().enumerate() {
        let row = (i / columns as usize) as u16;
        let col = (i % columns as usize) as u16;
        if row >= area.height {
            break;
        }
        let cell = Rect::new(
            area.x + col * cell_width,
            area.y + row,
            cell_width.saturating_sub(1),
            1,
        );

        let parts = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(label_width),
                Constraint::Min(1),
                Constraint::Length(PERCENT_WIDTH),
            ])
            .split(cell);

        frame.render_widget(
            Paragraph::new(Span::styled(
                format!("Core {}:", i + 1),
                Style::default().fg(theme.text_secondary),
            )),
            parts[0],
        );
        frame.render_widget(usage_gauge(percent, theme), parts[1]);
        frame.render_widget(
            Paragraph::new(Span::styled(
                format!(" {}", format_percent(percent)),
                Style::default().fg(theme.text_primary),
            )),
            parts[2],
        );
    }
}

fn usage_gauge(percent: f32, theme: &Theme) -> Gauge<'static> {
    Gauge::default()
        .gauge_style(
            Style::default()
                .fg(theme.usage_color(percent))
                .bg(theme.gauge_unfilled),
        )
        .ratio((percent as f64 / 100.0).clamp(0.0, 1.0))
        .label("")
}
