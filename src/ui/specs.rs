use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};
use unicode_width::UnicodeWidthStr;

use crate::system::report::{CpuReport, Section};
use crate::ui::theme::Theme;

const LABEL_WIDTH: usize = 27;
const RULE_WIDTH: usize = 60;

pub fn spec_lines(report: &CpuReport, theme: &Theme) -> Vec<Line<'static>> {
    let label_style = Style::default().fg(theme.label_fg);
    let value_style = Style::default().fg(theme.text_primary);
    let rule_style = Style::default().fg(theme.overlay_border);

    let mut lines = Vec::new();
    let mut previous: Option<Section> = None;
    for field in report.fields() {
        if previous.is_some_and(|s| s != field.section) {
            lines.push(Line::from(Span::styled("\u{2500}".repeat(RULE_WIDTH), rule_style)));
        }
        previous = Some(field.section);
        lines.push(Line::from(vec![
            Span::styled(
                format!("{:<width$}", field.label, width = LABEL_WIDTH),
                label_style,
            ),
            Span::styled(field.value, value_style),
        ]));
    }
    lines.push(Line::from(Span::styled("\u{2500}".repeat(RULE_WIDTH), rule_style)));

    lines.push(Line::from(Span::styled(
        "Instruction Sets (Flags):",
        label_style.add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(Span::styled(report.flags_line(), value_style)));
    lines
}

/// Rows the specifications take once word-wrapped to `width` columns.
/// A width of zero counts one row per line.
pub fn wrapped_height(report: &CpuReport, theme: &Theme, width: u16) -> usize {
    spec_lines(report, theme)
        .iter()
        .map(|line| wrapped_rows(&line.to_string(), width as usize))
        .sum()
}

fn wrapped_rows(text: &str, width: usize) -> usize {
    if width == 0 {
        return 1;
    }
    let mut rows = 1;
    let mut col = 0;
    for word in text.split_whitespace() {
        let w = word.width();
        let needed = if col == 0 { w } else { col + 1 + w };
        if needed <= width {
            col = needed;
            continue;
        }
        if col > 0 {
            rows += 1;
        }
        // Words wider than the pane are split across rows
        rows += w.saturating_sub(1) / width;
        col = (w.saturating_sub(1) % width) + 1;
    }
    rows
}

pub fn render(frame: &mut Frame, area: Rect, report: &CpuReport, scroll: u16, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border));

    let paragraph = Paragraph::new(spec_lines(report, theme))
        .block(block)
        .wrap(Wrap { trim: true })
        .scroll((scroll, 0));
    frame.render_widget(paragraph, area);
}
