use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::ui::theme::Theme;

const FOOTER: &str = "Esc closes this panel";

/// Keybind overlay sized to its longest entry and centered over `area`.
pub fn render(frame: &mut Frame, area: Rect, entries: &[(String, &str)], theme: &Theme) {
    let key_width = entries
        .iter()
        .map(|(key, _)| key.width())
        .max()
        .unwrap_or(0);
    let desc_width = entries
        .iter()
        .map(|(_, desc)| desc.width())
        .max()
        .unwrap_or(0);

    // key pill, gap, description, plus borders
    let wanted_width = (key_width + 2 + 2 + desc_width).max(FOOTER.len()) + 4;
    let wanted_height = entries.len() + 2 + 2;
    let overlay = centered(
        (wanted_width as u16).min(area.width),
        (wanted_height as u16).min(area.height),
        area,
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border))
        .title(Line::from(Span::styled(
            " Keybinds ",
            Style::default()
                .fg(theme.title_fg)
                .add_modifier(Modifier::BOLD),
        )))
        .style(Style::default().bg(theme.surface_bg));

    let key_style = Style::default()
        .fg(theme.pill_key_fg)
        .bg(theme.pill_key_bg)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(theme.pill_desc_fg);

    let mut lines: Vec<Line> = entries
        .iter()
        .map(|(key, desc)| {
            let pad = key_width.saturating_sub(key.width());
            Line::from(vec![
                Span::raw(" "),
                Span::styled(format!(" {}{key} ", " ".repeat(pad)), key_style),
                Span::styled(format!("  {desc}"), desc_style),
            ])
        })
        .collect();
    lines.push(Line::default());
    lines.push(
        Line::from(Span::styled(
            FOOTER,
            Style::default().fg(theme.text_secondary),
        ))
        .centered(),
    );

    frame.render_widget(Clear, overlay);
    frame.render_widget(Paragraph::new(lines).block(block), overlay);
}

fn centered(width: u16, height: u16, area: Rect) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    cell
}
