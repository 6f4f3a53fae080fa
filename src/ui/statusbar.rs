use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::{ResolvedKeybinds, Tab, key_label};
use crate::ui::theme::Theme;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    tab: Tab,
    keybinds: &ResolvedKeybinds,
    sampling_error: Option<&str>,
    refresh_rate_ms: u64,
    theme: &Theme,
) {
    let bg_style = Style::default().bg(theme.statusbar_bg);

    // A sampling failure stays on screen until exit
    if let Some(err) = sampling_error {
        let line = Line::from(Span::styled(
            format!(" Sampling stopped: {err}"),
            Style::default()
                .fg(theme.status_err)
                .add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(Paragraph::new(line).style(bg_style), area);
        return;
    }

    let mut spans = Vec::new();
    spans.extend(pill_spans(&key_label(keybinds.quit), "Quit", theme));
    spans.extend(pill_spans(&key_label(keybinds.next_tab), "Switch", theme));
    if tab == Tab::Specs {
        spans.extend(pill_spans("\u{2191}\u{2193}", "Scroll", theme));
    }
    spans.extend(pill_spans(&key_label(keybinds.cycle_theme), "Theme", theme));
    spans.extend(pill_spans(&key_label(keybinds.help), "Help", theme));
    spans.push(Span::styled(
        format!("  every {refresh_rate_ms} ms"),
        Style::default().fg(theme.text_secondary),
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)).style(bg_style), area);
}

fn pill_spans(key: &str, desc: &'static str, theme: &Theme) -> Vec<Span<'static>> {
    vec![
        Span::raw(" "),
        Span::styled(
            format!(" {key} "),
            Style::default()
                .fg(theme.pill_key_fg)
                .bg(theme.pill_key_bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {desc}"),
            Style::default().fg(theme.pill_desc_fg).bg(theme.surface_bg),
        ),
    ]
}
