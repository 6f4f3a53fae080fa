use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Tabs};

use crate::app::Tab;
use crate::format::truncate_unicode;
use crate::ui::theme::Theme;

pub const TITLE: &str = "CPU System Information";

/// Title on the left, CPU brand right-aligned in what is left of the row.
pub fn render_title(frame: &mut Frame, area: Rect, brand: &str, theme: &Theme) {
    let title_width = TITLE.len() + 2;
    let brand_room = (area.width as usize).saturating_sub(title_width + 2);

    let title = Line::from(Span::styled(
        format!(" {TITLE} "),
        Style::default()
            .fg(theme.title_fg)
            .add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(Paragraph::new(title), area);

    if brand_room >= 4 && !brand.is_empty() {
        let brand = truncate_unicode(brand, brand_room);
        let brand_line = Line::from(Span::styled(
            format!("{brand} "),
            Style::default().fg(theme.text_secondary),
        ))
        .right_aligned();
        frame.render_widget(Paragraph::new(brand_line), area);
    }
}

pub fn render_tabs(frame: &mut Frame, area: Rect, selected: Tab, theme: &Theme) {
    let titles: Vec<Line> = Tab::ALL
        .iter()
        .map(|tab| Line::from(format!(" {} ", tab.title())))
        .collect();

    let tabs = Tabs::new(titles)
        .select(selected.index())
        .style(Style::default().fg(theme.tab_inactive_fg))
        .highlight_style(
            Style::default()
                .fg(theme.tab_active_fg)
                .bg(theme.tab_active_bg)
                .add_modifier(Modifier::BOLD),
        )
        .divider("\u{2502}");
    frame.render_widget(tabs, area);
}
