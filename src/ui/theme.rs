use ratatui::style::Color;

use crate::config::ColorsConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSupport {
    Auto,
    Truecolor,
    Color256,
    Mono,
}

impl ColorSupport {
    pub fn from_config_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "truecolor" | "24bit" => ColorSupport::Truecolor,
            "256" | "256color" => ColorSupport::Color256,
            "mono" | "monochrome" => ColorSupport::Mono,
            _ => ColorSupport::Auto,
        }
    }
}

pub fn detect_color_support() -> ColorSupport {
    let colorterm = std::env::var("COLORTERM")
        .unwrap_or_default()
        .to_lowercase();
    if colorterm.contains("truecolor") || colorterm.contains("24bit") {
        return ColorSupport::Truecolor;
    }
    ColorSupport::Color256
}

pub fn resolve_color_support(config: &str) -> ColorSupport {
    let parsed = ColorSupport::from_config_str(config);
    if parsed == ColorSupport::Auto {
        detect_color_support()
    } else {
        parsed
    }
}

/// Gauge colors from the `[colors]` table, as hex strings.
#[derive(Debug, Clone)]
pub struct UsageOverrides {
    pub low: String,
    pub mid: String,
    pub high: String,
}

impl UsageOverrides {
    pub fn from_config(colors: &ColorsConfig) -> Self {
        Self {
            low: colors.usage_low.clone(),
            mid: colors.usage_mid.clone(),
            high: colors.usage_high.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: &'static str,
    pub title_fg: Color,
    pub tab_active_bg: Color,
    pub tab_active_fg: Color,
    pub tab_inactive_fg: Color,
    pub status_err: Color,
    pub statusbar_bg: Color,
    pub overlay_border: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub label_fg: Color,
    pub pill_key_bg: Color,
    pub pill_key_fg: Color,
    pub pill_desc_fg: Color,
    pub surface_bg: Color,
    pub gauge_unfilled: Color,
    /// Gauge fill for low, mid and high utilization.
    pub usage_colors: [Color; 3],
}

impl Theme {
    pub fn from_config(theme_name: &str, usage: &UsageOverrides, support: ColorSupport) -> Self {
        let mut theme = match theme_name.to_lowercase().as_str() {
            "light" => Self::light(),
            "vivid" => Self::vivid(),
            "mono" => Self::mono(),
            _ => Self::dark(),
        };

        if support == ColorSupport::Mono {
            theme = Self::mono();
        } else if theme.name != "mono" {
            theme.apply_usage_overrides(usage);
        }

        theme.apply_color_support(support);
        theme
    }

    pub fn next(&self, usage: &UsageOverrides, support: ColorSupport) -> Self {
        if support == ColorSupport::Mono {
            return Self::mono();
        }
        let next_name = match self.name {
            "dark" => "vivid",
            "vivid" => "light",
            "light" => "mono",
            _ => "dark",
        };
        Theme::from_config(next_name, usage, support)
    }

    pub fn usage_color(&self, percent: f32) -> Color {
        if percent >= 80.0 {
            self.usage_colors[2]
        } else if percent >= 50.0 {
            self.usage_colors[1]
        } else {
            self.usage_colors[0]
        }
    }

    fn apply_usage_overrides(&mut self, usage: &UsageOverrides) {
        let low = parse_hex_color(&usage.low);
        let mid = parse_hex_color(&usage.mid);
        let high = parse_hex_color(&usage.high);

        // Overrides apply only when all three parse
        if let (Some(low), Some(mid), Some(high)) = (low, mid, high) {
            self.usage_colors = [low, mid, high];
        }
    }

    fn apply_color_support(&mut self, support: ColorSupport) {
        let map = |c: Color| adapt_color(c, support);

        self.title_fg = map(self.title_fg);
        self.tab_active_bg = map(self.tab_active_bg);
        self.tab_active_fg = map(self.tab_active_fg);
        self.tab_inactive_fg = map(self.tab_inactive_fg);
        self.status_err = map(self.status_err);
        self.statusbar_bg = map(self.statusbar_bg);
        self.overlay_border = map(self.overlay_border);
        self.text_primary = map(self.text_primary);
        self.text_secondary = map(self.text_secondary);
        self.label_fg = map(self.label_fg);
        self.pill_key_bg = map(self.pill_key_bg);
        self.pill_key_fg = map(self.pill_key_fg);
        self.pill_desc_fg = map(self.pill_desc_fg);
        self.surface_bg = map(self.surface_bg);
        self.gauge_unfilled = map(self.gauge_unfilled);

        self.usage_colors = self.usage_colors.map(map);
    }

    pub fn dark() -> Self {
        Theme {
            name: "dark",
            title_fg: Color::Rgb(103, 232, 249),
            tab_active_bg: Color::Green,
            tab_active_fg: Color::Black,
            tab_inactive_fg: Color::Gray,
            status_err: Color::Red,
            statusbar_bg: Color::DarkGray,
            overlay_border: Color::DarkGray,
            text_primary: Color::White,
            text_secondary: Color::Gray,
            label_fg: Color::Rgb(103, 232, 249),
            pill_key_bg: Color::Yellow,
            pill_key_fg: Color::Black,
            pill_desc_fg: Color::White,
            surface_bg: Color::DarkGray,
            gauge_unfilled: Color::DarkGray,
            usage_colors: [
                Color::Rgb(16, 185, 129),
                Color::Rgb(249, 115, 22),
                Color::Rgb(239, 68, 68),
            ],
        }
    }

    pub fn light() -> Self {
        Theme {
            name: "light",
            title_fg: Color::Blue,
            tab_active_bg: Color::Blue,
            tab_active_fg: Color::White,
            tab_inactive_fg: Color::DarkGray,
            status_err: Color::Red,
            statusbar_bg: Color::Rgb(220, 220, 220),
            overlay_border: Color::Rgb(150, 150, 150),
            text_primary: Color::Black,
            text_secondary: Color::DarkGray,
            label_fg: Color::Rgb(70, 130, 180),
            pill_key_bg: Color::Blue,
            pill_key_fg: Color::White,
            pill_desc_fg: Color::Black,
            surface_bg: Color::Rgb(200, 200, 200),
            gauge_unfilled: Color::Rgb(200, 200, 200),
            usage_colors: [
                Color::Rgb(100, 180, 100),
                Color::Rgb(220, 180, 50),
                Color::Rgb(200, 60, 60),
            ],
        }
    }

    pub fn vivid() -> Self {
        Theme {
            name: "vivid",
            title_fg: Color::Rgb(203, 166, 247),
            tab_active_bg: Color::Rgb(203, 166, 247),
            tab_active_fg: Color::Rgb(30, 30, 46),
            tab_inactive_fg: Color::Rgb(166, 173, 200),
            status_err: Color::Rgb(243, 139, 168),
            statusbar_bg: Color::Rgb(49, 50, 68),
            overlay_border: Color::Rgb(69, 71, 90),
            text_primary: Color::Rgb(205, 214, 244),
            text_secondary: Color::Rgb(166, 173, 200),
            label_fg: Color::Rgb(125, 211, 252),
            pill_key_bg: Color::Rgb(203, 166, 247),
            pill_key_fg: Color::Rgb(30, 30, 46),
            pill_desc_fg: Color::Rgb(205, 214, 244),
            surface_bg: Color::Rgb(49, 50, 68),
            gauge_unfilled: Color::Rgb(69, 71, 90),
            usage_colors: [
                Color::Rgb(166, 227, 161),
                Color::Rgb(250, 179, 135),
                Color::Rgb(243, 139, 168),
            ],
        }
    }

    pub fn mono() -> Self {
        Theme {
            name: "mono",
            title_fg: Color::White,
            tab_active_bg: Color::White,
            tab_active_fg: Color::Black,
            tab_inactive_fg: Color::Gray,
            status_err: Color::White,
            statusbar_bg: Color::Black,
            overlay_border: Color::White,
            text_primary: Color::White,
            text_secondary: Color::Gray,
            label_fg: Color::White,
            pill_key_bg: Color::White,
            pill_key_fg: Color::Black,
            pill_desc_fg: Color::White,
            surface_bg: Color::Black,
            gauge_unfilled: Color::Black,
            usage_colors: [Color::Gray, Color::White, Color::White],
        }
    }
}

fn parse_hex_color(s: &str) -> Option<Color> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);
    if s.len() != 6 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let r = u8::from_str_radix(&s[0..2], 16).ok()?;
    let g = u8::from_str_radix(&s[2..4], 16).ok()?;
    let b = u8::from_str_radix(&s[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

fn adapt_color(color: Color, support: ColorSupport) -> Color {
    match support {
        ColorSupport::Truecolor | ColorSupport::Auto => color,
        ColorSupport::Color256 => match color {
            Color::Rgb(r, g, b) => Color::Indexed(rgb_to_ansi256(r, g, b)),
            _ => color,
        },
        ColorSupport::Mono => match color {
            Color::Rgb(r, g, b) => {
                let luminance = 0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64;
                if luminance > 128.0 {
                    Color::White
                } else {
                    Color::Black
                }
            }
            Color::White | Color::Black | Color::Gray | Color::DarkGray => color,
            _ => Color::White,
        },
    }
}

fn rgb_to_ansi256(r: u8, g: u8, b: u8) -> u8 {
    let r = (r as f32 / 255.0 * 5.0).round() as u8;
    let g = (g as f32 / 255.0 * 5.0).round() as u8;
    let b = (b as f32 / 255.0 * 5.0).round() as u8;
    16 + 36 * r + 6 * g + b
}
