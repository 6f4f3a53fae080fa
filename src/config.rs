use std::path::{Path, PathBuf};

use crossterm::event::KeyCode;
use serde::Deserialize;

pub const MIN_REFRESH_RATE_MS: u64 = 100;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub colors: ColorsConfig,
    pub keybinds: KeybindsConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub refresh_rate_ms: u64,
    pub default_tab: String,
    pub core_columns: u16,
    pub color_support: String,
    pub log_file: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        GeneralConfig {
            refresh_rate_ms: 1000,
            default_tab: "specs".to_string(),
            core_columns: 2,
            color_support: "auto".to_string(),
            log_file: String::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ColorsConfig {
    pub theme: String,
    pub usage_low: String,
    pub usage_mid: String,
    pub usage_high: String,
}

impl Default for ColorsConfig {
    fn default() -> Self {
        ColorsConfig {
            theme: "dark".to_string(),
            usage_low: "#10b981".to_string(),
            usage_mid: "#f97316".to_string(),
            usage_high: "#ef4444".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct KeybindsConfig {
    pub quit: String,
    pub next_tab: String,
    pub prev_tab: String,
    pub cycle_theme: String,
    pub help: String,
    pub refresh: String,
}

impl Default for KeybindsConfig {
    fn default() -> Self {
        KeybindsConfig {
            quit: "q".to_string(),
            next_tab: "Tab".to_string(),
            prev_tab: "BackTab".to_string(),
            cycle_theme: "t".to_string(),
            help: "?".to_string(),
            refresh: "r".to_string(),
        }
    }
}

impl Config {
    /// Clamps values the UI cannot work with.
    pub fn normalized(mut self) -> Self {
        self.general.refresh_rate_ms = self.general.refresh_rate_ms.max(MIN_REFRESH_RATE_MS);
        self.general.core_columns = self.general.core_columns.max(1);
        self
    }

    pub fn log_file(&self) -> Option<PathBuf> {
        let path = self.general.log_file.trim();
        if path.is_empty() {
            None
        } else {
            Some(PathBuf::from(path))
        }
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("cpuview").join("config.toml"))
}

pub fn load_config() -> Config {
    match config_path() {
        Some(path) if path.exists() => load_config_from_path(&path),
        _ => Config::default(),
    }
}

pub fn load_config_from_path(path: &Path) -> Config {
    let config = match std::fs::read_to_string(path) {
        Ok(contents) => toml::from_str(&contents).unwrap_or_default(),
        Err(_) => Config::default(),
    };
    config.normalized()
}

/// Parses a keybind name: a single character or a named key such as `Tab`.
pub fn parse_key(s: &str) -> Option<KeyCode> {
    let mut chars = s.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Some(KeyCode::Char(c));
    }
    match s.to_lowercase().as_str() {
        "enter" | "return" => Some(KeyCode::Enter),
        "esc" | "escape" => Some(KeyCode::Esc),
        "tab" => Some(KeyCode::Tab),
        "backtab" | "shift+tab" => Some(KeyCode::BackTab),
        "space" => Some(KeyCode::Char(' ')),
        "backspace" => Some(KeyCode::Backspace),
        "delete" | "del" => Some(KeyCode::Delete),
        "left" => Some(KeyCode::Left),
        "right" => Some(KeyCode::Right),
        "up" => Some(KeyCode::Up),
        "down" => Some(KeyCode::Down),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let config = Config::default();
        assert_eq!(config.general.refresh_rate_ms, 1000);
        assert_eq!(config.general.default_tab, "specs");
        assert_eq!(config.general.core_columns, 2);
        assert_eq!(config.colors.theme, "dark");
        assert_eq!(config.keybinds.quit, "q");
        assert!(config.log_file().is_none());
    }

    #[test]
    fn parse_partial_toml() {
        let toml_str = r#"
[general]
refresh_rate_ms = 500
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.refresh_rate_ms, 500);
        // Other fields should be defaults
        assert_eq!(config.general.default_tab, "specs");
        assert_eq!(config.colors.usage_high, "#ef4444");
    }

    #[test]
    fn parse_full_toml() {
        let toml_str = r##"
[general]
refresh_rate_ms = 2000
default_tab = "usage"
core_columns = 4
log_file = "/tmp/cpuview.log"

[colors]
theme = "light"
usage_low = "#00ff00"

[keybinds]
quit = "x"
next_tab = "Right"
"##;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.refresh_rate_ms, 2000);
        assert_eq!(config.general.default_tab, "usage");
        assert_eq!(config.general.core_columns, 4);
        assert_eq!(config.log_file(), Some(PathBuf::from("/tmp/cpuview.log")));
        assert_eq!(config.colors.theme, "light");
        assert_eq!(config.colors.usage_low, "#00ff00");
        assert_eq!(config.keybinds.quit, "x");
        assert_eq!(config.keybinds.next_tab, "Right");
    }

    #[test]
    fn normalized_clamps_unusable_values() {
        let toml_str = r#"
[general]
refresh_rate_ms = 5
core_columns = 0
"#;
        let config = toml::from_str::<Config>(toml_str).unwrap().normalized();
        assert_eq!(config.general.refresh_rate_ms, MIN_REFRESH_RATE_MS);
        assert_eq!(config.general.core_columns, 1);
    }

    #[test]
    fn missing_file_returns_default() {
        let config = load_config_from_path(Path::new("/nonexistent/path/config.toml"));
        assert_eq!(config.general.refresh_rate_ms, 1000);
    }

    #[test]
    fn invalid_toml_returns_default() {
        let temp = std::env::temp_dir().join("cpuview_test_invalid.toml");
        std::fs::write(&temp, "this is not valid toml {{{{").unwrap();
        let config = load_config_from_path(&temp);
        assert_eq!(config.general.refresh_rate_ms, 1000);
        let _ = std::fs::remove_file(&temp);
    }

    #[test]
    fn parse_key_names() {
        assert_eq!(parse_key("q"), Some(KeyCode::Char('q')));
        assert_eq!(parse_key("?"), Some(KeyCode::Char('?')));
        assert_eq!(parse_key("Tab"), Some(KeyCode::Tab));
        assert_eq!(parse_key("BackTab"), Some(KeyCode::BackTab));
        assert_eq!(parse_key("Escape"), Some(KeyCode::Esc));
        assert_eq!(parse_key("space"), Some(KeyCode::Char(' ')));
        assert_eq!(parse_key("F13"), None);
        assert_eq!(parse_key(""), None);
    }
}
