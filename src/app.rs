use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::action::{Action, Direction};
use crate::config::{Config, parse_key};
use crate::system::report::CpuReport;
use crate::system::sampler::UsageSampler;
use crate::ui::specs;
use crate::ui::theme::{ColorSupport, Theme, UsageOverrides, resolve_color_support};
use crate::ui::usage::UsageSlots;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Specs,
    Usage,
}

impl Tab {
    pub const ALL: [Tab; 2] = [Tab::Specs, Tab::Usage];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Specs => "CPU Specifications",
            Tab::Usage => "Live Usage",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Tab::Specs => 0,
            Tab::Usage => 1,
        }
    }

    pub fn next(self) -> Self {
        match self {
            Tab::Specs => Tab::Usage,
            Tab::Usage => Tab::Specs,
        }
    }

    pub fn prev(self) -> Self {
        // Two tabs, so stepping back is the same as stepping forward
        self.next()
    }

    pub fn from_str_config(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "usage" | "live" => Tab::Usage,
            _ => Tab::Specs,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Help,
}

#[derive(Debug, Clone)]
pub struct ResolvedKeybinds {
    pub quit: KeyCode,
    pub next_tab: KeyCode,
    pub prev_tab: KeyCode,
    pub cycle_theme: KeyCode,
    pub help: KeyCode,
    pub refresh: KeyCode,
}

impl ResolvedKeybinds {
    pub fn from_config(kb: &crate::config::KeybindsConfig) -> Self {
        Self {
            quit: parse_key(&kb.quit).unwrap_or(KeyCode::Char('q')),
            next_tab: parse_key(&kb.next_tab).unwrap_or(KeyCode::Tab),
            prev_tab: parse_key(&kb.prev_tab).unwrap_or(KeyCode::BackTab),
            cycle_theme: parse_key(&kb.cycle_theme).unwrap_or(KeyCode::Char('t')),
            help: parse_key(&kb.help).unwrap_or(KeyCode::Char('?')),
            refresh: parse_key(&kb.refresh).unwrap_or(KeyCode::Char('r')),
        }
    }

    /// Returns (key_label, description) pairs for all configurable keybinds.
    pub fn help_entries(&self) -> Vec<(String, &'static str)> {
        vec![
            (key_label(self.quit), "Quit"),
            (key_label(self.next_tab), "Next tab"),
            (key_label(self.prev_tab), "Previous tab"),
            ("1 / 2".to_string(), "Jump to tab"),
            ("↑↓".to_string(), "Scroll specifications"),
            (key_label(self.cycle_theme), "Cycle theme"),
            (key_label(self.refresh), "Sample now"),
            (key_label(self.help), "Toggle help"),
            ("Ctrl+C".to_string(), "Quit (always)"),
        ]
    }
}

pub fn key_label(code: KeyCode) -> String {
    match code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::BackTab => "S-Tab".to_string(),
        KeyCode::Backspace => "Bksp".to_string(),
        KeyCode::Delete => "Del".to_string(),
        KeyCode::Left => "←".to_string(),
        KeyCode::Right => "→".to_string(),
        KeyCode::Up => "↑".to_string(),
        KeyCode::Down => "↓".to_string(),
        _ => "?".to_string(),
    }
}

pub struct App {
    pub running: bool,
    pub report: CpuReport,
    pub slots: UsageSlots,
    sampler: UsageSampler,
    /// Set once sampling fails; no further samples are taken afterwards.
    pub sampling_error: Option<String>,
    pub tab: Tab,
    pub input_mode: InputMode,
    pub specs_scroll: u16,
    /// Inner width of the specifications pane at the last draw, 0 before it.
    pub specs_width: u16,
    pub theme: Theme,
    pub color_support: ColorSupport,
    usage_overrides: UsageOverrides,
    pub core_columns: u16,
    pub refresh_rate_ms: u64,
    pub keybinds: ResolvedKeybinds,
}

impl App {
    /// Display slots are sized from the logical processor count in `report`
    /// and never resized afterwards.
    pub fn new(config: &Config, report: CpuReport, sampler: UsageSampler) -> Self {
        let color_support = resolve_color_support(&config.general.color_support);
        let usage_overrides = UsageOverrides::from_config(&config.colors);
        let theme = Theme::from_config(&config.colors.theme, &usage_overrides, color_support);
        let slots = UsageSlots::new(report.logical_processors);

        App {
            running: true,
            report,
            slots,
            sampler,
            sampling_error: None,
            tab: Tab::from_str_config(&config.general.default_tab),
            input_mode: InputMode::Normal,
            specs_scroll: 0,
            specs_width: 0,
            theme,
            color_support,
            usage_overrides,
            core_columns: config.general.core_columns.max(1),
            refresh_rate_ms: config.general.refresh_rate_ms,
            keybinds: ResolvedKeybinds::from_config(&config.keybinds),
        }
    }

    pub fn on_tick(&mut self) {
        if self.sampling_halted() {
            return;
        }
        self.sample_now();
    }

    /// Takes one sample and writes it into the display slots. Returns the
    /// number of indicators updated, zero when sampling has failed.
    pub fn sample_now(&mut self) -> usize {
        if self.sampling_halted() {
            return 0;
        }
        match self.sampler.sample() {
            Ok(sample) => self.slots.apply(&sample),
            Err(err) => {
                tracing::error!(error = ?err, "CPU usage sampling failed, halting");
                self.sampling_error = Some(err.to_string());
                0
            }
        }
    }

    pub fn sampling_halted(&self) -> bool {
        self.sampling_error.is_some()
    }

    pub fn map_key(&self, key: KeyEvent) -> Action {
        // Ctrl+C always quits (hardwired safety)
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Action::Quit;
        }

        match self.input_mode {
            InputMode::Normal => self.map_key_normal(key),
            InputMode::Help => self.map_key_help(key),
        }
    }

    fn map_key_normal(&self, key: KeyEvent) -> Action {
        let code = key.code;
        let kb = &self.keybinds;

        // Arrows and digit tabs are hardwired (not configurable)
        match code {
            KeyCode::Up => return Action::Scroll(Direction::Up),
            KeyCode::Down => return Action::Scroll(Direction::Down),
            KeyCode::Left => return Action::PrevTab,
            KeyCode::Right => return Action::NextTab,
            KeyCode::Char('1') => return Action::SelectTab(Tab::Specs),
            KeyCode::Char('2') => return Action::SelectTab(Tab::Usage),
            _ => {}
        }

        if code == kb.quit {
            return Action::Quit;
        }
        if code == kb.next_tab {
            return Action::NextTab;
        }
        if code == kb.prev_tab {
            return Action::PrevTab;
        }
        if code == kb.cycle_theme {
            return Action::CycleTheme;
        }
        if code == kb.help {
            return Action::ToggleHelp;
        }
        if code == kb.refresh {
            return Action::Refresh;
        }

        Action::None
    }

    fn map_key_help(&self, key: KeyEvent) -> Action {
        let code = key.code;
        // In help mode, only the help key and Esc dismiss, everything else is ignored
        if code == self.keybinds.help || code == KeyCode::Esc {
            return Action::ToggleHelp;
        }
        Action::None
    }

    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::NextTab => self.tab = self.tab.next(),
            Action::PrevTab => self.tab = self.tab.prev(),
            Action::SelectTab(tab) => self.tab = tab,
            Action::Scroll(dir) => self.scroll(dir),
            Action::CycleTheme => {
                self.theme = self.theme.next(&self.usage_overrides, self.color_support);
            }
            Action::ToggleHelp => {
                self.input_mode = if self.input_mode == InputMode::Help {
                    InputMode::Normal
                } else {
                    InputMode::Help
                };
            }
            Action::Refresh => {
                self.sample_now();
            }
            Action::None => {}
        }
    }

    fn scroll(&mut self, direction: Direction) {
        if self.tab != Tab::Specs {
            return;
        }
        self.specs_scroll = match direction {
            Direction::Up => self.specs_scroll.saturating_sub(1),
            Direction::Down => self.specs_scroll.saturating_add(1).min(self.max_specs_scroll()),
        };
    }

    /// Enough to bring the last wrapped row of the flags to the top of the pane.
    pub fn max_specs_scroll(&self) -> u16 {
        let rows = specs::wrapped_height(&self.report, &self.theme, self.specs_width);
        u16::try_from(rows.saturating_sub(1)).unwrap_or(u16::MAX)
    }

    /// Records the pane width and pulls the scroll back inside the new limit.
    pub fn set_specs_width(&mut self, width: u16) {
        self.specs_width = width;
        self.specs_scroll = self.specs_scroll.min(self.max_specs_scroll());
    }

    pub fn show_help(&self) -> bool {
        self.input_mode == InputMode::Help
    }

    pub fn help_entries(&self) -> Vec<(String, &'static str)> {
        self.keybinds.help_entries()
    }
}
