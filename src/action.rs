use crate::app::Tab;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Direction {
    Up,
    Down,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    NextTab,
    PrevTab,
    SelectTab(Tab),
    Scroll(Direction),
    CycleTheme,
    ToggleHelp,
    Refresh,
    None,
}
