use ratatui::style::{Color, Modifier, Style};

pub(crate) const BASE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

pub(crate) const TITLE_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const WEEKDAY_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

/// Days without a logged workout
pub(crate) const REST_DAY_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

pub(crate) const STATUS_STYLE: Style = BASE_STYLE.fg(Color::LightRed);

pub(crate) mod mood {
    use super::*;

    pub(crate) const FRUSTRATED_STYLE: Style = BASE_STYLE.fg(Color::Red).add_modifier(Modifier::BOLD);

    pub(crate) const UNEASY_STYLE: Style = BASE_STYLE
        .fg(Color::Indexed(208))
        .add_modifier(Modifier::BOLD);

    pub(crate) const NEUTRAL_STYLE: Style = BASE_STYLE
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    pub(crate) const GOOD_STYLE: Style = BASE_STYLE.fg(Color::Green).add_modifier(Modifier::BOLD);

    pub(crate) const GREAT_STYLE: Style = BASE_STYLE
        .fg(Color::LightGreen)
        .add_modifier(Modifier::BOLD);

    pub(crate) const UNRATED_STYLE: Style = BASE_STYLE.fg(Color::Gray);
}

pub(crate) mod jumpto {
    use super::*;

    pub(crate) const UNFILLED_CELL_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

    pub(crate) const READY_ENTER_STYLE: Style = BASE_STYLE.add_modifier(Modifier::UNDERLINED);
}
