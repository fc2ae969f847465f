use ratatui::style::{Color, Modifier, Style};

pub(crate) const BASE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

/// Cells whose day has not arrived yet
pub(crate) const LOCKED_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

/// Cells that may be opened
pub(crate) const AVAILABLE_STYLE: Style = BASE_STYLE.fg(Color::LightMagenta);

/// Cells currently open
pub(crate) const OPEN_STYLE: Style = BASE_STYLE
    .fg(Color::LightMagenta)
    .add_modifier(Modifier::BOLD);

pub(crate) const TITLE_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const SUBTITLE_STYLE: Style = BASE_STYLE.fg(Color::Gray);

pub(crate) const LINK_STYLE: Style = BASE_STYLE
    .fg(Color::LightBlue)
    .add_modifier(Modifier::UNDERLINED);

pub(crate) mod viewer {
    use super::*;

    pub(crate) const CAPTION_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

    pub(crate) const IMAGE_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);
}
