use crate::catalog::{Catalog, ContentEntry};
use crate::gate::is_available;
use crate::reveal::RevealState;
use crate::theme::{AVAILABLE_STYLE, BASE_STYLE, LINK_STYLE, LOCKED_STYLE, OPEN_STYLE};
use ratatui::{
    buffer::Buffer,
    layout::{Flex, Layout, Position, Rect},
    style::Modifier,
    text::{Line, Span, Text},
    widgets::{Block, Paragraph, StatefulWidget, Widget},
};
use time::{Date, OffsetDateTime};

/// Columns per cell, border included
const CELL_WIDTH: u16 = 8;

/// Lines per cell, border included
const CELL_HEIGHT: u16 = 4;

/// Cells per row at most, as in the original seven-column layout
const MAX_COLUMNS: u16 = 7;

/// Blank lines between the last cell row and the revealed-content list
const PANEL_GAP: u16 = 1;

const LOCKED_ICON: char = '·';
const CLOSED_ICON: char = '♡';

/// The advent grid: one bordered cell per catalog day, in declaration order,
/// wrapped to the terminal width and horizontally centered.  Content of open
/// message and song cells is listed beneath the grid; open picture cells get
/// a modal overlay drawn by the app on top of this widget.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Grid<'a> {
    catalog: &'a Catalog,
    reveal: &'a RevealState,
    now: OffsetDateTime,
}

impl<'a> Grid<'a> {
    pub(crate) fn new(
        catalog: &'a Catalog,
        reveal: &'a RevealState,
        now: OffsetDateTime,
    ) -> Grid<'a> {
        Grid {
            catalog,
            reveal,
            now,
        }
    }

    fn draw_cell(
        &self,
        buf: &mut Buffer,
        cell: Rect,
        date: Date,
        entry: &ContentEntry,
        selected: bool,
    ) {
        let available = is_available(date, self.now);
        let open = available && self.reveal.is_open(date);
        let mut style = if !available {
            LOCKED_STYLE
        } else if open {
            OPEN_STYLE
        } else {
            AVAILABLE_STYLE
        };
        if selected {
            style = style.add_modifier(Modifier::REVERSED);
        }
        Block::bordered().style(style).render(cell, buf);
        let icon = if !available {
            LOCKED_ICON
        } else if open {
            entry.icon()
        } else {
            CLOSED_ICON
        };
        buf.set_string(cell.x + 1, cell.y + 1, format!("  {:2}  ", date.day()), style);
        buf.set_string(cell.x + 1, cell.y + 2, format!("   {icon}  "), style);
    }

    fn reveal_lines(&self) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        for (date, entry) in self.catalog.days() {
            if !self.reveal.is_open(date) || !is_available(date, self.now) {
                continue;
            }
            match entry {
                ContentEntry::Message { text } => {
                    lines.push(Line::styled(format!("✉ {text}"), OPEN_STYLE));
                }
                ContentEntry::Song { text, link } => {
                    lines.push(Line::styled(format!("♪ {text}"), OPEN_STYLE));
                    lines.push(Line::from_iter([
                        Span::styled("  listen: ", BASE_STYLE),
                        Span::styled(link.clone(), LINK_STYLE),
                    ]));
                }
                ContentEntry::Picture { caption, .. } => {
                    lines.push(Line::styled(format!("◉ {caption}"), OPEN_STYLE));
                }
            }
        }
        lines
    }
}

impl StatefulWidget for Grid<'_> {
    type State = GridState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut GridState) {
        state.cells.clear();
        state.columns = 0;
        if self.catalog.is_empty() || area.width < CELL_WIDTH || area.height < CELL_HEIGHT {
            return;
        }
        let columns =
            usize::from((area.width / CELL_WIDTH).min(MAX_COLUMNS)).min(self.catalog.len());
        state.columns = columns;
        state.selected = state.selected.min(self.catalog.len() - 1);
        let grid_width = u16::try_from(columns).unwrap_or(MAX_COLUMNS) * CELL_WIDTH;
        let [grid_area] = Layout::horizontal([grid_width])
            .flex(Flex::Center)
            .areas(area);
        let mut col: u16 = 0;
        let mut row: u16 = 0;
        let mut bottom = area.y;
        for (i, (date, entry)) in self.catalog.days().enumerate() {
            let Some(y) = CELL_HEIGHT
                .checked_mul(row)
                .and_then(|dy| area.y.checked_add(dy))
            else {
                break;
            };
            if y.saturating_add(CELL_HEIGHT) > area.bottom() {
                break;
            }
            let cell = Rect::new(grid_area.x + CELL_WIDTH * col, y, CELL_WIDTH, CELL_HEIGHT);
            state.cells.push((date, cell));
            self.draw_cell(buf, cell, date, entry, i == state.selected);
            bottom = cell.bottom();
            col += 1;
            if usize::from(col) == columns {
                col = 0;
                row += 1;
            }
        }
        let lines = self.reveal_lines();
        if lines.is_empty() {
            return;
        }
        let panel_top = bottom.saturating_add(PANEL_GAP);
        if panel_top >= area.bottom() {
            return;
        }
        let panel = Rect::new(
            grid_area.x,
            panel_top,
            area.right() - grid_area.x,
            area.bottom() - panel_top,
        );
        Paragraph::new(Text::from(lines)).render(panel, buf);
    }
}

/// Render-time state of the grid: the current selection plus the screen
/// rectangle of every visible cell, recorded for mouse hit-testing.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct GridState {
    selected: usize,
    columns: usize,
    cells: Vec<(Date, Rect)>,
}

impl GridState {
    pub(crate) fn new() -> GridState {
        GridState::default()
    }

    pub(crate) fn selected_date(&self) -> Option<Date> {
        self.cells.get(self.selected).map(|&(date, _)| date)
    }

    /// Moves the selection to the cell under `position`, if any, and returns
    /// its date.
    pub(crate) fn select_at(&mut self, position: Position) -> Option<Date> {
        let (i, date) = self
            .cells
            .iter()
            .enumerate()
            .find_map(|(i, &(date, cell))| cell.contains(position).then_some((i, date)))?;
        self.selected = i;
        Some(date)
    }

    pub(crate) fn move_left(&mut self) -> bool {
        if !self.cells.is_empty() && self.selected > 0 {
            self.selected -= 1;
            true
        } else {
            false
        }
    }

    pub(crate) fn move_right(&mut self) -> bool {
        if self.selected + 1 < self.cells.len() {
            self.selected += 1;
            true
        } else {
            false
        }
    }

    pub(crate) fn move_up(&mut self) -> bool {
        if self.columns > 0 && self.selected >= self.columns {
            self.selected -= self.columns;
            true
        } else {
            false
        }
    }

    pub(crate) fn move_down(&mut self) -> bool {
        if self.columns > 0 && self.selected + self.columns < self.cells.len() {
            self.selected += self.columns;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};
    use time::Month;

    const NOW: OffsetDateTime = datetime!(2024-12-22 10:00 UTC);

    fn message(text: &str) -> ContentEntry {
        ContentEntry::Message {
            text: text.to_owned(),
        }
    }

    fn december_catalog(days: u8) -> Catalog {
        Catalog::new(
            (1..=days)
                .map(|d| {
                    (
                        Date::from_calendar_date(2024, Month::December, d).unwrap(),
                        message("hello"),
                    )
                })
                .collect(),
        )
    }

    fn rows(buf: &Buffer) -> Vec<String> {
        let area = *buf.area();
        (area.top()..area.bottom())
            .map(|y| {
                (area.left()..area.right())
                    .map(|x| buf[(x, y)].symbol())
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_render_records_cells() {
        let catalog = december_catalog(8);
        let reveal = RevealState::new();
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        let mut state = GridState::new();
        Grid::new(&catalog, &reveal, NOW).render(area, &mut buffer, &mut state);
        assert_eq!(state.columns, 7);
        assert_eq!(state.cells.len(), 8);
        // 7 cells of width 8 centered in 80 columns
        assert_eq!(state.cells[0].1, Rect::new(12, 0, 8, 4));
        assert_eq!(state.cells[6].1, Rect::new(60, 0, 8, 4));
        // the eighth cell wraps to a second row
        assert_eq!(state.cells[7].1, Rect::new(12, 4, 8, 4));
    }

    #[test]
    fn test_select_at() {
        let catalog = december_catalog(8);
        let reveal = RevealState::new();
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        let mut state = GridState::new();
        Grid::new(&catalog, &reveal, NOW).render(area, &mut buffer, &mut state);
        assert_eq!(
            state.select_at(Position::new(21, 2)),
            Some(date!(2024 - 12 - 02))
        );
        assert_eq!(state.selected, 1);
        assert_eq!(state.select_at(Position::new(0, 0)), None);
        assert_eq!(state.selected, 1);
    }

    #[test]
    fn test_movement() {
        let catalog = december_catalog(8);
        let reveal = RevealState::new();
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        let mut state = GridState::new();
        Grid::new(&catalog, &reveal, NOW).render(area, &mut buffer, &mut state);
        assert!(!state.move_left());
        assert!(!state.move_up());
        assert!(state.move_down());
        assert_eq!(state.selected_date(), Some(date!(2024 - 12 - 08)));
        assert!(!state.move_down());
        assert!(!state.move_right());
        assert!(state.move_up());
        assert_eq!(state.selected_date(), Some(date!(2024 - 12 - 01)));
        assert!(state.move_right());
        assert_eq!(state.selected_date(), Some(date!(2024 - 12 - 02)));
    }

    #[test]
    fn test_open_key_without_content_renders_nothing() {
        let catalog = december_catalog(1);
        let mut reveal = RevealState::new();
        // an available day that has no catalog entry
        assert!(!matches!(
            reveal.toggle(date!(2024 - 12 - 15), NOW),
            crate::reveal::Toggle::Ignored
        ));
        let area = Rect::new(0, 0, 40, 10);
        let mut empty_buffer = Buffer::empty(area);
        let mut buffer = Buffer::empty(area);
        let mut state = GridState::new();
        let mut empty_state = GridState::new();
        Grid::new(&catalog, &RevealState::new(), NOW).render(
            area,
            &mut empty_buffer,
            &mut empty_state,
        );
        Grid::new(&catalog, &reveal, NOW).render(area, &mut buffer, &mut state);
        assert_eq!(buffer, empty_buffer);
    }

    #[test]
    fn test_song_reveals_link_line() {
        let catalog = Catalog::new(vec![(
            date!(2024 - 12 - 22),
            ContentEntry::Song {
                text: "Our Song - Taylor Swift".to_owned(),
                link: "https://open.spotify.com/track/...".to_owned(),
            },
        )]);
        let mut reveal = RevealState::new();
        reveal.toggle(date!(2024 - 12 - 22), NOW);
        let area = Rect::new(0, 0, 80, 10);
        let mut buffer = Buffer::empty(area);
        let mut state = GridState::new();
        Grid::new(&catalog, &reveal, NOW).render(area, &mut buffer, &mut state);
        let rows = rows(&buffer);
        assert!(rows.iter().any(|r| r.contains("♪ Our Song - Taylor Swift")));
        assert!(rows
            .iter()
            .any(|r| r.contains("listen: https://open.spotify.com/track/...")));
    }
}
