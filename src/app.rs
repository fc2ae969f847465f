use crate::catalog::{Catalog, ContentEntry};
use crate::clock::Clock;
use crate::grid::{Grid, GridState};
use crate::help::Help;
use crate::reveal::{RevealState, Toggle};
use crate::theme::{BASE_STYLE, SUBTITLE_STYLE, TITLE_STYLE};
use crate::viewer::Viewer;
use crossterm::event::{
    read, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::{Constraint, Layout, Position, Rect},
    text::{Line, Text},
    widgets::{Paragraph, StatefulWidget, Widget},
    Terminal,
};
use std::io::{self, Write};
use time::{Date, OffsetDateTime};

#[derive(Clone, Debug)]
pub(crate) struct App<C> {
    catalog: Catalog,
    reveal: RevealState,
    grid: GridState,
    clock: C,
    now: OffsetDateTime,
    state: AppState,
}

impl<C: Clock> App<C> {
    pub(crate) fn new(catalog: Catalog, clock: C) -> App<C> {
        let now = clock.now();
        App {
            catalog,
            reveal: RevealState::new(),
            grid: GridState::new(),
            clock,
            now,
            state: AppState::Calendar,
        }
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        while !self.quitting() {
            // Availability depends on the current day, so the clock is
            // re-read before every draw; a cell due to unlock today does so
            // without a restart.
            self.now = self.clock.now();
            self.draw(&mut terminal)?;
            self.handle_input()?;
        }
        Ok(())
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        terminal.draw(|frame| frame.render_widget(self, frame.area()))?;
        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        match read()? {
            Event::Key(KeyEvent {
                code,
                modifiers,
                kind: KeyEventKind::Press,
                ..
            }) => {
                if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                    self.state = AppState::Quitting;
                } else if !normal_modifiers.contains(modifiers) || !self.handle_key(code) {
                    self.beep()?;
                }
            }
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            // Redraw on resize, and we might as well redraw on other stuff
            // too
            _ => (),
        }
        Ok(())
    }

    // Returns `false` if the user pressed an invalid key
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match self.state {
            AppState::Calendar => match key {
                KeyCode::Char('h') | KeyCode::Left => self.grid.move_left(),
                KeyCode::Char('l') | KeyCode::Right => self.grid.move_right(),
                KeyCode::Char('k') | KeyCode::Up => self.grid.move_up(),
                KeyCode::Char('j') | KeyCode::Down => self.grid.move_down(),
                KeyCode::Enter | KeyCode::Char(' ') => self.toggle_selected(),
                KeyCode::Char('?') => {
                    self.state = AppState::Helping;
                    true
                }
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.state = AppState::Quitting;
                    true
                }
                _ => false,
            },
            AppState::Helping => {
                self.state = AppState::Calendar;
                true
            }
            AppState::Viewing(date) => {
                self.dismiss_viewer(date);
                true
            }
            AppState::Quitting => false,
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        match self.state {
            AppState::Calendar => {
                let position = Position::new(mouse.column, mouse.row);
                if let Some(date) = self.grid.select_at(position) {
                    // Clicking a locked cell is deliberately ignored
                    self.toggle(date);
                }
            }
            AppState::Helping => self.state = AppState::Calendar,
            AppState::Viewing(date) => self.dismiss_viewer(date),
            AppState::Quitting => (),
        }
    }

    fn toggle_selected(&mut self) -> bool {
        let Some(date) = self.grid.selected_date() else {
            return false;
        };
        self.toggle(date)
    }

    // Returns `false` if the date is locked and the toggle was a no-op
    fn toggle(&mut self, date: Date) -> bool {
        match self.reveal.toggle(date, self.now) {
            Toggle::Opened => {
                if matches!(self.catalog.get(date), Some(ContentEntry::Picture { .. })) {
                    self.state = AppState::Viewing(date);
                }
                true
            }
            Toggle::Closed => true,
            Toggle::Ignored => false,
        }
    }

    fn dismiss_viewer(&mut self, date: Date) {
        // Closing the overlay re-invokes the toggle for that one date; other
        // cells keep their state.
        self.reveal.toggle(date, self.now);
        self.state = AppState::Calendar;
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }

    fn header_lines(&self) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        if let Some(title) = self.catalog.title() {
            lines.push(Line::styled(title.to_owned(), TITLE_STYLE));
        }
        if let Some(subtitle) = self.catalog.subtitle() {
            lines.push(Line::styled(subtitle.to_owned(), SUBTITLE_STYLE));
        }
        if !lines.is_empty() {
            lines.push(Line::raw(""));
        }
        lines
    }
}

impl<C: Clock> Widget for &mut App<C> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        let header = self.header_lines();
        let header_height = u16::try_from(header.len()).unwrap_or(u16::MAX);
        let [header_area, grid_area] =
            Layout::vertical([Constraint::Length(header_height), Constraint::Min(0)]).areas(area);
        if header_height > 0 {
            Paragraph::new(Text::from(header))
                .centered()
                .render(header_area, buf);
        }
        Grid::new(&self.catalog, &self.reveal, self.now).render(grid_area, buf, &mut self.grid);
        match self.state {
            AppState::Helping => Help.render(area, buf),
            AppState::Viewing(date) => {
                if let Some(ContentEntry::Picture {
                    caption,
                    image,
                    alt,
                }) = self.catalog.get(date)
                {
                    Viewer {
                        caption,
                        image,
                        alt: alt.as_deref(),
                    }
                    .render(area, buf);
                }
            }
            AppState::Calendar | AppState::Quitting => (),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AppState {
    Calendar,
    Helping,
    Viewing(Date),
    Quitting,
}
