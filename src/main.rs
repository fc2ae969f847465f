mod app;
mod catalog;
mod clock;
mod gate;
mod grid;
mod help;
mod reveal;
mod theme;
mod viewer;
use crate::app::App;
use crate::catalog::{Catalog, YMD_FMT};
use crate::clock::{Clock, FixedClock, SystemClock};
use anyhow::Context;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
};
use lexopt::{Arg, Parser, ValueExt};
use ratatui::DefaultTerminal;
use std::io;
use std::path::PathBuf;
use time::{Date, UtcOffset};

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run {
        date: Option<Date>,
        catalog: Option<PathBuf>,
    },
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut date = None;
        let mut catalog = None;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('d') | Arg::Long("date") => {
                    let value = parser.value()?.string()?;
                    match Date::parse(&value, &YMD_FMT) {
                        Ok(d) => date = Some(d),
                        Err(e) => {
                            return Err(lexopt::Error::ParsingFailed {
                                value,
                                error: Box::new(e),
                            })
                        }
                    }
                }
                Arg::Value(value) if catalog.is_none() => catalog = Some(PathBuf::from(value)),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run { date, catalog })
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run { date, catalog } => {
                let catalog = match catalog {
                    Some(path) => {
                        let s = std::fs::read_to_string(&path).with_context(|| {
                            format!("failed to read catalog file {}", path.display())
                        })?;
                        Catalog::from_toml_str(&s).with_context(|| {
                            format!("failed to parse catalog file {}", path.display())
                        })?
                    }
                    None => Catalog::builtin(),
                };
                let offset = UtcOffset::current_local_offset()
                    .context("failed to determine local UTC offset")?;
                match date {
                    Some(d) => run_app(catalog, FixedClock::new(d.midnight().assume_offset(offset))),
                    None => run_app(catalog, SystemClock::new(offset)),
                }
            }
            Command::Help => {
                println!("Usage: advent [-d DATE] [CATALOG]");
                println!();
                println!("Interactive terminal advent calendar that reveals a surprise for each");
                println!("day already reached");
                println!();
                println!("Arguments:");
                println!("  CATALOG           TOML file of dated content to display in place of");
                println!("                    the built-in calendar");
                println!();
                println!("Options:");
                println!("  -d, --date DATE   Treat DATE (YYYY-MM-DD) as the current day");
                println!("  -h, --help        Display this help message and exit");
                println!("  -V, --version     Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    Command::from_parser(Parser::from_env())?.run()
}

fn run_app<C: Clock>(catalog: Catalog, clock: C) -> anyhow::Result<()> {
    with_terminal(|mut terminal| {
        terminal.hide_cursor().context("failed to hide cursor")?;
        App::new(catalog, clock).run(terminal)?;
        Ok(())
    })
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = execute!(io::stdout(), EnableMouseCapture)
        .context("failed to enable mouse capture")
        .and_then(|()| func(terminal));
    let _ = execute!(io::stdout(), DisableMouseCapture);
    ratatui::restore();
    r
}
