use serde::Deserialize;
use thiserror::Error;
use time::{format_description::FormatItem, macros::date, macros::format_description, Date};

pub(crate) static YMD_FMT: &[FormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// The surprise hidden behind one day's cell.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum ContentEntry {
    Message {
        text: String,
    },
    Song {
        text: String,
        link: String,
    },
    Picture {
        caption: String,
        image: String,
        alt: Option<String>,
    },
}

impl ContentEntry {
    pub(crate) fn icon(&self) -> char {
        match self {
            ContentEntry::Message { .. } => '✉',
            ContentEntry::Song { .. } => '♪',
            ContentEntry::Picture { .. } => '◉',
        }
    }
}

/// An immutable, ordered mapping from day to content, fixed at construction.
/// Cells display in declaration order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Catalog {
    title: Option<String>,
    subtitle: Option<String>,
    entries: Vec<(Date, ContentEntry)>,
}

impl Catalog {
    /// Builds a catalog from `(day, entry)` pairs.  A day declared more than
    /// once keeps its first-seen position, and the last declared entry wins.
    pub(crate) fn new(pairs: Vec<(Date, ContentEntry)>) -> Catalog {
        let mut entries: Vec<(Date, ContentEntry)> = Vec::with_capacity(pairs.len());
        for (date, entry) in pairs {
            if let Some(slot) = entries.iter_mut().find(|(d, _)| *d == date) {
                slot.1 = entry;
            } else {
                entries.push((date, entry));
            }
        }
        Catalog {
            title: None,
            subtitle: None,
            entries,
        }
    }

    pub(crate) fn with_title(mut self, title: &str) -> Catalog {
        self.title = Some(title.to_owned());
        self
    }

    pub(crate) fn with_subtitle(mut self, subtitle: &str) -> Catalog {
        self.subtitle = Some(subtitle.to_owned());
        self
    }

    pub(crate) fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub(crate) fn subtitle(&self) -> Option<&str> {
        self.subtitle.as_deref()
    }

    /// Looks up the content for a day.  Absent days simply have no content;
    /// that is not an error.
    pub(crate) fn get(&self, date: Date) -> Option<&ContentEntry> {
        self.entries
            .iter()
            .find_map(|(d, entry)| (*d == date).then_some(entry))
    }

    pub(crate) fn days(&self) -> impl Iterator<Item = (Date, &ContentEntry)> + '_ {
        self.entries.iter().map(|(d, entry)| (*d, entry))
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parses a catalog from a TOML document:
    ///
    /// ```toml
    /// title = "36 Degree Mist Gang"
    ///
    /// [[entry]]
    /// date = "2024-12-24"
    /// kind = "song"
    /// text = "arsh bacpeht mi gom dost daram"
    /// link = "https://www.youtube.com/watch?v=Tj_zXfdCrEA"
    /// ```
    ///
    /// Date keys and per-kind invariants (songs need a link, pictures an
    /// image) are validated here, so a bad catalog fails before the UI
    /// starts.
    pub(crate) fn from_toml_str(s: &str) -> Result<Catalog, CatalogError> {
        let raw = toml::from_str::<RawCatalog>(s)?;
        let mut pairs = Vec::with_capacity(raw.entries.len());
        for re in raw.entries {
            let date = match Date::parse(&re.date, &YMD_FMT) {
                Ok(d) => d,
                Err(source) => {
                    return Err(CatalogError::InvalidDate {
                        key: re.date,
                        source,
                    })
                }
            };
            let entry = match re.kind {
                RawKind::Message => ContentEntry::Message { text: re.text },
                RawKind::Song => {
                    let link = re.link.unwrap_or_default();
                    if link.is_empty() {
                        return Err(CatalogError::EmptyLink { date });
                    }
                    ContentEntry::Song { text: re.text, link }
                }
                RawKind::Picture => {
                    let image = re.image.unwrap_or_default();
                    if image.is_empty() {
                        return Err(CatalogError::EmptyImage { date });
                    }
                    ContentEntry::Picture {
                        caption: re.text,
                        image,
                        alt: re.alt.filter(|alt| !alt.is_empty()),
                    }
                }
            };
            pairs.push((date, entry));
        }
        let mut catalog = Catalog::new(pairs);
        catalog.title = raw.title;
        catalog.subtitle = raw.subtitle;
        Ok(catalog)
    }

    /// The content set the program ships with.
    pub(crate) fn builtin() -> Catalog {
        fn message(text: &str) -> ContentEntry {
            ContentEntry::Message {
                text: text.to_owned(),
            }
        }

        Catalog::new(vec![
            (date!(2024 - 12 - 21), message("Merry Christmas! 🎄")),
            (
                date!(2024 - 12 - 22),
                ContentEntry::Song {
                    text: "Our Song - Taylor Swift".to_owned(),
                    link: "https://open.spotify.com/track/...".to_owned(),
                },
            ),
            (date!(2024 - 12 - 23), message("I find you quite lovely! 🎄")),
            (
                date!(2024 - 12 - 24),
                ContentEntry::Song {
                    text: "arsh bacpeht mi gom dost daram".to_owned(),
                    link: "https://www.youtube.com/watch?v=Tj_zXfdCrEA&t=1s".to_owned(),
                },
            ),
            (
                date!(2024 - 12 - 25),
                ContentEntry::Picture {
                    caption: "A nice picture".to_owned(),
                    image: "images/IMG_1528.JPG".to_owned(),
                    alt: Some("Our first lil meetup outside code".to_owned()),
                },
            ),
            (date!(2024 - 12 - 26), message("Merry Christmas! 🎄")),
            (date!(2024 - 12 - 27), message("I find you quite lovely! 🎄")),
            (date!(2024 - 12 - 28), message("I find you quite lovely! 🎄")),
            (date!(2024 - 12 - 29), message("I find you quite lovely! 🎄")),
            (date!(2024 - 12 - 30), message("I find you quite lovely! 🎄")),
            (date!(2024 - 12 - 31), message("I find you quite lovely! 🎄")),
            (date!(2025 - 01 - 01), message("I find you quite lovely! 🎄")),
            (date!(2025 - 01 - 02), message("I find you quite lovely! 🎄")),
            (date!(2025 - 01 - 03), message("I find you quite lovely! 🎄")),
            (date!(2025 - 01 - 04), message("I find you quite lovely! 🎄")),
        ])
        .with_title("36 Degree Mist Gang")
        .with_subtitle("Because advent calendars shouldn't end on Christmas ;)")
    }
}

#[derive(Debug, Error)]
pub(crate) enum CatalogError {
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
    #[error("invalid date key {key:?}")]
    InvalidDate {
        key: String,
        source: time::error::Parse,
    },
    #[error("song for {date} has an empty link")]
    EmptyLink { date: Date },
    #[error("picture for {date} has an empty image reference")]
    EmptyImage { date: Date },
}

#[derive(Debug, Deserialize)]
struct RawCatalog {
    title: Option<String>,
    subtitle: Option<String>,
    #[serde(default, rename = "entry")]
    entries: Vec<RawEntry>,
}

#[derive(Debug, Deserialize)]
struct RawEntry {
    date: String,
    kind: RawKind,
    text: String,
    link: Option<String>,
    image: Option<String>,
    alt: Option<String>,
}

#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum RawKind {
    Message,
    Song,
    Picture,
}
