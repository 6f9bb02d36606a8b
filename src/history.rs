use std::fs;
use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;

use crate::palette::Palette;
use crate::utils::strip_bom;
use crate::writer::write_atomic;

/// Slugs of earlier posts, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    slugs: Vec<String>,
}

/// Outcome of reading the history file. Everything except `Loaded` falls
/// back to an empty history.
#[derive(Debug)]
pub enum HistoryLoad {
    Loaded(History),
    Missing,
    Unreadable(io::Error),
    Corrupt(serde_json::Error),
}

impl HistoryLoad {
    pub fn into_history(self) -> History {
        match self {
            HistoryLoad::Loaded(history) => history,
            _ => History::default(),
        }
    }

    /// Prints why the history was reset, if it was.
    pub fn report(&self, path: &Path) {
        let path = Palette::paint(Palette::ACCENT, path.display());
        match self {
            HistoryLoad::Loaded(_) => {}
            HistoryLoad::Missing => {
                Palette::status(
                    Palette::INFO,
                    "history:",
                    format!("{path} not found, starting fresh"),
                );
            }
            HistoryLoad::Unreadable(err) => {
                Palette::warn(format!(
                    "could not read {path} ({err}), continuing with empty history"
                ));
            }
            HistoryLoad::Corrupt(err) => {
                Palette::warn(format!(
                    "{path} is not a JSON list of slugs ({err}), continuing with empty history"
                ));
            }
        }
    }
}

pub fn load_history(path: &Path) -> HistoryLoad {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return HistoryLoad::Missing,
        Err(err) => return HistoryLoad::Unreadable(err),
    };

    match parse_history(&contents) {
        Ok(history) => HistoryLoad::Loaded(history),
        Err(err) => HistoryLoad::Corrupt(err),
    }
}

fn parse_history(contents: &str) -> serde_json::Result<History> {
    serde_json::from_str(strip_bom(contents))
}

impl History {
    pub fn from_slugs(slugs: Vec<String>) -> Self {
        Self { slugs }
    }

    pub fn slugs(&self) -> &[String] {
        &self.slugs
    }

    pub fn len(&self) -> usize {
        self.slugs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slugs.is_empty()
    }

    pub fn contains(&self, slug: &str) -> bool {
        self.slugs.iter().any(|s| s == slug)
    }

    /// The last `limit` entries, oldest first.
    pub fn recent(&self, limit: usize) -> &[String] {
        let start = self.slugs.len().saturating_sub(limit);
        &self.slugs[start..]
    }

    pub fn push(&mut self, slug: impl Into<String>) {
        self.slugs.push(slug.into());
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = self.to_json()?;
        write_atomic(path, &contents)
            .with_context(|| format!("Failed to write history file at {}", path.display()))
    }

    fn to_json(&self) -> Result<String> {
        let mut buf = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
        self.serialize(&mut serializer)?;
        let mut contents = String::from_utf8(buf)?;
        contents.push('\n');
        Ok(contents)
    }
}
