//! Entry description files.
//!
//! An [`EntryInput`] is a declarative form of an [`Entry`], read from TOML or
//! JSON. Converting it runs the regular setters, so incomplete records are
//! accepted here and reported when the entry is written.
//!
//! ```toml
//! title = "Release notes"
//! updated = 1700000000
//!
//! [[links]]
//! href = "https://example.com/notes"
//! rel = "alternate"
//!
//! [author]
//! name = "Ann"
//!
//! [raw]
//! comments = "12"
//! "media:rating" = { value = "nonadult", namespace = "http://search.yahoo.com/mrss/" }
//! ```

use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;
use thiserror::Error;

use crate::entry::{Category, Entry, Link, Person, RawParam};

/// Maximum accepted size of an input file (1 MB).
const MAX_INPUT_SIZE: u64 = 1_048_576;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("Failed to read entry file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in entry file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid JSON in entry file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Entry file too large: {size} bytes (max {max} bytes)")]
    TooLarge { size: u64, max: u64 },
}

/// Extension element value: bare text, or text with a namespace.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawInput {
    Text(String),
    Namespaced(RawParam),
}

/// Declarative description of one entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EntryInput {
    pub id: Option<String>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub summary: Option<String>,
    pub content: Option<String>,
    pub categories: Vec<Category>,
    pub source: IndexMap<String, String>,
    pub author: Option<Person>,
    pub contributor: Option<Person>,
    pub links: Vec<Link>,
    /// Seconds since the Unix epoch.
    pub updated: Option<i64>,
    /// Seconds since the Unix epoch.
    pub published: Option<i64>,
    pub rights: Option<String>,
    pub raw: IndexMap<String, RawInput>,
}

impl EntryInput {
    /// Reads an entry file. `.json` files are parsed as JSON, anything else
    /// as TOML.
    pub fn load(path: &Path) -> Result<Self, InputError> {
        let size = std::fs::metadata(path)?.len();
        if size > MAX_INPUT_SIZE {
            return Err(InputError::TooLarge {
                size,
                max: MAX_INPUT_SIZE,
            });
        }

        let content = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let input = if is_json {
            Self::from_json(&content)?
        } else {
            Self::from_toml(&content)?
        };
        tracing::debug!(
            path = %path.display(),
            links = input.links.len(),
            categories = input.categories.len(),
            "Loaded entry file"
        );
        Ok(input)
    }

    pub fn from_toml(content: &str) -> Result<Self, InputError> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_json(content: &str) -> Result<Self, InputError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Builds the entry through its setters, in field order.
    pub fn into_entry(self) -> Entry {
        let mut entry = Entry::new();

        if let Some(id) = self.id {
            entry.id(id);
        }
        if let Some(title) = self.title {
            entry.title(title);
        }
        if let Some(subtitle) = self.subtitle {
            entry.subtitle(subtitle);
        }
        if let Some(summary) = self.summary {
            entry.summary(summary);
        }
        if let Some(content) = self.content {
            entry.content(content);
        }
        for category in self.categories {
            entry.category(category);
        }
        if !self.source.is_empty() {
            entry.source(self.source);
        }
        if let Some(author) = self.author {
            entry.author(author);
        }
        if let Some(contributor) = self.contributor {
            entry.contributor(contributor);
        }
        for link in self.links {
            entry.link(link);
        }
        if let Some(updated) = self.updated {
            entry.updated(updated);
        }
        if let Some(published) = self.published {
            entry.published(published);
        }
        if let Some(rights) = self.rights {
            entry.rights(rights);
        }
        for (key, raw) in self.raw {
            match raw {
                RawInput::Text(value) => entry.raw(key, value),
                RawInput::Namespaced(RawParam {
                    value,
                    namespace: Some(namespace),
                }) => entry.raw_ns(key, value, namespace),
                RawInput::Namespaced(RawParam {
                    value,
                    namespace: None,
                }) => entry.raw(key, value),
            };
        }

        entry
    }
}
