use std::fmt;

use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Identifies the sub-element of an entry that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementRef {
    /// A `<link>` element, by zero-based insertion index.
    Link { index: usize },
    /// The `<author>` element.
    Author,
    /// The `<contributor>` element.
    Contributor,
    /// A `<category>` element, by zero-based insertion index.
    Category { index: usize },
}

impl ElementRef {
    /// XML element name as written to the document.
    pub fn tag(&self) -> &'static str {
        match self {
            ElementRef::Link { .. } => "link",
            ElementRef::Author => "author",
            ElementRef::Contributor => "contributor",
            ElementRef::Category { .. } => "category",
        }
    }
}

impl fmt::Display for ElementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementRef::Link { index } | ElementRef::Category { index } => {
                write!(f, "{} #{}", self.tag(), index + 1)
            }
            _ => f.write_str(self.tag()),
        }
    }
}

/// Errors raised while serializing an [`Entry`](super::Entry).
///
/// Structural problems are only detected when serialization is requested,
/// never by the setters, so an entry can be assembled in stages.
#[derive(Debug, Error)]
pub enum EntryError {
    /// A record is missing the attribute its element cannot be written without
    /// (`href` on a link, `name` on author/contributor, `term` on a category).
    #[error("The {attribute} attribute of {element} is required")]
    MissingRequiredAttribute {
        element: ElementRef,
        attribute: &'static str,
    },

    /// `updated`/`published` holds a value outside the representable date range.
    #[error("Timestamp {seconds} for <{element}> is out of range")]
    TimestampOutOfRange { element: &'static str, seconds: i64 },

    /// The underlying XML writer failed.
    #[error("XML write error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// The sink behind the XML writer failed.
    #[error("Failed to write entry: {0}")]
    Io(#[from] std::io::Error),
}

// ============================================================================
// Entry Records
// ============================================================================

/// A `<link>` of an entry.
///
/// `href` is required when the entry is serialized; a link built through
/// [`Link::default`] without one is accepted here and rejected later.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Link {
    pub href: Option<String>,
    pub rel: Option<String>,
    pub hreflang: Option<String>,
    pub title: Option<String>,
    pub length: Option<u64>,
}

impl Link {
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: Some(href.into()),
            ..Self::default()
        }
    }

    pub fn rel(mut self, rel: impl Into<String>) -> Self {
        self.rel = Some(rel.into());
        self
    }

    pub fn hreflang(mut self, hreflang: impl Into<String>) -> Self {
        self.hreflang = Some(hreflang.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Size of the linked resource in bytes.
    pub fn length(mut self, length: u64) -> Self {
        self.length = Some(length);
        self
    }
}

/// A `<category>` of an entry. `term` is required at serialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Category {
    pub term: Option<String>,
    pub scheme: Option<String>,
    pub label: Option<String>,
}

impl Category {
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: Some(term.into()),
            ..Self::default()
        }
    }

    pub fn scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = Some(scheme.into());
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// An Atom person construct, used for both `<author>` and `<contributor>`.
///
/// A person with no fields at all is treated as absent. Once any field is
/// set, `name` becomes required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Person {
    pub name: Option<String>,
    pub email: Option<String>,
    pub uri: Option<String>,
}

impl Person {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.uri.is_none()
    }
}

/// Value of an extension element, optionally bound to a namespace URI.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawParam {
    pub value: String,
    #[serde(default)]
    pub namespace: Option<String>,
}
