//! Atom `<entry>` model and its XML serialization.
//!
//! An [`Entry`] is filled through chained setters in any order and written
//! out in the fixed element order Atom consumers expect.
//!
//! - `types` - Records (links, categories, people) and the error type
//! - `writer` - Validation and the element-ordered XML writer
//!
//! # Example
//!
//! ```
//! use atom_entry::{Entry, Link, Person};
//!
//! let mut entry = Entry::new();
//! entry
//!     .title("Hello & welcome")
//!     .link(Link::new("https://example.com/hello").rel("alternate"))
//!     .author(Person::new("Ann").email("ann@example.com"))
//!     .updated(1_700_000_000);
//!
//! let xml = entry.serialize().unwrap();
//! assert!(xml.starts_with("<entry><title>Hello &amp; welcome</title>"));
//! ```

mod types;
mod writer;

use indexmap::IndexMap;

pub use types::{Category, ElementRef, EntryError, Link, Person, RawParam};

/// Element names the writer emits itself. Extension elements may reuse them.
pub(crate) const RESERVED_TAGS: &[&str] = &[
    "title",
    "subtitle",
    "link",
    "id",
    "summary",
    "content",
    "source",
    "author",
    "contributor",
    "category",
    "updated",
    "published",
    "rights",
];

/// Container that collects entries for inclusion in a feed document.
pub trait Feed {
    /// Registers `entry` for inclusion.
    fn add_entry(&mut self, entry: &Entry);
}

/// Collects a snapshot of each appended entry.
impl Feed for Vec<Entry> {
    fn add_entry(&mut self, entry: &Entry) {
        self.push(entry.clone());
    }
}

/// One syndication item.
///
/// Setters return `&mut Self` so calls can be chained. [`category`](Self::category)
/// and [`link`](Self::link) append; every other setter replaces the previous
/// value. Fields cannot be unset once written.
///
/// Required record attributes are not checked here; see
/// [`validate`](Self::validate).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entry {
    id: Option<String>,
    title: Option<String>,
    subtitle: Option<String>,
    summary: Option<String>,
    content: Option<String>,
    categories: Vec<Category>,
    source: IndexMap<String, String>,
    author: Option<Person>,
    contributor: Option<Person>,
    links: Vec<Link>,
    updated: Option<i64>,
    published: Option<i64>,
    rights: Option<String>,
    raw_params: IndexMap<String, RawParam>,
}

impl Entry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the entry id. Written verbatim.
    pub fn id(&mut self, id: impl Into<String>) -> &mut Self {
        self.id = Some(id.into());
        self
    }

    pub fn title(&mut self, title: impl Into<String>) -> &mut Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the subtitle. An empty subtitle is not written.
    pub fn subtitle(&mut self, subtitle: impl Into<String>) -> &mut Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn summary(&mut self, summary: impl Into<String>) -> &mut Self {
        self.summary = Some(summary.into());
        self
    }

    /// Sets the HTML body, written as `type="html"` inside a CDATA section.
    pub fn content(&mut self, content: impl Into<String>) -> &mut Self {
        self.content = Some(content.into());
        self
    }

    /// Appends a category.
    pub fn category(&mut self, category: Category) -> &mut Self {
        self.categories.push(category);
        self
    }

    /// Replaces the `<source>` children with `pairs`, kept in iteration order.
    /// Values are written verbatim.
    pub fn source<I, K, V>(&mut self, pairs: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.source = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self
    }

    pub fn author(&mut self, author: Person) -> &mut Self {
        self.author = Some(author);
        self
    }

    pub fn contributor(&mut self, contributor: Person) -> &mut Self {
        self.contributor = Some(contributor);
        self
    }

    /// Appends a link.
    pub fn link(&mut self, link: Link) -> &mut Self {
        self.links.push(link);
        self
    }

    /// Sets the last-updated time in seconds since the Unix epoch.
    pub fn updated(&mut self, seconds: i64) -> &mut Self {
        self.updated = Some(seconds);
        self
    }

    /// Sets the publication time in seconds since the Unix epoch.
    pub fn published(&mut self, seconds: i64) -> &mut Self {
        self.published = Some(seconds);
        self
    }

    /// Sets the rights statement. Written verbatim.
    pub fn rights(&mut self, rights: impl Into<String>) -> &mut Self {
        self.rights = Some(rights.into());
        self
    }

    /// Adds or replaces the extension element `<key>value</key>`.
    ///
    /// Replacing an existing key keeps its first position.
    pub fn raw(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.insert_raw(key.into(), value.into(), None)
    }

    /// Like [`raw`](Self::raw), with the element placed in `namespace`.
    ///
    /// A `prefix:local` key declares `xmlns:prefix`, a plain key declares the
    /// default namespace on that element only.
    pub fn raw_ns(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
        namespace: impl Into<String>,
    ) -> &mut Self {
        self.insert_raw(key.into(), value.into(), Some(namespace.into()))
    }

    fn insert_raw(&mut self, key: String, value: String, namespace: Option<String>) -> &mut Self {
        if RESERVED_TAGS.contains(&key.as_str()) {
            tracing::warn!(tag = %key, "Extension element shares a name with a standard entry element");
        }
        self.raw_params.insert(key, RawParam { value, namespace });
        self
    }

    /// Hands this entry to `feed` and returns it for further chaining.
    pub fn append_to<F: Feed + ?Sized>(&mut self, feed: &mut F) -> &mut Self {
        feed.add_entry(self);
        self
    }
}
