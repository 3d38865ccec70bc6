//! Builds Atom `<entry>` elements as well-formed XML.
//!
//! Fields are set through a fluent [`Entry`] builder in any order; the writer
//! emits them in the fixed order Atom consumers expect, escaping display text
//! and passing trusted values (ids, URIs, HTML content) through untouched.
//!
//! - [`entry`] - The entry model, its records and the XML writer
//! - [`config`] - Output settings for standalone documents
//! - [`input`] - TOML/JSON entry descriptions
//! - [`util`] - Escaping and timestamp helpers

pub mod config;
pub mod entry;
pub mod input;
pub mod util;

pub use config::{ConfigError, WriterConfig};
pub use entry::{Category, ElementRef, Entry, EntryError, Feed, Link, Person, RawParam};
pub use input::{EntryInput, InputError};
