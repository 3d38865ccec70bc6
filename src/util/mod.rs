//! Utility functions shared by the entry writer.
//!
//! - **Text escaping**: entity-escaping for free-form display text
//! - **Timestamps**: RFC 3339 formatting of Unix epoch seconds
//!
//! # Examples
//!
//! ```
//! use atom_entry::util::{escape_text, format_timestamp};
//!
//! assert_eq!(escape_text("Tom & Jerry"), "Tom &amp; Jerry");
//! assert_eq!(format_timestamp(0).as_deref(), Some("1970-01-01T00:00:00+00:00"));
//! ```

mod text;
mod time;

pub use text::escape_text;
pub use time::format_timestamp;
