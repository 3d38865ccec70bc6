use chrono::{DateTime, SecondsFormat};

/// Formats Unix epoch seconds as an RFC 3339 timestamp at offset `+00:00`.
///
/// Returns `None` when `seconds` falls outside the range chrono can represent.
///
/// # Examples
///
/// ```
/// use atom_entry::util::format_timestamp;
///
/// assert_eq!(
///     format_timestamp(1_700_000_000).as_deref(),
///     Some("2023-11-14T22:13:20+00:00")
/// );
/// ```
pub fn format_timestamp(seconds: i64) -> Option<String> {
    DateTime::from_timestamp(seconds, 0).map(|dt| dt.to_rfc3339_opts(SecondsFormat::Secs, false))
}
