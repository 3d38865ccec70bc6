use std::borrow::Cow;

/// Escapes free-form display text for insertion into an element body or
/// attribute value.
///
/// All five XML-significant characters are replaced, quotes included:
///
/// | Char | Entity   |
/// |------|----------|
/// | `&`  | `&amp;`  |
/// | `<`  | `&lt;`   |
/// | `>`  | `&gt;`   |
/// | `"`  | `&quot;` |
/// | `'`  | `&apos;` |
///
/// Returns `Cow::Borrowed` when nothing needed escaping.
///
/// # Examples
///
/// ```
/// use atom_entry::util::escape_text;
///
/// assert_eq!(escape_text("plain"), "plain");
/// assert_eq!(escape_text("<a href=\"x\">"), "&lt;a href=&quot;x&quot;&gt;");
/// ```
pub fn escape_text(s: &str) -> Cow<'_, str> {
    quick_xml::escape::escape(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escapes_all_five() {
        assert_eq!(
            escape_text(r#"<>&"'"#),
            "&lt;&gt;&amp;&quot;&apos;"
        );
    }

    #[test]
    fn test_plain_text_is_borrowed() {
        assert!(matches!(escape_text("Hello world"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_existing_entities_are_escaped_again() {
        // Input is display text, not markup
        assert_eq!(escape_text("&amp;"), "&amp;amp;");
    }

    #[test]
    fn test_unicode_passes_through() {
        assert_eq!(escape_text("café ☕ 你好"), "café ☕ 你好");
    }
}
