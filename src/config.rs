//! Writer configuration parser for `atom-entry.toml`.
//!
//! The config file is optional; a missing file yields `WriterConfig::default()`.
//! Unknown keys are silently ignored by serde (with `deny_unknown_fields` off),
//! though we log a warning when the file contains potential typos.
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config file exceeds maximum allowed size.
    #[error("Config file too large: {0}")]
    TooLarge(String),

    /// A key holds a value of the right type that the writer cannot use.
    #[error("Invalid value for '{key}': {reason}")]
    Invalid { key: &'static str, reason: String },
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Output settings for standalone entry documents.
///
/// All fields use `#[serde(default)]` so any subset of keys can be specified.
/// Fragments written with [`Entry::serialize`](crate::Entry::serialize) or into
/// a feed's writer ignore these settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WriterConfig {
    /// Emit `<?xml version="1.0" encoding="UTF-8"?>` before the entry.
    pub xml_declaration: bool,

    /// Put each child element on its own indented line.
    pub indent: bool,

    /// Indentation character, a space or a tab.
    pub indent_char: char,

    /// Number of `indent_char` per nesting level.
    pub indent_size: usize,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            xml_declaration: true,
            indent: true,
            indent_char: ' ',
            indent_size: 2,
        }
    }
}

impl WriterConfig {
    /// Maximum config file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    const KNOWN_KEYS: [&'static str; 4] =
        ["xml_declaration", "indent", "indent_char", "indent_size"];

    /// Load configuration from a TOML file.
    ///
    /// - Missing file → `Ok(WriterConfig::default())`
    /// - Empty file → `Ok(WriterConfig::default())`
    /// - Invalid TOML → `Err(ConfigError::Parse)` with line number info
    /// - `indent_char` other than space or tab → `Err(ConfigError::Invalid)`
    /// - Unknown keys → silently accepted (serde default behavior), logged as warning
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > Self::MAX_FILE_SIZE => {
                return Err(ConfigError::TooLarge(format!(
                    "Config file is {} bytes (max {} bytes)",
                    meta.len(),
                    Self::MAX_FILE_SIZE
                )));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
            Ok(_) => {}
        }

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                // Deleted between metadata and read
                tracing::debug!(path = %path.display(), "Config file disappeared, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
        };

        let config = Self::from_toml(&content)?;
        tracing::info!(
            path = %path.display(),
            indent = config.indent,
            xml_declaration = config.xml_declaration,
            "Loaded writer configuration"
        );
        Ok(config)
    }

    /// Parse configuration from TOML text. Same rules as [`load`](Self::load).
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            tracing::debug!("Config is empty, using defaults");
            return Ok(Self::default());
        }

        // Parse as a raw table first to detect unknown keys
        if let Ok(raw) = content.parse::<toml::Table>() {
            for key in raw.keys() {
                if !Self::KNOWN_KEYS.contains(&key.as_str()) {
                    tracing::warn!(key = %key, "Unknown key in config file, ignoring");
                }
            }
        }

        let config: WriterConfig = toml::from_str(content)?;
        if config.indent_char != ' ' && config.indent_char != '\t' {
            return Err(ConfigError::Invalid {
                key: "indent_char",
                reason: format!("expected a space or a tab, got {:?}", config.indent_char),
            });
        }
        Ok(config)
    }

    /// Indentation byte for the XML writer, or `None` when indenting is off.
    pub(crate) fn indent_byte(&self) -> Option<u8> {
        if !self.indent {
            return None;
        }
        match self.indent_char {
            '\t' => Some(b'\t'),
            _ => Some(b' '),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = WriterConfig::default();
        assert!(config.xml_declaration);
        assert!(config.indent);
        assert_eq!(config.indent_char, ' ');
        assert_eq!(config.indent_size, 2);
        assert_eq!(config.indent_byte(), Some(b' '));
    }

    #[test]
    fn test_missing_file_returns_default() {
        let path = Path::new("/tmp/atom_entry_test_nonexistent_config.toml");
        let config = WriterConfig::load(path).unwrap();
        assert_eq!(config, WriterConfig::default());
    }

    #[test]
    fn test_empty_file_returns_default() {
        let dir = std::env::temp_dir().join("atom_entry_config_test_empty");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("atom-entry.toml");
        std::fs::write(&path, "").unwrap();

        let config = WriterConfig::load(&path).unwrap();
        assert_eq!(config, WriterConfig::default());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_whitespace_only_returns_default() {
        let config = WriterConfig::from_toml("   \n  \n  ").unwrap();
        assert_eq!(config, WriterConfig::default());
    }

    #[test]
    fn test_partial_config_uses_defaults_for_missing() {
        let config = WriterConfig::from_toml("indent = false\n").unwrap();
        assert!(!config.indent);
        assert!(config.xml_declaration); // default
        assert_eq!(config.indent_size, 2); // default
        assert_eq!(config.indent_byte(), None);
    }

    #[test]
    fn test_full_config_from_file() {
        let dir = std::env::temp_dir().join("atom_entry_config_test_full");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("atom-entry.toml");

        let content = r#"
xml_declaration = false
indent = true
indent_char = "\t"
indent_size = 1
"#;
        std::fs::write(&path, content).unwrap();

        let config = WriterConfig::load(&path).unwrap();
        assert!(!config.xml_declaration);
        assert!(config.indent);
        assert_eq!(config.indent_char, '\t');
        assert_eq!(config.indent_size, 1);
        assert_eq!(config.indent_byte(), Some(b'\t'));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_invalid_toml_returns_error() {
        let err = WriterConfig::from_toml("this is not [valid toml").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().contains("Invalid TOML"));
    }

    #[test]
    fn test_wrong_type_returns_error() {
        let result = WriterConfig::from_toml("indent_size = \"two\"\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_unsupported_indent_char_rejected() {
        let err = WriterConfig::from_toml("indent_char = \"x\"\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                key: "indent_char",
                ..
            }
        ));
    }

    #[test]
    fn test_unknown_keys_accepted() {
        let content = r#"
indent = false
totally_fake_key = "should not fail"
"#;
        let config = WriterConfig::from_toml(content).unwrap();
        assert!(!config.indent);
    }

    #[test]
    fn test_too_large_file_rejected() {
        let dir = std::env::temp_dir().join("atom_entry_config_test_too_large");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("atom-entry.toml");

        let content = "a".repeat(1_048_577);
        std::fs::write(&path, content).unwrap();

        let err = WriterConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::TooLarge(_)));
        assert!(err.to_string().contains("too large"));

        std::fs::remove_dir_all(&dir).ok();
    }
}
