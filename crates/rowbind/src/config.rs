use serde::Deserialize;
use std::path::Path;

/// Parser settings, usually read from the `[parser]` table of a TOML file.
///
/// ```toml
/// [parser]
/// marker = "@"
/// uniform_records = false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParserConfig {
    /// Prefix of every named-parameter token.
    pub marker: String,
    /// Reject record sequences that mix record types.
    pub uniform_records: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            marker: ":".to_string(),
            uniform_records: true,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    parser: ParserConfig,
}

impl ParserConfig {
    /// Read and parse a configuration file.
    pub fn from_file(path: &Path) -> Result<ParserConfig, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        Self::from_str(&content)
    }

    /// Parse configuration from TOML text. Every key is optional.
    pub fn from_str(content: &str) -> Result<ParserConfig, String> {
        let file: ConfigFile =
            toml::from_str(content).map_err(|e| format!("Failed to parse config: {}", e))?;
        file.parser.validate()?;
        Ok(file.parser)
    }

    /// Check the settings for values the parser cannot work with.
    pub fn validate(&self) -> Result<(), String> {
        if self.marker.is_empty() {
            return Err("Invalid config: marker must not be empty".to_string());
        }
        if self.marker.chars().any(char::is_whitespace) {
            return Err(format!(
                "Invalid config: marker {:?} must not contain whitespace",
                self.marker
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_config() {
        let toml = r#"
[parser]
marker = "@"
uniform_records = false
"#;
        let config = ParserConfig::from_str(toml).unwrap();
        assert_eq!(config.marker, "@");
        assert!(!config.uniform_records);
    }

    #[test]
    fn parse_empty_config_uses_defaults() {
        let config = ParserConfig::from_str("").unwrap();
        assert_eq!(config, ParserConfig::default());
        assert_eq!(config.marker, ":");
        assert!(config.uniform_records);
    }

    #[test]
    fn parse_partial_parser_table() {
        let config = ParserConfig::from_str("[parser]\nmarker = \"$\"\n").unwrap();
        assert_eq!(config.marker, "$");
        assert!(config.uniform_records);
    }

    #[test]
    fn reject_empty_marker() {
        let err = ParserConfig::from_str("[parser]\nmarker = \"\"\n").unwrap_err();
        assert!(err.contains("marker must not be empty"), "Error: {}", err);
    }

    #[test]
    fn reject_whitespace_marker() {
        let err = ParserConfig::from_str("[parser]\nmarker = \": \"\n").unwrap_err();
        assert!(err.contains("whitespace"), "Error: {}", err);
    }

    #[test]
    fn reject_unknown_key() {
        let err = ParserConfig::from_str("[parser]\nprefix = \":\"\n").unwrap_err();
        assert!(err.contains("Failed to parse config"), "Error: {}", err);
    }

    #[test]
    fn read_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rowbind.toml");
        std::fs::write(&path, "[parser]\nmarker = \"?\"\n").unwrap();
        let config = ParserConfig::from_file(&path).unwrap();
        assert_eq!(config.marker, "?");
    }

    #[test]
    fn read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ParserConfig::from_file(&dir.path().join("missing.toml")).unwrap_err();
        assert!(err.starts_with("Failed to read"), "Error: {}", err);
    }
}
