//! Configuration file support for snfeed CLI
//!
//! Loads settings from `_snfeed.toml` configuration file.

use anyhow::{Context, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use snfeed_core::{ConverterOptions, DEFAULT_DOCS, DEFAULT_GENERATOR, WriterOptions};
use std::path::Path;

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = "_snfeed.toml";

/// Schema URL for the configuration file
pub const SCHEMA_URL: &str =
    "https://raw.githubusercontent.com/snfeed/snfeed/main/crates/snfeed-cli/schema/snfeed.schema.json";

/// Default output file extension
pub const DEFAULT_EXTENSION: &str = "xml";

/// Root configuration structure
#[derive(Debug, Default, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(default)]
pub struct Config {
    /// Output layout configuration
    #[serde(skip_serializing_if = "OutputConfig::is_empty")]
    pub output: OutputConfig,
    /// Channel defaults applied when a feed leaves a field unset
    #[serde(skip_serializing_if = "ChannelConfig::is_empty")]
    pub channel: ChannelConfig,
}

/// Output layout configuration
#[derive(Debug, Default, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Spaces per nesting level; 0 writes each document on a single line (default: 4)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indent: Option<usize>,
    /// File extension for written feeds (default: "xml")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
}

impl OutputConfig {
    fn is_empty(&self) -> bool {
        self.indent.is_none() && self.extension.is_none()
    }
}

/// Channel defaults
#[derive(Debug, Default, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(default)]
pub struct ChannelConfig {
    /// Generator written for feeds without one (default: "snfeed")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generator: Option<String>,
    /// Docs URL written for feeds without one
    /// (default: "https://validator.w3.org/feed/docs/rss2.html")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docs: Option<String>,
}

impl ChannelConfig {
    fn is_empty(&self) -> bool {
        self.generator.is_none() && self.docs.is_none()
    }
}

impl Config {
    /// Load configuration from a specific file path
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Try to load configuration from a directory (looks for `_snfeed.toml`)
    ///
    /// Returns `Ok(None)` if the config file doesn't exist.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let config_path = dir.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            Ok(Some(Self::load(&config_path)?))
        } else {
            Ok(None)
        }
    }

    /// Generate JSON schema for the configuration
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }

    /// Generate JSON schema as a string
    pub fn json_schema_string() -> Result<String> {
        let schema = Self::json_schema();
        serde_json::to_string_pretty(&schema).context("Failed to serialize JSON schema")
    }

    /// Serialize configuration to TOML string with schema directive
    pub fn to_toml_with_schema(&self) -> Result<String> {
        let toml_content =
            toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;

        Ok(format!("#:schema {}\n\n{}", SCHEMA_URL, toml_content))
    }

    /// Create a sample configuration with the built-in defaults for init command
    pub fn sample() -> Self {
        Config {
            output: OutputConfig {
                indent: Some(4),
                extension: Some(DEFAULT_EXTENSION.to_string()),
            },
            channel: ChannelConfig {
                generator: Some(DEFAULT_GENERATOR.to_string()),
                docs: Some(DEFAULT_DOCS.to_string()),
            },
        }
    }

    /// Conversion options with config values layered over the built-in defaults
    pub fn converter_options(&self) -> ConverterOptions {
        let defaults = ConverterOptions::default();
        ConverterOptions {
            default_generator: self
                .channel
                .generator
                .clone()
                .unwrap_or(defaults.default_generator),
            default_docs: self.channel.docs.clone().unwrap_or(defaults.default_docs),
            build_time: None,
        }
    }

    /// Writer options; a command-line indent overrides the configured one
    pub fn writer_options(&self, indent: Option<usize>) -> WriterOptions {
        let defaults = WriterOptions::default();
        WriterOptions {
            indent: indent.or(self.output.indent).unwrap_or(defaults.indent),
            ..defaults
        }
    }

    /// Output file extension
    pub fn extension(&self) -> &str {
        self.output.extension.as_deref().unwrap_or(DEFAULT_EXTENSION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_config() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.output.indent.is_none());
        assert!(config.channel.generator.is_none());
    }

    #[test]
    fn test_parse_output_section() {
        let config: Config = toml::from_str(
            r#"
            [output]
            indent = 2
            extension = "rss"
            "#,
        )
        .unwrap();

        assert_eq!(config.output.indent, Some(2));
        assert_eq!(config.output.extension, Some("rss".to_string()));
        assert_eq!(config.extension(), "rss");
    }

    #[test]
    fn test_parse_channel_section() {
        let config: Config = toml::from_str(
            r#"
            [channel]
            generator = "my-cms"
            docs = "https://example.com/rss"
            "#,
        )
        .unwrap();

        let options = config.converter_options();
        assert_eq!(options.default_generator, "my-cms");
        assert_eq!(options.default_docs, "https://example.com/rss");
        assert!(options.build_time.is_none());
    }

    #[test]
    fn test_partial_config() {
        let config: Config = toml::from_str(
            r#"
            [channel]
            generator = "my-cms"
            "#,
        )
        .unwrap();

        let options = config.converter_options();
        assert_eq!(options.default_generator, "my-cms");
        assert_eq!(options.default_docs, DEFAULT_DOCS);
        assert_eq!(config.extension(), DEFAULT_EXTENSION);
    }

    #[test]
    fn test_writer_options_precedence() {
        let config: Config = toml::from_str("[output]\nindent = 2\n").unwrap();
        assert_eq!(config.writer_options(None).indent, 2);
        assert_eq!(config.writer_options(Some(0)).indent, 0);
        assert_eq!(Config::default().writer_options(None).indent, 4);
        assert!(config.writer_options(None).ignore_comments);
    }

    #[test]
    fn test_invalid_indent_type_is_error() {
        let result: Result<Config, _> = toml::from_str("[output]\nindent = \"wide\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_serialize_empty_config() {
        let config = Config::default();
        let toml = config.to_toml_with_schema().unwrap();
        assert!(toml.starts_with("#:schema"));
        assert!(!toml.contains("[output]"));
    }

    #[test]
    fn test_serialize_sample_config() {
        let config = Config::sample();
        let toml = config.to_toml_with_schema().unwrap();
        assert!(toml.starts_with("#:schema"));
        assert!(toml.contains("[output]"));
        assert!(toml.contains("extension = \"xml\""));
        assert!(toml.contains("[channel]"));
    }

    #[test]
    fn test_json_schema_generation() {
        let schema = Config::json_schema_string().unwrap();
        assert!(schema.contains("\"title\""));
        assert!(schema.contains("OutputConfig"));
        assert!(schema.contains("ChannelConfig"));
    }

    #[test]
    fn test_roundtrip() {
        let config = Config::sample();
        let toml = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&toml).unwrap();
        assert_eq!(config.output.indent, parsed.output.indent);
        assert_eq!(config.channel.docs, parsed.channel.docs);
    }

    #[test]
    fn test_load_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load_from_dir(dir.path()).unwrap().is_none());

        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "[output]\nindent = 0\n").unwrap();
        let config = Config::load_from_dir(dir.path()).unwrap().unwrap();
        assert_eq!(config.output.indent, Some(0));
    }
}
