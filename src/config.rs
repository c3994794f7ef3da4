//! Card configuration
//!
//! Settings that the editor reads instead of ambient globals: the fallback
//! image for empty image slots and the transform tables. Loaded from TOML;
//! tables present in a file replace the built-in ones.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::template::{SignatureRules, TransformMap};

/// Errors that can occur when loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Image placed into an empty image slot
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DefaultImage {
    pub url: String,
    #[serde(default = "default_alt")]
    pub alt: String,
}

fn default_alt() -> String {
    "Default Image".to_string()
}

/// Configuration for the card editor
#[derive(Debug, Clone, PartialEq)]
pub struct CardConfig {
    /// Fallback image, if any
    pub default_image: Option<DefaultImage>,
    /// Substitutions allowed while reconciling (template type -> content type)
    pub query_loop_transforms: TransformMap,
    /// Layouts without a button -> layout to switch to when linking the card
    pub link_transforms: HashMap<String, String>,
    /// Identity attributes used by the change-detection signature
    pub signature_rules: SignatureRules,
}

/// TOML structure for deserializing configuration
#[derive(Deserialize)]
struct TomlConfig {
    default_image: Option<DefaultImage>,
    query_loop_transforms: Option<TransformMap>,
    link_transforms: Option<HashMap<String, String>>,
    identity_attributes: Option<SignatureRules>,
}

/// Built-in configuration
const DEFAULT_CONFIG: &str = r#"
[query_loop_transforms]
"core/image" = "core/post-featured-image"
"core/heading" = "core/post-title"
"core/paragraph" = "core/post-excerpt"
"core/button" = "core/read-more"

[link_transforms]
"card-2" = "card-1"

[identity_attributes]
"core/image" = "url"
"#;

impl CardConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load configuration from a TOML string, on top of the built-in defaults
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let parsed: TomlConfig = toml::from_str(content)?;
        let base = Self::builtin();

        Ok(CardConfig {
            default_image: parsed.default_image,
            query_loop_transforms: parsed
                .query_loop_transforms
                .unwrap_or(base.query_loop_transforms),
            link_transforms: parsed.link_transforms.unwrap_or(base.link_transforms),
            signature_rules: parsed.identity_attributes.unwrap_or(base.signature_rules),
        })
    }

    fn builtin() -> Self {
        let parsed: TomlConfig =
            toml::from_str(DEFAULT_CONFIG).expect("Default config should be valid TOML");
        CardConfig {
            default_image: parsed.default_image,
            query_loop_transforms: parsed.query_loop_transforms.unwrap_or_default(),
            link_transforms: parsed.link_transforms.unwrap_or_default(),
            signature_rules: parsed.identity_attributes.unwrap_or_default(),
        }
    }

    /// Set the fallback image
    pub fn with_default_image(mut self, url: impl Into<String>, alt: impl Into<String>) -> Self {
        self.default_image = Some(DefaultImage {
            url: url.into(),
            alt: alt.into(),
        });
        self
    }
}

impl Default for CardConfig {
    fn default() -> Self {
        Self::builtin()
    }
}
