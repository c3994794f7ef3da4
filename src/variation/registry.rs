//! Variation registry for storing and retrieving card layouts

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::block::{BlockNode, TemplateNode};
use crate::error::ParseError;
use crate::notation;

/// Errors that can occur during variation operations
#[derive(Debug, Error)]
pub enum VariationError {
    /// Variation not found in registry
    #[error("variation not found: {name}")]
    NotFound { name: String },

    /// Duplicate variation definition
    #[error("duplicate variation definition: {name}")]
    Duplicate { name: String },

    /// Template notation failed to parse
    #[error("invalid template for variation {name}: {}", format_errors(.errors))]
    InvalidTemplate {
        name: String,
        source_text: String,
        errors: Vec<ParseError>,
    },

    /// Registry has nothing to fall back on
    #[error("no variations registered")]
    Empty,

    #[error("Failed to read variations file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse variations TOML: {0}")]
    TomlError(#[from] toml::de::Error),
}

fn format_errors(errors: &[ParseError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// A named card layout
#[derive(Debug, Clone, PartialEq)]
pub struct Variation {
    /// Identifier stored in the card's `variationType` attribute
    pub name: String,
    pub title: String,
    pub description: String,
    /// Picked when the user skips the variation picker
    pub is_default: bool,
    template: Vec<TemplateNode>,
}

impl Variation {
    pub fn new(name: impl Into<String>, template: Vec<TemplateNode>) -> Self {
        Self {
            name: name.into(),
            title: String::new(),
            description: String::new(),
            is_default: false,
            template,
        }
    }

    /// Parse a variation whose template is written in block notation
    pub fn from_notation(
        name: impl Into<String>,
        template_source: &str,
    ) -> Result<Self, VariationError> {
        let name = name.into();
        match notation::parse(template_source) {
            Ok(template) => Ok(Self::new(name, template)),
            Err(errors) => Err(VariationError::InvalidTemplate {
                name,
                source_text: template_source.to_string(),
                errors,
            }),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_default(mut self, is_default: bool) -> Self {
        self.is_default = is_default;
        self
    }

    /// The template tree
    pub fn template(&self) -> &[TemplateNode] {
        &self.template
    }

    /// Whether the template contains a block of `type_id` at any depth
    pub fn contains_block(&self, type_id: &str) -> bool {
        fn walk(nodes: &[BlockNode], type_id: &str) -> bool {
            nodes
                .iter()
                .any(|n| n.type_id == type_id || walk(&n.children, type_id))
        }
        walk(&self.template, type_id)
    }
}

/// TOML structure for deserializing variations
#[derive(Deserialize)]
struct TomlVariations {
    #[serde(default, rename = "variation")]
    variations: Vec<TomlVariation>,
}

#[derive(Deserialize)]
struct TomlVariation {
    name: String,
    title: Option<String>,
    description: Option<String>,
    #[serde(default)]
    default: bool,
    template: String,
}

/// The layouts shipped with the card block
const BUILTIN_VARIATIONS: &str = r#"
[[variation]]
name = "card-1"
title = "Image, text and button"
description = "A card block that includes an image, a text content section and a button"
default = true
template = """
core/image
ltic/card-inner-text-block [templateLock: "false"] {
    core/heading
    core/paragraph
}
core/button [backgroundColor: "accent-3", text: "Read More"]
"""

[[variation]]
name = "card-2"
title = "Image and text"
description = "A card block that includes an image and a text content section"
template = """
core/image
ltic/card-inner-text-block [templateLock: "false"] {
    core/heading
    core/paragraph
}
"""
"#;

/// Ordered registry of variations, keyed by name
#[derive(Debug, Clone, Default)]
pub struct VariationRegistry {
    variations: Vec<Variation>,
}

impl VariationRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in `card-1` and `card-2` layouts
    pub fn builtin() -> Self {
        Self::from_str(BUILTIN_VARIATIONS).expect("Built-in variations should be valid")
    }

    /// Load variations from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, VariationError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load variations from a TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, VariationError> {
        let parsed: TomlVariations = toml::from_str(content)?;

        let mut registry = Self::new();
        for entry in parsed.variations {
            let variation = Variation::from_notation(entry.name, &entry.template)?
                .with_title(entry.title.unwrap_or_default())
                .with_description(entry.description.unwrap_or_default())
                .with_default(entry.default);
            registry.register(variation)?;
        }
        Ok(registry)
    }

    /// Register a variation
    pub fn register(&mut self, variation: Variation) -> Result<(), VariationError> {
        if self.contains(&variation.name) {
            return Err(VariationError::Duplicate {
                name: variation.name,
            });
        }
        self.variations.push(variation);
        Ok(())
    }

    /// Get a variation by name
    pub fn get(&self, name: &str) -> Option<&Variation> {
        self.variations.iter().find(|v| v.name == name)
    }

    /// Get a variation by name, failing when it is missing
    pub fn require(&self, name: &str) -> Result<&Variation, VariationError> {
        self.get(name).ok_or_else(|| VariationError::NotFound {
            name: name.to_string(),
        })
    }

    /// Check if a variation exists
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// All variation names in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.variations.iter().map(|v| v.name.as_str())
    }

    /// All variations in registration order
    pub fn iter(&self) -> impl Iterator<Item = &Variation> {
        self.variations.iter()
    }

    pub fn len(&self) -> usize {
        self.variations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variations.is_empty()
    }

    /// The variation flagged as default, or the first one registered
    pub fn default_variation(&self) -> Result<&Variation, VariationError> {
        self.variations
            .iter()
            .find(|v| v.is_default)
            .or_else(|| self.variations.first())
            .ok_or(VariationError::Empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_variations() {
        let registry = VariationRegistry::builtin();
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["card-1", "card-2"]);

        let card1 = registry.get("card-1").expect("card-1 should exist");
        assert!(card1.is_default);
        assert_eq!(card1.template().len(), 3);
        assert!(card1.contains_block("core/button"));
        assert!(card1.contains_block("core/paragraph"));

        let card2 = registry.get("card-2").expect("card-2 should exist");
        assert_eq!(card2.template().len(), 2);
        assert!(!card2.contains_block("core/button"));
    }

    #[test]
    fn test_default_variation() {
        let registry = VariationRegistry::builtin();
        assert_eq!(registry.default_variation().unwrap().name, "card-1");
    }

    #[test]
    fn test_default_falls_back_to_first() {
        let mut registry = VariationRegistry::new();
        registry
            .register(Variation::new("only", vec![BlockNode::new("core/image")]))
            .expect("Should register");
        assert_eq!(registry.default_variation().unwrap().name, "only");
    }

    #[test]
    fn test_empty_registry_has_no_default() {
        let registry = VariationRegistry::new();
        assert!(matches!(
            registry.default_variation(),
            Err(VariationError::Empty)
        ));
    }

    #[test]
    fn test_registry_duplicate_error() {
        let mut registry = VariationRegistry::new();
        registry
            .register(Variation::new("card", vec![]))
            .expect("First register should succeed");
        let result = registry.register(Variation::new("card", vec![]));
        assert!(matches!(result, Err(VariationError::Duplicate { .. })));
    }

    #[test]
    fn test_require_missing() {
        let registry = VariationRegistry::builtin();
        let err = registry.require("card-9").unwrap_err();
        assert_eq!(err.to_string(), "variation not found: card-9");
    }

    #[test]
    fn test_invalid_template_reported() {
        let toml_str = r#"
[[variation]]
name = "broken"
template = "core/group {"
"#;
        let err = VariationRegistry::from_str(toml_str).unwrap_err();
        match err {
            VariationError::InvalidTemplate { name, errors, .. } => {
                assert_eq!(name, "broken");
                assert!(!errors.is_empty());
            }
            other => panic!("Expected invalid template, got {other:?}"),
        }
    }

    #[test]
    fn test_stray_character_in_template_reported() {
        let toml_str = r#"
[[variation]]
name = "typo"
template = "core/image # core/button"
"#;
        let err = VariationRegistry::from_str(toml_str).unwrap_err();
        assert!(matches!(err, VariationError::InvalidTemplate { ref name, .. } if name == "typo"));
    }

    #[test]
    fn test_invalid_toml_error() {
        let result = VariationRegistry::from_str("this is not valid toml {{{{");
        assert!(matches!(result, Err(VariationError::TomlError(_))));
    }

    #[test]
    fn test_missing_file_error() {
        let result = VariationRegistry::from_file(Path::new("/nonexistent/variations.toml"));
        assert!(matches!(result, Err(VariationError::IoError(_))));
    }
}
