//! Card Block - layout variations for a content-editor card
//!
//! This library reconciles a card's existing content against the block
//! template of its selected layout variation, and carries the editor logic
//! around it: change detection, query-loop rewrites and link rules.
//!
//! # Example
//!
//! ```rust
//! use card_block::settle;
//!
//! let children = settle(r#"core/heading [content: "Hi"]"#).unwrap();
//! assert_eq!(children.len(), 3);
//! assert_eq!(children[1].children[0].type_id, "core/heading");
//! ```

pub mod block;
pub mod config;
pub mod editor;
pub mod error;
pub mod notation;
pub mod render;
pub mod template;
pub mod variation;

pub use block::{Attributes, BlockNode, ContentNode, TemplateNode, Value};
pub use config::{CardConfig, ConfigError};
pub use editor::{CardAttributes, CardBlock, CardEditor, CardEvent, DocumentHost, EditorError};
pub use error::ParseError;
pub use notation::{parse, print};
pub use render::Wrapper;
pub use template::{reconcile, Reconciler, Signature, SignatureRules, TransformMap};
pub use variation::{Variation, VariationError, VariationRegistry};

use thiserror::Error;

/// Errors that can occur while settling a card
#[derive(Debug, Error)]
pub enum CardError {
    /// Error parsing block notation
    #[error("parse errors: {}", format_parse_errors(.0))]
    Parse(Vec<ParseError>),

    /// Unknown or invalid variation
    #[error("variation error: {0}")]
    Variation(#[from] VariationError),

    /// The editor loop failed to settle
    #[error("editor error: {0}")]
    Editor(#[from] EditorError),

    /// Error loading configuration
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

impl From<Vec<ParseError>> for CardError {
    fn from(errors: Vec<ParseError>) -> Self {
        CardError::Parse(errors)
    }
}

fn format_parse_errors(errors: &[ParseError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Configuration for settling a card
#[derive(Debug, Clone)]
pub struct SettleConfig {
    /// Editor configuration
    pub card: CardConfig,
    /// Available layouts
    pub variations: VariationRegistry,
    /// Layout to settle into; the registry default when `None`
    pub variation: Option<String>,
    /// Whether the card sits inside a query loop
    pub in_query_loop: bool,
}

impl Default for SettleConfig {
    fn default() -> Self {
        Self {
            card: CardConfig::default(),
            variations: VariationRegistry::builtin(),
            variation: None,
            in_query_loop: false,
        }
    }
}

impl SettleConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the editor configuration
    pub fn with_card_config(mut self, config: CardConfig) -> Self {
        self.card = config;
        self
    }

    /// Set the variation registry
    pub fn with_variations(mut self, registry: VariationRegistry) -> Self {
        self.variations = registry;
        self
    }

    /// Select a layout
    pub fn with_variation(mut self, name: impl Into<String>) -> Self {
        self.variation = Some(name.into());
        self
    }

    /// Place the card inside a query loop
    pub fn with_query_loop(mut self, in_query_loop: bool) -> Self {
        self.in_query_loop = in_query_loop;
        self
    }
}

/// Settle block notation into the default layout
///
/// Parses the source as the card's current children and runs the editor
/// until the children conform to the variation.
pub fn settle(source: &str) -> Result<Vec<ContentNode>, CardError> {
    settle_with_config(source, &SettleConfig::default())
}

/// Settle block notation with custom configuration
///
/// # Example
///
/// ```rust
/// use card_block::{settle_with_config, SettleConfig};
///
/// let config = SettleConfig::new().with_variation("card-2").with_query_loop(true);
/// let children = settle_with_config("core/image core/button", &config).unwrap();
///
/// assert_eq!(children.len(), 2);
/// assert_eq!(children[0].type_id, "core/post-featured-image");
/// ```
pub fn settle_with_config(
    source: &str,
    config: &SettleConfig,
) -> Result<Vec<ContentNode>, CardError> {
    let children = parse(source)?;

    let variation = match &config.variation {
        Some(name) => config.variations.require(name)?,
        None => config.variations.default_variation()?,
    };

    let attributes = CardAttributes::default().with_variation(variation.name.clone());
    let mut block = CardBlock::new(attributes).with_children(children);
    let editor = CardEditor::new(&config.variations, &config.card);

    if block.children().is_empty() {
        editor.select_variation(&mut block, Some(variation.name.as_str()))?;
    } else {
        block.notify(CardEvent::VariationChanged);
    }
    if config.in_query_loop {
        block.notify(CardEvent::QueryContextChanged {
            inside_query_loop: true,
        });
    }

    editor.settle(&mut block)?;
    Ok(block.into_children())
}
