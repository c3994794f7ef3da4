//! Attributes of the card block itself

use serde::{Deserialize, Serialize};

/// Default layout for a freshly inserted card
pub const DEFAULT_VARIATION: &str = "card-1";

/// Parent blocks inside which equal-height cards make sense
const EQUAL_HEIGHT_PARENTS: [&str; 2] = ["core/column", "core/post-template"];

/// The card container's own attributes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CardAttributes {
    /// Selected layout variation
    pub variation_type: String,
    /// Whether the whole card is wrapped in a link
    pub link_enabled: bool,
    /// Whether the card sits inside a query loop
    pub is_in_query_loop: bool,
    pub is_equal_height: bool,
    /// Link destination
    pub url: Option<String>,
    pub link_target: Option<String>,
    pub rel: Option<String>,
}

impl Default for CardAttributes {
    fn default() -> Self {
        Self {
            variation_type: DEFAULT_VARIATION.to_string(),
            link_enabled: false,
            is_in_query_loop: false,
            is_equal_height: false,
            url: None,
            link_target: None,
            rel: None,
        }
    }
}

impl CardAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_variation(mut self, variation_type: impl Into<String>) -> Self {
        self.variation_type = variation_type.into();
        self
    }

    pub fn with_link(mut self, url: impl Into<String>) -> Self {
        self.link_enabled = true;
        self.url = Some(url.into());
        self
    }

    pub fn with_query_loop(mut self, in_query_loop: bool) -> Self {
        self.is_in_query_loop = in_query_loop;
        self
    }
}

/// Whether the equal-height option applies under the given parent block
///
/// Called by the host's settings UI to decide whether to offer the toggle;
/// the editor itself does not know the card's parent.
pub fn equal_height_available(parent_type: Option<&str>) -> bool {
    parent_type.is_some_and(|parent| EQUAL_HEIGHT_PARENTS.contains(&parent))
}
