//! Change detection for top-level children
//!
//! A signature is the `|`-joined list of top-level type ids, with the value of
//! an identity attribute appended for identity-sensitive types. Replacing the
//! children is only worth doing when the signature changes; reconciling is
//! triggered by child changes, so committing an equal tree would loop.

use std::collections::HashMap;
use std::fmt;

use serde::Deserialize;

use crate::block::ContentNode;

/// Derived summary of a list of top-level children
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signature(String);

impl Signature {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which attribute, if any, distinguishes nodes of a given type
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct SignatureRules {
    identity_attributes: HashMap<String, String>,
}

impl Default for SignatureRules {
    fn default() -> Self {
        let mut rules = Self::empty();
        rules.insert("core/image", "url");
        rules
    }
}

impl SignatureRules {
    /// Rules that only look at type ids
    pub fn empty() -> Self {
        Self {
            identity_attributes: HashMap::new(),
        }
    }

    /// Make `attribute` part of the signature of `type_id` nodes
    pub fn insert(&mut self, type_id: impl Into<String>, attribute: impl Into<String>) {
        self.identity_attributes
            .insert(type_id.into(), attribute.into());
    }

    /// Compute the signature of a list of top-level nodes
    pub fn signature(&self, nodes: &[ContentNode]) -> Signature {
        let parts: Vec<String> = nodes
            .iter()
            .map(|node| {
                let identity = self
                    .identity_attributes
                    .get(&node.type_id)
                    .and_then(|attr| node.attr(attr))
                    .map(|value| value.to_plain_text())
                    .unwrap_or_default();
                format!("{}{}", node.type_id, identity)
            })
            .collect();
        Signature(parts.join("|"))
    }

    /// Whether replacing `current` with `next` would change anything observable
    pub fn differs(&self, current: &[ContentNode], next: &[ContentNode]) -> bool {
        self.signature(current) != self.signature(next)
    }
}
