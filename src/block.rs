//! Block tree data model
//!
//! Templates and existing content share one shape: a type id, an attribute
//! bag and ordered children. The aliases [`TemplateNode`] and [`ContentNode`]
//! name the role a tree plays in reconciliation.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Attribute value
///
/// A closed set of scalar kinds; block attributes never nest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Number(f64),
    String(String),
    Null,
}

impl Value {
    /// Get the string content, if this is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Get the boolean, if this is a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Plain text form used in signatures (strings unquoted, null empty)
    pub fn to_plain_text(&self) -> String {
        match self {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Null => String::new(),
        }
    }

    /// Whether this value counts as "set" (not null, not an empty string)
    pub fn is_present(&self) -> bool {
        match self {
            Value::Null => false,
            Value::String(s) => !s.is_empty(),
            _ => true,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "\"{}\"", escape(s)),
            Value::Number(n) => write!(f, "{}", n),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Null => f.write_str("null"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

/// Escape a string for the block notation
pub(crate) fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Attribute bag, ordered by key
pub type Attributes = BTreeMap<String, Value>;

/// One node of a block tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockNode {
    /// Block type id, e.g. `core/image`
    #[serde(rename = "name")]
    pub type_id: String,
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(default, rename = "innerBlocks")]
    pub children: Vec<BlockNode>,
}

/// A node of a variation's desired shape
pub type TemplateNode = BlockNode;

/// A node of existing, user-authored content
pub type ContentNode = BlockNode;

impl BlockNode {
    /// Create a leaf node with no attributes
    pub fn new(type_id: impl Into<String>) -> Self {
        Self {
            type_id: type_id.into(),
            attributes: Attributes::new(),
            children: Vec::new(),
        }
    }

    /// Set an attribute
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Replace the attribute bag
    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    /// Replace the children
    pub fn with_children(mut self, children: Vec<BlockNode>) -> Self {
        self.children = children;
        self
    }

    /// Look up an attribute
    pub fn attr(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// Whether an attribute is present and set
    pub fn has_attr(&self, key: &str) -> bool {
        self.attr(key).is_some_and(Value::is_present)
    }

    /// Whether this node has children
    pub fn is_container(&self) -> bool {
        !self.children.is_empty()
    }

    /// Count this node and all of its descendants
    pub fn count(&self) -> usize {
        1 + count_nodes(&self.children)
    }
}

/// Count all nodes in a forest
pub fn count_nodes(nodes: &[BlockNode]) -> usize {
    nodes.iter().map(BlockNode::count).sum()
}

impl fmt::Display for BlockNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::notation::print(std::slice::from_ref(self)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_sets_attributes() {
        let node = BlockNode::new("core/image").with_attr("url", "x.png");
        assert_eq!(node.attr("url"), Some(&Value::from("x.png")));
        assert!(node.has_attr("url"));
        assert!(!node.has_attr("id"));
    }

    #[test]
    fn test_empty_string_is_not_present() {
        let node = BlockNode::new("core/image").with_attr("url", "");
        assert!(!node.has_attr("url"));
    }

    #[test]
    fn test_count_includes_descendants() {
        let node = BlockNode::new("group")
            .with_children(vec![BlockNode::new("a"), BlockNode::new("b")]);
        assert_eq!(node.count(), 3);
        assert_eq!(count_nodes(&[node.clone(), node]), 6);
    }

    #[test]
    fn test_value_display_escapes_strings() {
        assert_eq!(Value::from(r#"say "hi""#).to_string(), r#""say \"hi\"""#);
        assert_eq!(Value::from(2).to_string(), "2");
        assert_eq!(Value::from(0.5).to_string(), "0.5");
        assert_eq!(Value::Null.to_string(), "null");
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(Value::from("x.png").to_plain_text(), "x.png");
        assert_eq!(Value::Null.to_plain_text(), "");
    }

    #[test]
    fn test_json_shape() {
        let json = r#"{"name":"core/heading","attributes":{"level":2,"text":"Hi"}}"#;
        let node: BlockNode = serde_json::from_str(json).expect("Should deserialize");
        assert_eq!(node.type_id, "core/heading");
        assert_eq!(node.attr("level"), Some(&Value::Number(2.0)));
        assert!(node.children.is_empty());
    }
}
