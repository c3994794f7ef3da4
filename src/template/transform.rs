//! Type substitution table
//!
//! Declares which content type may fill a template slot declared for a
//! different type. Substitution is one-way: `template type -> content type`.

use std::collections::HashMap;

use serde::Deserialize;

/// Standard blocks and the post blocks that replace them inside a query loop
pub const QUERY_LOOP_TRANSFORMS: [(&str, &str); 4] = [
    ("core/image", "core/post-featured-image"),
    ("core/heading", "core/post-title"),
    ("core/paragraph", "core/post-excerpt"),
    ("core/button", "core/read-more"),
];

/// Mapping from template type id to the content type id allowed to fill it
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct TransformMap {
    substitutes: HashMap<String, String>,
}

impl TransformMap {
    /// Create an empty table (direct matches only)
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in query loop table
    pub fn query_loop() -> Self {
        QUERY_LOOP_TRANSFORMS.into_iter().collect()
    }

    /// Declare that `substitute` may fill slots declared for `template_type`
    pub fn insert(&mut self, template_type: impl Into<String>, substitute: impl Into<String>) {
        self.substitutes
            .insert(template_type.into(), substitute.into());
    }

    /// The substitute for a template type, if any
    pub fn substitute(&self, template_type: &str) -> Option<&str> {
        self.substitutes.get(template_type).map(|s| s.as_str())
    }

    /// Whether a content node of `content_type` can fill a slot of `template_type`
    pub fn satisfies(&self, template_type: &str, content_type: &str) -> bool {
        template_type == content_type || self.substitute(template_type) == Some(content_type)
    }

    pub fn len(&self) -> usize {
        self.substitutes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.substitutes.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TransformMap {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = TransformMap::new();
        for (template_type, substitute) in iter {
            map.insert(template_type, substitute);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_match_always_satisfies() {
        let map = TransformMap::new();
        assert!(map.satisfies("core/image", "core/image"));
        assert!(!map.satisfies("core/image", "core/post-featured-image"));
    }

    #[test]
    fn test_query_loop_substitution() {
        let map = TransformMap::query_loop();
        assert_eq!(map.len(), 4);
        assert!(map.satisfies("core/heading", "core/post-title"));
        assert!(map.satisfies("core/button", "core/read-more"));
    }

    #[test]
    fn test_substitution_is_one_way() {
        let map = TransformMap::query_loop();
        assert!(!map.satisfies("core/post-title", "core/heading"));
    }

    #[test]
    fn test_unknown_type_has_no_substitute() {
        let map = TransformMap::query_loop();
        assert_eq!(map.substitute("core/quote"), None);
        assert!(!map.satisfies("core/quote", "core/paragraph"));
    }
}
