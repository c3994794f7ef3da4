//! Wrapper decision for rendering a card
//!
//! A renderer wraps the card's children either in a plain container or in a
//! link. Only layouts with a visible button may be linked.

use crate::editor::{CardAttributes, LinkPolicy};

/// Element a card's content is wrapped in
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Wrapper {
    /// Plain container
    Div,
    /// The whole card is a link; `href` is left off when no URL is set
    Anchor {
        href: Option<String>,
        target: Option<String>,
        rel: Option<String>,
    },
}

impl Wrapper {
    /// Decide the wrapper from final card attributes
    ///
    /// Inside a query loop the destination is per post and filled in by the
    /// loop, so the anchor carries a `#` placeholder.
    pub fn for_card(attributes: &CardAttributes, policy: &LinkPolicy) -> Self {
        if !attributes.link_enabled || policy.is_restricted(&attributes.variation_type) {
            return Wrapper::Div;
        }

        if attributes.is_in_query_loop {
            return Wrapper::Anchor {
                href: Some("#".to_string()),
                target: None,
                rel: None,
            };
        }

        Wrapper::Anchor {
            href: attributes.url.clone(),
            target: attributes.link_target.clone(),
            rel: attributes.rel.clone(),
        }
    }

    pub fn is_link(&self) -> bool {
        matches!(self, Wrapper::Anchor { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CardConfig;

    fn policy() -> LinkPolicy {
        LinkPolicy::from_config(&CardConfig::default())
    }

    #[test]
    fn test_unlinked_card_is_div() {
        assert_eq!(
            Wrapper::for_card(&CardAttributes::default(), &policy()),
            Wrapper::Div
        );
    }

    #[test]
    fn test_linked_card_is_anchor() {
        let mut attrs = CardAttributes::default().with_link("/about");
        attrs.link_target = Some("_blank".to_string());
        attrs.rel = Some("noopener".to_string());
        assert_eq!(
            Wrapper::for_card(&attrs, &policy()),
            Wrapper::Anchor {
                href: Some("/about".to_string()),
                target: Some("_blank".to_string()),
                rel: Some("noopener".to_string()),
            }
        );
    }

    #[test]
    fn test_query_loop_anchor_uses_placeholder() {
        let attrs = CardAttributes::default()
            .with_link("/about")
            .with_query_loop(true);
        assert_eq!(
            Wrapper::for_card(&attrs, &policy()),
            Wrapper::Anchor {
                href: Some("#".to_string()),
                target: None,
                rel: None,
            }
        );
    }

    #[test]
    fn test_linked_card_without_url_has_no_href() {
        let mut attrs = CardAttributes::default();
        attrs.link_enabled = true;
        assert_eq!(
            Wrapper::for_card(&attrs, &policy()),
            Wrapper::Anchor {
                href: None,
                target: None,
                rel: None,
            }
        );
    }

    #[test]
    fn test_restricted_layout_is_never_linked() {
        let attrs = CardAttributes::default()
            .with_variation("card-2")
            .with_link("/about");
        let wrapper = Wrapper::for_card(&attrs, &policy());
        assert!(!wrapper.is_link());
    }
}
