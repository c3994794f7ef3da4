//! "Entire card as link" policy
//!
//! A linked card needs a visible button as its call to action. Layouts
//! without one are restricted: each maps to the layout the card switches to
//! when the link is turned on.
//!
//! These checks need a person to answer a prompt, so the [`CardEditor`]
//! never runs them itself. The host's settings UI calls [`LinkPolicy::toggle`]
//! and [`LinkPolicy::check_variation_change`], resolves the prompt, and hands
//! the resulting attributes to the card, which then settles as usual.
//!
//! [`CardEditor`]: super::CardEditor

use std::collections::HashMap;

use crate::config::CardConfig;

use super::attributes::CardAttributes;

/// Outcome of toggling the link setting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkToggle {
    /// Apply these attributes directly
    Apply(CardAttributes),
    /// Turning the link on requires switching layout; ask first
    NeedsConfirmation(LayoutSwitch),
}

/// A pending switch to a layout with a button, with the link enabled
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutSwitch {
    attributes: CardAttributes,
}

impl LayoutSwitch {
    /// Layout the card would switch to
    pub fn target_variation(&self) -> &str {
        &self.attributes.variation_type
    }

    /// Accept the switch, yielding the attributes to apply
    pub fn confirm(self) -> CardAttributes {
        self.attributes
    }
}

/// The card was switched to a restricted layout while linked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkConflict {
    /// Layout selected before the switch
    pub revert_to: String,
}

impl LinkConflict {
    /// Keep the new layout and drop the link
    pub fn confirm(&self, attributes: &CardAttributes) -> CardAttributes {
        CardAttributes {
            link_enabled: false,
            ..attributes.clone()
        }
    }

    /// Keep the link and go back to the previous layout
    pub fn cancel(&self, attributes: &CardAttributes) -> CardAttributes {
        CardAttributes {
            variation_type: self.revert_to.clone(),
            ..attributes.clone()
        }
    }
}

/// Which layouts may be linked, and where restricted ones switch to
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkPolicy {
    transforms: HashMap<String, String>,
}

impl LinkPolicy {
    pub fn new(transforms: HashMap<String, String>) -> Self {
        Self { transforms }
    }

    pub fn from_config(config: &CardConfig) -> Self {
        Self::new(config.link_transforms.clone())
    }

    /// Whether a layout lacks the button a linked card needs
    pub fn is_restricted(&self, variation: &str) -> bool {
        self.transforms.contains_key(variation)
    }

    /// Layout to switch to when linking a restricted layout
    pub fn switch_target(&self, variation: &str) -> Option<&str> {
        self.transforms.get(variation).map(|s| s.as_str())
    }

    /// Flip the link setting
    pub fn toggle(&self, attributes: &CardAttributes) -> LinkToggle {
        let mut next = CardAttributes {
            link_enabled: !attributes.link_enabled,
            ..attributes.clone()
        };

        if next.link_enabled {
            if let Some(target) = self.switch_target(&attributes.variation_type) {
                next.variation_type = target.to_string();
                return LinkToggle::NeedsConfirmation(LayoutSwitch { attributes: next });
            }
        }

        LinkToggle::Apply(next)
    }

    /// Check a layout change against the link setting
    ///
    /// Only the selected card reports conflicts, so that a change applied to
    /// many cards at once raises a single prompt.
    pub fn check_variation_change(
        &self,
        previous: &str,
        attributes: &CardAttributes,
        is_selected: bool,
    ) -> Option<LinkConflict> {
        if previous == attributes.variation_type || !is_selected {
            return None;
        }

        if attributes.link_enabled && self.is_restricted(&attributes.variation_type) {
            return Some(LinkConflict {
                revert_to: previous.to_string(),
            });
        }

        None
    }
}
