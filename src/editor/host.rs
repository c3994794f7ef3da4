//! Document host abstraction and an in-memory card
//!
//! The host owns the card's children and attributes. Every change it accepts
//! is reported back as a [`CardEvent`], which is what makes self-induced
//! updates visible to the editor loop.

use std::collections::VecDeque;

use crate::block::ContentNode;

use super::attributes::CardAttributes;

/// Change notifications the card editor reacts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardEvent {
    /// The top-level children were replaced or edited
    ChildrenChanged,
    /// The `variationType` attribute changed
    VariationChanged,
    /// The `isInQueryLoop` attribute changed
    QueryLoopChanged,
    /// The surrounding context reported whether a query loop encloses the card
    QueryContextChanged { inside_query_loop: bool },
}

/// Where the card's state lives
pub trait DocumentHost {
    /// Current top-level children
    fn children(&self) -> &[ContentNode];

    /// Replace all top-level children at once
    fn replace_children(&mut self, children: Vec<ContentNode>);

    /// Current card attributes
    fn attributes(&self) -> &CardAttributes;

    /// Replace the card attributes
    fn set_attributes(&mut self, attributes: CardAttributes);
}

/// An in-memory card that queues a notification for every change
#[derive(Debug, Clone, Default)]
pub struct CardBlock {
    attributes: CardAttributes,
    children: Vec<ContentNode>,
    pending: VecDeque<CardEvent>,
}

impl CardBlock {
    pub fn new(attributes: CardAttributes) -> Self {
        Self {
            attributes,
            children: Vec::new(),
            pending: VecDeque::new(),
        }
    }

    /// Seed existing children without raising a notification
    pub fn with_children(mut self, children: Vec<ContentNode>) -> Self {
        self.children = children;
        self
    }

    /// Queue a notification
    pub fn notify(&mut self, event: CardEvent) {
        self.pending.push_back(event);
    }

    /// Take the oldest queued notification
    pub fn next_event(&mut self) -> Option<CardEvent> {
        self.pending.pop_front()
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn into_children(self) -> Vec<ContentNode> {
        self.children
    }
}

impl DocumentHost for CardBlock {
    fn children(&self) -> &[ContentNode] {
        &self.children
    }

    fn replace_children(&mut self, children: Vec<ContentNode>) {
        self.children = children;
        self.notify(CardEvent::ChildrenChanged);
    }

    fn attributes(&self) -> &CardAttributes {
        &self.attributes
    }

    fn set_attributes(&mut self, attributes: CardAttributes) {
        let variation_changed = attributes.variation_type != self.attributes.variation_type;
        let query_loop_changed = attributes.is_in_query_loop != self.attributes.is_in_query_loop;
        self.attributes = attributes;

        if variation_changed {
            self.notify(CardEvent::VariationChanged);
        }
        if query_loop_changed {
            self.notify(CardEvent::QueryLoopChanged);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::BlockNode;

    #[test]
    fn test_seeding_children_is_silent() {
        let block = CardBlock::default().with_children(vec![BlockNode::new("core/image")]);
        assert!(!block.has_pending());
        assert_eq!(block.children().len(), 1);
    }

    #[test]
    fn test_replace_children_notifies() {
        let mut block = CardBlock::default();
        block.replace_children(vec![BlockNode::new("core/image")]);
        assert_eq!(block.next_event(), Some(CardEvent::ChildrenChanged));
        assert_eq!(block.next_event(), None);
    }

    #[test]
    fn test_attribute_notifications() {
        let mut block = CardBlock::default();
        let attrs = block
            .attributes()
            .clone()
            .with_variation("card-2")
            .with_query_loop(true);
        block.set_attributes(attrs);
        assert_eq!(block.next_event(), Some(CardEvent::VariationChanged));
        assert_eq!(block.next_event(), Some(CardEvent::QueryLoopChanged));
    }

    #[test]
    fn test_unrelated_attribute_change_is_silent() {
        let mut block = CardBlock::default();
        let mut attrs = block.attributes().clone();
        attrs.is_equal_height = true;
        block.set_attributes(attrs);
        assert!(!block.has_pending());
        assert!(block.attributes().is_equal_height);
    }
}
