//! Card editor: keeps a card's children in line with its layout
//!
//! The editor is edge-triggered. Each [`CardEvent`] runs the matching
//! handler once, synchronously. Handlers commit through the host, which
//! raises further events; the signature gate makes those follow-up passes
//! no-ops, so [`CardEditor::settle`] reaches a fixed point.

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::block::{ContentNode, Value};
use crate::config::CardConfig;
use crate::template::Reconciler;
use crate::variation::{Variation, VariationError, VariationRegistry};

use super::host::{CardBlock, CardEvent, DocumentHost};
use super::query_loop::rewrite_for_query_loop;

/// Upper bound on committing passes in one [`CardEditor::settle`] call
pub const MAX_PASSES: usize = 64;

const IMAGE: &str = "core/image";

/// Errors raised by the card editor
#[derive(Debug, Error)]
pub enum EditorError {
    /// Handlers kept committing changes that raised further events
    #[error("card did not settle after {passes} passes")]
    Unsettled { passes: usize },

    #[error(transparent)]
    Variation(#[from] VariationError),
}

/// What a handler changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Update {
    pub children_replaced: bool,
    pub attributes_updated: bool,
}

impl Update {
    pub fn is_noop(&self) -> bool {
        !self.children_replaced && !self.attributes_updated
    }
}

/// Drives a card's children from its variation and context
#[derive(Debug, Clone, Copy)]
pub struct CardEditor<'a> {
    registry: &'a VariationRegistry,
    config: &'a CardConfig,
}

impl<'a> CardEditor<'a> {
    pub fn new(registry: &'a VariationRegistry, config: &'a CardConfig) -> Self {
        Self { registry, config }
    }

    /// React to one change notification
    pub fn handle<H: DocumentHost>(&self, host: &mut H, event: &CardEvent) -> Update {
        match event {
            CardEvent::ChildrenChanged | CardEvent::VariationChanged => {
                let children_replaced = self.sync_template(host);
                let rewritten = host.attributes().is_in_query_loop && self.sync_query_loop(host);
                Update {
                    children_replaced: children_replaced || rewritten,
                    attributes_updated: false,
                }
            }
            CardEvent::QueryLoopChanged => Update {
                children_replaced: host.attributes().is_in_query_loop
                    && self.sync_query_loop(host),
                attributes_updated: false,
            },
            CardEvent::QueryContextChanged { inside_query_loop } => Update {
                children_replaced: false,
                attributes_updated: self.sync_query_context(host, *inside_query_loop),
            },
        }
    }

    /// Process queued notifications until the card is stable
    ///
    /// Returns the number of events handled. Only passes that commit count
    /// towards [`MAX_PASSES`]; no-op passes always drain. On error the
    /// remaining events stay queued.
    pub fn settle(&self, block: &mut CardBlock) -> Result<usize, EditorError> {
        let mut handled = 0;
        let mut committed = 0;
        while block.has_pending() {
            if committed == MAX_PASSES {
                return Err(EditorError::Unsettled { passes: committed });
            }
            let Some(event) = block.next_event() else {
                break;
            };
            handled += 1;
            let update = self.handle(block, &event);
            if !update.is_noop() {
                committed += 1;
            }
            debug!(?event, ?update, "handled card event");
        }
        Ok(handled)
    }

    /// Pick a layout for a card, replacing its children with a fresh template
    ///
    /// Falls back to the default variation when `name` is `None`.
    pub fn select_variation<H: DocumentHost>(
        &self,
        host: &mut H,
        name: Option<&str>,
    ) -> Result<(), EditorError> {
        let variation = match name {
            Some(name) => self.registry.require(name)?,
            None => self.registry.default_variation()?,
        };

        let mut attributes = host.attributes().clone();
        attributes.variation_type = variation.name.clone();
        host.set_attributes(attributes);
        host.replace_children(variation.template().to_vec());
        info!(variation = %variation.name, "selected card variation");
        Ok(())
    }

    /// Reconcile the card's children against its current variation
    ///
    /// A card with no children is still showing the variation picker and is
    /// left alone. Returns whether the children were replaced.
    pub fn sync_template<H: DocumentHost>(&self, host: &mut H) -> bool {
        if host.children().is_empty() {
            return false;
        }

        let variation_type = host.attributes().variation_type.clone();
        let Some(variation) = self.registry.get(&variation_type) else {
            warn!(variation = %variation_type, "unknown card variation, leaving children as they are");
            return false;
        };

        let next = self.fit_to_variation(variation, host.children());
        let rules = &self.config.signature_rules;
        if !rules.differs(host.children(), &next) {
            debug!(variation = %variation_type, "children already match variation");
            return false;
        }

        info!(
            variation = %variation_type,
            from = %rules.signature(host.children()),
            to = %rules.signature(&next),
            "reconciled card children"
        );
        host.replace_children(next);
        true
    }

    /// Reconcile `current` against a variation without committing anything
    pub fn fit_to_variation(&self, variation: &Variation, current: &[ContentNode]) -> Vec<ContentNode> {
        let reconciler = Reconciler::new(&self.config.query_loop_transforms);
        let mut next = reconciler.reconcile_all(variation.template(), current.to_vec());
        self.apply_default_image(&mut next);
        next
    }

    /// Swap standard blocks for post blocks; returns whether anything changed
    pub fn sync_query_loop<H: DocumentHost>(&self, host: &mut H) -> bool {
        match rewrite_for_query_loop(host.children()) {
            Some(rewritten) => {
                info!("rewrote card children for query loop");
                host.replace_children(rewritten);
                true
            }
            None => false,
        }
    }

    fn sync_query_context<H: DocumentHost>(&self, host: &mut H, inside_query_loop: bool) -> bool {
        if host.attributes().is_in_query_loop == inside_query_loop {
            return false;
        }
        let mut attributes = host.attributes().clone();
        attributes.is_in_query_loop = inside_query_loop;
        host.set_attributes(attributes);
        true
    }

    fn apply_default_image(&self, nodes: &mut [ContentNode]) {
        let Some(image) = &self.config.default_image else {
            return;
        };
        let Some(node) = nodes.iter_mut().find(|n| n.type_id == IMAGE) else {
            return;
        };
        if node.has_attr("url") || node.has_attr("id") {
            return;
        }
        node.attributes
            .insert("url".to_string(), Value::from(image.url.as_str()));
        node.attributes
            .insert("alt".to_string(), Value::from(image.alt.as_str()));
    }
}
