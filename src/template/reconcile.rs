//! Template reconciliation
//!
//! Fits existing content into a variation's template. Each template slot is
//! filled by the first pool node of a matching type (directly or through the
//! substitution table), in pool order. Matched nodes keep their own type and
//! children; template defaults only fill attributes the content lacks. Slots
//! with no match recurse into their children (containers) or stay as the
//! empty template node (leaves). Pool nodes left over at the end are dropped.

use tracing::{debug, trace};

use crate::block::{ContentNode, TemplateNode};

use super::transform::TransformMap;

/// Reconciles templates against a pool of content nodes
#[derive(Debug, Clone, Copy)]
pub struct Reconciler<'a> {
    transforms: &'a TransformMap,
}

impl<'a> Reconciler<'a> {
    pub fn new(transforms: &'a TransformMap) -> Self {
        Self { transforms }
    }

    /// Fill `template` from `pool`, consuming each matched pool node
    ///
    /// The output has exactly one node per template node at every level.
    /// The pool is shared across branches, so a node consumed by an earlier
    /// slot is unavailable to every later slot, nested or not.
    pub fn reconcile(
        &self,
        template: &[TemplateNode],
        pool: &mut Vec<ContentNode>,
    ) -> Vec<ContentNode> {
        template.iter().map(|slot| self.fill_slot(slot, pool)).collect()
    }

    /// Reconcile and drop whatever the template had no slot for
    pub fn reconcile_all(
        &self,
        template: &[TemplateNode],
        mut pool: Vec<ContentNode>,
    ) -> Vec<ContentNode> {
        let output = self.reconcile(template, &mut pool);
        for dropped in &pool {
            debug!(type_id = %dropped.type_id, "no template slot for content node, dropping it");
        }
        output
    }

    fn fill_slot(&self, slot: &TemplateNode, pool: &mut Vec<ContentNode>) -> ContentNode {
        let found = pool
            .iter()
            .position(|node| self.transforms.satisfies(&slot.type_id, &node.type_id));

        if let Some(index) = found {
            let matched = pool.remove(index);
            trace!(slot = %slot.type_id, matched = %matched.type_id, "filled template slot");

            let mut attributes = slot.attributes.clone();
            attributes.extend(matched.attributes);

            return ContentNode {
                type_id: matched.type_id,
                attributes,
                children: matched.children,
            };
        }

        if slot.is_container() {
            return ContentNode {
                type_id: slot.type_id.clone(),
                attributes: slot.attributes.clone(),
                children: self.reconcile(&slot.children, pool),
            };
        }

        slot.clone()
    }
}

/// Reconcile `template` against `pool` with the given substitution table
pub fn reconcile(
    template: &[TemplateNode],
    pool: &mut Vec<ContentNode>,
    transforms: &TransformMap,
) -> Vec<ContentNode> {
    Reconciler::new(transforms).reconcile(template, pool)
}
