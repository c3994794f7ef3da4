//! Template reconciliation
//!
//! Fitting existing content into a layout variation's template, the
//! substitution table consulted while matching, and the signature gate that
//! decides whether a result is worth committing.

mod reconcile;
mod signature;
mod transform;

pub use reconcile::{reconcile, Reconciler};
pub use signature::{Signature, SignatureRules};
pub use transform::{TransformMap, QUERY_LOOP_TRANSFORMS};
