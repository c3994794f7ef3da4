//! Card layout variations
//!
//! A variation names a template tree. The card's `variationType` attribute
//! selects one, and the editor reconciles the card's children against it.
//!
//! # Example
//!
//! ```toml
//! [[variation]]
//! name = "card-3"
//! title = "Text only"
//! template = """
//! ltic/card-inner-text-block {
//!     core/heading
//!     core/paragraph
//! }
//! """
//! ```

mod registry;

pub use registry::{Variation, VariationError, VariationRegistry};
