//! Card editor
//!
//! The card's children follow its selected variation. Edits to the children,
//! layout switches and query-loop context changes arrive as [`CardEvent`]s
//! from a [`DocumentHost`]; [`CardEditor`] reconciles in response and commits
//! only when the result differs from what is already there.

mod attributes;
mod card;
mod host;
mod link;
mod query_loop;

pub use attributes::{equal_height_available, CardAttributes, DEFAULT_VARIATION};
pub use card::{CardEditor, EditorError, Update, MAX_PASSES};
pub use host::{CardBlock, CardEvent, DocumentHost};
pub use link::{LayoutSwitch, LinkConflict, LinkPolicy, LinkToggle};
pub use query_loop::rewrite_for_query_loop;
