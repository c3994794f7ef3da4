//! Text notation for block trees
//!
//! ```text
//! core/image [url: "x.png"]
//! ltic/card-inner-text-block [templateLock: "false"] {
//!     core/heading [level: 2]
//!     core/paragraph
//! }
//! ```

mod grammar;
pub mod lexer;
mod printer;

pub use grammar::parse;
pub use printer::print;
