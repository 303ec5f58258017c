//! Structural addressing of the hand-written HTML pages.
//!
//! Pages are scanned into a flat, document-ordered list of elements with
//! byte ranges. Nothing is re-serialised: a substitution splices one range
//! of the original string and leaves every other byte alone.

pub mod anchor;
pub mod elements;
pub mod substitute;

pub use anchor::{Anchor, Query};
pub use elements::Document;
pub use substitute::{substitute, Region};
