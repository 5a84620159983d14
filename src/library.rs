//! Library module: walking a `<root>/<artist>/<album>` tree.
//!
//! `model` holds the album and artifact types, `scan` the traversals used by
//! every audit and fix.

mod model;
mod scan;

pub use model::*;
pub use scan::*;
