//! Shared helpers for the crate's unit tests.

mod classbytes;

pub use builders::*;
pub use classbytes::*;
