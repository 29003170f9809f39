//! In-memory host document
//!
//! A small element tree that implements [`crate::host::Host`]: id and
//! selector queries, native listener lists and bubbling dispatch. It is enough
//! to run the event layer headless and is what the test-suite drives.

mod document;
mod node;
mod selector;

#[cfg(test)]
mod tests;

pub use document::{Document, NATIVE_EVENTS};
pub use node::{NodeRef, WeakNodeRef};
pub use selector::SelectorList;
