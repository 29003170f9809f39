//! Tiny event delegation utility for tree-structured UI nodes.
//!
//! `tiny-events` layers three things on top of a host's native listener
//! registry:
//! - namespaced event names (`click.menu.item`) that can later be removed by
//!   any subset of their namespaces
//! - delegated listeners that only fire when the event's true target matches a
//!   descendant selector
//! - fire-once listeners, and triggering of native or custom events
//!
//! The host tree is reached through the [`host::Host`] trait. The [`dom`]
//! module ships an in-memory host so the library can run headless.
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use tiny_events::prelude::*;
//!
//! let document = Document::new();
//! let body = document.body();
//! let button = document.create_element("button");
//! button.set_id("save");
//! body.append_child(&button);
//!
//! let events = Registry::new(document.clone());
//! let clicks = Rc::new(Cell::new(0));
//! let counter = clicks.clone();
//! events
//!     .select("#save")?
//!     .on("click.toolbar", move |_| counter.set(counter.get() + 1));
//!
//! document.click(&button);
//! events.select("#save")?.off(".toolbar");
//! document.click(&button);
//! assert_eq!(clicks.get(), 1);
//! # Ok::<(), tiny_events::Error>(())
//! ```

pub mod config;
pub mod dom;
pub mod events;
pub mod host;

/// Version of the tiny-events library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Re-export of common types for convenience
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::dom::{Document, NodeRef};
    pub use crate::events::{Event, EventKind, Events, Registry, Selector, WorkingSet};
    pub use crate::host::{Host, HostNode, Listener};
    pub use crate::Error;
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in tiny-events
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("Invalid selector: {0}")]
    InvalidSelector(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Host error: {0}")]
    Host(String),
}
