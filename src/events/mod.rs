//! Namespaced, delegated event handling for host nodes
//!
//! The event layer provides:
//! - Selector resolution into an explicit working set of nodes
//! - A codec that makes `type.namespace` names unique per node
//! - A registry mapping registration keys to native listeners
//! - Delegated and fire-once listener wrappers
//! - The fluent [`Events`] handle tying it together

pub mod codec;
pub mod delegation;
pub mod event;
pub mod handle;
pub mod registry;
pub mod selection;

pub use event::{Event, EventKind};
pub use handle::Events;
pub use registry::Registry;
pub use selection::{Selector, WorkingSet};
