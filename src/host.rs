// Host adapters for tiny-events

use std::fmt::Debug;
use std::rc::Rc;

use crate::events::Event;
use crate::Result;

/// A native listener as seen by the host. Hosts compare listeners by
/// pointer identity (`Rc::ptr_eq`).
pub type Listener<N> = Rc<dyn Fn(&Event<N>)>;

/// Handle to a node owned by the host tree
///
/// Handles are cheap to clone and compare equal when they point at the same
/// node.
pub trait HostNode: Clone + PartialEq + Debug + 'static {
    /// Non-owning form of the handle
    type Weak: Clone + 'static;

    /// Create a non-owning handle to this node
    fn downgrade(&self) -> Self::Weak;

    /// Recover the node, if it is still alive
    fn upgrade(weak: &Self::Weak) -> Option<Self>;

    /// Address-like key, stable while any handle (strong or weak) to the node
    /// exists
    fn identity_key(&self) -> usize;
}

/// Trait for host adapters
///
/// A host owns the node tree and its native listener registry. Everything the
/// library needs from a document goes through here.
pub trait Host: 'static {
    /// Node handle type of this host
    type Node: HostNode;

    /// Look up a single element by its id
    fn element_by_id(&self, id: &str) -> Option<Self::Node>;

    /// All elements matching `selector`, in document order
    fn query_selector_all(&self, selector: &str) -> Result<Vec<Self::Node>>;

    /// Whether `node` itself matches `selector`
    fn matches(&self, node: &Self::Node, selector: &str) -> Result<bool>;

    /// Whether `node` is `ancestor` or one of its descendants
    fn contains(&self, ancestor: &Self::Node, node: &Self::Node) -> bool;

    /// Attach a native listener for a bare event type. Attaching the same
    /// listener twice for the same type is a no-op.
    fn add_event_listener(&self, node: &Self::Node, event_type: &str, listener: Listener<Self::Node>);

    /// Detach a native listener previously attached for `event_type`
    fn remove_event_listener(
        &self,
        node: &Self::Node,
        event_type: &str,
        listener: &Listener<Self::Node>,
    );

    /// Whether the host knows `event_type` as a built-in event
    fn supports_event(&self, event_type: &str) -> bool;

    /// Dispatch an event with `node` as its target
    fn dispatch_event(&self, node: &Self::Node, event: Event<Self::Node>);
}
