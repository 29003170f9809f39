//! In-memory document implementing [`Host`]

use std::rc::Rc;

use crate::dom::{NodeRef, SelectorList};
use crate::events::Event;
use crate::host::{Host, Listener};
use crate::Result;

/// Event types the document treats as built in (its `on<type>` handlers)
pub const NATIVE_EVENTS: &[&str] = &[
    "abort", "animationend", "animationiteration", "animationstart", "auxclick", "beforeinput",
    "blur", "cancel", "change", "click", "close", "contextmenu", "copy", "cut", "dblclick",
    "drag", "dragend", "dragenter", "dragleave", "dragover", "dragstart", "drop", "error",
    "focus", "focusin", "focusout", "input", "invalid", "keydown", "keypress", "keyup", "load",
    "mousedown", "mouseenter", "mouseleave", "mousemove", "mouseout", "mouseover", "mouseup",
    "paste", "pointercancel", "pointerdown", "pointerenter", "pointerleave", "pointermove",
    "pointerout", "pointerover", "pointerup", "reset", "resize", "scroll", "select", "submit",
    "toggle", "touchcancel", "touchend", "touchmove", "touchstart", "transitionend", "wheel",
];

struct DocumentInner {
    root: NodeRef,
    body: NodeRef,
}

/// Headless element tree with native listener lists and bubbling dispatch
///
/// Cloning a document yields another handle to the same tree.
#[derive(Clone)]
pub struct Document {
    inner: Rc<DocumentInner>,
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("elements", &self.inner.root.descendants_inclusive().len())
            .finish()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty `<html><body></body></html>` document
    pub fn new() -> Self {
        let root = NodeRef::new("html");
        let body = NodeRef::new("body");
        root.append_child(&body);
        Self {
            inner: Rc::new(DocumentInner { root, body }),
        }
    }

    /// The `<html>` element
    pub fn root(&self) -> NodeRef {
        self.inner.root.clone()
    }

    pub fn body(&self) -> NodeRef {
        self.inner.body.clone()
    }

    /// Create a detached element
    pub fn create_element(&self, tag: &str) -> NodeRef {
        NodeRef::new(tag)
    }

    /// First connected element whose own text is `text`
    pub fn find_by_text(&self, text: &str) -> Option<NodeRef> {
        self.inner
            .root
            .descendants_inclusive()
            .into_iter()
            .find(|node| node.text() == text)
    }

    /// Simulate a user click: a bubbling native `click` targeted at `node`
    pub fn click(&self, node: &NodeRef) {
        self.dispatch(node, Event::native("click").with_bubbles(true));
    }

    /// Dispatch `event` on `node`, then on its ancestors if it bubbles
    pub fn dispatch(&self, node: &NodeRef, mut event: Event<NodeRef>) {
        event.set_target(node.clone());
        let path = if event.bubbles() {
            node.inclusive_ancestors()
        } else {
            vec![node.clone()]
        };
        log::trace!("dispatching {:?} on {node:?}", event.event_type());
        for current in path {
            event.set_current_target(Some(current.clone()));
            current.invoke_listeners(&event);
        }
    }
}

impl Host for Document {
    type Node = NodeRef;

    fn element_by_id(&self, id: &str) -> Option<NodeRef> {
        self.inner
            .root
            .descendants_inclusive()
            .into_iter()
            .find(|node| node.id().as_deref() == Some(id))
    }

    fn query_selector_all(&self, selector: &str) -> Result<Vec<NodeRef>> {
        let selector = SelectorList::parse(selector)?;
        Ok(self
            .inner
            .root
            .descendants_inclusive()
            .into_iter()
            .filter(|node| selector.matches(node))
            .collect())
    }

    fn matches(&self, node: &NodeRef, selector: &str) -> Result<bool> {
        Ok(SelectorList::parse(selector)?.matches(node))
    }

    fn contains(&self, ancestor: &NodeRef, node: &NodeRef) -> bool {
        ancestor.contains(node)
    }

    fn add_event_listener(&self, node: &NodeRef, event_type: &str, listener: Listener<NodeRef>) {
        node.add_listener(event_type, listener);
    }

    fn remove_event_listener(&self, node: &NodeRef, event_type: &str, listener: &Listener<NodeRef>) {
        node.remove_listener(event_type, listener);
    }

    fn supports_event(&self, event_type: &str) -> bool {
        NATIVE_EVENTS.iter().any(|native| *native == event_type)
    }

    fn dispatch_event(&self, node: &NodeRef, event: Event<NodeRef>) {
        self.dispatch(node, event);
    }
}
