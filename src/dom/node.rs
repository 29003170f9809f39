//! Element nodes of the in-memory document

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::{Rc, Weak};

use crate::events::Event;
use crate::host::{HostNode, Listener};

/// Backing storage of an element
struct NodeData {
    /// Lowercase tag name
    tag: String,

    id: RefCell<Option<String>>,

    classes: RefCell<BTreeSet<String>>,

    /// Own text content
    text: RefCell<String>,

    parent: RefCell<Weak<NodeData>>,

    children: RefCell<Vec<NodeRef>>,

    /// Native listeners in attachment order
    listeners: RefCell<Vec<(String, Listener<NodeRef>)>>,
}

/// Shared handle to an element; clones point at the same element
#[derive(Clone)]
pub struct NodeRef(Rc<NodeData>);

impl PartialEq for NodeRef {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for NodeRef {}

impl std::fmt::Debug for NodeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut out = format!("<{}", self.0.tag);
        if let Some(id) = self.id() {
            out.push_str(&format!(" id={id:?}"));
        }
        let classes = self.classes();
        if !classes.is_empty() {
            out.push_str(&format!(" class={:?}", classes.join(" ")));
        }
        out.push('>');
        f.write_str(&out)
    }
}

/// Non-owning element handle
#[derive(Clone)]
pub struct WeakNodeRef(Weak<NodeData>);

impl HostNode for NodeRef {
    type Weak = WeakNodeRef;

    fn downgrade(&self) -> Self::Weak {
        WeakNodeRef(Rc::downgrade(&self.0))
    }

    fn upgrade(weak: &Self::Weak) -> Option<Self> {
        weak.0.upgrade().map(NodeRef)
    }

    fn identity_key(&self) -> usize {
        Rc::as_ptr(&self.0) as usize
    }
}

impl NodeRef {
    /// Create a detached element
    pub(crate) fn new(tag: &str) -> Self {
        Self(Rc::new(NodeData {
            tag: tag.to_ascii_lowercase(),
            id: RefCell::new(None),
            classes: RefCell::new(BTreeSet::new()),
            text: RefCell::new(String::new()),
            parent: RefCell::new(Weak::new()),
            children: RefCell::new(Vec::new()),
            listeners: RefCell::new(Vec::new()),
        }))
    }

    pub fn tag(&self) -> &str {
        &self.0.tag
    }

    pub fn id(&self) -> Option<String> {
        self.0.id.borrow().clone()
    }

    pub fn set_id(&self, id: &str) {
        *self.0.id.borrow_mut() = Some(id.to_string());
    }

    pub fn add_class(&self, class: &str) {
        self.0.classes.borrow_mut().insert(class.to_string());
    }

    pub fn remove_class(&self, class: &str) {
        self.0.classes.borrow_mut().remove(class);
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.0.classes.borrow().contains(class)
    }

    pub fn classes(&self) -> Vec<String> {
        self.0.classes.borrow().iter().cloned().collect()
    }

    pub fn text(&self) -> String {
        self.0.text.borrow().clone()
    }

    pub fn set_text(&self, text: &str) {
        *self.0.text.borrow_mut() = text.to_string();
    }

    pub fn parent(&self) -> Option<NodeRef> {
        self.0.parent.borrow().upgrade().map(NodeRef)
    }

    pub fn children(&self) -> Vec<NodeRef> {
        self.0.children.borrow().clone()
    }

    /// Append `child`, moving it out of its previous parent
    pub fn append_child(&self, child: &NodeRef) {
        child.remove();
        *child.0.parent.borrow_mut() = Rc::downgrade(&self.0);
        self.0.children.borrow_mut().push(child.clone());
    }

    /// Detach this element from its parent
    pub fn remove(&self) {
        if let Some(parent) = self.parent() {
            parent.0.children.borrow_mut().retain(|c| c != self);
        }
        *self.0.parent.borrow_mut() = Weak::new();
    }

    /// Whether `other` is this element or one of its descendants
    pub fn contains(&self, other: &NodeRef) -> bool {
        let mut current = Some(other.clone());
        while let Some(node) = current {
            if &node == self {
                return true;
            }
            current = node.parent();
        }
        false
    }

    /// This element followed by its ancestors, nearest first
    pub fn inclusive_ancestors(&self) -> Vec<NodeRef> {
        let mut path = vec![self.clone()];
        let mut current = self.parent();
        while let Some(node) = current {
            current = node.parent();
            path.push(node);
        }
        path
    }

    /// This element and its descendants in document order
    pub fn descendants_inclusive(&self) -> Vec<NodeRef> {
        let mut out = Vec::new();
        let mut stack = vec![self.clone()];
        while let Some(node) = stack.pop() {
            stack.extend(node.children().into_iter().rev());
            out.push(node);
        }
        out
    }

    /// Number of native listeners attached for `event_type`
    pub fn listener_count(&self, event_type: &str) -> usize {
        self.0
            .listeners
            .borrow()
            .iter()
            .filter(|(ty, _)| ty == event_type)
            .count()
    }

    pub(crate) fn add_listener(&self, event_type: &str, listener: Listener<NodeRef>) {
        if self.has_listener(event_type, &listener) {
            return;
        }
        self.0
            .listeners
            .borrow_mut()
            .push((event_type.to_string(), listener));
    }

    pub(crate) fn remove_listener(&self, event_type: &str, listener: &Listener<NodeRef>) {
        self.0
            .listeners
            .borrow_mut()
            .retain(|(ty, l)| !(ty == event_type && Rc::ptr_eq(l, listener)));
    }

    pub(crate) fn has_listener(&self, event_type: &str, listener: &Listener<NodeRef>) -> bool {
        self.0
            .listeners
            .borrow()
            .iter()
            .any(|(ty, l)| ty == event_type && Rc::ptr_eq(l, listener))
    }

    pub(crate) fn listeners_for(&self, event_type: &str) -> Vec<Listener<NodeRef>> {
        self.0
            .listeners
            .borrow()
            .iter()
            .filter(|(ty, _)| ty == event_type)
            .map(|(_, l)| l.clone())
            .collect()
    }

    /// Run this element's listeners for `event`, skipping any removed while
    /// earlier ones ran
    pub(crate) fn invoke_listeners(&self, event: &Event<NodeRef>) {
        for listener in self.listeners_for(event.event_type()) {
            if self.has_listener(event.event_type(), &listener) {
                listener(event);
            }
        }
    }
}
