//! Tests for the in-memory document

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::dom::{Document, NodeRef};
use crate::events::Event;
use crate::host::{Host, HostNode, Listener};

fn tree() -> (Document, NodeRef, NodeRef) {
    let document = Document::new();
    let container = document.create_element("div");
    container.add_class("container");
    let button = document.create_element("button");
    button.set_id("btn");
    button.set_text("Press");
    container.append_child(&button);
    document.body().append_child(&container);
    (document, container, button)
}

fn recorder(log: &Rc<RefCell<Vec<String>>>, name: &str) -> Listener<NodeRef> {
    let log = log.clone();
    let name = name.to_string();
    Rc::new(move |event: &Event<NodeRef>| {
        let current = event
            .current_target()
            .map(|node| node.tag().to_string())
            .unwrap_or_default();
        log.borrow_mut().push(format!("{name}@{current}"));
    })
}

#[test]
fn test_lookup_by_id_and_text() {
    let (document, _, button) = tree();
    assert_eq!(document.element_by_id("btn"), Some(button.clone()));
    assert_eq!(document.element_by_id("nope"), None);
    assert_eq!(document.find_by_text("Press"), Some(button));
}

#[test]
fn test_detached_elements_are_not_queried() {
    let (document, _, button) = tree();
    button.remove();
    assert_eq!(document.element_by_id("btn"), None);
    assert!(document.query_selector_all("button").unwrap().is_empty());
}

#[test]
fn test_contains_is_inclusive() {
    let (document, container, button) = tree();
    assert!(document.contains(&container, &button));
    assert!(document.contains(&button, &button));
    assert!(!document.contains(&button, &container));
}

#[test]
fn test_click_bubbles_to_ancestors() {
    let (document, container, button) = tree();
    let log = Rc::new(RefCell::new(Vec::new()));
    document.add_event_listener(&button, "click", recorder(&log, "button"));
    document.add_event_listener(&container, "click", recorder(&log, "container"));

    document.click(&button);
    assert_eq!(
        log.borrow().as_slice(),
        ["button@button", "container@div"]
    );
}

#[test]
fn test_non_bubbling_event_stays_on_target() {
    let (document, container, button) = tree();
    let log = Rc::new(RefCell::new(Vec::new()));
    document.add_event_listener(&container, "ping", recorder(&log, "container"));

    document.dispatch_event(&button, Event::custom("ping", None));
    assert!(log.borrow().is_empty());
}

#[test]
fn test_identical_listener_is_attached_once() {
    let (document, _, button) = tree();
    let count = Rc::new(Cell::new(0));
    let counter = count.clone();
    let listener: Listener<NodeRef> = Rc::new(move |_: &Event<NodeRef>| counter.set(counter.get() + 1));
    document.add_event_listener(&button, "click", listener.clone());
    document.add_event_listener(&button, "click", listener.clone());
    assert_eq!(button.listener_count("click"), 1);

    document.click(&button);
    assert_eq!(count.get(), 1);

    document.remove_event_listener(&button, "click", &listener);
    assert_eq!(button.listener_count("click"), 0);
}

#[test]
fn test_listener_removed_during_dispatch_does_not_run() {
    let (document, _, button) = tree();
    let count = Rc::new(Cell::new(0));
    let counter = count.clone();
    let second: Listener<NodeRef> = Rc::new(move |_: &Event<NodeRef>| counter.set(counter.get() + 1));

    let doc = document.clone();
    let target = button.downgrade();
    let victim = second.clone();
    let first: Listener<NodeRef> = Rc::new(move |_: &Event<NodeRef>| {
        if let Some(node) = NodeRef::upgrade(&target) {
            doc.remove_event_listener(&node, "click", &victim);
        }
    });
    document.add_event_listener(&button, "click", first);
    document.add_event_listener(&button, "click", second);

    document.click(&button);
    assert_eq!(count.get(), 0);
}

#[test]
fn test_supports_event() {
    let document = Document::new();
    assert!(document.supports_event("click"));
    assert!(document.supports_event("focus"));
    assert!(!document.supports_event("custom-click"));
}

#[test]
fn test_append_moves_between_parents() {
    let (document, container, button) = tree();
    let other = document.create_element("section");
    other.append_child(&button);
    assert!(container.children().is_empty());
    assert_eq!(button.parent(), Some(other));
}
