//! Fluent handle over a resolved working set

use std::rc::Rc;

use serde_json::Value;

use crate::events::selection::{resolve, Selector, WorkingSet};
use crate::events::{codec, delegation, Event, Registry};
use crate::host::{Host, HostNode, Listener};
use crate::Result;

/// Fluent API over the nodes a selector resolved to
///
/// Every operation returns the handle so calls can be chained. Operations on
/// an empty working set do nothing.
pub struct Events<H: Host> {
    registry: Rc<Registry<H>>,
    nodes: WorkingSet<H::Node>,
}

impl<H: Host> std::fmt::Debug for Events<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Events")
            .field("nodes", &self.nodes)
            .finish()
    }
}

impl<H: Host> Events<H> {
    /// Resolve `selector` against the registry's host
    pub fn new<'a>(
        registry: &Rc<Registry<H>>,
        selector: impl Into<Selector<'a, H::Node>>,
    ) -> Result<Self> {
        let nodes = resolve(registry.host(), registry.config(), selector.into())?;
        Ok(Self {
            registry: registry.clone(),
            nodes,
        })
    }

    /// Handle over exactly one node
    pub fn single(registry: &Rc<Registry<H>>, node: H::Node) -> Self {
        Self {
            registry: registry.clone(),
            nodes: WorkingSet::Single(node),
        }
    }

    pub fn registry(&self) -> &Rc<Registry<H>> {
        &self.registry
    }

    pub fn nodes(&self) -> &WorkingSet<H::Node> {
        &self.nodes
    }

    /// First node of the working set
    pub fn first(&self) -> Option<&H::Node> {
        self.nodes.first()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Call `f(node, index)` for every node in order
    pub fn each(&self, mut f: impl FnMut(&H::Node, usize)) -> &Self {
        for (index, node) in self.nodes.iter().enumerate() {
            f(node, index);
        }
        self
    }

    /// Attach `listener` for every space-separated event name
    pub fn on<F>(&self, event_names: &str, listener: F) -> &Self
    where
        F: Fn(&Event<H::Node>) + 'static,
    {
        let listener: Listener<H::Node> = Rc::new(listener);
        for event_name in split_names(event_names) {
            self.each(|node, _| self.attach(node, event_name, None, listener.clone()));
        }
        self
    }

    /// Attach `listener` so it only runs when the event target is inside
    /// `selector`
    pub fn on_delegated<F>(&self, event_names: &str, selector: &str, listener: F) -> &Self
    where
        F: Fn(&Event<H::Node>) + 'static,
    {
        let listener: Listener<H::Node> = Rc::new(listener);
        for event_name in split_names(event_names) {
            self.each(|node, _| self.attach(node, event_name, Some(selector), listener.clone()));
        }
        self
    }

    /// Like [`Events::on`], but each node runs `listener` at most once per
    /// event name
    pub fn one<F>(&self, event_names: &str, listener: F) -> &Self
    where
        F: Fn(&Event<H::Node>) + 'static,
    {
        self.attach_once(event_names, None, Rc::new(listener))
    }

    /// Like [`Events::on_delegated`], but each node runs `listener` at most
    /// once per event name
    pub fn one_delegated<F>(&self, event_names: &str, selector: &str, listener: F) -> &Self
    where
        F: Fn(&Event<H::Node>) + 'static,
    {
        self.attach_once(event_names, Some(selector), Rc::new(listener))
    }

    /// Remove registrations whose names contain all tokens of any of the
    /// space-separated patterns. `.ns` removes everything in namespace `ns`.
    pub fn off(&self, event_names: &str) -> &Self {
        if self.nodes.is_empty() {
            return self;
        }
        let registry = &self.registry;
        for key in registry.keys() {
            let event_name = registry.decode(&key).to_string();
            for pattern in event_names.split(' ') {
                if !codec::is_matched(pattern, &event_name) {
                    continue;
                }
                self.each(|node, _| {
                    if registry.existing_key_for(node, &event_name).as_deref() == Some(key.as_str()) {
                        registry.unregister_all(node, &key);
                    }
                });
            }
        }
        self
    }

    /// Dispatch `event_name` (namespace ignored) on every node. Types the host
    /// knows natively get a plain event; anything else becomes a custom
    /// event carrying `detail`.
    pub fn trigger(&self, event_name: &str, detail: Option<Value>) -> &Self {
        if self.first().is_none() {
            return self;
        }
        let event_type = codec::base_type(event_name);
        let host = self.registry.host();
        let event = if host.supports_event(event_type) {
            Event::native(event_type)
        } else {
            Event::custom(event_type, detail)
        };
        log::trace!("triggering {event_type:?} on {} node(s)", self.len());
        self.each(|node, _| host.dispatch_event(node, event.clone()));
        self
    }

    fn attach(
        &self,
        node: &H::Node,
        event_name: &str,
        selector: Option<&str>,
        listener: Listener<H::Node>,
    ) {
        let key = self.registry.key_for(node, event_name);
        let listener = match selector {
            Some(selector) => {
                delegation::delegate(self.registry.downgrade(), selector.to_string(), listener)
            }
            None => listener,
        };
        self.registry.register(node, key, listener);
    }

    fn attach_once(
        &self,
        event_names: &str,
        selector: Option<&str>,
        listener: Listener<H::Node>,
    ) -> &Self {
        for event_name in split_names(event_names) {
            self.each(|node, _| {
                let once = delegation::once(
                    self.registry.downgrade(),
                    node.downgrade(),
                    event_name.to_string(),
                    listener.clone(),
                );
                self.attach(node, event_name, selector, once);
            });
        }
        self
    }
}

fn split_names(event_names: &str) -> impl Iterator<Item = &str> {
    event_names.split(' ').filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Document, NodeRef};
    use std::cell::{Cell, RefCell};

    fn buttons(count: usize) -> (Document, Rc<Registry<Document>>, Vec<NodeRef>) {
        let document = Document::new();
        let body = document.body();
        let nodes = (0..count)
            .map(|i| {
                let button = document.create_element("button");
                button.set_id(&format!("btn-{}", i + 1));
                button.add_class("btn");
                body.append_child(&button);
                button
            })
            .collect();
        let registry = Registry::new(document.clone());
        (document, registry, nodes)
    }

    #[test]
    fn test_each_visits_nodes_in_order() {
        let (_document, registry, _) = buttons(3);
        let seen = RefCell::new(Vec::new());
        registry.select(".btn").unwrap().each(|node, index| {
            seen.borrow_mut().push((node.id().unwrap_or_default(), index));
        });
        assert_eq!(
            seen.into_inner(),
            vec![
                ("btn-1".to_string(), 0),
                ("btn-2".to_string(), 1),
                ("btn-3".to_string(), 2)
            ]
        );
    }

    #[test]
    fn test_each_on_single_node_uses_index_zero() {
        let (_document, registry, _) = buttons(2);
        let calls = Cell::new(0);
        registry.select("#btn-2").unwrap().each(|node, index| {
            assert_eq!(node.id().as_deref(), Some("btn-2"));
            assert_eq!(index, 0);
            calls.set(calls.get() + 1);
        });
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_on_registers_one_key_per_node_and_name() {
        let (_document, registry, _) = buttons(2);
        registry.select(".btn").unwrap().on("click focus.a", |_| {});
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn test_extra_spaces_in_names_are_ignored() {
        let (_document, registry, _) = buttons(1);
        registry.select("#btn-1").unwrap().on("click  focus ", |_| {});
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_empty_pattern_removes_all_registrations_of_the_set() {
        let (_document, registry, nodes) = buttons(2);
        registry.select(".btn").unwrap().on("click.a focus.b", |_| {});
        registry.select(Some(nodes[0].clone())).unwrap().off("");
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_off_on_empty_selection_leaves_registry_untouched() {
        let (_document, registry, _) = buttons(1);
        registry.select("#btn-1").unwrap().on("click", |_| {});
        let handle = registry.select("#missing").unwrap();
        assert!(handle.is_empty());
        handle.off("click").off("");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_trigger_on_empty_selection_is_noop() {
        let (_document, registry, _) = buttons(1);
        let handle = registry.select(".nothing").unwrap();
        assert!(handle.first().is_none());
        handle.trigger("click", None).trigger("custom", None);
    }

    #[test]
    fn test_native_trigger_does_not_bubble() {
        let (document, registry, nodes) = buttons(1);
        let count = Rc::new(Cell::new(0));
        let counter = count.clone();
        registry
            .select(Some(document.body()))
            .unwrap()
            .on("click", move |_| counter.set(counter.get() + 1));

        registry.select(Some(nodes[0].clone())).unwrap().trigger("click", None);
        assert_eq!(count.get(), 0);

        document.click(&nodes[0]);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_reentrant_on_inside_listener() {
        let (document, registry, nodes) = buttons(1);
        let count = Rc::new(Cell::new(0));
        let inner_count = count.clone();
        let inner_registry = Rc::downgrade(&registry);
        registry.select("#btn-1").unwrap().one("click", move |event| {
            let Some(registry) = inner_registry.upgrade() else {
                return;
            };
            let counter = inner_count.clone();
            if let Some(target) = event.target() {
                Events::single(&registry, target.clone())
                    .on("click", move |_| counter.set(counter.get() + 1));
            }
        });

        document.click(&nodes[0]);
        assert_eq!(count.get(), 0);
        document.click(&nodes[0]);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_reentrant_off_inside_listener() {
        let (document, registry, nodes) = buttons(1);
        let count = Rc::new(Cell::new(0));
        let counter = count.clone();
        let inner_registry = Rc::downgrade(&registry);
        registry.select("#btn-1").unwrap().on("click.self", move |event| {
            counter.set(counter.get() + 1);
            let Some(registry) = inner_registry.upgrade() else {
                return;
            };
            if let Some(target) = event.target() {
                Events::single(&registry, target.clone()).off(".self");
            }
        });

        document.click(&nodes[0]);
        assert_eq!(count.get(), 1);
        assert!(registry.is_empty());
        assert_eq!(nodes[0].listener_count("click"), 0);

        document.click(&nodes[0]);
        assert_eq!(count.get(), 1);
    }
}
