//! Listener registry shared by every handle of one document context

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use crate::config::Config;
use crate::events::codec;
use crate::events::handle::Events;
use crate::events::selection::Selector;
use crate::host::{Host, HostNode, Listener};
use crate::Result;

/// Registered native listeners, keyed by node-specific registration key
type ListenerMap<N> = HashMap<String, Vec<Listener<N>>>;

/// Identity token assigned to a node, holding the node weakly
struct Identity<N: HostNode> {
    node: N::Weak,
    token: String,
}

/// Owns the listener table and the node identity side table
///
/// Create one per document context and select nodes through it. Handles and
/// the wrappers they attach only hold weak references back to the registry.
pub struct Registry<H: Host> {
    host: H,
    config: Config,
    listeners: RefCell<ListenerMap<H::Node>>,
    identities: RefCell<HashMap<usize, Identity<H::Node>>>,
    this: Weak<Registry<H>>,
}

impl<H: Host> std::fmt::Debug for Registry<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("config", &self.config)
            .field("keys", &self.listeners.borrow().len())
            .field("identities", &self.identities.borrow().len())
            .finish()
    }
}

impl<H: Host> Registry<H> {
    /// Create a registry with the default configuration
    pub fn new(host: H) -> Rc<Self> {
        Self::build(host, Config::default())
    }

    /// Create a registry with a custom configuration
    pub fn with_config(host: H, config: Config) -> Result<Rc<Self>> {
        config.validate()?;
        Ok(Self::build(host, config))
    }

    fn build(host: H, config: Config) -> Rc<Self> {
        Rc::new_cyclic(|this| Self {
            host,
            config,
            listeners: RefCell::new(HashMap::new()),
            identities: RefCell::new(HashMap::new()),
            this: this.clone(),
        })
    }

    /// Resolve a selector into a handle
    pub fn select<'a>(
        self: &Rc<Self>,
        selector: impl Into<Selector<'a, H::Node>>,
    ) -> Result<Events<H>> {
        Events::new(self, selector)
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub(crate) fn downgrade(&self) -> Weak<Self> {
        self.this.clone()
    }

    /// Identity token of `node`, assigning a fresh one on first use
    pub fn identity(&self, node: &H::Node) -> String {
        let mut identities = self.identities.borrow_mut();
        identities
            .entry(node.identity_key())
            .or_insert_with(|| Identity {
                node: node.downgrade(),
                token: codec::generate_token(),
            })
            .token
            .clone()
    }

    /// Identity token of `node`, if it already has one
    pub fn identity_of(&self, node: &H::Node) -> Option<String> {
        self.identities
            .borrow()
            .get(&node.identity_key())
            .map(|identity| identity.token.clone())
    }

    /// Registration key of `event_name` on `node`, assigning an identity if
    /// needed
    pub fn key_for(&self, node: &H::Node, event_name: &str) -> String {
        codec::encode(event_name, &self.config.separator, &self.identity(node))
    }

    /// Registration key of `event_name` on `node` if the node has an identity
    pub fn existing_key_for(&self, node: &H::Node, event_name: &str) -> Option<String> {
        self.identity_of(node)
            .map(|token| codec::encode(event_name, &self.config.separator, &token))
    }

    /// Full event name a key was registered under
    pub fn decode<'k>(&self, key: &'k str) -> &'k str {
        codec::decode(key, &self.config.separator)
    }

    /// Store `listener` under `key` and attach it natively for the bare type
    pub fn register(&self, node: &H::Node, key: String, listener: Listener<H::Node>) {
        let event_type = codec::base_type(self.decode(&key)).to_string();
        log::debug!("registering listener {key}");
        self.listeners
            .borrow_mut()
            .entry(key)
            .or_default()
            .push(listener.clone());
        self.host.add_event_listener(node, &event_type, listener);
    }

    /// Detach every listener stored under `key` from `node` and drop the key
    pub fn unregister_all(&self, node: &H::Node, key: &str) {
        let Some(listeners) = self.listeners.borrow_mut().remove(key) else {
            return;
        };
        let event_type = codec::base_type(self.decode(key));
        log::debug!("removing {} listener(s) for {key}", listeners.len());
        for listener in &listeners {
            self.host.remove_event_listener(node, event_type, listener);
        }
    }

    /// Snapshot of every registered key
    pub fn keys(&self) -> Vec<String> {
        self.listeners.borrow().keys().cloned().collect()
    }

    /// Number of registered keys
    pub fn len(&self) -> usize {
        self.listeners.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.borrow().is_empty()
    }

    /// Number of listeners stored under `key`
    pub fn listener_count(&self, key: &str) -> usize {
        self.listeners.borrow().get(key).map_or(0, Vec::len)
    }

    /// Detach everything and forget every identity
    pub fn reset(&self) {
        let listeners = std::mem::take(&mut *self.listeners.borrow_mut());
        for (key, listeners) in listeners {
            let Some(node) = self.node_for_key(&key) else {
                continue;
            };
            let event_type = codec::base_type(self.decode(&key));
            for listener in &listeners {
                self.host.remove_event_listener(&node, event_type, listener);
            }
        }
        self.identities.borrow_mut().clear();
        log::debug!("registry reset");
    }

    /// Forget identities of dropped nodes along with their keys. Returns the
    /// number of identities removed.
    pub fn prune(&self) -> usize {
        let dead: Vec<String> = {
            let mut identities = self.identities.borrow_mut();
            let mut dead = Vec::new();
            identities.retain(|_, identity| {
                let alive = H::Node::upgrade(&identity.node).is_some();
                if !alive {
                    dead.push(identity.token.clone());
                }
                alive
            });
            dead
        };
        if !dead.is_empty() {
            let separator = self.config.separator.as_str();
            self.listeners.borrow_mut().retain(|key, _| {
                !dead
                    .iter()
                    .any(|token| key.ends_with(&format!("{separator}{token}")))
            });
            log::debug!("pruned {} dropped node(s)", dead.len());
        }
        dead.len()
    }

    fn node_for_key(&self, key: &str) -> Option<H::Node> {
        let name = self.decode(key);
        let token = key.get(name.len() + self.config.separator.len()..)?;
        self.identities
            .borrow()
            .values()
            .find(|identity| identity.token == token)
            .and_then(|identity| H::Node::upgrade(&identity.node))
    }
}
