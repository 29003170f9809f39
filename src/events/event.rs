//! Event value passed to listeners

use serde_json::Value;

/// Whether an event was built as a built-in host event or a custom one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// Plain event of a type the host knows natively (`click`, `focus`, ...)
    Native,
    /// Custom event carrying a `detail` payload
    Custom,
}

/// An event travelling through the host tree
#[derive(Debug, Clone)]
pub struct Event<N> {
    event_type: String,
    kind: EventKind,
    detail: Value,
    bubbles: bool,
    target: Option<N>,
    current_target: Option<N>,
}

impl<N: Clone> Event<N> {
    /// Create a native, non-bubbling event
    pub fn native(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            kind: EventKind::Native,
            detail: Value::Null,
            bubbles: false,
            target: None,
            current_target: None,
        }
    }

    /// Create a custom, non-bubbling event with a detail payload
    pub fn custom(event_type: impl Into<String>, detail: Option<Value>) -> Self {
        Self {
            event_type: event_type.into(),
            kind: EventKind::Custom,
            detail: detail.unwrap_or(Value::Null),
            bubbles: false,
            target: None,
            current_target: None,
        }
    }

    /// Set whether the event bubbles up through ancestors
    pub fn with_bubbles(mut self, bubbles: bool) -> Self {
        self.bubbles = bubbles;
        self
    }

    /// Bare event type, without namespaces
    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    pub fn is_custom(&self) -> bool {
        self.kind == EventKind::Custom
    }

    /// Payload of a custom event; `Null` for native events and for custom
    /// events triggered without one
    pub fn detail(&self) -> &Value {
        &self.detail
    }

    pub fn bubbles(&self) -> bool {
        self.bubbles
    }

    /// The node the event was dispatched on
    pub fn target(&self) -> Option<&N> {
        self.target.as_ref()
    }

    /// The node whose listener is currently running
    pub fn current_target(&self) -> Option<&N> {
        self.current_target.as_ref()
    }

    /// Set by hosts when dispatch starts
    pub fn set_target(&mut self, target: N) {
        self.target = Some(target);
    }

    /// Set by hosts as the event moves between nodes
    pub fn set_current_target(&mut self, node: Option<N>) {
        self.current_target = node;
    }
}
