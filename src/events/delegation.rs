//! Listener wrappers for delegated and fire-once handlers
//!
//! A delegated listener is attached to an ancestor and only runs the user
//! callback when the event's true target is, or sits inside, a node matching
//! the delegate selector. A fire-once listener removes its own registration
//! from its node before running the user callback.

use std::rc::{Rc, Weak};

use crate::events::handle::Events;
use crate::events::selection::{resolve, Selector};
use crate::events::{Event, Registry};
use crate::host::{Host, HostNode, Listener};
use crate::Result;

/// Whether `target` matches `selector` or is a strict descendant of a node
/// matching it. The selector is resolved against the whole document, not the
/// node the listener is attached to.
pub fn found_target<H: Host>(registry: &Registry<H>, target: &H::Node, selector: &str) -> bool {
    match is_or_within(registry, target, selector) {
        Ok(found) => found,
        Err(e) => {
            log::warn!("delegate selector {selector:?} failed during dispatch: {e}");
            false
        }
    }
}

fn is_or_within<H: Host>(registry: &Registry<H>, target: &H::Node, selector: &str) -> Result<bool> {
    let host = registry.host();
    if host.matches(target, selector)? {
        return Ok(true);
    }
    let scope = resolve(host, registry.config(), Selector::Css(selector))?;
    Ok(scope
        .iter()
        .any(|node| node != target && host.contains(node, target)))
}

/// Wrap `listener` so it only runs for targets inside `selector`
pub(crate) fn delegate<H: Host>(
    registry: Weak<Registry<H>>,
    selector: String,
    listener: Listener<H::Node>,
) -> Listener<H::Node> {
    Rc::new(move |event: &Event<H::Node>| {
        let Some(registry) = registry.upgrade() else {
            return;
        };
        let Some(target) = event.target() else {
            return;
        };
        if found_target(&*registry, target, &selector) {
            listener(event);
        }
    })
}

/// Wrap `listener` so its first run first removes `event_name` from `node`
pub(crate) fn once<H: Host>(
    registry: Weak<Registry<H>>,
    node: <H::Node as HostNode>::Weak,
    event_name: String,
    listener: Listener<H::Node>,
) -> Listener<H::Node> {
    Rc::new(move |event: &Event<H::Node>| {
        if let (Some(registry), Some(node)) = (registry.upgrade(), H::Node::upgrade(&node)) {
            log::trace!("fire-once listener for {event_name:?} removing itself");
            Events::single(&registry, node).off(&event_name);
        }
        listener(event);
    })
}
