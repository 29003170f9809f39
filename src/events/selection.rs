//! Selector resolution into working sets

use crate::config::Config;
use crate::host::Host;
use crate::Result;

/// What a handle should operate on
#[derive(Debug, Clone)]
pub enum Selector<'a, N> {
    /// CSS selector text, resolved against the host document
    Css(&'a str),
    /// One node
    Node(N),
    /// An explicit collection of nodes
    Nodes(Vec<N>),
    /// Nothing
    None,
}

impl<'a, N> From<&'a str> for Selector<'a, N> {
    fn from(selector: &'a str) -> Self {
        Selector::Css(selector)
    }
}

impl<'a, N> From<&'a String> for Selector<'a, N> {
    fn from(selector: &'a String) -> Self {
        Selector::Css(selector.as_str())
    }
}

impl<'a, N> From<Vec<N>> for Selector<'a, N> {
    fn from(nodes: Vec<N>) -> Self {
        Selector::Nodes(nodes)
    }
}

impl<'a, N> From<Option<N>> for Selector<'a, N> {
    fn from(node: Option<N>) -> Self {
        node.map_or(Selector::None, Selector::Node)
    }
}

/// Concrete nodes a handle operates on
#[derive(Debug, Clone, PartialEq)]
pub enum WorkingSet<N> {
    Empty,
    Single(N),
    Many(Vec<N>),
}

impl<N> WorkingSet<N> {
    /// First node, if any
    pub fn first(&self) -> Option<&N> {
        match self {
            WorkingSet::Empty => None,
            WorkingSet::Single(node) => Some(node),
            WorkingSet::Many(nodes) => nodes.first(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            WorkingSet::Empty => 0,
            WorkingSet::Single(_) => 1,
            WorkingSet::Many(nodes) => nodes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Nodes in collection order
    pub fn as_slice(&self) -> &[N] {
        match self {
            WorkingSet::Empty => <&[N]>::default(),
            WorkingSet::Single(node) => std::slice::from_ref(node),
            WorkingSet::Many(nodes) => nodes,
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, N> {
        self.as_slice().iter()
    }
}

/// Id to look up directly when the last compound of a simple selector is an
/// id selector (`.list #item` -> `item`). Grouped selectors always query.
pub fn id_from_selector(selector: &str) -> Option<&str> {
    if selector.contains(',') {
        return None;
    }
    let last = selector.split_whitespace().next_back()?;
    let id = last.strip_prefix('#')?;
    if id.is_empty() {
        None
    } else {
        Some(id)
    }
}

/// Resolve a selector against the host
pub fn resolve<H: Host>(
    host: &H,
    config: &Config,
    selector: Selector<'_, H::Node>,
) -> Result<WorkingSet<H::Node>> {
    match selector {
        Selector::None => Ok(WorkingSet::Empty),
        Selector::Node(node) => Ok(WorkingSet::Single(node)),
        Selector::Nodes(nodes) => Ok(WorkingSet::Many(nodes)),
        Selector::Css(css) => {
            if config.id_fast_path {
                if let Some(id) = id_from_selector(css) {
                    log::trace!("resolving {css:?} by id {id:?}");
                    return Ok(host
                        .element_by_id(id)
                        .map_or(WorkingSet::Empty, WorkingSet::Single));
                }
            }
            log::trace!("resolving {css:?} by query");
            Ok(WorkingSet::Many(host.query_selector_all(css)?))
        }
    }
}
