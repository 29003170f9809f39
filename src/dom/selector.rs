//! CSS selector subset used by the in-memory document
//!
//! Supported: type (`button`), universal (`*`), id (`#save`) and class
//! (`.btn`) selectors combined into compounds, the descendant (` `) and child
//! (`>`) combinators, and selector lists (`a, b`). Anything else is rejected
//! with [`Error::InvalidSelector`].

use crate::dom::NodeRef;
use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Combinator {
    Descendant,
    Child,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
}

impl Compound {
    fn matches(&self, node: &NodeRef) -> bool {
        if let Some(tag) = &self.tag {
            if node.tag() != tag.as_str() {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if node.id().as_deref() != Some(id.as_str()) {
                return false;
            }
        }
        self.classes.iter().all(|class| node.has_class(class))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Part {
    compound: Compound,
    // Relation to the part on the left
    combinator: Option<Combinator>,
}

/// Parsed selector list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorList {
    groups: Vec<Vec<Part>>,
}

impl SelectorList {
    /// Parse selector text
    pub fn parse(selector: &str) -> Result<Self> {
        let groups = selector
            .split(',')
            .map(|group| parse_chain(group, selector))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { groups })
    }

    /// Whether `node` matches any selector of the list
    pub fn matches(&self, node: &NodeRef) -> bool {
        self.groups.iter().any(|parts| matches_chain(node, parts))
    }
}

fn invalid(selector: &str) -> Error {
    Error::InvalidSelector(selector.to_string())
}

fn parse_chain(group: &str, selector: &str) -> Result<Vec<Part>> {
    let mut parts = Vec::new();
    let mut pending: Option<Combinator> = None;

    for token in tokenize(group) {
        if token == ">" {
            if pending == Some(Combinator::Child) || parts.is_empty() {
                return Err(invalid(selector));
            }
            pending = Some(Combinator::Child);
            continue;
        }
        let compound = parse_compound(token).ok_or_else(|| invalid(selector))?;
        let combinator = if parts.is_empty() {
            None
        } else {
            Some(pending.take().unwrap_or(Combinator::Descendant))
        };
        parts.push(Part {
            compound,
            combinator,
        });
    }

    if parts.is_empty() || pending.is_some() {
        return Err(invalid(selector));
    }
    Ok(parts)
}

fn tokenize(group: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    for word in group.split_whitespace() {
        let mut rest = word;
        while let Some(index) = rest.find('>') {
            if index > 0 {
                tokens.push(&rest[..index]);
            }
            tokens.push(">");
            rest = &rest[index + 1..];
        }
        if !rest.is_empty() {
            tokens.push(rest);
        }
    }
    tokens
}

fn parse_compound(token: &str) -> Option<Compound> {
    let mut compound = Compound::default();
    let mut rest = token;

    if let Some(after) = rest.strip_prefix('*') {
        rest = after;
    } else {
        let (tag, after) = split_ident(rest);
        if !tag.is_empty() {
            compound.tag = Some(tag.to_ascii_lowercase());
        }
        rest = after;
    }

    while let Some(marker) = rest.chars().next() {
        let (ident, after) = split_ident(&rest[marker.len_utf8()..]);
        if ident.is_empty() {
            return None;
        }
        match marker {
            '#' if compound.id.is_none() => compound.id = Some(ident.to_string()),
            '.' => compound.classes.push(ident.to_string()),
            _ => return None,
        }
        rest = after;
    }
    Some(compound)
}

fn split_ident(input: &str) -> (&str, &str) {
    let end = input
        .char_indices()
        .find(|&(_, c)| !(c.is_alphanumeric() || c == '-' || c == '_'))
        .map_or(input.len(), |(index, _)| index);
    input.split_at(end)
}

fn matches_chain(node: &NodeRef, parts: &[Part]) -> bool {
    let Some((last, rest)) = parts.split_last() else {
        return true;
    };
    if !last.compound.matches(node) {
        return false;
    }
    if rest.is_empty() {
        return true;
    }
    match last.combinator {
        Some(Combinator::Child) => node
            .parent()
            .is_some_and(|parent| matches_chain(&parent, rest)),
        _ => {
            let mut current = node.parent();
            while let Some(ancestor) = current {
                if matches_chain(&ancestor, rest) {
                    return true;
                }
                current = ancestor.parent();
            }
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;

    #[test]
    fn test_parse_rejects_unsupported_syntax() {
        for selector in ["", " ", "a,", "> a", "a >", "a > > b", "a[b]", "a:hover", "#", ".", "a + b", "#a#b"] {
            assert!(
                matches!(SelectorList::parse(selector), Err(Error::InvalidSelector(_))),
                "{selector:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_tokenize_splits_child_combinator() {
        assert_eq!(tokenize("ul>li  .x"), vec!["ul", ">", "li", ".x"]);
        assert_eq!(tokenize("ul > li"), vec!["ul", ">", "li"]);
    }

    #[test]
    fn test_compound_and_combinator_matching() {
        let document = Document::new();
        let list = document.create_element("UL");
        list.add_class("menu");
        let item = document.create_element("li");
        item.set_id("first");
        item.add_class("item");
        item.add_class("active");
        let label = document.create_element("span");
        item.append_child(&label);
        list.append_child(&item);
        document.body().append_child(&list);

        let check = |selector: &str, node: &NodeRef| SelectorList::parse(selector).unwrap().matches(node);

        assert!(check("li", &item));
        assert!(check("LI.item.active#first", &item));
        assert!(check("*", &label));
        assert!(check("ul.menu > li", &item));
        assert!(check("body li", &item));
        assert!(check(".menu span", &label));
        assert!(!check(".menu > span", &label));
        assert!(!check("li.missing", &item));
        assert!(check("p, #first", &item));
    }
}
