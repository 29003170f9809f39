//! Namespaced event names and per-node registration keys
//!
//! A full event name is `type.ns1.ns2...`. It is made node-specific by
//! appending a separator and the node's identity token:
//! `click.menu__EVENT_EMITTER__0f1c...`.

/// Bare event type: everything before the first `.`
pub fn base_type(event_name: &str) -> &str {
    event_name.split('.').next().unwrap_or(event_name)
}

/// Join a full event name and an identity token into a registration key
pub fn encode(event_name: &str, separator: &str, token: &str) -> String {
    format!("{event_name}{separator}{token}")
}

/// Recover the full event name a key was built from
pub fn decode<'a>(key: &'a str, separator: &str) -> &'a str {
    key.split(separator).next().unwrap_or(key)
}

/// Whether every non-empty `.`-token of `query` appears among the tokens of
/// `registered`.
///
/// The base type is just token 0, so `.click` matches `click.menu` and a
/// query with no tokens at all (`""` or `"."`) matches everything.
pub fn is_matched(query: &str, registered: &str) -> bool {
    let tokens: Vec<&str> = registered.split('.').collect();
    query
        .split('.')
        .filter(|t| !t.is_empty())
        .all(|t| tokens.contains(&t))
}

/// Random v4 UUID string used as a node identity token
pub fn generate_token() -> String {
    uuid::Uuid::new_v4().to_string()
}
