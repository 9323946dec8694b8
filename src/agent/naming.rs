//! Agent identifier normalization.

/// Separator between an optional plugin namespace and the bare agent name.
pub const NAMESPACE_SEPARATOR: char = ':';

/// Strip an optional `namespace:` prefix from a raw `subagent_type`.
///
/// Splits once, on the first separator. Identifiers without a separator are
/// returned unchanged.
pub fn normalize_agent_id(raw: &str) -> &str {
    match raw.split_once(NAMESPACE_SEPARATOR) {
        Some((_, name)) => name,
        None => raw,
    }
}
