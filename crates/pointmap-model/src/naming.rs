//! Accessor naming conventions shared by records and path-finders.

/// Name of the method that constructs an instance.
pub const CONSTRUCTOR: &str = "__construct";

/// Name of the multi-property mutator (`update(a, b, ...)`).
pub const UPDATE: &str = "update";

const GETTER_PREFIX: &str = "get";
const SETTER_PREFIX: &str = "set";

/// Upper-cases the first character.
pub fn ucfirst(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lower-cases the first character.
pub fn lcfirst(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `x` -> `getX`.
pub fn getter_name(property: &str) -> String {
    format!("{GETTER_PREFIX}{}", ucfirst(property))
}

/// Property read by a getter-shaped method (`getFirstName` -> `firstName`).
pub fn getter_property(method: &str) -> Option<String> {
    accessor_property(method, GETTER_PREFIX)
}

/// Property written by a setter-shaped method (`setFirstName` -> `firstName`).
pub fn setter_property(method: &str) -> Option<String> {
    accessor_property(method, SETTER_PREFIX)
}

/// `<prefix><Upper>...` only; `setup` and `getaway` are not accessors.
fn accessor_property(method: &str, prefix: &str) -> Option<String> {
    let rest = method.strip_prefix(prefix)?;
    if !rest.starts_with(|c: char| c.is_ascii_uppercase()) {
        return None;
    }
    Some(lcfirst(rest))
}
