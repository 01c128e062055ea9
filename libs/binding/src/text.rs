//! Field-name/attribute-name case conversion.
//!
//! Model field names are CamelCase; DOM attribute names are kebab-case.
//! A dash is inserted only at a lowercase→uppercase boundary, so acronyms
//! survive a round trip of `kebab_to_camel` after `camel_to_kebab`.

/// `InputObject` → `input-object`
pub fn camel_to_kebab(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    let mut prev_lower = false;
    for c in s.chars() {
        if c.is_ascii_uppercase() && prev_lower {
            out.push('-');
        }
        prev_lower = c.is_ascii_lowercase();
        out.push(c.to_ascii_lowercase());
    }
    out
}

/// `input-object` → `inputObject`
pub fn kebab_to_camel(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut upper_next = false;
    for c in s.chars() {
        if c == '-' {
            upper_next = true;
        } else if upper_next {
            out.push(c.to_ascii_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// `input-object` → `InputObject`: the exported model field an attribute
/// name refers to.
pub fn to_exported_field_name(s: &str) -> String {
    let camel = kebab_to_camel(s);
    let mut chars = camel.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => camel,
    }
}
