//! `data-*` attribute naming
//!
//! Conversion between `data-user-id` style attribute suffixes and the
//! `userId` property names scripts use.

/// Attribute prefix of custom data attributes
pub const DATA_PREFIX: &str = "data-";

/// Convert kebab-case to camelCase (`user-id` -> `userId`)
pub fn to_camel_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut capitalize_next = false;

    for c in s.chars() {
        if c == '-' {
            capitalize_next = true;
        } else if capitalize_next {
            result.push(c.to_ascii_uppercase());
            capitalize_next = false;
        } else {
            result.push(c);
        }
    }

    result
}

/// Convert camelCase to kebab-case (`userId` -> `user-id`)
pub fn to_kebab_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);

    for c in s.chars() {
        if c.is_ascii_uppercase() {
            result.push('-');
            result.push(c.to_ascii_lowercase());
        } else {
            result.push(c);
        }
    }

    result
}
