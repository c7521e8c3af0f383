use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::NamingStyle;

static SNAKE_BOUNDARY: Lazy<Regex> = Lazy::new(|| Regex::new(r"_([a-zA-Z])").unwrap());
static CAMEL_BOUNDARY: Lazy<Regex> = Lazy::new(|| Regex::new(r"([a-z])([A-Z])").unwrap());

/// Re-render `token` from one naming style into another.
///
/// Identical styles, `Unknown` on either side, or a pair without a converter
/// all return the token unchanged.
pub fn convert(token: &str, from: NamingStyle, to: NamingStyle) -> String {
    use NamingStyle::*;

    match (from, to) {
        (SnakeCase, CamelCase) => snake_to_camel(token),
        (SnakeCase, PascalCase) => snake_to_pascal(token),
        (CamelCase, SnakeCase) => camel_to_snake(token),
        (CamelCase, PascalCase) => camel_to_pascal(token),
        (PascalCase, CamelCase) => pascal_to_camel(token),
        (PascalCase, SnakeCase) => pascal_to_snake(token),
        _ => token.to_string(),
    }
}

/// Every directed pair that [`convert`] transforms.
pub fn conversion_table() -> Vec<(NamingStyle, NamingStyle)> {
    let mut pairs = Vec::with_capacity(6);
    for from in NamingStyle::KNOWN {
        for to in NamingStyle::KNOWN {
            if from != to {
                pairs.push((from, to));
            }
        }
    }
    pairs
}

pub fn snake_to_camel(text: &str) -> String {
    SNAKE_BOUNDARY
        .replace_all(text, |caps: &Captures<'_>| caps[1].to_ascii_uppercase())
        .into_owned()
}

pub fn snake_to_pascal(text: &str) -> String {
    upper_first(&snake_to_camel(text))
}

pub fn camel_to_snake(text: &str) -> String {
    CAMEL_BOUNDARY
        .replace_all(text, |caps: &Captures<'_>| {
            format!("{}_{}", &caps[1], caps[2].to_ascii_lowercase())
        })
        .into_owned()
}

pub fn camel_to_pascal(text: &str) -> String {
    upper_first(text)
}

pub fn pascal_to_camel(text: &str) -> String {
    lower_first(text)
}

pub fn pascal_to_snake(text: &str) -> String {
    camel_to_snake(&pascal_to_camel(text)).to_lowercase()
}

fn upper_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn lower_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
