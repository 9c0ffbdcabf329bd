use std::collections::HashMap;

use once_cell::sync::Lazy;

static NAMED_ENTITIES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("sect", "\u{a7}"),
        ("hellip", "\u{2026}"),
        ("nbsp", "\u{a0}"),
        ("amp", "&"),
        ("lt", "<"),
        ("gt", ">"),
        ("quot", "\""),
        ("apos", "'"),
        ("copy", "\u{a9}"),
        ("reg", "\u{ae}"),
        ("trade", "\u{2122}"),
        ("mdash", "\u{2014}"),
        ("ndash", "\u{2013}"),
        ("lsquo", "\u{2018}"),
        ("rsquo", "\u{2019}"),
        ("ldquo", "\u{201c}"),
        ("rdquo", "\u{201d}"),
        ("laquo", "\u{ab}"),
        ("raquo", "\u{bb}"),
        ("para", "\u{b6}"),
        ("middot", "\u{b7}"),
        ("times", "\u{d7}"),
        ("deg", "\u{b0}"),
    ])
});

/// Expand the name of a `&name;` reference (without `&` and `;`). Named
/// entities match case-insensitively; `#NNN` and `#xHHH` are code points.
pub fn expand_entity(name: &str) -> Option<String> {
    if let Some(number) = name.strip_prefix('#') {
        let code = match number.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => number.parse::<u32>().ok()?,
        };
        return char::from_u32(code).map(String::from);
    }

    NAMED_ENTITIES
        .get(name.to_ascii_lowercase().as_str())
        .map(|s| s.to_string())
}
