//! HTML character reference decoding for labels and scope descriptions.

use regex::{Captures, Regex};
use std::borrow::Cow;
use std::sync::LazyLock;

static ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(?:#(?:[xX]([0-9A-Fa-f]{1,6})|([0-9]{1,7}))|([A-Za-z]+));")
        .expect("entity pattern is valid")
});

/// Decodes the character references the generator writes into index strings.
///
/// Named references outside the small set used in signatures are left as-is.
/// Returns `Cow::Borrowed` when there is nothing to decode.
pub(crate) fn decode_entities(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }
    ENTITY.replace_all(text, |caps: &Captures<'_>| {
        let decoded = if let Some(hex) = caps.get(1) {
            u32::from_str_radix(hex.as_str(), 16).ok().and_then(char::from_u32)
        } else if let Some(dec) = caps.get(2) {
            dec.as_str().parse().ok().and_then(char::from_u32)
        } else {
            caps.get(3).and_then(|name| named_entity(name.as_str()))
        };
        match decoded {
            Some(c) => c.to_string(),
            None => caps[0].to_string(),
        }
    })
}

fn named_entity(name: &str) -> Option<char> {
    Some(match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{a0}',
        "ndash" => '\u{2013}',
        "mdash" => '\u{2014}',
        "hellip" => '\u{2026}',
        _ => return None,
    })
}
