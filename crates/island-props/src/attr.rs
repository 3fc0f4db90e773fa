// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Attribute-side collaborators.
//!
//! The HTML rewriter that finds island elements lives outside this crate. It
//! hands attributes in as `(name, value)` pairs and takes the rebuilt props
//! attribute back through an [`AttributeSink`].

use indexmap::IndexMap;
use std::borrow::Cow;
use std::collections::HashMap;

/// Receives the rebuilt props attribute (`setAttribute`-shaped).
pub trait AttributeSink {
    fn set_attribute(&mut self, name: &str, value: &str);
}

impl AttributeSink for IndexMap<String, String> {
    fn set_attribute(&mut self, name: &str, value: &str) {
        self.insert(name.to_string(), value.to_string());
    }
}

impl AttributeSink for HashMap<String, String> {
    fn set_attribute(&mut self, name: &str, value: &str) {
        self.insert(name.to_string(), value.to_string());
    }
}

impl AttributeSink for Vec<(String, String)> {
    fn set_attribute(&mut self, name: &str, value: &str) {
        match self.iter_mut().find(|(n, _)| n == name) {
            Some(slot) => slot.1 = value.to_string(),
            None => self.push((name.to_string(), value.to_string())),
        }
    }
}

/// Text and name normalization applied while reading attributes.
pub trait AttributeNormalizer {
    /// Undo HTML entity escaping of an attribute value.
    fn unescape<'a>(&self, text: &'a str) -> Cow<'a, str>;

    /// Normalize an attribute name for `ComponentMetadata::attributes`.
    fn attribute_name(&self, name: &str) -> String;
}

/// Entity unescape + kebab-case to camelCase.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultNormalizer;

impl AttributeNormalizer for DefaultNormalizer {
    fn unescape<'a>(&self, text: &'a str) -> Cow<'a, str> {
        unescape_entities(text)
    }

    fn attribute_name(&self, name: &str) -> String {
        camel_case(name)
    }
}

/// Longest entity body we try to match (`#x10FFFF` plus slack).
const MAX_ENTITY_LEN: usize = 10;

/// Replace `&quot; &amp; &lt; &gt; &apos;` and numeric character
/// references. Anything unrecognized is left as written.
pub fn unescape_entities(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp + 1..];
        let decoded = tail
            .find(';')
            .filter(|&end| end <= MAX_ENTITY_LEN)
            .and_then(|end| decode_entity(&tail[..end]).map(|c| (c, end)));
        match decoded {
            Some((c, end)) => {
                out.push(c);
                rest = &tail[end + 1..];
            }
            None => {
                out.push('&');
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

fn decode_entity(body: &str) -> Option<char> {
    match body {
        "quot" => Some('"'),
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "apos" => Some('\''),
        _ => {
            let num = body.strip_prefix('#')?;
            let code = match num.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => num.parse::<u32>().ok()?,
            };
            char::from_u32(code)
        }
    }
}

/// `component-url` -> `componentUrl`. Separators are `-`, `_` and `:`.
pub fn camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;
    for c in name.chars() {
        if matches!(c, '-' | '_' | ':') {
            upper_next = !out.is_empty();
            continue;
        }
        if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}
