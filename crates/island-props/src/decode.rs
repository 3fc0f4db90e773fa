// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Tag-JSON decoding.
//!
//! Text is parsed with `serde_json` and revived bottom-up: children are
//! resolved first, then the node itself is classified. A non-root 2-element
//! array whose first element is a non-negative integer is a `[tag, payload]`
//! pair and goes through the [`TagRegistry`]; every other node keeps its
//! JSON shape. Stringified payloads (`Json`, `Map`, `Set`) are decoded by an
//! independent nested pass from inside the registry.

use crate::error::CodecError;
use crate::registry::TagRegistry;
use crate::value::{PropValue, Record};
use serde_json::Value as Json;
use tracing::trace;

/// Decode a tag-JSON document. The root node itself is never treated as a
/// tagged pair, so a props document decodes to a record of revived values.
///
/// A standalone `[tag, payload]` document therefore comes back as a plain
/// 2-element array here; use [`decode_serialized`] to revive it as a value.
pub fn decode(text: &str) -> Result<PropValue, CodecError> {
    trace!("decoding {} bytes of tag-JSON", text.len());
    let json: Json = serde_json::from_str(text)?;
    revive(json, true, TagRegistry::global())
}

/// Decode a standalone `[tag, payload]` document, classifying the root too.
pub fn decode_serialized(text: &str) -> Result<PropValue, CodecError> {
    let json: Json = serde_json::from_str(text)?;
    revive(json, false, TagRegistry::global())
}

/// Revive an already-parsed document (root left unclassified).
pub fn from_json(json: Json) -> Result<PropValue, CodecError> {
    revive(json, true, TagRegistry::global())
}

fn revive(node: Json, is_root: bool, registry: &TagRegistry) -> Result<PropValue, CodecError> {
    match node {
        Json::Null => Ok(PropValue::Null),
        Json::Bool(b) => Ok(PropValue::Bool(b)),
        Json::Number(n) => Ok(PropValue::Number(n.as_f64().unwrap_or(f64::NAN))),
        Json::String(s) => Ok(PropValue::String(s)),
        Json::Array(items) => {
            let tag = if is_root { None } else { tag_number(&items) };
            let mut values = items
                .into_iter()
                .map(|item| revive(item, false, registry))
                .collect::<Result<Vec<_>, _>>()?;
            match tag {
                Some(tag) => {
                    let payload = values.pop().unwrap_or(PropValue::Undefined);
                    registry.decode(tag, payload)
                }
                None => Ok(PropValue::array(values)),
            }
        }
        Json::Object(fields) => {
            let mut record = Record::with_capacity(fields.len());
            for (key, value) in fields {
                record.insert(key, revive(value, false, registry)?);
            }
            Ok(PropValue::from(record))
        }
    }
}

/// Tag number of a `[tag, payload]` candidate, if it is one.
fn tag_number(items: &[Json]) -> Option<u64> {
    match items {
        [Json::Number(n), _] => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| *f >= 0.0 && f.fract() == 0.0 && *f <= u64::MAX as f64)
                .map(|f| f as u64)
        }),
        _ => None,
    }
}
