// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Tag-JSON encoding.
//!
//! Every value becomes a `[tag, payload]` pair. Arrays, maps and sets carry
//! their elements as a *stringified* tag-JSON array; records carry a keyed
//! object of pairs. The walk over composites goes through a [`VisitedSet`] so
//! a value that contains itself is reported instead of recursing forever.

use crate::error::CodecError;
use crate::metadata::ComponentMetadata;
use crate::tag::TypeTag;
use crate::value::{PropValue, Record, Shared};
use crate::visited::VisitedSet;
use chrono::SecondsFormat;
use serde_json::{Map, Value as Json};

/// Largest integer magnitude a JSON reader keeps exactly in an f64 (2^53).
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// A value in wire form: `[tag, payload]`.
#[derive(Debug, Clone, PartialEq)]
pub struct SerializedValue {
    pub tag: TypeTag,
    pub payload: Json,
}

impl SerializedValue {
    pub fn new(tag: TypeTag, payload: impl Into<Json>) -> Self {
        Self {
            tag,
            payload: payload.into(),
        }
    }

    /// The 2-element JSON array written on the wire.
    pub fn into_json(self) -> Json {
        Json::Array(vec![Json::from(self.tag.to_u8()), self.payload])
    }
}

/// Encode one value.
///
/// Classification is by variant, first match wins. Composites are walked
/// under `visited`; meeting an ancestor again fails with
/// [`CodecError::CyclicReference`].
pub fn convert_to_serialized_form(
    value: &PropValue,
    metadata: &ComponentMetadata,
    visited: &mut VisitedSet,
) -> Result<SerializedValue, CodecError> {
    let serialized = match value {
        PropValue::Date(dt) => SerializedValue::new(
            TypeTag::Date,
            dt.to_rfc3339_opts(SecondsFormat::Millis, true),
        ),
        // Flags are not part of the wire format.
        PropValue::RegExp(pattern) => SerializedValue::new(TypeTag::RegExp, pattern.source()),
        PropValue::Map(map) => {
            let pairs = serialize_map(map, metadata, visited)?;
            SerializedValue::new(TypeTag::Map, render(Json::Array(pairs))?)
        }
        PropValue::Set(set) => {
            let elements = serialize_array(set, metadata, visited)?;
            SerializedValue::new(TypeTag::Set, render(Json::Array(elements))?)
        }
        PropValue::BigInt(n) => SerializedValue::new(TypeTag::BigInt, n.to_string()),
        PropValue::Url(url) => SerializedValue::new(TypeTag::Url, url.as_str()),
        PropValue::Array(values) => {
            let elements = serialize_array(values, metadata, visited)?;
            SerializedValue::new(TypeTag::Json, render(Json::Array(elements))?)
        }
        PropValue::Uint8Array(buf) => {
            SerializedValue::new(TypeTag::Uint8Array, serde_json::to_string(buf)?)
        }
        PropValue::Uint16Array(buf) => {
            SerializedValue::new(TypeTag::Uint16Array, serde_json::to_string(buf)?)
        }
        PropValue::Uint32Array(buf) => {
            SerializedValue::new(TypeTag::Uint32Array, serde_json::to_string(buf)?)
        }
        PropValue::Object(record) => {
            let fields = serialize_object(record, metadata, visited)?;
            SerializedValue::new(TypeTag::Value, Json::Object(fields))
        }
        PropValue::Bool(b) => SerializedValue::new(TypeTag::Value, *b),
        PropValue::Number(n) => SerializedValue::new(TypeTag::Value, number_to_json(*n)),
        PropValue::String(s) => SerializedValue::new(TypeTag::Value, s.as_str()),
        PropValue::Null | PropValue::Undefined | PropValue::Unrepresentable(_) => {
            SerializedValue::new(TypeTag::Value, Json::Null)
        }
    };
    Ok(serialized)
}

/// Encode the elements of an array (or set) under the cycle guard.
pub fn serialize_array(
    values: &Shared<Vec<PropValue>>,
    metadata: &ComponentMetadata,
    visited: &mut VisitedSet,
) -> Result<Vec<Json>, CodecError> {
    guarded(values.id(), metadata, visited, |visited| {
        values
            .read()
            .iter()
            .map(|v| convert_to_serialized_form(v, metadata, visited).map(SerializedValue::into_json))
            .collect()
    })
}

/// Encode the fields of a record under the cycle guard.
///
/// The record itself is not wrapped; each field value is a `[tag, payload]`.
pub fn serialize_object(
    record: &Shared<Record>,
    metadata: &ComponentMetadata,
    visited: &mut VisitedSet,
) -> Result<Map<String, Json>, CodecError> {
    guarded(record.id(), metadata, visited, |visited| {
        let mut fields = Map::new();
        for (key, value) in record.read().iter() {
            let encoded = convert_to_serialized_form(value, metadata, visited)?;
            fields.insert(key.clone(), encoded.into_json());
        }
        Ok(fields)
    })
}

/// Map entries become 2-element sequences, each tagged `Json`.
fn serialize_map(
    map: &Shared<Vec<(PropValue, PropValue)>>,
    metadata: &ComponentMetadata,
    visited: &mut VisitedSet,
) -> Result<Vec<Json>, CodecError> {
    guarded(map.id(), metadata, visited, |visited| {
        let entries = map.read();
        let mut pairs = Vec::with_capacity(entries.len());
        for (key, value) in entries.iter() {
            let key = convert_to_serialized_form(key, metadata, visited)?.into_json();
            let value = convert_to_serialized_form(value, metadata, visited)?.into_json();
            let pair = SerializedValue::new(TypeTag::Json, render(Json::Array(vec![key, value]))?);
            pairs.push(pair.into_json());
        }
        Ok(pairs)
    })
}

/// Encode a props record to the tag-JSON text of the `props` attribute.
///
/// The visited set is fresh for every call. No text is produced if any part
/// of the walk fails.
pub fn serialize_props(
    props: &Shared<Record>,
    metadata: &ComponentMetadata,
) -> Result<String, CodecError> {
    let mut visited = VisitedSet::new();
    let fields = serialize_object(props, metadata, &mut visited)?;
    render(Json::Object(fields))
}

/// Encode a single value as a standalone `[tag, payload]` document.
pub fn serialize_value(
    value: &PropValue,
    metadata: &ComponentMetadata,
) -> Result<String, CodecError> {
    let mut visited = VisitedSet::new();
    let serialized = convert_to_serialized_form(value, metadata, &mut visited)?;
    render(serialized.into_json())
}

fn guarded<R>(
    id: usize,
    metadata: &ComponentMetadata,
    visited: &mut VisitedSet,
    walk: impl FnOnce(&mut VisitedSet) -> Result<R, CodecError>,
) -> Result<R, CodecError> {
    visited.enter(id, walk).unwrap_or_else(|| {
        Err(CodecError::CyclicReference {
            display_name: metadata.display_name.clone(),
            hydrate: metadata.hydrate,
        })
    })
}

fn render(json: Json) -> Result<String, CodecError> {
    Ok(serde_json::to_string(&json)?)
}

/// JSON text has no NaN/Infinity; those become `null`. Integral values are
/// written without a fraction so `1.0` goes out as `1`.
fn number_to_json(n: f64) -> Json {
    if !n.is_finite() {
        return Json::Null;
    }
    if n.fract() == 0.0 && n.abs() < MAX_SAFE_INTEGER {
        return Json::from(n as i64);
    }
    serde_json::Number::from_f64(n).map_or(Json::Null, Json::Number)
}
