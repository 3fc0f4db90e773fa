// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Tag registry: wire tag number -> reconstruction.
//!
//! The table is a static array of function pointers indexed by tag number.
//! It holds no state, so one instance serves every decode on every thread.

use crate::decode::decode;
use crate::error::CodecError;
use crate::tag::TypeTag;
use crate::value::{Pattern, PropValue, Shared};
use chrono::{DateTime, Utc};
use num_bigint::BigInt;
use serde::de::DeserializeOwned;
use tracing::{trace, warn};
use url::Url;

/// Rebuilds a value from an already-revived payload.
pub type Reconstruct = fn(PropValue) -> Result<PropValue, CodecError>;

/// Function table covering exactly the [`TypeTag`] set.
pub struct TagRegistry {
    table: [Reconstruct; TypeTag::ALL.len()],
}

static REGISTRY: TagRegistry = TagRegistry {
    table: [
        revive_value,
        revive_json,
        revive_regexp,
        revive_date,
        revive_map,
        revive_set,
        revive_bigint,
        revive_url,
        revive_uint8,
        revive_uint16,
        revive_uint32,
    ],
};

impl TagRegistry {
    /// The process-wide table.
    pub fn global() -> &'static TagRegistry {
        &REGISTRY
    }

    /// Reconstruction function for a known tag.
    pub fn lookup(&self, tag: TypeTag) -> Reconstruct {
        self.table[usize::from(tag.to_u8())]
    }

    /// Decode a `[tag_number, payload]` pair.
    ///
    /// Tag numbers outside the table yield [`PropValue::Unrepresentable`]
    /// rather than an error; the payload is discarded.
    pub fn decode(&self, tag_number: u64, payload: PropValue) -> Result<PropValue, CodecError> {
        match TypeTag::from_wire(tag_number) {
            Some(tag) => {
                trace!("reviving {} payload ({})", tag, payload.kind_name());
                (self.lookup(tag))(payload)
            }
            None => {
                warn!(
                    "Unrepresentable tag {} in props, dropping {} payload",
                    tag_number,
                    payload.kind_name()
                );
                Ok(PropValue::Unrepresentable(tag_number))
            }
        }
    }
}

fn expect_str(tag: TypeTag, payload: PropValue) -> Result<String, CodecError> {
    match payload {
        PropValue::String(s) => Ok(s),
        other => Err(CodecError::payload(
            tag,
            format!("expected string, found {}", other.kind_name()),
        )),
    }
}

/// Run a nested decode pass over a stringified tag-JSON array.
fn nested_elements(tag: TypeTag, payload: PropValue) -> Result<Vec<PropValue>, CodecError> {
    let text = expect_str(tag, payload)?;
    match decode(&text)? {
        PropValue::Array(values) => Ok(values.read().clone()),
        other => Err(CodecError::payload(
            tag,
            format!("expected array document, found {}", other.kind_name()),
        )),
    }
}

fn buffer<T: DeserializeOwned>(tag: TypeTag, payload: PropValue) -> Result<Vec<T>, CodecError> {
    let text = expect_str(tag, payload)?;
    serde_json::from_str(&text).map_err(|e| CodecError::payload(tag, e.to_string()))
}

fn revive_value(payload: PropValue) -> Result<PropValue, CodecError> {
    Ok(payload)
}

fn revive_json(payload: PropValue) -> Result<PropValue, CodecError> {
    nested_elements(TypeTag::Json, payload).map(PropValue::array)
}

fn revive_regexp(payload: PropValue) -> Result<PropValue, CodecError> {
    expect_str(TypeTag::RegExp, payload).map(|source| PropValue::RegExp(Pattern::new(source)))
}

fn revive_date(payload: PropValue) -> Result<PropValue, CodecError> {
    let text = expect_str(TypeTag::Date, payload)?;
    DateTime::parse_from_rfc3339(&text)
        .map(|dt| PropValue::Date(dt.with_timezone(&Utc)))
        .map_err(|e| CodecError::payload(TypeTag::Date, format!("'{}': {}", text, e)))
}

fn revive_map(payload: PropValue) -> Result<PropValue, CodecError> {
    let mut entries = Vec::new();
    for element in nested_elements(TypeTag::Map, payload)? {
        let pair = match element {
            PropValue::Array(pair) => pair.read().clone(),
            other => {
                return Err(CodecError::payload(
                    TypeTag::Map,
                    format!("entry is {}, expected [key, value]", other.kind_name()),
                ))
            }
        };
        let [key, value]: [PropValue; 2] = pair.try_into().map_err(|p: Vec<PropValue>| {
            CodecError::payload(TypeTag::Map, format!("entry has {} elements", p.len()))
        })?;
        entries.push((key, value));
    }
    Ok(PropValue::Map(Shared::new(entries)))
}

fn revive_set(payload: PropValue) -> Result<PropValue, CodecError> {
    nested_elements(TypeTag::Set, payload).map(|elements| PropValue::Set(Shared::new(elements)))
}

fn revive_bigint(payload: PropValue) -> Result<PropValue, CodecError> {
    let text = expect_str(TypeTag::BigInt, payload)?;
    text.parse::<BigInt>()
        .map(PropValue::BigInt)
        .map_err(|e| CodecError::payload(TypeTag::BigInt, format!("'{}': {}", text, e)))
}

fn revive_url(payload: PropValue) -> Result<PropValue, CodecError> {
    let text = expect_str(TypeTag::Url, payload)?;
    Url::parse(&text)
        .map(PropValue::Url)
        .map_err(|e| CodecError::payload(TypeTag::Url, format!("'{}': {}", text, e)))
}

fn revive_uint8(payload: PropValue) -> Result<PropValue, CodecError> {
    buffer(TypeTag::Uint8Array, payload).map(PropValue::Uint8Array)
}

fn revive_uint16(payload: PropValue) -> Result<PropValue, CodecError> {
    buffer(TypeTag::Uint16Array, payload).map(PropValue::Uint16Array)
}

fn revive_uint32(payload: PropValue) -> Result<PropValue, CodecError> {
    buffer(TypeTag::Uint32Array, payload).map(PropValue::Uint32Array)
}
