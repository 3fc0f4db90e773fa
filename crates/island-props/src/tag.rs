// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Wire type tags for tag-JSON.
//!
//! The numbers are fixed: any independent decoder of the island props
//! attribute dispatches on exactly these values.

use std::fmt;

/// Semantic type carried by a `[tag, payload]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TypeTag {
    /// Primitive or keyed record, payload carried as-is
    Value = 0,

    /// Ordered sequence, payload is a stringified tag-JSON array
    Json = 1,

    /// Pattern source text (flags are not carried)
    RegExp = 2,

    /// ISO-8601 timestamp
    Date = 3,

    /// Stringified tag-JSON array of `[key, value]` pairs
    Map = 4,

    /// Stringified tag-JSON array of elements
    Set = 5,

    /// Decimal text of an arbitrary-precision integer
    BigInt = 6,

    /// Absolute URL text
    Url = 7,

    /// Stringified JSON array of `u8`
    Uint8Array = 8,

    /// Stringified JSON array of `u16`
    Uint16Array = 9,

    /// Stringified JSON array of `u32`
    Uint32Array = 10,
}

impl TypeTag {
    /// Every tag, in wire order.
    pub const ALL: [TypeTag; 11] = [
        TypeTag::Value,
        TypeTag::Json,
        TypeTag::RegExp,
        TypeTag::Date,
        TypeTag::Map,
        TypeTag::Set,
        TypeTag::BigInt,
        TypeTag::Url,
        TypeTag::Uint8Array,
        TypeTag::Uint16Array,
        TypeTag::Uint32Array,
    ];

    /// Return the wire number for this tag.
    pub const fn to_u8(self) -> u8 {
        match self {
            TypeTag::Value => 0,
            TypeTag::Json => 1,
            TypeTag::RegExp => 2,
            TypeTag::Date => 3,
            TypeTag::Map => 4,
            TypeTag::Set => 5,
            TypeTag::BigInt => 6,
            TypeTag::Url => 7,
            TypeTag::Uint8Array => 8,
            TypeTag::Uint16Array => 9,
            TypeTag::Uint32Array => 10,
        }
    }

    /// Convert from a wire number. `None` for anything outside the table.
    pub const fn from_wire(value: u64) -> Option<Self> {
        match value {
            0 => Some(TypeTag::Value),
            1 => Some(TypeTag::Json),
            2 => Some(TypeTag::RegExp),
            3 => Some(TypeTag::Date),
            4 => Some(TypeTag::Map),
            5 => Some(TypeTag::Set),
            6 => Some(TypeTag::BigInt),
            7 => Some(TypeTag::Url),
            8 => Some(TypeTag::Uint8Array),
            9 => Some(TypeTag::Uint16Array),
            10 => Some(TypeTag::Uint32Array),
            _ => None,
        }
    }

    /// Human-readable name used in error messages.
    pub const fn name(self) -> &'static str {
        match self {
            TypeTag::Value => "Value",
            TypeTag::Json => "JSON",
            TypeTag::RegExp => "RegExp",
            TypeTag::Date => "Date",
            TypeTag::Map => "Map",
            TypeTag::Set => "Set",
            TypeTag::BigInt => "BigInt",
            TypeTag::Url => "URL",
            TypeTag::Uint8Array => "Uint8Array",
            TypeTag::Uint16Array => "Uint16Array",
            TypeTag::Uint32Array => "Uint32Array",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name(), self.to_u8())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_numbers_are_fixed() {
        assert_eq!(TypeTag::Value.to_u8(), 0);
        assert_eq!(TypeTag::Json.to_u8(), 1);
        assert_eq!(TypeTag::RegExp.to_u8(), 2);
        assert_eq!(TypeTag::Date.to_u8(), 3);
        assert_eq!(TypeTag::Map.to_u8(), 4);
        assert_eq!(TypeTag::Set.to_u8(), 5);
        assert_eq!(TypeTag::BigInt.to_u8(), 6);
        assert_eq!(TypeTag::Url.to_u8(), 7);
        assert_eq!(TypeTag::Uint8Array.to_u8(), 8);
        assert_eq!(TypeTag::Uint16Array.to_u8(), 9);
        assert_eq!(TypeTag::Uint32Array.to_u8(), 10);
    }

    #[test]
    fn test_repr_matches_wire() {
        for tag in TypeTag::ALL {
            assert_eq!(tag as u8, tag.to_u8());
        }
    }

    #[test]
    fn test_from_wire_covers_exactly_the_table() {
        for tag in TypeTag::ALL {
            assert_eq!(TypeTag::from_wire(u64::from(tag.to_u8())), Some(tag));
        }
        assert_eq!(TypeTag::from_wire(11), None);
        assert_eq!(TypeTag::from_wire(99), None);
        assert_eq!(TypeTag::from_wire(u64::MAX), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(TypeTag::Url.to_string(), "URL(7)");
    }
}
