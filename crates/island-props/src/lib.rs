// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Island props codec.
//!
//! Component props are shipped to the browser inside an HTML attribute as
//! *tag-JSON*: plain JSON in which every value is a `[tag, payload]` pair, so
//! that dates, patterns, maps, sets, big integers, URLs and unsigned buffers
//! survive a trip through a medium that only knows strings, numbers,
//! booleans, null, objects and arrays.
//!
//! # Wire tags
//!
//! | Tag | Type | Payload |
//! |-----|------|---------|
//! | 0 | Value | raw primitive, or object of tagged leaves |
//! | 1 | JSON (array) | stringified tag-JSON array |
//! | 2 | RegExp | pattern source |
//! | 3 | Date | ISO-8601 text |
//! | 4 | Map | stringified tag-JSON array of `[key, value]` sequences |
//! | 5 | Set | stringified tag-JSON array |
//! | 6 | BigInt | decimal text |
//! | 7 | URL | href |
//! | 8/9/10 | Uint8/16/32Array | stringified numeric array |
//!
//! # Example
//!
//! ```rust
//! use island_props::{deconstruct, decode, reconstruct, PropValue};
//!
//! let attrs = [
//!     ("props", r#"{"text":[0,"a"]}"#),
//!     ("opts", r#"{"name":"Widget"}"#),
//!     ("client", "load"),
//! ];
//!
//! let component = deconstruct(attrs).unwrap();
//! assert_eq!(component.prop("text"), Some(PropValue::from("a")));
//! assert_eq!(component.metadata.display_name, "Widget");
//!
//! component.set_prop("text", "b".into());
//! let text = reconstruct(component).unwrap();
//! assert_eq!(text, r#"{"text":[0,"b"]}"#);
//!
//! let props = decode(&text).unwrap();
//! assert_eq!(props.get_field("text"), Some(PropValue::from("b")));
//! ```

pub mod attr;
pub mod config;
pub mod decode;
pub mod encode;
pub mod envelope;
pub mod error;
pub mod metadata;
pub mod registry;
pub mod tag;
pub mod value;
pub mod visited;

pub use attr::{AttributeNormalizer, AttributeSink, DefaultNormalizer};
pub use config::{EnvelopeConfig, EnvelopeConfigBuilder};
pub use decode::{decode, decode_serialized, from_json};
pub use encode::{
    convert_to_serialized_form, serialize_array, serialize_object, serialize_props,
    serialize_value, SerializedValue,
};
pub use envelope::{deconstruct, reconstruct, DeconstructedComponent, Envelope};
pub use error::{CodecError, EnvelopeError};
pub use metadata::{ComponentExport, ComponentMetadata, HydrationMode};
pub use registry::TagRegistry;
pub use tag::TypeTag;
pub use value::{Pattern, PropValue, Record, Shared};
pub use visited::VisitedSet;
