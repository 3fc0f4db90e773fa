// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Island envelope adapter.
//!
//! An island element carries its component in a handful of attributes:
//!
//! ```text
//! <island-root props="{&quot;text&quot;:[0,&quot;a&quot;]}"
//!              opts="{&quot;name&quot;:&quot;Widget&quot;}"
//!              client="load"
//!              component-url="/widget.js"
//!              component-export="default"
//!              uid="x1">
//! ```
//!
//! [`Envelope::deconstruct`] decodes that set into props + metadata, the
//! caller edits the props in place, and [`Envelope::reconstruct`] produces the
//! new `props` text. Metadata is read, never written back.

use crate::attr::{AttributeNormalizer, AttributeSink, DefaultNormalizer};
use crate::config::EnvelopeConfig;
use crate::decode::decode;
use crate::encode::serialize_props;
use crate::error::{CodecError, EnvelopeError};
use crate::metadata::{ComponentExport, ComponentMetadata, HydrationMode};
use crate::value::{PropValue, Record, Shared};
use indexmap::IndexMap;
use serde_json::Value as Json;
use tracing::{debug, warn};

/// One island, decoded.
#[derive(Debug, Clone)]
pub struct DeconstructedComponent {
    pub props: Shared<Record>,
    pub metadata: ComponentMetadata,
}

impl DeconstructedComponent {
    /// Clone of a top-level prop.
    pub fn prop(&self, name: &str) -> Option<PropValue> {
        self.props.read().get(name).cloned()
    }

    /// Insert or replace a top-level prop, returning the previous value.
    pub fn set_prop(&self, name: impl Into<String>, value: PropValue) -> Option<PropValue> {
        self.props.write().insert(name.into(), value)
    }

    /// Remove a top-level prop, keeping the order of the others.
    pub fn remove_prop(&self, name: &str) -> Option<PropValue> {
        self.props.write().shift_remove(name)
    }
}

/// Envelope reader/writer for a given attribute layout.
#[derive(Debug, Clone, Default)]
pub struct Envelope<N = DefaultNormalizer> {
    config: EnvelopeConfig,
    normalizer: N,
}

impl Envelope<DefaultNormalizer> {
    pub fn new(config: EnvelopeConfig) -> Self {
        Self::with_normalizer(config, DefaultNormalizer)
    }
}

/// Raw envelope attributes collected in one pass.
#[derive(Default)]
struct RawEnvelope {
    props: Option<String>,
    metadata: Option<String>,
    hydrate: Option<String>,
    component_url: Option<String>,
    component_export: Option<String>,
    rest: IndexMap<String, String>,
}

impl<N: AttributeNormalizer> Envelope<N> {
    pub fn with_normalizer(config: EnvelopeConfig, normalizer: N) -> Self {
        Self { config, normalizer }
    }

    pub fn config(&self) -> &EnvelopeConfig {
        &self.config
    }

    /// Decode an island's attribute set.
    ///
    /// Fails with [`EnvelopeError::Malformed`] when the props or metadata
    /// attribute is missing or is not JSON of the expected shape, or when the
    /// hydration directive is unknown.
    pub fn deconstruct<I, K, V>(&self, attributes: I) -> Result<DeconstructedComponent, EnvelopeError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let raw = self.collect(attributes);
        let cfg = &self.config;

        let mut metadata = self.parse_metadata(raw.metadata.as_deref())?;
        metadata.hydrate = raw
            .hydrate
            .as_deref()
            .map(|mode| {
                mode.parse::<HydrationMode>()
                    .map_err(|e| EnvelopeError::malformed(&cfg.hydrate_attribute, e.to_string()))
            })
            .transpose()?;
        metadata.component_url = raw.component_url;
        metadata.component_export = raw.component_export.map(|value| ComponentExport {
            value,
            namespace: None,
        });
        metadata.attributes = raw.rest;

        let props = self.parse_props(raw.props.as_deref())?;

        debug!(
            "Deconstructed <{} client:{}> with {} props",
            metadata.display_name,
            metadata.hydrate.map_or("none", HydrationMode::as_str),
            props.read().len()
        );
        Ok(DeconstructedComponent { props, metadata })
    }

    /// Encode the (possibly mutated) props back to tag-JSON text.
    pub fn reconstruct(&self, component: DeconstructedComponent) -> Result<String, EnvelopeError> {
        let text = serialize_props(&component.props, &component.metadata)?;
        debug!(
            "Reconstructed props for <{}> ({} bytes)",
            component.metadata.display_name,
            text.len()
        );
        Ok(text)
    }

    /// Deconstruct, let `mutate` edit the component, reconstruct, and write
    /// the props attribute to `sink`.
    ///
    /// On failure `sink` is left untouched so the element keeps its original
    /// props attribute.
    pub fn rewrite<I, K, V, S, F>(&self, attributes: I, sink: &mut S, mutate: F) -> Result<(), EnvelopeError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
        S: AttributeSink + ?Sized,
        F: FnOnce(&mut DeconstructedComponent),
    {
        let mut component = self.deconstruct(attributes)?;
        mutate(&mut component);
        let display_name = component.metadata.display_name.clone();
        match self.reconstruct(component) {
            Ok(text) => {
                sink.set_attribute(&self.config.props_attribute, &text);
                Ok(())
            }
            Err(e) => {
                warn!("Leaving props of <{}> untouched: {}", display_name, e);
                Err(e)
            }
        }
    }

    fn collect<I, K, V>(&self, attributes: I) -> RawEnvelope
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let cfg = &self.config;
        let mut raw = RawEnvelope::default();
        for (name, value) in attributes {
            let (name, value) = (name.as_ref(), value.as_ref().to_string());
            if !cfg.is_envelope_attribute(name) {
                raw.rest.insert(self.normalizer.attribute_name(name), value);
                continue;
            }
            let slot = if name == cfg.props_attribute {
                &mut raw.props
            } else if name == cfg.metadata_attribute {
                &mut raw.metadata
            } else if name == cfg.hydrate_attribute {
                &mut raw.hydrate
            } else if name == cfg.component_url_attribute {
                &mut raw.component_url
            } else {
                &mut raw.component_export
            };
            *slot = Some(value);
        }
        raw
    }

    fn parse_metadata(&self, text: Option<&str>) -> Result<ComponentMetadata, EnvelopeError> {
        let attr = &self.config.metadata_attribute;
        let text = text.ok_or_else(|| EnvelopeError::malformed(attr, "missing required attribute"))?;
        let json: Json = serde_json::from_str(&self.normalizer.unescape(text))
            .map_err(|e| EnvelopeError::malformed(attr, e.to_string()))?;

        let Json::Object(mut fields) = json else {
            return Err(EnvelopeError::malformed(attr, "expected a JSON object"));
        };
        let display_name = match fields.remove("name") {
            Some(Json::String(name)) => name,
            _ => return Err(EnvelopeError::malformed(attr, "missing string field 'name'")),
        };

        let mut metadata = ComponentMetadata::new(display_name);
        metadata.hydrate_args = fields.remove("value").unwrap_or(Json::Null);
        Ok(metadata)
    }

    fn parse_props(&self, text: Option<&str>) -> Result<Shared<Record>, EnvelopeError> {
        let attr = &self.config.props_attribute;
        let text = text.ok_or_else(|| EnvelopeError::malformed(attr, "missing required attribute"))?;
        match decode(&self.normalizer.unescape(text)) {
            Ok(PropValue::Object(props)) => Ok(props),
            Ok(other) => Err(EnvelopeError::malformed(
                attr,
                format!("expected a JSON object, found {}", other.kind_name()),
            )),
            Err(CodecError::Json(e)) => Err(EnvelopeError::malformed(attr, e.to_string())),
            Err(e) => Err(e.into()),
        }
    }
}

/// [`Envelope::deconstruct`] with the default attribute layout.
pub fn deconstruct<I, K, V>(attributes: I) -> Result<DeconstructedComponent, EnvelopeError>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    Envelope::new(EnvelopeConfig::default()).deconstruct(attributes)
}

/// [`Envelope::reconstruct`] with the default attribute layout.
pub fn reconstruct(component: DeconstructedComponent) -> Result<String, EnvelopeError> {
    Envelope::new(EnvelopeConfig::default()).reconstruct(component)
}
