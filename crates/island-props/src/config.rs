// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Envelope attribute configuration

use serde::{Deserialize, Serialize};

/// Names of the attributes that make up an island envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvelopeConfig {
    /// Tag-JSON props blob
    pub props_attribute: String,

    /// Plain JSON metadata blob (`{"name": ..., "value": ...}`)
    pub metadata_attribute: String,

    /// Hydration directive (`load`, `idle`, ...)
    pub hydrate_attribute: String,

    /// Module URL of the component
    pub component_url_attribute: String,

    /// Export name within the component module
    pub component_export_attribute: String,
}

impl Default for EnvelopeConfig {
    fn default() -> Self {
        Self {
            props_attribute: "props".to_string(),
            metadata_attribute: "opts".to_string(),
            hydrate_attribute: "client".to_string(),
            component_url_attribute: "component-url".to_string(),
            component_export_attribute: "component-export".to_string(),
        }
    }
}

impl EnvelopeConfig {
    /// Start from the default attribute names and override some of them
    pub fn builder() -> EnvelopeConfigBuilder {
        EnvelopeConfigBuilder::default()
    }

    /// Returns true if `name` is one of the envelope's own attributes
    pub fn is_envelope_attribute(&self, name: &str) -> bool {
        name == self.props_attribute
            || name == self.metadata_attribute
            || name == self.hydrate_attribute
            || name == self.component_url_attribute
            || name == self.component_export_attribute
    }
}

/// Builder for an [`EnvelopeConfig`]; unset names keep their defaults
#[derive(Debug, Default)]
pub struct EnvelopeConfigBuilder {
    props_attribute: Option<String>,
    metadata_attribute: Option<String>,
    hydrate_attribute: Option<String>,
    component_url_attribute: Option<String>,
    component_export_attribute: Option<String>,
}

impl EnvelopeConfigBuilder {
    /// Set the props attribute name
    pub fn props_attribute(mut self, name: impl Into<String>) -> Self {
        self.props_attribute = Some(name.into());
        self
    }

    /// Set the metadata attribute name
    pub fn metadata_attribute(mut self, name: impl Into<String>) -> Self {
        self.metadata_attribute = Some(name.into());
        self
    }

    /// Set the hydration directive attribute name
    pub fn hydrate_attribute(mut self, name: impl Into<String>) -> Self {
        self.hydrate_attribute = Some(name.into());
        self
    }

    /// Set the component URL attribute name
    pub fn component_url_attribute(mut self, name: impl Into<String>) -> Self {
        self.component_url_attribute = Some(name.into());
        self
    }

    /// Set the component export attribute name
    pub fn component_export_attribute(mut self, name: impl Into<String>) -> Self {
        self.component_export_attribute = Some(name.into());
        self
    }

    /// Build the configuration
    pub fn build(self) -> EnvelopeConfig {
        let defaults = EnvelopeConfig::default();

        EnvelopeConfig {
            props_attribute: self.props_attribute.unwrap_or(defaults.props_attribute),
            metadata_attribute: self
                .metadata_attribute
                .unwrap_or(defaults.metadata_attribute),
            hydrate_attribute: self.hydrate_attribute.unwrap_or(defaults.hydrate_attribute),
            component_url_attribute: self
                .component_url_attribute
                .unwrap_or(defaults.component_url_attribute),
            component_export_attribute: self
                .component_export_attribute
                .unwrap_or(defaults.component_export_attribute),
        }
    }
}
