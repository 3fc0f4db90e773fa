// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Component metadata carried next to the props blob.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Client hydration strategy (`client:*` directive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HydrationMode {
    /// Hydrate on page load
    Load,
    /// Hydrate once the main thread is idle
    Idle,
    /// Hydrate when the element enters the viewport
    Visible,
    /// Hydrate when a media query matches (query in `hydrate_args`)
    Media,
    /// Client-only render, no server output
    Only,
}

impl HydrationMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            HydrationMode::Load => "load",
            HydrationMode::Idle => "idle",
            HydrationMode::Visible => "visible",
            HydrationMode::Media => "media",
            HydrationMode::Only => "only",
        }
    }
}

impl fmt::Display for HydrationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a hydration directive is not one of the known modes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownHydrationMode(pub String);

impl fmt::Display for UnknownHydrationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown hydration mode '{}'", self.0)
    }
}

impl std::error::Error for UnknownHydrationMode {}

impl FromStr for HydrationMode {
    type Err = UnknownHydrationMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "load" => Ok(HydrationMode::Load),
            "idle" => Ok(HydrationMode::Idle),
            "visible" => Ok(HydrationMode::Visible),
            "media" => Ok(HydrationMode::Media),
            "only" => Ok(HydrationMode::Only),
            other => Err(UnknownHydrationMode(other.to_string())),
        }
    }
}

/// Exported binding the client imports from `component_url`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentExport {
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<bool>,
}

/// Metadata for one island.
///
/// Read-only as far as the codec is concerned: only `display_name` and
/// `hydrate` are consulted, to label cyclic-reference failures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentMetadata {
    pub display_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hydrate: Option<HydrationMode>,

    /// Opaque directive argument (e.g. the media query for `client:media`).
    #[serde(default)]
    pub hydrate_args: serde_json::Value,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_export: Option<ComponentExport>,

    /// Remaining element attributes, camelCased names, values untouched.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub attributes: IndexMap<String, String>,
}

impl ComponentMetadata {
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            hydrate: None,
            hydrate_args: serde_json::Value::Null,
            component_url: None,
            component_export: None,
            attributes: IndexMap::new(),
        }
    }

    pub fn with_hydrate(mut self, mode: HydrationMode) -> Self {
        self.hydrate = Some(mode);
        self
    }

    /// Look up a carried-through attribute by its normalized name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}
