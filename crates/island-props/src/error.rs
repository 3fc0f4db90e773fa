// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error types for the props codec and the envelope adapter.

use crate::metadata::HydrationMode;
use crate::tag::TypeTag;
use thiserror::Error;

/// Errors raised while encoding or decoding tag-JSON.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error(
        "Cyclic reference detected while serializing props for <{display_name} client:{}>!\n\n\
         Cyclic references cannot be safely serialized for client-side usage. \
         Please remove the cyclic reference.",
        .hydrate.map_or("undefined", HydrationMode::as_str)
    )]
    CyclicReference {
        display_name: String,
        hydrate: Option<HydrationMode>,
    },

    #[error("Invalid {tag} payload: {reason}")]
    InvalidPayload { tag: TypeTag, reason: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CodecError {
    pub(crate) fn payload(tag: TypeTag, reason: impl Into<String>) -> Self {
        Self::InvalidPayload {
            tag,
            reason: reason.into(),
        }
    }
}

/// Errors raised while reading or rebuilding an island envelope.
#[derive(Debug, Error)]
pub enum EnvelopeError {
    #[error("Malformed envelope attribute '{attribute}': {reason}")]
    Malformed { attribute: String, reason: String },

    #[error(transparent)]
    Codec(#[from] CodecError),
}

impl EnvelopeError {
    pub(crate) fn malformed(attribute: &str, reason: impl Into<String>) -> Self {
        Self::Malformed {
            attribute: attribute.to_string(),
            reason: reason.into(),
        }
    }

    /// Returns true if this error came from a cyclic props graph.
    pub fn is_cyclic(&self) -> bool {
        matches!(self, Self::Codec(CodecError::CyclicReference { .. }))
    }
}
