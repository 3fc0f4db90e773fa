// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Cycle guard for one encode pass.

use std::collections::HashSet;

/// Identities of the composites on the active encode path.
///
/// Entries follow stack discipline: a composite is present only while its
/// children are being walked, so a value reached twice through siblings is
/// never mistaken for a cycle.
#[derive(Debug, Default)]
pub struct VisitedSet {
    active: HashSet<usize>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if `id` is an ancestor on the current path.
    pub fn contains(&self, id: usize) -> bool {
        self.active.contains(&id)
    }

    /// Number of composites currently on the path.
    pub fn depth(&self) -> usize {
        self.active.len()
    }

    /// Run `walk` with `id` marked as active.
    ///
    /// Returns `None` without calling `walk` when `id` is already active.
    /// The mark is cleared on every exit from `walk`, error results included.
    pub fn enter<R>(&mut self, id: usize, walk: impl FnOnce(&mut Self) -> R) -> Option<R> {
        if !self.active.insert(id) {
            return None;
        }
        let result = walk(self);
        self.active.remove(&id);
        Some(result)
    }
}
