// Copyright (c) 2024 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! In-memory caching for catalog and storefront lookups.
//!
//! Caches live for the duration of a single run. Negative results ("looked up, nothing found")
//! are stored like any other value, so that a key is never looked up twice.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

/// Memoization table that resolves each key at most once.
pub struct ResolutionCache<K, V> {
    /// Resolved values.
    entries: HashMap<K, V>,
}

impl<K, V> fmt::Debug for ResolutionCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolutionCache")
            .field("len", &self.entries.len())
            .finish()
    }
}

impl<K, V> Default for ResolutionCache<K, V> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash, V> ResolutionCache<K, V> {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached value for `key`, computing and storing it first if the key has not been
    /// resolved yet. `compute` is called at most once per key.
    pub fn lookup_or_compute<F>(&mut self, key: K, compute: F) -> &V
    where
        F: FnOnce(&K) -> V,
    {
        self.entries.entry(key).or_insert_with_key(compute)
    }

    /// Returns the cached value for `key` without resolving it.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.get(key)
    }

    /// Returns `true` if `key` has already been resolved.
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of resolved keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing has been resolved yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
