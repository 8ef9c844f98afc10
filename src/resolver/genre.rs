// Copyright (c) 2025 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Genre lookup in the release catalog.

use crate::cache::ResolutionCache;
use crate::config::DiscogsConfig;
use crate::discogs::{ReleaseCatalog, ReleaseDetail, ReleaseQuery};
use crate::track::TrackLike;

/// Looks up genres and styles of a track's release and remembers every result.
#[derive(Debug)]
pub struct GenreResolver {
    /// Catalog settings.
    config: DiscogsConfig,
    /// Resolved releases. `None` means "not found".
    releases: ResolutionCache<ReleaseQuery, Option<ReleaseDetail>>,
}

impl GenreResolver {
    /// Create a resolver with an empty cache.
    #[must_use]
    pub fn new(config: &DiscogsConfig) -> Self {
        Self {
            config: config.clone(),
            releases: ResolutionCache::new(),
        }
    }

    /// Build the release query for a track.
    ///
    /// Returns `None` if the track has no artist or no album, because the catalog search would
    /// not yield reliable results.
    pub fn release_query(track: &impl TrackLike) -> Option<ReleaseQuery> {
        let _ = track.track_artist()?;
        let album = track.release_title()?;
        let artist = track.release_artist()?;
        Some(ReleaseQuery::new(artist, album))
    }

    /// Returns the genre terms (genres followed by styles) of the track's release. The catalog is
    /// only queried if the release has not been resolved before.
    pub fn resolve<C: ReleaseCatalog>(&mut self, catalog: &C, track: &impl TrackLike) -> Vec<String> {
        let Some(query) = Self::release_query(track) else {
            log::debug!(
                "Skipping catalog lookup for {}: missing artist or album",
                track.track_path().display()
            );
            return Vec::new();
        };

        if self.releases.contains(&query) {
            log::debug!("Using cached release for {} - {}", query.artist, query.album);
        }

        let config = &self.config;
        self.releases
            .lookup_or_compute(query, |query| {
                log::info!("Getting from Discogs: {} - {}", query.artist, query.album);
                let is_compilation = config.is_compilation_artist(&query.artist);
                find_release(catalog, query, is_compilation).unwrap_or_else(|err| {
                    log::warn!(
                        "Discogs lookup for {} - {} failed: {err}",
                        query.artist,
                        query.album
                    );
                    None
                })
            })
            .as_ref()
            .map(ReleaseDetail::genre_terms)
            .unwrap_or_default()
    }

    /// Returns the release if it has already been resolved, without querying the catalog.
    #[must_use]
    pub fn cached_release(&self, query: &ReleaseQuery) -> Option<&ReleaseDetail> {
        self.releases.get(query).and_then(Option::as_ref)
    }

    /// Number of distinct releases that have been looked up (found or not).
    #[must_use]
    pub fn cache_len(&self) -> usize {
        self.releases.len()
    }
}

/// Search the catalog and pick the best matching release.
///
/// With several candidates, the first one that has both genres and styles wins. If none has
/// both, the first candidate is used.
fn find_release<C: ReleaseCatalog>(
    catalog: &C,
    query: &ReleaseQuery,
    is_compilation: bool,
) -> crate::Result<Option<ReleaseDetail>> {
    let artist = (!is_compilation).then_some(query.artist.as_str());
    let candidates = catalog.search(&query.album, artist)?;

    match candidates.as_slice() {
        [] => {
            log::info!("Not found: {} - {}", query.artist, query.album);
            Ok(None)
        }
        [candidate] => catalog.release(candidate.id).map(Some),
        [first, rest @ ..] => {
            let first_detail = catalog.release(first.id)?;
            if first_detail.is_fully_classified() {
                return Ok(Some(first_detail));
            }
            for candidate in rest {
                let detail = catalog.release(candidate.id)?;
                if detail.is_fully_classified() {
                    log::debug!("Picked release {} ({})", candidate.id, candidate.title);
                    return Ok(Some(detail));
                }
            }
            Ok(Some(first_detail))
        }
    }
}
