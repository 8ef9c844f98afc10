// Copyright (c) 2025 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Per-track enrichment.

use crate::bandcamp::StorefrontClient;
use crate::discogs::ReleaseCatalog;
use crate::merge::{self, ExistingGenres};
use crate::resolver::{GenreResolver, StorefrontResolver};
use crate::tag::TagKey;
use crate::track::TrackLike;
use crate::Config;
use std::borrow::Cow;

/// What happened to a track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnrichmentOutcome {
    /// The track belongs to a playlist and was skipped.
    Playlist,
    /// Nothing changed.
    Unchanged,
    /// At least one tag changed.
    Updated {
        /// New genre tag value, if changed.
        genre: Option<String>,
        /// New date tag value, if changed.
        date: Option<String>,
    },
}

/// Cache statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Releases looked up in the catalog.
    pub releases: usize,
    /// Storefront listings fetched.
    pub storefront_listings: usize,
    /// Storefront release pages fetched.
    pub storefront_releases: usize,
}

/// Enriches tracks with genres and release years from a release catalog and storefronts.
#[derive(Debug)]
pub struct Enricher<C, S> {
    config: Config,
    catalog: C,
    storefront: S,
    genres: GenreResolver,
    keywords: StorefrontResolver,
    dry_run: bool,
}

impl<C: ReleaseCatalog, S: StorefrontClient> Enricher<C, S> {
    /// Create an enricher with empty caches.
    pub fn new(config: Config, catalog: C, storefront: S) -> Self {
        let genres = GenreResolver::new(&config.discogs);
        let keywords = StorefrontResolver::new(&config.bandcamp);
        Self {
            config,
            catalog,
            storefront,
            genres,
            keywords,
            dry_run: false,
        }
    }

    /// If enabled, changes are only logged and tracks are never saved.
    #[must_use]
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Merge new genre terms into the track, backfill the release year and save the track if
    /// anything changed.
    ///
    /// # Errors
    ///
    /// Returns an error if the track could not be saved. Lookup failures are not errors.
    pub fn enrich(&mut self, track: &mut impl TrackLike) -> crate::Result<EnrichmentOutcome> {
        let existing = ExistingGenres::parse(track.first_tag_value(TagKey::Genre), &self.config.merge);
        let ExistingGenres::Terms(existing) = existing else {
            log::debug!("Skipping playlist {}", track.track_path().display());
            return Ok(EnrichmentOutcome::Playlist);
        };

        let genre = self.merge_genre(track, &existing);
        let date = self.backfill_date(track);
        if genre.is_none() && date.is_none() {
            return Ok(EnrichmentOutcome::Unchanged);
        }

        if let Some(value) = &genre {
            log::info!("{}: GENRE = {value}", track.track_path().display());
        }
        if let Some(value) = &date {
            log::info!("{}: DATE = {value}", track.track_path().display());
        }
        if self.dry_run {
            log::info!("Dry run, not saving {}", track.track_path().display());
        } else {
            track.save()?;
        }
        Ok(EnrichmentOutcome::Updated { genre, date })
    }

    /// Look up new genre terms and write the merged value. Returns the new value if the tag
    /// changed.
    fn merge_genre(&mut self, track: &mut impl TrackLike, existing: &[String]) -> Option<String> {
        let mut new_terms = self.genres.resolve(&self.catalog, &*track);
        new_terms.extend(self.keywords.resolve(&self.storefront, &*track).keywords());

        let value = merge::merged_genre_value(existing, &new_terms, &self.config.merge)?;
        if track.first_tag_value(TagKey::Genre) == Some(value.as_str()) {
            return None;
        }
        track.set_tag_value(TagKey::Genre, Cow::from(value.as_str()));
        Some(value)
    }

    /// Replace an implausible release year with the year of an already resolved release. Returns
    /// the new value if the tag changed.
    fn backfill_date(&self, track: &mut impl TrackLike) -> Option<String> {
        if !merge::needs_date(track.first_tag_value(TagKey::Date), &self.config.merge) {
            return None;
        }

        let query = GenreResolver::release_query(&*track)?;
        let year = self.genres.cached_release(&query)?.year?;
        let value = year.to_string();
        if track.first_tag_value(TagKey::Date) == Some(value.as_str()) {
            return None;
        }
        track.set_tag_value(TagKey::Date, Cow::from(value.as_str()));
        Some(value)
    }

    /// Current cache statistics.
    #[must_use]
    pub fn cache_stats(&self) -> CacheStats {
        CacheStats {
            releases: self.genres.cache_len(),
            storefront_listings: self.keywords.listing_cache_len(),
            storefront_releases: self.keywords.keyword_cache_len(),
        }
    }
}
