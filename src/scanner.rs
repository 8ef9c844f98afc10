// Copyright (c) 2024 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! The scanner searches a given path for media files and enriches each of them.

use crate::bandcamp::StorefrontClient;
use crate::discogs::ReleaseCatalog;
use crate::enricher::{CacheStats, EnrichmentOutcome, Enricher};
use crate::util::{has_extension, walk_dir};
use crate::TaggedFile;
use std::fmt;
use std::path::{Path, PathBuf};

/// Counters for a finished scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    /// Media files found.
    pub files: usize,
    /// Files whose tags changed.
    pub updated: usize,
    /// Files that were left as they are.
    pub unchanged: usize,
    /// Playlist files that were skipped.
    pub playlists: usize,
    /// Files that could not be read, enriched or saved.
    pub failed: usize,
    /// Cache statistics at the end of the scan.
    pub cache: CacheStats,
}

impl ScanSummary {
    /// Count the outcome of a single file.
    fn record(&mut self, result: &crate::Result<EnrichmentOutcome>) {
        self.files += 1;
        match result {
            Ok(EnrichmentOutcome::Updated { .. }) => self.updated += 1,
            Ok(EnrichmentOutcome::Unchanged) => self.unchanged += 1,
            Ok(EnrichmentOutcome::Playlist) => self.playlists += 1,
            Err(_) => self.failed += 1,
        }
    }
}

impl fmt::Display for ScanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{files} files: {updated} updated, {unchanged} unchanged, {playlists} playlists, {failed} failed \
             ({releases} releases, {listings} storefronts and {pages} storefront releases looked up)",
            files = self.files,
            updated = self.updated,
            unchanged = self.unchanged,
            playlists = self.playlists,
            failed = self.failed,
            releases = self.cache.releases,
            listings = self.cache.storefront_listings,
            pages = self.cache.storefront_releases,
        )
    }
}

/// Find media files with one of the given extensions below the given path, in sorted order.
///
/// Directories that cannot be read are logged and skipped.
pub fn find_track_paths<S: AsRef<str>>(
    input_path: PathBuf,
    extensions: &[S],
) -> impl Iterator<Item = PathBuf> + '_ {
    walk_dir(input_path)
        .filter_map(|result| {
            result
                .inspect_err(|err| log::warn!("Failed to read directory: {err}"))
                .ok()
        })
        .flat_map(|(_path, _dirs, files)| files)
        .filter(move |path| has_extension(path, extensions))
}

/// Enrich a single file.
fn scan_file<C, S>(enricher: &mut Enricher<C, S>, path: &Path) -> crate::Result<EnrichmentOutcome>
where
    C: ReleaseCatalog,
    S: StorefrontClient,
{
    let mut tagged_file = TaggedFile::read_from_path(path)?;
    enricher.enrich(&mut tagged_file)
}

/// Enrich all media files below the given path.
///
/// A failure on one file is logged and does not abort the scan.
///
/// # Errors
///
/// Returns an error if the path is not a readable directory.
pub fn scan<C, S>(
    enricher: &mut Enricher<C, S>,
    path: PathBuf,
    extensions: &[String],
) -> crate::Result<ScanSummary>
where
    C: ReleaseCatalog,
    S: StorefrontClient,
{
    let _ = std::fs::read_dir(&path)?;
    log::info!("Scanning {}", path.display());

    let mut summary = ScanSummary::default();
    for track_path in find_track_paths(path, extensions) {
        log::debug!("Processing {}", track_path.display());
        let result = scan_file(enricher, &track_path);
        if let Err(err) = &result {
            log::error!("Failed to process {}: {err}", track_path.display());
        }
        summary.record(&result);
    }
    summary.cache = enricher.cache_stats();

    log::info!("Finished: {summary}");
    Ok(summary)
}
