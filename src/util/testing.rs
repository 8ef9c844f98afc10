// Copyright (c) 2025 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! In-memory fakes for tests.

use crate::bandcamp::StorefrontClient;
use crate::discogs::{ReleaseCandidate, ReleaseCatalog, ReleaseDetail};
use crate::tag::TagKey;
use crate::track::TrackLike;
use std::borrow::Cow;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Track that keeps its tags in memory and counts saves.
#[derive(Debug, Default, Clone)]
pub struct FakeTrack {
    pub path: PathBuf,
    pub tags: HashMap<TagKey, Vec<String>>,
    pub saves: usize,
}

impl FakeTrack {
    pub fn with_tag(self, key: TagKey, value: &str) -> Self {
        self.with_tag_values(key, &[value])
    }

    pub fn with_tag_values(mut self, key: TagKey, values: &[&str]) -> Self {
        let _ = self
            .tags
            .insert(key, values.iter().map(ToString::to_string).collect());
        self
    }

    /// Values of a tag as owned strings, for assertions.
    pub fn values(&self, key: TagKey) -> Vec<String> {
        self.tags.get(&key).cloned().unwrap_or_default()
    }
}

impl TrackLike for FakeTrack {
    fn track_path(&self) -> &Path {
        &self.path
    }

    fn tag_values(&self, key: TagKey) -> Vec<&str> {
        self.tags
            .get(&key)
            .map(|values| values.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    fn set_tag_value(&mut self, key: TagKey, value: Cow<'_, str>) {
        let _ = self.tags.insert(key, vec![value.into_owned()]);
    }

    fn save(&mut self) -> crate::Result<()> {
        self.saves += 1;
        Ok(())
    }
}

/// Release catalog with canned search results and release details.
#[derive(Debug, Default)]
pub struct FakeCatalog {
    results: HashMap<(String, Option<String>), Vec<ReleaseCandidate>>,
    releases: HashMap<u64, ReleaseDetail>,
    failing: bool,
    pub searches: RefCell<Vec<(String, Option<String>)>>,
    pub release_calls: Cell<usize>,
}

impl FakeCatalog {
    /// Register the releases returned for a search.
    pub fn with_search(mut self, album: &str, artist: Option<&str>, ids: &[u64]) -> Self {
        let candidates = ids
            .iter()
            .map(|&id| ReleaseCandidate {
                id,
                title: format!("Release {id}"),
            })
            .collect();
        let _ = self.results.insert(
            (album.to_string(), artist.map(ToString::to_string)),
            candidates,
        );
        self
    }

    pub fn with_release(mut self, id: u64, genres: &[&str], styles: &[&str], year: Option<i32>) -> Self {
        let detail = ReleaseDetail {
            genres: genres.iter().map(ToString::to_string).collect(),
            styles: styles.iter().map(ToString::to_string).collect(),
            year,
        };
        let _ = self.releases.insert(id, detail);
        self
    }

    /// Make every request fail.
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    pub fn search_count(&self) -> usize {
        self.searches.borrow().len()
    }

    fn fail(&self) -> crate::Error {
        crate::Error::MalformedPage {
            url: "https://api.discogs.test".to_string(),
            reason: "catalog unavailable".to_string(),
        }
    }
}

impl ReleaseCatalog for FakeCatalog {
    fn search(&self, album: &str, artist: Option<&str>) -> crate::Result<Vec<ReleaseCandidate>> {
        let key = (album.to_string(), artist.map(ToString::to_string));
        self.searches.borrow_mut().push(key.clone());
        if self.failing {
            return Err(self.fail());
        }
        Ok(self.results.get(&key).cloned().unwrap_or_default())
    }

    fn release(&self, id: u64) -> crate::Result<ReleaseDetail> {
        self.release_calls.set(self.release_calls.get() + 1);
        if self.failing {
            return Err(self.fail());
        }
        self.releases.get(&id).cloned().ok_or_else(|| self.fail())
    }
}

/// Storefront that serves canned HTML pages.
#[derive(Debug, Default)]
pub struct FakeStorefront {
    pages: HashMap<String, String>,
    pub fetches: RefCell<Vec<String>>,
}

impl FakeStorefront {
    pub fn with_page(mut self, url: &str, html: &str) -> Self {
        let _ = self.pages.insert(url.to_string(), html.to_string());
        self
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.borrow().len()
    }
}

impl StorefrontClient for FakeStorefront {
    fn fetch_page(&self, url: &str) -> crate::Result<String> {
        self.fetches.borrow_mut().push(url.to_string());
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| crate::Error::MalformedPage {
                url: url.to_string(),
                reason: "not found".to_string(),
            })
    }
}
