// Copyright (c) 2025 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Bandcamp artist storefronts.
//!
//! Bandcamp has no public API, so the storefront's `/music` listing page and the release pages
//! are fetched as HTML. Release keywords are read from the embedded JSON-LD metadata.

use crate::config::BandcampConfig;
use scraper::{Html, Selector};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

/// Path of the listing page below the storefront URL.
const LISTING_PATH: &str = "/music";

/// Selector for the release links on the listing page.
const LISTING_ITEM_SELECTOR: &str = "ol#music-grid li a";

/// Selector for the release title on a listing item.
const LISTING_TITLE_SELECTOR: &str = "p";

/// Selector for the release title on a release page.
const RELEASE_TITLE_SELECTOR: &str = "h2.trackTitle";

/// Selector for the embedded structured metadata on a release page.
const JSON_LD_SELECTOR: &str = r#"script[type="application/ld+json"]"#;

/// Something that can fetch storefront pages.
pub trait StorefrontClient {
    /// Fetch the HTML document at the given URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    fn fetch_page(&self, url: &str) -> crate::Result<String>;
}

/// A release offered on a storefront.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    /// Absolute or storefront-relative URL of the release page.
    pub href: String,
    /// Keywords of the release, if they are already known.
    pub keywords: Option<Vec<String>>,
}

/// All releases offered on a storefront, keyed by normalized title.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StorefrontListing {
    /// Listing entries.
    entries: HashMap<String, ListingEntry>,
}

impl StorefrontListing {
    /// Add an entry with the given title.
    pub fn insert(&mut self, title: &str, entry: ListingEntry) {
        let _ = self.entries.insert(normalize_title(title), entry);
    }

    /// Find the entry with the given title.
    #[must_use]
    pub fn get(&self, title: &str) -> Option<&ListingEntry> {
        self.entries.get(&normalize_title(title))
    }

    /// Number of releases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no releases are listed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Normalize a release title for lookups (trimmed and lower-cased).
#[must_use]
pub fn normalize_title(title: &str) -> String {
    title.trim().to_lowercase()
}

/// Listing page URL of a storefront.
#[must_use]
pub fn listing_url(storefront_url: &str) -> String {
    format!("{storefront_url}{LISTING_PATH}")
}

/// Resolve a listing entry's href against the storefront URL.
#[must_use]
pub fn release_url(storefront_url: &str, href: &str) -> String {
    if href.starts_with("http") {
        href.to_string()
    } else {
        format!("{storefront_url}{href}")
    }
}

/// Parse a CSS selector.
fn selector(selectors: &str) -> crate::Result<Selector> {
    Selector::parse(selectors).map_err(|err| crate::Error::MalformedPage {
        url: String::new(),
        reason: format!("invalid selector {selectors:?}: {err:?}"),
    })
}

/// Parse the listing page into `(title, href)` pairs.
///
/// Each item's title is the first text node of its `<p>` element; a following line with the
/// artist name (for split releases) is ignored.
///
/// # Errors
///
/// Returns an error if a selector cannot be built.
pub fn parse_listing(html: &str) -> crate::Result<Vec<(String, String)>> {
    let document = Html::parse_document(html);
    let item_selector = selector(LISTING_ITEM_SELECTOR)?;
    let title_selector = selector(LISTING_TITLE_SELECTOR)?;

    let items = document
        .select(&item_selector)
        .filter_map(|item| {
            let href = item.value().attr("href")?;
            let title = item
                .select(&title_selector)
                .next()
                .and_then(|p| p.text().next())?;
            Some((title.trim().to_string(), href.to_string()))
        })
        .collect();
    Ok(items)
}

/// Parse the release title from a release page.
///
/// # Errors
///
/// Returns [`crate::Error::MalformedPage`] if the page has no title.
pub fn parse_release_title(url: &str, html: &str) -> crate::Result<String> {
    let document = Html::parse_document(html);
    let title_selector = selector(RELEASE_TITLE_SELECTOR)?;
    document
        .select(&title_selector)
        .next()
        .and_then(|heading| heading.text().next())
        .map(|title| title.trim().to_string())
        .ok_or_else(|| crate::Error::MalformedPage {
            url: url.to_string(),
            reason: "missing release title".to_string(),
        })
}

/// JSON-LD metadata embedded in a release page.
#[derive(Debug, Deserialize)]
struct ReleaseMetadata {
    /// Free-text keywords (tags) of the release.
    #[serde(default)]
    keywords: Vec<String>,
}

/// Parse the keywords from a release page's JSON-LD metadata. Metadata without keywords yields an
/// empty list.
///
/// # Errors
///
/// Returns an error if the page has no JSON-LD metadata or the metadata is not valid JSON.
pub fn parse_keywords(url: &str, html: &str) -> crate::Result<Vec<String>> {
    let document = Html::parse_document(html);
    let json_selector = selector(JSON_LD_SELECTOR)?;
    let json = document
        .select(&json_selector)
        .next()
        .map(|script| script.text().collect::<String>())
        .ok_or_else(|| crate::Error::MalformedPage {
            url: url.to_string(),
            reason: "missing JSON-LD metadata".to_string(),
        })?;
    let metadata: ReleaseMetadata = serde_json::from_str(&json)?;
    Ok(metadata.keywords)
}

/// Bandcamp HTTP client.
#[derive(Debug)]
pub struct BandcampClient {
    /// HTTP agent.
    agent: ureq::Agent,
}

impl BandcampClient {
    /// Create a new client from the configuration.
    #[must_use]
    pub fn new(config: &BandcampConfig) -> Self {
        let timeout = Duration::from_secs(config.timeout_secs);
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(timeout)
            .timeout_read(timeout)
            .build();
        Self { agent }
    }
}

impl StorefrontClient for BandcampClient {
    fn fetch_page(&self, url: &str) -> crate::Result<String> {
        log::debug!("GET {url}");
        let response = self.agent.get(url).call()?;
        Ok(response.into_string()?)
    }
}
