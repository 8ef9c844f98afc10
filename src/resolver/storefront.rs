// Copyright (c) 2025 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Keyword lookup on an artist's storefront.

use crate::bandcamp::{self, ListingEntry, StorefrontClient, StorefrontListing};
use crate::cache::ResolutionCache;
use crate::config::BandcampConfig;
use crate::tag::TagKey;
use crate::track::TrackLike;

/// Result of a storefront keyword lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorefrontOutcome {
    /// The track does not reference a storefront.
    NoReference,
    /// The track has neither an album nor a title to look for.
    NoItem,
    /// The storefront does not offer the release.
    NotListed,
    /// Keywords of the release (possibly empty).
    Keywords(Vec<String>),
    /// The lookup failed.
    Failed(String),
}

impl StorefrontOutcome {
    /// The found keywords, or an empty list for all other outcomes.
    #[must_use]
    pub fn keywords(self) -> Vec<String> {
        match self {
            Self::Keywords(keywords) => keywords,
            _ => Vec::new(),
        }
    }
}

/// Find the storefront URL in a track's comment or description.
///
/// Tags written by the store look like `Visit https://artist.bandcamp.com`. If both tags
/// qualify, the description wins, even if it has no URL after the prefix. The URL is the second
/// token when splitting on single spaces.
#[must_use]
pub fn find_storefront_reference(track: &impl TrackLike, config: &BandcampConfig) -> Option<String> {
    [TagKey::Comment, TagKey::Description]
        .into_iter()
        .filter_map(|key| track.first_tag_value(key))
        .filter(|value| {
            value.starts_with(&config.reference_prefix) && value.ends_with(&config.domain_suffix)
        })
        .next_back()?
        .split(' ')
        .nth(1)
        .filter(|url| !url.is_empty())
        .map(ToString::to_string)
}

/// Looks up release keywords on storefronts and remembers every page it fetched.
#[derive(Debug)]
pub struct StorefrontResolver {
    /// Storefront settings.
    config: BandcampConfig,
    /// Listing per storefront URL.
    listings: ResolutionCache<String, Result<StorefrontListing, String>>,
    /// Keywords per storefront URL and normalized release title.
    keywords: ResolutionCache<(String, String), Result<Vec<String>, String>>,
}

impl StorefrontResolver {
    /// Create a resolver with empty caches.
    #[must_use]
    pub fn new(config: &BandcampConfig) -> Self {
        Self {
            config: config.clone(),
            listings: ResolutionCache::new(),
            keywords: ResolutionCache::new(),
        }
    }

    /// Look up the keywords of the track's release on its storefront.
    pub fn resolve<S: StorefrontClient>(
        &mut self,
        client: &S,
        track: &impl TrackLike,
    ) -> StorefrontOutcome {
        let Some(reference) = find_storefront_reference(track, &self.config) else {
            return StorefrontOutcome::NoReference;
        };
        let Some(item) = track
            .release_title()
            .or_else(|| track.track_title())
            .map(bandcamp::normalize_title)
        else {
            return StorefrontOutcome::NoItem;
        };

        let listing = self
            .listings
            .lookup_or_compute(reference.clone(), |reference| {
                fetch_listing(client, reference).map_err(|err| {
                    log::warn!("Failed to get Bandcamp listing of {reference}: {err}");
                    err.to_string()
                })
            });
        let listing = match listing {
            Ok(listing) => listing,
            Err(reason) => return StorefrontOutcome::Failed(reason.clone()),
        };

        let Some(entry) = listing.get(&item) else {
            log::info!("Not found: {reference} - {item}");
            return StorefrontOutcome::NotListed;
        };
        if let Some(keywords) = &entry.keywords {
            return StorefrontOutcome::Keywords(keywords.clone());
        }

        let href = entry.href.clone();
        let keywords = self
            .keywords
            .lookup_or_compute((reference, item), |(reference, item)| {
                log::info!("Getting from Bandcamp: {reference} - {item}");
                let url = bandcamp::release_url(reference, &href);
                fetch_keywords(client, &url).map_err(|err| {
                    log::warn!("Failed to get Bandcamp keywords from {url}: {err}");
                    err.to_string()
                })
            });
        match keywords {
            Ok(keywords) => StorefrontOutcome::Keywords(keywords.clone()),
            Err(reason) => StorefrontOutcome::Failed(reason.clone()),
        }
    }

    /// Number of storefronts whose listing has been fetched (successfully or not).
    #[must_use]
    pub fn listing_cache_len(&self) -> usize {
        self.listings.len()
    }

    /// Number of release pages that have been fetched (successfully or not).
    #[must_use]
    pub fn keyword_cache_len(&self) -> usize {
        self.keywords.len()
    }
}

/// Fetch and parse the listing page of a storefront.
///
/// Storefronts that offer a single release redirect the listing page to that release, in which
/// case the page is parsed as release page and its keywords are stored right away.
fn fetch_listing<S: StorefrontClient>(
    client: &S,
    reference: &str,
) -> crate::Result<StorefrontListing> {
    let url = bandcamp::listing_url(reference);
    let html = client.fetch_page(&url)?;
    let items = bandcamp::parse_listing(&html)?;

    let mut listing = StorefrontListing::default();
    if items.is_empty() {
        let title = bandcamp::parse_release_title(&url, &html)?;
        log::info!("Getting from Bandcamp: {reference} - {title}");
        let keywords = bandcamp::parse_keywords(&url, &html)?;
        listing.insert(
            &title,
            ListingEntry {
                href: url,
                keywords: Some(keywords),
            },
        );
    } else {
        for (title, href) in items {
            listing.insert(
                &title,
                ListingEntry {
                    href,
                    keywords: None,
                },
            );
        }
    }
    log::debug!("Storefront {reference} lists {} releases", listing.len());
    Ok(listing)
}

/// Fetch a release page and parse its keywords.
fn fetch_keywords<S: StorefrontClient>(client: &S, url: &str) -> crate::Result<Vec<String>> {
    let html = client.fetch_page(url)?;
    bandcamp::parse_keywords(url, &html)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::{FakeStorefront, FakeTrack};

    const ARTIST_URL: &str = "https://artist.bandcamp.com";

    const LISTING_HTML: &str = r#"<ol id="music-grid">
        <li><a href="/album/first"><p class="title">First Album</p></a></li>
        <li><a href="https://label.bandcamp.com/album/second"><p class="title">
          Second Album<br><span>Guest</span></p></a></li>
        </ol>"#;

    fn release_html(title: &str, keywords: &str) -> String {
        format!(
            r#"<script type="application/ld+json">{{"name": "{title}", "keywords": {keywords}}}</script>
            <h2 class="trackTitle">{title}</h2>"#
        )
    }

    fn resolver() -> StorefrontResolver {
        StorefrontResolver::new(&crate::Config::default().bandcamp)
    }

    fn track(album: &str) -> FakeTrack {
        FakeTrack::default()
            .with_tag(TagKey::Comment, "Visit https://artist.bandcamp.com")
            .with_tag(TagKey::Album, album)
    }

    #[test]
    fn test_find_storefront_reference() {
        let config = crate::Config::default().bandcamp;

        let track = FakeTrack::default().with_tag(TagKey::Comment, "Visit https://artist.bandcamp.com");
        assert_eq!(
            find_storefront_reference(&track, &config).as_deref(),
            Some(ARTIST_URL)
        );

        let track = track.with_tag(TagKey::Description, "Visit https://other.bandcamp.com");
        assert_eq!(
            find_storefront_reference(&track, &config).as_deref(),
            Some("https://other.bandcamp.com")
        );

        let track = FakeTrack::default()
            .with_tag(TagKey::Comment, "Visit https://artist.bandcamp.com")
            .with_tag(TagKey::Description, "Ripped from CD");
        assert_eq!(
            find_storefront_reference(&track, &config).as_deref(),
            Some(ARTIST_URL)
        );

        let track = FakeTrack::default().with_tag(TagKey::Comment, "Visit https://example.com");
        assert!(find_storefront_reference(&track, &config).is_none());
        assert!(find_storefront_reference(&FakeTrack::default(), &config).is_none());
    }

    #[test]
    fn test_find_storefront_reference_without_url() {
        let config = crate::Config::default().bandcamp;

        // The qualifying description has no URL, so the comment is not used either.
        let track = FakeTrack::default()
            .with_tag(TagKey::Comment, "Visit https://artist.bandcamp.com")
            .with_tag(TagKey::Description, "Visit.bandcamp.com");
        assert!(find_storefront_reference(&track, &config).is_none());

        let track =
            FakeTrack::default().with_tag(TagKey::Comment, "Visit  https://artist.bandcamp.com");
        assert!(find_storefront_reference(&track, &config).is_none());
    }

    #[test]
    fn test_no_reference_or_item() {
        let client = FakeStorefront::default();
        let mut resolver = resolver();

        let track = FakeTrack::default().with_tag(TagKey::Album, "First Album");
        assert_eq!(resolver.resolve(&client, &track), StorefrontOutcome::NoReference);

        let track = FakeTrack::default().with_tag(TagKey::Comment, "Visit https://artist.bandcamp.com");
        assert_eq!(resolver.resolve(&client, &track), StorefrontOutcome::NoItem);
        assert_eq!(client.fetch_count(), 0);
    }

    #[test]
    fn test_keywords_from_release_page() {
        let client = FakeStorefront::default()
            .with_page("https://artist.bandcamp.com/music", LISTING_HTML)
            .with_page(
                "https://artist.bandcamp.com/album/first",
                &release_html("First Album", r#"["ambient", "drone"]"#),
            )
            .with_page(
                "https://label.bandcamp.com/album/second",
                &release_html("Second Album", r#"["techno"]"#),
            );
        let mut resolver = resolver();

        assert_eq!(
            resolver.resolve(&client, &track("First Album")),
            StorefrontOutcome::Keywords(vec!["ambient".to_string(), "drone".to_string()])
        );
        assert_eq!(
            resolver.resolve(&client, &track("second album")),
            StorefrontOutcome::Keywords(vec!["techno".to_string()])
        );
        assert_eq!(
            *client.fetches.borrow(),
            vec![
                "https://artist.bandcamp.com/music",
                "https://artist.bandcamp.com/album/first",
                "https://label.bandcamp.com/album/second",
            ]
        );
    }

    #[test]
    fn test_pages_are_fetched_once() {
        let client = FakeStorefront::default()
            .with_page("https://artist.bandcamp.com/music", LISTING_HTML)
            .with_page(
                "https://artist.bandcamp.com/album/first",
                &release_html("First Album", r#"["ambient"]"#),
            );
        let mut resolver = resolver();

        for _ in 0..3 {
            assert_eq!(
                resolver.resolve(&client, &track("First Album")).keywords(),
                vec!["ambient"]
            );
        }
        assert_eq!(client.fetch_count(), 2);
        assert_eq!(resolver.listing_cache_len(), 1);
        assert_eq!(resolver.keyword_cache_len(), 1);
    }

    #[test]
    fn test_title_is_used_without_album() {
        let client = FakeStorefront::default()
            .with_page("https://artist.bandcamp.com/music", LISTING_HTML)
            .with_page(
                "https://artist.bandcamp.com/album/first",
                &release_html("First Album", r#"["ambient"]"#),
            );
        let mut resolver = resolver();
        let track = FakeTrack::default()
            .with_tag(TagKey::Description, "Visit https://artist.bandcamp.com")
            .with_tag(TagKey::TrackTitle, "First Album");

        assert_eq!(resolver.resolve(&client, &track).keywords(), vec!["ambient"]);
    }

    #[test]
    fn test_not_listed() {
        let client =
            FakeStorefront::default().with_page("https://artist.bandcamp.com/music", LISTING_HTML);
        let mut resolver = resolver();

        assert_eq!(
            resolver.resolve(&client, &track("Third Album")),
            StorefrontOutcome::NotListed
        );
        assert_eq!(client.fetch_count(), 1);
    }

    #[test]
    fn test_single_release_storefront() {
        let client = FakeStorefront::default().with_page(
            "https://artist.bandcamp.com/music",
            &release_html("Only Album", r#"["jazz", "fusion"]"#),
        );
        let mut resolver = resolver();

        assert_eq!(
            resolver.resolve(&client, &track("Only Album")).keywords(),
            vec!["jazz", "fusion"]
        );
        assert_eq!(
            resolver.resolve(&client, &track("Only Album")).keywords(),
            vec!["jazz", "fusion"]
        );
        assert_eq!(client.fetch_count(), 1);
        assert_eq!(resolver.keyword_cache_len(), 0);
    }

    #[test]
    fn test_failures_degrade_to_failed() {
        let client = FakeStorefront::default();
        let mut resolver = resolver();

        let outcome = resolver.resolve(&client, &track("First Album"));
        assert!(matches!(outcome, StorefrontOutcome::Failed(_)));
        assert!(outcome.keywords().is_empty());

        // The failed listing is not fetched again.
        let outcome = resolver.resolve(&client, &track("Second Album"));
        assert!(matches!(outcome, StorefrontOutcome::Failed(_)));
        assert_eq!(client.fetch_count(), 1);
    }

    #[test]
    fn test_malformed_release_page_is_cached() {
        let client = FakeStorefront::default()
            .with_page("https://artist.bandcamp.com/music", LISTING_HTML)
            .with_page("https://artist.bandcamp.com/album/first", "<html></html>");
        let mut resolver = resolver();

        for _ in 0..2 {
            assert!(matches!(
                resolver.resolve(&client, &track("First Album")),
                StorefrontOutcome::Failed(_)
            ));
        }
        assert_eq!(client.fetch_count(), 2);
    }
}
