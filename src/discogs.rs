// Copyright (c) 2024 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Discogs release catalog.
//!
//! See the [Discogs API documentation][api] for details.
//!
//! [api]: https://www.discogs.com/developers

use crate::config::DiscogsConfig;
use serde::Deserialize;
use std::time::Duration;

/// Artist and album that are looked up in the release catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReleaseQuery {
    /// Release artist (album artist if present, track artist otherwise).
    pub artist: String,
    /// Release title.
    pub album: String,
}

impl ReleaseQuery {
    /// Create a new query.
    pub fn new(artist: impl Into<String>, album: impl Into<String>) -> Self {
        Self {
            artist: artist.into(),
            album: album.into(),
        }
    }
}

/// A search hit that can be resolved to a [`ReleaseDetail`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReleaseCandidate {
    /// Discogs release ID.
    pub id: u64,
    /// Display title ("Artist - Title").
    #[serde(default)]
    pub title: String,
}

/// Classification and release year of a single release.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReleaseDetail {
    /// Genres, e.g. "Electronic".
    pub genres: Vec<String>,
    /// Styles, e.g. "House". These are more specific than genres.
    pub styles: Vec<String>,
    /// Release year, if known.
    pub year: Option<i32>,
}

impl ReleaseDetail {
    /// Returns `true` if both genres and styles are present.
    #[must_use]
    pub fn is_fully_classified(&self) -> bool {
        !self.genres.is_empty() && !self.styles.is_empty()
    }

    /// Genres followed by styles.
    #[must_use]
    pub fn genre_terms(&self) -> Vec<String> {
        self.genres.iter().chain(&self.styles).cloned().collect()
    }
}

/// A catalog of releases that can be searched by album title and artist.
pub trait ReleaseCatalog {
    /// Search releases by album title, optionally restricted to an artist. Only the first page of
    /// results is returned, in the catalog's own ranking.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    fn search(&self, album: &str, artist: Option<&str>) -> crate::Result<Vec<ReleaseCandidate>>;

    /// Fetch the details of a release.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    fn release(&self, id: u64) -> crate::Result<ReleaseDetail>;
}

/// Response of the `/database/search` endpoint.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    /// Search hits on the current page.
    results: Vec<ReleaseCandidate>,
}

/// Response of the `/releases/{id}` endpoint.
#[derive(Debug, Deserialize)]
struct ReleaseResponse {
    /// Genres.
    #[serde(default)]
    genres: Vec<String>,
    /// Styles.
    #[serde(default)]
    styles: Vec<String>,
    /// Release year, `0` if unknown.
    #[serde(default)]
    year: Option<i32>,
}

impl From<ReleaseResponse> for ReleaseDetail {
    fn from(response: ReleaseResponse) -> Self {
        ReleaseDetail {
            genres: response.genres,
            styles: response.styles,
            year: response.year.filter(|&year| year != 0),
        }
    }
}

/// Discogs API client.
#[derive(Debug)]
pub struct DiscogsClient {
    /// HTTP agent.
    agent: ureq::Agent,
    /// Base URL of the API.
    base_url: String,
    /// User agent header value.
    user_agent: String,
    /// Personal access token.
    token: String,
}

impl DiscogsClient {
    /// Create a new client from the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if no token is configured.
    pub fn new(config: &DiscogsConfig) -> crate::Result<Self> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(timeout)
            .timeout_read(timeout)
            .build();
        Ok(Self {
            agent,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            user_agent: config.user_agent.clone(),
            token: config.token()?.to_string(),
        })
    }

    /// Send an authenticated GET request and decode the JSON response.
    fn get<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> crate::Result<T> {
        let url = format!("{}{path}", self.base_url);
        let mut request = self
            .agent
            .get(&url)
            .set("User-Agent", &self.user_agent)
            .set("Authorization", &format!("Discogs token={}", self.token));
        for &(key, value) in params {
            request = request.query(key, value);
        }

        log::debug!("GET {url} {params:?}");
        let response = request.call()?;
        Ok(response.into_json()?)
    }
}

impl ReleaseCatalog for DiscogsClient {
    fn search(&self, album: &str, artist: Option<&str>) -> crate::Result<Vec<ReleaseCandidate>> {
        let mut params = vec![("q", album), ("type", "release")];
        if let Some(artist) = artist {
            params.push(("artist", artist));
        }
        let response: SearchResponse = self.get("/database/search", &params)?;
        log::debug!(
            "Found {} releases for query {album:?} (artist: {artist:?})",
            response.results.len(),
        );
        Ok(response.results)
    }

    fn release(&self, id: u64) -> crate::Result<ReleaseDetail> {
        let response: ReleaseResponse = self.get(&format!("/releases/{id}"), &[])?;
        Ok(response.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_search_response() {
        let json = r#"{
            "pagination": {"page": 1, "pages": 1, "per_page": 50, "items": 2},
            "results": [
                {"id": 123, "title": "Various - Compilation Vol. 1", "type": "release"},
                {"id": 456, "type": "release"}
            ]
        }"#;
        let response: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            response.results,
            vec![
                ReleaseCandidate {
                    id: 123,
                    title: "Various - Compilation Vol. 1".to_string()
                },
                ReleaseCandidate {
                    id: 456,
                    title: String::new()
                },
            ]
        );
    }

    #[test]
    fn test_deserialize_release_response() {
        let json = r#"{
            "id": 123,
            "title": "Compilation Vol. 1",
            "genres": ["Electronic"],
            "styles": ["House", "Deep House"],
            "year": 2015
        }"#;
        let detail: ReleaseDetail = serde_json::from_str::<ReleaseResponse>(json)
            .unwrap()
            .into();
        assert_eq!(detail.genres, vec!["Electronic"]);
        assert_eq!(detail.styles, vec!["House", "Deep House"]);
        assert_eq!(detail.year, Some(2015));
        assert!(detail.is_fully_classified());
        assert_eq!(
            detail.genre_terms(),
            vec!["Electronic", "House", "Deep House"]
        );
    }

    #[test]
    fn test_unknown_year_and_missing_styles() {
        let json = r#"{"id": 1, "genres": ["Rock"], "year": 0}"#;
        let detail: ReleaseDetail = serde_json::from_str::<ReleaseResponse>(json)
            .unwrap()
            .into();
        assert_eq!(detail.year, None);
        assert!(detail.styles.is_empty());
        assert!(!detail.is_fully_classified());
    }

    #[test]
    fn test_client_requires_token() {
        let config = crate::Config::default();
        assert!(DiscogsClient::new(&config.discogs).is_err());

        let mut discogs = config.discogs;
        discogs.token = Some("token".to_string());
        discogs.base_url = "https://api.discogs.com/".to_string();
        let client = DiscogsClient::new(&discogs).unwrap();
        assert_eq!(client.base_url, "https://api.discogs.com");
    }
}
