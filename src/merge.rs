// Copyright (c) 2025 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Merging of genre terms and release years into existing tags.

use crate::config::MergeConfig;
use crate::util::parse_year_from_str;
use itertools::Itertools;

/// Genre terms that are already stored in a track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExistingGenres {
    /// The track belongs to a playlist and must not be touched.
    Playlist,
    /// The existing terms, in stored order.
    Terms(Vec<String>),
}

impl ExistingGenres {
    /// Split a genre tag value into its terms.
    ///
    /// Overlong first terms are usually free-text comments of other taggers and are dropped.
    #[must_use]
    pub fn parse(value: Option<&str>, config: &MergeConfig) -> Self {
        let Some(value) = value else {
            return Self::Terms(Vec::new());
        };

        let mut terms: Vec<String> = value
            .split(config.genre_separator.as_str())
            .map(ToString::to_string)
            .collect();
        if terms.iter().any(|term| term == &config.playlist_marker) {
            return Self::Playlist;
        }
        if terms
            .first()
            .is_some_and(|term| term.chars().count() > config.max_first_genre_length)
        {
            let _ = terms.remove(0);
        }
        Self::Terms(terms)
    }
}

/// Append new terms to the existing ones and remove duplicates, keeping the first occurrence.
#[must_use]
pub fn merge_genres(existing: &[String], new: &[String]) -> Vec<String> {
    existing.iter().chain(new).unique().cloned().collect()
}

/// Join genre terms into a single tag value.
#[must_use]
pub fn join_genres(terms: &[String], config: &MergeConfig) -> String {
    terms.join(&config.genre_separator)
}

/// Compute the new genre tag value.
///
/// Returns `None` if no new terms were found, in which case the tag is left untouched.
#[must_use]
pub fn merged_genre_value(existing: &[String], new: &[String], config: &MergeConfig) -> Option<String> {
    if new.is_empty() {
        return None;
    }
    Some(join_genres(&merge_genres(existing, new), config))
}

/// Returns `true` if the date tag needs a new value, i.e. if it is missing, unparsable or its
/// year lies outside of the plausible range.
#[must_use]
pub fn needs_date(value: Option<&str>, config: &MergeConfig) -> bool {
    let year = value.and_then(parse_year_from_str).unwrap_or(0);
    !config.is_plausible_year(year)
}
