// Copyright (c) 2025 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Generic track access, independent of the underlying tag container.

use crate::tag::TagKey;
use std::borrow::Cow;
use std::path::Path;

/// Represents a single track whose tags can be read, replaced and saved.
///
/// Each tag holds an ordered list of values. Only the first value is relevant for lookups, and a
/// tag whose first value is an empty string counts as empty.
pub trait TrackLike {
    /// Path of the file that backs this track.
    fn track_path(&self) -> &Path;

    /// All values of the given tag, in stored order.
    fn tag_values(&self, key: TagKey) -> Vec<&str>;

    /// Replace all values of the given tag with a single value.
    fn set_tag_value(&mut self, key: TagKey, value: Cow<'_, str>);

    /// Persist the current tags.
    ///
    /// # Errors
    ///
    /// Returns an error if the tags could not be written.
    fn save(&mut self) -> crate::Result<()>;

    /// Returns the first value of the given tag, or `None` if the tag is empty.
    fn first_tag_value(&self, key: TagKey) -> Option<&str> {
        self.tag_values(key)
            .into_iter()
            .next()
            .filter(|value| !value.is_empty())
    }

    /// Returns `true` if the tag is absent, has no values or its first value is empty.
    fn has_empty_tag(&self, key: TagKey) -> bool {
        self.first_tag_value(key).is_none()
    }

    /// Track Artist Name.
    fn track_artist(&self) -> Option<&str> {
        self.first_tag_value(TagKey::Artist)
    }

    /// Release Title.
    fn release_title(&self) -> Option<&str> {
        self.first_tag_value(TagKey::Album)
    }

    /// The artist credited for the release, i.e. the album artist if present or the track artist
    /// otherwise.
    fn release_artist(&self) -> Option<&str> {
        self.first_tag_value(TagKey::AlbumArtist)
            .or_else(|| self.track_artist())
    }

    /// Track Title.
    fn track_title(&self) -> Option<&str> {
        self.first_tag_value(TagKey::TrackTitle)
    }
}
