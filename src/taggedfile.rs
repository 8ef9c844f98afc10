// Copyright (c) 2025 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! The [`TaggedFile`] struct represents a file that contains tags.

use crate::tag::{read_tags_from_path, Tag, TagKey};
use crate::track::TrackLike;
use std::borrow::Cow;
use std::fmt;
use std::path::{Path, PathBuf};

/// A tagged file that contains zero or more tags.
pub struct TaggedFile {
    /// Path of the file.
    pub path: PathBuf,
    /// Tags that are present in the file.
    content: Vec<Box<dyn Tag>>,
}

impl fmt::Debug for TaggedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        let mut s = f.debug_tuple("TaggedFile");
        let _ = s.field(&self.path);
        for tag in self.tags() {
            let _ = s.field(&tag.tag_type());
        }
        s.finish()
    }
}

impl TaggedFile {
    /// Create a new tagged file with the given path and tags.
    #[must_use]
    pub fn new(path: PathBuf, content: Vec<Box<dyn Tag>>) -> Self {
        TaggedFile { path, content }
    }

    /// Creates a [`TaggedFile`] from the path.
    ///
    /// # Errors
    ///
    /// Returns an error in case the file at the given path does not exist or is unsupported.
    pub fn read_from_path(path: impl AsRef<Path>) -> crate::Result<Self> {
        read_tags_from_path(path.as_ref()).map(|content| Self {
            path: path.as_ref().to_path_buf(),
            content,
        })
    }

    /// Returns zero or more [`Tag`] objects.
    #[must_use]
    pub fn tags(&self) -> &[Box<dyn Tag>] {
        &self.content
    }

    /// Write all tags back to the file.
    ///
    /// # Errors
    ///
    /// Returns an error if one of the tags could not be written.
    pub fn write_tags(&mut self) -> crate::Result<()> {
        for tag in &mut self.content {
            tag.write(self.path.as_path())?;
        }

        Ok(())
    }
}

impl TrackLike for TaggedFile {
    fn track_path(&self) -> &Path {
        self.path.as_path()
    }

    fn tag_values(&self, key: TagKey) -> Vec<&str> {
        self.tags()
            .iter()
            .map(|tag| tag.get_all(key))
            .find(|values| !values.is_empty())
            .unwrap_or_default()
    }

    fn set_tag_value(&mut self, key: TagKey, value: Cow<'_, str>) {
        self.content
            .iter_mut()
            .for_each(|tag| tag.set(key, value.clone()));
    }

    fn save(&mut self) -> crate::Result<()> {
        log::debug!("Writing tags to {}", self.path.display());
        self.write_tags()
    }
}
