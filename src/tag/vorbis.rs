// Copyright (c) 2025 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Support for Vorbis comments in Ogg Vorbis files.

#![cfg(feature = "ogg")]

use crate::tag::{Tag, TagKey, TagType};
use lofty::config::{ParseOptions, WriteOptions};
use lofty::file::AudioFile;
use lofty::ogg::{VorbisComments, VorbisFile};
use lofty::tag::TagExt;
use std::borrow::Cow;
use std::fmt;
use std::fs::File;
use std::path::Path;

/// Vorbis comments of an Ogg file.
pub struct VorbisTag {
    /// The underlying tag data.
    data: VorbisComments,
}

impl fmt::Debug for VorbisTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VorbisTag").finish_non_exhaustive()
    }
}

impl VorbisTag {
    /// Create a new, empty tag.
    #[cfg(test)]
    pub fn new() -> Self {
        VorbisTag {
            data: VorbisComments::new(),
        }
    }

    /// Read the Vorbis comments from the path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is not a valid Ogg Vorbis file.
    pub fn read_from_path(path: impl AsRef<Path>) -> crate::Result<Self> {
        let mut file = File::open(path)?;
        let vorbis_file = <VorbisFile as AudioFile>::read_from(
            &mut file,
            ParseOptions::new().read_properties(false),
        )?;
        Ok(VorbisTag {
            data: vorbis_file.vorbis_comments().clone(),
        })
    }
}

impl Tag for VorbisTag {
    fn tag_type(&self) -> TagType {
        TagType::Vorbis
    }

    fn get_all(&self, key: TagKey) -> Vec<&str> {
        self.data.get_all(key.vorbis_field()).collect()
    }

    fn set(&mut self, key: TagKey, value: Cow<'_, str>) {
        self.data.insert(key.vorbis_field().to_string(), value.into_owned());
    }

    fn write(&mut self, path: &Path) -> crate::Result<()> {
        self.data.save_to_path(path, WriteOptions::default())?;
        Ok(())
    }
}
