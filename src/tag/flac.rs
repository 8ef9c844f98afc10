// Copyright (c) 2022 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Support for FLAC tags.

#![cfg(feature = "flac")]

use crate::tag::{Tag, TagKey, TagType};
use std::borrow::Cow;
use std::fmt;
use std::path::Path;

/// FLAC tag.
pub struct FlacTag {
    /// The underlying tag data.
    data: metaflac::Tag,
}

impl fmt::Debug for FlacTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlacTag").finish_non_exhaustive()
    }
}

impl FlacTag {
    /// Create a new, empty FLAC tag.
    #[cfg(test)]
    pub fn new() -> Self {
        FlacTag {
            data: metaflac::Tag::new(),
        }
    }

    /// Read the FLAC tag from the path
    ///
    /// # Errors
    ///
    /// Returns an error if the file is not a valid FLAC file.
    pub fn read_from_path(path: impl AsRef<Path>) -> crate::Result<Self> {
        let data = metaflac::Tag::read_from_path(path)?;
        Ok(FlacTag { data })
    }
}

impl Tag for FlacTag {
    fn tag_type(&self) -> TagType {
        TagType::Flac
    }

    fn get_all(&self, key: TagKey) -> Vec<&str> {
        self.data
            .get_vorbis(key.vorbis_field())
            .map(Iterator::collect)
            .unwrap_or_default()
    }

    fn set(&mut self, key: TagKey, value: Cow<'_, str>) {
        self.data
            .set_vorbis(key.vorbis_field(), vec![value.into_owned()]);
    }

    fn write(&mut self, path: &Path) -> crate::Result<()> {
        self.data.write_to_path(path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paste::paste;

    macro_rules! add_test_get_and_set {
        ($tagkey:expr, $fnsuffix:ident) => {
            paste! {
                #[test]
                fn [<test_get_and_set_ $fnsuffix>]() {
                    let mut tag = FlacTag::new();
                    assert!(tag.get($tagkey).is_none());

                    tag.set($tagkey, Cow::from("Example Value"));
                    assert_eq!(tag.get($tagkey), Some("Example Value"));

                    tag.set($tagkey, Cow::from("Other Value"));
                    assert_eq!(tag.get_all($tagkey), vec!["Other Value"]);
                }
            }
        };
    }

    add_test_get_and_set!(TagKey::Album, album);
    add_test_get_and_set!(TagKey::AlbumArtist, albumartist);
    add_test_get_and_set!(TagKey::Artist, artist);
    add_test_get_and_set!(TagKey::Comment, comment);
    add_test_get_and_set!(TagKey::Date, date);
    add_test_get_and_set!(TagKey::Description, description);
    add_test_get_and_set!(TagKey::Genre, genre);
    add_test_get_and_set!(TagKey::TrackTitle, tracktitle);

    #[test]
    fn test_multiple_values_keep_order() {
        let mut tag = FlacTag::new();
        tag.data
            .set_vorbis("GENRE", vec!["Rock; Pop", "Jazz"]);
        assert_eq!(tag.get_all(TagKey::Genre), vec!["Rock; Pop", "Jazz"]);
        assert_eq!(tag.get(TagKey::Genre), Some("Rock; Pop"));
    }
}
