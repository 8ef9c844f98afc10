// Copyright (c) 2022 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Tags and tag-related functions.

#[cfg(feature = "flac")]
pub mod flac;
#[cfg(feature = "id3")]
pub mod id3;
#[cfg(feature = "ogg")]
pub mod vorbis;

use std::borrow::Cow;
use std::path::Path;

/// A tag key describes the kind of information in a generic, format-independent way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagKey {
    /// Title of the release.
    Album,
    /// Artist(s) primarily credited on the release.
    AlbumArtist,
    /// Track Artist Name(s).
    Artist,
    /// Comment.
    Comment,
    /// Release date, either as `YYYY-MM-DD` or as a bare year.
    Date,
    /// Free-text description (Bandcamp puts its storefront link here for some formats).
    Description,
    /// Genre Name(s) of the track.
    Genre,
    /// Track Title.
    TrackTitle,
}

impl TagKey {
    /// All known tag keys.
    pub const ALL: [TagKey; 8] = [
        TagKey::Album,
        TagKey::AlbumArtist,
        TagKey::Artist,
        TagKey::Comment,
        TagKey::Date,
        TagKey::Description,
        TagKey::Genre,
        TagKey::TrackTitle,
    ];

    /// The Vorbis comment field name for this key. These names also serve as the canonical,
    /// human-readable tag names.
    #[must_use]
    pub fn vorbis_field(self) -> &'static str {
        match self {
            TagKey::Album => "ALBUM",
            TagKey::AlbumArtist => "ALBUMARTIST",
            TagKey::Artist => "ARTIST",
            TagKey::Comment => "COMMENT",
            TagKey::Date => "DATE",
            TagKey::Description => "DESCRIPTION",
            TagKey::Genre => "GENRE",
            TagKey::TrackTitle => "TITLE",
        }
    }
}

/// The tag type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagType {
    /// ID3v2.2 tag
    ID3v22,
    /// ID3v2.3 tag
    ID3v23,
    /// ID3v2.4 tag
    ID3v24,
    /// Vorbis tag from a FLAC file
    Flac,
    /// Vorbis comments from an Ogg Vorbis file
    Vorbis,
}

/// A tag that can be read from and written to a file.
pub trait Tag {
    /// Get the tag type.
    fn tag_type(&self) -> TagType;

    /// Get all string values for the tag key, in the order they are stored.
    fn get_all(&self, key: TagKey) -> Vec<&str>;

    /// Get the first string value for the tag key.
    fn get(&self, key: TagKey) -> Option<&str> {
        self.get_all(key).into_iter().next()
    }

    /// Replace all values of the tag key with a single value.
    fn set(&mut self, key: TagKey, value: Cow<'_, str>);

    /// Write the tag to the file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or the tag cannot be written.
    fn write(&mut self, path: &Path) -> crate::Result<()>;
}

/// Read the tags from the file at the given path, dispatching on the file extension.
///
/// # Errors
///
/// Returns an error if the file type is not supported or the tag cannot be read.
pub fn read_tags_from_path(path: impl AsRef<Path>) -> crate::Result<Vec<Box<dyn Tag>>> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .map(std::ffi::OsStr::to_ascii_lowercase)
        .ok_or(crate::Error::UnknownFileType)?;
    let extension = extension.to_str().ok_or(crate::Error::UnknownFileType)?;
    let tag: Box<dyn Tag> = match extension {
        #[cfg(feature = "id3")]
        "mp3" => Box::new(self::id3::ID3v2Tag::read_from_path(path)?),
        #[cfg(feature = "flac")]
        "flac" => Box::new(self::flac::FlacTag::read_from_path(path)?),
        #[cfg(feature = "ogg")]
        "ogg" => Box::new(self::vorbis::VorbisTag::read_from_path(path)?),
        ext => {
            log::debug!("Unknown file extension {ext:?}");
            return Err(crate::Error::UnknownFileType);
        }
    };
    Ok(vec![tag])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_file_type() {
        assert!(matches!(
            read_tags_from_path("/nonexistent/cover.jpg"),
            Err(crate::Error::UnknownFileType)
        ));
        assert!(matches!(
            read_tags_from_path("/nonexistent/README"),
            Err(crate::Error::UnknownFileType)
        ));
    }

    #[test]
    fn test_vorbis_field_names_are_unique() {
        let mut names: Vec<_> = TagKey::ALL.iter().map(|key| key.vorbis_field()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), TagKey::ALL.len());
    }
}
