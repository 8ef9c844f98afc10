// Copyright (c) 2024 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Support for ID3 tags.

use crate::tag::{Tag, TagKey, TagType};
use id3::{
    frame::{Comment, ExtendedText},
    TagLike,
};
use std::borrow::Cow;
use std::path::Path;

/// Language code used for newly created comment frames.
const COMMENT_LANGUAGE: &str = "eng";

/// ID3 frame ID.
#[derive(Debug)]
enum FrameId<'a> {
    /// Text frame.
    Text(&'a str),
    /// Extended Text frame (`TXXX`).
    ExtendedText(&'a str),
    /// Comment frame (`COMM`) with the given description.
    Comment(&'a str),
}

/// ID3 tag (version 2).
#[derive(Debug)]
pub struct ID3v2Tag {
    /// The underlying tag data.
    data: id3::Tag,
}

impl Default for ID3v2Tag {
    fn default() -> Self {
        Self::new()
    }
}

impl ID3v2Tag {
    /// Create a new, empty ID3v2.4 tag.
    #[must_use]
    pub fn new() -> Self {
        ID3v2Tag {
            data: id3::Tag::new(),
        }
    }

    /// Create a new, empty tag with the given ID3 version.
    #[cfg(test)]
    pub fn with_version(version: id3::Version) -> Self {
        ID3v2Tag {
            data: id3::Tag::with_version(version),
        }
    }

    /// Read the ID3 tag from the path. Files without any ID3 tag yield an empty tag, so that
    /// values can be added to them.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or contains a broken tag.
    pub fn read_from_path(path: impl AsRef<Path>) -> crate::Result<Self> {
        let data = match id3::Tag::read_from_path(path) {
            Ok(data) => data,
            Err(err) if matches!(err.kind, id3::ErrorKind::NoTag) => id3::Tag::new(),
            Err(err) => return Err(err.into()),
        };
        Ok(ID3v2Tag { data })
    }

    /// Get the ID3 frame for a tag key.
    fn tag_key_to_frame(&self, key: TagKey) -> FrameId<'static> {
        match key {
            TagKey::Album => FrameId::Text("TALB"),
            TagKey::AlbumArtist => FrameId::Text("TPE2"),
            TagKey::Artist => FrameId::Text("TPE1"),
            TagKey::Comment => FrameId::Comment(""),
            TagKey::Date => match self.data.version() {
                id3::Version::Id3v22 | id3::Version::Id3v23 => FrameId::Text("TYER"),
                id3::Version::Id3v24 => FrameId::Text("TDRC"),
            },
            TagKey::Description => FrameId::ExtendedText("DESCRIPTION"),
            TagKey::Genre => FrameId::Text("TCON"),
            TagKey::TrackTitle => FrameId::Text("TIT2"),
        }
    }

    /// Get the content of a text frame as string.
    fn get_frames<'a>(&'a self, frame_id: &'a str) -> impl Iterator<Item = &'a str> {
        self.data
            .get(frame_id)
            .and_then(|frame| frame.content().text_values())
            .into_iter()
            .flatten()
    }

    /// Get the content of an extended text frame as string.
    fn get_extended_texts<'a>(&'a self, description: &'a str) -> impl Iterator<Item = &'a str> {
        self.data
            .extended_texts()
            .filter(move |extended_text| extended_text.description == description)
            .map(|extended_text| extended_text.value.as_str())
    }

    /// Get the content of comment frames with the given description.
    fn get_comments<'a>(&'a self, description: &'a str) -> impl Iterator<Item = &'a str> {
        self.data
            .comments()
            .filter(move |comment| comment.description == description)
            .map(|comment| comment.text.as_str())
    }
}

impl Tag for ID3v2Tag {
    fn tag_type(&self) -> TagType {
        match self.data.version() {
            id3::Version::Id3v22 => TagType::ID3v22,
            id3::Version::Id3v23 => TagType::ID3v23,
            id3::Version::Id3v24 => TagType::ID3v24,
        }
    }

    fn get_all(&self, key: TagKey) -> Vec<&str> {
        match self.tag_key_to_frame(key) {
            FrameId::Text(id) => self.get_frames(id).collect(),
            FrameId::ExtendedText(description) => self.get_extended_texts(description).collect(),
            FrameId::Comment(description) => self.get_comments(description).collect(),
        }
    }

    fn set(&mut self, key: TagKey, value: Cow<'_, str>) {
        match self.tag_key_to_frame(key) {
            FrameId::Text(id) => {
                self.data.set_text(id, value);
            }
            FrameId::ExtendedText(description) => {
                self.data.remove_extended_text(Some(description), None);
                let _ = self.data.add_frame(ExtendedText {
                    description: description.to_string(),
                    value: value.into_owned(),
                });
            }
            FrameId::Comment(description) => {
                self.data.remove_comment(Some(description), None);
                let _ = self.data.add_frame(Comment {
                    lang: COMMENT_LANGUAGE.to_string(),
                    description: description.to_string(),
                    text: value.into_owned(),
                });
            }
        }
    }

    fn write(&mut self, path: &Path) -> crate::Result<()> {
        self.data.write_to_path(path, self.data.version())?;
        Ok(())
    }
}
