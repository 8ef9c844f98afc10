// Copyright (c) 2024 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Error and result types.

use std::io;
use thiserror::Error;

/// Main error type.
#[derive(Error, Debug)]
pub enum ErrorType {
    /// Configuration error.
    #[error("Configuration Error ({0})")]
    Config(#[from] crate::config::ConfigError),
    /// I/O Error.
    #[error("Input/Output error ({:?})", .0)]
    Io(#[from] io::Error),
    /// The logger could not be initialized.
    #[error("Failed to initialize logger: {0}")]
    Logger(#[from] log::SetLoggerError),
    /// File has an unknown file extension.
    #[error("File has unknown file type")]
    UnknownFileType,
    /// A Discogs or Bandcamp HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Request(#[from] Box<ureq::Error>),
    /// A response body could not be decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// A storefront page did not have the expected structure.
    #[error("Malformed page at {url}: {reason}")]
    MalformedPage {
        /// URL of the page.
        url: String,
        /// What was missing or broken.
        reason: String,
    },
    /// Errors raised by the [`id3`] crate.
    #[cfg(feature = "id3")]
    #[error("Failed to read ID3 tag")]
    Id3(#[from] id3::Error),
    /// Errors raised by the [`metaflac`] crate.
    #[cfg(feature = "flac")]
    #[error("Failed to read FLAC tag")]
    Flac(#[from] metaflac::Error),
    /// Errors raised by the [`lofty`] crate.
    #[cfg(feature = "ogg")]
    #[error("Failed to read Ogg tag: {0}")]
    Ogg(#[from] lofty::error::LoftyError),
}

impl From<ureq::Error> for ErrorType {
    fn from(err: ureq::Error) -> Self {
        ErrorType::Request(Box::new(err))
    }
}

/// Convenience type.
pub type Result<T> = std::result::Result<T, ErrorType>;
