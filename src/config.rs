// Copyright (c) 2024 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Configuration utils.
//!
//! The effective configuration is layered: the embedded defaults come first, then the user's
//! configuration file (if any) and finally environment variables prefixed with `DISCOTAG_`, using
//! `__` to separate nested keys (e.g. `DISCOTAG_DISCOGS__TOKEN`).

use ::config::{Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Encountered when the configuration cannot be loaded.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// One of the configuration sources is malformed or could not be read.
    #[error("Configuration Error: {0}")]
    Load(#[from] ::config::ConfigError),
    /// No Discogs token has been configured.
    #[error("No Discogs token configured (set `discogs.token` or DISCOTAG_DISCOGS__TOKEN)")]
    MissingDiscogsToken,
    /// No music folder has been given on the command line or in the configuration.
    #[error("No music folder given (pass a path or set `scanner.music_folder`)")]
    MissingMusicFolder,
}

/// Default configuration TOML string.
const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

/// Name of the application directory below the XDG base directories.
const APP_NAME: &str = "discotag";

/// File name of the user configuration file.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Prefix for environment variables that override configuration values.
const ENV_PREFIX: &str = "DISCOTAG";

/// Configuration for the Discogs release catalog.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DiscogsConfig {
    /// Personal access token.
    pub token: Option<String>,
    /// Base URL of the Discogs API.
    pub base_url: String,
    /// User agent sent with every request.
    pub user_agent: String,
    /// Connect and read timeout in seconds.
    pub timeout_secs: u64,
    /// Album artist names that mark a compilation. These are not used as search filter.
    pub compilation_artists: Vec<String>,
}

impl DiscogsConfig {
    /// Returns the configured token, if it is non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingDiscogsToken`] if no token is set.
    pub fn token(&self) -> Result<&str, ConfigError> {
        self.token
            .as_deref()
            .filter(|token| !token.is_empty())
            .ok_or(ConfigError::MissingDiscogsToken)
    }

    /// Check whether the artist name denotes a compilation ("Various Artists").
    #[must_use]
    pub fn is_compilation_artist(&self, artist: &str) -> bool {
        self.compilation_artists.iter().any(|name| name == artist)
    }
}

/// Configuration for Bandcamp storefront lookups.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BandcampConfig {
    /// First word of a comment line that references a storefront.
    pub reference_prefix: String,
    /// Domain suffix a storefront reference must end with.
    pub domain_suffix: String,
    /// Connect and read timeout in seconds.
    pub timeout_secs: u64,
}

/// Configuration for merging genres and backfilling the release year.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MergeConfig {
    /// Separator between genre terms in the GENRE tag.
    pub genre_separator: String,
    /// Genre term that marks a playlist file which must not be touched.
    pub playlist_marker: String,
    /// A leading genre term longer than this is considered a tagging artifact and dropped.
    pub max_first_genre_length: usize,
    /// Earliest release year that is considered plausible.
    pub min_plausible_year: i32,
    /// Latest release year that is considered plausible.
    pub max_plausible_year: i32,
}

impl MergeConfig {
    /// Check whether the year lies inside the plausible window.
    #[must_use]
    pub fn is_plausible_year(&self, year: i32) -> bool {
        (self.min_plausible_year..=self.max_plausible_year).contains(&year)
    }
}

/// Configuration for the directory scanner.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScannerConfig {
    /// Music folder that is used if no path is passed on the command line.
    pub music_folder: Option<PathBuf>,
    /// File extensions (case-insensitive) of files that will be tagged.
    pub extensions: Vec<String>,
}

/// The main configuration struct.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Discogs configuration.
    pub discogs: DiscogsConfig,
    /// Bandcamp configuration.
    pub bandcamp: BandcampConfig,
    /// Genre and date merge configuration.
    pub merge: MergeConfig,
    /// Scanner configuration.
    pub scanner: ScannerConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self::load_default().expect("Failed to load default config")
    }
}

impl Config {
    /// Create the config builder that only contains the embedded defaults.
    fn default_builder() -> ::config::ConfigBuilder<::config::builder::DefaultState> {
        ::config::Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
    }

    /// Load the default configuration.
    fn load_default() -> Result<Self, ConfigError> {
        let config = Self::default_builder().build()?.try_deserialize()?;
        Ok(config)
    }

    /// Find the user configuration file in the XDG config directories.
    fn find_user_config_file() -> Option<PathBuf> {
        xdg::BaseDirectories::with_prefix(APP_NAME).find_config_file(CONFIG_FILE_NAME)
    }

    /// Load the configuration from the file located at the given path (or the user configuration
    /// file if `None`), layered over the defaults and overridden by environment variables.
    ///
    /// # Errors
    ///
    /// This method can fail if the file cannot be accessed or if it contains malformed
    /// configuration markup.
    pub fn load(path: Option<&Path>) -> crate::Result<Self> {
        let mut builder = Self::default_builder();
        let path = path
            .map(Path::to_path_buf)
            .or_else(Self::find_user_config_file);
        if let Some(path) = path {
            log::debug!("Loading configuration from {}", path.display());
            builder = builder.add_source(File::from(path).format(FileFormat::Toml));
        }
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        );

        let config = builder
            .build()
            .and_then(::config::Config::try_deserialize)
            .map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Returns a copy of this configuration that is safe to print (i.e. without the token).
    #[must_use]
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        if config.discogs.token.is_some() {
            config.discogs.token = Some("<redacted>".to_string());
        }
        config
    }
}
