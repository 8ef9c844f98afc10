// Copyright (c) 2025 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Module for the `tag` CLI subcommand.

use crate::bandcamp::BandcampClient;
use crate::config::ConfigError;
use crate::discogs::DiscogsClient;
use crate::enricher::Enricher;
use crate::scanner;
use crate::Config;
use clap::Parser;
use std::path::PathBuf;

/// Command line arguments for the `tag` CLI command.
#[derive(Parser, Debug)]
pub struct Args {
    /// Music folder to tag (defaults to `scanner.music_folder` from the configuration).
    pub path: Option<PathBuf>,
    /// Only log the changes, do not write any files.
    #[arg(short = 'n', long)]
    pub dry_run: bool,
}

/// Run the `tag` command.
///
/// # Errors
///
/// Returns an error if no music folder is given, the Discogs token is missing or the music folder
/// cannot be read. Errors on individual files are only logged.
pub fn run(config: Config, args: Args) -> crate::Result<()> {
    let path = args
        .path
        .or_else(|| config.scanner.music_folder.clone())
        .ok_or(ConfigError::MissingMusicFolder)?;
    let extensions = config.scanner.extensions.clone();

    let catalog = DiscogsClient::new(&config.discogs)?;
    let storefront = BandcampClient::new(&config.bandcamp);
    let mut enricher = Enricher::new(config, catalog, storefront).with_dry_run(args.dry_run);

    let _summary = scanner::scan(&mut enricher, path, &extensions)?;
    Ok(())
}
