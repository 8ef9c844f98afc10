// Copyright (c) 2025 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Resolvers that look up new genre terms for a track.
//!
//! Each resolver owns the cache for its source, so that tracks that share a release or a
//! storefront only cause a single lookup per run.

mod genre;
mod storefront;

pub use genre::GenreResolver;
pub use storefront::{find_storefront_reference, StorefrontOutcome, StorefrontResolver};
