// Copyright (c) 2024 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Time-related utility functions.

use chrono::{Datelike, NaiveDate};

/// Date format used for full dates in tags (e.g. written by MusicBrainz Picard).
const FULL_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse the year from a date tag value.
///
/// Values containing a `-` must be full `YYYY-MM-DD` dates, all other values must be a bare year.
/// Returns `None` if the value cannot be parsed.
#[must_use]
pub fn parse_year_from_str(value: &str) -> Option<i32> {
    let value = value.trim();
    if value.contains('-') {
        NaiveDate::parse_from_str(value, FULL_DATE_FORMAT)
            .ok()
            .map(|date| date.year())
    } else {
        value.parse().ok()
    }
}
