// Shellac - Embedded Media Catalog
// Copyright (C) 2026 Shellac contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.


//! Catalog row types

use chrono::NaiveDateTime;
use sqlx::FromRow;

/// One indexed media source.
///
/// Tracks are insert-only observations, not a set keyed by path: indexing
/// the same path twice yields two rows with distinct ids.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Track {
    /// Catalog-scoped identifier, assigned on insert. Strictly increasing
    /// and never reused, even after a row is removed.
    pub track_id: i64,
    /// Source path as given at insert time.
    pub path: String,
    pub created_at: NaiveDateTime,
}

/// Descriptive metadata for one track. At most one row per track.
///
/// Absent string fields are `None`, which is distinct from an empty
/// string the caller stored deliberately.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct TrackTags {
    pub track_id: i64,
    pub artist: Option<String>,
    pub title: Option<String>,
    pub album: Option<String>,
    pub genre: Option<String>,
    /// Release year; `None` means unknown.
    pub year: Option<i16>,
}

/// Tag values for insert-or-replace, without the track id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTrackTags {
    pub artist: Option<String>,
    pub title: Option<String>,
    pub album: Option<String>,
    pub genre: Option<String>,
    pub year: Option<i16>,
}

impl NewTrackTags {
    pub fn new(
        artist: Option<String>,
        title: Option<String>,
        album: Option<String>,
        genre: Option<String>,
        year: Option<i16>,
    ) -> Self {
        NewTrackTags {
            artist,
            title,
            album,
            genre,
            year,
        }
    }
}
