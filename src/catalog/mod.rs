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


//! Media catalog storage
//!
//! A [`Catalog`] owns one SQLite-backed store of tracks and their tags.
//! Opening a catalog does not touch the schema; [`Catalog::init`] is the
//! separate, idempotent step that creates it. Structured inserts go through
//! typed operations; [`Catalog::exec_batch`] is the marked maintenance
//! escape hatch that only guarantees transactional wrapping.
//!
//! # Schema
//! - `Tracks`: one row per indexed media source (append-only; ids
//!   monotonically increasing, never reused)
//! - `TrackTags`: at most one descriptive-metadata row per track
//! - `_migrations`: schema-creation tracking

pub mod database;
pub mod models;
pub mod queries;
pub mod schema;

// Re-export commonly used types
pub use database::Catalog;
pub use models::{NewTrackTags, Track, TrackTags};
