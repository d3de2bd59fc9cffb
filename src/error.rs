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


//! Error types for Shellac
//!
//! One thiserror enum covers both subsystems, grouped by domain: config
//! resolution and persistence on one side, catalog operations on the other.
//! External driver errors (`sqlx`, `std::io`, `toml`) convert via `#[from]`
//! so call sites can use `?` throughout. Every failure is surfaced as a
//! value; nothing here aborts the process.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using our ShellacError type
pub type Result<T> = std::result::Result<T, ShellacError>;

/// Main error type for Shellac
#[derive(Error, Debug)]
pub enum ShellacError {
    // ===== Configuration Errors =====

    /// Config file does not exist at the given path
    #[error("config file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    /// Persisted config file is malformed
    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Config could not be serialized for writing
    #[error("config encode error: {0}")]
    ConfigEncode(#[from] toml::ser::Error),

    /// A required sub-config was absent at composition time
    #[error("missing config component: {0}")]
    MissingComponent(&'static str),

    /// Path resolution was asked for a key the layout does not define
    #[error("unknown path key: {0}")]
    UnknownKey(String),

    // ===== Catalog Errors =====

    /// Catalog operation attempted before the schema exists
    #[error("catalog not initialized (call init first)")]
    NotInitialized,

    /// Tags were attached to a track id that does not exist
    #[error("no track with id {0}")]
    TrackNotFound(i64),

    /// A statement in a batch failed; the whole batch was rolled back
    #[error("batch execution failed and was rolled back: {source}")]
    BatchFailed {
        #[source]
        source: sqlx::Error,
    },

    // ===== External Library Errors =====

    /// Database driver error from sqlx
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
