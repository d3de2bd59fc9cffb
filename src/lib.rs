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


//! Shellac core: an embedded media catalog and configuration resolver.
//!
//! Two independent subsystems share only a filesystem path convention:
//!
//! - [`config`] — compose a validated [`Config`] from filesystem, database
//!   and JACK sub-configs, persist it as TOML, and `build` the directory
//!   layout it describes.
//! - [`catalog`] — a SQLite-backed [`Catalog`] of tracks and their tags:
//!   open, idempotent init, structured inserts, and an atomic maintenance
//!   batch entry point.
//!
//! Every operation takes its config or handle explicitly; the crate holds
//! no process-wide state, so independent instances coexist freely in one
//! process. Handles release their store on drop — no paired free call. A
//! foreign-ABI shim, if one is exposed, lives outside this crate and is
//! responsible for its own ownership discipline at the boundary.
//!
//! ```no_run
//! use shellac_core::{Catalog, Config, DbConfig, FsConfig, JackConfig, NewTrackTags};
//!
//! # async fn example() -> shellac_core::Result<()> {
//! let cfg = Config::new(
//!     FsConfig::new("~/media"),
//!     DbConfig::default(),
//!     JackConfig::new(),
//! );
//! cfg.build()?;
//! cfg.save("~/media/shellac.toml")?;
//!
//! let catalog = Catalog::open(cfg.db.path().expect("path-backed store")).await?;
//! catalog.init().await?;
//! let id = catalog.insert_track("~/media/tracks/a.flac").await?;
//! catalog
//!     .insert_track_tags(
//!         id,
//!         &NewTrackTags::new(Some("Artist".into()), None, None, None, Some(1959)),
//!     )
//!     .await?;
//! catalog.close().await?;
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod config;
pub mod error;

pub use catalog::{Catalog, NewTrackTags, Track, TrackTags};
pub use config::{Config, DbConfig, DbFlag, FsConfig, JackConfig};
pub use error::{Result, ShellacError};
