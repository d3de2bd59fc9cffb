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


//! Configuration model and persistence
//!
//! A [`Config`] composes one [`FsConfig`] (filesystem layout), one
//! [`DbConfig`] (store path and open flags) and one [`JackConfig`]
//! (audio-subsystem parameters, opaque to this crate). Configs persist as
//! human-editable TOML with `[fs]`, `[db]` and `[jack]` sections and
//! round-trip exactly through save/load. `Config::build` realizes the
//! directory layout the config describes.

pub mod file;
pub mod model;

pub use model::{Config, DbConfig, DbFlag, FsConfig, JackConfig};

/// Default project root, expanded against `$HOME` on resolution.
pub const DEFAULT_ROOT: &str = "~/shellac";
/// File name used when a config is saved to a directory path.
pub const CONFIG_FILE: &str = "shellac.toml";
/// Default catalog store file, kept under the project root.
pub const DB_FILE: &str = "shellac.db";
