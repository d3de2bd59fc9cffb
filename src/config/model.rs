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


//! Configuration types
//!
//! Sub-configs are plain serde structs. `DbConfig` and `JackConfig` keep
//! their fields private so a value cannot be mutated after construction;
//! `FsConfig` exposes its root plus optional user-defined external
//! directory lists.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{DB_FILE, DEFAULT_ROOT};
use crate::error::{Result, ShellacError};

/// Directories created under the root by `Config::build`, and the
/// recognized keys of `FsConfig::resolve` besides `"root"`.
const SUBDIRS: [&str; 5] = ["tracks", "samples", "projects", "plugins", "patches"];

/// Expand a leading `~` against `$HOME`.
///
/// Falls back to the current directory when `$HOME` is unset so that
/// resolution stays total and deterministic.
pub(crate) fn expand_tilde<P: AsRef<Path>>(path: P) -> PathBuf {
    let p = path.as_ref();
    match p.strip_prefix("~") {
        Ok(rest) => {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(rest)
        }
        Err(_) => p.to_path_buf(),
    }
}

/// Filesystem layout config. Internal directories live under ROOT;
/// external directories are optional and user-defined.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct FsConfig {
    pub root: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ext_samples: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ext_tracks: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ext_projects: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ext_plugins: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ext_patches: Option<Vec<String>>,
}

impl Default for FsConfig {
    fn default() -> Self {
        FsConfig {
            root: DEFAULT_ROOT.into(),
            ext_samples: None,
            ext_tracks: None,
            ext_projects: None,
            ext_plugins: None,
            ext_patches: None,
        }
    }
}

impl FsConfig {
    /// Construct a layout rooted at `root`. Falls back to the default root
    /// when the path is not valid UTF-8.
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        let root = root
            .as_ref()
            .to_str()
            .unwrap_or(DEFAULT_ROOT)
            .to_string();
        FsConfig {
            root,
            ..Default::default()
        }
    }

    /// The canonical root, tilde-expanded.
    pub fn root(&self) -> PathBuf {
        expand_tilde(&self.root)
    }

    /// Resolve a logical key to an absolute path under the root.
    ///
    /// Resolution is pure naming: it never checks that the target exists.
    /// Unrecognized keys fail with [`ShellacError::UnknownKey`] rather than
    /// silently returning the root.
    pub fn resolve(&self, key: &str) -> Result<PathBuf> {
        match key {
            "root" => Ok(self.root()),
            k if SUBDIRS.contains(&k) => Ok(self.root().join(k)),
            other => Err(ShellacError::UnknownKey(other.to_string())),
        }
    }

    /// User-defined external directories for a key, if any are configured.
    pub fn ext_paths(&self, key: &str) -> Option<Vec<PathBuf>> {
        let list = match key {
            "samples" => &self.ext_samples,
            "tracks" => &self.ext_tracks,
            "projects" => &self.ext_projects,
            "plugins" => &self.ext_plugins,
            "patches" => &self.ext_patches,
            _ => return None,
        };
        list.as_ref()
            .map(|ps| ps.iter().map(PathBuf::from).collect())
    }
}

/// Named store-open flags, mirroring SQLite's open flags.
///
/// Persisted configs carry these as a list of lowercase names; an
/// unrecognized name is a parse error, not a silent skip.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DbFlag {
    ReadOnly,
    ReadWrite,
    Create,
    Uri,
    Memory,
    NoMutex,
    FullMutex,
}

impl DbFlag {
    /// The SQLite open-flag value for this name.
    pub fn bits(self) -> i32 {
        match self {
            DbFlag::ReadOnly => 0x0000_0001,
            DbFlag::ReadWrite => 0x0000_0002,
            DbFlag::Create => 0x0000_0004,
            DbFlag::Uri => 0x0000_0040,
            DbFlag::Memory => 0x0000_0080,
            DbFlag::NoMutex => 0x0000_8000,
            DbFlag::FullMutex => 0x0001_0000,
        }
    }
}

/// Database config: where the catalog store lives and how it is opened.
/// Immutable after construction.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct DbConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<String>,
    flags: Vec<DbFlag>,
}

impl Default for DbConfig {
    fn default() -> Self {
        DbConfig {
            path: Some(format!("{DEFAULT_ROOT}/{DB_FILE}")),
            flags: vec![DbFlag::ReadWrite, DbFlag::Create, DbFlag::NoMutex, DbFlag::Uri],
        }
    }
}

impl DbConfig {
    pub fn new(path: Option<String>, flags: Vec<DbFlag>) -> Self {
        DbConfig { path, flags }
    }

    /// Combined open-flag bitmask, returned by value.
    ///
    /// Bitwise-or, so a flag listed twice in a hand-edited file still
    /// contributes its bit exactly once.
    pub fn flags(&self) -> i32 {
        self.flags.iter().fold(0, |mask, f| mask | f.bits())
    }

    /// Store path, tilde-expanded. `None` means an ephemeral store.
    pub fn path(&self) -> Option<PathBuf> {
        self.path.as_deref().map(expand_tilde)
    }
}

/// JACK audio-subsystem config. Opaque to this crate: the fields are
/// carried through (de)serialization for the audio layer to consume.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct JackConfig {
    name: String,
    audio: String,
    midi: String,
    device: String,
    realtime: bool,
    rate: u32,
    period: u16,
    n_periods: u8,
}

impl Default for JackConfig {
    fn default() -> Self {
        JackConfig {
            name: "shellac".into(),
            audio: "alsa".into(),
            midi: "seq".into(),
            device: "default".into(),
            realtime: true,
            rate: 44100,
            period: 1024,
            n_periods: 2,
        }
    }
}

impl JackConfig {
    pub fn new() -> Self {
        JackConfig::default()
    }

    /// JACK client name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sample rate in Hz.
    pub fn rate(&self) -> u32 {
        self.rate
    }
}

/// Shellac configuration: one filesystem layout, one database config, one
/// JACK config. Owns all three exclusively.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub fs: FsConfig,
    pub db: DbConfig,
    pub jack: JackConfig,
}

impl Config {
    /// Compose a config from its three parts.
    pub fn new(fs: FsConfig, db: DbConfig, jack: JackConfig) -> Config {
        Config { fs, db, jack }
    }

    /// Option-accepting composition for callers assembling parts that may
    /// be absent (e.g. a null-tolerant binding layer). Fails with
    /// [`ShellacError::MissingComponent`] naming the first missing part.
    pub fn compose(
        fs: Option<FsConfig>,
        db: Option<DbConfig>,
        jack: Option<JackConfig>,
    ) -> Result<Config> {
        let fs = fs.ok_or(ShellacError::MissingComponent("fs"))?;
        let db = db.ok_or(ShellacError::MissingComponent("db"))?;
        let jack = jack.ok_or(ShellacError::MissingComponent("jack"))?;
        Ok(Config::new(fs, db, jack))
    }

    /// Realize the on-disk layout this config describes.
    ///
    /// Creates the root, every directory `resolve` recognizes, and the
    /// parent directory of the configured store path. Idempotent: existing
    /// directories count as success, so a second call is a no-op.
    pub fn build(&self) -> Result<()> {
        let root = self.fs.root();
        fs::create_dir_all(&root)?;
        for dir in SUBDIRS {
            fs::create_dir_all(root.join(dir))?;
        }
        if let Some(db_path) = self.db.path() {
            if let Some(parent) = db_path.parent() {
                fs::create_dir_all(parent)?;
            }
        }
        debug!(root = %root.display(), "config layout built");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_recognized_keys() {
        let fs = FsConfig::new("/srv/media");
        assert_eq!(fs.resolve("root").unwrap(), PathBuf::from("/srv/media"));
        assert_eq!(
            fs.resolve("tracks").unwrap(),
            PathBuf::from("/srv/media/tracks")
        );
        assert_eq!(
            fs.resolve("patches").unwrap(),
            PathBuf::from("/srv/media/patches")
        );
    }

    #[test]
    fn test_resolve_unknown_key() {
        let fs = FsConfig::default();
        let err = fs.resolve("no-such-key").unwrap_err();
        assert!(matches!(err, ShellacError::UnknownKey(ref k) if k == "no-such-key"));
    }

    #[test]
    fn test_default_db_flags() {
        let db = DbConfig::default();
        // readwrite | create | nomutex | uri
        assert_eq!(db.flags(), 0x2 + 0x4 + 0x8000 + 0x40);
    }

    #[test]
    fn test_repeated_db_flag_counts_once() {
        let db = DbConfig::new(None, vec![DbFlag::Create, DbFlag::Create]);
        assert_eq!(db.flags(), 0x4);
    }

    #[test]
    fn test_custom_db_flags() {
        let db = DbConfig::new(None, vec![DbFlag::ReadOnly, DbFlag::Memory]);
        assert_eq!(db.flags(), 0x1 + 0x80);
        assert_eq!(db.path(), None);
    }

    #[test]
    fn test_compose_requires_all_parts() {
        let err = Config::compose(Some(FsConfig::default()), None, Some(JackConfig::new()))
            .unwrap_err();
        assert!(matches!(err, ShellacError::MissingComponent("db")));

        let cfg = Config::compose(
            Some(FsConfig::default()),
            Some(DbConfig::default()),
            Some(JackConfig::new()),
        )
        .unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn test_ext_paths() {
        let mut fs = FsConfig::default();
        fs.ext_tracks = Some(vec!["/mnt/a".into(), "/mnt/b".into()]);
        let paths = fs.ext_paths("tracks").unwrap();
        assert_eq!(paths, vec![PathBuf::from("/mnt/a"), PathBuf::from("/mnt/b")]);
        assert!(fs.ext_paths("samples").is_none());
        assert!(fs.ext_paths("bogus").is_none());
    }

    #[test]
    fn test_build_is_idempotent() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let root = tmp.path().join("media");
        let cfg = Config::new(
            FsConfig::new(&root),
            DbConfig::new(
                Some(root.join("catalog.db").to_string_lossy().into_owned()),
                vec![DbFlag::ReadWrite, DbFlag::Create],
            ),
            JackConfig::new(),
        );

        cfg.build().expect("first build");
        for key in ["root", "tracks", "samples", "projects", "plugins", "patches"] {
            assert!(cfg.fs.resolve(key).unwrap().is_dir(), "missing {key}");
        }

        // Second call must succeed with identical state.
        cfg.build().expect("second build");
        assert!(root.join("tracks").is_dir());
    }
}
