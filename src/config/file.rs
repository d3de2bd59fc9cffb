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


//! Config persistence
//!
//! Configs are stored as pretty TOML. Saving writes to a temporary file in
//! the destination directory and renames it into place, so a crash
//! mid-write never leaves a truncated file at the destination. Loading
//! returns a new `Config` value; it never mutates an existing one.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::model::{expand_tilde, Config};
use super::CONFIG_FILE;
use crate::error::{Result, ShellacError};

impl Config {
    /// Serialize to TOML at `path`, overwriting atomically.
    ///
    /// If `path` is an existing directory the file is written as
    /// [`CONFIG_FILE`] inside it. Missing parent directories are created.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = expand_tilde(path);
        let path = if path.is_dir() {
            path.join(CONFIG_FILE)
        } else {
            path
        };
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let rendered = toml::to_string_pretty(self)?;
        let tmp = tmp_sibling(&path);
        fs::write(&tmp, rendered)?;
        fs::rename(&tmp, &path)?;
        debug!(path = %path.display(), "config saved");
        Ok(())
    }

    /// Load a config from `path`.
    ///
    /// Fails with [`ShellacError::ConfigNotFound`] when the file does not
    /// exist and [`ShellacError::ConfigParse`] when it is malformed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Config> {
        let path = expand_tilde(path);
        if !path.exists() {
            return Err(ShellacError::ConfigNotFound(path));
        }
        let content = fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&content)?;
        debug!(path = %path.display(), "config loaded");
        Ok(config)
    }
}

/// Temporary file next to `path`, on the same filesystem so the rename
/// stays atomic.
fn tmp_sibling(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| CONFIG_FILE.to_string());
    path.with_file_name(format!(".{name}.tmp"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::model::{DbConfig, DbFlag, FsConfig, JackConfig};

    fn sample_config(root: &Path) -> Config {
        let mut fs_cfg = FsConfig::new(root);
        fs_cfg.ext_tracks = Some(vec!["/mnt/vinyl".into()]);
        Config::new(
            fs_cfg,
            DbConfig::new(
                Some(root.join("catalog.db").to_string_lossy().into_owned()),
                vec![DbFlag::ReadWrite, DbFlag::Create],
            ),
            JackConfig::new(),
        )
    }

    #[test]
    fn test_round_trip() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let cfg = sample_config(tmp.path());
        let file = tmp.path().join("shellac.toml");

        cfg.save(&file).expect("save");
        let loaded = Config::load(&file).expect("load");

        assert_eq!(loaded, cfg);
    }

    #[test]
    fn test_save_to_directory_uses_default_name() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let cfg = Config::default();

        cfg.save(tmp.path()).expect("save");
        assert!(tmp.path().join(CONFIG_FILE).is_file());
    }

    #[test]
    fn test_save_leaves_no_temp_file() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let file = tmp.path().join("shellac.toml");
        Config::default().save(&file).expect("save");

        let entries: Vec<_> = fs::read_dir(tmp.path())
            .expect("read_dir")
            .map(|e| e.expect("entry").file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("shellac.toml")]);
    }

    #[test]
    fn test_save_overwrites_existing() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let file = tmp.path().join("shellac.toml");

        Config::default().save(&file).expect("first save");
        let cfg = sample_config(tmp.path());
        cfg.save(&file).expect("second save");

        assert_eq!(Config::load(&file).expect("load"), cfg);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load("/no/such/dir/shellac.toml").unwrap_err();
        assert!(matches!(err, ShellacError::ConfigNotFound(_)));
    }

    #[test]
    fn test_load_malformed_file() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let file = tmp.path().join("shellac.toml");
        fs::write(&file, "[fs]\nroot = not-a-string").expect("write");

        let err = Config::load(&file).unwrap_err();
        assert!(matches!(err, ShellacError::ConfigParse(_)));
    }

    #[test]
    fn test_load_rejects_unknown_flag_name() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let file = tmp.path().join("shellac.toml");
        fs::write(&file, "[db]\nflags = [\"turbo\"]\n").expect("write");

        let err = Config::load(&file).unwrap_err();
        assert!(matches!(err, ShellacError::ConfigParse(_)));
    }
}
