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


//! Catalog handle and connection management
//!
//! # SQLite configuration
//! - WAL mode for better concurrency
//! - Foreign keys enabled (tag attachment is rejected by constraint)
//! - Normal synchronous mode (balance safety/speed)
//! - Busy timeout so concurrent writers queue instead of failing
//!
//! A handle starts in the `Created` state; [`Catalog::init`] moves it to
//! `Initialized`. Data operations on a non-initialized handle fail with
//! [`ShellacError::NotInitialized`] — there is no lazy auto-init, so an
//! insert can never run against a half-created schema. A store whose
//! schema already exists on disk opens directly in `Initialized`.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions},
    ConnectOptions,
};
use tracing::{debug, info};

use crate::catalog::models::{NewTrackTags, Track, TrackTags};
use crate::catalog::{queries, schema};
use crate::error::{Result, ShellacError};

/// Handle to one backing store.
///
/// Cloning shares the same pool and state; the store is released when the
/// last clone is dropped, or explicitly flushed via [`Catalog::close`].
#[derive(Debug, Clone)]
pub struct Catalog {
    pool: SqlitePool,
    path: Option<PathBuf>, // None for in-memory stores
    initialized: Arc<AtomicBool>,
}

impl Catalog {
    /// Open or create the backing store at `path` without touching schema.
    ///
    /// The parent directory is created if missing. Whether the handle
    /// starts initialized depends on the store: a fresh file needs
    /// [`Catalog::init`], a store that already carries the schema does not.
    pub async fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let connection_string = format!("sqlite://{}?mode=rwc", path.display());
        let mut connect_opts = SqliteConnectOptions::from_str(&connection_string)?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .foreign_keys(true)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(30));

        connect_opts = connect_opts.disable_statement_logging();

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(30))
            .connect_with(connect_opts)
            .await?;

        let initialized = schema::schema_present(&pool).await?;
        debug!(path = %path.display(), initialized, "catalog opened");

        Ok(Self {
            pool,
            path: Some(path.to_path_buf()),
            initialized: Arc::new(AtomicBool::new(initialized)),
        })
    }

    /// Open an ephemeral in-memory store, discarded on close.
    pub async fn open_in_memory() -> Result<Self> {
        let connect_opts = SqliteConnectOptions::from_str("sqlite::memory:")?
            .foreign_keys(true)
            .disable_statement_logging();

        // A single connection: each sqlite in-memory connection is its own
        // database. The pool must never recycle it — a reaped connection
        // would reconnect to a fresh, empty database mid-lifetime.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(connect_opts)
            .await?;

        Ok(Self {
            pool,
            path: None,
            initialized: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Create the catalog schema.
    ///
    /// Idempotent: calling this on an already-initialized store is a
    /// no-op and never clears existing rows.
    pub async fn init(&self) -> Result<()> {
        schema::run_migrations(&self.pool).await?;
        self.initialized.store(true, Ordering::SeqCst);
        info!("catalog initialized");
        Ok(())
    }

    /// Whether the schema exists and data operations are allowed.
    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::SeqCst)
    }

    fn ensure_initialized(&self) -> Result<()> {
        if self.is_initialized() {
            Ok(())
        } else {
            Err(ShellacError::NotInitialized)
        }
    }

    /// Insert a track observation, returning its assigned identifier.
    ///
    /// Identifiers are strictly greater than every previously assigned one
    /// for this store. Paths are not deduplicated.
    pub async fn insert_track(&self, path: &str) -> Result<i64> {
        self.ensure_initialized()?;
        queries::insert_track(&self.pool, path).await
    }

    /// Insert or replace the tags row for `track_id`.
    ///
    /// Fails with [`ShellacError::TrackNotFound`] when no such track
    /// exists, leaving the tags table unchanged.
    pub async fn insert_track_tags(&self, track_id: i64, tags: &NewTrackTags) -> Result<()> {
        self.ensure_initialized()?;
        queries::insert_track_tags(&self.pool, track_id, tags).await
    }

    /// Execute a caller-supplied statement sequence as one transaction.
    ///
    /// All-or-nothing: on any statement failure the whole batch rolls back
    /// and the store is exactly as before. The statements are trusted and
    /// not inspected; this is the maintenance escape hatch, not the
    /// structured insert path. No result rows are returned.
    pub async fn exec_batch(&self, sql: &str) -> Result<()> {
        self.ensure_initialized()?;
        queries::exec_batch(&self.pool, sql).await
    }

    pub async fn find_track(&self, track_id: i64) -> Result<Option<Track>> {
        self.ensure_initialized()?;
        queries::find_track(&self.pool, track_id).await
    }

    pub async fn find_tracks_by_path(&self, path: &str) -> Result<Vec<Track>> {
        self.ensure_initialized()?;
        queries::find_tracks_by_path(&self.pool, path).await
    }

    pub async fn find_track_tags(&self, track_id: i64) -> Result<Option<TrackTags>> {
        self.ensure_initialized()?;
        queries::find_track_tags(&self.pool, track_id).await
    }

    pub async fn count_tracks(&self) -> Result<i64> {
        self.ensure_initialized()?;
        queries::count_tracks(&self.pool).await
    }

    /// Get reference to the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Store file path; `None` for in-memory stores
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Flush and release the store.
    ///
    /// For a path-backed store the WAL is checkpointed first, so every
    /// committed insert and batch is durable in the main database file
    /// when this returns. An in-memory store is simply discarded.
    pub async fn close(self) -> Result<()> {
        if self.path.is_some() {
            sqlx::query("PRAGMA wal_checkpoint(TRUNCATE)")
                .execute(&self.pool)
                .await?;
        }
        self.pool.close().await;
        Ok(())
    }
}
