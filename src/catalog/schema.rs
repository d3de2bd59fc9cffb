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


//! Catalog schema creation
//!
//! Schema is created at runtime and tracked in the `_migrations` table, so
//! running it against an already-initialized store is a no-op and existing
//! rows are never touched.

use sqlx::{Executor, SqlitePool};

use crate::error::Result;

/// Create the catalog schema if it does not exist yet.
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    create_migrations_table(pool).await?;
    run_migration(pool, 1, "catalog_schema", create_catalog_schema(pool)).await?;
    Ok(())
}

/// Whether the catalog schema is already present in this store.
pub(crate) async fn schema_present(pool: &SqlitePool) -> Result<bool> {
    let found: Option<String> = sqlx::query_scalar(
        "SELECT name FROM sqlite_master WHERE type = 'table' AND name = 'Tracks'",
    )
    .fetch_optional(pool)
    .await?;

    Ok(found.is_some())
}

/// Create migrations tracking table
async fn create_migrations_table(pool: &SqlitePool) -> Result<()> {
    pool.execute(
        r#"
        CREATE TABLE IF NOT EXISTS _migrations (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            applied_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .await?;

    Ok(())
}

/// Run a single migration if it hasn't been applied yet
async fn run_migration(
    pool: &SqlitePool,
    id: i32,
    name: &str,
    migration_fn: impl std::future::Future<Output = Result<()>>,
) -> Result<()> {
    let applied: Option<i32> = sqlx::query_scalar("SELECT id FROM _migrations WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    if applied.is_some() {
        return Ok(());
    }

    migration_fn.await?;

    sqlx::query("INSERT INTO _migrations (id, name) VALUES (?, ?)")
        .bind(id)
        .bind(name)
        .execute(pool)
        .await?;

    Ok(())
}

/// Initial catalog schema.
///
/// `AUTOINCREMENT` on `Tracks` keeps identifiers strictly increasing and
/// forbids rowid reuse after deletion. `TrackTags` is keyed by the track
/// id, which gives the at-most-one-row-per-track constraint directly.
async fn create_catalog_schema(pool: &SqlitePool) -> Result<()> {
    pool.execute(
        r#"
-- Tracks: one row per indexed media source
CREATE TABLE IF NOT EXISTS Tracks (
    track_id INTEGER PRIMARY KEY AUTOINCREMENT,
    path TEXT NOT NULL,
    created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
);

-- Lookup by source path
CREATE INDEX IF NOT EXISTS idx_tracks_path ON Tracks(path);

-- TrackTags: at most one metadata row per track
CREATE TABLE IF NOT EXISTS TrackTags (
    track_id INTEGER PRIMARY KEY
        REFERENCES Tracks(track_id) ON DELETE CASCADE,
    artist TEXT,
    title TEXT,
    album TEXT,
    genre TEXT,
    year INTEGER
);
        "#,
    )
    .await?;

    Ok(())
}
