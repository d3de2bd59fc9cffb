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


//! Catalog query functions
//!
//! Repository-style free functions over a pool. The [`Catalog`] handle
//! wraps these with its state check; they assume the schema exists.
//!
//! [`Catalog`]: crate::catalog::Catalog

use sqlx::{Executor, SqlitePool};
use tracing::debug;

use crate::catalog::models::{NewTrackTags, Track, TrackTags};
use crate::error::{Result, ShellacError};

/// Insert a new track row.
///
/// Returns the assigned track id (`AUTOINCREMENT`, so strictly greater
/// than every id this store has ever assigned).
pub async fn insert_track(pool: &SqlitePool, path: &str) -> Result<i64> {
    let result = sqlx::query("INSERT INTO Tracks (path) VALUES (?)")
        .bind(path)
        .execute(pool)
        .await?;

    let track_id = result.last_insert_rowid();
    debug!(track_id, path, "track inserted");
    Ok(track_id)
}

/// Insert or replace the single tags row for `track_id`.
///
/// The foreign key rejects unknown track ids; that rejection surfaces as
/// [`ShellacError::TrackNotFound`] with the tags table untouched.
/// Idempotent under identical input.
pub async fn insert_track_tags(
    pool: &SqlitePool,
    track_id: i64,
    tags: &NewTrackTags,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO TrackTags (track_id, artist, title, album, genre, year)
        VALUES (?, ?, ?, ?, ?, ?)
        ON CONFLICT(track_id) DO UPDATE SET
            artist = excluded.artist,
            title = excluded.title,
            album = excluded.album,
            genre = excluded.genre,
            year = excluded.year
        "#,
    )
    .bind(track_id)
    .bind(&tags.artist)
    .bind(&tags.title)
    .bind(&tags.album)
    .bind(&tags.genre)
    .bind(tags.year)
    .execute(pool)
    .await
    .map_err(|e| map_foreign_key_violation(e, track_id))?;

    Ok(())
}

/// Execute a caller-supplied statement sequence inside one transaction.
///
/// Either every statement's effects are committed or, on the first
/// failure, the transaction rolls back and nothing changed.
pub async fn exec_batch(pool: &SqlitePool, sql: &str) -> Result<()> {
    let mut tx = pool.begin().await?;

    if let Err(source) = (&mut *tx).execute(sql).await {
        // Explicit rollback; a failed rollback still drops the
        // transaction, which rolls back on drop.
        let _ = tx.rollback().await;
        return Err(ShellacError::BatchFailed { source });
    }

    tx.commit().await?;
    debug!("batch executed");
    Ok(())
}

/// Find track by id
pub async fn find_track(pool: &SqlitePool, track_id: i64) -> Result<Option<Track>> {
    let track = sqlx::query_as::<_, Track>(
        "SELECT track_id, path, created_at FROM Tracks WHERE track_id = ?",
    )
    .bind(track_id)
    .fetch_optional(pool)
    .await?;

    Ok(track)
}

/// Find all track observations for a source path, oldest first
pub async fn find_tracks_by_path(pool: &SqlitePool, path: &str) -> Result<Vec<Track>> {
    let tracks = sqlx::query_as::<_, Track>(
        "SELECT track_id, path, created_at FROM Tracks WHERE path = ? ORDER BY track_id",
    )
    .bind(path)
    .fetch_all(pool)
    .await?;

    Ok(tracks)
}

/// Find the tags row for a track, if one is attached
pub async fn find_track_tags(pool: &SqlitePool, track_id: i64) -> Result<Option<TrackTags>> {
    let tags = sqlx::query_as::<_, TrackTags>(
        "SELECT track_id, artist, title, album, genre, year FROM TrackTags WHERE track_id = ?",
    )
    .bind(track_id)
    .fetch_optional(pool)
    .await?;

    Ok(tags)
}

/// Number of track rows in the catalog
pub async fn count_tracks(pool: &SqlitePool) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM Tracks")
        .fetch_one(pool)
        .await?;

    Ok(count)
}

fn map_foreign_key_violation(err: sqlx::Error, track_id: i64) -> ShellacError {
    match &err {
        sqlx::Error::Database(db)
            if db.kind() == sqlx::error::ErrorKind::ForeignKeyViolation
                || db.message().contains("FOREIGN KEY constraint") =>
        {
            ShellacError::TrackNotFound(track_id)
        }
        _ => ShellacError::Sqlx(err),
    }
}
