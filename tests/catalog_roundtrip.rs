//! End-to-end flow over a file-backed store
//!
//! Exercises the lifecycle the crate is built around: compose a config,
//! build its layout, open a catalog at the configured store path, index
//! tracks and tags, close, and verify everything is durable on reopen.

use shellac_core::{Catalog, Config, DbConfig, DbFlag, FsConfig, JackConfig, NewTrackTags};

fn disk_config(root: &std::path::Path) -> Config {
    Config::new(
        FsConfig::new(root),
        DbConfig::new(
            Some(root.join("shellac.db").to_string_lossy().into_owned()),
            vec![DbFlag::ReadWrite, DbFlag::Create, DbFlag::NoMutex, DbFlag::Uri],
        ),
        JackConfig::new(),
    )
}

#[tokio::test]
async fn test_full_lifecycle_is_durable() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let root = tmp.path().join("media");
    let cfg = disk_config(&root);

    // Realize the layout, twice: the second build must be a no-op.
    cfg.build().expect("build");
    cfg.build().expect("rebuild");
    assert!(cfg.fs.resolve("tracks").expect("resolve").is_dir());

    // Persist the config next to the data and reload it.
    cfg.save(root.join("shellac.toml")).expect("save");
    let reloaded = Config::load(root.join("shellac.toml")).expect("load");
    assert_eq!(reloaded, cfg);

    // Index into the store the config points at.
    let db_path = reloaded.db.path().expect("path-backed store");
    let catalog = Catalog::open(&db_path).await.expect("open");
    catalog.init().await.expect("init");

    let id_a = catalog.insert_track("/media/tracks/a.flac").await.expect("insert a");
    let id_b = catalog.insert_track("/media/tracks/b.flac").await.expect("insert b");
    assert!(id_b > id_a);

    catalog
        .insert_track_tags(
            id_a,
            &NewTrackTags::new(
                Some("Mingus".into()),
                Some("Fables of Faubus".into()),
                Some("Mingus Ah Um".into()),
                Some("Jazz".into()),
                Some(1959),
            ),
        )
        .await
        .expect("tags");

    // Maintenance batch through the escape hatch.
    catalog
        .exec_batch("DELETE FROM TrackTags WHERE year < 1900;")
        .await
        .expect("batch");

    catalog.close().await.expect("close");

    // Everything committed must survive the reopen.
    let catalog = Catalog::open(&db_path).await.expect("reopen");
    assert!(catalog.is_initialized());
    assert_eq!(catalog.count_tracks().await.expect("count"), 2);

    let tags = catalog
        .find_track_tags(id_a)
        .await
        .expect("find tags")
        .expect("tags survived");
    assert_eq!(tags.artist.as_deref(), Some("Mingus"));
    assert_eq!(tags.year, Some(1959));

    // Ids keep increasing across handle lifetimes.
    let id_c = catalog.insert_track("/media/tracks/c.flac").await.expect("insert c");
    assert!(id_c > id_b);

    catalog.close().await.expect("close again");
}

#[tokio::test]
async fn test_failed_batch_leaves_file_store_unchanged() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let db_path = tmp.path().join("shellac.db");

    let catalog = Catalog::open(&db_path).await.expect("open");
    catalog.init().await.expect("init");
    let id = catalog.insert_track("/media/tracks/a.flac").await.expect("insert");
    catalog
        .insert_track_tags(id, &NewTrackTags::new(Some("A".into()), None, None, None, None))
        .await
        .expect("tags");

    let err = catalog
        .exec_batch(
            "INSERT INTO Tracks (path) VALUES ('/media/tracks/b.flac');
             DELETE FROM TrackTags;
             SYNTAX ERROR HERE;",
        )
        .await
        .expect_err("batch must fail");
    assert!(matches!(err, shellac_core::ShellacError::BatchFailed { .. }));

    // Neither the insert nor the delete may have stuck.
    assert_eq!(catalog.count_tracks().await.expect("count"), 1);
    assert!(catalog
        .find_track_tags(id)
        .await
        .expect("find tags")
        .is_some());

    catalog.close().await.expect("close");
}

#[tokio::test]
async fn test_two_independent_catalogs_in_one_process() {
    let tmp = tempfile::tempdir().expect("tempdir");

    let left = Catalog::open(tmp.path().join("left.db")).await.expect("open left");
    let right = Catalog::open(tmp.path().join("right.db")).await.expect("open right");
    left.init().await.expect("init left");
    right.init().await.expect("init right");

    // Identifier sequences are catalog-scoped.
    assert_eq!(left.insert_track("/m/a.flac").await.expect("insert"), 1);
    assert_eq!(left.insert_track("/m/b.flac").await.expect("insert"), 2);
    assert_eq!(right.insert_track("/m/a.flac").await.expect("insert"), 1);

    left.close().await.expect("close left");
    right.close().await.expect("close right");
}
