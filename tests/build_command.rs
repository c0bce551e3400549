#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::wildcard_imports,
    clippy::indexing_slicing
)]
//! Integration tests for building the merged output tree.

mod common;

use common::{Fixture, listing};
use modmerge_cli::logging::Logger;
use modmerge_cli::tasks::build::{BuildOutput, SCRATCH_DIR_NAME, build_output};
use modmerge_cli::tasks::{Task, TaskResult};

// ---------------------------------------------------------------------------
// Merge order
// ---------------------------------------------------------------------------

#[test]
fn last_overlay_wins_per_file() {
    let fx = Fixture::new();
    fx.overlay_file("A", "data/x.txt", "1")
        .overlay_file("B", "data/x.txt", "2");

    let (ctx, _log) = fx.context(false);
    assert_eq!(BuildOutput.run(&ctx).unwrap(), TaskResult::Ok);

    assert_eq!(
        std::fs::read_to_string(fx.output().join("data/x.txt")).unwrap(),
        "2"
    );
}

#[test]
fn mixed_overlays_merge_into_one_tree() {
    let fx = Fixture::new();
    fx.overlay_file("10-base", "data/config.ini", "base")
        .overlay_file("10-base", "textures/rock.dds", "rock-v1")
        .zip_overlay("20-hd.zip", &[("textures/rock.dds", b"rock-hd")])
        .overlay_file("30-fix", "data/config.ini", "fixed")
        .zip_overlay("40-levels.ZIP", &[("levels/intro.lvl", b"intro")]);
    std::fs::write(fx.mods().join("README.txt"), "not a mod").unwrap();

    let report = build_output(&fx.mods(), &fx.output(), &Logger::new("integration")).unwrap();

    assert_eq!(report.directories, 2);
    assert_eq!(report.archives, 2);
    assert_eq!(report.ignored, 1);
    insta::assert_snapshot!(listing(&fx.output()), @r"
    data/config.ini = fixed
    levels/intro.lvl = intro
    textures/rock.dds = rock-hd
    ");
}

// ---------------------------------------------------------------------------
// Archives
// ---------------------------------------------------------------------------

#[test]
fn archive_bytes_are_preserved_and_scratch_removed() {
    let fx = Fixture::new();
    let bytes: &[u8] = &[0x00, 0x9f, 0x92, 0x96, 0xff, b'\n'];
    fx.zip_overlay("C.zip", &[("levels/intro.lvl", bytes)]);

    build_output(&fx.mods(), &fx.output(), &Logger::new("integration")).unwrap();

    assert_eq!(
        std::fs::read(fx.output().join("levels/intro.lvl")).unwrap(),
        bytes
    );
    assert!(!fx.output().join(SCRATCH_DIR_NAME).exists());
}

#[test]
fn corrupt_archive_fails_the_task() {
    let fx = Fixture::new();
    std::fs::write(fx.mods().join("broken.zip"), "PK but not really").unwrap();

    let (ctx, _log) = fx.context(false);
    let err = BuildOutput.run(&ctx).unwrap_err();

    assert!(format!("{err:#}").contains("invalid zip archive"));
}

// ---------------------------------------------------------------------------
// Determinism
// ---------------------------------------------------------------------------

#[test]
fn rebuilding_produces_identical_tree() {
    let fx = Fixture::new();
    fx.overlay_file("A", "audio/a.ogg", "a")
        .overlay_file("B", "audio/a.ogg", "b")
        .zip_overlay("C.zip", &[("shaders/s.fx", b"shader")]);

    build_output(&fx.mods(), &fx.output(), &Logger::new("integration")).unwrap();
    let first = listing(&fx.output());
    std::fs::write(fx.output().join("stray.txt"), "left over").unwrap();
    build_output(&fx.mods(), &fx.output(), &Logger::new("integration")).unwrap();

    assert_eq!(first, listing(&fx.output()));
}

#[test]
fn missing_mods_directory_is_an_error() {
    let fx = Fixture::new();
    std::fs::remove_dir(fx.mods()).unwrap();

    let err = build_output(&fx.mods(), &fx.output(), &Logger::new("integration")).unwrap_err();

    assert!(err.to_string().contains("mods directory not found"));
}
