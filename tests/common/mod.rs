// Shared helpers for integration tests.
//
// Provides a temporary game directory with a `builder/` root inside it and
// helpers to lay out overlays, so each integration test gets an isolated
// environment without repeating filesystem boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use modmerge_cli::config::{Config, Overrides};
use modmerge_cli::logging::{Log, Logger};
use modmerge_cli::tasks::Context;

/// An isolated game directory backed by a [`tempfile::TempDir`].
///
/// Layout: `<tmp>/` is the game directory (the deployment target) and
/// `<tmp>/builder/` is the root holding `mods/` and `output/`.
pub struct Fixture {
    /// Temporary game directory.
    pub dir: tempfile::TempDir,
}

impl Fixture {
    /// Create the game directory with an empty `builder/mods/`.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        fs::create_dir_all(dir.path().join("builder/mods")).expect("create mods dir");
        Self { dir }
    }

    /// The deployment target.
    pub fn game(&self) -> PathBuf {
        dunce::canonicalize(self.dir.path()).expect("canonical game dir")
    }

    /// The root directory.
    pub fn builder(&self) -> PathBuf {
        self.game().join("builder")
    }

    /// The overlay directory.
    pub fn mods(&self) -> PathBuf {
        self.builder().join("mods")
    }

    /// The output tree.
    pub fn output(&self) -> PathBuf {
        self.builder().join("output")
    }

    /// Write `contents` to `mods/<overlay>/<relative>`.
    pub fn overlay_file(&self, overlay: &str, relative: &str, contents: &str) -> &Self {
        let path = self.mods().join(overlay).join(relative);
        fs::create_dir_all(path.parent().expect("parent")).expect("create overlay dirs");
        fs::write(&path, contents).expect("write overlay file");
        self
    }

    /// Write a zip overlay `mods/<name>` containing `files`.
    pub fn zip_overlay(&self, name: &str, files: &[(&str, &[u8])]) -> &Self {
        let file = fs::File::create(self.mods().join(name)).expect("create zip");
        let mut writer = zip::ZipWriter::new(file);
        let options = zip::write::SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Deflated);
        for (entry, bytes) in files {
            writer.start_file(*entry, options).expect("start zip entry");
            writer.write_all(bytes).expect("write zip entry");
        }
        writer.finish().expect("finish zip");
        self
    }

    /// Load the configuration the way the CLI does, with no overrides.
    pub fn config(&self) -> Config {
        Config::load(&self.builder(), &Overrides::default()).expect("load config")
    }

    /// Build a task [`Context`] over [`Fixture::config`].
    pub fn context(&self, dry_run: bool) -> (Context, Arc<Logger>) {
        let log = Arc::new(Logger::new("integration"));
        let ctx = Context::new(self.config(), Arc::clone(&log) as Arc<dyn Log>, dry_run);
        (ctx, log)
    }
}

/// List every file under `root` as `relative/path = contents`, sorted.
pub fn listing(root: &Path) -> String {
    let mut lines: Vec<String> = walkdir::WalkDir::new(root)
        .into_iter()
        .map(|e| e.expect("walk entry"))
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            let rel = e.path().strip_prefix(root).expect("strip prefix");
            let rel = rel.to_string_lossy().replace('\\', "/");
            let contents = fs::read_to_string(e.path()).unwrap_or_else(|_| "<binary>".into());
            format!("{rel} = {contents}")
        })
        .collect();
    lines.sort();
    lines.join("\n")
}
