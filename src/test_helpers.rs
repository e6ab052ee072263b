//! Shared test utilities for the matbook test suite.
//!
//! Fixtures are built programmatically: every test writes exactly the drop
//! folder it needs into an isolated temp directory, so tests can mutate
//! freely without affecting each other.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

use crate::config::GenConfig;

/// Create a temp workspace with a `programs/` drop folder holding `files`.
pub fn setup_source(files: &[(&str, &str)]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    let source = tmp.path().join("programs");
    fs::create_dir_all(&source).unwrap();
    for (name, content) in files {
        fs::write(source.join(name), content).unwrap();
    }
    tmp
}

/// Config pointing at the workspace's `programs/` and `site/` directories.
pub fn test_config(tmp: &TempDir) -> GenConfig {
    GenConfig {
        source: tmp.path().join("programs"),
        output: tmp.path().join("site"),
        ..GenConfig::default()
    }
}

/// Snapshot every file under `root` as relative path → bytes.
///
/// Used for byte-identical idempotence comparisons across runs.
pub fn snapshot_tree(root: &Path) -> BTreeMap<String, Vec<u8>> {
    let mut snapshot = BTreeMap::new();
    if root.exists() {
        collect_files(root, root, &mut snapshot);
    }
    snapshot
}

fn collect_files(root: &Path, dir: &Path, snapshot: &mut BTreeMap<String, Vec<u8>>) {
    for entry in fs::read_dir(dir).unwrap() {
        let path = entry.unwrap().path();
        if path.is_dir() {
            collect_files(root, &path, snapshot);
        } else {
            let rel = path
                .strip_prefix(root)
                .unwrap()
                .to_string_lossy()
                .into_owned();
            snapshot.insert(rel, fs::read(&path).unwrap());
        }
    }
}
