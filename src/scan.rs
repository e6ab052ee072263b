//! Source enumeration and program grouping.
//!
//! Stage 1 of the matbook pipeline. Walks the drop folder, classifies every
//! file, and groups format siblings into logical programs, producing a
//! [`Manifest`] that the planning and rendering stages consume.
//!
//! ## Drop folder layout
//!
//! The folder is flat by convention; `--recursive` also picks up files in
//! subdirectories. Directory structure never affects classification — only
//! the base name and extension matter:
//!
//! ```text
//! programs/
//! ├── matbook.toml             # Generator config (optional, never scanned)
//! ├── README.md                # Introduction page source (never scanned)
//! ├── Chapt1Exercise8.m        # Exercise program, chapter 1
//! ├── Chapt3Exercise10.m       # One logical program in three formats:
//! ├── Chapt3Exercise10.pdf     #   all grouped under Chapt3Exercise10
//! ├── Chapt3Exercise10.tex
//! ├── Chapt5Fig2a.m            # Figure program, variant a
//! ├── fermi.m                  # No grammar match → utility program
//! └── notes.docx               # Unsupported extension → skipped
//! ```
//!
//! ## Grouping rules
//!
//! - The grouping key is the `program_id` — never the raw filename and never
//!   the extension. All files sharing a base name share a group.
//! - A supported file whose name does not match the grammar becomes a
//!   utility program keyed by its exact base name, one per base name.
//! - Unsupported extensions are recorded as skips, never errors.
//! - Groups are materialized in explicit (chapter, program id) order before
//!   anything downstream runs; nothing relies on map iteration order.
//!
//! Duplicate filenames across subdirectories (recursive mode) collapse to
//! one member at copy time, last one encountered wins.

use crate::filetype::{self, FileTypeDescriptor};
use crate::naming::{self, ProgramIdentity};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("source directory not found: {0}")]
    MissingRoot(PathBuf),
}

/// One physical source file, owned by exactly one program group.
#[derive(Debug, Clone)]
pub struct MemberFile {
    /// Filename including extension, e.g. `Chapt3Exercise10.m`.
    pub file_name: String,
    /// Path relative to the source root, used to locate the original bytes.
    pub source_path: PathBuf,
    pub descriptor: &'static FileTypeDescriptor,
}

/// All format variants of one logical program.
#[derive(Debug, Clone)]
pub struct ProgramGroup {
    pub identity: ProgramIdentity,
    /// Members in discovery order; the planner re-sorts by display priority.
    pub members: Vec<MemberFile>,
}

/// Why an input file produced no output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    UnsupportedExtension,
    Io(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::UnsupportedExtension => write!(f, "unsupported extension"),
            SkipReason::Io(msg) => write!(f, "io error: {msg}"),
        }
    }
}

/// A skipped input file and the reason it was skipped.
#[derive(Debug, Clone)]
pub struct Skipped {
    pub file_name: String,
    pub reason: SkipReason,
}

/// Output of the scan stage: sorted program groups plus skip records.
#[derive(Debug)]
pub struct Manifest {
    /// Sorted by (chapter, program id); utilities after all numbered chapters.
    pub groups: Vec<ProgramGroup>,
    pub skipped: Vec<Skipped>,
}

/// Files the generator itself owns; never treated as program input.
const RESERVED_NAMES: &[&str] = &["matbook.toml", "README.md"];

/// Scan the drop folder and group its files into programs.
pub fn scan(root: &Path, recursive: bool) -> Result<Manifest, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::MissingRoot(root.to_path_buf()));
    }

    let mut files = enumerate(root, recursive)?;
    // Deterministic input order regardless of readdir order.
    files.sort();

    let entries = files
        .into_iter()
        .map(|path| {
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let rel = path.strip_prefix(root).unwrap_or(&path).to_path_buf();
            (file_name, rel)
        })
        .collect();

    let (groups, skipped) = group(entries);
    Ok(Manifest { groups, skipped })
}

/// Collect candidate file paths, skipping hidden files and reserved names.
fn enumerate(root: &Path, recursive: bool) -> Result<Vec<PathBuf>, ScanError> {
    let mut files = Vec::new();

    if recursive {
        // Prune hidden and reserved entries at directory level too, so a
        // stray .git or build tree inside the drop folder is never walked.
        let walker = WalkDir::new(root)
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_reserved(e.file_name().to_string_lossy()));
        for entry in walker {
            let entry = entry.map_err(std::io::Error::from)?;
            if entry.file_type().is_file() {
                files.push(entry.path().to_path_buf());
            }
        }
    } else {
        for entry in fs::read_dir(root)? {
            let entry = entry?;
            let path = entry.path();
            if path.is_file() && !is_reserved(entry.file_name().to_string_lossy()) {
                files.push(path);
            }
        }
    }

    Ok(files)
}

fn is_reserved(name: impl AsRef<str>) -> bool {
    let name = name.as_ref();
    name.starts_with('.') || RESERVED_NAMES.contains(&name)
}

/// Group (filename, relative path) pairs into programs.
///
/// Pure with respect to the filesystem: classification and grouping only
/// look at the names handed in, which keeps this directly unit-testable.
pub fn group(files: Vec<(String, PathBuf)>) -> (Vec<ProgramGroup>, Vec<Skipped>) {
    let mut by_id: BTreeMap<String, ProgramGroup> = BTreeMap::new();
    let mut skipped = Vec::new();

    for (file_name, source_path) in files {
        let (base_name, extension) = split_name(&file_name);

        let Some(descriptor) = filetype::resolve(extension) else {
            skipped.push(Skipped {
                file_name,
                reason: SkipReason::UnsupportedExtension,
            });
            continue;
        };

        let identity = naming::classify(base_name)
            .unwrap_or_else(|| ProgramIdentity::utility(base_name));

        by_id
            .entry(identity.program_id.clone())
            .or_insert_with(|| ProgramGroup {
                identity,
                members: Vec::new(),
            })
            .members
            .push(MemberFile {
                file_name,
                source_path,
                descriptor,
            });
    }

    // Materialize the output order explicitly rather than trusting the map.
    let mut groups: Vec<ProgramGroup> = by_id.into_values().collect();
    groups.sort_by(|a, b| {
        (a.identity.chapter, &a.identity.program_id).cmp(&(b.identity.chapter, &b.identity.program_id))
    });

    (groups, skipped)
}

/// Split `name.ext` into (base name, extension). No dot means no extension.
fn split_name(file_name: &str) -> (&str, &str) {
    match file_name.rsplit_once('.') {
        Some((base, ext)) if !base.is_empty() => (base, ext),
        _ => (file_name, ""),
    }
}
