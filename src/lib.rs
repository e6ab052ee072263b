//! # matbook
//!
//! A static documentation generator for MATLAB textbook program collections.
//! Your filesystem is the data source: a flat drop folder of program files
//! named `Chapt<N><Exercise|Fig><N>[variant]` becomes a browsable
//! documentation site plus a navigation index for the surrounding site shell.
//!
//! # Architecture: One-Pass Pipeline
//!
//! Every run is a single synchronous transform from the drop folder to the
//! output tree:
//!
//! ```text
//! 1. scan      programs/  →  Manifest          (classify + group by program id)
//! 2. plan      Manifest   →  GroupPlan         (deterministic output paths)
//! 3. render    GroupPlan  →  site/docs/        (detail + index pages, copies)
//! 4. sidebar   Manifest   →  site/sidebar.js   (navigation index)
//! ```
//!
//! There is no incremental build and no cache: each pass reprocesses the full
//! source set, which keeps the output a pure function of the current
//! directory snapshot. Watch mode only decides *when* to run a pass, never
//! what it does.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`naming`] | Filename classifier — `ChaptNExerciseN` grammar → program identity |
//! | [`filetype`] | Extension → format descriptor table (type tags, render hints) |
//! | [`scan`] | Stage 1 — enumerates the drop folder, groups format siblings |
//! | [`plan`] | Stage 2 — plans every output path before anything is written |
//! | [`render`] | Stage 3 — Maud templates for detail, index, and intro pages |
//! | [`sidebar`] | Navigation index builder — emits the `sidebar.js` artifact |
//! | [`generate`] | Run orchestrator — copy, render, report, clean |
//! | [`watch`] | Debounced regeneration on drop-folder changes |
//! | [`config`] | Immutable run configuration (`matbook.toml` + CLI flags) |
//! | [`output`] | CLI output formatting — information-first run reports |
//!
//! # Design Decisions
//!
//! ## Identity Comes From Names, Never Content
//!
//! A program's identity is a pure function of its file base name. The
//! generator never parses or executes MATLAB, LaTeX, or notebook content;
//! a group is simply every file that shares a base name, whatever the mix
//! of formats. Files with supported extensions that don't match the naming
//! grammar become "utility" programs rather than errors — a drop folder
//! should never fail to build because one helper script is named `fermi.m`.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), a compile-time
//! HTML macro system. Malformed markup is a build error, template variables
//! are Rust expressions, interpolation is auto-escaped, and there is no
//! template directory to ship or get out of sync.
//!
//! ## Explicit Ordering Everywhere
//!
//! Every output ordering — chapters, programs within a chapter, members
//! within a program — is materialized by an explicit sort on semantic keys
//! before anything is emitted. Nothing relies on map iteration or directory
//! read order, which is what makes reruns byte-identical and the sidebar
//! safe to diff.
//!
//! ## Maximal Partial Output
//!
//! A batch documentation tool should never let one bad file block the rest:
//! per-file I/O failures become report entries, a failed sidebar write is a
//! warning, and only a missing source directory aborts a run (before any
//! write). The run report carries every skip with its reason.

pub mod config;
pub mod filetype;
pub mod generate;
pub mod naming;
pub mod output;
pub mod plan;
pub mod render;
pub mod scan;
pub mod sidebar;
pub mod watch;

#[cfg(test)]
pub(crate) mod test_helpers;
