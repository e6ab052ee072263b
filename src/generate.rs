//! Run orchestration: one full pass from drop folder to generated site.
//!
//! Drives the whole pipeline — scan, plan, copy, render, sidebar — and
//! accumulates a [`RunReport`] for the caller. The pass is synchronous and
//! single-threaded; each run rebuilds the full output from the current
//! directory snapshot (no incremental regeneration).
//!
//! ## Failure policy
//!
//! - A missing source directory aborts the run before any write.
//! - A copy or read failure for one member is recorded as a skip and the
//!   run continues with the remaining members and groups.
//! - A sidebar write failure is recorded as a warning; documentation pages
//!   already written stay on disk (partial success is visible, not hidden).
//!
//! All recoverable problems surface together in the report at the end
//! rather than interrupting processing — for a batch documentation tool,
//! one bad file should never block the rest.

use crate::config::GenConfig;
use crate::naming::ProgramIdentity;
use crate::plan::{self, GroupPlan, MemberPlan};
use crate::render::{self, MemberContext};
use crate::scan::{self, ScanError, SkipReason, Skipped};
use crate::sidebar;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error("sidebar serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Aggregate counters for one run.
#[derive(Debug, Default)]
pub struct RunStats {
    /// Program groups that produced output.
    pub programs: usize,
    /// Member files copied into the static tree.
    pub files_processed: usize,
    /// HTML pages written (detail + index + introduction).
    pub pages_written: usize,
    /// Copied files per type tag.
    pub by_type: BTreeMap<String, usize>,
    /// Programs per chapter key.
    pub by_chapter: BTreeMap<String, usize>,
    /// Every skipped input with its reason.
    pub skipped: Vec<Skipped>,
    /// Non-fatal problems outside the per-file skip taxonomy.
    pub warnings: Vec<String>,
}

/// One member that made it into the output.
#[derive(Debug)]
pub struct MemberReport {
    pub file_name: String,
    pub type_tag: String,
}

/// One program that made it into the output.
#[derive(Debug)]
pub struct ProgramReport {
    pub program_id: String,
    pub label: String,
    pub docs_dir: String,
    pub members: Vec<MemberReport>,
}

/// One chapter's worth of generated programs.
#[derive(Debug)]
pub struct ChapterReport {
    pub title: String,
    pub programs: Vec<ProgramReport>,
}

/// Everything the caller learns about a completed run.
#[derive(Debug)]
pub struct RunReport {
    pub chapters: Vec<ChapterReport>,
    pub stats: RunStats,
}

/// Execute one full generation pass.
pub fn run(config: &GenConfig) -> Result<RunReport, GenerateError> {
    // Scan is read-only; a missing root aborts before anything is written.
    let manifest = scan::scan(&config.source, config.recursive)?;

    let docs_root = config.docs_root();
    let static_root = config.static_root();
    fs::create_dir_all(&docs_root)?;
    fs::create_dir_all(&static_root)?;

    let mut stats = RunStats {
        skipped: manifest.skipped.clone(),
        ..RunStats::default()
    };
    let mut chapters: Vec<ChapterReport> = Vec::new();

    for group in &manifest.groups {
        let group_plan = plan::plan(group);
        let report = write_group(config, &docs_root, &static_root, &group_plan, &mut stats)?;

        stats.programs += 1;
        *stats
            .by_chapter
            .entry(group.identity.chapter.key())
            .or_default() += 1;

        let title = sidebar::chapter_title(group.identity.chapter, config);
        match chapters.last_mut() {
            Some(last) if last.title == title => last.programs.push(report),
            _ => chapters.push(ChapterReport {
                title,
                programs: vec![report],
            }),
        }
    }

    // Introduction page, fed by an optional README.md in the drop folder.
    let readme = read_optional(&config.source.join("README.md"));
    let intro = render::intro_page(&config.site_title, readme.as_deref());
    fs::write(
        docs_root.join(format!("index.{}", plan::DOC_PAGE_EXT)),
        intro.into_string(),
    )?;
    stats.pages_written += 1;

    // The sidebar is best-effort: pages already on disk stay useful even if
    // this write fails.
    let items = sidebar::build(&manifest.groups, config);
    let module_js = sidebar::to_module_js(&items)?;
    if let Err(e) = fs::write(config.sidebar_path(), module_js) {
        stats
            .warnings
            .push(format!("sidebar write failed: {e}"));
    }

    Ok(RunReport { chapters, stats })
}

/// Write one group's static copies, detail pages, and index page.
///
/// Member-level I/O failures are recorded in `stats.skipped`; the member is
/// then left out of the index page so no generated link dangles.
fn write_group(
    config: &GenConfig,
    docs_root: &Path,
    static_root: &Path,
    group_plan: &GroupPlan<'_>,
    stats: &mut RunStats,
) -> Result<ProgramReport, GenerateError> {
    let identity = &group_plan.group.identity;
    fs::create_dir_all(docs_root.join(&group_plan.docs_dir))?;

    let mut rendered: Vec<&MemberPlan<'_>> = Vec::new();
    let mut members = Vec::new();

    for member_plan in &group_plan.members {
        match write_member(config, docs_root, static_root, identity, member_plan) {
            Ok(()) => {
                stats.files_processed += 1;
                *stats
                    .by_type
                    .entry(member_plan.member.descriptor.tag.to_string())
                    .or_default() += 1;
                stats.pages_written += 1;
                rendered.push(member_plan);
                members.push(MemberReport {
                    file_name: member_plan.member.file_name.clone(),
                    type_tag: member_plan.member.descriptor.tag.to_string(),
                });
            }
            Err(e) => stats.skipped.push(Skipped {
                file_name: member_plan.member.file_name.clone(),
                reason: SkipReason::Io(e.to_string()),
            }),
        }
    }

    let index = render::group_index_page(&config.site_title, identity, &rendered);
    fs::write(docs_root.join(&group_plan.index_page), index.into_string())?;
    stats.pages_written += 1;

    Ok(ProgramReport {
        program_id: identity.program_id.clone(),
        label: identity.display_label.clone(),
        docs_dir: group_plan.docs_dir.to_string_lossy().into_owned(),
        members,
    })
}

/// Copy one member into the static tree and render its detail page.
fn write_member(
    config: &GenConfig,
    docs_root: &Path,
    static_root: &Path,
    identity: &ProgramIdentity,
    member_plan: &MemberPlan<'_>,
) -> io::Result<()> {
    let source = config.source.join(&member_plan.member.source_path);
    let dest = static_root.join(&member_plan.static_dest);
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    // Same filename from two subdirectories lands on one dest path;
    // last write wins.
    fs::copy(&source, &dest)?;

    let content = if member_plan.member.descriptor.text_renderable {
        Some(fs::read_to_string(&source)?)
    } else {
        None
    };

    let ctx = MemberContext {
        identity,
        descriptor: member_plan.member.descriptor,
        file_name: &member_plan.member.file_name,
        asset_href: &member_plan.asset_href,
        content: content.as_deref(),
    };
    let page = render::detail_page(&config.site_title, &ctx);
    fs::write(docs_root.join(&member_plan.detail_page), page.into_string())?;
    Ok(())
}

fn read_optional(path: &Path) -> Option<String> {
    fs::read_to_string(path).ok()
}

/// Remove everything a previous run generated. Idempotent.
///
/// Deletes the chapter-scoped directories and introduction page under the
/// docs root, the entire static root, and the sidebar artifact. Files the
/// user placed next to them are left alone.
pub fn clean(config: &GenConfig) -> io::Result<()> {
    let docs_root = config.docs_root();
    if docs_root.is_dir() {
        for entry in fs::read_dir(&docs_root)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if entry.path().is_dir() && is_chapter_segment(&name) {
                fs::remove_dir_all(entry.path())?;
            }
        }
        remove_if_exists(&docs_root.join(format!("index.{}", plan::DOC_PAGE_EXT)))?;
    }

    let static_root = config.static_root();
    if static_root.exists() {
        fs::remove_dir_all(&static_root)?;
    }
    remove_if_exists(&config.sidebar_path())?;
    Ok(())
}

/// `chapter<digits>` or the utilities fallback segment.
fn is_chapter_segment(name: &str) -> bool {
    if name == "utilities" {
        return true;
    }
    match name.strip_prefix("chapter") {
        Some(digits) => !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()),
        None => false,
    }
}

fn remove_if_exists(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;

    #[test]
    fn end_to_end_scenario_writes_the_full_tree() {
        let tmp = setup_source(&[
            ("Chapt3Exercise10.m", "x = rand(10);"),
            ("Chapt3Exercise10.pdf", "%PDF-1.4 fake"),
            ("Chapt3Exercise10.tex", "\\documentclass{article}"),
        ]);
        let config = test_config(&tmp);

        let report = run(&config).unwrap();

        assert_eq!(report.stats.programs, 1);
        assert_eq!(report.stats.files_processed, 3);
        // 3 detail pages + 1 group index + 1 introduction.
        assert_eq!(report.stats.pages_written, 5);

        let docs = config.docs_root().join("chapter3/Chapt3Exercise10");
        assert!(docs.join("index.html").is_file());
        assert!(docs.join("Chapt3Exercise10_matlab.html").is_file());
        assert!(docs.join("Chapt3Exercise10_latex.html").is_file());
        assert!(docs.join("Chapt3Exercise10_pdf.html").is_file());

        for seg in ["matlab", "latex", "pdf"] {
            assert!(
                config
                    .static_root()
                    .join(seg)
                    .join("Chapt3Exercise10")
                    .read_dir()
                    .unwrap()
                    .next()
                    .is_some(),
                "missing static copies under {seg}"
            );
        }

        let sidebar = fs::read_to_string(config.sidebar_path()).unwrap();
        assert!(sidebar.contains("\"Exercise 10\""));
        assert!(sidebar.contains("3. Linear Systems"));
    }

    #[test]
    fn copied_bytes_match_the_source() {
        let tmp = setup_source(&[("Chapt1Exercise1.m", "x = 1; % original")]);
        let config = test_config(&tmp);

        run(&config).unwrap();

        let copied = fs::read_to_string(
            config
                .static_root()
                .join("matlab/Chapt1Exercise1/Chapt1Exercise1.m"),
        )
        .unwrap();
        assert_eq!(copied, "x = 1; % original");
    }

    #[test]
    fn unsupported_files_are_reported_not_fatal() {
        let tmp = setup_source(&[("Chapt1Exercise1.m", "x"), ("notes.docx", "binary")]);
        let config = test_config(&tmp);

        let report = run(&config).unwrap();

        assert_eq!(report.stats.programs, 1);
        assert_eq!(report.stats.skipped.len(), 1);
        assert_eq!(report.stats.skipped[0].file_name, "notes.docx");
    }

    #[test]
    fn missing_source_aborts_before_any_write() {
        let tmp = tempfile::TempDir::new().unwrap();
        let config = GenConfig {
            source: tmp.path().join("does-not-exist"),
            output: tmp.path().join("site"),
            ..GenConfig::default()
        };

        let result = run(&config);

        assert!(matches!(
            result,
            Err(GenerateError::Scan(ScanError::MissingRoot(_)))
        ));
        assert!(!config.output.exists());
    }

    #[test]
    fn rerun_is_byte_identical() {
        let tmp = setup_source(&[
            ("Chapt3Exercise10.m", "x = 1;"),
            ("Chapt5Fig2a.m", "plot(1:10)"),
            ("fermi.m", "function y = fermi(x)"),
        ]);
        let config = test_config(&tmp);

        run(&config).unwrap();
        let first = snapshot_tree(&config.output);
        run(&config).unwrap();
        let second = snapshot_tree(&config.output);

        assert_eq!(first, second);
    }

    #[test]
    fn clean_then_run_matches_a_fresh_run() {
        let tmp = setup_source(&[("Chapt3Exercise10.m", "x = 1;"), ("fermi.m", "f")]);
        let config = test_config(&tmp);

        run(&config).unwrap();
        let fresh = snapshot_tree(&config.output);

        clean(&config).unwrap();
        assert!(!config.static_root().exists());
        assert!(!config.sidebar_path().exists());

        run(&config).unwrap();
        assert_eq!(fresh, snapshot_tree(&config.output));
    }

    #[test]
    fn clean_is_idempotent() {
        let tmp = setup_source(&[]);
        let config = test_config(&tmp);

        clean(&config).unwrap();
        clean(&config).unwrap();
    }

    #[test]
    fn clean_leaves_foreign_files_alone() {
        let tmp = setup_source(&[("Chapt1Exercise1.m", "x")]);
        let config = test_config(&tmp);
        run(&config).unwrap();

        let keep = config.docs_root().join("handwritten-notes.html");
        fs::write(&keep, "mine").unwrap();

        clean(&config).unwrap();

        assert!(keep.is_file());
        assert!(!config.docs_root().join("chapter1").exists());
    }

    #[test]
    fn per_chapter_and_per_type_tallies() {
        let tmp = setup_source(&[
            ("Chapt1Exercise1.m", "a"),
            ("Chapt1Exercise2.m", "b"),
            ("Chapt1Exercise2.pdf", "c"),
            ("fermi.m", "d"),
        ]);
        let config = test_config(&tmp);

        let report = run(&config).unwrap();

        assert_eq!(report.stats.by_chapter.get("1"), Some(&2));
        assert_eq!(report.stats.by_chapter.get("utilities"), Some(&1));
        assert_eq!(report.stats.by_type.get("matlab"), Some(&3));
        assert_eq!(report.stats.by_type.get("pdf"), Some(&1));
    }

    #[test]
    fn report_chapters_follow_output_order() {
        let tmp = setup_source(&[
            ("fermi.m", "u"),
            ("Chapt2Exercise1.m", "b"),
            ("Chapt1Exercise1.m", "a"),
        ]);
        let config = test_config(&tmp);

        let report = run(&config).unwrap();

        let titles: Vec<&str> = report.chapters.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["1. MATLAB Basics", "2. Roots of Equations", "Utility Programs"]
        );
    }

    #[test]
    fn chapter_segment_recognition() {
        assert!(is_chapter_segment("chapter1"));
        assert!(is_chapter_segment("chapter42"));
        assert!(is_chapter_segment("utilities"));
        assert!(!is_chapter_segment("chapter"));
        assert!(!is_chapter_segment("chapterX"));
        assert!(!is_chapter_segment("assets"));
    }
}
