//! CLI output formatting.
//!
//! Information-first display: the primary line for every entity is its
//! semantic identity — chapter title, program label — with filenames shown
//! as indented context. Each report has a `format_*` function returning
//! `Vec<String>` (pure, no I/O, directly testable) and a thin `print_*`
//! wrapper that writes to stdout.
//!
//! ```text
//! Chapters
//! 3. Linear Systems (1 program)
//!     Exercise 10 [Chapt3Exercise10]
//!         matlab: Chapt3Exercise10.m
//!         pdf: Chapt3Exercise10.pdf
//!
//! Skipped
//!     notes.docx (unsupported extension)
//!
//! 1 program, 2 files, 4 pages
//! ```

use crate::generate::RunReport;
use crate::scan::Manifest;

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn count_noun(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("{n} {noun}")
    } else {
        format!("{n} {noun}s")
    }
}

/// Format a completed run: chapters, programs, members, skips, totals.
pub fn format_run_output(report: &RunReport) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("Chapters".to_string());
    for chapter in &report.chapters {
        lines.push(format!(
            "{} ({})",
            chapter.title,
            count_noun(chapter.programs.len(), "program")
        ));
        for program in &chapter.programs {
            lines.push(format!(
                "{}{} [{}]",
                indent(1),
                program.label,
                program.program_id
            ));
            for member in &program.members {
                lines.push(format!(
                    "{}{}: {}",
                    indent(2),
                    member.type_tag,
                    member.file_name
                ));
            }
        }
    }

    if !report.stats.skipped.is_empty() {
        lines.push(String::new());
        lines.push("Skipped".to_string());
        for skip in &report.stats.skipped {
            lines.push(format!("{}{} ({})", indent(1), skip.file_name, skip.reason));
        }
    }

    for warning in &report.stats.warnings {
        lines.push(format!("Warning: {warning}"));
    }

    lines.push(String::new());
    lines.push(format!(
        "{}, {}, {}",
        count_noun(report.stats.programs, "program"),
        count_noun(report.stats.files_processed, "file"),
        count_noun(report.stats.pages_written, "page")
    ));

    lines
}

/// Format a scan-only check: discovered programs and skips, no writes.
pub fn format_check_output(manifest: &Manifest) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("Programs".to_string());
    for group in &manifest.groups {
        lines.push(format!(
            "{}{} [{}]",
            indent(1),
            group.identity.display_label,
            group.identity.program_id
        ));
        for member in &group.members {
            lines.push(format!(
                "{}{}: {}",
                indent(2),
                member.descriptor.tag,
                member.file_name
            ));
        }
    }

    if !manifest.skipped.is_empty() {
        lines.push(String::new());
        lines.push("Skipped".to_string());
        for skip in &manifest.skipped {
            lines.push(format!("{}{} ({})", indent(1), skip.file_name, skip.reason));
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "{}, {} skipped",
        count_noun(manifest.groups.len(), "program"),
        manifest.skipped.len()
    ));

    lines
}

pub fn print_run_output(report: &RunReport) {
    for line in format_run_output(report) {
        println!("{line}");
    }
}

pub fn print_check_output(manifest: &Manifest) {
    for line in format_check_output(manifest) {
        println!("{line}");
    }
}
