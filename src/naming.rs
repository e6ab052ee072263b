//! Centralized filename classification for the textbook naming convention.
//!
//! Every program file in the drop folder follows the same pattern: a `Chapt`
//! prefix, the chapter number, an `Exercise` or `Fig` discriminator, the
//! program number, and an optional variant suffix. This module provides a
//! single parsing function that extracts all parts consistently, so the
//! grouping, planning, and sidebar stages never re-derive identity from raw
//! filenames.
//!
//! ## Grammar
//!
//! ```text
//! Chapt <digits> ("Exercise" | "Fig") <digits> [ <lowercase letter> <digits>? ]
//! ```
//!
//! Only the discriminator token is case-insensitive. Digits and the variant
//! letter must appear exactly as specified; an uppercase variant letter makes
//! the whole name a non-match.
//!
//! ## Identity, not filenames
//!
//! The `program_id` is reconstructed from the parsed parts with the
//! discriminator normalized to canonical casing. Two files whose base names
//! parse to the same parts always share one identity, which is what lets
//! `Chapt5Exercise5.m`, `.pdf`, `.tex`, and `.html` land in a single group
//! downstream.

use std::fmt;

/// Chapter bucket an identity sorts under.
///
/// Variant order matters: `Utilities` must stay last so it sorts after every
/// numbered chapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Chapter {
    Numbered(u32),
    Utilities,
}

impl Chapter {
    /// Grouping key: the decimal chapter number, or the fallback tag.
    pub fn key(&self) -> String {
        match self {
            Chapter::Numbered(n) => n.to_string(),
            Chapter::Utilities => "utilities".to_string(),
        }
    }

    /// Filesystem-safe path segment for the documentation tree.
    pub fn segment(&self) -> String {
        match self {
            Chapter::Numbered(n) => format!("chapter{n}"),
            Chapter::Utilities => "utilities".to_string(),
        }
    }
}

impl fmt::Display for Chapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Chapter::Numbered(n) => write!(f, "chapter {n}"),
            Chapter::Utilities => write!(f, "utilities"),
        }
    }
}

/// What a program file represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgramKind {
    Exercise,
    Figure,
    Utility,
}

impl ProgramKind {
    /// Canonical discriminator token as it appears in program ids and labels.
    pub fn token(&self) -> &'static str {
        match self {
            ProgramKind::Exercise => "Exercise",
            ProgramKind::Figure => "Fig",
            ProgramKind::Utility => "",
        }
    }
}

/// Parsed identity of one logical program, shared by all its format variants.
///
/// Derived once per base name and immutable afterwards. `number` and
/// `variant` preserve the digits and letter exactly as written (leading
/// zeros included); the variant is upper-cased only in `display_label`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramIdentity {
    /// Canonical identity string, e.g. `Chapt3Exercise10` or `Chapt2Fig3a`.
    pub program_id: String,
    pub chapter: Chapter,
    pub kind: ProgramKind,
    /// Program number digits as written, e.g. `"08"`.
    pub number: String,
    /// Variant suffix as written (lowercase letter + optional digits), or empty.
    pub variant: String,
    /// Human label, e.g. `Exercise 10` or `Fig 3A`.
    pub display_label: String,
}

impl ProgramIdentity {
    /// Fallback identity for a supported file that does not match the grammar.
    ///
    /// Applied per file: utility programs only share an identity when their
    /// base names are literally identical.
    pub fn utility(base_name: &str) -> Self {
        Self {
            program_id: base_name.to_string(),
            chapter: Chapter::Utilities,
            kind: ProgramKind::Utility,
            number: String::new(),
            variant: String::new(),
            display_label: base_name.to_string(),
        }
    }
}

/// Classify a file base name (extension already stripped) against the grammar.
///
/// Returns `None` for anything that does not match exactly; the caller
/// decides whether to fall back to [`ProgramIdentity::utility`]. Pure and
/// deterministic — no I/O, no state.
///
/// ```
/// use matbook::naming::{classify, Chapter};
///
/// let id = classify("Chapt3Exercise10").unwrap();
/// assert_eq!(id.program_id, "Chapt3Exercise10");
/// assert_eq!(id.chapter, Chapter::Numbered(3));
/// assert_eq!(id.display_label, "Exercise 10");
///
/// assert!(classify("ch2ex3").is_none());
/// ```
pub fn classify(base_name: &str) -> Option<ProgramIdentity> {
    let rest = base_name.strip_prefix("Chapt")?;

    let (chapter_digits, rest) = take_digits(rest)?;
    let chapter_num: u32 = chapter_digits.parse().ok()?;

    let (kind, rest) = take_discriminator(rest)?;
    let (number, rest) = take_digits(rest)?;
    let variant = take_variant(rest)?;

    let program_id = format!("Chapt{chapter_digits}{}{number}{variant}", kind.token());
    let display_label = if variant.is_empty() {
        format!("{} {number}", kind.token())
    } else {
        format!("{} {number}{}", kind.token(), variant.to_ascii_uppercase())
    };

    Some(ProgramIdentity {
        program_id,
        chapter: Chapter::Numbered(chapter_num),
        kind,
        number: number.to_string(),
        variant: variant.to_string(),
        display_label,
    })
}

/// Split a non-empty run of leading ASCII digits off `input`.
fn take_digits(input: &str) -> Option<(&str, &str)> {
    let end = input
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(input.len());
    if end == 0 {
        return None;
    }
    Some((&input[..end], &input[end..]))
}

/// Match the `Exercise`/`Fig` token, the only case-insensitive part.
fn take_discriminator(input: &str) -> Option<(ProgramKind, &str)> {
    if let Some(token) = input.get(..8)
        && token.eq_ignore_ascii_case("Exercise")
    {
        return Some((ProgramKind::Exercise, &input[8..]));
    }
    if let Some(token) = input.get(..3)
        && token.eq_ignore_ascii_case("Fig")
    {
        return Some((ProgramKind::Figure, &input[3..]));
    }
    None
}

/// Validate the optional variant suffix: one lowercase ASCII letter followed
/// by zero or more digits, consuming the rest of the name.
fn take_variant(input: &str) -> Option<&str> {
    if input.is_empty() {
        return Some(input);
    }
    let mut chars = input.chars();
    let first = chars.next()?;
    if !first.is_ascii_lowercase() {
        return None;
    }
    if !chars.all(|c| c.is_ascii_digit()) {
        return None;
    }
    Some(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exercise_with_single_digit_chapter() {
        let id = classify("Chapt5Exercise5").unwrap();
        assert_eq!(id.program_id, "Chapt5Exercise5");
        assert_eq!(id.chapter, Chapter::Numbered(5));
        assert_eq!(id.kind, ProgramKind::Exercise);
        assert_eq!(id.number, "5");
        assert_eq!(id.variant, "");
        assert_eq!(id.display_label, "Exercise 5");
    }

    #[test]
    fn figure_with_variant() {
        let id = classify("Chapt2Fig3a").unwrap();
        assert_eq!(id.program_id, "Chapt2Fig3a");
        assert_eq!(id.kind, ProgramKind::Figure);
        assert_eq!(id.number, "3");
        assert_eq!(id.variant, "a");
        assert_eq!(id.display_label, "Fig 3A");
    }

    #[test]
    fn variant_with_trailing_digits() {
        let id = classify("Chapt7Exercise12b3").unwrap();
        assert_eq!(id.program_id, "Chapt7Exercise12b3");
        assert_eq!(id.variant, "b3");
        assert_eq!(id.display_label, "Exercise 12B3");
    }

    #[test]
    fn discriminator_casing_is_normalized() {
        let id = classify("Chapt5EXERCISE5").unwrap();
        assert_eq!(id.program_id, "Chapt5Exercise5");

        let id = classify("Chapt2fig3").unwrap();
        assert_eq!(id.program_id, "Chapt2Fig3");
    }

    #[test]
    fn leading_zeros_preserved_in_id() {
        let id = classify("Chapt03Exercise08").unwrap();
        assert_eq!(id.program_id, "Chapt03Exercise08");
        assert_eq!(id.number, "08");
        assert_eq!(id.chapter, Chapter::Numbered(3));
        assert_eq!(id.display_label, "Exercise 08");
    }

    #[test]
    fn uppercase_variant_is_a_non_match() {
        assert!(classify("Chapt2Fig3A").is_none());
    }

    #[test]
    fn chapt_prefix_is_case_sensitive() {
        assert!(classify("chapt5Exercise5").is_none());
    }

    #[test]
    fn rejects_names_outside_the_grammar() {
        assert!(classify("Chapter1Exercise8").is_none());
        assert!(classify("ch2ex3").is_none());
        assert!(classify("exercise8").is_none());
        assert!(classify("fermi").is_none());
        assert!(classify("Chapt5Exercise").is_none());
        assert!(classify("ChaptExercise5").is_none());
        assert!(classify("Chapt5Problem5").is_none());
        assert!(classify("Chapt5Exercise5-extra").is_none());
        assert!(classify("").is_none());
    }

    #[test]
    fn classification_is_deterministic() {
        let a = classify("Chapt3Exercise10").unwrap();
        let b = classify("Chapt3Exercise10").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn chapter_zero_and_large_chapters_accepted() {
        assert_eq!(
            classify("Chapt0Exercise1").unwrap().chapter,
            Chapter::Numbered(0)
        );
        assert_eq!(
            classify("Chapt42Fig1").unwrap().chapter,
            Chapter::Numbered(42)
        );
    }

    #[test]
    fn utility_identity_uses_base_name() {
        let id = ProgramIdentity::utility("fermi");
        assert_eq!(id.program_id, "fermi");
        assert_eq!(id.chapter, Chapter::Utilities);
        assert_eq!(id.kind, ProgramKind::Utility);
        assert_eq!(id.display_label, "fermi");
    }

    #[test]
    fn utilities_chapter_sorts_after_all_numbered() {
        assert!(Chapter::Numbered(9) < Chapter::Utilities);
        assert!(Chapter::Numbered(9999) < Chapter::Utilities);
        assert!(Chapter::Numbered(1) < Chapter::Numbered(2));
    }

    #[test]
    fn chapter_keys_and_segments() {
        assert_eq!(Chapter::Numbered(3).key(), "3");
        assert_eq!(Chapter::Numbered(3).segment(), "chapter3");
        assert_eq!(Chapter::Utilities.key(), "utilities");
        assert_eq!(Chapter::Utilities.segment(), "utilities");
    }
}
