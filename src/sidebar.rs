//! Navigation sidebar generation for the surrounding site shell.
//!
//! Produces `sidebar.js`, the single navigation artifact the static site
//! shell consumes: a "do not edit" header comment followed by
//! `module.exports = <json>;`. The file is overwritten in full on every run
//! and is byte-deterministic for a given input set — ordering comes from
//! explicit sorts, never from map iteration or discovery order, and no
//! timestamp is embedded.
//!
//! ## Shape
//!
//! ```text
//! Introduction                 # fixed first entry
//! 1. MATLAB Basics             # one collapsible category per chapter,
//!     Exercise 1               #   ascending numeric order
//!     Fig 2A
//! 3. Linear Systems
//!     Exercise 10
//! Utility Programs             # fallback bucket, always last
//!     fermi
//! ```
//!
//! Entries are sorted lexicographically by program id within a category and
//! labeled with the short display label, not the full identity string.

use crate::config::GenConfig;
use crate::naming::Chapter;
use crate::scan::ProgramGroup;
use serde::Serialize;
use std::collections::BTreeMap;

/// One node of the navigation tree, serialized into `sidebar.js`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SidebarItem {
    Doc {
        id: String,
        label: String,
    },
    Category {
        label: String,
        collapsible: bool,
        items: Vec<SidebarItem>,
    },
}

/// Chapter display names for the stock textbook layout. Chapters without an
/// entry fall back to a generic `Chapter N` title.
const CHAPTER_NAMES: &[(u32, &str)] = &[
    (1, "MATLAB Basics"),
    (2, "Roots of Equations"),
    (3, "Linear Systems"),
    (4, "Curve Fitting and Interpolation"),
    (5, "Numerical Differentiation"),
    (6, "Numerical Integration"),
    (7, "Ordinary Differential Equations"),
    (8, "Boundary Value Problems"),
    (9, "Partial Differential Equations"),
];

const UTILITIES_TITLE: &str = "Utility Programs";

/// Title of a chapter category, honoring config overrides.
pub fn chapter_title(chapter: Chapter, config: &GenConfig) -> String {
    match chapter {
        Chapter::Numbered(n) => {
            let name = config
                .chapter_names
                .get(&n.to_string())
                .map(String::as_str)
                .or_else(|| {
                    CHAPTER_NAMES
                        .iter()
                        .find(|(num, _)| *num == n)
                        .map(|(_, name)| *name)
                });
            match name {
                Some(name) => format!("{n}. {name}"),
                None => format!("Chapter {n}"),
            }
        }
        Chapter::Utilities => UTILITIES_TITLE.to_string(),
    }
}

/// Build the navigation tree from the scanned groups.
pub fn build(groups: &[ProgramGroup], config: &GenConfig) -> Vec<SidebarItem> {
    let mut by_chapter: BTreeMap<Chapter, Vec<&ProgramGroup>> = BTreeMap::new();
    for group in groups {
        by_chapter.entry(group.identity.chapter).or_default().push(group);
    }

    let mut items = vec![SidebarItem::Doc {
        id: "intro".to_string(),
        label: "Introduction".to_string(),
    }];

    for (chapter, mut chapter_groups) in by_chapter {
        chapter_groups.sort_by(|a, b| a.identity.program_id.cmp(&b.identity.program_id));
        let entries = chapter_groups
            .into_iter()
            .map(|g| SidebarItem::Doc {
                id: format!("{}/{}", chapter.segment(), g.identity.program_id),
                label: g.identity.display_label.clone(),
            })
            .collect();
        items.push(SidebarItem::Category {
            label: chapter_title(chapter, config),
            collapsible: true,
            items: entries,
        });
    }

    items
}

/// Serialize the tree as the `sidebar.js` module the site shell imports.
pub fn to_module_js(items: &[SidebarItem]) -> Result<String, serde_json::Error> {
    let json = serde_json::to_string_pretty(items)?;
    Ok(format!(
        "// Generated by matbook — do not edit.\n\
         // Regenerated in full on every run; manual changes will be lost.\n\
         module.exports = {json};\n"
    ))
}
