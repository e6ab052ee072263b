//! Deterministic output path planning.
//!
//! Maps a [`ProgramGroup`] to every path the generator will write, before
//! any byte hits the disk. All paths are relative; the orchestrator anchors
//! them under the configured output roots.
//!
//! ## Layout per program
//!
//! ```text
//! docs/chapter3/Chapt3Exercise10/          # docs_dir
//! ├── index.html                           # group index page
//! ├── Chapt3Exercise10_matlab.html         # one detail page per member
//! └── Chapt3Exercise10_pdf.html
//!
//! static/matlab/Chapt3Exercise10/Chapt3Exercise10.m    # copied originals,
//! static/pdf/Chapt3Exercise10/Chapt3Exercise10.pdf     # segmented by type tag
//! ```
//!
//! The static tree is segmented by type tag, never by raw extension, so two
//! differently-named files of the same type can only collide when their
//! filenames are literally identical.

use crate::filetype;
use crate::scan::{MemberFile, ProgramGroup};
use std::path::PathBuf;

/// Extension of every generated documentation page.
pub const DOC_PAGE_EXT: &str = "html";

/// Planned destinations for one member file.
#[derive(Debug)]
pub struct MemberPlan<'a> {
    pub member: &'a MemberFile,
    /// Destination under the static root: `<tag>/<program_id>/<file_name>`.
    pub static_dest: PathBuf,
    /// Detail page under the docs root: `<docs_dir>/<program_id>_<tag>.html`.
    pub detail_page: PathBuf,
    /// Href from a page inside `docs_dir` to the copied asset.
    pub asset_href: String,
}

/// Planned destinations for one program group.
#[derive(Debug)]
pub struct GroupPlan<'a> {
    pub group: &'a ProgramGroup,
    /// Documentation directory: `<chapter segment>/<program_id>`.
    pub docs_dir: PathBuf,
    /// Group index page: `<docs_dir>/index.html`.
    pub index_page: PathBuf,
    /// Members re-sorted by display priority, ties broken by filename.
    pub members: Vec<MemberPlan<'a>>,
}

/// Plan all output paths for a group.
///
/// Pure and deterministic: the same group always plans the same paths, and
/// member order depends only on the fixed type priority ranking, never on
/// discovery order.
pub fn plan(group: &ProgramGroup) -> GroupPlan<'_> {
    let id = &group.identity.program_id;
    let docs_dir = PathBuf::from(group.identity.chapter.segment()).join(id);
    let index_page = docs_dir.join(format!("index.{DOC_PAGE_EXT}"));

    let mut sorted: Vec<&MemberFile> = group.members.iter().collect();
    sorted.sort_by(|a, b| {
        let ka = (filetype::display_rank(a.descriptor.tag), a.descriptor.tag, &a.file_name);
        let kb = (filetype::display_rank(b.descriptor.tag), b.descriptor.tag, &b.file_name);
        ka.cmp(&kb)
    });

    let members = sorted
        .into_iter()
        .map(|member| {
            let tag = member.descriptor.tag;
            let static_dest = PathBuf::from(tag).join(id).join(&member.file_name);
            let detail_page = docs_dir.join(format!("{id}_{tag}.{DOC_PAGE_EXT}"));
            // Pages live three levels below the docs root, next to the
            // sibling static root.
            let asset_href = format!("../../../static/{tag}/{id}/{}", member.file_name);
            MemberPlan {
                member,
                static_dest,
                detail_page,
                asset_href,
            }
        })
        .collect();

    GroupPlan {
        group,
        docs_dir,
        index_page,
        members,
    }
}
