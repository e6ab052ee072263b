//! File-type resolution: extension → semantic format descriptor.
//!
//! The descriptor table is configuration-level data, not logic. Each
//! supported extension maps to exactly one [`FileTypeDescriptor`] whose
//! `tag` doubles as a path segment in the static asset tree, so tags must
//! stay lowercase, filesystem-safe, and stable across releases.
//!
//! Adding a format means adding a table row here; the renderer picks its
//! strategy from the descriptor's [`RenderHint`], so no dispatch code needs
//! to change.

/// How a member file is presented on its detail page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderHint {
    /// Inline the file content as a syntax-highlighted code block.
    Code,
    /// Embed the copied asset in a frame, with an open-in-new-tab fallback.
    EmbedFrame,
    /// Offer a download link only.
    DownloadOnly,
}

/// Static description of one supported file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileTypeDescriptor {
    /// Canonical lowercase extension, without the dot.
    pub extension: &'static str,
    /// Stable lowercase tag, used as a path segment in the static tree.
    pub tag: &'static str,
    /// Human-readable format name for page headings.
    pub label: &'static str,
    /// Whether the file content can be read and inlined as text.
    pub text_renderable: bool,
    pub hint: RenderHint,
    /// Inline content beyond this many bytes is truncated with a notice.
    /// `None` means no cap.
    pub max_inline_len: Option<usize>,
}

/// The supported format table.
///
/// Code-like sources are inlined (length-capped), document formats are
/// embedded in frames, notebooks are download-only, and plain text is
/// inlined without a cap.
pub const TYPES: &[FileTypeDescriptor] = &[
    FileTypeDescriptor {
        extension: "m",
        tag: "matlab",
        label: "MATLAB source",
        text_renderable: true,
        hint: RenderHint::Code,
        max_inline_len: Some(60_000),
    },
    FileTypeDescriptor {
        extension: "tex",
        tag: "latex",
        label: "LaTeX source",
        text_renderable: true,
        hint: RenderHint::Code,
        max_inline_len: Some(60_000),
    },
    FileTypeDescriptor {
        extension: "pdf",
        tag: "pdf",
        label: "PDF document",
        text_renderable: false,
        hint: RenderHint::EmbedFrame,
        max_inline_len: None,
    },
    FileTypeDescriptor {
        extension: "html",
        tag: "html",
        label: "HTML export",
        text_renderable: false,
        hint: RenderHint::EmbedFrame,
        max_inline_len: None,
    },
    FileTypeDescriptor {
        extension: "ipynb",
        tag: "notebook",
        label: "Jupyter notebook",
        text_renderable: false,
        hint: RenderHint::DownloadOnly,
        max_inline_len: None,
    },
    FileTypeDescriptor {
        extension: "txt",
        tag: "text",
        label: "Plain text",
        text_renderable: true,
        hint: RenderHint::Code,
        max_inline_len: None,
    },
];

/// Display order for group members: primary source first, then derivation
/// formats, then document exports, then supplementary material.
const DISPLAY_PRIORITY: &[&str] = &["matlab", "latex", "pdf", "html", "notebook", "text"];

/// Resolve an extension (without the dot, any case) to its descriptor.
///
/// Unknown extensions resolve to `None`, which callers record as a skip
/// with reason "unsupported extension".
pub fn resolve(extension: &str) -> Option<&'static FileTypeDescriptor> {
    TYPES
        .iter()
        .find(|t| t.extension.eq_ignore_ascii_case(extension))
}

/// Rank of a type tag in the member display order.
///
/// Unranked tags sort after every ranked one; callers break those ties
/// alphabetically by tag.
pub fn display_rank(tag: &str) -> usize {
    DISPLAY_PRIORITY
        .iter()
        .position(|t| *t == tag)
        .unwrap_or(usize::MAX)
}
