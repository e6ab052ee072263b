//! Documentation page rendering.
//!
//! Turns planned groups into static HTML: one detail page per member file,
//! one index page per program, and a site introduction page. Uses
//! [maud](https://maud.lambda.xyz/) for compile-time templating — malformed
//! markup is a build error and all interpolation is auto-escaped.
//!
//! ## Renderer strategies
//!
//! Each [`RenderHint`] maps to one [`DetailRenderer`] strategy:
//!
//! - [`CodeRenderer`] inlines the file content in a `<pre><code>` block,
//!   truncating past the descriptor's inline cap with an explicit notice.
//! - [`FrameRenderer`] embeds the copied asset in an `<iframe>` and always
//!   offers an open-in-new-tab link; content is never inlined as text.
//! - [`DownloadRenderer`] offers a download link only.
//!
//! Supporting a new format means adding a row to the type table in
//! [`crate::filetype`]; the strategy lookup here follows the descriptor and
//! needs no changes.

use crate::filetype::{FileTypeDescriptor, RenderHint};
use crate::naming::ProgramIdentity;
use crate::plan::MemberPlan;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};

const CSS: &str = include_str!("../static/style.css");

/// Everything a detail-page strategy needs to render one member.
pub struct MemberContext<'a> {
    pub identity: &'a ProgramIdentity,
    pub descriptor: &'static FileTypeDescriptor,
    /// Filename of the original, shown in headings and download links.
    pub file_name: &'a str,
    /// Relative href from the detail page to the copied asset.
    pub asset_href: &'a str,
    /// File content, present only for text-renderable formats.
    pub content: Option<&'a str>,
}

/// Strategy for rendering the body of one member's detail page.
pub trait DetailRenderer {
    fn render_body(&self, ctx: &MemberContext<'_>) -> Markup;
}

pub struct CodeRenderer;
pub struct FrameRenderer;
pub struct DownloadRenderer;

/// Look up the strategy for a descriptor.
pub fn renderer_for(descriptor: &FileTypeDescriptor) -> &'static dyn DetailRenderer {
    match descriptor.hint {
        RenderHint::Code => &CodeRenderer,
        RenderHint::EmbedFrame => &FrameRenderer,
        RenderHint::DownloadOnly => &DownloadRenderer,
    }
}

impl DetailRenderer for CodeRenderer {
    fn render_body(&self, ctx: &MemberContext<'_>) -> Markup {
        let raw = ctx.content.unwrap_or("");
        let (shown, truncated) = truncate_inline(raw, ctx.descriptor.max_inline_len);
        html! {
            pre.program-source {
                code class=(format!("language-{}", ctx.descriptor.tag)) { (shown) }
            }
            @if truncated {
                p.truncation-notice {
                    "Content truncated. "
                    a href=(ctx.asset_href) download { "Download the full file" }
                    " to see the rest."
                }
            }
        }
    }
}

impl DetailRenderer for FrameRenderer {
    fn render_body(&self, ctx: &MemberContext<'_>) -> Markup {
        html! {
            iframe.preview-frame src=(ctx.asset_href) title=(ctx.file_name) {}
            p.frame-fallback {
                a href=(ctx.asset_href) target="_blank" rel="noopener" {
                    "Open " (ctx.file_name) " in a new tab"
                }
            }
        }
    }
}

impl DetailRenderer for DownloadRenderer {
    fn render_body(&self, ctx: &MemberContext<'_>) -> Markup {
        html! {
            p.download-only {
                "This format is available for download only."
            }
            p {
                a href=(ctx.asset_href) download { "Download " (ctx.file_name) }
            }
        }
    }
}

/// Cut `content` at the inline cap, on a char boundary at or below it.
fn truncate_inline(content: &str, cap: Option<usize>) -> (&str, bool) {
    let Some(cap) = cap else {
        return (content, false);
    };
    if content.len() <= cap {
        return (content, false);
    }
    let mut end = cap;
    while !content.is_char_boundary(end) {
        end -= 1;
    }
    (&content[..end], true)
}

// ============================================================================
// Pages
// ============================================================================

/// Render a member's detail page.
pub fn detail_page(site_title: &str, ctx: &MemberContext<'_>) -> Markup {
    let heading = format!("{} — {}", ctx.identity.display_label, ctx.descriptor.label);
    let body = renderer_for(ctx.descriptor).render_body(ctx);
    base_document(
        &format!("{heading} · {site_title}"),
        html! {
            (page_header(site_title, ctx.identity))
            main.detail {
                h1 { (heading) }
                p.source-file {
                    "Source: " code { (ctx.file_name) }
                    " · " a href=(ctx.asset_href) download { "download" }
                }
                (body)
                p.back-link { a href="index.html" { "Back to " (ctx.identity.display_label) } }
            }
        },
    )
}

/// Render a program's index page.
///
/// `members` holds only the members whose detail pages were actually
/// written, so the index never links to a page that failed to render.
pub fn group_index_page(
    site_title: &str,
    identity: &ProgramIdentity,
    members: &[&MemberPlan<'_>],
) -> Markup {
    base_document(
        &format!("{} · {site_title}", identity.display_label),
        html! {
            (page_header(site_title, identity))
            main.program-index {
                h1 { (identity.display_label) }
                p.program-id { code { (identity.program_id) } }
                ul.formats {
                    @for member in members {
                        li {
                            a href=(page_file_name(&member.detail_page)) {
                                (member.member.descriptor.label)
                            }
                            " — " code { (member.member.file_name) }
                        }
                    }
                }
            }
        },
    )
}

/// Render the site introduction page.
///
/// When the drop folder carries a `README.md` its markdown becomes the page
/// body; otherwise a stock blurb is used.
pub fn intro_page(site_title: &str, readme: Option<&str>) -> Markup {
    let body = match readme {
        Some(md) => {
            let mut out = String::new();
            md_html::push_html(&mut out, Parser::new(md));
            html! { (PreEscaped(out)) }
        }
        None => html! {
            p {
                "Generated documentation for a collection of textbook programs. "
                "Browse chapters from the navigation index."
            }
        },
    };
    base_document(
        site_title,
        html! {
            header.site-header { p.site-title { (site_title) } }
            main.intro {
                h1 { (site_title) }
                (body)
            }
        },
    )
}

/// Base HTML document with the compile-time stylesheet inlined.
fn base_document(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(CSS)) }
            }
            body {
                (content)
            }
        }
    }
}

/// Shared header with a breadcrumb back to the program index.
fn page_header(site_title: &str, identity: &ProgramIdentity) -> Markup {
    html! {
        header.site-header {
            nav.breadcrumb {
                span { (site_title) }
                " / "
                span { (identity.chapter.to_string()) }
                " / "
                span { (identity.display_label) }
            }
        }
    }
}

/// Last path segment of a planned page, for sibling-relative links.
fn page_file_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
