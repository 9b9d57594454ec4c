//! Markdown renderer for blog post widgets.
//!
//! Converts a constrained markdown dialect into an HTML fragment suitable
//! for injection into a post container element. The dialect is a CommonMark
//! subset (GFM tables, strikethrough, task lists) plus two custom block
//! tokens handled by a preprocessor:
//!
//! - `[youtube:<id>]` / `[vimeo:<id>]` — responsive video embeds
//! - `[html]...[/html]` — raw HTML passthrough (trusted-content channel)
//!
//! Rendering never fails: malformed markdown degrades to literal paragraph
//! text, unresolvable image URLs fall back to a placeholder, and an unclosed
//! `[html]` block is emitted as escaped literal text.
//!
//! # Example
//!
//! ```
//! use postkit_renderer::render_markdown;
//!
//! let html = render_markdown("# Title\n\nSome **bold** text.");
//! assert!(html.contains("<h1>Title</h1>"));
//! assert!(html.contains("<strong>bold</strong>"));
//! ```

mod embed;
mod media;
mod renderer;
mod util;

pub use embed::{EmbedPreprocessor, VideoProvider};
pub use media::{FALLBACK_IMAGE_URL, resolve_image_url};
pub use renderer::HtmlWriter;
pub use util::escape_html;

use pulldown_cmark::{Options, Parser};

/// Parser options for the blog dialect: GFM tables, strikethrough and
/// task-list checkboxes on top of CommonMark.
#[must_use]
pub fn parser_options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
}

/// Rendered HTML plus any warnings the embed preprocessor produced.
#[derive(Clone, Debug, Default)]
pub struct RenderOutput {
    pub html: String,
    /// Human-readable notes about degraded input (e.g. an unclosed
    /// `[html]` block). Rendering still succeeded.
    pub warnings: Vec<String>,
}

/// Render a markdown document to an HTML fragment.
///
/// Empty input yields empty output. The result is deterministic: the same
/// input always produces byte-identical HTML.
#[must_use]
pub fn render_markdown(source: &str) -> String {
    render_markdown_full(source).html
}

/// Like [`render_markdown`], but also reports preprocessor warnings so the
/// caller can surface them to the author.
#[must_use]
pub fn render_markdown_full(source: &str) -> RenderOutput {
    if source.is_empty() {
        return RenderOutput::default();
    }

    let mut embeds = EmbedPreprocessor::new();
    let prepared = embeds.process(source);

    let parser = Parser::new_ext(&prepared, parser_options());
    let mut html = HtmlWriter::new().render(parser);

    embeds.restore(&mut html);
    RenderOutput {
        html,
        warnings: embeds.into_warnings(),
    }
}
