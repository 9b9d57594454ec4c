//! Custom embed tokens: video embeds and raw HTML passthrough.
//!
//! Two block tokens extend the markdown dialect:
//!
//! - `[youtube:<id>]` / `[vimeo:<id>]` — replaced by a responsive iframe
//! - `[html]...[/html]` — the span between the markers is emitted verbatim
//!   into the final output (trusted-content channel, no escaping)
//!
//! Both are rewritten to unique placeholders before markdown parsing so the
//! parser cannot reinterpret their contents, then swapped back in a restore
//! pass over the rendered HTML. Tokens inside fenced code blocks or inline
//! code spans are left literal.

use crate::util::escape_html;

const RAW_OPEN: &str = "[html]";
const RAW_CLOSE: &str = "[/html]";

/// Video platform a `[provider:id]` token refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VideoProvider {
    YouTube,
    Vimeo,
}

impl VideoProvider {
    /// Player URL for an embed iframe.
    #[must_use]
    pub fn embed_url(self, id: &str) -> String {
        match self {
            Self::YouTube => format!("https://www.youtube.com/embed/{id}"),
            Self::Vimeo => format!("https://player.vimeo.com/video/{id}"),
        }
    }
}

/// A recognized video token.
#[derive(Clone, Debug, PartialEq, Eq)]
struct VideoEmbed {
    provider: VideoProvider,
    id: String,
}

/// Captured raw HTML span. `verbatim` is false when the block was never
/// closed and degrades to escaped literal text.
#[derive(Debug, Default)]
struct RawBlock {
    content: String,
    verbatim: bool,
}

/// In-progress `[html]` capture.
struct RawCapture {
    index: usize,
    buffer: String,
    start_line: usize,
}

/// Tracks fenced code block state during line-by-line processing.
///
/// Fences use three or more backticks or tildes; the closing fence must use
/// the same character and be at least as long as the opening run.
#[derive(Debug, Default)]
struct FenceState {
    open: Option<(char, usize)>,
}

impl FenceState {
    fn update(&mut self, line: &str) {
        let trimmed = line.trim_start();
        match self.open {
            Some((ch, len)) => {
                let run = trimmed.chars().take_while(|&c| c == ch).count();
                if run >= len && trimmed[run..].trim().is_empty() {
                    self.open = None;
                }
            }
            None => {
                if let Some(first) = trimmed.chars().next()
                    && (first == '`' || first == '~')
                {
                    let run = trimmed.chars().take_while(|&c| c == first).count();
                    if run >= 3 {
                        self.open = Some((first, run));
                    }
                }
            }
        }
    }

    fn active(&self) -> bool {
        self.open.is_some()
    }
}

/// Preprocessor that protects custom embed tokens behind placeholders.
///
/// Call [`process`](Self::process) on the markdown source before parsing,
/// render as usual, then call [`restore`](Self::restore) on the rendered
/// HTML to swap placeholders for the final markup.
#[derive(Default)]
pub struct EmbedPreprocessor {
    videos: Vec<VideoEmbed>,
    raw_blocks: Vec<RawBlock>,
    warnings: Vec<String>,
}

impl EmbedPreprocessor {
    /// Create a new preprocessor.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Warnings generated during processing (e.g., unclosed `[html]`).
    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Consume the preprocessor and take ownership of its warnings.
    #[must_use]
    pub fn into_warnings(self) -> Vec<String> {
        self.warnings
    }

    /// Rewrite embed tokens to placeholders and return the prepared source.
    #[must_use]
    pub fn process(&mut self, input: &str) -> String {
        let stripped = self.extract_raw_html(input);
        self.rewrite_video_tokens(&stripped)
    }

    /// Replace placeholders in rendered HTML with their final markup.
    ///
    /// A placeholder that ended up as its own paragraph loses the wrapping
    /// `<p>` since the replacement is block-level content.
    pub fn restore(&self, html: &mut String) {
        for (i, video) in self.videos.iter().enumerate() {
            let markup = embed_markup(video);
            replace_placeholder(html, &video_placeholder(i), &markup);
        }
        for (i, block) in self.raw_blocks.iter().enumerate() {
            let markup = if block.verbatim {
                block.content.clone()
            } else {
                escape_html(&block.content)
            };
            replace_placeholder(html, &raw_placeholder(i), &markup);
        }
    }

    /// Extract `[html]...[/html]` spans into placeholders.
    ///
    /// Spans may open and close mid-line and may span multiple lines. While
    /// a span is open everything (including would-be fences) is captured,
    /// matching the token's "swallow verbatim" contract.
    fn extract_raw_html(&mut self, input: &str) -> String {
        let mut out = String::with_capacity(input.len());
        let mut capture: Option<RawCapture> = None;
        let mut fence = FenceState::default();
        let lines: Vec<&str> = input.lines().collect();
        let line_count = lines.len();

        for (idx, line) in lines.into_iter().enumerate() {
            if capture.is_none() {
                fence.update(line);
                if fence.active() {
                    out.push_str(line);
                    push_line_end(&mut out, idx, line_count, input);
                    continue;
                }
            }

            let mut rest = line;
            loop {
                if let Some(mut cap) = capture.take() {
                    if let Some(pos) = rest.find(RAW_CLOSE) {
                        cap.buffer.push_str(&rest[..pos]);
                        self.raw_blocks[cap.index] = RawBlock {
                            content: cap.buffer,
                            verbatim: true,
                        };
                        rest = &rest[pos + RAW_CLOSE.len()..];
                        continue;
                    }
                    cap.buffer.push_str(rest);
                    cap.buffer.push('\n');
                    capture = Some(cap);
                    break;
                }
                match find_outside_code(rest, RAW_OPEN) {
                    Some(pos) => {
                        out.push_str(&rest[..pos]);
                        let index = self.raw_blocks.len();
                        self.raw_blocks.push(RawBlock::default());
                        out.push_str(&raw_placeholder(index));
                        capture = Some(RawCapture {
                            index,
                            buffer: String::new(),
                            start_line: idx + 1,
                        });
                        rest = &rest[pos + RAW_OPEN.len()..];
                    }
                    None => {
                        out.push_str(rest);
                        break;
                    }
                }
            }

            if capture.is_none() {
                push_line_end(&mut out, idx, line_count, input);
            }
        }

        if let Some(cap) = capture.take() {
            self.warnings.push(format!(
                "line {}: unclosed [html] block, emitting as literal text",
                cap.start_line
            ));
            self.raw_blocks[cap.index] = RawBlock {
                content: format!("{RAW_OPEN}{}", cap.buffer),
                verbatim: false,
            };
        }

        out
    }

    /// Rewrite `[youtube:id]` / `[vimeo:id]` tokens to placeholders.
    fn rewrite_video_tokens(&mut self, input: &str) -> String {
        let mut out = String::with_capacity(input.len());
        let mut fence = FenceState::default();
        let lines: Vec<&str> = input.lines().collect();
        let line_count = lines.len();

        for (idx, line) in lines.into_iter().enumerate() {
            fence.update(line);
            if fence.active() {
                out.push_str(line);
            } else {
                self.rewrite_video_line(line, &mut out);
            }
            push_line_end(&mut out, idx, line_count, input);
        }

        out
    }

    fn rewrite_video_line(&mut self, line: &str, out: &mut String) {
        let mut rest = line;
        'scan: loop {
            let mut in_code = false;
            for (i, c) in rest.char_indices() {
                if c == '`' {
                    in_code = !in_code;
                    continue;
                }
                if in_code || c != '[' {
                    continue;
                }
                if let Some((token_len, embed)) = parse_video_token(&rest[i..]) {
                    out.push_str(&rest[..i]);
                    let index = self.videos.len();
                    self.videos.push(embed);
                    out.push_str(&video_placeholder(index));
                    rest = &rest[i + token_len..];
                    continue 'scan;
                }
            }
            out.push_str(rest);
            return;
        }
    }
}

/// Preserve the source's line endings, including a trailing newline.
fn push_line_end(out: &mut String, idx: usize, line_count: usize, input: &str) {
    if idx < line_count - 1 || input.ends_with('\n') {
        out.push('\n');
    }
}

/// Find `token` in `s`, skipping backtick-delimited inline code spans.
fn find_outside_code(s: &str, token: &str) -> Option<usize> {
    let mut in_code = false;
    for (i, c) in s.char_indices() {
        if c == '`' {
            in_code = !in_code;
            continue;
        }
        if !in_code && s[i..].starts_with(token) {
            return Some(i);
        }
    }
    None
}

/// Parse a video token at the start of `s` (which begins with `[`).
///
/// Returns the token's byte length and the embed, or `None` if the bracket
/// does not form a valid token (wrong provider, missing `]`, bad id chars).
fn parse_video_token(s: &str) -> Option<(usize, VideoEmbed)> {
    let (provider, prefix) = if s.starts_with("[youtube:") {
        (VideoProvider::YouTube, "[youtube:")
    } else if s.starts_with("[vimeo:") {
        (VideoProvider::Vimeo, "[vimeo:")
    } else {
        return None;
    };

    let rest = &s[prefix.len()..];
    let end = rest.find(']')?;
    let id = &rest[..end];
    let valid = !id.is_empty()
        && match provider {
            VideoProvider::YouTube => id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'),
            VideoProvider::Vimeo => id.chars().all(|c| c.is_ascii_digit()),
        };
    if !valid {
        return None;
    }

    Some((
        prefix.len() + end + 1,
        VideoEmbed {
            provider,
            id: id.to_owned(),
        },
    ))
}

/// Responsive iframe wrapper sized via padding (16:9).
fn embed_markup(video: &VideoEmbed) -> String {
    format!(
        r#"<div class="video-embed" style="position:relative;padding-bottom:56.25%;height:0;overflow:hidden;"><iframe src="{}" style="position:absolute;top:0;left:0;width:100%;height:100%;border:0;" allowfullscreen loading="lazy"></iframe></div>"#,
        video.provider.embed_url(&video.id)
    )
}

fn video_placeholder(index: usize) -> String {
    format!("{{{{VIDEO_{index}}}}}")
}

fn raw_placeholder(index: usize) -> String {
    format!("{{{{RAW_HTML_{index}}}}}")
}

/// Replace a placeholder, unwrapping a surrounding `<p>` when present.
fn replace_placeholder(html: &mut String, placeholder: &str, markup: &str) {
    let wrapped = format!("<p>{placeholder}</p>");
    if html.contains(&wrapped) {
        *html = html.replace(&wrapped, markup);
    }
    if html.contains(placeholder) {
        *html = html.replace(placeholder, markup);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_youtube_token_rewritten() {
        let mut pp = EmbedPreprocessor::new();
        let out = pp.process("Intro\n\n[youtube:dQw4w9WgXcQ]\n\nOutro");
        assert!(out.contains("{{VIDEO_0}}"));
        assert!(!out.contains("[youtube:"));
    }

    #[test]
    fn test_vimeo_token_rewritten() {
        let mut pp = EmbedPreprocessor::new();
        let out = pp.process("[vimeo:123456789]");
        assert!(out.contains("{{VIDEO_0}}"));
    }

    #[test]
    fn test_vimeo_rejects_non_digits() {
        let mut pp = EmbedPreprocessor::new();
        let out = pp.process("[vimeo:abc]");
        assert_eq!(out, "[vimeo:abc]");
    }

    #[test]
    fn test_invalid_id_left_literal() {
        let mut pp = EmbedPreprocessor::new();
        let out = pp.process("[youtube:bad id!]");
        assert_eq!(out, "[youtube:bad id!]");
    }

    #[test]
    fn test_token_inside_fence_untouched() {
        let mut pp = EmbedPreprocessor::new();
        let out = pp.process("```\n[youtube:dQw4w9WgXcQ]\n```");
        assert!(out.contains("[youtube:dQw4w9WgXcQ]"));
        assert!(!out.contains("{{VIDEO_"));
    }

    #[test]
    fn test_token_inside_inline_code_untouched() {
        let mut pp = EmbedPreprocessor::new();
        let out = pp.process("Use `[youtube:dQw4w9WgXcQ]` in posts");
        assert!(out.contains("`[youtube:dQw4w9WgXcQ]`"));
    }

    #[test]
    fn test_multiple_videos_numbered() {
        let mut pp = EmbedPreprocessor::new();
        let out = pp.process("[youtube:aaa111]\n\n[vimeo:42]");
        assert!(out.contains("{{VIDEO_0}}"));
        assert!(out.contains("{{VIDEO_1}}"));
    }

    #[test]
    fn test_raw_html_single_line() {
        let mut pp = EmbedPreprocessor::new();
        let out = pp.process("before [html]<b>x</b>[/html] after");
        assert_eq!(out, "before {{RAW_HTML_0}} after");

        let mut html = "<p>before {{RAW_HTML_0}} after</p>".to_owned();
        pp.restore(&mut html);
        assert_eq!(html, "<p>before <b>x</b> after</p>");
    }

    #[test]
    fn test_raw_html_multi_line() {
        let mut pp = EmbedPreprocessor::new();
        let out = pp.process("[html]\n<div>\n  <span>hi</span>\n</div>\n[/html]");
        assert!(out.contains("{{RAW_HTML_0}}"));
        assert!(!out.contains("<div>"));

        let mut html = "<p>{{RAW_HTML_0}}</p>".to_owned();
        pp.restore(&mut html);
        assert!(html.contains("<span>hi</span>"));
        assert!(!html.contains("<p>"));
    }

    #[test]
    fn test_raw_html_content_not_video_scanned() {
        let mut pp = EmbedPreprocessor::new();
        let out = pp.process("[html][youtube:dQw4w9WgXcQ][/html]");
        assert!(out.contains("{{RAW_HTML_0}}"));
        assert!(!out.contains("{{VIDEO_"));
    }

    #[test]
    fn test_unclosed_raw_html_degrades_to_literal() {
        let mut pp = EmbedPreprocessor::new();
        let _ = pp.process("[html]<b>never closed");
        assert!(pp.warnings().iter().any(|w| w.contains("unclosed")));

        let mut html = "<p>{{RAW_HTML_0}}</p>".to_owned();
        pp.restore(&mut html);
        assert!(html.contains("&lt;b&gt;never closed"));
    }

    #[test]
    fn test_restore_unwraps_paragraph() {
        let mut pp = EmbedPreprocessor::new();
        let _ = pp.process("[youtube:dQw4w9WgXcQ]");
        let mut html = "<p>{{VIDEO_0}}</p>".to_owned();
        pp.restore(&mut html);
        assert!(html.starts_with(r#"<div class="video-embed""#));
        assert!(html.contains("https://www.youtube.com/embed/dQw4w9WgXcQ"));
        assert!(!html.contains("<p>"));
    }

    #[test]
    fn test_embed_urls() {
        assert_eq!(
            VideoProvider::YouTube.embed_url("abc"),
            "https://www.youtube.com/embed/abc"
        );
        assert_eq!(
            VideoProvider::Vimeo.embed_url("42"),
            "https://player.vimeo.com/video/42"
        );
    }

    #[test]
    fn test_preserves_line_endings() {
        let mut pp = EmbedPreprocessor::new();
        let input = "Line 1\nLine 2\n";
        assert_eq!(pp.process(input), input);
    }

    #[test]
    fn test_fence_state_tilde() {
        let mut fence = FenceState::default();
        fence.update("~~~");
        assert!(fence.active());
        fence.update("[youtube:x]");
        assert!(fence.active());
        fence.update("~~~");
        assert!(!fence.active());
    }

    #[test]
    fn test_fence_longer_close_required() {
        let mut fence = FenceState::default();
        fence.update("````");
        assert!(fence.active());
        fence.update("```");
        assert!(fence.active());
        fence.update("````");
        assert!(!fence.active());
    }
}
