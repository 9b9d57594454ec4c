//! Event-driven HTML writer over the pulldown-cmark event stream.

use std::fmt::Write;

use pulldown_cmark::{Alignment, CodeBlockKind, Event, HeadingLevel, Tag, TagEnd};

use crate::media;
use crate::util::escape_html;

/// Captures fenced/indented code block content until the block ends.
#[derive(Default)]
struct CodeCapture {
    active: bool,
    language: Option<String>,
    buffer: String,
}

impl CodeCapture {
    fn start(&mut self, language: Option<String>) {
        self.active = true;
        self.language = language;
        self.buffer.clear();
    }

    fn end(&mut self) -> (Option<String>, String) {
        self.active = false;
        (self.language.take(), std::mem::take(&mut self.buffer))
    }
}

/// Column alignment and header tracking for the current table.
#[derive(Default)]
struct TableContext {
    in_head: bool,
    alignments: Vec<Alignment>,
    cell: usize,
}

impl TableContext {
    fn alignment_style(&self) -> &'static str {
        match self.alignments.get(self.cell) {
            Some(Alignment::Left) => r#" style="text-align:left""#,
            Some(Alignment::Center) => r#" style="text-align:center""#,
            Some(Alignment::Right) => r#" style="text-align:right""#,
            Some(Alignment::None) | None => "",
        }
    }
}

/// Collects image alt text while suppressing inline markup inside it.
#[derive(Default)]
struct AltCapture {
    active: bool,
    text: String,
}

/// Single-pass markdown-to-HTML writer.
///
/// Produces a flat HTML fragment: bare `<h1>`–`<h6>` headings, `<p>`
/// paragraphs with `<br>` for single newlines, GFM tables, task-list
/// checkboxes, and lazy-loaded images with placeholder fallback.
pub struct HtmlWriter {
    out: String,
    code: CodeCapture,
    table: TableContext,
    alt: AltCapture,
    pending_image: Option<(String, String)>,
}

impl HtmlWriter {
    /// Create a new writer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            out: String::with_capacity(1024),
            code: CodeCapture::default(),
            table: TableContext::default(),
            alt: AltCapture::default(),
            pending_image: None,
        }
    }

    /// Render an event stream and return the HTML fragment.
    #[must_use]
    pub fn render<'a, I>(mut self, events: I) -> String
    where
        I: Iterator<Item = Event<'a>>,
    {
        for event in events {
            self.process_event(event);
        }
        self.out
    }

    fn process_event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => self.inline_code(&code),
            Event::Html(html) | Event::InlineHtml(html) => self.out.push_str(&html),
            Event::SoftBreak => {
                if self.code.active {
                    self.code.buffer.push('\n');
                } else {
                    // Single newlines inside a paragraph become line breaks.
                    self.out.push_str("<br>");
                }
            }
            Event::HardBreak => self.out.push_str("<br>"),
            Event::Rule => self.out.push_str("<hr>"),
            Event::TaskListMarker(checked) => {
                if checked {
                    self.out.push_str(r#"<input type="checkbox" checked disabled> "#);
                } else {
                    self.out.push_str(r#"<input type="checkbox" disabled> "#);
                }
            }
            _ => {}
        }
    }

    /// Write inline markup unless we are capturing image alt text.
    fn inline(&mut self, markup: &str) {
        if !self.alt.active {
            self.out.push_str(markup);
        }
    }

    fn start_tag(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => {
                if !self.code.active {
                    self.out.push_str("<p>");
                }
            }
            Tag::Heading { level, .. } => {
                write!(self.out, "<h{}>", level_num(level)).unwrap();
            }
            Tag::BlockQuote(_) => self.out.push_str("<blockquote>"),
            Tag::CodeBlock(kind) => {
                let lang = match kind {
                    CodeBlockKind::Fenced(info) if !info.is_empty() => info
                        .split_whitespace()
                        .next()
                        .map(std::borrow::ToOwned::to_owned),
                    _ => None,
                };
                self.code.start(lang);
            }
            Tag::List(start) => match start {
                Some(1) => self.out.push_str("<ol>"),
                Some(n) => write!(self.out, r#"<ol start="{n}">"#).unwrap(),
                None => self.out.push_str("<ul>"),
            },
            Tag::Item => self.out.push_str("<li>"),
            Tag::Table(alignments) => {
                self.table.alignments = alignments;
                self.table.in_head = false;
                self.table.cell = 0;
                self.out.push_str("<table>");
            }
            Tag::TableHead => {
                self.table.in_head = true;
                self.table.cell = 0;
                self.out.push_str("<thead><tr>");
            }
            Tag::TableRow => {
                self.table.cell = 0;
                self.out.push_str("<tr>");
            }
            Tag::TableCell => {
                let style = self.table.alignment_style();
                let tag = if self.table.in_head { "th" } else { "td" };
                write!(self.out, "<{tag}{style}>").unwrap();
            }
            Tag::Emphasis => self.inline("<em>"),
            Tag::Strong => self.inline("<strong>"),
            Tag::Strikethrough => self.inline("<s>"),
            Tag::Link { dest_url, .. } => {
                let tag = format!(r#"<a href="{}">"#, escape_html(&dest_url));
                self.inline(&tag);
            }
            Tag::Image {
                dest_url, title, ..
            } => {
                self.alt.active = true;
                self.alt.text.clear();
                self.pending_image = Some((dest_url.to_string(), title.to_string()));
            }
            _ => {}
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => {
                if !self.code.active {
                    self.out.push_str("</p>");
                }
            }
            TagEnd::Heading(level) => {
                write!(self.out, "</h{}>", level_num(level)).unwrap();
            }
            TagEnd::BlockQuote(_) => self.out.push_str("</blockquote>"),
            TagEnd::CodeBlock => {
                let (lang, content) = self.code.end();
                if let Some(lang) = lang {
                    write!(
                        self.out,
                        r#"<pre><code class="language-{}">{}</code></pre>"#,
                        escape_html(&lang),
                        escape_html(&content)
                    )
                    .unwrap();
                } else {
                    write!(self.out, "<pre><code>{}</code></pre>", escape_html(&content))
                        .unwrap();
                }
            }
            TagEnd::List(ordered) => {
                self.out.push_str(if ordered { "</ol>" } else { "</ul>" });
            }
            TagEnd::Item => self.out.push_str("</li>"),
            TagEnd::Table => self.out.push_str("</tbody></table>"),
            TagEnd::TableHead => {
                self.out.push_str("</tr></thead><tbody>");
                self.table.in_head = false;
            }
            TagEnd::TableRow => self.out.push_str("</tr>"),
            TagEnd::TableCell => {
                self.out
                    .push_str(if self.table.in_head { "</th>" } else { "</td>" });
                self.table.cell += 1;
            }
            TagEnd::Emphasis => self.inline("</em>"),
            TagEnd::Strong => self.inline("</strong>"),
            TagEnd::Strikethrough => self.inline("</s>"),
            TagEnd::Link => self.inline("</a>"),
            TagEnd::Image => {
                self.alt.active = false;
                let alt = std::mem::take(&mut self.alt.text);
                if let Some((src, title)) = self.pending_image.take() {
                    media::write_img(&src, &alt, &title, &mut self.out);
                }
            }
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        if self.code.active {
            self.code.buffer.push_str(text);
        } else if self.alt.active {
            self.alt.text.push_str(text);
        } else {
            self.out.push_str(&escape_html(text));
        }
    }

    fn inline_code(&mut self, code: &str) {
        if self.alt.active {
            self.alt.text.push_str(code);
        } else {
            write!(self.out, "<code>{}</code>", escape_html(code)).unwrap();
        }
    }
}

impl Default for HtmlWriter {
    fn default() -> Self {
        Self::new()
    }
}

fn level_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser_options;
    use pretty_assertions::assert_eq;
    use pulldown_cmark::Parser;

    fn render(markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, parser_options());
        HtmlWriter::new().render(parser)
    }

    #[test]
    fn test_paragraph() {
        assert_eq!(render("Hello, world!"), "<p>Hello, world!</p>");
    }

    #[test]
    fn test_heading_bare_tags() {
        assert_eq!(render("# Title"), "<h1>Title</h1>");
        assert_eq!(render("###### Deep"), "<h6>Deep</h6>");
    }

    #[test]
    fn test_heading_not_wrapped_in_paragraph() {
        let html = render("# Title");
        assert!(!html.contains("<p>"));
    }

    #[test]
    fn test_emphasis_nesting() {
        let html = render("***both*** **bold** *italic*");
        assert!(html.contains("<em><strong>both</strong></em>"));
        assert!(html.contains("<strong>bold</strong>"));
        assert!(html.contains("<em>italic</em>"));
    }

    #[test]
    fn test_strikethrough() {
        assert!(render("~~gone~~").contains("<s>gone</s>"));
    }

    #[test]
    fn test_inline_code_escaped() {
        assert!(render("`<b>`").contains("<code>&lt;b&gt;</code>"));
    }

    #[test]
    fn test_code_block_with_language() {
        let html = render("```rust\nfn main() {}\n```");
        assert!(html.contains(r#"<pre><code class="language-rust">"#));
        assert!(html.contains("fn main() {}"));
    }

    #[test]
    fn test_code_block_without_language() {
        let html = render("```\nplain\n```");
        assert!(html.contains("<pre><code>plain"));
    }

    #[test]
    fn test_table_with_separator() {
        let html = render("A|B\n-|-\n1|2");
        assert!(html.contains("<table>"));
        assert!(html.contains("<thead><tr><th>A</th><th>B</th></tr></thead>"));
        assert!(html.contains("<tbody><tr><td>1</td><td>2</td></tr></tbody>"));
    }

    #[test]
    fn test_pipe_line_without_separator_stays_text() {
        let html = render("A|B\n1|2");
        assert!(!html.contains("<table>"));
        assert!(html.contains("A|B"));
    }

    #[test]
    fn test_table_alignment() {
        let html = render("| L | C | R |\n|:--|:-:|--:|\n| a | b | c |");
        assert!(html.contains(r#"<th style="text-align:left">"#));
        assert!(html.contains(r#"<th style="text-align:center">"#));
        assert!(html.contains(r#"<th style="text-align:right">"#));
    }

    #[test]
    fn test_single_newline_becomes_br() {
        assert_eq!(render("one\ntwo"), "<p>one<br>two</p>");
    }

    #[test]
    fn test_blank_line_splits_paragraphs() {
        assert_eq!(render("one\n\ntwo"), "<p>one</p><p>two</p>");
    }

    #[test]
    fn test_horizontal_rule() {
        assert!(render("above\n\n---\n\nbelow").contains("<hr>"));
        assert!(render("above\n\n***\n\nbelow").contains("<hr>"));
    }

    #[test]
    fn test_lists() {
        let html = render("- a\n- b");
        assert!(html.contains("<ul><li>a</li><li>b</li></ul>"));

        let html = render("1. first\n2. second");
        assert!(html.contains("<ol>"));
    }

    #[test]
    fn test_task_list() {
        let html = render("- [ ] open\n- [x] done");
        assert!(html.contains(r#"<input type="checkbox" disabled>"#));
        assert!(html.contains(r#"<input type="checkbox" checked disabled>"#));
    }

    #[test]
    fn test_blockquote() {
        let html = render("> quoted");
        assert!(html.contains("<blockquote>"));
        assert!(html.contains("</blockquote>"));
    }

    #[test]
    fn test_link() {
        let html = render("[text](https://example.com)");
        assert!(html.contains(r#"<a href="https://example.com">text</a>"#));
    }

    #[test]
    fn test_image_lazy_and_alt() {
        let html = render("![A photo](https://example.com/a.png)");
        assert!(html.contains(r#"src="https://example.com/a.png""#));
        assert!(html.contains(r#"alt="A photo""#));
        assert!(html.contains(r#"loading="lazy""#));
    }

    #[test]
    fn test_image_internal_uri_rewritten() {
        let html = render("![pic](wix:image://v1/abc123/foo.jpg#originWidth=800)");
        assert!(html.contains(r#"src="https://static.wixstatic.com/media/abc123""#));
    }

    #[test]
    fn test_image_inline_markup_stripped_from_alt() {
        let html = render("![some *styled* alt](https://example.com/a.png)");
        assert!(html.contains(r#"alt="some styled alt""#));
    }

    #[test]
    fn test_text_escaped() {
        let html = render("5 < 6 & 7 > 2");
        assert!(html.contains("5 &lt; 6 &amp; 7 &gt; 2"));
    }
}
