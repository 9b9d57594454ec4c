//! Plain-text statistics extracted from a markdown document.
//!
//! Both analyzers walk the parsed event stream once and score against the
//! numbers gathered here, so markdown syntax never leaks into word or
//! sentence counts.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

/// Characters that terminate a sentence.
const SENTENCE_ENDS: [char; 3] = ['.', '!', '?'];

/// Same dialect the renderer parses: GFM tables, strikethrough, task lists.
fn parser_options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
}

/// Aggregate counts over the visible text of a document.
#[derive(Clone, Debug, Default)]
pub struct DocumentStats {
    /// Visible text with markdown structure stripped. Blocks are separated
    /// by newlines, inline breaks collapse to spaces.
    pub plain_text: String,
    /// Lowercased copy of `plain_text`, for keyword matching.
    pub plain_lower: String,
    /// Visible text of each paragraph, in document order.
    pub paragraphs: Vec<String>,
    /// Whitespace-separated word total across all visible text.
    pub word_count: usize,
    /// Word count of each sentence, split on `.` `!` `?`.
    pub sentence_word_counts: Vec<usize>,
    /// Headings per level, `heading_counts[0]` being H1.
    pub heading_counts: [usize; 6],
    pub image_count: usize,
    pub images_missing_alt: usize,
    /// Links whose target does not start with `http`.
    pub internal_links: usize,
    pub external_links: usize,
}

impl DocumentStats {
    /// Walk the document once and collect every statistic the rules need.
    #[must_use]
    pub fn collect(source: &str) -> Self {
        let mut stats = Self::default();
        let mut paragraph: Option<String> = None;
        let mut alt: Option<String> = None;

        for event in Parser::new_ext(source, parser_options()) {
            match event {
                Event::Start(tag) => match tag {
                    Tag::Paragraph => paragraph = Some(String::new()),
                    Tag::Heading { level, .. } => {
                        stats.heading_counts[level as usize - 1] += 1;
                    }
                    Tag::Image { .. } => {
                        stats.image_count += 1;
                        alt = Some(String::new());
                    }
                    Tag::Link { dest_url, .. } => {
                        if dest_url.starts_with("http") {
                            stats.external_links += 1;
                        } else {
                            stats.internal_links += 1;
                        }
                    }
                    _ => {}
                },
                Event::End(tag) => match tag {
                    TagEnd::Paragraph => {
                        if let Some(text) = paragraph.take() {
                            let text = text.trim().to_owned();
                            if !text.is_empty() {
                                stats.paragraphs.push(text);
                            }
                        }
                        stats.end_block();
                    }
                    TagEnd::Image => {
                        if alt.take().is_some_and(|a| a.trim().is_empty()) {
                            stats.images_missing_alt += 1;
                        }
                    }
                    TagEnd::Heading(_) | TagEnd::Item | TagEnd::CodeBlock | TagEnd::BlockQuote(_) => {
                        stats.end_block();
                    }
                    TagEnd::TableCell => stats.push_text(" ", &mut paragraph),
                    TagEnd::TableRow | TagEnd::TableHead => stats.end_block(),
                    _ => {}
                },
                Event::Text(text) | Event::Code(text) => {
                    // Alt text describes an image; it is not prose.
                    if let Some(buffer) = alt.as_mut() {
                        buffer.push_str(&text);
                    } else {
                        stats.push_text(&text, &mut paragraph);
                    }
                }
                Event::SoftBreak | Event::HardBreak => stats.push_text(" ", &mut paragraph),
                _ => {}
            }
        }

        stats.plain_lower = stats.plain_text.to_lowercase();
        stats.word_count = stats.plain_text.split_whitespace().count();
        stats.sentence_word_counts = stats
            .plain_text
            .split(SENTENCE_ENDS)
            .map(|s| s.split_whitespace().count())
            .filter(|&words| words > 0)
            .collect();
        stats
    }

    fn push_text(&mut self, text: &str, paragraph: &mut Option<String>) {
        self.plain_text.push_str(text);
        if let Some(buffer) = paragraph.as_mut() {
            buffer.push_str(text);
        }
    }

    fn end_block(&mut self) {
        if !self.plain_text.is_empty() && !self.plain_text.ends_with('\n') {
            self.plain_text.push('\n');
        }
    }

    /// Number of sentences, floored at one so it can divide.
    #[must_use]
    pub fn sentence_count(&self) -> usize {
        self.sentence_word_counts.len().max(1)
    }

    /// Text of the opening paragraph, empty when the document has none.
    #[must_use]
    pub fn first_paragraph(&self) -> &str {
        self.paragraphs.first().map_or("", String::as_str)
    }

    /// Non-overlapping occurrences of a lowercased keyword in the text.
    #[must_use]
    pub fn keyword_occurrences(&self, keyword_lower: &str) -> usize {
        if keyword_lower.is_empty() {
            return 0;
        }
        self.plain_lower.matches(keyword_lower).count()
    }

    /// Headings below H1, the ones that section body content.
    #[must_use]
    pub fn subheading_count(&self) -> usize {
        self.heading_counts[1..].iter().sum()
    }
}
