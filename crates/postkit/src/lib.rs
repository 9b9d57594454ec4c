//! Blog post content pipeline.
//!
//! The facade crate for the post widget: render markdown to an HTML
//! fragment, score the source for SEO and readability, and emit
//! schema.org structured data, either piecemeal through the re-exported
//! functions or in one call through [`ContentPipeline`].
//!
//! # Example
//!
//! ```
//! use postkit::{AnalysisMetadata, ContentPipeline, PostInfo};
//!
//! let pipeline = ContentPipeline::new();
//! let meta = AnalysisMetadata {
//!     title: "Sourdough starters".to_owned(),
//!     focus_keyword: "sourdough".to_owned(),
//!     ..AnalysisMetadata::default()
//! };
//! let content = pipeline.process(
//!     "# Sourdough starters\n\nFeed it daily.",
//!     &meta,
//!     &PostInfo::default(),
//! );
//! assert!(content.html.contains("<h1>Sourdough starters</h1>"));
//! ```

mod config;
mod pipeline;

pub use config::{AnalyzerConfig, ConfigError};
pub use pipeline::{ContentPipeline, PostContent};

pub use postkit_analyzer::{
    AnalysisMetadata, Finding, FindingStatus, ReadabilityThresholds, ScoreResult, SeoThresholds,
    analyze_readability, analyze_readability_with, analyze_seo, analyze_seo_with,
};
pub use postkit_renderer::{RenderOutput, render_markdown, render_markdown_full};
pub use postkit_schema::{PostInfo, blog_posting, json_ld_script};
