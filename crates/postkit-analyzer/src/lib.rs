//! Content analysis for blog post widgets.
//!
//! Two independent scorers over the same markdown source:
//!
//! - [`analyze_seo`] checks keyword usage, metadata lengths, and document
//!   structure against on-page SEO heuristics.
//! - [`analyze_readability`] checks sentence rhythm, paragraph sizing, and
//!   voice.
//!
//! Both return a [`ScoreResult`]: a 0-100 score (per-rule points summed and
//! capped at 100) plus a list of [`Finding`]s explaining each award or miss.
//! Scoring is advisory and never fails; any input, including empty or
//! malformed markdown, produces a result.
//!
//! # Example
//!
//! ```
//! use postkit_analyzer::{AnalysisMetadata, analyze_seo};
//!
//! let meta = AnalysisMetadata {
//!     title: "Sourdough starters".to_owned(),
//!     focus_keyword: "sourdough".to_owned(),
//!     ..AnalysisMetadata::default()
//! };
//! let result = analyze_seo("Feeding a sourdough starter daily.", &meta);
//! assert!(result.score <= 100);
//! assert!(!result.findings.is_empty());
//! ```

mod config;
mod readability;
mod seo;
mod stats;
mod types;

pub use config::{ReadabilityThresholds, SeoThresholds};
pub use readability::{analyze_readability, analyze_readability_with};
pub use seo::{analyze_seo, analyze_seo_with};
pub use stats::DocumentStats;
pub use types::{AnalysisMetadata, Finding, FindingStatus, ScoreResult};
