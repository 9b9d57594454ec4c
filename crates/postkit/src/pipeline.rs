//! One-call pipeline for widget hosts.

use postkit_analyzer::{AnalysisMetadata, ScoreResult, analyze_readability_with, analyze_seo_with};
use postkit_renderer::render_markdown_full;
use postkit_schema::{PostInfo, json_ld_script};
use tracing::{debug, warn};

use crate::config::AnalyzerConfig;

/// Everything the widget needs to display a post and its authoring hints.
#[derive(Clone, Debug)]
pub struct PostContent {
    /// Rendered HTML fragment for the post body.
    pub html: String,
    pub seo: ScoreResult,
    pub readability: ScoreResult,
    /// JSON-LD `<script>` tag for the page head.
    pub structured_data: String,
    /// Renderer warnings worth surfacing in the editor (degraded input).
    pub warnings: Vec<String>,
}

/// Renders and scores posts with a fixed set of thresholds.
#[derive(Debug, Default)]
pub struct ContentPipeline {
    config: AnalyzerConfig,
}

impl ContentPipeline {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    /// Render the markdown and run both analyzers over the same source.
    #[must_use]
    pub fn process(
        &self,
        markdown: &str,
        meta: &AnalysisMetadata,
        post: &PostInfo,
    ) -> PostContent {
        let rendered = render_markdown_full(markdown);
        for warning in &rendered.warnings {
            warn!(%warning, "markdown degraded during rendering");
        }

        let seo = analyze_seo_with(markdown, meta, &self.config.seo);
        let readability = analyze_readability_with(markdown, &self.config.readability);
        debug!(
            html_bytes = rendered.html.len(),
            seo_score = seo.score,
            readability_score = readability.score,
            "processed post content"
        );

        PostContent {
            html: rendered.html,
            seo,
            readability,
            structured_data: json_ld_script(post),
            warnings: rendered.warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_process_produces_all_outputs() {
        let pipeline = ContentPipeline::new();
        let meta = AnalysisMetadata {
            title: "Rye bread".to_owned(),
            focus_keyword: "rye".to_owned(),
            ..AnalysisMetadata::default()
        };
        let post = PostInfo {
            title: "Rye bread".to_owned(),
            ..PostInfo::default()
        };

        let content = pipeline.process("# Rye bread\n\nA loaf of rye.", &meta, &post);
        assert!(content.html.contains("<h1>Rye bread</h1>"));
        assert!(content.seo.score <= 100);
        assert!(content.readability.score <= 100);
        assert!(content.structured_data.contains("BlogPosting"));
    }

    #[test]
    fn test_empty_post_is_handled() {
        let pipeline = ContentPipeline::new();
        let content = pipeline.process("", &AnalysisMetadata::default(), &PostInfo::default());
        assert_eq!(content.html, "");
        assert_eq!(content.readability.score, 0);
    }

    #[test]
    fn test_custom_thresholds_flow_through() {
        let config: AnalyzerConfig =
            toml::from_str("[seo]\nwords_minimum = 1\nwords_good = 2\n").unwrap();
        let pipeline = ContentPipeline::with_config(config);
        let meta = AnalysisMetadata::default();
        let content = pipeline.process("three words here.", &meta, &PostInfo::default());
        assert!(content
            .seo
            .findings
            .iter()
            .any(|f| f.message.contains("is good")));
    }
}
