//! Tunable thresholds for the scoring rules.
//!
//! Defaults encode the documented scoring bands; widget hosts can override
//! them through deserialized config without touching the rule code.

use serde::{Deserialize, Serialize};

/// Knobs for the SEO rules. Lengths are in characters, shares in percent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeoThresholds {
    /// Optimal SEO title length band, inclusive.
    pub title_len_min: usize,
    pub title_len_max: usize,
    /// Titles up to this length still earn partial credit.
    pub title_len_hard_max: usize,
    /// Optimal meta description length band, inclusive.
    pub desc_len_min: usize,
    pub desc_len_max: usize,
    /// Descriptions within this wider band earn partial credit.
    pub desc_len_soft_min: usize,
    pub desc_len_soft_max: usize,
    /// Word-count tiers for content length.
    pub words_excellent: usize,
    pub words_good: usize,
    pub words_minimum: usize,
    /// Keyword density band in percent, inclusive.
    pub density_min: f64,
    pub density_max: f64,
    /// Skip the introduction check below this many words.
    pub intro_check_min_words: usize,
    /// Structural checks (missing H2, missing links) only flag documents
    /// longer than this.
    pub structure_min_words: usize,
    /// More external links than this gets flagged.
    pub external_links_max: usize,
}

impl Default for SeoThresholds {
    fn default() -> Self {
        Self {
            title_len_min: 50,
            title_len_max: 60,
            title_len_hard_max: 70,
            desc_len_min: 120,
            desc_len_max: 160,
            desc_len_soft_min: 100,
            desc_len_soft_max: 170,
            words_excellent: 600,
            words_good: 300,
            words_minimum: 150,
            density_min: 0.5,
            density_max: 2.5,
            intro_check_min_words: 50,
            structure_min_words: 300,
            external_links_max: 5,
        }
    }
}

/// Knobs for the readability rules. Ratios are fractions, not percent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadabilityThresholds {
    /// Average sentence length tiers, in words.
    pub sentence_len_good: f64,
    pub sentence_len_ok: f64,
    pub sentence_len_max: f64,
    /// A sentence longer than this counts as long.
    pub long_sentence_words: usize,
    /// Share of long sentences that still earns partial credit.
    pub long_sentence_share: f64,
    /// A paragraph longer than this counts as long.
    pub long_paragraph_words: usize,
    pub long_paragraph_share: f64,
    /// Words-per-subheading tiers.
    pub words_per_heading_good: usize,
    pub words_per_heading_ok: usize,
    /// Documents longer than this are flagged when they have no subheadings.
    pub heading_required_words: usize,
    /// Transition words per paragraph tiers.
    pub transition_ratio_good: f64,
    pub transition_ratio_ok: f64,
    /// Passive auxiliaries per sentence tiers.
    pub passive_ratio_good: f64,
    pub passive_ratio_ok: f64,
    pub passive_ratio_max: f64,
    /// A run is this many consecutive sentences of near-equal length.
    pub variety_run_len: usize,
    /// Adjacent sentences within this word-count difference extend a run.
    pub variety_tolerance: usize,
    /// Fewer runs than this still earns partial credit.
    pub variety_max_runs: usize,
}

impl Default for ReadabilityThresholds {
    fn default() -> Self {
        Self {
            sentence_len_good: 15.0,
            sentence_len_ok: 20.0,
            sentence_len_max: 25.0,
            long_sentence_words: 25,
            long_sentence_share: 0.25,
            long_paragraph_words: 150,
            long_paragraph_share: 0.30,
            words_per_heading_good: 250,
            words_per_heading_ok: 400,
            heading_required_words: 300,
            transition_ratio_good: 0.3,
            transition_ratio_ok: 0.2,
            passive_ratio_good: 0.2,
            passive_ratio_ok: 0.3,
            passive_ratio_max: 0.5,
            variety_run_len: 3,
            variety_tolerance: 2,
            variety_max_runs: 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_documented_bands() {
        let seo = SeoThresholds::default();
        assert_eq!((seo.title_len_min, seo.title_len_max), (50, 60));
        assert_eq!((seo.desc_len_min, seo.desc_len_max), (120, 160));
        assert!((seo.density_min - 0.5).abs() < f64::EPSILON);

        let read = ReadabilityThresholds::default();
        assert_eq!(read.long_sentence_words, 25);
        assert_eq!(read.long_paragraph_words, 150);
    }
}
