//! Readability scoring rules.
//!
//! Seven rules whose maximum awards sum to exactly 100, so a flawless
//! document scores 100 without needing the cap. A document with no visible
//! words short-circuits to a zero score with a single finding.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::ReadabilityThresholds;
use crate::stats::DocumentStats;
use crate::types::{Finding, RuleOutcome, ScoreResult};

/// English transition words and phrases, matched case-insensitively on word
/// boundaries.
const TRANSITION_WORDS: &[&str] = &[
    "above all",
    "additionally",
    "also",
    "as a result",
    "because",
    "besides",
    "consequently",
    "finally",
    "first",
    "for example",
    "for instance",
    "furthermore",
    "hence",
    "however",
    "in addition",
    "in conclusion",
    "in contrast",
    "in fact",
    "in other words",
    "instead",
    "likewise",
    "meanwhile",
    "moreover",
    "nevertheless",
    "next",
    "on the other hand",
    "otherwise",
    "similarly",
    "therefore",
    "thus",
];

static TRANSITION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    let alternatives = TRANSITION_WORDS.join("|");
    Regex::new(&format!(r"(?i)\b(?:{alternatives})\b")).unwrap()
});

/// Auxiliary forms of "to be" used as a passive-voice proxy.
const PASSIVE_AUXILIARIES: &[&str] = &["am", "is", "are", "was", "were", "been", "being"];

struct ReadabilityContext<'a> {
    stats: &'a DocumentStats,
    t: &'a ReadabilityThresholds,
}

type ReadabilityRule = fn(&ReadabilityContext) -> Option<RuleOutcome>;

const RULES: &[ReadabilityRule] = &[
    sentence_length,
    long_sentence_share,
    paragraph_length,
    heading_density,
    transition_words,
    passive_voice,
    sentence_variety,
];

/// Score a post's markdown against the default readability thresholds.
#[must_use]
pub fn analyze_readability(source: &str) -> ScoreResult {
    analyze_readability_with(source, &ReadabilityThresholds::default())
}

/// Score with caller-supplied thresholds.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn analyze_readability_with(source: &str, thresholds: &ReadabilityThresholds) -> ScoreResult {
    let stats = DocumentStats::collect(source);
    if stats.word_count == 0 {
        return ScoreResult {
            score: 0,
            findings: vec![Finding::bad("Not enough content to analyze yet.")],
        };
    }

    let ctx = ReadabilityContext {
        stats: &stats,
        t: thresholds,
    };
    let mut points = 0u32;
    let mut findings = Vec::new();
    for rule in RULES {
        if let Some(outcome) = rule(&ctx) {
            points += outcome.points;
            findings.push(outcome.finding);
        }
    }

    ScoreResult {
        score: points.min(100) as u8,
        findings,
    }
}

#[allow(clippy::cast_precision_loss)]
fn sentence_length(ctx: &ReadabilityContext) -> Option<RuleOutcome> {
    let average = ctx.stats.word_count as f64 / ctx.stats.sentence_count() as f64;
    let outcome = if average <= ctx.t.sentence_len_good {
        RuleOutcome::new(
            20,
            Finding::good(format!("Average sentence length ({average:.1} words) is great.")),
        )
    } else if average <= ctx.t.sentence_len_ok {
        RuleOutcome::new(
            15,
            Finding::good(format!("Average sentence length ({average:.1} words) is good.")),
        )
    } else if average <= ctx.t.sentence_len_max {
        RuleOutcome::new(
            10,
            Finding::ok(format!(
                "Sentences average {average:.1} words; shorter sentences read easier."
            )),
        )
    } else {
        RuleOutcome::new(
            5,
            Finding::bad(format!(
                "Sentences average {average:.1} words; break long sentences up."
            )),
        )
    };
    Some(outcome)
}

#[allow(clippy::cast_precision_loss)]
fn long_sentence_share(ctx: &ReadabilityContext) -> Option<RuleOutcome> {
    let long = ctx
        .stats
        .sentence_word_counts
        .iter()
        .filter(|&&words| words > ctx.t.long_sentence_words)
        .count();
    let share = long as f64 / ctx.stats.sentence_count() as f64;

    let outcome = if long == 0 {
        RuleOutcome::new(
            15,
            Finding::good(format!(
                "No sentences longer than {} words.",
                ctx.t.long_sentence_words
            )),
        )
    } else if share < ctx.t.long_sentence_share {
        RuleOutcome::new(
            10,
            Finding::ok(format!(
                "{long} sentence(s) run past {} words.",
                ctx.t.long_sentence_words
            )),
        )
    } else {
        RuleOutcome::new(
            3,
            Finding::bad(format!(
                "Too many long sentences ({long}); aim for under {} words each.",
                ctx.t.long_sentence_words
            )),
        )
    };
    Some(outcome)
}

#[allow(clippy::cast_precision_loss)]
fn paragraph_length(ctx: &ReadabilityContext) -> Option<RuleOutcome> {
    let total = ctx.stats.paragraphs.len().max(1);
    let long = ctx
        .stats
        .paragraphs
        .iter()
        .filter(|p| p.split_whitespace().count() > ctx.t.long_paragraph_words)
        .count();
    let share = long as f64 / total as f64;

    let outcome = if long == 0 {
        RuleOutcome::new(
            15,
            Finding::good(format!(
                "No paragraphs longer than {} words.",
                ctx.t.long_paragraph_words
            )),
        )
    } else if share < ctx.t.long_paragraph_share {
        RuleOutcome::new(
            10,
            Finding::ok(format!(
                "{long} paragraph(s) run past {} words; consider splitting them.",
                ctx.t.long_paragraph_words
            )),
        )
    } else {
        RuleOutcome::new(
            3,
            Finding::bad(format!(
                "Too many long paragraphs ({long}); keep them under {} words.",
                ctx.t.long_paragraph_words
            )),
        )
    };
    Some(outcome)
}

fn heading_density(ctx: &ReadabilityContext) -> Option<RuleOutcome> {
    let subheadings = ctx.stats.subheading_count();
    if subheadings == 0 {
        let outcome = if ctx.stats.word_count > ctx.t.heading_required_words {
            RuleOutcome::new(0, Finding::bad("Long content with no subheadings; add sections."))
        } else {
            RuleOutcome::new(0, Finding::ok("No subheadings yet; add them as the post grows."))
        };
        return Some(outcome);
    }

    let words_per_heading = ctx.stats.word_count / subheadings;
    let outcome = if words_per_heading <= ctx.t.words_per_heading_good {
        RuleOutcome::new(
            15,
            Finding::good(format!(
                "Subheadings are well spaced ({words_per_heading} words per section)."
            )),
        )
    } else if words_per_heading <= ctx.t.words_per_heading_ok {
        RuleOutcome::new(
            10,
            Finding::ok(format!(
                "Sections average {words_per_heading} words; another subheading or two would help."
            )),
        )
    } else {
        RuleOutcome::new(
            5,
            Finding::ok(format!(
                "Sections average {words_per_heading} words; add more subheadings."
            )),
        )
    };
    Some(outcome)
}

#[allow(clippy::cast_precision_loss)]
fn transition_words(ctx: &ReadabilityContext) -> Option<RuleOutcome> {
    let count = TRANSITION_PATTERN.find_iter(&ctx.stats.plain_text).count();
    let paragraphs = ctx.stats.paragraphs.len().max(1);
    let ratio = count as f64 / paragraphs as f64;

    let outcome = if ratio >= ctx.t.transition_ratio_good {
        RuleOutcome::new(
            12,
            Finding::good(format!("Good use of transition words ({count} found).")),
        )
    } else if ratio >= ctx.t.transition_ratio_ok {
        RuleOutcome::new(
            8,
            Finding::ok(format!("Some transition words ({count}); a few more would help flow.")),
        )
    } else if count > 0 {
        RuleOutcome::new(
            4,
            Finding::ok(format!("Few transition words ({count}); the text may feel choppy.")),
        )
    } else {
        RuleOutcome::new(
            0,
            Finding::bad("No transition words found; connect your ideas."),
        )
    };
    Some(outcome)
}

#[allow(clippy::cast_precision_loss)]
fn passive_voice(ctx: &ReadabilityContext) -> Option<RuleOutcome> {
    let auxiliaries = ctx
        .stats
        .plain_lower
        .split_whitespace()
        .map(|word| word.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|word| PASSIVE_AUXILIARIES.contains(word))
        .count();
    let ratio = auxiliaries as f64 / ctx.stats.sentence_count() as f64;

    let outcome = if ratio < ctx.t.passive_ratio_good {
        RuleOutcome::new(15, Finding::good("Mostly active voice."))
    } else if ratio < ctx.t.passive_ratio_ok {
        RuleOutcome::new(12, Finding::ok("A little passive voice; mostly fine."))
    } else if ratio < ctx.t.passive_ratio_max {
        RuleOutcome::new(
            6,
            Finding::ok("Noticeable passive voice; rewrite some sentences actively."),
        )
    } else {
        RuleOutcome::new(
            0,
            Finding::bad("Heavy passive voice; prefer active constructions."),
        )
    };
    Some(outcome)
}

fn sentence_variety(ctx: &ReadabilityContext) -> Option<RuleOutcome> {
    let runs = steady_runs(
        &ctx.stats.sentence_word_counts,
        ctx.t.variety_run_len,
        ctx.t.variety_tolerance,
    );
    let outcome = if runs == 0 {
        RuleOutcome::new(8, Finding::good("Sentence lengths vary nicely."))
    } else if runs < ctx.t.variety_max_runs {
        RuleOutcome::new(
            5,
            Finding::ok(format!("{runs} stretch(es) of same-length sentences.")),
        )
    } else {
        RuleOutcome::new(
            0,
            Finding::bad("Many same-length sentences in a row; vary the rhythm."),
        )
    };
    Some(outcome)
}

/// Count maximal stretches of at least `run_len` consecutive sentences whose
/// adjacent word counts differ by at most `tolerance`.
fn steady_runs(counts: &[usize], run_len: usize, tolerance: usize) -> usize {
    let mut runs = 0;
    let mut current = 1;
    for pair in counts.windows(2) {
        if pair[0].abs_diff(pair[1]) <= tolerance {
            current += 1;
        } else {
            if current >= run_len {
                runs += 1;
            }
            current = 1;
        }
    }
    if current >= run_len {
        runs += 1;
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FindingStatus;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_content_short_circuits() {
        let result = analyze_readability("");
        assert_eq!(result.score, 0);
        assert_eq!(result.findings.len(), 1);
        assert_eq!(result.findings[0].status, FindingStatus::Bad);
    }

    #[test]
    fn test_markdown_only_content_short_circuits() {
        // An image with no visible text has zero words.
        let result = analyze_readability("![](a.png)");
        assert_eq!(result.score, 0);
    }

    #[test]
    fn test_well_written_post_scores_100() {
        let source = "## Writing well\n\n\
            Short sentences help readers move quickly. However, writers often forget \
            that simple structure beats clever phrasing every single time.\n\n\
            ## Keep it moving\n\n\
            For example, break long thoughts apart. Readers thank you for it because \
            each idea lands cleanly before the next one arrives.";
        let result = analyze_readability(source);
        assert_eq!(result.score, 100);
    }

    #[test]
    fn test_long_sentences_lower_the_score() {
        let rambling = "word ".repeat(40) + ".";
        let result = analyze_readability(&rambling);
        assert!(result.score < 100);
        assert!(result
            .findings
            .iter()
            .any(|f| f.message.contains("long sentences")));
    }

    #[test]
    fn test_transition_phrases_matched_case_insensitively() {
        assert_eq!(
            TRANSITION_PATTERN.find_iter("However, For Example works. nextdoor").count(),
            2
        );
    }

    #[test]
    fn test_passive_auxiliaries_counted_as_whole_words() {
        // "island" and "basis" must not count.
        let source = "The island was visited. The basis is sound. Results were shared.";
        let result = analyze_readability(source);
        // 3 auxiliaries over 3 sentences: heavy passive voice.
        assert!(result
            .findings
            .iter()
            .any(|f| f.message.contains("passive")));
    }

    #[test]
    fn test_monotone_run_detection() {
        // 5,6,7 is one run; the jump to 20 breaks it.
        assert_eq!(steady_runs(&[5, 6, 7, 20, 4], 3, 2), 1);
        // No adjacent pair within tolerance.
        assert_eq!(steady_runs(&[5, 10, 5, 10], 3, 2), 0);
        // Two separate runs.
        assert_eq!(steady_runs(&[5, 5, 5, 20, 8, 8, 8], 3, 2), 2);
        assert_eq!(steady_runs(&[], 3, 2), 0);
    }

    #[test]
    fn test_missing_subheadings_flagged_for_long_content() {
        let source = format!("{}.", "word ".repeat(320));
        let result = analyze_readability(&source);
        assert!(result
            .findings
            .iter()
            .any(|f| f.message.contains("no subheadings") && f.status == FindingStatus::Bad));
    }

    #[test]
    fn test_custom_thresholds_respected() {
        let thresholds = ReadabilityThresholds {
            long_sentence_words: 2,
            ..ReadabilityThresholds::default()
        };
        let result = analyze_readability_with("one two three four.", &thresholds);
        assert!(result
            .findings
            .iter()
            .any(|f| f.message.contains("long sentences") || f.message.contains("run past")));
    }
}
