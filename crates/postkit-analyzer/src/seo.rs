//! SEO scoring rules.
//!
//! Each rule is a pure function over the collected statistics, post
//! metadata, and thresholds. Rules that do not apply (no focus keyword, no
//! SEO title) return `None` and contribute neither points nor findings.
//! Raw points can exceed 100 on a well-optimized post; the total is capped.

use crate::config::SeoThresholds;
use crate::stats::DocumentStats;
use crate::types::{AnalysisMetadata, Finding, RuleOutcome, ScoreResult};

struct SeoContext<'a> {
    stats: &'a DocumentStats,
    meta: &'a AnalysisMetadata,
    /// Trimmed, lowercased focus keyword. Empty when none is set.
    keyword: String,
    t: &'a SeoThresholds,
}

type SeoRule = fn(&SeoContext) -> Option<RuleOutcome>;

/// Evaluation order fixes finding order in the output.
const RULES: &[SeoRule] = &[
    keyword_present,
    keyword_in_title,
    keyword_in_seo_title,
    seo_title_length,
    meta_description_length,
    keyword_in_meta_description,
    content_length,
    keyword_density,
    keyword_in_introduction,
    heading_structure,
    image_usage,
    internal_links,
    external_links,
];

/// Score a post's markdown and metadata against the default SEO thresholds.
#[must_use]
pub fn analyze_seo(source: &str, meta: &AnalysisMetadata) -> ScoreResult {
    analyze_seo_with(source, meta, &SeoThresholds::default())
}

/// Score with caller-supplied thresholds.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn analyze_seo_with(
    source: &str,
    meta: &AnalysisMetadata,
    thresholds: &SeoThresholds,
) -> ScoreResult {
    let stats = DocumentStats::collect(source);
    let ctx = SeoContext {
        stats: &stats,
        meta,
        keyword: meta.focus_keyword.trim().to_lowercase(),
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

fn keyword_present(ctx: &SeoContext) -> Option<RuleOutcome> {
    if ctx.keyword.is_empty() {
        Some(RuleOutcome::new(
            0,
            Finding::bad("No focus keyword set; keyword checks cannot run."),
        ))
    } else {
        Some(RuleOutcome::new(
            8,
            Finding::good(format!(
                "Focus keyword \"{}\" is set.",
                ctx.meta.focus_keyword.trim()
            )),
        ))
    }
}

fn keyword_in_title(ctx: &SeoContext) -> Option<RuleOutcome> {
    if ctx.keyword.is_empty() || ctx.meta.title.is_empty() {
        return None;
    }
    let outcome = match ctx.meta.title.to_lowercase().find(&ctx.keyword) {
        Some(0) => RuleOutcome::new(12, Finding::good("Title starts with the focus keyword.")),
        Some(_) => RuleOutcome::new(
            8,
            Finding::ok("Title contains the focus keyword, but not at the start."),
        ),
        None => RuleOutcome::new(0, Finding::bad("Focus keyword does not appear in the title.")),
    };
    Some(outcome)
}

fn keyword_in_seo_title(ctx: &SeoContext) -> Option<RuleOutcome> {
    if ctx.keyword.is_empty() || ctx.meta.seo_title.is_empty() {
        return None;
    }
    if ctx.meta.seo_title.to_lowercase().contains(&ctx.keyword) {
        Some(RuleOutcome::new(
            10,
            Finding::good("SEO title contains the focus keyword."),
        ))
    } else {
        Some(RuleOutcome::new(
            0,
            Finding::bad("Focus keyword does not appear in the SEO title."),
        ))
    }
}

fn seo_title_length(ctx: &SeoContext) -> Option<RuleOutcome> {
    let len = ctx.meta.seo_title.chars().count();
    let outcome = if len == 0 {
        RuleOutcome::new(0, Finding::bad("SEO title is missing."))
    } else if (ctx.t.title_len_min..=ctx.t.title_len_max).contains(&len) {
        RuleOutcome::new(
            10,
            Finding::good(format!(
                "SEO title length ({len} characters) is in the {}-{} sweet spot.",
                ctx.t.title_len_min, ctx.t.title_len_max
            )),
        )
    } else if len <= ctx.t.title_len_hard_max {
        RuleOutcome::new(
            5,
            Finding::ok(format!(
                "SEO title is {len} characters; aim for {}-{}.",
                ctx.t.title_len_min, ctx.t.title_len_max
            )),
        )
    } else {
        RuleOutcome::new(
            0,
            Finding::bad(format!(
                "SEO title is too long ({len} characters); search results truncate it."
            )),
        )
    };
    Some(outcome)
}

fn meta_description_length(ctx: &SeoContext) -> Option<RuleOutcome> {
    let len = ctx.meta.seo_description.chars().count();
    let outcome = if len == 0 {
        RuleOutcome::new(0, Finding::bad("Meta description is missing."))
    } else if (ctx.t.desc_len_min..=ctx.t.desc_len_max).contains(&len) {
        RuleOutcome::new(
            12,
            Finding::good(format!(
                "Meta description length ({len} characters) is in the {}-{} sweet spot.",
                ctx.t.desc_len_min, ctx.t.desc_len_max
            )),
        )
    } else if (ctx.t.desc_len_soft_min..=ctx.t.desc_len_soft_max).contains(&len) {
        RuleOutcome::new(
            6,
            Finding::ok(format!(
                "Meta description is {len} characters; aim for {}-{}.",
                ctx.t.desc_len_min, ctx.t.desc_len_max
            )),
        )
    } else if len < ctx.t.desc_len_soft_min {
        RuleOutcome::new(0, Finding::bad("Meta description is too short."))
    } else {
        RuleOutcome::new(0, Finding::bad("Meta description is too long."))
    };
    Some(outcome)
}

fn keyword_in_meta_description(ctx: &SeoContext) -> Option<RuleOutcome> {
    if ctx.keyword.is_empty() || ctx.meta.seo_description.is_empty() {
        return None;
    }
    if ctx.meta.seo_description.to_lowercase().contains(&ctx.keyword) {
        Some(RuleOutcome::new(
            10,
            Finding::good("Meta description contains the focus keyword."),
        ))
    } else {
        Some(RuleOutcome::new(
            0,
            Finding::bad("Focus keyword does not appear in the meta description."),
        ))
    }
}

fn content_length(ctx: &SeoContext) -> Option<RuleOutcome> {
    let words = ctx.stats.word_count;
    let outcome = if words >= ctx.t.words_excellent {
        RuleOutcome::new(12, Finding::good(format!("Content length ({words} words) is excellent.")))
    } else if words >= ctx.t.words_good {
        RuleOutcome::new(8, Finding::good(format!("Content length ({words} words) is good.")))
    } else if words >= ctx.t.words_minimum {
        RuleOutcome::new(
            4,
            Finding::ok(format!(
                "Content is a bit short ({words} words); aim for {}+.",
                ctx.t.words_good
            )),
        )
    } else {
        RuleOutcome::new(
            0,
            Finding::bad(format!(
                "Content is too short ({words} words); write at least {}.",
                ctx.t.words_minimum
            )),
        )
    };
    Some(outcome)
}

#[allow(clippy::cast_precision_loss)]
fn keyword_density(ctx: &SeoContext) -> Option<RuleOutcome> {
    if ctx.keyword.is_empty() {
        return None;
    }
    let occurrences = ctx.stats.keyword_occurrences(&ctx.keyword);
    if occurrences == 0 {
        return Some(RuleOutcome::new(
            0,
            Finding::bad("Focus keyword does not appear in the content."),
        ));
    }
    let words = ctx.stats.word_count.max(1);
    let density = occurrences as f64 * 100.0 / words as f64;
    let outcome = if density >= ctx.t.density_min && density <= ctx.t.density_max {
        RuleOutcome::new(
            8,
            Finding::good(format!("Keyword density ({density:.1}%) is on target.")),
        )
    } else if density < ctx.t.density_min {
        RuleOutcome::new(
            4,
            Finding::ok(format!(
                "Keyword density ({density:.1}%) is low; use the keyword more often."
            )),
        )
    } else {
        RuleOutcome::new(
            0,
            Finding::bad(format!(
                "Keyword density ({density:.1}%) looks overused; reads as keyword stuffing."
            )),
        )
    };
    Some(outcome)
}

fn keyword_in_introduction(ctx: &SeoContext) -> Option<RuleOutcome> {
    if ctx.keyword.is_empty() || ctx.stats.word_count <= ctx.t.intro_check_min_words {
        return None;
    }
    if ctx
        .stats
        .first_paragraph()
        .to_lowercase()
        .contains(&ctx.keyword)
    {
        Some(RuleOutcome::new(
            8,
            Finding::good("Focus keyword appears in the opening paragraph."),
        ))
    } else {
        Some(RuleOutcome::new(
            0,
            Finding::bad("Focus keyword does not appear in the opening paragraph."),
        ))
    }
}

fn heading_structure(ctx: &SeoContext) -> Option<RuleOutcome> {
    let h1 = ctx.stats.heading_counts[0];
    let h2 = ctx.stats.heading_counts[1];

    let mut points = 0;
    if h1 <= 1 && h2 > 0 {
        points += 6;
    }
    if h2 > 0 {
        points += 4;
    }

    let finding = if h1 > 1 {
        Finding::bad(format!("{h1} H1 headings found; a post should have at most one."))
    } else if h2 > 0 {
        Finding::good(format!("Heading structure looks good ({h2} H2 sections)."))
    } else if ctx.stats.word_count > ctx.t.structure_min_words {
        Finding::bad("No H2 headings; break long content into sections.")
    } else {
        Finding::ok("No H2 headings yet; add sections as the post grows.")
    };
    Some(RuleOutcome::new(points, finding))
}

fn image_usage(ctx: &SeoContext) -> Option<RuleOutcome> {
    if ctx.stats.image_count == 0 {
        return Some(RuleOutcome::new(
            0,
            Finding::bad("No images; add at least one relevant image."),
        ));
    }
    if ctx.stats.images_missing_alt == 0 {
        Some(RuleOutcome::new(
            8,
            Finding::good(format!(
                "{} image(s) present, all with alt text.",
                ctx.stats.image_count
            )),
        ))
    } else {
        Some(RuleOutcome::new(
            4,
            Finding::bad(format!(
                "{} image(s) missing alt text.",
                ctx.stats.images_missing_alt
            )),
        ))
    }
}

fn internal_links(ctx: &SeoContext) -> Option<RuleOutcome> {
    let count = ctx.stats.internal_links;
    let outcome = if count >= 2 {
        RuleOutcome::new(6, Finding::good(format!("{count} internal links found.")))
    } else if count == 1 {
        RuleOutcome::new(3, Finding::ok("Only one internal link; add another."))
    } else if ctx.stats.word_count > ctx.t.structure_min_words {
        RuleOutcome::new(0, Finding::bad("No internal links; link to related posts."))
    } else {
        RuleOutcome::new(0, Finding::ok("No internal links yet."))
    };
    Some(outcome)
}

fn external_links(ctx: &SeoContext) -> Option<RuleOutcome> {
    let count = ctx.stats.external_links;
    let outcome = if count == 0 {
        RuleOutcome::new(0, Finding::ok("No external links; consider citing sources."))
    } else if count <= ctx.t.external_links_max {
        RuleOutcome::new(4, Finding::good(format!("{count} external link(s) found.")))
    } else {
        RuleOutcome::new(
            0,
            Finding::bad(format!(
                "{count} external links; trim to the most valuable sources."
            )),
        )
    };
    Some(outcome)
}
