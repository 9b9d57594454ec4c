//! Score results, findings, and analysis inputs.

use serde::{Deserialize, Serialize};

/// Pass/warn/fail classification of a single finding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FindingStatus {
    Good,
    Ok,
    Bad,
}

/// Human-readable explanation produced by one scoring rule.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub status: FindingStatus,
    pub message: String,
}

impl Finding {
    pub fn good(message: impl Into<String>) -> Self {
        Self {
            status: FindingStatus::Good,
            message: message.into(),
        }
    }

    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            status: FindingStatus::Ok,
            message: message.into(),
        }
    }

    pub fn bad(message: impl Into<String>) -> Self {
        Self {
            status: FindingStatus::Bad,
            message: message.into(),
        }
    }
}

/// Outcome of an analysis pass: a 0-100 score and the findings behind it.
///
/// The score is the sum of per-rule point awards, capped at 100. Findings
/// appear in rule-evaluation order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub score: u8,
    pub findings: Vec<Finding>,
}

/// Post metadata fields that feed the SEO rules. All optional; empty strings
/// simply zero out the rules that depend on them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisMetadata {
    /// Display title of the post.
    pub title: String,
    /// Search-result title override.
    pub seo_title: String,
    /// Meta description for search results.
    pub seo_description: String,
    /// The term the author wants the post to rank for.
    pub focus_keyword: String,
}

/// Points awarded by one rule together with its finding.
pub(crate) struct RuleOutcome {
    pub points: u32,
    pub finding: Finding,
}

impl RuleOutcome {
    pub(crate) fn new(points: u32, finding: Finding) -> Self {
        Self { points, finding }
    }
}
