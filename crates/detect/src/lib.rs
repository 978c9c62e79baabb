//! List-likelihood classification for captured text.
//!
//! Decides whether free-form text plausibly represents a delimiter-separated
//! list of short tokens rather than prose, SQL, or a code fragment. The
//! decision is a short-circuiting cascade of named rules, ordered cheap to
//! expensive, tuned for precision over recall: a missed list costs far less
//! than a suggestion firing on ordinary prose.

mod rules;

use rules::{RuleContext, RULES};

/// Thresholds for the list-likelihood cascade.
///
/// The prose heuristics are empirically chosen defaults with no derivation
/// behind them; treat them as a starting point and calibrate against a
/// labeled corpus before trusting them further.
#[derive(Debug, Clone)]
pub struct DetectConfig {
    /// Inputs longer than this (in chars) are rejected outright. Cost
    /// control, not a semantic signal.
    pub max_len: usize,
    /// Tokens longer than this fail the shape rule.
    pub max_token_len: usize,
    /// Minimum token count for a sequence to read as a list.
    pub min_tokens: usize,
    /// CJK share of the whole text above which long-average tokens read as
    /// a sentence rather than short IDs.
    pub cjk_ratio_limit: f64,
    /// Average token length paired with `cjk_ratio_limit`.
    pub cjk_avg_len_limit: f64,
    /// A single token holding more CJK chars than this reads as a phrase.
    pub cjk_token_limit: usize,
    /// Max/min token length ratio above which a short sequence reads as prose.
    pub len_ratio_limit: f64,
    /// Sequences with at least this many tokens are exempt from the
    /// length-ratio rule.
    pub len_ratio_token_floor: usize,
}

impl Default for DetectConfig {
    fn default() -> Self {
        Self {
            max_len: 10_000,
            max_token_len: 200,
            min_tokens: 2,
            cjk_ratio_limit: 0.5,
            cjk_avg_len_limit: 3.0,
            cjk_token_limit: 6,
            len_ratio_limit: 5.0,
            len_ratio_token_floor: 10,
        }
    }
}

/// Seam for consumers that only need a verdict, not the detector itself.
pub trait ListClassifier: Send + Sync {
    fn looks_like_list(&self, text: &str) -> bool;
}

/// Classifier over statistical properties of token sequences.
///
/// Pure function of the input string - no hidden dependence on prior calls.
#[derive(Debug, Clone, Default)]
pub struct ListDetector {
    config: DetectConfig,
}

impl ListDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: DetectConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DetectConfig {
        &self.config
    }

    /// Whether `text` plausibly represents a separated list of short tokens.
    pub fn looks_like_list(&self, text: &str) -> bool {
        let trimmed = text.trim();
        // Size gate runs before the evaluation context is built.
        if trimmed.is_empty() || trimmed.chars().count() > self.config.max_len {
            return false;
        }

        let ctx = RuleContext::new(trimmed);
        for (name, rule) in RULES {
            if !rule(&self.config, &ctx) {
                tracing::trace!(rule = name, "candidate rejected");
                return false;
            }
        }
        true
    }
}

impl ListClassifier for ListDetector {
    fn looks_like_list(&self, text: &str) -> bool {
        ListDetector::looks_like_list(self, text)
    }
}

/// Classify with default thresholds.
pub fn looks_like_list(text: &str) -> bool {
    ListDetector::new().looks_like_list(text)
}
