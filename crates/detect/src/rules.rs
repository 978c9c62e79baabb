//! The ordered rule table behind the classifier.
//!
//! Each rule is a pure predicate over a shared evaluation context (trimmed
//! text, token sequence, derived statistics) returning `true` to pass the
//! candidate on. Keeping them as named entries lets every rule be unit
//! tested in isolation.

use crate::DetectConfig;
use listwise_text::{is_delimiter, tokenize};
use regex::Regex;
use std::sync::OnceLock;

/// CJK unified ideographs, the only non-Latin script tokens may carry.
pub(crate) fn is_cjk(ch: char) -> bool {
    ('\u{4e00}'..='\u{9fff}').contains(&ch)
}

/// Shared evaluation context built once per classification.
pub(crate) struct RuleContext<'a> {
    pub trimmed: &'a str,
    pub tokens: Vec<String>,
    /// Per-token lengths in chars, same order as `tokens`.
    pub token_lens: Vec<usize>,
    pub char_count: usize,
    pub cjk_count: usize,
}

impl<'a> RuleContext<'a> {
    pub fn new(trimmed: &'a str) -> Self {
        let tokens = tokenize(trimmed);
        let token_lens = tokens.iter().map(|t| t.chars().count()).collect();
        Self {
            trimmed,
            tokens,
            token_lens,
            char_count: trimmed.chars().count(),
            cjk_count: trimmed.chars().filter(|&c| is_cjk(c)).count(),
        }
    }

    fn avg_token_len(&self) -> f64 {
        if self.tokens.is_empty() {
            return 0.0;
        }
        self.token_lens.iter().sum::<usize>() as f64 / self.tokens.len() as f64
    }
}

type Rule = fn(&DetectConfig, &RuleContext) -> bool;

/// The cascade, cheap checks first. Evaluation stops at the first rule that
/// rejects.
pub(crate) const RULES: &[(&str, Rule)] = &[
    ("sql_or_code", sql_or_code),
    ("has_delimiter", has_delimiter),
    ("min_cardinality", min_cardinality),
    ("token_shape", token_shape),
    ("cjk_density", cjk_density),
    ("long_cjk_token", long_cjk_token),
    ("uneven_lengths", uneven_lengths),
];

fn sql_keyword_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)\b(SELECT|INSERT|UPDATE|DELETE|FROM|WHERE|JOIN|LIMIT|ORDER\s+BY|GROUP\s+BY|CREATE|DROP|ALTER|INTO|VALUES)\b",
        )
        .expect("SQL keyword pattern is valid")
    })
}

/// Reject SQL statements, bracketed code, and JSON/object literals. The
/// colon check is independent of the braces and also catches key:value
/// prose.
fn sql_or_code(_config: &DetectConfig, ctx: &RuleContext) -> bool {
    if sql_keyword_re().is_match(ctx.trimmed) {
        return false;
    }
    !ctx.trimmed
        .chars()
        .any(|c| matches!(c, '(' | ')' | '[' | ']' | '{' | '}' | '"' | ':'))
}

/// A list needs at least one delimiter character somewhere.
fn has_delimiter(_config: &DetectConfig, ctx: &RuleContext) -> bool {
    ctx.trimmed.chars().any(is_delimiter)
}

fn min_cardinality(config: &DetectConfig, ctx: &RuleContext) -> bool {
    ctx.tokens.len() >= config.min_tokens
}

/// Every token must look like a simple value: ASCII word characters, CJK
/// ideographs, and `- . _ @ #`, within the length cap. Punctuation typical
/// of prose fails here.
fn token_shape(config: &DetectConfig, ctx: &RuleContext) -> bool {
    ctx.tokens.iter().zip(&ctx.token_lens).all(|(token, &len)| {
        len <= config.max_token_len && token.chars().all(is_simple_token_char)
    })
}

fn is_simple_token_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '_' | '-' | '.' | '@' | '#') || is_cjk(ch)
}

/// Dense CJK with long-average tokens reads as a sentence, not short IDs.
fn cjk_density(config: &DetectConfig, ctx: &RuleContext) -> bool {
    if ctx.char_count == 0 {
        return true;
    }
    let ratio = ctx.cjk_count as f64 / ctx.char_count as f64;
    !(ratio > config.cjk_ratio_limit && ctx.avg_token_len() > config.cjk_avg_len_limit)
}

/// A single token that is itself a CJK phrase is almost certainly a sentence
/// fragment.
fn long_cjk_token(config: &DetectConfig, ctx: &RuleContext) -> bool {
    !ctx.tokens
        .iter()
        .any(|t| t.chars().filter(|&c| is_cjk(c)).count() > config.cjk_token_limit)
}

/// Wildly uneven token lengths in a short sequence suggest natural prose
/// rather than a uniform ID list. Long sequences are exempt.
fn uneven_lengths(config: &DetectConfig, ctx: &RuleContext) -> bool {
    if ctx.tokens.len() >= config.len_ratio_token_floor {
        return true;
    }
    let (Some(&min_len), Some(&max_len)) = (
        ctx.token_lens.iter().min(),
        ctx.token_lens.iter().max(),
    ) else {
        return true;
    };
    !(min_len > 0 && max_len as f64 / min_len as f64 > config.len_ratio_limit)
}
