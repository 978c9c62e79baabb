//! Tokenizing and quoted-list formatting for delimiter-separated text.
//!
//! Pure domain logic - no I/O, no platform dependencies. Everything here is
//! a deterministic function of its inputs: the same text always yields the
//! same token sequence, and formatting depends only on the tokens and the
//! requested quote style.

use serde::{Deserialize, Serialize};

/// Whether a character splits tokens: ASCII whitespace, comma, semicolon,
/// and the full-width CJK comma/semicolon.
pub fn is_delimiter(ch: char) -> bool {
    ch.is_ascii_whitespace() || matches!(ch, ',' | ';' | '，' | '；')
}

/// Split free-form text into non-empty trimmed tokens.
///
/// Runs of consecutive delimiters collapse to a single split point, and
/// segments that are empty after trimming are dropped. Empty input yields
/// an empty sequence; there are no error conditions.
pub fn tokenize(input: &str) -> Vec<String> {
    input
        .split(is_delimiter)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Quoting convention for a formatted list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStyle {
    /// `'…'` with inner quotes doubled - SQL string-literal convention.
    #[default]
    Single,
    /// `"…"` with backslash-escaping - JSON/code-string convention.
    Double,
}

impl QuoteStyle {
    pub fn label(&self) -> &'static str {
        match self {
            QuoteStyle::Single => "single",
            QuoteStyle::Double => "double",
        }
    }
}

impl std::fmt::Display for QuoteStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Error returned when parsing an unrecognized quote-style name.
#[derive(Debug, thiserror::Error)]
#[error("unknown quote style: {0}")]
pub struct UnknownQuoteStyle(String);

impl std::str::FromStr for QuoteStyle {
    type Err = UnknownQuoteStyle;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single" => Ok(QuoteStyle::Single),
            "double" => Ok(QuoteStyle::Double),
            other => Err(UnknownQuoteStyle(other.to_owned())),
        }
    }
}

/// Render tokens as a comma-joined quoted list.
///
/// Entries are joined with a bare `,` - no padding, no brackets, no trailing
/// comma. An empty token sequence yields an empty string for either style.
pub fn format_list<S: AsRef<str>>(tokens: &[S], style: QuoteStyle) -> String {
    tokens
        .iter()
        .map(|t| quote_token(t.as_ref(), style))
        .collect::<Vec<_>>()
        .join(",")
}

fn quote_token(token: &str, style: QuoteStyle) -> String {
    match style {
        QuoteStyle::Single => format!("'{}'", token.replace('\'', "''")),
        // Backslashes first, so escapes inserted for quotes are not re-escaped.
        QuoteStyle::Double => {
            format!("\"{}\"", token.replace('\\', "\\\\").replace('"', "\\\""))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_mixed_delimiters() {
        let tokens = tokenize("A001, A002; A003\nA004");
        assert_eq!(tokens, vec!["A001", "A002", "A003", "A004"]);
    }

    #[test]
    fn test_tokenize_fullwidth_delimiters() {
        let tokens = tokenize("甲，乙；丙");
        assert_eq!(tokens, vec!["甲", "乙", "丙"]);
    }

    #[test]
    fn test_tokenize_collapses_delimiter_runs() {
        let tokens = tokenize("a ,,  ;\t\nb");
        assert_eq!(tokens, vec!["a", "b"]);
    }

    #[test]
    fn test_tokenize_empty_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize(" \t\n,;，；").is_empty());
    }

    #[test]
    fn test_tokenize_is_deterministic() {
        let input = "x, y;z";
        assert_eq!(tokenize(input), tokenize(input));
    }

    #[test]
    fn test_format_single_escapes_quotes() {
        assert_eq!(format_list(&["it's"], QuoteStyle::Single), "'it''s'");
    }

    #[test]
    fn test_format_double_escapes_quotes() {
        assert_eq!(format_list(&["a\"b"], QuoteStyle::Double), "\"a\\\"b\"");
    }

    #[test]
    fn test_format_double_escapes_backslash_before_quote() {
        // A literal backslash-quote pair must not be double-escaped.
        assert_eq!(format_list(&["a\\\"b"], QuoteStyle::Double), "\"a\\\\\\\"b\"");
    }

    #[test]
    fn test_format_empty_sequence() {
        let empty: Vec<String> = Vec::new();
        assert_eq!(format_list(&empty, QuoteStyle::Single), "");
        assert_eq!(format_list(&empty, QuoteStyle::Double), "");
    }

    #[test]
    fn test_format_joins_without_padding() {
        assert_eq!(
            format_list(&["a", "b", "c"], QuoteStyle::Single),
            "'a','b','c'"
        );
        assert_eq!(
            format_list(&["a", "b"], QuoteStyle::Double),
            "\"a\",\"b\""
        );
    }

    #[test]
    fn test_token_content_round_trips_through_format() {
        // Values survive format-then-retokenize once the quotes are stripped;
        // bytes are not guaranteed identical, token content is.
        let tokens = tokenize("A001 A002,A003");
        let formatted = format_list(&tokens, QuoteStyle::Single);
        let reparsed: Vec<String> = tokenize(&formatted)
            .into_iter()
            .map(|t| t.trim_matches('\'').to_owned())
            .collect();
        assert_eq!(tokens, reparsed);
    }

    #[test]
    fn test_quote_style_parse_and_label() {
        assert_eq!("single".parse::<QuoteStyle>().unwrap(), QuoteStyle::Single);
        assert_eq!("double".parse::<QuoteStyle>().unwrap(), QuoteStyle::Double);
        assert!("backtick".parse::<QuoteStyle>().is_err());
        assert_eq!(QuoteStyle::Double.label(), "double");
    }

    #[test]
    fn test_quote_style_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&QuoteStyle::Single).unwrap(),
            "\"single\""
        );
        let style: QuoteStyle = serde_json::from_str("\"double\"").unwrap();
        assert_eq!(style, QuoteStyle::Double);
    }
}
