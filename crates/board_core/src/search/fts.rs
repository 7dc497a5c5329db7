//! SQLite FTS5 title matching.
//!
//! # Invariants
//! - User text is never passed through as raw FTS5 syntax.
//! - Every whitespace-separated term is required (boolean AND), and matches
//!   as a token prefix.
//! - Blank input means "no filter"; input with no indexable characters means
//!   "matches nothing", never "no filter".

/// Outcome of compiling a title filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TitleMatch {
    /// Filter absent or blank.
    Any,
    /// FTS5 `MATCH` expression to bind.
    Expression(String),
    /// Filter given but contains nothing the tokenizer indexes.
    Nothing,
}

/// Compiles a title filter into an FTS5 `MATCH` expression.
///
/// `"rust borrow"` becomes `"rust"* AND "borrow"*`.
pub fn title_match(text: &str) -> TitleMatch {
    let raw_terms = text.split_whitespace().collect::<Vec<_>>();
    if raw_terms.is_empty() {
        return TitleMatch::Any;
    }

    // unicode61 drops punctuation-only terms; a quoted empty prefix would be
    // an FTS5 syntax error.
    let terms = raw_terms
        .into_iter()
        .filter(|term| term.chars().any(char::is_alphanumeric))
        .map(quote_prefix_term)
        .collect::<Vec<_>>();

    if terms.is_empty() {
        return TitleMatch::Nothing;
    }

    TitleMatch::Expression(terms.join(" AND "))
}

fn quote_prefix_term(raw: &str) -> String {
    let escaped = raw.replace('"', "\"\"");
    format!("\"{escaped}\"*")
}

#[cfg(test)]
mod tests {
    use super::{title_match, TitleMatch};

    #[test]
    fn blank_filter_matches_everything() {
        assert_eq!(title_match(""), TitleMatch::Any);
        assert_eq!(title_match("   \t"), TitleMatch::Any);
    }

    #[test]
    fn terms_are_quoted_prefixed_and_required() {
        assert_eq!(
            title_match(" rust  borrow "),
            TitleMatch::Expression("\"rust\"* AND \"borrow\"*".to_string())
        );
    }

    #[test]
    fn embedded_quotes_are_escaped() {
        assert_eq!(
            title_match("say\"hi"),
            TitleMatch::Expression("\"say\"\"hi\"*".to_string())
        );
    }

    #[test]
    fn punctuation_only_filter_matches_nothing() {
        assert_eq!(title_match("-- !!"), TitleMatch::Nothing);
    }
}
