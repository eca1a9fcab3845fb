//! Query parsing: free text into positive and negative terms.
//!
//! A query is lowercased and split into tokens. A token is either a quoted
//! phrase (`"thomas eugene"` or `'thomas eugene'`, optionally preceded by the
//! exclusion marker `-`) or a run of non-whitespace characters. Quote
//! characters are removed from every token, so a phrase becomes a single
//! term containing spaces.
//!
//! Terms starting with `-` are negative. They keep the marker; it is only
//! stripped when matching (see [`body`]).

/// Marks a term as excluded.
pub const EXCLUSION_MARKER: char = '-';

const QUOTES: [char; 2] = ['"', '\''];

/// Terms extracted from a query, split into required and excluded sets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedQuery {
    pub positive: Vec<String>,
    pub negative: Vec<String>,
}

impl ParsedQuery {
    /// True when the query produced no terms at all.
    pub fn is_empty(&self) -> bool {
        self.positive.is_empty() && self.negative.is_empty()
    }
}

/// Parse a raw query. An absent query behaves like an empty one.
pub fn parse(query: Option<&str>) -> ParsedQuery {
    let (negative, positive): (Vec<String>, Vec<String>) = tokenize(query.unwrap_or_default())
        .into_iter()
        .partition(|term| term.starts_with(EXCLUSION_MARKER));

    let parsed = ParsedQuery { positive, negative };
    tracing::debug!(
        positive = ?parsed.positive,
        negative = ?parsed.negative,
        "parsed query"
    );
    parsed
}

/// Lowercase `query` and split it into terms, in order of appearance.
pub fn tokenize(query: &str) -> Vec<String> {
    let query = query.to_lowercase();
    let mut terms = Vec::new();
    let mut rest = query.as_str();

    loop {
        rest = rest.trim_start();
        if rest.is_empty() {
            break;
        }

        let len = quoted_len(rest).unwrap_or_else(|| {
            rest.find(char::is_whitespace).unwrap_or(rest.len())
        });
        let (token, tail) = rest.split_at(len);
        rest = tail;

        let term: String = token.chars().filter(|c| !QUOTES.contains(c)).collect();
        if !term.is_empty() {
            terms.push(term);
        }
    }

    terms
}

/// Byte length of a quoted span at the start of `s`, including an optional
/// leading exclusion marker and both quotes. `None` when `s` does not open a
/// quote, the quote is never closed, or the quoted body is empty.
fn quoted_len(s: &str) -> Option<usize> {
    let marker = usize::from(s.starts_with(EXCLUSION_MARKER));
    let open = s[marker..].chars().next().filter(|c| QUOTES.contains(c))?;
    let body_start = marker + open.len_utf8();
    let body_len = s[body_start..].find(open)?;
    if body_len == 0 {
        return None;
    }
    Some(body_start + body_len + open.len_utf8())
}

/// The text a term matches against: the term with one leading exclusion
/// marker removed.
pub fn body(term: &str) -> &str {
    term.strip_prefix(EXCLUSION_MARKER).unwrap_or(term)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terms(query: &str) -> Vec<String> {
        tokenize(query)
    }

    #[test]
    fn lowercases_and_splits_on_whitespace() {
        assert_eq!(terms("Ruby On Rails"), ["ruby", "on", "rails"]);
        let parsed = parse(Some("Ruby On Rails"));
        assert_eq!(parsed.positive, ["ruby", "on", "rails"]);
        assert!(parsed.negative.is_empty());
    }

    #[test]
    fn partitions_negative_terms_keeping_marker() {
        let parsed = parse(Some("ruby -java"));
        assert_eq!(parsed.positive, ["ruby"]);
        assert_eq!(parsed.negative, ["-java"]);
    }

    #[test]
    fn double_quoted_phrase_is_one_term() {
        assert_eq!(
            terms(r#"Interpreted "Thomas Eugene""#),
            ["interpreted", "thomas eugene"]
        );
    }

    #[test]
    fn single_quoted_phrase_is_one_term() {
        assert_eq!(terms("'common lisp' scheme"), ["common lisp", "scheme"]);
    }

    #[test]
    fn negated_phrase_keeps_marker() {
        let parsed = parse(Some("Python -'dynamic language'"));
        assert_eq!(parsed.positive, ["python"]);
        assert_eq!(parsed.negative, ["-dynamic language"]);

        let parsed = parse(Some(r#"-"array language" john"#));
        assert_eq!(parsed.negative, ["-array language"]);
        assert_eq!(parsed.positive, ["john"]);
    }

    #[test]
    fn unterminated_quote_is_literal_text() {
        assert_eq!(terms(r#""thomas eugene"#), ["thomas", "eugene"]);
        assert_eq!(terms("it's"), ["its"]);
    }

    #[test]
    fn scanning_resumes_right_after_closing_quote() {
        assert_eq!(terms(r#""foo bar"baz"#), ["foo bar", "baz"]);
    }

    #[test]
    fn quote_inside_a_run_does_not_open_a_phrase() {
        assert_eq!(terms(r#"ab"c d""#), ["abc", "d"]);
    }

    #[test]
    fn empty_quotes_are_dropped() {
        assert_eq!(terms(r#"ruby "" ''"#), ["ruby"]);
    }

    #[test]
    fn empty_and_absent_queries_have_no_terms() {
        assert!(parse(None).is_empty());
        assert!(parse(Some("")).is_empty());
        assert!(parse(Some(" \t\n ")).is_empty());
    }

    #[test]
    fn bare_marker_is_a_negative_term() {
        let parsed = parse(Some("ruby -"));
        assert_eq!(parsed.positive, ["ruby"]);
        assert_eq!(parsed.negative, ["-"]);
        assert_eq!(body(&parsed.negative[0]), "");
    }

    #[test]
    fn body_strips_only_one_marker() {
        assert_eq!(body("-java"), "java");
        assert_eq!(body("--java"), "-java");
        assert_eq!(body("java"), "java");
    }

    #[test]
    fn hyphenated_word_stays_positive() {
        let parsed = parse(Some("s-lang"));
        assert_eq!(parsed.positive, ["s-lang"]);
    }
}
