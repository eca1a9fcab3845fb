//! Relevance ranking of matched records.
//!
//! Each field value is split on whitespace and every token is checked
//! against the positive terms:
//!
//! - an *exact* hit is a term that fills the token, allowing commas as
//!   delimiters on either side (`lisp,` is an exact hit for `lisp`);
//! - a *partial* hit is a term that starts the token or follows a comma or a
//!   hyphen (`javascript` and `s-lang` are partial hits for `java` and
//!   `lang`).
//!
//! Exact hits are counted again as partial hits. A field scores
//! `10 * exact + partial`, scaled by `50^i` where `i` is the field's position
//! counted from the *last* field. The first declared field therefore weighs
//! the most, and reordering the fields of a record changes its rank.

use crate::record::Record;

/// Base of the per-field weight.
pub const FIELD_WEIGHT_BASE: u128 = 50;

/// Multiplier applied to exact hits.
pub const EXACT_MATCH_WEIGHT: u128 = 10;

/// A ranked record. `score` is `None` when the query had no positive terms
/// and the input order was kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scored<'a> {
    pub record: &'a Record,
    pub score: Option<u128>,
}

/// Order `records` by descending relevance to `positive`.
pub fn rank<'a, S: AsRef<str>>(
    records: Vec<&'a Record>,
    positive: &[S],
) -> Vec<&'a Record> {
    rank_scored(records, positive)
        .into_iter()
        .map(|scored| scored.record)
        .collect()
}

/// Like [`rank`], keeping each record's score.
///
/// Records are sorted ascending with a stable sort and the result is
/// reversed, so records with equal scores come out in reverse input order.
/// Without positive terms the input is returned unchanged.
pub fn rank_scored<'a, S: AsRef<str>>(
    records: Vec<&'a Record>,
    positive: &[S],
) -> Vec<Scored<'a>> {
    if positive.is_empty() {
        return records
            .into_iter()
            .map(|record| Scored {
                record,
                score: None,
            })
            .collect();
    }

    let mut scored: Vec<Scored<'a>> = records
        .into_iter()
        .map(|record| Scored {
            record,
            score: Some(score(record, positive)),
        })
        .collect();

    scored.sort_by_key(|s| s.score);
    scored.reverse();
    scored
}

/// Relevance of `record` for the given positive terms. Saturates instead of
/// overflowing on records with more than 22 fields.
pub fn score<S: AsRef<str>>(record: &Record, positive: &[S]) -> u128 {
    record
        .values()
        .rev()
        .enumerate()
        .fold(0u128, |total, (index, value)| {
            let exponent = u32::try_from(index).unwrap_or(u32::MAX);
            let weight = FIELD_WEIGHT_BASE.saturating_pow(exponent);
            let hits = (exact_count(value, positive) as u128)
                .saturating_mul(EXACT_MATCH_WEIGHT)
                .saturating_add(partial_count(value, positive) as u128);
            total.saturating_add(weight.saturating_mul(hits))
        })
}

/// Number of whitespace-separated tokens of `value` holding an exact hit for
/// any of `terms`.
pub fn exact_count<S: AsRef<str>>(value: &str, terms: &[S]) -> usize {
    count_tokens(value, terms, |token, term| {
        aligned_starts(token, &[',']).any(|start| {
            token[start..].strip_prefix(term).is_some_and(|rest| {
                rest.is_empty() || rest.starts_with(',')
            })
        })
    })
}

/// Number of whitespace-separated tokens of `value` holding a partial hit for
/// any of `terms`.
pub fn partial_count<S: AsRef<str>>(value: &str, terms: &[S]) -> usize {
    count_tokens(value, terms, |token, term| {
        aligned_starts(token, &[',', '-'])
            .any(|start| token[start..].starts_with(term))
    })
}

fn count_tokens<S, F>(value: &str, terms: &[S], hit: F) -> usize
where
    S: AsRef<str>,
    F: Fn(&str, &str) -> bool,
{
    let terms: Vec<String> =
        terms.iter().map(|term| term.as_ref().to_lowercase()).collect();
    value
        .to_lowercase()
        .split_whitespace()
        .filter(|token| terms.iter().any(|term| hit(*token, term.as_str())))
        .count()
}

/// Byte offsets in `token` where a term may begin: the token start and the
/// position right after each delimiter.
fn aligned_starts<'t>(
    token: &'t str,
    delimiters: &'t [char],
) -> impl Iterator<Item = usize> + 't {
    std::iter::once(0).chain(
        token
            .char_indices()
            .filter(move |(_, c)| delimiters.contains(c))
            .map(|(i, c)| i + c.len_utf8()),
    )
}
