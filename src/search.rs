use serde::Serialize;

use crate::{
    matcher,
    query::{self, ParsedQuery},
    ranker::{self, Scored},
    record::Record,
};

/// A ranked search result.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Hit<'a> {
    pub rank: usize,
    /// Relevance score, absent when the query had no positive terms.
    #[serde(serialize_with = "serialize_score")]
    pub score: Option<u128>,
    pub record: &'a Record,
}

/// Scores are written as integers when they fit in a `u64`, which is what
/// JSON consumers can read back, and as floats beyond that.
fn serialize_score<S: serde::Serializer>(
    score: &Option<u128>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    match score {
        None => serializer.serialize_none(),
        Some(score) => match u64::try_from(*score) {
            Ok(score) => serializer.serialize_u64(score),
            Err(_) => serializer.serialize_f64(*score as f64),
        },
    }
}

/// Serializable view of a completed search.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse<'a> {
    pub query: &'a str,
    pub result_count: usize,
    pub results: &'a [Hit<'a>],
}

impl<'a> SearchResponse<'a> {
    pub fn new(query: &'a str, results: &'a [Hit<'a>]) -> Self {
        Self {
            query,
            result_count: results.len(),
            results,
        }
    }
}

/// Run `query` against `records` and return the matching records, most
/// relevant first.
///
/// An empty or absent query returns every record in input order.
pub fn search<'a>(query: Option<&str>, records: &'a [Record]) -> Vec<&'a Record> {
    let parsed = query::parse(query);
    select(&parsed, records)
        .into_iter()
        .map(|scored| scored.record)
        .collect()
}

/// Same as [`search`], numbering the results and keeping their scores.
pub fn execute_search<'a>(
    query: Option<&str>,
    records: &'a [Record],
) -> Vec<Hit<'a>> {
    let parsed = query::parse(query);
    select(&parsed, records)
        .into_iter()
        .enumerate()
        .map(|(i, Scored { record, score })| Hit {
            rank: i + 1,
            score,
            record,
        })
        .collect()
}

fn select<'a>(parsed: &ParsedQuery, records: &'a [Record]) -> Vec<Scored<'a>> {
    let matched = matcher::filter(records, &parsed.positive, &parsed.negative);
    tracing::debug!(
        matched = matched.len(),
        total = records.len(),
        "filtered records"
    );
    ranker::rank_scored(matched, &parsed.positive)
}

/// Format results for human-readable terminal output.
///
/// The first field of each record is used as its title; the remaining
/// fields are listed beneath it.
pub fn format_human(results: &[Hit<'_>]) {
    if results.is_empty() {
        println!("No results found.");
        return;
    }

    for hit in results {
        let mut fields = hit.record.fields();
        let title = fields.next().map(|(_, value)| value).unwrap_or_default();
        match hit.score {
            Some(score) => println!("{:>3}. [{score}] {title}", hit.rank),
            None => println!("{:>3}. {title}", hit.rank),
        }
        for (name, value) in fields {
            println!("     {name}: {value}");
        }
    }
    println!("\n{} result(s)", results.len());
}

/// Format results as JSON output.
pub fn format_json(results: &[Hit<'_>], query: &str) -> crate::Result<()> {
    let response = SearchResponse::new(query, results);
    println!("{}", serde_json::to_string(&response)?);
    Ok(())
}
