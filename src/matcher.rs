use crate::{query, record::Record};

/// Whether `record` satisfies the query terms.
///
/// Every positive term must appear in some field value and no negative term
/// (marker stripped) may appear in any. Matching is a case-insensitive
/// substring test. A negative term with an empty body (a bare `-`) is
/// ignored rather than excluding every record.
pub fn matches<S: AsRef<str>>(
    record: &Record,
    positive: &[S],
    negative: &[S],
) -> bool {
    let values: Vec<String> = record.values().map(str::to_lowercase).collect();
    let contains =
        |needle: &str| values.iter().any(|value| value.contains(needle));

    let required = positive.iter().all(|term| contains(term.as_ref()));

    let excluded = negative
        .iter()
        .map(|term| query::body(term.as_ref()))
        .any(|body| !body.is_empty() && contains(body));

    required && !excluded
}

/// Keep the records that match, in input order. With no terms at all every
/// record is returned without being inspected.
pub fn filter<'a, S: AsRef<str>>(
    records: &'a [Record],
    positive: &[S],
    negative: &[S],
) -> Vec<&'a Record> {
    if positive.is_empty() && negative.is_empty() {
        return records.iter().collect();
    }

    records
        .iter()
        .filter(|record| matches(record, positive, negative))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const NONE: &[&str] = &[];

    fn ruby() -> Record {
        [
            ("name", "Ruby"),
            ("category", "Programming language"),
            ("date_created", "1995"),
        ]
        .into_iter()
        .collect()
    }

    fn general() -> Vec<Record> {
        vec![
            [
                ("name", "Ruby"),
                ("description", "A dynamic, open source programming language"),
            ]
            .into_iter()
            .collect(),
            [
                ("name", "Python"),
                ("description", "A high-level, interpreted programming language"),
            ]
            .into_iter()
            .collect(),
            [
                ("name", "Java"),
                (
                    "description",
                    "A class-based, object-oriented programming language",
                ),
            ]
            .into_iter()
            .collect(),
        ]
    }

    fn names<'a>(records: &[&'a Record]) -> Vec<&'a str> {
        records.iter().filter_map(|r| r.get("name")).collect()
    }

    #[test]
    fn no_terms_always_matches() {
        assert!(matches(&ruby(), NONE, NONE));
    }

    #[test]
    fn all_positive_terms_present() {
        assert!(matches(&ruby(), &["ruby", "programming"], NONE));
    }

    #[test]
    fn missing_positive_term_fails() {
        assert!(!matches(&ruby(), &["ruby", "programming", "java"], NONE));
    }

    #[test]
    fn absent_negative_term_does_not_exclude() {
        assert!(matches(&ruby(), &["ruby", "programming"], &["-java"]));
        assert!(matches(&ruby(), NONE, &["-java", "-php"]));
    }

    #[test]
    fn present_negative_term_excludes() {
        assert!(!matches(&ruby(), NONE, &["-ruby"]));
        assert!(!matches(&ruby(), &["programming"], &["-1995"]));
    }

    #[test]
    fn matching_is_case_insensitive_substring() {
        assert!(matches(&ruby(), &["rub", "gramm"], NONE));
    }

    #[test]
    fn terms_may_match_in_different_fields() {
        assert!(matches(&ruby(), &["ruby", "1995"], NONE));
    }

    #[test]
    fn bare_marker_is_ignored() {
        assert!(matches(&ruby(), NONE, &["-"]));
        assert!(matches(&ruby(), &["ruby"], &["-"]));
        assert!(!matches(&ruby(), NONE, &["-", "-ruby"]));
    }

    #[test]
    fn absent_fields_are_skipped() {
        let record: Record =
            serde_json::from_str(r#"{"name": "Ruby", "designer": null}"#)
                .unwrap();
        assert!(matches(&record, &["ruby"], NONE));
        assert!(!matches(&record, &["null"], NONE));
    }

    #[test]
    fn filter_without_terms_is_identity() {
        let data = general();
        let result = filter(&data, NONE, NONE);
        assert_eq!(result.len(), data.len());
        assert!(result.iter().zip(&data).all(|(a, b)| std::ptr::eq(*a, b)));
    }

    #[test]
    fn filter_positive_term() {
        let data = general();
        assert_eq!(names(&filter(&data, &["ruby"], NONE)), ["Ruby"]);
    }

    #[test]
    fn filter_negative_only_keeps_order() {
        let data = general();
        assert_eq!(
            names(&filter(&data, NONE, &["-java"])),
            ["Ruby", "Python"]
        );
    }

    #[test]
    fn filter_positive_and_negative() {
        let data = general();
        assert_eq!(names(&filter(&data, &["ruby"], &["-java"])), ["Ruby"]);
    }
}
