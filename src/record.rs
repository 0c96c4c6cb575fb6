//! Canonical paper records and the IEEE record normalizer.
//!
//! [`normalize`] maps one raw search record into a [`CanonicalRecord`]. It is a
//! total, pure function: malformed or missing input falls back to defaults.

use crate::config::DEFAULT_BASE_ORIGIN;
use crate::raw::{value_text, RawItem};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;

/// Publisher used when the record carries none
pub const DEFAULT_PUBLISHER: &str = "IEEE";

/// Tag identifying the producing collaborator
pub const SOURCE_TAG: &str = "ieee_xplore_rest_search";

/// Keyword containers, each a mapping of bucket name -> list of terms
const TERM_CONTAINERS: &[&str] = &["index_terms", "author_terms"];

/// Normalized paper metadata.
///
/// Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CanonicalRecord {
    pub query: String,
    pub title: String,
    pub authors: Vec<String>,
    pub publication_title: String,
    pub year: Option<i64>,
    pub doi: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub keywords: Vec<String>,
    pub document_url: String,
    pub pdf_url: String,
    pub publisher: String,
    pub content_type: String,
    pub source: String,
}

/// Normalize a raw IEEE record against the default web origin.
pub fn normalize(raw: &Value, query: &str) -> CanonicalRecord {
    normalize_with_origin(raw, query, DEFAULT_BASE_ORIGIN)
}

/// Normalize a raw IEEE record, absolutizing relative links against `origin`.
pub fn normalize_with_origin(raw: &Value, query: &str, origin: &str) -> CanonicalRecord {
    let item = RawItem::new(raw);

    let publisher = match item.str_field("publisher") {
        "" => DEFAULT_PUBLISHER,
        p => p,
    };

    CanonicalRecord {
        query: query.to_string(),
        title: clean(item.str_field("title")),
        authors: extract_authors(item),
        publication_title: clean(item.str_field("publicationTitle")),
        year: item.int_field("publicationYear"),
        doi: clean(item.str_field("doi")),
        abstract_text: clean(item.str_field("abstract")),
        keywords: extract_keywords(item),
        document_url: absolutize(item.first_str(&["html_url", "documentLink"]), origin),
        pdf_url: absolutize(item.str_field("pdf_url"), origin),
        publisher: clean(publisher),
        content_type: clean(item.str_field("contentType")),
        source: SOURCE_TAG.to_string(),
    }
}

fn clean(s: &str) -> String {
    s.trim().to_string()
}

/// `authors.authors[*].full_name`, source order, duplicates kept
fn extract_authors(item: RawItem<'_>) -> Vec<String> {
    item.get("authors")
        .array("authors")
        .iter()
        .map(|a| RawItem::new(a).str_field("full_name").trim())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Union of every list-valued bucket in the term containers, sorted and deduplicated
fn extract_keywords(item: RawItem<'_>) -> Vec<String> {
    let mut keywords = BTreeSet::new();

    for container in TERM_CONTAINERS {
        let Some(buckets) = item.get(container).object() else {
            continue;
        };
        for terms in buckets.values().filter_map(Value::as_array) {
            for term in terms.iter().filter_map(value_text) {
                let term = term.trim();
                if !term.is_empty() {
                    keywords.insert(term.to_string());
                }
            }
        }
    }

    keywords.into_iter().collect()
}

/// Prefix root-relative paths with the web origin; pass anything else through
fn absolutize(link: &str, origin: &str) -> String {
    let link = link.trim();
    if link.starts_with('/') {
        format!("{}{}", origin.trim_end_matches('/'), link)
    } else {
        link.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "title": "  Deep Learning for Slope Stability  ",
            "authors": {"authors": [
                {"full_name": " Ada Lovelace "},
                {"full_name": ""},
                {"id": 7},
                {"full_name": "Alan Turing"},
                {"full_name": "Ada Lovelace"}
            ]},
            "publicationTitle": "IEEE Access\n",
            "publicationYear": 2023,
            "doi": " 10.1109/ACCESS.2023.1234567 ",
            "abstract": "\tAbstract text. ",
            "index_terms": {
                "ieee_terms": {"terms": ["ignored"]},
                "ieeeTerms": ["b", "a"],
                "author_terms": "not a list"
            },
            "author_terms": {"terms": ["a", " a ", "Grenzgänger"]},
            "html_url": "/document/12345",
            "pdf_url": "/stamp/stamp.jsp?arnumber=12345",
            "contentType": " Journals ",
        })
    }

    #[test]
    fn test_normalize_full_record() {
        let record = normalize(&sample(), "slope stability");

        assert_eq!(record.query, "slope stability");
        assert_eq!(record.title, "Deep Learning for Slope Stability");
        assert_eq!(record.authors, vec!["Ada Lovelace", "Alan Turing", "Ada Lovelace"]);
        assert_eq!(record.publication_title, "IEEE Access");
        assert_eq!(record.year, Some(2023));
        assert_eq!(record.doi, "10.1109/ACCESS.2023.1234567");
        assert_eq!(record.abstract_text, "Abstract text.");
        assert_eq!(record.keywords, vec!["Grenzgänger", "a", "b"]);
        assert_eq!(record.document_url, "https://ieeexplore.ieee.org/document/12345");
        assert_eq!(
            record.pdf_url,
            "https://ieeexplore.ieee.org/stamp/stamp.jsp?arnumber=12345"
        );
        assert_eq!(record.publisher, "IEEE");
        assert_eq!(record.content_type, "Journals");
        assert_eq!(record.source, "ieee_xplore_rest_search");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let raw = sample();
        assert_eq!(normalize(&raw, "q"), normalize(&raw, "q"));
    }

    #[test]
    fn test_normalize_empty_and_garbage_records() {
        for raw in [json!({}), json!(null), json!([1, 2]), json!("text")] {
            let record = normalize(&raw, "q");
            assert_eq!(record.title, "");
            assert!(record.authors.is_empty());
            assert!(record.keywords.is_empty());
            assert_eq!(record.year, None);
            assert_eq!(record.document_url, "");
            assert_eq!(record.pdf_url, "");
            assert_eq!(record.publisher, DEFAULT_PUBLISHER);
            assert_eq!(record.source, SOURCE_TAG);
        }
    }

    #[test]
    fn test_wrong_typed_fields_degrade() {
        let raw = json!({
            "title": 42,
            "authors": {"authors": "nobody"},
            "index_terms": ["x"],
            "author_terms": null,
            "publicationYear": {"y": 1},
            "publisher": null,
        });
        let record = normalize(&raw, "q");
        assert_eq!(record.title, "");
        assert!(record.authors.is_empty());
        assert!(record.keywords.is_empty());
        assert_eq!(record.year, None);
        assert_eq!(record.publisher, "IEEE");
    }

    #[test]
    fn test_trim_invariant() {
        let raw = json!({
            "title": "  t ",
            "publicationTitle": " p ",
            "doi": " d ",
            "abstract": " a ",
            "publisher": " Wiley ",
            "contentType": " c ",
            "html_url": " https://x.example/doc ",
            "pdf_url": " /pdf ",
        });
        let record = normalize(&raw, "q");
        for field in [
            &record.title,
            &record.publication_title,
            &record.doi,
            &record.abstract_text,
            &record.publisher,
            &record.content_type,
            &record.document_url,
            &record.pdf_url,
        ] {
            assert_eq!(field, field.trim());
            assert!(!field.is_empty());
        }
        assert_eq!(record.publisher, "Wiley");
        assert_eq!(record.pdf_url, "https://ieeexplore.ieee.org/pdf");
    }

    #[test]
    fn test_blank_publisher_is_not_defaulted() {
        let record = normalize(&json!({"publisher": "   "}), "q");
        assert_eq!(record.publisher, "");
    }

    #[test]
    fn test_keyword_dedup_and_sort() {
        let raw = json!({
            "index_terms": {"ieee": ["b", "a"]},
            "author_terms": {"terms": ["a", " a "]},
        });
        assert_eq!(normalize(&raw, "q").keywords, vec!["a", "b"]);
    }

    #[test]
    fn test_keyword_terms_are_stringified() {
        let raw = json!({"index_terms": {"mixed": [5, null, "  ", true, "x"]}});
        assert_eq!(normalize(&raw, "q").keywords, vec!["5", "true", "x"]);
    }

    #[test]
    fn test_absolutize() {
        assert_eq!(
            absolutize("/document/12345", DEFAULT_BASE_ORIGIN),
            "https://ieeexplore.ieee.org/document/12345"
        );
        assert_eq!(
            absolutize("https://other.example/x", DEFAULT_BASE_ORIGIN),
            "https://other.example/x"
        );
        assert_eq!(absolutize("", DEFAULT_BASE_ORIGIN), "");
        assert_eq!(absolutize("/a", "http://mirror.local/"), "http://mirror.local/a");
    }

    #[test]
    fn test_document_link_fallback() {
        let raw = json!({"documentLink": "/document/99"});
        let record = normalize_with_origin(&raw, "q", "http://127.0.0.1:9000");
        assert_eq!(record.document_url, "http://127.0.0.1:9000/document/99");

        let raw = json!({"html_url": "/document/1", "documentLink": "/document/99"});
        assert_eq!(
            normalize(&raw, "q").document_url,
            "https://ieeexplore.ieee.org/document/1"
        );
    }

    #[test]
    fn test_year_string_accepted() {
        assert_eq!(normalize(&json!({"publicationYear": "2019"}), "q").year, Some(2019));
    }
}
