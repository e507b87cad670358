//! Untyped payload traversal.
//!
//! Portal responses have no stable schema, so the resolver treats them as
//! a JSON tree and searches every string leaf.

use indexmap::IndexSet;
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

lazy_static! {
    static ref PDF_URL: Regex = Regex::new(r#"(?i)https?://[^\s"']+\.pdf\b"#).unwrap();
    static ref DOWNLOAD_URL: Regex =
        Regex::new(r#"(?i)https?://[^\s"']+/api/File/downloadfile\?id=[^"'\s]+"#).unwrap();
}

/// Collect every string leaf, depth first: object values in map order,
/// array elements in index order. Non-string scalars are skipped.
pub fn collect_strings(value: &Value) -> Vec<&str> {
    let mut out = Vec::new();
    walk(value, &mut out);
    out
}

fn walk<'a>(value: &'a Value, out: &mut Vec<&'a str>) {
    match value {
        Value::String(s) => out.push(s.as_str()),
        Value::Array(items) => {
            for item in items {
                walk(item, out);
            }
        }
        Value::Object(map) => {
            for v in map.values() {
                walk(v, out);
            }
        }
        _ => {}
    }
}

/// String leaves ordered longest first, so narrative blocks are scanned
/// before labels and identifiers. Equal lengths keep traversal order.
pub fn strings_by_length(value: &Value) -> Vec<&str> {
    let mut strings = collect_strings(value);
    strings.sort_by(|a, b| b.len().cmp(&a.len()));
    strings
}

/// Document-file URLs embedded in payload strings: direct PDF links plus
/// the portal's download-by-id endpoint. Deduplicated, insertion order
/// preserved.
pub fn find_document_urls(value: &Value) -> Vec<String> {
    let mut urls: IndexSet<String> = IndexSet::new();
    for s in collect_strings(value) {
        for m in PDF_URL.find_iter(s) {
            urls.insert(m.as_str().to_string());
        }
        for m in DOWNLOAD_URL.find_iter(s) {
            urls.insert(m.as_str().to_string());
        }
    }
    urls.into_iter().collect()
}
