//! Output records, one per input row.
//!
//! Records are constructed once per project, immutable after assembly and
//! written once to the output sink. Status and method enums serialize
//! through their wire strings so reports diff cleanly.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::heuristics::amounts::AmountContext;

/// Terminal fetch/extraction status for a project row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchStatus {
    /// A narrative section was located.
    Ok,
    /// Resolution completed but no narrative was found; amounts were still
    /// attempted against the best-effort corpus.
    OkButNoSectionFound,
    /// The exports scanner found no payload text at all.
    OkButNoText,
    /// The input URL carries no usable project reference.
    BadUrlFormat,
    /// The exports scanner's bad-reference variant.
    BadUrl,
    /// The portal API could not be fetched or decoded.
    ApiError(String),
}

impl fmt::Display for FetchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchStatus::Ok => f.write_str("ok"),
            FetchStatus::OkButNoSectionFound => f.write_str("ok_but_no_section_found"),
            FetchStatus::OkButNoText => f.write_str("ok_but_no_text"),
            FetchStatus::BadUrlFormat => f.write_str("error:bad_url_format"),
            FetchStatus::BadUrl => f.write_str("error:bad_url"),
            FetchStatus::ApiError(msg) => write!(f, "error:api:{msg}"),
        }
    }
}

impl Serialize for FetchStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

/// Which extraction path produced the section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionMethod {
    /// Structure-aware match inside a payload HTML block.
    HtmlBlock,
    /// Text-only match on a flattened payload string.
    HtmlText,
    /// Text-only match on a raw payload string.
    RawText,
    /// Text-only match on fetched PDF text.
    PdfFallback,
}

impl fmt::Display for ExtractionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            ExtractionMethod::HtmlBlock => "json_payload(html_block)",
            ExtractionMethod::HtmlText => "json_payload(html_text)",
            ExtractionMethod::RawText => "json_payload(raw)",
            ExtractionMethod::PdfFallback => "pdf_fallback",
        };
        f.write_str(tag)
    }
}

impl Serialize for ExtractionMethod {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

/// One output row of the amounts report.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectRecord {
    pub project_id: String,
    pub project_name: String,
    pub url: String,
    pub http_status: Option<u16>,
    pub fetch_status: FetchStatus,
    pub section_text: String,
    pub section_title_found: String,
    pub extraction_method: Option<ExtractionMethod>,
    pub used_json_endpoint: String,
    pub used_pdf_url: String,
    pub ifc_investment_usd: Option<f64>,
    pub ifc_investment_note: Option<String>,
    pub facility_notional_usd: Option<f64>,
    pub facility_note: Option<String>,
    pub all_amount_mentions: String,
    pub amounts_json: String,
}

impl ProjectRecord {
    /// Error-status row with empty extraction fields.
    pub fn error(
        id: impl Into<String>,
        name: impl Into<String>,
        url: impl Into<String>,
        status: FetchStatus,
    ) -> Self {
        Self {
            project_id: id.into(),
            project_name: name.into(),
            url: url.into(),
            http_status: None,
            fetch_status: status,
            section_text: String::new(),
            section_title_found: String::new(),
            extraction_method: None,
            used_json_endpoint: String::new(),
            used_pdf_url: String::new(),
            ifc_investment_usd: None,
            ifc_investment_note: None,
            facility_notional_usd: None,
            facility_note: None,
            all_amount_mentions: String::new(),
            amounts_json: String::new(),
        }
    }
}

/// One output row of the exports report.
#[derive(Debug, Clone, Serialize)]
pub struct ExportRecord {
    pub project_id: String,
    pub project_name: String,
    pub url: String,
    pub http_status: Option<u16>,
    pub fetch_status: FetchStatus,
    pub used_json_endpoints: String,
    pub export_hits: usize,
    pub export_sentences: String,
    pub text_scanned_chars: usize,
}

impl ExportRecord {
    /// Error-status row with empty scan fields.
    pub fn error(name: impl Into<String>, url: impl Into<String>, status: FetchStatus) -> Self {
        Self {
            project_id: String::new(),
            project_name: name.into(),
            url: url.into(),
            http_status: None,
            fetch_status: status,
            used_json_endpoints: String::new(),
            export_hits: 0,
            export_sentences: String::new(),
            text_scanned_chars: 0,
        }
    }
}

/// `raw=>value` pairs joined with ` | `, the quick-scan mention column.
pub fn mention_summary(mentions: &[AmountContext]) -> String {
    mentions
        .iter()
        .map(|m| format!("{}=>{}", m.raw, m.amount_usd as i64))
        .collect::<Vec<_>>()
        .join(" | ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_strings() {
        assert_eq!(FetchStatus::Ok.to_string(), "ok");
        assert_eq!(
            FetchStatus::OkButNoSectionFound.to_string(),
            "ok_but_no_section_found"
        );
        assert_eq!(FetchStatus::BadUrlFormat.to_string(), "error:bad_url_format");
        assert_eq!(
            FetchStatus::ApiError("timeout".into()).to_string(),
            "error:api:timeout"
        );
    }

    #[test]
    fn test_method_wire_strings() {
        assert_eq!(
            ExtractionMethod::HtmlBlock.to_string(),
            "json_payload(html_block)"
        );
        assert_eq!(
            ExtractionMethod::HtmlText.to_string(),
            "json_payload(html_text)"
        );
        assert_eq!(ExtractionMethod::RawText.to_string(), "json_payload(raw)");
        assert_eq!(ExtractionMethod::PdfFallback.to_string(), "pdf_fallback");
    }

    #[test]
    fn test_mention_summary_truncates_values() {
        let mentions = vec![
            AmountContext {
                raw: "$12.5 million".into(),
                amount_usd: 12_500_000.0,
                context: "ctx".into(),
            },
            AmountContext {
                raw: "$1.2 billion".into(),
                amount_usd: 1_200_000_000.0,
                context: "ctx".into(),
            },
        ];
        assert_eq!(
            mention_summary(&mentions),
            "$12.5 million=>12500000 | $1.2 billion=>1200000000"
        );
        assert_eq!(mention_summary(&[]), "");
    }

    #[test]
    fn test_records_serialize_to_csv() {
        let record = ProjectRecord::error("1", "name", "http://x", FetchStatus::BadUrlFormat);
        let mut writer = csv::Writer::from_writer(vec![]);
        writer.serialize(&record).unwrap();
        let out = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        assert!(out.contains("error:bad_url_format"));
        assert!(out.starts_with("project_id,project_name,url,http_status,fetch_status"));
    }
}
