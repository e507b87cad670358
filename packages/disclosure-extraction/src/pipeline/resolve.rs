//! Document resolution: structured payload first, embedded documents
//! next, best-effort corpus last. Amount extraction always runs against
//! whichever corpus results, so partial results are never discarded.

use regex::Regex;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::ScanConfig;
use crate::error::FetchError;
use crate::heuristics::amounts::{
    amounts_with_context, pick_facility_notional, pick_ifc_investment,
};
use crate::heuristics::boilerplate;
use crate::heuristics::keyword::matching_sentences;
use crate::heuristics::section::{locate_in_markup, locate_in_text, SectionMatch};
use crate::ingestors::DisclosureFetcher;
use crate::payload::{collect_strings, find_document_urls, strings_by_length};
use crate::pdf;
use crate::text::flatten_markup;
use crate::types::project::ProjectRef;
use crate::types::record::{
    mention_summary, ExportRecord, ExtractionMethod, FetchStatus, ProjectRecord,
};

/// A section located inside a payload, with the pass that found it.
#[derive(Debug, Clone)]
pub struct PayloadSection {
    pub section: SectionMatch,
    pub method: ExtractionMethod,
}

/// Three passes over the payload's strings, longest first: structure-aware
/// markup, flattened text, raw text. Every candidate must clear the
/// boilerplate gate.
pub fn section_from_payload(payload: &Value) -> Option<PayloadSection> {
    let strings = strings_by_length(payload);

    for s in &strings {
        let found = locate_in_markup(s);
        if accepted(&found) {
            return Some(PayloadSection {
                section: found,
                method: ExtractionMethod::HtmlBlock,
            });
        }
    }
    for s in &strings {
        let found = locate_in_text(&flatten_markup(s));
        if accepted(&found) {
            return Some(PayloadSection {
                section: found,
                method: ExtractionMethod::HtmlText,
            });
        }
    }
    for s in &strings {
        let found = locate_in_text(s);
        if accepted(&found) {
            return Some(PayloadSection {
                section: found,
                method: ExtractionMethod::RawText,
            });
        }
    }
    None
}

fn accepted(found: &SectionMatch) -> bool {
    found.is_found() && boilerplate::accepts(&found.text.to_lowercase())
}

/// Corpus assembled from the longest payload strings when no section was
/// found. Amounts still run against this.
pub fn best_effort_corpus(payload: &Value, config: &ScanConfig) -> String {
    strings_by_length(payload)
        .into_iter()
        .take(config.corpus_strings)
        .map(flatten_markup)
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Resolve one project end to end and assemble its report row.
pub async fn resolve_project<F: DisclosureFetcher>(
    fetcher: &F,
    config: &ScanConfig,
    url: &str,
    name: &str,
) -> ProjectRecord {
    let Some(project) = ProjectRef::parse(url) else {
        return ProjectRecord::error("", name, url, FetchStatus::BadUrlFormat);
    };
    let Some(endpoint) = project.api_endpoint() else {
        return ProjectRecord::error(project.id.as_str(), name, url, FetchStatus::BadUrlFormat);
    };

    let response = match fetcher.fetch_json(&endpoint).await {
        Ok(response) => response,
        Err(err) => {
            warn!(url, %err, "api fetch failed");
            let mut record =
                ProjectRecord::error(project.id.as_str(), name, url, FetchStatus::ApiError(err.to_string()));
            record.used_json_endpoint = endpoint;
            return record;
        }
    };

    let mut section = SectionMatch::none();
    let mut method = None;
    let mut used_pdf = String::new();

    if let Some(found) = section_from_payload(&response.value) {
        section = found.section;
        method = Some(found.method);
    } else {
        let candidates = find_document_urls(&response.value);
        for candidate in candidates.iter().take(config.max_document_candidates) {
            let fetched = match fetcher.fetch_bytes(candidate).await {
                Ok(fetched) => fetched,
                Err(err) => {
                    debug!(candidate = candidate.as_str(), %err, "document fetch failed");
                    continue;
                }
            };
            if fetched.status != 200 || fetched.body.len() <= config.min_document_bytes {
                continue;
            }
            let Some(text) = pdf::extract_text(&fetched.body) else {
                continue;
            };
            let found = locate_in_text(&text);
            if found.is_found() {
                section = found;
                method = Some(ExtractionMethod::PdfFallback);
                used_pdf = candidate.clone();
                break;
            }
        }
    }

    let corpus = if section.is_found() {
        section.text.clone()
    } else {
        best_effort_corpus(&response.value, config)
    };

    let mentions = amounts_with_context(&corpus);
    let ifc = pick_ifc_investment(&corpus);
    let facility = pick_facility_notional(&corpus);

    let fetch_status = if section.is_found() {
        FetchStatus::Ok
    } else {
        FetchStatus::OkButNoSectionFound
    };

    info!(
        project = project.id.as_str(),
        status = %fetch_status,
        title = section.title.as_str(),
        mentions = mentions.len(),
        "resolved project"
    );

    let amounts_json = serde_json::to_string(&mentions).unwrap_or_default();

    ProjectRecord {
        project_id: project.id,
        project_name: name.to_string(),
        url: url.to_string(),
        http_status: Some(response.status),
        fetch_status,
        section_text: section.text,
        section_title_found: section.title,
        extraction_method: method,
        used_json_endpoint: endpoint,
        used_pdf_url: used_pdf,
        ifc_investment_usd: ifc.as_ref().map(|p| p.amount),
        ifc_investment_note: ifc.map(|p| p.note),
        facility_notional_usd: facility.as_ref().map(|p| p.amount),
        facility_note: facility.map(|p| p.note),
        all_amount_mentions: mention_summary(&mentions),
        amounts_json,
    }
}

/// Probe every scan endpoint for a project, flatten the longest payload
/// strings and report sentences matching `pattern`.
pub async fn scan_project_for_keyword<F: DisclosureFetcher>(
    fetcher: &F,
    config: &ScanConfig,
    pattern: &Regex,
    url: &str,
    name: &str,
) -> ExportRecord {
    let Some(project) = ProjectRef::parse(url) else {
        return ExportRecord::error(name, url, FetchStatus::BadUrl);
    };

    let mut used = Vec::new();
    let mut statuses = Vec::new();
    let mut payloads = Vec::new();
    for endpoint in project.scan_endpoints() {
        match fetcher.fetch_json(&endpoint).await {
            Ok(response) => {
                statuses.push(response.status);
                used.push(endpoint);
                payloads.push(response.value);
            }
            Err(err) => {
                debug!(endpoint = endpoint.as_str(), %err, "endpoint probe failed");
                if let FetchError::RetriesExhausted {
                    last_status: Some(status),
                    ..
                } = err
                {
                    statuses.push(status);
                }
            }
        }
    }

    let mut strings: Vec<&str> = payloads.iter().flat_map(collect_strings).collect();
    strings.sort_by(|a, b| b.len().cmp(&a.len()));
    let taken = strings.len().min(config.max_scan_strings);

    let corpus = strings
        .iter()
        .take(config.max_scan_strings)
        .map(|s| flatten_markup(s))
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    let hits = matching_sentences(&corpus, pattern, config.max_keyword_sentences);

    let fetch_status = if taken > 0 {
        FetchStatus::Ok
    } else {
        FetchStatus::OkButNoText
    };

    info!(
        project = project.id.as_str(),
        status = %fetch_status,
        hits = hits.len(),
        scanned = corpus.len(),
        "scanned project"
    );

    ExportRecord {
        project_id: project.id,
        project_name: name.to_string(),
        url: url.to_string(),
        http_status: statuses.last().copied(),
        fetch_status,
        used_json_endpoints: used.join(" | "),
        export_hits: hits.len(),
        export_sentences: hits.join(" || "),
        text_scanned_chars: corpus.chars().count(),
    }
}
