//! Heuristic extraction for IFC disclosure-portal payloads.
//!
//! The portal serves deeply nested, schema-less JSON with narrative HTML
//! buried in string leaves, and sometimes only a PDF attachment carries
//! the text. This crate locates the project-description section in that
//! mess and pulls monetary commitment figures out of it.
//!
//! # Pipeline
//!
//! payload → string leaves → section location (boilerplate-gated) →
//! narrative text → amount extraction and disambiguation → report record,
//! with PDF attachments and a longest-strings corpus as fallback tiers.
//! Every heuristic is a total function over its input; per-project
//! failures surface as status fields, never as panics or batch aborts.
//!
//! # Modules
//!
//! - [`payload`] - string-leaf traversal over untyped JSON
//! - [`text`] - normalization, flattening, sentence splitting
//! - [`heuristics`] - section, boilerplate, amount and keyword heuristics
//! - [`pipeline`] - per-project resolution orchestration
//! - [`ingestors`] - the portal fetch seam and its test double
//! - [`types`] - project references and report records

pub mod config;
pub mod error;
pub mod heuristics;
pub mod ingestors;
pub mod payload;
pub mod pdf;
pub mod pipeline;
pub mod text;
pub mod types;

// Re-export the working surface at the crate root
pub use config::ScanConfig;
pub use error::{FetchError, FetchResult};
pub use heuristics::{
    amounts::{
        amounts_with_context, find_amounts, pick_facility_notional, pick_ifc_investment,
        AmountContext, AmountMention, PickedAmount,
    },
    keyword::{keyword_pattern, matching_sentences, DEFAULT_MAX_SENTENCES},
    section::{locate_in_markup, locate_in_text, SectionMatch},
};
pub use ingestors::{BytesResponse, DisclosureFetcher, HttpFetcher, JsonResponse, MockFetcher};
pub use pipeline::{
    best_effort_corpus, resolve_project, scan_project_for_keyword, section_from_payload,
    PayloadSection,
};
pub use types::{
    project::{DocType, ProjectRef},
    record::{ExportRecord, ExtractionMethod, FetchStatus, ProjectRecord},
};
