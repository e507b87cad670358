//! Per-project resolution orchestration.

mod resolve;

pub use resolve::{
    best_effort_corpus, resolve_project, scan_project_for_keyword, section_from_payload,
    PayloadSection,
};
