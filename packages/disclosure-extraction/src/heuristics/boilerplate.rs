//! SPI boilerplate gating.
//!
//! The portal frequently serves a templated legal disclaimer in the same
//! structural slot as the narrative body, so a heading match alone would
//! capture it. Candidates must both miss the disclaimer prefixes and carry
//! at least one marker of a genuine summary body.

/// Fixed disclaimer openings, straight and curly apostrophe variants.
const BOILERPLATE_PREFIXES: [&str; 2] = [
    "summary of project information (spi) is prepared and distributed to the public in advance of the ifc board of directors' consideration",
    "summary of project information (spi) is prepared and distributed to the public in advance of the ifc board of directors’ consideration",
];

/// Substrings characteristic of a real summary-of-project-information body.
const BODY_MARKERS: [&str; 11] = [
    "project name:",
    "region:",
    "sector:",
    "project no:",
    "project number:",
    "company name:",
    "description of company",
    "purpose of project",
    "environmental category",
    "and issues",
    "description of location:",
];

/// True if a lowercased candidate opens with the legal disclaimer.
pub fn is_boilerplate(text_low: &str) -> bool {
    let t = text_low.trim();
    BOILERPLATE_PREFIXES.iter().any(|p| t.starts_with(p))
}

/// True if a lowercased candidate carries at least one body marker.
pub fn is_plausible_body(text_low: &str) -> bool {
    BODY_MARKERS.iter().any(|m| text_low.contains(m))
}

/// The dual gate the resolver applies to every candidate section.
pub fn accepts(text_low: &str) -> bool {
    !is_boilerplate(text_low) && is_plausible_body(text_low)
}
