//! Narrative-section location.
//!
//! Disclosure pages bury the project description under a handful of known
//! headings. The portal also uses bold runs as pseudo-headings, so both
//! real heading tags and `strong`/`b` elements count as anchors.

use lazy_static::lazy_static;
use regex::{Regex, RegexBuilder};
use scraper::{ElementRef, Html, Selector};

use crate::text::{flatten_markup, normalize_ws};

/// Recognized project-description headings, in priority order.
pub const DESCRIPTION_TITLES: [&str; 6] = [
    "project overview",
    "project description",
    "summary of project information",
    "project description and background",
    "description of company",
    "description of company and purpose of project",
];

/// Cue phrases that open the next section of a disclosure page.
pub const NEXT_SECTION_CUES: [&str; 17] = [
    "summary of investment information",
    "proposed ifc investment",
    "location",
    "status",
    "contacts",
    "sponsor",
    "client",
    "financing plan",
    "project components",
    "documents",
    "disclosure",
    "additionality",
    "expected development impact",
    "ifc's role",
    "ifc’s role",
    "risk",
    "legal",
];

/// Elements treated as section headings.
const HEADING_TAGS: [&str; 8] = ["h1", "h2", "h3", "h4", "h5", "h6", "strong", "b"];

/// Block-level elements whose text belongs to the section body.
const BODY_TAGS: [&str; 6] = ["p", "div", "li", "td", "ul", "ol"];

/// A cue only ends the body past this offset; cue words sitting right next
/// to the heading must not truncate the section.
const CUE_FLOOR: usize = 400;

lazy_static! {
    static ref HEADING_SELECTOR: Selector =
        Selector::parse("h1, h2, h3, h4, h5, h6, strong, b").unwrap();
    static ref TITLE_PATTERNS: Vec<Regex> = DESCRIPTION_TITLES
        .iter()
        .map(|t| case_insensitive(t))
        .collect();
    static ref CUE_PATTERNS: Vec<Regex> = NEXT_SECTION_CUES
        .iter()
        .map(|c| case_insensitive(c))
        .collect();
}

fn case_insensitive(literal: &str) -> Regex {
    RegexBuilder::new(&regex::escape(literal))
        .case_insensitive(true)
        .build()
        .expect("escaped literal is a valid pattern")
}

/// Result of section location. Empty text and title mean "not found".
///
/// A non-empty title implies non-empty text found under a heading equal to
/// that title after whitespace collapse and lowercasing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionMatch {
    /// Normalized body text of the located section.
    pub text: String,
    /// The heading that anchored the match, collapsed and lowercased.
    pub title: String,
}

impl SectionMatch {
    /// The empty "not found" match.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_found(&self) -> bool {
        !self.text.is_empty()
    }
}

/// Locate the description section inside a markup fragment.
///
/// Finds the first heading-like element whose collapsed text equals a
/// recognized title, then gathers following siblings until the next
/// heading-like element. Falls back to [`locate_in_text`] on the flattened
/// document when no heading matches.
pub fn locate_in_markup(html: &str) -> SectionMatch {
    let document = Html::parse_document(html);

    let mut anchor = None;
    let mut matched = String::new();
    for heading in document.select(&HEADING_SELECTOR) {
        let norm = normalize_ws(&element_text(heading, " ")).to_lowercase();
        if DESCRIPTION_TITLES.contains(&norm.as_str()) {
            matched = norm;
            anchor = Some(heading);
            break;
        }
    }

    let Some(anchor) = anchor else {
        return locate_in_text(&flatten_markup(html));
    };

    let mut blocks: Vec<String> = Vec::new();
    for sibling in anchor.next_siblings() {
        if let Some(element) = ElementRef::wrap(sibling) {
            let name = element.value().name();
            if HEADING_TAGS.contains(&name) {
                break;
            }
            if BODY_TAGS.contains(&name) {
                let text = element_text(element, "\n");
                if !text.is_empty() {
                    blocks.push(text);
                }
            }
            if name == "br" {
                blocks.push("\n".to_string());
            }
        } else if let Some(text) = sibling.value().as_text() {
            let t = text.trim();
            if !t.is_empty() {
                blocks.push(t.to_string());
            }
        }
    }

    let section = normalize_ws(blocks.join("\n").trim());
    if section.is_empty() {
        SectionMatch::none()
    } else {
        SectionMatch {
            text: section,
            title: matched,
        }
    }
}

/// Locate the description section in plain text.
///
/// Title search is case-insensitive; the body starts after the first line
/// break following the heading occurrence. Only the first occurrence of
/// each cue counts, and only past the 400-byte floor; the earliest
/// qualifying cue ends the body. The first title yielding a non-empty
/// chunk wins.
pub fn locate_in_text(text: &str) -> SectionMatch {
    for (title, pattern) in DESCRIPTION_TITLES.iter().zip(TITLE_PATTERNS.iter()) {
        let Some(m) = pattern.find(text) else {
            continue;
        };
        let tail = &text[m.start()..];
        let candidate = match tail.split_once('\n') {
            Some((_, body)) => body,
            None => tail,
        };

        let mut end = candidate.len();
        for cue in CUE_PATTERNS.iter() {
            if let Some(c) = cue.find(candidate) {
                if c.start() > CUE_FLOOR {
                    end = end.min(c.start());
                }
            }
        }

        let chunk = normalize_ws(candidate[..end].trim());
        if !chunk.is_empty() {
            return SectionMatch {
                text: chunk,
                title: (*title).to_string(),
            };
        }
    }
    SectionMatch::none()
}

fn element_text(element: ElementRef, separator: &str) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}
