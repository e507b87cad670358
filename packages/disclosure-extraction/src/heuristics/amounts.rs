//! Currency-amount extraction and disambiguation.
//!
//! Disclosure narratives quote several figures side by side: IFC's own
//! commitment, co-financing, and the total instrument size. Extraction is
//! plain pattern matching; disambiguation layers phrase, sentence and
//! window heuristics on top with documented tie-breaks.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::text::{context_window, normalize_ws, split_sentences, truncate_chars};

lazy_static! {
    /// Currency symbol first: `US$ 12.5 million`, `$30,000`.
    static ref AMOUNT_PREFIXED: Regex = Regex::new(
        r"(?i)(?:US\$|USD|\$)\s?([0-9]{1,3}(?:,[0-9]{3})*(?:\.[0-9]+)?)\s?(billion|million|thousand|bn|mn|m|k)?"
    )
    .unwrap();
    /// Currency symbol after the scale word: `12.5 million US$`.
    static ref AMOUNT_SUFFIXED: Regex = Regex::new(
        r"(?i)([0-9]{1,3}(?:,[0-9]{3})*(?:\.[0-9]+)?)\s?(billion|million|thousand|bn|mn|m|k)\s?(?:US\$|USD|\$)"
    )
    .unwrap();
    /// `IFC's <instrument> would be/will be/is/of/amounts to [up to] <amount>`.
    static ref COMMIT_POSSESSIVE: Regex = Regex::new(
        r"(?i)ifc[’']?s?\s+(?:equity|loan|debt|investment|guarantee)\s+(?:would be|will be|is|of|amounts? to)\s+(?:up to\s+)?(?P<cur>US\$|USD|\$)?\s?(?P<num>[0-9]{1,3}(?:,[0-9]{3})*(?:\.[0-9]+)?)\s?(?P<unit>billion|million|thousand|bn|mn|m|k)?"
    )
    .unwrap();
    /// `IFC proposes/intends/would/will to invest/provide/lend [up to] <amount>`.
    static ref COMMIT_VERB: Regex = Regex::new(
        r"(?i)ifc\s+(?:proposes?|intends?|would|will)\s+to\s+(?:invest|provide|lend)\s+(?:up to\s+)?(?P<cur>US\$|USD|\$)?\s?(?P<num>[0-9]{1,3}(?:,[0-9]{3})*(?:\.[0-9]+)?)\s?(?P<unit>billion|million|thousand|bn|mn|m|k)?"
    )
    .unwrap();
}

/// Commitment verbs for the sentence-tier heuristic.
const COMMIT_KEYWORDS: [&str; 7] = [
    "invest",
    "loan",
    "equity",
    "guarantee",
    "provide",
    "lend",
    "commit",
];

/// Terms marking a sentence as describing the overall instrument size.
const FACILITY_TERMS: [&str; 7] = [
    "facility",
    "portfolio",
    "program",
    "ceiling",
    "envelope",
    "guarantee capacity",
    "up to",
];

/// Padding of the note window around a direct phrase match, in bytes.
const PHRASE_CONTEXT_PAD: usize = 140;

/// Sentence context cap for serialized mentions, in characters.
const MENTION_CONTEXT_CHARS: usize = 300;

/// A currency mention normalized to USD.
#[derive(Debug, Clone, PartialEq)]
pub struct AmountMention {
    /// The exact matched substring.
    pub raw: String,
    /// Numeral times unit multiplier.
    pub amount: f64,
}

/// A mention with the sentence it was found in, as serialized in reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmountContext {
    pub raw: String,
    pub amount_usd: f64,
    pub context: String,
}

/// A disambiguated amount and the heuristic note that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct PickedAmount {
    pub amount: f64,
    pub note: String,
}

fn parse_numeral(num: &str) -> Option<f64> {
    num.replace(',', "").parse::<f64>().ok()
}

fn unit_multiplier(unit: Option<&str>) -> f64 {
    match unit.map(str::to_lowercase).as_deref() {
        Some("billion") | Some("bn") => 1e9,
        Some("million") | Some("mn") | Some("m") => 1e6,
        Some("thousand") | Some("k") => 1e3,
        _ => 1.0,
    }
}

fn normalize_amount(num: &str, unit: Option<&str>) -> Option<f64> {
    parse_numeral(num).map(|base| base * unit_multiplier(unit))
}

/// Every currency mention in `text`, deduplicated by matched substring,
/// in match order. Zero and unparsable numerals are dropped.
pub fn find_amounts(text: &str) -> Vec<AmountMention> {
    let mut out: Vec<AmountMention> = Vec::new();
    for pattern in [&*AMOUNT_PREFIXED, &*AMOUNT_SUFFIXED] {
        for caps in pattern.captures_iter(text) {
            let raw = caps.get(0).map(|m| m.as_str()).unwrap_or_default();
            let num = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
            let unit = caps.get(2).map(|m| m.as_str());
            let Some(amount) = normalize_amount(num, unit) else {
                continue;
            };
            if amount == 0.0 {
                continue;
            }
            if out.iter().any(|seen| seen.raw == raw) {
                continue;
            }
            out.push(AmountMention {
                raw: raw.to_string(),
                amount,
            });
        }
    }
    out
}

/// Per-sentence mentions with bounded context, for the serialized report.
pub fn amounts_with_context(text: &str) -> Vec<AmountContext> {
    let mut results = Vec::new();
    for sentence in split_sentences(text) {
        for hit in find_amounts(sentence) {
            results.push(AmountContext {
                raw: hit.raw,
                amount_usd: hit.amount,
                context: truncate_chars(&normalize_ws(sentence), MENTION_CONTEXT_CHARS)
                    .to_string(),
            });
        }
    }
    results
}

/// Pick the figure IFC itself is committing.
///
/// Tiers are strictly ordered and mutually exclusive:
/// 1. an explicit commitment phrase, first match in document order;
/// 2. sentences pairing `ifc` with a commitment verb, minimum candidate;
/// 3. a three-sentence window around the first `ifc` mention that carries
///    any amount, minimum again.
///
/// Ties keep the earliest candidate.
pub fn pick_ifc_investment(text: &str) -> Option<PickedAmount> {
    // 1) direct phrase
    for pattern in [&*COMMIT_POSSESSIVE, &*COMMIT_VERB] {
        for caps in pattern.captures_iter(text) {
            let num = caps.name("num").map(|m| m.as_str()).unwrap_or_default();
            let unit = caps.name("unit").map(|m| m.as_str());
            let Some(amount) = normalize_amount(num, unit) else {
                continue;
            };
            if amount == 0.0 {
                continue;
            }
            let whole = caps.get(0).unwrap();
            let ctx = context_window(text, whole.start(), whole.end(), PHRASE_CONTEXT_PAD);
            return Some(PickedAmount {
                amount,
                note: format!("direct phrase: {}", normalize_ws(ctx)),
            });
        }
    }

    let sentences = split_sentences(text);

    // 2) sentence with ifc + commitment verb
    let mut candidates: Vec<(f64, String)> = Vec::new();
    for sentence in &sentences {
        let low = sentence.to_lowercase();
        if low.contains("ifc") && COMMIT_KEYWORDS.iter().any(|k| low.contains(k)) {
            for hit in find_amounts(sentence) {
                candidates.push((hit.amount, normalize_ws(sentence)));
            }
        }
    }
    if let Some((amount, sentence)) = first_min(candidates) {
        return Some(PickedAmount {
            amount,
            note: format!("ifc-sentence: {sentence}"),
        });
    }

    // 3) window around the first ifc mention with any amount
    for (i, sentence) in sentences.iter().enumerate() {
        if !sentence.to_lowercase().contains("ifc") {
            continue;
        }
        let lo = i.saturating_sub(1);
        let hi = usize::min(sentences.len(), i + 2);
        let window = sentences[lo..hi].join(" ");
        let hits: Vec<(f64, String)> = find_amounts(&window)
            .into_iter()
            .map(|h| (h.amount, h.raw))
            .collect();
        if let Some((amount, _)) = first_min(hits) {
            return Some(PickedAmount {
                amount,
                note: format!("ifc-window: {}", normalize_ws(&window)),
            });
        }
    }

    None
}

/// Pick the overall instrument ceiling.
///
/// Sentences naming a facility-scope term vote with their amounts and the
/// maximum wins; without any such sentence the largest amount anywhere on
/// the page stands in. Ties keep the earliest candidate.
pub fn pick_facility_notional(text: &str) -> Option<PickedAmount> {
    let mut candidates: Vec<(f64, String)> = Vec::new();
    for sentence in split_sentences(text) {
        let low = sentence.to_lowercase();
        if FACILITY_TERMS.iter().any(|t| low.contains(t)) {
            for hit in find_amounts(sentence) {
                candidates.push((hit.amount, normalize_ws(sentence)));
            }
        }
    }
    if let Some((amount, sentence)) = first_max(candidates) {
        return Some(PickedAmount {
            amount,
            note: format!("facility sentence: {sentence}"),
        });
    }

    let all: Vec<(f64, String)> = find_amounts(text)
        .into_iter()
        .map(|h| (h.amount, h.raw))
        .collect();
    first_max(all).map(|(amount, raw)| PickedAmount {
        amount,
        note: format!("page max: {raw}"),
    })
}

// Iterator::min_by/max_by keep the last of equal elements; these keep the
// first, which the tie-break rules require.
fn first_min<T>(items: Vec<(f64, T)>) -> Option<(f64, T)> {
    let mut best: Option<(f64, T)> = None;
    for item in items {
        match &best {
            Some((b, _)) if item.0 >= *b => {}
            _ => best = Some(item),
        }
    }
    best
}

fn first_max<T>(items: Vec<(f64, T)>) -> Option<(f64, T)> {
    let mut best: Option<(f64, T)> = None;
    for item in items {
        match &best {
            Some((b, _)) if item.0 <= *b => {}
            _ => best = Some(item),
        }
    }
    best
}
