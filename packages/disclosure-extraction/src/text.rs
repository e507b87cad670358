//! Text utilities shared by every heuristic: whitespace normalization,
//! markup flattening, and sentence splitting.

use lazy_static::lazy_static;
use regex::Regex;
use scraper::Html;

lazy_static! {
    static ref SPACE_RUNS: Regex = Regex::new(r"[ \t]+").unwrap();
    static ref TAG: Regex = Regex::new(r"<[^>]+>").unwrap();
}

/// Collapse space/tab runs to single spaces and fold non-breaking spaces.
///
/// Newlines survive; the section slicer relies on them as block breaks.
pub fn normalize_ws(s: &str) -> String {
    let folded = s.replace('\u{a0}', " ");
    SPACE_RUNS.replace_all(&folded, " ").trim().to_string()
}

/// Probable-XML check: declarations open with `<?xml` or `<xml`.
fn looks_like_xml(s: &str) -> bool {
    let head: String = s.trim_start().chars().take(5).collect();
    let head = head.to_lowercase();
    head.starts_with("<?xml") || head.starts_with("<xml")
}

/// Flatten markup to plain text, one line per text node.
///
/// HTML is parsed permissively (html5ever accepts unclosed tags and other
/// real-world damage), so flattening cannot fail. XML-looking input is
/// tag-stripped instead. Plain text passes through as its own text node.
pub fn flatten_markup(s: &str) -> String {
    if s.is_empty() {
        return String::new();
    }
    if looks_like_xml(s) {
        let stripped = TAG.replace_all(s, "\n");
        return stripped
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n");
    }
    let document = Html::parse_document(s);
    document
        .root_element()
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Split at whitespace runs that follow sentence-final punctuation.
pub fn split_sentences(text: &str) -> Vec<&str> {
    split_inner(text, false)
}

/// Looser split that also breaks at any run of line breaks.
pub fn split_sentences_loose(text: &str) -> Vec<&str> {
    split_inner(text, true)
}

fn split_inner(text: &str, break_on_newline: bool) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut prev: Option<char> = None;
    let mut iter = text.char_indices().peekable();

    while let Some((i, c)) = iter.next() {
        let after_terminal = matches!(prev, Some('.') | Some('?') | Some('!'));
        if c.is_whitespace() && after_terminal {
            parts.push(&text[start..i]);
            let mut end = i + c.len_utf8();
            while let Some(&(j, n)) = iter.peek() {
                if !n.is_whitespace() {
                    break;
                }
                iter.next();
                end = j + n.len_utf8();
            }
            start = end;
            prev = None;
            continue;
        }
        if break_on_newline && (c == '\n' || c == '\r') {
            parts.push(&text[start..i]);
            let mut end = i + c.len_utf8();
            while let Some(&(j, n)) = iter.peek() {
                if n != '\n' && n != '\r' {
                    break;
                }
                iter.next();
                end = j + n.len_utf8();
            }
            start = end;
            prev = None;
            continue;
        }
        prev = Some(c);
    }

    parts.push(&text[start..]);
    parts
}

/// Truncate to at most `max` characters, never splitting a code point.
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((i, _)) => &s[..i],
        None => s,
    }
}

/// Byte window around `[start, end)`, padded on both sides and clamped to
/// char boundaries so multi-byte punctuation cannot panic the slice.
pub fn context_window(text: &str, start: usize, end: usize, pad: usize) -> &str {
    let mut lo = start.saturating_sub(pad);
    let mut hi = usize::min(text.len(), end.saturating_add(pad));
    while lo > 0 && !text.is_char_boundary(lo) {
        lo -= 1;
    }
    while hi < text.len() && !text.is_char_boundary(hi) {
        hi += 1;
    }
    &text[lo..hi]
}
