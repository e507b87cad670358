//! Scan configuration.

/// Tunables for fetching and resolution, shared by both report tools.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,

    /// Attempts per JSON endpoint before giving up.
    pub retries: u32,

    /// Most document candidates fetched per project.
    pub max_document_candidates: usize,

    /// Bodies at or below this many bytes are treated as empty stubs.
    pub min_document_bytes: usize,

    /// How many of the longest payload strings form the best-effort corpus.
    pub corpus_strings: usize,

    /// How many of the longest payload strings the exports scanner flattens.
    pub max_scan_strings: usize,

    /// Cap on sentences kept by the exports scanner.
    pub max_keyword_sentences: usize,

    /// Pause between project rows in milliseconds.
    pub polite_delay_ms: u64,

    /// User agent presented to the portal.
    pub user_agent: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            retries: 3,
            max_document_candidates: 5,
            min_document_bytes: 200,
            corpus_strings: 10,
            max_scan_strings: 120,
            max_keyword_sentences: 24,
            polite_delay_ms: 120,
            user_agent: "Mozilla/5.0 (Macintosh; Intel Mac OS X) DisclosureScan/0.1".to_string(),
        }
    }
}

impl ScanConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-request timeout.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the JSON retry count.
    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    /// Set the per-row polite delay.
    pub fn with_polite_delay_ms(mut self, delay_ms: u64) -> Self {
        self.polite_delay_ms = delay_ms;
        self
    }

    /// Set the exports scanner's sentence cap.
    pub fn with_max_keyword_sentences(mut self, max: usize) -> Self {
        self.max_keyword_sentences = max;
        self
    }
}
