//! Keyword-sentence report: scan disclosure payloads for sentences
//! mentioning a keyword (by default `export`).

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use disclosure_cli::{init_tracing, input::read_rows};
use disclosure_extraction::{keyword_pattern, scan_project_for_keyword, HttpFetcher, ScanConfig};

/// Scan IFC disclosure pages for sentences mentioning a keyword.
#[derive(Debug, Parser)]
#[command(name = "disclosure-exports")]
struct Args {
    /// Input CSV/TSV with at least the disclosure URL
    #[arg(long)]
    input: PathBuf,

    /// Output CSV with keyword hits
    #[arg(long)]
    output: PathBuf,

    /// Header of the column holding project URLs
    #[arg(long, default_value = "Project Url")]
    url_col: String,

    /// Header of the column holding project names
    #[arg(long, default_value = "Project Name")]
    name_col: String,

    /// Keyword to scan for (matched with any suffix)
    #[arg(long, default_value = "export")]
    keyword: String,

    /// Stop after this many rows (0 = all)
    #[arg(long, default_value_t = 0)]
    max_rows: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    let config = ScanConfig::default();
    let pattern = keyword_pattern(&args.keyword);

    let rows = read_rows(&args.input, &args.url_col, &args.name_col, args.max_rows)?;
    info!(
        rows = rows.len(),
        keyword = args.keyword.as_str(),
        input = %args.input.display(),
        "starting keyword scan"
    );

    let fetcher = HttpFetcher::new(&config).context("build http client")?;
    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("open output {}", args.output.display()))?;

    for (i, row) in rows.iter().enumerate() {
        if row.url.is_empty() || !row.url.starts_with("http") {
            warn!(row = i + 1, name = row.name.as_str(), "skipping row without url");
            continue;
        }
        info!(row = i + 1, total = rows.len(), url = row.url.as_str(), "scanning");
        let record =
            scan_project_for_keyword(&fetcher, &config, &pattern, &row.url, &row.name).await;
        writer.serialize(&record).context("write output row")?;
        if (i + 1) % 10 == 0 {
            writer.flush().context("flush output")?;
        }
        tokio::time::sleep(Duration::from_millis(config.polite_delay_ms)).await;
    }
    writer.flush().context("flush output")?;

    info!(output = %args.output.display(), "scan complete");
    Ok(())
}
