//! Section and commitment-amount report over a list of disclosure
//! project URLs.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use disclosure_cli::{init_tracing, input::read_rows};
use disclosure_extraction::{resolve_project, HttpFetcher, ScanConfig};

/// Extract project-description sections and commitment amounts from the
/// IFC disclosure portal.
#[derive(Debug, Parser)]
#[command(name = "disclosure-amounts")]
struct Args {
    /// Input CSV/TSV with one project URL per row
    #[arg(long)]
    input: PathBuf,

    /// Output CSV path
    #[arg(long)]
    output: PathBuf,

    /// Header of the column holding project URLs
    #[arg(long, default_value = "Project Url")]
    url_col: String,

    /// Header of the column holding project names
    #[arg(long, default_value = "Project Name")]
    name_col: String,

    /// Stop after this many rows (0 = all)
    #[arg(long, default_value_t = 0)]
    max_rows: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    let config = ScanConfig::default();

    let rows = read_rows(&args.input, &args.url_col, &args.name_col, args.max_rows)?;
    info!(rows = rows.len(), input = %args.input.display(), "starting amounts report");

    let fetcher = HttpFetcher::new(&config).context("build http client")?;
    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("open output {}", args.output.display()))?;

    for (i, row) in rows.iter().enumerate() {
        info!(row = i + 1, total = rows.len(), url = row.url.as_str(), "processing");
        let record = resolve_project(&fetcher, &config, &row.url, &row.name).await;
        writer.serialize(&record).context("write output row")?;
        if (i + 1) % 10 == 0 {
            writer.flush().context("flush output")?;
        }
        tokio::time::sleep(Duration::from_millis(config.polite_delay_ms)).await;
    }
    writer.flush().context("flush output")?;

    info!(output = %args.output.display(), "report complete");
    Ok(())
}
