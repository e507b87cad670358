//! Tabular input handling shared by both report binaries.

use std::path::Path;

use anyhow::{bail, Context, Result};
use csv::{ReaderBuilder, StringRecord};
use tracing::warn;

/// One input row: a disclosure URL and an optional display name.
#[derive(Debug, Clone)]
pub struct InputRow {
    pub url: String,
    pub name: String,
}

/// Read rows from a CSV (or, by extension, TSV) file, resolving the URL
/// and name columns by header. A missing name column degrades to empty
/// names; a missing URL column is fatal.
pub fn read_rows(
    path: &Path,
    url_col: &str,
    name_col: &str,
    max_rows: usize,
) -> Result<Vec<InputRow>> {
    let delimiter = match path.extension().and_then(|e| e.to_str()) {
        Some("tsv") => b'\t',
        _ => b',',
    };
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("open input {}", path.display()))?;

    let headers = reader.headers().context("read header row")?.clone();
    let Some(url_idx) = position(&headers, url_col) else {
        bail!(
            "URL column not found: {url_col} (available: {:?})",
            headers.iter().collect::<Vec<_>>()
        );
    };
    let name_idx = position(&headers, name_col);
    if name_idx.is_none() {
        warn!(column = name_col, "name column not found; using empty names");
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.context("read input row")?;
        let url = record.get(url_idx).unwrap_or("").trim().to_string();
        let name = name_idx
            .and_then(|i| record.get(i))
            .unwrap_or("")
            .trim()
            .to_string();
        rows.push(InputRow { url, name });
        if max_rows > 0 && rows.len() >= max_rows {
            break;
        }
    }
    Ok(rows)
}

fn position(headers: &StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_reads_named_columns() {
        let path = write_temp(
            "disclosure_cli_input_test.csv",
            "Project Name,Project Url\nAcme,https://example.org/a\nBeta,https://example.org/b\n",
        );
        let rows = read_rows(&path, "Project Url", "Project Name", 0).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].url, "https://example.org/a");
        assert_eq!(rows[0].name, "Acme");
    }

    #[test]
    fn test_max_rows_caps_output() {
        let path = write_temp(
            "disclosure_cli_maxrows_test.csv",
            "Project Url\nu1\nu2\nu3\n",
        );
        let rows = read_rows(&path, "Project Url", "Project Name", 2).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].name, "");
    }

    #[test]
    fn test_missing_url_column_is_fatal() {
        let path = write_temp("disclosure_cli_nourl_test.csv", "Other\nvalue\n");
        assert!(read_rows(&path, "Project Url", "Project Name", 0).is_err());
    }

    #[test]
    fn test_tsv_by_extension() {
        let path = write_temp(
            "disclosure_cli_input_test.tsv",
            "Project Name\tProject Url\nAcme\thttps://example.org/a\n",
        );
        let rows = read_rows(&path, "Project Url", "Project Name", 0).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].url, "https://example.org/a");
    }
}
