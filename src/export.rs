use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::data::model::LabeledTable;
use crate::data::stats::SummaryStats;

// ---------------------------------------------------------------------------
// Summary statistics (JSON)
// ---------------------------------------------------------------------------

/// One group's statistics as written to the JSON report.
#[derive(Debug, Clone, Serialize)]
pub struct GroupReport<'a> {
    pub label: &'a str,
    #[serde(flatten)]
    pub stats: &'a SummaryStats,
}

/// Write per-group statistics as a pretty-printed JSON array.
pub fn write_stats_json(reports: &[GroupReport<'_>], path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating stats file '{}'", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, reports)
        .with_context(|| format!("writing stats file '{}'", path.display()))?;
    writer.flush().context("flushing stats file")?;
    log::info!("Wrote statistics for {} groups to {}", reports.len(), path.display());
    Ok(())
}

// ---------------------------------------------------------------------------
// Labeled table (CSV)
// ---------------------------------------------------------------------------

/// Write the labeled table with a `Dataset,Value` header.
pub fn write_table_csv(table: &LabeledTable, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating CSV file '{}'", path.display()))?;
    for row in &table.rows {
        writer.serialize(row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV")?;
    log::info!("Wrote {} rows to {}", table.len(), path.display());
    Ok(())
}
