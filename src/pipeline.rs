use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::chart::{self, Figure};
use crate::cli::CliArgs;
use crate::config::PlotConfig;
use crate::data::loader::{read_samples, LoadError};
use crate::data::model::LabeledTable;
use crate::export::{self, GroupReport};

// ---------------------------------------------------------------------------
// Pipeline: read inputs → build table → render → save
// ---------------------------------------------------------------------------

/// A chart that was written to disk.
pub struct Rendered {
    pub output: PathBuf,
    pub figure: Figure,
    /// The PNG exactly as written.
    pub png: Vec<u8>,
}

/// How a run ended when nothing went wrong past the read stage.
pub enum Outcome {
    Saved(Rendered),
    /// An input could not be read; it was reported and nothing was written.
    InputRejected(LoadError),
}

/// Console line printed after a successful save.
pub fn saved_message(output: &Path) -> String {
    format!("Violin plot saved as {}", output.display())
}

/// Merge the optional config file with command-line overrides.
pub fn resolve_config(args: &CliArgs) -> Result<PlotConfig> {
    let mut config = match &args.config {
        Some(path) => PlotConfig::load(path)?,
        None => PlotConfig::default(),
    };
    if let Some(dpi) = args.dpi {
        config.dpi = dpi;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    config.validate()?;
    Ok(config)
}

/// Run the whole tool for one invocation.
///
/// Read failures are reported on the console and turned into
/// [`Outcome::InputRejected`]; rendering, writing and export failures are
/// returned as errors.
pub fn run(args: &CliArgs) -> Result<Outcome> {
    let config = resolve_config(args)?;

    let (minicore, compositecore) =
        match read_samples(&args.minicore_file).and_then(|first| {
            read_samples(&args.compositecore_file).map(|second| (first, second))
        }) {
            Ok(samples) => samples,
            Err(err) => {
                report_load_error(&err);
                return Ok(Outcome::InputRejected(err));
            }
        };

    let table = LabeledTable::from_groups(
        (config.first_label.as_str(), minicore.as_slice()),
        (config.second_label.as_str(), compositecore.as_slice()),
    );
    log::debug!("built table with {} rows", table.len());

    let figure = chart::layout(&table, &config)?;
    let png = chart::render_to_file(&figure, &config, &args.output_file)?;
    println!("{}", saved_message(&args.output_file));
    log::info!(
        "Wrote {} bytes at {} DPI to {}",
        png.len(),
        config.dpi,
        args.output_file.display()
    );

    if let Some(path) = &args.stats_json {
        let reports: Vec<GroupReport<'_>> = figure
            .groups
            .iter()
            .map(|g| GroupReport {
                label: &g.label,
                stats: &g.stats,
            })
            .collect();
        export::write_stats_json(&reports, path)?;
    }
    if let Some(path) = &args.table_csv {
        export::write_table_csv(&table, path)?;
    }

    Ok(Outcome::Saved(Rendered {
        output: args.output_file.clone(),
        figure,
        png,
    }))
}

fn report_load_error(err: &LoadError) {
    log::error!("{err:?}");
    match err {
        LoadError::NotFound { .. } => eprintln!("Error: {err}"),
        _ => eprintln!("Error reading files: {err}"),
    }
}
