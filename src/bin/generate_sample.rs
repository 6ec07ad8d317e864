use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use rand_pcg::Pcg64;

/// Write example `Minicore` and `Compositecore` sample files.
#[derive(Debug, Parser)]
#[command(long_about = None)]
struct Args {
    /// Directory the two files are written to
    #[arg(default_value = ".")]
    out_dir: PathBuf,

    /// Samples per file
    #[arg(long, default_value_t = 200)]
    count: usize,

    #[arg(long, default_value_t = 42)]
    seed: u64,
}

/// (file name, mean, standard deviation)
const GROUPS: [(&str, f64, f64); 2] = [("Minicore", 0.62, 0.05), ("Compositecore", 0.71, 0.08)];

fn write_samples(path: &Path, values: impl Iterator<Item = f64>) -> Result<usize> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    let mut written = 0;
    for v in values {
        writeln!(writer, "{v:.6}")?;
        written += 1;
    }
    writer.flush()?;
    Ok(written)
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut rng = Pcg64::seed_from_u64(args.seed);

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("creating {}", args.out_dir.display()))?;

    for (name, mean, std_dev) in GROUPS {
        let normal = Normal::new(mean, std_dev).context("invalid distribution parameters")?;
        let path = args.out_dir.join(name);
        let values: Vec<f64> = normal.sample_iter(&mut rng).take(args.count).collect();
        let written = write_samples(&path, values.into_iter())?;
        println!("Wrote {written} samples to {}", path.display());
    }

    Ok(())
}
