mod chart;
mod cli;
mod color;
mod config;
mod data;
mod export;
mod pipeline;

#[cfg(feature = "viewer")]
mod app;
#[cfg(feature = "viewer")]
mod state;
#[cfg(feature = "viewer")]
mod ui;

use std::process::ExitCode;

use clap::Parser;

use cli::CliArgs;
use pipeline::{Outcome, Rendered};

fn main() -> anyhow::Result<ExitCode> {
    env_logger::init();

    let args = CliArgs::parse();
    match pipeline::run(&args)? {
        Outcome::Saved(rendered) => {
            if args.show {
                present(rendered);
            }
            Ok(ExitCode::SUCCESS)
        }
        Outcome::InputRejected(err) => {
            log::debug!("plotting skipped: {err}");
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Best effort: a headless machine just logs a warning.
#[cfg(feature = "viewer")]
fn present(rendered: Rendered) {
    if let Err(e) = app::show(rendered) {
        log::warn!("Could not open the viewer: {e}");
    }
}

#[cfg(not(feature = "viewer"))]
fn present(_rendered: Rendered) {
    log::warn!("Built without the `viewer` feature; ignoring --show");
}
