//! # wbts-merge
//!
//! Command-line front end of the WBTS merge engine.
//!
//! ## Usage
//!
//! ```bash
//! # Generate a synthetic project
//! wbts-merge demo wbts_demo
//!
//! # List discovered instrument directories
//! wbts-merge discover --config wbts_demo/wbts.toml
//!
//! # Merge every cruise, then build the multi-year archive
//! wbts-merge -v merge-cruises --config wbts_demo/wbts.toml
//! wbts-merge -v merge-years --config wbts_demo/wbts.toml
//!
//! # Inspect a merged file
//! wbts-merge info wbts_demo/WBTS_output/Merged/WBTS_all_years_CTD_LADCP.parquet
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
