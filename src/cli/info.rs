use anyhow::{Context, Result};
use std::path::PathBuf;

use wbts::reader::DatasetReader;

/// Display information about a dataset file
pub fn run(file: PathBuf) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File does not exist: {}", file.display());
    }

    let reader = DatasetReader::open(&file)
        .with_context(|| format!("Failed to open {}", file.display()))?;
    let metadata = reader.metadata();

    println!("File: {}", file.display());
    println!("  Row groups: {}", metadata.num_row_groups);
    println!("  Total rows: {}", metadata.total_rows);
    println!();

    let summary = reader.summary().context("Failed to read dataset")?;
    print!("{}", summary);

    Ok(())
}
