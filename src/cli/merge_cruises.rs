use anyhow::{Context, Result};
use log::{error, info};
use std::path::Path;

use wbts::discovery::discover_cruises;
use wbts::merge::merge_all_cruises;
use wbts::writer::WriterConfig;

/// Merge every discovered cruise into `<output_dir>/Merged`
pub fn run(config: &Path, only: &[String], writer_config: WriterConfig) -> Result<()> {
    let project = super::load_project(config)?;

    let mut inputs = discover_cruises(&project.input_dir, &project.discovery);
    if !only.is_empty() {
        inputs.retain(|input| only.iter().any(|id| id == input.cruise.as_str()));
    }
    if inputs.is_empty() {
        anyhow::bail!("No cruises found under {}", project.input_dir.display());
    }

    let merged_dir = project.merged_dir();
    std::fs::create_dir_all(&merged_dir)
        .with_context(|| format!("Failed to create {}", merged_dir.display()))?;
    info!("Merging {} cruises into {}", inputs.len(), merged_dir.display());

    let mut failed = 0usize;
    for (cruise, result) in merge_all_cruises(&inputs, &project) {
        let written = result.map_err(anyhow::Error::from).and_then(|merge| {
            for skipped in &merge.skipped {
                println!("  skipped {}: {}", skipped.path.display(), skipped.reason);
            }
            merge.write_to(&merged_dir, &writer_config).map_err(anyhow::Error::from)
        });
        match written {
            Ok((path, stats)) => println!("{}: {} ({})", cruise, path.display(), stats),
            Err(e) => {
                error!("{}: {:#}", cruise, e);
                println!("{}: FAILED ({:#})", cruise, e);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{} of {} cruises failed to merge", failed, inputs.len());
    }
    Ok(())
}
