use anyhow::{Context, Result};
use std::path::Path;

use wbts::merge::{merge_years_with, ArchiveOptions};
use wbts::units::Vocabulary;
use wbts::writer::WriterConfig;

/// Build the multi-year archive from the per-cruise files
pub fn run(
    config: Option<&Path>,
    archive_root: Option<&Path>,
    max_files: Option<usize>,
    writer_config: WriterConfig,
) -> Result<()> {
    let (root, mut options, vocabulary) = match (config, archive_root) {
        (Some(config), _) => {
            let project = super::load_project(config)?;
            (project.output_dir, project.archive, project.vocabulary)
        }
        (None, Some(root)) => (root.to_path_buf(), ArchiveOptions::default(), Vocabulary::default()),
        (None, None) => anyhow::bail!("Either --config or --archive-root is required"),
    };
    if max_files.is_some() {
        options.max_files = max_files;
    }

    let archive = merge_years_with(&root, &options, &vocabulary)
        .with_context(|| format!("Failed to merge archive under {}", root.display()))?;
    for skipped in &archive.skipped {
        println!("  skipped {}: {}", skipped.path.display(), skipped.reason);
    }

    let stats = archive
        .write(&writer_config)
        .with_context(|| format!("Failed to write {}", archive.output_path.display()))?;

    println!("Archive: {}", archive.output_path.display());
    println!("  Input files: {}", archive.inputs.len());
    println!("  Time points: {}", archive.dataset.num_times());
    println!(
        "  File size: {} bytes ({:.2} MB)",
        stats.file_size_bytes,
        stats.file_size_bytes as f64 / 1024.0 / 1024.0
    );
    Ok(())
}
