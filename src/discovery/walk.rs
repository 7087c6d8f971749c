use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use super::DiscoveryConfig;

/// Recursive directory walk.
///
/// `prune` is asked for every directory below the root; pruned directories are
/// neither reported nor descended into. Symlinks are not followed.
fn walk_dirs<F, P>(root: &Path, is_match: F, prune: P) -> Vec<PathBuf>
where
    F: Fn(&Path) -> bool,
    P: Fn(&Path) -> bool,
{
    let mut found = Vec::new();
    if !root.is_dir() {
        debug!("Discovery root {} does not exist", root.display());
        return found;
    }

    let mut stack = vec![root.to_path_buf()];
    while let Some(dir) = stack.pop() {
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Skipping unreadable directory {}: {}", dir.display(), e);
                continue;
            }
        };
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping entry in {}: {}", dir.display(), e);
                    continue;
                }
            };
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
            if !is_dir {
                continue;
            }
            let path = entry.path();
            let relative = path.strip_prefix(root).unwrap_or(&path);
            if prune(relative) {
                debug!("Pruned {}", path.display());
                continue;
            }
            if is_match(&path) {
                found.push(path.clone());
            }
            stack.push(path);
        }
    }

    found.sort();
    found
}

fn dir_name(path: &Path) -> Option<&str> {
    path.file_name().and_then(|n| n.to_str())
}

/// All CTD instrument directories below `root`, sorted.
///
/// Directories whose name contains the derived-output marker are never
/// entered, so copies of CTD data under them are not reported.
pub fn dir_list_ctd(root: &Path, config: &DiscoveryConfig) -> Vec<PathBuf> {
    walk_dirs(
        root,
        |path| dir_name(path) == Some(config.ctd_marker.as_str()),
        |relative| {
            dir_name(relative)
                .map(|name| name.contains(config.derived_marker.as_str()))
                .unwrap_or(false)
        },
    )
}

/// All ADCP velocity-file directories below `root`, sorted.
///
/// Subtrees whose directory name contains an excluded cruise identifier are
/// skipped.
pub fn dir_list_adcp(root: &Path, config: &DiscoveryConfig) -> Vec<PathBuf> {
    walk_dirs(
        root,
        |path| {
            dir_name(path)
                .map(|name| config.velocity_markers.iter().any(|m| m == name))
                .unwrap_or(false)
        },
        |relative| {
            dir_name(relative)
                .map(|name| config.excluded_cruises.iter().any(|c| name.contains(c.as_str())))
                .unwrap_or(false)
        },
    )
}
