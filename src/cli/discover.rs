use anyhow::Result;
use std::path::Path;

use wbts::discovery::{dir_list_adcp, dir_list_ctd, pair_cruise_inputs};

/// Print the discovered instrument directories and their cruise pairing
pub fn run(config: &Path) -> Result<()> {
    let project = super::load_project(config)?;
    let root = &project.input_dir;
    if !root.is_dir() {
        anyhow::bail!("Input directory does not exist: {}", root.display());
    }

    let ctd_dirs = dir_list_ctd(root, &project.discovery);
    let adcp_dirs = dir_list_adcp(root, &project.discovery);

    println!("CTD directories ({}):", ctd_dirs.len());
    for dir in &ctd_dirs {
        println!("  {}", dir.display());
    }
    println!();
    println!("LADCP directories ({}):", adcp_dirs.len());
    for dir in &adcp_dirs {
        println!("  {}", dir.display());
    }
    println!();

    let pairs = pair_cruise_inputs(&ctd_dirs, &adcp_dirs);
    println!("Cruises ({}):", pairs.len());
    for pair in &pairs {
        let configured = if project.cruise(&pair.cruise).is_some() {
            ""
        } else {
            "  (not in configuration)"
        };
        match &pair.adcp_dir {
            Some(_) => println!("  {}  CTD + LADCP{}", pair.cruise, configured),
            None => println!("  {}  CTD only{}", pair.cruise, configured),
        }
    }

    Ok(())
}
