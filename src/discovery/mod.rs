//! # Directory Discoverer
//!
//! Finds instrument directories in a raw cruise tree:
//!
//! ```text
//! WBTS_data/
//! ├── GC_2001_04_AB0104/
//! │   ├── CTD/                          # cast files
//! │   │   └── Created_files/CTD/        # derived copies, ignored
//! │   └── FINAL_ADCP_PRODUCTS/
//! │       └── ladcp_velfiles/           # velocity files
//! └── GC_2019_12_.../                   # excluded cruise
//! ```
//!
//! Both walks return sorted paths and an empty list (never an error) when
//! nothing matches or the root is missing.

mod config;
mod cruise;
mod walk;

#[cfg(test)]
mod tests;

pub use config::DiscoveryConfig;
pub use cruise::{discover_cruises, pair_cruise_inputs, CruiseId, CruiseInputs, CRUISE_PREFIX};
pub use walk::{dir_list_adcp, dir_list_ctd};
