//! Disk Monitoring Module
//!
//! Block device discovery. Devices are listed with `lsblk`; their
//! temperatures are read separately through [`crate::hwmon::smart`].

pub mod linux;
pub mod traits;

// Re-export commonly used types
pub use linux::{enumerate, parse_lsblk};
pub use traits::{Device, DiskType};
