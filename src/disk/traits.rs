//! Disk device types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// A block device as reported by the device lister
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    /// Kernel device name (e.g., "sda", "nvme0n1")
    pub name: String,
    /// Device model, possibly empty
    pub model: String,
}

impl Device {
    /// Create a new device record
    pub fn new(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
        }
    }

    /// Device node path (e.g., "/dev/sda")
    pub fn device_path(&self) -> PathBuf {
        PathBuf::from(format!("/dev/{}", self.name))
    }

    /// Channel label used in reports: "{model} ({name})"
    pub fn channel(&self) -> String {
        format!("{} ({})", self.model, self.name)
    }
}

/// "{name} ({model})", as printed by the list mode
impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.model)
    }
}

/// Disk type classification, as far as the SMART report reveals it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiskType {
    /// NVMe SSD
    Nvme,
    /// ATA/SATA drive with a SMART attribute table
    Ata,
}
