//! PRTG "EXE/Script Advanced" output
//!
//! PRTG ingests `{"prtg": {"result": [channel, ...]}}` from a sensor script's
//! standard output.

use crate::error::Result;
use crate::hwmon::TemperatureReading;
use serde::{Deserialize, Serialize};

/// Report envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub prtg: ReportBody,
}

/// Channel list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportBody {
    pub result: Vec<TemperatureReading>,
}

impl Report {
    /// Wrap readings, keeping their order
    pub fn new(result: Vec<TemperatureReading>) -> Self {
        Self {
            prtg: ReportBody { result },
        }
    }

    pub fn channels(&self) -> &[TemperatureReading] {
        &self.prtg.result
    }

    /// Serialize; `pretty` indents with two spaces
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }
}

impl From<Vec<TemperatureReading>> for Report {
    fn from(result: Vec<TemperatureReading>) -> Self {
        Self::new(result)
    }
}
