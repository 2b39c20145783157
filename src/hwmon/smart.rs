// S.M.A.R.T. (Self-Monitoring, Analysis and Reporting Technology) for storage temps
//
// This module reads drive temperature from the free-text report printed by
// `smartctl -a /dev/<name>`. NVMe drives list numbered temperature sensors;
// ATA drives carry a Temperature_Celsius attribute in their attribute table.

use super::TemperatureReading;
use crate::command::CommandRunner;
use crate::config::ToolsConfig;
use crate::disk::{Device, DiskType};
use crate::error::{Error, ParseFailure, Result};
use log::warn;
use regex::Regex;
use std::sync::OnceLock;

/// Marker that identifies an NVMe report
const NVME_MARKER: &str = "NVMe";

/// Temperature line keywords
const NVME_TEMPERATURE_KEYWORD: &str = "Temperature Sensor 1:";
const ATA_TEMPERATURE_KEYWORD: &str = "Temperature_Celsius";

/// Position of RAW_VALUE in an ATA attribute row:
/// ID# ATTRIBUTE_NAME FLAG VALUE WORST THRESH TYPE UPDATED WHEN_FAILED RAW_VALUE
const ATA_RAW_VALUE_FIELD: usize = 9;

fn nvme_celsius_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(\d+)\sCelsius").expect("valid NVMe temperature regex"))
}

fn leading_integer_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[+-]?\d+").expect("valid integer regex"))
}

/// smartctl exit status, decoded as its documented bit field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SmartctlStatus(pub u8);

impl SmartctlStatus {
    /// Command line did not parse
    pub const COMMAND_LINE: u8 = 1 << 0;
    /// Device open failed, or the device did not return an IDENTIFY DEVICE structure
    pub const DEVICE_OPEN: u8 = 1 << 1;
    /// Some SMART or other command to the disk failed, or a SMART checksum error
    pub const COMMAND_FAILED: u8 = 1 << 2;
    /// SMART status check returned "DISK FAILING"
    pub const DISK_FAILING: u8 = 1 << 3;
    /// Prefail attributes at or below threshold
    pub const PREFAIL: u8 = 1 << 4;
    /// Usage or prefail attributes were at or below threshold in the past
    pub const PAST_THRESHOLD: u8 = 1 << 5;
    /// The device error log contains records of errors
    pub const ERROR_LOG: u8 = 1 << 6;
    /// The self-test log contains records of errors
    pub const SELF_TEST_LOG: u8 = 1 << 7;

    const DESCRIPTIONS: [(u8, &'static str); 8] = [
        (Self::COMMAND_LINE, "command line did not parse"),
        (Self::DEVICE_OPEN, "device open failed"),
        (Self::COMMAND_FAILED, "SMART command failed or checksum error"),
        (Self::DISK_FAILING, "disk failing"),
        (Self::PREFAIL, "prefail attributes at or below threshold"),
        (Self::PAST_THRESHOLD, "attributes were at or below threshold in the past"),
        (Self::ERROR_LOG, "device error log contains errors"),
        (Self::SELF_TEST_LOG, "self-test log contains errors"),
    ];

    /// Decode a process exit code. Codes outside 0..=255 set every bit.
    pub fn from_code(code: i32) -> Self {
        Self(u8::try_from(code).unwrap_or(u8::MAX))
    }

    pub fn is_success(&self) -> bool {
        self.0 == 0
    }

    /// Whether any bit in `fatal_mask` is set
    pub fn is_fatal(&self, fatal_mask: u8) -> bool {
        self.0 & fatal_mask != 0
    }

    /// Human-readable meaning of every set bit
    pub fn descriptions(&self) -> Vec<&'static str> {
        Self::DESCRIPTIONS
            .iter()
            .filter(|(bit, _)| self.0 & bit != 0)
            .map(|(_, text)| *text)
            .collect()
    }
}

impl DiskType {
    /// Classify a smartctl report
    pub fn detect(report: &str) -> Self {
        if report.lines().any(|line| line.contains(NVME_MARKER)) {
            DiskType::Nvme
        } else {
            DiskType::Ata
        }
    }

    fn temperature_keyword(&self) -> &'static str {
        match self {
            DiskType::Nvme => NVME_TEMPERATURE_KEYWORD,
            DiskType::Ata => ATA_TEMPERATURE_KEYWORD,
        }
    }
}

/// Extract the temperature in degrees Celsius from a smartctl report.
///
/// `name` only labels the failure.
pub fn parse_temperature(report: &str, name: &str) -> std::result::Result<f64, ParseFailure> {
    let disk_type = DiskType::detect(report);
    let keyword = disk_type.temperature_keyword();

    let line = report
        .lines()
        .find(|line| line.contains(keyword))
        .ok_or_else(|| ParseFailure::LineNotFound(name.to_string()))?;

    let celsius = match disk_type {
        DiskType::Nvme => nvme_celsius_pattern()
            .captures(line)
            .and_then(|caps| caps[1].parse::<i64>().ok()),
        DiskType::Ata => line
            .split_whitespace()
            .nth(ATA_RAW_VALUE_FIELD)
            .and_then(|field| leading_integer_pattern().find(field))
            .and_then(|m| m.as_str().parse::<i64>().ok()),
    };

    celsius
        .map(|c| c as f64)
        .ok_or_else(|| ParseFailure::ValueNotFound(name.to_string()))
}

/// Read one drive's temperature through smartctl.
///
/// A temperature that cannot be found yields a reading with no value.
/// Fatal exit-status bits, signals and spawn failures are errors.
pub async fn read_drive_temperature(
    runner: &dyn CommandRunner,
    tools: &ToolsConfig,
    device: &Device,
) -> Result<TemperatureReading> {
    let path = device.device_path().display().to_string();
    let output = runner.run(&tools.smartctl, &["-a", path.as_str()]).await?;

    let status = match output.status {
        Some(code) => SmartctlStatus::from_code(code),
        None => {
            return Err(Error::Terminated {
                program: tools.smartctl.clone(),
            })
        }
    };

    if status.is_fatal(tools.smartctl_fatal_mask) {
        return Err(Error::CommandFailed {
            program: tools.smartctl.clone(),
            status: i32::from(status.0),
            stderr: output.stderr.trim().to_string(),
        });
    }

    if !status.is_success() {
        warn!(
            "smartctl reported status {} for {}: {}",
            status.0,
            device.name,
            status.descriptions().join(", ")
        );
    }

    if output.has_stderr() {
        warn!(
            "smartctl returned a non-fatal error: {}",
            output.stderr.trim()
        );
    }

    let celsius = match parse_temperature(&output.stdout, &device.name) {
        Ok(celsius) => Some(celsius),
        Err(failure) => {
            warn!("{}", failure);
            None
        }
    };

    Ok(TemperatureReading::from_celsius(device.channel(), celsius))
}
