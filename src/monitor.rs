//! Drive temperature monitor
//!
//! Ties enumeration and per-drive lookups together. Lookups for distinct
//! drives run as independent tokio tasks and are joined in listing order.

use crate::command::{CommandRunner, SystemRunner};
use crate::config::{Config, ToolsConfig};
use crate::disk::{self, Device};
use crate::error::Result;
use crate::hwmon::{self, TemperatureReading};
use crate::prtg::Report;
use log::debug;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Collects drive and system temperatures through external tools
#[derive(Clone)]
pub struct DriveMonitor {
    runner: Arc<dyn CommandRunner>,
    tools: Arc<ToolsConfig>,
}

impl DriveMonitor {
    /// Monitor backed by real subprocesses
    pub fn new(config: &Config) -> Self {
        let runner = SystemRunner::new(config.tools.timeout());
        Self::with_runner(Arc::new(runner), config)
    }

    /// Monitor backed by a custom runner
    pub fn with_runner(runner: Arc<dyn CommandRunner>, config: &Config) -> Self {
        Self {
            runner,
            tools: Arc::new(config.tools.clone()),
        }
    }

    /// All block devices, in lister order
    pub async fn devices(&self) -> Result<Vec<Device>> {
        disk::enumerate(self.runner.as_ref(), &self.tools).await
    }

    /// Temperature of a single drive
    pub async fn temperature(&self, device: &Device) -> Result<TemperatureReading> {
        hwmon::read_drive_temperature(self.runner.as_ref(), &self.tools, device).await
    }

    /// Temperatures of the given drives, one concurrent lookup each.
    ///
    /// Output order matches `devices`. The first fatal lookup error aborts
    /// the lookups still running and is returned.
    pub async fn temperatures_of(&self, devices: Vec<Device>) -> Result<Vec<TemperatureReading>> {
        let handles: Vec<JoinHandle<Result<TemperatureReading>>> = devices
            .into_iter()
            .map(|device| {
                let monitor = self.clone();
                tokio::spawn(async move { monitor.temperature(&device).await })
            })
            .collect();

        debug!("Waiting on {} temperature lookups", handles.len());

        let mut readings = Vec::with_capacity(handles.len());
        let mut pending = handles.into_iter();
        while let Some(handle) = pending.next() {
            let outcome = match handle.await {
                Ok(lookup) => lookup,
                Err(join_error) => Err(join_error.into()),
            };
            match outcome {
                Ok(reading) => readings.push(reading),
                Err(err) => {
                    for rest in pending.by_ref() {
                        rest.abort();
                    }
                    return Err(err);
                }
            }
        }

        Ok(readings)
    }

    /// Enumerate drives and read all their temperatures
    pub async fn temperatures(&self) -> Result<Vec<TemperatureReading>> {
        let devices = self.devices().await?;
        self.temperatures_of(devices).await
    }

    /// Drive temperatures wrapped for PRTG
    pub async fn drive_report(&self) -> Result<Report> {
        Ok(Report::new(self.temperatures().await?))
    }

    /// lm-sensors temperatures wrapped for PRTG
    pub async fn system_report(&self) -> Result<Report> {
        let readings = hwmon::read_system_temperatures(self.runner.as_ref(), &self.tools).await?;
        Ok(Report::new(readings))
    }
}

/// "List of hard drives: name1 (model1), name2 (model2)"
pub fn format_device_list(devices: &[Device]) -> String {
    let listed: Vec<String> = devices.iter().map(Device::to_string).collect();
    format!("List of hard drives: {}", listed.join(", "))
}
