// lm-sensors chip temperatures
//
// `sensors -f` prints one block per chip:
//
//   coretemp-isa-0000
//   Adapter: ISA adapter
//   Package id 0:  +104.0°F  (high = +176.0°F, crit = +212.0°F)
//
// The line before "Adapter:" names the chip; every "label: value°F" line
// below it is one reading.

use super::{TemperatureReading, FAHRENHEIT_SYMBOL};
use crate::command::CommandRunner;
use crate::config::ToolsConfig;
use crate::error::{Error, Result};
use log::warn;

const ADAPTER_PREFIX: &str = "Adapter:";

/// One chip input reported by lm-sensors
#[derive(Debug, Clone, PartialEq)]
pub struct SensorInput {
    /// Chip name with '-' replaced by '_' (e.g., "coretemp_isa_0000")
    pub chip: String,
    /// Input label (e.g., "Core 0")
    pub label: String,
    /// Current value in degrees Fahrenheit
    pub fahrenheit: f64,
}

impl SensorInput {
    /// Channel label: "{chip}_{label}"
    pub fn channel(&self) -> String {
        format!("{}_{}", self.chip, self.label)
    }
}

impl From<SensorInput> for TemperatureReading {
    fn from(input: SensorInput) -> Self {
        TemperatureReading::fahrenheit(input.channel(), Some(input.fahrenheit))
    }
}

/// Parse `sensors -f` output into per-chip inputs, in output order
pub fn parse_sensors_output(output: &str) -> Vec<SensorInput> {
    let lines: Vec<&str> = output.lines().collect();
    let mut inputs = Vec::new();
    let mut chip: Option<String> = None;

    for (idx, line) in lines.iter().enumerate() {
        let trimmed = line.trim();

        if trimmed.starts_with(ADAPTER_PREFIX) {
            let name = idx
                .checked_sub(1)
                .map(|prev| lines[prev].trim())
                .unwrap_or_default();
            chip = Some(name.replace('-', "_"));
            continue;
        }

        let Some(chip) = chip.as_ref() else {
            continue;
        };
        if !trimmed.contains(FAHRENHEIT_SYMBOL) {
            continue;
        }

        let Some((label, rest)) = trimmed.split_once(':') else {
            warn!("Unable to find a label in line '{}'", line);
            continue;
        };
        let value = rest.split(FAHRENHEIT_SYMBOL).next().unwrap_or_default().trim();

        match value.parse::<f64>() {
            Ok(fahrenheit) => inputs.push(SensorInput {
                chip: chip.clone(),
                label: label.trim().to_string(),
                fahrenheit,
            }),
            Err(_) => warn!("Unable to convert value to float in line '{}'", line),
        }
    }

    inputs
}

/// Read all lm-sensors temperatures
pub async fn read_system_temperatures(
    runner: &dyn CommandRunner,
    tools: &ToolsConfig,
) -> Result<Vec<TemperatureReading>> {
    let output = runner.run(&tools.sensors, &["-f"]).await?;

    match output.status {
        Some(0) => {}
        Some(status) => {
            return Err(Error::CommandFailed {
                program: tools.sensors.clone(),
                status,
                stderr: output.stderr.trim().to_string(),
            })
        }
        None => {
            return Err(Error::Terminated {
                program: tools.sensors.clone(),
            })
        }
    }

    if output.has_stderr() {
        warn!("sensors returned a non-fatal error: {}", output.stderr.trim());
    }

    let readings: Vec<TemperatureReading> = parse_sensors_output(&output.stdout)
        .into_iter()
        .map(TemperatureReading::from)
        .collect();

    if readings.is_empty() {
        warn!("No valid sensor data found");
    }

    Ok(readings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::testing::ScriptedRunner;
    use crate::command::CommandOutput;

    const SENSORS_OUTPUT: &str = "\
coretemp-isa-0000
Adapter: ISA adapter
Package id 0:  +104.0°F  (high = +176.0°F, crit = +212.0°F)
Core 0:        +100.4°F  (high = +176.0°F, crit = +212.0°F)

acpitz-acpi-0
Adapter: ACPI interface
temp1:        +81.0°F

nvme-pci-0100
Adapter: PCI adapter
Composite:    +95.0°F  (low  = -4.1°F, high = +179.4°F)
Sensor 1:        N/A

BAT0-acpi-0
Adapter: ACPI interface
in0:          12.70 V
";

    #[test]
    fn test_parse_sensors_output() {
        let inputs = parse_sensors_output(SENSORS_OUTPUT);
        let channels: Vec<_> = inputs.iter().map(|i| i.channel()).collect();

        assert_eq!(
            channels,
            vec![
                "coretemp_isa_0000_Package id 0",
                "coretemp_isa_0000_Core 0",
                "acpitz_acpi_0_temp1",
                "nvme_pci_0100_Composite",
            ]
        );
        assert_eq!(inputs[0].fahrenheit, 104.0);
        assert_eq!(inputs[3].fahrenheit, 95.0);
    }

    #[test]
    fn test_lines_before_first_adapter_are_ignored() {
        let inputs = parse_sensors_output("stray: +50.0°F\n");
        assert!(inputs.is_empty());
    }

    #[test]
    fn test_unparseable_value_is_skipped() {
        let output = "k10temp-pci-00c3\nAdapter: PCI adapter\nTctl:  +abc°F\nTccd1: +113.0°F\n";
        let inputs = parse_sensors_output(output);
        assert_eq!(inputs.len(), 1);
        assert_eq!(inputs[0].label, "Tccd1");
    }

    #[tokio::test]
    async fn test_read_system_temperatures() {
        let runner =
            ScriptedRunner::new().on("sensors -f", CommandOutput::success(SENSORS_OUTPUT));
        let readings = read_system_temperatures(&runner, &ToolsConfig::default())
            .await
            .unwrap();

        assert_eq!(readings.len(), 4);
        assert_eq!(readings[2].channel, "acpitz_acpi_0_temp1");
        assert_eq!(readings[2].value, Some(81.0));
        assert_eq!(readings[2].customunit, "°F");
    }

    #[tokio::test]
    async fn test_sensors_failure_is_fatal() {
        let runner = ScriptedRunner::new().on(
            "sensors -f",
            CommandOutput {
                status: Some(1),
                stdout: String::new(),
                stderr: "No sensors found!".to_string(),
            },
        );
        let err = read_system_temperatures(&runner, &ToolsConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::CommandFailed { status: 1, .. }));
    }
}
