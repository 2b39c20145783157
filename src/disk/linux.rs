//! Linux block device enumeration via lsblk

use crate::command::CommandRunner;
use crate::config::ToolsConfig;
use crate::disk::traits::Device;
use crate::error::{Error, Result};

/// Whole disks only, no header, two columns
const LSBLK_ARGS: [&str; 4] = ["-d", "-n", "-o", "NAME,MODEL"];

/// Parse `lsblk -d -n -o NAME,MODEL` output.
///
/// The first token of each line is the device name; the remaining tokens,
/// re-joined with single spaces, are the model. Blank lines are skipped.
pub fn parse_lsblk(output: &str) -> Vec<Device> {
    output
        .lines()
        .filter_map(|line| {
            let mut tokens = line.split_whitespace();
            let name = tokens.next()?;
            let model = tokens.collect::<Vec<_>>().join(" ");
            Some(Device::new(name, model))
        })
        .collect()
}

/// Enumerate all block devices.
///
/// A failing exit status or anything written to stderr aborts enumeration.
pub async fn enumerate(runner: &dyn CommandRunner, tools: &ToolsConfig) -> Result<Vec<Device>> {
    let output = runner.run(&tools.lsblk, &LSBLK_ARGS).await?;

    match output.status {
        Some(0) => {}
        Some(status) => {
            return Err(Error::CommandFailed {
                program: tools.lsblk.clone(),
                status,
                stderr: output.stderr.trim().to_string(),
            })
        }
        None => {
            return Err(Error::Terminated {
                program: tools.lsblk.clone(),
            })
        }
    }

    if output.has_stderr() {
        return Err(Error::UnexpectedStderr {
            program: tools.lsblk.clone(),
            stderr: output.stderr.trim().to_string(),
        });
    }

    Ok(parse_lsblk(&output.stdout))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::testing::ScriptedRunner;
    use crate::command::CommandOutput;

    const LSBLK: &str = "lsblk -d -n -o NAME,MODEL";

    #[test]
    fn test_parse_lsblk() {
        let output = "sda     Samsung SSD 870 EVO 1TB\nnvme0n1 WD_BLACK SN850X 2000GB\n";
        let devices = parse_lsblk(output);

        assert_eq!(
            devices,
            vec![
                Device::new("sda", "Samsung SSD 870 EVO 1TB"),
                Device::new("nvme0n1", "WD_BLACK SN850X 2000GB"),
            ]
        );
    }

    #[test]
    fn test_parse_lsblk_skips_blank_lines_and_keeps_order() {
        let output = "\nsdb ST4000VN008-2DR1\n\n   \nsda\nloop0\n";
        let devices = parse_lsblk(output);

        let names: Vec<_> = devices.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["sdb", "sda", "loop0"]);
        assert_eq!(devices[1].model, "");
    }

    #[test]
    fn test_parse_lsblk_collapses_model_whitespace() {
        let devices = parse_lsblk("sdc   WDC    WD40EFRX  \t 68N32N0\n");
        assert_eq!(devices, vec![Device::new("sdc", "WDC WD40EFRX 68N32N0")]);
    }

    #[tokio::test]
    async fn test_enumerate() {
        let runner = ScriptedRunner::new().on(
            LSBLK,
            CommandOutput::success("sda Samsung SSD\nnvme0n1 WD NVMe\n"),
        );
        let devices = enumerate(&runner, &ToolsConfig::default()).await.unwrap();
        assert_eq!(devices.len(), 2);
        assert_eq!(devices[1], Device::new("nvme0n1", "WD NVMe"));
    }

    #[tokio::test]
    async fn test_enumerate_fails_on_stderr() {
        let runner = ScriptedRunner::new().on(
            LSBLK,
            CommandOutput {
                status: Some(0),
                stdout: "sda Samsung SSD\n".to_string(),
                stderr: "lsblk: /dev/sdx: not a block device\n".to_string(),
            },
        );
        let err = enumerate(&runner, &ToolsConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::UnexpectedStderr { .. }));
    }

    #[tokio::test]
    async fn test_enumerate_fails_on_exit_status() {
        let runner = ScriptedRunner::new().on(
            LSBLK,
            CommandOutput {
                status: Some(1),
                stdout: String::new(),
                stderr: String::new(),
            },
        );
        let err = enumerate(&runner, &ToolsConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::CommandFailed { status: 1, .. }));
    }

    #[tokio::test]
    async fn test_enumerate_fails_when_tool_missing() {
        let runner = ScriptedRunner::new();
        let err = enumerate(&runner, &ToolsConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Spawn { .. }));
    }
}
