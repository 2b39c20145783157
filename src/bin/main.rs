//! CLI tool for disktemp

#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use std::path::PathBuf;
#[cfg(feature = "cli")]
use std::process::ExitCode;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "disktemp")]
#[command(about = "Report drive temperatures in PRTG JSON format", long_about = None)]
#[command(version)]
struct Cli {
    /// Mode: list, temperatures or sensors
    #[arg(allow_hyphen_values = true)]
    mode: Option<String>,

    /// Ignored
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
    rest: Vec<String>,

    /// Configuration file (defaults to ~/.config/disktemp/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print JSON on a single line
    #[arg(long)]
    compact: bool,
}

#[cfg(feature = "cli")]
#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    ExitCode::from(execute(&cli).await)
}

/// Run the selected mode and pick the process exit status.
///
/// Failures are logged and exit 0 unless `output.exit_nonzero_on_error`
/// is set. A config that cannot be loaded cannot opt in, so it exits 0.
#[cfg(feature = "cli")]
async fn execute(cli: &Cli) -> u8 {
    use disktemp::mode::{Mode, USAGE};
    use disktemp::Config;

    if !cli.rest.is_empty() {
        log::debug!("Ignoring extra arguments: {:?}", cli.rest);
    }

    let Some(mode) = Mode::parse(cli.mode.as_deref()) else {
        println!("{}", USAGE);
        return 0;
    };

    let loaded = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}", e);
            return 0;
        }
    };

    match run(mode, cli, &config).await {
        Ok(()) => 0,
        Err(e) => {
            log::error!("{}", e);
            u8::from(config.output.exit_nonzero_on_error)
        }
    }
}

#[cfg(feature = "cli")]
async fn run(mode: disktemp::Mode, cli: &Cli, config: &disktemp::Config) -> disktemp::Result<()> {
    use disktemp::{format_device_list, DriveMonitor, Mode};

    let pretty = config.output.pretty && !cli.compact;
    let monitor = DriveMonitor::new(config);

    match mode {
        Mode::List => {
            let devices = monitor.devices().await?;
            println!("{}", format_device_list(&devices));
        }
        Mode::Temperatures => {
            let report = monitor.drive_report().await?;
            println!("{}", report.to_json(pretty)?);
        }
        Mode::Sensors => {
            let report = monitor.system_report().await?;
            println!("{}", report.to_json(pretty)?);
        }
    }

    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI features not enabled. Please compile with --features cli");
    std::process::exit(1);
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    fn config_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("disktemp-{}-{}.toml", name, std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_unknown_mode_is_accepted() {
        assert_eq!(cli(&["disktemp", "foo"]).mode.as_deref(), Some("foo"));
        assert_eq!(cli(&["disktemp", "-x"]).mode.as_deref(), Some("-x"));
        assert_eq!(cli(&["disktemp"]).mode, None);
    }

    #[test]
    fn test_extra_arguments_are_ignored() {
        let parsed = cli(&["disktemp", "list", "extra"]);
        assert_eq!(parsed.mode.as_deref(), Some("list"));
        assert_eq!(parsed.rest, vec!["extra".to_string()]);

        let parsed = cli(&["disktemp", "foo", "bar"]);
        assert_eq!(parsed.mode.as_deref(), Some("foo"));
    }

    #[test]
    fn test_options_still_parse() {
        let parsed = cli(&["disktemp", "--compact", "-c", "/tmp/x.toml", "temperatures"]);
        assert!(parsed.compact);
        assert_eq!(parsed.config, Some(PathBuf::from("/tmp/x.toml")));
        assert_eq!(parsed.mode.as_deref(), Some("temperatures"));
    }

    #[tokio::test]
    async fn test_invalid_mode_exits_zero_without_config() {
        let status = execute(&cli(&["disktemp", "--config", "/nonexistent/disktemp.toml", "bogus"])).await;
        assert_eq!(status, 0);
    }

    #[tokio::test]
    async fn test_unreadable_config_exits_zero() {
        let status = execute(&cli(&["disktemp", "--config", "/nonexistent/disktemp.toml", "list"])).await;
        assert_eq!(status, 0);
    }

    #[tokio::test]
    async fn test_failure_exits_zero_by_default() {
        let path = config_file("default-exit", "[tools]\nlsblk = \"/nonexistent/lsblk\"\n");
        let status = execute(&cli(&["disktemp", "--config", path.to_str().unwrap(), "list"])).await;
        std::fs::remove_file(&path).ok();
        assert_eq!(status, 0);
    }

    #[tokio::test]
    async fn test_failure_exit_status_opt_in() {
        let path = config_file(
            "nonzero-exit",
            "[tools]\nlsblk = \"/nonexistent/lsblk\"\n\n[output]\nexit_nonzero_on_error = true\n",
        );
        let status = execute(&cli(&["disktemp", "--config", path.to_str().unwrap(), "list"])).await;
        std::fs::remove_file(&path).ok();
        assert_eq!(status, 1);
    }
}
