//! # disktemp
//!
//! Drive temperature reporting for PRTG. disktemp lists block devices with
//! `lsblk`, reads each drive's temperature from `smartctl`, converts it to
//! Fahrenheit and wraps the readings in the JSON envelope expected by PRTG
//! "EXE/Script Advanced" sensors.
//!
//! ## Quick Start
//!
//! ```no_run
//! use disktemp::{Config, DriveMonitor};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let monitor = DriveMonitor::new(&Config::load()?);
//!
//! for reading in monitor.temperatures().await? {
//!     match reading.value {
//!         Some(f) => println!("{}: {:.1}°F", reading.channel, f),
//!         None => println!("{}: unknown", reading.channel),
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - the `disktemp` command-line tool (enabled by default)

pub mod command;
pub mod config;
pub mod disk;
pub mod error;
pub mod hwmon;
pub mod mode;
pub mod monitor;
pub mod prtg;

pub use command::{CommandOutput, CommandRunner, SystemRunner};
pub use config::Config;
pub use disk::Device;
pub use error::{Error, ParseFailure, Result};
pub use hwmon::TemperatureReading;
pub use mode::Mode;
pub use monitor::{format_device_list, DriveMonitor};
pub use prtg::Report;
