//! Report modes selected on the command line

/// Printed when the mode argument is missing or unknown
pub const USAGE: &str = r#"Invalid mode. Please use "list", "temperatures" or "sensors"."#;

/// What the tool should print
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// One line naming every drive
    List,
    /// PRTG JSON with one channel per drive
    Temperatures,
    /// PRTG JSON with one channel per lm-sensors input
    Sensors,
}

impl Mode {
    /// Exact, case-sensitive match. `None` for a missing or unknown mode.
    pub fn parse(mode: Option<&str>) -> Option<Self> {
        match mode? {
            "list" => Some(Mode::List),
            "temperatures" => Some(Mode::Temperatures),
            "sensors" => Some(Mode::Sensors),
            _ => None,
        }
    }
}
