//! Startup error type

use crate::config::ConfigError;

/// Failures that stop the firmware before the main loop starts
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StartupError {
    Config(ConfigError),
    /// Display did not acknowledge initialization or the first frame
    Display,
}

impl From<ConfigError> for StartupError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl core::fmt::Display for StartupError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Config(e) => write!(f, "invalid board configuration: {}", e),
            Self::Display => f.write_str("display initialization failed"),
        }
    }
}

impl core::error::Error for StartupError {}
impl core::error::Error for ConfigError {}
