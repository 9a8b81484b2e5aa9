//! Named harvesting frequencies
//!
//! A harvesting frequency tells the (external) scheduler how often a source
//! should be fetched again. The core only resolves names to numbers.

use serde::{Deserialize, Serialize};

/// How often an imported source should be re-harvested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HarvestingFrequency {
    /// Every hour
    Hourly,
    /// Every day
    Daily,
    /// Every week
    Weekly,
    /// Every 30 days
    Monthly,
    /// Every 365 days
    Annually,
    /// Never re-harvest
    #[default]
    Never,
}

impl HarvestingFrequency {
    /// Interval in minutes. `Never` maps to the largest representable value.
    #[must_use]
    pub const fn minutes(self) -> i32 {
        match self {
            Self::Hourly => 60,
            Self::Daily => 1_440,
            Self::Weekly => 10_080,
            Self::Monthly => 43_200,
            Self::Annually => 525_600,
            Self::Never => i32::MAX,
        }
    }
}

impl std::fmt::Display for HarvestingFrequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hourly => write!(f, "HOURLY"),
            Self::Daily => write!(f, "DAILY"),
            Self::Weekly => write!(f, "WEEKLY"),
            Self::Monthly => write!(f, "MONTHLY"),
            Self::Annually => write!(f, "ANNUALLY"),
            Self::Never => write!(f, "NEVER"),
        }
    }
}

impl std::str::FromStr for HarvestingFrequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "HOURLY" => Ok(Self::Hourly),
            "DAILY" => Ok(Self::Daily),
            "WEEKLY" => Ok(Self::Weekly),
            "MONTHLY" => Ok(Self::Monthly),
            "ANNUALLY" => Ok(Self::Annually),
            "NEVER" => Ok(Self::Never),
            _ => Err(format!(
                "Invalid harvesting frequency: {s}. Use: hourly, daily, weekly, monthly, annually, never"
            )),
        }
    }
}
