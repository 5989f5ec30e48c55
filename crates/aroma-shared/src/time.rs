use serde::{Deserialize, Serialize};

use crate::error::SharedError;

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;

named_enum! {
    /// Unit of a [`LengthOfTime`].
    pub enum TimeUnit {
        Seconds => "SECONDS",
        Minutes => "MINUTES",
        Hours => "HOURS",
        Days => "DAYS",
        Weeks => "WEEKS",
        /// Thirty days.
        Months => "MONTHS",
        /// 365 days.
        Years => "YEARS",
    }
}

impl TimeUnit {
    /// Number of whole seconds in one unit.
    pub fn seconds(&self) -> i64 {
        match self {
            TimeUnit::Seconds => 1,
            TimeUnit::Minutes => MINUTE,
            TimeUnit::Hours => HOUR,
            TimeUnit::Days => DAY,
            TimeUnit::Weeks => 7 * DAY,
            TimeUnit::Months => 30 * DAY,
            TimeUnit::Years => 365 * DAY,
        }
    }
}

/// A lifetime expressed as a `(value, unit)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LengthOfTime {
    pub value: i64,
    pub unit: TimeUnit,
}

impl LengthOfTime {
    pub const fn new(value: i64, unit: TimeUnit) -> Self {
        Self { value, unit }
    }

    pub const fn seconds(value: i64) -> Self {
        Self::new(value, TimeUnit::Seconds)
    }

    pub const fn minutes(value: i64) -> Self {
        Self::new(value, TimeUnit::Minutes)
    }

    pub const fn hours(value: i64) -> Self {
        Self::new(value, TimeUnit::Hours)
    }

    pub const fn days(value: i64) -> Self {
        Self::new(value, TimeUnit::Days)
    }

    /// Convert to whole seconds.
    ///
    /// The result may be zero or negative; callers decide whether that is
    /// acceptable.
    pub fn to_seconds(&self) -> Result<i64, SharedError> {
        self.value
            .checked_mul(self.unit.seconds())
            .ok_or(SharedError::LengthOfTimeOverflow {
                value: self.value,
                unit: self.unit,
            })
    }

    /// Convert to milliseconds.
    pub fn to_millis(&self) -> Result<i64, SharedError> {
        self.to_seconds()?
            .checked_mul(1000)
            .ok_or(SharedError::LengthOfTimeOverflow {
                value: self.value,
                unit: self.unit,
            })
    }
}

impl std::fmt::Display for LengthOfTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_seconds() {
        assert_eq!(LengthOfTime::seconds(30).to_seconds().unwrap(), 30);
        assert_eq!(LengthOfTime::minutes(2).to_seconds().unwrap(), 120);
        assert_eq!(LengthOfTime::days(1).to_seconds().unwrap(), 86_400);
        assert_eq!(
            LengthOfTime::new(2, TimeUnit::Weeks).to_seconds().unwrap(),
            14 * 86_400
        );
        assert_eq!(
            LengthOfTime::new(1, TimeUnit::Years).to_seconds().unwrap(),
            365 * 86_400
        );
    }

    #[test]
    fn test_overflow_is_an_error() {
        let huge = LengthOfTime::new(i64::MAX, TimeUnit::Years);
        assert!(matches!(
            huge.to_seconds(),
            Err(SharedError::LengthOfTimeOverflow { .. })
        ));
    }

    #[test]
    fn test_unit_names_round_trip() {
        for unit in TimeUnit::ALL {
            assert_eq!(unit.as_str().parse::<TimeUnit>().unwrap(), *unit);
        }
        assert!("FORTNIGHTS".parse::<TimeUnit>().is_err());
    }
}
