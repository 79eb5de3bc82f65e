//! See [`ClockTime`]

use serde::{Deserialize, Serialize, de::Visitor};
use thiserror::Error;

const MINUTES_PER_HOUR: u64 = 60;
const MINUTES_PER_DAY: u64 = 24 * MINUTES_PER_HOUR;

/// A wall-clock time of day with minute precision, displayed as `HH:MM`.
///
/// Only used to lay sessions out one after another within a day,
/// so it carries no date and wraps silently past midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ClockTime {
    /// Minutes since midnight, always less than 1440.
    minutes: u16,
}

impl ClockTime {
    /// Construct from an hour and minute, returning [`None`] if either is out of range.
    pub const fn from_hm(hour: u8, minute: u8) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(Self {
                minutes: hour as u16 * 60 + minute as u16,
            })
        } else {
            None
        }
    }

    /// The time `elapsed` minutes after `anchor_hour:00`, wrapped to a 24-hour clock.
    ///
    /// ```text
    /// offset(18, 0)   => 18:00
    /// offset(18, 190) => 21:10
    /// offset(18, 400) => 00:40
    /// ```
    pub const fn offset(anchor_hour: u8, elapsed: u64) -> Self {
        let total = (anchor_hour as u64 * MINUTES_PER_HOUR).saturating_add(elapsed);
        Self {
            minutes: (total % MINUTES_PER_DAY) as u16,
        }
    }

    /// Hour on a 24-hour clock.
    pub const fn hour(self) -> u8 {
        (self.minutes / 60) as u8
    }

    /// Minute within the hour.
    pub const fn minute(self) -> u8 {
        (self.minutes % 60) as u8
    }
}

impl std::fmt::Display for ClockTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// Text that does not read as `HH:MM`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected a time in `HH:MM` form, got {0:?}")]
pub struct ParseClockTimeError(String);

impl std::str::FromStr for ClockTime {
    type Err = ParseClockTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseClockTimeError(s.to_string());
        let (h, m) = s.split_once(':').ok_or_else(err)?;
        if h.len() != 2 || m.len() != 2 {
            return Err(err());
        }
        let h = h.parse::<u8>().map_err(|_| err())?;
        let m = m.parse::<u8>().map_err(|_| err())?;
        Self::from_hm(h, m).ok_or_else(err)
    }
}

impl Serialize for ClockTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct ClockTimeVisitor;

        impl Visitor<'_> for ClockTimeVisitor {
            type Value = ClockTime;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a time of day formatted as HH:MM")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                v.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_str(ClockTimeVisitor)
    }
}
