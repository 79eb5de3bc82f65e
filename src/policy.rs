//! Tunable constants of the planning algorithm.
//!
//! [`Policy::default`] reproduces the stock behaviour exactly.
//! A TOML file can override any subset of fields:
//!
//! ```toml
//! break_minutes = 15
//!
//! [anchor_hours]
//! night = 20
//! ```

use crate::data::PreferredTime;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Hour of the day the first session starts at, per [`PreferredTime`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnchorHours {
    /// [`PreferredTime::Morning`]
    pub morning: u8,
    /// [`PreferredTime::Afternoon`]
    pub afternoon: u8,
    /// [`PreferredTime::Night`]
    pub night: u8,
}

impl Default for AnchorHours {
    fn default() -> Self {
        Self {
            morning: 8,
            afternoon: 14,
            night: 18,
        }
    }
}

impl AnchorHours {
    /// The anchor for `time`.
    pub const fn for_time(&self, time: PreferredTime) -> u8 {
        match time {
            PreferredTime::Morning => self.morning,
            PreferredTime::Afternoon => self.afternoon,
            PreferredTime::Night => self.night,
        }
    }
}

/// Weighting coefficients, session limits and fallbacks used while planning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Policy {
    /// Raw weight contributed by each credit.
    pub credit_weight: f64,

    /// Raw weight contributed by each point of [confidence factor](crate::data::Subject::confidence_factor).
    pub confidence_weight: f64,

    /// Gap left after every session before the next one on the same day.
    pub break_minutes: u32,

    /// Sessions shorter than this are dropped for the day.
    pub min_session_minutes: u32,

    /// Plan length used when the target date is today or already past.
    pub default_horizon_days: u32,

    /// Longest plan the [`Planner`](crate::planner::Planner) agrees to build.
    pub max_horizon_days: u32,

    /// Subjects with confidence below this get [`Learn`](crate::data::BlockType::Learn) sessions,
    /// the rest get [`Practice`](crate::data::BlockType::Practice).
    pub learn_below_confidence: u8,

    /// Topic for subjects without any weak areas.
    pub fallback_topic: String,

    /// See [`AnchorHours`].
    pub anchor_hours: AnchorHours,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            credit_weight: 1.5,
            confidence_weight: 2.0,
            break_minutes: 10,
            min_session_minutes: 30,
            default_horizon_days: 30,
            max_horizon_days: 730,
            learn_below_confidence: 3,
            fallback_topic: "General Review".to_string(),
            anchor_hours: AnchorHours::default(),
        }
    }
}

/// Error while loading a [`Policy`].
#[derive(Debug, Error)]
pub enum PolicyError {
    /// The file could not be read.
    #[error("could not read policy file `{}`", path.display())]
    Io {
        /// The file that was being read.
        path: PathBuf,
        /// What went wrong.
        #[source]
        source: std::io::Error,
    },

    /// The file is not a valid policy document.
    #[error("policy is not valid TOML")]
    Toml(#[from] toml::de::Error),

    /// The values parsed but cannot be used.
    #[error("invalid policy: {0}")]
    Invalid(&'static str),
}

impl Policy {
    /// Read and [validate](Self::validate) a policy from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PolicyError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| PolicyError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let policy = Self::from_toml(&text)?;
        tracing::debug!(path = %path.display(), ?policy, "loaded policy");
        Ok(policy)
    }

    /// Parse and [validate](Self::validate) a policy from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, PolicyError> {
        let policy = toml::from_str::<Self>(text)?;
        policy.validate()?;
        Ok(policy)
    }

    /// Reject values the generator cannot work with.
    pub fn validate(&self) -> Result<(), PolicyError> {
        use PolicyError::Invalid;

        let AnchorHours {
            morning,
            afternoon,
            night,
        } = self.anchor_hours;
        if [morning, afternoon, night].into_iter().any(|h| h >= 24) {
            return Err(Invalid("anchor hours must be between 0 and 23"));
        }
        if !(self.credit_weight.is_finite() && self.credit_weight > 0.0)
            || !(self.confidence_weight.is_finite() && self.confidence_weight > 0.0)
        {
            return Err(Invalid("weight coefficients must be positive"));
        }
        if self.min_session_minutes == 0 {
            return Err(Invalid("minimum session must be at least one minute"));
        }
        if self.default_horizon_days == 0 {
            return Err(Invalid("default horizon must be at least one day"));
        }
        if self.max_horizon_days < self.default_horizon_days {
            return Err(Invalid("maximum horizon cannot be shorter than the default horizon"));
        }
        Ok(())
    }
}
