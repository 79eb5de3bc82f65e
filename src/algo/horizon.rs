//! How many days a plan covers.

use crate::{algo::InvalidInput, policy::Policy};
use chrono::prelude::*;

/// Read a target date as entered: `YYYY-MM-DD`, or an RFC 3339 timestamp whose date part is used.
pub fn parse_target_date(raw: &str) -> Result<NaiveDate, InvalidInput> {
    let raw = raw.trim();
    raw.parse::<NaiveDate>()
        .or_else(|err| {
            DateTime::parse_from_rfc3339(raw)
                .map(|datetime| datetime.date_naive())
                .map_err(|_| err)
        })
        .map_err(|source| InvalidInput::TargetDate {
            value: raw.to_string(),
            source,
        })
}

/// Whole days from `today` up to `target`.
///
/// Falls back to [`Policy::default_horizon_days`] when `target` is today or already past,
/// so a plan is never empty.
pub fn resolve_horizon(target: NaiveDate, today: NaiveDate, policy: &Policy) -> u32 {
    let days = target.signed_duration_since(today).num_days();
    if days > 0 {
        u32::try_from(days).unwrap_or(u32::MAX)
    } else {
        tracing::debug!(
            %target,
            %today,
            fallback = policy.default_horizon_days,
            "target date is not in the future, using default horizon"
        );
        policy.default_horizon_days
    }
}
