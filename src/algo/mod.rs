//! Generate a study plan from a student's availability and their subjects.
//!
//! # Allocation
//!
//! Planning happens in two passes:
//!
//! 1. [Weigh](weight::calculate_weights) every subject by credits and inverse confidence.
//! 1. Walk each day from today up to the [horizon](horizon::resolve_horizon), and split that
//!    day's available minutes between the subjects in proportion to their weight.
//!
//! Within a day, subjects are visited in input order (not by weight). Each one that earns at
//! least [`min_session_minutes`](Policy::min_session_minutes) gets a block starting where the
//! previous block ended plus [`break_minutes`](Policy::break_minutes). Start times count up
//! from the student's [anchor hour](crate::policy::AnchorHours) and wrap past midnight.
//!
//! Nothing is read from the environment: "today" and the identifier source are passed in,
//! so the same inputs always give the same plan (identifiers aside).

use crate::{
    data::*,
    ids::IdSource,
    policy::Policy,
};
use chrono::prelude::*;
use thiserror::Error;
use tracing::{debug, trace};

pub mod horizon;
pub mod weight;

pub use horizon::{parse_target_date, resolve_horizon};
pub use weight::calculate_weights;

/// Input rejected before any planning took place.
#[derive(Debug, Error)]
pub enum InvalidInput {
    /// Nothing to plan for.
    #[error("at least one subject is required")]
    NoSubjects,

    /// Confidence outside the 1 to 5 scale.
    #[error("subject {subject} has confidence {confidence}, expected 1 to 5")]
    Confidence {
        /// The offending subject.
        subject: SubjectId,
        /// The value it carried.
        confidence: u8,
    },

    /// A subject worth no credits.
    #[error("subject {0} must be worth at least one credit")]
    NoCredits(SubjectId),

    /// Raw weights added up to something that cannot be divided by.
    #[error("subject weights add up to {0}, which cannot be normalized")]
    DegenerateWeights(f64),

    /// Study hours that are zero, negative, or not a number.
    #[error("{which} study hours must be a positive number, got {hours}")]
    Hours {
        /// `"weekday"` or `"weekend"`.
        which: &'static str,
        /// The value provided.
        hours: f64,
    },

    /// A target date that does not read as a calendar date.
    #[error("target date {value:?} is not a calendar date")]
    TargetDate {
        /// The text provided.
        value: String,
        /// Why it was rejected.
        #[source]
        source: chrono::ParseError,
    },

    /// A student without a name.
    #[error("student name is required")]
    MissingName,

    /// A plan longer than the [policy](Policy::max_horizon_days) allows.
    #[error("plan would cover {days} days, more than the allowed {max}")]
    HorizonTooLong {
        /// Days the plan would cover.
        days: u32,
        /// The limit.
        max: u32,
    },
}

impl Schedule {
    /// Generate a study plan covering every day from `today` up to the student's target date.
    ///
    /// See [module-level documentation](crate::algo) for how minutes are allocated.
    ///
    /// Either the whole plan is produced or an [`InvalidInput`] is returned.
    pub fn generate<I>(
        student: &Student,
        subjects: &[Subject],
        today: NaiveDate,
        policy: &Policy,
        ids: &mut I,
    ) -> Result<Self, InvalidInput>
    where
        I: IdSource + ?Sized,
    {
        use InvalidInput::*;

        let weighted = calculate_weights(subjects, policy)?;

        for (which, hours) in [
            ("weekday", student.weekdays_hours),
            ("weekend", student.weekend_hours),
        ] {
            if !(hours.is_finite() && hours > 0.0) {
                return Err(Hours { which, hours });
            }
        }

        let target = parse_target_date(&student.target_date)?;
        let horizon = resolve_horizon(target, today, policy);
        let anchor_hour = policy.anchor_hours.for_time(student.preferred_time);

        let mut schedule = Self::default();
        for (day, date) in today.iter_days().take(horizon as usize).enumerate() {
            let available_minutes = 60.0 * student.hours_on(date);
            let mut elapsed = 0u64;
            let mut blocks = Vec::new();

            for subject in &weighted {
                let Some(weight) = subject.weight.filter(|&w| w > 0.0) else {
                    continue;
                };

                // float-to-int `as` saturates
                let minutes = (available_minutes * weight).floor() as u32;
                if minutes < policy.min_session_minutes {
                    trace!(%date, subject = %subject.id, minutes, "session too short, skipping");
                    continue;
                }

                let topic = subject
                    .weak_area_for_day(day)
                    .unwrap_or(policy.fallback_topic.as_str())
                    .to_string();

                let kind = if subject.confidence < policy.learn_below_confidence {
                    BlockType::Learn
                } else {
                    BlockType::Practice
                };

                blocks.push(StudyBlock {
                    id: ids.next_id(),
                    subject_id: subject.id.clone(),
                    subject_name: subject.name.clone(),
                    date,
                    start_time: ClockTime::offset(anchor_hour, elapsed),
                    duration_minutes: minutes,
                    topic: Some(topic),
                    kind,
                    is_completed: false,
                });

                elapsed = elapsed
                    .saturating_add(u64::from(minutes))
                    .saturating_add(u64::from(policy.break_minutes));
            }

            schedule.insert(date, blocks);
        }

        debug!(
            days = schedule.len(),
            blocks = schedule.blocks().count(),
            minutes = schedule.total_minutes(),
            "generated schedule"
        );

        Ok(schedule)
    }
}
