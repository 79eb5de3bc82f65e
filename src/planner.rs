//! The flow around the generator: check the inputs, plan, and keep the result.

use crate::{
    algo::{InvalidInput, parse_target_date, resolve_horizon},
    data::{Schedule, Student, Subject},
    ids::IdSource,
    policy::{Policy, PolicyError},
    store::{ScheduleStore, StoreError},
};
use chrono::prelude::*;
use thiserror::Error;
use tracing::info;

/// Key plans are saved under unless told otherwise.
pub const DEFAULT_KEY: &str = "study-plan";

/// Error while planning.
#[derive(Debug, Error)]
pub enum PlanError {
    /// The inputs were rejected. Nothing was saved.
    #[error("cannot make a plan from these inputs")]
    Invalid(#[from] InvalidInput),

    /// The plan could not be read or saved.
    #[error("plan storage failed")]
    Store(#[from] StoreError),
}

/// Makes, keeps and forgets one student's plan.
#[derive(Debug)]
pub struct Planner<S> {
    store: S,
    policy: Policy,
    key: String,
}

impl<S: ScheduleStore> Planner<S> {
    /// Plan with `policy`, keeping the result in `store` under [`DEFAULT_KEY`].
    ///
    /// Fails if `policy` does not [validate](Policy::validate).
    pub fn new(store: S, policy: Policy) -> Result<Self, PolicyError> {
        policy.validate()?;
        Ok(Self {
            store,
            policy,
            key: DEFAULT_KEY.to_string(),
        })
    }

    /// Keep the plan under `key` instead.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The kept plan, if there is one.
    pub fn current(&self) -> Result<Option<Schedule>, PlanError> {
        Ok(self.store.load(&self.key)?)
    }

    /// Make a new plan starting `today` and keep it, replacing any earlier plan.
    ///
    /// On error the kept plan is left as it was.
    pub fn plan<I>(
        &mut self,
        student: &Student,
        subjects: &[Subject],
        today: NaiveDate,
        ids: &mut I,
    ) -> Result<Schedule, PlanError>
    where
        I: IdSource + ?Sized,
    {
        if student.name.trim().is_empty() {
            return Err(InvalidInput::MissingName.into());
        }
        if subjects.is_empty() {
            return Err(InvalidInput::NoSubjects.into());
        }

        let target = parse_target_date(&student.target_date)?;
        let days = resolve_horizon(target, today, &self.policy);
        if days > self.policy.max_horizon_days {
            return Err(InvalidInput::HorizonTooLong {
                days,
                max: self.policy.max_horizon_days,
            }
            .into());
        }

        let subjects = subjects
            .iter()
            .cloned()
            .map(Subject::normalized)
            .collect::<Vec<_>>();

        let schedule = Schedule::generate(student, &subjects, today, &self.policy, ids)?;
        self.store.save(&self.key, &schedule)?;

        info!(
            student = %student.name,
            key = %self.key,
            days,
            blocks = schedule.blocks().count(),
            "made a new plan"
        );
        Ok(schedule)
    }

    /// Forget the kept plan.
    pub fn reset(&mut self) -> Result<(), PlanError> {
        Ok(self.store.clear(&self.key)?)
    }
}
