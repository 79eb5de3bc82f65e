//! See [`Schedule`]

use crate::data::block::StudyBlock;
use chrono::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A study plan: the sessions for each day, keyed by date.
///
/// Serialized as an object keyed by `YYYY-MM-DD`.
/// Every day of the plan has an entry, even when nothing fits on it.
/// Within a day, blocks are in the order they were generated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schedule(pub BTreeMap<NaiveDate, Vec<StudyBlock>>);

impl std::ops::Deref for Schedule {
    type Target = BTreeMap<NaiveDate, Vec<StudyBlock>>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::ops::DerefMut for Schedule {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl Schedule {
    /// Every block in the plan, day by day.
    pub fn blocks(&self) -> impl Iterator<Item = &StudyBlock> {
        self.0.values().flatten()
    }

    /// Total scheduled study time across the plan.
    pub fn total_minutes(&self) -> u64 {
        self.blocks().map(|b| u64::from(b.duration_minutes)).sum()
    }
}

impl std::fmt::Display for Schedule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (date, blocks) in &self.0 {
            let n = blocks.len();
            let s = if n == 1 { "" } else { "s" };
            writeln!(f, "{date} {}: {n} session{s}", date.format("%A"))?;
            for block in blocks {
                writeln!(f, "  {block}")?;
            }
        }
        Ok(())
    }
}
