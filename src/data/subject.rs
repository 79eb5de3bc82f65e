//! See [`Subject`]

use serde::{Deserialize, Serialize};

/// Code uniquely identifying a subject, chosen by whoever entered it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubjectId(pub String);

impl std::fmt::Display for SubjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A course the student is preparing for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    /// Unique identifier.
    pub id: SubjectId,

    /// Display name, copied onto every block generated for the subject.
    pub name: String,

    /// Credit load. Must be at least 1.
    pub credits: u32,

    /// Self-assessed mastery, from [`Subject::MIN_CONFIDENCE`] (lowest) to [`Subject::MAX_CONFIDENCE`].
    pub confidence: u8,

    /// Topics the student struggles with. Sessions cycle through these in order.
    #[serde(default)]
    pub weak_areas: Vec<String>,

    /// Topics the student is comfortable with.
    #[serde(default)]
    pub strong_areas: Vec<String>,

    /// Normalized priority in `0.0..=1.0`.
    ///
    /// [`None`] until computed by [`calculate_weights`](crate::algo::weight::calculate_weights);
    /// recomputed on every planning run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

impl Subject {
    /// Lowest valid confidence.
    pub const MIN_CONFIDENCE: u8 = 1;
    /// Highest valid confidence.
    pub const MAX_CONFIDENCE: u8 = 5;

    /// Whether [`confidence`](Self::confidence) is on the scale.
    pub const fn has_valid_confidence(&self) -> bool {
        Self::MIN_CONFIDENCE <= self.confidence && self.confidence <= Self::MAX_CONFIDENCE
    }

    /// Confidence turned upside down, so that confidence 1 gives 5 and confidence 5 gives 1.
    pub const fn confidence_factor(&self) -> u8 {
        (Self::MAX_CONFIDENCE + 1).saturating_sub(self.confidence)
    }

    /// The weak area to cover on the `day`th day of the plan, if there are any.
    pub fn weak_area_for_day(&self, day: usize) -> Option<&str> {
        if self.weak_areas.is_empty() {
            None
        } else {
            Some(&self.weak_areas[day % self.weak_areas.len()])
        }
    }

    /// Trim topic names and drop the blank ones left behind by comma-separated entry (`"Trees, "`).
    pub fn normalized(mut self) -> Self {
        fn tidy(areas: &mut Vec<String>) {
            for area in areas.iter_mut() {
                let trimmed = area.trim();
                if trimmed.len() != area.len() {
                    *area = trimmed.to_string();
                }
            }
            areas.retain(|area| !area.is_empty());
        }

        tidy(&mut self.weak_areas);
        tidy(&mut self.strong_areas);
        self
    }
}
