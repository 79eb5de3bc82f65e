//! Data that is used for generating study plans

pub mod block;
pub mod clock;
pub mod schedule;
pub mod student;
pub mod subject;

pub use block::*;
pub use clock::*;
pub use schedule::*;
pub use student::*;
pub use subject::*;

#[cfg(test)]
pub use crate::{date, subjects};

/// Create a [`NaiveDate`](chrono::NaiveDate) literal.
#[macro_export]
macro_rules! date {
    ($mo:literal/$d:literal/$yr:literal) => {
        chrono::NaiveDate::from_ymd_opt($yr, $mo, $d)
            .unwrap_or_else(|| panic!("`{}/{}/{}` is not a valid date", $mo, $d, $yr))
    };
}

/// Create a [`Vec`] of [`Subject`s](subject::Subject) for testing.
///
/// Expects `id: name (credits, confidence) [weak areas...]`.
#[macro_export]
macro_rules! subjects {
    ($(
        $id:literal: $name:literal ($credits:literal, $confidence:literal)
        [$($weak:literal),* $(,)?]
    ),* $(,)?) => {
        vec![$(
            $crate::data::subject::Subject {
                id: $crate::data::subject::SubjectId($id.to_string()),
                name: $name.to_string(),
                credits: $credits,
                confidence: $confidence,
                weak_areas: vec![$($weak.to_string()),*],
                strong_areas: Vec::new(),
                weight: None,
            }
        ),*]
    };
}
