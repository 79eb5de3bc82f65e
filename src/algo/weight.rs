//! Subject priority weights.
//!
//! Each subject's raw weight is
//!
//! ```text
//! credits * credit_weight + (6 - confidence) * confidence_weight
//! ```
//!
//! and its final weight is its share of the total, so weights across one run sum to 1.
//! Heavier credit loads and lower confidence both earn a larger share.

use crate::{algo::InvalidInput, data::Subject, policy::Policy};

/// Raw (unnormalized) weight of a single subject.
pub fn raw_weight(subject: &Subject, policy: &Policy) -> Result<f64, InvalidInput> {
    if !subject.has_valid_confidence() {
        return Err(InvalidInput::Confidence {
            subject: subject.id.clone(),
            confidence: subject.confidence,
        });
    }
    if subject.credits == 0 {
        return Err(InvalidInput::NoCredits(subject.id.clone()));
    }
    Ok(f64::from(subject.credits) * policy.credit_weight
        + f64::from(subject.confidence_factor()) * policy.confidence_weight)
}

/// Copy `subjects`, filling in each one's [`weight`](Subject::weight).
///
/// Order is preserved. Fails with [`InvalidInput::NoSubjects`] on an empty list
/// rather than dividing by a zero total.
pub fn calculate_weights(subjects: &[Subject], policy: &Policy) -> Result<Vec<Subject>, InvalidInput> {
    if subjects.is_empty() {
        return Err(InvalidInput::NoSubjects);
    }

    let raw = subjects
        .iter()
        .map(|subject| raw_weight(subject, policy))
        .collect::<Result<Vec<_>, _>>()?;

    let total = raw.iter().sum::<f64>();
    if !(total.is_finite() && total > 0.0) {
        return Err(InvalidInput::DegenerateWeights(total));
    }

    Ok(subjects
        .iter()
        .zip(raw)
        .map(|(subject, raw)| Subject {
            weight: Some(raw / total),
            ..subject.clone()
        })
        .collect())
}
