//! See [`Student`]

use chrono::prelude::*;
use serde::{Deserialize, Serialize};

/// Time of day the student would rather study in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PreferredTime {
    /// Sessions begin in the morning.
    Morning,
    /// Sessions begin after lunch.
    #[default]
    Afternoon,
    /// Sessions begin in the evening.
    Night,
}

/// The person the plan is being built for, along with their availability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    /// Display name. Required before a plan can be generated.
    pub name: String,

    /// College or university.
    #[serde(default)]
    pub college: String,

    /// Expected graduation year, as entered.
    #[serde(default, rename = "year")]
    pub graduation_year: String,

    /// Contact address.
    #[serde(default)]
    pub email: String,

    /// Hours available for study on Monday through Friday.
    pub weekdays_hours: f64,

    /// Hours available for study on Saturday and Sunday.
    pub weekend_hours: f64,

    /// Part of the day sessions are laid out from.
    pub preferred_time: PreferredTime,

    /// The date the plan should run up to (exclusive), as entered.
    ///
    /// Kept as text so that a malformed date can be reported at planning time
    /// instead of preventing the profile from loading at all.
    pub target_date: String,
}

impl Student {
    /// Hours the student can study on `date`.
    pub fn hours_on(&self, date: NaiveDate) -> f64 {
        if is_weekend(date) {
            self.weekend_hours
        } else {
            self.weekdays_hours
        }
    }
}

/// Saturday or Sunday.
#[inline]
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date;
    use serde_json::json;

    #[test]
    fn test_hours_follow_weekday() {
        let student = Student {
            name: "Aman".to_string(),
            college: String::new(),
            graduation_year: String::new(),
            email: String::new(),
            weekdays_hours: 3.0,
            weekend_hours: 6.0,
            preferred_time: PreferredTime::Night,
            target_date: "2024-02-01".to_string(),
        };
        // 2024-01-05 is a Friday
        assert_eq!(student.hours_on(date!(1 / 5 / 2024)), 3.0);
        assert_eq!(student.hours_on(date!(1 / 6 / 2024)), 6.0);
        assert_eq!(student.hours_on(date!(1 / 7 / 2024)), 6.0);
        assert_eq!(student.hours_on(date!(1 / 8 / 2024)), 3.0);
    }

    #[test]
    fn test_profile_reads_wizard_output() {
        let student = serde_json::from_value::<Student>(json!({
            "name": "Aman Kumar",
            "college": "XYZ Institute of Technology",
            "weekdaysHours": 3,
            "weekendHours": 6,
            "preferredTime": "Night",
            "targetDate": "2024-02-01"
        }))
        .unwrap();

        assert_eq!(student.preferred_time, PreferredTime::Night);
        assert_eq!(student.weekdays_hours, 3.0);
        assert!(
            student.email.is_empty() && student.graduation_year.is_empty(),
            "fields the wizard never asks for should default to empty"
        );
    }
}
