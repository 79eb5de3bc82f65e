//! See [`StudyBlock`]

use crate::data::{clock::ClockTime, subject::SubjectId};
use chrono::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Code uniquely identifying a study block within a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(pub Uuid);

impl std::fmt::Display for BlockId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What a session is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockType {
    /// Covering material the student is not yet comfortable with.
    Learn,
    /// Working problems on material the student mostly knows.
    Practice,
    /// Going back over finished material.
    ///
    /// Never produced by the generator; reserved for blocks added by other tools.
    Revision,
}

impl std::fmt::Display for BlockType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Learn => "Learn",
            Self::Practice => "Practice",
            Self::Revision => "Revision",
        })
    }
}

/// One contiguous session for one subject on one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyBlock {
    /// Unique identifier.
    pub id: BlockId,

    /// The subject being studied.
    pub subject_id: SubjectId,

    /// The subject's name at the time the plan was made.
    /// Renaming the subject later does not change it.
    pub subject_name: String,

    /// The day of the session.
    pub date: NaiveDate,

    /// When the session starts.
    pub start_time: ClockTime,

    /// Length of the session.
    pub duration_minutes: u32,

    /// What to focus on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,

    /// See [`BlockType`].
    #[serde(rename = "type")]
    pub kind: BlockType,

    /// Ticked off by the student. Always `false` when generated.
    #[serde(default)]
    pub is_completed: bool,
}

impl std::fmt::Display for StudyBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Self {
            subject_name,
            start_time,
            duration_minutes,
            topic,
            kind,
            is_completed,
            ..
        } = self;
        let mark = if *is_completed { 'x' } else { ' ' };
        write!(f, "[{mark}] {start_time}  {subject_name}")?;
        if let Some(topic) = topic {
            write!(f, " - {topic}")?;
        }
        write!(f, " ({kind}, {duration_minutes} min)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date;
    use serde_json::json;

    fn block() -> StudyBlock {
        StudyBlock {
            id: BlockId(Uuid::from_u128(7)),
            subject_id: SubjectId("dsa".to_string()),
            subject_name: "Data Structures".to_string(),
            date: date!(1 / 1 / 2024),
            start_time: ClockTime::offset(18, 0),
            duration_minutes: 180,
            topic: Some("Trees".to_string()),
            kind: BlockType::Learn,
            is_completed: false,
        }
    }

    #[test]
    fn test_wire_format() {
        assert_eq!(
            serde_json::to_value(block()).unwrap(),
            json!({
                "id": "00000000-0000-0000-0000-000000000007",
                "subjectId": "dsa",
                "subjectName": "Data Structures",
                "date": "2024-01-01",
                "startTime": "18:00",
                "durationMinutes": 180,
                "topic": "Trees",
                "type": "Learn",
                "isCompleted": false
            })
        );
    }

    #[test]
    fn test_display() {
        let mut block = block();
        assert_eq!(
            block.to_string(),
            "[ ] 18:00  Data Structures - Trees (Learn, 180 min)"
        );
        block.topic = None;
        block.is_completed = true;
        assert_eq!(block.to_string(), "[x] 18:00  Data Structures (Learn, 180 min)");
    }
}
