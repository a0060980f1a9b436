use crate::model::{generate_id, Id, QuestionType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InspectionStatus {
    Draft,
    Completed,
}

impl InspectionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InspectionStatus::Draft => "draft",
            InspectionStatus::Completed => "completed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(InspectionStatus::Draft),
            "completed" => Some(InspectionStatus::Completed),
            _ => None,
        }
    }
}

/// One application of a template to a property.
/// Invariant: `completed_at` is set if and only if `status` is completed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inspection {
    pub id: Id,
    pub object_id: Id,
    pub template_id: Id,
    pub status: InspectionStatus,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Inspection list row joined with the referenced property and template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InspectionSummary {
    pub id: Id,
    pub object_id: Id,
    pub template_id: Id,
    pub status: InspectionStatus,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub object_name: String,
    pub template_name: String,
    pub street: String,
    pub number: String,
    pub city: String,
    pub postal_code: String,
}

/// Recorded response to one question within one inspection.
/// At most one row exists per (inspection_id, question_id).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub id: Id,
    pub inspection_id: Id,
    pub question_id: Id,
    pub answer_value: String,
    pub created_at: DateTime<Utc>,
}

/// Template question decorated with the current answer for one inspection,
/// if any has been recorded yet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnsweredQuestion {
    pub id: Id,
    pub template_id: Id,
    pub question_text: String,
    pub question_type: QuestionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    pub required: bool,
    pub order_index: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
}

/// Inspection assembled with its template's full ordered question list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InspectionWithAnswers {
    pub id: Id,
    pub object_id: Id,
    pub template_id: Id,
    pub status: InspectionStatus,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub questions: Vec<AnsweredQuestion>,
}

/// Input model for creating a new inspection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewInspection {
    pub object_id: Id,
    pub template_id: Id,
}

impl NewInspection {
    /// Convert to a full Inspection with server-generated fields
    pub fn into_inspection(self) -> Inspection {
        Inspection {
            id: generate_id(),
            object_id: self.object_id,
            template_id: self.template_id,
            status: InspectionStatus::Draft,
            created_at: Utc::now(),
            completed_at: None,
        }
    }
}

/// One answer entry in an update request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerInput {
    pub question_id: Id,
    pub answer_value: String,
}

/// Update payload; answers and status are independent and optional
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateInspection {
    pub id: Id,
    pub answers: Option<Vec<AnswerInput>>,
    pub status: Option<InspectionStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_uses_lowercase_wire_format() {
        assert_eq!(
            serde_json::to_string(&InspectionStatus::Draft).unwrap(),
            "\"draft\""
        );
        assert_eq!(
            serde_json::from_str::<InspectionStatus>("\"completed\"").unwrap(),
            InspectionStatus::Completed
        );
        assert!(serde_json::from_str::<InspectionStatus>("\"done\"").is_err());
    }

    #[test]
    fn new_inspection_starts_as_draft_without_completion_time() {
        let inspection = NewInspection {
            object_id: "obj-1".to_string(),
            template_id: "tpl-1".to_string(),
        }
        .into_inspection();

        assert_eq!(inspection.status, InspectionStatus::Draft);
        assert!(inspection.completed_at.is_none());
        assert!(!inspection.id.is_empty());
    }

    #[test]
    fn unanswered_question_omits_answer_field() {
        let question = AnsweredQuestion {
            id: "q-1".to_string(),
            template_id: "tpl-1".to_string(),
            question_text: "Condition?".to_string(),
            question_type: QuestionType::String,
            options: None,
            required: true,
            order_index: 0,
            answer: None,
        };

        let json = serde_json::to_value(&question).unwrap();
        assert!(json.get("answer").is_none());
        assert!(json.get("options").is_none());
    }
}
