use crate::model::{generate_id, Id};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    Date,
    String,
    Numeric,
    SingleChoice,
    MultiChoice,
}

impl QuestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::Date => "date",
            QuestionType::String => "string",
            QuestionType::Numeric => "numeric",
            QuestionType::SingleChoice => "single_choice",
            QuestionType::MultiChoice => "multi_choice",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "date" => Some(QuestionType::Date),
            "string" => Some(QuestionType::String),
            "numeric" => Some(QuestionType::Numeric),
            "single_choice" => Some(QuestionType::SingleChoice),
            "multi_choice" => Some(QuestionType::MultiChoice),
            _ => None,
        }
    }

    /// Choice questions carry an options list; all other types do not.
    pub fn is_choice(&self) -> bool {
        matches!(self, QuestionType::SingleChoice | QuestionType::MultiChoice)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub id: Id,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Derived count of associated questions, populated on list reads only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question_count: Option<i64>,
}

impl Template {
    pub fn new(name: String, description: Option<String>) -> Self {
        Self {
            id: generate_id(),
            name,
            description,
            created_at: Utc::now(),
            question_count: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateQuestion {
    pub id: Id,
    pub template_id: Id,
    pub question_text: String,
    pub question_type: QuestionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    pub required: bool,
    pub order_index: i32,
}

/// Template assembled with its full ordered question list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateWithQuestions {
    pub id: Id,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub questions: Vec<TemplateQuestion>,
}

impl TemplateWithQuestions {
    pub fn assemble(template: Template, questions: Vec<TemplateQuestion>) -> Self {
        Self {
            id: template.id,
            name: template.name,
            description: template.description,
            created_at: template.created_at,
            questions,
        }
    }
}

/// Input model for creating a new template with its questions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTemplate {
    pub name: String,
    pub description: Option<String>,
    pub questions: Vec<NewQuestion>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewQuestion {
    pub question_text: String,
    pub question_type: QuestionType,
    pub options: Option<Vec<String>>,
    pub required: bool,
}

impl NewQuestion {
    /// Convert to a full question with server-generated id and position
    pub fn into_question(self, template_id: Id, order_index: i32) -> TemplateQuestion {
        TemplateQuestion {
            id: generate_id(),
            template_id,
            question_text: self.question_text,
            question_type: self.question_type,
            options: self.options,
            required: self.required,
            order_index,
        }
    }
}
