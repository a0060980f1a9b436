use serde::{Deserialize, Serialize};

use crate::logic::error::ServiceError;
use crate::model::{AnswerInput, NewInspection, NewProperty, NewTemplate, UpdateProperty};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl ValidationResult {
    fn ok() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
        }
    }

    fn push(&mut self, error: String) {
        self.valid = false;
        self.errors.push(error);
    }

    /// Collapse to the first error encountered, in input order
    pub fn into_result(mut self) -> Result<(), ServiceError> {
        if self.valid {
            Ok(())
        } else {
            Err(ServiceError::Validation(self.errors.remove(0)))
        }
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn check_required_fields(result: &mut ValidationResult, fields: &[(&str, &str)]) {
    for (name, value) in fields {
        if is_blank(value) {
            result.push(format!("{} is required", name));
        }
    }
}

pub fn validate_new_property(property: &NewProperty) -> ValidationResult {
    let mut result = ValidationResult::ok();
    check_required_fields(
        &mut result,
        &[
            ("name", property.name.as_str()),
            ("street", property.street.as_str()),
            ("number", property.number.as_str()),
            ("city", property.city.as_str()),
            ("postal_code", property.postal_code.as_str()),
        ],
    );
    result
}

pub fn validate_property_update(update: &UpdateProperty) -> ValidationResult {
    let mut result = ValidationResult::ok();
    check_required_fields(
        &mut result,
        &[
            ("name", update.name.as_str()),
            ("street", update.street.as_str()),
            ("number", update.number.as_str()),
            ("city", update.city.as_str()),
            ("postal_code", update.postal_code.as_str()),
        ],
    );
    result
}

/// Structural template validation. The whole create is rejected when any
/// question fails, and errors are collected in input order so the caller
/// reports the first one.
pub fn validate_new_template(template: &NewTemplate) -> ValidationResult {
    let mut result = ValidationResult::ok();

    if is_blank(&template.name) {
        result.push("Template name is required".to_string());
    }

    if template.questions.is_empty() {
        result.push("At least one question is required".to_string());
        return result;
    }

    for question in &template.questions {
        if is_blank(&question.question_text) {
            result.push("Question text is required for all questions".to_string());
        }

        if question.question_type.is_choice() {
            match &question.options {
                Some(options) if options.len() >= 2 => {}
                _ => result.push("Choice questions must have at least 2 options".to_string()),
            }
        }
    }

    result
}

pub fn validate_new_inspection(inspection: &NewInspection) -> ValidationResult {
    let mut result = ValidationResult::ok();

    if inspection.object_id.is_empty() || inspection.template_id.is_empty() {
        result.push("Object ID and Template ID are required".to_string());
    } else if is_blank(&inspection.object_id) || is_blank(&inspection.template_id) {
        result.push("Object ID and Template ID must be valid strings".to_string());
    }

    result
}

/// Structural check on answer entries; existence of the referenced
/// questions is verified against the store by the inspection service.
pub fn validate_answer_inputs(answers: &[AnswerInput]) -> ValidationResult {
    let mut result = ValidationResult::ok();

    for answer in answers {
        if answer.question_id.is_empty() || answer.answer_value.is_empty() {
            result.push("Each answer must have question_id and answer_value".to_string());
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NewQuestion, QuestionType};

    fn question(text: &str, question_type: QuestionType, options: Option<Vec<String>>) -> NewQuestion {
        NewQuestion {
            question_text: text.to_string(),
            question_type,
            options,
            required: true,
        }
    }

    #[test]
    fn template_without_questions_is_rejected() {
        let template = NewTemplate {
            name: "Empty".to_string(),
            description: None,
            questions: vec![],
        };

        let result = validate_new_template(&template);
        assert!(!result.valid);
        assert_eq!(result.errors[0], "At least one question is required");
    }

    #[test]
    fn choice_question_needs_at_least_two_options() {
        let template = NewTemplate {
            name: "Checklist".to_string(),
            description: None,
            questions: vec![question(
                "Condition?",
                QuestionType::SingleChoice,
                Some(vec!["Good".to_string()]),
            )],
        };

        let result = validate_new_template(&template);
        assert!(!result.valid);
        assert_eq!(
            result.errors[0],
            "Choice questions must have at least 2 options"
        );

        let err = validate_new_template(&template).into_result().unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[test]
    fn multi_choice_without_options_is_rejected() {
        let template = NewTemplate {
            name: "Checklist".to_string(),
            description: None,
            questions: vec![question("Defects?", QuestionType::MultiChoice, None)],
        };

        assert!(!validate_new_template(&template).valid);
    }

    #[test]
    fn non_choice_question_may_omit_options() {
        let template = NewTemplate {
            name: "Checklist".to_string(),
            description: Some("basic".to_string()),
            questions: vec![
                question("Inspection date", QuestionType::Date, None),
                question("Rating", QuestionType::Numeric, None),
                question("Notes", QuestionType::String, None),
            ],
        };

        assert!(validate_new_template(&template).valid);
    }

    #[test]
    fn first_question_error_wins() {
        let template = NewTemplate {
            name: "Checklist".to_string(),
            description: None,
            questions: vec![
                question("   ", QuestionType::String, None),
                question("Condition?", QuestionType::SingleChoice, None),
            ],
        };

        let err = validate_new_template(&template).into_result().unwrap_err();
        match err {
            ServiceError::Validation(message) => {
                assert_eq!(message, "Question text is required for all questions")
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn blank_property_fields_are_named_in_order() {
        let property = NewProperty {
            name: "Villa Ekberg".to_string(),
            street: "  ".to_string(),
            number: "".to_string(),
            city: "Gothenburg".to_string(),
            postal_code: "41103".to_string(),
        };

        let result = validate_new_property(&property);
        assert_eq!(
            result.errors,
            vec!["street is required", "number is required"]
        );
    }

    #[test]
    fn inspection_ids_must_be_non_empty() {
        let missing = NewInspection {
            object_id: "".to_string(),
            template_id: "tpl-1".to_string(),
        };
        assert_eq!(
            validate_new_inspection(&missing).errors[0],
            "Object ID and Template ID are required"
        );

        let whitespace = NewInspection {
            object_id: "  ".to_string(),
            template_id: "tpl-1".to_string(),
        };
        assert_eq!(
            validate_new_inspection(&whitespace).errors[0],
            "Object ID and Template ID must be valid strings"
        );
    }

    #[test]
    fn answer_entries_need_both_fields() {
        let answers = vec![AnswerInput {
            question_id: "q-1".to_string(),
            answer_value: "".to_string(),
        }];

        let result = validate_answer_inputs(&answers);
        assert!(!result.valid);
        assert_eq!(
            result.errors[0],
            "Each answer must have question_id and answer_value"
        );
        assert!(validate_answer_inputs(&[]).valid);
    }
}
