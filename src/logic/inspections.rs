use chrono::Utc;
use std::collections::HashMap;

use crate::logic::error::ServiceError;
use crate::logic::validate;
use crate::model::{
    generate_id, Answer, AnsweredQuestion, Id, Inspection, InspectionStatus, InspectionSummary,
    InspectionWithAnswers, NewInspection, UpdateInspection,
};
use crate::store::traits::{InspectionStore, PropertyStore, Store, TemplateStore};

pub struct InspectionOps;

impl InspectionOps {
    pub async fn list<S: Store>(store: &S) -> Result<Vec<InspectionSummary>, ServiceError> {
        Ok(store.list_inspections().await?)
    }

    /// Assemble the inspection with its template's full ordered question
    /// list. Questions without a recorded answer surface without an
    /// `answer` field (outer-join semantics).
    pub async fn get<S: Store>(store: &S, id: &Id) -> Result<InspectionWithAnswers, ServiceError> {
        let inspection = store
            .get_inspection(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Inspection not found".to_string()))?;

        let questions = store
            .list_questions_for_template(&inspection.template_id)
            .await?;
        let answers = store.list_answers_for_inspection(id).await?;

        let mut answered: HashMap<Id, String> = answers
            .into_iter()
            .map(|answer| (answer.question_id, answer.answer_value))
            .collect();

        let questions = questions
            .into_iter()
            .map(|question| {
                let answer = answered.remove(&question.id);
                AnsweredQuestion {
                    id: question.id,
                    template_id: question.template_id,
                    question_text: question.question_text,
                    question_type: question.question_type,
                    options: question.options,
                    required: question.required,
                    order_index: question.order_index,
                    answer,
                }
            })
            .collect();

        Ok(InspectionWithAnswers {
            id: inspection.id,
            object_id: inspection.object_id,
            template_id: inspection.template_id,
            status: inspection.status,
            created_at: inspection.created_at,
            completed_at: inspection.completed_at,
            questions,
        })
    }

    /// Both referenced entities must exist before the row is inserted; a
    /// dangling reference is a client error, not an internal one.
    pub async fn create<S: Store>(
        store: &S,
        new: NewInspection,
    ) -> Result<Inspection, ServiceError> {
        validate::validate_new_inspection(&new).into_result()?;

        if store.get_property(&new.object_id).await?.is_none() {
            return Err(ServiceError::Validation("Object not found".to_string()));
        }

        if store.get_template(&new.template_id).await?.is_none() {
            return Err(ServiceError::Validation("Template not found".to_string()));
        }

        let inspection = new.into_inspection();
        store.insert_inspection(inspection.clone()).await?;

        Ok(inspection)
    }

    /// Answers and status are independent; either may be supplied alone.
    /// Every answer entry is validated before the first upsert, so a bad
    /// entry leaves no partial answer state behind.
    pub async fn update<S: Store>(
        store: &S,
        update: UpdateInspection,
    ) -> Result<Inspection, ServiceError> {
        let inspection = store
            .get_inspection(&update.id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Inspection not found".to_string()))?;

        if let Some(answers) = &update.answers {
            validate::validate_answer_inputs(answers).into_result()?;

            for entry in answers {
                let question = store
                    .get_question(&entry.question_id)
                    .await?
                    .ok_or_else(|| {
                        ServiceError::Validation(format!(
                            "Question with ID {} not found",
                            entry.question_id
                        ))
                    })?;

                if question.template_id != inspection.template_id {
                    return Err(ServiceError::Validation(format!(
                        "Question {} does not belong to this inspection's template",
                        entry.question_id
                    )));
                }
            }

            for entry in answers {
                store
                    .upsert_answer(Answer {
                        id: generate_id(),
                        inspection_id: update.id.clone(),
                        question_id: entry.question_id.clone(),
                        answer_value: entry.answer_value.clone(),
                        created_at: Utc::now(),
                    })
                    .await?;
            }
        }

        if let Some(status) = update.status {
            // completed_at tracks the status: set on completion, cleared otherwise
            let completed_at = match status {
                InspectionStatus::Completed => Some(Utc::now()),
                InspectionStatus::Draft => None,
            };

            let updated = store
                .update_inspection_status(&update.id, status, completed_at)
                .await?;
            if !updated {
                return Err(ServiceError::NotFound("Inspection not found".to_string()));
            }
        }

        store
            .get_inspection(&update.id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Inspection not found".to_string()))
    }

    /// Answers are removed before the inspection row; both happen inside
    /// one store transaction.
    pub async fn delete<S: Store>(store: &S, id: &Id) -> Result<(), ServiceError> {
        if store.get_inspection(id).await?.is_none() {
            return Err(ServiceError::NotFound("Inspection not found".to_string()));
        }

        store.delete_inspection(id).await?;
        Ok(())
    }
}
