use crate::logic::error::ServiceError;
use crate::logic::validate;
use crate::model::{Id, NewTemplate, Template, TemplateQuestion, TemplateWithQuestions};
use crate::store::traits::{InspectionStore, Store, TemplateStore};

pub struct TemplateOps;

impl TemplateOps {
    pub async fn list<S: Store>(store: &S) -> Result<Vec<Template>, ServiceError> {
        Ok(store.list_templates().await?)
    }

    pub async fn get<S: Store>(store: &S, id: &Id) -> Result<TemplateWithQuestions, ServiceError> {
        let template = store
            .get_template(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Template not found".to_string()))?;

        let questions = store.list_questions_for_template(id).await?;

        Ok(TemplateWithQuestions::assemble(template, questions))
    }

    /// Validation runs before anything is persisted; the insert itself is a
    /// single transaction, so a rejected create leaves no orphan template row.
    pub async fn create<S: Store>(
        store: &S,
        new: NewTemplate,
    ) -> Result<TemplateWithQuestions, ServiceError> {
        validate::validate_new_template(&new).into_result()?;

        let template = Template::new(new.name, new.description);
        let questions: Vec<TemplateQuestion> = new
            .questions
            .into_iter()
            .enumerate()
            .map(|(index, question)| question.into_question(template.id.clone(), index as i32))
            .collect();

        store
            .insert_template_with_questions(&template, &questions)
            .await?;

        Ok(TemplateWithQuestions::assemble(template, questions))
    }

    /// Templates referenced by at least one inspection cannot be deleted;
    /// otherwise the template's questions go with it.
    pub async fn delete<S: Store>(store: &S, id: &Id) -> Result<(), ServiceError> {
        if store.get_template(id).await?.is_none() {
            return Err(ServiceError::NotFound("Template not found".to_string()));
        }

        let references = store.count_inspections_for_template(id).await?;
        if references > 0 {
            return Err(ServiceError::Conflict(
                "Cannot delete template that is used in inspections".to_string(),
            ));
        }

        store.delete_template(id).await?;
        Ok(())
    }
}
