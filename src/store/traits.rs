use crate::model::{
    Answer, Id, Inspection, InspectionStatus, InspectionSummary, Property, Template,
    TemplateQuestion,
};
use anyhow::Result;
use chrono::{DateTime, Utc};

#[async_trait::async_trait]
pub trait PropertyStore: Send + Sync {
    async fn get_property(&self, id: &Id) -> Result<Option<Property>>;
    /// List all properties decorated with their inspection count, newest first
    async fn list_properties(&self) -> Result<Vec<Property>>;
    async fn insert_property(&self, property: Property) -> Result<()>;
    /// Overwrite all five address fields; false when the row does not exist
    async fn update_property(&self, property: Property) -> Result<bool>;
    async fn delete_property(&self, id: &Id) -> Result<bool>;
}

#[async_trait::async_trait]
pub trait TemplateStore: Send + Sync {
    async fn get_template(&self, id: &Id) -> Result<Option<Template>>;
    /// List all templates decorated with their question count, newest first
    async fn list_templates(&self) -> Result<Vec<Template>>;
    /// Questions ordered by order_index ascending
    async fn list_questions_for_template(&self, template_id: &Id)
        -> Result<Vec<TemplateQuestion>>;
    async fn get_question(&self, id: &Id) -> Result<Option<TemplateQuestion>>;
    /// Insert a template together with its questions in a single transaction,
    /// so a failing question insert leaves no orphan template row
    async fn insert_template_with_questions(
        &self,
        template: &Template,
        questions: &[TemplateQuestion],
    ) -> Result<()>;
    /// Delete a template and its questions in a single transaction
    async fn delete_template(&self, id: &Id) -> Result<bool>;
}

#[async_trait::async_trait]
pub trait InspectionStore: Send + Sync {
    async fn get_inspection(&self, id: &Id) -> Result<Option<Inspection>>;
    /// List all inspections joined with the referenced property's address
    /// fields and the referenced template's name, newest first
    async fn list_inspections(&self) -> Result<Vec<InspectionSummary>>;
    async fn insert_inspection(&self, inspection: Inspection) -> Result<()>;
    async fn update_inspection_status(
        &self,
        id: &Id,
        status: InspectionStatus,
        completed_at: Option<DateTime<Utc>>,
    ) -> Result<bool>;
    /// Delete an inspection's answers and then the row, in one transaction
    async fn delete_inspection(&self, id: &Id) -> Result<bool>;
    /// Insert or overwrite the answer keyed by (inspection_id, question_id)
    async fn upsert_answer(&self, answer: Answer) -> Result<()>;
    async fn list_answers_for_inspection(&self, inspection_id: &Id) -> Result<Vec<Answer>>;
    async fn count_inspections_for_object(&self, object_id: &Id) -> Result<i64>;
    async fn count_inspections_for_template(&self, template_id: &Id) -> Result<i64>;
}

pub trait Store: PropertyStore + TemplateStore + InspectionStore + Send + Sync {}
