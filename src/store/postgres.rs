use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use sqlx::{postgres::PgPoolOptions, PgPool, Row};

use crate::model::{
    Answer, Id, Inspection, InspectionStatus, InspectionSummary, Property, QuestionType, Template,
    TemplateQuestion,
};
use crate::store::traits::{InspectionStore, PropertyStore, Store, TemplateStore};

#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Create a new PostgreSQL store with the given database URL
    pub async fn new(database_url: &str) -> Result<Self> {
        Self::with_max_connections(database_url, 20).await
    }

    pub async fn with_max_connections(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .context("Failed to create PostgreSQL connection pool")?;

        Ok(Self { pool })
    }

    /// Bootstrap the relational schema. The ON DELETE CASCADE clauses are a
    /// storage-level safety net; the service layer pre-checks usage before
    /// any template or object delete.
    pub async fn migrate(&self) -> Result<()> {
        let statements = [
            r#"
            CREATE TABLE IF NOT EXISTS templates (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                description TEXT,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS template_questions (
                id TEXT PRIMARY KEY,
                template_id TEXT NOT NULL REFERENCES templates(id) ON DELETE CASCADE,
                question_text TEXT NOT NULL,
                question_type TEXT NOT NULL CHECK (question_type IN ('date', 'string', 'numeric', 'single_choice', 'multi_choice')),
                options TEXT[],
                required BOOLEAN NOT NULL DEFAULT FALSE,
                order_index INTEGER NOT NULL DEFAULT 0
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS objects (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                street TEXT NOT NULL,
                number TEXT NOT NULL,
                city TEXT NOT NULL,
                postal_code TEXT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS inspections (
                id TEXT PRIMARY KEY,
                object_id TEXT NOT NULL REFERENCES objects(id) ON DELETE CASCADE,
                template_id TEXT NOT NULL REFERENCES templates(id) ON DELETE CASCADE,
                status TEXT NOT NULL DEFAULT 'draft' CHECK (status IN ('draft', 'completed')),
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                completed_at TIMESTAMPTZ
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS inspection_answers (
                id TEXT PRIMARY KEY,
                inspection_id TEXT NOT NULL REFERENCES inspections(id) ON DELETE CASCADE,
                question_id TEXT NOT NULL REFERENCES template_questions(id) ON DELETE CASCADE,
                answer_value TEXT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                UNIQUE (inspection_id, question_id)
            )
            "#,
        ];

        for statement in statements {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .context("Failed to create database tables")?;
        }

        log::info!("database schema ready");
        Ok(())
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    fn map_question_row(row: &sqlx::postgres::PgRow) -> Result<TemplateQuestion> {
        let type_str: String = row.get("question_type");
        let question_type = QuestionType::parse(&type_str)
            .ok_or_else(|| anyhow!("Unknown question type in store: {}", type_str))?;

        Ok(TemplateQuestion {
            id: row.get("id"),
            template_id: row.get("template_id"),
            question_text: row.get("question_text"),
            question_type,
            options: row.get("options"),
            required: row.get("required"),
            order_index: row.get("order_index"),
        })
    }

    fn parse_status(status: &str) -> Result<InspectionStatus> {
        InspectionStatus::parse(status)
            .ok_or_else(|| anyhow!("Unknown inspection status in store: {}", status))
    }
}

#[async_trait::async_trait]
impl PropertyStore for PostgresStore {
    async fn get_property(&self, id: &Id) -> Result<Option<Property>> {
        let row = sqlx::query(
            "SELECT id, name, street, number, city, postal_code, created_at FROM objects WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch object")?;

        let Some(row) = row else {
            return Ok(None);
        };

        Ok(Some(Property {
            id: row.get("id"),
            name: row.get("name"),
            street: row.get("street"),
            number: row.get("number"),
            city: row.get("city"),
            postal_code: row.get("postal_code"),
            created_at: row.get("created_at"),
            inspection_count: None,
        }))
    }

    async fn list_properties(&self) -> Result<Vec<Property>> {
        let rows = sqlx::query(
            r#"
            SELECT o.id, o.name, o.street, o.number, o.city, o.postal_code, o.created_at,
                   COUNT(i.id) AS inspection_count
            FROM objects o
            LEFT JOIN inspections i ON o.id = i.object_id
            GROUP BY o.id
            ORDER BY o.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list objects")?;

        let properties = rows
            .into_iter()
            .map(|row| Property {
                id: row.get("id"),
                name: row.get("name"),
                street: row.get("street"),
                number: row.get("number"),
                city: row.get("city"),
                postal_code: row.get("postal_code"),
                created_at: row.get("created_at"),
                inspection_count: Some(row.get("inspection_count")),
            })
            .collect();

        Ok(properties)
    }

    async fn insert_property(&self, property: Property) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO objects (id, name, street, number, city, postal_code, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(&property.id)
        .bind(&property.name)
        .bind(&property.street)
        .bind(&property.number)
        .bind(&property.city)
        .bind(&property.postal_code)
        .bind(property.created_at)
        .execute(&self.pool)
        .await
        .with_context(|| format!("Failed to insert object {}", property.id))?;

        Ok(())
    }

    async fn update_property(&self, property: Property) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE objects
            SET name = $1, street = $2, number = $3, city = $4, postal_code = $5
            WHERE id = $6
            "#,
        )
        .bind(&property.name)
        .bind(&property.street)
        .bind(&property.number)
        .bind(&property.city)
        .bind(&property.postal_code)
        .bind(&property.id)
        .execute(&self.pool)
        .await
        .with_context(|| format!("Failed to update object {}", property.id))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_property(&self, id: &Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM objects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .with_context(|| format!("Failed to delete object {}", id))?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait::async_trait]
impl TemplateStore for PostgresStore {
    async fn get_template(&self, id: &Id) -> Result<Option<Template>> {
        let row =
            sqlx::query("SELECT id, name, description, created_at FROM templates WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .context("Failed to fetch template")?;

        let Some(row) = row else {
            return Ok(None);
        };

        Ok(Some(Template {
            id: row.get("id"),
            name: row.get("name"),
            description: row.get("description"),
            created_at: row.get("created_at"),
            question_count: None,
        }))
    }

    async fn list_templates(&self) -> Result<Vec<Template>> {
        let rows = sqlx::query(
            r#"
            SELECT t.id, t.name, t.description, t.created_at,
                   COUNT(tq.id) AS question_count
            FROM templates t
            LEFT JOIN template_questions tq ON t.id = tq.template_id
            GROUP BY t.id
            ORDER BY t.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list templates")?;

        let templates = rows
            .into_iter()
            .map(|row| Template {
                id: row.get("id"),
                name: row.get("name"),
                description: row.get("description"),
                created_at: row.get("created_at"),
                question_count: Some(row.get("question_count")),
            })
            .collect();

        Ok(templates)
    }

    async fn list_questions_for_template(
        &self,
        template_id: &Id,
    ) -> Result<Vec<TemplateQuestion>> {
        let rows = sqlx::query(
            r#"
            SELECT id, template_id, question_text, question_type, options, required, order_index
            FROM template_questions
            WHERE template_id = $1
            ORDER BY order_index
            "#,
        )
        .bind(template_id)
        .fetch_all(&self.pool)
        .await
        .with_context(|| format!("Failed to list questions for template {}", template_id))?;

        rows.iter().map(Self::map_question_row).collect()
    }

    async fn get_question(&self, id: &Id) -> Result<Option<TemplateQuestion>> {
        let row = sqlx::query(
            r#"
            SELECT id, template_id, question_text, question_type, options, required, order_index
            FROM template_questions
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch question")?;

        match row {
            Some(row) => Ok(Some(Self::map_question_row(&row)?)),
            None => Ok(None),
        }
    }

    async fn insert_template_with_questions(
        &self,
        template: &Template,
        questions: &[TemplateQuestion],
    ) -> Result<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .context("Failed to begin template transaction")?;

        sqlx::query(
            "INSERT INTO templates (id, name, description, created_at) VALUES ($1, $2, $3, $4)",
        )
        .bind(&template.id)
        .bind(&template.name)
        .bind(&template.description)
        .bind(template.created_at)
        .execute(&mut *tx)
        .await
        .with_context(|| format!("Failed to insert template {}", template.id))?;

        for question in questions {
            sqlx::query(
                r#"
                INSERT INTO template_questions
                    (id, template_id, question_text, question_type, options, required, order_index)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                "#,
            )
            .bind(&question.id)
            .bind(&question.template_id)
            .bind(&question.question_text)
            .bind(question.question_type.as_str())
            .bind(&question.options)
            .bind(question.required)
            .bind(question.order_index)
            .execute(&mut *tx)
            .await
            .with_context(|| format!("Failed to insert question for template {}", template.id))?;
        }

        tx.commit()
            .await
            .context("Failed to commit template transaction")?;

        Ok(())
    }

    async fn delete_template(&self, id: &Id) -> Result<bool> {
        let mut tx = self
            .pool
            .begin()
            .await
            .context("Failed to begin template delete transaction")?;

        sqlx::query("DELETE FROM template_questions WHERE template_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .with_context(|| format!("Failed to delete questions for template {}", id))?;

        let result = sqlx::query("DELETE FROM templates WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .with_context(|| format!("Failed to delete template {}", id))?;

        tx.commit()
            .await
            .context("Failed to commit template delete transaction")?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait::async_trait]
impl InspectionStore for PostgresStore {
    async fn get_inspection(&self, id: &Id) -> Result<Option<Inspection>> {
        let row = sqlx::query(
            r#"
            SELECT id, object_id, template_id, status, created_at, completed_at
            FROM inspections
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch inspection")?;

        let Some(row) = row else {
            return Ok(None);
        };

        let status: String = row.get("status");

        Ok(Some(Inspection {
            id: row.get("id"),
            object_id: row.get("object_id"),
            template_id: row.get("template_id"),
            status: Self::parse_status(&status)?,
            created_at: row.get("created_at"),
            completed_at: row.get("completed_at"),
        }))
    }

    async fn list_inspections(&self) -> Result<Vec<InspectionSummary>> {
        let rows = sqlx::query(
            r#"
            SELECT i.id, i.object_id, i.template_id, i.status, i.created_at, i.completed_at,
                   o.name AS object_name, t.name AS template_name,
                   o.street, o.number, o.city, o.postal_code
            FROM inspections i
            JOIN objects o ON i.object_id = o.id
            JOIN templates t ON i.template_id = t.id
            ORDER BY i.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list inspections")?;

        rows.into_iter()
            .map(|row| {
                let status: String = row.get("status");
                Ok(InspectionSummary {
                    id: row.get("id"),
                    object_id: row.get("object_id"),
                    template_id: row.get("template_id"),
                    status: Self::parse_status(&status)?,
                    created_at: row.get("created_at"),
                    completed_at: row.get("completed_at"),
                    object_name: row.get("object_name"),
                    template_name: row.get("template_name"),
                    street: row.get("street"),
                    number: row.get("number"),
                    city: row.get("city"),
                    postal_code: row.get("postal_code"),
                })
            })
            .collect()
    }

    async fn insert_inspection(&self, inspection: Inspection) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO inspections (id, object_id, template_id, status, created_at, completed_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(&inspection.id)
        .bind(&inspection.object_id)
        .bind(&inspection.template_id)
        .bind(inspection.status.as_str())
        .bind(inspection.created_at)
        .bind(inspection.completed_at)
        .execute(&self.pool)
        .await
        .with_context(|| format!("Failed to insert inspection {}", inspection.id))?;

        Ok(())
    }

    async fn update_inspection_status(
        &self,
        id: &Id,
        status: InspectionStatus,
        completed_at: Option<DateTime<Utc>>,
    ) -> Result<bool> {
        let result =
            sqlx::query("UPDATE inspections SET status = $1, completed_at = $2 WHERE id = $3")
                .bind(status.as_str())
                .bind(completed_at)
                .bind(id)
                .execute(&self.pool)
                .await
                .with_context(|| format!("Failed to update inspection {}", id))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_inspection(&self, id: &Id) -> Result<bool> {
        let mut tx = self
            .pool
            .begin()
            .await
            .context("Failed to begin inspection delete transaction")?;

        sqlx::query("DELETE FROM inspection_answers WHERE inspection_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .with_context(|| format!("Failed to delete answers for inspection {}", id))?;

        let result = sqlx::query("DELETE FROM inspections WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .with_context(|| format!("Failed to delete inspection {}", id))?;

        tx.commit()
            .await
            .context("Failed to commit inspection delete transaction")?;

        Ok(result.rows_affected() > 0)
    }

    async fn upsert_answer(&self, answer: Answer) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO inspection_answers (id, inspection_id, question_id, answer_value, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (inspection_id, question_id) DO UPDATE SET
                answer_value = EXCLUDED.answer_value
            "#,
        )
        .bind(&answer.id)
        .bind(&answer.inspection_id)
        .bind(&answer.question_id)
        .bind(&answer.answer_value)
        .bind(answer.created_at)
        .execute(&self.pool)
        .await
        .with_context(|| {
            format!(
                "Failed to upsert answer for inspection {} question {}",
                answer.inspection_id, answer.question_id
            )
        })?;

        Ok(())
    }

    async fn list_answers_for_inspection(&self, inspection_id: &Id) -> Result<Vec<Answer>> {
        let rows = sqlx::query(
            r#"
            SELECT id, inspection_id, question_id, answer_value, created_at
            FROM inspection_answers
            WHERE inspection_id = $1
            "#,
        )
        .bind(inspection_id)
        .fetch_all(&self.pool)
        .await
        .with_context(|| format!("Failed to list answers for inspection {}", inspection_id))?;

        let answers = rows
            .into_iter()
            .map(|row| Answer {
                id: row.get("id"),
                inspection_id: row.get("inspection_id"),
                question_id: row.get("question_id"),
                answer_value: row.get("answer_value"),
                created_at: row.get("created_at"),
            })
            .collect();

        Ok(answers)
    }

    async fn count_inspections_for_object(&self, object_id: &Id) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM inspections WHERE object_id = $1")
            .bind(object_id)
            .fetch_one(&self.pool)
            .await
            .with_context(|| format!("Failed to count inspections for object {}", object_id))?;

        Ok(count)
    }

    async fn count_inspections_for_template(&self, template_id: &Id) -> Result<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM inspections WHERE template_id = $1")
                .bind(template_id)
                .fetch_one(&self.pool)
                .await
                .with_context(|| {
                    format!("Failed to count inspections for template {}", template_id)
                })?;

        Ok(count)
    }
}

impl Store for PostgresStore {}
