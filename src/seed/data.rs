use anyhow::Result;

use crate::model::{NewProperty, NewQuestion, QuestionType, Template, TemplateQuestion};
use crate::store::traits::{PropertyStore, Store, TemplateStore};

/// Load demonstration data into an empty database. Skipped entirely when
/// any template already exists.
pub async fn load_seed_data<S: Store>(store: &S) -> Result<()> {
    if !store.list_templates().await?.is_empty() {
        log::info!("seed data already present, skipping");
        return Ok(());
    }

    let template = Template::new(
        "Basic Property Inspection".to_string(),
        Some("Standard inspection template for residential properties".to_string()),
    );

    let question_inputs = vec![
        NewQuestion {
            question_text: "Property condition".to_string(),
            question_type: QuestionType::SingleChoice,
            options: Some(vec![
                "Excellent".to_string(),
                "Good".to_string(),
                "Fair".to_string(),
                "Poor".to_string(),
            ]),
            required: true,
        },
        NewQuestion {
            question_text: "Overall rating".to_string(),
            question_type: QuestionType::Numeric,
            options: None,
            required: true,
        },
        NewQuestion {
            question_text: "Inspection date".to_string(),
            question_type: QuestionType::Date,
            options: None,
            required: true,
        },
        NewQuestion {
            question_text: "Additional notes".to_string(),
            question_type: QuestionType::String,
            options: None,
            required: false,
        },
    ];

    let questions: Vec<TemplateQuestion> = question_inputs
        .into_iter()
        .enumerate()
        .map(|(index, question)| question.into_question(template.id.clone(), index as i32))
        .collect();

    store
        .insert_template_with_questions(&template, &questions)
        .await?;

    let property = NewProperty {
        name: "Demo Apartment".to_string(),
        street: "Main Street".to_string(),
        number: "1".to_string(),
        city: "Gothenburg".to_string(),
        postal_code: "41103".to_string(),
    }
    .into_property();

    store.insert_property(property).await?;

    log::info!("seed data loaded: 1 template, 1 object");
    Ok(())
}
