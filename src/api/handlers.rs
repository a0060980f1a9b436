use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{Html, Json, Response},
    Json as RequestJson,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::logic::{InspectionOps, PropertyOps, ServiceError, TemplateOps};
use crate::model::{
    Id, Inspection, InspectionSummary, InspectionWithAnswers, NewInspection, NewProperty,
    NewTemplate, Property, Template, TemplateWithQuestions, UpdateInspection, UpdateProperty,
};
use crate::store::traits::Store;

pub type AppState<S> = Arc<S>;

/// Simple health check endpoint
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: &str) -> Self {
        Self {
            error: message.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Id-bearing request body; mutating endpoints take the id here, not in the path
#[derive(Debug, Deserialize)]
pub struct IdRequest {
    pub id: Id,
}

/// Request-level access log, the HTTP counterpart of the store's own logging
pub async fn access_log(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    log::info!("{} {} -> {}", method, path, response.status().as_u16());
    response
}

/// Translate a service error into the boundary status/message mapping.
/// Store failures are logged here with the failing operation; the other
/// variants are ordinary client errors.
fn error_response(operation: &str, err: ServiceError) -> (StatusCode, Json<ErrorResponse>) {
    let status = match &err {
        ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
        ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        ServiceError::Conflict(_) => StatusCode::CONFLICT,
        ServiceError::Store(cause) => {
            log::error!("{} failed: {:#}", operation, cause);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    (status, Json(ErrorResponse::new(&err.to_string())))
}

fn missing_id(entity: &str) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::new(&format!(
            "{} ID is required in request body",
            entity
        ))),
    )
}

// ---- Templates ----

pub async fn list_templates<S: Store>(
    State(store): State<AppState<S>>,
) -> Result<Json<Vec<Template>>, (StatusCode, Json<ErrorResponse>)> {
    match TemplateOps::list(&*store).await {
        Ok(templates) => Ok(Json(templates)),
        Err(e) => Err(error_response("list templates", e)),
    }
}

pub async fn get_template<S: Store>(
    State(store): State<AppState<S>>,
    RequestJson(request): RequestJson<IdRequest>,
) -> Result<Json<TemplateWithQuestions>, (StatusCode, Json<ErrorResponse>)> {
    if request.id.trim().is_empty() {
        return Err(missing_id("Template"));
    }

    match TemplateOps::get(&*store, &request.id).await {
        Ok(template) => Ok(Json(template)),
        Err(e) => Err(error_response("get template", e)),
    }
}

pub async fn create_template<S: Store>(
    State(store): State<AppState<S>>,
    RequestJson(new_template): RequestJson<NewTemplate>,
) -> Result<(StatusCode, Json<TemplateWithQuestions>), (StatusCode, Json<ErrorResponse>)> {
    match TemplateOps::create(&*store, new_template).await {
        Ok(template) => Ok((StatusCode::CREATED, Json(template))),
        Err(e) => Err(error_response("create template", e)),
    }
}

pub async fn delete_template<S: Store>(
    State(store): State<AppState<S>>,
    RequestJson(request): RequestJson<IdRequest>,
) -> Result<Json<MessageResponse>, (StatusCode, Json<ErrorResponse>)> {
    if request.id.trim().is_empty() {
        return Err(missing_id("Template"));
    }

    match TemplateOps::delete(&*store, &request.id).await {
        Ok(()) => Ok(Json(MessageResponse {
            message: "Template deleted successfully".to_string(),
        })),
        Err(e) => Err(error_response("delete template", e)),
    }
}

// ---- Properties ("objects") ----

pub async fn list_objects<S: Store>(
    State(store): State<AppState<S>>,
) -> Result<Json<Vec<Property>>, (StatusCode, Json<ErrorResponse>)> {
    match PropertyOps::list(&*store).await {
        Ok(objects) => Ok(Json(objects)),
        Err(e) => Err(error_response("list objects", e)),
    }
}

pub async fn get_object<S: Store>(
    State(store): State<AppState<S>>,
    RequestJson(request): RequestJson<IdRequest>,
) -> Result<Json<Property>, (StatusCode, Json<ErrorResponse>)> {
    if request.id.trim().is_empty() {
        return Err(missing_id("Object"));
    }

    match PropertyOps::get(&*store, &request.id).await {
        Ok(object) => Ok(Json(object)),
        Err(e) => Err(error_response("get object", e)),
    }
}

pub async fn create_object<S: Store>(
    State(store): State<AppState<S>>,
    RequestJson(new_property): RequestJson<NewProperty>,
) -> Result<(StatusCode, Json<Property>), (StatusCode, Json<ErrorResponse>)> {
    match PropertyOps::create(&*store, new_property).await {
        Ok(object) => Ok((StatusCode::CREATED, Json(object))),
        Err(e) => Err(error_response("create object", e)),
    }
}

pub async fn update_object<S: Store>(
    State(store): State<AppState<S>>,
    RequestJson(update): RequestJson<UpdateProperty>,
) -> Result<Json<Property>, (StatusCode, Json<ErrorResponse>)> {
    if update.id.trim().is_empty() {
        return Err(missing_id("Object"));
    }

    match PropertyOps::update(&*store, update).await {
        Ok(object) => Ok(Json(object)),
        Err(e) => Err(error_response("update object", e)),
    }
}

pub async fn delete_object<S: Store>(
    State(store): State<AppState<S>>,
    RequestJson(request): RequestJson<IdRequest>,
) -> Result<Json<MessageResponse>, (StatusCode, Json<ErrorResponse>)> {
    if request.id.trim().is_empty() {
        return Err(missing_id("Object"));
    }

    match PropertyOps::delete(&*store, &request.id).await {
        Ok(()) => Ok(Json(MessageResponse {
            message: "Object deleted successfully".to_string(),
        })),
        Err(e) => Err(error_response("delete object", e)),
    }
}

// ---- Inspections ----

pub async fn list_inspections<S: Store>(
    State(store): State<AppState<S>>,
) -> Result<Json<Vec<InspectionSummary>>, (StatusCode, Json<ErrorResponse>)> {
    match InspectionOps::list(&*store).await {
        Ok(inspections) => Ok(Json(inspections)),
        Err(e) => Err(error_response("list inspections", e)),
    }
}

pub async fn get_inspection<S: Store>(
    State(store): State<AppState<S>>,
    RequestJson(request): RequestJson<IdRequest>,
) -> Result<Json<InspectionWithAnswers>, (StatusCode, Json<ErrorResponse>)> {
    if request.id.trim().is_empty() {
        return Err(missing_id("Inspection"));
    }

    match InspectionOps::get(&*store, &request.id).await {
        Ok(inspection) => Ok(Json(inspection)),
        Err(e) => Err(error_response("get inspection", e)),
    }
}

pub async fn create_inspection<S: Store>(
    State(store): State<AppState<S>>,
    RequestJson(new_inspection): RequestJson<NewInspection>,
) -> Result<(StatusCode, Json<Inspection>), (StatusCode, Json<ErrorResponse>)> {
    match InspectionOps::create(&*store, new_inspection).await {
        Ok(inspection) => Ok((StatusCode::CREATED, Json(inspection))),
        Err(e) => Err(error_response("create inspection", e)),
    }
}

pub async fn update_inspection<S: Store>(
    State(store): State<AppState<S>>,
    RequestJson(update): RequestJson<UpdateInspection>,
) -> Result<Json<Inspection>, (StatusCode, Json<ErrorResponse>)> {
    if update.id.trim().is_empty() {
        return Err(missing_id("Inspection"));
    }

    match InspectionOps::update(&*store, update).await {
        Ok(inspection) => Ok(Json(inspection)),
        Err(e) => Err(error_response("update inspection", e)),
    }
}

pub async fn delete_inspection<S: Store>(
    State(store): State<AppState<S>>,
    RequestJson(request): RequestJson<IdRequest>,
) -> Result<Json<MessageResponse>, (StatusCode, Json<ErrorResponse>)> {
    if request.id.trim().is_empty() {
        return Err(missing_id("Inspection"));
    }

    match InspectionOps::delete(&*store, &request.id).await {
        Ok(()) => Ok(Json(MessageResponse {
            message: "Inspection deleted successfully".to_string(),
        })),
        Err(e) => Err(error_response("delete inspection", e)),
    }
}

// ---- API documentation ----

pub async fn get_api_docs<S: Store>(_state: State<AppState<S>>) -> Html<String> {
    let html = r#"
<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Inspection Server API Documentation</title>
    <link rel="stylesheet" type="text/css" href="https://unpkg.com/swagger-ui-dist@5.9.0/swagger-ui.css" />
    <style>
        html {
            box-sizing: border-box;
            overflow: -moz-scrollbars-vertical;
            overflow-y: scroll;
        }
        *, *:before, *:after {
            box-sizing: inherit;
        }
        body {
            margin: 0;
            background: #fafafa;
        }
    </style>
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5.9.0/swagger-ui-bundle.js"></script>
    <script src="https://unpkg.com/swagger-ui-dist@5.9.0/swagger-ui-standalone-preset.js"></script>
    <script>
        window.onload = function() {
            const ui = SwaggerUIBundle({
                url: '/docs/openapi.json',
                dom_id: '#swagger-ui',
                deepLinking: true,
                presets: [
                    SwaggerUIBundle.presets.apis,
                    SwaggerUIStandalonePreset
                ],
                plugins: [
                    SwaggerUIBundle.plugins.DownloadUrl
                ],
                layout: "StandaloneLayout"
            });
        };
    </script>
</body>
</html>
"#;
    Html(html.to_string())
}

pub async fn get_openapi_spec<S: Store>(_state: State<AppState<S>>) -> Json<serde_json::Value> {
    let spec = serde_json::json!({
        "openapi": "3.0.3",
        "info": {
            "title": "Inspection Server API",
            "version": "1.0.0",
            "description": "CRUD backend for inspection templates, properties (objects) and inspections. Mutating id-bearing endpoints take the id in the JSON body, not the path."
        },
        "servers": [
            { "url": "/", "description": "Current server" }
        ],
        "tags": [
            { "name": "Templates", "description": "Reusable checklist definitions with ordered questions" },
            { "name": "Objects", "description": "Properties that can be inspected" },
            { "name": "Inspections", "description": "One template applied to one object, with recorded answers" }
        ],
        "paths": {
            "/api/templates": {
                "get": {
                    "tags": ["Templates"],
                    "summary": "List all templates with their question counts",
                    "responses": { "200": { "description": "Array of templates, newest first" } }
                },
                "post": {
                    "tags": ["Templates"],
                    "summary": "Create a template together with its ordered questions",
                    "requestBody": {
                        "required": true,
                        "content": { "application/json": { "schema": { "$ref": "#/components/schemas/NewTemplate" } } }
                    },
                    "responses": {
                        "201": { "description": "Created template with questions" },
                        "400": { "description": "Validation failed; nothing was persisted" }
                    }
                },
                "delete": {
                    "tags": ["Templates"],
                    "summary": "Delete a template and its questions (id in body)",
                    "requestBody": {
                        "required": true,
                        "content": { "application/json": { "schema": { "$ref": "#/components/schemas/IdRequest" } } }
                    },
                    "responses": {
                        "200": { "description": "Deleted" },
                        "404": { "description": "Template not found" },
                        "409": { "description": "Template is referenced by an inspection" }
                    }
                }
            },
            "/api/templates/get": {
                "post": {
                    "tags": ["Templates"],
                    "summary": "Fetch one template with its questions (id in body)",
                    "requestBody": {
                        "required": true,
                        "content": { "application/json": { "schema": { "$ref": "#/components/schemas/IdRequest" } } }
                    },
                    "responses": {
                        "200": { "description": "Template with questions ordered by order_index" },
                        "404": { "description": "Template not found" }
                    }
                }
            },
            "/api/objects": {
                "get": {
                    "tags": ["Objects"],
                    "summary": "List all objects with their inspection counts",
                    "responses": { "200": { "description": "Array of objects, newest first" } }
                },
                "post": {
                    "tags": ["Objects"],
                    "summary": "Create an object",
                    "requestBody": {
                        "required": true,
                        "content": { "application/json": { "schema": { "$ref": "#/components/schemas/NewObject" } } }
                    },
                    "responses": {
                        "201": { "description": "Created object" },
                        "400": { "description": "A required field is empty" }
                    }
                },
                "delete": {
                    "tags": ["Objects"],
                    "summary": "Delete an object (id in body)",
                    "requestBody": {
                        "required": true,
                        "content": { "application/json": { "schema": { "$ref": "#/components/schemas/IdRequest" } } }
                    },
                    "responses": {
                        "200": { "description": "Deleted" },
                        "404": { "description": "Object not found" },
                        "409": { "description": "Object is referenced by an inspection" }
                    }
                }
            },
            "/api/objects/get": {
                "post": {
                    "tags": ["Objects"],
                    "summary": "Fetch one object (id in body)",
                    "responses": {
                        "200": { "description": "Object" },
                        "404": { "description": "Object not found" }
                    }
                }
            },
            "/api/objects/update": {
                "post": {
                    "tags": ["Objects"],
                    "summary": "Overwrite all five fields of an object (id in body)",
                    "responses": {
                        "200": { "description": "Updated object" },
                        "404": { "description": "Object not found" }
                    }
                }
            },
            "/api/inspections": {
                "get": {
                    "tags": ["Inspections"],
                    "summary": "List all inspections joined with object address and template name",
                    "responses": { "200": { "description": "Array of inspections, newest first" } }
                },
                "post": {
                    "tags": ["Inspections"],
                    "summary": "Create a draft inspection for an object and a template",
                    "requestBody": {
                        "required": true,
                        "content": { "application/json": { "schema": { "$ref": "#/components/schemas/NewInspection" } } }
                    },
                    "responses": {
                        "201": { "description": "Created inspection with status draft" },
                        "400": { "description": "Missing ids, or referenced object/template does not exist" }
                    }
                },
                "delete": {
                    "tags": ["Inspections"],
                    "summary": "Delete an inspection and all of its answers (id in body)",
                    "responses": {
                        "200": { "description": "Deleted" },
                        "404": { "description": "Inspection not found" }
                    }
                }
            },
            "/api/inspections/get": {
                "post": {
                    "tags": ["Inspections"],
                    "summary": "Fetch one inspection with its template questions and current answers (id in body)",
                    "responses": {
                        "200": { "description": "Inspection; unanswered questions carry no answer field" },
                        "404": { "description": "Inspection not found" }
                    }
                }
            },
            "/api/inspections/update": {
                "post": {
                    "tags": ["Inspections"],
                    "summary": "Upsert answers and/or update the status (id in body)",
                    "requestBody": {
                        "required": true,
                        "content": { "application/json": { "schema": { "$ref": "#/components/schemas/UpdateInspection" } } }
                    },
                    "responses": {
                        "200": { "description": "Refreshed inspection; completed_at is set iff status is completed" },
                        "400": { "description": "Bad answer entry or unknown question id" },
                        "404": { "description": "Inspection not found" }
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "IdRequest": {
                    "type": "object",
                    "required": ["id"],
                    "properties": { "id": { "type": "string" } }
                },
                "NewTemplate": {
                    "type": "object",
                    "required": ["name", "questions"],
                    "properties": {
                        "name": { "type": "string" },
                        "description": { "type": "string" },
                        "questions": {
                            "type": "array",
                            "items": { "$ref": "#/components/schemas/NewQuestion" }
                        }
                    }
                },
                "NewQuestion": {
                    "type": "object",
                    "required": ["question_text", "question_type", "required"],
                    "properties": {
                        "question_text": { "type": "string" },
                        "question_type": {
                            "type": "string",
                            "enum": ["date", "string", "numeric", "single_choice", "multi_choice"]
                        },
                        "options": {
                            "type": "array",
                            "items": { "type": "string" },
                            "minItems": 2,
                            "description": "Required for choice types only"
                        },
                        "required": { "type": "boolean" }
                    }
                },
                "NewObject": {
                    "type": "object",
                    "required": ["name", "street", "number", "city", "postal_code"],
                    "properties": {
                        "name": { "type": "string" },
                        "street": { "type": "string" },
                        "number": { "type": "string" },
                        "city": { "type": "string" },
                        "postal_code": { "type": "string" }
                    }
                },
                "NewInspection": {
                    "type": "object",
                    "required": ["object_id", "template_id"],
                    "properties": {
                        "object_id": { "type": "string" },
                        "template_id": { "type": "string" }
                    }
                },
                "UpdateInspection": {
                    "type": "object",
                    "required": ["id"],
                    "properties": {
                        "id": { "type": "string" },
                        "answers": {
                            "type": "array",
                            "items": {
                                "type": "object",
                                "required": ["question_id", "answer_value"],
                                "properties": {
                                    "question_id": { "type": "string" },
                                    "answer_value": { "type": "string" }
                                }
                            }
                        },
                        "status": { "type": "string", "enum": ["draft", "completed"] }
                    }
                }
            }
        }
    });

    Json(spec)
}
