//! Form endpoints: create, list, update
//!
//! Orchestration only: urgency comes from the classifier, transition
//! decisions from the status table, and the listing query from its
//! plan builder. A denied transition aborts before any write.

use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{error, info};
use uuid::Uuid;

use intake_common::db::models::{transition_allowed, Form};

use crate::db;
use crate::error::{ApiError, ApiResult};
use crate::listing::{build_plan, ListParams};
use crate::AppState;

/// Request-scoped budget for listing queries, separate from the sentiment
/// client's timeout
const LIST_QUERY_TIMEOUT: Duration = Duration::from_secs(5);

/// Request body for POST /v1/forms
///
/// The answer is required at creation even though the entity allows it to
/// be absent later.
#[derive(Debug, Deserialize)]
pub struct CreateFormRequest {
    pub question: String,
    pub answer: String,
}

/// Response body for POST /v1/forms
#[derive(Debug, Serialize)]
pub struct CreateFormResponse {
    pub form_id: String,
}

/// POST /v1/forms
///
/// Creates a form in status draft with urgency classified from the answer.
pub async fn create_form(
    State(state): State<AppState>,
    Json(req): Json<CreateFormRequest>,
) -> ApiResult<(StatusCode, Json<CreateFormResponse>)> {
    if req.question.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "question must not be blank".to_string(),
        ));
    }

    let id = Uuid::new_v4().to_string();
    let now = Utc::now().to_rfc3339();

    let classification = state.classifier.classify(&req.answer).await;

    db::insert_form(
        &state.db,
        &db::NewForm {
            id: &id,
            question: &req.question,
            answer: Some(&req.answer),
            urgency: Some(classification.urgency.as_str()),
            created_at: &now,
        },
    )
    .await
    .map_err(|e| {
        error!(error = %e, "Failed to insert form");
        e
    })?;

    info!(
        form_id = %id,
        urgency = classification.urgency.as_str(),
        "Form created"
    );

    Ok((StatusCode::CREATED, Json(CreateFormResponse { form_id: id })))
}

/// Response body for GET /v1/forms
#[derive(Debug, Serialize)]
pub struct ListFormsResponse {
    pub page: i64,
    pub limit: i64,
    pub results: Vec<Form>,
}

/// GET /v1/forms
///
/// Paginated listing with optional per-field substring filters and sorting.
pub async fn list_forms(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<ListFormsResponse>> {
    let plan = build_plan(&params);

    let results = tokio::time::timeout(LIST_QUERY_TIMEOUT, db::list_forms(&state.db, &plan))
        .await
        .map_err(|_| {
            error!("Listing query timed out");
            ApiError::Internal("query failed".to_string())
        })??;

    Ok(Json(ListFormsResponse {
        page: plan.page,
        limit: plan.limit,
        results,
    }))
}

/// Request body for PUT /v1/forms/:id
#[derive(Debug, Deserialize)]
pub struct UpdateFormRequest {
    pub answer: Option<String>,
    pub status: String,
}

/// PUT /v1/forms/:id
///
/// Validates the status transition before writing. If a new answer is
/// supplied its urgency is reclassified and persisted together with the
/// status; otherwise only the status moves.
pub async fn update_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateFormRequest>,
) -> ApiResult<Json<Value>> {
    let current = db::get_status(&state.db, &id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("form not found: {}", id)))?;

    if !transition_allowed(&current, &req.status) {
        return Err(ApiError::InvalidTransition {
            current,
            requested: req.status,
        });
    }

    let now = Utc::now().to_rfc3339();

    match &req.answer {
        Some(answer) => {
            let classification = state.classifier.classify(answer).await;
            db::update_answer_and_status(
                &state.db,
                &id,
                answer,
                classification.urgency.as_str(),
                &req.status,
                &now,
            )
            .await?;
        }
        None => {
            db::update_status(&state.db, &id, &req.status, &now).await?;
        }
    }

    info!(form_id = %id, status = %req.status, "Form updated");

    Ok(Json(json!({ "message": "form updated" })))
}
