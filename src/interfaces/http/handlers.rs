use super::{AppState, error_status, failure_response, success_response};
use crate::domain::checkout::CheckoutRequest;
use crate::domain::program::{ProgramDraft, ProgramFilter, ProgramUpdate};
use crate::domain::user::NewUser;
use crate::error::ServiceError;
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use tracing::error;
use uuid::Uuid;

pub(crate) async fn root_handler() -> &'static str {
    "funding-trail service is running"
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ProgramQuery {
    #[serde(rename = "type")]
    program_type: Option<String>,
    price: Option<String>,
}

impl ProgramQuery {
    fn into_filter(self) -> ProgramFilter {
        ProgramFilter {
            program_type: self.program_type,
            // Unparseable prices drop the filter, as the listing endpoint
            // has always behaved.
            price: self.price.as_deref().and_then(|p| p.parse().ok()),
        }
    }
}

pub(crate) async fn list_programs_handler(
    State(state): State<AppState>,
    Query(query): Query<ProgramQuery>,
) -> Response {
    match state.programs.find(&query.into_filter()).await {
        Ok(programs) => (StatusCode::OK, Json(programs)).into_response(),
        Err(err) => storage_failure("Failed to list programs", &err),
    }
}

pub(crate) async fn get_program_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Response {
    match state.programs.get(id).await {
        Ok(Some(program)) => (StatusCode::OK, Json(program)).into_response(),
        Ok(None) => program_not_found(id),
        Err(err) => storage_failure("Failed to load program", &err),
    }
}

pub(crate) async fn create_program_handler(
    State(state): State<AppState>,
    Json(draft): Json<ProgramDraft>,
) -> Response {
    let program = draft.into_program();
    match state.programs.insert(program.clone()).await {
        Ok(()) => (StatusCode::CREATED, Json(program)).into_response(),
        Err(err) => storage_failure("Failed to create program", &err),
    }
}

pub(crate) async fn update_program_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(changes): Json<ProgramUpdate>,
) -> Response {
    match state.programs.update(id, changes).await {
        Ok(Some(program)) => (StatusCode::OK, Json(program)).into_response(),
        Ok(None) => program_not_found(id),
        Err(err) => storage_failure("Failed to update program", &err),
    }
}

pub(crate) async fn delete_program_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Response {
    match state.programs.delete(id).await {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => program_not_found(id),
        Err(err) => storage_failure("Failed to delete program", &err),
    }
}

pub(crate) async fn upsert_user_handler(
    State(state): State<AppState>,
    Json(new_user): Json<NewUser>,
) -> Response {
    match state.users.upsert(new_user.into_account()).await {
        Ok(user) => (StatusCode::OK, Json(user)).into_response(),
        Err(err) => storage_failure("Failed to register user", &err),
    }
}

pub(crate) async fn get_user_handler(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Response {
    match state.users.find_by_email(&email).await {
        Ok(Some(user)) => (StatusCode::OK, Json(user)).into_response(),
        Ok(None) => failure_response(
            StatusCode::NOT_FOUND,
            "User not found",
            &format!("no user registered as {email}"),
        ),
        Err(err) => storage_failure("Failed to load user", &err),
    }
}

pub(crate) async fn payment_handler(
    State(state): State<AppState>,
    Json(request): Json<CheckoutRequest>,
) -> Response {
    match state.workflow.process_checkout(request).await {
        Ok(result) => success_response("Payment initiated successfully", result),
        Err(err @ ServiceError::Validation(_)) => failure_response(
            StatusCode::BAD_REQUEST,
            "Invalid checkout request",
            err.reason(),
        ),
        Err(err) => failure_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Payment failed",
            err.reason(),
        ),
    }
}

fn program_not_found(id: Uuid) -> Response {
    failure_response(
        StatusCode::NOT_FOUND,
        "Program not found",
        &format!("no program with id {id}"),
    )
}

fn storage_failure(message: &str, err: &ServiceError) -> Response {
    error!(%err, "{message}");
    failure_response(error_status(err), message, err.reason())
}
