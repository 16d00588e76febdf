pub mod handlers;

use crate::application::checkout::CheckoutWorkflow;
use crate::domain::ports::{ProgramStore, UserStore};
use crate::error::ServiceError;
use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::{HeaderValue, Method, StatusCode};
use axum::middleware::{Next, from_fn_with_state};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

/// Shared handles for request handling. Clone is cheap; every field is an Arc.
#[derive(Clone)]
pub struct AppState {
    pub workflow: Arc<CheckoutWorkflow>,
    pub programs: Arc<dyn ProgramStore>,
    pub users: Arc<dyn UserStore>,
    pub cors_allowed_origins: Arc<Vec<String>>,
}

impl AppState {
    pub fn new(
        workflow: Arc<CheckoutWorkflow>,
        programs: Arc<dyn ProgramStore>,
        users: Arc<dyn UserStore>,
        cors_allowed_origins: Vec<String>,
    ) -> Self {
        Self {
            workflow,
            programs,
            users,
            cors_allowed_origins: Arc::new(cors_allowed_origins),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root_handler))
        .route(
            "/programs",
            get(handlers::list_programs_handler).post(handlers::create_program_handler),
        )
        .route(
            "/programs/:id",
            get(handlers::get_program_handler)
                .put(handlers::update_program_handler)
                .delete(handlers::delete_program_handler),
        )
        .route("/users", post(handlers::upsert_user_handler))
        .route("/users/:email", get(handlers::get_user_handler))
        .route("/payment", post(handlers::payment_handler))
        .layer(from_fn_with_state(state.clone(), cors_middleware))
        .with_state(state)
}

async fn cors_middleware(State(state): State<AppState>, req: Request<Body>, next: Next) -> Response {
    let origin = req
        .headers()
        .get("origin")
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    let allowed = origin
        .as_deref()
        .is_some_and(|o| state.cors_allowed_origins.iter().any(|x| x == o));

    if req.method() == Method::OPTIONS {
        let mut resp = StatusCode::NO_CONTENT.into_response();
        if allowed {
            apply_cors_headers(&mut resp, origin.as_deref());
            resp.headers_mut().insert(
                "access-control-allow-methods",
                HeaderValue::from_static("GET,POST,PUT,DELETE,OPTIONS"),
            );
            resp.headers_mut().insert(
                "access-control-allow-headers",
                HeaderValue::from_static("content-type"),
            );
        }
        return resp;
    }

    let mut resp = next.run(req).await;
    if allowed {
        apply_cors_headers(&mut resp, origin.as_deref());
    }
    resp
}

fn apply_cors_headers(resp: &mut Response, origin: Option<&str>) {
    if let Some(origin) = origin {
        if let Ok(value) = HeaderValue::from_str(origin) {
            resp.headers_mut()
                .insert("access-control-allow-origin", value);
            resp.headers_mut().insert(
                "access-control-allow-credentials",
                HeaderValue::from_static("true"),
            );
        }
    }
}

pub(crate) fn success_response(message: &str, data: impl Serialize) -> Response {
    (
        StatusCode::OK,
        Json(json!({"success": true, "message": message, "data": data})),
    )
        .into_response()
}

pub(crate) fn failure_response(status: StatusCode, message: &str, error: &str) -> Response {
    (
        status,
        Json(json!({"success": false, "message": message, "error": error})),
    )
        .into_response()
}

pub(crate) fn error_status(err: &ServiceError) -> StatusCode {
    match err {
        ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
