//! Contact API routes
//!
//! - `POST /contact/send` - Store a contact request; requires `x-api-key`

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use std::sync::Arc;

use super::commands::{SendContactCommand, SendContactError};
use crate::{
    db::ConnectionRequestStore,
    error::{AppError, AppResult},
    middleware::{require_api_key, ApiKey},
    notify::Notifier,
};

/// State of the contact routes
#[derive(Clone)]
pub struct ContactState {
    pub requests: Arc<dyn ConnectionRequestStore>,
    pub notifier: Arc<dyn Notifier>,
}

impl From<SendContactError> for AppError {
    fn from(err: SendContactError) -> Self {
        match err {
            SendContactError::Invalid(e) => AppError::from(e),
            SendContactError::Store(e) => AppError::Store(e),
        }
    }
}

/// Contact routes, with the API key check applied before any extraction
pub fn contact_routes(state: ContactState, api_key: ApiKey) -> Router {
    Router::new()
        .route("/send", post(send_contact))
        .route_layer(middleware::from_fn_with_state(api_key, require_api_key))
        .with_state(state)
}

/// `POST /contact/send`
///
/// - `201 Created` - `{ "message": ..., "id": ... }`
/// - `400 Bad Request` - missing fields or malformed JSON
/// - `401 Unauthorized` - missing or wrong `x-api-key`
async fn send_contact(
    State(state): State<ContactState>,
    body: Result<Json<SendContactCommand>, JsonRejection>,
) -> AppResult<Response> {
    let Json(command) = body?;

    let receipt =
        super::commands::send::handle(state.requests.as_ref(), state.notifier.clone(), command)
            .await?;

    Ok((StatusCode::CREATED, Json(receipt)).into_response())
}
