use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use folio_core_contact_contracts::{ContactSendMessageError, ContactService};
use tracing::debug;

use crate::{
    errors::{error, INVALID_REQUEST_BODY, SEND_EMAIL_FAILED},
    models::{contact::ApiContactSubmission, ApiMessage},
};

pub fn router(service: Arc<impl ContactService>) -> Router<()> {
    Router::new()
        .route("/api/contact", routing::post(send_message))
        .with_state(service)
}

async fn send_message(
    service: State<Arc<impl ContactService>>,
    submission: Result<Json<ApiContactSubmission>, JsonRejection>,
) -> Response {
    let Json(submission) = match submission {
        Ok(submission) => submission,
        Err(rejection) => {
            debug!("invalid contact request body: {rejection}");
            return error(StatusCode::BAD_REQUEST, INVALID_REQUEST_BODY);
        }
    };

    match service.send_message(submission.into()).await {
        Ok(()) => Json(ApiMessage {
            message: "Email sent successfully",
        })
        .into_response(),
        Err(ContactSendMessageError::Validation(err)) => {
            error(StatusCode::BAD_REQUEST, err.to_string())
        }
        Err(ContactSendMessageError::Delivery(message)) => {
            error(StatusCode::INTERNAL_SERVER_ERROR, message)
        }
        Err(ContactSendMessageError::Other(err)) => {
            tracing::error!("Failed to send contact message: {err:#}");
            error(StatusCode::INTERNAL_SERVER_ERROR, SEND_EMAIL_FAILED)
        }
    }
}
