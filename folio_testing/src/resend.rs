use std::{
    net::{IpAddr, Ipv4Addr},
    sync::{Arc, Mutex, PoisonError},
};

use anyhow::Context;
use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tracing::info;
use url::Url;
use uuid::Uuid;

const EMAILS_ROUTE: &str = "/emails";

/// Shared state of the fake resend api.
#[derive(Debug)]
pub struct ResendState {
    api_key: String,
    sent: Mutex<Vec<SentEmail>>,
}

impl ResendState {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            sent: Default::default(),
        }
    }

    /// All emails accepted so far, in order of arrival.
    pub fn sent(&self) -> Vec<SentEmail> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentEmail {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: Option<String>,
    pub text: Option<String>,
    pub reply_to: Option<String>,
}

pub async fn start_server(host: IpAddr, port: u16, api_key: String) -> anyhow::Result<()> {
    info!("Starting fake resend server on {host}:{port}");
    info!("Send endpoint: http://{host}:{port}{EMAILS_ROUTE}");
    info!("API key: {api_key:?}");

    let router = router(ResendState::new(api_key).into());

    let listener = TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind to {host}:{port}"))?;
    axum::serve(listener, router)
        .await
        .context("Failed to start HTTP server")
}

/// Start the fake resend api on a random local port in the background.
///
/// Returns the send endpoint and the shared state to inspect delivered emails.
pub async fn spawn(api_key: impl Into<String>) -> anyhow::Result<(Url, Arc<ResendState>)> {
    let state = Arc::new(ResendState::new(api_key));

    let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0))
        .await
        .context("Failed to bind to random port")?;
    let addr = listener.local_addr()?;
    let endpoint = format!("http://{addr}{EMAILS_ROUTE}").parse()?;

    let router = router(Arc::clone(&state));
    tokio::spawn(async move { axum::serve(listener, router).await });

    Ok((endpoint, state))
}

pub fn router(state: Arc<ResendState>) -> Router<()> {
    Router::new()
        .route(EMAILS_ROUTE, routing::post(send_email).get(list_emails))
        .with_state(state)
}

#[derive(Serialize)]
struct SendEmailResponse {
    id: Uuid,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorResponse {
    status_code: u16,
    message: &'static str,
    name: &'static str,
}

fn error(status: StatusCode, name: &'static str, message: &'static str) -> Response {
    let response = ErrorResponse {
        status_code: status.as_u16(),
        message,
        name,
    };
    (status, Json(response)).into_response()
}

async fn send_email(
    State(state): State<Arc<ResendState>>,
    headers: HeaderMap,
    Json(email): Json<SentEmail>,
) -> Response {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    match token {
        None => {
            return error(
                StatusCode::UNAUTHORIZED,
                "missing_api_key",
                "Missing API key in the authorization header",
            )
        }
        Some(token) if token != state.api_key => {
            return error(StatusCode::FORBIDDEN, "invalid_api_key", "API key is invalid")
        }
        Some(_) => {}
    }

    if email.to.is_empty() || email.to.iter().any(String::is_empty) {
        return error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "validation_error",
            "Missing `to` field.",
        );
    }
    if email.html.is_none() && email.text.is_none() {
        return error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "validation_error",
            "Missing `html` or `text` field.",
        );
    }

    let id = Uuid::new_v4();
    info!(%id, to = ?email.to, subject = %email.subject, "accepted email");
    state
        .sent
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push(email);

    Json(SendEmailResponse { id }).into_response()
}

async fn list_emails(State(state): State<Arc<ResendState>>) -> Json<Vec<SentEmail>> {
    Json(state.sent())
}
