use std::sync::Arc;

use anyhow::Context;
use folio_email_contracts::{ContentType, Email, EmailSendError, EmailService};
use folio_models::{email_address::EmailAddressWithName, Sensitive};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use crate::http::HttpClient;

mod http;

const RESEND_ENDPOINT: &str = "https://api.resend.com/emails";

/// Email delivery through the Resend HTTP API.
///
/// Without an API key the service still constructs, but every call to
/// [`EmailService::send`] fails with [`EmailSendError::MissingApiKey`].
#[derive(Debug, Clone)]
pub struct ResendEmailServiceImpl {
    endpoint: Arc<Url>,
    api_key: Option<Sensitive<Arc<str>>>,
    from: Arc<EmailAddressWithName>,
    client: HttpClient,
}

impl ResendEmailServiceImpl {
    pub fn new(
        endpoint_override: Option<Url>,
        api_key: Option<String>,
        from: EmailAddressWithName,
    ) -> anyhow::Result<Self> {
        let endpoint = match endpoint_override {
            Some(endpoint) => endpoint,
            None => RESEND_ENDPOINT.parse()?,
        };

        if api_key.is_none() {
            warn!("No email api key configured, contact form submissions will fail");
        }

        Ok(Self {
            endpoint: endpoint.into(),
            api_key: api_key.map(|key| Sensitive(key.into())),
            from: from.into(),
            client: HttpClient::new().context("Failed to create http client")?,
        })
    }
}

impl EmailService for ResendEmailServiceImpl {
    async fn send(&self, email: Email) -> Result<(), EmailSendError> {
        let api_key = self.api_key.as_ref().ok_or(EmailSendError::MissingApiKey)?;

        let (html, text) = match email.content_type {
            ContentType::Html => (Some(email.body.as_str()), None),
            ContentType::Text => (None, Some(email.body.as_str())),
        };

        let request = SendEmailRequest {
            from: self.from.to_string(),
            to: [email.recipient.to_string()],
            subject: &email.subject,
            html,
            text,
            reply_to: email.reply_to.as_ref().map(ToString::to_string),
        };

        let response = self
            .client
            .post((*self.endpoint).clone())
            .bearer_auth(&*api_key.0)
            .json(&request)
            .send()
            .await
            .context("Failed to reach the email provider")?;

        let status = response.status();
        if status.is_success() {
            match response.json::<SendEmailResponse>().await {
                Ok(SendEmailResponse { id }) => debug!(%id, "email accepted by provider"),
                Err(err) => {
                    warn!(%status, "email accepted by provider, but response is invalid: {err}")
                }
            }
            return Ok(());
        }

        let message = match response.json::<ErrorResponse>().await {
            Ok(ErrorResponse { message }) => message,
            Err(_) => format!("Email provider responded with status {status}"),
        };
        warn!(%status, "email rejected by provider: {message}");

        Err(EmailSendError::Rejected(message))
    }
}

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from: String,
    to: [String; 1],
    subject: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    html: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<String>,
}

#[derive(Deserialize)]
struct SendEmailResponse {
    id: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    message: String,
}
