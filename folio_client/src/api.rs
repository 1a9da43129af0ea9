use std::{future::Future, sync::Arc};

use anyhow::Context;
use folio_utils::folio_version;
use serde::Deserialize;
use url::Url;

use crate::ContactFormFields;

/// Transport used by [`ContactForm`](crate::ContactForm) to reach the contact endpoint.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait ContactApi: Send + Sync + 'static {
    /// Send the form fields as one JSON request and decode the JSON response.
    ///
    /// Fails if the server cannot be reached or the response is not valid json.
    fn submit(
        &self,
        fields: ContactFormFields,
    ) -> impl Future<Output = anyhow::Result<ContactApiResponse>> + Send;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactApiResponse {
    pub status: u16,
    pub error: Option<String>,
    pub message: Option<String>,
}

impl ContactApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status) && self.error.is_none()
    }
}

#[cfg(any(test, feature = "mock"))]
impl MockContactApi {
    pub fn with_submit(
        mut self,
        fields: ContactFormFields,
        result: anyhow::Result<ContactApiResponse>,
    ) -> Self {
        self.expect_submit()
            .once()
            .with(mockall::predicate::eq(fields))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }
}

/// [`ContactApi`] talking to a folio server over http.
#[derive(Debug, Clone)]
pub struct HttpContactApi {
    endpoint: Arc<Url>,
    client: reqwest::Client,
}

impl HttpContactApi {
    /// `endpoint` is the full url of the contact route, e.g.
    /// `https://example.com/api/contact`.
    pub fn new(endpoint: Url) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(format!("folio-client/{}", folio_version()))
            .build()
            .context("Failed to create http client")?;

        Ok(Self {
            endpoint: endpoint.into(),
            client,
        })
    }
}

impl ContactApi for HttpContactApi {
    async fn submit(&self, fields: ContactFormFields) -> anyhow::Result<ContactApiResponse> {
        let response = self
            .client
            .post((*self.endpoint).clone())
            .json(&fields)
            .send()
            .await
            .with_context(|| format!("Failed to reach {}", self.endpoint))?;

        let status = response.status().as_u16();
        let ResponseBody { error, message } = response
            .json()
            .await
            .context("Failed to decode response")?;

        Ok(ContactApiResponse {
            status,
            error,
            message,
        })
    }
}

#[derive(Deserialize)]
struct ResponseBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}
