use folio_models::contact::ContactSubmission;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApiContactSubmission {
    /// Full name of the sender
    pub name: Option<String>,
    /// Email address of the sender, used as reply-to address
    pub email: Option<String>,
    /// Subject of the message
    pub subject: Option<String>,
    /// Content of the message
    pub message: Option<String>,
}

impl From<ApiContactSubmission> for ContactSubmission {
    fn from(value: ApiContactSubmission) -> Self {
        Self {
            name: value.name,
            email: value.email,
            subject: value.subject,
            message: value.message,
        }
    }
}
