use nutype::nutype;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::email_address::EmailAddress;

pub const CONTACT_EMAIL_MAX_LENGTH: usize = 500;

/// A contact form submission exactly as received from the client.
///
/// Missing keys and `null` values are both treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactSubmission {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

/// A validated contact form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub author: ContactMessageAuthor,
    pub subject: Option<ContactMessageSubject>,
    pub content: ContactMessageContent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessageAuthor {
    pub name: ContactMessageAuthorName,
    pub email: EmailAddress,
}

#[nutype(
    sanitize(trim),
    validate(not_empty, len_char_max = 500),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactMessageAuthorName(String);

#[nutype(
    sanitize(trim),
    validate(not_empty, len_char_max = 500),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactMessageSubject(String);

#[nutype(
    validate(predicate = |s| !s.trim().is_empty(), len_char_max = 5000),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactMessageContent(String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContactValidationError {
    #[error("Name, email, and message are required")]
    MissingFields,
    #[error("Invalid email address")]
    InvalidEmail,
    #[error("Invalid message")]
    InvalidMessage,
    #[error("Invalid name")]
    InvalidName,
    #[error("Invalid subject")]
    InvalidSubject,
}

impl TryFrom<ContactSubmission> for ContactMessage {
    type Error = ContactValidationError;

    fn try_from(value: ContactSubmission) -> Result<Self, Self::Error> {
        let ContactSubmission {
            name,
            email,
            subject,
            message,
        } = value;

        let (Some(name), Some(email), Some(content)) =
            (present(name), present(email), present(message))
        else {
            return Err(ContactValidationError::MissingFields);
        };

        let email = email.trim();
        if email.chars().count() > CONTACT_EMAIL_MAX_LENGTH {
            return Err(ContactValidationError::InvalidEmail);
        }
        let email = email
            .parse::<EmailAddress>()
            .map_err(|_| ContactValidationError::InvalidEmail)?;

        let content = ContactMessageContent::try_new(content)
            .map_err(|_| ContactValidationError::InvalidMessage)?;

        let name = ContactMessageAuthorName::try_new(name)
            .map_err(|_| ContactValidationError::InvalidName)?;

        let subject = subject
            .filter(|s| !s.trim().is_empty())
            .map(ContactMessageSubject::try_new)
            .transpose()
            .map_err(|_| ContactValidationError::InvalidSubject)?;

        Ok(Self {
            author: ContactMessageAuthor { name, email },
            subject,
            content,
        })
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}
