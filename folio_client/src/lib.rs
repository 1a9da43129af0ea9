//! Client side of the contact form: field state, submission and notifications.

use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, warn};

pub use crate::{
    api::{ContactApi, ContactApiResponse, HttpContactApi},
    notify::{Notification, NotificationKind, Notifier},
};

pub mod api;
pub mod notify;

#[cfg(any(test, feature = "mock"))]
pub use crate::{api::MockContactApi, notify::MockNotifier};

pub const SUCCESS_TITLE: &str = "Message sent!";
pub const SUCCESS_DESCRIPTION: &str = "Thank you for your message. I'll get back to you soon.";
pub const INCOMPLETE_DESCRIPTION: &str = "Please fill in all fields.";
pub const FAILED_DESCRIPTION: &str = "Failed to send message";
pub const UNREACHABLE_DESCRIPTION: &str = "Something went wrong. Please try again later.";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContactFormFields {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactFormFields {
    fn is_complete(&self) -> bool {
        [&self.name, &self.email, &self.subject, &self.message]
            .iter()
            .all(|value| !value.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactFormField {
    Name,
    Email,
    Subject,
    Message,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The server accepted the message. The form has been cleared.
    Sent,
    /// At least one field was empty, nothing was sent.
    Incomplete,
    /// The server answered with an error.
    Rejected(String),
    /// The server could not be reached or answered with garbage.
    Failed,
}

/// State of the contact form.
#[derive(Debug)]
pub struct ContactForm<Api, N> {
    api: Api,
    notifier: N,
    fields: ContactFormFields,
    submitting: watch::Sender<bool>,
}

impl<Api, N> ContactForm<Api, N>
where
    Api: ContactApi,
    N: Notifier,
{
    pub fn new(api: Api, notifier: N) -> Self {
        Self {
            api,
            notifier,
            fields: Default::default(),
            submitting: watch::Sender::new(false),
        }
    }

    pub fn set(&mut self, field: ContactFormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            ContactFormField::Name => self.fields.name = value,
            ContactFormField::Email => self.fields.email = value,
            ContactFormField::Subject => self.fields.subject = value,
            ContactFormField::Message => self.fields.message = value,
        }
    }

    pub fn fields(&self) -> &ContactFormFields {
        &self.fields
    }

    /// Whether a submission is in flight.
    pub fn is_submitting(&self) -> bool {
        *self.submitting.borrow()
    }

    /// Handle observing the in-flight state, e.g. to disable a submit button
    /// while [`submit`](Self::submit) holds the form.
    pub fn submitting(&self) -> watch::Receiver<bool> {
        self.submitting.subscribe()
    }

    /// Submit the form.
    ///
    /// Sends at most one request and emits exactly one notification. The
    /// fields are cleared only if the server accepted the message.
    pub async fn submit(&mut self) -> SubmitOutcome {
        if !self.fields.is_complete() {
            self.notifier
                .notify(Notification::error(INCOMPLETE_DESCRIPTION));
            return SubmitOutcome::Incomplete;
        }

        let result = {
            let _submitting = SubmittingGuard::new(&self.submitting);
            self.api.submit(self.fields.clone()).await
        };

        match result {
            Ok(response) if response.is_success() => {
                debug!("contact form message sent");
                self.fields = Default::default();
                self.notifier
                    .notify(Notification::success(SUCCESS_TITLE, SUCCESS_DESCRIPTION));
                SubmitOutcome::Sent
            }
            Ok(response) => {
                let error = response
                    .error
                    .unwrap_or_else(|| FAILED_DESCRIPTION.into());
                debug!(status = response.status, "contact form message rejected: {error}");
                self.notifier.notify(Notification::error(error.as_str()));
                SubmitOutcome::Rejected(error)
            }
            Err(err) => {
                warn!("Failed to submit contact form: {err:#}");
                self.notifier
                    .notify(Notification::error(UNREACHABLE_DESCRIPTION));
                SubmitOutcome::Failed
            }
        }
    }
}

/// Sets the flag on creation and resets it on drop, even if the submit
/// future is cancelled.
struct SubmittingGuard<'a>(&'a watch::Sender<bool>);

impl<'a> SubmittingGuard<'a> {
    fn new(flag: &'a watch::Sender<bool>) -> Self {
        flag.send_replace(true);
        Self(flag)
    }
}

impl Drop for SubmittingGuard<'_> {
    fn drop(&mut self) {
        self.0.send_replace(false);
    }
}
