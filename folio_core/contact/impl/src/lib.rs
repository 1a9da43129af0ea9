use std::sync::Arc;

use folio_core_contact_contracts::{ContactSendMessageError, ContactService};
use folio_di::Build;
use folio_email_contracts::{ContentType, Email, EmailService};
use folio_models::{
    contact::{ContactMessage, ContactSubmission},
    email_address::EmailAddressWithName,
};
use folio_templates_contracts::{ContactFormTemplate, TemplateService};
use tracing::{debug, warn};

#[derive(Debug, Clone, Build)]
pub struct ContactServiceImpl<Email, Template> {
    email: Email,
    template: Template,
    config: ContactServiceConfig,
}

#[derive(Debug, Clone)]
pub struct ContactServiceConfig {
    /// Address of the site owner receiving the contact form messages.
    pub recipient: Arc<EmailAddressWithName>,
    /// Subject used for submissions without one.
    pub default_subject: Arc<str>,
}

impl<EmailS, TemplateS> ContactService for ContactServiceImpl<EmailS, TemplateS>
where
    EmailS: EmailService,
    TemplateS: TemplateService,
{
    async fn send_message(
        &self,
        submission: ContactSubmission,
    ) -> Result<(), ContactSendMessageError> {
        let message = ContactMessage::try_from(submission)
            .inspect_err(|err| debug!("rejected contact form submission: {err}"))?;

        let subject = match message.subject {
            Some(subject) => subject.into_inner(),
            None => self.config.default_subject.to_string(),
        };

        let body = self.template.render(&ContactFormTemplate {
            name: message.author.name.into_inner(),
            sender_email: message.author.email.to_string(),
            subject: subject.clone(),
            message: message.content.into_inner(),
        })?;

        let email = Email {
            recipient: (*self.config.recipient).clone(),
            subject,
            body,
            content_type: ContentType::Html,
            reply_to: Some(message.author.email.into()),
        };

        self.email.send(email).await.map_err(|err| {
            warn!("Failed to deliver contact form message: {err}");
            ContactSendMessageError::Delivery(err.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;
    use folio_email_contracts::{EmailSendError, MockEmailService};
    use folio_models::contact::ContactValidationError;
    use folio_templates_contracts::MockTemplateService;
    use folio_templates_impl::TemplateServiceImpl;
    use folio_utils::assert_matches;

    use super::*;

    fn config() -> ContactServiceConfig {
        ContactServiceConfig {
            recipient: Arc::new("Site Owner <owner@example.com>".parse().unwrap()),
            default_subject: "Message from contact form".into(),
        }
    }

    fn submission() -> ContactSubmission {
        ContactSubmission {
            name: Some("Jane".into()),
            email: Some("jane@x.com".into()),
            subject: Some("Hi".into()),
            message: Some("Hello".into()),
        }
    }

    fn template(subject: &str) -> ContactFormTemplate {
        ContactFormTemplate {
            name: "Jane".into(),
            sender_email: "jane@x.com".into(),
            subject: subject.into(),
            message: "Hello".into(),
        }
    }

    fn email(config: &ContactServiceConfig, subject: &str) -> Email {
        Email {
            recipient: (*config.recipient).clone(),
            subject: subject.into(),
            body: "<rendered>".into(),
            content_type: ContentType::Html,
            reply_to: Some("jane@x.com".parse().unwrap()),
        }
    }

    #[tokio::test]
    async fn ok() {
        // Arrange
        let config = config();

        let template = MockTemplateService::new().with_render(template("Hi"), "<rendered>".into());
        let email = MockEmailService::new().with_send(email(&config, "Hi"), Ok(()));

        let sut = ContactServiceImpl {
            email,
            template,
            config,
        };

        // Act
        let result = sut.send_message(submission()).await;

        // Assert
        result.unwrap();
    }

    #[tokio::test]
    async fn ok_default_subject() {
        // Arrange
        let config = config();

        let template = MockTemplateService::new().with_render(
            template("Message from contact form"),
            "<rendered>".into(),
        );
        let email =
            MockEmailService::new().with_send(email(&config, "Message from contact form"), Ok(()));

        let sut = ContactServiceImpl {
            email,
            template,
            config,
        };

        // Act
        let result = sut
            .send_message(ContactSubmission {
                subject: None,
                ..submission()
            })
            .await;

        // Assert
        result.unwrap();
    }

    #[tokio::test]
    async fn rendered_body_contains_message_and_sender() {
        // Arrange
        let mut email = MockEmailService::new();
        email
            .expect_send()
            .once()
            .withf(|email| {
                email.body.contains("Hello")
                    && email.body.contains("jane@x.com")
                    && email.content_type == ContentType::Html
            })
            .return_once(|_| Box::pin(std::future::ready(Ok(()))));

        let sut = ContactServiceImpl {
            email,
            template: TemplateServiceImpl::default(),
            config: config(),
        };

        // Act
        let result = sut.send_message(submission()).await;

        // Assert
        result.unwrap();
    }

    #[tokio::test]
    async fn delivery_rejected() {
        // Arrange
        let config = config();

        let template = MockTemplateService::new().with_render(template("Hi"), "<rendered>".into());
        let email = MockEmailService::new().with_send(
            email(&config, "Hi"),
            Err(EmailSendError::Rejected("API key is invalid".into())),
        );

        let sut = ContactServiceImpl {
            email,
            template,
            config,
        };

        // Act
        let result = sut.send_message(submission()).await;

        // Assert
        assert_matches!(result, Err(ContactSendMessageError::Delivery(message)) if message == "API key is invalid");
    }

    #[tokio::test]
    async fn delivery_missing_api_key() {
        // Arrange
        let config = config();

        let template = MockTemplateService::new().with_render(template("Hi"), "<rendered>".into());
        let email = MockEmailService::new()
            .with_send(email(&config, "Hi"), Err(EmailSendError::MissingApiKey));

        let sut = ContactServiceImpl {
            email,
            template,
            config,
        };

        // Act
        let result = sut.send_message(submission()).await;

        // Assert
        assert_matches!(result, Err(ContactSendMessageError::Delivery(message)) if !message.is_empty());
    }

    #[tokio::test]
    async fn delivery_transport_failure() {
        // Arrange
        let config = config();

        let template = MockTemplateService::new().with_render(template("Hi"), "<rendered>".into());
        let email = MockEmailService::new().with_send(
            email(&config, "Hi"),
            Err(EmailSendError::Other(anyhow!("connection refused"))),
        );

        let sut = ContactServiceImpl {
            email,
            template,
            config,
        };

        // Act
        let result = sut.send_message(submission()).await;

        // Assert
        assert_matches!(result, Err(ContactSendMessageError::Delivery(message)) if message == "connection refused");
    }

    #[tokio::test]
    async fn missing_required_fields() {
        for submission in [
            ContactSubmission {
                name: None,
                ..submission()
            },
            ContactSubmission {
                email: None,
                ..submission()
            },
            ContactSubmission {
                message: Some(String::new()),
                ..submission()
            },
        ] {
            // Arrange
            let sut = ContactServiceImpl {
                email: MockEmailService::new(),
                template: MockTemplateService::new(),
                config: config(),
            };

            // Act
            let result = sut.send_message(submission).await;

            // Assert
            assert_matches!(
                result,
                Err(ContactSendMessageError::Validation(
                    ContactValidationError::MissingFields
                ))
            );
        }
    }

    #[tokio::test]
    async fn email_too_long() {
        // Arrange
        let sut = ContactServiceImpl {
            email: MockEmailService::new(),
            template: MockTemplateService::new(),
            config: config(),
        };

        // Act
        let result = sut
            .send_message(ContactSubmission {
                email: Some(format!("{}@x.com", "a".repeat(500))),
                ..submission()
            })
            .await;

        // Assert
        assert_matches!(
            result,
            Err(ContactSendMessageError::Validation(
                ContactValidationError::InvalidEmail
            ))
        );
    }

    #[tokio::test]
    async fn template_error() {
        // Arrange
        let mut template = MockTemplateService::new();
        template
            .expect_render::<ContactFormTemplate>()
            .once()
            .return_once(|_| Err(anyhow!("template error")));

        let sut = ContactServiceImpl {
            email: MockEmailService::new(),
            template,
            config: config(),
        };

        // Act
        let result = sut.send_message(submission()).await;

        // Assert
        assert_matches!(result, Err(ContactSendMessageError::Other(_)));
    }
}
