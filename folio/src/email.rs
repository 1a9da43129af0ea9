use anyhow::Context;
use folio_config::EmailConfig;
use folio_email_impl::ResendEmailServiceImpl;

/// Create the email service for the configured provider
pub fn connect(config: &EmailConfig) -> anyhow::Result<ResendEmailServiceImpl> {
    ResendEmailServiceImpl::new(
        config.endpoint_override.clone(),
        config.api_key.as_ref().map(|api_key| api_key.0.clone()),
        config.from.clone(),
    )
    .context("Failed to create email service")
}
