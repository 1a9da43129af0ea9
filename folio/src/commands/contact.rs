use anyhow::bail;
use clap::Subcommand;
use folio_client::{
    ContactForm, ContactFormField, HttpContactApi, Notification, NotificationKind, Notifier,
    SubmitOutcome,
};
use folio_config::Config;
use url::Url;

#[derive(Debug, Subcommand)]
pub enum ContactCommand {
    /// Submit a message through the contact form of a running server
    Send {
        /// Url of the contact endpoint [default: derived from the http config]
        #[arg(long)]
        url: Option<Url>,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        subject: String,
        #[arg(long)]
        message: String,
    },
}

impl ContactCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        match self {
            ContactCommand::Send {
                url,
                name,
                email,
                subject,
                message,
            } => {
                let url = match url {
                    Some(url) => url,
                    None => format!(
                        "http://{}/api/contact",
                        std::net::SocketAddr::new(config.http.host, config.http.port)
                    )
                    .parse()?,
                };

                let mut form = ContactForm::new(HttpContactApi::new(url)?, ConsoleNotifier);
                form.set(ContactFormField::Name, name);
                form.set(ContactFormField::Email, email);
                form.set(ContactFormField::Subject, subject);
                form.set(ContactFormField::Message, message);

                match form.submit().await {
                    SubmitOutcome::Sent => Ok(()),
                    _ => bail!("Failed to send message"),
                }
            }
        }
    }
}

struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        let Notification {
            kind,
            title,
            description,
        } = notification;
        match kind {
            NotificationKind::Success => println!("{title}: {description}"),
            NotificationKind::Error => eprintln!("{title}: {description}"),
        }
    }
}
