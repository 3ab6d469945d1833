use std::sync::Arc;

use anyhow::Context;
use askama::Template;
use tokio::task::JoinHandle;
use tracing::Instrument;

use crate::configuration::ContactSettings;
use crate::domain::{ContactMessage, Mailbox, NotificationOutcome};
use crate::email_clients::EmailClient;
use crate::templating::{ContactEmailHtml, ContactEmailText};

pub const SENT_MESSAGE: &str = "Message has been sent successfully !";
pub const NOT_SENT_MESSAGE: &str = "Sorry, Mail could not be sent. Please contact server admin.";

/// Mails contact form messages to the site administrator, and a copy back to the
/// author when asked for.
pub struct ContactNotifier {
    email_client: Arc<EmailClient>,
    admin: Mailbox,
    admin_subject: String,
    copy_subject: String,
}

impl ContactNotifier {
    pub fn new(email_client: EmailClient, settings: &ContactSettings) -> Result<Self, String> {
        Ok(Self {
            email_client: Arc::new(email_client),
            admin: settings.admin()?,
            admin_subject: settings.admin_subject.clone(),
            copy_subject: settings.copy_subject.clone(),
        })
    }

    #[tracing::instrument(
        name = "Relaying a contact message",
        skip_all,
        fields(author = %message.author.email, send_copy = message.send_copy)
    )]
    pub async fn notify(&self, message: &ContactMessage) -> NotificationOutcome {
        let subject = if message.subject.is_empty() {
            self.admin_subject.as_str()
        } else {
            message.subject.as_str()
        };

        let sent = async {
            let (html, text) = render("New contact form message", subject, message)?;
            self.email_client
                .send_email(&self.admin, subject, &html, &text)
                .await
                .context("Failed to send the contact alert to the administrator.")
        }
        .await;

        if let Err(e) = sent {
            tracing::error!(error.cause_chain = ?e, error.message = %e, "Contact message was not delivered");
            return NotificationOutcome::failure(NOT_SENT_MESSAGE);
        }

        if message.send_copy {
            self.dispatch_copy(message);
        }
        NotificationOutcome::success(SENT_MESSAGE)
    }

    /// The author's copy runs detached: whatever happens to it only reaches the logs.
    fn dispatch_copy(&self, message: &ContactMessage) -> JoinHandle<()> {
        let email_client = Arc::clone(&self.email_client);
        let recipient = message.author.clone();
        let subject = self.copy_subject.clone();
        let rendered = render("A copy of your message", &message.subject, message);
        let span = tracing::info_span!("Sending the author's copy", recipient = %recipient.email);

        tokio::spawn(
            async move {
                let outcome = match rendered {
                    Ok((html, text)) => email_client
                        .send_email(&recipient, &subject, &html, &text)
                        .await
                        .context("Failed to send the copy to the author."),
                    Err(e) => Err(e),
                };
                if let Err(e) = outcome {
                    tracing::warn!(error.cause_chain = ?e, error.message = %e, "Author's copy was not delivered");
                }
            }
            .instrument(span),
        )
    }
}

fn render(
    heading: &str,
    subject: &str,
    message: &ContactMessage,
) -> Result<(String, String), anyhow::Error> {
    let author = message.author.to_string();
    let html = ContactEmailHtml {
        heading,
        author: &author,
        subject,
        body: &message.body,
    }
    .render()
    .context("Failed to render the html body.")?;
    let text = ContactEmailText {
        heading,
        author: &author,
        subject,
        body: &message.body,
    }
    .render()
    .context("Failed to render the text body.")?;
    Ok((html, text))
}
