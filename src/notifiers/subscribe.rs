use crate::configuration::MailingListSettings;
use crate::domain::{EmailAddress, NotificationOutcome};
use crate::mailing_list_client::{MailingListClient, MailingListError};

pub const SUBSCRIBED_MESSAGE: &str = "Subscription success";
pub const MISSING_CREDENTIALS_MESSAGE: &str = "Api key or list id missing";
pub const UNREACHABLE_MESSAGE: &str = "Subscription failed. Please try again later.";

struct MailingList {
    client: MailingListClient,
    list_id: String,
}

/// Adds subscribers to the newsletter list. Without credentials every call answers
/// with a configuration error and the network is never touched.
pub struct SubscribeNotifier {
    list: Option<MailingList>,
}

impl SubscribeNotifier {
    pub fn from_settings(settings: &MailingListSettings) -> Result<Self, reqwest::Error> {
        let base_url = match settings.api_base_url() {
            Some(base_url) if settings.is_configured() => base_url,
            _ => {
                tracing::warn!("Mailing list credentials are missing, subscriptions are disabled.");
                return Ok(Self { list: None });
            }
        };
        let client = MailingListClient::new(
            base_url,
            settings.api_key.clone(),
            settings.timeout(),
        )?;
        Ok(Self {
            list: Some(MailingList {
                client,
                list_id: settings.list_id.trim().to_string(),
            }),
        })
    }

    #[tracing::instrument(name = "Adding an address to the mailing list", skip_all, fields(subscriber_email = %email))]
    pub async fn notify(&self, email: &EmailAddress) -> NotificationOutcome {
        let Some(list) = &self.list else {
            return NotificationOutcome::failure(MISSING_CREDENTIALS_MESSAGE);
        };

        match list.client.add_member(&list.list_id, email).await {
            Ok(()) => NotificationOutcome::success(SUBSCRIBED_MESSAGE),
            Err(e @ MailingListError::Rejected { .. }) => {
                tracing::warn!(error.message = %e, "Mailing list refused the address");
                NotificationOutcome::failure(format!("Subscription failed. Error: {}", e))
            }
            Err(e) => {
                tracing::error!(error.cause_chain = ?e, error.message = %e, "Mailing list call failed");
                NotificationOutcome::failure(UNREACHABLE_MESSAGE)
            }
        }
    }
}
