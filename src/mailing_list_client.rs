use reqwest::Client;
use secrecy::{ExposeSecret, Secret};

use crate::domain::EmailAddress;

/// Talks to the Mailchimp marketing API (v3): adds addresses to an audience list.
pub struct MailingListClient {
    http_client: Client,
    base_url: String,
    api_key: Secret<String>,
}

#[derive(serde::Serialize)]
struct AddMemberRequest<'a> {
    email_address: &'a str,
    status: &'a str,
}

// error body of the API, see https://mailchimp.com/developer/marketing/docs/errors/
#[derive(serde::Deserialize, Default)]
struct ApiProblem {
    title: Option<String>,
    detail: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum MailingListError {
    #[error("{detail}")]
    Rejected { status: u16, detail: String },
    #[error("Failed to reach the mailing list API.")]
    Transport(#[from] reqwest::Error),
}

impl MailingListClient {
    pub fn new(
        base_url: String,
        api_key: Secret<String>,
        timeout: std::time::Duration,
    ) -> Result<Self, reqwest::Error> {
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            base_url,
            api_key,
        })
    }

    pub async fn add_member(
        &self,
        list_id: &str,
        email: &EmailAddress,
    ) -> Result<(), MailingListError> {
        let url = format!(
            "{}/lists/{}/members",
            self.base_url.trim_end_matches('/'),
            list_id
        );
        let request_body = AddMemberRequest {
            email_address: email.as_ref(),
            status: "subscribed",
        };

        let response = self
            .http_client
            .post(&url)
            // the API ignores the user name of basic auth
            .basic_auth("apikey", Some(self.api_key.expose_secret()))
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let problem = response.json::<ApiProblem>().await.unwrap_or_default();
        let detail = problem
            .detail
            .or(problem.title)
            .unwrap_or_else(|| status.to_string());
        Err(MailingListError::Rejected {
            status: status.as_u16(),
            detail,
        })
    }
}
