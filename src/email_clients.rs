use crate::domain::Mailbox;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};

pub struct EmailClient {
    sender: Mailbox,
    http_client: Client,
    // the API url that we want to call and have it send the email for us
    base_url: String,
    authorization_token: Secret<String>,
}

#[derive(serde::Serialize)]
#[serde(rename_all = "PascalCase")]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html_body: &'a str,
    text_body: &'a str,
}

impl EmailClient {
    pub async fn send_email(
        &self,
        recipient: &Mailbox,
        subject: &str,
        html_content: &str,
        text_content: &str,
    ) -> Result<(), reqwest::Error> {
        let url = format!("{}/email", self.base_url.trim_end_matches('/'));
        let from = self.sender.to_string();
        let to = recipient.to_string();
        let request_body = SendEmailRequest {
            from: &from,
            to: &to,
            subject,
            html_body: html_content,
            text_body: text_content,
        };

        self.http_client
            .post(&url)
            .json(&request_body)
            .header(
                "X-Postmark-Server-Token",
                self.authorization_token.expose_secret(),
            )
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }

    pub fn new(
        base_url: String,
        sender: Mailbox,
        auth_token: Secret<String>,
        timeout: std::time::Duration,
    ) -> Result<Self, reqwest::Error> {
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            sender,
            base_url,
            http_client,
            authorization_token: auth_token,
        })
    }
}
