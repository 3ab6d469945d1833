//! Client side of the two forms: checks what a browser would check, posts the
//! fields once and renders the JSON answer into a [`FormState`].

mod form_state;

pub use form_state::{Banner, BannerKind, FormState};

use reqwest::{Client, Url};

use crate::domain::{FormSubmission, Rule, RuleSet, RuleSetError, CONTACT_RULES, SUBSCRIBE_RULES};
use crate::routes::FormResponse;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Contact,
    Subscribe,
}

impl FormKind {
    /// Path of the endpoint, relative to the directory of the page.
    pub fn endpoint(&self) -> &'static str {
        match self {
            FormKind::Contact => "contact",
            FormKind::Subscribe => "subscribe",
        }
    }

    fn rules(&self) -> &'static [(&'static str, &'static str, &'static str)] {
        match self {
            FormKind::Contact => CONTACT_RULES,
            FormKind::Subscribe => SUBSCRIBE_RULES,
        }
    }
}

/// How the form ended up after a submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rendered {
    /// Local checks failed, nothing was posted.
    ClientRejected,
    /// The server listed invalid fields; their labels were updated.
    FieldErrors,
    /// The server processed the form; a banner is shown and the fields are reset.
    Banner,
    /// No usable answer; the fields were reset.
    Reset,
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("{0} is not a valid page url: {1}")]
    InvalidPageUrl(String, String),
    #[error(transparent)]
    Rules(#[from] RuleSetError),
    #[error("Failed to build the http client.")]
    HttpClient(#[from] reqwest::Error),
}

#[derive(Debug)]
pub struct FormSubmitter {
    http_client: Client,
    endpoint: Url,
    local_rules: RuleSet,
}

impl FormSubmitter {
    pub fn new(
        kind: FormKind,
        page_url: &str,
        timeout: std::time::Duration,
    ) -> Result<Self, SubmitError> {
        let endpoint = Url::parse(page_url)
            .and_then(|page| page.join(kind.endpoint()))
            .map_err(|e| SubmitError::InvalidPageUrl(page_url.to_string(), e.to_string()))?;
        let local_rules =
            RuleSet::parse(kind.rules())?.restricted_to(&[Rule::Trim, Rule::Required, Rule::Email]);
        let http_client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            endpoint,
            local_rules,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    #[tracing::instrument(name = "Submitting a form", skip_all, fields(endpoint = %self.endpoint))]
    pub async fn submit(&self, form: &mut FormState) -> Rendered {
        let submission: FormSubmission = form.pairs().iter().cloned().collect();
        let local = self.local_rules.validate(&submission);
        if local.has_failures() {
            form.clear_error_labels();
            for (field, message) in local.failures() {
                form.set_error_label(field, message);
            }
            return Rendered::ClientRejected;
        }

        let response = match self.post(form.pairs()).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error.message = %e, "Form submission got no usable answer");
                form.reset();
                return Rendered::Reset;
            }
        };

        if response.validation_error {
            for field in &response.error_field {
                let message = response.message.get(field).map(String::as_str).unwrap_or_default();
                form.set_error_label(field, message);
            }
            return Rendered::FieldErrors;
        }

        let kind = if response.error {
            BannerKind::Danger
        } else {
            BannerKind::Success
        };
        form.clear_error_labels();
        form.show_banner(kind, response.successmessage.as_deref().unwrap_or_default());
        form.reset();
        Rendered::Banner
    }

    async fn post(&self, pairs: &[(String, String)]) -> Result<FormResponse, anyhow::Error> {
        let body = self
            .http_client
            .post(self.endpoint.clone())
            .form(pairs)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(serde_json::from_str(&body)?)
    }
}
