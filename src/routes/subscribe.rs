use actix_web::{web, HttpResponse};
use anyhow::Context;

use crate::domain::{EmailAddress, FormSubmission};
use crate::notifiers::SubscribeNotifier;
use crate::routes::{FormResponse, FormRules, SubmissionError};

#[tracing::instrument(name = "Handling a newsletter subscription", skip_all)]
pub async fn subscribe(
    form: web::Form<Vec<(String, String)>>,
    rules: web::Data<FormRules>,
    notifier: web::Data<SubscribeNotifier>,
) -> Result<HttpResponse, SubmissionError> {
    let submission: FormSubmission = form.into_inner().into_iter().collect();
    if submission.is_empty() {
        return Err(SubmissionError::EmptySubmission);
    }

    let result = rules.subscribe.validate(&submission);
    let response = FormResponse::from_validation(&result);
    if result.has_failures() {
        tracing::info!(fields = ?response.error_field, "Subscription form rejected");
        return Ok(HttpResponse::Ok().json(response));
    }

    let email = EmailAddress::parse(result.value("email").to_string())
        .map_err(anyhow::Error::msg)
        .context("A validated subscription email failed to parse.")?;
    let outcome = notifier.notify(&email).await;

    Ok(HttpResponse::Ok().json(response.with_outcome(outcome)))
}
