use actix_web::{web, HttpResponse};

use crate::domain::{ContactMessage, FormSubmission};
use crate::notifiers::ContactNotifier;
use crate::routes::{FormResponse, FormRules, SubmissionError};

#[tracing::instrument(name = "Handling a contact form submission", skip_all)]
pub async fn contact(
    form: web::Form<Vec<(String, String)>>,
    rules: web::Data<FormRules>,
    notifier: web::Data<ContactNotifier>,
) -> Result<HttpResponse, SubmissionError> {
    let submission: FormSubmission = form.into_inner().into_iter().collect();
    if submission.is_empty() {
        return Err(SubmissionError::EmptySubmission);
    }

    let result = rules.contact.validate(&submission);
    let response = FormResponse::from_validation(&result);
    if result.has_failures() {
        tracing::info!(fields = ?response.error_field, "Contact form rejected");
        return Ok(HttpResponse::Ok().json(response));
    }

    let message = ContactMessage::from_validated(&result, submission.contains("cbxsendme"))
        .map_err(anyhow::Error::msg)?;
    let outcome = notifier.notify(&message).await;

    Ok(HttpResponse::Ok().json(response.with_outcome(outcome)))
}
