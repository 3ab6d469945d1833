use std::collections::BTreeMap;

use actix_web::error::UrlencodedError;
use actix_web::http::{header, StatusCode};
use actix_web::{web, HttpRequest, HttpResponse, ResponseError};

use crate::domain::{NotificationOutcome, ValidationResult};

/// JSON answer of both form endpoints, as rendered by the site's pages.
/// `successmessage` only appears once validation passed.
#[derive(Debug, Default, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FormResponse {
    pub validation_error: bool,
    #[serde(default)]
    pub error_field: Vec<String>,
    #[serde(default)]
    pub message: BTreeMap<String, String>,
    pub error: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub successmessage: Option<String>,
}

impl FormResponse {
    pub fn from_validation(result: &ValidationResult) -> Self {
        let mut response = Self {
            validation_error: result.has_failures(),
            ..Default::default()
        };
        for (field, message) in result.failures() {
            response.error_field.push(field.to_string());
            response.message.insert(field.to_string(), message.to_string());
        }
        response
    }

    pub fn with_outcome(self, outcome: NotificationOutcome) -> Self {
        Self {
            error: !outcome.success,
            successmessage: Some(outcome.message),
            ..self
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("No form data was submitted.")]
    EmptySubmission,
    #[error("The submitted form could not be read.")]
    MalformedSubmission,
    #[error("The submitted form is too large.")]
    PayloadTooLarge,
    #[error("Something went wrong. Try again later.")]
    UnexpectedError(#[from] anyhow::Error),
}

impl ResponseError for SubmissionError {
    fn status_code(&self) -> StatusCode {
        match self {
            SubmissionError::EmptySubmission | SubmissionError::MalformedSubmission => {
                StatusCode::BAD_REQUEST
            }
            SubmissionError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            SubmissionError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let SubmissionError::UnexpectedError(e) = self {
            tracing::error!(error.cause_chain = ?e, "Form submission failed");
        }
        HttpResponse::build(self.status_code()).json(FormResponse {
            error: true,
            successmessage: Some(self.to_string()),
            ..Default::default()
        })
    }
}

/// Largest url-encoded body the form endpoints read.
pub const FORM_PAYLOAD_LIMIT: usize = 16 * 1024;

/// Extractor settings of the form endpoints: bodies actix cannot read still get
/// the JSON answer instead of a plain-text error.
pub fn form_config() -> web::FormConfig {
    web::FormConfig::default()
        .limit(FORM_PAYLOAD_LIMIT)
        .error_handler(|err, req| reject_unreadable_form(err, req).into())
}

fn reject_unreadable_form(err: UrlencodedError, req: &HttpRequest) -> SubmissionError {
    tracing::warn!(error.message = %err, "Form body rejected");
    match err {
        UrlencodedError::Overflow { .. } => SubmissionError::PayloadTooLarge,
        UrlencodedError::ContentType if declares_no_body(req) => SubmissionError::EmptySubmission,
        _ => SubmissionError::MalformedSubmission,
    }
}

fn declares_no_body(req: &HttpRequest) -> bool {
    let headers = req.headers();
    if headers.contains_key(header::TRANSFER_ENCODING) {
        return false;
    }
    match headers.get(header::CONTENT_LENGTH) {
        None => true,
        Some(length) => length.to_str().map(|l| l.trim() == "0").unwrap_or(false),
    }
}
