mod contact_message;
mod email_address;
mod form_rules;
mod form_submission;
mod notification;
mod validation;

// expose chosen features on a sub-crate level
pub use contact_message::ContactMessage;
pub use email_address::{EmailAddress, Mailbox};
pub use form_rules::{CONTACT_RULES, SUBSCRIBE_RULES};
pub use form_submission::FormSubmission;
pub use notification::NotificationOutcome;
pub use validation::{FieldOutcome, Rule, RuleSet, RuleSetError, ValidationResult};
