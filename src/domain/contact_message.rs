use crate::domain::{EmailAddress, Mailbox, ValidationResult};

#[derive(Debug)]
pub struct ContactMessage {
    pub author: Mailbox,
    pub subject: String,
    pub body: String,
    /// The author ticked "send me a copy".
    pub send_copy: bool,
}

impl ContactMessage {
    /// Builds the message out of a contact form that passed validation.
    pub fn from_validated(result: &ValidationResult, send_copy: bool) -> Result<Self, String> {
        if result.has_failures() {
            return Err("The contact form did not pass validation.".into());
        }
        let email = EmailAddress::parse(result.value("cbxemail").to_string())?;
        Ok(Self {
            author: Mailbox::named(email, result.value("cbxname").to_string()),
            subject: result.value("cbxsubject").to_string(),
            body: result.value("cbxmessage").to_string(),
            send_copy,
        })
    }
}
