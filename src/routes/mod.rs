mod contact;
mod form_response;
mod health_check;
mod subscribe;

pub use contact::*;
pub use form_response::*;
pub use health_check::*;
pub use subscribe::*;

use crate::domain::{RuleSet, RuleSetError, CONTACT_RULES, SUBSCRIBE_RULES};

/// Rule sets of both forms, parsed once when the server starts.
pub struct FormRules {
    pub contact: RuleSet,
    pub subscribe: RuleSet,
}

impl FormRules {
    pub fn new() -> Result<Self, RuleSetError> {
        Ok(Self {
            contact: RuleSet::parse(CONTACT_RULES)?,
            subscribe: RuleSet::parse(SUBSCRIBE_RULES)?,
        })
    }
}
