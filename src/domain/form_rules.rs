//! Rule sets of the site's forms, `(field, label, rules)`.
//! Rules run left to right and the first failing one stops the field.

pub const CONTACT_RULES: &[(&str, &str, &str)] = &[
    ("cbxname", "Name", "trim|required|alpha_spaces"),
    ("cbxemail", "Email", "trim|required|email"),
    ("cbxmessage", "Message", "trim|required|alpha_numeric_spaces"),
    ("cbxsubject", "Subject", "trim|required|alpha_numeric_spaces"),
];

pub const SUBSCRIBE_RULES: &[(&str, &str, &str)] = &[("email", "Email", "trim|required|email")];
