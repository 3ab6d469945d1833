use askama::Template;

/// HTML part of the contact mails (both the admin alert and the author's copy).
#[derive(Template)]
#[template(path = "contact_email.html")]
pub struct ContactEmailHtml<'a> {
    pub heading: &'a str,
    pub author: &'a str,
    pub subject: &'a str,
    pub body: &'a str,
}

#[derive(Template)]
#[template(path = "contact_email.txt")]
pub struct ContactEmailText<'a> {
    pub heading: &'a str,
    pub author: &'a str,
    pub subject: &'a str,
    pub body: &'a str,
}
