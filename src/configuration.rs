use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;

use crate::domain::{EmailAddress, Mailbox};

pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> String {
        match self {
            Environment::Local => String::from("local"),
            Environment::Production => String::from("production"),
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "local" => Ok(Environment::Local),
            "production" => Ok(Environment::Production),
            other => Err(format!(
                r#"{} is not a supported environment.
            Use either 'local or 'production'."#,
                other
            )),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub email_client: EmailClientSettings,
    pub contact: ContactSettings,
    pub mailing_list: MailingListSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApplicationSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
    // directory holding the site pages, served at "/"
    pub static_dir: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EmailClientSettings {
    pub base_url: String,
    pub sender_email: String,
    pub sender_name: String,
    pub authorization_token: Secret<String>,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_milliseconds: u64,
}

impl EmailClientSettings {
    pub fn sender(&self) -> Result<Mailbox, String> {
        let email = EmailAddress::parse(self.sender_email.clone())?;
        Ok(Mailbox::named(email, self.sender_name.clone()))
    }

    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout_milliseconds)
    }
}

/// Who receives the contact form alerts and how the two mails are titled.
#[derive(Debug, Deserialize, Clone)]
pub struct ContactSettings {
    pub admin_email: String,
    pub admin_name: String,
    pub admin_subject: String,
    pub copy_subject: String,
}

impl ContactSettings {
    pub fn admin(&self) -> Result<Mailbox, String> {
        let email = EmailAddress::parse(self.admin_email.clone())?;
        Ok(Mailbox::named(email, self.admin_name.clone()))
    }
}

/// Credentials of the third-party mailing list. Both `api_key` and `list_id` may be
/// left empty, in which case subscriptions answer with a configuration error.
#[derive(Debug, Deserialize, Clone)]
pub struct MailingListSettings {
    pub api_key: Secret<String>,
    pub list_id: String,
    pub base_url: Option<String>,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_milliseconds: u64,
}

impl MailingListSettings {
    pub fn is_configured(&self) -> bool {
        !self.api_key.expose_secret().trim().is_empty()
            && !self.list_id.trim().is_empty()
            && self.api_base_url().is_some()
    }

    /// An explicit `base_url` wins, otherwise the datacenter is read from the
    /// `-us6` style suffix of the api key.
    pub fn api_base_url(&self) -> Option<String> {
        if let Some(base_url) = &self.base_url {
            return Some(base_url.trim_end_matches('/').to_string());
        }
        let (_, datacenter) = self.api_key.expose_secret().rsplit_once('-')?;
        if datacenter.is_empty() || !datacenter.chars().all(|c| c.is_ascii_alphanumeric()) {
            return None;
        }
        Some(format!("https://{}.api.mailchimp.com/3.0", datacenter))
    }

    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout_milliseconds)
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir().expect("Faield to determine current directory");
    let config_dir = base_path.join("configuration");

    let environment: Environment = std::env::var("APP_ENV")
        .unwrap_or_else(|_| "local".into())
        // try to convert the "local" String into an Environment::Local enum
        .try_into()
        .expect("Failed to parse APP_ENV");

    let environment_file = format!("{}.yaml", environment.as_str());

    let settings = config::Config::builder()
        .add_source(config::File::from(config_dir.join("base.yaml")))
        .add_source(config::File::from(config_dir.join(environment_file)))
        // e.g. `APP_MAILING_LIST__API_KEY=...` sets `Settings.mailing_list.api_key`
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}
