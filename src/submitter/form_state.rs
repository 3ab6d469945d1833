use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub kind: BannerKind,
    pub text: String,
}

/// What a form on the page currently shows: the entered values, the inline error
/// label next to each field and the alert banner above the form.
#[derive(Debug, Default, Clone)]
pub struct FormState {
    values: Vec<(String, String)>,
    labels: BTreeMap<String, String>,
    banner: Option<Banner>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: &str, value: &str) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: &str, value: &str) {
        match self.values.iter_mut().find(|(f, _)| f == field) {
            Some((_, v)) => *v = value.to_string(),
            None => self.values.push((field.to_string(), value.to_string())),
        }
    }

    /// Ticks a checkbox; browsers post it as `on`.
    pub fn check(&mut self, field: &str) {
        self.set(field, "on");
    }

    pub fn value(&self, field: &str) -> &str {
        self.values
            .iter()
            .find(|(f, _)| f == field)
            .map(|(_, v)| v.as_str())
            .unwrap_or_default()
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.values
    }

    pub fn error_label(&self, field: &str) -> Option<&str> {
        self.labels.get(field).map(String::as_str)
    }

    pub fn error_labels(&self) -> &BTreeMap<String, String> {
        &self.labels
    }

    /// Inserts the label next to `field`, or updates its text if already there.
    pub fn set_error_label(&mut self, field: &str, message: &str) {
        self.labels.insert(field.to_string(), message.to_string());
    }

    pub fn clear_error_labels(&mut self) {
        self.labels.clear();
    }

    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    pub fn show_banner(&mut self, kind: BannerKind, text: &str) {
        self.banner = Some(Banner {
            kind,
            text: text.to_string(),
        });
    }

    /// Empties every field and unticks checkboxes, like `form.reset()`.
    /// Labels and banner stay on screen.
    pub fn reset(&mut self) {
        self.values.clear();
    }
}
