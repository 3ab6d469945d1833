use std::collections::HashMap;
use std::str::FromStr;

use validator::validate_email;

use crate::domain::FormSubmission;

/// A named check applied to one field's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Trim,
    Required,
    Email,
    AlphaSpaces,
    AlphaNumericSpaces,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RuleSetError {
    #[error("`{rule}` is not a known validation rule (field `{field}`).")]
    UnknownRule { field: String, rule: String },
}

impl FromStr for Rule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "trim" => Ok(Rule::Trim),
            "required" => Ok(Rule::Required),
            "email" => Ok(Rule::Email),
            "alpha_spaces" => Ok(Rule::AlphaSpaces),
            "alpha_numeric_spaces" => Ok(Rule::AlphaNumericSpaces),
            other => Err(other.to_string()),
        }
    }
}

impl Rule {
    /// Returns the error message for `label` when `value` breaks the rule.
    /// `Trim` never fails, it rewrites the value in place.
    fn apply(&self, label: &str, value: &mut String) -> Result<(), String> {
        match self {
            Rule::Trim => {
                let trimmed = value.trim();
                if trimmed.len() != value.len() {
                    *value = trimmed.to_string();
                }
                Ok(())
            }
            Rule::Required if value.is_empty() => {
                Err(format!("The {} field is required.", label))
            }
            Rule::Required => Ok(()),
            // shape rules only look at values that are present
            _ if value.is_empty() => Ok(()),
            Rule::Email if !validate_email(value.as_str()) => Err(format!(
                "The {} field must contain a valid email address.",
                label
            )),
            Rule::AlphaSpaces if !value.chars().all(|c| c.is_alphabetic() || c == ' ') => {
                Err(format!(
                    "The {} field may only contain alphabetical characters and spaces.",
                    label
                ))
            }
            Rule::AlphaNumericSpaces
                if !value.chars().all(|c| c.is_alphanumeric() || c == ' ') =>
            {
                Err(format!(
                    "The {} field may only contain alpha-numeric characters and spaces.",
                    label
                ))
            }
            Rule::Email | Rule::AlphaSpaces | Rule::AlphaNumericSpaces => Ok(()),
        }
    }
}

#[derive(Debug, Clone)]
struct FieldRules {
    field: String,
    label: String,
    rules: Vec<Rule>,
}

/// Ordered per-field rule lists, parsed from `(field, label, "trim|required|email")`.
#[derive(Debug, Clone)]
pub struct RuleSet {
    fields: Vec<FieldRules>,
}

impl RuleSet {
    pub fn parse(definitions: &[(&str, &str, &str)]) -> Result<Self, RuleSetError> {
        let fields = definitions
            .iter()
            .map(|(field, label, rules)| {
                let rules = rules
                    .split('|')
                    .map(str::trim)
                    .filter(|r| !r.is_empty())
                    .map(|r| {
                        r.parse::<Rule>().map_err(|rule| RuleSetError::UnknownRule {
                            field: field.to_string(),
                            rule,
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(FieldRules {
                    field: field.to_string(),
                    label: label.to_string(),
                    rules,
                })
            })
            .collect::<Result<Vec<_>, RuleSetError>>()?;
        Ok(Self { fields })
    }

    /// Keeps only the listed rules of every field, e.g. the `required`/`email`
    /// subset a browser checks before posting.
    pub fn restricted_to(&self, keep: &[Rule]) -> Self {
        let fields = self
            .fields
            .iter()
            .map(|f| FieldRules {
                rules: f.rules.iter().copied().filter(|r| keep.contains(r)).collect(),
                ..f.clone()
            })
            .collect();
        Self { fields }
    }

    pub fn validate(&self, submission: &FormSubmission) -> ValidationResult {
        let mut outcomes = Vec::with_capacity(self.fields.len());
        let mut values = HashMap::with_capacity(self.fields.len());

        for field_rules in &self.fields {
            let mut value = submission
                .get(&field_rules.field)
                .unwrap_or_default()
                .to_string();
            let outcome = field_rules
                .rules
                .iter()
                .try_for_each(|rule| rule.apply(&field_rules.label, &mut value));

            outcomes.push(FieldOutcome {
                field: field_rules.field.clone(),
                outcome,
            });
            values.insert(field_rules.field.clone(), value);
        }

        ValidationResult { outcomes, values }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldOutcome {
    pub field: String,
    pub outcome: Result<(), String>,
}

#[derive(Debug, Clone)]
pub struct ValidationResult {
    outcomes: Vec<FieldOutcome>,
    values: HashMap<String, String>,
}

impl ValidationResult {
    pub fn has_failures(&self) -> bool {
        self.outcomes.iter().any(|o| o.outcome.is_err())
    }

    /// Failed fields with their message, in rule set order.
    pub fn failures(&self) -> impl Iterator<Item = (&str, &str)> {
        self.outcomes.iter().filter_map(|o| match &o.outcome {
            Err(message) => Some((o.field.as_str(), message.as_str())),
            Ok(()) => None,
        })
    }

    pub fn outcomes(&self) -> &[FieldOutcome] {
        &self.outcomes
    }

    /// The normalized value of a validated field, empty when it was not posted.
    pub fn value(&self, field: &str) -> &str {
        self.values.get(field).map(String::as_str).unwrap_or_default()
    }
}
