use thiserror::Error;

use super::raw_input::RawInput;

/// How a failing rule reports itself to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingMessage {
    /// A fixed sentence, whichever fields are missing.
    Fixed(&'static str),
    /// The prefix followed by the comma-separated missing field names.
    Listing(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredRule {
    pub fields: Vec<&'static str>,
    pub message: MissingMessage,
}

impl RequiredRule {
    pub fn fixed(fields: &[&'static str], message: &'static str) -> Self {
        Self {
            fields: fields.to_vec(),
            message: MissingMessage::Fixed(message),
        }
    }

    pub fn listing(fields: &[&'static str], prefix: &'static str) -> Self {
        Self {
            fields: fields.to_vec(),
            message: MissingMessage::Listing(prefix),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub missing: Vec<String>,
    pub message: String,
}

pub fn missing_fields(input: &RawInput, fields: &[&str]) -> Vec<String> {
    fields
        .iter()
        .filter(|field| input.is_missing(field))
        .map(|field| field.to_string())
        .collect()
}

/// Checks the rules in order; the first rule with missing fields decides the
/// error message.
pub fn validate(input: &RawInput, rules: &[RequiredRule]) -> Result<(), ValidationError> {
    for rule in rules {
        let missing = missing_fields(input, &rule.fields);
        if missing.is_empty() {
            continue;
        }

        let message = match rule.message {
            MissingMessage::Fixed(message) => message.to_string(),
            MissingMessage::Listing(prefix) => format!("{}{}", prefix, missing.join(", ")),
        };

        return Err(ValidationError { missing, message });
    }

    Ok(())
}
