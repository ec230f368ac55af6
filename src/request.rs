//! Payload of an append request and the rules that turn it into a [`LogEntry`].
//!
//! Custom values are only accepted together with a syntactically valid email. Empty strings count
//! as missing fields. Name and location are resolved independently: each one uses the custom
//! value when both it and the email are present, and falls back to a random table pick otherwise.

use std::sync::OnceLock;

use rand::Rng;
use regex::Regex;
use serde::{
    Deserialize,
    Serialize,
};

use crate::{
    entry::{
        LogEntry,
        Timestamp,
    },
    error::AppError,
    tables::{
        random_appliance,
        random_location,
    },
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppendRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl AppendRequest {
    fn custom_name(&self) -> Option<&str> {
        present(&self.custom_name)
    }

    fn custom_location(&self) -> Option<&str> {
        present(&self.custom_location)
    }

    fn email(&self) -> Option<&str> {
        present(&self.email)
    }

    /// Rejects custom values that are not accompanied by a valid email
    pub fn validate(&self) -> Result<(), AppError> {
        let wants_custom = self.custom_name().is_some() || self.custom_location().is_some();
        let email_ok = self.email().is_some_and(is_valid_email);
        if wants_custom && !email_ok {
            return Err(AppError::InvalidEmail);
        }
        Ok(())
    }

    /// Builds the entry this request asks for. Call [`AppendRequest::validate`] first.
    pub fn resolve<R: Rng + ?Sized>(&self, rng: &mut R, timestamp: Timestamp) -> LogEntry {
        let has_email = self.email().is_some();
        let name = match self.custom_name() {
            Some(name) if has_email => name,
            _ => random_appliance(rng),
        };
        let location = match self.custom_location() {
            Some(location) if has_email => location,
            _ => random_location(rng),
        };
        LogEntry::new(name, location, timestamp)
    }
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

/// Non-whitespace, `@`, non-whitespace, `.`, non-whitespace
pub fn is_valid_email(email: &str) -> bool {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"))
        .is_match(email)
}
