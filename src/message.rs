use std::fmt::{self, Write};

use anyhow::{bail, Error};
use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDateTime;

pub const DEFAULT_SUFFIX: &str = "_update";
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// A validated chrono strftime pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampFormat(String);

impl TimestampFormat {
    pub fn parse(pattern: &str) -> Result<Self, Error> {
        if pattern.is_empty() {
            bail!("Timestamp format must not be empty");
        }

        // Formatting with an invalid item panics, so reject it up front
        if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
            bail!("Invalid timestamp format '{pattern}'");
        }

        // Offset items (`%z`, `%Z`, ...) parse fine but cannot format a local
        // wall-clock time, and `format!` panics on that
        let mut trial = String::new();
        if write!(trial, "{}", NaiveDateTime::default().format(pattern)).is_err() {
            bail!("Timestamp format '{pattern}' needs a time zone, which local timestamps lack");
        }

        Ok(Self(pattern.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TimestampFormat {
    fn default() -> Self {
        Self(DEFAULT_TIMESTAMP_FORMAT.to_string())
    }
}

/// `<timestamp><suffix>`, built fresh for every run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitMessage(String);

impl CommitMessage {
    pub fn build(at: NaiveDateTime, format: &TimestampFormat, suffix: &str) -> Self {
        Self(format!("{}{suffix}", at.format(format.as_str())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommitMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
