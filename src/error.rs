use thiserror::Error;

use crate::models::Gender;

/// Errors raised by roster handling and forecasting
#[derive(Error, Debug)]
pub enum RosterError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Invalid {field}: {reason}")]
    InvalidField { field: String, reason: String },

    #[error("Invalid mark: {0}")]
    InvalidMark(String),

    #[error("Athlete not found: {0}")]
    AthleteNotFound(String),

    #[error("'{query}' matches {matches} athletes, use the athlete id instead")]
    AmbiguousAthlete { query: String, matches: usize },

    #[error("Athlete with id {0} already exists")]
    DuplicateAthlete(String),

    #[error("{gender} scholarship limit exceeded: {requested:.2} equivalencies requested, limit is {limit:.2}")]
    ScholarshipLimitExceeded {
        gender: Gender,
        requested: f64,
        limit: f64,
    },

    #[error("Invalid configuration '{name}': {reason}")]
    InvalidConfig { name: String, reason: String },
}

impl RosterError {
    pub fn invalid_field(field: impl Into<String>, reason: impl Into<String>) -> Self {
        RosterError::InvalidField {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_config(name: impl Into<String>, reason: impl Into<String>) -> Self {
        RosterError::InvalidConfig {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RosterError>;
