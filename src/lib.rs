// Roster analytics: athlete records, scholarship allocation against NCAA
// limits and multi-year forecasts

pub mod error;
pub mod models;
pub mod services;

pub use error::{Result, RosterError};
