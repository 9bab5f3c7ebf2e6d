//! Database models shared across the shop repository.

use chrono::NaiveDateTime;

use crate::domain::types::TypeConstraintError;

pub mod client;
pub mod config;
pub mod order;
pub mod product;

/// ISO-8601 layout used for every timestamp column.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Renders a timestamp for a `TEXT` column.
pub fn format_timestamp(value: &NaiveDateTime) -> String {
    value.format(TIMESTAMP_FORMAT).to_string()
}

/// Parses a `TEXT` column written by [`format_timestamp`] or any other ISO-8601 writer.
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime, TypeConstraintError> {
    let trimmed = value.trim();
    NaiveDateTime::parse_from_str(trimmed, TIMESTAMP_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S%.f"))
        .map_err(|_| TypeConstraintError::InvalidValue(format!("invalid timestamp: {value}")))
}
