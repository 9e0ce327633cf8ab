use chrono::NaiveDate;
use thiserror::Error;

/// The only accepted publish date layout, on the command line, in JSON bodies
/// and in query parameters.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid {field} '{value}': expected YYYY-MM-DD")]
pub struct DateError {
    pub field: String,
    pub value: String,
}

/// Parse a `YYYY-MM-DD` date supplied for `field`.
pub fn parse_date(field: &str, value: &str) -> Result<NaiveDate, DateError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| DateError {
        field: field.to_string(),
        value: value.to_string(),
    })
}
