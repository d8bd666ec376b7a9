use kupon_core::Date;

use crate::error::{AnalyticsError, AnalyticsResult};

/// Parses an exchange date field, naming the field on failure.
pub fn parse_date(field: &str, value: &str) -> AnalyticsResult<Date> {
    Date::parse(value).map_err(|_| AnalyticsError::DateParse {
        field: field.to_string(),
        value: value.to_string(),
    })
}
