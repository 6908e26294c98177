//! Shape checks for the review API response.

use serde_json::Value;
use tracing::{debug, error};

use crate::error::{HomeworkError, Result, json_kind};

pub const HOMEWORKS_KEY: &str = "homeworks";
pub const CURRENT_DATE_KEY: &str = "current_date";

/// Check the decoded response and return its `homeworks` list.
///
/// Order: object, key present, list, non-empty. Each failure is logged at
/// error severity before it is returned.
pub fn check_response(response: &Value) -> Result<&[Value]> {
    let Some(object) = response.as_object() else {
        let found = json_kind(response);
        error!("API response is {}, expected an object", found);
        return Err(HomeworkError::NotAnObject { found });
    };

    let Some(homeworks) = object.get(HOMEWORKS_KEY) else {
        error!("API response has no '{}' key: {}", HOMEWORKS_KEY, response);
        return Err(HomeworkError::MissingKey(HOMEWORKS_KEY));
    };

    let Some(list) = homeworks.as_array() else {
        let found = json_kind(homeworks);
        error!("'{}' in API response is {}, expected a list", HOMEWORKS_KEY, found);
        return Err(HomeworkError::HomeworksNotAList { found });
    };

    if list.is_empty() {
        error!("'{}' list in API response is empty", HOMEWORKS_KEY);
        return Err(HomeworkError::EmptyHomeworks);
    }

    Ok(list)
}

/// Server-reported `current_date`, if present and numeric.
///
/// Fractional timestamps are truncated to whole seconds.
pub fn current_date(response: &Value) -> Option<i64> {
    let value = response.get(CURRENT_DATE_KEY)?;
    let date = value
        .as_i64()
        .or_else(|| value.as_f64().map(|secs| secs.trunc() as i64));
    if date.is_none() {
        debug!("Ignoring non-numeric '{}': {}", CURRENT_DATE_KEY, value);
    }
    date
}
