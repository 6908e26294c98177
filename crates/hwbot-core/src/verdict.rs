//! Status → human-readable verdict translation.

use serde_json::Value;
use tracing::error;

use crate::error::{HomeworkError, Result};
use crate::types::{HomeworkRecord, HomeworkStatus};

/// Maps review statuses to verdict sentences.
#[derive(Debug, Clone, Copy, Default)]
pub struct VerdictTable;

fn default_verdict(status: HomeworkStatus) -> &'static str {
    match status {
        HomeworkStatus::Approved => {
            "The work has been reviewed: the reviewer liked everything. Hooray!"
        }
        HomeworkStatus::Reviewing => "The work has been taken for review by the reviewer.",
        HomeworkStatus::Rejected => "The work has been reviewed: the reviewer has comments.",
    }
}

impl VerdictTable {
    /// Verdict for a raw status string, or `None` if the status is unknown.
    pub fn verdict(&self, status: &str) -> Option<&'static str> {
        status.parse::<HomeworkStatus>().ok().map(default_verdict)
    }

    /// Build the notification text for one raw homework record.
    ///
    /// Pure function of its input: the same record always yields the same
    /// message.
    pub fn parse_status(&self, homework: &Value) -> Result<String> {
        let record = extract_record(homework)?;
        let verdict = self.verdict(&record.status).ok_or_else(|| {
            error!(
                "Status '{}' is not one of {:?}",
                record.status,
                HomeworkStatus::ALL.map(HomeworkStatus::as_str)
            );
            HomeworkError::UnknownStatus(record.status.clone())
        })?;
        Ok(format_message(&record.name, verdict))
    }
}

/// Pull `homework_name` and `status` out of a raw record.
///
/// Both must be strings; the name is checked first.
pub fn extract_record(homework: &Value) -> Result<HomeworkRecord> {
    let name = string_field(homework, "homework_name")?;
    let status = string_field(homework, "status")?;
    Ok(HomeworkRecord {
        name: name.to_string(),
        status: status.to_string(),
    })
}

fn string_field<'a>(homework: &'a Value, key: &'static str) -> Result<&'a str> {
    homework.get(key).and_then(Value::as_str).ok_or_else(|| {
        error!("Field '{}' not found in homework record {}", key, homework);
        HomeworkError::MissingField(key)
    })
}

pub fn format_message(name: &str, verdict: &str) -> String {
    format!("Changed review status for homework \"{name}\". {verdict}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn approved_message_format() {
        let table = VerdictTable::default();
        let msg = table
            .parse_status(&json!({"homework_name": "X", "status": "approved"}))
            .unwrap();
        assert_eq!(
            msg,
            "Changed review status for homework \"X\". \
             The work has been reviewed: the reviewer liked everything. Hooray!"
        );
    }

    #[test]
    fn every_known_status_has_a_verdict() {
        let table = VerdictTable::default();
        for status in HomeworkStatus::ALL {
            assert!(table.verdict(status.as_str()).is_some(), "{status}");
        }
        assert!(table.verdict("pending").is_none());
    }

    #[test]
    fn verdicts_match_statuses() {
        let table = VerdictTable;
        assert_eq!(
            table.verdict("reviewing"),
            Some("The work has been taken for review by the reviewer.")
        );
        assert_eq!(
            table.verdict("rejected"),
            Some("The work has been reviewed: the reviewer has comments.")
        );
        assert_eq!(table.verdict("Rejected"), None);
    }

    #[test]
    fn unknown_status_fails() {
        let table = VerdictTable::default();
        let err = table
            .parse_status(&json!({"homework_name": "X", "status": "lost"}))
            .unwrap_err();
        assert!(matches!(err, HomeworkError::UnknownStatus(ref s) if s == "lost"));
    }

    #[test]
    fn missing_name_short_circuits_before_status() {
        let table = VerdictTable::default();
        let err = table.parse_status(&json!({"status": "lost"})).unwrap_err();
        assert!(matches!(err, HomeworkError::MissingField("homework_name")));
    }

    #[test]
    fn missing_or_non_string_status_is_missing_field() {
        let table = VerdictTable::default();
        let err = table
            .parse_status(&json!({"homework_name": "X"}))
            .unwrap_err();
        assert!(matches!(err, HomeworkError::MissingField("status")));

        let err = table
            .parse_status(&json!({"homework_name": "X", "status": 3}))
            .unwrap_err();
        assert!(matches!(err, HomeworkError::MissingField("status")));
    }

    #[test]
    fn record_that_is_not_an_object_is_missing_field() {
        let table = VerdictTable::default();
        let err = table.parse_status(&json!("approved")).unwrap_err();
        assert!(matches!(err, HomeworkError::MissingField("homework_name")));
    }

    #[test]
    fn translation_is_idempotent() {
        let table = VerdictTable::default();
        let record = json!({"homework_name": "hw_python_oop", "status": "rejected", "id": 7});
        let first = table.parse_status(&record).unwrap();
        let second = table.parse_status(&record).unwrap();
        assert_eq!(first, second);
    }
}
