use hwbot_proto::DeliveryError;
use thiserror::Error;

/// Everything that can stop a poll iteration.
///
/// Under the default policy every variant is fatal once it reaches the poll
/// loop. [`HomeworkError::is_transient`] marks the ones a retry budget may
/// absorb.
#[derive(Error, Debug)]
pub enum HomeworkError {
    /// One or more required secrets are empty.
    #[error("missing required credentials: {}", .0.join(", "))]
    MissingCredentials(Vec<&'static str>),

    /// Configuration file or value is invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// The review API could not be reached.
    #[error("request to review API failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The review API answered with something other than 200.
    #[error("review API responded with {status} != 200")]
    ApiStatus { status: u16 },

    /// The 200 body was not valid JSON.
    #[error("review API body is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    /// The decoded response is not a JSON object.
    #[error("response is {found}, expected an object")]
    NotAnObject { found: &'static str },

    /// A required key is absent from the response.
    #[error("response has no '{0}' key")]
    MissingKey(&'static str),

    /// `homeworks` is present but is not an array.
    #[error("'homeworks' is {found}, expected a list")]
    HomeworksNotAList { found: &'static str },

    /// `homeworks` is an empty array.
    #[error("'homeworks' list is empty")]
    EmptyHomeworks,

    /// A homework record lacks a required string field.
    #[error("homework record has no '{0}' field")]
    MissingField(&'static str),

    /// A homework status outside the verdict table.
    #[error("unknown homework status '{0}'")]
    UnknownStatus(String),

    /// The notification could not be sent.
    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}

impl HomeworkError {
    /// Whether a bounded retry may reasonably succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            HomeworkError::Transport(_) => true,
            HomeworkError::ApiStatus { status } => *status == 429 || (500..600).contains(status),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, HomeworkError>;

/// Name of a JSON value's type, for shape error messages.
pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "a list",
        serde_json::Value::Object(_) => "an object",
    }
}
