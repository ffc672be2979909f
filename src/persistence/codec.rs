use crate::domain::Task;
use thiserror::Error;

/// Persisted data that could not be decoded
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed task list: {0}")]
    Tasks(#[source] serde_json::Error),
    #[error("malformed appearance flag: {0}")]
    Appearance(#[source] serde_json::Error),
}

/// Serialize the full task sequence
pub fn encode_tasks(tasks: &[Task]) -> serde_json::Result<String> {
    serde_json::to_string(tasks)
}

/// Parse a task sequence written by `encode_tasks`
pub fn decode_tasks(raw: &str) -> Result<Vec<Task>, DecodeError> {
    serde_json::from_str(raw).map_err(DecodeError::Tasks)
}

/// Serialize the dark-mode flag as a JSON boolean
pub fn encode_dark_mode(dark: bool) -> String {
    if dark { "true" } else { "false" }.to_string()
}

pub fn decode_dark_mode(raw: &str) -> Result<bool, DecodeError> {
    serde_json::from_str(raw).map_err(DecodeError::Appearance)
}
