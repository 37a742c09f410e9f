use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Invalid input for {0}: {1}")]
    InvalidInput(String, String),

    #[error("Invalid record {0}: {1}")]
    InvalidRecord(i64, String),
}

impl CoreError {
    pub(crate) fn invalid_input(field: &str, value: &str) -> Self {
        CoreError::InvalidInput(field.to_string(), value.to_string())
    }
}
