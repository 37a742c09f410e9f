use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load settings: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid setting '{field}': {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}
