use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalyticsError {
    #[error("Unrecognized value for option '{option}': '{value}'")]
    InvalidOption {
        option: &'static str,
        value: String,
    },

    #[error(transparent)]
    Core(#[from] core_types::CoreError),
}
