use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to write CSV record: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to flush CSV output: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV output is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    #[error("Date format '{0}' could not be applied")]
    DateFormat(String),
}
