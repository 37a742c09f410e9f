//! # Stockcast Core Types
//!
//! The shared vocabulary of the workspace: prediction and user records as the
//! prediction service delivers them, the enumerations derived from them, and
//! the JSON envelopes they arrive in.

pub mod enums;
pub mod error;
pub mod payloads;
pub mod structs;
pub mod timestamp;

// Re-export the core types to provide a clean public API.
pub use enums::{ModelKind, PredictionStatus};
pub use error::CoreError;
pub use payloads::{
    HistoryEntry, HistoryResponse, PredictionsResponse, StatsResponse, UsersResponse, Validate,
    retain_valid,
};
pub use structs::{PredictionRecord, UserRecord};
