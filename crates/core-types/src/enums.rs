use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The model that produced a prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    Lstm,
    Linear,
}

impl ModelKind {
    pub const ALL: [ModelKind; 2] = [ModelKind::Lstm, ModelKind::Linear];

    /// The identifier used by the prediction service (`lstm`, `linear`).
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelKind::Lstm => "lstm",
            ModelKind::Linear => "linear",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lstm" => Ok(ModelKind::Lstm),
            "linear" => Ok(ModelKind::Linear),
            _ => Err(CoreError::invalid_input("model", s)),
        }
    }
}

/// The derived accuracy classification of a prediction.
///
/// This is never stored on a record. It is always recomputed from the
/// predicted and actual prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictionStatus {
    Pending,
    Accurate,
    Overestimated,
    Underestimated,
}

impl PredictionStatus {
    pub const ALL: [PredictionStatus; 4] = [
        PredictionStatus::Pending,
        PredictionStatus::Accurate,
        PredictionStatus::Overestimated,
        PredictionStatus::Underestimated,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PredictionStatus::Pending => "pending",
            PredictionStatus::Accurate => "accurate",
            PredictionStatus::Overestimated => "overestimated",
            PredictionStatus::Underestimated => "underestimated",
        }
    }

    /// The capitalized label shown in tables and exports (e.g. `Accurate`).
    pub fn label(&self) -> &'static str {
        match self {
            PredictionStatus::Pending => "Pending",
            PredictionStatus::Accurate => "Accurate",
            PredictionStatus::Overestimated => "Overestimated",
            PredictionStatus::Underestimated => "Underestimated",
        }
    }
}

impl fmt::Display for PredictionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PredictionStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(PredictionStatus::Pending),
            "accurate" => Ok(PredictionStatus::Accurate),
            "overestimated" => Ok(PredictionStatus::Overestimated),
            "underestimated" => Ok(PredictionStatus::Underestimated),
            _ => Err(CoreError::invalid_input("status", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_parses_case_insensitively() {
        assert_eq!("LSTM".parse::<ModelKind>().unwrap(), ModelKind::Lstm);
        assert_eq!(" linear ".parse::<ModelKind>().unwrap(), ModelKind::Linear);
        assert!("arima".parse::<ModelKind>().is_err());
    }

    #[test]
    fn status_labels_are_capitalized() {
        let labels: Vec<_> = PredictionStatus::ALL.iter().map(|s| s.label()).collect();
        assert_eq!(labels, ["Pending", "Accurate", "Overestimated", "Underestimated"]);
    }

    #[test]
    fn unknown_status_names_the_field() {
        let err = "late".parse::<PredictionStatus>().unwrap_err();
        assert_eq!(err, CoreError::InvalidInput("status".into(), "late".into()));
    }
}
