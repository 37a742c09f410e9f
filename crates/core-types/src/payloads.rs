//! JSON envelopes returned by the prediction service.
//!
//! These mirror the backend endpoints one-to-one. Converting them into
//! records is the last step of the fetch layer; `retain_valid` is its
//! validation pass.

use crate::enums::ModelKind;
use crate::error::CoreError;
use crate::structs::{PredictionRecord, UserRecord};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// `GET /api/history`: the signed-in user's own predictions.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryResponse {
    pub history: Vec<HistoryEntry>,
}

/// A history row. The endpoint omits the owner, since it is always the caller.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryEntry {
    pub id: i64,
    pub stock_symbol: String,
    pub predicted_price: Decimal,
    #[serde(default)]
    pub actual_price: Option<Decimal>,
    pub model_used: ModelKind,
    pub confidence_score: Decimal,
    #[serde(with = "crate::timestamp")]
    pub prediction_date: DateTime<Utc>,
}

impl HistoryResponse {
    /// Attaches the session's username to every history row.
    pub fn into_records(self, username: &str) -> Vec<PredictionRecord> {
        self.history
            .into_iter()
            .map(|entry| PredictionRecord {
                id: entry.id,
                user_id: None,
                username: username.to_string(),
                stock_symbol: entry.stock_symbol,
                predicted_price: entry.predicted_price,
                actual_price: entry.actual_price,
                model_used: entry.model_used,
                confidence_score: entry.confidence_score,
                prediction_date: entry.prediction_date,
            })
            .collect()
    }
}

/// `GET /api/admin/predictions`: every user's predictions.
#[derive(Debug, Clone, Deserialize)]
pub struct PredictionsResponse {
    pub predictions: Vec<PredictionRecord>,
}

/// `GET /api/admin/users`.
#[derive(Debug, Clone, Deserialize)]
pub struct UsersResponse {
    pub users: Vec<UserRecord>,
}

/// `GET /api/stats`: server-side counters shown on the admin dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsResponse {
    pub total_users: u64,
    pub total_predictions: u64,
    pub average_accuracy: Decimal,
}

/// Records that can be checked before they reach the analytics layer.
pub trait Validate {
    fn validate(&self) -> Result<(), CoreError>;
}

impl Validate for PredictionRecord {
    fn validate(&self) -> Result<(), CoreError> {
        PredictionRecord::validate(self)
    }
}

impl Validate for UserRecord {
    fn validate(&self) -> Result<(), CoreError> {
        UserRecord::validate(self)
    }
}

/// Drops records that break the data-model invariants and returns how many were dropped.
pub fn retain_valid<T: Validate>(records: &mut Vec<T>) -> usize {
    let before = records.len();
    records.retain(|record| match record.validate() {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Dropping invalid record.");
            false
        }
    });
    before - records.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const ADMIN_PAYLOAD: &str = r#"{
        "predictions": [
            {"id": 7, "user_id": 2, "username": "asha", "stock_symbol": "TCS",
             "predicted_price": 3450.5, "actual_price": null, "model_used": "lstm",
             "confidence_score": 0.82, "prediction_date": "2024-03-01T09:15:00.123456"},
            {"id": 8, "user_id": 3, "username": "ravi", "stock_symbol": "WIPRO",
             "predicted_price": 480, "actual_price": 470.25, "model_used": "linear",
             "confidence_score": 0.6, "prediction_date": "2024-03-02T10:00:00"}
        ]
    }"#;

    #[test]
    fn parses_admin_predictions() {
        let response: PredictionsResponse = serde_json::from_str(ADMIN_PAYLOAD).unwrap();
        assert_eq!(response.predictions.len(), 2);

        let first = &response.predictions[0];
        assert_eq!(first.predicted_price, dec!(3450.5));
        assert_eq!(first.actual_price, None);
        assert_eq!(first.model_used, ModelKind::Lstm);

        let second = &response.predictions[1];
        assert_eq!(second.actual_price, Some(dec!(470.25)));
        assert_eq!(second.user_id, Some(3));
    }

    #[test]
    fn history_rows_take_the_session_username() {
        let payload = r#"{"history": [
            {"id": 1, "stock_symbol": "INFOSYS", "predicted_price": 1500,
             "model_used": "linear", "confidence_score": 0.7,
             "prediction_date": "2024-01-05T15:45:00"}
        ]}"#;
        let response: HistoryResponse = serde_json::from_str(payload).unwrap();
        let records = response.into_records("meera");

        assert_eq!(records[0].username, "meera");
        assert_eq!(records[0].actual_price, None);
    }

    #[test]
    fn retain_valid_drops_broken_records() {
        let mut response: PredictionsResponse = serde_json::from_str(ADMIN_PAYLOAD).unwrap();
        response.predictions[0].confidence_score = dec!(1.5);
        response.predictions[1].predicted_price = Decimal::ZERO;
        response.predictions.push(response.predictions[1].clone());
        response.predictions[2].predicted_price = dec!(10);

        let dropped = retain_valid(&mut response.predictions);

        assert_eq!(dropped, 2);
        assert_eq!(response.predictions.len(), 1);
        assert_eq!(response.predictions[0].predicted_price, dec!(10));
    }

    #[test]
    fn zero_actual_price_is_not_resolved() {
        let mut response: PredictionsResponse = serde_json::from_str(ADMIN_PAYLOAD).unwrap();
        let record = &mut response.predictions[1];
        assert!(record.is_resolved());

        record.actual_price = Some(Decimal::ZERO);
        assert!(!record.is_resolved());
        assert!(record.validate().is_ok());
    }
}
