use crate::enums::ModelKind;
use crate::error::CoreError;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single prediction made by a user against a stock symbol.
///
/// Records are owned by the fetch layer and read-only to the analytics code.
/// `actual_price` is `None` until the outcome resolves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    pub username: String,
    pub stock_symbol: String,
    pub predicted_price: Decimal,
    #[serde(default)]
    pub actual_price: Option<Decimal>,
    pub model_used: ModelKind,
    pub confidence_score: Decimal,
    #[serde(with = "crate::timestamp")]
    pub prediction_date: DateTime<Utc>,
}

impl PredictionRecord {
    /// The actual price, if the prediction has a meaningful resolved outcome.
    ///
    /// A zero actual price is not a resolved outcome and is reported as `None`.
    pub fn resolved_price(&self) -> Option<Decimal> {
        self.actual_price.filter(|actual| !actual.is_zero())
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved_price().is_some()
    }

    /// Checks the invariants the analytics code relies on.
    pub fn validate(&self) -> Result<(), CoreError> {
        let fail = |reason: &str| -> Result<(), CoreError> {
            Err(CoreError::InvalidRecord(self.id, reason.to_string()))
        };

        if self.username.trim().is_empty() {
            return fail("username is empty");
        }
        if self.stock_symbol.trim().is_empty() {
            return fail("stock symbol is empty");
        }
        if self.predicted_price <= Decimal::ZERO {
            return fail("predicted price must be positive");
        }
        if matches!(self.actual_price, Some(actual) if actual < Decimal::ZERO) {
            return fail("actual price must not be negative");
        }
        if self.confidence_score < Decimal::ZERO || self.confidence_score > Decimal::ONE {
            return fail("confidence score must be within [0, 1]");
        }
        Ok(())
    }
}

/// An account as listed by the admin users endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub is_admin: bool,
    pub prediction_count: u64,
    #[serde(with = "crate::timestamp")]
    pub created_at: DateTime<Utc>,
}

impl UserRecord {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.username.trim().is_empty() {
            return Err(CoreError::InvalidRecord(self.id, "username is empty".to_string()));
        }
        Ok(())
    }
}
