use chrono::{Duration, TimeZone, Utc};
use core_types::{ModelKind, PredictionRecord};
use rust_decimal::Decimal;

/// Builds a record dated `id` hours after a fixed origin.
pub(crate) fn record(
    id: i64,
    username: &str,
    stock_symbol: &str,
    predicted_price: Decimal,
    actual_price: Option<Decimal>,
    model_used: ModelKind,
    confidence_score: Decimal,
) -> PredictionRecord {
    let origin = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
    PredictionRecord {
        id,
        user_id: None,
        username: username.to_string(),
        stock_symbol: stock_symbol.to_string(),
        predicted_price,
        actual_price,
        model_used,
        confidence_score,
        prediction_date: origin + Duration::hours(id),
    }
}
