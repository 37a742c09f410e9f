use core_types::{PredictionRecord, PredictionStatus};
use rust_decimal::Decimal;

/// Predictions within this many percent of the actual price are `Accurate`.
pub const ACCURACY_TOLERANCE_PCT: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

/// Classifies a prediction against its outcome.
///
/// An absent or zero actual price is `Pending`: there is no meaningful
/// outcome to compare against.
pub fn classify(predicted: Decimal, actual: Option<Decimal>) -> PredictionStatus {
    let Some(actual) = actual.filter(|a| !a.is_zero()) else {
        return PredictionStatus::Pending;
    };
    match relative_diff_pct(predicted, Some(actual)) {
        Some(diff) if diff.abs() <= ACCURACY_TOLERANCE_PCT => PredictionStatus::Accurate,
        Some(diff) if diff > Decimal::ZERO => PredictionStatus::Overestimated,
        Some(_) => PredictionStatus::Underestimated,
        // The percentage overflowed, so it is far outside the tolerance.
        None if predicted > actual => PredictionStatus::Overestimated,
        None => PredictionStatus::Underestimated,
    }
}

/// `(predicted - actual) / actual * 100`.
///
/// `None` when there is no usable actual price or the percentage does not fit in a `Decimal`.
pub fn relative_diff_pct(predicted: Decimal, actual: Option<Decimal>) -> Option<Decimal> {
    let actual = actual.filter(|a| !a.is_zero())?;
    predicted
        .checked_sub(actual)?
        .checked_div(actual)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
}

/// Status as a computed accessor on a record.
pub trait Classify {
    fn status(&self) -> PredictionStatus;
}

impl Classify for PredictionRecord {
    fn status(&self) -> PredictionStatus {
        classify(self.predicted_price, self.actual_price)
    }
}
