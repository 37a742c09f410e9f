use crate::error::AnalyticsError;
use core_types::PredictionRecord;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

/// The column a prediction table is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Date,
    User,
    Stock,
    #[serde(alias = "predicted")]
    PredictedPrice,
    Confidence,
}

impl FromStr for SortKey {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "date" => Ok(SortKey::Date),
            "user" | "username" => Ok(SortKey::User),
            "stock" => Ok(SortKey::Stock),
            "predicted" | "predicted_price" | "predictedprice" => Ok(SortKey::PredictedPrice),
            "confidence" => Ok(SortKey::Confidence),
            _ => Err(AnalyticsError::InvalidOption {
                option: "sort key",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn toggled(&self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }

    /// Orients an ascending comparison. Ties stay ties.
    pub fn orient(&self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

impl FromStr for SortOrder {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(AnalyticsError::InvalidOption {
                option: "sort order",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortConfig {
    pub key: SortKey,
    pub order: SortOrder,
}

impl SortConfig {
    pub fn new(key: SortKey, order: SortOrder) -> Self {
        Self { key, order }
    }
}

fn compare_ascending(key: SortKey, a: &PredictionRecord, b: &PredictionRecord) -> Ordering {
    match key {
        SortKey::Date => a.prediction_date.cmp(&b.prediction_date),
        SortKey::User => a.username.to_lowercase().cmp(&b.username.to_lowercase()),
        SortKey::Stock => a.stock_symbol.to_lowercase().cmp(&b.stock_symbol.to_lowercase()),
        SortKey::PredictedPrice => a.predicted_price.cmp(&b.predicted_price),
        SortKey::Confidence => a.confidence_score.cmp(&b.confidence_score),
    }
}

/// Orders `items` by `compare`, breaking ties on input position.
///
/// The index tie-break is applied after `order` so equal keys keep their input
/// order in both directions.
pub(crate) fn stable_sort_by<'a, T, F>(
    items: Vec<&'a T>,
    order: SortOrder,
    compare: F,
) -> Vec<&'a T>
where
    F: Fn(&T, &T) -> Ordering,
{
    let mut indexed: Vec<(usize, &'a T)> = items.into_iter().enumerate().collect();
    indexed.sort_unstable_by(|(ia, a), (ib, b)| order.orient(compare(*a, *b)).then(ia.cmp(ib)));
    indexed.into_iter().map(|(_, item)| item).collect()
}

/// Returns the records ordered by `config`. The input is never modified.
pub fn sort_records<'a, I>(records: I, config: SortConfig) -> Vec<&'a PredictionRecord>
where
    I: IntoIterator<Item = &'a PredictionRecord>,
{
    let records: Vec<_> = records.into_iter().collect();
    stable_sort_by(records, config.order, |a, b| compare_ascending(config.key, a, b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::record;
    use core_types::ModelKind;
    use proptest::prelude::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn ids(records: &[&PredictionRecord]) -> Vec<i64> {
        records.iter().map(|r| r.id).collect()
    }

    #[test]
    fn date_sorts_by_instant() {
        let records = vec![
            record(3, "a", "TCS", dec!(1), None, ModelKind::Lstm, dec!(0.5)),
            record(1, "b", "TCS", dec!(1), None, ModelKind::Lstm, dec!(0.5)),
            record(2, "c", "TCS", dec!(1), None, ModelKind::Lstm, dec!(0.5)),
        ];
        let asc = sort_records(&records, SortConfig::new(SortKey::Date, SortOrder::Asc));
        assert_eq!(ids(&asc), vec![1, 2, 3]);
        let desc = sort_records(&records, SortConfig::new(SortKey::Date, SortOrder::Desc));
        assert_eq!(ids(&desc), vec![3, 2, 1]);
    }

    #[test]
    fn text_keys_ignore_case() {
        let records = vec![
            record(1, "zoe", "wipro", dec!(1), None, ModelKind::Lstm, dec!(0.5)),
            record(2, "Amit", "TCS", dec!(1), None, ModelKind::Lstm, dec!(0.5)),
            record(3, "bala", "Infosys", dec!(1), None, ModelKind::Lstm, dec!(0.5)),
        ];
        let by_user = sort_records(&records, SortConfig::new(SortKey::User, SortOrder::Asc));
        assert_eq!(ids(&by_user), vec![2, 3, 1]);
        let by_stock = sort_records(&records, SortConfig::new(SortKey::Stock, SortOrder::Asc));
        assert_eq!(ids(&by_stock), vec![3, 2, 1]);
    }

    #[test]
    fn ties_keep_input_order_in_both_directions() {
        let records = vec![
            record(1, "a", "TCS", dec!(200), None, ModelKind::Lstm, dec!(0.5)),
            record(2, "b", "TCS", dec!(100), None, ModelKind::Lstm, dec!(0.5)),
            record(3, "c", "TCS", dec!(200), None, ModelKind::Lstm, dec!(0.5)),
            record(4, "d", "TCS", dec!(100), None, ModelKind::Lstm, dec!(0.5)),
        ];
        let asc = SortConfig::new(SortKey::PredictedPrice, SortOrder::Asc);
        assert_eq!(ids(&sort_records(&records, asc)), vec![2, 4, 1, 3]);
        let desc = SortConfig::new(SortKey::PredictedPrice, SortOrder::Desc);
        let desc = sort_records(&records, desc);
        assert_eq!(ids(&desc), vec![1, 3, 2, 4]);
    }

    #[test]
    fn parses_original_key_names() {
        assert_eq!("predicted".parse::<SortKey>().unwrap(), SortKey::PredictedPrice);
        assert_eq!("DESC".parse::<SortOrder>().unwrap(), SortOrder::Desc);
        assert!("price".parse::<SortKey>().is_err());
        assert_eq!(SortOrder::Asc.toggled(), SortOrder::Desc);
    }

    proptest! {
        #[test]
        fn equal_keys_preserve_relative_order(
            confidences in proptest::collection::vec(0u32..4, 0..40),
            ascending in any::<bool>(),
        ) {
            let records: Vec<_> = confidences
                .iter()
                .enumerate()
                .map(|(i, c)| {
                    let confidence = Decimal::from(*c);
                    record(i as i64, "u", "TCS", dec!(1), None, ModelKind::Lstm, confidence)
                })
                .collect();
            let order = if ascending { SortOrder::Asc } else { SortOrder::Desc };
            let sorted = sort_records(&records, SortConfig::new(SortKey::Confidence, order));

            prop_assert_eq!(sorted.len(), records.len());
            for pair in sorted.windows(2) {
                let (a, b) = (pair[0], pair[1]);
                if a.confidence_score == b.confidence_score {
                    prop_assert!(a.id < b.id);
                } else {
                    let ordering = a.confidence_score.cmp(&b.confidence_score);
                    prop_assert_eq!(order.orient(ordering), Ordering::Less);
                }
            }
        }
    }
}
