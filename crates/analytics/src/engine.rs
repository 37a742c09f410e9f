use crate::classifier::{Classify, relative_diff_pct};
use crate::report::{AggregateReport, StockSummary};
use core_types::PredictionRecord;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// A stateless calculator for deriving summary statistics from prediction records.
#[derive(Debug, Default)]
pub struct AnalyticsEngine {}

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// The main entry point for summarizing a record sequence.
    ///
    /// # Arguments
    ///
    /// * `records` - Any record sequence: a full snapshot or a filtered view of one.
    ///
    /// # Returns
    ///
    /// An `AggregateReport`. Empty input yields a zeroed-out report.
    pub fn summarize<'a, I>(&self, records: I) -> AggregateReport
    where
        I: IntoIterator<Item = &'a PredictionRecord>,
    {
        let records: Vec<&PredictionRecord> = records.into_iter().collect();
        let mut report = AggregateReport::new();

        if records.is_empty() {
            return report;
        }

        self.calculate_counts(&records, &mut report);
        self.calculate_rates(&records, &mut report);
        self.calculate_stock_breakdown(&records, &mut report);

        tracing::debug!(
            total = report.total,
            completed = report.completed,
            stocks = report.by_stock.len(),
            "Summarized prediction records."
        );
        report
    }

    /// Counts records per status and per model.
    fn calculate_counts(&self, records: &[&PredictionRecord], report: &mut AggregateReport) {
        report.total = records.len();

        for record in records {
            report.by_status.record(record.status());
            report.by_model.record(record.model_used);
            if record.is_resolved() {
                report.completed += 1;
            }
        }

        report.pending = report.total - report.completed;
    }

    /// Accuracy rate, mean confidence and mean error.
    fn calculate_rates(&self, records: &[&PredictionRecord], report: &mut AggregateReport) {
        if report.completed > 0 {
            report.accuracy_rate = Decimal::from(report.by_status.accurate)
                / Decimal::from(report.completed)
                * Decimal::ONE_HUNDRED;
        }

        let confidence_sum: Decimal = records.iter().map(|r| r.confidence_score).sum();
        report.average_confidence = mean(confidence_sum, records.len());

        let errors: Vec<Decimal> = records
            .iter()
            .filter_map(|r| relative_diff_pct(r.predicted_price, r.actual_price))
            .map(|diff| diff.abs())
            .collect();
        // Saturates instead of overflowing on extreme prices.
        let error_sum = errors
            .iter()
            .fold(Decimal::ZERO, |acc, e| acc.checked_add(*e).unwrap_or(Decimal::MAX));
        report.average_error_pct = mean(error_sum, errors.len());
    }

    /// Per-symbol counts and mean confidence, ranked by count then symbol.
    fn calculate_stock_breakdown(
        &self,
        records: &[&PredictionRecord],
        report: &mut AggregateReport,
    ) {
        let mut stocks: BTreeMap<&str, (usize, Decimal)> = BTreeMap::new();
        for record in records {
            let entry = stocks.entry(record.stock_symbol.as_str()).or_insert((0, Decimal::ZERO));
            entry.0 += 1;
            entry.1 += record.confidence_score;
        }

        let mut by_stock: Vec<StockSummary> = stocks
            .into_iter()
            .map(|(symbol, (count, confidence_sum))| StockSummary {
                symbol: symbol.to_string(),
                count,
                average_confidence: mean(confidence_sum, count),
            })
            .collect();
        by_stock.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.symbol.cmp(&b.symbol)));

        report.by_stock = by_stock;
    }
}

/// `sum / count`, or zero for an empty set.
fn mean(sum: Decimal, count: usize) -> Decimal {
    if count == 0 {
        return Decimal::ZERO;
    }
    sum / Decimal::from(count)
}
