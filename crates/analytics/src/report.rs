use core_types::{ModelKind, PredictionStatus};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Summary statistics over a sequence of prediction records.
///
/// This struct is the output of `AnalyticsEngine::summarize` and feeds the
/// summary cards of every dashboard view. Every field is a plain number;
/// there are no undefined values, even for an empty input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateReport {
    // I. Counts
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    pub by_status: StatusBreakdown,
    pub by_model: ModelBreakdown,

    // II. Rates and averages
    /// Accurate predictions as a percentage of completed ones.
    pub accuracy_rate: Decimal,
    pub average_confidence: Decimal,
    /// Mean absolute relative error of completed predictions, in percent.
    pub average_error_pct: Decimal,

    // III. Leaderboard
    /// Ordered by count descending, then symbol ascending.
    pub by_stock: Vec<StockSummary>,
}

impl AggregateReport {
    /// Creates a new, zeroed-out report.
    pub fn new() -> Self {
        Self {
            total: 0,
            completed: 0,
            pending: 0,
            by_status: StatusBreakdown::default(),
            by_model: ModelBreakdown::default(),
            accuracy_rate: Decimal::ZERO,
            average_confidence: Decimal::ZERO,
            average_error_pct: Decimal::ZERO,
            by_stock: Vec::new(),
        }
    }
}

impl Default for AggregateReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Count per status. All four statuses are always present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusBreakdown {
    pub pending: usize,
    pub accurate: usize,
    pub overestimated: usize,
    pub underestimated: usize,
}

impl StatusBreakdown {
    pub fn get(&self, status: PredictionStatus) -> usize {
        match status {
            PredictionStatus::Pending => self.pending,
            PredictionStatus::Accurate => self.accurate,
            PredictionStatus::Overestimated => self.overestimated,
            PredictionStatus::Underestimated => self.underestimated,
        }
    }

    pub(crate) fn record(&mut self, status: PredictionStatus) {
        let slot = match status {
            PredictionStatus::Pending => &mut self.pending,
            PredictionStatus::Accurate => &mut self.accurate,
            PredictionStatus::Overestimated => &mut self.overestimated,
            PredictionStatus::Underestimated => &mut self.underestimated,
        };
        *slot += 1;
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelBreakdown {
    pub lstm: usize,
    pub linear: usize,
}

impl ModelBreakdown {
    pub fn get(&self, model: ModelKind) -> usize {
        match model {
            ModelKind::Lstm => self.lstm,
            ModelKind::Linear => self.linear,
        }
    }

    pub(crate) fn record(&mut self, model: ModelKind) {
        match model {
            ModelKind::Lstm => self.lstm += 1,
            ModelKind::Linear => self.linear += 1,
        }
    }
}

/// One row of the per-stock leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockSummary {
    pub symbol: String,
    pub count: usize,
    pub average_confidence: Decimal,
}
