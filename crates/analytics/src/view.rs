use crate::filter::{FilterConfig, RecordFilter};
use crate::sort::{SortConfig, SortKey, SortOrder, sort_records};
use core_types::PredictionRecord;

/// The filter and sort configuration of one dashboard table.
///
/// Every call to `apply` recomputes from the snapshot it is given, so the
/// result depends only on the configuration, never on which option changed last.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReportView {
    pub filter: FilterConfig,
    pub sort: SortConfig,
}

impl ReportView {
    pub fn new(filter: FilterConfig, sort: SortConfig) -> Self {
        Self { filter, sort }
    }

    /// A user's own prediction history, newest first.
    pub fn history() -> Self {
        Self::new(FilterConfig::default(), SortConfig::new(SortKey::Date, SortOrder::Desc))
    }

    /// The admin table of every user's predictions, newest first.
    pub fn admin_results() -> Self {
        Self::history()
    }

    pub fn with_filter(mut self, filter: FilterConfig) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_sort(mut self, sort: SortConfig) -> Self {
        self.sort = sort;
        self
    }

    /// Filter, then sort.
    pub fn apply<'a>(&self, records: &'a [PredictionRecord]) -> Vec<&'a PredictionRecord> {
        let filtered = RecordFilter::new(self.filter.clone()).apply(records);
        sort_records(filtered, self.sort)
    }
}

/// The `n` newest predictions.
pub fn recent(records: &[PredictionRecord], n: usize) -> Vec<&PredictionRecord> {
    let mut newest = sort_records(records, SortConfig::new(SortKey::Date, SortOrder::Desc));
    newest.truncate(n);
    newest
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::Scope;
    use crate::test_support::record;
    use core_types::ModelKind;
    use rust_decimal_macros::dec;

    #[test]
    fn history_view_is_newest_first() {
        let records = vec![
            record(1, "a", "TCS", dec!(1), None, ModelKind::Lstm, dec!(0.5)),
            record(2, "a", "TCS", dec!(1), Some(dec!(1)), ModelKind::Lstm, dec!(0.5)),
            record(3, "a", "TCS", dec!(1), None, ModelKind::Lstm, dec!(0.5)),
        ];
        let ids: Vec<_> = ReportView::history().apply(&records).iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);

        let pending = ReportView::history()
            .with_filter(FilterConfig {
                scope: Scope::Pending,
                ..Default::default()
            })
            .with_sort(SortConfig::new(SortKey::Date, SortOrder::Asc));
        let ids: Vec<_> = pending.apply(&records).iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn recent_truncates_to_n() {
        let records: Vec<_> = (1..=12)
            .map(|id| record(id, "a", "TCS", dec!(1), None, ModelKind::Lstm, dec!(0.5)))
            .collect();
        let ids: Vec<_> = recent(&records, 10).iter().map(|r| r.id).collect();
        assert_eq!(ids, (3..=12).rev().collect::<Vec<_>>());

        let dashboard: Vec<_> = recent(&records, 5).iter().map(|r| r.id).collect();
        assert_eq!(dashboard, vec![12, 11, 10, 9, 8]);
        assert_eq!(recent(&records[..3], 5).len(), 3);
    }
}
