use crate::error::ExportError;
use analytics::Classify;
use configuration::ExportSettings;
use core_types::PredictionRecord;
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt::Write as _;

/// MIME type offered with every download.
pub const CSV_MIME_TYPE: &str = "text/csv";

/// Which dashboard the export was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportLayout {
    /// A single user's history. No user column.
    History,
    /// The administrative view of every user's predictions.
    Admin,
}

impl ExportLayout {
    pub fn includes_user(&self) -> bool {
        matches!(self, ExportLayout::Admin)
    }

    pub fn filename<'a>(&self, settings: &'a ExportSettings) -> &'a str {
        match self {
            ExportLayout::History => &settings.history_filename,
            ExportLayout::Admin => &settings.admin_filename,
        }
    }

    pub fn headers(&self) -> Vec<&'static str> {
        let mut headers = vec!["Date"];
        if self.includes_user() {
            headers.push("User");
        }
        headers.extend([
            "Stock",
            "Predicted Price",
            "Actual Price",
            "Model",
            "Confidence",
            "Status",
        ]);
        headers
    }
}

/// A finished export, ready to be offered for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvDownload {
    pub filename: String,
    pub mime_type: &'static str,
    pub body: String,
}

/// Serializes the records a user is looking at into CSV text.
///
/// The caller passes the already filtered and sorted sequence; rows are
/// written in exactly that order.
#[derive(Debug, Clone)]
pub struct CsvExporter {
    layout: ExportLayout,
    date_format: String,
    filename: String,
}

impl CsvExporter {
    pub fn new(settings: &ExportSettings, layout: ExportLayout) -> Self {
        Self {
            layout,
            date_format: settings.date_format.clone(),
            filename: layout.filename(settings).to_string(),
        }
    }

    pub fn to_csv<'a, I>(&self, records: I) -> Result<String, ExportError>
    where
        I: IntoIterator<Item = &'a PredictionRecord>,
    {
        let mut writer = csv::WriterBuilder::new()
            .quote_style(csv::QuoteStyle::Always)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(Vec::new());

        writer.write_record(self.layout.headers())?;
        let mut rows = 0usize;
        for record in records {
            writer.write_record(self.row(record)?)?;
            rows += 1;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| std::io::Error::new(e.error().kind(), e.error().to_string()))?;
        tracing::debug!(rows, layout = ?self.layout, "Exported predictions to CSV.");
        Ok(String::from_utf8(bytes)?)
    }

    pub fn download<'a, I>(&self, records: I) -> Result<CsvDownload, ExportError>
    where
        I: IntoIterator<Item = &'a PredictionRecord>,
    {
        Ok(CsvDownload {
            filename: self.filename.clone(),
            mime_type: CSV_MIME_TYPE,
            body: self.to_csv(records)?,
        })
    }

    fn row(&self, record: &PredictionRecord) -> Result<Vec<String>, ExportError> {
        let mut row = Vec::with_capacity(8);
        row.push(self.format_date(record)?);
        if self.layout.includes_user() {
            row.push(record.username.clone());
        }
        row.push(record.stock_symbol.clone());
        row.push(record.predicted_price.to_string());
        row.push(
            record
                .resolved_price()
                .map(|price| price.to_string())
                .unwrap_or_else(|| "Pending".to_string()),
        );
        row.push(record.model_used.as_str().to_uppercase());
        row.push(format_confidence(record.confidence_score));
        row.push(record.status().label().to_string());
        Ok(row)
    }

    fn format_date(&self, record: &PredictionRecord) -> Result<String, ExportError> {
        let mut out = String::new();
        write!(out, "{}", record.prediction_date.format(&self.date_format))
            .map_err(|_| ExportError::DateFormat(self.date_format.clone()))?;
        Ok(out)
    }
}

/// A `[0, 1]` confidence as a percentage with one decimal place, e.g. `82.5%`.
pub fn format_confidence(confidence: Decimal) -> String {
    let mut pct = (confidence * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    pct.rescale(1);
    format!("{pct}%")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use core_types::ModelKind;
    use rust_decimal_macros::dec;

    fn record(id: i64, username: &str, stock: &str, actual: Option<Decimal>) -> PredictionRecord {
        PredictionRecord {
            id,
            user_id: None,
            username: username.to_string(),
            stock_symbol: stock.to_string(),
            predicted_price: dec!(3450.5),
            actual_price: actual,
            model_used: ModelKind::Lstm,
            confidence_score: dec!(0.825),
            prediction_date: Utc.with_ymd_and_hms(2024, 1, 5, 15, 45, 0).unwrap(),
        }
    }

    fn parse(body: &str) -> Vec<Vec<String>> {
        csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader(body.as_bytes())
            .records()
            .map(|row| row.unwrap().iter().map(str::to_string).collect())
            .collect()
    }

    #[test]
    fn history_layout_has_no_user_column() {
        let exporter = CsvExporter::new(&ExportSettings::default(), ExportLayout::History);
        let body = exporter.to_csv(&[record(1, "asha", "TCS", None)]).unwrap();

        assert_eq!(
            body,
            concat!(
                "\"Date\",\"Stock\",\"Predicted Price\",\"Actual Price\",",
                "\"Model\",\"Confidence\",\"Status\"\n",
                "\"Jan 5, 2024, 03:45 PM\",\"TCS\",\"3450.5\",\"Pending\",",
                "\"LSTM\",\"82.5%\",\"Pending\"\n",
            )
        );
    }

    #[test]
    fn admin_layout_round_trips_through_a_csv_reader() {
        let records = vec![
            record(1, "O\"Brien", "TCS", Some(dec!(3400))),
            record(2, "ravi, jr", "WI\"PRO", Some(dec!(4000))),
            record(3, "meera", "INFOSYS", None),
        ];
        let exporter = CsvExporter::new(&ExportSettings::default(), ExportLayout::Admin);
        let rows = parse(&exporter.to_csv(&records).unwrap());

        assert_eq!(rows.len(), records.len() + 1);
        assert_eq!(rows[0], ExportLayout::Admin.headers());
        assert_eq!(rows[1][1], "O\"Brien");
        assert_eq!(rows[1][4], "3400");
        assert_eq!(rows[1][7], "Accurate");
        assert_eq!(rows[2][1], "ravi, jr");
        assert_eq!(rows[2][2], "WI\"PRO");
        assert_eq!(rows[2][7], "Underestimated");
        assert_eq!(rows[3][4], "Pending");
        assert!(rows.iter().all(|row| row.len() == 8));
    }

    #[test]
    fn embedded_quotes_are_doubled() {
        let exporter = CsvExporter::new(&ExportSettings::default(), ExportLayout::Admin);
        let body = exporter.to_csv(&[record(1, "say \"hi\"", "TCS", None)]).unwrap();
        assert!(body.contains("\"say \"\"hi\"\"\""));
    }

    #[test]
    fn zero_actual_price_exports_as_pending() {
        let exporter = CsvExporter::new(&ExportSettings::default(), ExportLayout::History);
        let rows = parse(&exporter.to_csv(&[record(1, "a", "TCS", Some(Decimal::ZERO))]).unwrap());
        assert_eq!(rows[1][3], "Pending");
        assert_eq!(rows[1][6], "Pending");
    }

    #[test]
    fn confidence_has_one_decimal_place() {
        assert_eq!(format_confidence(dec!(0.8)), "80.0%");
        assert_eq!(format_confidence(dec!(0.8555)), "85.6%");
        assert_eq!(format_confidence(dec!(1)), "100.0%");
        assert_eq!(format_confidence(Decimal::ZERO), "0.0%");
    }

    #[test]
    fn download_carries_filename_and_mime_type() {
        let settings = ExportSettings::default();
        let none: [PredictionRecord; 0] = [];
        let admin = CsvExporter::new(&settings, ExportLayout::Admin).download(&none).unwrap();
        assert_eq!(admin.filename, "all_predictions.csv");
        assert_eq!(admin.mime_type, "text/csv");
        assert_eq!(parse(&admin.body).len(), 1);

        let history = CsvExporter::new(&settings, ExportLayout::History).download(&none).unwrap();
        assert_eq!(history.filename, "prediction_history.csv");
    }

    #[test]
    fn custom_date_format_is_applied() {
        let settings = ExportSettings {
            date_format: "%Y-%m-%d %H:%M".to_string(),
            ..Default::default()
        };
        let exporter = CsvExporter::new(&settings, ExportLayout::History);
        let rows = parse(&exporter.to_csv(&[record(1, "a", "TCS", None)]).unwrap());
        assert_eq!(rows[1][0], "2024-01-05 15:45");
    }
}
