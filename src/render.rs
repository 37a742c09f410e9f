//! Terminal rendering of the derived views.

use analytics::{AggregateReport, Classify, UserSummary};
use comfy_table::{Cell, ContentArrangement, Table};
use core_types::{ModelKind, PredictionRecord, PredictionStatus, StatsResponse, UserRecord};
use exporter::format_confidence;
use rust_decimal::Decimal;

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn money(value: Decimal) -> String {
    value.round_dp(2).to_string()
}

fn pct(value: Decimal) -> String {
    format!("{}%", value.round_dp(1))
}

pub fn predictions(records: &[&PredictionRecord], with_user: bool, date_format: &str) -> Table {
    let mut table = new_table();
    let mut header = vec![Cell::new("Date")];
    if with_user {
        header.push(Cell::new("User"));
    }
    header.extend(
        ["Stock", "Predicted", "Actual", "Model", "Confidence", "Status"].map(Cell::new),
    );
    table.set_header(header);

    for record in records {
        let mut row = vec![Cell::new(record.prediction_date.format(date_format))];
        if with_user {
            row.push(Cell::new(&record.username));
        }
        row.extend([
            Cell::new(&record.stock_symbol),
            Cell::new(money(record.predicted_price)),
            Cell::new(record.resolved_price().map(money).unwrap_or_else(|| "Pending".into())),
            Cell::new(record.model_used.as_str().to_uppercase()),
            Cell::new(format_confidence(record.confidence_score)),
            Cell::new(record.status().label()),
        ]);
        table.add_row(row);
    }
    table
}

/// The summary cards above a prediction table.
pub fn summary(report: &AggregateReport) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Metric", "Value"]);
    table.add_row(vec!["Total Predictions".to_string(), report.total.to_string()]);
    table.add_row(vec!["Completed".to_string(), report.completed.to_string()]);
    table.add_row(vec!["Pending".to_string(), report.pending.to_string()]);
    table.add_row(vec!["Accuracy Rate".to_string(), pct(report.accuracy_rate)]);
    table.add_row(vec!["Avg Confidence".to_string(), format_confidence(report.average_confidence)]);
    table.add_row(vec!["Avg Error".to_string(), pct(report.average_error_pct)]);
    for status in PredictionStatus::ALL {
        table.add_row(vec![status.label().to_string(), report.by_status.get(status).to_string()]);
    }
    for model in ModelKind::ALL {
        table.add_row(vec![
            format!("{} Predictions", model.as_str().to_uppercase()),
            report.by_model.get(model).to_string(),
        ]);
    }
    table
}

/// The per-stock leaderboard.
pub fn stocks(report: &AggregateReport) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Stock", "Predictions", "Avg Confidence"]);
    for stock in &report.by_stock {
        table.add_row(vec![
            stock.symbol.clone(),
            stock.count.to_string(),
            format_confidence(stock.average_confidence),
        ]);
    }
    table
}

pub fn users(users: &[&UserRecord], date_format: &str) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Username", "Email", "Role", "Predictions", "Joined"]);
    for user in users {
        table.add_row(vec![
            Cell::new(&user.username),
            Cell::new(&user.email),
            Cell::new(if user.is_admin { "Admin" } else { "User" }),
            Cell::new(user.prediction_count),
            Cell::new(user.created_at.format(date_format)),
        ]);
    }
    table
}

pub fn user_summary(summary: &UserSummary) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Metric", "Value"]);
    table.add_row(vec!["Total Users".to_string(), summary.total.to_string()]);
    table.add_row(vec!["Admins".to_string(), summary.admins.to_string()]);
    table.add_row(vec!["Regular Users".to_string(), summary.regular_users.to_string()]);
    table.add_row(vec!["Total Predictions".to_string(), summary.total_predictions.to_string()]);
    table
}

/// Counters reported by the service itself. `average_accuracy` is a mean relative error ratio.
pub fn server_stats(stats: &StatsResponse) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Server Metric", "Value"]);
    table.add_row(vec!["Total Users".to_string(), stats.total_users.to_string()]);
    table.add_row(vec!["Total Predictions".to_string(), stats.total_predictions.to_string()]);
    table.add_row(vec![
        "Avg Error".to_string(),
        pct(stats.average_accuracy * Decimal::ONE_HUNDRED),
    ]);
    table
}
