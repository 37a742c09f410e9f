//! # Stockcast Analytics Engine
//!
//! This crate turns a snapshot of prediction records into the derived views
//! the dashboards display: classified, filtered, sorted and summarized.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of external systems.
//!   It depends only on `core-types` (Layer 0).
//! - **Stateless Calculation:** Every stage is a pure transformation of its input. Status is
//!   recomputed on demand and never stored, so it cannot drift from the prices it depends on.
//!
//! ## Public API
//!
//! - `classify` / `Classify`: the accuracy classifier.
//! - `RecordFilter`, `FilterConfig`: the filter stage.
//! - `sort_records`, `SortConfig`: the stable sort stage.
//! - `AnalyticsEngine`, `AggregateReport`: summary statistics.
//! - `ReportView`: filter and sort combined per dashboard table.
//! - `users`: the admin user list equivalents.

// Declare the modules that constitute this crate.
pub mod classifier;
pub mod engine;
pub mod error;
pub mod filter;
pub mod report;
pub mod sort;
pub mod users;
pub mod view;

#[cfg(test)]
mod test_support;

// Re-export the key components to create a clean, public-facing API.
pub use classifier::{ACCURACY_TOLERANCE_PCT, Classify, classify, relative_diff_pct};
pub use engine::AnalyticsEngine;
pub use error::AnalyticsError;
pub use filter::{FilterConfig, RecordFilter, Scope, Selection, filter_records};
pub use report::{AggregateReport, ModelBreakdown, StatusBreakdown, StockSummary};
pub use sort::{SortConfig, SortKey, SortOrder, sort_records};
pub use users::{
    RoleFilter, UserFilter, UserSortKey, UserSummary, recent_users, sort_users, summarize_users,
};
pub use view::{ReportView, recent};
