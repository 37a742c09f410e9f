//! Reads the JSON snapshots saved from the prediction service's endpoints.

use anyhow::{Context, Result};
use core_types::{
    HistoryResponse, PredictionRecord, PredictionsResponse, StatsResponse, UserRecord,
    UsersResponse, retain_valid,
};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse snapshot {}", path.display()))
}

fn report_dropped(path: &Path, dropped: usize) {
    if dropped > 0 {
        tracing::warn!(dropped, path = %path.display(), "Skipped records that failed validation.");
    }
}

/// A `/api/history` snapshot, attributed to `username`.
pub fn load_history(path: &Path, username: &str) -> Result<Vec<PredictionRecord>> {
    let response: HistoryResponse = read_json(path)?;
    let mut records = response.into_records(username);
    report_dropped(path, retain_valid(&mut records));
    tracing::info!(records = records.len(), "Loaded prediction history.");
    Ok(records)
}

/// A `/api/admin/predictions` snapshot.
pub fn load_predictions(path: &Path) -> Result<Vec<PredictionRecord>> {
    let response: PredictionsResponse = read_json(path)?;
    let mut records = response.predictions;
    report_dropped(path, retain_valid(&mut records));
    tracing::info!(records = records.len(), "Loaded predictions.");
    Ok(records)
}

/// A `/api/admin/users` snapshot.
pub fn load_users(path: &Path) -> Result<Vec<UserRecord>> {
    let response: UsersResponse = read_json(path)?;
    let mut users = response.users;
    report_dropped(path, retain_valid(&mut users));
    tracing::info!(users = users.len(), "Loaded users.");
    Ok(users)
}

/// A `/api/stats` snapshot.
pub fn load_stats(path: &Path) -> Result<StatsResponse> {
    read_json(path)
}
