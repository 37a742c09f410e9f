//! Filtering, ordering and summarizing of the admin user list.

use crate::error::AnalyticsError;
use crate::sort::{SortOrder, stable_sort_by};
use core_types::UserRecord;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleFilter {
    #[default]
    All,
    Admin,
    User,
}

impl RoleFilter {
    pub fn admits(&self, user: &UserRecord) -> bool {
        match self {
            RoleFilter::All => true,
            RoleFilter::Admin => user.is_admin,
            RoleFilter::User => !user.is_admin,
        }
    }
}

impl FromStr for RoleFilter {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Ok(RoleFilter::All),
            "admin" => Ok(RoleFilter::Admin),
            "user" => Ok(RoleFilter::User),
            _ => Err(AnalyticsError::InvalidOption {
                option: "role",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserFilter {
    /// Case-insensitive substring matched against username or email.
    pub search_term: String,
    pub role: RoleFilter,
}

impl UserFilter {
    pub fn apply<'a, I>(&self, users: I) -> Vec<&'a UserRecord>
    where
        I: IntoIterator<Item = &'a UserRecord>,
    {
        let needle = self.search_term.to_lowercase();
        users
            .into_iter()
            .filter(|user| {
                let matches_search = needle.is_empty()
                    || user.username.to_lowercase().contains(&needle)
                    || user.email.to_lowercase().contains(&needle);
                matches_search && self.role.admits(user)
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserSortKey {
    /// Account creation time.
    #[default]
    Date,
    Username,
    Predictions,
}

impl FromStr for UserSortKey {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "date" => Ok(UserSortKey::Date),
            "username" | "user" => Ok(UserSortKey::Username),
            "predictions" => Ok(UserSortKey::Predictions),
            _ => Err(AnalyticsError::InvalidOption {
                option: "user sort key",
                value: s.to_string(),
            }),
        }
    }
}

fn compare_users(key: UserSortKey, a: &UserRecord, b: &UserRecord) -> Ordering {
    match key {
        UserSortKey::Date => a.created_at.cmp(&b.created_at),
        UserSortKey::Username => a.username.to_lowercase().cmp(&b.username.to_lowercase()),
        UserSortKey::Predictions => a.prediction_count.cmp(&b.prediction_count),
    }
}

/// Stable ordering of users; equal keys keep their input order.
pub fn sort_users<'a, I>(users: I, key: UserSortKey, order: SortOrder) -> Vec<&'a UserRecord>
where
    I: IntoIterator<Item = &'a UserRecord>,
{
    let users: Vec<_> = users.into_iter().collect();
    stable_sort_by(users, order, |a, b| compare_users(key, a, b))
}

/// The `n` most recently created accounts, newest first.
pub fn recent_users(users: &[UserRecord], n: usize) -> Vec<&UserRecord> {
    let mut newest = sort_users(users, UserSortKey::Date, SortOrder::Desc);
    newest.truncate(n);
    newest
}

/// Counters for the user-management summary cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub total: usize,
    pub admins: usize,
    pub regular_users: usize,
    pub total_predictions: u64,
}

pub fn summarize_users<'a, I>(users: I) -> UserSummary
where
    I: IntoIterator<Item = &'a UserRecord>,
{
    users.into_iter().fold(UserSummary::default(), |mut summary, user| {
        summary.total += 1;
        if user.is_admin {
            summary.admins += 1;
        } else {
            summary.regular_users += 1;
        }
        summary.total_predictions += user.prediction_count;
        summary
    })
}
