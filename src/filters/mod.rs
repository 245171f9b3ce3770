use crate::models::{Category, PropertyRecord, Status};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::warn;

/// Search and selection criteria for narrowing a property list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Free-text query matched against address and description
    pub query: String,
    pub category: Option<Category>,
    pub status: Option<Status>,
}

impl FilterCriteria {
    /// Build criteria from raw selector values.
    ///
    /// Labels outside the enumeration leave that dimension unfiltered.
    pub fn from_input(query: &str, category: Option<&str>, status: Option<&str>) -> Self {
        Self {
            query: query.to_string(),
            category: lenient(category),
            status: lenient(status),
        }
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    /// Number of dimensions currently narrowing the result
    pub fn active_filter_count(&self) -> usize {
        [
            self.normalized_query().is_some(),
            self.category.is_some(),
            self.status.is_some(),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }

    pub fn is_empty(&self) -> bool {
        self.active_filter_count() == 0
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Whether a single record satisfies every active predicate
    pub fn matches(&self, record: &PropertyRecord) -> bool {
        self.matches_query(record.address.as_str(), record.description.as_deref())
            && self.category.map_or(true, |c| record.category == c)
            && self.status.map_or(true, |s| record.status == s)
    }

    fn matches_query(&self, address: &str, description: Option<&str>) -> bool {
        let Some(needle) = self.normalized_query() else {
            return true;
        };
        address.to_lowercase().contains(&needle)
            || description.map_or(false, |d| d.to_lowercase().contains(&needle))
    }

    fn normalized_query(&self) -> Option<String> {
        let trimmed = self.query.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_lowercase())
    }
}

fn lenient<T>(raw: Option<&str>) -> Option<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    match raw.parse() {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Ignoring filter: {}", e);
            None
        }
    }
}

/// Baseline partition a listing is drawn from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    /// Everything not archived
    #[default]
    Active,
    Archived,
}

impl View {
    pub fn contains(self, record: &PropertyRecord) -> bool {
        match self {
            View::Active => !record.is_archived(),
            View::Archived => record.is_archived(),
        }
    }
}

impl FromStr for View {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" | "actifs" => Ok(View::Active),
            "archived" | "archives" => Ok(View::Archived),
            other => Err(format!("unknown view: {:?}", other)),
        }
    }
}

/// Narrow `records` to those matching every active criterion, keeping input order
pub fn filter<'a>(
    records: &'a [PropertyRecord],
    criteria: &FilterCriteria,
) -> Vec<&'a PropertyRecord> {
    records.iter().filter(|r| criteria.matches(r)).collect()
}

/// Like [`filter`], restricted to one side of the active/archived partition
pub fn filter_view<'a>(
    records: &'a [PropertyRecord],
    view: View,
    criteria: &FilterCriteria,
) -> Vec<&'a PropertyRecord> {
    records
        .iter()
        .filter(|r| view.contains(r) && criteria.matches(r))
        .collect()
}
