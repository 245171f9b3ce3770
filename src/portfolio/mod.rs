//! In-memory property portfolio: record lifecycle and dashboard figures.
//!
//! Records keep insertion order. A record leaves the active listing by
//! being archived, comes back through restore (as vacant), and can only be
//! deleted once archived.

use chrono::Utc;
use serde::Serialize;
use std::collections::HashSet;
use tracing::debug;

use crate::filters::{filter_view, FilterCriteria, View};
use crate::models::{PropertyDraft, PropertyRecord, Status, ValidationError};

const ID_PREFIX: &str = "b-";
const FIRST_ID: u64 = 1001;

#[derive(Debug, thiserror::Error)]
pub enum PortfolioError {
    #[error("property not found: {0}")]
    NotFound(String),
    #[error("duplicate property id: {0}")]
    DuplicateId(String),
    #[error("property already archived: {0}")]
    AlreadyArchived(String),
    #[error("property is not archived: {0}")]
    NotArchived(String),
    #[error("archived property cannot be edited: {0}")]
    Archived(String),
    #[error("invalid property {id}: {source}")]
    Invalid {
        id: String,
        #[source]
        source: ValidationError,
    },
}

/// Owner dashboard figures, computed over the active listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioStats {
    pub total: usize,
    pub rented: usize,
    pub monthly_revenue: f64,
    /// Mean occupancy in percent, rounded
    pub occupancy_rate: u32,
}

#[derive(Debug, Clone, Default)]
pub struct Portfolio {
    records: Vec<PropertyRecord>,
}

impl Portfolio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a portfolio from loaded records, rejecting invalid records
    /// and repeated ids.
    pub fn from_records(records: Vec<PropertyRecord>) -> Result<Self, PortfolioError> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            record.validate().map_err(|source| PortfolioError::Invalid {
                id: record.id.clone(),
                source,
            })?;
            if !seen.insert(record.id.as_str()) {
                return Err(PortfolioError::DuplicateId(record.id.clone()));
            }
        }
        Ok(Self { records })
    }

    pub fn records(&self) -> &[PropertyRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&PropertyRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn view(&self, view: View, criteria: &FilterCriteria) -> Vec<&PropertyRecord> {
        filter_view(&self.records, view, criteria)
    }

    /// `(active, archived)` record counts
    pub fn counts(&self) -> (usize, usize) {
        let archived = self.records.iter().filter(|r| r.is_archived()).count();
        (self.records.len() - archived, archived)
    }

    pub fn create(&mut self, draft: PropertyDraft) -> Result<&PropertyRecord, PortfolioError> {
        let id = self.next_id();
        draft.validate().map_err(|source| PortfolioError::Invalid {
            id: id.clone(),
            source,
        })?;

        debug!("Creating property {}", id);
        self.records
            .push(PropertyRecord::from_draft(id, draft, Utc::now()));
        let index = self.records.len() - 1;
        Ok(&self.records[index])
    }

    pub fn update(
        &mut self,
        id: &str,
        draft: PropertyDraft,
    ) -> Result<&PropertyRecord, PortfolioError> {
        let record = self.find_mut(id)?;
        if record.is_archived() {
            return Err(PortfolioError::Archived(id.to_string()));
        }
        draft.validate().map_err(|source| PortfolioError::Invalid {
            id: id.to_string(),
            source,
        })?;

        debug!("Updating property {}", id);
        record.apply_draft(draft, Utc::now());
        Ok(&*record)
    }

    pub fn archive(&mut self, id: &str) -> Result<&PropertyRecord, PortfolioError> {
        let record = self.find_mut(id)?;
        if record.is_archived() {
            return Err(PortfolioError::AlreadyArchived(id.to_string()));
        }

        debug!("Archiving property {}", id);
        record.status = Status::Archived;
        record.updated_at = Utc::now();
        Ok(&*record)
    }

    /// Bring an archived record back into the active listing as vacant
    pub fn restore(&mut self, id: &str) -> Result<&PropertyRecord, PortfolioError> {
        let record = self.find_mut(id)?;
        if !record.is_archived() {
            return Err(PortfolioError::NotArchived(id.to_string()));
        }

        debug!("Restoring property {}", id);
        record.status = Status::Vacant;
        record.updated_at = Utc::now();
        Ok(&*record)
    }

    pub fn delete(&mut self, id: &str) -> Result<PropertyRecord, PortfolioError> {
        let index = self
            .records
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| PortfolioError::NotFound(id.to_string()))?;
        if !self.records[index].is_archived() {
            return Err(PortfolioError::NotArchived(id.to_string()));
        }

        debug!("Deleting property {}", id);
        Ok(self.records.remove(index))
    }

    pub fn stats(&self) -> PortfolioStats {
        let active: Vec<&PropertyRecord> =
            self.records.iter().filter(|r| !r.is_archived()).collect();
        let rented: Vec<&&PropertyRecord> =
            active.iter().filter(|r| r.status == Status::Rented).collect();
        let monthly_revenue: f64 = rented.iter().filter_map(|r| r.monthly_rent).sum();

        let occupancies: Vec<f64> = active.iter().filter_map(|r| r.occupancy_percent).collect();
        let occupancy_rate = if occupancies.is_empty() {
            0
        } else {
            (occupancies.iter().sum::<f64>() / occupancies.len() as f64).round() as u32
        };

        PortfolioStats {
            total: active.len(),
            rented: rented.len(),
            monthly_revenue,
            occupancy_rate,
        }
    }

    fn find_mut(&mut self, id: &str) -> Result<&mut PropertyRecord, PortfolioError> {
        self.records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| PortfolioError::NotFound(id.to_string()))
    }

    /// One past the largest `b-<n>` suffix in use; suffixes with no
    /// successor in `u64` are skipped
    fn next_id(&self) -> String {
        let next = self
            .records
            .iter()
            .filter_map(|r| r.id.strip_prefix(ID_PREFIX)?.parse::<u64>().ok())
            .filter_map(|n| n.checked_add(1))
            .max()
            .unwrap_or(FIRST_ID);
        format!("{}{}", ID_PREFIX, next)
    }
}
