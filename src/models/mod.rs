use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of real-estate unit
///
/// Serialized as lowercase English; the French labels emitted by the
/// legacy dashboards are accepted on input.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[serde(alias = "appartement")]
    Apartment,
    #[serde(alias = "maison")]
    House,
    #[serde(alias = "bureau")]
    Office,
    #[serde(alias = "commerce")]
    Commercial,
    #[serde(alias = "entrepot", alias = "entrepôt")]
    Warehouse,
    #[serde(alias = "terrain")]
    Land,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Apartment,
        Category::House,
        Category::Office,
        Category::Commercial,
        Category::Warehouse,
        Category::Land,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Apartment => "apartment",
            Category::House => "house",
            Category::Office => "office",
            Category::Commercial => "commercial",
            Category::Warehouse => "warehouse",
            Category::Land => "land",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "apartment" | "appartement" => Ok(Category::Apartment),
            "house" | "maison" => Ok(Category::House),
            "office" | "bureau" => Ok(Category::Office),
            "commercial" | "commerce" => Ok(Category::Commercial),
            "warehouse" | "entrepot" | "entrepôt" => Ok(Category::Warehouse),
            "land" | "terrain" => Ok(Category::Land),
            _ => Err(UnknownValue {
                kind: "category",
                value: s.to_string(),
            }),
        }
    }
}

/// Occupancy status of a unit
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[serde(alias = "loué", alias = "loue")]
    Rented,
    Vacant,
    Maintenance,
    #[serde(alias = "archivé", alias = "archive")]
    Archived,
}

impl Status {
    pub const ALL: [Status; 4] = [
        Status::Rented,
        Status::Vacant,
        Status::Maintenance,
        Status::Archived,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Rented => "rented",
            Status::Vacant => "vacant",
            Status::Maintenance => "maintenance",
            Status::Archived => "archived",
        }
    }

    pub fn is_archived(self) -> bool {
        self == Status::Archived
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "rented" | "loué" | "loue" => Ok(Status::Rented),
            "vacant" => Ok(Status::Vacant),
            "maintenance" => Ok(Status::Maintenance),
            "archived" | "archivé" | "archive" => Ok(Status::Archived),
            _ => Err(UnknownValue {
                kind: "status",
                value: s.to_string(),
            }),
        }
    }
}

/// A category or status label outside the closed enumeration
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value:?}")]
pub struct UnknownValue {
    pub kind: &'static str,
    pub value: String,
}

/// Photo or floor plan attached to a property
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Media {
    pub id: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

impl Media {
    pub fn new(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            name: None,
            media_type: None,
            size: None,
        }
    }
}

/// Core property data model
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PropertyRecord {
    pub id: String,
    pub address: String,
    pub category: Category,
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_rent: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occupancy_percent: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surface_area_sqm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bedroom_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor_number: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub photos: Vec<Media>,
    #[serde(default)]
    pub floor_plans: Vec<Media>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PropertyRecord {
    /// Build a new record from a submitted form
    pub fn from_draft(id: String, draft: PropertyDraft, now: DateTime<Utc>) -> Self {
        let mut record = Self {
            id,
            address: String::new(),
            category: draft.category,
            status: draft.status,
            monthly_rent: None,
            owner_name: None,
            occupancy_percent: None,
            surface_area_sqm: None,
            bedroom_count: None,
            floor_number: None,
            description: None,
            photos: Vec::new(),
            floor_plans: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        record.apply_draft(draft, now);
        record
    }

    /// Overwrite the editable fields; `id` and `created_at` are kept
    pub fn apply_draft(&mut self, draft: PropertyDraft, now: DateTime<Utc>) {
        self.address = draft.address.trim().to_string();
        self.category = draft.category;
        self.status = draft.status;
        self.monthly_rent = draft.monthly_rent;
        self.owner_name = draft.owner_name;
        self.occupancy_percent = draft.occupancy_percent;
        self.surface_area_sqm = draft.surface_area_sqm;
        self.bedroom_count = draft.bedroom_count;
        self.floor_number = draft.floor_number;
        self.description = draft.description;
        self.photos = draft.photos;
        self.floor_plans = draft.floor_plans;
        self.updated_at = now;
    }

    pub fn is_archived(&self) -> bool {
        self.status.is_archived()
    }

    /// Check the field invariants a record must hold inside a portfolio
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_fields(self.into())
    }
}

/// Form payload for creating or editing a property
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDraft {
    pub address: String,
    pub category: Category,
    pub status: Status,
    #[serde(default)]
    pub monthly_rent: Option<f64>,
    #[serde(default)]
    pub owner_name: Option<String>,
    #[serde(default)]
    pub occupancy_percent: Option<f64>,
    #[serde(default)]
    pub surface_area_sqm: Option<f64>,
    #[serde(default)]
    pub bedroom_count: Option<u32>,
    #[serde(default)]
    pub floor_number: Option<u32>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub photos: Vec<Media>,
    #[serde(default)]
    pub floor_plans: Vec<Media>,
}

impl PropertyDraft {
    pub fn new(address: impl Into<String>, category: Category, status: Status) -> Self {
        Self {
            address: address.into(),
            category,
            status,
            monthly_rent: None,
            owner_name: None,
            occupancy_percent: None,
            surface_area_sqm: None,
            bedroom_count: None,
            floor_number: None,
            description: None,
            photos: Vec::new(),
            floor_plans: Vec::new(),
        }
    }

    /// Drafts go through the same field checks as records, and may not
    /// archive a property directly.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.status.is_archived() {
            return Err(ValidationError::ArchivedDraft);
        }
        check_fields(self.into())
    }
}

impl From<&PropertyRecord> for PropertyDraft {
    fn from(record: &PropertyRecord) -> Self {
        Self {
            address: record.address.clone(),
            category: record.category,
            status: record.status,
            monthly_rent: record.monthly_rent,
            owner_name: record.owner_name.clone(),
            occupancy_percent: record.occupancy_percent,
            surface_area_sqm: record.surface_area_sqm,
            bedroom_count: record.bedroom_count,
            floor_number: record.floor_number,
            description: record.description.clone(),
            photos: record.photos.clone(),
            floor_plans: record.floor_plans.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("address is empty")]
    EmptyAddress,
    #[error("occupancy {0} is outside 0..=100")]
    OccupancyOutOfRange(f64),
    #[error("surface area {0} must be a non-negative number")]
    InvalidSurface(f64),
    #[error("monthly rent {0} must be a non-negative number")]
    InvalidRent(f64),
    #[error("a form cannot set the archived status")]
    ArchivedDraft,
}

/// Fields shared by records and drafts that carry invariants
struct CheckedFields<'a> {
    address: &'a str,
    occupancy: Option<f64>,
    surface: Option<f64>,
    rent: Option<f64>,
}

impl<'a> From<&'a PropertyRecord> for CheckedFields<'a> {
    fn from(record: &'a PropertyRecord) -> Self {
        Self {
            address: &record.address,
            occupancy: record.occupancy_percent,
            surface: record.surface_area_sqm,
            rent: record.monthly_rent,
        }
    }
}

impl<'a> From<&'a PropertyDraft> for CheckedFields<'a> {
    fn from(draft: &'a PropertyDraft) -> Self {
        Self {
            address: &draft.address,
            occupancy: draft.occupancy_percent,
            surface: draft.surface_area_sqm,
            rent: draft.monthly_rent,
        }
    }
}

fn non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

fn check_fields(fields: CheckedFields<'_>) -> Result<(), ValidationError> {
    if fields.address.trim().is_empty() {
        return Err(ValidationError::EmptyAddress);
    }
    if let Some(pct) = fields.occupancy {
        if !(0.0..=100.0).contains(&pct) {
            return Err(ValidationError::OccupancyOutOfRange(pct));
        }
    }
    if let Some(sqm) = fields.surface.filter(|v| !non_negative(*v)) {
        return Err(ValidationError::InvalidSurface(sqm));
    }
    if let Some(rent) = fields.rent.filter(|v| !non_negative(*v)) {
        return Err(ValidationError::InvalidRent(rent));
    }
    Ok(())
}
