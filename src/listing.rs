//! Catalog record types: the immutable listing snapshot and its enums.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Gearbox variant of a listed vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transmission {
    Manual,
    Automatic,
}

/// Fuel variant of a listed vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FuelType {
    Gasoline,
    Diesel,
    Hybrid,
    Electric,
}

/// Whether the vehicle is factory-new or previously owned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    New,
    Used,
}

/// Lifecycle state of a listing. Only `Active` listings are visible to
/// searches unless the request opts into inactive records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingStatus {
    Active,
    Sold,
    Pending,
    Inactive,
}

/// Summary of the party offering a listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seller {
    pub id: String,
    pub name: String,
    /// Aggregate rating on a 0..=5 scale.
    pub rating: f32,
    pub verified: bool,
}

/// A single catalog record, owned by the catalog store and treated as an
/// immutable snapshot by the engine.
///
/// Invariants: `price >= 0`, `rating ∈ [0, 5]`. The engine assumes these hold
/// and does not re-validate per record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: String,
    pub brand: String,
    pub model: String,
    pub year: u16,
    /// Price in the smallest currency unit.
    pub price: i64,
    /// Odometer reading in kilometers.
    pub mileage: u32,
    pub transmission: Transmission,
    pub fuel: FuelType,
    pub color: String,
    pub condition: Condition,
    pub location: String,
    pub description: String,
    pub category: String,
    pub status: ListingStatus,
    pub posted_at: DateTime<Utc>,
    pub seller: Seller,
    pub photos: Vec<String>,
    /// Feature tags, e.g. "Sunroof" or "Cruise Control".
    pub features: Vec<String>,
    pub views: u64,
    pub favorites: u64,
}

/// Listing attributes the keyword search can draw candidate text from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchField {
    Brand,
    Model,
    Description,
    Category,
    Color,
    Location,
}

impl SearchField {
    /// Default field set for keyword search candidate text.
    pub const DEFAULT: &'static [SearchField] = &[
        SearchField::Brand,
        SearchField::Model,
        SearchField::Description,
        SearchField::Category,
    ];
}

impl Listing {
    /// The text value of one searchable field.
    pub fn field_text(&self, field: SearchField) -> &str {
        match field {
            SearchField::Brand => &self.brand,
            SearchField::Model => &self.model,
            SearchField::Description => &self.description,
            SearchField::Category => &self.category,
            SearchField::Color => &self.color,
            SearchField::Location => &self.location,
        }
    }

    /// Concatenates the requested searchable fields into one haystack string.
    pub fn candidate_text(&self, fields: &[SearchField]) -> String {
        fields
            .iter()
            .map(|f| self.field_text(*f))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
