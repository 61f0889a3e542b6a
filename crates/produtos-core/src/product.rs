//! The product record and its create/update forms.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::ProductId;
use crate::price::Price;

/// Category assigned when a create request names none.
pub const DEFAULT_CATEGORY: &str = "geral";

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

fn default_active() -> bool {
    true
}

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product name (trimmed, non-empty).
    pub name: String,
    /// Unit price, exact decimal.
    pub price: Price,
    /// Units in stock.
    pub quantity: u64,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Category label.
    #[serde(default = "default_category")]
    pub category: String,
    /// Whether the product is listed as active.
    #[serde(default = "default_active")]
    pub active: bool,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last written.
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Build a fresh record. Both timestamps are set to `now`.
    pub fn create(id: ProductId, new: NewProduct, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: new.name,
            price: new.price,
            quantity: new.quantity,
            description: new.description,
            category: new.category,
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the fields present in `patch` and stamp `updated_at`.
    ///
    /// `updated_at` never moves before `created_at`.
    pub fn apply(&mut self, patch: &ProductPatch, at: DateTime<Utc>) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(price) = &patch.price {
            self.price = price.clone();
        }
        if let Some(quantity) = patch.quantity {
            self.quantity = quantity;
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(category) = &patch.category {
            self.category = category.clone();
        }
        if let Some(active) = patch.active {
            self.active = active;
        }
        self.updated_at = at.max(self.created_at);
    }
}

/// Validated input for a new product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub price: Price,
    pub quantity: u64,
    pub description: String,
    pub category: String,
}

impl NewProduct {
    /// Input with the optional fields at their defaults.
    pub fn new(name: impl Into<String>, price: Price, quantity: u64) -> Self {
        Self {
            name: name.into(),
            price,
            quantity,
            description: String::new(),
            category: default_category(),
        }
    }
}

/// Validated partial update. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub price: Option<Price>,
    pub quantity: Option<u64>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub active: Option<bool>,
}

impl ProductPatch {
    /// True when no field would change.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.price.is_none()
            && self.quantity.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.active.is_none()
    }
}
