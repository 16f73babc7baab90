//! Client-side entities
//!
//! View models built from backend rows. Nullable columns are filled with
//! empty strings so forms and cards never deal with options; the
//! collection reference stays optional because "no collection" is a real
//! state, not a default.

use crate::database::{CollectionRow, ProductRow};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub title: String,
    pub description: String,
    pub price: String,
    pub image_url: String,
    pub product_url: String,
    pub source_name: String,
    pub date_added: DateTime<Utc>,
    pub collection_id: Option<String>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description.unwrap_or_default(),
            price: row.price.unwrap_or_default(),
            image_url: row.image_url.unwrap_or_default(),
            product_url: row.product_url.unwrap_or_default(),
            source_name: row.source_name.unwrap_or_default(),
            date_added: row.created_at,
            collection_id: row.collection_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub id: String,
    pub name: String,
    pub description: String,
    pub color: String,
    pub created_at: DateTime<Utc>,
}

impl From<CollectionRow> for Collection {
    fn from(row: CollectionRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description.unwrap_or_default(),
            color: row.color,
            created_at: row.created_at,
        }
    }
}

/// Form input for a new product. `collection_id` carries the raw form
/// value: empty or "none" means no collection.
#[derive(Debug, Clone, Default)]
pub struct ProductDraft {
    pub title: String,
    pub description: String,
    pub price: String,
    pub image_url: String,
    pub product_url: String,
    pub source_name: String,
    pub collection_id: String,
}

/// Form input for a new collection.
#[derive(Debug, Clone, Default)]
pub struct CollectionDraft {
    pub name: String,
    pub description: String,
    pub color: String,
}

/// Empty form strings become NULL columns, not empty-string rows.
pub(crate) fn blank_to_none(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
