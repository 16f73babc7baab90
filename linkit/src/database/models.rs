//! Database models
//!
//! Rust structs representing database rows. The same structs travel over
//! the RPC wire, so they derive both sqlx::FromRow and serde traits.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A registered user
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserRow {
    pub id: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// An active bearer-token session
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SessionRow {
    pub token: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}

/// A color-tagged grouping of products
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct CollectionRow {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub description: Option<String>,
    pub color: String,
    pub created_at: DateTime<Utc>,
}

/// A saved reference to an external item of interest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ProductRow {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: Option<String>,
    pub price: Option<String>,
    pub image_url: Option<String>,
    pub product_url: Option<String>,
    pub source_name: Option<String>,
    pub collection_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A price/rating comparison entry tying a product to a retailer listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ProductLinkRow {
    pub id: String,
    pub product_id: String,
    pub source_name: String,
    pub product_name: String,
    pub url: String,
    pub price: Option<f64>,
    pub rating: Option<f64>,
    pub review_count: Option<i64>,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A reference (video, article, ...) associated with a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ExternalSourceRow {
    pub id: String,
    pub product_id: String,
    pub title: String,
    pub url: String,
    pub source_type: String,
    pub created_at: DateTime<Utc>,
}

/// The single free-text note per product per user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ProductNoteRow {
    pub id: String,
    pub product_id: String,
    pub user_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create collection request
#[derive(Debug, Clone, Deserialize)]
pub struct NewCollection {
    pub name: String,
    pub description: Option<String>,
    pub color: String,
}

/// Create product request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewProduct {
    pub title: String,
    pub description: Option<String>,
    pub price: Option<String>,
    pub image_url: Option<String>,
    pub product_url: Option<String>,
    pub source_name: Option<String>,
    pub collection_id: Option<String>,
}

/// Update product request (all mutable fields)
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProduct {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub price: Option<String>,
    pub image_url: Option<String>,
    pub product_url: Option<String>,
    pub source_name: Option<String>,
    pub collection_id: Option<String>,
}

/// Create comparison link request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewProductLink {
    pub product_id: String,
    pub source_name: String,
    pub product_name: String,
    pub url: String,
    pub price: Option<f64>,
    pub rating: Option<f64>,
    pub review_count: Option<i64>,
    pub comment: Option<String>,
}

/// Update comparison link request
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProductLink {
    pub id: String,
    pub source_name: String,
    pub product_name: String,
    pub url: String,
    pub price: Option<f64>,
    pub rating: Option<f64>,
    pub review_count: Option<i64>,
    pub comment: Option<String>,
}

/// Create external source request
#[derive(Debug, Clone, Deserialize)]
pub struct NewExternalSource {
    pub product_id: String,
    pub title: String,
    pub url: String,
    pub source_type: String,
}

/// Update external source request
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateExternalSource {
    pub id: String,
    pub title: String,
    pub url: String,
    pub source_type: String,
}
