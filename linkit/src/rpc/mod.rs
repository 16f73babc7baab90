//! RPC wire contract
//!
//! Every backend capability is a named procedure taking a JSON parameter
//! object and answering the `{ data, error }` envelope. The parameter
//! structs here are shared by the client services (serialize) and the
//! server dispatcher (deserialize); field names keep the backend's
//! `p_`-prefixed convention.

pub mod gateway;
pub mod identifier;

pub use gateway::{RpcGateway, RpcOutcome};
pub use identifier::ensure_uuid;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Response envelope for every procedure call. Failures travel in-band:
/// the HTTP status is 200 whenever the procedure was dispatched at all.
#[derive(Debug, Serialize, Deserialize)]
pub struct RpcEnvelope {
    pub data: Option<Value>,
    pub error: Option<String>,
}

impl RpcEnvelope {
    pub fn success(data: Value) -> Self {
        Self {
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            data: None,
            error: Some(message.into()),
        }
    }
}

// ===== Parameter objects =====

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateCollectionParams {
    pub p_name: String,
    pub p_description: Option<String>,
    pub p_color: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CollectionIdParams {
    pub p_collection_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProductIdParams {
    pub p_product_id: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CreateProductParams {
    pub p_title: String,
    pub p_description: Option<String>,
    pub p_price: Option<String>,
    pub p_image_url: Option<String>,
    pub p_product_url: Option<String>,
    pub p_source_name: Option<String>,
    pub p_collection_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateProductParams {
    pub p_product_id: String,
    pub p_title: String,
    pub p_description: Option<String>,
    pub p_price: Option<String>,
    pub p_image_url: Option<String>,
    pub p_product_url: Option<String>,
    pub p_source_name: Option<String>,
    pub p_collection_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProductCollectionParams {
    pub p_product_id: String,
    pub p_collection_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SaveNotesParams {
    pub p_product_id: String,
    pub p_content: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SaveLinkParams {
    pub p_product_id: String,
    pub p_source_name: String,
    pub p_product_name: String,
    pub p_url: String,
    pub p_price: Option<f64>,
    pub p_rating: Option<f64>,
    pub p_review_count: Option<i64>,
    pub p_comment: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateLinkParams {
    pub p_link_id: String,
    pub p_source_name: String,
    pub p_product_name: String,
    pub p_url: String,
    pub p_price: Option<f64>,
    pub p_rating: Option<f64>,
    pub p_review_count: Option<i64>,
    pub p_comment: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LinkIdParams {
    pub p_link_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SaveSourceParams {
    pub p_product_id: String,
    pub p_title: String,
    pub p_url: String,
    pub p_source_type: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateSourceParams {
    pub p_source_id: String,
    pub p_title: String,
    pub p_url: String,
    pub p_source_type: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SourceIdParams {
    pub p_source_id: String,
}
