//! Collection service
//!
//! Typed wrappers over the collection procedures.

use crate::database::{CollectionRow, ProductRow};
use crate::error::Result;
use crate::rpc::{
    ensure_uuid, CollectionIdParams, CreateCollectionParams, ProductCollectionParams, RpcGateway,
};
use serde_json::json;

pub async fn get_user_collections(gateway: &RpcGateway) -> Result<Vec<CollectionRow>> {
    let data = gateway
        .call("get_user_collections", json!({}))
        .await
        .into_result()?;

    Ok(serde_json::from_value(data)?)
}

/// Create a collection. Returns the new collection id.
pub async fn create_collection(
    gateway: &RpcGateway,
    name: &str,
    description: Option<&str>,
    color: &str,
) -> Result<String> {
    let params = CreateCollectionParams {
        p_name: name.to_string(),
        p_description: description.map(str::to_string),
        p_color: color.to_string(),
    };

    let data = gateway
        .call("create_collection", serde_json::to_value(params)?)
        .await
        .into_result()?;

    Ok(serde_json::from_value(data)?)
}

pub async fn delete_collection(gateway: &RpcGateway, collection_id: &str) -> Result<bool> {
    let params = CollectionIdParams {
        p_collection_id: ensure_uuid(collection_id).to_string(),
    };

    let data = gateway
        .call("delete_collection", serde_json::to_value(params)?)
        .await
        .into_result()?;

    Ok(serde_json::from_value(data)?)
}

pub async fn get_products_by_collection(
    gateway: &RpcGateway,
    collection_id: &str,
) -> Result<Vec<ProductRow>> {
    let params = CollectionIdParams {
        p_collection_id: ensure_uuid(collection_id).to_string(),
    };

    let data = gateway
        .call("get_products_by_collection", serde_json::to_value(params)?)
        .await
        .into_result()?;

    Ok(serde_json::from_value(data)?)
}

/// Attach a product to a collection. Returns the product id.
pub async fn add_product_to_collection(
    gateway: &RpcGateway,
    product_id: &str,
    collection_id: &str,
) -> Result<String> {
    let params = ProductCollectionParams {
        p_product_id: ensure_uuid(product_id).to_string(),
        p_collection_id: ensure_uuid(collection_id).to_string(),
    };

    let data = gateway
        .call("add_product_to_collection", serde_json::to_value(params)?)
        .await
        .into_result()?;

    Ok(serde_json::from_value(data)?)
}

pub async fn remove_product_from_collection(
    gateway: &RpcGateway,
    product_id: &str,
    collection_id: &str,
) -> Result<bool> {
    let params = ProductCollectionParams {
        p_product_id: ensure_uuid(product_id).to_string(),
        p_collection_id: ensure_uuid(collection_id).to_string(),
    };

    let data = gateway
        .call(
            "remove_product_from_collection",
            serde_json::to_value(params)?,
        )
        .await
        .into_result()?;

    Ok(serde_json::from_value(data)?)
}
