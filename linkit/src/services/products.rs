//! Product service
//!
//! Typed wrappers over the product procedures.

use crate::database::{NewProduct, ProductRow, UpdateProduct};
use crate::error::Result;
use crate::rpc::{
    ensure_uuid, CreateProductParams, ProductIdParams, RpcGateway, UpdateProductParams,
};
use serde_json::json;

pub async fn get_user_products(gateway: &RpcGateway) -> Result<Vec<ProductRow>> {
    let data = gateway
        .call("get_user_products", json!({}))
        .await
        .into_result()?;

    Ok(serde_json::from_value(data)?)
}

/// Create a product. Returns the new product id.
pub async fn create_product(gateway: &RpcGateway, product: NewProduct) -> Result<String> {
    let params = CreateProductParams {
        p_title: product.title,
        p_description: product.description,
        p_price: product.price,
        p_image_url: product.image_url,
        p_product_url: product.product_url,
        p_source_name: product.source_name,
        p_collection_id: product.collection_id,
    };

    let data = gateway
        .call("create_product", serde_json::to_value(params)?)
        .await
        .into_result()?;

    Ok(serde_json::from_value(data)?)
}

pub async fn update_product(gateway: &RpcGateway, product: UpdateProduct) -> Result<bool> {
    let params = UpdateProductParams {
        p_product_id: ensure_uuid(&product.id).to_string(),
        p_title: product.title,
        p_description: product.description,
        p_price: product.price,
        p_image_url: product.image_url,
        p_product_url: product.product_url,
        p_source_name: product.source_name,
        p_collection_id: product.collection_id,
    };

    let data = gateway
        .call("update_product", serde_json::to_value(params)?)
        .await
        .into_result()?;

    Ok(serde_json::from_value(data)?)
}

pub async fn delete_product(gateway: &RpcGateway, product_id: &str) -> Result<bool> {
    let params = ProductIdParams {
        p_product_id: ensure_uuid(product_id).to_string(),
    };

    let data = gateway
        .call("delete_product", serde_json::to_value(params)?)
        .await
        .into_result()?;

    Ok(serde_json::from_value(data)?)
}

/// Fetch one product. The backend answers with a zero- or one-element
/// list; the first element is the row.
pub async fn get_product(gateway: &RpcGateway, product_id: &str) -> Result<Option<ProductRow>> {
    let params = ProductIdParams {
        p_product_id: ensure_uuid(product_id).to_string(),
    };

    let data = gateway
        .call("get_product", serde_json::to_value(params)?)
        .await
        .into_result()?;

    let rows: Vec<ProductRow> = serde_json::from_value(data)?;
    Ok(rows.into_iter().next())
}
