//! Comparison link service

use crate::database::{NewProductLink, ProductLinkRow, UpdateProductLink};
use crate::error::Result;
use crate::rpc::{ensure_uuid, LinkIdParams, ProductIdParams, RpcGateway, SaveLinkParams, UpdateLinkParams};

pub async fn get_product_links(
    gateway: &RpcGateway,
    product_id: &str,
) -> Result<Vec<ProductLinkRow>> {
    let params = ProductIdParams {
        p_product_id: ensure_uuid(product_id).to_string(),
    };

    let data = gateway
        .call("get_product_links", serde_json::to_value(params)?)
        .await
        .into_result()?;

    Ok(serde_json::from_value(data)?)
}

/// Save a comparison link. Returns the new link id.
pub async fn save_product_link(gateway: &RpcGateway, link: NewProductLink) -> Result<String> {
    let params = SaveLinkParams {
        p_product_id: ensure_uuid(&link.product_id).to_string(),
        p_source_name: link.source_name,
        p_product_name: link.product_name,
        p_url: link.url,
        p_price: link.price,
        p_rating: link.rating,
        p_review_count: link.review_count,
        p_comment: link.comment,
    };

    let data = gateway
        .call("save_product_link", serde_json::to_value(params)?)
        .await
        .into_result()?;

    Ok(serde_json::from_value(data)?)
}

pub async fn update_product_link(
    gateway: &RpcGateway,
    link: UpdateProductLink,
) -> Result<ProductLinkRow> {
    let params = UpdateLinkParams {
        p_link_id: ensure_uuid(&link.id).to_string(),
        p_source_name: link.source_name,
        p_product_name: link.product_name,
        p_url: link.url,
        p_price: link.price,
        p_rating: link.rating,
        p_review_count: link.review_count,
        p_comment: link.comment,
    };

    let data = gateway
        .call("update_product_link", serde_json::to_value(params)?)
        .await
        .into_result()?;

    Ok(serde_json::from_value(data)?)
}

pub async fn delete_product_link(gateway: &RpcGateway, link_id: &str) -> Result<bool> {
    let params = LinkIdParams {
        p_link_id: ensure_uuid(link_id).to_string(),
    };

    let data = gateway
        .call("delete_product_link", serde_json::to_value(params)?)
        .await
        .into_result()?;

    Ok(serde_json::from_value(data)?)
}
