//! External source service

use crate::database::{ExternalSourceRow, NewExternalSource, UpdateExternalSource};
use crate::error::Result;
use crate::rpc::{
    ensure_uuid, ProductIdParams, RpcGateway, SaveSourceParams, SourceIdParams, UpdateSourceParams,
};

pub async fn get_external_sources(
    gateway: &RpcGateway,
    product_id: &str,
) -> Result<Vec<ExternalSourceRow>> {
    let params = ProductIdParams {
        p_product_id: ensure_uuid(product_id).to_string(),
    };

    let data = gateway
        .call("get_external_sources", serde_json::to_value(params)?)
        .await
        .into_result()?;

    Ok(serde_json::from_value(data)?)
}

/// Save an external source. Returns the new source id.
pub async fn save_external_source(
    gateway: &RpcGateway,
    source: NewExternalSource,
) -> Result<String> {
    let params = SaveSourceParams {
        p_product_id: ensure_uuid(&source.product_id).to_string(),
        p_title: source.title,
        p_url: source.url,
        p_source_type: source.source_type,
    };

    let data = gateway
        .call("save_external_source", serde_json::to_value(params)?)
        .await
        .into_result()?;

    Ok(serde_json::from_value(data)?)
}

pub async fn update_external_source(
    gateway: &RpcGateway,
    source: UpdateExternalSource,
) -> Result<ExternalSourceRow> {
    let params = UpdateSourceParams {
        p_source_id: ensure_uuid(&source.id).to_string(),
        p_title: source.title,
        p_url: source.url,
        p_source_type: source.source_type,
    };

    let data = gateway
        .call("update_external_source", serde_json::to_value(params)?)
        .await
        .into_result()?;

    Ok(serde_json::from_value(data)?)
}

pub async fn delete_external_source(gateway: &RpcGateway, source_id: &str) -> Result<bool> {
    let params = SourceIdParams {
        p_source_id: ensure_uuid(source_id).to_string(),
    };

    let data = gateway
        .call("delete_external_source", serde_json::to_value(params)?)
        .await
        .into_result()?;

    Ok(serde_json::from_value(data)?)
}
