//! Product note service
//!
//! A product carries at most one note per user; saving upserts it.

use crate::database::ProductNoteRow;
use crate::error::Result;
use crate::rpc::{ensure_uuid, ProductIdParams, RpcGateway, SaveNotesParams};

pub async fn get_product_notes(
    gateway: &RpcGateway,
    product_id: &str,
) -> Result<Vec<ProductNoteRow>> {
    let params = ProductIdParams {
        p_product_id: ensure_uuid(product_id).to_string(),
    };

    let data = gateway
        .call("get_product_notes", serde_json::to_value(params)?)
        .await
        .into_result()?;

    Ok(serde_json::from_value(data)?)
}

pub async fn save_product_notes(
    gateway: &RpcGateway,
    product_id: &str,
    content: &str,
) -> Result<()> {
    let params = SaveNotesParams {
        p_product_id: ensure_uuid(product_id).to_string(),
        p_content: content.to_string(),
    };

    gateway
        .call("save_product_notes", serde_json::to_value(params)?)
        .await
        .into_result()?;

    Ok(())
}
