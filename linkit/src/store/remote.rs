//! Remote repository
//!
//! Authenticated mode: every capability delegates to the corresponding
//! stored procedure through the RPC gateway, with the session's bearer
//! token attached.

use super::backend::EntityRepository;
use crate::database::{
    CollectionRow, ExternalSourceRow, NewExternalSource, NewProduct, NewProductLink,
    ProductLinkRow, ProductNoteRow, ProductRow, UpdateExternalSource, UpdateProduct,
    UpdateProductLink,
};
use crate::error::Result;
use crate::rpc::RpcGateway;
use crate::services::{collections, links, notes, products, sources};
use crate::session::Session;
use async_trait::async_trait;

pub struct RemoteRepository {
    gateway: RpcGateway,
}

impl RemoteRepository {
    pub fn new(base_url: &str, session: &Session) -> Self {
        Self {
            gateway: RpcGateway::new(base_url, Some(session.token.clone())),
        }
    }

    pub fn from_gateway(gateway: RpcGateway) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl EntityRepository for RemoteRepository {
    async fn collections(&self) -> Result<Vec<CollectionRow>> {
        collections::get_user_collections(&self.gateway).await
    }

    async fn create_collection(
        &self,
        name: &str,
        description: Option<&str>,
        color: &str,
    ) -> Result<String> {
        collections::create_collection(&self.gateway, name, description, color).await
    }

    async fn delete_collection(&self, collection_id: &str) -> Result<bool> {
        collections::delete_collection(&self.gateway, collection_id).await
    }

    async fn products(&self) -> Result<Vec<ProductRow>> {
        products::get_user_products(&self.gateway).await
    }

    async fn create_product(&self, product: NewProduct) -> Result<String> {
        products::create_product(&self.gateway, product).await
    }

    async fn update_product(&self, product: UpdateProduct) -> Result<bool> {
        products::update_product(&self.gateway, product).await
    }

    async fn delete_product(&self, product_id: &str) -> Result<bool> {
        products::delete_product(&self.gateway, product_id).await
    }

    async fn product(&self, product_id: &str) -> Result<Option<ProductRow>> {
        products::get_product(&self.gateway, product_id).await
    }

    async fn products_by_collection(&self, collection_id: &str) -> Result<Vec<ProductRow>> {
        collections::get_products_by_collection(&self.gateway, collection_id).await
    }

    async fn add_product_to_collection(
        &self,
        product_id: &str,
        collection_id: &str,
    ) -> Result<String> {
        collections::add_product_to_collection(&self.gateway, product_id, collection_id).await
    }

    async fn remove_product_from_collection(
        &self,
        product_id: &str,
        collection_id: &str,
    ) -> Result<bool> {
        collections::remove_product_from_collection(&self.gateway, product_id, collection_id).await
    }

    async fn notes(&self, product_id: &str) -> Result<Vec<ProductNoteRow>> {
        notes::get_product_notes(&self.gateway, product_id).await
    }

    async fn save_notes(&self, product_id: &str, content: &str) -> Result<()> {
        notes::save_product_notes(&self.gateway, product_id, content).await
    }

    async fn links(&self, product_id: &str) -> Result<Vec<ProductLinkRow>> {
        links::get_product_links(&self.gateway, product_id).await
    }

    async fn save_link(&self, link: NewProductLink) -> Result<String> {
        links::save_product_link(&self.gateway, link).await
    }

    async fn update_link(&self, link: UpdateProductLink) -> Result<ProductLinkRow> {
        links::update_product_link(&self.gateway, link).await
    }

    async fn delete_link(&self, link_id: &str) -> Result<bool> {
        links::delete_product_link(&self.gateway, link_id).await
    }

    async fn sources(&self, product_id: &str) -> Result<Vec<ExternalSourceRow>> {
        sources::get_external_sources(&self.gateway, product_id).await
    }

    async fn save_source(&self, source: NewExternalSource) -> Result<String> {
        sources::save_external_source(&self.gateway, source).await
    }

    async fn update_source(&self, source: UpdateExternalSource) -> Result<ExternalSourceRow> {
        sources::update_external_source(&self.gateway, source).await
    }

    async fn delete_source(&self, source_id: &str) -> Result<bool> {
        sources::delete_external_source(&self.gateway, source_id).await
    }
}
