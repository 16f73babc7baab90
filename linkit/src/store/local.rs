//! On-device repository
//!
//! Unauthenticated mode keeps everything in a local SQLite file under a
//! fixed device user. Identifiers are generated locally but in canonical
//! UUID form, so a later switch to the remote mode never reintroduces the
//! legacy timestamp identifiers.

use super::backend::EntityRepository;
use crate::database::{
    self, CollectionRow, ExternalSourceRow, NewCollection, NewExternalSource, NewProduct,
    NewProductLink, ProductLinkRow, ProductNoteRow, ProductRow, Repository,
    UpdateExternalSource, UpdateProduct, UpdateProductLink,
};
use crate::error::Result;
use async_trait::async_trait;
use std::path::Path;

/// Fixed user id owning all rows in the on-device database.
pub const LOCAL_USER_ID: &str = "local-device";

pub struct LocalRepository {
    repo: Repository,
}

impl LocalRepository {
    /// Open (creating if needed) the on-device database.
    pub async fn open(data_dir: &Path) -> Result<Self> {
        let pool = database::create_pool(&data_dir.join("linkit.db")).await?;
        let repo = Repository::new(pool);
        repo.ensure_user(LOCAL_USER_ID, "local@device").await?;

        Ok(Self { repo })
    }

    /// Wrap an existing repository. The device user must already exist.
    pub fn from_repository(repo: Repository) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl EntityRepository for LocalRepository {
    async fn collections(&self) -> Result<Vec<CollectionRow>> {
        self.repo.list_collections(LOCAL_USER_ID).await
    }

    async fn create_collection(
        &self,
        name: &str,
        description: Option<&str>,
        color: &str,
    ) -> Result<String> {
        let row = self
            .repo
            .create_collection(
                LOCAL_USER_ID,
                NewCollection {
                    name: name.to_string(),
                    description: description.map(str::to_string),
                    color: color.to_string(),
                },
            )
            .await?;

        Ok(row.id)
    }

    async fn delete_collection(&self, collection_id: &str) -> Result<bool> {
        self.repo.delete_collection(LOCAL_USER_ID, collection_id).await
    }

    async fn products(&self) -> Result<Vec<ProductRow>> {
        self.repo.list_products(LOCAL_USER_ID).await
    }

    async fn create_product(&self, product: NewProduct) -> Result<String> {
        let row = self.repo.create_product(LOCAL_USER_ID, product).await?;
        Ok(row.id)
    }

    async fn update_product(&self, product: UpdateProduct) -> Result<bool> {
        self.repo.update_product(LOCAL_USER_ID, product).await
    }

    async fn delete_product(&self, product_id: &str) -> Result<bool> {
        self.repo.delete_product(LOCAL_USER_ID, product_id).await
    }

    async fn product(&self, product_id: &str) -> Result<Option<ProductRow>> {
        self.repo.get_product(LOCAL_USER_ID, product_id).await
    }

    async fn products_by_collection(&self, collection_id: &str) -> Result<Vec<ProductRow>> {
        self.repo
            .products_by_collection(LOCAL_USER_ID, collection_id)
            .await
    }

    async fn add_product_to_collection(
        &self,
        product_id: &str,
        collection_id: &str,
    ) -> Result<String> {
        self.repo
            .add_product_to_collection(LOCAL_USER_ID, product_id, collection_id)
            .await
    }

    async fn remove_product_from_collection(
        &self,
        product_id: &str,
        collection_id: &str,
    ) -> Result<bool> {
        self.repo
            .remove_product_from_collection(LOCAL_USER_ID, product_id, collection_id)
            .await
    }

    async fn notes(&self, product_id: &str) -> Result<Vec<ProductNoteRow>> {
        self.repo.get_notes(LOCAL_USER_ID, product_id).await
    }

    async fn save_notes(&self, product_id: &str, content: &str) -> Result<()> {
        self.repo.save_notes(LOCAL_USER_ID, product_id, content).await
    }

    async fn links(&self, product_id: &str) -> Result<Vec<ProductLinkRow>> {
        self.repo.list_links(LOCAL_USER_ID, product_id).await
    }

    async fn save_link(&self, link: NewProductLink) -> Result<String> {
        let row = self.repo.save_link(LOCAL_USER_ID, link).await?;
        Ok(row.id)
    }

    async fn update_link(&self, link: UpdateProductLink) -> Result<ProductLinkRow> {
        self.repo.update_link(LOCAL_USER_ID, link).await
    }

    async fn delete_link(&self, link_id: &str) -> Result<bool> {
        self.repo.delete_link(LOCAL_USER_ID, link_id).await
    }

    async fn sources(&self, product_id: &str) -> Result<Vec<ExternalSourceRow>> {
        self.repo.list_sources(LOCAL_USER_ID, product_id).await
    }

    async fn save_source(&self, source: NewExternalSource) -> Result<String> {
        let row = self.repo.save_source(LOCAL_USER_ID, source).await?;
        Ok(row.id)
    }

    async fn update_source(&self, source: UpdateExternalSource) -> Result<ExternalSourceRow> {
        self.repo.update_source(LOCAL_USER_ID, source).await
    }

    async fn delete_source(&self, source_id: &str) -> Result<bool> {
        self.repo.delete_source(LOCAL_USER_ID, source_id).await
    }
}
