//! Entity repository seam
//!
//! Every backend capability the client uses, behind one trait so the
//! store and the page view-models never know which persistence mode is
//! active.

use crate::database::{
    CollectionRow, ExternalSourceRow, NewExternalSource, NewProduct, NewProductLink,
    ProductLinkRow, ProductNoteRow, ProductRow, UpdateExternalSource, UpdateProduct,
    UpdateProductLink,
};
use crate::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait EntityRepository: Send + Sync {
    // Collections
    async fn collections(&self) -> Result<Vec<CollectionRow>>;
    /// Returns the new collection id.
    async fn create_collection(
        &self,
        name: &str,
        description: Option<&str>,
        color: &str,
    ) -> Result<String>;
    async fn delete_collection(&self, collection_id: &str) -> Result<bool>;

    // Products
    async fn products(&self) -> Result<Vec<ProductRow>>;
    /// Returns the new product id.
    async fn create_product(&self, product: NewProduct) -> Result<String>;
    async fn update_product(&self, product: UpdateProduct) -> Result<bool>;
    async fn delete_product(&self, product_id: &str) -> Result<bool>;
    async fn product(&self, product_id: &str) -> Result<Option<ProductRow>>;
    async fn products_by_collection(&self, collection_id: &str) -> Result<Vec<ProductRow>>;
    async fn add_product_to_collection(
        &self,
        product_id: &str,
        collection_id: &str,
    ) -> Result<String>;
    async fn remove_product_from_collection(
        &self,
        product_id: &str,
        collection_id: &str,
    ) -> Result<bool>;

    // Notes
    async fn notes(&self, product_id: &str) -> Result<Vec<ProductNoteRow>>;
    async fn save_notes(&self, product_id: &str, content: &str) -> Result<()>;

    // Comparison links
    async fn links(&self, product_id: &str) -> Result<Vec<ProductLinkRow>>;
    async fn save_link(&self, link: NewProductLink) -> Result<String>;
    async fn update_link(&self, link: UpdateProductLink) -> Result<ProductLinkRow>;
    async fn delete_link(&self, link_id: &str) -> Result<bool>;

    // External sources
    async fn sources(&self, product_id: &str) -> Result<Vec<ExternalSourceRow>>;
    async fn save_source(&self, source: NewExternalSource) -> Result<String>;
    async fn update_source(&self, source: UpdateExternalSource) -> Result<ExternalSourceRow>;
    async fn delete_source(&self, source_id: &str) -> Result<bool>;
}
