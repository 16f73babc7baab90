//! Application state store
//!
//! Single in-memory mirror of the current user's products and collections.
//! Every operation calls the injected repository and reconciles the local
//! arrays from the response; fetch failures leave the previous state in
//! place (stale-on-error) and bubble up for a transient notification.

use super::backend::EntityRepository;
use super::entities::{blank_to_none, Collection, CollectionDraft, Product, ProductDraft};
use crate::config::NO_COLLECTION_SENTINEL;
use crate::database::NewProduct;
use crate::error::{AppError, Result};
use chrono::Utc;
use std::sync::Arc;

/// Load state per entity kind. There is no error state: a failed fetch
/// restores the previous flag and keeps the previous array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// No session, nothing fetched
    Uninitialized,
    /// A fetch is in flight
    Loading,
    /// The mirror holds the last successful response
    Loaded,
}

pub struct AppStore {
    repo: Option<Arc<dyn EntityRepository>>,
    products: Vec<Product>,
    collections: Vec<Collection>,
    products_state: LoadState,
    collections_state: LoadState,
}

impl AppStore {
    /// Store for an active session (local or remote repository).
    pub fn new(repo: Arc<dyn EntityRepository>) -> Self {
        Self {
            repo: Some(repo),
            products: Vec::new(),
            collections: Vec::new(),
            products_state: LoadState::Uninitialized,
            collections_state: LoadState::Uninitialized,
        }
    }

    /// Store with no session. Reads answer empty, mutations are refused.
    pub fn signed_out() -> Self {
        Self {
            repo: None,
            products: Vec::new(),
            collections: Vec::new(),
            products_state: LoadState::Uninitialized,
            collections_state: LoadState::Uninitialized,
        }
    }

    /// Drop the session and clear the mirror.
    pub fn sign_out(&mut self) {
        self.repo = None;
        self.products.clear();
        self.collections.clear();
        self.products_state = LoadState::Uninitialized;
        self.collections_state = LoadState::Uninitialized;
    }

    fn require_repo(&self) -> Result<Arc<dyn EntityRepository>> {
        self.repo.clone().ok_or_else(|| {
            AppError::Unauthorized("sign in to modify your library".to_string())
        })
    }

    // ===== Read access =====

    /// Whether a repository (local or remote) is attached.
    pub fn signed_in(&self) -> bool {
        self.repo.is_some()
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn collections(&self) -> &[Collection] {
        &self.collections
    }

    pub fn products_state(&self) -> LoadState {
        self.products_state
    }

    pub fn collections_state(&self) -> LoadState {
        self.collections_state
    }

    /// Local scan; never hits the repository.
    pub fn collection(&self, collection_id: &str) -> Option<&Collection> {
        self.collections.iter().find(|c| c.id == collection_id)
    }

    /// Derived count over the product mirror.
    pub fn product_count(&self, collection_id: &str) -> usize {
        self.products
            .iter()
            .filter(|p| p.collection_id.as_deref() == Some(collection_id))
            .count()
    }

    // ===== Fetch =====

    pub async fn fetch_collections(&mut self) -> Result<()> {
        let Some(repo) = self.repo.clone() else {
            self.collections.clear();
            self.collections_state = LoadState::Uninitialized;
            return Ok(());
        };

        let prior = self.collections_state;
        self.collections_state = LoadState::Loading;

        match repo.collections().await {
            Ok(rows) => {
                self.collections = rows.into_iter().map(Into::into).collect();
                self.collections_state = LoadState::Loaded;
                Ok(())
            }
            Err(e) => {
                // Stale-on-error: keep whatever was mirrored before
                self.collections_state = prior;
                Err(e)
            }
        }
    }

    pub async fn fetch_products(&mut self) -> Result<()> {
        let Some(repo) = self.repo.clone() else {
            self.products.clear();
            self.products_state = LoadState::Uninitialized;
            return Ok(());
        };

        let prior = self.products_state;
        self.products_state = LoadState::Loading;

        match repo.products().await {
            Ok(rows) => {
                self.products = rows.into_iter().map(Into::into).collect();
                self.products_state = LoadState::Loaded;
                Ok(())
            }
            Err(e) => {
                self.products_state = prior;
                Err(e)
            }
        }
    }

    // ===== Mutations =====

    /// Create a product and mirror it locally. When the draft names a
    /// collection (anything other than empty or the "none" sentinel),
    /// exactly one association call follows the create.
    pub async fn add_product(&mut self, draft: ProductDraft) -> Result<Product> {
        let repo = self.require_repo()?;

        let wants_collection =
            !draft.collection_id.is_empty() && draft.collection_id != NO_COLLECTION_SENTINEL;

        let id = repo
            .create_product(NewProduct {
                title: draft.title.clone(),
                description: blank_to_none(draft.description.clone()),
                price: blank_to_none(draft.price.clone()),
                image_url: blank_to_none(draft.image_url.clone()),
                product_url: blank_to_none(draft.product_url.clone()),
                source_name: blank_to_none(draft.source_name.clone()),
                collection_id: None,
            })
            .await?;

        let collection_id = if wants_collection {
            repo.add_product_to_collection(&id, &draft.collection_id)
                .await?;
            Some(draft.collection_id)
        } else {
            None
        };

        let product = Product {
            id,
            title: draft.title,
            description: draft.description,
            price: draft.price,
            image_url: draft.image_url,
            product_url: draft.product_url,
            source_name: draft.source_name,
            date_added: Utc::now(),
            collection_id,
        };

        self.products.push(product.clone());

        tracing::info!("Added product: {}", product.id);
        Ok(product)
    }

    /// Create a collection and mirror it locally, correlated by the
    /// identifier returned from the create call.
    pub async fn add_collection(&mut self, draft: CollectionDraft) -> Result<Collection> {
        let repo = self.require_repo()?;

        let description = blank_to_none(draft.description.clone());
        let id = repo
            .create_collection(&draft.name, description.as_deref(), &draft.color)
            .await?;

        let collection = Collection {
            id,
            name: draft.name,
            description: draft.description,
            color: draft.color,
            created_at: Utc::now(),
        };

        self.collections.push(collection.clone());

        tracing::info!("Added collection: {}", collection.id);
        Ok(collection)
    }

    /// Delete a product. The mirror drops it only on an explicit true
    /// from the backend.
    pub async fn delete_product(&mut self, product_id: &str) -> Result<bool> {
        let repo = self.require_repo()?;

        let deleted = repo.delete_product(product_id).await?;
        if deleted {
            self.products.retain(|p| p.id != product_id);
            tracing::info!("Deleted product: {}", product_id);
        }

        Ok(deleted)
    }

    /// Delete a collection. Mirrors the backend cascade: every local
    /// product referencing it goes too.
    pub async fn delete_collection(&mut self, collection_id: &str) -> Result<bool> {
        let repo = self.require_repo()?;

        let deleted = repo.delete_collection(collection_id).await?;
        if deleted {
            self.collections.retain(|c| c.id != collection_id);
            self.products
                .retain(|p| p.collection_id.as_deref() != Some(collection_id));
            tracing::info!("Deleted collection: {}", collection_id);
        }

        Ok(deleted)
    }

    /// Detach a product from its collection, mirroring locally on success.
    pub async fn remove_product_from_collection(
        &mut self,
        product_id: &str,
        collection_id: &str,
    ) -> Result<bool> {
        let repo = self.require_repo()?;

        let removed = repo
            .remove_product_from_collection(product_id, collection_id)
            .await?;
        if removed {
            if let Some(product) = self.products.iter_mut().find(|p| p.id == product_id) {
                product.collection_id = None;
            }
        }

        Ok(removed)
    }

    /// Cache-first single-product lookup. A miss fetches from the
    /// repository and backfills the mirror (guarded against duplicates).
    pub async fn get_product(&mut self, product_id: &str) -> Result<Option<Product>> {
        if let Some(product) = self.products.iter().find(|p| p.id == product_id) {
            return Ok(Some(product.clone()));
        }

        let Some(repo) = self.repo.clone() else {
            return Ok(None);
        };

        match repo.product(product_id).await? {
            Some(row) => {
                let product: Product = row.into();
                if !self.products.iter().any(|p| p.id == product.id) {
                    self.products.push(product.clone());
                }
                Ok(Some(product))
            }
            None => Ok(None),
        }
    }

    /// Always asks the repository; the result is returned to the caller
    /// and never merged into the mirror.
    pub async fn products_by_collection(&self, collection_id: &str) -> Result<Vec<Product>> {
        let Some(repo) = self.repo.clone() else {
            return Ok(Vec::new());
        };

        let rows = repo.products_by_collection(collection_id).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}
