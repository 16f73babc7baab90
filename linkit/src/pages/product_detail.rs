//! Product detail screen
//!
//! Loads the product plus its three satellite sections concurrently. A
//! failed section logs a warning and renders empty rather than taking
//! the whole page down; only a missing product is fatal to the load.

use crate::database::{ExternalSourceRow, ProductLinkRow};
use crate::error::{AppError, Result};
use crate::store::{EntityRepository, Product};
use std::sync::Arc;

pub struct ProductDetailPage {
    pub product: Product,
    pub notes: String,
    pub links: Vec<ProductLinkRow>,
    pub sources: Vec<ExternalSourceRow>,
}

impl ProductDetailPage {
    /// Fetch all four sections in parallel.
    pub async fn load(repo: Arc<dyn EntityRepository>, product_id: &str) -> Result<Self> {
        let (product, notes, links, sources) = tokio::join!(
            repo.product(product_id),
            repo.notes(product_id),
            repo.links(product_id),
            repo.sources(product_id),
        );

        let product = product?
            .ok_or_else(|| AppError::ProductNotFound(product_id.to_string()))?
            .into();

        let notes = match notes {
            // Current content is the most recent row, if any
            Ok(rows) => rows.into_iter().next().map(|n| n.content).unwrap_or_default(),
            Err(e) => {
                tracing::warn!("Failed to load notes for {}: {}", product_id, e);
                String::new()
            }
        };

        let links = match links {
            Ok(rows) => rows,
            Err(e) => {
                tracing::warn!("Failed to load links for {}: {}", product_id, e);
                Vec::new()
            }
        };

        let sources = match sources {
            Ok(rows) => rows,
            Err(e) => {
                tracing::warn!("Failed to load sources for {}: {}", product_id, e);
                Vec::new()
            }
        };

        Ok(Self {
            product,
            notes,
            links,
            sources,
        })
    }

    /// Display-only reorder; the stored order is untouched.
    pub fn move_link_up(&mut self, link_id: &str) {
        if let Some(idx) = self.links.iter().position(|l| l.id == link_id) {
            if idx > 0 {
                self.links.swap(idx, idx - 1);
            }
        }
    }

    pub fn move_link_down(&mut self, link_id: &str) {
        if let Some(idx) = self.links.iter().position(|l| l.id == link_id) {
            if idx + 1 < self.links.len() {
                self.links.swap(idx, idx + 1);
            }
        }
    }

    pub fn move_source_up(&mut self, source_id: &str) {
        if let Some(idx) = self.sources.iter().position(|s| s.id == source_id) {
            if idx > 0 {
                self.sources.swap(idx, idx - 1);
            }
        }
    }

    pub fn move_source_down(&mut self, source_id: &str) {
        if let Some(idx) = self.sources.iter().position(|s| s.id == source_id) {
            if idx + 1 < self.sources.len() {
                self.sources.swap(idx, idx + 1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{NewExternalSource, NewProductLink};
    use crate::store::store::tests::FakeRepository;
    use std::sync::atomic::Ordering;

    fn repo_with_product() -> Arc<FakeRepository> {
        let repo = Arc::new(FakeRepository::default());
        repo.seed_product("p1", "Lamp", None);
        repo
    }

    #[tokio::test]
    async fn test_load_missing_product_fails() {
        let repo = Arc::new(FakeRepository::default());
        let result = ProductDetailPage::load(repo, "missing").await;
        assert!(matches!(result, Err(AppError::ProductNotFound(_))));
    }

    #[tokio::test]
    async fn test_load_assembles_all_sections() {
        let repo = repo_with_product();
        repo.save_notes("p1", "warm light, check bulb type").await.unwrap();
        repo.save_link(NewProductLink {
            product_id: "p1".to_string(),
            source_name: "Amazon".to_string(),
            product_name: "Lamp".to_string(),
            url: "https://example.com/lamp".to_string(),
            price: Some(39.99),
            ..Default::default()
        })
        .await
        .unwrap();
        repo.save_source(NewExternalSource {
            product_id: "p1".to_string(),
            title: "Review video".to_string(),
            url: "https://example.com/video".to_string(),
            source_type: "youtube".to_string(),
        })
        .await
        .unwrap();

        let page = ProductDetailPage::load(repo, "p1").await.unwrap();

        assert_eq!(page.product.title, "Lamp");
        assert_eq!(page.notes, "warm light, check bulb type");
        assert_eq!(page.links.len(), 1);
        assert_eq!(page.sources.len(), 1);
    }

    #[tokio::test]
    async fn test_failed_section_renders_empty() {
        let repo = repo_with_product();
        repo.fail_notes.store(true, Ordering::SeqCst);

        let page = ProductDetailPage::load(repo, "p1").await.unwrap();

        assert_eq!(page.product.id, "p1");
        assert_eq!(page.notes, "");
    }

    #[tokio::test]
    async fn test_reorder_is_local_only() {
        let repo = repo_with_product();
        let a = repo
            .save_link(NewProductLink {
                product_id: "p1".to_string(),
                source_name: "Amazon".to_string(),
                url: "https://a.example".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        let b = repo
            .save_link(NewProductLink {
                product_id: "p1".to_string(),
                source_name: "eBay".to_string(),
                url: "https://b.example".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();

        let mut page = ProductDetailPage::load(repo.clone(), "p1").await.unwrap();
        assert_eq!(page.links[0].id, a);

        page.move_link_down(&a);
        assert_eq!(page.links[0].id, b);
        assert_eq!(page.links[1].id, a);

        // Already at the edge: no change
        page.move_link_down(&a);
        assert_eq!(page.links[1].id, a);
        page.move_link_up(&b);
        assert_eq!(page.links[0].id, b);

        // A fresh load sees the stored order
        let reloaded = ProductDetailPage::load(repo, "p1").await.unwrap();
        assert_eq!(reloaded.links[0].id, a);
    }
}
