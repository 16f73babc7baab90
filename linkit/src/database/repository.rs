//! Repository layer for database operations
//!
//! CRUD operations for all entities, scoped to the owning user.
//! Child-entity operations verify product ownership before touching rows.

use super::models::*;
use crate::error::{AppError, Result};
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

/// Repository for database operations
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ===== Users and sessions =====

    /// Create a user with a pre-hashed password
    pub async fn create_user(&self, email: &str, password_hash: &str) -> Result<UserRow> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        let user = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (id, email, password_hash, created_at)
            VALUES (?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&id)
        .bind(email)
        .bind(password_hash)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!("Created user: {}", id);
        Ok(user)
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<UserRow>> {
        let user = sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    /// Insert a fixed user if missing. Used by the on-device repository,
    /// which has no sign-up flow.
    pub async fn ensure_user(&self, id: &str, email: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT OR IGNORE INTO users (id, email, password_hash, created_at)
            VALUES (?, ?, '', ?)
            "#,
        )
        .bind(id)
        .bind(email)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn create_session(&self, user_id: &str) -> Result<SessionRow> {
        let token = Uuid::new_v4().to_string();
        let now = Utc::now();

        let session = sqlx::query_as::<_, SessionRow>(
            r#"
            INSERT INTO sessions (token, user_id, created_at)
            VALUES (?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&token)
        .bind(user_id)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!("Created session for user: {}", user_id);
        Ok(session)
    }

    /// Resolve a bearer token to its user id
    pub async fn user_for_token(&self, token: &str) -> Result<Option<String>> {
        let user_id: Option<String> =
            sqlx::query_scalar("SELECT user_id FROM sessions WHERE token = ?")
                .bind(token)
                .fetch_optional(&self.pool)
                .await?;

        Ok(user_id)
    }

    pub async fn delete_session(&self, token: &str) -> Result<bool> {
        let rows = sqlx::query("DELETE FROM sessions WHERE token = ?")
            .bind(token)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows > 0)
    }

    // ===== Collections =====

    pub async fn create_collection(&self, user_id: &str, req: NewCollection) -> Result<CollectionRow> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        let collection = sqlx::query_as::<_, CollectionRow>(
            r#"
            INSERT INTO collections (id, user_id, name, description, color, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&id)
        .bind(user_id)
        .bind(&req.name)
        .bind(&req.description)
        .bind(&req.color)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!("Created collection: {}", id);
        Ok(collection)
    }

    pub async fn list_collections(&self, user_id: &str) -> Result<Vec<CollectionRow>> {
        let collections = sqlx::query_as::<_, CollectionRow>(
            r#"
            SELECT * FROM collections WHERE user_id = ? ORDER BY created_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(collections)
    }

    /// Delete a collection and every product it contains, in one
    /// transaction. Returns false when the collection does not exist.
    pub async fn delete_collection(&self, user_id: &str, id: &str) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM products WHERE collection_id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        let rows = sqlx::query("DELETE FROM collections WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;

        tracing::debug!("Deleted collection: {} (existed: {})", id, rows > 0);
        Ok(rows > 0)
    }

    /// Verify a collection belongs to the user before a product may
    /// reference it. A cross-user reference would survive the owner's
    /// cascade delete and leave the collection undeletable.
    async fn assert_collection_owner(&self, user_id: &str, collection_id: &str) -> Result<()> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM collections WHERE id = ? AND user_id = ?)",
        )
        .bind(collection_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        if !exists {
            return Err(AppError::CollectionNotFound(collection_id.to_string()));
        }

        Ok(())
    }

    // ===== Products =====

    pub async fn create_product(&self, user_id: &str, req: NewProduct) -> Result<ProductRow> {
        if let Some(collection_id) = &req.collection_id {
            self.assert_collection_owner(user_id, collection_id).await?;
        }

        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        let product = sqlx::query_as::<_, ProductRow>(
            r#"
            INSERT INTO products
                (id, user_id, title, description, price, image_url, product_url,
                 source_name, collection_id, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&id)
        .bind(user_id)
        .bind(&req.title)
        .bind(&req.description)
        .bind(&req.price)
        .bind(&req.image_url)
        .bind(&req.product_url)
        .bind(&req.source_name)
        .bind(&req.collection_id)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!("Created product: {}", id);
        Ok(product)
    }

    pub async fn list_products(&self, user_id: &str) -> Result<Vec<ProductRow>> {
        let products = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT * FROM products WHERE user_id = ? ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    pub async fn get_product(&self, user_id: &str, id: &str) -> Result<Option<ProductRow>> {
        let product = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT * FROM products WHERE id = ? AND user_id = ?
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    pub async fn update_product(&self, user_id: &str, req: UpdateProduct) -> Result<bool> {
        if let Some(collection_id) = &req.collection_id {
            self.assert_collection_owner(user_id, collection_id).await?;
        }

        let rows = sqlx::query(
            r#"
            UPDATE products
            SET title = ?, description = ?, price = ?, image_url = ?,
                product_url = ?, source_name = ?, collection_id = ?
            WHERE id = ? AND user_id = ?
            "#,
        )
        .bind(&req.title)
        .bind(&req.description)
        .bind(&req.price)
        .bind(&req.image_url)
        .bind(&req.product_url)
        .bind(&req.source_name)
        .bind(&req.collection_id)
        .bind(&req.id)
        .bind(user_id)
        .execute(&self.pool)
        .await?
        .rows_affected();

        tracing::debug!("Updated product: {} (existed: {})", req.id, rows > 0);
        Ok(rows > 0)
    }

    pub async fn delete_product(&self, user_id: &str, id: &str) -> Result<bool> {
        let rows = sqlx::query("DELETE FROM products WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::debug!("Deleted product: {} (existed: {})", id, rows > 0);
        Ok(rows > 0)
    }

    pub async fn products_by_collection(
        &self,
        user_id: &str,
        collection_id: &str,
    ) -> Result<Vec<ProductRow>> {
        let products = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT * FROM products
            WHERE user_id = ? AND collection_id = ?
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .bind(collection_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Attach a product to a collection. Returns the product id.
    pub async fn add_product_to_collection(
        &self,
        user_id: &str,
        product_id: &str,
        collection_id: &str,
    ) -> Result<String> {
        self.assert_collection_owner(user_id, collection_id).await?;

        let rows = sqlx::query(
            "UPDATE products SET collection_id = ? WHERE id = ? AND user_id = ?",
        )
        .bind(collection_id)
        .bind(product_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if rows == 0 {
            return Err(AppError::ProductNotFound(product_id.to_string()));
        }

        tracing::debug!("Attached product {} to collection {}", product_id, collection_id);
        Ok(product_id.to_string())
    }

    pub async fn remove_product_from_collection(
        &self,
        user_id: &str,
        product_id: &str,
        collection_id: &str,
    ) -> Result<bool> {
        let rows = sqlx::query(
            r#"
            UPDATE products SET collection_id = NULL
            WHERE id = ? AND user_id = ? AND collection_id = ?
            "#,
        )
        .bind(product_id)
        .bind(user_id)
        .bind(collection_id)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(rows > 0)
    }

    // ===== Comparison links =====

    /// Verify a product belongs to the user before touching its children.
    async fn assert_product_owner(&self, user_id: &str, product_id: &str) -> Result<()> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM products WHERE id = ? AND user_id = ?)",
        )
        .bind(product_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        if !exists {
            return Err(AppError::ProductNotFound(product_id.to_string()));
        }

        Ok(())
    }

    pub async fn list_links(&self, user_id: &str, product_id: &str) -> Result<Vec<ProductLinkRow>> {
        self.assert_product_owner(user_id, product_id).await?;

        let links = sqlx::query_as::<_, ProductLinkRow>(
            r#"
            SELECT * FROM product_links WHERE product_id = ? ORDER BY created_at ASC
            "#,
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(links)
    }

    pub async fn save_link(&self, user_id: &str, req: NewProductLink) -> Result<ProductLinkRow> {
        self.assert_product_owner(user_id, &req.product_id).await?;

        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        let link = sqlx::query_as::<_, ProductLinkRow>(
            r#"
            INSERT INTO product_links
                (id, product_id, source_name, product_name, url, price, rating,
                 review_count, comment, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&id)
        .bind(&req.product_id)
        .bind(&req.source_name)
        .bind(&req.product_name)
        .bind(&req.url)
        .bind(req.price)
        .bind(req.rating)
        .bind(req.review_count)
        .bind(&req.comment)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!("Created link: {} for product: {}", id, req.product_id);
        Ok(link)
    }

    pub async fn update_link(&self, user_id: &str, req: UpdateProductLink) -> Result<ProductLinkRow> {
        let now = Utc::now();

        let link = sqlx::query_as::<_, ProductLinkRow>(
            r#"
            UPDATE product_links
            SET source_name = ?, product_name = ?, url = ?, price = ?,
                rating = ?, review_count = ?, comment = ?, updated_at = ?
            WHERE id = ?
              AND product_id IN (SELECT id FROM products WHERE user_id = ?)
            RETURNING *
            "#,
        )
        .bind(&req.source_name)
        .bind(&req.product_name)
        .bind(&req.url)
        .bind(req.price)
        .bind(req.rating)
        .bind(req.review_count)
        .bind(&req.comment)
        .bind(now)
        .bind(&req.id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::Generic(format!("Link not found: {}", req.id)))?;

        tracing::debug!("Updated link: {}", req.id);
        Ok(link)
    }

    pub async fn delete_link(&self, user_id: &str, id: &str) -> Result<bool> {
        let rows = sqlx::query(
            r#"
            DELETE FROM product_links
            WHERE id = ?
              AND product_id IN (SELECT id FROM products WHERE user_id = ?)
            "#,
        )
        .bind(id)
        .bind(user_id)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(rows > 0)
    }

    // ===== External sources =====

    pub async fn list_sources(
        &self,
        user_id: &str,
        product_id: &str,
    ) -> Result<Vec<ExternalSourceRow>> {
        self.assert_product_owner(user_id, product_id).await?;

        let sources = sqlx::query_as::<_, ExternalSourceRow>(
            r#"
            SELECT * FROM external_sources WHERE product_id = ? ORDER BY created_at ASC
            "#,
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(sources)
    }

    pub async fn save_source(
        &self,
        user_id: &str,
        req: NewExternalSource,
    ) -> Result<ExternalSourceRow> {
        self.assert_product_owner(user_id, &req.product_id).await?;

        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        let source = sqlx::query_as::<_, ExternalSourceRow>(
            r#"
            INSERT INTO external_sources (id, product_id, title, url, source_type, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&id)
        .bind(&req.product_id)
        .bind(&req.title)
        .bind(&req.url)
        .bind(&req.source_type)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!("Created source: {} for product: {}", id, req.product_id);
        Ok(source)
    }

    pub async fn update_source(
        &self,
        user_id: &str,
        req: UpdateExternalSource,
    ) -> Result<ExternalSourceRow> {
        let source = sqlx::query_as::<_, ExternalSourceRow>(
            r#"
            UPDATE external_sources
            SET title = ?, url = ?, source_type = ?
            WHERE id = ?
              AND product_id IN (SELECT id FROM products WHERE user_id = ?)
            RETURNING *
            "#,
        )
        .bind(&req.title)
        .bind(&req.url)
        .bind(&req.source_type)
        .bind(&req.id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::Generic(format!("Source not found: {}", req.id)))?;

        tracing::debug!("Updated source: {}", req.id);
        Ok(source)
    }

    pub async fn delete_source(&self, user_id: &str, id: &str) -> Result<bool> {
        let rows = sqlx::query(
            r#"
            DELETE FROM external_sources
            WHERE id = ?
              AND product_id IN (SELECT id FROM products WHERE user_id = ?)
            "#,
        )
        .bind(id)
        .bind(user_id)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(rows > 0)
    }

    // ===== Notes =====

    pub async fn get_notes(&self, user_id: &str, product_id: &str) -> Result<Vec<ProductNoteRow>> {
        self.assert_product_owner(user_id, product_id).await?;

        let notes = sqlx::query_as::<_, ProductNoteRow>(
            r#"
            SELECT * FROM product_notes WHERE product_id = ? AND user_id = ?
            "#,
        )
        .bind(product_id)
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(notes)
    }

    /// Upsert the note body for (product, user). Latest write wins.
    pub async fn save_notes(&self, user_id: &str, product_id: &str, content: &str) -> Result<()> {
        self.assert_product_owner(user_id, product_id).await?;

        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO product_notes (id, product_id, user_id, content, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT(product_id, user_id)
            DO UPDATE SET content = excluded.content, updated_at = excluded.updated_at
            "#,
        )
        .bind(&id)
        .bind(product_id)
        .bind(user_id)
        .bind(content)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        tracing::debug!("Saved notes for product: {}", product_id);
        Ok(())
    }
}
