//! Procedure dispatcher
//!
//! `POST /rpc/{procedure}` with a JSON parameter object. Authentication
//! failures answer 401; everything past that point answers 200 with the
//! envelope, errors carried in-band. Field validation happens here, at
//! the trust boundary, not in the repository.

use super::bearer_token;
use crate::app::AppState;
use crate::config::{
    MAX_NAME_LENGTH, MAX_NOTE_LENGTH, MAX_TITLE_LENGTH, MAX_URL_LENGTH, VALID_SOURCE_TYPES,
};
use crate::database::{
    NewCollection, NewExternalSource, NewProduct, NewProductLink, Repository,
    UpdateExternalSource, UpdateProduct, UpdateProductLink,
};
use crate::error::{AppError, Result};
use crate::rpc::{
    CollectionIdParams, CreateCollectionParams, CreateProductParams, LinkIdParams,
    ProductCollectionParams, ProductIdParams, RpcEnvelope, SaveLinkParams, SaveNotesParams,
    SaveSourceParams, SourceIdParams, UpdateLinkParams, UpdateProductParams, UpdateSourceParams,
};
use actix_web::{web, HttpRequest, HttpResponse, Scope};
use serde_json::{to_value, Value};

pub fn configure_routes() -> Scope {
    web::scope("/rpc").route("/{procedure}", web::post().to(dispatch))
}

async fn dispatch(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: HttpRequest,
    body: web::Json<Value>,
) -> HttpResponse {
    let procedure = path.into_inner();

    let Some(token) = bearer_token(&req) else {
        return HttpResponse::Unauthorized().json(RpcEnvelope::failure("Missing bearer token"));
    };

    let user_id = match state.repo.user_for_token(token).await {
        Ok(Some(user_id)) => user_id,
        Ok(None) => {
            return HttpResponse::Unauthorized()
                .json(RpcEnvelope::failure("Invalid or expired token"));
        }
        Err(e) => {
            tracing::error!("Token lookup failed: {}", e);
            return HttpResponse::Ok().json(RpcEnvelope::failure(e.to_string()));
        }
    };

    let envelope = match execute(&state.repo, &user_id, &procedure, body.into_inner()).await {
        Ok(data) => RpcEnvelope::success(data),
        Err(e) => {
            tracing::warn!("Procedure {} failed: {}", procedure, e);
            RpcEnvelope::failure(e.to_string())
        }
    };

    HttpResponse::Ok().json(envelope)
}

fn require_text(field: &str, value: &str, max: usize) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AppError::Generic(format!("{} must not be empty", field)));
    }
    if value.len() > max {
        return Err(AppError::Generic(format!(
            "{} exceeds {} characters",
            field, max
        )));
    }
    Ok(())
}

fn check_source_type(value: &str) -> Result<()> {
    if VALID_SOURCE_TYPES.contains(&value) {
        Ok(())
    } else {
        Err(AppError::Generic(format!(
            "Unknown source type: {}",
            value
        )))
    }
}

async fn execute(
    repo: &Repository,
    user_id: &str,
    procedure: &str,
    params: Value,
) -> Result<Value> {
    match procedure {
        // ===== Collections =====
        "get_user_collections" => {
            let rows = repo.list_collections(user_id).await?;
            Ok(to_value(rows)?)
        }
        "create_collection" => {
            let p: CreateCollectionParams = serde_json::from_value(params)?;
            require_text("Collection name", &p.p_name, MAX_NAME_LENGTH)?;
            let row = repo
                .create_collection(
                    user_id,
                    NewCollection {
                        name: p.p_name,
                        description: p.p_description,
                        color: p.p_color,
                    },
                )
                .await?;
            Ok(to_value(row.id)?)
        }
        "delete_collection" => {
            let p: CollectionIdParams = serde_json::from_value(params)?;
            let deleted = repo.delete_collection(user_id, &p.p_collection_id).await?;
            Ok(to_value(deleted)?)
        }
        "get_products_by_collection" => {
            let p: CollectionIdParams = serde_json::from_value(params)?;
            let rows = repo
                .products_by_collection(user_id, &p.p_collection_id)
                .await?;
            Ok(to_value(rows)?)
        }
        "add_product_to_collection" => {
            let p: ProductCollectionParams = serde_json::from_value(params)?;
            let product_id = repo
                .add_product_to_collection(user_id, &p.p_product_id, &p.p_collection_id)
                .await?;
            Ok(to_value(product_id)?)
        }
        "remove_product_from_collection" => {
            let p: ProductCollectionParams = serde_json::from_value(params)?;
            let removed = repo
                .remove_product_from_collection(user_id, &p.p_product_id, &p.p_collection_id)
                .await?;
            Ok(to_value(removed)?)
        }

        // ===== Products =====
        "get_user_products" => {
            let rows = repo.list_products(user_id).await?;
            Ok(to_value(rows)?)
        }
        "create_product" => {
            let p: CreateProductParams = serde_json::from_value(params)?;
            require_text("Product title", &p.p_title, MAX_TITLE_LENGTH)?;
            let row = repo
                .create_product(
                    user_id,
                    NewProduct {
                        title: p.p_title,
                        description: p.p_description,
                        price: p.p_price,
                        image_url: p.p_image_url,
                        product_url: p.p_product_url,
                        source_name: p.p_source_name,
                        collection_id: p.p_collection_id,
                    },
                )
                .await?;
            Ok(to_value(row.id)?)
        }
        "update_product" => {
            let p: UpdateProductParams = serde_json::from_value(params)?;
            require_text("Product title", &p.p_title, MAX_TITLE_LENGTH)?;
            let updated = repo
                .update_product(
                    user_id,
                    UpdateProduct {
                        id: p.p_product_id,
                        title: p.p_title,
                        description: p.p_description,
                        price: p.p_price,
                        image_url: p.p_image_url,
                        product_url: p.p_product_url,
                        source_name: p.p_source_name,
                        collection_id: p.p_collection_id,
                    },
                )
                .await?;
            Ok(to_value(updated)?)
        }
        "delete_product" => {
            let p: ProductIdParams = serde_json::from_value(params)?;
            let deleted = repo.delete_product(user_id, &p.p_product_id).await?;
            Ok(to_value(deleted)?)
        }
        // Answers a zero- or one-element list, matching the list shape of
        // every other read procedure.
        "get_product" => {
            let p: ProductIdParams = serde_json::from_value(params)?;
            let rows: Vec<_> = repo
                .get_product(user_id, &p.p_product_id)
                .await?
                .into_iter()
                .collect();
            Ok(to_value(rows)?)
        }

        // ===== Notes =====
        "get_product_notes" => {
            let p: ProductIdParams = serde_json::from_value(params)?;
            let rows = repo.get_notes(user_id, &p.p_product_id).await?;
            Ok(to_value(rows)?)
        }
        "save_product_notes" => {
            let p: SaveNotesParams = serde_json::from_value(params)?;
            if p.p_content.len() > MAX_NOTE_LENGTH {
                return Err(AppError::Generic(format!(
                    "Note exceeds {} characters",
                    MAX_NOTE_LENGTH
                )));
            }
            repo.save_notes(user_id, &p.p_product_id, &p.p_content)
                .await?;
            Ok(Value::Null)
        }

        // ===== Comparison links =====
        "get_product_links" => {
            let p: ProductIdParams = serde_json::from_value(params)?;
            let rows = repo.list_links(user_id, &p.p_product_id).await?;
            Ok(to_value(rows)?)
        }
        "save_product_link" => {
            let p: SaveLinkParams = serde_json::from_value(params)?;
            require_text("Link URL", &p.p_url, MAX_URL_LENGTH)?;
            let row = repo
                .save_link(
                    user_id,
                    NewProductLink {
                        product_id: p.p_product_id,
                        source_name: p.p_source_name,
                        product_name: p.p_product_name,
                        url: p.p_url,
                        price: p.p_price,
                        rating: p.p_rating,
                        review_count: p.p_review_count,
                        comment: p.p_comment,
                    },
                )
                .await?;
            Ok(to_value(row.id)?)
        }
        "update_product_link" => {
            let p: UpdateLinkParams = serde_json::from_value(params)?;
            require_text("Link URL", &p.p_url, MAX_URL_LENGTH)?;
            let row = repo
                .update_link(
                    user_id,
                    UpdateProductLink {
                        id: p.p_link_id,
                        source_name: p.p_source_name,
                        product_name: p.p_product_name,
                        url: p.p_url,
                        price: p.p_price,
                        rating: p.p_rating,
                        review_count: p.p_review_count,
                        comment: p.p_comment,
                    },
                )
                .await?;
            Ok(to_value(row)?)
        }
        "delete_product_link" => {
            let p: LinkIdParams = serde_json::from_value(params)?;
            let deleted = repo.delete_link(user_id, &p.p_link_id).await?;
            Ok(to_value(deleted)?)
        }

        // ===== External sources =====
        "get_external_sources" => {
            let p: ProductIdParams = serde_json::from_value(params)?;
            let rows = repo.list_sources(user_id, &p.p_product_id).await?;
            Ok(to_value(rows)?)
        }
        "save_external_source" => {
            let p: SaveSourceParams = serde_json::from_value(params)?;
            require_text("Source title", &p.p_title, MAX_TITLE_LENGTH)?;
            require_text("Source URL", &p.p_url, MAX_URL_LENGTH)?;
            check_source_type(&p.p_source_type)?;
            let row = repo
                .save_source(
                    user_id,
                    NewExternalSource {
                        product_id: p.p_product_id,
                        title: p.p_title,
                        url: p.p_url,
                        source_type: p.p_source_type,
                    },
                )
                .await?;
            Ok(to_value(row.id)?)
        }
        "update_external_source" => {
            let p: UpdateSourceParams = serde_json::from_value(params)?;
            require_text("Source title", &p.p_title, MAX_TITLE_LENGTH)?;
            require_text("Source URL", &p.p_url, MAX_URL_LENGTH)?;
            check_source_type(&p.p_source_type)?;
            let row = repo
                .update_source(
                    user_id,
                    UpdateExternalSource {
                        id: p.p_source_id,
                        title: p.p_title,
                        url: p.p_url,
                        source_type: p.p_source_type,
                    },
                )
                .await?;
            Ok(to_value(row)?)
        }
        "delete_external_source" => {
            let p: SourceIdParams = serde_json::from_value(params)?;
            let deleted = repo.delete_source(user_id, &p.p_source_id).await?;
            Ok(to_value(deleted)?)
        }

        _ => Err(AppError::Generic(format!(
            "Unknown procedure: {}",
            procedure
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::schema::initialize_database;
    use serde_json::json;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_repo() -> Repository {
        let pool = SqlitePoolOptions::new()
            .connect("sqlite::memory:")
            .await
            .unwrap();

        initialize_database(&pool).await.unwrap();

        Repository::new(pool)
    }

    async fn user(repo: &Repository) -> String {
        let row = repo.create_user("test@example.com", "hash").await.unwrap();
        row.id
    }

    #[tokio::test]
    async fn test_unknown_procedure_is_an_error() {
        let repo = test_repo().await;
        let uid = user(&repo).await;

        let result = execute(&repo, &uid, "drop_all_tables", json!({})).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_create_collection_returns_bare_id() {
        let repo = test_repo().await;
        let uid = user(&repo).await;

        let data = execute(
            &repo,
            &uid,
            "create_collection",
            json!({ "p_name": "Lighting", "p_description": null, "p_color": "#f59e0b" }),
        )
        .await
        .unwrap();

        let id: String = serde_json::from_value(data).unwrap();
        assert!(!id.is_empty());

        let listed = execute(&repo, &uid, "get_user_collections", json!({}))
            .await
            .unwrap();
        assert_eq!(listed[0]["id"], json!(id));
    }

    #[tokio::test]
    async fn test_blank_collection_name_rejected() {
        let repo = test_repo().await;
        let uid = user(&repo).await;

        let result = execute(
            &repo,
            &uid,
            "create_collection",
            json!({ "p_name": "   ", "p_description": null, "p_color": "#fff" }),
        )
        .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_get_product_answers_a_list() {
        let repo = test_repo().await;
        let uid = user(&repo).await;

        let data = execute(
            &repo,
            &uid,
            "create_product",
            json!({ "p_title": "Lamp" }),
        )
        .await
        .unwrap();
        let id: String = serde_json::from_value(data).unwrap();

        let found = execute(&repo, &uid, "get_product", json!({ "p_product_id": id }))
            .await
            .unwrap();
        assert_eq!(found.as_array().map(Vec::len), Some(1));

        let missing = execute(
            &repo,
            &uid,
            "get_product",
            json!({ "p_product_id": "missing" }),
        )
        .await
        .unwrap();
        assert_eq!(missing.as_array().map(Vec::len), Some(0));
    }

    #[tokio::test]
    async fn test_invalid_source_type_rejected() {
        let repo = test_repo().await;
        let uid = user(&repo).await;

        let data = execute(&repo, &uid, "create_product", json!({ "p_title": "Lamp" }))
            .await
            .unwrap();
        let id: String = serde_json::from_value(data).unwrap();

        let result = execute(
            &repo,
            &uid,
            "save_external_source",
            json!({
                "p_product_id": id,
                "p_title": "Clip",
                "p_url": "https://example.com",
                "p_source_type": "tiktok"
            }),
        )
        .await;
        assert!(result.is_err());
    }
}
