//! Integration tests for Link-it
//!
//! These tests verify end-to-end functionality including:
//! - Account sign-up, sign-in, and sign-out over HTTP
//! - The RPC procedure surface driven through the remote repository
//! - Store and page behavior against a live backend
//! - The on-device repository mode

use actix_web::{web, App, HttpServer};
use linkit::app::{self, AppState};
use linkit::database::{NewExternalSource, NewProductLink};
use linkit::error::AppError;
use linkit::pages::ProductDetailPage;
use linkit::server;
use linkit::session::{AuthClient, Session};
use linkit::store::{
    AppStore, CollectionDraft, EntityRepository, LoadState, LocalRepository, ProductDraft,
    RemoteRepository,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tempfile::TempDir;

/// Spin up the backend on an ephemeral port. The TempDir must outlive
/// the test so the database file stays around.
async fn spawn_server() -> (String, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let state: AppState = app::setup(temp_dir.path()).await.unwrap();

    let http_server = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .service(server::auth::configure_routes())
            .service(server::procedures::configure_routes())
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .unwrap();

    let addr: SocketAddr = http_server.addrs()[0];
    actix_web::rt::spawn(http_server.run());

    (format!("http://{}", addr), temp_dir)
}

async fn signed_up(base_url: &str) -> Session {
    AuthClient::new(base_url)
        .sign_up("user@example.com", "s3cret-enough")
        .await
        .unwrap()
}

#[actix_web::test]
async fn test_sign_up_then_library_lifecycle() {
    let (base_url, _temp) = spawn_server().await;
    let session = signed_up(&base_url).await;

    let repo: Arc<dyn EntityRepository> =
        Arc::new(RemoteRepository::new(&base_url, &session));
    let mut store = AppStore::new(repo);

    store.fetch_products().await.unwrap();
    store.fetch_collections().await.unwrap();
    assert_eq!(store.products_state(), LoadState::Loaded);
    assert!(store.products().is_empty());

    // Collection, then a product filed into it
    let collection = store
        .add_collection(CollectionDraft {
            name: "Desk setup".to_string(),
            description: "Home office refresh".to_string(),
            color: "#3b82f6".to_string(),
        })
        .await
        .unwrap();

    let product = store
        .add_product(ProductDraft {
            title: "Monitor arm".to_string(),
            price: "129.00".to_string(),
            product_url: "https://example.com/arm".to_string(),
            collection_id: collection.id.clone(),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(product.collection_id.as_deref(), Some(collection.id.as_str()));

    // A product filed nowhere via the form sentinel
    let loose = store
        .add_product(ProductDraft {
            title: "Cable tray".to_string(),
            collection_id: "none".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(loose.collection_id, None);

    // A fresh store sees the same state from the backend
    let repo2: Arc<dyn EntityRepository> =
        Arc::new(RemoteRepository::new(&base_url, &session));
    let mut fresh = AppStore::new(repo2);
    fresh.fetch_products().await.unwrap();
    fresh.fetch_collections().await.unwrap();

    assert_eq!(fresh.products().len(), 2);
    assert_eq!(fresh.collections().len(), 1);
    assert_eq!(fresh.product_count(&collection.id), 1);

    let members = fresh.products_by_collection(&collection.id).await.unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].id, product.id);

    // Cascade: deleting the collection takes its product with it
    assert!(fresh.delete_collection(&collection.id).await.unwrap());
    assert!(fresh.collections().is_empty());
    assert_eq!(fresh.products().len(), 1);
    assert_eq!(fresh.products()[0].id, loose.id);

    // The backend agrees after a refetch
    fresh.fetch_products().await.unwrap();
    assert_eq!(fresh.products().len(), 1);
}

#[actix_web::test]
async fn test_product_detail_sections_roundtrip() {
    let (base_url, _temp) = spawn_server().await;
    let session = signed_up(&base_url).await;

    let repo: Arc<dyn EntityRepository> =
        Arc::new(RemoteRepository::new(&base_url, &session));

    let mut store = AppStore::new(repo.clone());
    let product = store
        .add_product(ProductDraft {
            title: "Espresso grinder".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();

    repo.save_notes(&product.id, "<p>Burrs need seasoning</p>")
        .await
        .unwrap();
    repo.save_link(NewProductLink {
        product_id: product.id.clone(),
        source_name: "Amazon".to_string(),
        product_name: "Grinder X".to_string(),
        url: "https://example.com/grinder".to_string(),
        price: Some(299.0),
        rating: Some(4.5),
        review_count: Some(812),
        comment: Some("ships fastest".to_string()),
    })
    .await
    .unwrap();
    let source_id = repo
        .save_source(NewExternalSource {
            product_id: product.id.clone(),
            title: "Grinder comparison".to_string(),
            url: "https://example.com/video".to_string(),
            source_type: "youtube".to_string(),
        })
        .await
        .unwrap();

    let page = ProductDetailPage::load(repo.clone(), &product.id).await.unwrap();
    assert_eq!(page.product.title, "Espresso grinder");
    assert_eq!(page.notes, "<p>Burrs need seasoning</p>");
    assert_eq!(page.links.len(), 1);
    assert_eq!(page.links[0].price, Some(299.0));
    assert_eq!(page.sources.len(), 1);
    assert_eq!(page.sources[0].id, source_id);

    // Saving again replaces the note instead of stacking a second row
    repo.save_notes(&product.id, "<p>Settled on setting 12</p>")
        .await
        .unwrap();
    let reloaded = ProductDetailPage::load(repo, &product.id).await.unwrap();
    assert_eq!(reloaded.notes, "<p>Settled on setting 12</p>");
}

#[actix_web::test]
async fn test_unknown_collection_lists_empty() {
    let (base_url, _temp) = spawn_server().await;
    let session = signed_up(&base_url).await;

    let repo: Arc<dyn EntityRepository> =
        Arc::new(RemoteRepository::new(&base_url, &session));
    let store = AppStore::new(repo);

    let members = store
        .products_by_collection("0b5bbd6e-0000-0000-0000-000000000000")
        .await
        .unwrap();
    assert!(members.is_empty());
}

#[actix_web::test]
async fn test_sign_out_revokes_the_token() {
    let (base_url, _temp) = spawn_server().await;
    let session = signed_up(&base_url).await;

    let auth = AuthClient::new(&base_url);
    auth.sign_out(&session).await.unwrap();

    let repo = RemoteRepository::new(&base_url, &session);
    let result = repo.products().await;
    assert!(matches!(result, Err(AppError::Backend(_))));
}

#[actix_web::test]
async fn test_wrong_password_is_rejected() {
    let (base_url, _temp) = spawn_server().await;
    signed_up(&base_url).await;

    let auth = AuthClient::new(&base_url);
    let result = auth.sign_in("user@example.com", "not-the-password").await;
    assert!(matches!(result, Err(AppError::Unauthorized(_))));

    // The right password still works
    let session = auth
        .sign_in("user@example.com", "s3cret-enough")
        .await
        .unwrap();
    assert!(!session.token.is_empty());
}

#[actix_web::test]
async fn test_short_password_rejected_at_sign_up() {
    let (base_url, _temp) = spawn_server().await;

    let auth = AuthClient::new(&base_url);
    let result = auth.sign_up("short@example.com", "tiny").await;
    assert!(matches!(result, Err(AppError::Unauthorized(_))));
}

#[tokio::test]
async fn test_local_mode_without_an_account() {
    let temp_dir = TempDir::new().unwrap();
    let repo: Arc<dyn EntityRepository> =
        Arc::new(LocalRepository::open(temp_dir.path()).await.unwrap());

    let mut store = AppStore::new(repo.clone());
    store.fetch_products().await.unwrap();

    let collection = store
        .add_collection(CollectionDraft {
            name: "Wishlist".to_string(),
            description: String::new(),
            color: "#10b981".to_string(),
        })
        .await
        .unwrap();
    let product = store
        .add_product(ProductDraft {
            title: "Field notes".to_string(),
            collection_id: collection.id.clone(),
            ..Default::default()
        })
        .await
        .unwrap();

    // Locally minted ids are canonical UUIDs
    assert!(uuid::Uuid::parse_str(&product.id).is_ok());
    assert!(uuid::Uuid::parse_str(&collection.id).is_ok());

    // Data survives reopening the same directory
    drop(store);
    drop(repo);
    let reopened: Arc<dyn EntityRepository> =
        Arc::new(LocalRepository::open(temp_dir.path()).await.unwrap());
    let mut store = AppStore::new(reopened);
    store.fetch_products().await.unwrap();
    store.fetch_collections().await.unwrap();

    assert_eq!(store.products().len(), 1);
    assert_eq!(store.collections().len(), 1);
    assert_eq!(store.product_count(&collection.id), 1);
}
