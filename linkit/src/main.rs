// Link-it - personal product bookmarking and comparison backend
// Entry point and server setup

use actix_web::{web, App, HttpServer};
use anyhow::Context;
use linkit::{app, config::Config, server};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "linkit=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    tracing::info!("Starting Link-it backend on {}", config.listen_addr);

    let state = app::setup(&config.data_dir)
        .await
        .context("failed to open the database")?;

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .service(server::auth::configure_routes())
            .service(server::procedures::configure_routes())
    })
    .bind(&config.listen_addr)
    .with_context(|| format!("failed to bind {}", config.listen_addr))?
    .run()
    .await?;

    Ok(())
}
