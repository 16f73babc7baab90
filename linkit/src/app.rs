//! Application state and startup wiring

use crate::database::{self, Repository};
use crate::error::Result;
use std::path::Path;

/// Shared state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub repo: Repository,
}

/// Open the database under `data_dir` and build the shared state.
pub async fn setup(data_dir: &Path) -> Result<AppState> {
    std::fs::create_dir_all(data_dir)?;

    let pool = database::create_pool(&data_dir.join("linkit.db")).await?;

    Ok(AppState {
        repo: Repository::new(pool),
    })
}
