//! Application configuration
//!
//! Environment-driven settings for the server binary plus the validation
//! boundaries enforced at the RPC layer.

use std::path::PathBuf;

/// Runtime configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the RPC backend listens on
    pub listen_addr: String,
    /// Directory holding the SQLite database
    pub data_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        let listen_addr =
            std::env::var("LINKIT_LISTEN_ADDR").unwrap_or_else(|_| "127.0.0.1:8787".to_string());
        let data_dir = std::env::var("LINKIT_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./data"));

        Self {
            listen_addr,
            data_dir,
        }
    }
}

// ===== Account Limits =====

/// Minimum password length accepted at sign-up
pub const MIN_PASSWORD_LENGTH: usize = 8;

// ===== Field Content Limits =====

/// Maximum length for a collection name
pub const MAX_NAME_LENGTH: usize = 120;

/// Maximum length for a product title
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum length for any stored URL
pub const MAX_URL_LENGTH: usize = 2048;

/// Maximum length for a product note body (rich text HTML included)
pub const MAX_NOTE_LENGTH: usize = 100_000;

/// Categorical types accepted for an external source
pub const VALID_SOURCE_TYPES: &[&str] = &[
    "youtube",
    "pinterest",
    "video",
    "article",
    "blog",
    "inspiration",
    "other",
];

/// Form value meaning "no collection" on product creation.
/// Anything else non-empty is treated as a collection id.
pub const NO_COLLECTION_SENTINEL: &str = "none";
