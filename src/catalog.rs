//! Folder catalogs served as `songs/<folder>/songs.json`.
//!
//! `model` holds the catalog types, `paths` builds and parses the asset URLs,
//! and `fetch` performs the blocking HTTP request.

use thiserror::Error;

mod fetch;
mod model;
mod paths;

pub use fetch::load_catalog;
pub use model::Catalog;
pub use paths::{asset_url, decode_label, extract_song_name};

/// Errors raised while loading a catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Base URL cannot carry a path (e.g. `mailto:`).
    #[error("base URL cannot hold a path: {0}")]
    InvalidBase(String),

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("server returned {status} for {url}")]
    Status { status: u16, url: String },

    #[error("failed to parse songs.json: {0}")]
    Parse(#[from] serde_json::Error),
}
