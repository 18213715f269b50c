//! ASCII-art assets handed out as rewards.
//!
//! Assets are plain text files named `<name>.txt` under one directory. They
//! are read on every request and never cached.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Asset names a random reward draw picks from.
pub const REWARD_ASSETS: [&str; 6] = ["cat", "checkpoint", "other", "poem", "mush", "stars"];

/// Errors from loading an asset.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("Error loading ASCII art '{name}': {source}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Error loading ASCII art '{name}': invalid asset name")]
    InvalidName { name: String },
}

/// Source of named text assets.
pub trait AssetLoader {
    fn load(&self, name: &str) -> Result<String, AssetError>;
}

/// Loads `<root>/<name>.txt`.
#[derive(Debug, Clone)]
pub struct AssetDir {
    root: PathBuf,
}

impl AssetDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(format!("{name}.txt"))
    }

    /// Whether `<name>.txt` exists, for the `assets` listing.
    pub fn contains(&self, name: &str) -> bool {
        is_plain_name(name) && self.path_for(name).is_file()
    }
}

impl AssetLoader for AssetDir {
    fn load(&self, name: &str) -> Result<String, AssetError> {
        if !is_plain_name(name) {
            return Err(AssetError::InvalidName {
                name: name.to_string(),
            });
        }

        std::fs::read_to_string(self.path_for(name)).map_err(|source| AssetError::Io {
            name: name.to_string(),
            source,
        })
    }
}

/// Load an asset, rendering a failure as its error text.
pub fn load_or_describe(loader: &dyn AssetLoader, name: &str) -> String {
    match loader.load(name) {
        Ok(art) => art,
        Err(e) => {
            tracing::warn!(asset = name, error = %e, "Reward asset unavailable");
            e.to_string()
        }
    }
}

// Names are file stems only; nothing that could walk out of the directory.
fn is_plain_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
