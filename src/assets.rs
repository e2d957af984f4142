//! Sprite asset lookup and loading
//!
//! Loading is asynchronous: a browser decodes images off the main flow, and
//! the compositor only continues once a decode has completed.

use std::collections::HashMap;
use std::future::Future;
use std::path::{Path, PathBuf};

use image::RgbaImage;
use thiserror::Error;

use crate::models::{Accessory, Species};

/// Identifies one image asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKey {
    /// Untinted egg shown while idle and incubating
    Egg,
    /// Shown the moment incubation expires
    CrackedEgg,
    /// Grayscale species template
    Species(Species),
    /// Accessory overlay
    Accessory(Accessory),
}

impl AssetKey {
    /// File name under the asset directory.
    pub fn file_name(&self) -> String {
        match self {
            AssetKey::Egg => "egg_base.png".to_string(),
            AssetKey::CrackedEgg => "egg_cracked.png".to_string(),
            AssetKey::Species(s) => format!("pet_{}.png", s),
            AssetKey::Accessory(a) => format!("acc_{}.png", a),
        }
    }
}

impl std::fmt::Display for AssetKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.file_name())
    }
}

/// Error when an asset cannot be produced
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetError {
    /// No asset registered or present for this key
    #[error("asset '{0}' not found")]
    NotFound(AssetKey),
    /// The asset exists but could not be decoded
    #[error("failed to decode asset '{key}': {message}")]
    Decode { key: AssetKey, message: String },
}

/// Source of decoded sprite images.
pub trait AssetLoader {
    /// Load and decode the image for `key`.
    fn load(&self, key: AssetKey) -> impl Future<Output = Result<RgbaImage, AssetError>>;
}

/// Loads PNG assets from a directory using the standard file names.
///
/// Decoding happens synchronously on the first poll; the returned future
/// never yields.
#[derive(Debug, Clone)]
pub struct DirectoryAssets {
    root: PathBuf,
}

impl DirectoryAssets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, key: AssetKey) -> PathBuf {
        self.root.join(key.file_name())
    }
}

impl AssetLoader for DirectoryAssets {
    async fn load(&self, key: AssetKey) -> Result<RgbaImage, AssetError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Err(AssetError::NotFound(key));
        }
        let img = image::open(&path)
            .map_err(|e| AssetError::Decode { key, message: e.to_string() })?;
        Ok(img.to_rgba8())
    }
}

/// Pre-decoded assets held in memory, e.g. images handed over by a browser.
#[derive(Debug, Clone, Default)]
pub struct MemoryAssets {
    images: HashMap<AssetKey, RgbaImage>,
}

impl MemoryAssets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: AssetKey, image: RgbaImage) {
        self.images.insert(key, image);
    }

    pub fn with(mut self, key: AssetKey, image: RgbaImage) -> Self {
        self.insert(key, image);
        self
    }

    pub fn contains(&self, key: AssetKey) -> bool {
        self.images.contains_key(&key)
    }
}

impl AssetLoader for MemoryAssets {
    async fn load(&self, key: AssetKey) -> Result<RgbaImage, AssetError> {
        self.images.get(&key).cloned().ok_or(AssetError::NotFound(key))
    }
}
