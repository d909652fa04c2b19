// Locating and reading asset files

use super::AssetError;
use anyhow::Result;
use std::path::{Path, PathBuf};

/// Kinds of assets the game loads, each from its own directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Image,
    Audio,
    Data,
}

impl AssetKind {
    /// Directory this asset kind is read from
    pub fn directory(&self) -> &'static str {
        match self {
            AssetKind::Image => "images",
            AssetKind::Audio => "audio",
            AssetKind::Data => "data",
        }
    }
}

/// Resolves asset names to paths and reads their contents
pub struct AssetLoader {
    base_path: PathBuf,
}

impl AssetLoader {
    /// Create a loader rooted at the given base path
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Full path for an asset file, e.g. `images/hero_stopped.png`
    pub fn resolve_path(&self, kind: AssetKind, file: &str) -> PathBuf {
        self.base_path.join(kind.directory()).join(file)
    }

    /// Read an asset file into memory
    pub fn load_bytes(&self, kind: AssetKind, file: &str) -> Result<Vec<u8>> {
        let path = self.resolve_path(kind, file);

        if !path.exists() {
            return Err(AssetError::NotFound(path.to_string_lossy().to_string()).into());
        }

        Ok(std::fs::read(&path).map_err(AssetError::Io)?)
    }

    /// Read an asset file as UTF-8 text
    pub fn load_string(&self, kind: AssetKind, file: &str) -> Result<String> {
        let bytes = self.load_bytes(kind, file)?;
        Ok(String::from_utf8(bytes)
            .map_err(|e| AssetError::DecodeError {
                name: file.to_string(),
                reason: e.to_string(),
            })?)
    }

}
