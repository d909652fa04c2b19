// Asset loading
//
// Reads level data, images and sound effects from fixed relative paths.

mod images;
mod loader;

pub use images::{FrameGrid, ImageId, ImageStore};
pub use loader::{AssetKind, AssetLoader};

/// Asset loading errors
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Unknown image: {0}")]
    UnknownImage(String),

    #[error("Failed to decode {name}: {reason}")]
    DecodeError { name: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_error_display() {
        let err = AssetError::NotFound("images/hero_stopped.png".to_string());
        assert_eq!(err.to_string(), "Asset not found: images/hero_stopped.png");
    }
}
