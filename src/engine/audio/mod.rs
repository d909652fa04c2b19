// Sound-effect loading and playback

mod mixer;
mod wav;

pub use mixer::Mixer;
pub use wav::{decode_wav, Sound};

use super::assets::{AssetKind, AssetLoader};
use anyhow::Result;
use std::collections::HashMap;
use std::sync::Arc;

/// Audio errors
#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("Not a RIFF/WAVE file")]
    NotAWavFile,

    #[error("Unsupported WAV format: {0}")]
    UnsupportedFormat(String),

    #[error("WAV file is missing its {0} chunk")]
    MissingChunk(&'static str),

    #[error("WAV file is truncated")]
    Truncated,

    #[error("Unknown sound: {0}")]
    UnknownSound(String),
}

/// Decoded sound effects keyed by name
#[derive(Default)]
pub struct SoundBank {
    sounds: HashMap<String, Arc<Sound>>,
}

impl SoundBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load and decode a WAV file, e.g. `load(&loader, "jump", "jump.wav")`
    pub fn load(&mut self, loader: &AssetLoader, name: &str, file: &str) -> Result<()> {
        let bytes = loader.load_bytes(AssetKind::Audio, file)?;
        let sound = decode_wav(&bytes)?;
        self.sounds.insert(name.to_string(), Arc::new(sound));
        Ok(())
    }

    /// Register an already-decoded sound
    pub fn insert(&mut self, name: &str, sound: Sound) {
        self.sounds.insert(name.to_string(), Arc::new(sound));
    }

    /// Look up a sound by name
    pub fn get(&self, name: &str) -> Result<Arc<Sound>> {
        self.sounds
            .get(name)
            .cloned()
            .ok_or_else(|| AudioError::UnknownSound(name.to_string()).into())
    }

    /// Number of loaded sounds
    pub fn len(&self) -> usize {
        self.sounds.len()
    }

    /// Whether the bank is empty
    pub fn is_empty(&self) -> bool {
        self.sounds.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sound_bank_lookup() {
        let mut bank = SoundBank::new();
        bank.insert(
            "coin",
            Sound {
                sample_rate: 44100,
                samples: vec![0.0; 10],
            },
        );

        assert!(bank.get("coin").is_ok());
        assert!(bank.get("jump").is_err());
        assert_eq!(bank.len(), 1);
    }
}
