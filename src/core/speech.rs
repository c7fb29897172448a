/// Speech synthesis seam. Audio is optional; failures never fail a request.

use sha2::{Digest, Sha256};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("speech synthesis canceled: {0}")]
    Canceled(String),
    #[error("speech provider error: {0}")]
    Provider(String),
}

/// An external text-to-speech provider.
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize `text` and return a reference to the audio asset.
    fn synthesize(&self, text: &str) -> Result<String, SpeechError>;
}

/// Asset path for a story's audio: `/audio/story_audio_<time>_<hash>.mp3`.
///
/// The hash is the first 12 hex chars of the text's SHA-256.
pub fn audio_asset_path(text: &str, created_at: u64) -> String {
    let digest = format!("{:x}", Sha256::digest(text.as_bytes()));
    format!("/audio/story_audio_{}_{}.mp3", created_at, &digest[..12])
}
