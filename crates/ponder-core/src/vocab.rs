//! Tokenizer integration for resolving tag text into token sequences.
//!
//! Wraps the HuggingFace tokenizers library behind the small [`TagVocab`]
//! seam the sampler constructs against. Tags are tokenized exactly once, at
//! construction time.

use crate::error::{PonderError, Result};
use std::path::Path;
use tokenizers::Tokenizer as HfTokenizer;
use tracing::warn;

/// Source of token sequences for literal tag strings.
///
/// Implementations return the exact tokenization of `text`, with special
/// tokens parsed and no framing tokens (BOS/EOS) added. An empty or
/// unresolvable string yields an empty sequence, which permanently disables
/// the corresponding tag transition for the instance built from it.
pub trait TagVocab {
    /// Tokenize a literal tag string.
    fn tokenize_tag(&self, text: &str) -> Vec<u32>;
}

/// Tag vocabulary backed by a HuggingFace tokenizer.
#[derive(Clone)]
pub struct TagTokenizer {
    /// Underlying HuggingFace tokenizer.
    inner: HfTokenizer,
}

impl TagTokenizer {
    /// Load from a tokenizer.json file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let inner = HfTokenizer::from_file(path.as_ref())
            .map_err(|e| PonderError::TokenizerError(format!("Failed to load tokenizer: {}", e)))?;
        Ok(Self { inner })
    }

    /// Wrap an already-loaded tokenizer.
    pub fn from_tokenizer(inner: HfTokenizer) -> Self {
        Self { inner }
    }

    /// Get vocabulary size.
    pub fn vocab_size(&self) -> usize {
        self.inner.get_vocab_size(true)
    }

    /// String to token ID.
    pub fn token_to_id(&self, token: &str) -> Option<u32> {
        self.inner.token_to_id(token)
    }
}

impl TagVocab for TagTokenizer {
    fn tokenize_tag(&self, text: &str) -> Vec<u32> {
        if text.is_empty() {
            return Vec::new();
        }
        match self.inner.encode(text, false) {
            Ok(encoding) => encoding.get_ids().to_vec(),
            Err(e) => {
                warn!(tag = text, error = %e, "failed to tokenize tag, transition disabled");
                Vec::new()
            }
        }
    }
}

impl std::fmt::Debug for TagTokenizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TagTokenizer")
            .field("vocab_size", &self.vocab_size())
            .finish()
    }
}
