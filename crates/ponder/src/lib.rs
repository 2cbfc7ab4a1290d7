//! # Ponder
//!
//! Reasoning-span token budgets for LLM sampling pipelines.
//!
//! Ponder watches the stream of committed tokens for a tagged reasoning
//! block (e.g. `<think>`...`</think>`) and, once the block has run past its
//! token budget, steers the next token choice toward the closing tag —
//! forcing the exact remaining close-tag tokens (hard mode) or biasing the
//! close tag's first token (soft mode).
//!
//! ## Quick Start
//!
//! ```rust
//! use ponder::prelude::*;
//!
//! // Tag token sequences normally come from a tokenizer via `TagVocab`;
//! // single-token tags keep the example small.
//! let config = BudgetConfig {
//!     budget: 2,
//!     hard: true,
//!     ..Default::default()
//! };
//! let mut stage = ReasoningBudget::from_sequences(vec![5], vec![9], config);
//!
//! stage.accept(5); // host committed the open tag
//! assert!(stage.is_inside());
//! stage.accept(1);
//! stage.accept(2);
//!
//! // Budget exhausted: the next choice is clamped to the close tag.
//! let mut candidates = CandidateList::from_logits(&[0.0, 1.0, 0.5, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
//! stage.apply(&mut candidates);
//! assert_eq!(candidates.selected_token(), Some(9));
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

// Re-export core crate
pub use ponder_core::*;

mod chain;

pub use chain::SamplerChain;

/// Commonly used types.
pub mod prelude {
    pub use crate::chain::SamplerChain;
    pub use crate::error::{PonderError, Result};
    pub use crate::sampler::{
        BudgetConfig, Candidate, CandidateList, ReasoningBudget, Sampler, TagWindow,
    };
    pub use crate::vocab::{TagTokenizer, TagVocab};
}
