//! # Ponder Core
//!
//! Token-budget enforcement for tagged reasoning spans in LLM sampling
//! pipelines.
//!
//! This crate provides:
//! - **Span detection** via suffix matching of open/close tag token
//!   sequences over a bounded trailing window
//! - **Budget accounting** for tokens spent inside the span
//! - **Hard enforcement**: forcing the exact remaining close-tag tokens
//!   onto the candidate set
//! - **Soft enforcement**: additively biasing the close tag's first token
//! - **Tokenizer integration** for resolving tag text into token sequences

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod sampler;
pub mod vocab;

pub use error::{PonderError, Result};

/// Re-export commonly used types.
pub mod prelude {
    pub use crate::error::{PonderError, Result};
    pub use crate::sampler::{
        BudgetConfig, Candidate, CandidateList, ReasoningBudget, Sampler, TagWindow,
    };
    pub use crate::vocab::{TagTokenizer, TagVocab};
}
