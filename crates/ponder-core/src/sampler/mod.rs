//! Sampling-pipeline stages that observe the token stream and edit the
//! candidate distribution.
//!
//! A stage sees every committed token via [`Sampler::accept`] and gets a
//! chance to mutate the host's scored candidate set via [`Sampler::apply`]
//! before each token choice. [`ReasoningBudget`] is the stage enforcing a
//! token budget on tagged reasoning spans.

mod budget;
mod candidates;
mod window;

pub use budget::{BudgetConfig, ReasoningBudget};
pub use candidates::{Candidate, CandidateList, FORCE_LOGIT};
pub use window::TagWindow;

/// A sampling-pipeline stage.
///
/// The host calls [`apply`](Sampler::apply) before each token choice and
/// [`accept`](Sampler::accept) after it, strictly alternating within one
/// generation stream. A stage is owned by exactly one stream at a time;
/// dropping it is the only teardown required.
pub trait Sampler: Send {
    /// Stable name of this stage.
    fn name(&self) -> &str;

    /// Observe a committed token.
    fn accept(&mut self, token: u32);

    /// Edit the candidate set in place before the next token choice.
    fn apply(&mut self, candidates: &mut CandidateList);

    /// Clear all transient state, keeping configuration.
    fn reset(&mut self);

    /// Create an independent instance for a new generation stream.
    ///
    /// Configuration is copied by value and transient state starts empty;
    /// the fork never shares mutable state with the original.
    fn fork(&self) -> Box<dyn Sampler>;
}
