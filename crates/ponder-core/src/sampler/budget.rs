//! Token-budget enforcement for tagged reasoning spans.
//!
//! Watches the committed token stream for an open tag (e.g. `<think>`),
//! counts tokens spent inside the span, and once the count passes the
//! configured budget steers the next token choice toward the close tag:
//! hard mode forces the exact remaining close-tag tokens, soft mode adds a
//! bias to the close tag's first token.

use crate::sampler::candidates::CandidateList;
use crate::sampler::window::TagWindow;
use crate::sampler::Sampler;
use crate::vocab::TagVocab;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::debug;

/// Configuration for [`ReasoningBudget`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetConfig {
    /// Maximum tokens allowed inside the span; 0 disables enforcement.
    #[serde(default)]
    pub budget: u32,
    /// Literal text of the span's opening tag. Empty disables entry
    /// detection.
    pub open_tag: String,
    /// Literal text of the span's closing tag. Empty disables exit
    /// detection.
    pub close_tag: String,
    /// Additive logit bias applied in soft mode to the close tag's first
    /// token.
    #[serde(default)]
    pub close_bias: f32,
    /// Force the exact remaining close-tag tokens once the budget is
    /// exhausted. When false, soft mode applies `close_bias` instead.
    #[serde(default = "default_hard")]
    pub hard: bool,
}

fn default_hard() -> bool {
    true
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            budget: 0,
            open_tag: "<think>".to_string(),
            close_tag: "</think>".to_string(),
            close_bias: 0.0,
            hard: true,
        }
    }
}

impl BudgetConfig {
    /// Load from a JSON file.
    pub fn from_file(path: &std::path::Path) -> crate::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        Ok(config)
    }
}

/// Sampler stage enforcing a token budget on a tagged reasoning span.
///
/// One instance serves exactly one generation stream. The host calls
/// [`apply`](Self::apply) before each token choice and
/// [`accept`](Self::accept) after it; [`Sampler::fork`] produces an
/// independent instance for a new stream with the same configuration and
/// fresh transient state.
#[derive(Debug)]
pub struct ReasoningBudget {
    /// Configuration, fixed at construction.
    config: BudgetConfig,
    /// Token sequence of the opening tag; empty disables entry.
    open: Vec<u32>,
    /// Token sequence of the closing tag; empty disables exit.
    close: Vec<u32>,
    /// Trailing window of accepted tokens for tag matching.
    window: TagWindow,
    /// Close-tag tokens still owed by hard enforcement.
    force: VecDeque<u32>,
    /// Tokens consumed inside the span since the last transition.
    used: u32,
    /// Whether the cursor is inside the span.
    inside: bool,
}

impl ReasoningBudget {
    /// Create a stage, resolving tag text through `vocab`.
    ///
    /// Each tag is tokenized exactly once. A tag resolving to an empty
    /// sequence permanently disables its transition; with an empty open
    /// tag the stage never activates.
    pub fn new(vocab: &dyn TagVocab, config: BudgetConfig) -> Self {
        let open = vocab.tokenize_tag(&config.open_tag);
        let close = vocab.tokenize_tag(&config.close_tag);
        Self::from_sequences(open, close, config)
    }

    /// Create a stage from pre-tokenized tag sequences.
    pub fn from_sequences(open: Vec<u32>, close: Vec<u32>, config: BudgetConfig) -> Self {
        let window = TagWindow::for_patterns(open.len(), close.len());
        Self {
            config,
            open,
            close,
            window,
            force: VecDeque::new(),
            used: 0,
            inside: false,
        }
    }

    /// Whether the cursor is currently inside the span.
    pub fn is_inside(&self) -> bool {
        self.inside
    }

    /// Tokens consumed inside the span since the last transition.
    pub fn used(&self) -> u32 {
        self.used
    }

    /// Configured budget; 0 means unlimited.
    pub fn budget(&self) -> u32 {
        self.config.budget
    }

    /// Token sequence of the opening tag.
    pub fn open_sequence(&self) -> &[u32] {
        &self.open
    }

    /// Token sequence of the closing tag.
    pub fn close_sequence(&self) -> &[u32] {
        &self.close
    }

    /// Number of close-tag tokens still owed by hard enforcement.
    pub fn pending_force(&self) -> usize {
        self.force.len()
    }

    /// Observe a committed token.
    ///
    /// The force queue is drained first when `token` matches its front,
    /// then the token feeds the tag window, which may flip the span state.
    /// Draining never drives the exit itself; only a close-tag suffix
    /// match does.
    pub fn accept(&mut self, token: u32) {
        if self.force.front() == Some(&token) {
            self.force.pop_front();
        }
        self.push_token(token);
    }

    /// Edit `candidates` in place before the next token choice.
    ///
    /// No-op outside the span, with an unlimited budget, or while the
    /// budget still has headroom. Once exhausted, hard mode clamps the
    /// candidate set to the next owed close-tag token; soft mode adds
    /// `close_bias` to the close tag's first token only, never the full
    /// sequence.
    ///
    /// Repeated calls without an intervening [`accept`](Self::accept)
    /// produce identical mutations. Known fragility: if a downstream stage
    /// overrides the clamped choice, the force queue does not drain and
    /// the same token is clamped again on the next call.
    pub fn apply(&mut self, candidates: &mut CandidateList) {
        if !self.inside {
            return;
        }
        if self.config.budget == 0 {
            return;
        }
        if self.used < self.config.budget {
            return;
        }

        // budget exhausted
        if self.config.hard {
            if self.force.is_empty() {
                self.begin_force_close();
            }
            if let Some(&next) = self.force.front() {
                candidates.clamp_to(next);
            }
        } else if let Some(&first) = self.close.first() {
            candidates.bias(first, self.config.close_bias);
        }
    }

    /// Clear all transient state, keeping configuration.
    pub fn reset(&mut self) {
        self.window.clear();
        self.force.clear();
        self.used = 0;
        self.inside = false;
    }

    /// Feed the tag window and run the span state machine.
    ///
    /// While outside only entry is checked, while inside only exit; the
    /// exit check runs before the usage increment, and either transition
    /// zeroes the count and clears the force queue.
    fn push_token(&mut self, token: u32) {
        self.window.push(token);
        if !self.inside {
            if self.window.ends_with(&self.open) {
                self.inside = true;
                self.used = 0;
                self.force.clear();
                debug!(budget = self.config.budget, "entered reasoning span");
            }
        } else if self.window.ends_with(&self.close) {
            self.inside = false;
            self.used = 0;
            self.force.clear();
            debug!("left reasoning span");
        } else {
            self.used += 1;
        }
    }

    /// Fill the force queue with the entire close sequence, if empty.
    fn begin_force_close(&mut self) {
        if self.force.is_empty() {
            self.force.extend(self.close.iter().copied());
            debug!(
                used = self.used,
                budget = self.config.budget,
                "budget exhausted, forcing close tag"
            );
        }
    }

    /// New instance with the same configuration and fresh transient state.
    fn fresh(&self) -> Self {
        Self::from_sequences(self.open.clone(), self.close.clone(), self.config.clone())
    }
}

impl Sampler for ReasoningBudget {
    fn name(&self) -> &str {
        "reasoning_budget"
    }

    fn accept(&mut self, token: u32) {
        ReasoningBudget::accept(self, token);
    }

    fn apply(&mut self, candidates: &mut CandidateList) {
        ReasoningBudget::apply(self, candidates);
    }

    fn reset(&mut self) {
        ReasoningBudget::reset(self);
    }

    fn fork(&self) -> Box<dyn Sampler> {
        Box::new(self.fresh())
    }
}
