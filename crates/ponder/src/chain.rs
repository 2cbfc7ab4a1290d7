//! Ordered composition of sampler stages.

use ponder_core::sampler::{CandidateList, Sampler};

/// An ordered chain of sampler stages driven as one.
///
/// `apply` runs the stages in insertion order, each seeing the previous
/// stage's edits; `accept` and `reset` forward to every stage. Forking
/// forks each stage, so the new chain shares no mutable state with the
/// original.
#[derive(Default)]
pub struct SamplerChain {
    stages: Vec<Box<dyn Sampler>>,
}

impl SamplerChain {
    /// Create an empty chain.
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// Append a stage to the end of the chain.
    pub fn push(&mut self, stage: Box<dyn Sampler>) {
        self.stages.push(stage);
    }

    /// Append a stage, builder style.
    pub fn with(mut self, stage: Box<dyn Sampler>) -> Self {
        self.stages.push(stage);
        self
    }

    /// Number of stages.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Check if the chain has no stages.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

impl Sampler for SamplerChain {
    fn name(&self) -> &str {
        "chain"
    }

    fn accept(&mut self, token: u32) {
        for stage in &mut self.stages {
            stage.accept(token);
        }
    }

    fn apply(&mut self, candidates: &mut CandidateList) {
        for stage in &mut self.stages {
            stage.apply(candidates);
        }
    }

    fn reset(&mut self) {
        for stage in &mut self.stages {
            stage.reset();
        }
    }

    fn fork(&self) -> Box<dyn Sampler> {
        Box::new(Self {
            stages: self.stages.iter().map(|s| s.fork()).collect(),
        })
    }
}

impl std::fmt::Debug for SamplerChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SamplerChain")
            .field("stages", &self.stages.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ponder_core::sampler::{BudgetConfig, Candidate, ReasoningBudget};
    use std::sync::{Arc, Mutex};

    struct Recorder {
        label: &'static str,
        log: Arc<Mutex<Vec<String>>>,
    }

    impl Sampler for Recorder {
        fn name(&self) -> &str {
            self.label
        }

        fn accept(&mut self, token: u32) {
            self.log
                .lock()
                .unwrap()
                .push(format!("{}:accept:{token}", self.label));
        }

        fn apply(&mut self, _candidates: &mut CandidateList) {
            self.log.lock().unwrap().push(format!("{}:apply", self.label));
        }

        fn reset(&mut self) {
            self.log.lock().unwrap().push(format!("{}:reset", self.label));
        }

        fn fork(&self) -> Box<dyn Sampler> {
            Box::new(Recorder {
                label: self.label,
                log: self.log.clone(),
            })
        }
    }

    #[test]
    fn forwards_in_insertion_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut chain = SamplerChain::new()
            .with(Box::new(Recorder {
                label: "a",
                log: log.clone(),
            }))
            .with(Box::new(Recorder {
                label: "b",
                log: log.clone(),
            }));

        let mut candidates = CandidateList::new(vec![Candidate { id: 1, logit: 0.0 }]);
        chain.apply(&mut candidates);
        chain.accept(42);
        chain.reset();

        assert_eq!(
            *log.lock().unwrap(),
            vec!["a:apply", "b:apply", "a:accept:42", "b:accept:42", "a:reset", "b:reset"]
        );
    }

    #[test]
    fn budget_stage_enforces_through_chain() {
        let config = BudgetConfig {
            budget: 1,
            hard: true,
            ..Default::default()
        };
        let stage = ReasoningBudget::from_sequences(vec![5], vec![9], config);
        let mut chain = SamplerChain::new().with(Box::new(stage));

        chain.accept(5);
        chain.accept(1);

        let mut candidates = CandidateList::from_logits(&[0.0; 10]);
        chain.apply(&mut candidates);
        assert_eq!(candidates.selected_token(), Some(9));
    }

    #[test]
    fn fork_produces_independent_stages() {
        let config = BudgetConfig {
            budget: 1,
            hard: true,
            ..Default::default()
        };
        let stage = ReasoningBudget::from_sequences(vec![5], vec![9], config);
        let mut chain = SamplerChain::new().with(Box::new(stage));
        chain.accept(5);
        chain.accept(1);

        let mut forked = chain.fork();
        assert_eq!(forked.name(), "chain");

        // The fork starts outside the span while the original is already
        // clamping.
        let mut candidates = CandidateList::from_logits(&[0.0; 10]);
        forked.apply(&mut candidates);
        assert_eq!(candidates.selected(), None);

        let mut candidates = CandidateList::from_logits(&[0.0; 10]);
        chain.apply(&mut candidates);
        assert_eq!(candidates.selected_token(), Some(9));
    }
}
