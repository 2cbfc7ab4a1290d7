//! Scored candidate sets mutated in place by sampler stages.

/// Logit assigned to a forced candidate: large but finite, while every
/// other candidate is set to negative infinity.
pub const FORCE_LOGIT: f32 = 1e9;

/// A single scored candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    /// Token id.
    pub id: u32,
    /// Unnormalized score.
    pub logit: f32,
}

/// A host-owned set of scored candidates for the next token choice.
///
/// Sampler stages mutate the set in place; probability normalization and
/// the final selection stay downstream. The `sorted` flag tells downstream
/// consumers whether the entries are still ordered by score.
#[derive(Debug, Clone, Default)]
pub struct CandidateList {
    /// Scored entries.
    entries: Vec<Candidate>,
    /// Index of a forced selection, if any.
    selected: Option<usize>,
    /// Whether entries are ordered by descending score.
    sorted: bool,
}

impl CandidateList {
    /// Create a candidate set from pre-built entries.
    pub fn new(entries: Vec<Candidate>) -> Self {
        Self {
            entries,
            selected: None,
            sorted: false,
        }
    }

    /// Build a candidate set from a dense logits row, one entry per token id.
    pub fn from_logits(logits: &[f32]) -> Self {
        let entries = logits
            .iter()
            .enumerate()
            .map(|(id, &logit)| Candidate {
                id: id as u32,
                logit,
            })
            .collect();
        Self::new(entries)
    }

    /// Number of candidates.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the set holds no candidates.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// View the entries.
    pub fn entries(&self) -> &[Candidate] {
        &self.entries
    }

    /// Index of the forced selection, if one was made.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Token id of the forced selection, if one was made.
    pub fn selected_token(&self) -> Option<u32> {
        self.selected.map(|i| self.entries[i].id)
    }

    /// Whether the entries are still ordered by descending score.
    pub fn is_sorted(&self) -> bool {
        self.sorted
    }

    /// Mark whether the entries are ordered by descending score.
    pub fn set_sorted(&mut self, sorted: bool) {
        self.sorted = sorted;
    }

    /// Current logit of a token, if present.
    pub fn logit_of(&self, id: u32) -> Option<f32> {
        self.entries.iter().find(|c| c.id == id).map(|c| c.logit)
    }

    /// Force `want` to be the only viable candidate.
    ///
    /// If `want` is absent and the set is non-empty, the last entry's id is
    /// overwritten with it. The located (or overwritten) entry's logit is
    /// set to [`FORCE_LOGIT`] and every other logit to negative infinity;
    /// the selection index is set and the sorted flag cleared. An empty set
    /// is left untouched: no entry is created and the selection stays
    /// unset, which is the observable signal upstream.
    pub fn clamp_to(&mut self, want: u32) {
        if self.entries.is_empty() {
            return;
        }
        let idx = match self.entries.iter().position(|c| c.id == want) {
            Some(idx) => idx,
            None => {
                let last = self.entries.len() - 1;
                self.entries[last].id = want;
                last
            }
        };
        for (i, candidate) in self.entries.iter_mut().enumerate() {
            candidate.logit = if i == idx {
                FORCE_LOGIT
            } else {
                f32::NEG_INFINITY
            };
        }
        self.selected = Some(idx);
        self.sorted = false;
    }

    /// Add `amount` to the logit of `want`, if present.
    ///
    /// Absent targets are a silent no-op. No other entries and no flags are
    /// touched.
    pub fn bias(&mut self, want: u32, amount: f32) {
        if let Some(candidate) = self.entries.iter_mut().find(|c| c.id == want) {
            candidate.logit += amount;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat(ids: &[u32]) -> CandidateList {
        CandidateList::new(ids.iter().map(|&id| Candidate { id, logit: 0.0 }).collect())
    }

    #[test]
    fn clamp_to_present_target() {
        let mut candidates = flat(&[3, 7, 11]);
        candidates.clamp_to(7);

        assert_eq!(candidates.selected(), Some(1));
        assert_eq!(candidates.selected_token(), Some(7));
        assert_eq!(candidates.entries()[1].logit, FORCE_LOGIT);
        assert_eq!(candidates.entries()[0].logit, f32::NEG_INFINITY);
        assert_eq!(candidates.entries()[2].logit, f32::NEG_INFINITY);
    }

    #[test]
    fn clamp_missing_target_overwrites_last() {
        let mut candidates = flat(&[1, 2, 3]);
        candidates.clamp_to(7);

        assert_eq!(candidates.selected(), Some(2));
        assert_eq!(candidates.entries()[2].id, 7);
        assert_eq!(candidates.entries()[2].logit, FORCE_LOGIT);
        assert_eq!(candidates.entries()[0].logit, f32::NEG_INFINITY);
        assert_eq!(candidates.entries()[1].logit, f32::NEG_INFINITY);
    }

    #[test]
    fn clamp_on_empty_set_is_noop() {
        let mut candidates = CandidateList::new(Vec::new());
        candidates.clamp_to(7);

        assert!(candidates.is_empty());
        assert_eq!(candidates.selected(), None);
    }

    #[test]
    fn clamp_clears_sorted_flag() {
        let mut candidates = flat(&[1, 2]);
        candidates.set_sorted(true);
        candidates.clamp_to(1);
        assert!(!candidates.is_sorted());
    }

    #[test]
    fn bias_adds_to_present_target_only() {
        let mut candidates = flat(&[1, 2, 3]);
        candidates.set_sorted(true);
        candidates.bias(2, 5.0);

        assert_eq!(candidates.logit_of(2), Some(5.0));
        assert_eq!(candidates.logit_of(1), Some(0.0));
        assert_eq!(candidates.logit_of(3), Some(0.0));
        // Ordering metadata is untouched.
        assert!(candidates.is_sorted());
        assert_eq!(candidates.selected(), None);
    }

    #[test]
    fn bias_absent_target_is_noop() {
        let mut candidates = flat(&[1, 2]);
        candidates.bias(9, 5.0);
        assert_eq!(candidates.logit_of(1), Some(0.0));
        assert_eq!(candidates.logit_of(2), Some(0.0));
    }

    #[test]
    fn from_logits_maps_index_to_id() {
        let candidates = CandidateList::from_logits(&[0.5, 1.5, -0.5]);
        assert_eq!(candidates.len(), 3);
        assert_eq!(candidates.entries()[1], Candidate { id: 1, logit: 1.5 });
    }
}
