//! Bounded trailing window of accepted tokens, used for tag suffix matching.

use std::collections::VecDeque;

/// Minimum window capacity, regardless of tag lengths.
const MIN_WINDOW: usize = 8;

/// A bounded buffer holding the most recently accepted tokens.
///
/// Used exclusively for suffix matching against tag token sequences; the
/// oldest token is evicted once the capacity is reached.
#[derive(Debug, Clone)]
pub struct TagWindow {
    /// Recently accepted tokens, oldest first.
    buf: VecDeque<u32>,
    /// Maximum number of tokens held.
    capacity: usize,
}

impl TagWindow {
    /// Create a window with the given capacity (at least 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            buf: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Create a window sized for suffix-matching two patterns.
    ///
    /// Capacity is the longer pattern length, never below `MIN_WINDOW`.
    pub fn for_patterns(open_len: usize, close_len: usize) -> Self {
        Self::new(open_len.max(close_len).max(MIN_WINDOW))
    }

    /// Append a token, evicting the oldest if the window is full.
    pub fn push(&mut self, token: u32) {
        if self.buf.len() == self.capacity {
            self.buf.pop_front();
        }
        self.buf.push_back(token);
    }

    /// Check whether the window's trailing contents equal `pattern`.
    ///
    /// Comparison runs elementwise, most recent first. An empty pattern
    /// never matches; a pattern longer than the window contents always
    /// fails.
    pub fn ends_with(&self, pattern: &[u32]) -> bool {
        if pattern.is_empty() || pattern.len() > self.buf.len() {
            return false;
        }
        self.buf
            .iter()
            .rev()
            .zip(pattern.iter().rev())
            .all(|(held, want)| held == want)
    }

    /// Number of tokens currently held.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Check if the window holds no tokens.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Maximum number of tokens held.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop all held tokens.
    pub fn clear(&mut self) {
        self.buf.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evicts_oldest_on_overflow() {
        let mut window = TagWindow::new(3);
        for token in [1, 2, 3, 4] {
            window.push(token);
        }
        assert_eq!(window.len(), 3);
        assert!(window.ends_with(&[2, 3, 4]));
        assert!(!window.ends_with(&[1, 2, 3, 4]));
    }

    #[test]
    fn empty_pattern_never_matches() {
        let mut window = TagWindow::new(4);
        assert!(!window.ends_with(&[]));
        window.push(7);
        assert!(!window.ends_with(&[]));
    }

    #[test]
    fn pattern_longer_than_contents_fails() {
        let mut window = TagWindow::new(4);
        window.push(7);
        assert!(!window.ends_with(&[7, 7]));
    }

    #[test]
    fn matches_most_recent_first() {
        let mut window = TagWindow::new(4);
        for token in [1, 2, 3] {
            window.push(token);
        }
        assert!(window.ends_with(&[3]));
        assert!(window.ends_with(&[2, 3]));
        assert!(!window.ends_with(&[3, 2]));
    }

    #[test]
    fn for_patterns_enforces_minimum() {
        assert_eq!(TagWindow::for_patterns(2, 3).capacity(), 8);
        assert_eq!(TagWindow::for_patterns(12, 3).capacity(), 12);
    }

    #[test]
    fn clear_drops_contents() {
        let mut window = TagWindow::new(4);
        window.push(1);
        window.clear();
        assert!(window.is_empty());
        assert!(!window.ends_with(&[1]));
    }
}
