//! Fixed-capacity FIFO of recent raw values
//!
//! The history backing the dynamic threshold. Storage is a `Vec<f64>` that
//! grows to `capacity` and is then overwritten in place, with `head` marking
//! the oldest entry. Every push follows the same rule: append, then evict the
//! oldest value if the window would exceed its capacity.

use crate::error::Result;
use crate::validation;
use statrs::statistics::Statistics;

/// Bounded history of the most recent values, oldest evicted first
#[derive(Debug, Clone, PartialEq)]
pub struct BoundedHistory {
    buf: Vec<f64>,
    head: usize,
    capacity: usize,
}

impl BoundedHistory {
    /// Create an empty history holding at most `capacity` values
    pub fn new(capacity: usize) -> Result<Self> {
        let capacity = validation::positive_len("history capacity", capacity)?;
        Ok(Self {
            buf: Vec::with_capacity(capacity),
            head: 0,
            capacity,
        })
    }

    /// Append a value, returning the evicted oldest value once full
    pub fn push(&mut self, value: f64) -> Option<f64> {
        if self.buf.len() < self.capacity {
            self.buf.push(value);
            return None;
        }

        let evicted = std::mem::replace(&mut self.buf[self.head], value);
        self.head = (self.head + 1) % self.capacity;
        Some(evicted)
    }

    /// Values in arrival order, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &f64> + '_ {
        let (newer, older) = self.buf.split_at(self.head);
        older.iter().chain(newer.iter())
    }

    /// Copy of the window contents, oldest first
    pub fn to_vec(&self) -> Vec<f64> {
        self.iter().copied().collect()
    }

    /// Oldest retained value
    pub fn oldest(&self) -> Option<f64> {
        self.iter().next().copied()
    }

    /// Most recently pushed value
    pub fn newest(&self) -> Option<f64> {
        if self.buf.is_empty() {
            return None;
        }
        let idx = (self.head + self.buf.len() - 1) % self.buf.len();
        Some(self.buf[idx])
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// True once the window holds exactly `capacity` values
    pub fn is_full(&self) -> bool {
        self.buf.len() == self.capacity
    }

    pub fn clear(&mut self) {
        self.buf.clear();
        self.head = 0;
    }

    /// Arithmetic mean of the window, `None` when empty
    pub fn mean(&self) -> Option<f64> {
        if self.is_empty() {
            return None;
        }
        Some(self.iter().mean())
    }

    /// Population (biased, divide by n) standard deviation, `None` when empty
    pub fn population_std_dev(&self) -> Option<f64> {
        if self.is_empty() {
            return None;
        }
        Some(self.iter().population_std_dev())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(matches!(
            BoundedHistory::new(0),
            Err(crate::Error::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_fills_before_evicting() {
        let mut history = BoundedHistory::new(3).unwrap();
        assert!(history.is_empty());

        assert_eq!(history.push(1.0), None);
        assert_eq!(history.push(2.0), None);
        assert!(!history.is_full());
        assert_eq!(history.push(3.0), None);
        assert!(history.is_full());
        assert_eq!(history.to_vec(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_evicts_oldest_first() {
        let mut history = BoundedHistory::new(3).unwrap();
        for v in [1.0, 2.0, 3.0] {
            history.push(v);
        }

        assert_eq!(history.push(4.0), Some(1.0));
        assert_eq!(history.to_vec(), vec![2.0, 3.0, 4.0]);
        assert_eq!(history.push(5.0), Some(2.0));
        assert_eq!(history.push(6.0), Some(3.0));
        assert_eq!(history.push(7.0), Some(4.0));
        assert_eq!(history.to_vec(), vec![5.0, 6.0, 7.0]);
        assert_eq!(history.len(), 3);
        assert_eq!(history.oldest(), Some(5.0));
        assert_eq!(history.newest(), Some(7.0));
    }

    #[test]
    fn test_duplicates_allowed() {
        let mut history = BoundedHistory::new(2).unwrap();
        history.push(4.0);
        history.push(4.0);
        assert_eq!(history.push(4.0), Some(4.0));
        assert_eq!(history.to_vec(), vec![4.0, 4.0]);
    }

    #[test]
    fn test_capacity_one() {
        let mut history = BoundedHistory::new(1).unwrap();
        assert_eq!(history.push(1.0), None);
        assert!(history.is_full());
        assert_eq!(history.push(2.0), Some(1.0));
        assert_eq!(history.to_vec(), vec![2.0]);
        assert_eq!(history.population_std_dev(), Some(0.0));
    }

    #[test]
    fn test_population_std_dev() {
        let mut history = BoundedHistory::new(5).unwrap();
        assert_eq!(history.population_std_dev(), None);
        assert_eq!(history.mean(), None);

        for v in [10.0, 10.0, 10.0, 10.0, 50.0] {
            history.push(v);
        }
        assert_relative_eq!(history.mean().unwrap(), 18.0, epsilon = 1e-12);
        assert_relative_eq!(history.population_std_dev().unwrap(), 16.0, epsilon = 1e-12);
    }

    #[test]
    fn test_constant_window_has_zero_spread() {
        let mut history = BoundedHistory::new(4).unwrap();
        for _ in 0..10 {
            history.push(42.5);
        }
        assert_eq!(history.population_std_dev(), Some(0.0));
    }

    #[test]
    fn test_clear_resets_order() {
        let mut history = BoundedHistory::new(2).unwrap();
        for v in [1.0, 2.0, 3.0] {
            history.push(v);
        }
        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.newest(), None);
        history.push(9.0);
        assert_eq!(history.to_vec(), vec![9.0]);
    }
}
