//! Order keys among siblings
//!
//! Siblings are ordered by an integer `pos`. Keys are handed out well spaced
//! (`BASE_POS` apart) so that a node can be inserted between two siblings by
//! bisection without touching the others. Repeated bisection eventually runs
//! out of integers; `between` reports that instead of producing a duplicate,
//! and callers renumber the sibling set with `rebalance`.

/// Spacing between freshly generated sibling keys
pub const BASE_POS: i64 = 100_000;

/// Calculates order keys for inserting a node among its siblings
pub struct PositionGenerator;

impl PositionGenerator {
    /// Key of the `n`-th slot in a freshly numbered sibling list (1-based)
    pub fn at(n: i64) -> i64 {
        n * BASE_POS
    }

    /// Key for appending after the sibling at `last`
    pub fn after(last: i64) -> i64 {
        last + BASE_POS
    }

    /// Key strictly between `a` and `b`, rounding halves up.
    ///
    /// Returns `None` when `b - a <= 1`: no integer fits and the sibling set
    /// has to be renumbered first.
    ///
    /// # Examples
    /// ```
    /// use outline_core::tree::PositionGenerator;
    ///
    /// assert_eq!(PositionGenerator::between(0, 100_000), Some(50_000));
    /// assert_eq!(PositionGenerator::between(1, 4), Some(3));
    /// assert_eq!(PositionGenerator::between(7, 8), None);
    /// ```
    pub fn between(a: i64, b: i64) -> Option<i64> {
        if b - a <= 1 {
            return None;
        }
        // a + ceil((b - a) / 2) == round((a + b) / 2) without overflowing a + b
        Some(a + (b - a + 1) / 2)
    }

    /// Key for a node placed between two optional neighbours
    ///
    /// - no neighbours: first slot
    /// - only a previous sibling: after it
    /// - only a next sibling: between zero and it
    /// - both: between them
    pub fn calculate(prev: Option<i64>, next: Option<i64>) -> Option<i64> {
        match (prev, next) {
            (None, None) => Some(Self::at(1)),
            (Some(prev), None) => Some(Self::after(prev)),
            (None, Some(next)) => Self::between(0, next),
            (Some(prev), Some(next)) => Self::between(prev, next),
        }
    }

    /// Evenly spaced keys for `count` siblings
    ///
    /// # Example
    /// Input:  3
    /// Output: [100000, 200000, 300000]
    pub fn rebalance(count: usize) -> Vec<i64> {
        (1..=count as i64).map(Self::at).collect()
    }
}
