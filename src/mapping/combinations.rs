/// Lazy cartesian product over per-slot choice counts.
///
/// Each item picks one index per slot; the last slot varies fastest. With
/// no slots, or any slot offering zero choices, there are no combinations.
/// The iterator is finite and `Clone`, so a fresh copy (or
/// [`restart`](Self::restart)) walks the same sequence again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Combinations {
    radices: Vec<usize>,
    next: Option<Vec<usize>>,
}

impl Combinations {
    pub fn new(radices: Vec<usize>) -> Self {
        let mut combinations = Self {
            radices,
            next: None,
        };
        combinations.restart();
        combinations
    }

    pub fn restart(&mut self) {
        self.next = (!self.radices.is_empty() && self.radices.iter().all(|&r| r > 0))
            .then(|| vec![0; self.radices.len()]);
    }

    /// Number of combinations in a full pass, or `None` if it overflows `usize`.
    pub fn total(&self) -> Option<usize> {
        if self.radices.is_empty() {
            return Some(0);
        }
        self.radices
            .iter()
            .try_fold(1usize, |acc, &r| acc.checked_mul(r))
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        let current = self.next.take()?;
        let mut successor = current.clone();
        let radices = &self.radices;
        let advanced = (0..successor.len()).rev().any(|slot| {
            successor[slot] += 1;
            if successor[slot] < radices[slot] {
                true
            } else {
                successor[slot] = 0;
                false
            }
        });
        if advanced {
            self.next = Some(successor);
        }
        Some(current)
    }
}
