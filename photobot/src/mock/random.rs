//! Test mock for the random source
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::random::RandomSource;

/// Replays a fixed sequence. Each value is clamped into the requested range;
/// once the sequence runs out every draw returns `min`.
#[derive(Debug, Default)]
pub struct SequenceRandom {
    values: Mutex<VecDeque<usize>>,
}

impl SequenceRandom {
    pub fn new(values: impl IntoIterator<Item = usize>) -> Self {
        Self {
            values: Mutex::new(values.into_iter().collect()),
        }
    }

    pub fn remaining(&self) -> usize {
        self.values.lock().unwrap().len()
    }
}

impl RandomSource for SequenceRandom {
    fn uniform(&self, min: usize, max: usize) -> usize {
        let next = self.values.lock().unwrap().pop_front();
        match next {
            Some(value) if max > min => value.clamp(min, max),
            _ => min,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_is_replayed_and_clamped() {
        let random = SequenceRandom::new([2, 9, 0]);
        assert_eq!(random.uniform(0, 5), 2);
        assert_eq!(random.uniform(1, 4), 4);
        assert_eq!(random.uniform(1, 4), 1);
        assert_eq!(random.uniform(3, 7), 3);
        assert_eq!(random.remaining(), 0);
    }
}
