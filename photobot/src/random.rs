use rand::Rng;

/// Source of uniform integers, passed explicitly so selection can be driven
/// by a fixed sequence in tests.
pub trait RandomSource: Send + Sync {
    /// Uniform integer in `min..=max`. Returns `min` when `max <= min`.
    fn uniform(&self, min: usize, max: usize) -> usize;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn uniform(&self, min: usize, max: usize) -> usize {
        if max <= min {
            return min;
        }
        rand::thread_rng().gen_range(min..=max)
    }
}
