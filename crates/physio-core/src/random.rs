//! Injectable randomness for score jitter and simulations.

use parking_lot::Mutex;
use rand::Rng;

/// Source of uniform samples in `[0, 1)`
pub trait RandomSource: Send + Sync {
    fn next(&self) -> f64;
}

/// Thread-local RNG backed source
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next(&self) -> f64 {
        rand::thread_rng().gen::<f64>()
    }
}

/// Always returns the same sample. Values are clamped into `[0, 1)`.
#[derive(Debug, Clone, Copy)]
pub struct FixedRandom(f64);

impl FixedRandom {
    pub fn new(value: f64) -> Self {
        Self(value.clamp(0.0, 1.0 - f64::EPSILON))
    }

    pub fn zero() -> Self {
        Self(0.0)
    }
}

impl RandomSource for FixedRandom {
    fn next(&self) -> f64 {
        self.0
    }
}

/// Replays a fixed sequence of samples, cycling when exhausted.
#[derive(Debug)]
pub struct SequenceRandom {
    values: Vec<f64>,
    cursor: Mutex<usize>,
}

impl SequenceRandom {
    pub fn new(values: Vec<f64>) -> Self {
        let values = values
            .into_iter()
            .map(|v| v.clamp(0.0, 1.0 - f64::EPSILON))
            .collect();
        Self {
            values,
            cursor: Mutex::new(0),
        }
    }
}

impl RandomSource for SequenceRandom {
    fn next(&self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }

        let mut cursor = self.cursor.lock();
        let value = self.values[*cursor % self.values.len()];
        *cursor += 1;
        value
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &R {
    fn next(&self) -> f64 {
        (**self).next()
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn next(&self) -> f64 {
        (**self).next()
    }
}

impl<R: RandomSource + ?Sized> RandomSource for std::sync::Arc<R> {
    fn next(&self) -> f64 {
        (**self).next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thread_random_range() {
        let rng = ThreadRandom;
        for _ in 0..1000 {
            let v = rng.next();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn test_fixed_random_clamps() {
        assert_eq!(FixedRandom::new(0.25).next(), 0.25);
        assert_eq!(FixedRandom::new(-3.0).next(), 0.0);
        assert!(FixedRandom::new(1.0).next() < 1.0);
    }

    #[test]
    fn test_sequence_random_cycles() {
        let rng = SequenceRandom::new(vec![0.1, 0.5]);
        assert_eq!(rng.next(), 0.1);
        assert_eq!(rng.next(), 0.5);
        assert_eq!(rng.next(), 0.1);

        let empty = SequenceRandom::new(Vec::new());
        assert_eq!(empty.next(), 0.0);
    }
}
