use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use hmac::{Hmac, Mac};
use rand::Rng;
use sha2::Sha256;

pub type HmacSha256 = Hmac<Sha256>;

/// Uniform draws in `[0, 1)`, shareable across request tasks.
pub trait RandomSource: Send + Sync {
    fn next_unit(&self) -> f64;
}

/// Production source: every call draws from the calling thread's own generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadSource;

impl RandomSource for ThreadSource {
    fn next_unit(&self) -> f64 {
        rand::thread_rng().gen::<f64>()
    }
}

pub fn derive_hash_hex(input: &[u8]) -> String {
    use sha2::Digest;
    let mut hasher = Sha256::new();
    hasher.update(input);
    hex::encode(hasher.finalize())
}

/// Maps the first 8 bytes of `bytes` to `[0, 1)` with 53 bits of precision.
pub fn unit_from_bytes(bytes: &[u8]) -> f64 {
    let mut word = [0u8; 8];
    let n = bytes.len().min(8);
    word[..n].copy_from_slice(&bytes[..n]);
    let v = u64::from_be_bytes(word) >> 11;
    v as f64 / (1u64 << 53) as f64
}

// Replayable stream: seed + index -> HMAC-SHA256 -> unit float.
// Same seed gives the same sequence; concurrent callers each claim a distinct index.
pub struct SeededSource {
    seed: String,
    index: AtomicU64,
}

impl SeededSource {
    pub fn new(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            index: AtomicU64::new(0),
        }
    }

    pub fn seed_hash_hex(&self) -> String {
        derive_hash_hex(self.seed.as_bytes())
    }

    /// Number of values handed out so far.
    pub fn position(&self) -> u64 {
        self.index.load(Ordering::Relaxed)
    }

    pub fn value_at(&self, index: u64) -> f64 {
        let mut mac =
            HmacSha256::new_from_slice(self.seed.as_bytes()).expect("HMAC takes any key length");
        mac.update(format!("rtp:{index}").as_bytes());
        unit_from_bytes(&mac.finalize().into_bytes())
    }
}

impl RandomSource for SeededSource {
    fn next_unit(&self) -> f64 {
        let index = self.index.fetch_add(1, Ordering::Relaxed);
        self.value_at(index)
    }
}

/// Cycles through preset values; lets tests choose every `u`.
#[derive(Debug)]
pub struct FixedSource {
    values: Vec<f64>,
    index: AtomicUsize,
}

impl FixedSource {
    /// Values are clamped into `[0, 1)`. An empty list behaves like `[0.0]`.
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        let mut values: Vec<f64> = values
            .into()
            .into_iter()
            .map(|v| v.clamp(0.0, 1.0 - f64::EPSILON))
            .collect();
        if values.is_empty() {
            values.push(0.0);
        }
        Self {
            values,
            index: AtomicUsize::new(0),
        }
    }

    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }
}

impl RandomSource for FixedSource {
    fn next_unit(&self) -> f64 {
        let idx = self.index.fetch_add(1, Ordering::Relaxed);
        self.values[idx % self.values.len()]
    }
}

impl<S: RandomSource + ?Sized> RandomSource for std::sync::Arc<S> {
    fn next_unit(&self) -> f64 {
        (**self).next_unit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let a = SeededSource::new("server");
        let b = SeededSource::new("server");
        assert_eq!(a.seed_hash_hex(), b.seed_hash_hex());
        let xs: Vec<f64> = (0..5).map(|_| a.next_unit()).collect();
        let ys: Vec<f64> = (0..5).map(|_| b.next_unit()).collect();
        assert_eq!(xs, ys);
        assert_eq!(a.position(), 5);
    }

    #[test]
    fn different_seeds_differ() {
        let a = SeededSource::new("one");
        let b = SeededSource::new("two");
        assert_ne!(a.next_unit(), b.next_unit());
    }

    #[test]
    fn seeded_values_stay_in_unit_interval() {
        let src = SeededSource::new("range");
        for _ in 0..2_000 {
            let u = src.next_unit();
            assert!((0.0..1.0).contains(&u), "u = {u}");
        }
    }

    #[test]
    fn thread_source_in_unit_interval() {
        for _ in 0..1_000 {
            let u = ThreadSource.next_unit();
            assert!((0.0..1.0).contains(&u));
        }
    }

    #[test]
    fn unit_from_bytes_extremes() {
        assert_eq!(unit_from_bytes(&[0u8; 8]), 0.0);
        let top = unit_from_bytes(&[0xff; 8]);
        assert!(top < 1.0 && top > 0.999_999);
    }

    #[test]
    fn fixed_source_cycles_and_clamps() {
        let src = FixedSource::new(vec![0.25, 2.0, -1.0]);
        assert_eq!(src.next_unit(), 0.25);
        assert!(src.next_unit() < 1.0);
        assert_eq!(src.next_unit(), 0.0);
        assert_eq!(src.next_unit(), 0.25);
    }
}
