//! Lightweight xorshift32 PRNG, seedable so animations replay exactly

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticleRng {
    state: u32,
}

impl ParticleRng {
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    /// Seed from the wall clock, for callers that don't need replays
    pub fn from_time() -> Self {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
            .unwrap_or(0xDEAD_BEEF);
        Self::new(nanos)
    }

    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Returns a float in [0, 1)
    pub fn next_f32(&mut self) -> f32 {
        // 24 bits fit the f32 mantissa exactly, so 1.0 is never produced
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Returns a float in [min, max)
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }

    /// Returns an index in [0, n); 0 when n is 0
    pub fn below(&mut self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        (self.next_u32() as usize) % n
    }

    /// Split off an independent stream, e.g. one per weather model
    pub fn fork(&mut self) -> ParticleRng {
        // splitmix-style scramble so forks don't mirror the parent sequence
        let mut z = self.next_u32().wrapping_add(0x9E37_79B9);
        z = (z ^ (z >> 16)).wrapping_mul(0x85EB_CA6B);
        z = (z ^ (z >> 13)).wrapping_mul(0xC2B2_AE35);
        ParticleRng::new(z ^ (z >> 16))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rng_range_bounds() {
        let mut rng = ParticleRng::new(42);
        for _ in 0..1000 {
            let v = rng.range(0.0, 10.0);
            assert!(v >= 0.0 && v < 10.0);
        }
    }

    #[test]
    fn rng_unit_interval_excludes_one() {
        let mut rng = ParticleRng::new(7);
        for _ in 0..10_000 {
            let v = rng.next_f32();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn zero_seed_is_remapped() {
        let mut rng = ParticleRng::new(0);
        assert_ne!(rng.next_u32(), 0);
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = ParticleRng::new(99);
        let mut b = ParticleRng::new(99);
        for _ in 0..100 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn forks_diverge_from_parent() {
        let mut parent = ParticleRng::new(1234);
        let mut fork = parent.fork();
        let a: Vec<u32> = (0..8).map(|_| parent.next_u32()).collect();
        let b: Vec<u32> = (0..8).map(|_| fork.next_u32()).collect();
        assert_ne!(a, b);
    }

    #[test]
    fn below_handles_zero() {
        let mut rng = ParticleRng::new(5);
        assert_eq!(rng.below(0), 0);
        for _ in 0..100 {
            assert!(rng.below(3) < 3);
        }
    }
}
