use rand::{rngs::StdRng, Rng, SeedableRng};

/// Bounded random provider used for metric jitter.
pub trait JitterSource: Send {
    /// A value in `[low, high]`.
    fn next(&mut self, low: f64, high: f64) -> f64;
}

/// Uniform jitter backed by `StdRng`; seed it for reproducible runs.
pub struct RandomJitter {
    rng: StdRng,
}

impl RandomJitter {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomJitter {
    fn default() -> Self {
        Self::new()
    }
}

impl JitterSource for RandomJitter {
    fn next(&mut self, low: f64, high: f64) -> f64 {
        if low >= high {
            return low;
        }
        self.rng.gen_range(low..=high)
    }
}

/// Always returns the same offset, clamped into the requested band.
#[derive(Debug, Clone, Copy)]
pub struct FixedJitter(pub f64);

impl JitterSource for FixedJitter {
    fn next(&mut self, low: f64, high: f64) -> f64 {
        if low >= high {
            return low;
        }
        self.0.clamp(low, high)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_jitter_repeats() {
        let mut a = RandomJitter::seeded(7);
        let mut b = RandomJitter::seeded(7);
        for _ in 0..16 {
            assert_eq!(a.next(-0.1, 0.1), b.next(-0.1, 0.1));
        }
    }

    #[test]
    fn random_jitter_stays_in_band() {
        let mut jitter = RandomJitter::seeded(99);
        for _ in 0..1000 {
            let value = jitter.next(-0.1, 0.1);
            assert!((-0.1..=0.1).contains(&value));
        }
    }

    #[test]
    fn degenerate_band_returns_low() {
        assert_eq!(RandomJitter::seeded(1).next(0.3, 0.3), 0.3);
        assert_eq!(FixedJitter(5.0).next(0.5, 0.2), 0.5);
    }
}
