//! Seedable xorshift64 generator for domino faces.
//! Deterministic per session seed, so replays roll the same pips.

#[derive(Debug, Clone)]
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Rng {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Uniform integer in `lo..=hi`. Returns `lo` when the range is empty.
    pub fn range_inclusive(&mut self, lo: u32, hi: u32) -> u32 {
        if hi <= lo {
            return lo;
        }
        let span = (hi - lo) as u64 + 1;
        lo + (self.next_u64() % span) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = Rng::new(42);
        let mut b = Rng::new(42);
        for _ in 0..32 {
            assert_eq!(a.range_inclusive(1, 6), b.range_inclusive(1, 6));
        }
    }

    #[test]
    fn range_stays_in_bounds() {
        let mut rng = Rng::new(0);
        for _ in 0..500 {
            let v = rng.range_inclusive(1, 6);
            assert!((1..=6).contains(&v), "rolled {}", v);
        }
        assert_eq!(rng.range_inclusive(3, 3), 3);
        assert_eq!(rng.range_inclusive(5, 2), 5);
    }
}
