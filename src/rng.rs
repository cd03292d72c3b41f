//! Random sources for mosaic seeding
//!
//! Engines that need randomness take a `&mut impl SeedSource` so callers pick
//! the generator and tests can replay exact seed positions.

/// Source of uniformly distributed indices.
pub trait SeedSource {
    /// Return a value in `[0, bound)`. `bound` is never zero.
    fn next_index(&mut self, bound: usize) -> usize;
}

/// A simple deterministic PRNG (xorshift64).
#[derive(Debug, Clone)]
pub struct XorShiftRng {
    state: u64,
}

impl XorShiftRng {
    /// Create a generator from a seed. The same seed always yields the same
    /// sequence.
    pub fn new(seed: u64) -> Self {
        // Ensure non-zero state
        Self { state: if seed == 0 { 0x12345678_9ABCDEF0 } else { seed } }
    }

    /// Generate next u64 value.
    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }
}

impl SeedSource for XorShiftRng {
    fn next_index(&mut self, bound: usize) -> usize {
        debug_assert!(bound > 0, "bound must be positive");
        (self.next_u64() % bound as u64) as usize
    }
}

impl<S: SeedSource + ?Sized> SeedSource for &mut S {
    fn next_index(&mut self, bound: usize) -> usize {
        (**self).next_index(bound)
    }
}
