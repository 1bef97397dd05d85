//! Reproducible random source for initial placement.
//!
//! `GlibcRandom` reproduces the additive feedback generator behind the C
//! library's `random()`/`srandom()` pair (the TYPE_3 variant: a 31-word
//! state with taps 3 apart). Seeding it with [`SEED`] yields exactly the
//! placement sequence every earlier brace-topia run has produced, which is
//! why the generator is not simply swapped for one of `rand`'s own.

use rand::{RngCore, SeedableRng};

/// Fixed seed for every run.
pub const SEED: u32 = 41;

const DEGREE: usize = 31;
const SEPARATION: usize = 3;
const WARM_UP: usize = DEGREE * 10;

#[derive(Debug, Clone)]
pub struct GlibcRandom {
    state: [i32; DEGREE],
    front: usize,
    rear: usize,
}

impl GlibcRandom {
    pub fn new(seed: u32) -> Self {
        let mut state = [0i32; DEGREE];
        state[0] = if seed == 0 { 1 } else { seed as i32 };

        // Park-Miller minimal standard step, Schrage's method.
        for i in 1..DEGREE {
            let word = i64::from(state[i - 1]);
            let hi = word / 127_773;
            let lo = word % 127_773;
            let mut next = 16_807 * lo - 2_836 * hi;
            if next < 0 {
                next += 2_147_483_647;
            }
            state[i] = next as i32;
        }

        let mut rng = GlibcRandom { state, front: SEPARATION, rear: 0 };
        for _ in 0..WARM_UP {
            rng.next_raw();
        }
        rng
    }

    /// Generator seeded with the fixed run seed.
    pub fn seeded() -> Self {
        Self::new(SEED)
    }

    /// Next 31-bit output, as `random()` would return it.
    #[inline]
    fn next_raw(&mut self) -> u32 {
        let sum = self.state[self.front].wrapping_add(self.state[self.rear]);
        self.state[self.front] = sum;
        self.front = (self.front + 1) % DEGREE;
        self.rear = (self.rear + 1) % DEGREE;
        (sum as u32) >> 1
    }
}

impl RngCore for GlibcRandom {
    /// Yields the raw 31-bit value; the top bit is always clear.
    fn next_u32(&mut self) -> u32 {
        self.next_raw()
    }

    fn next_u64(&mut self) -> u64 {
        let lo = u64::from(self.next_raw());
        let hi = u64::from(self.next_raw());
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for chunk in dst.chunks_mut(4) {
            let bytes = self.next_raw().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}

impl SeedableRng for GlibcRandom {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u32::from_le_bytes(seed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_c_library_default_seed() {
        // First outputs of random() after srandom(1).
        let mut rng = GlibcRandom::new(1);
        assert_eq!(rng.next_u32(), 1_804_289_383);
        assert_eq!(rng.next_u32(), 846_930_886);
        assert_eq!(rng.next_u32(), 1_681_692_777);
        assert_eq!(rng.next_u32(), 1_714_636_915);
    }

    #[test]
    fn zero_seed_behaves_like_one() {
        let mut a = GlibcRandom::new(0);
        let mut b = GlibcRandom::new(1);
        for _ in 0..64 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn outputs_are_31_bit() {
        let mut rng = GlibcRandom::seeded();
        assert!((0..1000).all(|_| rng.next_u32() < (1 << 31)));
    }

    #[test]
    fn from_seed_is_little_endian_u32() {
        let mut a = GlibcRandom::from_seed(SEED.to_le_bytes());
        let mut b = GlibcRandom::seeded();
        assert_eq!(a.next_u64(), b.next_u64());
    }

    #[test]
    fn fill_bytes_handles_partial_chunk() {
        let mut rng = GlibcRandom::new(1);
        let mut buf = [0u8; 6];
        rng.fill_bytes(&mut buf);
        assert_eq!(&buf[..4], &1_804_289_383u32.to_le_bytes());
        assert_eq!(&buf[4..], &846_930_886u32.to_le_bytes()[..2]);
    }
}
