//! Fixed-output RNG for deterministic generator tests.

use rand::RngCore;

/// Returns the same raw word on every draw. [`ConstRng::half`] yields a
/// generator whose `random::<f64>()` comes out as exactly 0.5.
pub struct ConstRng(u64);

impl ConstRng {
    pub fn half() -> Self {
        // f64 draws use the top 53 bits: 2^52 / 2^53 == 0.5.
        ConstRng(1u64 << 63)
    }
}

impl RngCore for ConstRng {
    fn next_u32(&mut self) -> u32 {
        (self.0 >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.0
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        let bytes = self.0.to_le_bytes();
        for chunk in dest.chunks_mut(8) {
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}
