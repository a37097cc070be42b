/// Park–Miller "minimal standard" linear-congruential generator.
///
/// `state = state * 16807 mod (2^31 - 1)`; outputs lie in `[0, 1)`. The same seed always yields
/// the same sequence, which keeps slot assignment identical across repeated renders.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SeededRandom {
    state: u64,
}

impl SeededRandom {
    const MODULUS: u64 = 2_147_483_647;
    const MULTIPLIER: u64 = 16_807;

    pub fn new(seed: u64) -> Self {
        let mut state = seed % Self::MODULUS;
        if state == 0 {
            state = Self::MODULUS - 1;
        }
        Self { state }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = (self.state * Self::MULTIPLIER) % Self::MODULUS;
        self.state as u32
    }

    pub fn next_f64(&mut self) -> f64 {
        let v = self.next_u32();
        f64::from(v - 1) / (Self::MODULUS - 1) as f64
    }

    /// Uniform index in `0..len`. `len` must be non-zero.
    pub fn next_index(&mut self, len: usize) -> usize {
        let i = (self.next_f64() * len as f64).floor() as usize;
        i.min(len.saturating_sub(1))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/progress/rng.rs"]
mod tests;
