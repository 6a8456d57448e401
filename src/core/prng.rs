//! Sponge-based pseudo-random number generator.

use rand::{CryptoRng, RngCore};

use super::{hash::Hash, sponge::Sponge};
use crate::error::Result;

/// Exponent bits of 1.0; OR-ing them into raw bits yields a double in
/// `[1, 2)` over the low 52 mantissa bits.
const EXP_ONE: u64 = 1023 << 52;

/// Sponge-based pseudo-random number generator.
///
/// Output limbs are dispensed from the readable portion of the state, from
/// lane `rate - 1` down to lane 0; when the buffer runs dry another
/// permutation refills it. A freshly constructed generator has zero state
/// (apart from the namespace lane) and an empty buffer, so its stream is a
/// pure function of the construction parameters until [`seed`] mixes in
/// caller entropy.
///
/// [`seed`]: Prng::seed
#[derive(Clone)]
pub struct Prng {
    sponge: Sponge,
    /// Lanes not yet dispensed, in `0..=rate`.
    avail: u32,
}

impl Prng {
    /// Same parameters as [`Sponge::new`].
    pub fn new(cp: u32, nr: u32, ns: u32) -> Result<Self> {
        Ok(Self {
            sponge: Sponge::new(cp, nr, ns)?,
            avail: 0,
        })
    }

    /// Seeds the generator with `values`. At most the first `rate` values
    /// are used; extras are silently discarded.
    pub fn seed(&mut self, values: &[u64]) {
        self.sponge.absorb_limbs(values);
        self.avail = self.sponge.rate() as u32;
    }

    /// Returns a random `u64`.
    pub fn next_u64(&mut self) -> u64 {
        if self.avail == 0 {
            self.sponge.permute();
            self.avail = self.sponge.rate() as u32;
        }
        self.avail -= 1;
        self.sponge.lanes()[self.avail as usize]
    }

    /// Returns a uniformly distributed float from `[0, 1)`.
    pub fn uniform(&mut self) -> f64 {
        // sign and exponent forced so the raw bits read as a double in [1, 2)
        let bits = self.next_u64() & !(3 << 62) | EXP_ONE;
        f64::from_bits(bits) - 1.0
    }

    /// Returns a uniformly distributed float from `(-1, 1)`.
    pub fn uniform_signed(&mut self) -> f64 {
        // exponent forced, sign kept, so the raw bits read as +/-[1, 2)
        let bits = self.next_u64() & !(1 << 62) | EXP_ONE;
        let d = f64::from_bits(bits);
        if d > 0.0 {
            d - 1.0
        } else {
            d + 1.0
        }
    }

    /// Returns two independent normally distributed floats with zero mean
    /// and unit variance, via the Marsaglia polar method.
    pub fn normal_pair(&mut self) -> (f64, f64) {
        loop {
            let a = self.uniform_signed();
            let b = self.uniform_signed();
            let s = a * a + b * b;
            if s > 0.0 && s < 1.0 {
                let r = (-2.0 * s.ln() / s).sqrt();
                return (r * a, r * b);
            }
        }
    }

    /// Returns an exponentially distributed float with unit mean.
    pub fn exponential(&mut self) -> f64 {
        // d is in [1, 2), so 2 - d stays in (0, 1] and the log is finite
        let d = f64::from_bits(self.next_u64() & !(3 << 62) | EXP_ONE);
        -(2.0 - d).ln()
    }

    /// Restores the initial post-construction state: zeroed lanes, namespace
    /// in lane 24, empty squeeze buffer.
    pub fn reset(&mut self) {
        self.sponge.reset();
        self.avail = 0;
    }
}

/// A hash with absorbed data can serve as a seeded generator over the same
/// state. The pending bytes are padded and absorbed exactly as [`Hash::sum`]
/// would, but the state is kept instead of reset and the full rate becomes
/// available for squeezing.
impl From<Hash> for Prng {
    fn from(hash: Hash) -> Self {
        let sponge = hash.into_seeded_sponge();
        let avail = sponge.rate() as u32;
        Self { sponge, avail }
    }
}

impl RngCore for Prng {
    fn next_u32(&mut self) -> u32 {
        Prng::next_u64(self) as u32
    }

    fn next_u64(&mut self) -> u64 {
        Prng::next_u64(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        let mut chunks = dest.chunks_exact_mut(8);
        for chunk in &mut chunks {
            chunk.copy_from_slice(&Prng::next_u64(self).to_le_bytes());
        }
        let tail = chunks.into_remainder();
        if !tail.is_empty() {
            let last = Prng::next_u64(self).to_le_bytes();
            tail.copy_from_slice(&last[..tail.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> std::result::Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl CryptoRng for Prng {}
