use std::{fmt, mem};

use crate::error::{
    Error::{BadParameters, BadRate},
    Result,
};

use super::{MAX_CAPACITY, MAX_ROUNDS, STATE_LANES};

/// Sponge state over a modified `Keccak-f[1600]` permutation.
///
/// The state is 25 lanes of 64 bits. `25 - capacity` lanes are exposed for
/// absorbing and squeezing (the rate), the rest stay hidden. Lane 24 holds a
/// 32-bit namespace that domain-separates sponge instances: two sponges with
/// different namespaces, round counts or inputs always produce different
/// outputs.
///
/// The permutation differs from standard Keccak in its ι step. Instead of the
/// tabulated round constants, the (round-dependent) round number itself is
/// added into a lane that also moves with the round, starting at lane 23 just
/// below the namespace lane. This is the sole source of round asymmetry and
/// namespace coupling, so there are no standard test vectors; compatibility is
/// defined by the primitive itself.
#[derive(Clone)]
pub struct Sponge {
    /// The 25 state lanes.
    lanes: [u64; STATE_LANES],
    /// Exposed lanes per permutation, `25 - capacity`.
    rate: usize,
    /// Permutation rounds per transform.
    rounds: u32,
    /// Namespace value rehydrated into lane 24 on reset.
    namespace: u32,
}

impl Sponge {
    /// Creates a sponge with `cp` hidden lanes, `nr` rounds per permutation
    /// and namespace `ns`.
    ///
    /// `cp` must be in `1..=12` (3 or more recommended) and `nr` in `1..=24`
    /// (11 or more recommended), otherwise [`Error::BadParameters`] is
    /// returned.
    ///
    /// [`Error::BadParameters`]: crate::error::Error::BadParameters
    pub fn new(cp: u32, nr: u32, ns: u32) -> Result<Self> {
        if !(1..=MAX_CAPACITY).contains(&cp) || !(1..=MAX_ROUNDS).contains(&nr) {
            return Err(BadParameters(cp, nr));
        }
        let mut lanes = [0_u64; STATE_LANES];
        lanes[STATE_LANES - 1] = u64::from(ns);
        Ok(Self {
            lanes,
            rate: (STATE_LANES as u32 - cp) as usize,
            rounds: nr,
            namespace: ns,
        })
    }

    /// Number of lanes exposed for absorbing input per permutation.
    pub fn rate(&self) -> usize {
        self.rate
    }

    /// Number of hidden lanes. Also determines digest length for hashes.
    pub fn capacity(&self) -> usize {
        STATE_LANES - self.rate
    }

    /// Restores the initial post-construction state: all lanes zeroed, the
    /// namespace back in lane 24.
    pub fn reset(&mut self) {
        self.lanes = [0_u64; STATE_LANES];
        self.lanes[STATE_LANES - 1] = u64::from(self.namespace);
    }

    /// Absorbs `input` (if provided) and runs the permutation, returning a
    /// view of the readable lanes.
    ///
    /// With `Some(input)`, the input length must equal the rate or
    /// [`Error::BadRate`] is returned and the state is left untouched. With
    /// `None` the sponge is squeezed, which is equivalent to absorbing a
    /// block of zeros.
    ///
    /// [`Error::BadRate`]: crate::error::Error::BadRate
    pub fn perm(&mut self, input: Option<&[u64]>) -> Result<&[u64]> {
        if let Some(x) = input {
            if x.len() != self.rate {
                return Err(BadRate(self.rate, x.len()));
            }
            for (lane, v) in self.lanes.iter_mut().zip(x) {
                *lane ^= v;
            }
        }
        self.permute();
        Ok(&self.lanes[..self.rate])
    }

    /// XORs up to `rate` values into the leading lanes and permutes. Callers
    /// that absorb short blocks go through here; the public entry point
    /// cannot, because a caller could not tell a short input apart from a
    /// wrong rate.
    pub(crate) fn absorb_limbs(&mut self, x: &[u64]) {
        for (lane, v) in self.lanes.iter_mut().zip(x.iter().take(self.rate)) {
            *lane ^= v;
        }
        self.permute();
    }

    pub(crate) fn lanes(&self) -> &[u64; STATE_LANES] {
        &self.lanes
    }

    /// One pass of the modified Keccak permutation. The round function is
    /// fully unrolled with literal rotation offsets.
    pub(crate) fn permute(&mut self) {
        let a = &mut self.lanes;
        let nr = u64::from(self.rounds);

        for i in (1..=nr).rev() {
            // ι: fold the round number into a round-dependent lane, starting
            // just below the namespace lane. Never reaches lane 24.
            let k = (23 + i - nr) as usize;
            a[k] = a[k].wrapping_add(i);

            // θ
            let c0 = a[0] ^ a[5] ^ a[10] ^ a[15] ^ a[20];
            let c1 = a[1] ^ a[6] ^ a[11] ^ a[16] ^ a[21];
            let c2 = a[2] ^ a[7] ^ a[12] ^ a[17] ^ a[22];
            let c3 = a[3] ^ a[8] ^ a[13] ^ a[18] ^ a[23];
            let c4 = a[4] ^ a[9] ^ a[14] ^ a[19] ^ a[24];

            let t = c4 ^ c1.rotate_left(1);
            a[0] ^= t;
            a[5] ^= t;
            a[10] ^= t;
            a[15] ^= t;
            a[20] ^= t;
            let t = c0 ^ c2.rotate_left(1);
            a[1] ^= t;
            a[6] ^= t;
            a[11] ^= t;
            a[16] ^= t;
            a[21] ^= t;
            let t = c1 ^ c3.rotate_left(1);
            a[2] ^= t;
            a[7] ^= t;
            a[12] ^= t;
            a[17] ^= t;
            a[22] ^= t;
            let t = c2 ^ c4.rotate_left(1);
            a[3] ^= t;
            a[8] ^= t;
            a[13] ^= t;
            a[18] ^= t;
            a[23] ^= t;
            let t = c3 ^ c0.rotate_left(1);
            a[4] ^= t;
            a[9] ^= t;
            a[14] ^= t;
            a[19] ^= t;
            a[24] ^= t;

            // ρ and π
            let mut t = a[1];
            t = mem::replace(&mut a[10], t.rotate_left(1));
            t = mem::replace(&mut a[7], t.rotate_left(3));
            t = mem::replace(&mut a[11], t.rotate_left(6));
            t = mem::replace(&mut a[17], t.rotate_left(10));
            t = mem::replace(&mut a[18], t.rotate_left(15));
            t = mem::replace(&mut a[3], t.rotate_left(21));
            t = mem::replace(&mut a[5], t.rotate_left(28));
            t = mem::replace(&mut a[16], t.rotate_left(36));
            t = mem::replace(&mut a[8], t.rotate_left(45));
            t = mem::replace(&mut a[21], t.rotate_left(55));
            t = mem::replace(&mut a[24], t.rotate_left(2));
            t = mem::replace(&mut a[4], t.rotate_left(14));
            t = mem::replace(&mut a[15], t.rotate_left(27));
            t = mem::replace(&mut a[23], t.rotate_left(41));
            t = mem::replace(&mut a[19], t.rotate_left(56));
            t = mem::replace(&mut a[13], t.rotate_left(8));
            t = mem::replace(&mut a[12], t.rotate_left(25));
            t = mem::replace(&mut a[2], t.rotate_left(43));
            t = mem::replace(&mut a[20], t.rotate_left(62));
            t = mem::replace(&mut a[14], t.rotate_left(18));
            t = mem::replace(&mut a[22], t.rotate_left(39));
            t = mem::replace(&mut a[9], t.rotate_left(61));
            t = mem::replace(&mut a[6], t.rotate_left(20));
            a[1] = t.rotate_left(44);

            // χ
            let r0 = a[0];
            let r1 = a[1];
            let r2 = a[2];
            let r3 = a[3];
            let r4 = a[4];
            a[0] ^= r2 & !r1;
            a[1] ^= r3 & !r2;
            a[2] ^= r4 & !r3;
            a[3] ^= r0 & !r4;
            a[4] ^= r1 & !r0;
            let r0 = a[5];
            let r1 = a[6];
            let r2 = a[7];
            let r3 = a[8];
            let r4 = a[9];
            a[5] ^= r2 & !r1;
            a[6] ^= r3 & !r2;
            a[7] ^= r4 & !r3;
            a[8] ^= r0 & !r4;
            a[9] ^= r1 & !r0;
            let r0 = a[10];
            let r1 = a[11];
            let r2 = a[12];
            let r3 = a[13];
            let r4 = a[14];
            a[10] ^= r2 & !r1;
            a[11] ^= r3 & !r2;
            a[12] ^= r4 & !r3;
            a[13] ^= r0 & !r4;
            a[14] ^= r1 & !r0;
            let r0 = a[15];
            let r1 = a[16];
            let r2 = a[17];
            let r3 = a[18];
            let r4 = a[19];
            a[15] ^= r2 & !r1;
            a[16] ^= r3 & !r2;
            a[17] ^= r4 & !r3;
            a[18] ^= r0 & !r4;
            a[19] ^= r1 & !r0;
            let r0 = a[20];
            let r1 = a[21];
            let r2 = a[22];
            let r3 = a[23];
            let r4 = a[24];
            a[20] ^= r2 & !r1;
            a[21] ^= r3 & !r2;
            a[22] ^= r4 & !r3;
            a[23] ^= r0 & !r4;
            a[24] ^= r1 & !r0;
        }
    }
}

impl fmt::Debug for Sponge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut outer = Vec::with_capacity(8 * self.rate);
        for lane in &self.lanes[..self.rate] {
            outer.extend_from_slice(&lane.to_le_bytes());
        }
        let mut inner = Vec::with_capacity(8 * self.capacity());
        for lane in &self.lanes[self.rate..] {
            inner.extend_from_slice(&lane.to_le_bytes());
        }
        write!(f, "[{}|{}]", hex::encode(outer), hex::encode(inner))
    }
}
