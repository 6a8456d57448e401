use super::{sponge::Sponge, MAX_RATE};
use crate::error::Result;

/// Sponge-based hash with block buffering.
///
/// Input bytes funnel into an internal buffer; every full rate-sized block is
/// reinterpreted as little-endian 64-bit limbs and absorbed through one
/// permutation. The digest is `8 * cp` bytes. Hashes are single-shot: [`sum`]
/// computes the digest and resets the state.
///
/// [`sum`]: Hash::sum
#[derive(Clone)]
pub struct Hash {
    sponge: Sponge,
    /// Unconsumed bytes, always shorter than one block.
    buf: Vec<u8>,
}

impl Hash {
    /// Same parameters as [`Sponge::new`]. The digest will be `8 * cp` bytes.
    pub fn new(cp: u32, nr: u32, ns: u32) -> Result<Self> {
        let sponge = Sponge::new(cp, nr, ns)?;
        let block = 8 * sponge.rate();
        Ok(Self {
            sponge,
            buf: Vec::with_capacity(block),
        })
    }

    /// Block length in bytes, `8 * rate`.
    fn block_len(&self) -> usize {
        8 * self.sponge.rate()
    }

    /// Writes `x` into the hash. Can be called any number of times with
    /// subsequent parts of the whole input; block-multiple lengths avoid the
    /// intermediate copy through the buffer.
    pub fn write(&mut self, mut x: &[u8]) {
        let block = self.block_len();

        if !self.buf.is_empty() {
            let need = block - self.buf.len();
            if x.len() < need {
                self.buf.extend_from_slice(x);
                return;
            }
            let (head, tail) = x.split_at(need);
            let mut pending = std::mem::take(&mut self.buf);
            pending.extend_from_slice(head);
            self.absorb_block(&pending);
            pending.clear();
            self.buf = pending;
            x = tail;
        }

        let mut blocks = x.chunks_exact(block);
        for b in &mut blocks {
            self.absorb_block(b);
        }
        self.buf.extend_from_slice(blocks.remainder());
    }

    /// Computes the digest (`8 * cp` bytes) and resets the hash state.
    pub fn sum(&mut self) -> Vec<u8> {
        self.absorb_padded();

        let cp = self.sponge.capacity();
        let mut digest = Vec::with_capacity(8 * cp);
        for lane in &self.sponge.lanes()[..cp] {
            digest.extend_from_slice(&lane.to_le_bytes());
        }
        self.reset();
        digest
    }

    /// Restores the initial post-construction state.
    pub fn reset(&mut self) {
        self.sponge.reset();
        self.buf.clear();
    }

    /// Pads the pending bytes with the 10*1 rule and absorbs the final block.
    ///
    /// The first padding byte is 0x01 at the buffer length, the block is
    /// zero-filled up to its last byte, and 0x80 is OR-ed into that byte.
    /// With a full-but-one buffer both ends meet in a single 0x81 byte.
    fn absorb_padded(&mut self) {
        let block = self.block_len();
        let lh = self.buf.len();

        let mut last = [0_u8; 8 * MAX_RATE];
        last[..lh].copy_from_slice(&self.buf);
        last[lh] = 0x01;
        last[block - 1] |= 0x80;

        self.absorb_block(&last[..block]);
        self.buf.clear();
    }

    /// Reinterprets one rate-sized block as little-endian limbs and absorbs
    /// it through the permutation.
    fn absorb_block(&mut self, block: &[u8]) {
        let rt = self.sponge.rate();
        let mut limbs = [0_u64; MAX_RATE];
        for (limb, bytes) in limbs[..rt].iter_mut().zip(block.chunks_exact(8)) {
            let mut word = [0_u8; 8];
            word.copy_from_slice(bytes);
            *limb = u64::from_le_bytes(word);
        }
        self.sponge.absorb_limbs(&limbs[..rt]);
    }

    /// Absorbs the pending bytes (padded) and hands the state over, without
    /// the reset that [`sum`] performs. Backs the `Hash` to `Prng`
    /// conversion.
    ///
    /// [`sum`]: Hash::sum
    pub(crate) fn into_seeded_sponge(mut self) -> Sponge {
        self.absorb_padded();
        self.sponge
    }
}
