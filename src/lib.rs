//! # sponge-rng
//!
//! A small family of cryptographic primitives derived from one sponge
//! permutation: a variable-length hash, a pseudo-random number generator with
//! named distributions, and a process-wide entropy-seeded random stream that
//! any number of threads can read.
//!
//! The permutation is a modified `Keccak-f[1600]` over 25 lanes of 64 bits.
//! A 32-bit namespace lives in lane 24 and domain-separates sponge instances;
//! the ι step folds the round number into a round-dependent lane instead of
//! using the standard round constants. [`Sponge`] exposes the raw
//! absorb/squeeze surface, [`Hash`] adds block buffering with 10*1 padding,
//! and [`Prng`] dispenses limbs from the readable state with uniform,
//! symmetric-uniform, normal and exponential derivations on top. The [`rng`]
//! module seeds one generator from machine entropy at first use and publishes
//! its output through a bounded queue.
//!
//! All byte/limb reinterpretation is little-endian, so digests and generator
//! streams are identical across platforms.

mod core;

/// Errors emitted by the constructors and the permutation entry point.
pub mod error;

/// Process-wide entropy-seeded random stream and session identifiers.
pub mod rng;

pub use crate::core::{hash::Hash, prng::Prng, sponge::Sponge};
