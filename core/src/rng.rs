//! Phrase selection randomness.
//!
//! RULE: randomness may only choose between interchangeable wordings.
//! It never decides which branch fires or what numbers are reported.
//!
//! Production callers use `SeededPhrases`; tests pin wording with
//! `FirstPhrase` or a fixed seed.

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;

/// Source of wording choices, injected into every component that
/// renders text.
pub trait PhraseSource {
    /// Pick an index in `[0, len)`. `len` is always > 0.
    fn choose(&mut self, len: usize) -> usize;

    /// Roll a float in `[0.0, 1.0)`.
    fn unit(&mut self) -> f64;
}

/// Deterministic per-seed phrase stream.
pub struct SeededPhrases {
    inner: Pcg64Mcg,
}

impl SeededPhrases {
    pub fn new(seed: u64) -> Self {
        Self {
            inner: Pcg64Mcg::seed_from_u64(seed),
        }
    }
}

impl PhraseSource for SeededPhrases {
    fn choose(&mut self, len: usize) -> usize {
        assert!(len > 0, "len must be > 0");
        (self.inner.next_u64() % len as u64) as usize
    }

    fn unit(&mut self) -> f64 {
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }
}

/// Always the first wording, and 0.0 for every roll.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstPhrase;

impl PhraseSource for FirstPhrase {
    fn choose(&mut self, _len: usize) -> usize {
        0
    }

    fn unit(&mut self) -> f64 {
        0.0
    }
}
