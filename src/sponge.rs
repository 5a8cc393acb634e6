//! Incremental sponge construction over Keccak-f\[1600\].
//!
//! A [`Sponge`] is an owned handle holding the permutation state, a byte
//! cursor into the current rate block, and the absorb/squeeze phase. The
//! [`Variant`] chooses the rate/capacity split and the domain-separation
//! padding byte.
//!
//! Byte ordering contract (bit-exact with FIPS 202): lanes are 64-bit
//! little-endian integers, and byte `i` of the running input stream lands at
//! bit position `(i mod 8) * 8` within lane `⌊i/8⌋`. Emission on squeeze is
//! the inverse.

use crate::keccak::{self, LANES};

const STATE_BITS: usize = 1600;

/// A named SHA-3 or SHAKE variant.
///
/// The variant determines the capacity (twice the suffix), the rate, the
/// domain-separation pad byte (0x06 for SHA-3, 0x1F for SHAKE) and, for the
/// SHA-3 variants, the digest size. Only legal suffix/family combinations
/// are representable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Variant {
    /// SHA3-224.
    Sha3_224,
    /// SHA3-256.
    Sha3_256,
    /// SHA3-384.
    Sha3_384,
    /// SHA3-512.
    Sha3_512,
    /// SHAKE128 extendable-output function.
    Shake128,
    /// SHAKE256 extendable-output function.
    Shake256,
}

impl Variant {
    /// The SHA-3 variant with the given digest bit length.
    ///
    /// # Panics
    /// Panics when `bits` is not one of 224, 256, 384, 512.
    pub fn sha3(bits: usize) -> Self {
        match bits {
            224 => Variant::Sha3_224,
            256 => Variant::Sha3_256,
            384 => Variant::Sha3_384,
            512 => Variant::Sha3_512,
            _ => panic!("unsupported SHA-3 digest length: {bits}"),
        }
    }

    /// The SHAKE variant with the given security level.
    ///
    /// # Panics
    /// Panics when `bits` is not 128 or 256.
    pub fn shake(bits: usize) -> Self {
        match bits {
            128 => Variant::Shake128,
            256 => Variant::Shake256,
            _ => panic!("unsupported SHAKE security level: {bits}"),
        }
    }

    /// The suffix parameter: digest bits for SHA-3, security level for SHAKE.
    pub fn suffix(self) -> usize {
        match self {
            Variant::Sha3_224 => 224,
            Variant::Sha3_256 => 256,
            Variant::Sha3_384 => 384,
            Variant::Sha3_512 => 512,
            Variant::Shake128 => 128,
            Variant::Shake256 => 256,
        }
    }

    /// Whether this is an extendable-output variant.
    pub fn is_shake(self) -> bool {
        matches!(self, Variant::Shake128 | Variant::Shake256)
    }

    /// Capacity in bits; always twice the suffix.
    pub fn capacity_bits(self) -> usize {
        2 * self.suffix()
    }

    /// Rate in bytes: (1600 − capacity) / 8.
    pub fn rate_bytes(self) -> usize {
        (STATE_BITS - self.capacity_bits()) / 8
    }

    /// Domain-separation byte XORed at the start of the padding.
    pub fn pad_byte(self) -> u8 {
        if self.is_shake() {
            0x1f
        } else {
            0x06
        }
    }

    /// Digest length in bytes for a SHA-3 variant.
    ///
    /// # Panics
    /// Panics for the SHAKE variants, whose output length is caller-chosen.
    pub fn digest_len(self) -> usize {
        assert!(!self.is_shake(), "SHAKE variants have no fixed digest length");
        self.suffix() / 8
    }
}

/// An incremental sponge handle.
///
/// The handle is a two-phase state machine: it starts absorbing, moves to
/// squeezing on the first [`Sponge::squeeze`] (or [`Sponge::digest`]) call,
/// and rejects any further absorption afterwards. Not safe for concurrent
/// use; callers that hash in parallel allocate distinct handles.
#[derive(Clone)]
pub struct Sponge {
    lanes: [u64; LANES],
    variant: Variant,
    pos: usize,
    squeezing: bool,
}

impl Sponge {
    /// A fresh sponge for the given variant: zeroed state, cursor at zero,
    /// absorbing phase.
    pub fn new(variant: Variant) -> Self {
        Sponge {
            lanes: [0u64; LANES],
            variant,
            pos: 0,
            squeezing: false,
        }
    }

    /// The variant this handle was initialized with.
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// XOR input bytes into the rate portion of the state, permuting each
    /// time a full rate block has been absorbed.
    ///
    /// May be called repeatedly; the byte cursor stays in
    /// `[0, rate_bytes)` between calls.
    ///
    /// # Panics
    /// Panics if squeezing has begun: the absorb phase is closed by the
    /// first squeeze.
    pub fn absorb(&mut self, data: &[u8]) {
        assert!(!self.squeezing, "absorb called after squeezing began");
        let rate = self.variant.rate_bytes();
        for &byte in data {
            self.lanes[self.pos / 8] ^= u64::from(byte) << ((self.pos % 8) * 8);
            self.pos += 1;
            if self.pos == rate {
                keccak::f1600(&mut self.lanes);
                self.pos = 0;
            }
        }
    }

    // Close the absorb phase: XOR the domain pad byte at the cursor and 0x80
    // into the final rate byte, then permute once. No special case for an
    // empty message; the rule above already covers it.
    fn pad(&mut self) {
        let rate = self.variant.rate_bytes();
        self.lanes[self.pos / 8] ^= u64::from(self.variant.pad_byte()) << ((self.pos % 8) * 8);
        self.lanes[(rate - 1) / 8] ^= 0x80u64 << (((rate - 1) % 8) * 8);
        keccak::f1600(&mut self.lanes);
        self.pos = 0;
        self.squeezing = true;
    }

    /// Produce `n` output bytes.
    ///
    /// The first call closes the absorb phase with the variant's padding.
    /// Squeezing is restartable: successive calls continue from the current
    /// position within the rate block, and the state is permuted whenever a
    /// block is exhausted.
    pub fn squeeze(&mut self, n: usize) -> Vec<u8> {
        if !self.squeezing {
            self.pad();
        }
        let rate = self.variant.rate_bytes();
        let mut out = Vec::with_capacity(n);
        for _ in 0..n {
            if self.pos == rate {
                keccak::f1600(&mut self.lanes);
                self.pos = 0;
            }
            out.push((self.lanes[self.pos / 8] >> ((self.pos % 8) * 8)) as u8);
            self.pos += 1;
        }
        out
    }

    /// Squeeze a whole digest for a SHA-3 variant.
    ///
    /// # Panics
    /// Panics for SHAKE variants; use [`Sponge::squeeze`] with an explicit
    /// length instead.
    pub fn digest(&mut self) -> Vec<u8> {
        self.squeeze(self.variant.digest_len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variant_parameters() {
        assert_eq!(Variant::Sha3_256.capacity_bits(), 512);
        assert_eq!(Variant::Sha3_256.rate_bytes(), 136);
        assert_eq!(Variant::Shake128.rate_bytes(), 168);
        assert_eq!(Variant::Sha3_512.rate_bytes(), 72);
        assert_eq!(Variant::Sha3_224.pad_byte(), 0x06);
        assert_eq!(Variant::Shake256.pad_byte(), 0x1f);
        assert_eq!(Variant::Sha3_384.digest_len(), 48);
    }

    #[test]
    fn absorb_split_is_invariant() {
        let data: Vec<u8> = (0..300).map(|i| i as u8).collect();

        let mut whole = Sponge::new(Variant::Sha3_256);
        whole.absorb(&data);

        let mut parts = Sponge::new(Variant::Sha3_256);
        parts.absorb(&data[..1]);
        parts.absorb(&data[1..137]);
        parts.absorb(&data[137..137]);
        parts.absorb(&data[137..]);

        assert_eq!(whole.digest(), parts.digest());
    }

    #[test]
    fn squeeze_is_restartable() {
        let mut once = Sponge::new(Variant::Shake128);
        once.absorb(b"restartable");
        let expected = once.squeeze(400);

        let mut chunked = Sponge::new(Variant::Shake128);
        chunked.absorb(b"restartable");
        let mut out = Vec::new();
        for n in [1usize, 7, 160, 200, 32] {
            out.extend(chunked.squeeze(n));
        }
        assert_eq!(out, expected);
    }

    #[test]
    fn digest_equals_explicit_squeeze() {
        let mut a = Sponge::new(Variant::Sha3_512);
        a.absorb(b"x");
        let mut b = Sponge::new(Variant::Sha3_512);
        b.absorb(b"x");
        assert_eq!(a.digest(), b.squeeze(64));
    }

    #[test]
    #[should_panic(expected = "absorb called after squeezing began")]
    fn absorb_after_squeeze_panics() {
        let mut sponge = Sponge::new(Variant::Shake128);
        sponge.absorb(b"data");
        let _ = sponge.squeeze(16);
        sponge.absorb(b"more");
    }

    #[test]
    #[should_panic(expected = "unsupported SHA-3 digest length")]
    fn bad_sha3_suffix_panics() {
        let _ = Variant::sha3(300);
    }
}
