//! One-shot SHA-3, SHAKE and keyed-MAC helpers.
//!
//! Thin convenience layer over [`Sponge`](crate::sponge::Sponge): each
//! function allocates a handle, absorbs, and squeezes the requested output.

use crate::sponge::{Sponge, Variant};

/// Compute a SHA-3 digest of `msg`.
///
/// # Panics
/// Panics when `variant` is a SHAKE variant.
pub fn sha3(variant: Variant, msg: &[u8]) -> Vec<u8> {
    assert!(!variant.is_shake(), "sha3 requires a SHA-3 variant");
    let mut sponge = Sponge::new(variant);
    sponge.absorb(msg);
    sponge.digest()
}

/// Compute `out_bits / 8` bytes of SHAKE output over `msg`.
///
/// # Panics
/// Panics when `variant` is not a SHAKE variant, or when `out_bits` is zero
/// or not a multiple of 8.
pub fn shake(variant: Variant, msg: &[u8], out_bits: usize) -> Vec<u8> {
    assert!(variant.is_shake(), "shake requires a SHAKE variant");
    assert!(
        out_bits > 0 && out_bits % 8 == 0,
        "output length must be a positive multiple of 8 bits"
    );
    let mut sponge = Sponge::new(variant);
    sponge.absorb(msg);
    sponge.squeeze(out_bits / 8)
}

/// Keyed MAC: absorb the passphrase, then the message, and squeeze
/// `out_bits / 8` bytes of SHAKE output.
///
/// # Panics
/// Same contract as [`shake`].
pub fn mac(variant: Variant, passphrase: &[u8], msg: &[u8], out_bits: usize) -> Vec<u8> {
    assert!(variant.is_shake(), "mac requires a SHAKE variant");
    assert!(
        out_bits > 0 && out_bits % 8 == 0,
        "output length must be a positive multiple of 8 bits"
    );
    let mut sponge = Sponge::new(variant);
    sponge.absorb(passphrase);
    sponge.absorb(msg);
    sponge.squeeze(out_bits / 8)
}
