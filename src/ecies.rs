//! ECIES-style hybrid public-key encryption.
//!
//! An ephemeral scalar k and the recipient's long-term key V jointly derive
//! the symmetric material: W = k·V is hashed with SHAKE-256 into a MAC key
//! and a mask seed, the payload is XOR-masked with a SHAKE-128 stream, and
//! SHA3-256 over the MAC key and the masked payload authenticates the
//! record. The transmitted point Z = k·G lets the recipient recompute
//! W = s·Z.
//!
//! Decryption is tag-first: the MAC is verified in constant time before any
//! plaintext is produced.

use num_bigint::BigUint;
use rand::{CryptoRng, RngCore};
use subtle::ConstantTimeEq;
use tracing::instrument;
use zeroize::Zeroizing;

use crate::edwards;
use crate::errors::Error;
use crate::field;
use crate::keys::{self, PublicKey};
use crate::sponge::{Sponge, Variant};

/// Length in bytes of the authentication tag.
pub const TAG_LEN: usize = 32;

/// A public-key ciphertext record (Z.x, Z.y, c, t).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ciphertext {
    /// x-coordinate of the ephemeral point Z = k·G.
    pub zx: BigUint,
    /// y-coordinate of the ephemeral point.
    pub zy: BigUint,
    /// XOR-masked payload, the same length as the plaintext.
    pub mask: Vec<u8>,
    /// SHA3-256 authentication tag over the MAC key and the masked payload.
    pub tag: [u8; TAG_LEN],
}

// ka then ke, squeezed in succession from SHAKE-256 over W.y.
fn derive_keys(wy: &BigUint) -> (Zeroizing<Vec<u8>>, Zeroizing<Vec<u8>>) {
    let mut sponge = Sponge::new(Variant::Shake256);
    sponge.absorb(&field::to_bytes32(wy));
    let ka = Zeroizing::new(sponge.squeeze(32));
    let ke = Zeroizing::new(sponge.squeeze(32));
    (ka, ke)
}

fn mask_stream(ke: &[u8], len: usize) -> Zeroizing<Vec<u8>> {
    let mut sponge = Sponge::new(Variant::Shake128);
    sponge.absorb(ke);
    Zeroizing::new(sponge.squeeze(len))
}

fn tag_over(ka: &[u8], mask: &[u8]) -> [u8; TAG_LEN] {
    let mut sponge = Sponge::new(Variant::Sha3_256);
    sponge.absorb(ka);
    sponge.absorb(mask);
    let digest = sponge.digest();
    let mut tag = [0u8; TAG_LEN];
    tag.copy_from_slice(&digest);
    tag
}

fn xor_with(data: &[u8], stream: &[u8]) -> Vec<u8> {
    data.iter().zip(stream.iter()).map(|(a, b)| a ^ b).collect()
}

/// Encrypt `plaintext` to the holder of `recipient`'s passphrase.
///
/// The ephemeral scalar is sampled uniformly from `rng`; every call
/// produces a fresh record.
#[instrument(skip_all, fields(len = plaintext.len()))]
pub fn encrypt(
    plaintext: &[u8],
    recipient: &PublicKey,
    rng: &mut (impl RngCore + CryptoRng),
) -> Ciphertext {
    let k = keys::random_scalar(rng);
    let W = recipient.point().mul(&k);
    let Z = edwards::generator().mul(&k);

    let (ka, ke) = derive_keys(W.y());
    let stream = mask_stream(&ke, plaintext.len());
    let mask = xor_with(plaintext, &stream);
    let tag = tag_over(&ka, &mask);

    Ciphertext {
        zx: Z.x().clone(),
        zy: Z.y().clone(),
        mask,
        tag,
    }
}

/// Decrypt a ciphertext record with the recipient passphrase.
///
/// The ephemeral point is reconstructed from its compressed form (y and
/// the parity of x) and rejected as [`Error::InvalidPoint`] when
/// decompression fails, the point is the neutral element, it falls outside
/// the order-r subgroup, or the transmitted x does not match. The tag is
/// then recomputed and compared in constant time; on mismatch the call
/// fails with [`Error::InvalidTag`] and releases no plaintext.
#[instrument(skip_all, fields(len = ciphertext.mask.len()))]
pub fn decrypt(ciphertext: &Ciphertext, passphrase: &[u8]) -> Result<Vec<u8>, Error> {
    // The canonicalized secret, not the raw derived scalar: encryption used
    // the even-x public key, so decryption must use the matching s.
    let s = keys::keygen(passphrase).secret().clone();

    let Z = edwards::decompress(&ciphertext.zy, ciphertext.zx.bit(0)).ok_or(Error::InvalidPoint)?;
    if Z.is_neutral() || Z.x() != &ciphertext.zx {
        return Err(Error::InvalidPoint);
    }

    let W = Z.mul(&s);
    let (ka, ke) = derive_keys(W.y());

    let expected = tag_over(&ka, &ciphertext.mask);
    if !bool::from(expected.ct_eq(&ciphertext.tag)) {
        return Err(Error::InvalidTag);
    }

    let stream = mask_stream(&ke, ciphertext.mask.len());
    Ok(xor_with(&ciphertext.mask, &stream))
}
