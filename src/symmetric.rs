//! Passphrase-keyed symmetric authenticated encryption in the sponge.
//!
//! Record layout: masked payload ‖ 16-byte nonce ‖ 32-byte MAC. A 16-byte
//! session key is squeezed from SHAKE-128 over the passphrase; the payload
//! is XOR-masked with a SHAKE-128 stream over key ‖ nonce; the MAC is
//! SHA3-256(nonce ‖ key ‖ masked payload). The nonce is drawn fresh from
//! the RNG for every encryption.
//!
//! Decryption verifies the MAC in constant time before unmasking anything.

use rand::{CryptoRng, RngCore};
use subtle::ConstantTimeEq;
use tracing::instrument;
use zeroize::Zeroizing;

use crate::errors::Error;
use crate::hash::shake;
use crate::sponge::{Sponge, Variant};

/// Length in bytes of the per-encryption nonce.
pub const NONCE_LEN: usize = 16;

/// Length in bytes of the MAC trailer.
pub const TAG_LEN: usize = 32;

const KEY_BITS: usize = 128;

fn session_key(passphrase: &[u8]) -> Zeroizing<Vec<u8>> {
    Zeroizing::new(shake(Variant::Shake128, passphrase, KEY_BITS))
}

fn mask_stream(key: &[u8], nonce: &[u8], len: usize) -> Zeroizing<Vec<u8>> {
    let mut sponge = Sponge::new(Variant::Shake128);
    sponge.absorb(key);
    sponge.absorb(nonce);
    Zeroizing::new(sponge.squeeze(len))
}

fn tag_over(nonce: &[u8], key: &[u8], mask: &[u8]) -> [u8; TAG_LEN] {
    let mut sponge = Sponge::new(Variant::Sha3_256);
    sponge.absorb(nonce);
    sponge.absorb(key);
    sponge.absorb(mask);
    let digest = sponge.digest();
    let mut tag = [0u8; TAG_LEN];
    tag.copy_from_slice(&digest);
    tag
}

/// Encrypt `plaintext` under `passphrase`, returning the full record.
#[instrument(skip_all, fields(len = plaintext.len()))]
pub fn encrypt(
    passphrase: &[u8],
    plaintext: &[u8],
    rng: &mut (impl RngCore + CryptoRng),
) -> Vec<u8> {
    let key = session_key(passphrase);
    let mut nonce = [0u8; NONCE_LEN];
    rng.fill_bytes(&mut nonce);

    let stream = mask_stream(&key, &nonce, plaintext.len());
    let mut record: Vec<u8> = plaintext
        .iter()
        .zip(stream.iter())
        .map(|(p, s)| p ^ s)
        .collect();

    let tag = tag_over(&nonce, &key, &record);
    record.extend_from_slice(&nonce);
    record.extend_from_slice(&tag);
    record
}

/// Decrypt a record produced by [`encrypt`].
///
/// Records shorter than nonce + MAC are [`Error::InvalidEncoding`]; a MAC
/// mismatch is [`Error::InvalidTag`] and yields no plaintext.
#[instrument(skip_all, fields(len = record.len()))]
pub fn decrypt(passphrase: &[u8], record: &[u8]) -> Result<Vec<u8>, Error> {
    if record.len() < NONCE_LEN + TAG_LEN {
        return Err(Error::InvalidEncoding(
            "ciphertext record shorter than nonce and tag".into(),
        ));
    }
    let (mask, trailer) = record.split_at(record.len() - NONCE_LEN - TAG_LEN);
    let (nonce, tag) = trailer.split_at(NONCE_LEN);

    let key = session_key(passphrase);
    let expected = tag_over(nonce, &key, mask);
    if !bool::from(expected.ct_eq(tag)) {
        return Err(Error::InvalidTag);
    }

    let stream = mask_stream(&key, nonce, mask.len());
    Ok(mask.iter().zip(stream.iter()).map(|(c, s)| c ^ s).collect())
}
