//! Passphrase-derived keys for the public-key protocols.
//!
//! The private scalar is never persisted: it is recomputed from the
//! passphrase with SHAKE-128 whenever it is needed. The public key is the
//! scalar multiple of the generator, canonicalized so that the persisted
//! x-coordinate is always even.

use num_bigint::BigUint;
use rand::{CryptoRng, RngCore};
use tracing::instrument;
use zeroize::Zeroizing;

use crate::edwards::{self, Point, SCALAR_BYTES};
use crate::errors::Error;
use crate::sponge::{Sponge, Variant};

/// A validated NUMS-256 public key.
///
/// Wraps a point that is guaranteed on-curve, r-torsion, and not the
/// neutral element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKey(Point);

impl PublicKey {
    /// The underlying curve point.
    pub fn point(&self) -> &Point {
        &self.0
    }

    /// Validate raw affine coordinates read from the reference encoding.
    ///
    /// The y-coordinate and the parity of x are decompressed and checked
    /// against the full x; a failed root extraction, a point outside the
    /// order-r subgroup, a mismatched x, or the neutral element are all
    /// rejected as [`Error::InvalidPoint`].
    pub fn from_coordinates(x: &BigUint, y: &BigUint) -> Result<Self, Error> {
        let point = edwards::decompress(y, x.bit(0)).ok_or(Error::InvalidPoint)?;
        if point.is_neutral() || point.x() != x {
            return Err(Error::InvalidPoint);
        }
        Ok(PublicKey(point))
    }
}

/// A derived keypair: the private scalar and its public point.
#[derive(Clone, Debug)]
pub struct KeyPair {
    secret: BigUint,
    public: PublicKey,
}

impl KeyPair {
    /// The private scalar s ∈ [0, r).
    pub fn secret(&self) -> &BigUint {
        &self.secret
    }

    /// The public point V = s·G.
    pub fn public(&self) -> &PublicKey {
        &self.public
    }
}

/// Derive the private scalar from a passphrase.
///
/// SHAKE-128 absorbs the passphrase and squeezes twice the scalar width
/// (64 bytes); the big-endian integer is reduced mod r. The oversampling
/// keeps the mod-r bias negligible.
pub fn private_scalar(passphrase: &[u8]) -> BigUint {
    let mut sponge = Sponge::new(Variant::Shake128);
    sponge.absorb(passphrase);
    let wide = Zeroizing::new(sponge.squeeze(2 * SCALAR_BYTES));
    BigUint::from_bytes_be(&wide[..]) % &*edwards::R
}

/// Sample a uniform scalar in [0, r) from a cryptographic RNG.
///
/// Reads twice the scalar width and reduces, the same wide-reduction used
/// for passphrase derivation.
pub fn random_scalar(rng: &mut (impl RngCore + CryptoRng)) -> BigUint {
    let mut wide = Zeroizing::new([0u8; 2 * SCALAR_BYTES]);
    rng.fill_bytes(&mut wide[..]);
    BigUint::from_bytes_be(&wide[..]) % &*edwards::R
}

/// Derive the keypair for a passphrase.
///
/// After computing V = s·G, the pair is canonicalized: when the parity of
/// V.x is odd, s becomes r − s and V becomes −V. The persisted public key
/// therefore always carries an even x, and the signer can recompute s from
/// the passphrase alone, with no stored sign bit. Omitting this transform
/// would make half of all passphrases fail to decrypt or verify their own
/// output.
#[instrument(skip_all)]
pub fn keygen(passphrase: &[u8]) -> KeyPair {
    let mut s = private_scalar(passphrase);
    let mut V = edwards::generator().mul(&s);
    if V.x().bit(0) {
        s = (&*edwards::R - &s) % &*edwards::R;
        V = V.negate();
    }
    KeyPair {
        secret: s,
        public: PublicKey(V),
    }
}
