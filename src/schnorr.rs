//! Schnorr signatures with a SHA3-256 challenge hash.
//!
//! The signer commits to a nonce point U = k·G, derives the challenge
//! h = SHA3-256(U.y ‖ M) mod r, and responds with z = k − h·s mod r. The
//! verifier reconstructs U' = z·G + h·V and accepts iff the recomputed
//! challenge equals h.

use num_bigint::BigUint;
use rand::{CryptoRng, RngCore};
use tracing::instrument;

use crate::edwards;
use crate::errors::Error;
use crate::field;
use crate::keys::{self, PublicKey};
use crate::sponge::{Sponge, Variant};

/// A signature (h, z) with both components in [0, r).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    /// Challenge hash reduced mod r.
    pub h: BigUint,
    /// Response z = k − h·s mod r.
    pub z: BigUint,
}

// h = SHA3-256(U.y || M) mod r, with U.y in its 32-byte big-endian form.
fn challenge(uy: &BigUint, message: &[u8]) -> BigUint {
    let mut sponge = Sponge::new(Variant::Sha3_256);
    sponge.absorb(&field::to_bytes32(uy));
    sponge.absorb(message);
    BigUint::from_bytes_be(&sponge.digest()) % &*edwards::R
}

/// Sign `message` with the key derived from `passphrase`.
///
/// The nonce scalar is sampled uniformly from `rng`; signatures over the
/// same message differ between calls.
#[instrument(skip_all, fields(len = message.len()))]
pub fn sign(passphrase: &[u8], message: &[u8], rng: &mut (impl RngCore + CryptoRng)) -> Signature {
    let s = keys::keygen(passphrase).secret().clone();
    let k = keys::random_scalar(rng);
    let U = edwards::generator().mul(&k);
    let h = challenge(U.y(), message);
    let r = &*edwards::R;
    let z = (&k + r - (&h * &s) % r) % r;
    Signature { h, z }
}

/// Verify a signature against a message and public key.
///
/// Fails with [`Error::InvalidEncoding`] when either component is out of
/// range, and with [`Error::InvalidSignature`] when the recomputed
/// challenge does not match. The public key has already been validated
/// (decompression and r-torsion) at decode time.
#[instrument(skip_all, fields(len = message.len()))]
pub fn verify(message: &[u8], signature: &Signature, key: &PublicKey) -> Result<(), Error> {
    if signature.h >= *edwards::R || signature.z >= *edwards::R {
        return Err(Error::InvalidEncoding(
            "signature component out of range".into(),
        ));
    }
    let U = edwards::generator()
        .mul(&signature.z)
        .add(&key.point().mul(&signature.h));
    if challenge(U.y(), message) == signature.h {
        Ok(())
    } else {
        Err(Error::InvalidSignature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::keygen;
    use rand::rngs::OsRng;

    #[test]
    fn round_trip() {
        let pair = keygen(b"sign me");
        let sig = sign(b"sign me", b"the quick brown fox", &mut OsRng);
        assert!(verify(b"the quick brown fox", &sig, pair.public()).is_ok());
    }

    #[test]
    fn rejects_wrong_message() {
        let pair = keygen(b"message binding");
        let sig = sign(b"message binding", b"original", &mut OsRng);
        assert!(matches!(
            verify(b"altered", &sig, pair.public()),
            Err(Error::InvalidSignature)
        ));
    }

    #[test]
    fn rejects_wrong_key() {
        let signer = keygen(b"signer");
        let other = keygen(b"other");
        let sig = sign(b"signer", b"msg", &mut OsRng);
        assert!(verify(b"msg", &sig, signer.public()).is_ok());
        assert!(verify(b"msg", &sig, other.public()).is_err());
    }

    #[test]
    fn rejects_tampered_components() {
        let pair = keygen(b"components");
        let sig = sign(b"components", b"msg", &mut OsRng);

        let bad_h = Signature {
            h: (&sig.h + 1u32) % &*edwards::R,
            z: sig.z.clone(),
        };
        assert!(verify(b"msg", &bad_h, pair.public()).is_err());

        let bad_z = Signature {
            h: sig.h.clone(),
            z: (&sig.z + 1u32) % &*edwards::R,
        };
        assert!(verify(b"msg", &bad_z, pair.public()).is_err());
    }

    #[test]
    fn rejects_out_of_range_scalars() {
        let pair = keygen(b"range");
        let sig = Signature {
            h: edwards::R.clone(),
            z: BigUint::from(1u32),
        };
        assert!(matches!(
            verify(b"msg", &sig, pair.public()),
            Err(Error::InvalidEncoding(_))
        ));
    }
}
