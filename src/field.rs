//! Arithmetic in the prime field F_p with p = 2^256 − 189.
//!
//! All values are non-negative integers reduced modulo [`P`]. The
//! square root uses the p ≡ 3 (mod 4) shortcut; the inverse is the extended
//! Euclidean algorithm.

use std::sync::LazyLock;

use num_bigint::{BigInt, BigUint};
use num_traits::{One, Zero};

/// The field modulus p = 2^256 − 189.
pub static P: LazyLock<BigUint> = LazyLock::new(|| (BigUint::one() << 256u32) - 189u32);

/// `(a + b) mod p`. Operands must already be reduced.
pub fn add(a: &BigUint, b: &BigUint) -> BigUint {
    (a + b) % &*P
}

/// `(a − b) mod p`. Operands must already be reduced.
pub fn sub(a: &BigUint, b: &BigUint) -> BigUint {
    ((a + &*P) - b) % &*P
}

/// `(a · b) mod p`.
pub fn mul(a: &BigUint, b: &BigUint) -> BigUint {
    (a * b) % &*P
}

/// `(−a) mod p`.
pub fn neg(a: &BigUint) -> BigUint {
    if a.is_zero() {
        BigUint::zero()
    } else {
        &*P - a
    }
}

/// `a^e mod p`.
pub fn pow(a: &BigUint, e: &BigUint) -> BigUint {
    a.modpow(e, &P)
}

/// Modular inverse of `a`, by the extended Euclidean algorithm.
///
/// Returns `None` for zero (the only non-invertible residue of a prime
/// field).
pub fn inv(a: &BigUint) -> Option<BigUint> {
    if a.is_zero() {
        return None;
    }
    let modulus = BigInt::from(P.clone());
    let (mut r, mut new_r) = (modulus.clone(), BigInt::from(a % &*P));
    let (mut t, mut new_t) = (BigInt::zero(), BigInt::one());
    while !new_r.is_zero() {
        let q = &r / &new_r;
        let next_r = &r - &q * &new_r;
        r = std::mem::replace(&mut new_r, next_r);
        let next_t = &t - &q * &new_t;
        t = std::mem::replace(&mut new_t, next_t);
    }
    if !r.is_one() {
        return None;
    }
    let reduced = ((t % &modulus) + &modulus) % &modulus;
    reduced.to_biguint()
}

/// Modular square root of `v` with the requested least-significant bit.
///
/// Since p ≡ 3 (mod 4), a root of any quadratic residue is
/// `v^((p+1)/4) mod p`; the root is negated when its parity does not match
/// `odd`. Returns `None` when `v` is a non-residue, or when `v` is zero and
/// an odd root is requested (zero has no odd root).
pub fn sqrt(v: &BigUint, odd: bool) -> Option<BigUint> {
    if v.is_zero() {
        return if odd { None } else { Some(BigUint::zero()) };
    }
    let e = (&*P + 1u32) >> 2;
    let mut root = v.modpow(&e, &P);
    if mul(&root, &root) != *v {
        return None;
    }
    if root.bit(0) != odd {
        root = &*P - &root;
    }
    Some(root)
}

/// Fixed-width 32-byte big-endian encoding of a 256-bit integer.
///
/// # Panics
/// Panics when `v` does not fit in 32 bytes.
pub fn to_bytes32(v: &BigUint) -> [u8; 32] {
    let bytes = v.to_bytes_be();
    assert!(bytes.len() <= 32, "integer wider than 256 bits");
    let mut out = [0u8; 32];
    out[32 - bytes.len()..].copy_from_slice(&bytes);
    out
}
