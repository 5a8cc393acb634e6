//! Self-contained SHA-3/SHAKE and NUMS-256 cryptographic toolkit.
//!
//! Two primitive cores carry the whole crate: the Keccak-f\[1600\] sponge
//! permutation behind SHA-3 and the SHAKE extendable-output functions
//! ([`keccak`], [`sponge`], [`hash`]), and arithmetic on the twisted Edwards
//! curve NUMS-256 ("ed-256-mers*") over F_p with p = 2^256 − 189
//! ([`field`], [`edwards`]).
//!
//! On top of the primitives sit five user-facing services:
//! - keyed hashing and MACs ([`hash`]),
//! - passphrase-keyed symmetric authenticated encryption ([`symmetric`]),
//! - passphrase-derived keypairs ([`keys`]),
//! - ECIES-style hybrid public-key encryption ([`ecies`]),
//! - Schnorr signatures ([`schnorr`]).
//!
//! ## Note
//!
//! Sponge handles are owned, mutable state machines and are not safe for
//! concurrent use; allocate one handle per hash computation. Encryption and
//! signing consume randomness from a caller-supplied `RngCore + CryptoRng`.

#![allow(non_snake_case)]
#![deny(unused_variables)]
#![deny(unused_mut)]

pub mod ecies;
pub mod edwards;
pub mod encoding;
pub mod errors;
pub mod field;
pub mod hash;
pub mod keccak;
pub mod keys;
pub mod rsp;
pub mod schnorr;
pub mod sponge;
pub mod symmetric;

pub use ecies::Ciphertext;
pub use edwards::Point;
pub use errors::Error;
pub use keys::{KeyPair, PublicKey};
pub use schnorr::Signature;
pub use sponge::{Sponge, Variant};
