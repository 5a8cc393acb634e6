//! # Error: failure modes of the toolkit.
//!
//! This module defines the [`Error`] enum, which enumerates the failure
//! modes surfaced by protocol-level operations. Arithmetic and sponge
//! primitives never perform I/O and cannot fail with an I/O kind; contract
//! violations (an absorb after squeezing has begun, an unsupported output
//! length) are programming errors and panic instead of returning a variant.

use std::path::PathBuf;

/// An error surfaced by a protocol-level operation.
///
/// Each operation fails with exactly one of these kinds; categories are
/// never mixed.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed hex, or a key/ciphertext/signature file with the wrong
    /// shape (line count, odd-length payload, out-of-range integer).
    #[error("invalid encoding: {0}")]
    InvalidEncoding(String),
    /// Point decompression failed, or the decoded point lies outside the
    /// prime-order subgroup. Surfaced in place of a key, never a silent
    /// neutral element.
    #[error("invalid point: not on the curve or outside the prime-order subgroup")]
    InvalidPoint,
    /// Ciphertext authentication tag mismatch. No plaintext is released.
    #[error("authentication tag mismatch")]
    InvalidTag,
    /// Schnorr challenge recomputation did not match the signature.
    #[error("signature verification failed")]
    InvalidSignature,
    /// Filesystem failure, reported with the originating path.
    #[error("i/o failure on {}: {source}", path.display())]
    Io {
        /// Path of the file being read or written.
        path: PathBuf,
        /// Underlying OS error.
        #[source]
        source: std::io::Error,
    },
}
