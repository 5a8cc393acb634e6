//! Hex-line codecs for the on-disk formats, plus path-aware file helpers.
//!
//! The reference formats are ASCII hex, one field per line:
//! - public key: 32-byte big-endian x, then y;
//! - public-key ciphertext: Z.x, Z.y, masked payload, tag;
//! - signature: h, then z.
//!
//! The codecs are pure string/byte transforms; only [`read_file`] and
//! [`write_file`] touch the filesystem, and they attach the originating
//! path to the error.

use std::path::Path;

use num_bigint::BigUint;

use crate::ecies::{Ciphertext, TAG_LEN};
use crate::edwards;
use crate::errors::Error;
use crate::field;
use crate::keys::PublicKey;
use crate::schnorr::Signature;

fn bad(what: &str, reason: &str) -> Error {
    Error::InvalidEncoding(format!("{what}: {reason}"))
}

fn parse_hex(line: &str, what: &str) -> Result<Vec<u8>, Error> {
    hex::decode(line.trim()).map_err(|_| bad(what, "malformed hex"))
}

// Coordinates and scalars are at most 32 bytes; shorter (unpadded) values
// are accepted on input, the emitters always write the fixed width.
fn parse_uint(line: &str, what: &str) -> Result<BigUint, Error> {
    let bytes = parse_hex(line, what)?;
    if bytes.len() > 32 {
        return Err(bad(what, "longer than 32 bytes"));
    }
    Ok(BigUint::from_bytes_be(&bytes))
}

fn exact_lines<'a>(text: &'a str, count: usize, what: &str) -> Result<Vec<&'a str>, Error> {
    let lines: Vec<&str> = text.lines().collect();
    if lines.len() != count {
        return Err(bad(
            what,
            &format!("expected {count} lines, found {}", lines.len()),
        ));
    }
    Ok(lines)
}

/// Serialize a public key as two hex lines (x, then y).
pub fn encode_public_key(key: &PublicKey) -> String {
    let point = key.point();
    format!(
        "{}\n{}\n",
        hex::encode(field::to_bytes32(point.x())),
        hex::encode(field::to_bytes32(point.y())),
    )
}

/// Parse and validate a public key file.
pub fn decode_public_key(text: &str) -> Result<PublicKey, Error> {
    let lines = exact_lines(text, 2, "public key file")?;
    let x = parse_uint(lines[0], "public key x")?;
    let y = parse_uint(lines[1], "public key y")?;
    PublicKey::from_coordinates(&x, &y)
}

/// Serialize a public-key ciphertext as four hex lines (Z.x, Z.y, c, t).
pub fn encode_ciphertext(ciphertext: &Ciphertext) -> String {
    format!(
        "{}\n{}\n{}\n{}\n",
        hex::encode(field::to_bytes32(&ciphertext.zx)),
        hex::encode(field::to_bytes32(&ciphertext.zy)),
        hex::encode(&ciphertext.mask),
        hex::encode(ciphertext.tag),
    )
}

/// Parse a public-key ciphertext file.
///
/// The payload line may be empty (an empty plaintext masks to an empty
/// payload); the tag must be exactly 32 bytes.
pub fn decode_ciphertext(text: &str) -> Result<Ciphertext, Error> {
    let lines = exact_lines(text, 4, "ciphertext file")?;
    let zx = parse_uint(lines[0], "ciphertext Z.x")?;
    let zy = parse_uint(lines[1], "ciphertext Z.y")?;
    let mask = parse_hex(lines[2], "ciphertext payload")?;
    let tag_bytes = parse_hex(lines[3], "ciphertext tag")?;
    let tag: [u8; TAG_LEN] = tag_bytes
        .try_into()
        .map_err(|_| bad("ciphertext tag", "not 32 bytes"))?;
    Ok(Ciphertext { zx, zy, mask, tag })
}

/// Serialize a signature as two hex lines (h, then z).
pub fn encode_signature(signature: &Signature) -> String {
    format!(
        "{}\n{}\n",
        hex::encode(field::to_bytes32(&signature.h)),
        hex::encode(field::to_bytes32(&signature.z)),
    )
}

/// Parse a signature file. Components must lie in [0, r).
pub fn decode_signature(text: &str) -> Result<Signature, Error> {
    let lines = exact_lines(text, 2, "signature file")?;
    let h = parse_uint(lines[0], "signature h")?;
    let z = parse_uint(lines[1], "signature z")?;
    if h >= *edwards::R || z >= *edwards::R {
        return Err(bad("signature file", "component not reduced mod r"));
    }
    Ok(Signature { h, z })
}

/// Read a whole file, reporting failures with the path.
pub fn read_file(path: &Path) -> Result<Vec<u8>, Error> {
    std::fs::read(path).map_err(|source| Error::Io {
        path: path.to_owned(),
        source,
    })
}

/// Write a whole file, reporting failures with the path.
pub fn write_file(path: &Path, bytes: &[u8]) -> Result<(), Error> {
    std::fs::write(path, bytes).map_err(|source| Error::Io {
        path: path.to_owned(),
        source,
    })
}
