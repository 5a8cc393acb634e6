//! End-to-end protocol round-trips and tamper resistance, including the
//! file-format codecs the CLI uses.

use edmers::encoding::{
    decode_ciphertext, decode_public_key, decode_signature, encode_ciphertext, encode_public_key,
    encode_signature,
};
use edmers::keys::keygen;
use edmers::{ecies, schnorr, symmetric, Error};
use rand::rngs::OsRng;

#[test]
fn ecies_round_trip_various_sizes() {
    let pair = keygen(b"hybrid encryption");
    for msg in [
        &b""[..],
        b"x",
        b"a message that is noticeably longer than one line of text",
        &[0x5au8; 500],
    ] {
        let ct = ecies::encrypt(msg, pair.public(), &mut OsRng);
        assert_eq!(ct.mask.len(), msg.len());
        assert_eq!(ecies::decrypt(&ct, b"hybrid encryption").unwrap(), msg);
    }
}

#[test]
fn ecies_through_file_format() {
    let pair = keygen(b"file format");
    let key_file = encode_public_key(pair.public());
    let key = decode_public_key(&key_file).unwrap();

    let ct = ecies::encrypt(b"over the wire", &key, &mut OsRng);
    let ct_file = encode_ciphertext(&ct);
    let parsed = decode_ciphertext(&ct_file).unwrap();
    assert_eq!(parsed, ct);
    assert_eq!(ecies::decrypt(&parsed, b"file format").unwrap(), b"over the wire");
}

#[test]
fn ecies_single_bit_tamper_matrix() {
    let pair = keygen(b"bit flips");
    let ct = ecies::encrypt(b"tamper evident payload", pair.public(), &mut OsRng);

    // Any single-bit change of the masked payload must die on the tag.
    for index in [0usize, 7, 21] {
        for bit in 0..8 {
            let mut mutated = ct.clone();
            mutated.mask[index] ^= 1 << bit;
            assert!(matches!(
                ecies::decrypt(&mutated, b"bit flips"),
                Err(Error::InvalidTag)
            ));
        }
    }

    // A flipped tag bit also fails, and a perturbed Z.y fails as either a
    // decompression error or a tag mismatch.
    let mut bad_tag = ct.clone();
    bad_tag.tag[31] ^= 0x01;
    assert!(matches!(
        ecies::decrypt(&bad_tag, b"bit flips"),
        Err(Error::InvalidTag)
    ));

    let mut bad_zy = ct.clone();
    bad_zy.zy = &bad_zy.zy ^ num_bigint::BigUint::from(4u32);
    let err = ecies::decrypt(&bad_zy, b"bit flips").unwrap_err();
    assert!(matches!(err, Error::InvalidPoint | Error::InvalidTag));
}

#[test]
fn schnorr_round_trip_through_files() {
    let pair = keygen(b"signing key");
    let msg = b"the contents of an important document";

    let signature = schnorr::sign(b"signing key", msg, &mut OsRng);
    let sig_file = encode_signature(&signature);
    let parsed = decode_signature(&sig_file).unwrap();
    assert_eq!(parsed, signature);

    let key = decode_public_key(&encode_public_key(pair.public())).unwrap();
    assert!(schnorr::verify(msg, &parsed, &key).is_ok());
}

#[test]
fn schnorr_rejects_any_byte_flip() {
    let pair = keygen(b"flip resistance");
    let msg = b"byte-exact binding";
    let signature = schnorr::sign(b"flip resistance", msg, &mut OsRng);

    // Flip each message byte in turn.
    for index in 0..msg.len() {
        let mut mutated = msg.to_vec();
        mutated[index] ^= 0x01;
        assert!(schnorr::verify(&mutated, &signature, pair.public()).is_err());
    }

    // Flip bytes of the encoded signature; decode may reject out-of-range
    // scalars, verify rejects the rest.
    let sig_file = encode_signature(&signature);
    let mut bytes = sig_file.into_bytes();
    let flip_at = [0usize, 40, 65, 100];
    for &index in &flip_at {
        let original = bytes[index];
        bytes[index] = if original == b'0' { b'1' } else { b'0' };
        let text = String::from_utf8(bytes.clone()).unwrap();
        let rejected = match decode_signature(&text) {
            Err(_) => true,
            Ok(sig) => schnorr::verify(msg, &sig, pair.public()).is_err(),
        };
        assert!(rejected, "flip at byte {index} was accepted");
        bytes[index] = original;
    }
}

#[test]
fn distinct_passphrases_do_not_cross_verify() {
    let alice = keygen(b"alice");
    let _bob = keygen(b"bob");
    let sig = schnorr::sign(b"bob", b"shared message", &mut OsRng);
    assert!(schnorr::verify(b"shared message", &sig, alice.public()).is_err());
}

#[test]
fn symmetric_round_trip_and_reject() {
    let record = symmetric::encrypt(b"sym pass", b"0123456789abcdef0123456789", &mut OsRng);
    assert_eq!(
        symmetric::decrypt(b"sym pass", &record).unwrap(),
        b"0123456789abcdef0123456789"
    );
    assert!(symmetric::decrypt(b"other pass", &record).is_err());
}

// Both canonicalization branches must self-decrypt: scan passphrases until
// each branch (raw x even, raw x odd) has been seen working.
#[test]
fn keygen_canonicalization_covers_both_branches() {
    use edmers::edwards::{self, generator};
    use edmers::keys::private_scalar;

    let mut seen_even = false;
    let mut seen_odd = false;
    for i in 0..32u8 {
        let passphrase = [b'p', i];
        let raw = private_scalar(&passphrase);
        let raw_point = generator().mul(&raw);
        let flipped = raw_point.x().bit(0);
        if flipped {
            seen_odd = true;
        } else {
            seen_even = true;
        }

        let pair = keygen(&passphrase);
        assert!(!pair.public().point().x().bit(0));
        if flipped {
            assert_eq!(
                pair.secret(),
                &((&*edwards::R - &raw) % &*edwards::R),
                "odd branch must negate the scalar"
            );
        }

        let ct = ecies::encrypt(b"branch check", pair.public(), &mut OsRng);
        assert_eq!(ecies::decrypt(&ct, &passphrase).unwrap(), b"branch check");

        let sig = schnorr::sign(&passphrase, b"branch check", &mut OsRng);
        assert!(schnorr::verify(b"branch check", &sig, pair.public()).is_ok());

        if seen_even && seen_odd {
            return;
        }
    }
    panic!("thirty-two passphrases never exercised both parity branches");
}
