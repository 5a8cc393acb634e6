//! Parser for NIST `.rsp` known-answer vector files, plus the SHA-3 Monte
//! Carlo driver.
//!
//! KAT files carry `Len = n`, `Msg = hex`, `MD = hex` triples (or
//! `Outputlen`/`Output` for variable-output SHAKE vectors); Monte Carlo
//! files carry a `Seed` and one `MD` per checkpoint. Header lines,
//! `# comments`, `[bracketed]` sections and unknown keys are skipped.

use crate::errors::Error;
use crate::hash::sha3;
use crate::sponge::Variant;

/// One known-answer vector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Vector {
    /// Message length in bits, when the file carries `Len` lines.
    pub len_bits: Option<usize>,
    /// Message bytes; empty when `Len = 0`.
    pub msg: Vec<u8>,
    /// Expected digest (`MD`) or XOF output (`Output`).
    pub md: Vec<u8>,
    /// Output length in bits for variable-output vectors.
    pub out_bits: Option<usize>,
}

fn bad(reason: String) -> Error {
    Error::InvalidEncoding(reason)
}

fn parse_number(value: &str, key: &str) -> Result<usize, Error> {
    value
        .parse()
        .map_err(|_| bad(format!("vector file: bad {key} value {value:?}")))
}

fn parse_payload(value: &str, key: &str) -> Result<Vec<u8>, Error> {
    hex::decode(value).map_err(|_| bad(format!("vector file: bad {key} hex")))
}

/// Parse the known-answer vectors out of `.rsp` text.
pub fn parse(text: &str) -> Result<Vec<Vector>, Error> {
    let mut vectors = Vec::new();
    let mut len_bits: Option<usize> = None;
    let mut out_bits: Option<usize> = None;
    let mut msg: Option<Vec<u8>> = None;

    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            // Header prose without a key; tolerated like comments.
            continue;
        };
        let (key, value) = (key.trim(), value.trim());
        match key {
            "Len" => len_bits = Some(parse_number(value, key)?),
            "Outputlen" => out_bits = Some(parse_number(value, key)?),
            "Msg" => {
                // NIST writes a placeholder byte for the empty message.
                msg = Some(if len_bits == Some(0) {
                    Vec::new()
                } else {
                    parse_payload(value, key)?
                });
            }
            "MD" | "Output" => {
                let msg = msg
                    .take()
                    .ok_or_else(|| bad(format!("vector file: {key} before Msg")))?;
                vectors.push(Vector {
                    len_bits: len_bits.take(),
                    msg,
                    md: parse_payload(value, key)?,
                    out_bits: out_bits.take(),
                });
            }
            // COUNT indices and other metadata are positional noise here.
            _ => {}
        }
    }
    Ok(vectors)
}

/// Parse a SHA-3 Monte Carlo `.rsp` file into its seed and the expected
/// checkpoint digests.
pub fn parse_monte_carlo(text: &str) -> Result<(Vec<u8>, Vec<Vec<u8>>), Error> {
    let mut seed: Option<Vec<u8>> = None;
    let mut checkpoints = Vec::new();

    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let (key, value) = (key.trim(), value.trim());
        match key {
            "Seed" => seed = Some(parse_payload(value, key)?),
            "MD" => checkpoints.push(parse_payload(value, key)?),
            _ => {}
        }
    }

    let seed = seed.ok_or_else(|| bad("monte carlo file: missing Seed".into()))?;
    Ok((seed, checkpoints))
}

/// One Monte Carlo checkpoint: 1000 chained digests starting from `seed`.
///
/// The full NIST test feeds each checkpoint output back in as the next
/// seed, 100 times.
pub fn monte_carlo_step(variant: Variant, seed: &[u8]) -> Vec<u8> {
    let mut md = seed.to_vec();
    for _ in 0..1000 {
        md = sha3(variant, &md);
    }
    md
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
#  CAVS 19.0
#  SHA3-256 ShortMsg information
[L = 256]

Len = 0
Msg = 00
MD = a7ffc6f8bf1ed76651c14756a061d662f580ff4de43b49fa82d80a4b80f8434a

Len = 24
Msg = 616263
MD = 3a985da74fe225b2045c172d6bd390bd855f086e3e9d525b46bfe24511431532
";

    #[test]
    fn parses_headers_and_empty_message() {
        let vectors = parse(SAMPLE).unwrap();
        assert_eq!(vectors.len(), 2);
        assert_eq!(vectors[0].len_bits, Some(0));
        assert!(vectors[0].msg.is_empty());
        assert_eq!(vectors[1].msg, b"abc");
        assert_eq!(vectors[1].md.len(), 32);
    }

    #[test]
    fn parses_variable_output_vectors() {
        let text = "COUNT = 0\nOutputlen = 16\nMsg = ff\nOutput = 0011\n";
        let vectors = parse(text).unwrap();
        assert_eq!(vectors[0].out_bits, Some(16));
        assert_eq!(vectors[0].md, vec![0x00, 0x11]);
        assert_eq!(vectors[0].len_bits, None);
    }

    #[test]
    fn rejects_md_without_msg() {
        assert!(parse("MD = 00ff\n").is_err());
        assert!(parse("Len = x\nMsg = 00\nMD = 00\n").is_err());
    }

    #[test]
    fn monte_carlo_parse_and_chain() {
        let text = "Seed = 616263\n\nCOUNT = 0\nMD = 0102\nCOUNT = 1\nMD = 0304\n";
        let (seed, checkpoints) = parse_monte_carlo(text).unwrap();
        assert_eq!(seed, b"abc");
        assert_eq!(checkpoints.len(), 2);

        // One checkpoint equals 1000 manual iterations.
        let mut md = seed.clone();
        for _ in 0..1000 {
            md = sha3(Variant::Sha3_256, &md);
        }
        assert_eq!(monte_carlo_step(Variant::Sha3_256, &seed), md);
    }
}
