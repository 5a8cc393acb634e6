//! edmers CLI: file hashing, MACs, and passphrase-based encryption and
//! signatures over the NUMS-256 curve.
//!
//! Every subcommand reads and writes whole files; errors go to stderr with
//! a nonzero exit code.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use rand::rngs::OsRng;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use edmers::encoding::{
    decode_ciphertext, decode_public_key, decode_signature, encode_ciphertext, encode_public_key,
    encode_signature, read_file, write_file,
};
use edmers::{ecies, hash, keys, schnorr, symmetric, Variant};

/// SHA-3/SHAKE and NUMS-256 cryptographic toolkit.
#[derive(Parser)]
#[command(name = "edmers")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the hex SHA3 digest of a file
    Hash {
        /// Digest length in bits (224, 256, 384 or 512)
        suffix: usize,

        /// File to hash
        path: PathBuf,
    },

    /// Keyed MAC: absorb the passphrase, then the file, squeeze `out-bits`
    Mac {
        /// SHAKE security level (128 or 256)
        suffix: usize,

        /// MAC key passphrase
        passphrase: String,

        /// File to authenticate
        path: PathBuf,

        /// Output length in bits (multiple of 8)
        out_bits: usize,
    },

    /// Symmetric authenticated encryption under a passphrase
    Encrypt {
        /// Encryption passphrase
        passphrase: String,

        /// Plaintext input file
        input: PathBuf,

        /// Ciphertext output file
        output: PathBuf,
    },

    /// Inverse of `encrypt`; rejects the record on MAC mismatch
    Decrypt {
        /// Encryption passphrase
        passphrase: String,

        /// Ciphertext input file
        input: PathBuf,

        /// Plaintext output file
        output: PathBuf,
    },

    /// Derive a keypair and write the public key file
    Keygen {
        /// Key passphrase
        passphrase: String,

        /// Public key output file
        output: PathBuf,
    },

    /// Public-key encryption to a recipient's public key file
    EncryptPk {
        /// Recipient public key file
        public_key: PathBuf,

        /// Plaintext input file
        message: PathBuf,

        /// Ciphertext output file
        output: PathBuf,
    },

    /// Inverse of `encrypt-pk`, using the recipient passphrase
    DecryptPk {
        /// Key passphrase
        passphrase: String,

        /// Ciphertext input file
        input: PathBuf,

        /// Plaintext output file
        output: PathBuf,
    },

    /// Sign a message file
    Sign {
        /// Key passphrase
        passphrase: String,

        /// Message file to sign
        message: PathBuf,

        /// Signature output file
        output: PathBuf,
    },

    /// Verify a signature file against a message and public key
    Verify {
        /// Message file
        message: PathBuf,

        /// Signature file
        signature: PathBuf,

        /// Signer public key file
        public_key: PathBuf,
    },
}

fn sha3_variant(suffix: usize) -> Result<Variant> {
    match suffix {
        224 | 256 | 384 | 512 => Ok(Variant::sha3(suffix)),
        _ => bail!("SHA-3 suffix must be one of 224, 256, 384, 512 (got {suffix})"),
    }
}

fn shake_variant(suffix: usize) -> Result<Variant> {
    match suffix {
        128 | 256 => Ok(Variant::shake(suffix)),
        _ => bail!("SHAKE suffix must be 128 or 256 (got {suffix})"),
    }
}

fn read_text(path: &PathBuf) -> Result<String> {
    let bytes = read_file(path)?;
    String::from_utf8(bytes).with_context(|| format!("{} is not valid UTF-8", path.display()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to install tracing subscriber")?;

    match cli.command {
        Commands::Hash { suffix, path } => {
            let variant = sha3_variant(suffix)?;
            let data = read_file(&path)?;
            println!("{}", hex::encode(hash::sha3(variant, &data)));
        }

        Commands::Mac {
            suffix,
            passphrase,
            path,
            out_bits,
        } => {
            let variant = shake_variant(suffix)?;
            if out_bits == 0 || out_bits % 8 != 0 {
                bail!("output length must be a positive multiple of 8 bits (got {out_bits})");
            }
            let data = read_file(&path)?;
            let tag = hash::mac(variant, passphrase.as_bytes(), &data, out_bits);
            println!("{}", hex::encode(tag));
        }

        Commands::Encrypt {
            passphrase,
            input,
            output,
        } => {
            let plaintext = read_file(&input)?;
            let record = symmetric::encrypt(passphrase.as_bytes(), &plaintext, &mut OsRng);
            write_file(&output, &record)?;
        }

        Commands::Decrypt {
            passphrase,
            input,
            output,
        } => {
            let record = read_file(&input)?;
            let plaintext = symmetric::decrypt(passphrase.as_bytes(), &record)?;
            write_file(&output, &plaintext)?;
        }

        Commands::Keygen { passphrase, output } => {
            let pair = keys::keygen(passphrase.as_bytes());
            write_file(&output, encode_public_key(pair.public()).as_bytes())?;
        }

        Commands::EncryptPk {
            public_key,
            message,
            output,
        } => {
            let key = decode_public_key(&read_text(&public_key)?)?;
            let plaintext = read_file(&message)?;
            let ciphertext = ecies::encrypt(&plaintext, &key, &mut OsRng);
            write_file(&output, encode_ciphertext(&ciphertext).as_bytes())?;
        }

        Commands::DecryptPk {
            passphrase,
            input,
            output,
        } => {
            let ciphertext = decode_ciphertext(&read_text(&input)?)?;
            let plaintext = ecies::decrypt(&ciphertext, passphrase.as_bytes())?;
            write_file(&output, &plaintext)?;
        }

        Commands::Sign {
            passphrase,
            message,
            output,
        } => {
            let data = read_file(&message)?;
            let signature = schnorr::sign(passphrase.as_bytes(), &data, &mut OsRng);
            write_file(&output, encode_signature(&signature).as_bytes())?;
        }

        Commands::Verify {
            message,
            signature,
            public_key,
        } => {
            let data = read_file(&message)?;
            let signature = decode_signature(&read_text(&signature)?)?;
            let key = decode_public_key(&read_text(&public_key)?)?;
            schnorr::verify(&data, &signature, &key)?;
            println!("signature valid");
        }
    }

    Ok(())
}
