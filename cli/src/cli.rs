//! # CLI Interface
//!
//! Defines the command-line argument structure for `veridoc` using `clap`
//! derive: signing, verification, sidecar inspection and cleanup, the
//! address codec surface, and key generation.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Detached document signing and verification.
///
/// Signs documents with an Sr25519 key derived from a BIP-39 mnemonic and
/// stores the signature as a sidecar file next to the document. Anyone
/// with the document and its sidecar can verify; nobody needs the
/// mnemonic for that.
#[derive(Parser, Debug)]
#[command(
    name = "veridoc",
    about = "Detached document signing and verification",
    version,
    propagate_version = true
)]
pub struct VeridocCli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the `veridoc` binary.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign a document, writing its signature sidecar next to it.
    Sign(SignArgs),
    /// Verify a document against its signature sidecar.
    Verify(VerifyArgs),
    /// Print the raw signature record of a signed document.
    Inspect(InspectArgs),
    /// Address codec operations (encode, validate, convert).
    #[command(subcommand)]
    Address(AddressCommands),
    /// Generate a fresh mnemonic and print its signer address.
    Keygen(KeygenArgs),
    /// Remove orphaned sidecars (signatures whose document is gone).
    Clean(CleanArgs),
    /// Print version information and exit.
    Version,
}

/// Arguments for the `sign` subcommand.
#[derive(Parser, Debug)]
pub struct SignArgs {
    /// Path of the document to sign.
    pub document: PathBuf,

    /// Signer display name embedded in the signature record.
    #[arg(long, short = 'n')]
    pub name: String,

    /// Opaque group id carried through into the record.
    #[arg(long, short = 'g', default_value_t = 0)]
    pub group: i64,

    /// BIP-39 mnemonic of the signing identity.
    ///
    /// Prefer `--mnemonic-file` or the environment variable over passing
    /// the phrase on the command line, where it lands in shell history.
    #[arg(long, env = "VERIDOC_MNEMONIC", hide_env_values = true)]
    pub mnemonic: Option<String>,

    /// Read the mnemonic from a file instead (surrounding whitespace is
    /// trimmed). Takes precedence over `--mnemonic` and the environment.
    #[arg(long)]
    pub mnemonic_file: Option<PathBuf>,
}

/// Arguments for the `verify` subcommand.
#[derive(Parser, Debug)]
pub struct VerifyArgs {
    /// Path of the document to verify. The sidecar is located
    /// automatically (same base name, `.sig` extension).
    pub document: PathBuf,

    /// Emit the verdict as JSON instead of human-readable text.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `inspect` subcommand.
#[derive(Parser, Debug)]
pub struct InspectArgs {
    /// Path of the signed document whose sidecar should be printed.
    pub document: PathBuf,
}

/// Address codec subcommands.
#[derive(Subcommand, Debug)]
pub enum AddressCommands {
    /// Encode a hex public key as an address.
    Encode(AddressEncodeArgs),
    /// Validate an address string (format and checksum).
    Validate(AddressValidateArgs),
    /// Re-encode an address under a different network.
    Convert(AddressConvertArgs),
}

/// Arguments for `address encode`.
#[derive(Parser, Debug)]
pub struct AddressEncodeArgs {
    /// Hex-encoded 32-byte public key.
    pub public_key: String,

    /// Target network name (see the registry; defaults to the identity
    /// network).
    #[arg(long, default_value = "veridoc")]
    pub network: String,
}

/// Arguments for `address validate`.
#[derive(Parser, Debug)]
pub struct AddressValidateArgs {
    /// Address string to check.
    pub address: String,
}

/// Arguments for `address convert`.
#[derive(Parser, Debug)]
pub struct AddressConvertArgs {
    /// Address string to convert.
    pub address: String,

    /// Target network name.
    #[arg(long)]
    pub network: String,
}

/// Arguments for the `keygen` subcommand.
#[derive(Parser, Debug)]
pub struct KeygenArgs {
    /// Mnemonic length in words: 12, 18, or 24.
    #[arg(long, short = 'w', default_value_t = 24)]
    pub words: u32,
}

/// Arguments for the `clean` subcommand.
#[derive(Parser, Debug)]
pub struct CleanArgs {
    /// Directory to scan for orphaned sidecars (non-recursive).
    pub dir: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        // Ensures the derive macros produce a valid CLI definition.
        VeridocCli::command().debug_assert();
    }
}
