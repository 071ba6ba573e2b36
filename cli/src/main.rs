// Copyright (c) 2026 Veridoc Contributors. MIT License.
// See LICENSE for details.

//! # Veridoc CLI
//!
//! Entry point for the `veridoc` binary. Parses CLI arguments, initializes
//! logging, and dispatches to the core library. Everything is synchronous;
//! each invocation performs one operation and exits.
//!
//! Exit codes for `verify`: 0 when the signature is valid, 1 when a check
//! failed (tampered document, wrong key), 2 when the document or sidecar
//! could not be read at all. Scripts branch on these.

mod cli;
mod logging;

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::fs;
use std::process::ExitCode;

use veridoc::address::{convert, encode, validate, NetworkPrefix};
use veridoc::crypto::keys::DocKeypair;
use veridoc::did::KeyUri;
use veridoc::signer::{
    clean_orphaned_sidecars, find_sidecar, sidecar_path, sign, verify_file, Verdict,
};

use cli::{Commands, VeridocCli};
use logging::LogFormat;

fn main() -> ExitCode {
    let args = VeridocCli::parse();

    let format = std::env::var("VERIDOC_LOG_FORMAT")
        .map(|v| LogFormat::from_str_lossy(&v))
        .unwrap_or(LogFormat::Pretty);
    logging::init_logging("veridoc=info", format);

    let result = match args.command {
        Commands::Sign(args) => cmd_sign(args),
        Commands::Verify(args) => return cmd_verify(args),
        Commands::Inspect(args) => cmd_inspect(args),
        Commands::Address(args) => cmd_address(args),
        Commands::Keygen(args) => cmd_keygen(args),
        Commands::Clean(args) => cmd_clean(args),
        Commands::Version => {
            print_version();
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(2)
        }
    }
}

/// Signs a document and reports the written sidecar.
fn cmd_sign(args: cli::SignArgs) -> Result<()> {
    let mnemonic = resolve_mnemonic(&args)?;

    let record = sign(&args.document, &mnemonic, &args.name, args.group)
        .with_context(|| format!("failed to sign {}", args.document.display()))?;

    let sidecar = sidecar_path(&args.document);
    println!("Signed {}", args.document.display());
    println!("  Sidecar   : {}", sidecar.display());
    println!("  Signer    : {}", record.payload.signer_address);
    println!("  Key URI   : {}", record.payload.signer_key_uri);
    println!("  Hash      : {}", hex::encode(record.payload.document_hash));
    Ok(())
}

/// Resolves the mnemonic from file, flag, or environment, in that order.
fn resolve_mnemonic(args: &cli::SignArgs) -> Result<String> {
    if let Some(path) = &args.mnemonic_file {
        let phrase = fs::read_to_string(path)
            .with_context(|| format!("failed to read mnemonic file {}", path.display()))?;
        return Ok(phrase.trim().to_string());
    }
    if let Some(phrase) = &args.mnemonic {
        return Ok(phrase.clone());
    }
    bail!("no mnemonic: pass --mnemonic-file, --mnemonic, or set VERIDOC_MNEMONIC")
}

/// Verifies a document and exits with a verdict-keyed status code.
fn cmd_verify(args: cli::VerifyArgs) -> ExitCode {
    let verdict = verify_file(&args.document);

    if args.json {
        // Serialization of the verdict enum cannot fail; the expect is a
        // static guarantee, not a runtime hope.
        println!(
            "{}",
            serde_json::to_string_pretty(&verdict).expect("verdict always serializes")
        );
    } else {
        match &verdict {
            Verdict::Valid { signer } => {
                println!("VALID");
                println!("  Signer    : {}", signer.address);
                println!("  Algorithm : {}", signer.algorithm);
                println!("  Signed at : {} ms since epoch", signer.timestamp_millis);
            }
            Verdict::Invalid { reason } => {
                println!("INVALID: {reason}");
            }
            Verdict::Error { message } => {
                println!("ERROR: {message}");
            }
        }
    }

    match verdict {
        Verdict::Valid { .. } => ExitCode::SUCCESS,
        Verdict::Invalid { .. } => ExitCode::from(1),
        Verdict::Error { .. } => ExitCode::from(2),
    }
}

/// Prints the raw sidecar record for a signed document.
fn cmd_inspect(args: cli::InspectArgs) -> Result<()> {
    let Some(sidecar) = find_sidecar(&args.document) else {
        bail!("no signature found for {}", args.document.display());
    };
    let json = fs::read_to_string(&sidecar)
        .with_context(|| format!("failed to read sidecar {}", sidecar.display()))?;
    println!("{json}");
    Ok(())
}

/// Dispatches the address codec subcommands.
fn cmd_address(args: cli::AddressCommands) -> Result<()> {
    match args {
        cli::AddressCommands::Encode(args) => {
            let key = hex::decode(&args.public_key).context("public key is not valid hex")?;
            let network = lookup_network(&args.network)?;
            let address = encode(&key, network)
                .with_context(|| format!("failed to encode key for network {}", network.name()))?;
            println!("{}", address.text());
        }
        cli::AddressCommands::Validate(args) => {
            let check = validate(&args.address);
            println!("  Format   : {}", if check.is_valid_format { "ok" } else { "invalid" });
            println!("  Checksum : {}", if check.is_valid_checksum { "ok" } else { "invalid" });
            println!("  Valid    : {}", check.is_valid);
            if !check.is_valid {
                bail!("address is not valid");
            }
        }
        cli::AddressCommands::Convert(args) => {
            let network = lookup_network(&args.network)?;
            let converted = convert(&args.address, network)
                .with_context(|| format!("failed to convert to network {}", network.name()))?;
            println!("{}", converted.text());
        }
    }
    Ok(())
}

/// Resolves a network name against the registry, listing the options on
/// failure.
fn lookup_network(name: &str) -> Result<NetworkPrefix> {
    NetworkPrefix::by_name(name).with_context(|| {
        let known: Vec<&str> = NetworkPrefix::all().iter().map(|n| n.name()).collect();
        format!("unknown network '{name}' (known: {})", known.join(", "))
    })
}

/// Generates a fresh mnemonic and prints the identity it derives.
fn cmd_keygen(args: cli::KeygenArgs) -> Result<()> {
    let phrase = DocKeypair::generate_mnemonic(args.words);
    let keypair = DocKeypair::from_mnemonic_default(&phrase)
        .context("freshly generated mnemonic failed to derive")?;
    let address = encode(&keypair.public_key_bytes(), NetworkPrefix::identity())
        .expect("a keypair public key is always 32 bytes");

    println!("Generated signing identity.");
    println!("  Mnemonic  : {phrase}");
    println!("  Address   : {}", address.text());
    println!("  Key URI   : {}", KeyUri::for_address(&address));
    println!();
    println!("Store the mnemonic somewhere safe; it cannot be recovered.");
    Ok(())
}

/// Removes orphaned sidecars and reports what was deleted.
fn cmd_clean(args: cli::CleanArgs) -> Result<()> {
    let removed = clean_orphaned_sidecars(&args.dir)
        .with_context(|| format!("failed to scan {}", args.dir.display()))?;
    if removed.is_empty() {
        println!("No orphaned sidecars in {}", args.dir.display());
    } else {
        println!("Removed {} orphaned sidecar(s):", removed.len());
        for path in removed {
            println!("  {}", path.display());
        }
    }
    Ok(())
}

/// Prints version information to stdout.
fn print_version() {
    println!("veridoc {}", env!("CARGO_PKG_VERSION"));
}
