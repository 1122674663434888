use std::error::Error as _;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use log::{info, LevelFilter};
use workitem_signer::{Error, RsaKeyMaterial};

#[derive(Parser)]
#[command(version, about = "Create RSA key files and sign work item ids", long_about = None)]
struct Arguments {
    /// Log debug output (otherwise controlled by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a 2048-bit key pair and write the private key file
    Generate {
        /// Private key file to create
        key_file: PathBuf,
    },
    /// Write the public half of a key file
    Export {
        /// Private key file to read
        key_file: PathBuf,
        /// Public key file to create
        public_key_file: PathBuf,
        /// Output document format
        #[arg(long, value_enum, default_value_t = Format::RsaParameters)]
        format: Format,
    },
    /// Sign a work item id and print the base64 signature
    Sign {
        /// Private key file to read
        key_file: PathBuf,
        /// Text to sign
        subject: String,
    },
    /// Check a signature made by `sign`
    Verify {
        /// Public or private key file to read
        key_file: PathBuf,
        /// Text that was signed
        subject: String,
        /// Base64 signature
        signature: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// PascalCase fields, standard base64
    RsaParameters,
    /// JWK fields, base64url
    Jwk,
}

fn init_logging(verbose: bool) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(LevelFilter::Warn).parse_default_env();
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.init();
}

fn run(command: Command) -> Result<(), Error> {
    match command {
        Command::Generate { key_file } => {
            let key = RsaKeyMaterial::generate()?;
            key.write_key_file(&key_file, false)?;
            info!("generated {}", key_file.display());
        }
        Command::Export {
            key_file,
            public_key_file,
            format,
        } => {
            let key = RsaKeyMaterial::read_key_file(&key_file)?;
            match format {
                Format::RsaParameters => key.write_key_file(&public_key_file, true)?,
                Format::Jwk => key.write_jwk_file(&public_key_file, true)?,
            }
            info!("exported {}", public_key_file.display());
        }
        Command::Sign { key_file, subject } => {
            let key = RsaKeyMaterial::read_key_file(&key_file)?;
            println!("{}", key.sign(&subject)?);
        }
        Command::Verify {
            key_file,
            subject,
            signature,
        } => {
            let key = RsaKeyMaterial::read_key_file(&key_file)?;
            key.verify(&subject, &signature)?;
            println!("signature OK");
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Arguments::parse();
    init_logging(args.verbose);

    match run(args.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprint!("error: {err}");
            let mut source = err.source();
            while let Some(cause) = source {
                eprint!(": {cause}");
                source = cause.source();
            }
            eprintln!();
            ExitCode::FAILURE
        }
    }
}
