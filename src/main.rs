use anyhow::{Context, Result, bail};
use argonhash::{Argon2id, EncodedHash, ParamPolicy, random_string};
use clap::{Parser, Subcommand};
use std::process::ExitCode;

mod auth;
mod config;

use config::Argon2Args;

const DEFAULT_SALT_LEN: usize = 16;
/// Exit status for a well-formed hash that does not match; errors exit with 1.
const MISMATCH_EXIT: u8 = 2;

#[derive(Debug, Parser)]
#[command(name = "argonhash")]
#[command(
    version,
    about = "Hash and verify passwords with Argon2id PHC strings."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Hashes the password read from ARGONHASH_PASSWORD, stdin or a prompt
    Hash {
        /// Salt to use instead of a random one (at least 8 characters)
        #[arg(long, conflicts_with = "salt_len")]
        salt: Option<String>,

        /// Length of the generated salt
        #[arg(long, default_value_t = DEFAULT_SALT_LEN)]
        salt_len: usize,

        #[command(flatten)]
        argon2: Argon2Args,
    },

    /// Checks the password against a stored hash (exit 2 on mismatch, 1 on error)
    #[command(arg_required_else_help = true)]
    Verify {
        hash: String,

        /// Re-derive with the configured parameters instead of the stored ones
        #[arg(long, default_value_t = false)]
        configured_params: bool,

        #[command(flatten)]
        argon2: Argon2Args,
    },

    /// Prints a random salt
    Salt {
        #[arg(short, long, default_value_t = DEFAULT_SALT_LEN)]
        len: usize,
    },

    /// Shows the fields of a stored hash as JSON
    #[command(arg_required_else_help = true)]
    Inspect { hash: String },
}

fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Cli::parse();
    match args.command {
        Commands::Hash {
            salt,
            salt_len,
            argon2,
        } => {
            let hasher = Argon2id::new(argon2.to_params()?);
            let salt = match salt {
                Some(s) => s,
                None => random_string(salt_len)?,
            };
            let password = auth::read_password()?;
            let hash = hasher
                .hash(&password, &salt)
                .context("failed to hash password")?;
            println!("{hash}");
        }
        Commands::Verify {
            hash,
            configured_params,
            argon2,
        } => {
            let policy = if configured_params {
                ParamPolicy::Configured
            } else {
                ParamPolicy::Embedded
            };
            let hasher = Argon2id::new(argon2.to_params()?).with_policy(policy);
            let password = auth::read_password()?;

            if !hasher.verify(&password, &hash)? {
                println!("hash does not match!");
                return Ok(ExitCode::from(MISMATCH_EXIT));
            }

            println!("hash matched!");
            if hasher.needs_rehash(&hash)? {
                eprintln!("note: stored hash uses outdated parameters, consider rehashing");
            }
        }
        Commands::Salt { len } => {
            if len == 0 {
                bail!("salt length must be greater than zero");
            }
            println!("{}", random_string(len)?);
        }
        Commands::Inspect { hash } => {
            let parsed: EncodedHash = hash.parse()?;
            let info = serde_json::json!({
                "variant": argonhash::VARIANT,
                "version": parsed.version(),
                "params": parsed.params().ok(),
                "raw_params": parsed.raw_params(),
                "salt_len": parsed.salt().len(),
                "key_len": parsed.key().len(),
            });
            println!("{}", serde_json::to_string_pretty(&info)?);
        }
    }

    Ok(ExitCode::SUCCESS)
}
