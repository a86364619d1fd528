//! Cryptographic building blocks.
//!
//! Provides Argon2id key derivation, salt generation and constant-time comparison.

pub mod ct;
pub mod kdf;
pub mod salt;

pub use ct::constant_time_eq;
pub use kdf::{DEFAULT_KEY_LEN, Params, derive_key};
pub use salt::{ALPHABET, OsRandom, RandomSource, random_string, random_string_with};

/// Argon2 version number written to and expected in `v=` (0x13).
pub const VERSION: u32 = 19;
/// Algorithm tag written to and expected in the variant field.
pub const VARIANT: &str = "argon2id";
