use thiserror::Error;

/// Errors produced while hashing, decoding or verifying.
///
/// A password that simply does not match is not an error; `verify`
/// reports it as `Ok(false)`.
#[derive(Debug, Error)]
pub enum HashError {
    #[error("argon2id: hash is not in the correct format")]
    MalformedHash,

    #[error("argon2id: incompatible variant of argon2")]
    IncompatibleVariant,

    #[error("argon2id: incompatible version of argon2")]
    IncompatibleVersion,

    #[error("argon2id: invalid base64 in {field} field")]
    MalformedEncoding { field: &'static str },

    #[error("argon2id: invalid parameter field")]
    MalformedParams,

    #[error("argon2id: stored parameters exceed the allowed cost")]
    ExcessiveParams,

    #[error("argon2id: key derivation failed: {0}")]
    DerivationFailure(argon2::Error),

    #[error("OS random generator unavailable")]
    RandomUnavailable,
}

impl From<argon2::Error> for HashError {
    fn from(e: argon2::Error) -> Self {
        HashError::DerivationFailure(e)
    }
}
