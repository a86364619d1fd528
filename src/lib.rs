//! Argon2id password hashing with self-describing hash strings.
//!
//! ```no_run
//! use argonhash::{Argon2id, Params, random_string};
//!
//! let hasher = Argon2id::new(Params::default());
//! let salt = random_string(16)?;
//! let stored = hasher.hash("MyP@55w0rd", &salt)?;
//! assert!(hasher.verify("MyP@55w0rd", &stored)?);
//! # Ok::<(), argonhash::HashError>(())
//! ```

pub mod crypto;
pub mod error;
pub mod format;

pub use crate::crypto::{
    ALPHABET, OsRandom, Params, RandomSource, VARIANT, VERSION, constant_time_eq, random_string,
    random_string_with,
};
pub use crate::error::HashError;
pub use crate::format::EncodedHash;
use log::{debug, warn};
use zeroize::Zeroizing;

/// Default ceiling for stored parameters, as a multiple of the configured ones.
pub const COST_CEILING_FACTOR: u32 = 4;

/// Which parameters `verify` re-derives with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParamPolicy {
    /// Use the `m=,t=,p=` and key length stored in the hash string,
    /// provided none of them exceeds the hasher's ceiling.
    #[default]
    Embedded,
    /// Use the hasher's own parameters and ignore the stored ones.
    ///
    /// Hashes created under older parameters stop verifying once the
    /// configuration changes.
    Configured,
}

/// Hashes and verifies passwords with a fixed parameter set.
///
/// Holds no mutable state; one instance can be shared across threads.
#[derive(Debug, Clone, Copy)]
pub struct Argon2id {
    params: Params,
    max_params: Params,
    policy: ParamPolicy,
}

impl Argon2id {
    pub fn new(params: Params) -> Self {
        Self {
            params,
            max_params: params.scaled(COST_CEILING_FACTOR),
            policy: ParamPolicy::default(),
        }
    }

    /// Overrides the largest stored parameters `verify` will derive with.
    pub fn with_max_params(mut self, max_params: Params) -> Self {
        self.max_params = max_params;
        self
    }

    pub fn with_policy(mut self, policy: ParamPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn max_params(&self) -> &Params {
        &self.max_params
    }

    pub fn policy(&self) -> ParamPolicy {
        self.policy
    }

    /// Derives a key from `plain` and `salt` and returns the encoded hash string.
    ///
    /// # Errors
    ///
    /// Returns [`HashError::DerivationFailure`] if Argon2 rejects the input,
    /// e.g. a salt shorter than 8 bytes.
    pub fn hash(&self, plain: &str, salt: &str) -> Result<String, HashError> {
        let key = crypto::derive_key(plain.as_bytes(), salt.as_bytes(), &self.params)?;
        debug!(
            "hashed password with m={},t={},p={}",
            self.params.mem_cost_kib(),
            self.params.time_cost(),
            self.params.parallelism()
        );

        Ok(EncodedHash::new(&self.params, salt.as_bytes(), key).to_string())
    }

    /// Extracts the raw salt and key from an encoded hash.
    pub fn decode(&self, encoded: &str) -> Result<(Vec<u8>, Zeroizing<Vec<u8>>), HashError> {
        let parsed = EncodedHash::parse(encoded)?;
        Ok((parsed.salt().to_vec(), Zeroizing::new(parsed.key().to_vec())))
    }

    /// Checks `plain` against a stored hash.
    ///
    /// A wrong password yields `Ok(false)`; errors are reserved for hashes
    /// that cannot be decoded and for derivation failures.
    ///
    /// # Errors
    ///
    /// Under [`ParamPolicy::Embedded`], returns [`HashError::ExcessiveParams`]
    /// without deriving if the stored parameters exceed [`Argon2id::max_params`].
    pub fn verify(&self, plain: &str, encoded: &str) -> Result<bool, HashError> {
        let parsed = EncodedHash::parse(encoded)?;

        let params = match self.policy {
            ParamPolicy::Embedded => {
                let embedded = parsed.params()?;
                if embedded.exceeds(&self.max_params) {
                    warn!("refusing stored parameters {}", parsed.raw_params());
                    return Err(HashError::ExcessiveParams);
                }
                if embedded != self.params {
                    warn!(
                        "verifying with stored parameters {} (configured m={},t={},p={})",
                        parsed.raw_params(),
                        self.params.mem_cost_kib(),
                        self.params.time_cost(),
                        self.params.parallelism()
                    );
                }
                embedded
            }
            ParamPolicy::Configured => self.params,
        };

        let candidate = crypto::derive_key(plain.as_bytes(), parsed.salt(), &params)?;
        let matched = constant_time_eq(parsed.key(), &candidate);
        debug!("verification finished, matched={matched}");

        Ok(matched)
    }

    /// Reports whether a stored hash was made with different parameters than
    /// the current ones and should be replaced after the next successful login.
    pub fn needs_rehash(&self, encoded: &str) -> Result<bool, HashError> {
        let parsed = EncodedHash::parse(encoded)?;
        match parsed.params() {
            Ok(stored) => Ok(stored != self.params),
            Err(HashError::MalformedParams) => Ok(true),
            Err(e) => Err(e),
        }
    }
}
