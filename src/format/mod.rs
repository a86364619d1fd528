//! PHC string encoding for Argon2id hashes.
//!
//! Format:
//! ```text
//! $argon2id$v=<VERSION>$m=<MEM_KIB>,t=<TIME>,p=<LANES>$<SALT_B64>$<KEY_B64>
//! ```
//! Base64 fields use the standard alphabet without padding.

use std::fmt;
use std::str::FromStr;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD_NO_PAD as B64;

use zeroize::Zeroizing;

use crate::crypto::{Params, VARIANT, VERSION};
use crate::error::HashError;

/// Field separator.
pub const SEPARATOR: char = '$';

/// A parsed or freshly built Argon2id hash string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedHash {
    version: u32,
    params: String,
    salt: Vec<u8>,
    key: Zeroizing<Vec<u8>>,
}

impl EncodedHash {
    /// Builds the record for a newly derived key.
    pub fn new(params: &Params, salt: &[u8], key: Zeroizing<Vec<u8>>) -> Self {
        Self {
            version: VERSION,
            params: format!(
                "m={},t={},p={}",
                params.mem_cost_kib(),
                params.time_cost(),
                params.parallelism()
            ),
            salt: salt.to_vec(),
            key,
        }
    }

    /// Decodes a hash string.
    ///
    /// # Errors
    ///
    /// - [`HashError::MalformedHash`] if there are not exactly six `$` fields
    ///   or anything precedes the first `$`
    /// - [`HashError::IncompatibleVariant`] if the algorithm tag is not `argon2id`
    /// - [`HashError::IncompatibleVersion`] if the version field is not `v=19`
    /// - [`HashError::MalformedEncoding`] if salt or key is not strict unpadded base64
    ///
    /// The `m=,t=,p=` field is kept verbatim; see [`EncodedHash::params`].
    pub fn parse(encoded: &str) -> Result<Self, HashError> {
        let fields: Vec<&str> = encoded.split(SEPARATOR).collect();
        let &[lead, variant, version, params, salt, key] = fields.as_slice() else {
            return Err(HashError::MalformedHash);
        };

        if !lead.is_empty() {
            return Err(HashError::MalformedHash);
        }

        if variant != VARIANT {
            return Err(HashError::IncompatibleVariant);
        }

        let version = parse_version(version)
            .filter(|v| *v == VERSION)
            .ok_or(HashError::IncompatibleVersion)?;

        let salt = B64
            .decode(salt)
            .map_err(|_| HashError::MalformedEncoding { field: "salt" })?;
        let key = B64
            .decode(key)
            .map(Zeroizing::new)
            .map_err(|_| HashError::MalformedEncoding { field: "key" })?;

        Ok(Self {
            version,
            params: params.to_string(),
            salt,
            key,
        })
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn salt(&self) -> &[u8] {
        &self.salt
    }

    pub fn key(&self) -> &[u8] {
        &self.key
    }

    /// The parameter field exactly as it appeared in the string.
    pub fn raw_params(&self) -> &str {
        &self.params
    }

    /// Parses the embedded `m=,t=,p=` field.
    ///
    /// The key length is taken from the decoded key.
    pub fn params(&self) -> Result<Params, HashError> {
        let mut parts = self.params.split(',');
        let m = parse_param(parts.next(), "m")?;
        let t = parse_param(parts.next(), "t")?;
        let p = parse_param(parts.next(), "p")?;
        if parts.next().is_some() {
            return Err(HashError::MalformedParams);
        }

        let p = u8::try_from(p).map_err(|_| HashError::MalformedParams)?;
        let key_len = u32::try_from(self.key.len()).map_err(|_| HashError::MalformedParams)?;

        Params::new(t, m, p, key_len).map_err(|_| HashError::MalformedParams)
    }
}

fn parse_version(field: &str) -> Option<u32> {
    field.strip_prefix("v=").and_then(parse_decimal)
}

fn parse_param(part: Option<&str>, name: &str) -> Result<u32, HashError> {
    part.and_then(|kv| kv.split_once('='))
        .filter(|(k, _)| *k == name)
        .and_then(|(_, v)| parse_decimal(v))
        .ok_or(HashError::MalformedParams)
}

/// Canonical decimal: ASCII digits only, no sign, no leading zeros.
fn parse_decimal(s: &str) -> Option<u32> {
    let canonical = !s.is_empty()
        && s.bytes().all(|b| b.is_ascii_digit())
        && (s == "0" || !s.starts_with('0'));
    if canonical { s.parse().ok() } else { None }
}

impl fmt::Display for EncodedHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "${VARIANT}$v={}${}${}${}",
            self.version,
            self.params,
            B64.encode(&self.salt),
            B64.encode(self.key.as_slice())
        )
    }
}

impl FromStr for EncodedHash {
    type Err = HashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
