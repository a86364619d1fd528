use argon2::{Algorithm, Argon2, Version};
use serde::Serialize;
use zeroize::Zeroizing;

use crate::error::HashError;

/// Default derived key length in bytes.
pub const DEFAULT_KEY_LEN: u32 = 32;

/// Argon2id cost parameters plus the derived key length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Params {
    time_cost: u32,
    mem_cost_kib: u32,
    parallelism: u8,
    key_len: u32,
}

impl Default for Params {
    fn default() -> Self {
        let cpus = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
            .clamp(1, u8::MAX as usize) as u8;

        Self {
            // default number of iterations
            time_cost: 2,
            mem_cost_kib: 64 * 1024, // 64 MiB
            // one lane per CPU
            parallelism: cpus,
            key_len: DEFAULT_KEY_LEN,
        }
    }
}

impl Params {
    /// Builds a parameter set, rejecting anything Argon2 would refuse.
    pub fn new(
        time_cost: u32,
        mem_cost_kib: u32,
        parallelism: u8,
        key_len: u32,
    ) -> Result<Self, HashError> {
        let params = Self {
            time_cost,
            mem_cost_kib,
            parallelism,
            key_len,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn time_cost(&self) -> u32 {
        self.time_cost
    }

    pub fn mem_cost_kib(&self) -> u32 {
        self.mem_cost_kib
    }

    pub fn parallelism(&self) -> u8 {
        self.parallelism
    }

    pub fn key_len(&self) -> u32 {
        self.key_len
    }

    /// Same cost parameters with a different output length.
    pub fn with_key_len(self, key_len: u32) -> Result<Self, HashError> {
        Self::new(self.time_cost, self.mem_cost_kib, self.parallelism, key_len)
    }

    /// Every cost multiplied by `factor`, saturating at each field's maximum.
    pub fn scaled(&self, factor: u32) -> Self {
        Self {
            time_cost: self.time_cost.saturating_mul(factor),
            mem_cost_kib: self.mem_cost_kib.saturating_mul(factor),
            parallelism: u8::try_from(u32::from(self.parallelism).saturating_mul(factor))
                .unwrap_or(u8::MAX),
            key_len: self.key_len.saturating_mul(factor),
        }
    }

    /// True if any cost or the key length is above the one in `limit`.
    pub fn exceeds(&self, limit: &Params) -> bool {
        self.time_cost > limit.time_cost
            || self.mem_cost_kib > limit.mem_cost_kib
            || self.parallelism > limit.parallelism
            || self.key_len > limit.key_len
    }

    pub fn validate(&self) -> Result<(), HashError> {
        self.to_argon2().map(|_| ())
    }

    fn to_argon2(&self) -> Result<argon2::Params, HashError> {
        let params = argon2::Params::new(
            self.mem_cost_kib,
            self.time_cost,
            u32::from(self.parallelism),
            Some(self.key_len as usize),
        )?;
        Ok(params)
    }
}

/// Derives `params.key_len()` bytes from `password` and `salt` with Argon2id v0x13.
pub fn derive_key(
    password: &[u8],
    salt: &[u8],
    params: &Params,
) -> Result<Zeroizing<Vec<u8>>, HashError> {
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params.to_argon2()?);

    let mut key = Zeroizing::new(vec![0u8; params.key_len as usize]);
    argon2.hash_password_into(password, salt, &mut key)?;

    Ok(key)
}
