use getrandom::fill;

use crate::error::HashError;

/// The 62 symbols a generated salt is drawn from.
pub const ALPHABET: &[u8; 62] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

// Largest multiple of 62 that fits in a byte; anything at or above is rejected.
const ACCEPT_BELOW: u8 = 248;

/// Source of random bytes for salt generation.
pub trait RandomSource {
    fn fill(&mut self, buf: &mut [u8]) -> Result<(), HashError>;
}

/// Operating system CSPRNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn fill(&mut self, buf: &mut [u8]) -> Result<(), HashError> {
        fill(buf).map_err(|_| HashError::RandomUnavailable)
    }
}

/// Generates an `n` character salt from [`ALPHABET`] using the OS generator.
pub fn random_string(n: usize) -> Result<String, HashError> {
    random_string_with(&mut OsRandom, n)
}

/// Generates an `n` character salt from [`ALPHABET`] using `source`.
///
/// Bytes outside `0..248` are discarded so every symbol is equally likely.
pub fn random_string_with<R: RandomSource + ?Sized>(
    source: &mut R,
    n: usize,
) -> Result<String, HashError> {
    let mut out = String::with_capacity(n);
    let mut buf = [0u8; 64];

    while out.len() < n {
        source.fill(&mut buf)?;
        for &b in buf.iter().filter(|&&b| b < ACCEPT_BELOW) {
            if out.len() == n {
                break;
            }
            out.push(ALPHABET[usize::from(b % 62)] as char);
        }
    }

    Ok(out)
}
