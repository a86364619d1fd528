use subtle::{Choice, ConstantTimeEq};

/// Compares two byte strings without an early exit.
///
/// Work is proportional to the longer input; a length mismatch is folded
/// into the result instead of short-circuiting.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    let len = a.len().max(b.len());
    let mut equal: Choice = (a.len() as u64).ct_eq(&(b.len() as u64));

    for i in 0..len {
        let x = a.get(i).copied().unwrap_or(0);
        let y = b.get(i).copied().unwrap_or(0);
        equal &= x.ct_eq(&y);
    }

    equal.into()
}
