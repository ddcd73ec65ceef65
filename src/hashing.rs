//! Bucket hash functions for the three datum domains.
//!
//! Each function maps a key to a bucket index in `0..size`. The placement
//! is part of the table's observable behavior (it decides enumeration
//! order), so these are fixed formulas rather than a `BuildHasher`.

use crate::datum::Datum;

/// Integer keys: `key mod size`, using the Euclidean remainder so that
/// negative keys still land in range. Non-negative keys get the plain
/// remainder.
pub fn hash_integer(key: i32, size: usize) -> usize {
    (key as i64).rem_euclid(size as i64) as usize
}

/// Character keys: `(Σ_{i=1..n} i·n) mod size` where `n` is the code point.
/// Depends only on the character's own ordinal.
pub fn hash_character(key: char, size: usize) -> usize {
    let n = key as u64;
    // Σ_{i=1..n} i·n == n · n(n+1)/2; fits in u64 for every code point.
    let sum = n * (n * (n + 1) / 2);
    (sum % size as u64) as usize
}

/// Text keys: `(Σ_{i=1..len} i·s[i]) mod size` over the UTF-8 bytes. The
/// first byte carries no weight and `s[len]` reads as a zero terminator.
/// Bytes are weighted as unsigned values, so non-ASCII text intentionally
/// lands in different buckets than a signed-`char` weighting would place it.
pub fn hash_text(key: &str, size: usize) -> usize {
    let sum = key
        .bytes()
        .enumerate()
        .skip(1)
        .fold(0u64, |acc, (i, b)| acc.wrapping_add((i as u64).wrapping_mul(b as u64)));
    (sum % size as u64) as usize
}

/// The per-domain hash functions a table routes keys with.
#[derive(Copy, Clone)]
pub struct HashFns {
    pub integer: fn(i32, usize) -> usize,
    pub character: fn(char, usize) -> usize,
    pub text: fn(&str, usize) -> usize,
}

impl Default for HashFns {
    fn default() -> Self {
        Self {
            integer: hash_integer,
            character: hash_character,
            text: hash_text,
        }
    }
}

impl HashFns {
    /// Bucket index for `key` in a table of `size` buckets. The result is
    /// reduced once more so custom functions cannot route out of range.
    pub fn bucket(&self, key: &Datum, size: usize) -> usize {
        let raw = match key {
            Datum::Integer(k) => (self.integer)(*k, size),
            Datum::Character(c) => (self.character)(*c, size),
            Datum::Text(s) => (self.text)(s, size),
        };
        raw % size
    }
}
