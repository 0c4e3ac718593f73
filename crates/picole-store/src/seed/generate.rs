//! Random values for seed rows

use rand::distributions::Alphanumeric;
use rand::seq::SliceRandom;
use rand::Rng;

/// A single alphanumeric word of `min..=max` characters
pub(super) fn word<R: Rng>(rng: &mut R, min: usize, max: usize) -> String {
    let len = rng.gen_range(min..=max);
    (0..len).map(|_| char::from(rng.sample(Alphanumeric))).collect()
}

/// Several words separated by spaces, at most `max_len` characters
pub(super) fn phrase<R: Rng>(rng: &mut R, max_len: usize) -> String {
    let words = rng.gen_range(2..=5);
    let mut out = (0..words)
        .map(|_| word(rng, 3, 8))
        .collect::<Vec<_>>()
        .join(" ");
    out.truncate(max_len);
    out
}

/// Fourteen random digits
pub(super) fn cnpj<R: Rng>(rng: &mut R) -> String {
    (0..14)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}

/// Amount between 0.01 and `max` with two decimals
pub(super) fn money<R: Rng>(rng: &mut R, max: f64) -> f64 {
    (rng.gen_range(0.01..max) * 100.0).round() / 100.0
}

/// Random element of a non-empty id list
pub(super) fn pick<R: Rng>(rng: &mut R, ids: &[i64]) -> Option<i64> {
    ids.choose(rng).copied()
}
