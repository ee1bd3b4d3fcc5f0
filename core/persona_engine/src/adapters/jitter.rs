use rand::seq::IndexedRandom;
use rand::Rng;

use crate::traits::TraitVector;

pub const FLAW_BOOST_MIN: i32 = 10;
pub const FLAW_BOOST_MAX: i32 = 25;

/// Final randomized pass over a generated vector.
///
/// Every key outside `pinned` moves by up to `magnitude` in either direction, then
/// two or three unpinned flaw/contradiction variables get a larger upward boost.
/// Returns the boosted keys.
pub fn apply_jitter<R: Rng + ?Sized>(
    vector: &mut TraitVector,
    magnitude: i32,
    pinned: &[&str],
    rng: &mut R,
) -> Vec<&'static str> {
    let magnitude = magnitude.abs();
    let keys: Vec<&'static str> = vector
        .iter()
        .map(|(k, _)| k)
        .filter(|k| !pinned.contains(k))
        .collect();

    if magnitude > 0 {
        for key in &keys {
            vector.apply_delta(key, rng.random_range(-magnitude..=magnitude));
        }
    }

    let candidates: Vec<&'static str> = keys
        .into_iter()
        .filter(|k| k.starts_with('F') || k.starts_with('P'))
        .collect();
    let count = rng.random_range(2..=3);
    let boosted: Vec<&'static str> = candidates.choose_multiple(rng, count).copied().collect();

    for key in &boosted {
        vector.apply_delta(key, rng.random_range(FLAW_BOOST_MIN..=FLAW_BOOST_MAX));
    }
    boosted
}
