//! Shuffling of the not-yet-played part of a queue.

use rand::Rng;

/// In-place Fisher-Yates shuffle.
///
/// Walks from the last index down to 1 and swaps each slot with a uniformly
/// chosen index in `0..=i`, so every permutation is equally likely.
pub fn fisher_yates<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// Shuffle everything after `current`, leaving `items[..=current]` alone.
pub fn shuffle_after<T, R: Rng + ?Sized>(items: &mut [T], current: usize, rng: &mut R) {
    if current + 1 >= items.len() {
        return;
    }
    fisher_yates(&mut items[current + 1..], rng);
}
