//! Utility functions shared across the spatial pooler implementation.
//!
//! This module provides small numeric helpers used throughout the crate,
//! including random sampling, array shuffling, and the rounding convention
//! the spec requires (banker's rounding away from zero).

use rand::Rng;

/// Return the minimum of two values.
///
/// # Examples
///
/// ```
/// use spatial_pooler::utils::min;
///
/// assert_eq!(min(5, 10), 5);
/// assert_eq!(min(10, 5), 5);
/// ```
#[inline]
pub fn min<T: Ord>(a: T, b: T) -> T {
    if a < b {
        a
    } else {
        b
    }
}

/// Return the maximum of two values.
///
/// # Examples
///
/// ```
/// use spatial_pooler::utils::max;
///
/// assert_eq!(max(5, 10), 10);
/// assert_eq!(max(10, 5), 10);
/// ```
#[inline]
pub fn max<T: Ord>(a: T, b: T) -> T {
    if a > b {
        a
    } else {
        b
    }
}

/// Round `x` to the nearest integer, ties rounding away from zero.
///
/// This is the "commercial"/banker's-away-from-zero convention spec.md calls
/// for when sizing `mapPotential`'s sample and `initPermanence`'s connected
/// count: `round(2.5) == 3`, `round(-2.5) == -3`, unlike the
/// round-half-to-even behavior of `f64::round_ties_even`.
///
/// # Examples
///
/// ```
/// use spatial_pooler::utils::round_away_from_zero;
///
/// assert_eq!(round_away_from_zero(2.5), 3);
/// assert_eq!(round_away_from_zero(-2.5), -3);
/// assert_eq!(round_away_from_zero(2.4), 2);
/// ```
#[inline]
pub fn round_away_from_zero(x: f64) -> i64 {
    x.round() as i64
}

/// Shuffle a vector of usize values in-place using Fisher-Yates algorithm.
///
/// This is a convenience wrapper for shuffling usize vectors, which are
/// commonly used for index manipulation.
///
/// # Examples
///
/// ```
/// use spatial_pooler::utils::shuffle_indices;
/// use rand::SeedableRng;
///
/// let mut indices = vec![0, 1, 2, 3, 4];
/// let mut rng = rand::rngs::StdRng::seed_from_u64(0);
/// shuffle_indices(&mut indices, &mut rng);
/// // indices is now shuffled
/// ```
pub fn shuffle_indices<R: Rng>(arr: &mut [usize], rng: &mut R) {
    for i in (1..arr.len()).rev() {
        let j = rng.gen_range(0..=i);
        arr.swap(i, j);
    }
}

/// Sample `k` distinct elements from `candidates` without replacement,
/// returning them in ascending order.
///
/// Uses a partial Fisher-Yates shuffle (only the first `k` swaps are
/// performed) so that sampling a small `k` out of a large candidate set
/// stays `O(k)` rather than shuffling the whole slice. If `k >= candidates.len()`
/// the entire candidate set is returned.
///
/// # Examples
///
/// ```
/// use spatial_pooler::utils::sample_without_replacement;
/// use rand::SeedableRng;
///
/// let mut rng = rand::rngs::StdRng::seed_from_u64(42);
/// let candidates = vec![10, 11, 12, 13, 14];
/// let sample = sample_without_replacement(&candidates, 2, &mut rng);
/// assert_eq!(sample.len(), 2);
/// assert!(sample[0] < sample[1]);
/// ```
pub fn sample_without_replacement<T, R>(candidates: &[T], k: usize, rng: &mut R) -> Vec<T>
where
    T: Copy + Ord,
    R: Rng,
{
    let k = min(k, candidates.len());
    let mut pool: Vec<T> = candidates.to_vec();
    for i in 0..k {
        let j = rng.gen_range(i..pool.len());
        pool.swap(i, j);
    }
    let mut sample: Vec<T> = pool[..k].to_vec();
    sample.sort();
    sample
}

/// Derive a deterministic per-column sub-seed from a master seed.
///
/// A SplitMix64-style mix of `(seed, column)`: cheap, well-distributed, and
/// reversible only in the sense that the same pair always yields the same
/// sub-seed. Intended for a future parallel `connectAndConfigureInputs` path
/// (see DESIGN.md) where each column's `StdRng` must be independent of
/// evaluation order to keep parallel and sequential initialization in
/// agreement; unused by the sequential default path.
///
/// # Examples
///
/// ```
/// use spatial_pooler::utils::sub_seed;
///
/// assert_eq!(sub_seed(42, 0), sub_seed(42, 0));
/// assert_ne!(sub_seed(42, 0), sub_seed(42, 1));
/// ```
#[inline]
pub fn sub_seed(seed: u64, column: usize) -> u64 {
    let mut z = seed
        .wrapping_add(column as u64)
        .wrapping_add(0x9E3779B97F4A7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}
