//! Randomised selection primitives.
//!
//! All randomness in the core flows through [`RandomSource`], which every
//! [`rand::RngCore`] implements. Tests can substitute a scripted source to
//! pin down exactly which elements are chosen.

use rand::{Rng, RngCore};

/// Source of uniformly distributed indices.
///
/// # Examples
/// ```
/// use rand::{SeedableRng, rngs::SmallRng};
/// use rewire_core::RandomSource;
///
/// let mut rng = SmallRng::seed_from_u64(7);
/// let index = rng.next_index(10);
/// assert!(index < 10);
/// ```
pub trait RandomSource {
    /// Returns an index drawn uniformly from `0..bound`.
    ///
    /// Callers never pass a `bound` of zero.
    fn next_index(&mut self, bound: usize) -> usize;
}

impl<R: RngCore + ?Sized> RandomSource for R {
    fn next_index(&mut self, bound: usize) -> usize {
        self.gen_range(0..bound)
    }
}

/// Draws `amount` distinct elements from `items` without replacement.
///
/// Returns every element, in random order, when `amount` exceeds the number
/// of items. The input slice is left untouched. Selection runs a partial
/// Fisher-Yates shuffle over a private copy, so each subset of the requested
/// size is equally likely.
///
/// # Examples
/// ```
/// use rand::{SeedableRng, rngs::SmallRng};
/// use rewire_core::sample_without_replacement;
///
/// let mut rng = SmallRng::seed_from_u64(3);
/// let items = [10, 20, 30, 40];
/// let chosen = sample_without_replacement(&mut rng, &items, 2);
/// assert_eq!(chosen.len(), 2);
/// assert_ne!(chosen[0], chosen[1]);
/// assert!(chosen.iter().all(|item| items.contains(item)));
/// ```
pub fn sample_without_replacement<S, T>(source: &mut S, items: &[T], amount: usize) -> Vec<T>
where
    S: RandomSource + ?Sized,
    T: Clone,
{
    let mut pool = items.to_vec();
    let amount = amount.min(pool.len());
    for position in 0..amount {
        let remaining = pool.len() - position;
        let pick = position + source.next_index(remaining);
        pool.swap(position, pick);
    }
    pool.truncate(amount);
    pool
}

/// Shuffles `items` in place with a Fisher-Yates pass.
///
/// # Examples
/// ```
/// use rand::{SeedableRng, rngs::SmallRng};
/// use rewire_core::shuffle;
///
/// let mut rng = SmallRng::seed_from_u64(11);
/// let mut items = vec![1, 2, 3, 4, 5];
/// shuffle(&mut rng, &mut items);
/// items.sort_unstable();
/// assert_eq!(items, vec![1, 2, 3, 4, 5]);
/// ```
pub fn shuffle<S, T>(source: &mut S, items: &mut [T])
where
    S: RandomSource + ?Sized,
{
    for upper in (1..items.len()).rev() {
        let pick = source.next_index(upper + 1);
        items.swap(upper, pick);
    }
}
