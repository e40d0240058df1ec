// crates/lightbox-core/src/order.rs
//
// Traversal-order generators. Each returns a permutation of [0, n) — an
// ordered Vec of distinct collection indices. Generators never look at which
// entry is current; repositioning the cursor after a regeneration is the
// NavCursor's job.

use rand::seq::SliceRandom;
use rand::Rng;

/// Maximum distance (in either direction) a single local-shuffle swap may
/// move an entry. Small enough that a date-ordered photo set keeps its rough
/// chronology, large enough that the next image is rarely the literal next file.
pub const LOCAL_SHUFFLE_WINDOW: i64 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavMode {
    /// Collection order (lexicographic for directory input).
    #[default]
    Sequential,
    /// Uniform random permutation, stepped like any other order.
    Random,
    /// Mostly-sequential with position-local transpositions.
    LocalShuffle,
}

impl NavMode {
    pub fn generate(self, n: usize, rng: &mut impl Rng) -> Vec<usize> {
        match self {
            NavMode::Sequential => sequential(n),
            NavMode::Random => random(n, rng),
            NavMode::LocalShuffle => local_shuffle(n, rng),
        }
    }
}

/// Identity permutation `[0, 1, ..., n-1]`.
pub fn sequential(n: usize) -> Vec<usize> {
    (0..n).collect()
}

/// Uniform random permutation. Fisher–Yates via `SliceRandom::shuffle` —
/// every permutation equally likely, no long-run bias toward recent images.
pub fn random(n: usize, rng: &mut impl Rng) -> Vec<usize> {
    let mut order = sequential(n);
    order.shuffle(rng);
    order
}

/// Locally-shuffled permutation: one left-to-right pass over the identity,
/// swapping each position with a uniformly-picked offset in
/// `[-LOCAL_SHUFFLE_WINDOW, +LOCAL_SHUFFLE_WINDOW]`, clamped into bounds.
///
/// This is deliberately NOT a uniform shuffle: it trades statistical quality
/// for locality, so approximately-chronological sets stay approximately
/// chronological. The boundary clamp biases the first and last ~20 entries
/// toward less disturbance; downstream expectations rely on that, so it is
/// preserved rather than corrected.
pub fn local_shuffle(n: usize, rng: &mut impl Rng) -> Vec<usize> {
    let mut order = sequential(n);
    if n < 2 {
        return order;
    }
    let last = (n - 1) as i64;
    for i in 0..n {
        let offset = rng.gen_range(-LOCAL_SHUFFLE_WINDOW..=LOCAL_SHUFFLE_WINDOW);
        let target = (i as i64 + offset).clamp(0, last) as usize;
        order.swap(i, target);
    }
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn is_permutation(order: &[usize], n: usize) -> bool {
        let mut seen = vec![false; n];
        if order.len() != n {
            return false;
        }
        for &i in order {
            if i >= n || seen[i] {
                return false;
            }
            seen[i] = true;
        }
        true
    }

    #[test]
    fn sequential_is_identity() {
        assert_eq!(sequential(4), vec![0, 1, 2, 3]);
        assert_eq!(sequential(0), Vec::<usize>::new());
    }

    #[test]
    fn random_is_a_bijection_for_all_small_n() {
        let mut rng = StdRng::seed_from_u64(7);
        for n in 0..64 {
            assert!(is_permutation(&random(n, &mut rng), n), "n={n}");
        }
    }

    #[test]
    fn local_shuffle_is_a_bijection_for_all_small_n() {
        let mut rng = StdRng::seed_from_u64(7);
        for n in 0..64 {
            assert!(is_permutation(&local_shuffle(n, &mut rng), n), "n={n}");
        }
        assert!(is_permutation(&local_shuffle(500, &mut rng), 500));
    }

    #[test]
    fn local_shuffle_displacement_is_bounded_by_chained_swaps() {
        // Chained swaps can carry an element arbitrarily far FORWARD (swapped
        // ahead at pass i, swapped ahead again when the pass counter catches
        // up), but backward movement happens at most once: a backward landing
        // puts the element behind the pass counter, after which only forward
        // pulls can touch it. So the occupant of final position `pos` has an
        // original index of at most `pos + 20`.
        let mut rng = StdRng::seed_from_u64(42);
        let n = 300;
        let order = local_shuffle(n, &mut rng);
        for (pos, &elem) in order.iter().enumerate() {
            assert!(
                (elem as i64) <= pos as i64 + LOCAL_SHUFFLE_WINDOW,
                "element {elem} landed too far backward at position {pos}"
            );
        }
    }

    #[test]
    fn singleton_orders_are_trivial() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(random(1, &mut rng), vec![0]);
        assert_eq!(local_shuffle(1, &mut rng), vec![0]);
    }
}
