//! Structural mutation operators.
//!
//! Route mutations act on an inclusive position range `[i, j]` shared by a
//! whole tournament group. Depot regeneration draws a fresh permutation of
//! the depot pool.
//!
//! - [`RouteMutation::Flip`]: reverse `route[i..=j]` (2-opt move) — O(j - i)
//! - [`RouteMutation::Swap`]: exchange `route[i]` and `route[j]` — O(1)
//! - [`RouteMutation::Slide`]: rotate `route[i..=j]` left by one, so the
//!   head element moves to position `j` — O(j - i)

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A route-structure mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RouteMutation {
    /// Leave the route unchanged.
    Identity,
    /// Reverse the subrange.
    Flip,
    /// Exchange the endpoints of the subrange.
    Swap,
    /// Rotate the subrange left by one position.
    Slide,
}

impl RouteMutation {
    /// All mutations in slot order.
    pub const ALL: [RouteMutation; 4] = [
        RouteMutation::Identity,
        RouteMutation::Flip,
        RouteMutation::Swap,
        RouteMutation::Slide,
    ];

    /// Applies this mutation to `route` over the inclusive range `[i, j]`.
    ///
    /// Ranges with `i >= j` leave the route unchanged.
    ///
    /// # Panics
    ///
    /// Panics if `j` is out of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_mtsp::ga::RouteMutation;
    ///
    /// let mut route = vec![1, 2, 3, 4, 5];
    /// RouteMutation::Slide.apply(&mut route, 1, 3);
    /// assert_eq!(route, vec![1, 3, 4, 2, 5]);
    /// ```
    pub fn apply(self, route: &mut [usize], i: usize, j: usize) {
        if i >= j {
            return;
        }
        match self {
            RouteMutation::Identity => {}
            RouteMutation::Flip => route[i..=j].reverse(),
            RouteMutation::Swap => route.swap(i, j),
            RouteMutation::Slide => route[i..=j].rotate_left(1),
        }
    }
}

/// Draws two distinct positions `i < j` in `0..len`.
///
/// Returns `(0, 0)` for routes shorter than two, which makes every route
/// mutation a no-op.
pub fn random_range_pair<R: Rng>(len: usize, rng: &mut R) -> (usize, usize) {
    if len < 2 {
        return (0, 0);
    }
    let a = rng.random_range(0..len);
    let mut b = rng.random_range(0..len - 1);
    if b >= a {
        b += 1;
    }
    (a.min(b), a.max(b))
}

/// Returns a uniformly random permutation of the depot pool.
pub fn random_depots<R: Rng>(pool: &[usize], rng: &mut R) -> Vec<usize> {
    let mut depots = pool.to_vec();
    depots.shuffle(rng);
    depots
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_identity() {
        let mut route = vec![1, 2, 3, 4];
        RouteMutation::Identity.apply(&mut route, 0, 3);
        assert_eq!(route, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_flip() {
        let mut route = vec![1, 2, 3, 4, 5];
        RouteMutation::Flip.apply(&mut route, 1, 3);
        assert_eq!(route, vec![1, 4, 3, 2, 5]);
    }

    #[test]
    fn test_swap() {
        let mut route = vec![1, 2, 3, 4, 5];
        RouteMutation::Swap.apply(&mut route, 0, 4);
        assert_eq!(route, vec![5, 2, 3, 4, 1]);
    }

    #[test]
    fn test_slide_full_range() {
        let mut route = vec![1, 2, 3, 4];
        RouteMutation::Slide.apply(&mut route, 0, 3);
        assert_eq!(route, vec![2, 3, 4, 1]);
    }

    #[test]
    fn test_adjacent_pair_flip_equals_swap() {
        let mut a = vec![1, 2, 3];
        let mut b = a.clone();
        RouteMutation::Flip.apply(&mut a, 1, 2);
        RouteMutation::Swap.apply(&mut b, 1, 2);
        assert_eq!(a, b);
    }

    #[test]
    fn test_degenerate_range_is_noop() {
        let mut route = vec![7];
        for m in RouteMutation::ALL {
            m.apply(&mut route, 0, 0);
        }
        assert_eq!(route, vec![7]);
    }

    #[test]
    fn test_random_range_pair() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let (i, j) = random_range_pair(5, &mut rng);
            assert!(i < j && j < 5);
        }
        assert_eq!(random_range_pair(1, &mut rng), (0, 0));
        assert_eq!(random_range_pair(0, &mut rng), (0, 0));
    }

    #[test]
    fn test_random_depots_is_permutation() {
        let mut rng = StdRng::seed_from_u64(12);
        let mut depots = random_depots(&[7, 8, 9], &mut rng);
        depots.sort_unstable();
        assert_eq!(depots, vec![7, 8, 9]);
    }
}
