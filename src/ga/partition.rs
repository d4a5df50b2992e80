//! Constrained random partition of a route into agent segments.
//!
//! # Algorithm
//!
//! To cut `n` positions into `k` segments of at least `min_tour` each, every
//! segment first receives `min_tour` positions, leaving a slack of
//! `n - k·min_tour`. The number of slack units `j` handed to the `k - 1`
//! internal gaps is drawn from the stars-and-bars weights (obtained by
//! `k - 2` repeated prefix sums of a vector of ones, each pass rescaled so its
//! largest entry is 1), each of those `j` units
//! is dropped into a uniformly chosen gap, and the final segment absorbs
//! whatever slack remains.
//!
//! With `min_tour == 1` the constraint is vacuous and the breakpoints are a
//! uniformly random `(k - 1)`-subset of the interior positions.
//!
//! # Complexity
//!
//! O(k · slack) time for the weight table, O(k + slack) space.

use rand::seq::index;
use rand::Rng;

use crate::error::MtspError;

/// Draws `agents - 1` breakpoints cutting `positions` route slots into
/// `agents` segments of at least `min_tour` slots each.
///
/// Breakpoints are segment start positions: strictly increasing, each in
/// `min_tour..=positions - min_tour`.
///
/// Fails with [`MtspError::InfeasibleConstraint`] when
/// `min_tour · agents > positions`, or when `agents` or `min_tour` is zero.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use u_mtsp::ga::random_breakpoints;
///
/// let mut rng = rand::rngs::StdRng::seed_from_u64(7);
/// // Zero slack leaves exactly one valid partition.
/// let breaks = random_breakpoints(9, 3, 3, &mut rng).unwrap();
/// assert_eq!(breaks, vec![3, 6]);
/// ```
pub fn random_breakpoints<R: Rng>(
    positions: usize,
    agents: usize,
    min_tour: usize,
    rng: &mut R,
) -> Result<Vec<usize>, MtspError> {
    if agents == 0 || min_tour == 0 || min_tour * agents > positions {
        return Err(MtspError::InfeasibleConstraint {
            positions,
            agents,
            min_tour,
        });
    }

    let gaps = agents - 1;
    if gaps == 0 {
        return Ok(Vec::new());
    }

    if min_tour == 1 {
        let mut breaks: Vec<usize> = index::sample(rng, positions - 1, gaps)
            .into_iter()
            .map(|p| p + 1)
            .collect();
        breaks.sort_unstable();
        return Ok(breaks);
    }

    let slack = positions - min_tour * agents;
    let spread = draw_spread(slack, gaps, rng);

    let mut adjust = vec![0usize; gaps];
    for _ in 0..spread {
        adjust[rng.random_range(0..gaps)] += 1;
    }

    let mut extra = 0;
    Ok(adjust
        .iter()
        .enumerate()
        .map(|(gap, &a)| {
            extra += a;
            min_tour * (gap + 1) + extra
        })
        .collect())
}

/// Draws how many of the `slack` units go to the internal gaps.
fn draw_spread<R: Rng>(slack: usize, gaps: usize, rng: &mut R) -> usize {
    let weights = spread_weights(slack, gaps);
    let total: f64 = weights.iter().sum();
    let u = rng.random::<f64>() * total;

    let mut cumulative = 0.0;
    for (spread, w) in weights.iter().enumerate() {
        cumulative += w;
        if u < cumulative {
            return spread;
        }
    }
    // Rounding can leave `u` at the very top of the range.
    weights.iter().rposition(|&w| w > 0.0).unwrap_or(slack)
}

/// Relative weight of handing `j` slack units to the gaps, for
/// `j = 0..=slack`.
///
/// Proportional to the stars-and-bars count `C(j + gaps - 1, gaps - 1)`.
/// Each prefix-sum pass is divided by its last (largest) entry, so the
/// weights stay in `[0, 1]` however large the counts get.
fn spread_weights(slack: usize, gaps: usize) -> Vec<f64> {
    let mut weights = vec![1.0; slack + 1];
    for _ in 1..gaps {
        let mut acc = 0.0;
        for w in weights.iter_mut() {
            acc += *w;
            *w = acc;
        }
        for w in weights.iter_mut() {
            *w /= acc;
        }
    }
    weights
}
