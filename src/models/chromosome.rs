//! Chromosome encoding for open-path salesman problems.
//!
//! A chromosome is a permutation of the free city ids, optionally cut into
//! per-agent segments by breakpoints and optionally carrying one depot per
//! segment.

use serde::{Deserialize, Serialize};

/// One candidate solution.
///
/// `breakpoints` holds the route positions where a new agent's segment
/// begins, so `[3, 6]` over a 9-city route yields segments `0..3`, `3..6`
/// and `6..9`. Its length varies per chromosome when the agent count is
/// variable. `depots[s]` is the terminal city of segment `s`.
///
/// # Examples
///
/// ```
/// use u_mtsp::models::Chromosome;
///
/// let c = Chromosome::new(vec![4, 5, 6, 7, 8], vec![2], vec![]);
/// let segments: Vec<&[usize]> = c.segments().collect();
/// assert_eq!(segments, vec![&[4, 5][..], &[6, 7, 8][..]]);
/// assert_eq!(c.agent_count(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chromosome {
    route: Vec<usize>,
    breakpoints: Vec<usize>,
    depots: Vec<usize>,
}

impl Chromosome {
    /// Creates a chromosome from its three parts.
    pub fn new(route: Vec<usize>, breakpoints: Vec<usize>, depots: Vec<usize>) -> Self {
        Self {
            route,
            breakpoints,
            depots,
        }
    }

    /// Creates a single-agent chromosome with no breakpoints or depots.
    pub fn path(route: Vec<usize>) -> Self {
        Self::new(route, Vec::new(), Vec::new())
    }

    /// Returns the city permutation.
    pub fn route(&self) -> &[usize] {
        &self.route
    }

    /// Returns a mutable view of the city permutation.
    pub fn route_mut(&mut self) -> &mut [usize] {
        &mut self.route
    }

    /// Returns the segment start positions (excluding 0).
    pub fn breakpoints(&self) -> &[usize] {
        &self.breakpoints
    }

    /// Replaces the breakpoints.
    pub fn set_breakpoints(&mut self, breakpoints: Vec<usize>) {
        self.breakpoints = breakpoints;
    }

    /// Returns the depot assigned to each segment.
    pub fn depots(&self) -> &[usize] {
        &self.depots
    }

    /// Replaces the depot assignment.
    pub fn set_depots(&mut self, depots: Vec<usize>) {
        self.depots = depots;
    }

    /// Number of agents encoded (segments in the route).
    pub fn agent_count(&self) -> usize {
        self.breakpoints.len() + 1
    }

    /// Number of cities in the route.
    pub fn len(&self) -> usize {
        self.route.len()
    }

    /// Returns true if the route is empty.
    pub fn is_empty(&self) -> bool {
        self.route.is_empty()
    }

    /// Iterates over the per-agent route segments in order.
    pub fn segments(&self) -> impl Iterator<Item = &[usize]> + '_ {
        let route = &self.route;
        let mut begin = 0;
        self.breakpoints
            .iter()
            .copied()
            .chain(std::iter::once(route.len()))
            .map(move |end| {
                let segment = &route[begin..end];
                begin = end;
                segment
            })
    }
}
