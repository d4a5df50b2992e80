//! Decoded per-agent routes.

use serde::{Deserialize, Serialize};

/// The path travelled by one agent, decoded from a chromosome segment.
///
/// # Examples
///
/// ```
/// use u_mtsp::models::AgentRoute;
///
/// let route = AgentRoute {
///     agent: 0,
///     start: Some(0),
///     cities: vec![3, 4],
///     depot: Some(9),
///     distance: 12.0,
/// };
/// assert_eq!(route.stops(), vec![0, 3, 4, 9]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentRoute {
    /// Agent index (segment position in the chromosome).
    pub agent: usize,
    /// Fixed origin, if the shape has one.
    pub start: Option<usize>,
    /// Free cities visited, in order.
    pub cities: Vec<usize>,
    /// Terminal depot, if the shape has depots.
    pub depot: Option<usize>,
    /// Distance of this agent's path including origin and depot legs.
    pub distance: f64,
}

impl AgentRoute {
    /// Full stop sequence: origin, cities, then depot.
    pub fn stops(&self) -> Vec<usize> {
        self.start
            .into_iter()
            .chain(self.cities.iter().copied())
            .chain(self.depot)
            .collect()
    }

    /// Number of free cities visited.
    pub fn len(&self) -> usize {
        self.cities.len()
    }

    /// Returns true if the agent visits no free city.
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }
}
