//! Problem instance: distance matrix plus traversal shape.

use crate::distance::DistanceMatrix;
use crate::error::MtspError;

use super::{AgentCount, AgentRoute, Chromosome, Shape, Start};

/// A validated open-path salesman problem.
///
/// Owns the distance matrix and derives the city roles (origins, free
/// cities, depot pool) from the [`Shape`]. Read-only after construction.
///
/// # Examples
///
/// ```
/// use u_mtsp::distance::DistanceMatrix;
/// use u_mtsp::models::{Chromosome, MtspProblem, Shape};
///
/// let dm = DistanceMatrix::from_points(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)]);
/// let problem = MtspProblem::new(dm, Shape::fixed_start_path()).unwrap();
/// assert_eq!(problem.free_cities(), &[1, 2, 3]);
///
/// let cost = problem.route_cost(&Chromosome::path(vec![1, 2, 3]));
/// assert!((cost - 3.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct MtspProblem {
    distances: DistanceMatrix,
    shape: Shape,
    free: Vec<usize>,
    depot_pool: Vec<usize>,
}

impl MtspProblem {
    /// Creates a problem, checking the shape against the matrix size.
    ///
    /// Fails with [`MtspError::Configuration`] when the shape is
    /// inconsistent or the free cities cannot give every agent `min_tour`
    /// stops.
    pub fn new(distances: DistanceMatrix, shape: Shape) -> Result<Self, MtspError> {
        if shape.min_tour == 0 {
            return Err(MtspError::config("min_tour must be at least 1"));
        }
        if shape.agents == AgentCount::Fixed(0) {
            return Err(MtspError::config("agent count must be at least 1"));
        }
        if shape.agents == AgentCount::Variable {
            if shape.start == Start::PerAgent {
                return Err(MtspError::config(
                    "per-agent origins require a fixed agent count",
                ));
            }
            if shape.depots {
                return Err(MtspError::config("depots require a fixed agent count"));
            }
        }

        let size = distances.size();
        let reserved = shape.start_count() + shape.depot_count();
        if size <= reserved {
            return Err(MtspError::config(format!(
                "{size} cities leave no free city after {reserved} reserved origins and depots"
            )));
        }

        let free_end = size - shape.depot_count();
        let free: Vec<usize> = (shape.start_count()..free_end).collect();
        let depot_pool: Vec<usize> = (free_end..size).collect();

        let n = free.len();
        match shape.fixed_agent_count() {
            Some(k) if shape.min_tour * k > n => {
                return Err(MtspError::config(format!(
                    "{k} agents with min_tour {} need {} free cities, only {n} available",
                    shape.min_tour,
                    shape.min_tour * k
                )));
            }
            None if shape.min_tour > n => {
                return Err(MtspError::config(format!(
                    "min_tour {} exceeds the {n} free cities",
                    shape.min_tour
                )));
            }
            _ => {}
        }

        Ok(Self {
            distances,
            shape,
            free,
            depot_pool,
        })
    }

    /// Returns the distance matrix.
    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// Returns the traversal shape.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// City ids that every route must visit exactly once.
    pub fn free_cities(&self) -> &[usize] {
        &self.free
    }

    /// City ids available as agent terminals (empty without depots).
    pub fn depot_pool(&self) -> &[usize] {
        &self.depot_pool
    }

    /// Largest agent count a chromosome may carry.
    pub fn max_agents(&self) -> usize {
        self.shape
            .fixed_agent_count()
            .unwrap_or(self.free.len() / self.shape.min_tour)
    }

    /// Total distance travelled by all agents.
    ///
    /// Each segment costs its origin leg (if the shape has origins), the
    /// legs between its cities, and its depot leg (if the shape has depots).
    /// Agents never return to their origin.
    ///
    /// # Panics
    ///
    /// Panics if the chromosome's breakpoints are out of order or past the
    /// end of the route, or if a city id is outside the matrix. Chromosomes
    /// produced by the GA always pass; check foreign ones with
    /// [`validate_chromosome`](Self::validate_chromosome) first.
    pub fn route_cost(&self, chromosome: &Chromosome) -> f64 {
        chromosome
            .segments()
            .enumerate()
            .map(|(agent, segment)| {
                self.segment_cost(agent, segment, chromosome.depots().get(agent).copied())
            })
            .sum()
    }

    fn segment_cost(&self, agent: usize, segment: &[usize], depot: Option<usize>) -> f64 {
        let (Some(&first), Some(&last)) = (segment.first(), segment.last()) else {
            return 0.0;
        };
        let mut cost = self.distances.path_length(segment);
        if let Some(origin) = self.shape.origin(agent) {
            cost += self.distances.get(origin, first);
        }
        if let Some(depot) = depot {
            cost += self.distances.get(last, depot);
        }
        cost
    }

    /// Decodes a chromosome into one [`AgentRoute`] per agent.
    ///
    /// # Panics
    ///
    /// Same conditions as [`route_cost`](Self::route_cost).
    pub fn agent_routes(&self, chromosome: &Chromosome) -> Vec<AgentRoute> {
        chromosome
            .segments()
            .enumerate()
            .map(|(agent, segment)| {
                let depot = chromosome.depots().get(agent).copied();
                AgentRoute {
                    agent,
                    start: self.shape.origin(agent),
                    cities: segment.to_vec(),
                    depot,
                    distance: self.segment_cost(agent, segment, depot),
                }
            })
            .collect()
    }

    /// Checks every structural invariant of a chromosome for this problem.
    ///
    /// - the route is a permutation of [`free_cities`](Self::free_cities)
    /// - the breakpoint count matches the agent count mode, breakpoints are
    ///   strictly increasing, and every segment has at least `min_tour` cities
    /// - the depot assignment is a bijection onto the depot pool
    pub fn validate_chromosome(&self, chromosome: &Chromosome) -> Result<(), MtspError> {
        let route = chromosome.route();
        if route.len() != self.free.len() {
            return Err(MtspError::config(format!(
                "route has {} cities, expected {}",
                route.len(),
                self.free.len()
            )));
        }
        ensure_permutation(route, &self.free, "route")?;

        let breaks = chromosome.breakpoints().len();
        let count_ok = match self.shape.agents {
            AgentCount::Single => breaks == 0,
            AgentCount::Fixed(k) => breaks == k - 1,
            AgentCount::Variable => breaks < self.max_agents(),
        };
        if !count_ok {
            return Err(MtspError::config(format!(
                "{breaks} breakpoints do not match the agent count"
            )));
        }
        let mut begin = 0;
        let ends = chromosome
            .breakpoints()
            .iter()
            .copied()
            .chain(std::iter::once(route.len()));
        for (segment, end) in ends.enumerate() {
            if end < begin + self.shape.min_tour {
                return Err(MtspError::config(format!(
                    "segment {segment} is shorter than min_tour {} or out of order",
                    self.shape.min_tour
                )));
            }
            begin = end;
        }

        let depots = chromosome.depots();
        if self.shape.depots {
            if depots.len() != chromosome.agent_count() {
                return Err(MtspError::config(format!(
                    "{} depots assigned to {} agents",
                    depots.len(),
                    chromosome.agent_count()
                )));
            }
            ensure_permutation(depots, &self.depot_pool, "depot assignment")?;
        } else if !depots.is_empty() {
            return Err(MtspError::config("depot assignment on a shape without depots"));
        }
        Ok(())
    }
}

/// Checks that `values` holds each id of the contiguous block `ids` exactly once.
fn ensure_permutation(values: &[usize], ids: &[usize], what: &str) -> Result<(), MtspError> {
    if values.len() != ids.len() {
        return Err(MtspError::config(format!(
            "{what} has {} entries, expected {}",
            values.len(),
            ids.len()
        )));
    }
    let Some(&lo) = ids.first() else {
        return Ok(());
    };
    let mut seen = vec![false; ids.len()];
    for &v in values {
        match v.checked_sub(lo).filter(|&i| i < seen.len()) {
            Some(i) if !seen[i] => seen[i] = true,
            Some(_) => return Err(MtspError::config(format!("{what} repeats city {v}"))),
            None => return Err(MtspError::config(format!("{what} contains foreign city {v}"))),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Cities on a line at x = 0, 1, 2, ...
    fn line(n: usize) -> DistanceMatrix {
        let points: Vec<(f64, f64)> = (0..n).map(|i| (i as f64, 0.0)).collect();
        DistanceMatrix::from_points(&points)
    }

    #[test]
    fn test_free_cities_per_shape() {
        let p = MtspProblem::new(line(5), Shape::open_path()).expect("valid");
        assert_eq!(p.free_cities(), &[0, 1, 2, 3, 4]);
        assert!(p.depot_pool().is_empty());

        let p = MtspProblem::new(line(5), Shape::variable_agents(2)).expect("valid");
        assert_eq!(p.free_cities(), &[1, 2, 3, 4]);
        assert_eq!(p.max_agents(), 2);

        let p = MtspProblem::new(line(8), Shape::depot_agents(2, 1)).expect("valid");
        assert_eq!(p.free_cities(), &[2, 3, 4, 5]);
        assert_eq!(p.depot_pool(), &[6, 7]);
    }

    #[test]
    fn test_rejects_too_many_agents() {
        let err = MtspProblem::new(line(6), Shape::fixed_agents(3, 2)).unwrap_err();
        assert!(matches!(err, MtspError::Configuration(_)));
        assert!(MtspProblem::new(line(7), Shape::fixed_agents(3, 2)).is_ok());
    }

    #[test]
    fn test_rejects_inconsistent_shapes() {
        assert!(MtspProblem::new(line(5), Shape::fixed_agents(0, 1)).is_err());
        assert!(MtspProblem::new(line(5), Shape::variable_agents(0)).is_err());
        assert!(MtspProblem::new(line(4), Shape::depot_agents(2, 1)).is_err());

        let mut shape = Shape::variable_agents(1);
        shape.depots = true;
        assert!(MtspProblem::new(line(9), shape).is_err());
    }

    #[test]
    fn test_cost_free_start() {
        let p = MtspProblem::new(line(4), Shape::open_path()).expect("valid");
        let cost = p.route_cost(&Chromosome::path(vec![2, 0, 1, 3]));
        // 2→0→1→3 = 2 + 1 + 2
        assert!((cost - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_cost_fixed_start() {
        let p = MtspProblem::new(line(4), Shape::fixed_start_path()).expect("valid");
        let cost = p.route_cost(&Chromosome::path(vec![3, 1, 2]));
        // 0→3→1→2 = 3 + 2 + 1
        assert!((cost - 6.0).abs() < 1e-10);
    }

    #[test]
    fn test_cost_shared_start_segments() {
        let p = MtspProblem::new(line(5), Shape::fixed_agents(2, 1)).expect("valid");
        let c = Chromosome::new(vec![1, 2, 4, 3], vec![2], vec![]);
        // [0→1→2] = 2, [0→4→3] = 4 + 1
        assert!((p.route_cost(&c) - 7.0).abs() < 1e-10);
    }

    #[test]
    fn test_cost_with_depots() {
        // origins 0,1; free 2..6; depots 6,7
        let p = MtspProblem::new(line(8), Shape::depot_agents(2, 1)).expect("valid");
        let c = Chromosome::new(vec![2, 3, 4, 5], vec![1], vec![7, 6]);
        // agent 0: 0→2→7 = 2 + 5
        // agent 1: 1→3→4→5→6 = 2 + 1 + 1 + 1
        assert!((p.route_cost(&c) - 12.0).abs() < 1e-10);
    }

    #[test]
    fn test_cost_asymmetric() {
        let dm = DistanceMatrix::from_data(3, vec![0.0, 1.0, 9.0, 5.0, 0.0, 2.0, 4.0, 7.0, 0.0])
            .expect("valid");
        let p = MtspProblem::new(dm, Shape::fixed_start_path()).expect("valid");
        assert!((p.route_cost(&Chromosome::path(vec![1, 2])) - 3.0).abs() < 1e-10);
        assert!((p.route_cost(&Chromosome::path(vec![2, 1])) - 16.0).abs() < 1e-10);
    }

    #[test]
    fn test_agent_routes() {
        let p = MtspProblem::new(line(8), Shape::depot_agents(2, 1)).expect("valid");
        let c = Chromosome::new(vec![2, 3, 4, 5], vec![1], vec![7, 6]);
        let routes = p.agent_routes(&c);
        assert_eq!(routes.len(), 2);
        assert_eq!(routes[0].start, Some(0));
        assert_eq!(routes[0].cities, vec![2]);
        assert_eq!(routes[0].depot, Some(7));
        assert_eq!(routes[1].stops(), vec![1, 3, 4, 5, 6]);
        let total: f64 = routes.iter().map(|r| r.distance).sum();
        assert!((total - p.route_cost(&c)).abs() < 1e-10);
    }

    fn unordered_breakpoints() -> (MtspProblem, Chromosome) {
        let p = MtspProblem::new(line(7), Shape::fixed_agents(3, 1)).expect("valid");
        let c = Chromosome::new(vec![1, 2, 3, 4, 5, 6], vec![4, 2], Vec::new());
        (p, c)
    }

    #[test]
    fn test_validate_flags_unordered_breakpoints() {
        let (p, c) = unordered_breakpoints();
        assert!(p.validate_chromosome(&c).is_err());
    }

    #[test]
    #[should_panic]
    fn test_cost_panics_on_unordered_breakpoints() {
        let (p, c) = unordered_breakpoints();
        p.route_cost(&c);
    }

    #[test]
    fn test_validate_accepts_valid() {
        let p = MtspProblem::new(line(8), Shape::depot_agents(2, 1)).expect("valid");
        let c = Chromosome::new(vec![5, 3, 2, 4], vec![3], vec![6, 7]);
        assert!(p.validate_chromosome(&c).is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_route() {
        let p = MtspProblem::new(line(5), Shape::fixed_start_path()).expect("valid");
        assert!(p.validate_chromosome(&Chromosome::path(vec![1, 2, 3])).is_err());
        assert!(p.validate_chromosome(&Chromosome::path(vec![1, 2, 3, 3])).is_err());
        assert!(p.validate_chromosome(&Chromosome::path(vec![0, 1, 2, 3])).is_err());
        assert!(p.validate_chromosome(&Chromosome::path(vec![4, 1, 2, 3])).is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_breakpoints() {
        let p = MtspProblem::new(line(10), Shape::fixed_agents(3, 3)).expect("valid");
        let route: Vec<usize> = (1..10).collect();
        assert!(p
            .validate_chromosome(&Chromosome::new(route.clone(), vec![3, 6], vec![]))
            .is_ok());
        assert!(p
            .validate_chromosome(&Chromosome::new(route.clone(), vec![3], vec![]))
            .is_err());
        assert!(p
            .validate_chromosome(&Chromosome::new(route.clone(), vec![2, 6], vec![]))
            .is_err());
        assert!(p
            .validate_chromosome(&Chromosome::new(route, vec![6, 3], vec![]))
            .is_err());
    }

    #[test]
    fn test_validate_variable_breakpoints() {
        let p = MtspProblem::new(line(7), Shape::variable_agents(2)).expect("valid");
        let route: Vec<usize> = (1..7).collect();
        for breaks in [vec![], vec![3], vec![2, 4]] {
            let c = Chromosome::new(route.clone(), breaks, vec![]);
            assert!(p.validate_chromosome(&c).is_ok());
        }
        let c = Chromosome::new(route, vec![1, 2, 3], vec![]);
        assert!(p.validate_chromosome(&c).is_err());
    }

    #[test]
    fn test_validate_rejects_bad_depots() {
        let p = MtspProblem::new(line(8), Shape::depot_agents(2, 1)).expect("valid");
        let route = vec![2, 3, 4, 5];
        for depots in [vec![6, 6], vec![6], vec![5, 7], vec![]] {
            let c = Chromosome::new(route.clone(), vec![2], depots);
            assert!(p.validate_chromosome(&c).is_err());
        }
    }
}
