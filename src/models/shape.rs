//! Traversal shape: the capability set that selects a problem variant.

use serde::{Deserialize, Serialize};

/// Where each agent's path begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Start {
    /// No fixed origin; the path begins at its first route city.
    Free,
    /// Every agent leaves from city 0.
    Shared,
    /// Agent `s` leaves from city `s`.
    PerAgent,
}

/// How many agents split the route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgentCount {
    /// One agent, no breakpoints.
    Single,
    /// Exactly `k` agents, `k - 1` breakpoints on every chromosome.
    Fixed(usize),
    /// Each chromosome carries its own agent count in `1..=max_agents`.
    Variable,
}

/// Traversal shape of an open-path salesman problem.
///
/// The engine is generic over this capability set; the named constructors
/// cover the common variants.
///
/// # City layout
///
/// City ids are split into three contiguous blocks: fixed origins first
/// (none, city 0, or cities `0..k`), then free cities, then the depot pool
/// (the last `k` ids when depots are enabled).
///
/// # Examples
///
/// ```
/// use u_mtsp::models::Shape;
///
/// assert_eq!(Shape::open_path().group_size(), 4);
/// assert_eq!(Shape::fixed_agents(3, 2).group_size(), 8);
/// assert_eq!(Shape::depot_agents(3, 2).group_size(), 16);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shape {
    /// Origin kind.
    pub start: Start,
    /// Agent count mode.
    pub agents: AgentCount,
    /// Whether each agent's path ends at a depot drawn from the pool.
    pub depots: bool,
    /// Minimum number of free cities per agent.
    pub min_tour: usize,
}

impl Shape {
    /// Single agent, free start: the path may begin at any city.
    pub fn open_path() -> Self {
        Self {
            start: Start::Free,
            agents: AgentCount::Single,
            depots: false,
            min_tour: 1,
        }
    }

    /// Single agent leaving from city 0.
    pub fn fixed_start_path() -> Self {
        Self {
            start: Start::Shared,
            ..Self::open_path()
        }
    }

    /// `agents` salesmen all leaving from city 0.
    pub fn fixed_agents(agents: usize, min_tour: usize) -> Self {
        Self {
            start: Start::Shared,
            agents: AgentCount::Fixed(agents),
            depots: false,
            min_tour,
        }
    }

    /// A variable number of salesmen all leaving from city 0.
    pub fn variable_agents(min_tour: usize) -> Self {
        Self {
            start: Start::Shared,
            agents: AgentCount::Variable,
            depots: false,
            min_tour,
        }
    }

    /// `agents` salesmen, each with its own origin and a depot chosen
    /// from a pool of the same size.
    pub fn depot_agents(agents: usize, min_tour: usize) -> Self {
        Self {
            start: Start::PerAgent,
            agents: AgentCount::Fixed(agents),
            depots: true,
            min_tour,
        }
    }

    /// Whether chromosomes carry breakpoints.
    pub fn has_breakpoints(&self) -> bool {
        !matches!(self.agents, AgentCount::Single)
    }

    /// Whether chromosomes carry a depot assignment.
    pub fn has_depots(&self) -> bool {
        self.depots
    }

    /// Tournament group size: one slot per combination of route mutation,
    /// breakpoint regeneration and depot regeneration.
    pub fn group_size(&self) -> usize {
        let mut size = 4;
        if self.has_breakpoints() {
            size *= 2;
        }
        if self.has_depots() {
            size *= 2;
        }
        size
    }

    /// The fixed agent count, if any.
    pub fn fixed_agent_count(&self) -> Option<usize> {
        match self.agents {
            AgentCount::Single => Some(1),
            AgentCount::Fixed(k) => Some(k),
            AgentCount::Variable => None,
        }
    }

    /// Number of leading city ids reserved as origins.
    pub fn start_count(&self) -> usize {
        match self.start {
            Start::Free => 0,
            Start::Shared => 1,
            Start::PerAgent => self.fixed_agent_count().unwrap_or(0),
        }
    }

    /// Number of trailing city ids reserved as the depot pool.
    pub fn depot_count(&self) -> usize {
        if self.depots {
            self.fixed_agent_count().unwrap_or(0)
        } else {
            0
        }
    }

    /// Origin city of agent `agent`, if the shape has one.
    pub fn origin(&self, agent: usize) -> Option<usize> {
        match self.start {
            Start::Free => None,
            Start::Shared => Some(0),
            Start::PerAgent => Some(agent),
        }
    }
}
