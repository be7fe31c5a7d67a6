//! Valve-opening routes through a tunnel network.
//!
//! Only valves with a positive flow rate are worth visiting, so the tunnel
//! graph is collapsed into a cost table between those valves (plus the start)
//! holding the minutes needed to walk over and open the destination.

use std::collections::{HashMap, VecDeque};
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;
use tracing::{debug, trace};

use super::claim_set::ClaimSet;
use crate::engines::memo::{DpCache, DpProblem};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("line does not describe a valve: {0:?}")]
    Malformed(String),
    #[error("valve {0} is defined twice")]
    DuplicateValve(String),
    #[error("a tunnel leads to unknown valve {0}")]
    UnknownValve(String),
    #[error("start valve {0} is not defined")]
    MissingStart(String),
    #[error("{0} valves have a positive flow rate, at most 64 are supported")]
    TooManyValves(usize),
    #[error("route search supports one or two agents, got {0}")]
    UnsupportedAgents(u8),
}

fn valve_regex() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"Valve (\w+) has flow rate=(\d+); tunnels? leads? to valves? ([ ,\w]+)")
            .unwrap()
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Valve {
    pub name: String,
    pub rate: u32,
    pub tunnels: Vec<String>,
}

impl FromStr for Valve {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || RouteError::Malformed(s.to_string());
        let caps = valve_regex().captures(s).ok_or_else(malformed)?;

        let rate = caps[2].parse().map_err(|_| malformed())?;
        let tunnels = caps[3]
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Self {
            name: caps[1].to_string(),
            rate,
            tunnels,
        })
    }
}

pub fn parse_valves<'a, I>(lines: I) -> Result<Vec<Valve>, RouteError>
where
    I: IntoIterator<Item = &'a str>,
{
    lines
        .into_iter()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::parse)
        .collect()
}

/// Breadth-first hop counts from `from` over an adjacency list.
fn hop_counts(adjacency: &[Vec<usize>], from: usize) -> Vec<Option<u32>> {
    let mut hops = vec![None; adjacency.len()];
    hops[from] = Some(0);
    let mut queue = VecDeque::from([from]);

    while let Some(node) = queue.pop_front() {
        let Some(here) = hops[node] else { continue };
        for &next in &adjacency[node] {
            if hops[next].is_none() {
                hops[next] = Some(here + 1);
                queue.push_back(next);
            }
        }
    }
    hops
}

#[derive(Debug, Clone)]
pub struct RouteNetwork {
    names: Vec<String>,
    rates: Vec<u32>,
    /// `costs[from][to]`; the last row is the start node
    costs: Vec<Vec<Option<u32>>>,
}

impl RouteNetwork {
    pub const START: &'static str = "AA";

    pub fn parse<'a, I>(lines: I, start: &str) -> Result<Self, RouteError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        Self::from_valves(&parse_valves(lines)?, start)
    }

    pub fn from_valves(valves: &[Valve], start: &str) -> Result<Self, RouteError> {
        let mut index = HashMap::with_capacity(valves.len());
        for (i, valve) in valves.iter().enumerate() {
            if index.insert(valve.name.as_str(), i).is_some() {
                return Err(RouteError::DuplicateValve(valve.name.clone()));
            }
        }

        let adjacency = valves
            .iter()
            .map(|valve| {
                valve
                    .tunnels
                    .iter()
                    .map(|name| {
                        index
                            .get(name.as_str())
                            .copied()
                            .ok_or_else(|| RouteError::UnknownValve(name.clone()))
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        let start = *index
            .get(start)
            .ok_or_else(|| RouteError::MissingStart(start.to_string()))?;

        let flowing: Vec<usize> = (0..valves.len()).filter(|&i| valves[i].rate > 0).collect();
        if flowing.len() > ClaimSet::CAPACITY {
            return Err(RouteError::TooManyValves(flowing.len()));
        }

        let costs: Vec<Vec<Option<u32>>> = flowing
            .iter()
            .chain(std::iter::once(&start))
            .map(|&from| {
                let hops = hop_counts(&adjacency, from);
                flowing.iter().map(|&to| hops[to].map(|h| h + 1)).collect::<Vec<_>>()
            })
            .collect();

        debug!(valves = valves.len(), flowing = flowing.len(), "route network built");
        Ok(Self {
            names: flowing.iter().map(|&i| valves[i].name.clone()).collect(),
            rates: flowing.iter().map(|&i| valves[i].rate).collect(),
            costs,
        })
    }

    /// Number of claimable (positive-rate) valves
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Claimable valves as `(name, rate)`, indexed by claim id
    pub fn valves(&self) -> impl Iterator<Item = (&str, u32)> {
        self.names.iter().map(String::as_str).zip(self.rates.iter().copied())
    }

    /// Minutes to walk from claim id `from` (or the start when `None`) and open `to`
    pub fn open_cost(&self, from: Option<usize>, to: usize) -> Option<u32> {
        let row = from.unwrap_or(self.rates.len());
        self.costs.get(row)?.get(to).copied().flatten()
    }

    /// Most pressure released within `minutes` by one or two agents.
    pub fn best_release(&self, minutes: u32, agents: u8) -> Result<u32, RouteError> {
        match agents {
            1 => Ok(self.best_solo(minutes, ClaimSet::EMPTY)),
            2 => Ok(self.best_paired(minutes)),
            n => Err(RouteError::UnsupportedAgents(n)),
        }
    }

    /// Best single-agent release never opening a valve in `excluded`.
    pub fn best_solo(&self, minutes: u32, excluded: ClaimSet) -> u32 {
        let mut best = 0;
        self.walk(minutes, excluded, |released, _| best = best.max(released));
        best
    }

    /// Every partial route of the first agent, the empty one included, is
    /// completed by the best route of the second agent over what is left.
    fn best_paired(&self, minutes: u32) -> u32 {
        let memo: DpCache<ClaimSet, u32, _> = DpCache::new(SoloRoute {
            network: self,
            minutes,
        });

        let mut best = 0;
        self.walk(minutes, ClaimSet::EMPTY, |released, claimed| {
            let total = released + memo.get(&claimed);
            if total > best {
                trace!(total, ?claimed, "new best pair");
                best = total;
            }
        });

        let (hits, misses) = memo.stats();
        debug!(minutes, best, hits, misses, "paired route search finished");
        best
    }

    /// Depth-first enumeration of routes, calling `visit(released, claimed)`
    /// for each partial route.
    fn walk<F>(&self, minutes: u32, excluded: ClaimSet, mut visit: F)
    where
        F: FnMut(u32, ClaimSet),
    {
        let start = self.rates.len();
        let mut stack = vec![(start, minutes, 0u32, ClaimSet::EMPTY)];

        while let Some((node, remaining, released, claimed)) = stack.pop() {
            visit(released, claimed);

            for (valve, &rate) in self.rates.iter().enumerate() {
                if claimed.contains(valve) || excluded.contains(valve) {
                    continue;
                }
                let Some(cost) = self.costs[node][valve] else {
                    continue;
                };
                if cost >= remaining {
                    continue;
                }
                let left = remaining - cost;
                stack.push((valve, left, released + left * rate, claimed.with(valve)));
            }
        }
    }
}

/// Best solo release of the second agent given the first agent's claims
struct SoloRoute<'a> {
    network: &'a RouteNetwork,
    minutes: u32,
}

impl DpProblem<ClaimSet, u32> for SoloRoute<'_> {
    fn compute(&self, claimed: &ClaimSet) -> u32 {
        self.network.best_solo(self.minutes, *claimed)
    }
}
