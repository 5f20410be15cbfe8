//! Route planning. Two routes are planned for every request: one using the
//! physical length of each road, and one after simulated congestion has
//! been applied to the network.

pub mod astar;
pub mod congestion;
pub mod heuristic;
pub mod planner;
pub mod structs;

#[cfg(test)]
pub(crate) mod fixtures;
