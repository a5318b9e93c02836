//! Pure board and ship logic for Orbitfall.
//!
//! This crate contains the spatial board graph and the ship status deriver.
//! Functions take plain data snapshots and return results, so the turn
//! engine, bots, and presentation code can all call them without sharing
//! any state.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`board`] | Orbit rings, positions, board layout generation and validation |
//! | [`graph`] | Ring adjacency, BFS distance, range and path queries |
//! | [`objects`] | Space objects on the board (hazards, hostiles, stations, ...) |
//! | [`sections`] | The six ship sections, section-indexed maps, config table |
//! | [`ship`] | Raw ship and section state, name-keyed record boundary |
//! | [`ship_systems`] | Derived power, life support, damage and wreck status |

pub mod board;
pub mod graph;
pub mod objects;
pub mod sections;
pub mod ship;
pub mod ship_systems;
