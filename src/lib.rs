//! Waypoint - Step Navigation and Progress Engine
//!
//! Orchestrates a user's progress through an ordered, possibly-branching
//! sequence of data-collection steps: which step is current, which steps
//! are reachable, how much progress exists, and how the sequence advances
//! or rewinds as data is supplied, skipped, or edited after the fact.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
