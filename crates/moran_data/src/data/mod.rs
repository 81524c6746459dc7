//! Core data structures for the Moran simulation.

pub mod action;
pub mod population;
