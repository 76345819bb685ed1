//! Signal Simulation Library
//!
//! An adaptive traffic-signal simulation for a single four-way intersection.

pub mod simulation;
