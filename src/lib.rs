//! Evolutionary circuit-board layout optimization.
//!
//! Evolves a population of candidate layouts toward one that minimizes
//! geometric conflicts and wire length while keeping every net connected.
//!
//! - **[`ga`]**: Generic parallel generational engine over any individual
//!   implementing [`ga::GeneticOperators`].
//! - **[`layout`]**: Genome (nodes, wires, nets, components), placement,
//!   derived collision geometry, and net connectivity.
//! - **[`pcb`]**: Layout evaluator, crossover, and mutations wired into
//!   the engine.
//! - **[`geometry`]**: Points, polygons, rotation, and clearance queries.
//!
//! # Architecture
//!
//! The engine knows nothing about boards; it only drives the operator
//! contract. Everything board-specific lives in `layout` and `pcb`.

pub mod error;
pub mod ga;
pub mod geometry;
pub mod layout;
pub mod pcb;

pub use error::{Error, Result};
