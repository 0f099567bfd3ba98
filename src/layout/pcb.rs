//! A genome paired with its cached geometry.

use super::genome::Genome;
use super::geometry::Geometry;
use crate::error::Result;

/// A candidate board: the genome plus, once grown, its geometry.
///
/// Mutable access to the genome goes through [`genome_mut`](Pcb::genome_mut),
/// which discards the cached geometry, so a present geometry always matches
/// the genome it was grown from.
#[derive(Debug, Clone)]
pub struct Pcb {
    genome: Genome,
    geometry: Option<Geometry>,
}

impl Pcb {
    /// Wraps a genome without checking it.
    pub fn new(genome: Genome) -> Self {
        Self {
            genome,
            geometry: None,
        }
    }

    /// Wraps a genome supplied from outside, sorting its edges and checking
    /// the layout invariants.
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidGenome`] if the genome is malformed.
    pub fn try_new(mut genome: Genome) -> Result<Self> {
        genome.sort_edges();
        genome.validate()?;
        Ok(Self::new(genome))
    }

    pub fn genome(&self) -> &Genome {
        &self.genome
    }

    /// Mutable genome access. Invalidates the geometry.
    pub fn genome_mut(&mut self) -> &mut Genome {
        self.geometry = None;
        &mut self.genome
    }

    pub fn into_genome(self) -> Genome {
        self.genome
    }

    /// The geometry, if grown since the last genome change.
    pub fn geometry(&self) -> Option<&Geometry> {
        self.geometry.as_ref()
    }

    /// Recomputes the geometry from the current genome.
    pub fn grow(&mut self, node_size: f64, edge_size: f64) {
        self.geometry = Some(self.genome.compute_geometry(node_size, edge_size));
    }

    pub fn is_grown(&self) -> bool {
        self.geometry.is_some()
    }
}

impl From<Genome> for Pcb {
    fn from(genome: Genome) -> Self {
        Self::new(genome)
    }
}
