//! # Sector Synthesis
//!
//! Drives the per-cell priority rules over one sector and fills a fresh
//! terrain store. Set pieces are asked first (list order, first claim
//! wins); the biome decides every unclaimed cell.
//!
//! Output is a pure function of `(x, y)` given the seed and the request
//! parameters - no hidden state - so arbitrary sectors can be generated
//! independently and in parallel across worker instances.

use crate::biome::BiomeKind;
use crate::chunk::{ChunkStore, SectorCoord, SECTOR_SIZE};
use crate::material::Material;
use crate::noise::NoiseGenerator;
use crate::set_piece::PlacedSetPiece;

/// One sector's worth of terrain synthesis.
pub struct SectorGenerator<'a> {
    /// Seeded noise source, owned by the worker.
    noise: &'a NoiseGenerator,
    /// Resolved biome for the region.
    biome: BiomeKind,
    /// Resolved set pieces, in request order.
    pieces: Vec<PlacedSetPiece>,
}

impl<'a> SectorGenerator<'a> {
    /// Creates a generator over resolved request parameters.
    #[must_use]
    pub fn new(
        noise: &'a NoiseGenerator,
        biome: BiomeKind,
        pieces: Vec<PlacedSetPiece>,
    ) -> Self {
        Self {
            noise,
            biome,
            pieces,
        }
    }

    /// Material of a single world cell.
    ///
    /// Priority: first set piece that claims the cell, then the biome.
    #[must_use]
    pub fn material_at(&self, x: i32, y: i32) -> Material {
        for piece in &self.pieces {
            if let Some(material) = piece.sample(x, y) {
                return material;
            }
        }
        self.biome.material_at(self.noise, x, y)
    }

    /// Synthesizes every cell of `sector` into a fresh terrain store.
    #[must_use]
    pub fn generate(&self, sector: SectorCoord) -> ChunkStore {
        let mut terrain = ChunkStore::new(Material::Empty.id());
        let (origin_x, origin_y) = sector.world_origin();

        for dy in 0..SECTOR_SIZE {
            for dx in 0..SECTOR_SIZE {
                let x = origin_x + dx;
                let y = origin_y + dy;
                terrain.set_cell(x, y, self.material_at(x, y).id());
            }
        }

        terrain
    }
}
