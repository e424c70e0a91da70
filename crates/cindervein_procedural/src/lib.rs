//! # CINDERVEIN Procedural Generation
//!
//! Deterministic sector synthesis and lighting for an infinite 2D
//! falling-sand world.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: same seed always produces the same sector
//! 2. **Chunked**: world data lives in sparse 16x16 cell chunks
//! 3. **Sector-scoped**: one request generates and bakes one 512x512
//!    sector, then hands every buffer off to the caller
//! 4. **Border-aware**: light bleeds across sector seams through a
//!    caller-supplied border context, never by re-baking neighbors
//!
//! ## Core Components
//!
//! - `NoiseGenerator`: seeded, bit-reproducible Perlin noise
//! - `ChunkStore`: sparse keyed grid, shared by terrain and light
//! - `Material`: the pinned substance id table
//! - `BiomeKind` / `PlacedSetPiece`: per-cell material synthesis rules
//! - `SectorGenerator`: the per-sector priority loop
//! - `LightBaker`: three-pass flood-fill illumination
//!
//! ## Example
//!
//! ```rust,ignore
//! use cindervein_procedural::{
//!     BiomeInfo, BiomeKind, BorderContext, LightBaker, NoiseGenerator,
//!     SectorCoord, SectorGenerator,
//! };
//!
//! let noise = NoiseGenerator::new(1234);
//! let biome = BiomeKind::resolve(&BiomeInfo::named("OceanOfRock"));
//! let generator = SectorGenerator::new(&noise, biome, Vec::new());
//!
//! let sector = SectorCoord::new(0, 0);
//! let terrain = generator.generate(sector);
//! let border = BorderContext::new();
//! let light = LightBaker::new(sector, &terrain, &border).bake();
//! ```

pub mod biome;
pub mod chunk;
pub mod generator;
pub mod lighting;
pub mod material;
pub mod noise;
pub mod set_piece;

pub use biome::{layer_wall, BiomeInfo, BiomeKind, CaveParams, SectorRect};
pub use chunk::{
    cell_key, chunk_coord, local_offset, CellKey, Chunk, ChunkStore, SectorCoord, CHUNK_AREA,
    CHUNK_SIZE, SECTOR_CHUNKS, SECTOR_SIZE,
};
pub use generator::SectorGenerator;
pub use lighting::{BorderCell, BorderContext, LightBaker, MAX_LIGHT_LEVEL};
pub use material::Material;
pub use noise::NoiseGenerator;
pub use set_piece::{PieceBounds, PlacedSetPiece, SetPieceDescriptor, SetPieceKind};
