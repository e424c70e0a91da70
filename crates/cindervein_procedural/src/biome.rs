//! # Biome Synthesis
//!
//! A biome is a named per-region rule set that decides the material of
//! every cell no set piece claims. Requests carry an untyped
//! `{ name, params }` descriptor; it is resolved ONCE per request into a
//! tagged variant so dispatch inside the hot per-cell loop is a match, not
//! a string lookup.
//!
//! ## Registry
//!
//! - `Caves` - layered cavern fill: solid side barriers at the biome's
//!   world-x extremes, a noise-offset ceiling band between layers, and a
//!   domain-warped fractal carving the cave body.
//! - `OceanOfRock` - uniform rock wall, the fallback background for any
//!   area with no defined biome region. Unknown or malformed descriptors
//!   resolve here rather than failing.

use serde::{Deserialize, Serialize};

use crate::chunk::SECTOR_SIZE;
use crate::material::Material;
use crate::noise::NoiseGenerator;

/// Thickness of the side barriers and layer ceilings, in cells.
const BARRIER_THICKNESS: i32 = 100;

/// Frequency of the ceiling-offset noise along world x.
const CEILING_NOISE_FREQUENCY: f64 = 0.01;

/// How far the ceiling top wanders from its nominal height, in cells.
const CEILING_NOISE_AMPLITUDE: f64 = 25.0;

/// Vertical extent of one cave layer, in sectors.
const SECTORS_PER_LAYER: i32 = 5;

/// Base frequency of the cave-body fractal.
const CAVE_BASE_FREQUENCY: f64 = 0.006;

/// Octave count of the cave-body fractal.
const CAVE_OCTAVES: u32 = 2;

/// Amplitude decay per octave.
const CAVE_PERSISTENCE: f64 = 0.5;

/// Frequency growth per octave.
const CAVE_LACUNARITY: f64 = 2.0;

/// Frequency of the domain-warp noise.
const WARP_FREQUENCY: f64 = 0.005;

/// Warp displacement in cells at full noise amplitude.
const WARP_STRENGTH: f64 = 40.0;

/// Solid/empty cutoff on the normalized fractal value.
const CAVE_THRESHOLD: f64 = 0.49;

/// Inclusive rectangle of sector indices a biome region spans.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectorRect {
    /// Leftmost sector index.
    pub x1: i32,
    /// Topmost sector index.
    pub y1: i32,
    /// Rightmost sector index (inclusive).
    pub x2: i32,
    /// Bottommost sector index (inclusive).
    pub y2: i32,
}

/// Parameters of the cave biome.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaveParams {
    /// Depth layer, 0 (surface sandstone) through 4 (magic depths).
    pub layer: i32,
    /// Sector-index rectangle the biome region covers.
    pub bounds: SectorRect,
}

/// Untyped biome descriptor as it arrives in a generation request.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BiomeInfo {
    /// Registry name, e.g. `"Caves"` or `"OceanOfRock"`.
    pub name: String,
    /// Biome-specific parameters; only the cave biome carries any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<CaveParams>,
}

impl BiomeInfo {
    /// Convenience constructor for the parameterless biomes.
    #[must_use]
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            params: None,
        }
    }
}

/// A biome descriptor resolved to its generator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BiomeKind {
    /// Layered cavern fill.
    Caves(CaveParams),
    /// Uniform rock wall.
    OceanOfRock,
}

impl BiomeKind {
    /// Resolves an untyped descriptor.
    ///
    /// Unknown names - and a cave descriptor missing its parameters - fall
    /// back to the uniform default biome rather than failing.
    #[must_use]
    pub fn resolve(info: &BiomeInfo) -> Self {
        match (info.name.as_str(), info.params) {
            ("Caves", Some(params)) => Self::Caves(params),
            _ => Self::OceanOfRock,
        }
    }

    /// Material of the cell at world `(x, y)`, given no set piece claimed it.
    #[must_use]
    pub fn material_at(&self, noise: &NoiseGenerator, x: i32, y: i32) -> Material {
        match self {
            Self::Caves(params) => cave_material(noise, x, y, *params),
            Self::OceanOfRock => Material::RockWall,
        }
    }
}

/// Wall material of a cave layer. Out-of-range layers get plain rock.
#[must_use]
pub const fn layer_wall(layer: i32) -> Material {
    match layer {
        0 => Material::SandstoneWall,
        1 => Material::RockWall,
        2 => Material::VolcanicWall,
        3 => Material::LabyrinthWall,
        4 => Material::MagicWall,
        _ => Material::RockWall,
    }
}

/// Cave biome synthesis for one cell.
///
/// Priority: side barriers, then the inter-layer ceiling band, then the
/// warped fractal cave body.
fn cave_material(noise: &NoiseGenerator, x: i32, y: i32, params: CaveParams) -> Material {
    let wall = layer_wall(params.layer);

    // Solid vertical barriers at the extremes of the biome's world-x span.
    let biome_start_x = params.bounds.x1 * SECTOR_SIZE;
    let biome_end_x = (params.bounds.x2 + 1) * SECTOR_SIZE;
    if x < biome_start_x + BARRIER_THICKNESS || x > biome_end_x - BARRIER_THICKNESS {
        return wall;
    }

    // Ceiling band between layers, offset by noise so the seam isn't flat.
    if params.layer > 0 {
        let layer_top_y =
            params.bounds.y1 * SECTOR_SIZE + params.layer * SECTORS_PER_LAYER * SECTOR_SIZE;
        let offset = noise.sample(f64::from(x) * CEILING_NOISE_FREQUENCY, 42.5, 0.0)
            * CEILING_NOISE_AMPLITUDE;
        let ceiling_top = f64::from(layer_top_y) + offset;
        let fy = f64::from(y);
        if fy > ceiling_top && fy < ceiling_top + f64::from(BARRIER_THICKNESS) {
            return wall;
        }
    }

    // Cave body: one warp displacement applied to both axes, then a
    // 2-octave fractal classified against a fixed threshold.
    let (fx, fy) = (f64::from(x), f64::from(y));
    let warp = noise.sample(fx * WARP_FREQUENCY, fy * WARP_FREQUENCY, 100.5);
    let warped_x = fx + warp * WARP_STRENGTH;
    let warped_y = fy + warp * WARP_STRENGTH;

    let fractal = noise.fractal(
        warped_x * CAVE_BASE_FREQUENCY,
        warped_y * CAVE_BASE_FREQUENCY,
        CAVE_OCTAVES,
        CAVE_PERSISTENCE,
        CAVE_LACUNARITY,
    );
    let normalized = (fractal + 1.0) / 2.0;

    if normalized > CAVE_THRESHOLD {
        Material::Empty
    } else {
        wall
    }
}
