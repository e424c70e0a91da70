//! # Lighting Baker
//!
//! Per-sector flood-fill illumination. Open cells emit at full strength;
//! light decays one level per cell of open space and three per cell of
//! wall-tagged terrain as it spreads to the 8-neighborhood.
//!
//! ## Algorithm
//!
//! Three monotone passes over the sector: a seeding scan that pulls from
//! all 8 neighbors, a forward sweep (top-down, left-right) propagating
//! from north and west, and a backward sweep (bottom-up, right-left)
//! propagating from south and east. Values only ever rise.
//!
//! This is an approximate O(sector-area) propagation, not a multi-source
//! BFS: diagonal-heavy geometry can end up slightly under-lit after one
//! bake. That trade buys a fixed cost with no priority queue. The sweeps
//! are idempotent at their fixed point, which is what the tests pin down.
//!
//! ## Borders
//!
//! Neighbor lookups that leave the sector consult a caller-supplied border
//! context of previously-baked edge cells, so light bleeds correctly
//! across sector seams without re-baking neighbors. Missing entries read
//! as empty terrain and zero light.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::chunk::{cell_key, CellKey, ChunkStore, SectorCoord, SECTOR_SIZE};
use crate::material::Material;

/// Brightest light level an open cell emits.
pub const MAX_LIGHT_LEVEL: u8 = 30;

/// Light lost per step through a wall-tagged cell.
const WALL_LIGHT_LOSS: u8 = 3;

/// Light lost per step through anything else.
const OPEN_LIGHT_LOSS: u8 = 1;

/// The 8-neighborhood used by the seed pass.
const DIRS_8: [(i32, i32); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

/// Terrain and light of one already-baked cell just outside the sector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorderCell {
    /// Material id of the neighboring cell.
    pub terrain: u8,
    /// Baked light level of the neighboring cell.
    pub light: u8,
}

/// Read-only edge data from neighboring sectors, keyed by
/// `cell_key(world_x, world_y)`.
#[derive(Clone, Debug, Default)]
pub struct BorderContext {
    /// The border cells.
    pub cells: HashMap<CellKey, BorderCell>,
}

// Cell keys cross the wire as JSON object keys, which are strings, and
// tagged-message decoding sees them that way regardless of the key type.
// Hand-rolled impls keep the map shape while converting the keys.
impl Serialize for BorderContext {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_map(self.cells.iter().map(|(key, cell)| (key.to_string(), cell)))
    }
}

impl<'de> Deserialize<'de> for BorderContext {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = HashMap::<String, BorderCell>::deserialize(deserializer)?;
        let cells = raw
            .into_iter()
            .map(|(key, cell)| {
                key.parse::<CellKey>()
                    .map(|key| (key, cell))
                    .map_err(serde::de::Error::custom)
            })
            .collect::<Result<_, _>>()?;
        Ok(Self { cells })
    }
}

impl BorderContext {
    /// Creates an empty border context (isolated sector).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the border cell at world coordinates.
    pub fn insert(&mut self, x: i32, y: i32, cell: BorderCell) {
        self.cells.insert(cell_key(x, y), cell);
    }

    /// Terrain at world coordinates; absent entries are empty.
    #[inline]
    #[must_use]
    pub fn terrain(&self, x: i32, y: i32) -> u8 {
        self.cells
            .get(&cell_key(x, y))
            .map_or(Material::Empty.id(), |cell| cell.terrain)
    }

    /// Light at world coordinates; absent entries are dark.
    #[inline]
    #[must_use]
    pub fn light(&self, x: i32, y: i32) -> u8 {
        self.cells.get(&cell_key(x, y)).map_or(0, |cell| cell.light)
    }
}

/// Bakes the light store for one sector of terrain.
pub struct LightBaker<'a> {
    /// Terrain of the sector being baked.
    terrain: &'a ChunkStore,
    /// Edge data from neighboring sectors.
    border: &'a BorderContext,
    /// World x of the sector's left edge.
    start_x: i32,
    /// World y of the sector's top edge.
    start_y: i32,
}

impl<'a> LightBaker<'a> {
    /// Creates a baker for `sector` over its freshly generated terrain.
    #[must_use]
    pub fn new(sector: SectorCoord, terrain: &'a ChunkStore, border: &'a BorderContext) -> Self {
        let (start_x, start_y) = sector.world_origin();
        Self {
            terrain,
            border,
            start_x,
            start_y,
        }
    }

    /// Runs all three passes and returns the finished light store.
    ///
    /// Only cells that end up with light > 0 occupy chunks; fully dark
    /// regions stay absent from the store.
    #[must_use]
    pub fn bake(&self) -> ChunkStore {
        let mut light = ChunkStore::new(0);
        let seeded = self.seed_pass(&mut light);
        let forward = self.forward_pass(&mut light);
        let backward = self.backward_pass(&mut light);
        tracing::debug!(seeded, forward, backward, "light passes complete");
        light
    }

    /// Terrain lookup: the sector's own store first, border context for
    /// anything outside, empty where neither knows the cell.
    #[inline]
    fn terrain_at(&self, x: i32, y: i32) -> u8 {
        self.terrain
            .get_cell(x, y)
            .unwrap_or_else(|| self.border.terrain(x, y))
    }

    /// Light lookup, mirroring `terrain_at`.
    #[inline]
    fn light_at(&self, light: &ChunkStore, x: i32, y: i32) -> u8 {
        light
            .get_cell(x, y)
            .unwrap_or_else(|| self.border.light(x, y))
    }

    /// Attenuation charged for light entering the cell at `(x, y)`.
    #[inline]
    fn loss_at(&self, x: i32, y: i32) -> u8 {
        if Material::is_wall_id(self.terrain_at(x, y)) {
            WALL_LIGHT_LOSS
        } else {
            OPEN_LIGHT_LOSS
        }
    }

    /// Seed pass: emission plus an 8-neighbor pull, in scan order.
    ///
    /// Returns the number of cells raised above their previous level.
    pub fn seed_pass(&self, light: &mut ChunkStore) -> u32 {
        let mut raised = 0;
        for y in self.start_y..self.start_y + SECTOR_SIZE {
            for x in self.start_x..self.start_x + SECTOR_SIZE {
                let mut level = if self.terrain_at(x, y) == Material::Empty.id() {
                    MAX_LIGHT_LEVEL
                } else {
                    0
                };
                let loss = self.loss_at(x, y);
                for (dx, dy) in DIRS_8 {
                    let neighbor = self.light_at(light, x + dx, y + dy);
                    level = level.max(neighbor.saturating_sub(loss));
                }
                if level > self.light_at(light, x, y) {
                    light.set_cell(x, y, level);
                    raised += 1;
                }
            }
        }
        raised
    }

    /// Forward sweep: top-down, left-right, pulling from north and west.
    ///
    /// Returns the number of cells raised.
    pub fn forward_pass(&self, light: &mut ChunkStore) -> u32 {
        let mut raised = 0;
        for y in self.start_y..self.start_y + SECTOR_SIZE {
            for x in self.start_x..self.start_x + SECTOR_SIZE {
                let current = self.light_at(light, x, y);
                let loss = self.loss_at(x, y);
                let proposed = current
                    .max(self.light_at(light, x, y - 1).saturating_sub(loss))
                    .max(self.light_at(light, x - 1, y).saturating_sub(loss));
                if proposed > current {
                    light.set_cell(x, y, proposed);
                    raised += 1;
                }
            }
        }
        raised
    }

    /// Backward sweep: bottom-up, right-left, pulling from south and east.
    ///
    /// Returns the number of cells raised.
    pub fn backward_pass(&self, light: &mut ChunkStore) -> u32 {
        let mut raised = 0;
        for y in (self.start_y..self.start_y + SECTOR_SIZE).rev() {
            for x in (self.start_x..self.start_x + SECTOR_SIZE).rev() {
                let current = self.light_at(light, x, y);
                let loss = self.loss_at(x, y);
                let proposed = current
                    .max(self.light_at(light, x, y + 1).saturating_sub(loss))
                    .max(self.light_at(light, x + 1, y).saturating_sub(loss));
                if proposed > current {
                    light.set_cell(x, y, proposed);
                    raised += 1;
                }
            }
        }
        raised
    }
}
