//! # Sparse Chunk Store
//!
//! World data is a conceptually infinite 2D cell grid. Storage is sparse:
//! a keyed map from chunk coordinate to a fixed 16x16 cell block, created
//! lazily on first write. The same store type backs both the terrain grid
//! (material ids) and the light grid (levels 0-30); the two differ only in
//! what the bytes mean.
//!
//! ## Keying
//!
//! A coordinate pair collapses into one `i64` key via an order-sensitive
//! linear hash. The same formula keys chunk coordinates (chunk stores) and
//! raw world-cell coordinates (border contexts). Chunks additionally carry
//! their own `(cx, cy)` so the owning coordinate is always recoverable
//! without reversing the hash.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Chunk edge length in cells. Power of two: local offsets are a mask.
pub const CHUNK_SIZE: i32 = 16;

/// Cells per chunk.
pub const CHUNK_AREA: usize = (CHUNK_SIZE * CHUNK_SIZE) as usize;

/// Sector edge length in cells. One sector is the unit of generation work.
pub const SECTOR_SIZE: i32 = 512;

/// Chunks per sector edge.
pub const SECTOR_CHUNKS: i32 = SECTOR_SIZE / CHUNK_SIZE;

/// Key type shared by chunk stores and border contexts.
pub type CellKey = i64;

/// Collapses an ordered coordinate pair into a single map key.
///
/// Exact in `i64` for the whole `i32` coordinate range; `(x, y)` and
/// `(y, x)` never collide because the two multipliers are distinct primes.
#[inline]
#[must_use]
pub const fn cell_key(x: i32, y: i32) -> CellKey {
    x as i64 * 374_761_393 + y as i64 * 668_265_263
}

/// Converts a world cell coordinate to its owning chunk coordinate.
#[inline]
#[must_use]
pub const fn chunk_coord(world: i32) -> i32 {
    world.div_euclid(CHUNK_SIZE)
}

/// Local offset of a world cell inside its chunk (0-15).
#[inline]
#[must_use]
#[allow(clippy::cast_sign_loss)]
pub const fn local_offset(world: i32) -> usize {
    (world & (CHUNK_SIZE - 1)) as usize
}

/// Sector coordinate: one generation/bake request covers exactly one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct SectorCoord {
    /// X coordinate (in sectors, not cells).
    pub x: i32,
    /// Y coordinate (in sectors, not cells).
    pub y: i32,
}

impl SectorCoord {
    /// Creates a new sector coordinate.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// World cell coordinate of the sector's top-left corner.
    #[inline]
    #[must_use]
    pub const fn world_origin(self) -> (i32, i32) {
        (self.x * SECTOR_SIZE, self.y * SECTOR_SIZE)
    }
}

/// A 16x16 block of cells plus its own address.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Key of this chunk in its store.
    pub key: CellKey,
    /// Chunk X coordinate.
    pub cx: i32,
    /// Chunk Y coordinate.
    pub cy: i32,
    /// Cell values, row-major (`ly * 16 + lx`). Always `CHUNK_AREA` long.
    pub data: Vec<u8>,
}

impl Chunk {
    /// Creates a chunk at `(cx, cy)` with every cell set to `fill`.
    #[must_use]
    pub fn new(cx: i32, cy: i32, fill: u8) -> Self {
        Self {
            key: cell_key(cx, cy),
            cx,
            cy,
            data: vec![fill; CHUNK_AREA],
        }
    }

    /// Row-major index of a local offset pair.
    #[inline]
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub const fn local_index(lx: usize, ly: usize) -> usize {
        ly * CHUNK_SIZE as usize + lx
    }

    /// Reads the cell at local offsets `(lx, ly)`.
    #[inline]
    #[must_use]
    pub fn get(&self, lx: usize, ly: usize) -> u8 {
        self.data[Self::local_index(lx, ly)]
    }

    /// Writes the cell at local offsets `(lx, ly)`.
    #[inline]
    pub fn set(&mut self, lx: usize, ly: usize, value: u8) {
        self.data[Self::local_index(lx, ly)] = value;
    }
}

/// Sparse mapping from chunk key to chunk, standing in for an infinite grid.
///
/// Centralizes the coordinate arithmetic and the lazy-fill policy so no
/// call site ever computes a local index by hand.
pub struct ChunkStore {
    /// Value new chunks are filled with.
    fill: u8,
    /// The chunks, keyed by `cell_key(cx, cy)`.
    chunks: HashMap<CellKey, Chunk>,
}

impl ChunkStore {
    /// Creates an empty store whose chunks start out filled with `fill`.
    #[must_use]
    pub fn new(fill: u8) -> Self {
        Self {
            fill,
            chunks: HashMap::new(),
        }
    }

    /// Returns the chunk at chunk coordinates `(cx, cy)`, creating it
    /// (filled with the store's fill value) if absent.
    pub fn get_or_create(&mut self, cx: i32, cy: i32) -> &mut Chunk {
        let fill = self.fill;
        self.chunks
            .entry(cell_key(cx, cy))
            .or_insert_with(|| Chunk::new(cx, cy, fill))
    }

    /// Returns the chunk at chunk coordinates `(cx, cy)` without creating.
    #[must_use]
    pub fn chunk_at(&self, cx: i32, cy: i32) -> Option<&Chunk> {
        self.chunks.get(&cell_key(cx, cy))
    }

    /// Writes the cell at world coordinates, creating its chunk lazily.
    pub fn set_cell(&mut self, x: i32, y: i32, value: u8) {
        let chunk = self.get_or_create(chunk_coord(x), chunk_coord(y));
        chunk.set(local_offset(x), local_offset(y), value);
    }

    /// Reads the cell at world coordinates.
    ///
    /// `None` means the owning chunk has never been touched; the caller
    /// decides what absence means (empty terrain, zero light, border data).
    #[must_use]
    pub fn get_cell(&self, x: i32, y: i32) -> Option<u8> {
        self.chunk_at(chunk_coord(x), chunk_coord(y))
            .map(|chunk| chunk.get(local_offset(x), local_offset(y)))
    }

    /// Number of chunks actually created.
    #[must_use]
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// True if no chunk was ever touched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Iterates over the created chunks in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.values()
    }

    /// Consumes the store and moves its chunks out as `(key, chunk)` pairs.
    ///
    /// Ownership of every cell buffer transfers to the caller - nothing is
    /// cloned, and the store is gone afterwards. Entries come out in
    /// row-major `(cy, cx)` order so a reply is byte-identical across runs.
    #[must_use]
    pub fn into_entries(self) -> Vec<(CellKey, Chunk)> {
        let mut entries: Vec<(CellKey, Chunk)> =
            self.chunks.into_iter().collect();
        entries.sort_by_key(|(_, chunk)| (chunk.cy, chunk.cx));
        entries
    }
}
