//! # Wire Protocol
//!
//! Message shapes exchanged with a generation worker. Both sides must
//! agree on these definitions; field and tag names are wire format and
//! match the main-thread world manager exactly.
//!
//! The protocol is closed and caller-controlled: a message whose `type`
//! tag is not recognized simply fails to decode and is dropped, silently.
//! There is no error reply type.

use serde::{Deserialize, Serialize};

use cindervein_procedural::{BiomeInfo, BorderContext, CellKey, Chunk, SetPieceDescriptor};

/// One `[key, chunk]` entry of a reply, ready for zero-copy handoff.
pub type ChunkEntry = (CellKey, Chunk);

/// Messages a caller sends to a worker.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Request {
    /// Seeds the worker's noise source. Must precede any generation
    /// request; reseeding is idempotent and replaces the prior table.
    #[serde(rename = "init")]
    Init {
        /// World seed.
        seed: u64,
    },

    /// Generates the terrain of one sector, bakes its light, and replies
    /// with both chunk sets.
    #[serde(rename = "generate-and-bake")]
    GenerateAndBake {
        /// Sector x coordinate.
        sx: i32,
        /// Sector y coordinate.
        sy: i32,
        /// Edge cells of already-baked neighboring sectors.
        #[serde(rename = "borderContext", default)]
        border_context: BorderContext,
        /// Biome descriptor for the sector's region.
        #[serde(rename = "biomeInfo")]
        biome_info: BiomeInfo,
        /// Set pieces overlapping the sector, in stamping order.
        #[serde(rename = "setPieces", default)]
        set_pieces: Vec<SetPieceDescriptor>,
    },
}

impl Request {
    /// Decodes a wire message.
    ///
    /// Returns `None` for malformed payloads and for unrecognized `type`
    /// tags - the protocol ignores those silently rather than replying.
    #[must_use]
    pub fn decode(payload: &str) -> Option<Self> {
        serde_json::from_str(payload).ok()
    }
}

/// Messages a worker sends back to its caller.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Response {
    /// Acknowledges an `init`.
    #[serde(rename = "init-ack")]
    InitAck,

    /// One baked sector. The chunk buffers inside are the worker's own,
    /// moved out; the worker retains nothing.
    #[serde(rename = "result")]
    SectorReady {
        /// Sector x coordinate, echoed from the request.
        sx: i32,
        /// Sector y coordinate, echoed from the request.
        sy: i32,
        /// Terrain chunks as `[key, chunk]` pairs.
        chunks: Vec<ChunkEntry>,
        /// Light chunks, same shape.
        #[serde(rename = "lightChunks")]
        light_chunks: Vec<ChunkEntry>,
    },
}
