//! # CINDERVEIN Worker
//!
//! Message-driven sector generation off the main thread.
//!
//! The entire external surface of the generation core is a two-message
//! protocol: `init { seed }` answered by `init-ack`, and
//! `generate-and-bake { sx, sy, borderContext, biomeInfo, setPieces }`
//! answered by `result { sx, sy, chunks, lightChunks }` with ownership of
//! every chunk buffer transferred to the caller.
//!
//! ## Concurrency Model
//!
//! One logical worker per message stream. A request runs to completion
//! before the next message is looked at; there is no cancellation and no
//! shared mutable state beyond the seeded noise table. Want parallel
//! sector generation? Spawn more workers.
//!
//! ## Example
//!
//! ```rust,ignore
//! use cindervein_worker::{Request, Response, WorkerHandle};
//! use cindervein_procedural::BiomeInfo;
//!
//! let worker = WorkerHandle::spawn();
//! worker.send(Request::Init { seed: 1234 })?;
//! assert!(matches!(worker.recv()?, Response::InitAck));
//!
//! worker.send(Request::GenerateAndBake {
//!     sx: 0,
//!     sy: 0,
//!     border_context: Default::default(),
//!     biome_info: BiomeInfo::named("OceanOfRock"),
//!     set_pieces: Vec::new(),
//! })?;
//! let Response::SectorReady { chunks, light_chunks, .. } = worker.recv()? else {
//!     unreachable!()
//! };
//! ```

pub mod error;
pub mod protocol;
pub mod worker;

pub use error::{WorkerError, WorkerResult};
pub use protocol::{ChunkEntry, Request, Response};
pub use worker::WorkerHandle;
