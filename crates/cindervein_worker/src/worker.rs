//! # Generation Worker
//!
//! One worker owns one message stream and one seeded noise source.
//! Requests are processed to completion, in order, inside a single thread:
//! there is never concurrent overlap of two generation requests on the
//! same instance, no cancellation, and no locking - every mutable chunk
//! store is request-scoped and moved out with the reply.
//!
//! Parallelism is achieved by running several independent workers, one per
//! concurrent sector task, not by multitasking within one.
//!
//! ```text
//! ┌─────────────┐   Request    ┌──────────────────┐
//! │   Caller    │─────────────>│  Worker thread   │
//! │ (world mgr) │<─────────────│  synth + bake    │
//! └─────────────┘   Response   └──────────────────┘
//! ```

use std::thread::{self, JoinHandle};
use std::time::Instant;

use crossbeam_channel::{bounded, Receiver, Sender};

use cindervein_procedural::{
    BiomeKind, LightBaker, NoiseGenerator, PlacedSetPiece, SectorCoord, SectorGenerator,
};

use crate::error::{WorkerError, WorkerResult};
use crate::protocol::{Request, Response};

/// Requests in flight before senders block. Callers normally run one
/// request at a time per worker, so this never fills in practice.
const CHANNEL_CAPACITY: usize = 64;

/// The worker-side state machine.
///
/// Holds the only state that survives across requests: the seeded noise
/// source. Everything else lives and dies inside one `generate-and-bake`.
struct GenerationWorker {
    /// Seeded by `init`; `None` until then.
    noise: Option<NoiseGenerator>,
}

impl GenerationWorker {
    const fn new() -> Self {
        Self { noise: None }
    }

    /// Runs the message loop until the request channel closes.
    fn run(mut self, requests: &Receiver<Request>, replies: &Sender<Response>) {
        while let Ok(request) = requests.recv() {
            if let Some(reply) = self.handle(request) {
                if replies.send(reply).is_err() {
                    // Caller hung up; nothing left to do.
                    return;
                }
            }
        }
    }

    /// Handles one request; `None` means no reply is owed.
    fn handle(&mut self, request: Request) -> Option<Response> {
        match request {
            Request::Init { seed } => {
                match self.noise.as_mut() {
                    Some(noise) => noise.reseed(seed),
                    None => self.noise = Some(NoiseGenerator::new(seed)),
                }
                tracing::info!(seed, "noise table seeded");
                Some(Response::InitAck)
            }
            Request::GenerateAndBake {
                sx,
                sy,
                border_context,
                biome_info,
                set_pieces,
            } => {
                let Some(noise) = self.noise.as_ref() else {
                    tracing::warn!(sx, sy, "generate-and-bake before init dropped");
                    return None;
                };
                let started = Instant::now();

                let sector = SectorCoord::new(sx, sy);
                let generator = SectorGenerator::new(
                    noise,
                    BiomeKind::resolve(&biome_info),
                    PlacedSetPiece::resolve(&set_pieces),
                );
                let terrain = generator.generate(sector);
                let light = LightBaker::new(sector, &terrain, &border_context).bake();

                // Both stores are consumed here: the buffers move into the
                // reply and this worker keeps no reference to them.
                let chunks = terrain.into_entries();
                let light_chunks = light.into_entries();
                tracing::debug!(
                    sx,
                    sy,
                    terrain_chunks = chunks.len(),
                    light_chunks = light_chunks.len(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "sector baked"
                );
                Some(Response::SectorReady {
                    sx,
                    sy,
                    chunks,
                    light_chunks,
                })
            }
        }
    }
}

/// Caller-side handle to a spawned worker.
///
/// Dropping the handle closes the request channel; the worker finishes
/// whatever it is doing and exits. Use `join` for a clean shutdown.
pub struct WorkerHandle {
    /// Request channel into the worker.
    requests: Sender<Request>,
    /// Reply channel out of the worker.
    replies: Receiver<Response>,
    /// The worker thread.
    thread: Option<JoinHandle<()>>,
}

impl WorkerHandle {
    /// Spawns a fresh worker thread with its own message stream.
    #[must_use]
    pub fn spawn() -> Self {
        let (request_tx, request_rx) = bounded::<Request>(CHANNEL_CAPACITY);
        let (reply_tx, reply_rx) = bounded::<Response>(CHANNEL_CAPACITY);

        let thread = thread::Builder::new()
            .name("cindervein-worker".to_owned())
            .spawn(move || GenerationWorker::new().run(&request_rx, &reply_tx))
            .expect("worker thread spawn");

        Self {
            requests: request_tx,
            replies: reply_rx,
            thread: Some(thread),
        }
    }

    /// Sends a typed request.
    ///
    /// # Errors
    ///
    /// `WorkerError::Disconnected` if the worker thread has died.
    pub fn send(&self, request: Request) -> WorkerResult<()> {
        self.requests
            .send(request)
            .map_err(|_| WorkerError::Disconnected)
    }

    /// Decodes and sends a raw wire message.
    ///
    /// Unrecognized message types are silently dropped - by protocol
    /// design, not by accident - and report success.
    ///
    /// # Errors
    ///
    /// `WorkerError::Disconnected` if the worker thread has died.
    pub fn send_json(&self, payload: &str) -> WorkerResult<()> {
        match Request::decode(payload) {
            Some(request) => self.send(request),
            None => {
                tracing::debug!("unrecognized message dropped");
                Ok(())
            }
        }
    }

    /// Blocks for the next reply.
    ///
    /// # Errors
    ///
    /// `WorkerError::Disconnected` if the worker thread has died with no
    /// reply pending.
    pub fn recv(&self) -> WorkerResult<Response> {
        self.replies.recv().map_err(|_| WorkerError::Disconnected)
    }

    /// Next reply if one is already waiting.
    #[must_use]
    pub fn try_recv(&self) -> Option<Response> {
        self.replies.try_recv().ok()
    }

    /// Closes the request channel and waits for the worker to exit.
    pub fn join(mut self) {
        drop(self.requests);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_ack() {
        let worker = WorkerHandle::spawn();
        worker.send(Request::Init { seed: 42 }).expect("send init");
        assert!(matches!(worker.recv(), Ok(Response::InitAck)));
        worker.join();
    }

    #[test]
    fn test_reseed_is_idempotent() {
        let worker = WorkerHandle::spawn();
        worker.send(Request::Init { seed: 1 }).expect("send init");
        worker.send(Request::Init { seed: 1 }).expect("send init again");
        assert!(matches!(worker.recv(), Ok(Response::InitAck)));
        assert!(matches!(worker.recv(), Ok(Response::InitAck)));
        worker.join();
    }

    #[test]
    fn test_generate_before_init_is_dropped() {
        let worker = WorkerHandle::spawn();
        worker
            .send_json(r#"{"type":"generate-and-bake","sx":0,"sy":0,"biomeInfo":{"name":"OceanOfRock"}}"#)
            .expect("send");
        // The request is dropped without a reply; an init afterwards is
        // answered normally, proving the worker is still alive.
        worker.send(Request::Init { seed: 9 }).expect("send init");
        assert!(matches!(worker.recv(), Ok(Response::InitAck)));
        worker.join();
    }

    #[test]
    fn test_unknown_message_type_is_ignored() {
        let worker = WorkerHandle::spawn();
        worker
            .send_json(r#"{"type":"warm-reboot","niceness":11}"#)
            .expect("unknown type reports success");
        worker.send(Request::Init { seed: 1 }).expect("send init");
        assert!(matches!(worker.recv(), Ok(Response::InitAck)));
        worker.join();
    }
}
