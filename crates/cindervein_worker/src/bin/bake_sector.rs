//! # Sector Baking Driver
//!
//! Spawns one generation worker, runs a single `init` +
//! `generate-and-bake` round trip, and prints a census of the result.
//!
//! ## Usage
//!
//! ```bash
//! bake_sector --seed 1234 --sx 0 --sy 0 --biome Caves --layer 1
//! ```

use std::collections::BTreeMap;
use std::process::ExitCode;
use std::time::Instant;

use cindervein_procedural::{BiomeInfo, BorderContext, CaveParams, SectorRect};
use cindervein_worker::{Request, Response, WorkerHandle};

fn main() -> ExitCode {
    println!("==============================================");
    println!("  CINDERVEIN SECTOR BAKERY");
    println!("==============================================");
    println!();

    // Simple parsing, no external deps.
    let args: Vec<String> = std::env::args().collect();
    let mut seed = 1234u64;
    let mut sx = 0i32;
    let mut sy = 0i32;
    let mut biome_name = String::from("OceanOfRock");
    let mut layer = 0i32;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                if i + 1 < args.len() {
                    seed = args[i + 1].parse().unwrap_or(1234);
                    i += 1;
                }
            }
            "--sx" => {
                if i + 1 < args.len() {
                    sx = args[i + 1].parse().unwrap_or(0);
                    i += 1;
                }
            }
            "--sy" => {
                if i + 1 < args.len() {
                    sy = args[i + 1].parse().unwrap_or(0);
                    i += 1;
                }
            }
            "--biome" => {
                if i + 1 < args.len() {
                    biome_name = args[i + 1].clone();
                    i += 1;
                }
            }
            "--layer" => {
                if i + 1 < args.len() {
                    layer = args[i + 1].parse().unwrap_or(0);
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Usage: bake_sector [OPTIONS]");
                println!();
                println!("Options:");
                println!("  --seed <SEED>    World seed (default: 1234)");
                println!("  --sx <X>         Sector x coordinate (default: 0)");
                println!("  --sy <Y>         Sector y coordinate (default: 0)");
                println!("  --biome <NAME>   Biome name (default: OceanOfRock)");
                println!("  --layer <0-4>    Cave layer, Caves biome only (default: 0)");
                return ExitCode::SUCCESS;
            }
            other => {
                eprintln!("Unknown option: {other}");
                return ExitCode::FAILURE;
            }
        }
        i += 1;
    }

    let biome_info = if biome_name == "Caves" {
        BiomeInfo {
            name: biome_name.clone(),
            params: Some(CaveParams {
                layer,
                // A ten-by-fifteen-sector region around the origin.
                bounds: SectorRect { x1: -5, y1: 0, x2: 4, y2: 14 },
            }),
        }
    } else {
        BiomeInfo::named(&biome_name)
    };

    println!("seed:   {seed}");
    println!("sector: ({sx}, {sy})");
    println!("biome:  {biome_name} (layer {layer})");
    println!();

    let worker = WorkerHandle::spawn();
    let started = Instant::now();

    if worker.send(Request::Init { seed }).is_err() {
        eprintln!("worker died before init");
        return ExitCode::FAILURE;
    }
    match worker.recv() {
        Ok(Response::InitAck) => {}
        _ => {
            eprintln!("no init-ack from worker");
            return ExitCode::FAILURE;
        }
    }

    let request = Request::GenerateAndBake {
        sx,
        sy,
        border_context: BorderContext::new(),
        biome_info,
        set_pieces: Vec::new(),
    };
    if worker.send(request).is_err() {
        eprintln!("worker died before the request");
        return ExitCode::FAILURE;
    }

    let reply = match worker.recv() {
        Ok(reply) => reply,
        Err(err) => {
            eprintln!("worker died mid-bake: {err}");
            return ExitCode::FAILURE;
        }
    };
    let elapsed = started.elapsed();

    match reply {
        Response::SectorReady { chunks, light_chunks, .. } => {
            let mut materials: BTreeMap<u8, usize> = BTreeMap::new();
            for (_, chunk) in &chunks {
                for &cell in &chunk.data {
                    *materials.entry(cell).or_insert(0) += 1;
                }
            }
            let mut lit_cells = 0usize;
            let mut brightest = 0u8;
            for (_, chunk) in &light_chunks {
                for &cell in &chunk.data {
                    if cell > 0 {
                        lit_cells += 1;
                        brightest = brightest.max(cell);
                    }
                }
            }

            println!("baked in {elapsed:?}");
            println!();
            println!("terrain chunks: {}", chunks.len());
            println!("material census:");
            for (id, count) in &materials {
                println!("  id {id:>3}: {count:>7} cells");
            }
            println!();
            println!("light chunks:   {}", light_chunks.len());
            println!("lit cells:      {lit_cells} (brightest {brightest})");
        }
        Response::InitAck => {
            eprintln!("unexpected init-ack");
            return ExitCode::FAILURE;
        }
    }

    worker.join();
    ExitCode::SUCCESS
}
