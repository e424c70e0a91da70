//! # Sector Pipeline Tests
//!
//! End-to-end properties of generate-then-bake over whole sectors:
//! coverage, determinism, set-piece precedence, light monotonicity, wall
//! opacity and cross-sector border stitching.

use std::collections::HashSet;

use cindervein_procedural::{
    cell_key, BiomeInfo, BiomeKind, BorderCell, BorderContext, Chunk, ChunkStore, LightBaker,
    Material, NoiseGenerator, PieceBounds, PlacedSetPiece, SectorCoord, SectorGenerator,
    SetPieceDescriptor, CHUNK_AREA, MAX_LIGHT_LEVEL, SECTOR_CHUNKS, SECTOR_SIZE,
};

fn bake_sector(
    seed: u64,
    sector: SectorCoord,
    biome: &BiomeInfo,
    pieces: &[SetPieceDescriptor],
    border: &BorderContext,
) -> (Vec<(i64, Chunk)>, Vec<(i64, Chunk)>) {
    let noise = NoiseGenerator::new(seed);
    let generator = SectorGenerator::new(
        &noise,
        BiomeKind::resolve(biome),
        PlacedSetPiece::resolve(pieces),
    );
    let terrain = generator.generate(sector);
    let light = LightBaker::new(sector, &terrain, border).bake();
    (terrain.into_entries(), light.into_entries())
}

/// Flattens the in-sector cells of a store, row-major, absent cells as 0.
fn scan(store: &ChunkStore, sector: SectorCoord) -> Vec<u8> {
    let (ox, oy) = sector.world_origin();
    let mut cells = Vec::with_capacity((SECTOR_SIZE * SECTOR_SIZE) as usize);
    for y in 0..SECTOR_SIZE {
        for x in 0..SECTOR_SIZE {
            cells.push(store.get_cell(ox + x, oy + y).unwrap_or(0));
        }
    }
    cells
}

/// Rebuilds a store from moved-out entries, for point lookups.
fn store_from_entries(entries: Vec<(i64, Chunk)>) -> ChunkStore {
    let mut store = ChunkStore::new(0);
    for (_, chunk) in entries {
        for ly in 0..16i32 {
            for lx in 0..16i32 {
                store.set_cell(
                    chunk.cx * 16 + lx,
                    chunk.cy * 16 + ly,
                    chunk.get(
                        usize::try_from(lx).expect("offset fits"),
                        usize::try_from(ly).expect("offset fits"),
                    ),
                );
            }
        }
    }
    store
}

/// Test: OceanOfRock end-to-end - all rock, zero light anywhere.
#[test]
fn test_ocean_of_rock_end_to_end() {
    let (terrain, light) = bake_sector(
        1234,
        SectorCoord::new(0, 0),
        &BiomeInfo::named("OceanOfRock"),
        &[],
        &BorderContext::new(),
    );

    assert_eq!(terrain.len(), (SECTOR_CHUNKS * SECTOR_CHUNKS) as usize);
    for (_, chunk) in &terrain {
        assert!(
            chunk.data.iter().all(|&cell| cell == Material::RockWall.id()),
            "terrain chunk ({}, {}) is not uniform rock wall",
            chunk.cx,
            chunk.cy
        );
    }
    // No empty cell to seed from and no border light: the light store
    // never materializes a single chunk.
    assert!(light.is_empty(), "expected no light chunks, got {}", light.len());
}

/// Test: chunk coverage - sector (0, 0) touches exactly chunks
/// (0, 0)..(31, 31), each with a full 256-cell buffer and matching key.
#[test]
fn test_chunk_coverage() {
    let (terrain, _) = bake_sector(
        42,
        SectorCoord::new(0, 0),
        &BiomeInfo::named("OceanOfRock"),
        &[],
        &BorderContext::new(),
    );

    let mut expected = HashSet::new();
    for cy in 0..SECTOR_CHUNKS {
        for cx in 0..SECTOR_CHUNKS {
            expected.insert(cell_key(cx, cy));
        }
    }
    let actual: HashSet<i64> = terrain.iter().map(|(key, _)| *key).collect();
    assert_eq!(actual, expected);

    for (key, chunk) in &terrain {
        assert_eq!(*key, chunk.key);
        assert_eq!(*key, cell_key(chunk.cx, chunk.cy));
        assert_eq!(chunk.data.len(), CHUNK_AREA);
    }
}

/// Test: byte-identical output across repeated invocations and across
/// separately seeded generator instances.
#[test]
fn test_determinism_across_instances() {
    let biome = BiomeInfo {
        name: "Caves".to_owned(),
        params: Some(cindervein_procedural::CaveParams {
            layer: 2,
            bounds: cindervein_procedural::SectorRect { x1: -1, y1: 0, x2: 3, y2: 14 },
        }),
    };
    let pieces = vec![SetPieceDescriptor {
        name: "AlchemistStation".to_owned(),
        bounds: PieceBounds { x: 600, y: 5200, width: 512, height: 512 },
    }];
    let mut border = BorderContext::new();
    border.insert(511, 5300, BorderCell { terrain: 0, light: MAX_LIGHT_LEVEL });

    let sector = SectorCoord::new(1, 10);
    let (terrain1, light1) = bake_sector(99, sector, &biome, &pieces, &border);
    let (terrain2, light2) = bake_sector(99, sector, &biome, &pieces, &border);

    assert_eq!(terrain1.len(), terrain2.len());
    assert_eq!(light1.len(), light2.len());
    for ((k1, c1), (k2, c2)) in terrain1.iter().zip(terrain2.iter()) {
        assert_eq!(k1, k2);
        assert_eq!((c1.cx, c1.cy), (c2.cx, c2.cy));
        assert_eq!(c1.data, c2.data, "terrain chunk ({}, {}) differs", c1.cx, c1.cy);
    }
    for ((k1, c1), (k2, c2)) in light1.iter().zip(light2.iter()) {
        assert_eq!(k1, k2);
        assert_eq!(c1.data, c2.data, "light chunk ({}, {}) differs", c1.cx, c1.cy);
    }
}

/// Test: set-piece precedence - where the station claims cells, the biome
/// material is never observed.
#[test]
fn test_set_piece_precedence() {
    let noise = NoiseGenerator::new(7);
    let pieces = vec![SetPieceDescriptor {
        name: "AlchemistStation".to_owned(),
        bounds: PieceBounds { x: 0, y: 0, width: 512, height: 512 },
    }];
    // A biome that would paint every cell rock.
    let generator = SectorGenerator::new(
        &noise,
        BiomeKind::resolve(&BiomeInfo::named("OceanOfRock")),
        PlacedSetPiece::resolve(&pieces),
    );
    let terrain = generator.generate(SectorCoord::new(0, 0));

    // The workroom interior (inside the inner shell) is fully claimed:
    // every cell is station output, never the biome's rock wall.
    for y in 62..=500 {
        for x in 52..=460 {
            let cell = terrain.get_cell(x, y).expect("sector cell exists");
            assert_ne!(
                cell,
                Material::RockWall.id(),
                "biome material leaked into claimed cell ({x}, {y})"
            );
        }
    }
    // Where the piece declines (above the shell), the biome fills in.
    assert_eq!(terrain.get_cell(256, 10), Some(Material::RockWall.id()));
}

/// Test: light monotonicity and bounds over a real cave bake.
#[test]
fn test_light_monotone_bounded_and_locally_consistent() {
    let biome = BiomeInfo {
        name: "Caves".to_owned(),
        params: Some(cindervein_procedural::CaveParams {
            layer: 0,
            bounds: cindervein_procedural::SectorRect { x1: 0, y1: 0, x2: 4, y2: 4 },
        }),
    };
    let sector = SectorCoord::new(1, 1);
    let noise = NoiseGenerator::new(4242);
    let generator = SectorGenerator::new(&noise, BiomeKind::resolve(&biome), Vec::new());
    let terrain = generator.generate(sector);
    let border = BorderContext::new();
    let baker = LightBaker::new(sector, &terrain, &border);

    let mut light = ChunkStore::new(0);
    let seeded = baker.seed_pass(&mut light);
    assert!(seeded > 0, "an open cave should seed some light");
    let seed_snapshot: Vec<u8> = scan(&light, sector);

    // Drive the sweeps to their fixed point.
    let mut rounds = 0;
    loop {
        let raised = baker.seed_pass(&mut light)
            + baker.forward_pass(&mut light)
            + baker.backward_pass(&mut light);
        if raised == 0 {
            break;
        }
        rounds += 1;
        assert!(rounds < 64, "sweeps failed to converge");
    }

    let final_snapshot: Vec<u8> = scan(&light, sector);
    let (ox, oy) = sector.world_origin();
    for (i, (&seed_level, &level)) in
        seed_snapshot.iter().zip(final_snapshot.iter()).enumerate()
    {
        let i = i32::try_from(i).expect("cell index fits");
        let (x, y) = (ox + i % SECTOR_SIZE, oy + i / SECTOR_SIZE);
        assert!(level >= seed_level, "light dropped below seed at ({x}, {y})");
        assert!(level <= MAX_LIGHT_LEVEL, "light above MAX at ({x}, {y})");

        // Local consistency at the fixed point: an orthogonal neighbor
        // inside the sector holds at least this cell's light minus the
        // neighbor's own loss.
        if level > 0 {
            for (dx, dy) in [(-1, 0), (1, 0), (0, -1), (0, 1)] {
                let (nx, ny) = (x + dx, y + dy);
                if nx < ox || nx >= ox + SECTOR_SIZE || ny < oy || ny >= oy + SECTOR_SIZE {
                    continue;
                }
                let neighbor = light.get_cell(nx, ny).unwrap_or(0);
                let loss = if Material::is_wall_id(
                    terrain.get_cell(nx, ny).unwrap_or(Material::Empty.id()),
                ) {
                    3
                } else {
                    1
                };
                assert!(
                    neighbor >= level.saturating_sub(loss),
                    "dark cell ({nx}, {ny}) borders light {level} at ({x}, {y})"
                );
            }
        }
    }
}

/// Test: wall opacity - a room sealed by walls with no emitter inside and
/// no border light bakes fully dark, while the station's open room is lit.
#[test]
fn test_wall_opacity_and_room_lighting() {
    let pieces = vec![SetPieceDescriptor {
        name: "AlchemistStation".to_owned(),
        bounds: PieceBounds { x: 128, y: 0, width: 256, height: 256 },
    }];
    let (_, light) = bake_sector(
        5,
        SectorCoord::new(0, 0),
        &BiomeInfo::named("OceanOfRock"),
        &pieces,
        &BorderContext::new(),
    );

    let store = store_from_entries(light);

    // Open workroom air sits at full brightness.
    assert_eq!(store.get_cell(128 + 128, 128), Some(MAX_LIGHT_LEVEL));
    // The far corner of the sector is dozens of wall cells away from the
    // nearest open cell - attenuation extinguishes light long before it.
    for (x, y) in [(500, 500), (0, 500), (500, 40), (0, 0)] {
        assert_eq!(
            store.get_cell(x, y).unwrap_or(0),
            0,
            "sealed rock at ({x}, {y}) should stay dark"
        );
    }
}

/// Test: border stitching - claimed light on the west edge of sector
/// (1, 0) bleeds inward, dropping by the wall loss per cell.
#[test]
fn test_border_stitching() {
    let mut border = BorderContext::new();
    border.insert(
        511,
        300,
        BorderCell { terrain: Material::RockWall.id(), light: MAX_LIGHT_LEVEL },
    );
    let (_, light) = bake_sector(
        1234,
        SectorCoord::new(1, 0),
        &BiomeInfo::named("OceanOfRock"),
        &[],
        &border,
    );

    let store = store_from_entries(light);

    // Rock charges 3 per cell: 27 at the seam, then 24, 21, ...
    let mut previous = u8::MAX;
    for step in 0..9 {
        let level = store.get_cell(512 + step, 300).unwrap_or(0);
        assert_eq!(level, 27 - 3 * u8::try_from(step).expect("step fits"));
        assert!(level < previous, "light must decrease away from the border");
        previous = level;
    }
    assert_eq!(
        store.get_cell(521, 300).unwrap_or(0),
        0,
        "extinguished past nine cells"
    );
}
