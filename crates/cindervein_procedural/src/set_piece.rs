//! # Set Pieces
//!
//! Hand-authored structural stencils stamped into generated terrain. A set
//! piece takes precedence over biome fill: for every cell inside its
//! bounds the generator is asked first, and only a `None` ("not part of
//! this piece") answer falls through to the biome.
//!
//! Request descriptors name pieces by string; names are resolved ONCE per
//! request against the registry enum. A name with no registry entry simply
//! contributes no coverage - never an error.

use serde::{Deserialize, Serialize};

use crate::material::Material;

/// World-coordinate rectangle a set piece is stamped into.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceBounds {
    /// World x of the top-left corner.
    pub x: i32,
    /// World y of the top-left corner.
    pub y: i32,
    /// Width in cells.
    pub width: i32,
    /// Height in cells.
    pub height: i32,
}

impl PieceBounds {
    /// True if the world cell lies inside this rectangle.
    #[inline]
    #[must_use]
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

/// Untyped set-piece descriptor as it arrives in a generation request.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetPieceDescriptor {
    /// Registry name, e.g. `"AlchemistStation"`.
    pub name: String,
    /// Placement rectangle in world coordinates.
    pub bounds: PieceBounds,
}

/// The set-piece registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SetPieceKind {
    /// Walled alchemist workroom with a runic slab and cauldrons.
    AlchemistStation,
}

impl SetPieceKind {
    /// Looks a registry entry up by its wire name.
    #[must_use]
    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "AlchemistStation" => Some(Self::AlchemistStation),
            _ => None,
        }
    }
}

/// A descriptor resolved against the registry and ready to sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlacedSetPiece {
    /// Which generator to run.
    pub kind: SetPieceKind,
    /// Where it is stamped.
    pub bounds: PieceBounds,
}

impl PlacedSetPiece {
    /// Resolves request descriptors, dropping unknown names.
    #[must_use]
    pub fn resolve(descriptors: &[SetPieceDescriptor]) -> Vec<Self> {
        descriptors
            .iter()
            .filter_map(|desc| {
                SetPieceKind::by_name(&desc.name).map(|kind| Self {
                    kind,
                    bounds: desc.bounds,
                })
            })
            .collect()
    }

    /// Samples the piece at a world cell.
    ///
    /// `None` means the cell is not part of this piece and biome generation
    /// should decide it.
    #[must_use]
    pub fn sample(&self, x: i32, y: i32) -> Option<Material> {
        match self.kind {
            SetPieceKind::AlchemistStation => alchemist_station(x, y, &self.bounds),
        }
    }
}

/// Wall thickness of the station's adamantium shell.
const WALL_THICKNESS: i32 = 12;

/// Horizontal padding between the bounds edge and the outer wall.
const ROOM_PADDING: i32 = 40;

/// Height of the entrance gaps cut into both side walls.
const ENTRANCE_HEIGHT: i32 = 60;

/// Distance from the bounds top to the outer ceiling.
const ROOM_TOP: i32 = 50;

/// Runic slab dimensions and placement (local coordinates).
const SLAB_WIDTH: i32 = 70;
/// Slab height in cells.
const SLAB_HEIGHT: i32 = 15;
/// Local x of the slab's left edge.
const SLAB_X: i32 = 130;
/// Inset of the slab's rune border lines from its top and bottom edges.
const SLAB_LINE_PAD: i32 = 2;

/// Cauldron rim geometry: outer radius / ring thickness.
const CAULDRON_RADIUS: f64 = 32.0;
/// Ring thickness of the two large cauldrons.
const CAULDRON_THICKNESS: f64 = 4.0;
/// Outer radius of the small sampler bowl.
const SAMPLER_RADIUS: f64 = 16.0;
/// Ring thickness of the sampler bowl.
const SAMPLER_THICKNESS: f64 = 4.0;
/// Local x centers of the left cauldron, right cauldron and sampler.
const LEFT_CAULDRON_X: i32 = 260;
/// Local x center of the right cauldron.
const RIGHT_CAULDRON_X: i32 = 390;
/// Local x center of the sampler bowl.
const SAMPLER_X: i32 = 325;
/// Rim height of the cauldrons above the floor.
const CAULDRON_RIM_OFFSET: i32 = 28;
/// Rim height of the sampler above the floor.
const SAMPLER_RIM_OFFSET: i32 = 12;

/// Pseudo-random rune texture: a 32-bit hash mix of the local cell,
/// compared against a fixed threshold. Wrapping arithmetic throughout.
fn rune_texture(lx: i32, ly: i32) -> bool {
    let mut h = lx
        .wrapping_mul(374_761_393)
        .wrapping_add(ly.wrapping_mul(668_265_263));
    h = (h ^ (h >> 13)).wrapping_mul(1_274_126_177);
    ((h ^ (h >> 16)) & 0xff) > 220
}

/// The alchemist station generator.
///
/// An adamantium shell encloses an empty workroom; both side walls carry a
/// floor-level entrance gap. Inside stand a rune-textured slab and three
/// annular cauldron rims (Euclidean distance bands clipped to the span
/// between rim height and floor).
#[allow(clippy::similar_names)]
fn alchemist_station(world_x: i32, world_y: i32, bounds: &PieceBounds) -> Option<Material> {
    let lx = world_x - bounds.x;
    let ly = world_y - bounds.y;
    if lx < 0 || lx >= bounds.width || ly < 0 || ly >= bounds.height {
        return None;
    }

    // Shell geometry, all in local coordinates. The floor is part of the
    // wall structure, so the outer box runs to the bounds bottom.
    let outer_x1 = ROOM_PADDING;
    let outer_y1 = ROOM_TOP;
    let outer_x2 = bounds.width - ROOM_PADDING;
    let outer_y2 = bounds.height;
    let inner_x1 = outer_x1 + WALL_THICKNESS;
    let inner_y1 = outer_y1 + WALL_THICKNESS;
    let inner_x2 = outer_x2 - WALL_THICKNESS;
    let inner_y2 = bounds.height - WALL_THICKNESS;
    let entrance_top_y = inner_y2 - ENTRANCE_HEIGHT;

    let inside_outer = lx >= outer_x1 && lx <= outer_x2 && ly >= outer_y1 && ly <= outer_y2;
    let inside_inner = lx >= inner_x1 && lx <= inner_x2 && ly >= inner_y1 && ly <= inner_y2;
    let in_entrance = ly > entrance_top_y && (lx < inner_x1 || lx > inner_x2);

    if inside_outer && !inside_inner && !in_entrance {
        return Some(Material::Adamantium);
    }

    if inside_inner {
        // The runic slab sits on the floor.
        let slab_y = inner_y2 - SLAB_HEIGHT + 1;
        if lx >= SLAB_X && lx < SLAB_X + SLAB_WIDTH && ly >= slab_y && ly < slab_y + SLAB_HEIGHT {
            let top_line_y = slab_y + SLAB_LINE_PAD;
            let bottom_line_y = slab_y + SLAB_HEIGHT - 1 - SLAB_LINE_PAD;
            if ly == top_line_y || ly == bottom_line_y {
                return Some(Material::RuneWall);
            }
            if ly > top_line_y && ly < bottom_line_y && rune_texture(lx, ly) {
                return Some(Material::RuneWall);
            }
            return Some(Material::Adamantium);
        }

        // Cauldron rims: only the ring above rim height and above the floor.
        let cauldron_rim_y = inner_y2 - CAULDRON_RIM_OFFSET;
        let sampler_rim_y = inner_y2 - SAMPLER_RIM_OFFSET;

        if ly >= cauldron_rim_y && ly <= inner_y2 {
            for center_x in [LEFT_CAULDRON_X, RIGHT_CAULDRON_X] {
                let d = f64::from(lx - center_x).hypot(f64::from(ly - cauldron_rim_y));
                if d <= CAULDRON_RADIUS && d > CAULDRON_RADIUS - CAULDRON_THICKNESS {
                    return Some(Material::RuneWall);
                }
            }
        }
        if ly >= sampler_rim_y && ly <= inner_y2 {
            let d = f64::from(lx - SAMPLER_X).hypot(f64::from(ly - sampler_rim_y));
            if d <= SAMPLER_RADIUS && d > SAMPLER_RADIUS - SAMPLER_THICKNESS {
                return Some(Material::RuneWall);
            }
        }

        // Open workroom air.
        return Some(Material::Empty);
    }

    // Above the shell or in an entrance gap: not part of the piece.
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station() -> PlacedSetPiece {
        PlacedSetPiece {
            kind: SetPieceKind::AlchemistStation,
            bounds: PieceBounds {
                x: 1000,
                y: 2000,
                width: 512,
                height: 512,
            },
        }
    }

    #[test]
    fn test_resolve_drops_unknown_names() {
        let descriptors = vec![
            SetPieceDescriptor {
                name: "AlchemistStation".to_owned(),
                bounds: PieceBounds { x: 0, y: 0, width: 512, height: 512 },
            },
            SetPieceDescriptor {
                name: "SunkenCathedral".to_owned(),
                bounds: PieceBounds { x: 9, y: 9, width: 10, height: 10 },
            },
        ];
        let placed = PlacedSetPiece::resolve(&descriptors);
        assert_eq!(placed.len(), 1);
        assert_eq!(placed[0].kind, SetPieceKind::AlchemistStation);
    }

    #[test]
    fn test_outside_bounds_is_no_coverage() {
        let piece = station();
        assert_eq!(piece.sample(999, 2100), None);
        assert_eq!(piece.sample(1512, 2100), None);
        assert_eq!(piece.sample(1100, 1999), None);
        assert_eq!(piece.sample(1100, 2512), None);
    }

    #[test]
    fn test_shell_and_workroom() {
        let piece = station();
        let (ox, oy) = (1000, 2000);

        // Above the shell: uncovered, falls to the biome.
        assert_eq!(piece.sample(ox + 256, oy + 10), None);
        // Left of the outer wall: uncovered.
        assert_eq!(piece.sample(ox + 10, oy + 200), None);
        // Outer wall cells are adamantium.
        assert_eq!(piece.sample(ox + 45, oy + 200), Some(Material::Adamantium));
        assert_eq!(piece.sample(ox + 256, oy + 55), Some(Material::Adamantium));
        // Center of the workroom is open air.
        assert_eq!(piece.sample(ox + 256, oy + 200), Some(Material::Empty));
    }

    #[test]
    fn test_entrance_gap_is_open() {
        let piece = station();
        let (ox, oy) = (1000, 2000);
        // inner_y2 = 500, entrance_top_y = 440: the side wall band at
        // ly 441..=500 is cut open (no coverage there).
        assert_eq!(piece.sample(ox + 45, oy + 460), None);
        assert_eq!(piece.sample(ox + 467, oy + 460), None);
        // The same wall column above the gap is still solid.
        assert_eq!(piece.sample(ox + 45, oy + 430), Some(Material::Adamantium));
    }

    #[test]
    fn test_slab_structure() {
        let piece = station();
        let (ox, oy) = (1000, 2000);
        // inner_y2 = 500 -> slab occupies ly 486..=500, lines at 488/498.
        assert_eq!(piece.sample(ox + 150, oy + 488), Some(Material::RuneWall));
        assert_eq!(piece.sample(ox + 150, oy + 498), Some(Material::RuneWall));
        // Slab face cells are adamantium or rune texture, never empty.
        for lx in 130..200 {
            for ly in 489..498 {
                let material = piece.sample(ox + lx, oy + ly).expect("slab is covered");
                assert!(
                    material == Material::Adamantium || material == Material::RuneWall,
                    "slab face at ({lx}, {ly}) was {material:?}"
                );
            }
        }
        // Texture must fire somewhere on the face but not everywhere.
        let runes = (130..200)
            .flat_map(|lx| (489..498).map(move |ly| (lx, ly)))
            .filter(|&(lx, ly)| piece.sample(ox + lx, oy + ly) == Some(Material::RuneWall))
            .count();
        assert!(runes > 0, "rune texture never fired");
        assert!(runes < 70 * 9, "rune texture fired on every cell");
    }

    #[test]
    fn test_cauldron_rims() {
        let piece = station();
        let (ox, oy) = (1000, 2000);
        // inner_y2 = 500, cauldron rim at ly 472. The ring passes through
        // (center_x +- radius, rim_y): distance exactly 32 -> rune wall.
        assert_eq!(piece.sample(ox + 260 + 32, oy + 472), Some(Material::RuneWall));
        assert_eq!(piece.sample(ox + 260 - 32, oy + 472), Some(Material::RuneWall));
        assert_eq!(piece.sample(ox + 390 + 32, oy + 472), Some(Material::RuneWall));
        // Inside the ring is open.
        assert_eq!(piece.sample(ox + 260, oy + 480), Some(Material::Empty));
        // Above rim height the ring is clipped away.
        assert_eq!(piece.sample(ox + 260, oy + 472 - 32), Some(Material::Empty));
        // Sampler bowl rim at ly 488: (325 + 16, 488) is on the ring.
        assert_eq!(piece.sample(ox + 325 + 16, oy + 488), Some(Material::RuneWall));
    }

    #[test]
    fn test_rune_texture_matches_reference_mix() {
        // Spot values pinned against the 32-bit wrapping hash mix.
        let mut h: i32 = 150i32
            .wrapping_mul(374_761_393)
            .wrapping_add(490i32.wrapping_mul(668_265_263));
        h = (h ^ (h >> 13)).wrapping_mul(1_274_126_177);
        let expected = ((h ^ (h >> 16)) & 0xff) > 220;
        assert_eq!(rune_texture(150, 490), expected);
    }
}
