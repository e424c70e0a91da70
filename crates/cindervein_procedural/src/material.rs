//! # Material Table
//!
//! Every cell in the world is one small unsigned integer naming a
//! substance. The ids are wire format: the main-thread simulation and the
//! renderer index the same values, so they are pinned here and never
//! renumbered.
//!
//! A subset of materials is "wall-tagged": opaque structural walls that
//! attenuate light three levels per cell instead of one.

/// A terrain/fluid/solid substance, identified by its wire id.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Material {
    /// Nothing - seeds light at full strength.
    #[default]
    Empty = 0,
    /// Structural rock wall (wall-tagged).
    RockWall = 1,
    /// Loose sand.
    Sand = 2,
    /// Water.
    Water = 3,
    /// Soil.
    Soil = 4,
    /// Wood.
    Wood = 10,
    /// Fire.
    Fire = 11,
    /// Gunpowder.
    Gunpowder = 12,
    /// Gunpowder, ignited.
    GunpowderIgnited = 13,
    /// Oil.
    Oil = 14,
    /// Oil, burning.
    OilBurning = 15,
    /// Coal.
    Coal = 16,
    /// Coal, burning.
    CoalBurning = 17,
    /// Acid.
    Acid = 18,
    /// Glass.
    Glass = 19,
    /// Glass wall.
    GlassWall = 20,
    /// Adamantium - indestructible set-piece structure.
    Adamantium = 21,
    /// Copper ore.
    Copper = 22,
    /// Silver ore.
    Silver = 23,
    /// Gold ore.
    Gold = 24,
    /// Platinum ore.
    Platinum = 25,
    /// Rune wall - decorative set-piece detail.
    RuneWall = 26,
    /// Sandstone wall (wall-tagged), cave layer 0.
    SandstoneWall = 27,
    /// Volcanic wall (wall-tagged), cave layer 2.
    VolcanicWall = 28,
    /// Labyrinth wall (wall-tagged), cave layer 3.
    LabyrinthWall = 29,
    /// Magic wall (wall-tagged), cave layer 4.
    MagicWall = 30,
    /// Packed ground.
    Ground = 31,
    /// Iron ore.
    Iron = 32,
    /// Rusted iron.
    RustedIron = 33,
    /// Obsidian.
    Obsidian = 34,
    /// Lava.
    Lava = 40,
    /// Steam.
    Steam = 50,
    /// Smoke.
    Smoke = 51,
    /// Methane gas.
    Methane = 52,
    /// Methane gas, burning.
    MethaneBurning = 53,
}

impl Material {
    /// The wall-tagged materials: opaque to light, loss 3 per cell.
    pub const WALL_MATERIALS: [Self; 5] = [
        Self::RockWall,
        Self::SandstoneWall,
        Self::VolcanicWall,
        Self::LabyrinthWall,
        Self::MagicWall,
    ];

    /// Returns the wire id of this material.
    #[inline]
    #[must_use]
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// Converts a wire id back to a material.
    ///
    /// Unknown ids map to `Empty`; cell data coming across a border context
    /// is treated leniently, not validated.
    #[must_use]
    pub const fn from_id(id: u8) -> Self {
        match id {
            1 => Self::RockWall,
            2 => Self::Sand,
            3 => Self::Water,
            4 => Self::Soil,
            10 => Self::Wood,
            11 => Self::Fire,
            12 => Self::Gunpowder,
            13 => Self::GunpowderIgnited,
            14 => Self::Oil,
            15 => Self::OilBurning,
            16 => Self::Coal,
            17 => Self::CoalBurning,
            18 => Self::Acid,
            19 => Self::Glass,
            20 => Self::GlassWall,
            21 => Self::Adamantium,
            22 => Self::Copper,
            23 => Self::Silver,
            24 => Self::Gold,
            25 => Self::Platinum,
            26 => Self::RuneWall,
            27 => Self::SandstoneWall,
            28 => Self::VolcanicWall,
            29 => Self::LabyrinthWall,
            30 => Self::MagicWall,
            31 => Self::Ground,
            32 => Self::Iron,
            33 => Self::RustedIron,
            34 => Self::Obsidian,
            40 => Self::Lava,
            50 => Self::Steam,
            51 => Self::Smoke,
            52 => Self::Methane,
            53 => Self::MethaneBurning,
            _ => Self::Empty,
        }
    }

    /// Returns true for wall-tagged materials (light loss 3).
    #[inline]
    #[must_use]
    pub const fn is_wall(self) -> bool {
        matches!(
            self,
            Self::RockWall
                | Self::SandstoneWall
                | Self::VolcanicWall
                | Self::LabyrinthWall
                | Self::MagicWall
        )
    }

    /// Wall check straight on a raw cell id.
    #[inline]
    #[must_use]
    pub const fn is_wall_id(id: u8) -> bool {
        Self::from_id(id).is_wall()
    }
}
