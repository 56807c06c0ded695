//! Tile records and grid coordinates

use serde::{Deserialize, Serialize};

/// Exclusive upper bound for tile variations
pub const VARIATION_RANGE: u8 = 100;

/// Terrain kinds a map cell can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TileType {
    #[default]
    Ground1,
    Ground2,
    Mud1,
    Mud2,
    WallBroken,
    RockBroken,
    TreesFelled,
    Water,
    Rock,
    WallHu,
    WallHuDamaged,
    WallOc,
    WallOcDamaged,
    Trees,
}

impl TileType {
    /// Every tile type, in palette order
    pub const ALL: [TileType; 14] = [
        TileType::Ground1,
        TileType::Ground2,
        TileType::Mud1,
        TileType::Mud2,
        TileType::WallBroken,
        TileType::RockBroken,
        TileType::TreesFelled,
        TileType::Water,
        TileType::Rock,
        TileType::WallHu,
        TileType::WallHuDamaged,
        TileType::WallOc,
        TileType::WallOcDamaged,
        TileType::Trees,
    ];

    /// Display name used by the palette
    pub fn name(&self) -> &'static str {
        match self {
            TileType::Ground1 => "GROUND1",
            TileType::Ground2 => "GROUND2",
            TileType::Mud1 => "MUD",
            TileType::Mud2 => "MUD2",
            TileType::WallBroken => "WALL_BROKEN",
            TileType::RockBroken => "ROCK_BROKEN",
            TileType::TreesFelled => "TREES_FELLED",
            TileType::Water => "WATER",
            TileType::Rock => "ROCK",
            TileType::WallHu => "WALL_HU",
            TileType::WallHuDamaged => "WALL_HU_DAMAGED",
            TileType::WallOc => "WALL_OC",
            TileType::WallOcDamaged => "WALL_OC_DAMAGED",
            TileType::Trees => "TREES",
        }
    }

    /// Position in [`TileType::ALL`]
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// Live value of a single map cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TileData {
    pub tile_type: TileType,
    /// Visual variation, always below [`VARIATION_RANGE`]
    pub variation: u8,
}

impl TileData {
    pub fn new(tile_type: TileType, variation: u8) -> Self {
        Self {
            tile_type,
            variation,
        }
    }
}

/// Signed cell coordinate.
///
/// Pointer positions may land outside the map, so coordinates are signed;
/// anything handed to a grid write must satisfy `0 <= x < width`, `0 <= y < height`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TileCoord {
    pub x: i32,
    pub y: i32,
}

impl TileCoord {
    pub const ZERO: TileCoord = TileCoord { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Component-wise minimum
    pub fn min(self, other: TileCoord) -> TileCoord {
        TileCoord::new(self.x.min(other.x), self.y.min(other.y))
    }

    /// Component-wise maximum
    pub fn max(self, other: TileCoord) -> TileCoord {
        TileCoord::new(self.x.max(other.x), self.y.max(other.y))
    }
}

impl From<(i32, i32)> for TileCoord {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Dimensions of a tile grid in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridSize {
    pub width: u32,
    pub height: u32,
}

impl GridSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// One past the last valid cell, as a coordinate
    pub fn as_coord(&self) -> TileCoord {
        TileCoord::new(self.width as i32, self.height as i32)
    }

    pub fn contains(&self, coord: TileCoord) -> bool {
        coord.x >= 0
            && coord.y >= 0
            && (coord.x as u32) < self.width
            && (coord.y as u32) < self.height
    }

    /// Row-major index of an in-bounds coordinate
    pub fn index_of(&self, coord: TileCoord) -> Option<usize> {
        if self.contains(coord) {
            Some(coord.y as usize * self.width as usize + coord.x as usize)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_type_indices_match_palette() {
        for (i, tile_type) in TileType::ALL.iter().enumerate() {
            assert_eq!(tile_type.index(), i);
            assert_eq!(TileType::from_index(i), Some(*tile_type));
        }
        assert_eq!(TileType::from_index(TileType::ALL.len()), None);
        assert_eq!(TileType::default(), TileType::Ground1);
        assert_eq!(TileType::Mud1.name(), "MUD");
    }

    #[test]
    fn test_grid_size_indexing() {
        let size = GridSize::new(4, 3);
        assert_eq!(size.area(), 12);
        assert_eq!(size.index_of(TileCoord::new(0, 0)), Some(0));
        assert_eq!(size.index_of(TileCoord::new(3, 2)), Some(11));
        assert_eq!(size.index_of(TileCoord::new(4, 0)), None);
        assert_eq!(size.index_of(TileCoord::new(0, -1)), None);
        assert!(!size.contains(TileCoord::new(-1, 1)));
    }
}
