//! Tile grid storage and the grid access trait used by editor tools

use serde::{Deserialize, Serialize};

use crate::{GridSize, TileCoord, TileData, TileType, VARIATION_RANGE};

/// Document-level failures when touching a tile grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    /// Coordinate outside the grid
    OutOfBounds {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
    },
    /// Variation not below [`VARIATION_RANGE`]
    VariationOutOfRange(u8),
    /// Two grids that must share dimensions don't
    SizeMismatch { expected: GridSize, found: GridSize },
}

impl std::fmt::Display for MapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MapError::OutOfBounds {
                x,
                y,
                width,
                height,
            } => write!(
                f,
                "Tile ({}, {}) is outside the {}x{} map",
                x, y, width, height
            ),
            MapError::VariationOutOfRange(v) => write!(
                f,
                "Tile variation {} is out of range (must be below {})",
                v, VARIATION_RANGE
            ),
            MapError::SizeMismatch { expected, found } => write!(
                f,
                "Map size mismatch: expected {}x{}, found {}x{}",
                expected.width, expected.height, found.width, found.height
            ),
        }
    }
}

impl std::error::Error for MapError {}

/// Mutable tile grid the editor paints into.
///
/// `modify_tile` must only touch the addressed cell.
pub trait TileGrid {
    fn size(&self) -> GridSize;

    fn get_tile(&self, coord: TileCoord) -> Result<TileData, MapError>;

    fn modify_tile(
        &mut self,
        coord: TileCoord,
        tile_type: TileType,
        variation: u8,
    ) -> Result<(), MapError>;
}

/// Row-major grid of tiles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileMap {
    width: u32,
    height: u32,
    tiles: Vec<TileData>,
}

impl TileMap {
    /// Create a map filled with the default tile
    pub fn new(size: GridSize) -> Self {
        Self::filled(size, TileData::default())
    }

    pub fn filled(size: GridSize, tile: TileData) -> Self {
        Self {
            width: size.width,
            height: size.height,
            tiles: vec![tile; size.area()],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn tiles(&self) -> &[TileData] {
        &self.tiles
    }

    /// Iterate over `(coord, tile)` pairs in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (TileCoord, TileData)> + '_ {
        let width = self.width.max(1) as usize;
        self.tiles.iter().enumerate().map(move |(i, tile)| {
            (
                TileCoord::new((i % width) as i32, (i / width) as i32),
                *tile,
            )
        })
    }

    /// Check that the tile buffer matches the declared dimensions
    ///
    /// Maps read from disk go through this before use.
    pub fn validate(&self) -> Result<(), MapError> {
        let expected = self.size().area();
        if self.tiles.len() != expected {
            return Err(MapError::SizeMismatch {
                expected: self.size(),
                found: GridSize::new(self.tiles.len() as u32, 1),
            });
        }
        if let Some(tile) = self.tiles.iter().find(|t| t.variation >= VARIATION_RANGE) {
            return Err(MapError::VariationOutOfRange(tile.variation));
        }
        Ok(())
    }

    fn index(&self, coord: TileCoord) -> Result<usize, MapError> {
        self.size()
            .index_of(coord)
            .ok_or(MapError::OutOfBounds {
                x: coord.x,
                y: coord.y,
                width: self.width,
                height: self.height,
            })
    }
}

impl TileGrid for TileMap {
    fn size(&self) -> GridSize {
        GridSize::new(self.width, self.height)
    }

    fn get_tile(&self, coord: TileCoord) -> Result<TileData, MapError> {
        let index = self.index(coord)?;
        Ok(self.tiles[index])
    }

    fn modify_tile(
        &mut self,
        coord: TileCoord,
        tile_type: TileType,
        variation: u8,
    ) -> Result<(), MapError> {
        if variation >= VARIATION_RANGE {
            return Err(MapError::VariationOutOfRange(variation));
        }
        let index = self.index(coord)?;
        self.tiles[index] = TileData::new(tile_type, variation);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_map_is_default_filled() {
        let map = TileMap::new(GridSize::new(5, 4));
        assert_eq!(map.tiles().len(), 20);
        assert!(map.tiles().iter().all(|t| *t == TileData::default()));
        assert!(map.validate().is_ok());
    }

    #[test]
    fn test_modify_single_cell() {
        let mut map = TileMap::new(GridSize::new(5, 5));
        map.modify_tile(TileCoord::new(2, 3), TileType::Water, 42)
            .unwrap();

        assert_eq!(
            map.get_tile(TileCoord::new(2, 3)).unwrap(),
            TileData::new(TileType::Water, 42)
        );
        let changed = map.iter().filter(|(_, t)| *t != TileData::default()).count();
        assert_eq!(changed, 1);
    }

    #[test]
    fn test_out_of_bounds_is_rejected() {
        let mut map = TileMap::new(GridSize::new(3, 3));
        let err = map
            .modify_tile(TileCoord::new(3, 0), TileType::Rock, 0)
            .unwrap_err();
        assert!(matches!(err, MapError::OutOfBounds { x: 3, y: 0, .. }));
        assert!(map.get_tile(TileCoord::new(-1, 0)).is_err());
    }

    #[test]
    fn test_variation_range_is_enforced() {
        let mut map = TileMap::new(GridSize::new(3, 3));
        assert_eq!(
            map.modify_tile(TileCoord::ZERO, TileType::Rock, 100),
            Err(MapError::VariationOutOfRange(100))
        );
        assert!(map.modify_tile(TileCoord::ZERO, TileType::Rock, 99).is_ok());
    }

    #[test]
    fn test_validate_rejects_truncated_buffer() {
        let json = r#"{"width":2,"height":2,"tiles":[{"tile_type":"Water","variation":0}]}"#;
        let map: TileMap = serde_json::from_str(json).unwrap();
        assert!(matches!(
            map.validate(),
            Err(MapError::SizeMismatch { .. })
        ));
    }
}
