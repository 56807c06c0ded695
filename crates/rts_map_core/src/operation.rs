//! Invertible edit records
//!
//! A record stores the values that must be written to make it the active
//! side of history. Applying it swaps those values with what the grid held,
//! so the same record undoes and redoes itself as it moves between stacks.

use serde::{Deserialize, Serialize};

use crate::{MapError, TileCoord, TileGrid, TileType};

/// Which tool family understands a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationKind {
    TilePaint,
    ObjectPlacement,
}

/// One cell of an operation record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileRecord {
    pub position: TileCoord,
    pub tile_type: TileType,
    pub variation: u8,
}

impl TileRecord {
    pub fn new(position: TileCoord, tile_type: TileType, variation: u8) -> Self {
        Self {
            position,
            tile_type,
            variation,
        }
    }
}

/// A committed edit. Entries touch disjoint cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationRecord {
    pub kind: OperationKind,
    pub entries: Vec<TileRecord>,
}

impl OperationRecord {
    pub fn new(kind: OperationKind) -> Self {
        Self {
            kind,
            entries: Vec::new(),
        }
    }

    pub fn with_capacity(kind: OperationKind, capacity: usize) -> Self {
        Self {
            kind,
            entries: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, entry: TileRecord) {
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write every entry into `grid` and replace it with the value it
    /// overwrote. Afterwards the record describes its own inverse.
    ///
    /// Every position is read before anything is written, so a record that
    /// does not fit the grid fails without touching it. If a write still
    /// fails, the entries already written are put back before returning.
    pub fn apply(&mut self, grid: &mut dyn TileGrid) -> Result<(), MapError> {
        let old = self
            .entries
            .iter()
            .map(|entry| grid.get_tile(entry.position))
            .collect::<Result<Vec<_>, _>>()?;

        for (i, entry) in self.entries.iter().enumerate() {
            if let Err(e) = grid.modify_tile(entry.position, entry.tile_type, entry.variation) {
                for (done, prev) in self.entries[..i].iter().zip(&old) {
                    let _ = grid.modify_tile(done.position, prev.tile_type, prev.variation);
                }
                return Err(e);
            }
        }

        for (entry, prev) in self.entries.iter_mut().zip(old) {
            entry.tile_type = prev.tile_type;
            entry.variation = prev.variation;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GridSize, TileData, TileMap};

    fn record_of(cells: &[(i32, i32)], tile_type: TileType, variation: u8) -> OperationRecord {
        let mut record = OperationRecord::new(OperationKind::TilePaint);
        for &(x, y) in cells {
            record.push(TileRecord::new(TileCoord::new(x, y), tile_type, variation));
        }
        record
    }

    #[test]
    fn test_apply_inverts_record_in_place() {
        let mut map = TileMap::new(GridSize::new(4, 4));
        map.modify_tile(TileCoord::new(1, 1), TileType::Rock, 5)
            .unwrap();

        let mut record = record_of(&[(1, 1), (2, 1)], TileType::Water, 9);
        record.apply(&mut map).unwrap();

        assert_eq!(
            map.get_tile(TileCoord::new(1, 1)).unwrap(),
            TileData::new(TileType::Water, 9)
        );
        assert_eq!(
            record.entries[0],
            TileRecord::new(TileCoord::new(1, 1), TileType::Rock, 5)
        );
        assert_eq!(
            record.entries[1],
            TileRecord::new(TileCoord::new(2, 1), TileType::Ground1, 0)
        );
    }

    #[test]
    fn test_apply_that_does_not_fit_leaves_grid_and_record() {
        let mut map = TileMap::new(GridSize::new(4, 4));
        let original = record_of(&[(1, 1), (9, 9)], TileType::Water, 3);
        let mut record = original.clone();

        assert!(matches!(
            record.apply(&mut map),
            Err(MapError::OutOfBounds { x: 9, y: 9, .. })
        ));
        assert_eq!(map, TileMap::new(GridSize::new(4, 4)));
        assert_eq!(record, original);
    }

    #[test]
    fn test_failed_write_rolls_back_earlier_entries() {
        let mut map = TileMap::new(GridSize::new(4, 4));
        map.modify_tile(TileCoord::new(0, 0), TileType::Rock, 2)
            .unwrap();
        let mut record = record_of(&[(0, 0)], TileType::Trees, 1);
        record.push(TileRecord::new(TileCoord::new(1, 0), TileType::Water, 200));
        let original = record.clone();

        assert!(matches!(
            record.apply(&mut map),
            Err(MapError::VariationOutOfRange(200))
        ));
        assert_eq!(
            map.get_tile(TileCoord::new(0, 0)).unwrap(),
            TileData::new(TileType::Rock, 2)
        );
        assert_eq!(record, original);
    }

    #[test]
    fn test_apply_twice_restores_grid_and_record() {
        let mut map = TileMap::new(GridSize::new(6, 6));
        for (i, (coord, _)) in map.clone().iter().enumerate() {
            let tile_type = TileType::ALL[i % TileType::ALL.len()];
            map.modify_tile(coord, tile_type, (i % 100) as u8).unwrap();
        }
        let before = map.clone();

        let original = record_of(&[(0, 0), (3, 2), (5, 5)], TileType::Trees, 1);
        let mut record = original.clone();

        record.apply(&mut map).unwrap();
        assert_ne!(map, before);
        record.apply(&mut map).unwrap();

        assert_eq!(map, before);
        assert_eq!(record, original);
    }

    #[test]
    fn test_apply_propagates_grid_errors() {
        let mut map = TileMap::new(GridSize::new(2, 2));
        let mut record = record_of(&[(0, 0), (7, 7)], TileType::Mud2, 0);
        assert!(matches!(
            record.apply(&mut map),
            Err(MapError::OutOfBounds { x: 7, y: 7, .. })
        ));
    }
}
