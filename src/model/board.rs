use std::fmt::Display;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::tile::{Tile, EMPTY_TILE_ID};

pub const MIN_GRID_SIZE: usize = 2;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("tile count {0} is not a perfect square")]
    NotSquare(usize),
    #[error("grid size {0} is below the minimum of 2")]
    TooSmall(usize),
    #[error("expected exactly one empty tile, found {0}")]
    EmptyTileCount(usize),
    #[error("position {0} is occupied more than once or out of range")]
    BadPosition(usize),
    #[error("tile id {0} is duplicated or out of range")]
    BadId(u32),
}

/// The tiles of one puzzle, kept in tile order (not position order).
///
/// Positions always form a permutation of `0..grid_size²` and exactly one
/// tile is empty. Boards are never edited in place; moves produce a new board.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Tile>", into = "Vec<Tile>")]
pub struct Board {
    grid_size: usize,
    tiles: Vec<Tile>,
}

/// `(row, col)` of a cell index on a `grid_size` wide board.
pub fn cell_coordinates(grid_size: usize, position: usize) -> (usize, usize) {
    (position / grid_size, position % grid_size)
}

/// Integer square root of a tile count, or `None` when the count is not square.
pub fn infer_grid_size(n_cells: usize) -> Option<usize> {
    let grid_size = (n_cells as f64).sqrt().round() as usize;
    (grid_size * grid_size == n_cells).then_some(grid_size)
}

impl Board {
    pub fn from_tiles(tiles: Vec<Tile>) -> Result<Self, BoardError> {
        let grid_size = infer_grid_size(tiles.len()).ok_or(BoardError::NotSquare(tiles.len()))?;
        if grid_size < MIN_GRID_SIZE {
            return Err(BoardError::TooSmall(grid_size));
        }
        Self::validate(&tiles)?;
        Ok(Self { grid_size, tiles })
    }

    /// Constructor for tile sets produced by the engine itself.
    pub(crate) fn from_valid_tiles(grid_size: usize, tiles: Vec<Tile>) -> Self {
        debug_assert_eq!(tiles.len(), grid_size * grid_size);
        debug_assert_eq!(Self::validate(&tiles), Ok(()));
        Self { grid_size, tiles }
    }

    fn validate(tiles: &[Tile]) -> Result<(), BoardError> {
        let n_cells = tiles.len();
        let mut seen_positions = vec![false; n_cells];
        let mut seen_ids = vec![false; n_cells];
        let mut n_empty = 0;

        for tile in tiles {
            if tile.position >= n_cells || seen_positions[tile.position] {
                return Err(BoardError::BadPosition(tile.position));
            }
            seen_positions[tile.position] = true;

            if tile.is_empty != (tile.id == EMPTY_TILE_ID) {
                return Err(BoardError::BadId(tile.id));
            }
            if tile.is_empty {
                n_empty += 1;
                continue;
            }
            let id = tile.id as usize;
            if id >= n_cells || seen_ids[id] {
                return Err(BoardError::BadId(tile.id));
            }
            seen_ids[id] = true;
        }

        if n_empty != 1 {
            return Err(BoardError::EmptyTileCount(n_empty));
        }
        Ok(())
    }

    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    pub fn n_cells(&self) -> usize {
        self.tiles.len()
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn find_tile(&self, id: u32) -> Option<&Tile> {
        self.tiles.iter().find(|tile| tile.id == id)
    }

    pub fn empty_tile(&self) -> Option<&Tile> {
        self.tiles.iter().find(|tile| tile.is_empty)
    }

    pub fn tile_at(&self, position: usize) -> Option<&Tile> {
        self.tiles.iter().find(|tile| tile.position == position)
    }

    /// Tile ids read in position order, the empty slot reported as `0`.
    pub fn ids_in_position_order(&self) -> Vec<u32> {
        let mut ids = vec![EMPTY_TILE_ID; self.n_cells()];
        for tile in &self.tiles {
            ids[tile.position] = tile.id;
        }
        ids
    }

    /// Returns a new board where tiles `a` and `b` have traded positions.
    pub fn with_swapped_positions(&self, a: u32, b: u32) -> Option<Board> {
        let a_position = self.find_tile(a)?.position;
        let b_position = self.find_tile(b)?.position;
        let tiles = self
            .tiles
            .iter()
            .map(|tile| {
                if tile.id == a {
                    tile.with_position(b_position)
                } else if tile.id == b {
                    tile.with_position(a_position)
                } else {
                    *tile
                }
            })
            .collect();
        Some(Board::from_valid_tiles(self.grid_size, tiles))
    }
}

impl TryFrom<Vec<Tile>> for Board {
    type Error = BoardError;

    fn try_from(tiles: Vec<Tile>) -> Result<Self, Self::Error> {
        Board::from_tiles(tiles)
    }
}

impl From<Board> for Vec<Tile> {
    fn from(board: Board) -> Self {
        board.tiles
    }
}

impl std::fmt::Debug for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Board{:?}", self.ids_in_position_order())
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let width = (self.n_cells() - 1).to_string().len();
        for (index, id) in self.ids_in_position_order().iter().enumerate() {
            if *id == EMPTY_TILE_ID {
                write!(f, "{:>width$}", "_")?;
            } else {
                write!(f, "{:>width$}", id)?;
            }
            if (index + 1) % self.grid_size == 0 {
                writeln!(f)?;
            } else {
                write!(f, " ")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiles_from_order(order: &[u32]) -> Vec<Tile> {
        order
            .iter()
            .enumerate()
            .map(|(position, &id)| {
                if id == EMPTY_TILE_ID {
                    Tile::empty(position)
                } else {
                    Tile::numbered(id, position)
                }
            })
            .collect()
    }

    #[test]
    fn test_from_tiles_accepts_valid_board() {
        let board = Board::from_tiles(tiles_from_order(&[1, 2, 3, 4, 5, 6, 7, 0, 8])).unwrap();
        assert_eq!(board.grid_size(), 3);
        assert_eq!(board.empty_tile().unwrap().position, 7);
        assert_eq!(board.tile_at(8).unwrap().id, 8);
    }

    #[test]
    fn test_cell_coordinates() {
        assert_eq!(cell_coordinates(3, 0), (0, 0));
        assert_eq!(cell_coordinates(3, 5), (1, 2));
        assert_eq!(cell_coordinates(4, 12), (3, 0));
    }

    #[test]
    fn test_from_tiles_rejects_invariant_violations() {
        assert_eq!(
            Board::from_tiles(tiles_from_order(&[1, 2, 3, 4, 5, 6, 7, 8])),
            Err(BoardError::NotSquare(8))
        );
        assert_eq!(
            Board::from_tiles(tiles_from_order(&[1, 2, 3, 4, 5, 6, 7, 8, 4])),
            Err(BoardError::BadId(4))
        );
        assert_eq!(
            Board::from_tiles(tiles_from_order(&[1, 0, 3, 0])),
            Err(BoardError::EmptyTileCount(2))
        );

        let mut tiles = tiles_from_order(&[1, 2, 3, 0]);
        tiles[1].position = 0;
        assert_eq!(Board::from_tiles(tiles), Err(BoardError::BadPosition(0)));
    }

    #[test]
    fn test_with_swapped_positions_leaves_original_untouched() {
        let board = Board::from_tiles(tiles_from_order(&[1, 2, 3, 0])).unwrap();
        let swapped = board.with_swapped_positions(3, EMPTY_TILE_ID).unwrap();

        assert_eq!(board.ids_in_position_order(), vec![1, 2, 3, 0]);
        assert_eq!(swapped.ids_in_position_order(), vec![1, 2, 0, 3]);
        assert!(board.with_swapped_positions(9, EMPTY_TILE_ID).is_none());
    }

    #[test]
    fn test_infer_grid_size() {
        assert_eq!(infer_grid_size(9), Some(3));
        assert_eq!(infer_grid_size(25), Some(5));
        assert_eq!(infer_grid_size(10), None);
    }

    #[test]
    fn test_deserialize_rejects_malformed_board() {
        let json = r#"[{"id":1,"position":0,"isEmpty":false},{"id":2,"position":0,"isEmpty":false},
            {"id":3,"position":2,"isEmpty":false},{"id":0,"position":3,"isEmpty":true}]"#;
        assert!(serde_json::from_str::<Board>(json).is_err());
    }

    #[test]
    fn test_display() {
        let board = Board::from_tiles(tiles_from_order(&[1, 2, 3, 0])).unwrap();
        assert_eq!(board.to_string(), "1 2\n3 _\n");
    }
}
