use thiserror::Error;

use crate::model::{cell_coordinates, Board};

/// Why a tile selection did not move anything. These are never surfaced to
/// the player; the session simply stays as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IllegalMove {
    #[error("the puzzle is already won")]
    GameWon,
    #[error("no tile with id {0}")]
    UnknownTile(u32),
    #[error("board has no empty tile")]
    MissingEmptyTile,
    #[error("tile {0} is not next to the empty cell")]
    NotAdjacent(u32),
}

/// Orthogonal neighbours only; a cell is not adjacent to itself.
pub fn are_adjacent(grid_size: usize, a: usize, b: usize) -> bool {
    let (a_row, a_col) = cell_coordinates(grid_size, a);
    let (b_row, b_col) = cell_coordinates(grid_size, b);

    (a_row.abs_diff(b_row) == 1 && a_col == b_col)
        || (a_col.abs_diff(b_col) == 1 && a_row == b_row)
}

/// Ids of the tiles that may currently slide into the empty cell.
pub fn movable_tiles(board: &Board) -> Vec<u32> {
    let Some(empty) = board.empty_tile() else {
        return Vec::new();
    };
    let mut ids: Vec<u32> = board
        .tiles()
        .iter()
        .filter(|tile| are_adjacent(board.grid_size(), tile.position, empty.position))
        .map(|tile| tile.id)
        .collect();
    ids.sort_unstable();
    ids
}

/// Slides `tile_id` into the empty cell, returning the new board.
pub fn slide_tile(board: &Board, tile_id: u32) -> Result<Board, IllegalMove> {
    let tile = board
        .find_tile(tile_id)
        .ok_or(IllegalMove::UnknownTile(tile_id))?;
    let empty = match board.empty_tile() {
        Some(empty) => empty,
        None => {
            debug_assert!(false, "board without an empty tile: {:?}", board);
            return Err(IllegalMove::MissingEmptyTile);
        }
    };

    if !are_adjacent(board.grid_size(), tile.position, empty.position) {
        return Err(IllegalMove::NotAdjacent(tile_id));
    }

    board
        .with_swapped_positions(tile.id, empty.id)
        .ok_or(IllegalMove::UnknownTile(tile_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::layout::generate_solved_layout;
    use crate::model::EMPTY_TILE_ID;

    #[test]
    fn test_adjacency() {
        // 3x3: cell 4 is the centre
        assert!(are_adjacent(3, 4, 1));
        assert!(are_adjacent(3, 4, 3));
        assert!(are_adjacent(3, 4, 5));
        assert!(are_adjacent(3, 4, 7));
        assert!(!are_adjacent(3, 4, 0)); // diagonal
        assert!(!are_adjacent(3, 4, 4));
        // end of one row is not next to the start of the following row
        assert!(!are_adjacent(3, 2, 3));
        assert!(!are_adjacent(4, 0, 2));
    }

    #[test]
    fn test_slide_tile_next_to_empty() {
        let board = generate_solved_layout(3);
        let moved = slide_tile(&board, 8).unwrap();

        assert_eq!(moved.empty_tile().unwrap().position, 7);
        assert_eq!(moved.find_tile(8).unwrap().position, 8);
        assert_eq!(
            moved.ids_in_position_order(),
            vec![1, 2, 3, 4, 5, 6, 7, EMPTY_TILE_ID, 8]
        );
    }

    #[test]
    fn test_non_adjacent_is_rejected_on_every_size() {
        for grid_size in 3..=5 {
            let board = generate_solved_layout(grid_size);
            let movable = movable_tiles(&board);
            for tile in board.tiles() {
                let result = slide_tile(&board, tile.id);
                if movable.contains(&tile.id) {
                    assert!(result.is_ok());
                } else {
                    assert_eq!(result, Err(IllegalMove::NotAdjacent(tile.id)));
                }
            }
        }
    }

    #[test]
    fn test_unknown_tile() {
        let board = generate_solved_layout(3);
        assert_eq!(slide_tile(&board, 9), Err(IllegalMove::UnknownTile(9)));
    }

    #[test]
    fn test_movable_tiles_from_solved() {
        assert_eq!(movable_tiles(&generate_solved_layout(3)), vec![6, 8]);
        assert_eq!(movable_tiles(&generate_solved_layout(4)), vec![12, 15]);
    }

    #[test]
    fn test_slide_and_back_is_symmetric() {
        let board = generate_solved_layout(4);
        let there = slide_tile(&board, 12).unwrap();
        let back = slide_tile(&there, 12).unwrap();
        assert_eq!(back, board);
    }
}
