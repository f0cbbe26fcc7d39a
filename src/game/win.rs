use crate::model::{infer_grid_size, Board};

/// True when every cell holds its home tile: tile `p + 1` at cell `p`, the
/// empty tile in the last cell.
pub fn is_solved(board: &Board, grid_size: usize) -> bool {
    let last_position = grid_size * grid_size - 1;
    assert_eq!(
        board.n_cells(),
        last_position + 1,
        "board does not match a {}x{} grid",
        grid_size,
        grid_size
    );

    (0..=last_position).all(|position| match board.tile_at(position) {
        Some(tile) if position == last_position => tile.is_empty,
        Some(tile) => !tile.is_empty && tile.id as usize == position + 1,
        None => false,
    })
}

/// [`is_solved`] with the grid size taken from the tile count.
pub fn is_solved_inferred(board: &Board) -> bool {
    let grid_size = match infer_grid_size(board.n_cells()) {
        Some(grid_size) => grid_size,
        None => panic!("tile count {} is not a perfect square", board.n_cells()),
    };
    is_solved(board, grid_size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::layout::generate_solved_layout;
    use crate::model::EMPTY_TILE_ID;

    #[test]
    fn test_solved_layouts_are_solved() {
        for grid_size in 3..=5 {
            let board = generate_solved_layout(grid_size);
            assert!(is_solved(&board, grid_size));
            assert!(is_solved_inferred(&board));
        }
    }

    #[test]
    fn test_is_solved_is_pure() {
        let board = generate_solved_layout(4)
            .with_swapped_positions(15, EMPTY_TILE_ID)
            .unwrap();
        let first = is_solved(&board, 4);
        let second = is_solved(&board, 4);
        assert!(!first);
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_tile_must_be_last() {
        // numbered tiles in order but the empty slot moved to the front
        let board = generate_solved_layout(3);
        let mut moved = board.clone();
        for id in (1..=8).rev() {
            moved = moved.with_swapped_positions(id, EMPTY_TILE_ID).unwrap();
        }
        assert_eq!(moved.ids_in_position_order(), vec![0, 1, 2, 3, 4, 5, 6, 7, 8]);
        assert!(!is_solved_inferred(&moved));
    }

    #[test]
    #[should_panic(expected = "does not match")]
    fn test_grid_size_mismatch_is_a_defect() {
        is_solved(&generate_solved_layout(3), 4);
    }
}
