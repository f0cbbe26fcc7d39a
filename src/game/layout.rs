use crate::model::{Board, Tile, MIN_GRID_SIZE};

/// Builds the solved arrangement: tile `i` at cell `i - 1`, the empty tile in
/// the last cell.
pub fn generate_solved_layout(grid_size: usize) -> Board {
    assert!(
        grid_size >= MIN_GRID_SIZE,
        "grid_size must be >= {}",
        MIN_GRID_SIZE
    );
    let n_cells = grid_size * grid_size;

    let mut tiles: Vec<Tile> = (1..n_cells)
        .map(|id| Tile::numbered(id as u32, id - 1))
        .collect();
    tiles.push(Tile::empty(n_cells - 1));

    Board::from_valid_tiles(grid_size, tiles)
}
