use itertools::Itertools;
use log::trace;
use rand::seq::SliceRandom;
use rand::Rng;

use super::layout::generate_solved_layout;
use crate::model::{Board, Tile, EMPTY_TILE_ID};

/// Number of pairs `i < j` with `ids[i] > ids[j]`, ignoring the empty slot.
pub fn count_inversions(ids: &[u32]) -> usize {
    ids.iter()
        .filter(|&&id| id != EMPTY_TILE_ID)
        .tuple_combinations()
        .filter(|(a, b)| a > b)
        .count()
}

/// Solvability test for an arrangement whose empty slot sits in the last cell:
/// such an arrangement is reachable from the solved layout iff its inversion
/// count is even.
pub fn is_solvable(ids: &[u32]) -> bool {
    count_inversions(ids) % 2 == 0
}

fn is_identity(tiles: &[Tile]) -> bool {
    tiles
        .iter()
        .filter(|tile| !tile.is_empty)
        .enumerate()
        .all(|(index, tile)| tile.id as usize == index + 1)
}

/// Random solvable tile order for a `grid_size` board, before positions are
/// reassigned. The numbered tiles are permuted uniformly and the empty tile
/// stays last; orders with odd parity, and the solved order itself, are
/// re-rolled.
pub fn shuffled_order<R: Rng + ?Sized>(grid_size: usize, rng: &mut R) -> Vec<Tile> {
    let mut tiles = generate_solved_layout(grid_size).tiles().to_vec();
    let n_numbered = tiles.len() - 1;
    let mut attempts = 0;

    loop {
        attempts += 1;
        tiles[..n_numbered].shuffle(rng);
        let ids: Vec<u32> = tiles.iter().map(|tile| tile.id).collect();
        if is_solvable(&ids) && !is_identity(&tiles) {
            trace!(
                target: "shuffle",
                "Accepted {}x{} shuffle after {} attempts: {:?}",
                grid_size,
                grid_size,
                attempts,
                ids
            );
            return tiles;
        }
    }
}

/// Produces a new solvable, unsolved board of the same size as `board`.
pub fn shuffle<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Board {
    let grid_size = board.grid_size();
    let tiles = shuffled_order(grid_size, rng)
        .into_iter()
        .enumerate()
        .map(|(position, tile)| tile.with_position(position))
        .collect();
    Board::from_valid_tiles(grid_size, tiles)
}
