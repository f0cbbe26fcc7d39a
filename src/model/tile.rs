use serde::{Deserialize, Serialize};

/// Id reserved for the empty slot.
pub const EMPTY_TILE_ID: u32 = 0;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tile {
    pub id: u32,
    pub position: usize, // row-major cell index
    pub is_empty: bool,
}

impl Tile {
    pub fn numbered(id: u32, position: usize) -> Self {
        debug_assert!(id != EMPTY_TILE_ID, "numbered tiles never use id 0");
        Self {
            id,
            position,
            is_empty: false,
        }
    }

    pub fn empty(position: usize) -> Self {
        Self {
            id: EMPTY_TILE_ID,
            position,
            is_empty: true,
        }
    }

    /// Cell this tile occupies when the puzzle is solved.
    pub fn home_position(&self, n_cells: usize) -> usize {
        if self.is_empty {
            n_cells - 1
        } else {
            self.id as usize - 1
        }
    }

    pub fn with_position(&self, position: usize) -> Self {
        Self { position, ..*self }
    }
}

impl std::fmt::Debug for Tile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty {
            write!(f, "_@{}", self.position)
        } else {
            write!(f, "{}@{}", self.id, self.position)
        }
    }
}
