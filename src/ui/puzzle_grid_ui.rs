use log::trace;

use crate::events::EventHandler;
use crate::game::{GameSession, SessionStatus};
use crate::helpers::{cell_label, row_label};
use crate::images::image_name_for;
use crate::model::{GameEngineEvent, Tile};

/// Text rendering of the board. Without numbers each tile shows the cell it
/// belongs in, which is what the image slice on it would tell the player.
pub struct PuzzleGridUI {
    session: Option<GameSession>,
    show_tile_numbers: bool,
    history_index: usize,
    history_length: usize,
}

impl PuzzleGridUI {
    pub fn new(show_tile_numbers: bool) -> Self {
        Self {
            session: None,
            show_tile_numbers,
            history_index: 0,
            history_length: 0,
        }
    }

    pub fn show_tile_numbers(&self) -> bool {
        self.show_tile_numbers
    }

    pub fn toggle_tile_numbers(&mut self) -> bool {
        self.show_tile_numbers = !self.show_tile_numbers;
        self.show_tile_numbers
    }

    fn tile_face(&self, tile: &Tile, grid_size: usize) -> String {
        if tile.is_empty {
            String::new()
        } else if self.show_tile_numbers {
            tile.id.to_string()
        } else {
            let home = tile.home_position(grid_size * grid_size);
            cell_label(home / grid_size, home % grid_size)
        }
    }

    pub fn render(&self) -> String {
        let Some(session) = &self.session else {
            return String::new();
        };
        let board = session.tiles();
        let grid_size = board.grid_size();
        let mut lines = Vec::with_capacity(grid_size + 4);

        lines.push(format!(
            "{} puzzle: {}",
            session.difficulty(),
            image_name_for(session.current_image())
        ));
        let header: String = (1..=grid_size).map(|col| format!("{:^5}", col)).collect();
        lines.push(format!("   {}", header));
        for row in 0..grid_size {
            let cells: String = (0..grid_size)
                .map(|col| {
                    let face = board
                        .tile_at(row * grid_size + col)
                        .map(|tile| self.tile_face(tile, grid_size))
                        .unwrap_or_default();
                    format!("[{:>3}]", face)
                })
                .collect();
            lines.push(format!("{}  {}", row_label(row), cells));
        }

        match session.status() {
            SessionStatus::Idle => lines.push("Type `shuffle` to start.".to_string()),
            SessionStatus::Won if session.moves() > 0 => {
                lines.push(format!("Solved in {} moves!", session.moves()))
            }
            SessionStatus::Won => lines.push("Solved.".to_string()),
            SessionStatus::Playing => (),
        }

        let mut history = Vec::new();
        if self.history_index > 0 {
            history.push("undo");
        }
        if self.history_index + 1 < self.history_length {
            history.push("redo");
        }
        if !history.is_empty() {
            lines.push(format!("({} available)", history.join(", ")));
        }
        lines.join("\n")
    }
}

impl EventHandler<GameEngineEvent> for PuzzleGridUI {
    fn handle_event(&mut self, event: &GameEngineEvent) {
        match event {
            GameEngineEvent::SessionUpdated(session) => self.session = Some(session.clone()),
            GameEngineEvent::HistoryChanged {
                history_index,
                history_length,
            } => {
                trace!(
                    target: "puzzle_grid_ui",
                    "history {:?} {:?}",
                    history_index,
                    history_length
                );
                self.history_index = *history_index;
                self.history_length = *history_length;
            }
            _ => (),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Difficulty;
    use std::time::SystemTime;

    fn grid_with(session: GameSession, show_tile_numbers: bool) -> PuzzleGridUI {
        let mut grid = PuzzleGridUI::new(show_tile_numbers);
        grid.handle_event(&GameEngineEvent::SessionUpdated(session));
        grid
    }

    #[test]
    fn test_render_numbers() {
        let session = GameSession::new(Difficulty::Easy, "/uploads/a.jpg");
        let rendered = grid_with(session, true).render();
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[0], "3x3 puzzle: Custom Image");
        assert_eq!(lines[1], "     1    2    3  ");
        assert_eq!(lines[2], "A  [  1][  2][  3]");
        assert_eq!(lines[4], "C  [  7][  8][   ]");
        assert_eq!(lines[5], "Type `shuffle` to start.");
    }

    #[test]
    fn test_render_home_cells_after_move() {
        let session =
            GameSession::new(Difficulty::Easy, "img").with_move(8, SystemTime::now());
        let mut grid = grid_with(session, false);
        grid.handle_event(&GameEngineEvent::HistoryChanged {
            history_index: 1,
            history_length: 2,
        });
        let rendered = grid.render();

        // tile 8 belongs in C2 and now sits in C3
        assert!(rendered.contains("C  [ C1][   ][ C2]"));
        assert!(rendered.ends_with("(undo available)"));

        assert!(grid.toggle_tile_numbers());
        assert!(grid.render().contains("C  [  7][   ][  8]"));
    }

    #[test]
    fn test_render_win() {
        let now = SystemTime::now();
        let session = GameSession::new(Difficulty::Easy, "img")
            .with_move(6, now)
            .with_move(6, now);
        assert!(grid_with(session, true).render().contains("Solved in 2 moves!"));
    }

    #[test]
    fn test_render_nothing_before_first_session() {
        assert_eq!(PuzzleGridUI::new(true).render(), "");
    }
}
