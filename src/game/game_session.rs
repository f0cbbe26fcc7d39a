use std::time::{Duration, SystemTime};

use log::trace;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::layout::generate_solved_layout;
use super::moves::{slide_tile, IllegalMove};
use super::shuffle::shuffle;
use super::win::is_solved;
use crate::model::{Board, Difficulty, TimerState};

/// Inputs that drive a [`GameSession`] from one state to the next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    MoveTile(u32),
    Shuffle,
    Reset,
    AutoSolve,
    ChangeDifficulty(Difficulty),
    SetImage(String),
}

/// Coarse lifecycle state derived from the session flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Idle,
    Playing,
    Won,
}

/// One play session. Every transition returns a new session and leaves the
/// receiver untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSession {
    tiles: Board,
    moves: u32,
    timer: Option<TimerState>,
    is_playing: bool,
    is_won: bool,
    current_image: String,
    difficulty: Difficulty,
}

impl GameSession {
    /// A solved, idle session.
    pub fn new(difficulty: Difficulty, current_image: impl Into<String>) -> Self {
        Self {
            tiles: generate_solved_layout(difficulty.grid_size()),
            moves: 0,
            timer: None,
            is_playing: false,
            is_won: false,
            current_image: current_image.into(),
            difficulty,
        }
    }

    pub fn tiles(&self) -> &Board {
        &self.tiles
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn timer(&self) -> Option<&TimerState> {
        self.timer.as_ref()
    }

    pub fn start_time(&self) -> Option<SystemTime> {
        self.timer.as_ref().map(|timer| timer.started_timestamp)
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn is_won(&self) -> bool {
        self.is_won
    }

    pub fn current_image(&self) -> &str {
        &self.current_image
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn grid_size(&self) -> usize {
        self.difficulty.grid_size()
    }

    pub fn status(&self) -> SessionStatus {
        if self.is_won {
            SessionStatus::Won
        } else if self.is_playing {
            SessionStatus::Playing
        } else {
            SessionStatus::Idle
        }
    }

    /// Whether the clock display should be ticking.
    pub fn is_timing(&self) -> bool {
        self.is_playing && !self.is_won && self.timer.is_some()
    }

    pub fn elapsed_at(&self, now: SystemTime) -> Duration {
        self.timer
            .as_ref()
            .map(|timer| timer.elapsed_at(now))
            .unwrap_or_default()
    }

    /// Whether this session could have been reached through transitions.
    /// False only for hand-edited or corrupted snapshots.
    pub fn is_consistent(&self) -> bool {
        if self.tiles.grid_size() != self.difficulty.grid_size() {
            return false;
        }
        let solved = is_solved(&self.tiles, self.grid_size());
        match (self.is_won, &self.timer) {
            // won by a move: the clock froze at the winning move
            (true, Some(timer)) => solved && self.is_playing && !timer.is_running(),
            // auto-solved
            (true, None) => solved && !self.is_playing && self.moves == 0,
            (false, Some(timer)) => !solved && self.is_playing && timer.is_running(),
            (false, None) => solved && !self.is_playing && self.moves == 0,
        }
    }

    pub fn apply<R: Rng + ?Sized>(
        &self,
        event: &SessionEvent,
        now: SystemTime,
        rng: &mut R,
    ) -> GameSession {
        match event {
            SessionEvent::MoveTile(tile_id) => self.with_move(*tile_id, now),
            SessionEvent::Shuffle => self.shuffled(rng, now),
            SessionEvent::Reset => self.reset(),
            SessionEvent::AutoSolve => self.auto_solved(),
            SessionEvent::ChangeDifficulty(difficulty) => self.with_difficulty(*difficulty),
            SessionEvent::SetImage(image) => self.with_image(image.clone()),
        }
    }

    /// Like [`GameSession::with_move`] but reports why a selection was ignored.
    pub fn try_move(&self, tile_id: u32, now: SystemTime) -> Result<GameSession, IllegalMove> {
        if self.is_won {
            return Err(IllegalMove::GameWon);
        }
        let tiles = slide_tile(&self.tiles, tile_id)?;
        let is_won = is_solved(&tiles, self.grid_size());
        let timer = self
            .timer
            .clone()
            .unwrap_or_else(|| TimerState::started_at(now));
        let timer = if is_won { timer.ended(now) } else { timer };

        Ok(GameSession {
            tiles,
            moves: self.moves + 1,
            timer: Some(timer),
            is_playing: true,
            is_won,
            ..self.clone()
        })
    }

    /// Applies a tile selection; illegal selections return an identical session.
    pub fn with_move(&self, tile_id: u32, now: SystemTime) -> GameSession {
        match self.try_move(tile_id, now) {
            Ok(session) => session,
            Err(reason) => {
                trace!(target: "game_session", "Ignoring move of tile {}: {}", tile_id, reason);
                self.clone()
            }
        }
    }

    pub fn shuffled<R: Rng + ?Sized>(&self, rng: &mut R, now: SystemTime) -> GameSession {
        GameSession {
            tiles: shuffle(&self.tiles, rng),
            moves: 0,
            timer: Some(TimerState::started_at(now)),
            is_playing: true,
            is_won: false,
            ..self.clone()
        }
    }

    pub fn reset(&self) -> GameSession {
        GameSession::new(self.difficulty, self.current_image.clone())
    }

    /// Snaps the board to solved and marks the session won. No moves are
    /// credited and the clock is cleared.
    pub fn auto_solved(&self) -> GameSession {
        GameSession {
            is_won: true,
            ..self.reset()
        }
    }

    pub fn with_difficulty(&self, difficulty: Difficulty) -> GameSession {
        GameSession::new(difficulty, self.current_image.clone())
    }

    pub fn with_image(&self, current_image: String) -> GameSession {
        GameSession {
            current_image,
            ..self.clone()
        }
    }
}
