use log::{debug, error, info, trace};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::SystemTime;
use uuid::Uuid;

use super::settings::Settings;
use super::{GameSession, SessionEvent};
use crate::destroyable::Destroyable;
use crate::events::{EventEmitter, EventObserver, Unsubscriber};
use crate::images::history_image_name;
use crate::model::{GameEngineCommand, GameEngineEvent, GameStats, TimerState};
use crate::storage::SharedStorage;

/// Owns the live session and turns [`GameEngineCommand`]s into session
/// transitions, publishing the results as [`GameEngineEvent`]s.
///
/// Sessions are immutable and shared through `Rc`; every accepted move pushes
/// a new one onto the undo history.
pub struct GameEngine {
    history: Vec<Rc<GameSession>>,
    history_index: usize,
    pub current_session: Rc<GameSession>,
    current_playthrough_id: Uuid,
    saved_playthrough_id: Option<Uuid>,
    debug_mode: bool,
    rng: StdRng,
    storage: SharedStorage,
    settings: Settings,
    subscription_id: Option<Unsubscriber<GameEngineCommand>>,
    game_engine_event_emitter: EventEmitter<GameEngineEvent>,
}

impl Destroyable for GameEngine {
    fn destroy(&mut self) {
        if let Some(subscription_id) = self.subscription_id.take() {
            subscription_id.unsubscribe();
        }
    }
}

impl GameEngine {
    pub fn new(
        game_engine_command_observer: EventObserver<GameEngineCommand>,
        game_engine_event_emitter: EventEmitter<GameEngineEvent>,
        storage: SharedStorage,
        settings: Settings,
        seed: Option<u64>,
    ) -> Rc<RefCell<Self>> {
        let seed = seed.unwrap_or_else(|| rand::rng().next_u64());
        let session = Rc::new(GameSession::new(
            settings.difficulty,
            settings.current_image.clone(),
        ));
        let game_engine = Self {
            history: vec![session.clone()],
            history_index: 0,
            current_session: session,
            current_playthrough_id: Uuid::new_v4(),
            saved_playthrough_id: None,
            debug_mode: Settings::is_debug_mode(),
            rng: StdRng::seed_from_u64(seed),
            storage,
            settings,
            subscription_id: None,
            game_engine_event_emitter,
        };
        debug!(target: "game_engine", "Shuffle seed: {}", seed);
        let refcell = Rc::new(RefCell::new(game_engine));
        GameEngine::wire_subscription(refcell.clone(), game_engine_command_observer);
        refcell
    }

    fn wire_subscription(
        game_engine: Rc<RefCell<Self>>,
        game_engine_command_observer: EventObserver<GameEngineCommand>,
    ) {
        let game_engine_handler = game_engine.clone();
        let subscription_id = game_engine_command_observer.subscribe(move |command| {
            let mut game_engine = game_engine_handler.borrow_mut();
            game_engine.handle_command(command.clone());
        });
        game_engine.borrow_mut().subscription_id = Some(subscription_id);
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn handle_command(&mut self, command: GameEngineCommand) {
        trace!(target: "game_engine", "Handling command: {:?}", command);
        match command {
            GameEngineCommand::MoveTile(tile_id) => self.move_tile(tile_id),
            GameEngineCommand::Shuffle => self.start_session_with(SessionEvent::Shuffle),
            GameEngineCommand::Reset => self.start_session_with(SessionEvent::Reset),
            GameEngineCommand::Solve => self.start_session_with(SessionEvent::AutoSolve),
            GameEngineCommand::ChangeDifficulty(difficulty) => {
                self.settings.difficulty = difficulty;
                self.start_session_with(SessionEvent::ChangeDifficulty(difficulty));
            }
            GameEngineCommand::SetImage(image) => self.set_image(image),
            GameEngineCommand::Undo => self.undo(),
            GameEngineCommand::Redo => self.redo(),
            GameEngineCommand::SaveGame => self.save_game(),
            GameEngineCommand::LoadHistory(limit) => self.load_history(limit),
            GameEngineCommand::LoadState(session) => {
                self.settings.difficulty = session.difficulty();
                self.settings.current_image = session.current_image().to_string();
                self.start_session(session);
            }
            GameEngineCommand::InitDisplay => {
                self.sync_session_display();
                self.emit_history_changed();
                self.emit_timer_state();
            }
        }
    }

    fn start_session_with(&mut self, event: SessionEvent) {
        let session = self
            .current_session
            .apply(&event, SystemTime::now(), &mut self.rng);
        self.start_session(session);
    }

    /// Replaces the session and its history; used for every new game.
    fn start_session(&mut self, session: GameSession) {
        info!(
            target: "game_engine",
            "New session; difficulty: {}; status: {:?}",
            session.difficulty(),
            session.status()
        );
        if self.debug_mode {
            debug!(target: "game_engine", "Board:\n{}", session.tiles());
        }
        self.current_session = Rc::new(session);
        self.history.clear();
        self.history.push(self.current_session.clone());
        self.history_index = 0;
        self.current_playthrough_id = Uuid::new_v4();
        self.sync_session_display();
        self.emit_history_changed();
        self.emit_timer_state();
    }

    /// Makes `session` current and records it in the undo history.
    fn push_session(&mut self, session: GameSession) {
        let timer_changed = session.timer() != self.current_session.timer();
        self.current_session = Rc::new(session);
        // if we're not at the end of the list, prune redo state
        if self.history_index < self.history.len() - 1 {
            self.history.truncate(self.history_index + 1);
        }
        self.history.push(Rc::clone(&self.current_session));
        self.history_index += 1;

        self.sync_session_display();
        self.emit_history_changed();
        if timer_changed {
            self.emit_timer_state();
        }
    }

    fn move_tile(&mut self, tile_id: u32) {
        match self.current_session.try_move(tile_id, SystemTime::now()) {
            Ok(session) => {
                let is_won = session.is_won();
                self.push_session(session);
                if is_won {
                    self.complete_puzzle();
                }
            }
            Err(reason) => {
                trace!(target: "game_engine", "Ignoring move of tile {}: {}", tile_id, reason);
            }
        }
    }

    /// Swapping the picture never touches the board, so the undo history is
    /// kept and rewritten to show the new image.
    fn set_image(&mut self, image: String) {
        self.settings.current_image = image.clone();
        self.history = self
            .history
            .iter()
            .map(|session| Rc::new(session.with_image(image.clone())))
            .collect();
        self.current_session = self.history[self.history_index].clone();
        self.sync_session_display();
    }

    fn undo(&mut self) {
        if self.history_index > 0 {
            let previous_timer = self.current_session.timer().cloned();
            self.history_index -= 1;
            self.current_session = self.history[self.history_index].clone();
            self.sync_session_display();
            if previous_timer.as_ref() != self.current_session.timer() {
                self.emit_timer_state();
            }
        }
        self.emit_history_changed();
    }

    fn redo(&mut self) {
        if self.history_index < self.history.len() - 1 {
            let previous_timer = self.current_session.timer().cloned();
            self.history_index += 1;
            self.current_session = self.history[self.history_index].clone();
            self.sync_session_display();
            if previous_timer.as_ref() != self.current_session.timer() {
                self.emit_timer_state();
            }
        }
        self.emit_history_changed();
    }

    fn complete_puzzle(&mut self) {
        let stats = self.get_game_stats();
        info!(
            target: "game_engine",
            "Puzzle solved in {} moves, {}s",
            stats.moves,
            stats.completion_time.as_secs()
        );
        self.game_engine_event_emitter
            .emit(&GameEngineEvent::PuzzleCompleted(stats));
    }

    /// Writes the finished game to the history store. Only sessions that were
    /// actually played to a win are saved, and each playthrough at most once.
    fn save_game(&mut self) {
        let session = self.current_session.clone();
        if !session.is_won() || session.start_time().is_none() {
            debug!(target: "game_engine", "Nothing to save; status {:?}", session.status());
            return;
        }
        if self.saved_playthrough_id == Some(self.current_playthrough_id) {
            debug!(target: "game_engine", "Playthrough already saved");
            return;
        }

        let new_game = self.get_game_stats().to_new_history();
        let saved = self.storage.borrow_mut().save_game_history(new_game);
        match saved {
            Ok(record) => {
                self.saved_playthrough_id = Some(self.current_playthrough_id);
                self.game_engine_event_emitter
                    .emit(&GameEngineEvent::GameSaved(record));
                self.load_history(None);
            }
            Err(err) => {
                error!(target: "game_engine", "Failed to save game: {}", err);
                self.game_engine_event_emitter
                    .emit(&GameEngineEvent::PersistenceFailed(format!(
                        "Failed to save game: {}",
                        err
                    )));
            }
        }
    }

    fn load_history(&mut self, limit: Option<usize>) {
        let limit = limit.unwrap_or(self.settings.history_limit);
        let history = self.storage.borrow().get_game_history(limit);
        match history {
            Ok(records) => self
                .game_engine_event_emitter
                .emit(&GameEngineEvent::HistoryLoaded(records)),
            Err(err) => {
                error!(target: "game_engine", "Failed to fetch game history: {}", err);
                self.game_engine_event_emitter
                    .emit(&GameEngineEvent::PersistenceFailed(format!(
                        "Failed to fetch game history: {}",
                        err
                    )));
            }
        }
    }

    pub fn get_game_stats(&self) -> GameStats {
        GameStats {
            moves: self.current_session.moves(),
            completion_time: self.current_session.elapsed_at(SystemTime::now()),
            difficulty: self.current_session.difficulty(),
            image_name: history_image_name(self.current_session.current_image()).to_string(),
            playthrough_id: self.current_playthrough_id,
        }
    }

    pub fn get_session_snapshot(&self) -> GameSession {
        self.current_session.as_ref().clone()
    }

    fn sync_session_display(&self) {
        self.game_engine_event_emitter
            .emit(&GameEngineEvent::SessionUpdated(
                self.current_session.as_ref().clone(),
            ));
    }

    fn emit_history_changed(&self) {
        self.game_engine_event_emitter
            .emit(&GameEngineEvent::HistoryChanged {
                history_index: self.history_index,
                history_length: self.history.len(),
            });
    }

    fn emit_timer_state(&self) {
        let timer: Option<TimerState> = self.current_session.timer().cloned();
        self.game_engine_event_emitter
            .emit(&GameEngineEvent::TimerStateChanged(timer));
    }
}
