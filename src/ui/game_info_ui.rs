// move counter and clock

use crate::events::EventHandler;
use crate::helpers::format_duration;
use crate::model::{GameEngineEvent, TimerState};

#[derive(Default)]
pub struct GameInfoUI {
    moves: u32,
    timing: bool,
    timer_state: Option<TimerState>,
}

impl GameInfoUI {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// Whether the app loop should redraw the clock every second.
    pub fn is_ticking(&self) -> bool {
        self.timing
    }

    pub fn timer_label(&self) -> String {
        format_duration(
            self.timer_state
                .as_ref()
                .map(TimerState::elapsed)
                .unwrap_or_default(),
        )
    }

    pub fn status_line(&self) -> String {
        format!("Moves: {}   Time: {}", self.moves, self.timer_label())
    }
}

impl EventHandler<GameEngineEvent> for GameInfoUI {
    fn handle_event(&mut self, event: &GameEngineEvent) {
        match event {
            GameEngineEvent::SessionUpdated(session) => {
                self.moves = session.moves();
                self.timing = session.is_timing();
            }
            GameEngineEvent::TimerStateChanged(timer_state) => {
                self.timer_state = timer_state.clone()
            }
            _ => (),
        }
    }
}
