use chrono::Local;
use std::time::Duration;

use crate::events::EventHandler;
use crate::helpers::format_duration;
use crate::model::{GameEngineEvent, GameHistoryRecord};

/// Collects completion, history and persistence messages for the app loop to
/// print after each command.
#[derive(Default)]
pub struct StatsDialog {
    pending: Vec<String>,
}

impl StatsDialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: impl Into<String>) {
        self.pending.push(message.into());
    }

    pub fn take_messages(&mut self) -> Vec<String> {
        std::mem::take(&mut self.pending)
    }

    pub fn render_history(records: &[GameHistoryRecord]) -> String {
        if records.is_empty() {
            return "No games recorded yet.".to_string();
        }
        let mut lines = vec![format!(
            "{:>4}  {:>5}  {:>8}  {:<4}  {:<16}  {}",
            "Rank", "Moves", "Time", "Size", "Image", "Completed"
        )];
        for (i, record) in records.iter().enumerate() {
            lines.push(format!(
                "{:>4}  {:>5}  {:>8}  {:<4}  {:<16}  {}",
                i + 1,
                record.moves,
                format_duration(Duration::from_secs(record.time_elapsed)),
                record.difficulty.label(),
                record.image_name,
                record
                    .completed_at
                    .with_timezone(&Local)
                    .format("%Y-%m-%d %H:%M")
            ));
        }
        lines.join("\n")
    }
}

impl EventHandler<GameEngineEvent> for StatsDialog {
    fn handle_event(&mut self, event: &GameEngineEvent) {
        match event {
            GameEngineEvent::PuzzleCompleted(stats) => self.push(format!(
                "Puzzle solved! {} moves in {}. Type `save` to record it.",
                stats.moves,
                format_duration(stats.completion_time)
            )),
            GameEngineEvent::GameSaved(record) => self.push(format!(
                "Saved: {} moves in {} on {}.",
                record.moves,
                format_duration(Duration::from_secs(record.time_elapsed)),
                record.image_name
            )),
            GameEngineEvent::HistoryLoaded(records) => self.push(Self::render_history(records)),
            GameEngineEvent::PersistenceFailed(message) => self.push(format!("Error: {}", message)),
            _ => (),
        }
    }
}
