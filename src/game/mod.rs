pub mod game_engine;
mod game_session;
pub mod layout;
pub mod moves;
pub mod session_snapshot;
pub mod settings;
pub mod shuffle;
pub mod win;

pub use game_engine::GameEngine;
pub use game_session::{GameSession, SessionEvent, SessionStatus};
pub use layout::generate_solved_layout;
pub use moves::{are_adjacent, movable_tiles, slide_tile, IllegalMove};
pub use shuffle::{count_inversions, is_solvable, shuffle};
pub use win::{is_solved, is_solved_inferred};

#[cfg(test)]
pub mod tests {
    use std::sync::Once;
    use test_context::TestContext;

    static INIT_LOGGER: Once = Once::new();

    pub struct UsingLogger {
        _value: String,
    }

    impl TestContext for UsingLogger {
        fn setup() -> UsingLogger {
            INIT_LOGGER.call_once(|| {
                let _ = env_logger::builder().is_test(true).try_init();
            });

            UsingLogger {
                _value: "logger".to_string(),
            }
        }

        fn teardown(self) {}
    }
}
