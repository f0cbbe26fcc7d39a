use std::io;

use crossterm::terminal;
use log::{info, warn};

use slidequest::game::session_snapshot::load_session_snapshot;
use slidequest::game::settings::{data_dir, uploads_dir, Settings};
use slidequest::storage::{shared, FileStorage, MemStorage};
use slidequest::ui::App;

fn init_logging() {
    env_logger::init();
}

fn main() -> io::Result<()> {
    init_logging();

    let settings = Settings::load();
    let storage = match FileStorage::open(data_dir()) {
        Ok(storage) => shared(storage),
        Err(err) => {
            warn!(target: "main", "History unavailable, keeping it in memory: {}", err);
            shared(MemStorage::new())
        }
    };
    info!(target: "main", "Data directory: {:?}", data_dir());

    let mut app = App::new(
        settings,
        storage,
        uploads_dir(),
        Settings::seed_from_env(),
        io::stdout(),
    );

    terminal::enable_raw_mode()?;
    let result = app.start(load_session_snapshot()).and_then(|()| app.run());

    // Always try to restore terminal state.
    let _ = terminal::disable_raw_mode();
    result
}
