use std::cell::RefCell;
use std::fmt::Display;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::{Duration, Instant};

use crossterm::cursor::MoveToColumn;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use crossterm::queue;
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType};
use log::{info, warn};

use super::game_info_ui::GameInfoUI;
use super::input_translator::{Input, InputTranslator, HELP_TEXT};
use super::line_editor::{LineEditor, LineEvent};
use super::puzzle_grid_ui::PuzzleGridUI;
use super::stats_dialog::StatsDialog;
use super::subscribe_component;
use crate::destroyable::Destroyable;
use crate::events::{Channel, EventEmitter, Unsubscriber};
use crate::game::session_snapshot::save_session_snapshot;
use crate::game::settings::Settings;
use crate::game::{GameEngine, GameSession};
use crate::images::{find_preset, ImageLibrary, ImageUpload};
use crate::model::{GameEngineCommand, GameEngineEvent};
use crate::storage::SharedStorage;

const TICK_INTERVAL: Duration = Duration::from_secs(1);

pub struct App<W: Write> {
    out: W,
    settings: Settings,
    game_engine_command_emitter: EventEmitter<GameEngineCommand>,
    game_engine: Rc<RefCell<GameEngine>>,
    input_translator: Rc<RefCell<InputTranslator>>,
    puzzle_grid: Rc<RefCell<PuzzleGridUI>>,
    game_info: Rc<RefCell<GameInfoUI>>,
    stats_dialog: Rc<RefCell<StatsDialog>>,
    image_library: ImageLibrary,
    line_editor: LineEditor,
    subscriptions: Vec<Unsubscriber<GameEngineEvent>>,
}

impl<W: Write> Destroyable for App<W> {
    fn destroy(&mut self) {
        for subscription in self.subscriptions.drain(..) {
            subscription.unsubscribe();
        }
        self.game_engine.borrow_mut().destroy();
    }
}

impl<W: Write> App<W> {
    pub fn new(
        settings: Settings,
        storage: SharedStorage,
        uploads_dir: impl Into<PathBuf>,
        seed: Option<u64>,
        out: W,
    ) -> Self {
        let (game_engine_command_emitter, game_engine_command_observer) =
            Channel::<GameEngineCommand>::new();
        let (game_engine_event_emitter, game_engine_event_observer) =
            Channel::<GameEngineEvent>::new();

        let input_translator = Rc::new(RefCell::new(InputTranslator::new()));
        let puzzle_grid = Rc::new(RefCell::new(PuzzleGridUI::new(settings.show_tile_numbers)));
        let game_info = Rc::new(RefCell::new(GameInfoUI::new()));
        let stats_dialog = Rc::new(RefCell::new(StatsDialog::new()));

        let subscriptions = vec![
            subscribe_component(&game_engine_event_observer, input_translator.clone()),
            subscribe_component(&game_engine_event_observer, puzzle_grid.clone()),
            subscribe_component(&game_engine_event_observer, game_info.clone()),
            subscribe_component(&game_engine_event_observer, stats_dialog.clone()),
        ];

        let game_engine = GameEngine::new(
            game_engine_command_observer,
            game_engine_event_emitter,
            storage.clone(),
            settings.clone(),
            seed,
        );

        Self {
            out,
            settings,
            game_engine_command_emitter,
            game_engine,
            input_translator,
            puzzle_grid,
            game_info,
            stats_dialog,
            image_library: ImageLibrary::new(storage, uploads_dir),
            line_editor: LineEditor::new(),
            subscriptions,
        }
    }

    /// Shows the first board, resuming `resume` when a previous run left one.
    pub fn start(&mut self, resume: Option<GameSession>) -> io::Result<()> {
        self.print("Sliding puzzle. Type `help` for commands.")?;
        let command = match resume {
            Some(session) => GameEngineCommand::LoadState(session),
            None => GameEngineCommand::InitDisplay,
        };
        self.game_engine_command_emitter.emit(&command);
        self.render()
    }

    /// Reads keys until the player quits. The terminal must already be in
    /// raw mode. While no game is being timed the loop blocks on input.
    pub fn run(mut self) -> io::Result<()> {
        let mut last_tick = Instant::now();
        loop {
            let ticking = self.game_info.borrow().is_ticking();
            let ready = if ticking {
                let timeout = TICK_INTERVAL
                    .checked_sub(last_tick.elapsed())
                    .unwrap_or_default();
                event::poll(timeout)?
            } else {
                true
            };

            if ready {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press && !self.handle_key(key)? {
                        break;
                    }
                }
            }

            if last_tick.elapsed() >= TICK_INTERVAL {
                last_tick = Instant::now();
                if self.game_info.borrow().is_ticking() {
                    self.tick()?;
                }
            }
        }
        self.shutdown()
    }

    /// Feeds one key press to the command line; false once the player asked
    /// to quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> io::Result<bool> {
        match self.line_editor.handle_key(key) {
            LineEvent::Submitted(line) => {
                queue!(self.out, Print("\r\n"))?;
                self.handle_line(&line)
            }
            LineEvent::Edited => {
                self.draw_prompt()?;
                Ok(true)
            }
            LineEvent::Quit => Ok(false),
            LineEvent::Ignored => Ok(true),
        }
    }

    /// Handles one submitted command; false once the player asked to quit.
    pub fn handle_line(&mut self, line: &str) -> io::Result<bool> {
        let input = match line.parse::<Input>() {
            Ok(input) => input,
            Err(err) => {
                self.print(err)?;
                self.draw_prompt()?;
                return Ok(true);
            }
        };

        match input {
            Input::Quit => return Ok(false),
            Input::Help => {
                self.print(HELP_TEXT)?;
                self.draw_prompt()?;
                return Ok(true);
            }
            Input::ToggleNumbers => {
                let shown = self.puzzle_grid.borrow_mut().toggle_tile_numbers();
                self.settings.show_tile_numbers = shown;
            }
            Input::Images => {
                self.list_images()?;
                self.draw_prompt()?;
                return Ok(true);
            }
            Input::Image(key) => self.choose_image(&key)?,
            Input::Upload(path) => self.upload_image(&path)?,
            input => {
                let command = self.input_translator.borrow().translate(&input);
                match command {
                    Some(command) => self.game_engine_command_emitter.emit(&command),
                    None => self.print("Nothing to move there.")?,
                }
            }
        }
        self.render()?;
        Ok(true)
    }

    /// Redraws the clock without touching what the player is typing.
    fn tick(&mut self) -> io::Result<()> {
        self.draw_prompt()
    }

    /// Writes `text` line by line. Raw mode does not return the carriage on
    /// a bare newline.
    fn print(&mut self, text: impl Display) -> io::Result<()> {
        for line in text.to_string().lines() {
            queue!(self.out, Print(line), Print("\r\n"))?;
        }
        Ok(())
    }

    /// Status line plus the half-typed command, drawn over the current line.
    fn draw_prompt(&mut self) -> io::Result<()> {
        let status = self.game_info.borrow().status_line();
        queue!(
            self.out,
            MoveToColumn(0),
            Clear(ClearType::CurrentLine),
            Print(status),
            Print("  > "),
            Print(self.line_editor.buffer()),
        )?;
        self.out.flush()
    }

    fn render(&mut self) -> io::Result<()> {
        let messages = self.stats_dialog.borrow_mut().take_messages();
        for message in messages {
            self.print(message)?;
        }
        let board = self.puzzle_grid.borrow().render();
        self.print(board)?;
        self.draw_prompt()
    }

    fn list_images(&mut self) -> io::Result<()> {
        self.print("Presets:")?;
        for preset in self.image_library.presets() {
            self.print(format!("  {:<10}  {}", preset.id, preset.name))?;
        }
        match self.image_library.custom_images() {
            Ok(images) if images.is_empty() => self.print("No uploads yet.")?,
            Ok(images) => {
                self.print("Uploads:")?;
                for image in images {
                    let location = match self.image_library.resolve(&image.processed_path) {
                        Some(path) => path.display().to_string(),
                        None => "file missing".to_string(),
                    };
                    self.print(format!(
                        "  {}  {}  ({})",
                        image.id, image.original_name, location
                    ))?;
                }
            }
            Err(err) => self.print(format!("Error: failed to fetch uploads: {}", err))?,
        }
        Ok(())
    }

    fn choose_image(&mut self, key: &str) -> io::Result<()> {
        let url = match find_preset(key) {
            Some(preset) => Some(preset.url),
            None => match self.image_library.find_custom(key) {
                Ok(found) => found.map(|image| image.processed_path),
                Err(err) => {
                    return self.print(format!("Error: failed to fetch uploads: {}", err));
                }
            },
        };
        match url {
            Some(url) => self
                .game_engine_command_emitter
                .emit(&GameEngineCommand::SetImage(url)),
            None => self.print(format!("No image {:?}; `images` lists them.", key))?,
        }
        Ok(())
    }

    fn upload_image(&mut self, path: &Path) -> io::Result<()> {
        let uploaded = ImageUpload::from_path(path)
            .and_then(|upload| self.image_library.upload(upload));
        match uploaded {
            Ok(record) => {
                self.print(format!(
                    "Uploaded {} as {}.",
                    record.original_name, record.id
                ))?;
                self.game_engine_command_emitter
                    .emit(&GameEngineCommand::SetImage(record.processed_path));
            }
            Err(err) => self.print(format!("Upload failed: {}", err))?,
        }
        Ok(())
    }

    /// Persists the session and settings for the next run, then tears down.
    pub fn shutdown(mut self) -> io::Result<()> {
        let (session, mut settings) = {
            let game_engine = self.game_engine.borrow();
            (game_engine.get_session_snapshot(), game_engine.settings().clone())
        };
        save_session_snapshot(&session);
        settings.show_tile_numbers = self.settings.show_tile_numbers;
        if let Err(err) = settings.save() {
            warn!(target: "app", "Failed to save settings: {}", err);
        }
        info!(target: "app", "Shutting down");
        self.destroy();
        queue!(self.out, Print("\r\n"))?;
        self.out.flush()
    }
}
