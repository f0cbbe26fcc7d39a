mod app;
pub mod game_info_ui;
pub mod input_translator;
mod line_editor;
pub mod puzzle_grid_ui;
pub mod stats_dialog;

use std::cell::RefCell;
use std::fmt::Debug;
use std::rc::Rc;

use crate::events::{EventHandler, EventObserver, Unsubscriber};

pub use app::App;

/// Routes every event on `observer` to `component`.
pub fn subscribe_component<T, C>(
    observer: &EventObserver<T>,
    component: Rc<RefCell<C>>,
) -> Unsubscriber<T>
where
    T: Debug + 'static,
    C: EventHandler<T> + 'static,
{
    observer.subscribe(move |event| component.borrow_mut().handle_event(event))
}
