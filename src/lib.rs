pub mod destroyable;
pub mod events;
pub mod game;
pub mod helpers;
pub mod images;
pub mod model;
pub mod storage;
pub mod ui;
