//! GUI - egui によるデスクトップ画面

mod app;
mod theme;

pub use app::{run, RenamerApp};
