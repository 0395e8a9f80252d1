mod app;
mod config;
mod logging;
mod terminal;
mod ui;

pub use app::{run_app, Args};
