mod app;
mod config;
mod logging;
mod prompt;

pub use app::run_app;
