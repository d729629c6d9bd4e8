pub mod app;
pub mod config;
pub mod gate;
pub mod modal;
pub mod shared;
pub mod shell;
pub mod templates;
pub mod tui;
pub mod workspace;
