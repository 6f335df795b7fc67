//! The portfolio's command terminal.
//!
//! The heart of the crate is [`engine::CommandEngine`], a small command
//! interpreter with history, completion and a registry of async handlers.
//! The rest wraps it into an application: a crossterm TUI, a headless
//! script mode, config loading and logging.
pub mod app;
pub mod config;
pub mod engine;
pub mod facts;
pub mod logging;
pub mod ports;
pub mod theme;
pub mod ui;
