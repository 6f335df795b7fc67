//! This module contains the full-screen terminal: event handling, key
//! bindings, lifecycle and rendering around a `CommandEngine`.
mod controller;
mod events;
mod keys;
mod lifecycle;
mod palette;
mod render;

pub use controller::TerminalUI;
