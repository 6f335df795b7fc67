//! This module defines the injected collaborators the terminal talks to: an
//! opener for external resources and a store for user preferences.
pub mod opener;
pub mod preferences;

pub use opener::{Opener, SystemOpener};
pub use preferences::{JsonPreferenceStore, MemoryPreferenceStore, PreferenceStore};
