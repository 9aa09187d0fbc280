//! TUI module for the interactive card.
//!
//! Organized along FP/Unix boundaries:
//! - `state`: Pure data types (Screen, Action, Transition)
//! - `update`: Pure transitions, plus the single effect applier
//! - `view`: Pure rendering
//! - `run`: Terminal lifecycle and event loop

pub mod run;
pub mod state;
pub mod theme;
pub mod update;
pub mod view;

pub use run::run;
