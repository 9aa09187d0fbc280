//! heartcard: a terminal greeting card with escalating buttons and floating hearts.

pub mod clock;
pub mod config;
pub mod error;
pub mod interaction;
pub mod particles;
pub mod preview;
pub mod report;
pub mod scheduler;
pub mod trajectory;
pub mod tui;
pub mod types;
