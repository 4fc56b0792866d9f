/// Console Invaders — a terminal Space Invaders simulation.
///
/// The library holds the whole per-frame simulation and is free of terminal
/// I/O; the binary (`main.rs` + `display.rs`) is the thin boundary that
/// samples keys and blits the composed [`screen::Screen`].

pub mod clock;
pub mod collision;
pub mod config;
pub mod entities;
pub mod error;
pub mod formation;
pub mod input;
pub mod screen;
pub mod session;
pub mod shield;

pub use config::GameConfig;
pub use error::{GameError, Result};
pub use session::{FrameOutcome, Session};
