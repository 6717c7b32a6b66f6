//! Fight simulation: bullets, the boss and the per-tick session.
//!
//! Everything here is plain single-owner state advanced once per fixed
//! tick. Nothing draws or reads devices; the host feeds an [`Intent`] and
//! reads back a [`RenderSnapshot`].

pub mod anatomy;
pub mod boss;
pub mod bullet;
pub mod session;
pub mod snapshot;

pub use session::{Intent, Session};
pub use snapshot::RenderSnapshot;

/// Playfield width in cells.
pub const WIDTH: i32 = 80;
/// Playfield height in cells.
pub const HEIGHT: i32 = 60;
/// Simulation rate. Every countdown in the game is measured in these ticks.
pub const TICKS_PER_SECOND: i32 = 60;
