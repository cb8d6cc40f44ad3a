//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies
//!
//! The one wall-clock input is `TickInput::time_ms`, which feeds the
//! invulnerability window so its duration stays real-time at any frame rate.
//! Every other timer counts ticks.

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{circle_overlap, wrap_position};
pub use state::{
    Asteroid, AsteroidSize, Bullet, GameEvent, GamePhase, GameState, Particle, Ship,
};
pub use tick::{start_game, tick, TickInput};
