//! Neon Rocks - a wireframe Asteroids arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, collisions, game state)
//! - `renderer`: WebGPU rendering pipeline
//! - `input`: Logical key tracking
//! - `audio`: Web Audio sound synthesis
//! - `settings`: Presentation preferences

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod input;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz; per-tick constants assume this rate)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Ship rotation per held rotate key (radians per tick)
    pub const ROTATION_SPEED: f32 = 0.07;
    /// Thrust acceleration (pixels per tick squared)
    pub const THRUST_POWER: f32 = 0.12;
    /// Velocity retained each tick, thrusting or not
    pub const FRICTION: f32 = 0.99;
    /// Ship speed cap (pixels per tick)
    pub const MAX_SPEED: f32 = 6.0;
    /// Ship visual radius
    pub const SHIP_SIZE: f32 = 18.0;
    /// Fraction of the visual radius used for ship-asteroid hits
    pub const SHIP_HIT_FACTOR: f32 = 0.6;
    /// Invulnerability window after (re)spawn - wall-clock milliseconds,
    /// independent of frame rate
    pub const INVULNERABLE_MS: f64 = 3000.0;
    /// Blink window while invulnerable (milliseconds)
    pub const BLINK_MS: f64 = 100.0;

    /// Bullet speed (pixels per tick)
    pub const BULLET_SPEED: f32 = 8.0;
    /// Bullet collision radius
    pub const BULLET_RADIUS: f32 = 3.0;
    /// Bullet lifetime in ticks
    pub const BULLET_LIFETIME: u32 = 60;
    /// Ticks between shots while fire is held
    pub const SHOOT_COOLDOWN: u32 = 10;

    /// Lives at the start of a run
    pub const MAX_LIVES: u8 = 3;
    /// Asteroids in the first wave
    pub const INITIAL_ASTEROIDS: u32 = 4;
    /// Extra asteroids per level beyond the first
    pub const ASTEROIDS_PER_LEVEL: u32 = 2;

    /// Particle velocity retained each tick
    pub const PARTICLE_DRAG: f32 = 0.98;
    /// Particles per burst unless a caller asks otherwise
    pub const DEFAULT_BURST: usize = 15;

    /// Screen shake retained each tick
    pub const SHAKE_DECAY: f32 = 0.8;
    /// Shake below this snaps to zero
    pub const SHAKE_CUTOFF: f32 = 0.5;
    /// Shake impulse when a bullet destroys an asteroid
    pub const SHAKE_ASTEROID_HIT: f32 = 5.0;
    /// Shake impulse when the ship is destroyed
    pub const SHAKE_SHIP_HIT: f32 = 12.0;
}
