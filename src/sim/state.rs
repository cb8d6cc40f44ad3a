//! Game state and core simulation types

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use std::f32::consts::{FRAC_PI_2, TAU};

use super::collision::wrap_position;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Attract screen, waiting for start input
    Title,
    /// Active gameplay
    Playing,
    /// Run ended, waiting for restart input
    GameOver,
}

/// One-shot effects the simulation emits for the audio layer.
///
/// The simulation decides *when* these fire; it never knows how they sound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Shoot,
    Explosion(AsteroidSize),
    ShipExplosion,
    LevelUp,
    GameOver,
}

/// Asteroid size category. Radius, drift speed, score, tint, and split
/// behavior are all functions of the category, so an invalid category is
/// unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AsteroidSize {
    Large,
    Medium,
    Small,
}

impl AsteroidSize {
    /// Base collision/visual radius before jitter
    pub const fn base_radius(self) -> f32 {
        match self {
            AsteroidSize::Large => 50.0,
            AsteroidSize::Medium => 28.0,
            AsteroidSize::Small => 14.0,
        }
    }

    /// Base drift speed before jitter (pixels per tick)
    pub const fn base_speed(self) -> f32 {
        match self {
            AsteroidSize::Large => 1.0,
            AsteroidSize::Medium => 1.8,
            AsteroidSize::Small => 2.5,
        }
    }

    /// Score awarded when destroyed
    pub const fn score(self) -> u32 {
        match self {
            AsteroidSize::Large => 20,
            AsteroidSize::Medium => 50,
            AsteroidSize::Small => 100,
        }
    }

    /// Neon tint, also used for the debris burst
    pub const fn color(self) -> [f32; 3] {
        match self {
            AsteroidSize::Large => [1.0, 0.0, 1.0],
            AsteroidSize::Medium => [1.0, 0.53, 0.0],
            AsteroidSize::Small => [0.0, 1.0, 0.0],
        }
    }

    /// Size of the two fragments a destroyed asteroid leaves, if any
    pub const fn child(self) -> Option<AsteroidSize> {
        match self {
            AsteroidSize::Large => Some(AsteroidSize::Medium),
            AsteroidSize::Medium => Some(AsteroidSize::Small),
            AsteroidSize::Small => None,
        }
    }
}

/// Ship debris tint for the death burst
pub const SHIP_COLOR: [f32; 3] = [0.0, 1.0, 1.0];
/// Hot flash mixed into the death burst
pub const FLASH_COLOR: [f32; 3] = [1.0, 1.0, 1.0];

/// The player's ship
#[derive(Debug, Clone)]
pub struct Ship {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Heading in radians; -PI/2 points up
    pub angle: f32,
    /// Visual radius; collisions use [`Ship::hit_radius`]
    pub radius: f32,
    pub thrusting: bool,
    pub alive: bool,
    pub invulnerable: bool,
    /// Wall-clock timestamp (ms) when invulnerability started
    pub invulnerable_since: f64,
}

impl Ship {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            angle: -FRAC_PI_2,
            radius: SHIP_SIZE,
            thrusting: false,
            alive: true,
            invulnerable: false,
            invulnerable_since: 0.0,
        }
    }

    pub fn make_invulnerable(&mut self, now_ms: f64) {
        self.invulnerable = true;
        self.invulnerable_since = now_ms;
    }

    /// Reset in place for a (re)spawn; re-grants invulnerability
    pub fn reset(&mut self, pos: Vec2, now_ms: f64) {
        self.pos = pos;
        self.vel = Vec2::ZERO;
        self.angle = -FRAC_PI_2;
        self.thrusting = false;
        self.alive = true;
        self.make_invulnerable(now_ms);
    }

    /// Advance one tick of ship kinematics
    pub fn update(
        &mut self,
        rotate_left: bool,
        rotate_right: bool,
        thrust: bool,
        field: Vec2,
        now_ms: f64,
    ) {
        // Both rotate keys may be held; the effects compose
        if rotate_left {
            self.angle -= ROTATION_SPEED;
        }
        if rotate_right {
            self.angle += ROTATION_SPEED;
        }

        self.thrusting = thrust;
        if self.thrusting {
            self.vel += Vec2::from_angle(self.angle) * THRUST_POWER;
        }

        // Friction applies every tick, thrusting or not
        self.vel *= FRICTION;

        // Speed limit: rescale, preserve direction
        let speed = self.vel.length();
        if speed > MAX_SPEED {
            self.vel *= MAX_SPEED / speed;
        }

        self.pos += self.vel;
        wrap_position(&mut self.pos, self.radius, field);

        if self.invulnerable && now_ms - self.invulnerable_since > INVULNERABLE_MS {
            self.invulnerable = false;
        }
    }

    /// Collision radius, smaller than the visual outline for forgiving hits
    pub fn hit_radius(&self) -> f32 {
        self.radius * SHIP_HIT_FACTOR
    }

    /// Whether the invulnerability blink cycle leaves the ship visible
    pub fn blink_visible(&self, now_ms: f64) -> bool {
        if !self.invulnerable {
            return true;
        }
        ((now_ms - self.invulnerable_since) / BLINK_MS) as i64 % 2 == 1
    }
}

/// A projectile fired from the ship's nose
#[derive(Debug, Clone)]
pub struct Bullet {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Remaining lifetime in ticks
    pub life: u32,
    pub alive: bool,
}

impl Bullet {
    pub fn new(pos: Vec2, angle: f32) -> Self {
        Self {
            pos,
            vel: Vec2::from_angle(angle) * BULLET_SPEED,
            radius: BULLET_RADIUS,
            life: BULLET_LIFETIME,
            alive: true,
        }
    }

    /// Straight-line motion with a tick-counted lifetime. Bullets wrap like
    /// any entity and can still score after re-entering the field.
    pub fn update(&mut self, field: Vec2) {
        self.pos += self.vel;
        self.life = self.life.saturating_sub(1);
        if self.life == 0 {
            self.alive = false;
        }
        wrap_position(&mut self.pos, self.radius, field);
    }
}

/// A drifting rock
#[derive(Debug, Clone)]
pub struct Asteroid {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: AsteroidSize,
    pub radius: f32,
    pub rotation: f32,
    pub rot_speed: f32,
    /// Jagged outline as (angle, distance) pairs, fixed at construction
    pub verts: Vec<(f32, f32)>,
    pub alive: bool,
}

impl Asteroid {
    pub fn new(pos: Vec2, size: AsteroidSize, rng: &mut Pcg32) -> Self {
        let radius = size.base_radius() + rng.random_range(-5.0..5.0);
        let heading = rng.random_range(0.0..TAU);
        let speed = size.base_speed() * rng.random_range(0.7..1.3);

        let num_verts = rng.random_range(7..12usize);
        let mut verts = Vec::with_capacity(num_verts);
        for i in 0..num_verts {
            let a = i as f32 / num_verts as f32 * TAU;
            let d = radius * rng.random_range(0.7..1.0);
            verts.push((a, d));
        }

        Self {
            pos,
            vel: Vec2::from_angle(heading) * speed,
            size,
            radius,
            rotation: 0.0,
            rot_speed: rng.random_range(-0.02..0.02),
            verts,
            alive: true,
        }
    }

    /// Spawn a large asteroid at a random point on a random field edge
    pub fn spawn_at_edge(field: Vec2, rng: &mut Pcg32) -> Self {
        let pos = match rng.random_range(0..4u32) {
            0 => Vec2::new(0.0, rng.random_range(0.0..field.y)),
            1 => Vec2::new(field.x, rng.random_range(0.0..field.y)),
            2 => Vec2::new(rng.random_range(0.0..field.x), 0.0),
            _ => Vec2::new(rng.random_range(0.0..field.x), field.y),
        };
        Self::new(pos, AsteroidSize::Large, rng)
    }

    /// Constant-velocity drift and constant spin, then wrap
    pub fn update(&mut self, field: Vec2) {
        self.pos += self.vel;
        self.rotation += self.rot_speed;
        wrap_position(&mut self.pos, self.radius, field);
    }

    /// Break into two fragments of the next-smaller size at this position.
    /// Terminal-size asteroids leave nothing. Fragment jitter gives the two
    /// children divergent trajectories on their first tick.
    pub fn split(&self, rng: &mut Pcg32) -> Vec<Asteroid> {
        match self.size.child() {
            Some(child) => vec![
                Asteroid::new(self.pos, child, rng),
                Asteroid::new(self.pos, child, rng),
            ],
            None => Vec::new(),
        }
    }
}

/// A transient visual-feedback particle
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Normalized life, 1.0 at emission down to 0
    pub life: f32,
    pub decay: f32,
    pub color: [f32; 3],
    pub size: f32,
}

impl Particle {
    pub fn new(pos: Vec2, color: [f32; 3], rng: &mut Pcg32) -> Self {
        let heading = rng.random_range(0.0..TAU);
        let speed = rng.random_range(1.0..5.0);
        Self {
            pos,
            vel: Vec2::from_angle(heading) * speed,
            life: 1.0,
            decay: rng.random_range(0.015..0.04),
            color,
            size: rng.random_range(1.0..3.0),
        }
    }

    pub fn update(&mut self) {
        self.pos += self.vel;
        self.vel *= PARTICLE_DRAG;
        self.life -= self.decay;
    }
}

/// Complete game session state. Owned by the tick driver; entity collections
/// are never referenced outside the tick that processes them.
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Session RNG; every random draw in the simulation goes through it
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub score: u32,
    pub lives: u8,
    pub level: u32,
    /// Ticks until the next shot may fire
    pub shoot_cooldown: u32,
    /// Screen shake magnitude in pixels
    pub screen_shake: f32,
    /// Play-field size in pixels; tracks the canvas
    pub field: Vec2,
    pub ship: Ship,
    pub bullets: Vec<Bullet>,
    pub asteroids: Vec<Asteroid>,
    pub particles: Vec<Particle>,
    /// One-shot effects emitted since the driver last drained them
    pub events: Vec<GameEvent>,
    /// Simulation tick counter (play phase only)
    pub time_ticks: u64,
}

impl GameState {
    pub fn new(seed: u64, field: Vec2) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Title,
            score: 0,
            lives: MAX_LIVES,
            level: 0,
            shoot_cooldown: 0,
            screen_shake: 0.0,
            field,
            ship: Ship::new(field * 0.5),
            bullets: Vec::new(),
            asteroids: Vec::new(),
            particles: Vec::new(),
            events: Vec::new(),
            time_ticks: 0,
        }
    }

    /// Append a burst of particles at a point
    pub fn emit_particles(&mut self, pos: Vec2, color: [f32; 3], count: usize) {
        for _ in 0..count {
            let p = Particle::new(pos, color, &mut self.rng);
            self.particles.push(p);
        }
    }

    /// Advance and purge the particle accumulator
    pub fn update_particles(&mut self) {
        for p in self.particles.iter_mut() {
            p.update();
        }
        self.particles.retain(|p| p.life > 0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(1234)
    }

    #[test]
    fn size_table() {
        assert_eq!(AsteroidSize::Large.score(), 20);
        assert_eq!(AsteroidSize::Medium.score(), 50);
        assert_eq!(AsteroidSize::Small.score(), 100);
        assert_eq!(AsteroidSize::Large.child(), Some(AsteroidSize::Medium));
        assert_eq!(AsteroidSize::Medium.child(), Some(AsteroidSize::Small));
        assert_eq!(AsteroidSize::Small.child(), None);
    }

    #[test]
    fn asteroid_jitter_stays_bounded() {
        let mut rng = rng();
        for _ in 0..50 {
            let a = Asteroid::new(Vec2::new(100.0, 100.0), AsteroidSize::Large, &mut rng);
            assert!((a.radius - 50.0).abs() <= 5.0);
            assert!((7..12).contains(&a.verts.len()));
            assert!(a.rot_speed.abs() <= 0.02);
            let speed = a.vel.length();
            assert!(speed >= 0.7 - 1e-4 && speed <= 1.3 + 1e-4);
            for &(_, d) in &a.verts {
                assert!(d >= a.radius * 0.7 - 1e-4 && d <= a.radius);
            }
        }
    }

    #[test]
    fn edge_spawn_sits_on_an_edge() {
        let mut rng = rng();
        let field = Vec2::new(800.0, 600.0);
        for _ in 0..50 {
            let a = Asteroid::spawn_at_edge(field, &mut rng);
            assert_eq!(a.size, AsteroidSize::Large);
            let on_edge = a.pos.x == 0.0
                || a.pos.x == field.x
                || a.pos.y == 0.0
                || a.pos.y == field.y;
            assert!(on_edge, "spawn at {:?} not on an edge", a.pos);
        }
    }

    #[test]
    fn blink_alternates_in_fixed_windows() {
        let mut ship = Ship::new(Vec2::ZERO);
        assert!(ship.blink_visible(0.0));

        ship.make_invulnerable(1000.0);
        // Hidden in the first window, visible in the second
        assert!(!ship.blink_visible(1050.0));
        assert!(ship.blink_visible(1150.0));
        assert!(!ship.blink_visible(1250.0));
    }

    #[test]
    fn reset_regrants_invulnerability() {
        let mut ship = Ship::new(Vec2::ZERO);
        ship.vel = Vec2::new(3.0, -2.0);
        ship.invulnerable = false;

        ship.reset(Vec2::new(400.0, 300.0), 5000.0);
        assert_eq!(ship.pos, Vec2::new(400.0, 300.0));
        assert_eq!(ship.vel, Vec2::ZERO);
        assert!(ship.alive);
        assert!(ship.invulnerable);
        assert_eq!(ship.invulnerable_since, 5000.0);
    }
}
