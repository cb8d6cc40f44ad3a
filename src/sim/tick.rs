//! Fixed timestep simulation tick
//!
//! Advances the session by one discrete step: ship and bullet kinematics,
//! asteroid drift, collision resolution and splitting, particles, and phase
//! transitions. One call per rendered frame at 60 Hz.

use glam::Vec2;

use super::collision::circle_overlap;
use super::state::{
    Asteroid, Bullet, GameEvent, GamePhase, GameState, FLASH_COLOR, SHIP_COLOR,
};
use crate::consts::*;

/// Input signals for a single tick, sampled by the driver at tick start.
///
/// Held signals stay true while the key is down; `confirm` is a just-pressed
/// signal and must be true for exactly one tick per physical press.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Rotate counter-clockwise (held)
    pub rotate_left: bool,
    /// Rotate clockwise (held)
    pub rotate_right: bool,
    /// Thrust (held)
    pub thrust: bool,
    /// Fire (held; rate-limited by the shoot cooldown)
    pub fire: bool,
    /// Start or restart (just-pressed)
    pub confirm: bool,
    /// Wall-clock time in milliseconds; drives the invulnerability window
    pub time_ms: f64,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    match state.phase {
        GamePhase::Title | GamePhase::GameOver => {
            if input.confirm {
                start_game(state, input.time_ms);
            }
            // Leftover debris keeps animating on the idle screens
            state.update_particles();
            return;
        }
        GamePhase::Playing => {}
    }

    state.time_ticks += 1;

    state.ship.update(
        input.rotate_left,
        input.rotate_right,
        input.thrust,
        state.field,
        input.time_ms,
    );

    // Shooting, rate-limited by a tick-counted cooldown
    if state.shoot_cooldown > 0 {
        state.shoot_cooldown -= 1;
    }
    if input.fire && state.shoot_cooldown == 0 {
        let nose = state.ship.pos + Vec2::from_angle(state.ship.angle) * state.ship.radius;
        state.bullets.push(Bullet::new(nose, state.ship.angle));
        state.shoot_cooldown = SHOOT_COOLDOWN;
        state.events.push(GameEvent::Shoot);
    }

    let field = state.field;
    for bullet in state.bullets.iter_mut() {
        bullet.update(field);
    }
    for asteroid in state.asteroids.iter_mut() {
        asteroid.update(field);
    }

    resolve_bullet_hits(state);
    resolve_ship_hits(state, input.time_ms);

    // Deferred purge, once, after the pairwise pass
    state.bullets.retain(|b| b.alive);
    state.asteroids.retain(|a| a.alive);

    // Field cleared: next wave
    if state.asteroids.is_empty() && state.phase == GamePhase::Playing {
        next_level(state);
    }

    state.update_particles();

    state.screen_shake *= SHAKE_DECAY;
    if state.screen_shake < SHAKE_CUTOFF {
        state.screen_shake = 0.0;
    }
}

/// Full session reset; enters play and spawns the first wave
pub fn start_game(state: &mut GameState, now_ms: f64) {
    state.phase = GamePhase::Playing;
    state.score = 0;
    state.lives = MAX_LIVES;
    state.level = 0;
    state.shoot_cooldown = 0;
    state.bullets.clear();
    state.asteroids.clear();
    let center = state.field * 0.5;
    state.ship.reset(center, now_ms);
    next_level(state);
}

/// Pairwise bullet-asteroid pass.
///
/// A bullet kills at most one asteroid per tick: the first overlap in
/// insertion order deactivates it. Fragments pushed during the pass are
/// already targetable by later bullets in the same pass.
fn resolve_bullet_hits(state: &mut GameState) {
    for bi in 0..state.bullets.len() {
        let mut ai = 0;
        while ai < state.asteroids.len() {
            if !state.bullets[bi].alive {
                break;
            }
            let hit = {
                let b = &state.bullets[bi];
                let a = &state.asteroids[ai];
                a.alive && circle_overlap(b.pos, b.radius, a.pos, a.radius)
            };
            if hit {
                state.bullets[bi].alive = false;
                state.asteroids[ai].alive = false;

                let pos = state.asteroids[ai].pos;
                let size = state.asteroids[ai].size;
                state.score += size.score();
                state.emit_particles(pos, size.color(), 20);
                state.screen_shake = SHAKE_ASTEROID_HIT;
                state.events.push(GameEvent::Explosion(size));

                let children = state.asteroids[ai].split(&mut state.rng);
                state.asteroids.extend(children);
            }
            ai += 1;
        }
    }
}

/// Ship-asteroid pass with the reduced hit radius. Skipped entirely while
/// invulnerable; the first hit ends the pass for this tick.
fn resolve_ship_hits(state: &mut GameState, now_ms: f64) {
    if state.ship.invulnerable {
        return;
    }
    for ai in 0..state.asteroids.len() {
        let a = &state.asteroids[ai];
        if !a.alive {
            continue;
        }
        if circle_overlap(state.ship.pos, state.ship.hit_radius(), a.pos, a.radius) {
            ship_destroyed(state, now_ms);
            break;
        }
    }
}

fn ship_destroyed(state: &mut GameState, now_ms: f64) {
    let pos = state.ship.pos;
    state.emit_particles(pos, SHIP_COLOR, 30);
    state.emit_particles(pos, FLASH_COLOR, 10);
    state.screen_shake = SHAKE_SHIP_HIT;
    state.ship.thrusting = false;
    state.events.push(GameEvent::ShipExplosion);
    state.lives = state.lives.saturating_sub(1);

    if state.lives == 0 {
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::GameOver);
        log::info!(
            "game over at level {} with score {}",
            state.level,
            state.score
        );
    } else {
        let center = state.field * 0.5;
        state.ship.reset(center, now_ms);
    }
}

/// Advance the level counter and spawn its wave of edge asteroids
fn next_level(state: &mut GameState) {
    state.level += 1;
    if state.level > 1 {
        state.events.push(GameEvent::LevelUp);
    }
    let count = INITIAL_ASTEROIDS + (state.level - 1) * ASTEROIDS_PER_LEVEL;
    log::info!("level {}: spawning {} asteroids", state.level, count);
    for _ in 0..count {
        let a = Asteroid::spawn_at_edge(state.field, &mut state.rng);
        state.asteroids.push(a);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::AsteroidSize;

    const FIELD: Vec2 = Vec2::new(800.0, 600.0);

    /// A session one confirm-tick into play
    fn fresh_game() -> GameState {
        let mut state = GameState::new(7, FIELD);
        let input = TickInput {
            confirm: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        state
    }

    /// Park the wave in a corner, stationary, away from ship and bullets
    fn park_asteroids(state: &mut GameState) {
        for a in state.asteroids.iter_mut() {
            a.pos = Vec2::new(10.0, 590.0);
            a.vel = Vec2::ZERO;
        }
    }

    fn stationary_asteroid(state: &mut GameState, pos: Vec2, size: AsteroidSize) -> Asteroid {
        let mut a = Asteroid::new(pos, size, &mut state.rng);
        a.vel = Vec2::ZERO;
        a
    }

    fn stationary_bullet(pos: Vec2) -> Bullet {
        let mut b = Bullet::new(pos, 0.0);
        b.vel = Vec2::ZERO;
        b
    }

    #[test]
    fn start_game_resets_the_session() {
        let state = fresh_game();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, MAX_LIVES);
        assert_eq!(state.level, 1);
        assert_eq!(state.asteroids.len(), INITIAL_ASTEROIDS as usize);
        assert!(state.ship.alive);
        assert!(state.ship.invulnerable);
        // First wave carries no level-up fanfare
        assert!(!state.events.contains(&GameEvent::LevelUp));
    }

    #[test]
    fn title_idles_without_confirm() {
        let mut state = GameState::new(7, FIELD);
        for _ in 0..10 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.phase, GamePhase::Title);
        assert!(state.asteroids.is_empty());
        assert_eq!(state.level, 0);
    }

    #[test]
    fn clearing_the_field_advances_the_level() {
        let mut state = fresh_game();
        state.events.clear();
        state.asteroids.clear();

        tick(&mut state, &TickInput::default());
        assert_eq!(state.level, 2);
        assert_eq!(
            state.asteroids.len(),
            (INITIAL_ASTEROIDS + ASTEROIDS_PER_LEVEL) as usize
        );
        assert!(state.events.contains(&GameEvent::LevelUp));
    }

    #[test]
    fn wave_size_follows_the_level() {
        let mut state = fresh_game();
        for _ in 0..2 {
            state.asteroids.clear();
            tick(&mut state, &TickInput::default());
        }
        // level 3: 4 + 2*2
        assert_eq!(state.level, 3);
        assert_eq!(state.asteroids.len(), 8);
    }

    #[test]
    fn split_large_yields_two_medium_at_parent_position() {
        let mut state = GameState::new(1, FIELD);
        let parent = Asteroid::new(Vec2::new(100.0, 200.0), AsteroidSize::Large, &mut state.rng);
        let children = parent.split(&mut state.rng);
        assert_eq!(children.len(), 2);
        for c in &children {
            assert_eq!(c.size, AsteroidSize::Medium);
            assert_eq!(c.pos, parent.pos);
        }
    }

    #[test]
    fn split_small_is_terminal() {
        let mut state = GameState::new(1, FIELD);
        let parent = Asteroid::new(Vec2::new(100.0, 200.0), AsteroidSize::Small, &mut state.rng);
        assert!(parent.split(&mut state.rng).is_empty());
    }

    #[test]
    fn bullet_kill_scores_splits_and_signals() {
        let mut state = fresh_game();
        state.events.clear();
        state.asteroids.clear();

        let rock = stationary_asteroid(&mut state, Vec2::new(400.0, 300.0), AsteroidSize::Large);
        state.asteroids.push(rock);
        state.bullets.push(stationary_bullet(Vec2::new(400.0, 300.0)));
        state.ship.pos = Vec2::new(50.0, 50.0);

        tick(&mut state, &TickInput::default());

        assert_eq!(state.score, 20);
        assert!(state.bullets.is_empty());
        assert_eq!(state.asteroids.len(), 2);
        assert!(state
            .asteroids
            .iter()
            .all(|a| a.size == AsteroidSize::Medium));
        assert!(state
            .events
            .contains(&GameEvent::Explosion(AsteroidSize::Large)));
        assert!(state.screen_shake > 0.0);
        assert!(!state.particles.is_empty());
    }

    #[test]
    fn one_bullet_kills_at_most_one_asteroid_per_tick() {
        let mut state = fresh_game();
        state.asteroids.clear();

        let pos = Vec2::new(400.0, 300.0);
        let a = stationary_asteroid(&mut state, pos, AsteroidSize::Large);
        let b = stationary_asteroid(&mut state, pos, AsteroidSize::Large);
        state.asteroids.push(a);
        state.asteroids.push(b);
        state.bullets.push(stationary_bullet(pos));
        state.ship.pos = Vec2::new(50.0, 50.0);

        tick(&mut state, &TickInput::default());

        // One large destroyed (first in insertion order); the other survives
        assert_eq!(state.score, 20);
        let large_left = state
            .asteroids
            .iter()
            .filter(|a| a.size == AsteroidSize::Large)
            .count();
        assert_eq!(large_left, 1);
    }

    #[test]
    fn fragments_are_targetable_later_in_the_same_pass() {
        let mut state = fresh_game();
        state.asteroids.clear();

        let pos = Vec2::new(400.0, 300.0);
        let rock = stationary_asteroid(&mut state, pos, AsteroidSize::Large);
        state.asteroids.push(rock);
        state.bullets.push(stationary_bullet(pos));
        state.bullets.push(stationary_bullet(pos));
        state.ship.pos = Vec2::new(50.0, 50.0);

        tick(&mut state, &TickInput::default());

        // First bullet kills the large; the second hits one of its fragments
        assert_eq!(state.score, 20 + 50);
        assert!(state.bullets.is_empty());
        let smalls = state
            .asteroids
            .iter()
            .filter(|a| a.size == AsteroidSize::Small)
            .count();
        assert_eq!(smalls, 2);
    }

    #[test]
    fn invulnerable_ship_survives_contact() {
        let mut state = fresh_game();
        assert!(state.ship.invulnerable);
        park_asteroids(&mut state);

        let ship_pos = state.ship.pos;
        let on_ship = stationary_asteroid(&mut state, ship_pos, AsteroidSize::Large);
        state.asteroids.push(on_ship);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.lives, MAX_LIVES);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(!state.events.contains(&GameEvent::ShipExplosion));
    }

    #[test]
    fn nonfatal_hit_respawns_with_invulnerability() {
        let mut state = fresh_game();
        state.events.clear();
        park_asteroids(&mut state);
        state.ship.invulnerable = false;

        let ship_pos = state.ship.pos;
        let on_ship = stationary_asteroid(&mut state, ship_pos, AsteroidSize::Large);
        state.asteroids.push(on_ship);

        tick(&mut state, &TickInput::default());

        assert_eq!(state.lives, MAX_LIVES - 1);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.ship.invulnerable);
        assert_eq!(state.ship.pos, FIELD * 0.5);
        assert!(state.events.contains(&GameEvent::ShipExplosion));
        assert!(state.screen_shake > 0.0);
        assert!(!state.ship.thrusting);
    }

    #[test]
    fn fatal_hit_on_last_life_ends_the_game_once() {
        let mut state = fresh_game();
        state.events.clear();
        park_asteroids(&mut state);
        state.ship.invulnerable = false;
        state.lives = 1;

        let ship_pos = state.ship.pos;
        let on_ship = stationary_asteroid(&mut state, ship_pos, AsteroidSize::Large);
        state.asteroids.push(on_ship);

        tick(&mut state, &TickInput::default());

        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        let game_overs = state
            .events
            .iter()
            .filter(|e| **e == GameEvent::GameOver)
            .count();
        assert_eq!(game_overs, 1);

        // Idle ticks in gameover emit nothing further
        state.events.clear();
        tick(&mut state, &TickInput::default());
        assert!(state.events.is_empty());
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn gameover_confirm_restarts() {
        let mut state = fresh_game();
        state.phase = GamePhase::GameOver;
        state.score = 999;
        state.lives = 0;

        let input = TickInput {
            confirm: true,
            time_ms: 10_000.0,
            ..Default::default()
        };
        tick(&mut state, &input);

        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, MAX_LIVES);
        assert_eq!(state.level, 1);
        assert_eq!(state.asteroids.len(), INITIAL_ASTEROIDS as usize);
        assert!(state.ship.invulnerable);
    }

    #[test]
    fn invulnerability_expires_by_wall_clock() {
        let mut state = fresh_game();
        assert!(state.ship.invulnerable);
        park_asteroids(&mut state);

        // Well past the window
        let input = TickInput {
            time_ms: INVULNERABLE_MS + 500.0,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert!(!state.ship.invulnerable);
    }

    #[test]
    fn shoot_cooldown_limits_fire_rate() {
        let mut state = fresh_game();
        park_asteroids(&mut state);

        let input = TickInput {
            fire: true,
            ..Default::default()
        };
        for _ in 0..20 {
            tick(&mut state, &input);
        }
        // Shots land on ticks 1 and 11
        assert_eq!(state.bullets.len(), 2);
        let shots = state
            .events
            .iter()
            .filter(|e| **e == GameEvent::Shoot)
            .count();
        assert_eq!(shots, 2);
    }

    #[test]
    fn bullets_expire_after_their_lifetime() {
        let mut state = fresh_game();
        park_asteroids(&mut state);
        state.bullets.push(Bullet::new(Vec2::new(400.0, 300.0), 0.3));

        for _ in 0..BULLET_LIFETIME {
            tick(&mut state, &TickInput::default());
        }
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn ship_speed_is_clamped() {
        let mut state = fresh_game();
        park_asteroids(&mut state);

        // time_ms stays 0, so invulnerability never lapses and the run is
        // free of collisions regardless of where thrust takes the ship
        let input = TickInput {
            thrust: true,
            ..Default::default()
        };
        for _ in 0..300 {
            tick(&mut state, &input);
        }
        assert!(state.ship.vel.length() <= MAX_SPEED + 1e-3);
    }

    #[test]
    fn same_seed_same_run() {
        let script = |state: &mut GameState| {
            tick(
                state,
                &TickInput {
                    confirm: true,
                    ..Default::default()
                },
            );
            for i in 0..120u32 {
                let input = TickInput {
                    thrust: i % 3 == 0,
                    rotate_left: i % 2 == 0,
                    fire: true,
                    ..Default::default()
                };
                tick(state, &input);
            }
        };

        let mut a = GameState::new(99, FIELD);
        let mut b = GameState::new(99, FIELD);
        script(&mut a);
        script(&mut b);

        assert_eq!(a.score, b.score);
        assert_eq!(a.time_ticks, b.time_ticks);
        assert_eq!(a.ship.pos, b.ship.pos);
        assert_eq!(a.bullets.len(), b.bullets.len());
        assert_eq!(a.asteroids.len(), b.asteroids.len());
        for (x, y) in a.asteroids.iter().zip(b.asteroids.iter()) {
            assert_eq!(x.pos, y.pos);
            assert_eq!(x.size, y.size);
        }
    }
}
