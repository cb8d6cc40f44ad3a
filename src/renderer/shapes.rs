//! Shape generation for the neon wireframe look
//!
//! Everything is expressed as thick line segments (quads) and small filled
//! circles so a single triangle-list pipeline can draw the whole frame.

use glam::Vec2;
use std::f32::consts::TAU;

use super::vertex::{colors, Vertex};
use crate::sim::{Asteroid, Bullet, GamePhase, GameState, Particle, Ship};

/// Outline stroke width in pixels
const LINE_WIDTH: f32 = 2.0;
/// Width multiplier for the soft glow pass under each outline
const GLOW_WIDTH: f32 = 3.0;
const GLOW_ALPHA: f32 = 0.22;

/// Append a thick line segment as two triangles
fn line(a: Vec2, b: Vec2, width: f32, color: [f32; 4], out: &mut Vec<Vertex>) {
    let dir = (b - a).normalize_or_zero();
    let perp = Vec2::new(-dir.y, dir.x) * (width * 0.5);

    let v1a = a + perp;
    let v1b = a - perp;
    let v2a = b + perp;
    let v2b = b - perp;

    out.push(Vertex::new(v1a.x, v1a.y, color));
    out.push(Vertex::new(v1b.x, v1b.y, color));
    out.push(Vertex::new(v2a.x, v2a.y, color));

    out.push(Vertex::new(v2a.x, v2a.y, color));
    out.push(Vertex::new(v1b.x, v1b.y, color));
    out.push(Vertex::new(v2b.x, v2b.y, color));
}

/// Append a polyline, optionally closed
fn polyline(points: &[Vec2], closed: bool, width: f32, color: [f32; 4], out: &mut Vec<Vertex>) {
    if points.len() < 2 {
        return;
    }
    for pair in points.windows(2) {
        line(pair[0], pair[1], width, color, out);
    }
    if closed {
        line(points[points.len() - 1], points[0], width, color, out);
    }
}

/// Outline plus a wider translucent pass underneath for the glow
fn glow_polyline(points: &[Vec2], closed: bool, color: [f32; 4], out: &mut Vec<Vertex>) {
    let glow = [color[0], color[1], color[2], color[3] * GLOW_ALPHA];
    polyline(points, closed, LINE_WIDTH * GLOW_WIDTH, glow, out);
    polyline(points, closed, LINE_WIDTH, color, out);
}

/// Append a filled circle as a triangle fan
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32, out: &mut Vec<Vertex>) {
    for i in 0..segments {
        let theta1 = i as f32 / segments as f32 * TAU;
        let theta2 = (i + 1) as f32 / segments as f32 * TAU;

        out.push(Vertex::new(center.x, center.y, color));
        out.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        out.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }
}

/// Ship outline with optional thrust flame.
///
/// `flicker` in [0, 1) jitters the flame length per frame.
pub fn ship(ship: &Ship, flicker: f32, out: &mut Vec<Vertex>) {
    let s = ship.radius;
    let dir = Vec2::from_angle(ship.angle);

    let nose = ship.pos + dir * s;
    let left = ship.pos + Vec2::from_angle(ship.angle + 2.3) * (s * 0.8);
    let right = ship.pos + Vec2::from_angle(ship.angle - 2.3) * (s * 0.8);
    let back = ship.pos - dir * (s * 0.3);

    glow_polyline(&[nose, left, back, right], true, colors::SHIP, out);

    if ship.thrusting {
        let flame_len = s * (0.6 + flicker * 0.4);
        let tip = ship.pos - dir * flame_len;
        let flame_left = left.lerp(back, 0.3);
        let flame_right = right.lerp(back, 0.3);
        polyline(&[flame_left, tip, flame_right], false, LINE_WIDTH, colors::FLAME, out);
    }
}

/// Jagged asteroid outline, tinted by size
pub fn asteroid(asteroid: &Asteroid, out: &mut Vec<Vertex>) {
    let [r, g, b] = asteroid.size.color();
    let color = [r, g, b, 1.0];

    let points: Vec<Vec2> = asteroid
        .verts
        .iter()
        .map(|&(angle, dist)| asteroid.pos + Vec2::from_angle(angle + asteroid.rotation) * dist)
        .collect();
    glow_polyline(&points, true, color, out);
}

/// Bullet dot with a short trail against its motion
pub fn bullet(bullet: &Bullet, out: &mut Vec<Vertex>) {
    line(
        bullet.pos,
        bullet.pos - bullet.vel * 0.5,
        1.5,
        colors::BULLET_TRAIL,
        out,
    );
    circle(bullet.pos, 2.0, colors::BULLET, 8, out);
}

/// Particle dot fading with its remaining life
pub fn particle(particle: &Particle, out: &mut Vec<Vertex>) {
    let [r, g, b] = particle.color;
    let color = [r, g, b, particle.life.clamp(0.0, 1.0)];
    circle(particle.pos, particle.size, color, 6, out);
}

/// Build the full frame for the current state.
///
/// `now_ms` drives the invulnerability blink; `flicker` jitters the thrust
/// flame; `draw_particles` lets the particle setting gate rendering without
/// touching the simulation.
pub fn build_frame(
    state: &GameState,
    now_ms: f64,
    flicker: f32,
    draw_particles: bool,
) -> Vec<Vertex> {
    let mut out = Vec::with_capacity(4096);

    for a in &state.asteroids {
        asteroid(a, &mut out);
    }
    for b in &state.bullets {
        bullet(b, &mut out);
    }
    if state.phase == GamePhase::Playing && state.ship.blink_visible(now_ms) {
        ship(&state.ship, flicker, &mut out);
    }
    if draw_particles {
        for p in &state.particles {
            particle(p, &mut out);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{GameState, TickInput};
    use glam::Vec2;

    const FIELD: Vec2 = Vec2::new(800.0, 600.0);

    fn playing_state() -> GameState {
        let mut state = GameState::new(3, FIELD);
        crate::sim::tick(
            &mut state,
            &TickInput {
                confirm: true,
                ..Default::default()
            },
        );
        state
    }

    #[test]
    fn frame_contains_the_wave() {
        let state = playing_state();
        let verts = build_frame(&state, 0.0, 0.5, true);
        assert!(!verts.is_empty());
        // Triangle list
        assert_eq!(verts.len() % 3, 0);
    }

    #[test]
    fn blink_hides_the_ship() {
        let state = playing_state();
        // Just after respawn the ship sits in a hidden blink window
        let hidden = build_frame(&state, 50.0, 0.5, true);
        let visible = build_frame(&state, 150.0, 0.5, true);
        assert!(visible.len() > hidden.len());
    }

    #[test]
    fn particle_rendering_can_be_disabled() {
        let mut state = playing_state();
        state.emit_particles(Vec2::new(100.0, 100.0), [1.0, 0.0, 1.0], 15);
        let with = build_frame(&state, 150.0, 0.5, true);
        let without = build_frame(&state, 150.0, 0.5, false);
        assert!(with.len() > without.len());
    }
}
