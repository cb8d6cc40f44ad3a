//! Toroidal field geometry: wrapping and circle overlap
//!
//! Every collision test in the game reduces to a circle-vs-circle check on a
//! wrapped rectangular field.

use glam::Vec2;

/// Wrap a position back onto the field once it drifts a full radius past an
/// edge. Exiting one edge re-enters the opposite edge, which is what makes
/// the play-field toroidal. Applied every tick after movement for the ship,
/// bullets, and asteroids.
pub fn wrap_position(pos: &mut Vec2, radius: f32, field: Vec2) {
    if pos.x < -radius {
        pos.x = field.x + radius;
    }
    if pos.x > field.x + radius {
        pos.x = -radius;
    }
    if pos.y < -radius {
        pos.y = field.y + radius;
    }
    if pos.y > field.y + radius {
        pos.y = -radius;
    }
}

/// True iff two circles overlap. Strict inequality: tangent circles do not
/// collide.
pub fn circle_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    let r = ra + rb;
    a.distance_squared(b) < r * r
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const FIELD: Vec2 = Vec2::new(800.0, 600.0);

    #[test]
    fn wrap_left_exit_reenters_right() {
        let mut pos = Vec2::new(-11.0, 50.0);
        wrap_position(&mut pos, 10.0, FIELD);
        assert_eq!(pos, Vec2::new(810.0, 50.0));
    }

    #[test]
    fn wrap_right_exit_reenters_left() {
        let mut pos = Vec2::new(811.0, 50.0);
        wrap_position(&mut pos, 10.0, FIELD);
        assert_eq!(pos, Vec2::new(-10.0, 50.0));
    }

    #[test]
    fn wrap_top_and_bottom() {
        let mut pos = Vec2::new(400.0, -6.0);
        wrap_position(&mut pos, 5.0, FIELD);
        assert_eq!(pos.y, 605.0);

        let mut pos = Vec2::new(400.0, 606.0);
        wrap_position(&mut pos, 5.0, FIELD);
        assert_eq!(pos.y, -5.0);
    }

    #[test]
    fn wrap_leaves_interior_positions_alone() {
        let mut pos = Vec2::new(400.0, 300.0);
        wrap_position(&mut pos, 50.0, FIELD);
        assert_eq!(pos, Vec2::new(400.0, 300.0));
    }

    #[test]
    fn identical_centers_always_overlap() {
        let p = Vec2::new(3.0, 4.0);
        assert!(circle_overlap(p, 0.5, p, 0.5));
    }

    #[test]
    fn tangent_circles_do_not_collide() {
        // centers exactly 10 apart, radii 4 + 6
        assert!(!circle_overlap(Vec2::ZERO, 4.0, Vec2::new(10.0, 0.0), 6.0));
    }

    #[test]
    fn bullet_sized_overlap() {
        // distance 5 < 3 + 14
        assert!(circle_overlap(
            Vec2::new(100.0, 100.0),
            3.0,
            Vec2::new(105.0, 100.0),
            14.0
        ));
    }

    proptest! {
        #[test]
        fn wrap_always_lands_within_margin(
            x in -2000.0f32..2000.0,
            y in -2000.0f32..2000.0,
            r in 0.0f32..60.0,
        ) {
            let mut pos = Vec2::new(x, y);
            wrap_position(&mut pos, r, FIELD);
            prop_assert!(pos.x >= -r && pos.x <= FIELD.x + r);
            prop_assert!(pos.y >= -r && pos.y <= FIELD.y + r);
        }

        #[test]
        fn overlap_is_symmetric(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0,
            ra in 0.1f32..60.0, rb in 0.1f32..60.0,
        ) {
            let a = Vec2::new(ax, ay);
            let b = Vec2::new(bx, by);
            prop_assert_eq!(circle_overlap(a, ra, b, rb), circle_overlap(b, rb, a, ra));
        }
    }
}
