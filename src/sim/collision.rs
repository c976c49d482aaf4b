//! Circle overlap tests
//!
//! Every hit test in the game is circle against circle on the distance between
//! centers. Asteroid outlines are jagged but collide as plain circles; that is
//! part of the game feel and stays that way.

use glam::Vec2;

/// Anything with a collision circle
pub trait Circle {
    fn center(&self) -> Vec2;
    fn radius(&self) -> f32;
}

macro_rules! impl_circle {
    ($($ty:ty),*) => {
        $(impl Circle for $ty {
            #[inline]
            fn center(&self) -> Vec2 {
                self.pos
            }
            #[inline]
            fn radius(&self) -> f32 {
                self.radius
            }
        })*
    };
}

impl_circle!(
    super::entity::Ship,
    super::entity::Asteroid,
    super::entity::Bullet,
    super::entity::PowerUpDrop
);

/// Strict overlap: touching circles do not collide
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    a.distance(b) < ra + rb
}

/// Overlap between two entities with both radii multiplied by `scale`
#[inline]
pub fn overlaps_scaled(a: &impl Circle, b: &impl Circle, scale: f32) -> bool {
    circles_overlap(a.center(), a.radius() * scale, b.center(), b.radius() * scale)
}

/// Overlap between two entities at their full radii
#[inline]
pub fn overlaps(a: &impl Circle, b: &impl Circle) -> bool {
    overlaps_scaled(a, b, 1.0)
}

/// Index of the first entry in `targets` overlapping `subject`
pub fn first_hit<T: Circle>(subject: &impl Circle, targets: &[T]) -> Option<usize> {
    targets.iter().position(|t| overlaps(subject, t))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::{Asteroid, Bullet, SizeClass};
    use proptest::prelude::*;

    fn rock(pos: Vec2, radius: f32) -> Asteroid {
        Asteroid {
            id: 0,
            pos,
            vel: Vec2::ZERO,
            radius,
            angle: 0.0,
            size: SizeClass::Large,
            rotation_speed: 0.0,
            outline: vec![1.0; 8],
        }
    }

    fn shot(pos: Vec2) -> Bullet {
        Bullet {
            id: 0,
            pos,
            vel: Vec2::ZERO,
            radius: 2.0,
            angle: 0.0,
            created_at: 0.0,
            lifespan: 1500.0,
        }
    }

    #[test]
    fn test_touching_is_not_overlap() {
        assert!(!circles_overlap(Vec2::ZERO, 5.0, Vec2::new(10.0, 0.0), 5.0));
        assert!(circles_overlap(Vec2::ZERO, 5.0, Vec2::new(9.9, 0.0), 5.0));
    }

    #[test]
    fn test_scaled_hitbox_is_forgiving() {
        let a = rock(Vec2::ZERO, 20.0);
        let b = rock(Vec2::new(60.0, 0.0), 45.0);
        assert!(overlaps(&a, &b));
        assert!(!overlaps_scaled(&a, &b, 0.8));
    }

    #[test]
    fn test_first_hit_takes_iteration_order() {
        let bullet = shot(Vec2::new(10.0, 0.0));
        let rocks = vec![
            rock(Vec2::new(500.0, 0.0), 15.0),
            rock(Vec2::new(30.0, 0.0), 25.0),
            rock(Vec2::new(10.0, 0.0), 45.0),
        ];
        assert_eq!(first_hit(&bullet, &rocks), Some(1));
        assert_eq!(first_hit(&shot(Vec2::new(-400.0, 0.0)), &rocks), None);
    }

    proptest! {
        #[test]
        fn prop_overlap_is_symmetric(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0,
            ra in 0.5f32..50.0, rb in 0.5f32..50.0,
        ) {
            let a = Vec2::new(ax, ay);
            let b = Vec2::new(bx, by);
            prop_assert_eq!(circles_overlap(a, ra, b, rb), circles_overlap(b, rb, a, ra));
        }
    }
}
