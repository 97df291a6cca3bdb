//! Collision detection and response between the bird and rectangles
//!
//! The bird is a circle; walls, ground and score zones are axis-aligned
//! rectangles. A hit reports the normal pointing from the rectangle toward the
//! bird so the bird can be pushed out along it.

use glam::Vec2;

use super::geom::Rect;

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Surface normal at contact (pointing toward the circle centre)
    pub normal: Vec2,
    /// Penetration depth (for position correction)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Check collision between a circle and a rectangle
///
/// Touching edges count as a hit, so a bird resting on the ground keeps
/// reporting contact.
pub fn circle_rect_collision(center: Vec2, radius: f32, rect: &Rect) -> CollisionResult {
    if rect.contains_point(center) {
        // Centre inside the rectangle: push out through the nearest face
        let min = rect.min();
        let max = rect.max();
        let faces = [
            (center.x - min.x, Vec2::NEG_X),
            (max.x - center.x, Vec2::X),
            (center.y - min.y, Vec2::NEG_Y),
            (max.y - center.y, Vec2::Y),
        ];
        let (dist, normal) = faces
            .into_iter()
            .min_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal))
            .unwrap_or((0.0, Vec2::Y));
        return CollisionResult {
            hit: true,
            normal,
            penetration: dist + radius,
        };
    }

    let closest = rect.closest_point(center);
    let delta = center - closest;
    let dist = delta.length();
    if dist > radius {
        return CollisionResult::miss();
    }

    CollisionResult {
        hit: true,
        normal: delta.normalize_or(Vec2::Y),
        penetration: radius - dist,
    }
}

/// Remove the velocity component that points into a surface
#[inline]
pub fn clip_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    let into = velocity.dot(normal);
    if into < 0.0 {
        velocity - into * normal
    } else {
        velocity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wall() -> Rect {
        Rect::new(Vec2::new(100.0, 100.0), Vec2::new(20.0, 100.0))
    }

    #[test]
    fn test_circle_rect_side_hit() {
        // Wall spans x 90..110; circle at x 85 with radius 8 overlaps by 3
        let result = circle_rect_collision(Vec2::new(85.0, 100.0), 8.0, &wall());
        assert!(result.hit);
        assert_eq!(result.normal, Vec2::NEG_X);
        assert!((result.penetration - 3.0).abs() < 0.001);
    }

    #[test]
    fn test_circle_rect_miss() {
        let result = circle_rect_collision(Vec2::new(70.0, 100.0), 8.0, &wall());
        assert!(!result.hit);
    }

    #[test]
    fn test_circle_rect_corner_miss() {
        // Diagonal from corner (110, 150) is ~9.9 > radius 8
        let result = circle_rect_collision(Vec2::new(117.0, 157.0), 8.0, &wall());
        assert!(!result.hit);
    }

    #[test]
    fn test_circle_rect_touching_counts() {
        let ground = Rect::from_min_max(Vec2::ZERO, Vec2::new(375.0, 112.0));
        let result = circle_rect_collision(Vec2::new(50.0, 127.0), 15.0, &ground);
        assert!(result.hit);
        assert_eq!(result.normal, Vec2::Y);
        assert!(result.penetration.abs() < 0.001);
    }

    #[test]
    fn test_circle_center_inside() {
        // Centre 2px inside the left face
        let result = circle_rect_collision(Vec2::new(92.0, 100.0), 8.0, &wall());
        assert!(result.hit);
        assert_eq!(result.normal, Vec2::NEG_X);
        assert!((result.penetration - 10.0).abs() < 0.001);
    }

    #[test]
    fn test_clip_velocity() {
        // Falling onto the ground: downward component removed
        let v = clip_velocity(Vec2::new(0.0, -300.0), Vec2::Y);
        assert_eq!(v, Vec2::ZERO);

        // Moving away is untouched
        let v = clip_velocity(Vec2::new(0.0, 300.0), Vec2::Y);
        assert_eq!(v, Vec2::new(0.0, 300.0));
    }
}
