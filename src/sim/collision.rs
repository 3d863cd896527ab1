//! Circle vs axis-aligned square overlap
//!
//! The one geometric primitive the game needs. Both the tower and every
//! projectile are circles; every enemy is a square anchored at its top-left
//! corner. The same test decides tower hits and projectile hits.

use glam::Vec2;

/// A circular body (tower or projectile)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }
}

/// An axis-aligned square body (enemy)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Square {
    /// Top-left corner
    pub min: Vec2,
    pub side: f32,
}

impl Square {
    pub fn new(min: Vec2, side: f32) -> Self {
        Self { min, side }
    }

    /// Bottom-right corner
    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + Vec2::splat(self.side)
    }

    /// Point on (or inside) the square closest to `p`
    #[inline]
    pub fn nearest_point(&self, p: Vec2) -> Vec2 {
        p.clamp(self.min, self.max())
    }
}

/// Check if a circle touches or overlaps a square
///
/// Clamps the circle center onto the square and compares the squared
/// distance to that nearest point against the squared radius. Touching
/// counts as overlapping.
#[inline]
pub fn circle_square_overlap(circle: &Circle, square: &Square) -> bool {
    let nearest = square.nearest_point(circle.center);
    nearest.distance_squared(circle.center) <= circle.radius * circle.radius
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_center_inside_square() {
        let square = Square::new(Vec2::new(0.0, 0.0), 10.0);
        let circle = Circle::new(Vec2::new(5.0, 5.0), 1.0);
        assert!(circle_square_overlap(&circle, &square));
    }

    #[test]
    fn test_touching_edge_counts() {
        let square = Square::new(Vec2::new(10.0, 0.0), 10.0);
        // Circle reaches exactly x = 10
        let circle = Circle::new(Vec2::new(5.0, 5.0), 5.0);
        assert!(circle_square_overlap(&circle, &square));

        let short = Circle::new(Vec2::new(5.0, 5.0), 4.9);
        assert!(!circle_square_overlap(&short, &square));
    }

    #[test]
    fn test_corner_uses_euclidean_distance() {
        let square = Square::new(Vec2::new(10.0, 10.0), 10.0);
        // Nearest point is the corner (10, 10); distance is sqrt(50) ~ 7.07
        let circle = Circle::new(Vec2::new(5.0, 5.0), 7.0);
        assert!(!circle_square_overlap(&circle, &square));
        let circle = Circle::new(Vec2::new(5.0, 5.0), 7.1);
        assert!(circle_square_overlap(&circle, &square));
    }

    #[test]
    fn test_tower_radius_is_full_size() {
        // Tower of size 50 at center; enemy 40 units left of center
        let tower = Circle::new(Vec2::new(375.0, 375.0), 50.0);
        let enemy = Square::new(Vec2::new(325.0, 370.0), 10.0);
        // Enemy right edge at x = 335 -> 40 units away: inside full radius,
        // outside the drawn radius of 25
        assert!(circle_square_overlap(&tower, &enemy));
    }

    proptest! {
        #[test]
        fn prop_overlap_matches_nearest_point_distance(
            cx in -100.0f32..900.0,
            cy in -100.0f32..900.0,
            r in 0.0f32..120.0,
            sx in 0.0f32..750.0,
            sy in 0.0f32..750.0,
            side in 1.0f32..60.0,
        ) {
            let circle = Circle::new(Vec2::new(cx, cy), r);
            let square = Square::new(Vec2::new(sx, sy), side);

            let nx = cx.max(sx).min(sx + side);
            let ny = cy.max(sy).min(sy + side);
            let d2 = (nx - cx) * (nx - cx) + (ny - cy) * (ny - cy);

            prop_assert_eq!(circle_square_overlap(&circle, &square), d2 <= r * r);
        }

        #[test]
        fn prop_center_inside_always_overlaps(
            sx in 0.0f32..700.0,
            sy in 0.0f32..700.0,
            side in 1.0f32..50.0,
            tx in 0.0f32..1.0,
            ty in 0.0f32..1.0,
        ) {
            let square = Square::new(Vec2::new(sx, sy), side);
            let center = Vec2::new(sx + tx * side, sy + ty * side);
            prop_assert!(circle_square_overlap(&Circle::new(center, 0.0), &square));
        }
    }
}
