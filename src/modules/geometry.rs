/*
Points, rotation and the rotating container.

The container is a square described by its top-left corner and side length.
Each frame it is rotated about its own center and handed to the collision
code as a Polygon with a fixed winding order: top-left, top-right,
bottom-right, bottom-left.
*/

use macroquad::math::DVec2;

/// A position in screen space.
pub type Point = DVec2;
/// A per-step displacement. Same shape as `Point`, different role.
pub type Velocity = DVec2;

/// Four vertices in consistent winding order. Edges are consecutive pairs,
/// wrapping from the last vertex back to the first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Polygon {
    vertices: [Point; 4],
}

impl Polygon {
    pub fn new(vertices: [Point; 4]) -> Self {
        Self { vertices }
    }

    pub fn vertices(&self) -> &[Point; 4] {
        &self.vertices
    }

    /// Edge `i` as `(start, end)`. Index wraps modulo 4.
    pub fn edge(&self, i: usize) -> (Point, Point) {
        (self.vertices[i % 4], self.vertices[(i + 1) % 4])
    }

    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        (0..4).map(move |i| self.edge(i))
    }
}

/// Normal of an edge: the edge vector rotated by 90 degrees, (-ey, ex).
/// Not normalized. Its direction relative to the polygon depends only on winding.
#[inline]
pub fn edge_normal(start: Point, end: Point) -> DVec2 {
    let edge = end - start;
    DVec2::new(-edge.y, edge.x)
}

// Helper function to rotate a point around a center point
pub fn rotate_point(point: Point, angle: f64, center: Point) -> Point {
    // Early return for zero angle to avoid unnecessary calculations
    if angle == 0.0 {
        return point;
    }

    // Translate point to origin
    let translated = point - center;

    // Standard 2D rotation formula
    let (sin_angle, cos_angle) = angle.sin_cos();
    let rotated_x = translated.x * cos_angle - translated.y * sin_angle;
    let rotated_y = translated.x * sin_angle + translated.y * cos_angle;

    // Translate back
    DVec2::new(rotated_x + center.x, rotated_y + center.y)
}

/// Corners of the square with top-left `(x, y)` and side `size`, rotated by
/// `angle` about the square's center. The center sits on a whole-pixel half
/// (`floor(size / 2)`), the same rounding the screen layout uses.
pub fn rotated_square_vertices(x: f64, y: f64, size: f64, angle: f64) -> Polygon {
    let half_size = (size / 2.0).floor();
    let center = DVec2::new(x + half_size, y + half_size);

    // Unrotated corners, in the winding order the collision code relies on
    let corners = [
        DVec2::new(x, y),
        DVec2::new(x + size, y),
        DVec2::new(x + size, y + size),
        DVec2::new(x, y + size),
    ];

    Polygon::new(corners.map(|corner| rotate_point(corner, angle, center)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn quarter_turn_about_origin() {
        let p = rotate_point(DVec2::new(1.0, 0.0), FRAC_PI_2, DVec2::ZERO);
        assert_abs_diff_eq!(p.x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn zero_angle_is_identity() {
        let p = DVec2::new(3.5, -7.25);
        assert_eq!(rotate_point(p, 0.0, DVec2::new(100.0, 100.0)), p);
    }

    #[test]
    fn center_is_a_fixed_point() {
        let c = DVec2::new(400.0, 300.0);
        let p = rotate_point(c, 1.234, c);
        assert_abs_diff_eq!(p.x, c.x, epsilon = 1e-9);
        assert_abs_diff_eq!(p.y, c.y, epsilon = 1e-9);
    }

    #[test]
    fn unrotated_square_keeps_corner_order() {
        let square = rotated_square_vertices(250.0, 150.0, 300.0, 0.0);
        assert_eq!(
            square.vertices(),
            &[
                DVec2::new(250.0, 150.0),
                DVec2::new(550.0, 150.0),
                DVec2::new(550.0, 450.0),
                DVec2::new(250.0, 450.0),
            ]
        );
    }

    #[test]
    fn half_turn_swaps_opposite_corners() {
        let square = rotated_square_vertices(0.0, 0.0, 10.0, PI);
        let v = square.vertices();
        assert_abs_diff_eq!(v[0].x, 10.0, epsilon = 1e-9);
        assert_abs_diff_eq!(v[0].y, 10.0, epsilon = 1e-9);
        assert_abs_diff_eq!(v[2].x, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(v[2].y, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn odd_size_rotates_about_floored_center() {
        // Center is (2, 2), not (2.5, 2.5)
        let square = rotated_square_vertices(0.0, 0.0, 5.0, PI);
        let v = square.vertices();
        assert_abs_diff_eq!(v[0].x, 4.0, epsilon = 1e-9);
        assert_abs_diff_eq!(v[0].y, 4.0, epsilon = 1e-9);
        assert_abs_diff_eq!(v[2].x, -1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(v[2].y, -1.0, epsilon = 1e-9);
    }

    #[test]
    fn rotation_preserves_side_length() {
        let square = rotated_square_vertices(250.0, 150.0, 300.0, 0.7);
        for (start, end) in square.edges() {
            assert_abs_diff_eq!(start.distance(end), 300.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn edges_wrap_last_to_first() {
        let square = rotated_square_vertices(0.0, 0.0, 1.0, 0.0);
        let (start, end) = square.edge(3);
        assert_eq!(start, DVec2::new(0.0, 1.0));
        assert_eq!(end, DVec2::new(0.0, 0.0));
    }
}
