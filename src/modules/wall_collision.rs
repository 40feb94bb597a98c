/*
Bouncing a ball off the rotating walls.

Only runs when the ball's center has left the polygon. The nearest edge
(by distance to the segment, not the infinite line) is picked, its unit
normal computed, and the velocity mirrored across it. Position is left
alone: a fast ball may sit outside for a frame until the reflected velocity
carries it back in.
*/

use macroquad::math::DVec2;

use crate::modules::ball::Ball;
use crate::modules::containment::is_inside;
use crate::modules::geometry::{Point, Polygon, Velocity, edge_normal};

/// Euclidean distance from `point` to the segment `start..end`.
/// A zero-length segment is treated as a single point.
pub fn distance_to_segment(point: Point, start: Point, end: Point) -> f64 {
    let d = end - start;
    let len_sq = d.length_squared();

    if len_sq == 0.0 {
        return point.distance(start);
    }

    // Project onto the segment and clamp to its ends
    let t = ((point - start).dot(d) / len_sq).clamp(0.0, 1.0);
    let closest = start + d * t;
    point.distance(closest)
}

/// Index of the edge nearest to `point`. Ties go to the lower index.
pub fn closest_edge(point: Point, polygon: &Polygon) -> usize {
    let mut closest_index = 0;
    let mut min_dist = f64::INFINITY;

    for (i, (start, end)) in polygon.edges().enumerate() {
        let dist = distance_to_segment(point, start, end);
        if dist < min_dist {
            min_dist = dist;
            closest_index = i;
        }
    }

    closest_index
}

/// Unit normal of edge `index`. A degenerate edge yields (0, 0).
pub fn unit_edge_normal(polygon: &Polygon, index: usize) -> DVec2 {
    let (start, end) = polygon.edge(index);
    let normal = edge_normal(start, end);
    let mag = normal.length();
    if mag != 0.0 { normal / mag } else { normal }
}

/// Mirror `velocity` across the unit vector `normal`: v - 2(v.n)n.
#[inline]
pub fn reflect(velocity: Velocity, normal: DVec2) -> Velocity {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Reflect the ball's velocity off the nearest wall if its center is outside
/// `polygon`. Returns true when a bounce happened.
pub fn handle_square_collision(ball: &mut Ball, polygon: &Polygon) -> bool {
    let (inside, _) = is_inside(ball.pos, polygon);
    if inside {
        return false;
    }

    let edge = closest_edge(ball.pos, polygon);
    let normal = unit_edge_normal(polygon, edge);
    ball.vel = reflect(ball.vel, normal);
    true
}
