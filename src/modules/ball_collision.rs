/*
Ball against ball.

Equal masses, so an elastic hit along the line of centers just swaps the
two velocity components along that line. After the impulse the balls are
pushed apart by half the overlap each so they don't stick together.
*/

use macroquad::math::DVec2;

use crate::modules::ball::Ball;

// Used when two centers coincide and the line between them is undefined
const FALLBACK_NORMAL: DVec2 = DVec2::X;

/// Resolve a hit between `a` and `b`. Returns true if they were touching.
pub fn handle_ball_collision(a: &mut Ball, b: &mut Ball) -> bool {
    let delta = b.pos - a.pos;
    let distance = delta.length();
    let min_distance = a.radius + b.radius;

    if distance >= min_distance {
        return false;
    }

    // Unit normal from a to b
    let normal = if distance > 0.0 { delta / distance } else { FALLBACK_NORMAL };

    // Relative velocity along the normal. For equal masses (2 * dot) / 2 == dot.
    let impulse = (a.vel - b.vel).dot(normal);

    a.vel -= impulse * normal;
    b.vel += impulse * normal;

    // Separate balls to prevent sticking
    let overlap = min_distance - distance;
    if overlap > 0.0 {
        let push = normal * (overlap / 2.0);
        a.pos -= push;
        b.pos += push;
    }

    true
}

/// Run `handle_ball_collision` over every unordered pair, i ascending then
/// j > i ascending. Corrections accumulate in that order. Returns the number of hits.
pub fn resolve_all_pairs(balls: &mut [Ball]) -> usize {
    let mut hits = 0;
    for i in 0..balls.len() {
        // Split so we can hold ball i and ball j mutably at the same time
        let (head, tail) = balls.split_at_mut(i + 1);
        let a = &mut head[i];
        for b in tail.iter_mut() {
            if handle_ball_collision(a, b) {
                hits += 1;
            }
        }
    }
    hits
}
