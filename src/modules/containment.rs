/*
Point-in-polygon test by axis projection.

For every edge we project the point and all four vertices onto the edge
normal. If the point falls outside the vertices' [min, max] on any axis it
is outside the polygon. This is the separating axis idea cut down to a single
convex shape against a single point.
*/

use macroquad::math::DVec2;

use crate::modules::geometry::{Point, Polygon, edge_normal};

/// Returns whether `point` lies inside `polygon` (boundary counts as inside).
/// When inside, the last edge's (unnormalized) normal comes along as a hint;
/// only the boolean is meaningful. When outside there is no hint.
pub fn is_inside(point: Point, polygon: &Polygon) -> (bool, Option<DVec2>) {
    let mut normal = DVec2::ZERO;

    for (start, end) in polygon.edges() {
        normal = edge_normal(start, end);

        // Project relative to a vertex on the edge so numbers stay small
        let point_proj = (point - start).dot(normal);

        let mut min_v = f64::MAX;
        let mut max_v = f64::MIN;
        for vertex in polygon.vertices() {
            let projection = (*vertex - start).dot(normal);
            min_v = min_v.min(projection);
            max_v = max_v.max(projection);
        }

        // Gap on this axis, so the point is outside
        if point_proj < min_v || point_proj > max_v {
            return (false, None);
        }
    }

    (true, Some(normal))
}
