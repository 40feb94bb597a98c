use macroquad::prelude::*;

use crate::modules::simulation::SimulationState;

const SQUARE_COLOR: Color = WHITE;
const SQUARE_THICKNESS: f32 = 2.0;

/// Draw the square outline and every ball. Call after the step has finished.
pub fn draw_frame(state: &SimulationState) {
    clear_background(BLACK);

    for ball in state.balls() {
        draw_circle(
            ball.pos.x as f32,
            ball.pos.y as f32,
            ball.radius as f32,
            ball.color.into(),
        );
    }

    // Draw rotated square
    let polygon = state.polygon();
    for (start, end) in polygon.edges() {
        draw_line(
            start.x as f32,
            start.y as f32,
            end.x as f32,
            end.y as f32,
            SQUARE_THICKNESS,
            SQUARE_COLOR,
        );
    }
}
