/*
Fixed virtual resolution for drawing.

The simulation works in an 800x600 style coordinate space no matter how
big the window is. Call use_virtual_resolution at the top of every frame;
the picture is scaled to fit and centered with black bars on the sides.
*/

use macroquad::prelude::*;

/// Viewport `(x, y, w, h)` in pixels that fits `virtual_w x virtual_h` into
/// `screen_w x screen_h` with the aspect ratio kept.
pub fn letterbox(screen_w: f32, screen_h: f32, virtual_w: f32, virtual_h: f32) -> (i32, i32, i32, i32) {
    let scale = (screen_w / virtual_w).min(screen_h / virtual_h);
    let w = virtual_w * scale;
    let h = virtual_h * scale;
    let x = (screen_w - w) / 2.0;
    let y = (screen_h - h) / 2.0;
    (x as i32, y as i32, w as i32, h as i32)
}

pub fn use_virtual_resolution(virtual_w: f32, virtual_h: f32) {
    let mut camera = Camera2D::from_display_rect(Rect::new(0.0, 0.0, virtual_w, virtual_h));
    // from_display_rect is y-up; flip so y grows downward like screen space
    camera.zoom.y = -camera.zoom.y.abs();
    camera.viewport = Some(letterbox(screen_width(), screen_height(), virtual_w, virtual_h));
    set_camera(&camera);
}
