use glam::Vec2;
use macroquad::{
    color::Color as ScreenColor,
    shapes::{draw_circle, draw_line},
    window::clear_background,
};

use common::{
    player::Color,
    render::{Canvas, Circle, Segment},
};

pub const LINE_THICKNESS: f32 = 2.0;

pub fn to_screen_color(color: Color) -> ScreenColor {
    ScreenColor::from_rgba(color.r, color.g, color.b, 255)
}

/// Draws board coordinates onto the window, shifted by `origin`.
pub struct MacroquadCanvas {
    pub origin: Vec2,
}

impl MacroquadCanvas {
    pub fn new(origin: Vec2) -> Self {
        Self { origin }
    }
}

impl Canvas for MacroquadCanvas {
    fn clear(&mut self, color: Color) {
        clear_background(to_screen_color(color));
    }

    fn stroke_segment(&mut self, segment: &Segment, color: Color) {
        let start = self.origin + segment.start;
        let end = self.origin + segment.end;
        draw_line(
            start.x,
            start.y,
            end.x,
            end.y,
            LINE_THICKNESS,
            to_screen_color(color),
        );
    }

    fn fill_circle(&mut self, circle: &Circle, color: Color) {
        let center = self.origin + circle.center;
        draw_circle(center.x, center.y, circle.radius, to_screen_color(color));
    }
}
