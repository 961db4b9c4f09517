use glam::{Vec2, vec2};

use crate::{
    maze::{Maze, cell::Side},
    player::Color,
};

/// Gap between a player's circle and the walls of its cell.
pub const PLAYER_MARGIN: f32 = 3.0;
/// Extra radius used when painting over a circle so no rim survives.
pub const ERASE_OVERDRAW: f32 = 2.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub start: Vec2,
    pub end: Vec2,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub side: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Geometry {
    size: usize,
    cell_size: f32,
}

impl Geometry {
    pub fn new(canvas_size: f32, maze: &Maze) -> Self {
        let size = maze.size();
        Self {
            size,
            cell_size: canvas_size / size as f32,
        }
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    pub fn canvas_size(&self) -> f32 {
        self.cell_size * self.size as f32
    }

    pub fn cell_rect(&self, row: usize, col: usize) -> Rect {
        Rect {
            origin: vec2(col as f32 * self.cell_size, row as f32 * self.cell_size),
            side: self.cell_size,
        }
    }

    pub fn cell_center(&self, x: usize, y: usize) -> Vec2 {
        let rect = self.cell_rect(y, x);
        rect.origin + Vec2::splat(rect.side / 2.0)
    }

    /// Every standing wall as a line segment. Cells only own their bottom and
    /// right edges, so the top and left borders are appended once at the end.
    pub fn wall_segments(&self, maze: &Maze) -> Vec<Segment> {
        let s = self.cell_size;
        let mut segments = Vec::new();

        for (y, row) in maze.grid().iter().enumerate() {
            for x in 0..row.len() {
                let left = x as f32 * s;
                let top = y as f32 * s;

                if maze.has_wall(x, y, Side::Bottom) {
                    segments.push(Segment {
                        start: vec2(left, top + s),
                        end: vec2(left + s, top + s),
                    });
                }

                if maze.has_wall(x, y, Side::Right) {
                    segments.push(Segment {
                        start: vec2(left + s, top),
                        end: vec2(left + s, top + s),
                    });
                }
            }
        }

        let extent = self.canvas_size();
        segments.push(Segment {
            start: Vec2::ZERO,
            end: vec2(extent, 0.0),
        });
        segments.push(Segment {
            start: Vec2::ZERO,
            end: vec2(0.0, extent),
        });

        segments
    }

    pub fn player_circle(&self, x: usize, y: usize) -> Circle {
        Circle {
            center: self.cell_center(x, y),
            radius: self.cell_size / 2.0 - PLAYER_MARGIN,
        }
    }

    pub fn erase_circle(&self, x: usize, y: usize) -> Circle {
        let circle = self.player_circle(x, y);
        Circle {
            radius: circle.radius + ERASE_OVERDRAW,
            ..circle
        }
    }

    pub fn trail_segments(&self, path: &[(usize, usize)]) -> Vec<Segment> {
        path.windows(2)
            .map(|pair| Segment {
                start: self.cell_center(pair[0].0, pair[0].1),
                end: self.cell_center(pair[1].0, pair[1].1),
            })
            .collect()
    }
}

pub trait Canvas {
    fn clear(&mut self, color: Color);
    fn stroke_segment(&mut self, segment: &Segment, color: Color);
    fn fill_circle(&mut self, circle: &Circle, color: Color);
}

pub struct Renderer {
    geometry: Geometry,
    pub background: Color,
    pub wall_color: Color,
}

impl Renderer {
    pub fn new(geometry: Geometry) -> Self {
        Self {
            geometry,
            background: Color::WHITE,
            wall_color: Color::BLACK,
        }
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn draw_maze(&self, canvas: &mut dyn Canvas, maze: &Maze) {
        canvas.clear(self.background);
        for segment in self.geometry.wall_segments(maze) {
            canvas.stroke_segment(&segment, self.wall_color);
        }
    }

    pub fn draw_player(&self, canvas: &mut dyn Canvas, x: usize, y: usize, color: Color) {
        canvas.fill_circle(&self.geometry.player_circle(x, y), color);
    }

    /// Paints the player's cell area with the background. Only needed on
    /// retained canvases; a frame that starts with `draw_maze` is already clean.
    pub fn erase_player(&self, canvas: &mut dyn Canvas, x: usize, y: usize) {
        canvas.fill_circle(&self.geometry.erase_circle(x, y), self.background);
    }

    /// Moves a player's circle on a canvas that keeps its pixels between
    /// frames. The old circle is painted out first.
    pub fn redraw_player(
        &self,
        canvas: &mut dyn Canvas,
        from: (usize, usize),
        to: (usize, usize),
        color: Color,
    ) {
        self.erase_player(canvas, from.0, from.1);
        self.draw_player(canvas, to.0, to.1, color);
    }

    pub fn draw_trail(&self, canvas: &mut dyn Canvas, path: &[(usize, usize)], color: Color) {
        for segment in self.geometry.trail_segments(path) {
            canvas.stroke_segment(&segment, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::Seed;

    #[derive(Debug, PartialEq)]
    enum Call {
        Clear(Color),
        Stroke(Segment, Color),
        Fill(Circle, Color),
    }

    #[derive(Default)]
    struct RecordingCanvas {
        calls: Vec<Call>,
    }

    impl Canvas for RecordingCanvas {
        fn clear(&mut self, color: Color) {
            self.calls.push(Call::Clear(color));
        }

        fn stroke_segment(&mut self, segment: &Segment, color: Color) {
            self.calls.push(Call::Stroke(*segment, color));
        }

        fn fill_circle(&mut self, circle: &Circle, color: Color) {
            self.calls.push(Call::Fill(*circle, color));
        }
    }

    fn fixture() -> (Maze, Geometry) {
        let maze = Maze::new(3, &Seed::from(42)).unwrap();
        let geometry = Geometry::new(300.0, &maze);
        (maze, geometry)
    }

    #[test]
    fn cells_are_square_slices_of_the_canvas() {
        let (_, geometry) = fixture();
        assert_eq!(geometry.cell_size(), 100.0);
        assert_eq!(
            geometry.cell_rect(2, 1),
            Rect {
                origin: vec2(100.0, 200.0),
                side: 100.0
            }
        );
        assert_eq!(geometry.cell_center(1, 2), vec2(150.0, 250.0));
    }

    #[test]
    fn one_segment_per_wall_bit_plus_two_borders() {
        let (maze, geometry) = fixture();
        let bits: u32 = maze.grid().iter().flatten().map(|v| v.count_ones()).sum();
        let segments = geometry.wall_segments(&maze);
        assert_eq!(segments.len(), bits as usize + 2);

        // Cell (0,0) keeps only its bottom wall.
        assert_eq!(
            segments[0],
            Segment {
                start: vec2(0.0, 100.0),
                end: vec2(100.0, 100.0)
            }
        );
        assert!(segments.contains(&Segment {
            start: Vec2::ZERO,
            end: vec2(300.0, 0.0)
        }));
        assert!(segments.contains(&Segment {
            start: Vec2::ZERO,
            end: vec2(0.0, 300.0)
        }));
    }

    #[test]
    fn bottom_and_right_borders_come_from_the_cells() {
        let (maze, geometry) = fixture();
        let segments = geometry.wall_segments(&maze);
        for i in 0..3 {
            let offset = i as f32 * 100.0;
            assert!(segments.contains(&Segment {
                start: vec2(offset, 300.0),
                end: vec2(offset + 100.0, 300.0)
            }));
            assert!(segments.contains(&Segment {
                start: vec2(300.0, offset),
                end: vec2(300.0, offset + 100.0)
            }));
        }
    }

    #[test]
    fn player_circle_leaves_a_margin() {
        let (_, geometry) = fixture();
        let circle = geometry.player_circle(0, 0);
        assert_eq!(circle.center, vec2(50.0, 50.0));
        assert_eq!(circle.radius, 47.0);
        assert_eq!(geometry.erase_circle(0, 0).radius, 49.0);
        assert!(geometry.erase_circle(0, 0).radius < geometry.cell_size() / 2.0);
    }

    #[test]
    fn redraw_erases_before_drawing() {
        let (_, geometry) = fixture();
        let renderer = Renderer::new(geometry);
        let mut canvas = RecordingCanvas::default();
        let red = Color::new(255, 0, 0);

        renderer.redraw_player(&mut canvas, (0, 0), (1, 0), red);

        assert_eq!(
            canvas.calls,
            vec![
                Call::Fill(geometry.erase_circle(0, 0), Color::WHITE),
                Call::Fill(geometry.player_circle(1, 0), red),
            ]
        );
    }

    #[test]
    fn draw_maze_clears_then_strokes_every_wall() {
        let (maze, geometry) = fixture();
        let renderer = Renderer::new(geometry);
        let mut canvas = RecordingCanvas::default();

        renderer.draw_maze(&mut canvas, &maze);

        assert_eq!(canvas.calls[0], Call::Clear(Color::WHITE));
        assert_eq!(canvas.calls.len(), geometry.wall_segments(&maze).len() + 1);
        assert!(
            canvas.calls[1..]
                .iter()
                .all(|call| matches!(call, Call::Stroke(_, color) if *color == Color::BLACK))
        );
    }

    #[test]
    fn trail_connects_cell_centres() {
        let (_, geometry) = fixture();
        let segments = geometry.trail_segments(&[(0, 0), (1, 0), (1, 1)]);
        assert_eq!(
            segments,
            vec![
                Segment {
                    start: vec2(50.0, 50.0),
                    end: vec2(150.0, 50.0)
                },
                Segment {
                    start: vec2(150.0, 50.0),
                    end: vec2(150.0, 150.0)
                },
            ]
        );
        assert!(geometry.trail_segments(&[(0, 0)]).is_empty());
    }
}
