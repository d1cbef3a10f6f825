/*
 * Viewport Module
 *
 * Converts between simulation space (origin at the top-left corner of the
 * screen, y pointing down) and nannou window space (origin at the window
 * centre, y pointing up).
 */

use nannou::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    // Convert a point from simulation space to window space
    pub fn world_to_screen(&self, point: Point2) -> Point2 {
        pt2(point.x - self.width / 2.0, self.height / 2.0 - point.y)
    }

    // Convert a point from window space to simulation space
    pub fn screen_to_world(&self, point: Point2) -> Point2 {
        pt2(point.x + self.width / 2.0, self.height / 2.0 - point.y)
    }

    /// Rotation to draw a shape pointing along `velocity` in window space.
    pub fn screen_angle(&self, velocity: Vec2) -> f32 {
        (-velocity.y).atan2(velocity.x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corners_map_to_window_edges() {
        let viewport = Viewport::new(800.0, 600.0);

        assert_eq!(viewport.world_to_screen(pt2(0.0, 0.0)), pt2(-400.0, 300.0));
        assert_eq!(viewport.world_to_screen(pt2(800.0, 600.0)), pt2(400.0, -300.0));
        assert_eq!(viewport.world_to_screen(pt2(400.0, 300.0)), pt2(0.0, 0.0));
    }

    #[test]
    fn test_screen_to_world_inverts_world_to_screen() {
        let viewport = Viewport::new(800.0, 600.0);
        let point = pt2(123.5, 456.25);

        assert_eq!(viewport.screen_to_world(viewport.world_to_screen(point)), point);
    }

    #[test]
    fn test_downward_velocity_points_down_on_screen() {
        let viewport = Viewport::new(800.0, 600.0);
        let angle = viewport.screen_angle(vec2(0.0, 1.0));

        assert!((angle + std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }
}
