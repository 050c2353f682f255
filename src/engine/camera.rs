// 2D camera: maps the cursor between screen pixels and world units

use glam::Vec2;

/// Orthographic 2D camera
#[derive(Debug, Clone)]
pub struct Camera {
    /// Camera position in world space
    pub position: Vec2,
    /// Pixels per world unit
    pixels_per_unit: f32,
    /// Camera zoom level (1.0 = normal, 2.0 = zoomed in 2x)
    zoom: f32,
    viewport_width: f32,
    viewport_height: f32,
}

impl Camera {
    /// Create a new camera
    pub fn new(
        position: Vec2,
        viewport_width: f32,
        viewport_height: f32,
        pixels_per_unit: f32,
    ) -> Self {
        Self {
            position,
            pixels_per_unit: pixels_per_unit.max(f32::EPSILON),
            zoom: 1.0,
            viewport_width,
            viewport_height,
        }
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Set camera zoom
    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom.max(0.1); // Prevent zoom from being too small
    }

    /// Resize the viewport
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport_width = width;
        self.viewport_height = height;
    }

    /// Ease toward a world position (camera follow)
    pub fn follow(&mut self, target: Vec2, smoothing: f32, dt: f32) {
        let t = (smoothing * dt).clamp(0.0, 1.0);
        self.position = self.position.lerp(target, t);
    }

    fn half_extents(&self) -> Vec2 {
        Vec2::new(self.viewport_width, self.viewport_height)
            / (2.0 * self.pixels_per_unit * self.zoom)
    }

    /// Convert screen coordinates (pixels, y down) to world coordinates (y up)
    pub fn screen_to_world(&self, screen_pos: Vec2) -> Vec2 {
        let normalized_x = (screen_pos.x / self.viewport_width) * 2.0 - 1.0;
        let normalized_y = 1.0 - (screen_pos.y / self.viewport_height) * 2.0;
        let half = self.half_extents();

        Vec2::new(
            self.position.x + normalized_x * half.x,
            self.position.y + normalized_y * half.y,
        )
    }

    /// Convert world coordinates to screen coordinates
    pub fn world_to_screen(&self, world_pos: Vec2) -> Vec2 {
        let half = self.half_extents();
        let normalized_x = (world_pos.x - self.position.x) / half.x;
        let normalized_y = (world_pos.y - self.position.y) / half.y;

        Vec2::new(
            (normalized_x + 1.0) * self.viewport_width / 2.0,
            (1.0 - normalized_y) * self.viewport_height / 2.0,
        )
    }
}
