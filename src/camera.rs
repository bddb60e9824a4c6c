/// Camera follow: keep a box around the player inside the viewport by
/// shifting the pivot, clamped so the view never leaves the level.

use tracing::trace;

use crate::config::CameraConfig;
use crate::entities::Bounds;

#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub pivot_x: f32,
    pub pivot_y: f32,
    view_width: f32,
    view_height: f32,
    max_pivot_x: f32,
    max_pivot_y: f32,
    cfg: CameraConfig,
}

impl Camera {
    pub fn new(cfg: CameraConfig, view_width: f32, view_height: f32) -> Self {
        Self {
            pivot_x: 0.0,
            pivot_y: 0.0,
            view_width,
            view_height,
            max_pivot_x: 0.0,
            max_pivot_y: 0.0,
            cfg,
        }
    }

    /// Recompute pivot limits for a new view or level size.
    pub fn resize(&mut self, view_width: f32, view_height: f32, level_width: f32, level_height: f32) {
        self.view_width = view_width;
        self.view_height = view_height;
        self.max_pivot_x = (level_width - view_width).max(0.0);
        self.max_pivot_y = (level_height - view_height).max(0.0);
    }

    pub fn restart(&mut self) {
        self.pivot_x = 0.0;
        self.pivot_y = 0.0;
    }

    pub fn viewport(&self) -> Bounds {
        Bounds::from_rect(self.pivot_x, self.pivot_y, self.view_width, self.view_height)
    }

    /// Box anchored to the top-left of the target's collision shape.
    pub fn camera_box(&self, target: &Bounds) -> Bounds {
        Bounds::from_rect(
            target.left + self.cfg.offset_x,
            target.top + self.cfg.offset_y,
            self.cfg.width,
            self.cfg.height,
        )
    }

    pub fn follow(&mut self, target: &Bounds) {
        let cam = self.camera_box(target);
        let view = self.viewport();

        if cam.top < view.top {
            self.pivot_y -= view.top - cam.top;
        } else if cam.bottom > view.bottom {
            self.pivot_y += cam.bottom - view.bottom;
        }
        if cam.left < view.left {
            self.pivot_x -= view.left - cam.left;
        } else if cam.right > view.right {
            self.pivot_x += cam.right - view.right;
        }

        self.pivot_x = self.pivot_x.clamp(0.0, self.max_pivot_x);
        self.pivot_y = self.pivot_y.clamp(0.0, self.max_pivot_y);
        trace!(target: "camera", pivot_x = self.pivot_x, pivot_y = self.pivot_y, "follow");
    }
}
