// Pan/zoom state of the map canvas
use crate::mapper::ViewTransform;
use crate::model::ImageSize;

pub const MIN_ZOOM: f64 = 1.0;
pub const MAX_ZOOM: f64 = 5.0;

#[derive(Debug, Clone)]
pub struct Camera {
    /// Multiplier on top of `fit_scale`.
    pub zoom: f64,
    /// Scale at which the whole image fits the canvas.
    pub fit_scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    pub initialized: bool,
}
impl Default for Camera {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            fit_scale: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
            initialized: false,
        }
    }
}

impl Camera {
    pub fn scale(&self) -> f64 {
        self.fit_scale * self.zoom
    }

    /// Current image-to-canvas transform. Sample this per event, never keep it.
    pub fn transform(&self) -> ViewTransform {
        ViewTransform::scale_translate(self.scale(), self.offset_x, self.offset_y)
    }

    /// Centres the whole image in a `w`×`h` canvas at zoom 1.
    pub fn fit(&mut self, w: f64, h: f64, image: ImageSize) {
        if image.width == 0 || image.height == 0 || w <= 0.0 || h <= 0.0 {
            return;
        }
        let iw = image.width as f64;
        let ih = image.height as f64;
        self.fit_scale = (w / iw).min(h / ih);
        self.zoom = 1.0;
        self.offset_x = (w - iw * self.fit_scale) * 0.5;
        self.offset_y = (h - ih * self.fit_scale) * 0.5;
        self.initialized = true;
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.offset_x += dx;
        self.offset_y += dy;
    }

    /// Zooms by `factor` keeping the image point under (`cx`, `cy`) fixed.
    pub fn zoom_at(&mut self, cx: f64, cy: f64, factor: f64) {
        let old_scale = self.scale();
        let image_x = (cx - self.offset_x) / old_scale;
        let image_y = (cy - self.offset_y) / old_scale;
        self.zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        let new_scale = self.scale();
        self.offset_x = cx - image_x * new_scale;
        self.offset_y = cy - image_y * new_scale;
    }
}
