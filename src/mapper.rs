//! Mapping between canvas pixels and raw image space.
//!
//! The map image is drawn under an affine [`ViewTransform`] that changes with
//! every pan and zoom. A tap is mapped by inverting the transform into the
//! image's intrinsic pixels, then rescaling to the fixed 760×400 raw grid.
//! The reverse direction rescales first and applies the forward transform.
//!
//! Callers pass the transform sampled at call time; nothing here caches it.

use thiserror::Error;

use crate::model::{ImageSize, RAW_IMAGE_HEIGHT, RAW_IMAGE_WIDTH, RawPoint, ViewPoint};
use crate::util::clog;

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum MapError {
    #[error("no map image is loaded")]
    NoImage,
    #[error("map image has zero size ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },
    #[error("view transform is not invertible (det={det})")]
    SingularTransform { det: f64 },
}

/// Affine transform in the canvas `setTransform(a, b, c, d, e, f)` layout:
/// `x' = a·x + c·y + e`, `y' = b·x + d·y + f`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ViewTransform {
    pub const IDENTITY: Self = Self {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    /// Uniform zoom followed by a translation, the only shape the camera produces.
    pub fn scale_translate(scale: f64, tx: f64, ty: f64) -> Self {
        Self {
            a: scale,
            b: 0.0,
            c: 0.0,
            d: scale,
            e: tx,
            f: ty,
        }
    }

    pub fn determinant(&self) -> f64 {
        self.a * self.d - self.b * self.c
    }

    pub fn invert(&self) -> Result<Self, MapError> {
        let det = self.determinant();
        if !det.is_finite() || det.abs() < f64::EPSILON {
            return Err(MapError::SingularTransform { det });
        }
        let inv = 1.0 / det;
        Ok(Self {
            a: self.d * inv,
            b: -self.b * inv,
            c: -self.c * inv,
            d: self.a * inv,
            e: (self.c * self.f - self.d * self.e) * inv,
            f: (self.b * self.e - self.a * self.f) * inv,
        })
    }

    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.a * x + self.c * y + self.e,
            self.b * x + self.d * y + self.f,
        )
    }
}

fn intrinsic(image: Option<ImageSize>) -> Result<(f64, f64), MapError> {
    let size = image.ok_or(MapError::NoImage)?;
    if size.width == 0 || size.height == 0 {
        return Err(MapError::EmptyImage {
            width: size.width,
            height: size.height,
        });
    }
    Ok((size.width as f64, size.height as f64))
}

pub fn try_screen_to_raw(
    screen: ViewPoint,
    transform: &ViewTransform,
    image: Option<ImageSize>,
) -> Result<RawPoint, MapError> {
    let (iw, ih) = intrinsic(image)?;
    let (px, py) = transform.invert()?.apply(screen.x, screen.y);
    Ok(RawPoint::new(
        px * RAW_IMAGE_WIDTH / iw,
        py * RAW_IMAGE_HEIGHT / ih,
    ))
}

pub fn try_raw_to_screen(
    raw: RawPoint,
    transform: &ViewTransform,
    image: Option<ImageSize>,
) -> Result<ViewPoint, MapError> {
    let (iw, ih) = intrinsic(image)?;
    let (x, y) = transform.apply(raw.x * iw / RAW_IMAGE_WIDTH, raw.y * ih / RAW_IMAGE_HEIGHT);
    Ok(ViewPoint::new(x, y))
}

/// Maps a canvas point into raw image space, or the origin when the map
/// cannot be mapped (image not decoded yet, degenerate zoom).
pub fn screen_to_raw(
    screen: ViewPoint,
    transform: &ViewTransform,
    image: Option<ImageSize>,
) -> RawPoint {
    try_screen_to_raw(screen, transform, image).unwrap_or_else(|e| {
        clog(&format!("screen_to_raw: {e}"));
        RawPoint::default()
    })
}

pub fn raw_to_screen(
    raw: RawPoint,
    transform: &ViewTransform,
    image: Option<ImageSize>,
) -> ViewPoint {
    try_raw_to_screen(raw, transform, image).unwrap_or_else(|e| {
        clog(&format!("raw_to_screen: {e}"));
        ViewPoint::default()
    })
}

/// Where a tap lands on the map, or `None` when it cannot be placed.
/// Unlike [`screen_to_raw`] there is no origin fallback: a tap that cannot
/// be mapped must not become a marker.
pub fn locate_tap(
    screen: ViewPoint,
    transform: &ViewTransform,
    image: Option<ImageSize>,
) -> Option<RawPoint> {
    match try_screen_to_raw(screen, transform, image) {
        Ok(raw) => Some(raw),
        Err(e) => {
            clog(&format!("tap ignored: {e}"));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const MAP: Option<ImageSize> = Some(ImageSize {
        width: 1520,
        height: 800,
    });

    #[test]
    fn identity_at_native_resolution_is_passthrough() {
        let image = Some(ImageSize {
            width: 760,
            height: 400,
        });
        let raw = screen_to_raw(ViewPoint::new(123.0, 45.0), &ViewTransform::IDENTITY, image);
        assert_eq!(raw, RawPoint::new(123.0, 45.0));
    }

    #[test]
    fn tap_is_rescaled_from_intrinsic_pixels() {
        // Double-size image drawn at half scale, shifted by (10, 20).
        let t = ViewTransform::scale_translate(0.5, 10.0, 20.0);
        let raw = screen_to_raw(ViewPoint::new(390.0, 220.0), &t, MAP);
        assert_relative_eq!(raw.x, 380.0);
        assert_relative_eq!(raw.y, 200.0);
    }

    #[test]
    fn raw_to_screen_applies_forward_transform() {
        let t = ViewTransform::scale_translate(2.0, -100.0, 5.0);
        let screen = raw_to_screen(RawPoint::new(380.0, 200.0), &t, MAP);
        assert_relative_eq!(screen.x, 1420.0);
        assert_relative_eq!(screen.y, 805.0);
    }

    #[test]
    fn round_trip_recovers_raw_point() {
        let transforms = [
            ViewTransform::IDENTITY,
            ViewTransform::scale_translate(0.37, 12.5, -40.0),
            ViewTransform::scale_translate(4.2, -900.0, -300.0),
            ViewTransform {
                a: 1.2,
                b: 0.3,
                c: -0.4,
                d: 0.9,
                e: 7.0,
                f: -3.0,
            },
        ];
        let points = [
            RawPoint::new(0.0, 0.0),
            RawPoint::new(380.0, 200.0),
            RawPoint::new(760.0, 400.0),
            RawPoint::new(12.34, 388.8),
        ];
        for t in &transforms {
            for p in points {
                let back = screen_to_raw(raw_to_screen(p, t, MAP), t, MAP);
                assert_relative_eq!(back.x, p.x, epsilon = 1e-9);
                assert_relative_eq!(back.y, p.y, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn invert_composes_to_identity() {
        let t = ViewTransform {
            a: 2.0,
            b: 1.0,
            c: 0.5,
            d: 3.0,
            e: 4.0,
            f: -6.0,
        };
        let inv = t.invert().unwrap();
        let (x, y) = inv.apply(t.apply(17.0, -3.0).0, t.apply(17.0, -3.0).1);
        assert_relative_eq!(x, 17.0, epsilon = 1e-12);
        assert_relative_eq!(y, -3.0, epsilon = 1e-12);
    }

    #[test]
    fn missing_image_maps_to_origin() {
        let t = ViewTransform::scale_translate(3.0, 50.0, 50.0);
        assert_eq!(
            try_screen_to_raw(ViewPoint::new(10.0, 10.0), &t, None),
            Err(MapError::NoImage)
        );
        assert_eq!(screen_to_raw(ViewPoint::new(10.0, 10.0), &t, None), RawPoint::default());
        assert_eq!(raw_to_screen(RawPoint::new(10.0, 10.0), &t, None), ViewPoint::default());
    }

    #[test]
    fn zero_sized_image_is_rejected() {
        let empty = Some(ImageSize {
            width: 0,
            height: 400,
        });
        assert!(matches!(
            try_raw_to_screen(RawPoint::new(1.0, 1.0), &ViewTransform::IDENTITY, empty),
            Err(MapError::EmptyImage { .. })
        ));
    }

    #[test]
    fn unmappable_tap_is_not_placed() {
        let t = ViewTransform::IDENTITY;
        let p = ViewPoint::new(380.0, 200.0);
        let empty = Some(ImageSize {
            width: 0,
            height: 0,
        });
        assert_eq!(locate_tap(p, &t, None), None);
        assert_eq!(locate_tap(p, &t, empty), None);
        assert_eq!(
            locate_tap(p, &ViewTransform::scale_translate(0.0, 0.0, 0.0), MAP),
            None
        );
        assert_eq!(locate_tap(p, &t, MAP), Some(RawPoint::new(190.0, 100.0)));
    }

    #[test]
    fn singular_transform_maps_to_origin() {
        let flat = ViewTransform::scale_translate(0.0, 10.0, 10.0);
        assert!(matches!(
            try_screen_to_raw(ViewPoint::new(1.0, 1.0), &flat, MAP),
            Err(MapError::SingularTransform { .. })
        ));
        assert_eq!(screen_to_raw(ViewPoint::new(1.0, 1.0), &flat, MAP), RawPoint::default());
    }
}
