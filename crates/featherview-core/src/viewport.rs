//! Viewport transform engine.
//!
//! Maps a fixed-size display surface onto a rectangular window of image
//! space. The window is described by a `center` (image pixels), a
//! `half_width` and an aspect `ratio`: the source rectangle spans
//! `half_width * ratio.x` to either side of the center horizontally and
//! `half_width * ratio.y` vertically. The ratio always equals the display
//! aspect, so image pixels stay square on screen.
//!
//! Display coordinates are logical points with the origin at the top-left
//! corner of the surface. `pixels_per_point` only enters the magnification,
//! which is expressed in device pixels per image pixel.

use tracing::debug;

use crate::consts::{EPSILON, MIN_HALF_WIDTH, SMOOTH_MAGNIFICATION_LIMIT};
use crate::geometry::{Point, Rect, Size};

/// Aspect-correction factors. Both are >= 1 and one of them is exactly 1.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ratio {
    pub x: f64,
    pub y: f64,
}

impl Default for Ratio {
    fn default() -> Self {
        Self { x: 1.0, y: 1.0 }
    }
}

/// Pan/zoom state of one display surface showing one image.
#[derive(Clone, Debug)]
pub struct Viewport {
    center: Point,
    half_width: f64,
    ratio: Ratio,
    reference_center: Point,
    reference_half_width: f64,
    display_size: Size,
    pixels_per_point: f64,
    image_size: Option<Size>,
    initialized: bool,
    /// Set once the first resize after initialization has been absorbed.
    settled: bool,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            center: Point::ZERO,
            half_width: 1.0,
            ratio: Ratio::default(),
            reference_center: Point::ZERO,
            reference_half_width: 1.0,
            display_size: Size::default(),
            pixels_per_point: 1.0,
            image_size: None,
            initialized: false,
            settled: false,
        }
    }
}

impl Viewport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn half_width(&self) -> f64 {
        self.half_width
    }

    pub fn ratio(&self) -> Ratio {
        self.ratio
    }

    pub fn reference_center(&self) -> Point {
        self.reference_center
    }

    pub fn reference_half_width(&self) -> f64 {
        self.reference_half_width
    }

    pub fn display_size(&self) -> Size {
        self.display_size
    }

    pub fn pixels_per_point(&self) -> f64 {
        self.pixels_per_point
    }

    pub fn image_size(&self) -> Option<Size> {
        self.image_size
    }

    pub fn is_initialized(&self) -> bool {
        self.geometry().is_some()
    }

    /// Image and display sizes, only once both are usable.
    fn geometry(&self) -> Option<(Size, Size)> {
        if !self.initialized {
            return None;
        }
        let image = self.image_size?;
        if image.is_empty() || self.display_size.is_empty() {
            return None;
        }
        Some((image, self.display_size))
    }

    /// Attach an image of the given size. A zero extent detaches instead.
    pub fn attach(&mut self, image_size: Size) {
        if image_size.is_empty() {
            debug!(
                width = image_size.width,
                height = image_size.height,
                "ignoring empty image"
            );
            self.detach();
            return;
        }
        if self.image_size != Some(image_size) {
            self.image_size = Some(image_size);
            self.initialized = false;
        }
        self.initialize();
    }

    /// Forget the image; every operation becomes a no-op until the next attach.
    pub fn detach(&mut self) {
        self.image_size = None;
        self.initialized = false;
        self.settled = false;
    }

    fn initialize(&mut self) {
        if self.initialized || self.display_size.is_empty() {
            return;
        }
        let Some(image) = self.image_size else {
            return;
        };
        if !self.update_reference() {
            return;
        }
        self.initialized = true;
        self.settled = false;
        self.center = self.reference_center;
        self.set_half_width(self.reference_half_width);
        // Never blow small images up past one image pixel per device pixel.
        if self.image_fits_display() {
            self.set_magnification(1.0);
        }
        debug!(
            image_width = image.width,
            image_height = image.height,
            half_width = self.half_width,
            "viewport initialized"
        );
    }

    /// Update the display geometry.
    ///
    /// The first resize after initialization only settles the layout: ratio
    /// and reference are recomputed but the half-width is left alone. Later
    /// resizes keep the current magnification under the new geometry.
    pub fn resize(&mut self, display_size: Size, pixels_per_point: f64) {
        if display_size.is_empty() || !(pixels_per_point > 0.0 && pixels_per_point.is_finite()) {
            return;
        }
        if display_size == self.display_size && pixels_per_point == self.pixels_per_point {
            return;
        }
        let magnification = self.magnification();
        self.display_size = display_size;
        self.pixels_per_point = pixels_per_point;

        if !self.initialized {
            self.initialize();
            return;
        }
        self.update_reference();
        if !self.settled {
            self.settled = true;
            debug!("viewport layout settled");
            return;
        }
        if let Some(magnification) = magnification {
            self.set_magnification(magnification);
        }
    }

    /// Ratio for a display: the display aspect, expressed so that both
    /// components are >= 1.
    pub fn fit_ratio(display_size: Size) -> Ratio {
        if display_size.is_empty() {
            return Ratio::default();
        }
        if display_size.width >= display_size.height {
            Ratio {
                x: display_size.aspect(),
                y: 1.0,
            }
        } else {
            Ratio {
                x: 1.0,
                y: display_size.height / display_size.width,
            }
        }
    }

    /// Recompute the ratio and the fit-to-window reference. Returns false
    /// when either size is not usable yet.
    fn update_reference(&mut self) -> bool {
        let Some(image) = self.image_size else {
            return false;
        };
        if image.is_empty() || self.display_size.is_empty() {
            return false;
        }
        self.ratio = Self::fit_ratio(self.display_size);
        let half_width = (image.width / (2.0 * self.ratio.x))
            .max(image.height / (2.0 * self.ratio.y))
            .max(MIN_HALF_WIDTH);
        self.reference_center = image.center();
        self.reference_half_width = half_width;
        true
    }

    /// Show the whole image, centered and aspect-preserved, and store that
    /// state as the reset target.
    pub fn fit(&mut self) {
        if !self.is_initialized() || !self.update_reference() {
            return;
        }
        self.center = self.reference_center;
        self.set_half_width(self.reference_half_width);
    }

    /// Restore the fit-to-window reference.
    pub fn reset(&mut self) {
        if !self.is_initialized() {
            return;
        }
        self.center = self.reference_center;
        self.set_half_width(self.reference_half_width);
    }

    /// Set the half-width, clamped to the accepted range. Non-finite and
    /// non-positive values are rejected.
    pub fn set_half_width(&mut self, half_width: f64) {
        if !(half_width.is_finite() && half_width > 0.0) {
            debug!(half_width, "rejected half-width");
            return;
        }
        self.half_width = half_width.clamp(MIN_HALF_WIDTH, self.max_half_width());
    }

    /// Largest accepted half-width: the larger image dimension, or the
    /// one-to-one half-width when that is bigger (tiny images).
    fn max_half_width(&self) -> f64 {
        let Some(image) = self.image_size else {
            return f64::INFINITY;
        };
        let mut limit = image.width.max(image.height);
        if !self.display_size.is_empty() {
            limit = limit.max(self.half_width_for(1.0));
        }
        limit.max(MIN_HALF_WIDTH)
    }

    fn half_width_for(&self, magnification: f64) -> f64 {
        self.display_size.width * self.pixels_per_point / (2.0 * self.ratio.x * magnification)
    }

    /// Device pixels per image pixel.
    pub fn magnification(&self) -> Option<f64> {
        self.geometry()?;
        let denominator = 2.0 * self.half_width * self.ratio.x;
        if denominator <= EPSILON {
            return None;
        }
        Some(self.display_size.width * self.pixels_per_point / denominator)
    }

    /// Change the magnification around the current center.
    pub fn set_magnification(&mut self, magnification: f64) {
        if self.geometry().is_none() || !(magnification.is_finite() && magnification > 0.0) {
            return;
        }
        self.set_half_width(self.half_width_for(magnification));
    }

    /// Toggle between one-to-one and fit-to-window.
    pub fn toggle_one_to_one(&mut self) {
        let Some(magnification) = self.magnification() else {
            return;
        };
        if (magnification - 1.0).abs() < 1e-6 {
            self.reset();
        } else {
            self.set_magnification(1.0);
        }
    }

    /// Display points per image pixel.
    fn display_scale(&self) -> Option<f64> {
        let (_, display) = self.geometry()?;
        let denominator = 2.0 * self.half_width * self.ratio.x;
        if denominator <= EPSILON {
            return None;
        }
        Some(display.width / denominator)
    }

    /// Multiply the magnification by `factor`, keeping the image point under
    /// `focus` (display coordinates) fixed on screen.
    pub fn zoom(&mut self, factor: f64, focus: Point) {
        if !(factor.is_finite() && factor > 0.0) || !focus.is_finite() {
            return;
        }
        // Anchor with the pre-zoom mapping, then solve for the new center.
        let Some(anchor) = self.to_image(focus) else {
            return;
        };
        self.set_half_width(self.half_width / factor);
        let Some(scale) = self.display_scale() else {
            return;
        };
        self.center = anchor - (focus - self.display_size.center()) * (1.0 / scale);
    }

    /// Move the viewport by a displacement given in display points.
    pub fn pan(&mut self, delta: Point) {
        if !delta.is_finite() {
            return;
        }
        let Some(scale) = self.display_scale() else {
            return;
        };
        self.center = self.center + delta * (1.0 / scale);
    }

    /// Move the viewport by a displacement given in image pixels.
    pub fn translate(&mut self, delta: Point) {
        if self.geometry().is_none() || !delta.is_finite() {
            return;
        }
        self.center = self.center + delta;
    }

    fn image_fits_display(&self) -> bool {
        let Some(image) = self.image_size else {
            return false;
        };
        image.width <= self.display_size.width * self.pixels_per_point
            && image.height <= self.display_size.height * self.pixels_per_point
    }

    /// Enforce the visibility rules. Idempotent.
    ///
    /// On an axis where the source extent is smaller than the image the
    /// source rectangle is kept inside the image; on the other axes the view
    /// is centered. Zooming out until the whole image is visible snaps back
    /// to the fit for images larger than the display, and never goes below
    /// one-to-one for smaller ones.
    pub fn clamp(&mut self) {
        let Some((image, _)) = self.geometry() else {
            return;
        };
        let covers_x = 2.0 * self.half_width * self.ratio.x >= image.width - EPSILON;
        let covers_y = 2.0 * self.half_width * self.ratio.y >= image.height - EPSILON;

        if covers_x && covers_y {
            if self.image_fits_display() {
                if self.magnification().is_some_and(|m| m < 1.0) {
                    self.set_magnification(1.0);
                }
            } else if self.half_width > self.reference_half_width {
                self.set_half_width(self.reference_half_width);
            }
            self.center = image.center();
            return;
        }

        self.center = Point::new(
            clamp_axis(self.center.x, self.half_width * self.ratio.x, image.width),
            clamp_axis(self.center.y, self.half_width * self.ratio.y, image.height),
        );
    }

    /// Image point shown at `point` (display coordinates).
    pub fn to_image(&self, point: Point) -> Option<Point> {
        let scale = self.display_scale()?;
        Some(self.center + (point - self.display_size.center()) * (1.0 / scale))
    }

    /// Display position of `point` (image coordinates).
    pub fn to_display(&self, point: Point) -> Option<Point> {
        let scale = self.display_scale()?;
        Some(self.display_size.center() + (point - self.center) * scale)
    }

    /// The image-space rectangle mapped onto the full display surface.
    pub fn source_rect(&self) -> Option<Rect> {
        self.geometry()?;
        let half_x = self.half_width * self.ratio.x;
        let half_y = self.half_width * self.ratio.y;
        Some(Rect::new(
            self.center.x - half_x,
            self.center.y - half_y,
            2.0 * half_x,
            2.0 * half_y,
        ))
    }

    /// Part of the source rectangle covered by the image.
    pub fn visible_source_rect(&self) -> Option<Rect> {
        let (image, _) = self.geometry()?;
        let bounds = Rect::new(0.0, 0.0, image.width, image.height);
        self.source_rect()?.intersect(&bounds)
    }

    /// Where `visible_source_rect` lands on the display.
    pub fn visible_target_rect(&self) -> Option<Rect> {
        let source = self.visible_source_rect()?;
        let min = self.to_display(source.min())?;
        let max = self.to_display(source.max())?;
        Some(Rect::from_min_max(min, max))
    }

    /// Whether the renderer should filter smoothly at the current zoom.
    pub fn smooth_rendering(&self) -> bool {
        self.magnification()
            .is_some_and(|m| m < SMOOTH_MAGNIFICATION_LIMIT)
    }
}

fn clamp_axis(center: f64, half_extent: f64, extent: f64) -> f64 {
    if 2.0 * half_extent >= extent - EPSILON {
        extent / 2.0
    } else {
        center.clamp(half_extent, extent - half_extent)
    }
}
