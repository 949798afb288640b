//! The raster drawing surface.
//!
//! A [`Surface`] owns a fixed-size RGBA buffer filled with an opaque
//! background. Strokes are painted into it immediately; only their pixels
//! persist.

use image::{Pixel, Rgba, RgbaImage};

use crate::snapshot::Snapshot;
use crate::{CanvasError, CanvasResult, Color, Point};

/// Largest surface accepted by [`Surface::initialize`], in pixels.
pub const MAX_PIXELS: usize = 8192 * 8192;

/// A persistent raster buffer.
///
/// The surface starts out uninitialized. Every operation other than
/// [`Surface::initialize`] reports [`CanvasError::UninitializedSurface`]
/// until then and leaves the surface untouched.
#[derive(Debug, Clone)]
pub struct Surface {
    buffer: Option<RgbaImage>,
    background: Color,
}

impl Surface {
    /// Create an uninitialized surface with the given background.
    ///
    /// The background is forced opaque.
    #[must_use]
    pub fn new(background: Color) -> Self {
        let background = if background.is_opaque() {
            background
        } else {
            tracing::warn!("Surface background {background} is translucent, forcing opaque");
            Color { a: 255, ..background }
        };
        Self {
            buffer: None,
            background,
        }
    }

    /// Allocate the buffer and fill it with the background.
    ///
    /// Any previous content is discarded, and the surface may change size.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::InvalidDimensions`] if either dimension is zero
    /// or the area exceeds [`MAX_PIXELS`].
    pub fn initialize(&mut self, width: u32, height: u32) -> CanvasResult<()> {
        let area = usize::try_from(width)
            .ok()
            .zip(usize::try_from(height).ok())
            .and_then(|(w, h)| w.checked_mul(h));
        if !matches!(area, Some(1..=MAX_PIXELS)) {
            tracing::warn!("Rejecting surface size {width}x{height}");
            return Err(CanvasError::InvalidDimensions { width, height });
        }
        self.buffer = Some(RgbaImage::from_pixel(
            width,
            height,
            Rgba(self.background.to_rgba()),
        ));
        tracing::info!("Surface initialized at {width}x{height}");
        Ok(())
    }

    /// Refill the buffer with the background without resizing.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::UninitializedSurface`] before initialization.
    pub fn clear(&mut self) -> CanvasResult<()> {
        let background = Rgba(self.background.to_rgba());
        let buffer = self
            .buffer
            .as_mut()
            .ok_or(CanvasError::UninitializedSurface)?;
        for pixel in buffer.pixels_mut() {
            *pixel = background;
        }
        tracing::debug!("Surface cleared");
        Ok(())
    }

    /// Whether [`Surface::initialize`] has run.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.buffer.is_some()
    }

    /// Current `(width, height)`, if initialized.
    #[must_use]
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.buffer.as_ref().map(RgbaImage::dimensions)
    }

    /// The background color.
    #[must_use]
    pub fn background(&self) -> Color {
        self.background
    }

    /// Read a single pixel. Returns `None` out of bounds or before
    /// initialization.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        let buffer = self.buffer.as_ref()?;
        buffer
            .get_pixel_checked(x, y)
            .map(|p| Color::from_rgba(p.0))
    }

    /// Borrow the raw buffer.
    #[must_use]
    pub fn image(&self) -> Option<&RgbaImage> {
        self.buffer.as_ref()
    }

    /// Paint a straight, round-capped line segment.
    ///
    /// Every pixel whose center lies within `width / 2` of the segment is
    /// painted. Pixels outside the buffer are clipped. A zero-length segment
    /// paints a dot.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::UninitializedSurface`] before initialization.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn draw_segment(
        &mut self,
        from: Point,
        to: Point,
        color: Color,
        width: f32,
    ) -> CanvasResult<()> {
        let buffer = self
            .buffer
            .as_mut()
            .ok_or(CanvasError::UninitializedSurface)?;

        if !from.is_finite() || !to.is_finite() || !width.is_finite() || width <= 0.0 {
            tracing::debug!("Skipping degenerate segment {from:?} -> {to:?} width {width}");
            return Ok(());
        }

        let radius = width / 2.0;
        let (buf_w, buf_h) = buffer.dimensions();

        let min_x = (from.x.min(to.x) - radius).floor().max(0.0);
        let min_y = (from.y.min(to.y) - radius).floor().max(0.0);
        let max_x = (from.x.max(to.x) + radius).ceil().min(buf_w as f32 - 1.0);
        let max_y = (from.y.max(to.y) + radius).ceil().min(buf_h as f32 - 1.0);
        if min_x > max_x || min_y > max_y {
            return Ok(());
        }

        let paint = Rgba(color.to_rgba());
        let radius_sq = radius * radius;

        for py in (min_y as u32)..=(max_y as u32) {
            for px in (min_x as u32)..=(max_x as u32) {
                let center = Point::new(px as f32 + 0.5, py as f32 + 0.5);
                if distance_sq_to_segment(center, from, to) <= radius_sq {
                    let dst = buffer.get_pixel_mut(px, py);
                    if color.is_opaque() {
                        *dst = paint;
                    } else {
                        dst.blend(&paint);
                    }
                }
            }
        }

        Ok(())
    }

    /// Encode the current pixels as a PNG snapshot.
    ///
    /// The snapshot reflects every paint operation applied before the call.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::UninitializedSurface`] before initialization, or
    /// [`CanvasError::Encode`] if PNG encoding fails.
    pub fn snapshot(&self) -> CanvasResult<Snapshot> {
        let buffer = self
            .buffer
            .as_ref()
            .ok_or(CanvasError::UninitializedSurface)?;
        Snapshot::encode(buffer)
    }
}

impl Default for Surface {
    fn default() -> Self {
        Self::new(Color::BLACK)
    }
}

/// Squared distance from `p` to the segment `a`-`b`.
fn distance_sq_to_segment(p: Point, a: Point, b: Point) -> f32 {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len_sq = dx.mul_add(dx, dy * dy);
    let t = if len_sq == 0.0 {
        0.0
    } else {
        (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0)
    };
    let (cx, cy) = (t.mul_add(dx, a.x), t.mul_add(dy, a.y));
    let (ex, ey) = (p.x - cx, p.y - cy);
    ex.mul_add(ex, ey * ey)
}
