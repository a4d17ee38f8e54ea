#![allow(dead_code)]

//! Capture interface between the rendered preview and the pagination
//! algorithm. The trait keeps slicing independently testable with synthetic
//! raster dimensions; the production implementation renders registered SVG
//! markup through resvg, off-screen, at a fixed deterministic scale.

use std::sync::Arc;

use async_trait::async_trait;
use image::RgbaImage;
use resvg::tiny_skia::Pixmap;
use resvg::usvg;

use crate::errors::AppError;
use crate::preview::{PreviewDocument, PreviewRegistry};

/// Default capture scale. Fixed so exported text stays legible regardless
/// of the user's display density.
pub const CAPTURE_SCALE: f32 = 2.0;

/// One captured raster: the full, unclipped height of the render target.
#[derive(Debug, Clone)]
pub struct RasterImage {
    pub width: u32,
    pub height: u32,
    pixels: RgbaImage,
}

impl RasterImage {
    pub fn new(pixels: RgbaImage) -> Self {
        RasterImage {
            width: pixels.width(),
            height: pixels.height(),
            pixels,
        }
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// RGB bytes with alpha composited over white, the form the PDF
    /// embedding expects.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len() / 4 * 3);
        for px in self.pixels.pixels() {
            let [r, g, b, a] = px.0;
            if a == 255 {
                out.extend_from_slice(&[r, g, b]);
            } else {
                let a = a as u32;
                let blend = |c: u8| ((c as u32 * a + 255 * (255 - a)) / 255) as u8;
                out.extend_from_slice(&[blend(r), blend(g), blend(b)]);
            }
        }
        out
    }
}

#[async_trait]
pub trait Rasterizer: Send + Sync {
    /// Captures the named target at `scale`. Fails with a "not found" error
    /// when no such target is registered; the caller surfaces that rather
    /// than emitting an empty artifact.
    async fn capture(&self, target_id: &str, scale: f32) -> Result<RasterImage, AppError>;
}

/// Renders registered preview markup with resvg. Each capture parses the
/// markup fresh, so the live preview is never mutated and repeated captures
/// always reflect current state.
pub struct SvgRasterizer {
    registry: Arc<PreviewRegistry>,
}

impl SvgRasterizer {
    pub fn new(registry: Arc<PreviewRegistry>) -> Self {
        SvgRasterizer { registry }
    }
}

#[async_trait]
impl Rasterizer for SvgRasterizer {
    async fn capture(&self, target_id: &str, scale: f32) -> Result<RasterImage, AppError> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(AppError::Validation(format!(
                "Capture scale must be positive, got {scale}"
            )));
        }

        let target = self.registry.snapshot(target_id).ok_or_else(|| {
            AppError::Capture(format!("render target '{target_id}' not found"))
        })?;

        tokio::task::spawn_blocking(move || rasterize(&target, scale))
            .await
            .map_err(anyhow::Error::new)?
    }
}

// CPU-bound; always called from spawn_blocking.
fn rasterize(target: &PreviewDocument, scale: f32) -> Result<RasterImage, AppError> {
    let mut options = usvg::Options::default();
    options.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_data(target.svg.as_bytes(), &options)
        .map_err(|e| AppError::Capture(format!("parse preview markup: {e}")))?;

    let width = ((target.width as f32) * scale).ceil().max(1.0) as u32;
    let height = ((target.height as f32) * scale).ceil().max(1.0) as u32;

    let mut pixmap = Pixmap::new(width, height)
        .ok_or_else(|| AppError::Capture(format!("allocate {width}x{height} pixmap")))?;
    pixmap.fill(resvg::tiny_skia::Color::from_rgba8(255, 255, 255, 255));

    let transform = resvg::tiny_skia::Transform::from_scale(scale, scale);
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    let mut rgba = pixmap.data().to_vec();
    unpremultiply_rgba(&mut rgba);
    let pixels = RgbaImage::from_raw(width, height, rgba)
        .ok_or_else(|| AppError::Capture("pixmap buffer size mismatch".to_string()))?;
    Ok(RasterImage::new(pixels))
}

fn unpremultiply_rgba(data: &mut [u8]) {
    for px in data.chunks_exact_mut(4) {
        let a = px[3] as u32;
        if a > 0 && a < 255 {
            px[0] = ((px[0] as u32 * 255) / a).min(255) as u8;
            px[1] = ((px[1] as u32 * 255) / a).min(255) as u8;
            px[2] = ((px[2] as u32 * 255) / a).min(255) as u8;
        }
    }
}
