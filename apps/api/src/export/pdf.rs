#![allow(dead_code)]

//! PDF assembly: one A4 document, the full captured raster embedded on
//! every page at a negative vertical offset so each page shows its slice.

// printpdf re-exports its own image crate; building the embedded image from
// raw bytes through that re-export keeps the two image-crate versions from
// having to agree.
use printpdf::image_crate::{DynamicImage, RgbImage};
use printpdf::{Image, ImageTransform, Mm, PdfDocument};

use super::paginator::PaginatedLayout;
use super::rasterizer::RasterImage;
use crate::errors::AppError;

const MM_PER_INCH: f64 = 25.4;

/// Serializes the paginated layout into PDF bytes.
pub fn assemble_pdf(
    title: &str,
    raster: &RasterImage,
    layout: &PaginatedLayout,
) -> Result<Vec<u8>, AppError> {
    let page_w = Mm(layout.page.width as f32);
    let page_h = Mm(layout.page.height as f32);

    let rgb = RgbImage::from_raw(raster.width, raster.height, raster.to_rgb_bytes())
        .ok_or_else(|| AppError::Export("raster pixel buffer size mismatch".to_string()))?;
    let dynamic = DynamicImage::ImageRgb8(rgb);

    // Pixel density that maps the raster width onto the page width exactly.
    let dpi = raster.width as f64 * MM_PER_INCH / layout.scaled_width as f64;

    let (doc, first_page, first_layer) = PdfDocument::new(title, page_w, page_h, "Page 1");

    for (index, placement) in layout.pages.iter().enumerate() {
        let (page_idx, layer_idx) = if index == 0 {
            (first_page, first_layer)
        } else {
            doc.add_page(page_w, page_h, format!("Page {}", index + 1))
        };
        let layer = doc.get_page(page_idx).get_layer(layer_idx);

        // PDF origin is bottom-left: lift the image so its top sits
        // `placement.offset` units above the page top.
        let translate_y =
            layout.page.height as f64 + placement.offset as f64 - layout.scaled_height as f64;

        Image::from_dynamic_image(&dynamic).add_to_layer(
            layer,
            ImageTransform {
                translate_x: Some(Mm(0.0)),
                translate_y: Some(Mm(translate_y as f32)),
                dpi: Some(dpi as f32),
                ..Default::default()
            },
        );
    }

    doc.save_to_bytes()
        .map_err(|e| AppError::Export(format!("serialize pdf: {e}")))
}
