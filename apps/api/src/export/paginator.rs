#![allow(dead_code)]

//! Slices one tall raster into a sequence of fixed-aspect pages.
//!
//! The image is scaled to the page width (aspect preserved) and then every
//! page places the *same* full image, shifted upward by one page height per
//! page, so each page reveals the next vertical slice. Page-level clipping
//! does the rest. Repeating the full image per page is the observed
//! construction and is kept as-is; slicing into per-page sub-images would
//! change the artifact's byte-level layout, not just its internals.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// ISO A4, in millimetres.
pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSpec {
    pub width: f32,
    pub height: f32,
}

impl PageSpec {
    pub fn a4() -> Self {
        PageSpec {
            width: PAGE_WIDTH_MM,
            height: PAGE_HEIGHT_MM,
        }
    }
}

impl Default for PageSpec {
    fn default() -> Self {
        PageSpec::a4()
    }
}

/// One page's placement instruction: the full scaled image, shifted up by
/// `offset` page units so this page's slice lands in the visible area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PagePlacement {
    pub offset: f32,
}

/// The paginated artifact layout: ordered placements over a single shared
/// image reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedLayout {
    pub page: PageSpec,
    pub scaled_width: f32,
    pub scaled_height: f32,
    pub pages: Vec<PagePlacement>,
}

impl PaginatedLayout {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

/// Fits the raster to the page width and emits placements until the whole
/// scaled height is covered.
///
/// Content that fits exactly one page produces exactly one page. There is
/// no minimum-content-per-page rule: a last page holding a thin sliver is
/// accepted behavior, not a defect.
pub fn paginate(
    raster_width: u32,
    raster_height: u32,
    page: PageSpec,
) -> Result<PaginatedLayout, AppError> {
    if raster_width == 0 || raster_height == 0 {
        return Err(AppError::Validation(format!(
            "Cannot paginate an empty raster ({raster_width}x{raster_height})"
        )));
    }

    let scaled_width = page.width;
    let scaled_height = raster_height as f32 * (page.width / raster_width as f32);

    let mut pages = vec![PagePlacement { offset: 0.0 }];
    let mut remaining = scaled_height - page.height;
    while remaining > 0.0 {
        pages.push(PagePlacement {
            offset: pages.len() as f32 * page.height,
        });
        remaining -= page.height;
    }

    Ok(PaginatedLayout {
        page,
        scaled_width,
        scaled_height,
        pages,
    })
}
