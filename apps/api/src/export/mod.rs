pub mod coordinator;
pub mod filename;
pub mod paginator;
pub mod pdf;
pub mod rasterizer;

pub use coordinator::{ExportCoordinator, ExportedDocument};
pub use paginator::{paginate, PageSpec, PaginatedLayout};
pub use rasterizer::{RasterImage, Rasterizer, SvgRasterizer, CAPTURE_SCALE};
