#![allow(dead_code)]

//! Export flow: capture, paginate, assemble the PDF, all on a
//! user-triggered action, and nothing else. Never touches autosave state;
//! reads the live preview and leaves it unmodified.

use std::sync::Arc;

use super::filename::sanitize_file_stem;
use super::paginator::{paginate, PageSpec};
use super::pdf::assemble_pdf;
use super::rasterizer::{Rasterizer, CAPTURE_SCALE};
use crate::auth::session::Session;
use crate::errors::AppError;

/// The finished artifact, ready for client-side delivery. Export never
/// round-trips through storage.
#[derive(Debug, Clone)]
pub struct ExportedDocument {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub page_count: usize,
}

pub struct ExportCoordinator {
    rasterizer: Arc<dyn Rasterizer>,
    page: PageSpec,
    scale: f32,
}

impl ExportCoordinator {
    pub fn new(rasterizer: Arc<dyn Rasterizer>) -> Self {
        ExportCoordinator {
            rasterizer,
            page: PageSpec::a4(),
            scale: CAPTURE_SCALE,
        }
    }

    /// Overrides the page geometry. Exists for tests; production exports
    /// are A4.
    pub fn with_page(mut self, page: PageSpec) -> Self {
        self.page = page;
        self
    }

    /// Runs one export. Requires an authenticated session; without one the
    /// call refuses with a "login required" signal instead of silently
    /// exporting. Each invocation re-captures the current preview state; a
    /// stale raster is never reused.
    pub async fn export(
        &self,
        session: Option<&Session>,
        target_id: &str,
        suggested_name: Option<&str>,
    ) -> Result<ExportedDocument, AppError> {
        if session.is_none() {
            return Err(AppError::LoginRequired);
        }

        let raster = self.rasterizer.capture(target_id, self.scale).await?;
        let layout = paginate(raster.width, raster.height, self.page)?;
        let page_count = layout.page_count();

        let stem = sanitize_file_stem(suggested_name.unwrap_or_default());
        let file_name = format!("{stem}.pdf");

        tracing::info!(
            "Exporting '{file_name}': {}x{} raster over {page_count} page(s)",
            raster.width,
            raster.height
        );

        let title = stem.clone();
        let bytes = tokio::task::spawn_blocking(move || assemble_pdf(&title, &raster, &layout))
            .await
            .map_err(anyhow::Error::new)??;

        Ok(ExportedDocument {
            file_name,
            bytes,
            page_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::session::Language;
    use crate::export::rasterizer::RasterImage;
    use crate::models::resume::OwnerId;
    use async_trait::async_trait;
    use image::RgbaImage;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use uuid::Uuid;

    /// Capture double with synthetic dimensions and an invocation counter.
    struct FixedRasterizer {
        width: u32,
        height: u32,
        captures: AtomicUsize,
    }

    impl FixedRasterizer {
        fn new(width: u32, height: u32) -> Self {
            FixedRasterizer {
                width,
                height,
                captures: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl Rasterizer for FixedRasterizer {
        async fn capture(&self, target_id: &str, _scale: f32) -> Result<RasterImage, AppError> {
            if target_id == "missing" {
                return Err(AppError::Capture(format!(
                    "render target '{target_id}' not found"
                )));
            }
            self.captures.fetch_add(1, Ordering::SeqCst);
            Ok(RasterImage::new(RgbaImage::from_pixel(
                self.width,
                self.height,
                image::Rgba([255, 255, 255, 255]),
            )))
        }
    }

    fn session() -> Session {
        Session {
            owner: OwnerId(Uuid::new_v4()),
            display_name: "Ada Lovelace".to_string(),
            locale: Language::En,
        }
    }

    #[tokio::test]
    async fn test_export_requires_login() {
        let coordinator = ExportCoordinator::new(Arc::new(FixedRasterizer::new(100, 100)));
        let err = coordinator
            .export(None, "preview", Some("Ada"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::LoginRequired));
    }

    #[tokio::test]
    async fn test_export_produces_named_pdf() {
        let coordinator = ExportCoordinator::new(Arc::new(FixedRasterizer::new(794, 1000)));
        let exported = coordinator
            .export(Some(&session()), "preview", Some("Ada Lovelace"))
            .await
            .unwrap();
        assert_eq!(exported.file_name, "Ada Lovelace.pdf");
        assert!(exported.bytes.starts_with(b"%PDF"));
        assert_eq!(exported.page_count, 1);
    }

    #[tokio::test]
    async fn test_export_falls_back_to_generic_name() {
        let coordinator = ExportCoordinator::new(Arc::new(FixedRasterizer::new(794, 1000)));
        let exported = coordinator
            .export(Some(&session()), "preview", None)
            .await
            .unwrap();
        assert_eq!(exported.file_name, "resume.pdf");
    }

    #[tokio::test]
    async fn test_export_page_count_follows_capture_height() {
        // 794x6000 raster on 794x1600 pages: 6000 / 1600 = 3.75 → 4 pages.
        let coordinator = ExportCoordinator::new(Arc::new(FixedRasterizer::new(794, 6000)))
            .with_page(PageSpec {
                width: 794.0,
                height: 1600.0,
            });
        let exported = coordinator
            .export(Some(&session()), "preview", Some("Ada"))
            .await
            .unwrap();
        assert_eq!(exported.page_count, 4);
    }

    #[tokio::test]
    async fn test_each_invocation_recaptures() {
        let rasterizer = Arc::new(FixedRasterizer::new(794, 500));
        let coordinator = ExportCoordinator::new(rasterizer.clone());
        let s = session();

        coordinator.export(Some(&s), "preview", None).await.unwrap();
        coordinator.export(Some(&s), "preview", None).await.unwrap();
        assert_eq!(rasterizer.captures.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_capture_failure_yields_no_artifact() {
        let coordinator = ExportCoordinator::new(Arc::new(FixedRasterizer::new(794, 500)));
        let err = coordinator
            .export(Some(&session()), "missing", Some("Ada"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Capture(_)));
    }
}
