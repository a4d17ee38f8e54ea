#![allow(dead_code)]

//! Per-session editing facade: the Rust counterpart of the resume page's
//! event handlers. Owns the live document value, the single coupling
//! point between the autosave pipeline and the export pipeline, and keeps
//! the rendered preview published for capture.
//!
//! The session (or its absence) is passed in explicitly; nothing here reads
//! ambient state. With no session, edits stay local, nothing is persisted,
//! and export refuses.

use std::sync::Arc;

use tokio::sync::watch;

use crate::auth::session::{Language, Session};
use crate::autosave::{AutosaveConfig, AutosaveCoordinator, AutosaveHandle, SaveStatus};
use crate::errors::AppError;
use crate::export::{ExportCoordinator, ExportedDocument, SvgRasterizer};
use crate::models::resume::{ResumeData, ResumeStyle};
use crate::preview::{render_preview, PreviewRegistry};
use crate::store::ResumeStore;

/// Element id the live preview is published under, and the capture target
/// for export.
pub const PREVIEW_TARGET_ID: &str = "resume-preview-inline";

pub struct EditorSession {
    session: Option<Session>,
    document: ResumeData,
    style: ResumeStyle,
    autosave: AutosaveHandle,
    registry: Arc<PreviewRegistry>,
    export: ExportCoordinator,
}

impl EditorSession {
    pub async fn open(store: Arc<dyn ResumeStore>, session: Option<Session>) -> Self {
        Self::open_with(store, session, AutosaveConfig::default()).await
    }

    pub async fn open_with(
        store: Arc<dyn ResumeStore>,
        session: Option<Session>,
        config: AutosaveConfig,
    ) -> Self {
        // Populate from the gateway when a saved version exists. A load
        // failure degrades to a blank document: the editor always opens.
        let (document, style) = match &session {
            Some(s) => match store.load(s.owner).await {
                Ok(Some(stored)) => (stored.resume_data, stored.style),
                Ok(None) => (ResumeData::empty(), ResumeStyle::default()),
                Err(e) => {
                    tracing::warn!("Loading saved resume failed, opening blank: {e}");
                    (ResumeData::empty(), ResumeStyle::default())
                }
            },
            None => (ResumeData::empty(), ResumeStyle::default()),
        };

        let registry = Arc::new(PreviewRegistry::new());
        let export = ExportCoordinator::new(Arc::new(SvgRasterizer::new(registry.clone())));
        let autosave = AutosaveCoordinator::spawn(
            store,
            session.as_ref().map(|s| s.owner),
            document.clone(),
            style,
            config,
        );

        let editor = EditorSession {
            session,
            document,
            style,
            autosave,
            registry,
            export,
        };
        editor.publish_preview();
        editor
    }

    fn locale(&self) -> Language {
        self.session
            .as_ref()
            .map(|s| s.locale)
            .unwrap_or_default()
    }

    fn publish_preview(&self) {
        let preview = render_preview(&self.document, self.style, self.locale());
        self.registry.publish(PREVIEW_TARGET_ID, preview);
    }

    /// An input-handler edit: refresh the preview, hand the new value to
    /// the autosave coordinator.
    pub fn edit(&mut self, document: ResumeData) {
        self.document = document;
        self.publish_preview();
        self.autosave.on_edit(self.document.clone());
    }

    pub fn set_style(&mut self, style: ResumeStyle) {
        self.style = style;
        self.publish_preview();
        self.autosave.on_style_change(style);
    }

    /// The explicit "save" button.
    pub fn save_now(&self) {
        self.autosave.save_now();
    }

    pub fn status(&self) -> watch::Receiver<SaveStatus> {
        self.autosave.status()
    }

    pub fn document(&self) -> &ResumeData {
        &self.document
    }

    pub fn style(&self) -> ResumeStyle {
        self.style
    }

    /// The "download PDF" button: captures the current preview and returns
    /// the paginated artifact, named from the document's own display name.
    pub async fn export(&self) -> Result<ExportedDocument, AppError> {
        let name = self.document.personal_info.name.trim();
        let suggested = (!name.is_empty()).then_some(name);
        self.export
            .export(self.session.as_ref(), PREVIEW_TARGET_ID, suggested)
            .await
    }
}
