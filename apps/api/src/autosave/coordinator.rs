#![allow(dead_code)]

//! Autosave coordinator. Turns the high-frequency stream of document edits
//! into a low-frequency, strictly serialized stream of gateway saves, while
//! driving the [`SaveStatus`] machine the save indicator renders.
//!
//! The coordinator runs as a single tokio task owning all mutable state.
//! Commands arrive over a channel from the cloneable [`AutosaveHandle`];
//! because the task awaits each gateway call before taking the next command,
//! no two saves for the owner are ever in flight at once, and an edit that
//! arrives mid-save is deferred until the save completes.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot, watch};
use tokio::time::Instant;

use super::status::SaveStatus;
use crate::models::resume::{OwnerId, ResumeData, ResumeStyle};
use crate::store::ResumeStore;

#[derive(Debug, Clone)]
pub struct AutosaveConfig {
    /// Quiescence window measured from the most recent edit.
    pub debounce_window: Duration,
    /// How long `Saved` / `Error` stay visible before reverting to `Idle`.
    pub status_display: Duration,
}

impl Default for AutosaveConfig {
    fn default() -> Self {
        AutosaveConfig {
            debounce_window: Duration::from_secs(2),
            status_display: Duration::from_secs(2),
        }
    }
}

enum Command {
    Edit(ResumeData),
    StyleChange(ResumeStyle),
    SaveNow,
    Snapshot(oneshot::Sender<(ResumeData, ResumeStyle)>),
}

/// Cloneable front of the coordinator task. Methods are fire-and-forget,
/// mirroring the editor's synchronous event handlers.
#[derive(Clone)]
pub struct AutosaveHandle {
    tx: mpsc::UnboundedSender<Command>,
    status_rx: watch::Receiver<SaveStatus>,
}

impl AutosaveHandle {
    /// Records the new document value as pending and restarts the debounce
    /// window. With no authenticated owner this only updates local state.
    pub fn on_edit(&self, document: ResumeData) {
        let _ = self.tx.send(Command::Edit(document));
    }

    /// Persists a style change immediately, as a discrete, low-frequency
    /// choice that does not ride the content debounce.
    pub fn on_style_change(&self, style: ResumeStyle) {
        let _ = self.tx.send(Command::StyleChange(style));
    }

    /// Explicit "save" action: cancels a pending debounce and flushes now.
    pub fn save_now(&self) {
        let _ = self.tx.send(Command::SaveNow);
    }

    /// Watch the save-status machine.
    pub fn status(&self) -> watch::Receiver<SaveStatus> {
        self.status_rx.clone()
    }

    /// Current in-memory document and style, as the coordinator holds them.
    pub async fn snapshot(&self) -> Option<(ResumeData, ResumeStyle)> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx.send(Command::Snapshot(reply_tx)).ok()?;
        reply_rx.await.ok()
    }
}

/// One-shot cancellable deadline. Scheduling overwrites any armed deadline,
/// which is exactly the debounce-reset semantics.
#[derive(Debug, Default)]
struct Deadline {
    at: Option<Instant>,
}

impl Deadline {
    fn schedule(&mut self, after: Duration) {
        self.at = Some(Instant::now() + after);
    }

    fn cancel(&mut self) {
        self.at = None;
    }
}

async fn wait_until(at: Option<Instant>) {
    match at {
        Some(at) => tokio::time::sleep_until(at).await,
        None => std::future::pending().await,
    }
}

pub struct AutosaveCoordinator {
    store: Arc<dyn ResumeStore>,
    /// `None` means no authenticated owner: edits stay local and the
    /// gateway is never called.
    owner: Option<OwnerId>,
    config: AutosaveConfig,
    document: ResumeData,
    style: ResumeStyle,
    status_tx: watch::Sender<SaveStatus>,
    debounce: Deadline,
    revert: Deadline,
}

impl AutosaveCoordinator {
    /// Spawns the coordinator task and returns its handle. The task ends
    /// when every handle is dropped.
    pub fn spawn(
        store: Arc<dyn ResumeStore>,
        owner: Option<OwnerId>,
        document: ResumeData,
        style: ResumeStyle,
        config: AutosaveConfig,
    ) -> AutosaveHandle {
        let (tx, rx) = mpsc::unbounded_channel();
        let (status_tx, status_rx) = watch::channel(SaveStatus::Idle);

        let coordinator = AutosaveCoordinator {
            store,
            owner,
            config,
            document,
            style,
            status_tx,
            debounce: Deadline::default(),
            revert: Deadline::default(),
        };
        tokio::spawn(coordinator.run(rx));

        AutosaveHandle { tx, status_rx }
    }

    async fn run(mut self, mut rx: mpsc::UnboundedReceiver<Command>) {
        loop {
            let debounce_at = self.debounce.at;
            let revert_at = self.revert.at;

            tokio::select! {
                cmd = rx.recv() => match cmd {
                    Some(cmd) => self.handle(cmd).await,
                    None => break,
                },
                _ = wait_until(debounce_at), if debounce_at.is_some() => {
                    self.debounce.cancel();
                    self.flush().await;
                }
                _ = wait_until(revert_at), if revert_at.is_some() => {
                    self.revert.cancel();
                    self.status_tx.send_replace(SaveStatus::Idle);
                }
            }
        }
    }

    async fn handle(&mut self, cmd: Command) {
        match cmd {
            Command::Edit(document) => {
                self.document = document;

                // A new edit clears a lingering saved/error indicator at once.
                let displayed = *self.status_tx.borrow();
                if matches!(displayed, SaveStatus::Saved | SaveStatus::Error) {
                    self.revert.cancel();
                    self.status_tx.send_replace(SaveStatus::Idle);
                }

                if self.owner.is_some() {
                    self.debounce.schedule(self.config.debounce_window);
                }
            }
            Command::StyleChange(style) => {
                self.style = style;
                // Immediate save; an armed content debounce stays armed and
                // will flush again later (the upsert is idempotent).
                self.flush().await;
            }
            Command::SaveNow => {
                self.debounce.cancel();
                self.flush().await;
            }
            Command::Snapshot(reply) => {
                let _ = reply.send((self.document.clone(), self.style));
            }
        }
    }

    /// Sends the current pending state to the gateway and drives the status
    /// machine. Errors are caught here: the document is never rolled back,
    /// and there is no automatic retry; the next edit or explicit save
    /// attempts again.
    async fn flush(&mut self) {
        let Some(owner) = self.owner else { return };

        self.revert.cancel();
        self.status_tx.send_replace(SaveStatus::Saving);

        match self.store.save(owner, &self.document, self.style).await {
            Ok(()) => {
                self.status_tx.send_replace(SaveStatus::Saved);
            }
            Err(e) => {
                tracing::warn!("Autosave failed for owner {owner}: {e}");
                self.status_tx.send_replace(SaveStatus::Error);
            }
        }
        self.revert.schedule(self.config.status_display);
    }
}
