//! Model lifecycle manager.
//!
//! Owns the mutable model table seeded from the catalog, the current-model
//! selection, and the single download slot. All mutation of model state
//! goes through this service; everything it hands out is a snapshot.
//!
//! # Invariants
//!
//! - At most one model is `Downloading` at any instant.
//! - `current_model_id()` is `None` until the first successful download
//!   and afterwards always references a `Downloaded` model.
//! - No operation leaves the model table partially updated.
//!
//! # Design
//!
//! The download slot is an explicit `Idle | InProgress` state machine with
//! typed rejection. The transfer itself runs outside the state lock: the
//! slot is claimed, the client future is raced against a cancellation
//! token, and the outcome is reconciled against the slot afterwards. A
//! bridge task forwards watch-channel progress into the event stream.

use std::sync::Arc;

use tokio::sync::{Mutex, mpsc, watch};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::domain::{ModelCatalog, ModelDescriptor, ModelId, ModelState, StorageInfo};
use crate::errors::{DeleteError, DownloadError, SelectionError};
use crate::events::DownloadEvent;
use crate::ports::DownloadClient;

/// Explicit state of the single download slot.
enum ActiveDownload {
    Idle,
    InProgress {
        id: ModelId,
        cancel: CancellationToken,
    },
}

impl ActiveDownload {
    const fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    fn is_model(&self, target: &ModelId) -> bool {
        matches!(self, Self::InProgress { id, .. } if id == target)
    }
}

/// Mutable state guarded by the manager's mutex.
struct LifecycleState {
    models: Vec<ModelDescriptor>,
    current: Option<ModelId>,
    active: ActiveDownload,
}

impl LifecycleState {
    fn model(&self, id: &ModelId) -> Option<&ModelDescriptor> {
        self.models.iter().find(|m| &m.id == id)
    }

    fn model_mut(&mut self, id: &ModelId) -> Option<&mut ModelDescriptor> {
        self.models.iter_mut().find(|m| &m.id == id)
    }

    /// Lowest-index downloaded model, the deterministic replacement rule.
    fn first_downloaded(&self) -> Option<ModelId> {
        self.models
            .iter()
            .find(|m| m.state.is_downloaded())
            .map(|m| m.id.clone())
    }
}

/// Service owning model download state and the current selection.
///
/// Construct once and share (`Arc`) with the callers that need it; every
/// operation takes `&self`.
pub struct ModelLifecycleManager {
    state: Mutex<LifecycleState>,
    client: Arc<dyn DownloadClient>,
    events: mpsc::UnboundedSender<DownloadEvent>,
}

impl ModelLifecycleManager {
    /// Create a manager seeded from the catalog.
    ///
    /// Returns the manager and the receiving end of its download event
    /// stream. Dropping the receiver is fine; events are then discarded.
    #[must_use]
    pub fn new(
        catalog: &ModelCatalog,
        client: Arc<dyn DownloadClient>,
    ) -> (Self, mpsc::UnboundedReceiver<DownloadEvent>) {
        let (events, rx) = mpsc::unbounded_channel();
        let manager = Self {
            state: Mutex::new(LifecycleState {
                models: catalog.models().to_vec(),
                current: None,
                active: ActiveDownload::Idle,
            }),
            client,
            events,
        };
        (manager, rx)
    }

    fn emit(&self, event: DownloadEvent) {
        let _ = self.events.send(event);
    }

    /// Set the current model.
    ///
    /// Only downloaded models may be selected.
    pub async fn select(&self, id: &ModelId) -> Result<(), SelectionError> {
        let mut state = self.state.lock().await;
        let model = state
            .model(id)
            .ok_or_else(|| SelectionError::NotFound { id: id.clone() })?;
        if !model.state.is_downloaded() {
            return Err(SelectionError::NotDownloaded { id: id.clone() });
        }
        state.current = Some(id.clone());
        info!(model = %id, "selected as current model");
        Ok(())
    }

    /// Download a model.
    ///
    /// Fails with [`DownloadError::AlreadyDownloading`] if any transfer is
    /// in flight. Resolves when the transfer completes, fails, or is
    /// cancelled via [`Self::cancel_download`]; on every non-success path
    /// the model reverts to `NotDownloaded` and the slot is released.
    ///
    /// The first model to complete a download becomes the current model.
    pub async fn download(&self, id: &ModelId) -> Result<(), DownloadError> {
        let (source, cancel) = self.begin_download(id).await?;
        info!(model = %id, "download started");
        self.emit(DownloadEvent::started(id.clone()));

        let (progress_tx, progress_rx) = watch::channel(0.0_f64);
        let bridge = self.spawn_progress_bridge(id.clone(), progress_rx);

        let outcome = {
            tokio::select! {
                biased;

                () = cancel.cancelled() => Err(DownloadError::Cancelled),

                result = self.client.transfer(&source, progress_tx) => {
                    result.map_err(|reason| DownloadError::TransferFailed { reason })
                }
            }
        };

        // The transfer future (and with it the progress sender) is gone;
        // wait out the bridge so progress never trails the terminal event.
        let _ = bridge.await;

        self.finish_download(id, outcome).await
    }

    /// Cancel the in-flight download, if any.
    ///
    /// The pending `download` call resolves with
    /// [`DownloadError::Cancelled`] and the model reverts to
    /// `NotDownloaded`. No-op when the slot is idle.
    pub async fn cancel_download(&self) {
        let state = self.state.lock().await;
        if let ActiveDownload::InProgress { id, cancel } = &state.active {
            info!(model = %id, "cancelling download");
            cancel.cancel();
        }
    }

    /// Delete a model's local copy.
    ///
    /// Deleting the current model moves the selection to the lowest-index
    /// remaining downloaded model, or clears it if none remain. Deleting
    /// the model that is currently transferring is rejected; cancel the
    /// download first.
    pub async fn delete_model(&self, id: &ModelId) -> Result<(), DeleteError> {
        let mut state = self.state.lock().await;
        if state.active.is_model(id) {
            return Err(DeleteError::DownloadInProgress { id: id.clone() });
        }
        let model = state
            .model_mut(id)
            .ok_or_else(|| DeleteError::NotFound { id: id.clone() })?;
        model.state = ModelState::NotDownloaded;
        if state.current.as_ref() == Some(id) {
            state.current = state.first_downloaded();
            debug!(model = %id, replacement = ?state.current, "current model deleted");
        }
        info!(model = %id, "model deleted");
        Ok(())
    }

    /// Reset every model to `NotDownloaded` and clear the selection.
    ///
    /// An in-flight download is cancelled; its `download` call resolves
    /// with [`DownloadError::Cancelled`].
    pub async fn clear_all(&self) {
        let mut state = self.state.lock().await;
        if let ActiveDownload::InProgress { id, cancel } = &state.active {
            info!(model = %id, "clearing all models; cancelling active download");
            cancel.cancel();
        }
        state.active = ActiveDownload::Idle;
        for model in &mut state.models {
            model.state = ModelState::NotDownloaded;
        }
        state.current = None;
        info!("all models cleared");
    }

    /// Storage accounting over downloaded models. Pure read.
    pub async fn storage_info(&self) -> StorageInfo {
        let state = self.state.lock().await;
        let used_bytes = state
            .models
            .iter()
            .filter(|m| m.state.is_downloaded())
            .map(|m| m.size_bytes)
            .sum();
        StorageInfo { used_bytes }
    }

    /// Snapshot of all models in catalog order.
    pub async fn models(&self) -> Vec<ModelDescriptor> {
        self.state.lock().await.models.clone()
    }

    /// Snapshot of one model.
    pub async fn descriptor(&self, id: &ModelId) -> Option<ModelDescriptor> {
        self.state.lock().await.model(id).cloned()
    }

    /// The current model's ID, if one has been established.
    pub async fn current_model_id(&self) -> Option<ModelId> {
        self.state.lock().await.current.clone()
    }

    /// Snapshot of the current model.
    pub async fn current_model(&self) -> Option<ModelDescriptor> {
        let state = self.state.lock().await;
        state.current.as_ref().and_then(|id| state.model(id)).cloned()
    }

    /// Whether a download is in flight.
    pub async fn is_downloading(&self) -> bool {
        !self.state.lock().await.active.is_idle()
    }

    /// Claim the download slot and mark the target `Downloading`.
    async fn begin_download(
        &self,
        id: &ModelId,
    ) -> Result<(String, CancellationToken), DownloadError> {
        let mut state = self.state.lock().await;
        if !state.active.is_idle() {
            return Err(DownloadError::AlreadyDownloading);
        }
        let model = state
            .model_mut(id)
            .ok_or_else(|| DownloadError::NotFound { id: id.clone() })?;
        model.state = ModelState::Downloading;
        let source = model.download_source.clone();
        let cancel = CancellationToken::new();
        state.active = ActiveDownload::InProgress {
            id: id.clone(),
            cancel: cancel.clone(),
        };
        Ok((source, cancel))
    }

    /// Reconcile a transfer outcome against the slot and model table.
    async fn finish_download(
        &self,
        id: &ModelId,
        outcome: Result<(), DownloadError>,
    ) -> Result<(), DownloadError> {
        let mut state = self.state.lock().await;

        // A clear_all that raced this transfer already reset the slot and
        // the model row; whatever the transport reported, this download is
        // void.
        if !state.active.is_model(id) {
            debug!(model = %id, "download outcome discarded; slot was reset");
            self.emit(DownloadEvent::cancelled(id.clone()));
            return Err(DownloadError::Cancelled);
        }
        state.active = ActiveDownload::Idle;

        match outcome {
            Ok(()) => {
                if let Some(model) = state.model_mut(id) {
                    model.state = ModelState::Downloaded;
                }
                if state.current.is_none() {
                    state.current = Some(id.clone());
                }
                info!(model = %id, "download completed");
                self.emit(DownloadEvent::completed(id.clone()));
                Ok(())
            }
            Err(DownloadError::Cancelled) => {
                if let Some(model) = state.model_mut(id) {
                    model.state = ModelState::NotDownloaded;
                }
                info!(model = %id, "download cancelled");
                self.emit(DownloadEvent::cancelled(id.clone()));
                Err(DownloadError::Cancelled)
            }
            Err(err) => {
                if let Some(model) = state.model_mut(id) {
                    model.state = ModelState::NotDownloaded;
                }
                warn!(model = %id, error = %err, "download failed");
                self.emit(DownloadEvent::failed(id.clone(), err.to_string()));
                Err(err)
            }
        }
    }

    fn spawn_progress_bridge(
        &self,
        id: ModelId,
        mut progress: watch::Receiver<f64>,
    ) -> tokio::task::JoinHandle<()> {
        let events = self.events.clone();
        tokio::spawn(async move {
            while progress.changed().await.is_ok() {
                let fraction = *progress.borrow_and_update();
                let _ = events.send(DownloadEvent::progress(id.clone(), fraction));
            }
        })
    }
}
