//! Upload workflow use case
//!
//! Drives a [`WorkflowState`] through select → upload → move against an
//! [`IUploadApi`]. The state lives in a `tokio::sync::watch` channel so a
//! front-end can render every change (progress included) by subscribing.
//!
//! Failures never leave the workflow stuck: the state machine records the
//! message and returns to the last stable phase, and the same error is
//! returned to the caller.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use tokio::io::AsyncReadExt;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::domain::{
    destination_path, ApiError, DomainError, MovedFile, RemoteFile, UploadTarget, WorkflowState,
};
use crate::ports::{INotificationService, IUploadApi, Notification, ProgressCallback};

/// Errors returned by [`UploadWorkflow`] operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WorkflowError {
    /// The operation is not allowed right now, or its input is invalid
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The server call or local file read failed
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Use case for uploading one file and moving it into a saved directory
pub struct UploadWorkflow {
    api: Arc<dyn IUploadApi>,
    notifier: Option<Arc<dyn INotificationService>>,
    state: Arc<watch::Sender<WorkflowState>>,
}

impl UploadWorkflow {
    /// Creates a new idle workflow backed by `api`
    pub fn new(api: Arc<dyn IUploadApi>) -> Self {
        let (state, _) = watch::channel(WorkflowState::new());
        Self {
            api,
            notifier: None,
            state: Arc::new(state),
        }
    }

    /// Sets the service told about completed moves
    pub fn with_notifier(mut self, notifier: Arc<dyn INotificationService>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Returns a receiver that observes every state change
    pub fn subscribe(&self) -> watch::Receiver<WorkflowState> {
        self.state.subscribe()
    }

    /// Returns a snapshot of the current state
    pub fn state(&self) -> WorkflowState {
        self.state.borrow().clone()
    }

    /// Selects a file, or clears the selection when either part is `None`
    pub fn select_file(
        &self,
        path: Option<PathBuf>,
        name: Option<String>,
    ) -> Result<(), WorkflowError> {
        self.transition(|state| state.select_file(path, name))?;
        Ok(())
    }

    /// Selects `path`, using its last component as the display name
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptyFilename` if `path` has no file name.
    pub fn select_path(&self, path: impl Into<PathBuf>) -> Result<(), WorkflowError> {
        let target = UploadTarget::from_path(path).ok_or(DomainError::EmptyFilename)?;
        self.select_file(
            Some(target.path().to_path_buf()),
            Some(target.display_name().to_string()),
        )
    }

    /// Drops the selection and any finished upload
    pub fn cancel(&self) -> Result<(), WorkflowError> {
        self.transition(WorkflowState::cancel)?;
        Ok(())
    }

    /// Uploads the selected file
    ///
    /// On success the workflow is `Uploaded` and, the first time in a
    /// session, the saved directories are fetched to compute a suggestion.
    /// A failed directory listing is recorded but does not fail the upload.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::Domain` if no file is selected and
    /// `WorkflowError::Api` if the file cannot be read or sent. In the
    /// latter case the selection is kept so the upload can be retried.
    pub async fn upload(&self) -> Result<RemoteFile, WorkflowError> {
        let target = self.transition(WorkflowState::start_upload)?;
        info!(file = %target.display_name(), "Starting upload");

        let content = match read_local_file(target.path()).await {
            Ok(content) => content,
            Err(err) => return Err(self.upload_failed(err)),
        };
        debug!(bytes = content.len(), "Read local file");

        let state = Arc::clone(&self.state);
        let progress: ProgressCallback = Arc::new(move |sent, total| {
            let percent = percent_of(sent, total);
            state.send_if_modified(|state| state.record_progress(percent));
        });

        let remote = match self
            .api
            .upload(target.display_name(), content, Some(progress))
            .await
        {
            Ok(remote) => remote,
            Err(err) => return Err(self.upload_failed(err)),
        };

        self.transition(|state| state.finish_upload(remote.clone()))?;
        info!(file = %target.display_name(), remote = %remote, "Upload finished");

        self.load_saved_dirs().await;
        Ok(remote)
    }

    /// Moves the uploaded file to `<directory>/<filename>`
    ///
    /// On success the workflow returns to `Idle` (the directory cache is
    /// kept) and the notifier, if any, is told where the file ended up.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::Domain` if nothing is uploaded, `directory`
    /// is blank or `filename` is empty. Returns `WorkflowError::Api` if the
    /// server refuses the move, in which case the upload is kept for a retry.
    pub async fn move_to(
        &self,
        directory: &str,
        filename: &str,
    ) -> Result<MovedFile, WorkflowError> {
        if directory.trim().is_empty() {
            return Err(DomainError::NoDestination.into());
        }
        if filename.is_empty() {
            return Err(DomainError::EmptyFilename.into());
        }

        let remote = self.transition(WorkflowState::start_move)?;
        let saved = destination_path(directory, filename);
        info!(remote = %remote, saved = %saved, "Moving uploaded file");

        match self.api.move_file(remote.as_str(), &saved).await {
            Ok(moved) => {
                self.transition(WorkflowState::finish_move)?;
                info!(moved_to = %moved.moved_to, "Move finished");
                self.notify(Notification::moved(&moved.moved_to)).await;
                Ok(moved)
            }
            Err(err) => {
                warn!(remote = %remote, error = %err, "Move failed");
                let message = err.to_string();
                self.transition(|state| state.fail_move(&message))?;
                Err(err.into())
            }
        }
    }

    /// Fetches the saved directories unless they are already cached
    async fn load_saved_dirs(&self) {
        let cached = self.state.borrow().saved_dirs().is_some();
        if cached {
            return;
        }

        match self.api.list_saved_dirs().await {
            Ok(dirs) => {
                debug!(count = dirs.len(), "Fetched saved directories");
                self.state.send_if_modified(|state| state.set_saved_dirs(dirs));
            }
            Err(err) => {
                warn!(error = %err, "Failed to list saved directories");
                self.state.send_modify(WorkflowState::fail_directory_listing);
            }
        }
    }

    fn upload_failed(&self, err: ApiError) -> WorkflowError {
        warn!(error = %err, "Upload failed");
        let message = err.to_string();
        match self.transition(|state| state.fail_upload(&message)) {
            Ok(()) => err.into(),
            Err(domain) => domain.into(),
        }
    }

    async fn notify(&self, notification: Notification) {
        if let Some(notifier) = &self.notifier {
            if let Err(err) = notifier.notify(&notification).await {
                warn!(error = %err, "Failed to deliver notification");
            }
        }
    }

    /// Applies `f` under the channel lock; subscribers are woken only on success
    fn transition<T>(
        &self,
        f: impl FnOnce(&mut WorkflowState) -> Result<T, DomainError>,
    ) -> Result<T, DomainError> {
        let mut outcome = None;
        self.state.send_if_modified(|state| {
            let result = f(state);
            let changed = result.is_ok();
            outcome = Some(result);
            changed
        });
        outcome.unwrap_or_else(|| unreachable!("send_if_modified runs its closure"))
    }
}

/// Reads the whole file; the handle is closed before returning on every path
async fn read_local_file(path: &Path) -> Result<Vec<u8>, ApiError> {
    let mut file = tokio::fs::File::open(path).await.map_err(|e| {
        ApiError::LocalIo(format!("Failed to open {}: {}", path.display(), e))
    })?;

    let mut content = Vec::new();
    file.read_to_end(&mut content).await.map_err(|e| {
        ApiError::LocalIo(format!("Failed to read {}: {}", path.display(), e))
    })?;

    Ok(content)
}

/// `floor(sent * 100 / total)`, clamped to 100
fn percent_of(sent: u64, total: u64) -> u8 {
    if total == 0 {
        return 0;
    }
    let percent = u128::from(sent.min(total)) * 100 / u128::from(total);
    percent as u8
}
