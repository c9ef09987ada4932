//! Upload workflow state machine
//!
//! Models the select → upload → move flow as a tagged phase plus two pieces
//! of session data that live across phases: the saved-directory cache and a
//! single error slot.
//!
//! ```text
//! Idle ──select──▶ FileSelected ──start_upload──▶ Uploading ──finish_upload──▶ Uploaded
//!  ▲                    ▲                            │                          │   ▲
//!  │                    └────────fail_upload─────────┘                 start_move│   │fail_move
//!  │                                                                            ▼   │
//!  └──────────────────────────────finish_move──────────────────────────────── Moving
//! ```
//!
//! Errors are not a phase. A failed upload returns to `FileSelected` so the
//! same file can be sent again, and a failed move returns to `Uploaded` so
//! the remote file is kept for a retry. The error slot is last-write-wins
//! and is cleared by the next successful transition.

use std::fmt;
use std::path::PathBuf;

use super::errors::DomainError;
use super::filename::suggest_directory;
use super::upload::{RemoteFile, UploadTarget};

/// Error message recorded when the directory list cannot be fetched
pub const DIRECTORY_LISTING_FAILED: &str = "Failed to get upload dirs";

/// Current step of the upload workflow
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum WorkflowPhase {
    /// Nothing selected
    #[default]
    Idle,
    /// A local file is selected and ready to upload
    FileSelected { target: UploadTarget },
    /// The file is being sent; `progress` is a percentage in `0..=100`
    Uploading { target: UploadTarget, progress: u8 },
    /// The server holds the file under `remote`; waiting for a destination
    Uploaded {
        target: UploadTarget,
        remote: RemoteFile,
        suggested_dir: Option<String>,
    },
    /// The uploaded file is being moved into a saved directory
    Moving {
        target: UploadTarget,
        remote: RemoteFile,
        suggested_dir: Option<String>,
    },
}

impl WorkflowPhase {
    /// Returns the phase name without its payload
    pub fn name(&self) -> &'static str {
        match self {
            WorkflowPhase::Idle => "Idle",
            WorkflowPhase::FileSelected { .. } => "FileSelected",
            WorkflowPhase::Uploading { .. } => "Uploading",
            WorkflowPhase::Uploaded { .. } => "Uploaded",
            WorkflowPhase::Moving { .. } => "Moving",
        }
    }

    /// Returns true while a network operation is in flight
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            WorkflowPhase::Uploading { .. } | WorkflowPhase::Moving { .. }
        )
    }
}

impl fmt::Display for WorkflowPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkflowPhase::Idle => write!(f, "idle"),
            WorkflowPhase::FileSelected { target } => {
                write!(f, "file selected ({})", target.display_name())
            }
            WorkflowPhase::Uploading { progress, .. } => write!(f, "uploading ({}%)", progress),
            WorkflowPhase::Uploaded { remote, .. } => write!(f, "uploaded ({})", remote),
            WorkflowPhase::Moving { remote, .. } => write!(f, "moving ({})", remote),
        }
    }
}

/// Snapshot of a workflow session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkflowState {
    phase: WorkflowPhase,
    /// Saved directories, fetched at most once per session
    saved_dirs: Option<Vec<String>>,
    /// Last error message, if any
    error: Option<String>,
}

impl WorkflowState {
    /// Creates a new idle state with no cached directories
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Returns the current phase
    pub fn phase(&self) -> &WorkflowPhase {
        &self.phase
    }

    /// Returns the selected file, if any phase past `Idle` is active
    pub fn selected_file(&self) -> Option<&UploadTarget> {
        match &self.phase {
            WorkflowPhase::Idle => None,
            WorkflowPhase::FileSelected { target }
            | WorkflowPhase::Uploading { target, .. }
            | WorkflowPhase::Uploaded { target, .. }
            | WorkflowPhase::Moving { target, .. } => Some(target),
        }
    }

    /// Returns the display name of the selected file
    pub fn selected_filename(&self) -> Option<&str> {
        self.selected_file().map(UploadTarget::display_name)
    }

    /// Returns the server-side file once the upload has succeeded
    pub fn uploaded_file(&self) -> Option<&RemoteFile> {
        match &self.phase {
            WorkflowPhase::Uploaded { remote, .. } | WorkflowPhase::Moving { remote, .. } => {
                Some(remote)
            }
            _ => None,
        }
    }

    /// Returns the upload progress percentage
    ///
    /// `0` before an upload starts, the last recorded value while uploading,
    /// and `100` once the server holds the file.
    pub fn progress(&self) -> u8 {
        match &self.phase {
            WorkflowPhase::Uploading { progress, .. } => *progress,
            WorkflowPhase::Uploaded { .. } | WorkflowPhase::Moving { .. } => 100,
            _ => 0,
        }
    }

    /// Returns the directory suggested for the uploaded file
    pub fn suggested_dir(&self) -> Option<&str> {
        match &self.phase {
            WorkflowPhase::Uploaded { suggested_dir, .. }
            | WorkflowPhase::Moving { suggested_dir, .. } => suggested_dir.as_deref(),
            _ => None,
        }
    }

    /// Returns the cached saved directories, if they have been fetched
    pub fn saved_dirs(&self) -> Option<&[String]> {
        self.saved_dirs.as_deref()
    }

    /// Returns the current error message
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Returns true while an upload or move is in flight
    pub fn is_busy(&self) -> bool {
        self.phase.is_busy()
    }

    // ------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------

    /// Selects a file, or clears the selection when either part is missing
    ///
    /// Both `path` and `name` present moves to `FileSelected`; anything else
    /// returns to `Idle`. Picking a file after an upload abandons that upload.
    pub fn select_file(
        &mut self,
        path: Option<PathBuf>,
        name: Option<String>,
    ) -> Result<(), DomainError> {
        if self.phase.is_busy() {
            return Err(self.invalid("FileSelected"));
        }

        self.phase = match (path, name) {
            (Some(path), Some(name)) => WorkflowPhase::FileSelected {
                target: UploadTarget::new(path, name),
            },
            _ => WorkflowPhase::Idle,
        };
        self.error = None;
        Ok(())
    }

    /// Drops the selection and any finished upload
    pub fn cancel(&mut self) -> Result<(), DomainError> {
        self.select_file(None, None)
    }

    /// `FileSelected` → `Uploading` with progress 0
    ///
    /// Returns the file to send.
    pub fn start_upload(&mut self) -> Result<UploadTarget, DomainError> {
        match std::mem::take(&mut self.phase) {
            WorkflowPhase::FileSelected { target } => {
                self.phase = WorkflowPhase::Uploading {
                    target: target.clone(),
                    progress: 0,
                };
                self.error = None;
                Ok(target)
            }
            other => self.reject(other, "Uploading"),
        }
    }

    /// Records a new progress percentage while uploading
    ///
    /// Values are clamped to 100. Only increases are stored, so observers
    /// never see progress go backwards. Returns true if the value changed.
    pub fn record_progress(&mut self, percent: u8) -> bool {
        let percent = percent.min(100);
        match &mut self.phase {
            WorkflowPhase::Uploading { progress, .. } if percent > *progress => {
                *progress = percent;
                true
            }
            _ => false,
        }
    }

    /// `Uploading` → `Uploaded`; progress reads 100 from here on
    pub fn finish_upload(&mut self, remote: RemoteFile) -> Result<(), DomainError> {
        match std::mem::take(&mut self.phase) {
            WorkflowPhase::Uploading { target, .. } => {
                let suggested_dir = self.suggestion_for(&target);
                self.phase = WorkflowPhase::Uploaded {
                    target,
                    remote,
                    suggested_dir,
                };
                self.error = None;
                Ok(())
            }
            other => self.reject(other, "Uploaded"),
        }
    }

    /// `Uploading` → `FileSelected`, keeping the selection for a retry
    pub fn fail_upload(&mut self, message: &str) -> Result<(), DomainError> {
        match std::mem::take(&mut self.phase) {
            WorkflowPhase::Uploading { target, .. } => {
                self.phase = WorkflowPhase::FileSelected { target };
                self.error = Some(format!("Error: {}", message));
                Ok(())
            }
            other => self.reject(other, "FileSelected"),
        }
    }

    /// Stores the saved directories if none are cached yet
    ///
    /// The cache is write-once per session; later calls are ignored and
    /// return false. When the upload has finished, the directory suggestion
    /// is refreshed from the new list.
    pub fn set_saved_dirs(&mut self, dirs: Vec<String>) -> bool {
        if self.saved_dirs.is_some() {
            return false;
        }
        self.saved_dirs = Some(dirs);

        let suggestion = self.selected_file().and_then(|t| self.suggestion_for(t));
        if let WorkflowPhase::Uploaded { suggested_dir, .. } = &mut self.phase {
            if suggested_dir.is_none() {
                *suggested_dir = suggestion;
            }
        }
        true
    }

    /// Records that the directory list could not be fetched
    ///
    /// The phase is left alone: the upload itself succeeded.
    pub fn fail_directory_listing(&mut self) {
        self.error = Some(DIRECTORY_LISTING_FAILED.to_string());
    }

    /// `Uploaded` → `Moving`
    ///
    /// Returns the remote file to move.
    pub fn start_move(&mut self) -> Result<RemoteFile, DomainError> {
        match std::mem::take(&mut self.phase) {
            WorkflowPhase::Uploaded {
                target,
                remote,
                suggested_dir,
            } => {
                self.phase = WorkflowPhase::Moving {
                    target,
                    remote: remote.clone(),
                    suggested_dir,
                };
                self.error = None;
                Ok(remote)
            }
            other => self.reject(other, "Moving"),
        }
    }

    /// `Moving` → `Idle`, clearing the file, upload, progress and error
    ///
    /// The saved-directory cache is kept for the rest of the session.
    pub fn finish_move(&mut self) -> Result<(), DomainError> {
        match std::mem::take(&mut self.phase) {
            WorkflowPhase::Moving { .. } => {
                self.error = None;
                Ok(())
            }
            other => self.reject(other, "Idle"),
        }
    }

    /// `Moving` → `Uploaded`, keeping the remote file for a retry
    pub fn fail_move(&mut self, message: &str) -> Result<(), DomainError> {
        match std::mem::take(&mut self.phase) {
            WorkflowPhase::Moving {
                target,
                remote,
                suggested_dir,
            } => {
                self.phase = WorkflowPhase::Uploaded {
                    target,
                    remote,
                    suggested_dir,
                };
                self.error = Some(format!("Failed to move: {}", message));
                Ok(())
            }
            other => self.reject(other, "Uploaded"),
        }
    }

    // ------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------

    fn suggestion_for(&self, target: &UploadTarget) -> Option<String> {
        let dirs = self.saved_dirs.as_deref()?;
        suggest_directory(dirs, target.extension()?)
    }

    fn invalid(&self, to: &str) -> DomainError {
        DomainError::InvalidState {
            from: self.phase.name().to_string(),
            to: to.to_string(),
        }
    }

    fn reject<T>(&mut self, current: WorkflowPhase, to: &str) -> Result<T, DomainError> {
        self.phase = current;
        Err(self.invalid(to))
    }
}
