use tracing::warn;

use crate::{
    client::FileService,
    error::AppError,
    models::files::{DownloadedFile, FileMetadata, LocalFile},
};

/// Transient user-visible notifications, drained by the front end after each
/// operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    FetchFailed,
    NoFileSelected,
    UploadFailed,
    DeleteFailed,
}

impl Notice {
    pub fn message(self) -> &'static str {
        match self {
            Notice::FetchFailed => "Failed to fetch files",
            Notice::NoFileSelected => "No file selected",
            Notice::UploadFailed => "Failed to upload file",
            Notice::DeleteFailed => "Failed to delete file",
        }
    }
}

/// The files page: a session-scoped cache of the backend listing plus the
/// upload-dialog flag.
///
/// The cache is rebuilt on [`refresh`](Self::refresh) and mutated only by
/// confirmed successes. All mutating operations take `&mut self`, so list
/// updates are serialized by construction.
pub struct FilesPage<S: FileService> {
    service: S,
    files: Vec<FileMetadata>,
    dialog_open: bool,
    notices: Vec<Notice>,
}

impl<S: FileService> FilesPage<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            files: Vec::new(),
            dialog_open: false,
            notices: Vec::new(),
        }
    }

    pub fn files(&self) -> &[FileMetadata] {
        &self.files
    }

    pub fn dialog_open(&self) -> bool {
        self.dialog_open
    }

    /// Take the notifications accumulated since the last drain.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Replace the cached listing with the backend's. Runs once on mount and
    /// again on explicit refresh; a failure leaves the cache untouched.
    pub async fn refresh(&mut self) {
        match self.service.list().await {
            Ok(listing) => self.files = listing,
            Err(err) => {
                warn!(error = %err, "list request failed");
                self.notices.push(Notice::FetchFailed);
            }
        }
    }

    pub fn open_upload_dialog(&mut self) {
        self.dialog_open = true;
    }

    pub fn close_upload_dialog(&mut self) {
        self.dialog_open = false;
    }

    /// Submit the upload dialog. The dialog closes with the submission, not
    /// with the outcome. No selection means no network call.
    pub async fn submit_upload(&mut self, selection: Option<LocalFile>) {
        self.dialog_open = false;

        let Some(file) = selection else {
            self.notices.push(Notice::NoFileSelected);
            return;
        };

        match self.service.upload(file).await {
            Ok(created) => self.files.push(created),
            Err(err) => {
                warn!(error = %err, "upload request failed");
                self.notices.push(Notice::UploadFailed);
            }
        }
    }

    /// Delete the file with the given id; on success drop exactly that entry
    /// from the cache, keeping the rest in order.
    pub async fn delete(&mut self, id: &str) {
        match self.service.delete(id).await {
            Ok(()) => self.files.retain(|file| file.id != id),
            Err(err) => {
                warn!(error = %err, "delete request failed");
                self.notices.push(Notice::DeleteFailed);
            }
        }
    }

    /// Fetch a file's content. Page state never changes and no notice is
    /// raised; the caller decides what to do with the stream or the error.
    pub async fn download(&self, id: &str) -> Result<DownloadedFile, AppError> {
        self.service.download(id).await
    }
}
