//! Uploaded-document storage.
//!
//! `AppState` holds an `Arc<dyn FileStore>`; the local-disk implementation is
//! the only backend, but the seam keeps the orchestration layer unaware of
//! where bytes land.

pub mod local;

use async_trait::async_trait;
use bytes::Bytes;

use crate::errors::AppError;

pub use local::LocalFileStore;

pub const MAX_FILE_BYTES: usize = 10 * 1024 * 1024;

/// Content types accepted for resumes and cover letters: PDF and Word.
pub const ALLOWED_CONTENT_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

/// One file part pulled out of a multipart submission.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

/// Which document an upload is, controls the stored file name prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Resume,
    CoverLetter,
}

impl FileKind {
    pub fn prefix(self) -> &'static str {
        match self {
            FileKind::Resume => "Resume",
            FileKind::CoverLetter => "CoverLetter",
        }
    }

    pub fn human(self) -> &'static str {
        match self {
            FileKind::Resume => "Resume",
            FileKind::CoverLetter => "Cover letter",
        }
    }
}

#[async_trait]
pub trait FileStore: Send + Sync {
    /// Stores a resume or cover letter under the application's deterministic
    /// folder and returns the path relative to the upload root.
    async fn upload(
        &self,
        file: &UploadedFile,
        company_name: &str,
        job_title: &str,
        location: &str,
        kind: FileKind,
    ) -> Result<String, AppError>;

    /// Stores a miscellaneous file under a random name.
    async fn upload_other(&self, file: &UploadedFile) -> Result<String, AppError>;

    /// Removes a stored file. Missing files only log a warning.
    async fn delete(&self, relative_path: &str) -> Result<(), AppError>;
}
