use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::storage::{
    FileKind, FileStore, UploadedFile, ALLOWED_CONTENT_TYPES, MAX_FILE_BYTES,
};

/// Local-disk file store rooted at the configured upload directory.
///
/// Resume/cover-letter uploads land at
/// `Applications/{Company}_{Title}_{Location}/{Kind}_{Company}_{Title}_{Location}{ext}`
/// with sanitized names, so re-uploading for the same application overwrites
/// the previous document instead of accumulating copies.
pub struct LocalFileStore {
    base: PathBuf,
}

impl LocalFileStore {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        LocalFileStore { base: base.into() }
    }

    fn application_dir_name(company_name: &str, job_title: &str, location: &str) -> String {
        format!(
            "{}_{}_{}",
            sanitize_name(company_name),
            sanitize_name(job_title),
            sanitize_name(location)
        )
    }
}

/// Replaces path-hostile characters and spaces with underscores.
fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | ' ' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

fn extension_of(file_name: &str) -> String {
    Path::new(file_name)
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default()
}

/// Shared gate for resume and cover-letter uploads: non-empty, capped at
/// 10 MB, PDF or Word only.
fn validate_file(file: &UploadedFile, label: &str) -> Result<(), AppError> {
    if file.bytes.is_empty() {
        return Err(AppError::FileUpload(format!("{label} file is empty.")));
    }
    if file.bytes.len() > MAX_FILE_BYTES {
        return Err(AppError::FileUpload(format!(
            "{label} file size must not exceed 10Mb."
        )));
    }
    if !ALLOWED_CONTENT_TYPES.contains(&file.content_type.as_str()) {
        return Err(AppError::FileUpload(format!(
            "{label} file type is not valid. Only PDF and Word documents are allowed."
        )));
    }
    Ok(())
}

#[async_trait]
impl FileStore for LocalFileStore {
    async fn upload(
        &self,
        file: &UploadedFile,
        company_name: &str,
        job_title: &str,
        location: &str,
        kind: FileKind,
    ) -> Result<String, AppError> {
        validate_file(file, kind.human())?;

        let dir_name = Self::application_dir_name(company_name, job_title, location);
        let file_name = format!(
            "{}_{}{}",
            kind.prefix(),
            dir_name,
            extension_of(&file.file_name)
        );
        let relative = format!("Applications/{dir_name}/{file_name}");

        let absolute = self.base.join(&relative);
        if let Some(parent) = absolute.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&absolute, &file.bytes).await?;

        info!("Stored {} at {relative}", kind.human());
        Ok(relative)
    }

    async fn upload_other(&self, file: &UploadedFile) -> Result<String, AppError> {
        if file.bytes.is_empty() {
            warn!("Attempted to upload an empty file");
            return Err(AppError::FileUpload("File is empty.".to_string()));
        }

        let relative = format!(
            "OtherFiles/{}{}",
            Uuid::new_v4(),
            extension_of(&file.file_name)
        );
        let absolute = self.base.join(&relative);
        if let Some(parent) = absolute.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&absolute, &file.bytes).await?;

        Ok(relative)
    }

    async fn delete(&self, relative_path: &str) -> Result<(), AppError> {
        let absolute = self.base.join(relative_path);
        match tokio::fs::remove_file(&absolute).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!("File {relative_path} not found");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}
