//! Orchestration: sequencing of the uniqueness gate, field validation, file
//! uploads, and persistence. No query logic lives here; list endpoints defer
//! to the query engine.

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::info;

use crate::applications::dto::ApplicationView;
use crate::applications::form::ApplicationForm;
use crate::applications::store::ApplicationStore;
use crate::applications::validation::validate_fields;
use crate::enums::{ActionType, ApplicationStatus, RejectionReason};
use crate::errors::AppError;
use crate::models::application::{ApplicationRow, NewApplication};
use crate::query::{list_page, PaginatedResult, QueryParameters, Scope};
use crate::storage::{FileKind, FileStore};

const DUPLICATE_MESSAGE: &str =
    "An application with the same job title, company name, and location already exists.";
const NOT_FOUND_MESSAGE: &str = "Application not found.";

pub async fn create(
    store: &dyn ApplicationStore,
    files: &dyn FileStore,
    form: ApplicationForm,
    today: NaiveDate,
) -> Result<ApplicationView, AppError> {
    let fields = &form.fields;

    let already_exists = store
        .exists_by_title_company_location(
            &fields.job_title,
            &fields.company_name,
            &fields.location,
            None,
        )
        .await?;
    if already_exists {
        return Err(AppError::Conflict(DUPLICATE_MESSAGE.to_string()));
    }

    validate_fields(fields, today)?;

    let resume = form
        .resume
        .as_ref()
        .ok_or_else(|| AppError::Validation("Resume file is required.".to_string()))?;
    let resume_file_path = files
        .upload(
            resume,
            &fields.company_name,
            &fields.job_title,
            &fields.location,
            FileKind::Resume,
        )
        .await?;

    let cover_letter_file_path = match &form.cover_letter {
        Some(cover_letter) => Some(
            files
                .upload(
                    cover_letter,
                    &fields.company_name,
                    &fields.job_title,
                    &fields.location,
                    FileKind::CoverLetter,
                )
                .await?,
        ),
        None => None,
    };

    let row = store
        .create(NewApplication {
            fields: form.fields,
            resume_file_path,
            cover_letter_file_path,
        })
        .await?;

    info!("Created application {} ({})", row.id, row.job_title);
    Ok(row.into())
}

pub async fn update(
    store: &dyn ApplicationStore,
    files: &dyn FileStore,
    id: i32,
    form: ApplicationForm,
    today: NaiveDate,
) -> Result<ApplicationView, AppError> {
    let mut row = store
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND_MESSAGE.to_string()))?;

    let fields = &form.fields;
    let already_exists = store
        .exists_by_title_company_location(
            &fields.job_title,
            &fields.company_name,
            &fields.location,
            Some(id),
        )
        .await?;
    if already_exists {
        return Err(AppError::Conflict(DUPLICATE_MESSAGE.to_string()));
    }

    validate_fields(fields, today)?;

    row.apply_fields(fields);

    if let Some(resume) = &form.resume {
        row.resume_file_path = files
            .upload(
                resume,
                &row.company_name,
                &row.job_title,
                &row.location,
                FileKind::Resume,
            )
            .await?;
    }
    if let Some(cover_letter) = &form.cover_letter {
        row.cover_letter_file_path = Some(
            files
                .upload(
                    cover_letter,
                    &row.company_name,
                    &row.job_title,
                    &row.location,
                    FileKind::CoverLetter,
                )
                .await?,
        );
    }

    store.update(&row).await?;
    Ok(row.into())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    pub status: ApplicationStatus,
    pub rejection_reason: Option<RejectionReason>,
    pub next_action: ActionType,
    pub next_action_date: Option<NaiveDate>,
}

/// Applies a status transition. `first_response_date` is stamped exactly once,
/// the first time the record enters the response category, and never reset by
/// later transitions.
pub fn apply_status_update(row: &mut ApplicationRow, req: &UpdateStatusRequest, today: NaiveDate) {
    if row.first_response_date.is_none() && req.status.is_response() {
        row.first_response_date = Some(today);
    }
    row.status = req.status;
    row.rejection_reason = req.rejection_reason;
    row.next_action = req.next_action;
    row.next_action_date = req.next_action_date;
}

pub async fn update_status(
    store: &dyn ApplicationStore,
    id: i32,
    req: &UpdateStatusRequest,
    today: NaiveDate,
) -> Result<ApplicationView, AppError> {
    let mut row = store
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND_MESSAGE.to_string()))?;

    apply_status_update(&mut row, req, today);
    store.update(&row).await?;
    Ok(row.into())
}

pub async fn get_by_id(store: &dyn ApplicationStore, id: i32) -> Result<ApplicationView, AppError> {
    store
        .get_by_id(id)
        .await?
        .map(ApplicationView::from)
        .ok_or_else(|| AppError::NotFound(NOT_FOUND_MESSAGE.to_string()))
}

pub async fn list(
    store: &dyn ApplicationStore,
    scope: Scope,
    params: &QueryParameters,
) -> Result<PaginatedResult<ApplicationView>, AppError> {
    let rows = store.fetch_all().await?;
    Ok(list_page(rows, scope, params).map(ApplicationView::from))
}

pub async fn soft_delete(store: &dyn ApplicationStore, id: i32) -> Result<(), AppError> {
    ensure_exists(store, id).await?;
    store.set_deleted(id, true).await
}

pub async fn restore(store: &dyn ApplicationStore, id: i32) -> Result<(), AppError> {
    ensure_exists(store, id).await?;
    store.set_deleted(id, false).await
}

/// Removes the row and its stored documents. The soft-delete flag is the
/// normal terminal state; this is the explicit, unrecoverable entry point.
pub async fn hard_delete(
    store: &dyn ApplicationStore,
    files: &dyn FileStore,
    id: i32,
) -> Result<(), AppError> {
    let row = store
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND_MESSAGE.to_string()))?;

    files.delete(&row.resume_file_path).await?;
    if let Some(cover_letter) = &row.cover_letter_file_path {
        files.delete(cover_letter).await?;
    }

    store.hard_delete(id).await?;
    info!("Hard-deleted application {id}");
    Ok(())
}

async fn ensure_exists(store: &dyn ApplicationStore, id: i32) -> Result<(), AppError> {
    if store.get_by_id(id).await?.is_none() {
        return Err(AppError::NotFound(NOT_FOUND_MESSAGE.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::{ContractType, JobSource, Priority};
    use crate::models::application::ApplicationFields;
    use crate::storage::UploadedFile;
    use async_trait::async_trait;
    use bytes::Bytes;
    use std::sync::Mutex;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        date(2024, 6, 1)
    }

    /// In-memory store standing in for Postgres.
    struct MemoryStore {
        rows: Mutex<Vec<ApplicationRow>>,
        next_id: Mutex<i32>,
    }

    impl Default for MemoryStore {
        fn default() -> Self {
            MemoryStore::with_rows(Vec::new())
        }
    }

    impl MemoryStore {
        fn with_rows(rows: Vec<ApplicationRow>) -> Self {
            let next_id = rows.iter().map(|r| r.id).max().unwrap_or(0) + 1;
            MemoryStore {
                rows: Mutex::new(rows),
                next_id: Mutex::new(next_id),
            }
        }

        fn row(&self, id: i32) -> ApplicationRow {
            self.rows
                .lock()
                .unwrap()
                .iter()
                .find(|r| r.id == id)
                .cloned()
                .unwrap()
        }
    }

    #[async_trait]
    impl ApplicationStore for MemoryStore {
        async fn create(&self, new: NewApplication) -> Result<ApplicationRow, AppError> {
            let mut next_id = self.next_id.lock().unwrap();
            let id = *next_id;
            *next_id += 1;

            let f = new.fields;
            let row = ApplicationRow {
                id,
                application_date: f.application_date,
                first_response_date: None,
                job_title: f.job_title,
                job_description: f.job_description,
                company_name: f.company_name,
                location: f.location,
                source: f.source,
                contract_type: f.contract_type,
                offer_url: f.offer_url,
                posting_date: f.posting_date,
                closing_date: f.closing_date,
                resume_file_path: new.resume_file_path,
                cover_letter_file_path: new.cover_letter_file_path,
                status: f.status,
                last_action: f.last_action,
                last_action_date: f.last_action_date,
                next_action: f.next_action,
                next_action_date: f.next_action_date,
                priority: f.priority,
                notes: f.notes,
                min_salary_proposed: f.min_salary_proposed,
                max_salary_proposed: f.max_salary_proposed,
                min_salary_offered: f.min_salary_offered,
                max_salary_offered: f.max_salary_offered,
                currency: f.currency,
                rejection_reason: f.rejection_reason,
                key_words: f.key_words,
                interest_level: f.interest_level,
                contact_name: f.contact_name,
                contact_email: f.contact_email,
                is_deleted: false,
            };
            self.rows.lock().unwrap().push(row.clone());
            Ok(row)
        }

        async fn exists_by_title_company_location(
            &self,
            job_title: &str,
            company_name: &str,
            location: &str,
            exclude_id: Option<i32>,
        ) -> Result<bool, AppError> {
            Ok(self.rows.lock().unwrap().iter().any(|r| {
                r.job_title == job_title
                    && r.company_name == company_name
                    && r.location == location
                    && exclude_id != Some(r.id)
            }))
        }

        async fn get_by_id(&self, id: i32) -> Result<Option<ApplicationRow>, AppError> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .find(|r| r.id == id)
                .cloned())
        }

        async fn fetch_all(&self) -> Result<Vec<ApplicationRow>, AppError> {
            Ok(self.rows.lock().unwrap().clone())
        }

        async fn update(&self, row: &ApplicationRow) -> Result<(), AppError> {
            let mut rows = self.rows.lock().unwrap();
            if let Some(existing) = rows.iter_mut().find(|r| r.id == row.id) {
                *existing = row.clone();
            }
            Ok(())
        }

        async fn set_deleted(&self, id: i32, deleted: bool) -> Result<(), AppError> {
            let mut rows = self.rows.lock().unwrap();
            if let Some(existing) = rows.iter_mut().find(|r| r.id == id) {
                existing.is_deleted = deleted;
            }
            Ok(())
        }

        async fn hard_delete(&self, id: i32) -> Result<(), AppError> {
            self.rows.lock().unwrap().retain(|r| r.id != id);
            Ok(())
        }
    }

    /// File store that records calls without touching disk.
    #[derive(Default)]
    struct RecordingFileStore {
        uploads: Mutex<Vec<String>>,
        deletes: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl FileStore for RecordingFileStore {
        async fn upload(
            &self,
            _file: &UploadedFile,
            company_name: &str,
            job_title: &str,
            _location: &str,
            kind: FileKind,
        ) -> Result<String, AppError> {
            let path = format!("Applications/{company_name}/{}_{job_title}.pdf", kind.prefix());
            self.uploads.lock().unwrap().push(path.clone());
            Ok(path)
        }

        async fn upload_other(&self, _file: &UploadedFile) -> Result<String, AppError> {
            Ok("OtherFiles/x.pdf".to_string())
        }

        async fn delete(&self, relative_path: &str) -> Result<(), AppError> {
            self.deletes.lock().unwrap().push(relative_path.to_string());
            Ok(())
        }
    }

    fn make_fields(title: &str) -> ApplicationFields {
        ApplicationFields {
            application_date: date(2024, 5, 20),
            job_title: title.to_string(),
            job_description: None,
            company_name: "Acme".to_string(),
            location: "Paris".to_string(),
            source: JobSource::LinkedIn,
            contract_type: ContractType::FullTime,
            offer_url: "https://example.com/jobs/42".to_string(),
            posting_date: None,
            closing_date: None,
            status: ApplicationStatus::Applied,
            last_action: ActionType::Application,
            last_action_date: date(2024, 5, 20),
            next_action: ActionType::None,
            next_action_date: None,
            priority: Priority::Medium,
            notes: None,
            min_salary_proposed: None,
            max_salary_proposed: None,
            min_salary_offered: None,
            max_salary_offered: None,
            currency: None,
            rejection_reason: None,
            key_words: None,
            interest_level: 3,
            contact_name: None,
            contact_email: None,
        }
    }

    fn make_pdf() -> UploadedFile {
        UploadedFile {
            file_name: "cv.pdf".to_string(),
            content_type: "application/pdf".to_string(),
            bytes: Bytes::from_static(b"pdf bytes"),
        }
    }

    fn make_form(title: &str) -> ApplicationForm {
        ApplicationForm {
            fields: make_fields(title),
            resume: Some(make_pdf()),
            cover_letter: None,
        }
    }

    async fn seeded_store(titles: &[&str]) -> MemoryStore {
        let store = MemoryStore::default();
        let files = RecordingFileStore::default();
        for title in titles {
            create(&store, &files, make_form(title), today())
                .await
                .unwrap();
        }
        store
    }

    #[tokio::test]
    async fn test_create_persists_and_returns_view() {
        let store = MemoryStore::default();
        let files = RecordingFileStore::default();

        let view = create(&store, &files, make_form("Backend Engineer"), today())
            .await
            .unwrap();
        assert_eq!(view.id, 1);
        assert_eq!(view.status, "Applied");
        assert!(view.resume_file_path.contains("Resume"));
        assert_eq!(files.uploads.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_duplicate_triple_conflicts_before_upload() {
        let store = seeded_store(&["Backend Engineer"]).await;
        let files = RecordingFileStore::default();

        let err = create(&store, &files, make_form("Backend Engineer"), today())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert!(files.uploads.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_without_resume_is_rejected() {
        let store = MemoryStore::default();
        let files = RecordingFileStore::default();

        let mut form = make_form("Backend Engineer");
        form.resume = None;
        let err = create(&store, &files, form, today()).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("Resume")));
    }

    #[tokio::test]
    async fn test_create_invalid_fields_rejected_before_upload() {
        let store = MemoryStore::default();
        let files = RecordingFileStore::default();

        let mut form = make_form("Backend Engineer");
        form.fields.offer_url = "not a url".to_string();
        let err = create(&store, &files, form, today()).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(files.uploads.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_missing_record_is_not_found() {
        let store = MemoryStore::default();
        let files = RecordingFileStore::default();

        let err = update(&store, &files, 42, make_form("X"), today())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_excludes_own_id_from_uniqueness_gate() {
        let store = seeded_store(&["Backend Engineer"]).await;
        let files = RecordingFileStore::default();

        // Re-submitting the same triple for the same record is not a conflict.
        let mut form = make_form("Backend Engineer");
        form.resume = None;
        let view = update(&store, &files, 1, form, today()).await.unwrap();
        assert_eq!(view.id, 1);
    }

    #[tokio::test]
    async fn test_update_conflicts_with_another_record() {
        let store = seeded_store(&["Backend Engineer", "Data Engineer"]).await;
        let files = RecordingFileStore::default();

        let mut form = make_form("Backend Engineer");
        form.resume = None;
        let err = update(&store, &files, 2, form, today()).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_update_without_files_keeps_existing_paths() {
        let store = seeded_store(&["Backend Engineer"]).await;
        let files = RecordingFileStore::default();
        let original_path = store.row(1).resume_file_path;

        let mut form = make_form("Backend Engineer");
        form.fields.notes = Some("followed up by phone".to_string());
        form.resume = None;
        let view = update(&store, &files, 1, form, today()).await.unwrap();

        assert_eq!(view.resume_file_path, original_path);
        assert_eq!(view.notes.as_deref(), Some("followed up by phone"));
        assert!(files.uploads.lock().unwrap().is_empty());
    }

    #[test]
    fn test_first_response_date_is_stamped_once() {
        let mut row = make_row();

        let to_viewed = UpdateStatusRequest {
            status: ApplicationStatus::Viewed,
            rejection_reason: None,
            next_action: ActionType::FollowUpEmail,
            next_action_date: Some(date(2024, 6, 10)),
        };
        apply_status_update(&mut row, &to_viewed, date(2024, 6, 2));
        assert_eq!(row.first_response_date, Some(date(2024, 6, 2)));

        // A later transition within the response category must not move it.
        let to_rejected = UpdateStatusRequest {
            status: ApplicationStatus::Rejected,
            rejection_reason: Some(RejectionReason::PositionFilled),
            next_action: ActionType::None,
            next_action_date: None,
        };
        apply_status_update(&mut row, &to_rejected, date(2024, 6, 20));
        assert_eq!(row.first_response_date, Some(date(2024, 6, 2)));
        assert_eq!(row.status, ApplicationStatus::Rejected);
        assert_eq!(row.rejection_reason, Some(RejectionReason::PositionFilled));
    }

    #[test]
    fn test_non_response_transition_leaves_first_response_unset() {
        let mut row = make_row();

        let to_withdrawn = UpdateStatusRequest {
            status: ApplicationStatus::Withdrawn,
            rejection_reason: None,
            next_action: ActionType::None,
            next_action_date: None,
        };
        apply_status_update(&mut row, &to_withdrawn, date(2024, 6, 2));
        assert!(row.first_response_date.is_none());
    }

    fn make_row() -> ApplicationRow {
        ApplicationRow {
            id: 1,
            application_date: date(2024, 5, 20),
            first_response_date: None,
            job_title: "Backend Engineer".to_string(),
            job_description: None,
            company_name: "Acme".to_string(),
            location: "Paris".to_string(),
            source: JobSource::LinkedIn,
            contract_type: ContractType::FullTime,
            offer_url: "https://example.com/jobs/42".to_string(),
            posting_date: None,
            closing_date: None,
            resume_file_path: "Applications/Acme/Resume.pdf".to_string(),
            cover_letter_file_path: None,
            status: ApplicationStatus::Applied,
            last_action: ActionType::Application,
            last_action_date: date(2024, 5, 20),
            next_action: ActionType::None,
            next_action_date: None,
            priority: Priority::Medium,
            notes: None,
            min_salary_proposed: None,
            max_salary_proposed: None,
            min_salary_offered: None,
            max_salary_offered: None,
            currency: None,
            rejection_reason: None,
            key_words: None,
            interest_level: 3,
            contact_name: None,
            contact_email: None,
            is_deleted: false,
        }
    }

    #[tokio::test]
    async fn test_soft_delete_and_restore_flip_the_flag() {
        let store = seeded_store(&["Backend Engineer"]).await;

        soft_delete(&store, 1).await.unwrap();
        assert!(store.row(1).is_deleted);

        restore(&store, 1).await.unwrap();
        assert!(!store.row(1).is_deleted);
    }

    #[tokio::test]
    async fn test_soft_delete_missing_record_is_not_found() {
        let store = MemoryStore::default();
        let err = soft_delete(&store, 7).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_hard_delete_removes_row_and_files() {
        let store = seeded_store(&["Backend Engineer"]).await;
        let files = RecordingFileStore::default();
        let resume_path = store.row(1).resume_file_path;

        hard_delete(&store, &files, 1).await.unwrap();
        assert!(store.get_by_id(1).await.unwrap().is_none());
        assert_eq!(*files.deletes.lock().unwrap(), vec![resume_path]);
    }

    #[tokio::test]
    async fn test_list_respects_scope_after_soft_delete() {
        let store = seeded_store(&["A", "B", "C"]).await;
        soft_delete(&store, 2).await.unwrap();

        let params = QueryParameters {
            page_index: 1,
            page_size: 10,
            ..Default::default()
        };
        let active = list(&store, Scope::Active, &params).await.unwrap();
        assert_eq!(active.total_count, 2);

        let trash = list(&store, Scope::Trash, &params).await.unwrap();
        assert_eq!(trash.total_count, 1);
        assert_eq!(trash.items[0].id, 2);
    }

    #[tokio::test]
    async fn test_get_by_id_renders_labels() {
        let store = seeded_store(&["Backend Engineer"]).await;
        let view = get_by_id(&store, 1).await.unwrap();
        assert_eq!(view.source, "LinkedIn");
        assert_eq!(view.contract_type, "Full Time");
        assert_eq!(view.priority, "Medium");
    }
}
