//! Persistence seam for application records.
//!
//! The trait hands back the raw row set unfiltered (deleted rows included);
//! deletion-scope filtering, sorting, and paging live in the query engine.
//! `AppState` carries it as `Arc<dyn ApplicationStore>` so the service layer
//! and tests never touch `sqlx` directly.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::application::{ApplicationRow, NewApplication};

#[async_trait]
pub trait ApplicationStore: Send + Sync {
    async fn create(&self, new: NewApplication) -> Result<ApplicationRow, AppError>;

    /// Uniqueness gate backing the Conflict check: does any record (other
    /// than `exclude_id`, when given) share this title/company/location?
    async fn exists_by_title_company_location(
        &self,
        job_title: &str,
        company_name: &str,
        location: &str,
        exclude_id: Option<i32>,
    ) -> Result<bool, AppError>;

    async fn get_by_id(&self, id: i32) -> Result<Option<ApplicationRow>, AppError>;

    /// Every row, deleted ones included, in insertion order.
    async fn fetch_all(&self) -> Result<Vec<ApplicationRow>, AppError>;

    async fn update(&self, row: &ApplicationRow) -> Result<(), AppError>;

    async fn set_deleted(&self, id: i32, deleted: bool) -> Result<(), AppError>;

    /// Physically removes the row. The soft-delete flag is the normal path;
    /// this backs the explicit DELETE entry point only.
    async fn hard_delete(&self, id: i32) -> Result<(), AppError>;
}

pub struct PgApplicationStore {
    pool: PgPool,
}

impl PgApplicationStore {
    pub fn new(pool: PgPool) -> Self {
        PgApplicationStore { pool }
    }
}

#[async_trait]
impl ApplicationStore for PgApplicationStore {
    async fn create(&self, new: NewApplication) -> Result<ApplicationRow, AppError> {
        let f = &new.fields;
        let row = sqlx::query_as::<_, ApplicationRow>(
            r#"
            INSERT INTO applications
                (application_date, job_title, job_description, company_name, location,
                 source, contract_type, offer_url, posting_date, closing_date,
                 resume_file_path, cover_letter_file_path, status,
                 last_action, last_action_date, next_action, next_action_date,
                 priority, notes, min_salary_proposed, max_salary_proposed,
                 min_salary_offered, max_salary_offered, currency, rejection_reason,
                 key_words, interest_level, contact_name, contact_email, is_deleted)
            VALUES
                ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
                 $11, $12, $13, $14, $15, $16, $17, $18, $19, $20,
                 $21, $22, $23, $24, $25, $26, $27, $28, $29, FALSE)
            RETURNING *
            "#,
        )
        .bind(f.application_date)
        .bind(&f.job_title)
        .bind(&f.job_description)
        .bind(&f.company_name)
        .bind(&f.location)
        .bind(f.source)
        .bind(f.contract_type)
        .bind(&f.offer_url)
        .bind(f.posting_date)
        .bind(f.closing_date)
        .bind(&new.resume_file_path)
        .bind(&new.cover_letter_file_path)
        .bind(f.status)
        .bind(f.last_action)
        .bind(f.last_action_date)
        .bind(f.next_action)
        .bind(f.next_action_date)
        .bind(f.priority)
        .bind(&f.notes)
        .bind(f.min_salary_proposed)
        .bind(f.max_salary_proposed)
        .bind(f.min_salary_offered)
        .bind(f.max_salary_offered)
        .bind(f.currency)
        .bind(f.rejection_reason)
        .bind(&f.key_words)
        .bind(f.interest_level)
        .bind(&f.contact_name)
        .bind(&f.contact_email)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn exists_by_title_company_location(
        &self,
        job_title: &str,
        company_name: &str,
        location: &str,
        exclude_id: Option<i32>,
    ) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM applications
                WHERE job_title = $1
                  AND company_name = $2
                  AND location = $3
                  AND ($4::INTEGER IS NULL OR id <> $4)
            )
            "#,
        )
        .bind(job_title)
        .bind(company_name)
        .bind(location)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<ApplicationRow>, AppError> {
        Ok(
            sqlx::query_as::<_, ApplicationRow>("SELECT * FROM applications WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn fetch_all(&self) -> Result<Vec<ApplicationRow>, AppError> {
        Ok(
            sqlx::query_as::<_, ApplicationRow>("SELECT * FROM applications ORDER BY id")
                .fetch_all(&self.pool)
                .await?,
        )
    }

    async fn update(&self, row: &ApplicationRow) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE applications SET
                application_date = $2, first_response_date = $3, job_title = $4,
                job_description = $5, company_name = $6, location = $7,
                source = $8, contract_type = $9, offer_url = $10,
                posting_date = $11, closing_date = $12, resume_file_path = $13,
                cover_letter_file_path = $14, status = $15, last_action = $16,
                last_action_date = $17, next_action = $18, next_action_date = $19,
                priority = $20, notes = $21, min_salary_proposed = $22,
                max_salary_proposed = $23, min_salary_offered = $24,
                max_salary_offered = $25, currency = $26, rejection_reason = $27,
                key_words = $28, interest_level = $29, contact_name = $30,
                contact_email = $31, is_deleted = $32
            WHERE id = $1
            "#,
        )
        .bind(row.id)
        .bind(row.application_date)
        .bind(row.first_response_date)
        .bind(&row.job_title)
        .bind(&row.job_description)
        .bind(&row.company_name)
        .bind(&row.location)
        .bind(row.source)
        .bind(row.contract_type)
        .bind(&row.offer_url)
        .bind(row.posting_date)
        .bind(row.closing_date)
        .bind(&row.resume_file_path)
        .bind(&row.cover_letter_file_path)
        .bind(row.status)
        .bind(row.last_action)
        .bind(row.last_action_date)
        .bind(row.next_action)
        .bind(row.next_action_date)
        .bind(row.priority)
        .bind(&row.notes)
        .bind(row.min_salary_proposed)
        .bind(row.max_salary_proposed)
        .bind(row.min_salary_offered)
        .bind(row.max_salary_offered)
        .bind(row.currency)
        .bind(row.rejection_reason)
        .bind(&row.key_words)
        .bind(row.interest_level)
        .bind(&row.contact_name)
        .bind(&row.contact_email)
        .bind(row.is_deleted)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn set_deleted(&self, id: i32, deleted: bool) -> Result<(), AppError> {
        sqlx::query("UPDATE applications SET is_deleted = $2 WHERE id = $1")
            .bind(id)
            .bind(deleted)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn hard_delete(&self, id: i32) -> Result<(), AppError> {
        sqlx::query("DELETE FROM applications WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
