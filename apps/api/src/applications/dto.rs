use chrono::NaiveDate;
use serde::Serialize;

use crate::models::application::ApplicationRow;

/// Outward-facing shape of a record: categorical fields are rendered through
/// the enum label tables so clients get "Interview Scheduled", not an ordinal.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationView {
    pub id: i32,
    pub application_date: NaiveDate,
    pub first_response_date: Option<NaiveDate>,
    pub job_title: String,
    pub job_description: Option<String>,
    pub company_name: String,
    pub location: String,
    pub source: &'static str,
    pub contract_type: &'static str,
    pub offer_url: String,
    pub posting_date: Option<NaiveDate>,
    pub closing_date: Option<NaiveDate>,
    pub resume_file_path: String,
    pub cover_letter_file_path: Option<String>,
    pub status: &'static str,
    pub last_action: &'static str,
    pub last_action_date: NaiveDate,
    pub next_action: &'static str,
    pub next_action_date: Option<NaiveDate>,
    pub priority: &'static str,
    pub notes: Option<String>,
    pub min_salary_proposed: Option<f64>,
    pub max_salary_proposed: Option<f64>,
    pub min_salary_offered: Option<f64>,
    pub max_salary_offered: Option<f64>,
    pub currency: Option<&'static str>,
    pub rejection_reason: Option<&'static str>,
    pub key_words: Option<String>,
    pub interest_level: i32,
    pub contact_name: Option<String>,
    pub contact_email: Option<String>,
    pub is_deleted: bool,
}

impl From<ApplicationRow> for ApplicationView {
    fn from(row: ApplicationRow) -> Self {
        ApplicationView {
            id: row.id,
            application_date: row.application_date,
            first_response_date: row.first_response_date,
            job_title: row.job_title,
            job_description: row.job_description,
            company_name: row.company_name,
            location: row.location,
            source: row.source.label(),
            contract_type: row.contract_type.label(),
            offer_url: row.offer_url,
            posting_date: row.posting_date,
            closing_date: row.closing_date,
            resume_file_path: row.resume_file_path,
            cover_letter_file_path: row.cover_letter_file_path,
            status: row.status.label(),
            last_action: row.last_action.label(),
            last_action_date: row.last_action_date,
            next_action: row.next_action.label(),
            next_action_date: row.next_action_date,
            priority: row.priority.label(),
            notes: row.notes,
            min_salary_proposed: row.min_salary_proposed,
            max_salary_proposed: row.max_salary_proposed,
            min_salary_offered: row.min_salary_offered,
            max_salary_offered: row.max_salary_offered,
            currency: row.currency.map(|c| c.label()),
            rejection_reason: row.rejection_reason.map(|r| r.label()),
            key_words: row.key_words,
            interest_level: row.interest_level,
            contact_name: row.contact_name,
            contact_email: row.contact_email,
            is_deleted: row.is_deleted,
        }
    }
}
