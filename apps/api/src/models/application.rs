use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::enums::{
    ActionType, ApplicationStatus, ContractType, Currency, JobSource, Priority, RejectionReason,
};

/// One job-application record as stored. Soft deletion keeps the row and flips
/// `is_deleted`; only the explicit hard-delete entry point removes it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ApplicationRow {
    pub id: i32,
    pub application_date: NaiveDate,
    /// Set at most once, the first time status enters the response category.
    pub first_response_date: Option<NaiveDate>,
    pub job_title: String,
    pub job_description: Option<String>,
    pub company_name: String,
    pub location: String,
    pub source: JobSource,
    pub contract_type: ContractType,
    pub offer_url: String,
    pub posting_date: Option<NaiveDate>,
    pub closing_date: Option<NaiveDate>,
    pub resume_file_path: String,
    pub cover_letter_file_path: Option<String>,
    pub status: ApplicationStatus,
    pub last_action: ActionType,
    pub last_action_date: NaiveDate,
    pub next_action: ActionType,
    pub next_action_date: Option<NaiveDate>,
    pub priority: Priority,
    pub notes: Option<String>,
    pub min_salary_proposed: Option<f64>,
    pub max_salary_proposed: Option<f64>,
    pub min_salary_offered: Option<f64>,
    pub max_salary_offered: Option<f64>,
    pub currency: Option<Currency>,
    pub rejection_reason: Option<RejectionReason>,
    pub key_words: Option<String>,
    pub interest_level: i32,
    pub contact_name: Option<String>,
    pub contact_email: Option<String>,
    pub is_deleted: bool,
}

/// Field set shared by create and update submissions, after form parsing and
/// before validation. File parts are carried separately.
#[derive(Debug, Clone)]
pub struct ApplicationFields {
    pub application_date: NaiveDate,
    pub job_title: String,
    pub job_description: Option<String>,
    pub company_name: String,
    pub location: String,
    pub source: JobSource,
    pub contract_type: ContractType,
    pub offer_url: String,
    pub posting_date: Option<NaiveDate>,
    pub closing_date: Option<NaiveDate>,
    pub status: ApplicationStatus,
    pub last_action: ActionType,
    pub last_action_date: NaiveDate,
    pub next_action: ActionType,
    pub next_action_date: Option<NaiveDate>,
    pub priority: Priority,
    pub notes: Option<String>,
    pub min_salary_proposed: Option<f64>,
    pub max_salary_proposed: Option<f64>,
    pub min_salary_offered: Option<f64>,
    pub max_salary_offered: Option<f64>,
    pub currency: Option<Currency>,
    pub rejection_reason: Option<RejectionReason>,
    pub key_words: Option<String>,
    pub interest_level: i32,
    pub contact_name: Option<String>,
    pub contact_email: Option<String>,
}

impl ApplicationRow {
    /// Copies every updatable field from a validated submission, leaving
    /// identity, file paths, first-response date, and the deletion flag alone.
    pub fn apply_fields(&mut self, fields: &ApplicationFields) {
        self.application_date = fields.application_date;
        self.job_title = fields.job_title.clone();
        self.job_description = fields.job_description.clone();
        self.company_name = fields.company_name.clone();
        self.location = fields.location.clone();
        self.source = fields.source;
        self.contract_type = fields.contract_type;
        self.offer_url = fields.offer_url.clone();
        self.posting_date = fields.posting_date;
        self.closing_date = fields.closing_date;
        self.status = fields.status;
        self.last_action = fields.last_action;
        self.last_action_date = fields.last_action_date;
        self.next_action = fields.next_action;
        self.next_action_date = fields.next_action_date;
        self.priority = fields.priority;
        self.notes = fields.notes.clone();
        self.min_salary_proposed = fields.min_salary_proposed;
        self.max_salary_proposed = fields.max_salary_proposed;
        self.min_salary_offered = fields.min_salary_offered;
        self.max_salary_offered = fields.max_salary_offered;
        self.currency = fields.currency;
        self.rejection_reason = fields.rejection_reason;
        self.key_words = fields.key_words.clone();
        self.interest_level = fields.interest_level;
        self.contact_name = fields.contact_name.clone();
        self.contact_email = fields.contact_email.clone();
    }
}

/// Insert payload: validated fields plus the stored file paths.
#[derive(Debug, Clone)]
pub struct NewApplication {
    pub fields: ApplicationFields,
    pub resume_file_path: String,
    pub cover_letter_file_path: Option<String>,
}
