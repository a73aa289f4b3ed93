//! Multipart form parsing for create/update submissions.
//!
//! Text parts are collected by name, then assembled into `ApplicationFields`
//! with per-field parse errors surfaced as `Validation`. The `resume` and
//! `coverLetter` parts are captured as raw bytes for the file store.

use std::collections::HashMap;
use std::str::FromStr;

use axum::extract::Multipart;
use chrono::NaiveDate;

use crate::enums::{
    ActionType, ApplicationStatus, ContractType, Currency, JobSource, Priority, RejectionReason,
};
use crate::errors::AppError;
use crate::models::application::ApplicationFields;
use crate::storage::UploadedFile;

const RESUME_PART: &str = "resume";
const COVER_LETTER_PART: &str = "coverLetter";

#[derive(Debug)]
pub struct ApplicationForm {
    pub fields: ApplicationFields,
    pub resume: Option<UploadedFile>,
    pub cover_letter: Option<UploadedFile>,
}

pub async fn parse_application_form(mut multipart: Multipart) -> Result<ApplicationForm, AppError> {
    let mut texts: HashMap<String, String> = HashMap::new();
    let mut resume = None;
    let mut cover_letter = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart request: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if name == RESUME_PART || name == COVER_LETTER_PART {
            let file = UploadedFile {
                file_name: field.file_name().unwrap_or_default().to_string(),
                content_type: field.content_type().unwrap_or_default().to_string(),
                bytes: field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Could not read '{name}': {e}")))?,
            };
            if name == RESUME_PART {
                resume = Some(file);
            } else {
                cover_letter = Some(file);
            }
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| AppError::Validation(format!("Could not read '{name}': {e}")))?;
            texts.insert(name, value);
        }
    }

    Ok(ApplicationForm {
        fields: build_fields(&texts)?,
        resume,
        cover_letter,
    })
}

/// Assembles the typed field set from the text parts. Absent optional fields
/// and empty strings are treated the same, as HTML forms submit blanks.
fn build_fields(texts: &HashMap<String, String>) -> Result<ApplicationFields, AppError> {
    Ok(ApplicationFields {
        application_date: required_date(texts, "applicationDate")?,
        job_title: required_text(texts, "jobTitle")?,
        job_description: optional_text(texts, "jobDescription"),
        company_name: required_text(texts, "companyName")?,
        location: required_text(texts, "location")?,
        source: required_enum::<JobSource>(texts, "source")?,
        contract_type: required_enum::<ContractType>(texts, "contractType")?,
        offer_url: required_text(texts, "offerUrl")?,
        posting_date: optional_date(texts, "postingDate")?,
        closing_date: optional_date(texts, "closingDate")?,
        status: required_enum::<ApplicationStatus>(texts, "status")?,
        last_action: required_enum::<ActionType>(texts, "lastAction")?,
        last_action_date: required_date(texts, "lastActionDate")?,
        next_action: required_enum::<ActionType>(texts, "nextAction")?,
        next_action_date: optional_date(texts, "nextActionDate")?,
        priority: optional_enum::<Priority>(texts, "priority")?.unwrap_or(Priority::Medium),
        notes: optional_text(texts, "notes"),
        min_salary_proposed: optional_number(texts, "minSalaryProposed")?,
        max_salary_proposed: optional_number(texts, "maxSalaryProposed")?,
        min_salary_offered: optional_number(texts, "minSalaryOffered")?,
        max_salary_offered: optional_number(texts, "maxSalaryOffered")?,
        currency: optional_enum::<Currency>(texts, "currency")?,
        rejection_reason: optional_enum::<RejectionReason>(texts, "rejectionReason")?,
        key_words: optional_text(texts, "keyWords"),
        interest_level: optional_integer(texts, "interestLevel")?.unwrap_or(0),
        contact_name: optional_text(texts, "contactName"),
        contact_email: optional_text(texts, "contactEmail"),
    })
}

fn present<'a>(texts: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    texts
        .get(key)
        .map(String::as_str)
        .filter(|v| !v.trim().is_empty())
}

fn required_text(texts: &HashMap<String, String>, key: &str) -> Result<String, AppError> {
    present(texts, key)
        .map(str::to_string)
        .ok_or_else(|| AppError::Validation(format!("'{key}' is required.")))
}

fn optional_text(texts: &HashMap<String, String>, key: &str) -> Option<String> {
    present(texts, key).map(str::to_string)
}

fn parse_date(value: &str, key: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("'{key}' is not a valid date.")))
}

fn required_date(texts: &HashMap<String, String>, key: &str) -> Result<NaiveDate, AppError> {
    parse_date(&required_text(texts, key)?, key)
}

fn optional_date(texts: &HashMap<String, String>, key: &str) -> Result<Option<NaiveDate>, AppError> {
    present(texts, key).map(|v| parse_date(v, key)).transpose()
}

fn required_enum<T>(texts: &HashMap<String, String>, key: &str) -> Result<T, AppError>
where
    T: FromStr<Err = String>,
{
    required_text(texts, key)?
        .parse::<T>()
        .map_err(AppError::Validation)
}

fn optional_enum<T>(texts: &HashMap<String, String>, key: &str) -> Result<Option<T>, AppError>
where
    T: FromStr<Err = String>,
{
    present(texts, key)
        .map(|v| v.parse::<T>().map_err(AppError::Validation))
        .transpose()
}

fn optional_number(texts: &HashMap<String, String>, key: &str) -> Result<Option<f64>, AppError> {
    present(texts, key)
        .map(|v| {
            v.trim()
                .parse::<f64>()
                .map_err(|_| AppError::Validation(format!("'{key}' is not a valid number.")))
        })
        .transpose()
}

fn optional_integer(texts: &HashMap<String, String>, key: &str) -> Result<Option<i32>, AppError> {
    present(texts, key)
        .map(|v| {
            v.trim()
                .parse::<i32>()
                .map_err(|_| AppError::Validation(format!("'{key}' is not a valid integer.")))
        })
        .transpose()
}
