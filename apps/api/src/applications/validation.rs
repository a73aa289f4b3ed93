//! Field-rule validation for create/update submissions.
//!
//! Enum membership is already guaranteed by the parse stage, so the rules
//! here cover the textual, temporal, and numeric constraints. Failures are
//! collected and joined into a single `Validation` error message.

use chrono::NaiveDate;

use crate::errors::AppError;
use crate::models::application::ApplicationFields;

const MAX_NAME_LEN: usize = 100;
const MAX_NOTES_LEN: usize = 500;
const MAX_KEYWORDS_LEN: usize = 300;

pub fn validate_fields(fields: &ApplicationFields, today: NaiveDate) -> Result<(), AppError> {
    let mut errors: Vec<String> = Vec::new();

    if fields.application_date > today {
        errors.push("Application date must be today or in the past.".to_string());
    }

    check_required_name(&mut errors, &fields.job_title, "Job title");
    check_required_name(&mut errors, &fields.company_name, "Company name");
    check_required_name(&mut errors, &fields.location, "Location");

    if fields.offer_url.trim().is_empty() {
        errors.push("Offer URL is required.".to_string());
    } else if !is_valid_url(&fields.offer_url) {
        errors.push("Offer URL is not valid.".to_string());
    }

    check_salary_pair(
        &mut errors,
        fields.min_salary_proposed,
        fields.max_salary_proposed,
        "proposed",
    );
    check_salary_pair(
        &mut errors,
        fields.min_salary_offered,
        fields.max_salary_offered,
        "offered",
    );

    let any_salary = fields.min_salary_proposed.is_some()
        || fields.max_salary_proposed.is_some()
        || fields.min_salary_offered.is_some()
        || fields.max_salary_offered.is_some();
    if any_salary && fields.currency.is_none() {
        errors.push("Currency is required if salary is provided.".to_string());
    }

    if fields.interest_level > 0 && !(1..=5).contains(&fields.interest_level) {
        errors.push("Interest level must be between 1 and 5.".to_string());
    }

    if let Some(notes) = &fields.notes {
        if notes.chars().count() > MAX_NOTES_LEN {
            errors.push("Notes must not exceed 500 characters.".to_string());
        }
    }
    if let Some(key_words) = &fields.key_words {
        if key_words.chars().count() > MAX_KEYWORDS_LEN {
            errors.push("Keywords must not exceed 300 characters.".to_string());
        }
    }
    if let Some(contact_name) = &fields.contact_name {
        if contact_name.chars().count() > MAX_NAME_LEN {
            errors.push("Contact name must not exceed 100 characters.".to_string());
        }
    }
    if let Some(contact_email) = &fields.contact_email {
        if !is_valid_email(contact_email) {
            errors.push("Contact email is not valid.".to_string());
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(errors.join(" ")))
    }
}

fn check_required_name(errors: &mut Vec<String>, value: &str, label: &str) {
    if value.trim().is_empty() {
        errors.push(format!("{label} is required."));
    } else if value.chars().count() > MAX_NAME_LEN {
        errors.push(format!("{label} must not exceed 100 characters."));
    }
}

fn is_valid_url(url: &str) -> bool {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"));
    matches!(rest, Some(rest) if !rest.is_empty() && !url.contains(char::is_whitespace))
}

fn is_valid_email(email: &str) -> bool {
    let mut parts = email.split('@');
    matches!(
        (parts.next(), parts.next(), parts.next()),
        (Some(local), Some(domain), None)
            if !local.is_empty() && !domain.is_empty() && !email.contains(char::is_whitespace)
    )
}

fn check_salary_pair(errors: &mut Vec<String>, min: Option<f64>, max: Option<f64>, kind: &str) {
    match (min, max) {
        (None, Some(_)) => errors.push(format!(
            "Minimum salary {kind} must be provided if maximum salary {kind} is provided."
        )),
        (Some(_), None) => errors.push(format!(
            "Maximum salary {kind} must be provided if minimum salary {kind} is provided."
        )),
        (Some(min), Some(max)) => {
            if min <= 0.0 {
                errors.push(format!("Minimum salary {kind} must be greater than 0."));
            }
            if max < min {
                errors.push(format!(
                    "Maximum salary {kind} must be greater than or equal to minimum salary {kind}."
                ));
            }
        }
        (None, None) => {}
    }
}
