//! Enum catalog endpoints: each closed enumeration as `[{id, name}]` rows so
//! clients can render pickers without hardcoding ordinals.

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

use crate::enums::{
    ActionType, ApplicationStatus, ContractType, Currency, EnumItem, JobSource, Priority,
    RejectionReason,
};
use crate::state::AppState;

pub fn enum_routes() -> Router<AppState> {
    Router::new()
        .route("/api/enums/action-types", get(action_types))
        .route("/api/enums/application-statuses", get(application_statuses))
        .route("/api/enums/contract-types", get(contract_types))
        .route("/api/enums/currencies", get(currencies))
        .route("/api/enums/job-sources", get(job_sources))
        .route("/api/enums/priorities", get(priorities))
        .route("/api/enums/rejection-reasons", get(rejection_reasons))
        .route("/api/enums/all", get(all_enums))
}

async fn action_types() -> Json<Vec<EnumItem>> {
    Json(ActionType::catalog())
}

async fn application_statuses() -> Json<Vec<EnumItem>> {
    Json(ApplicationStatus::catalog())
}

async fn contract_types() -> Json<Vec<EnumItem>> {
    Json(ContractType::catalog())
}

async fn currencies() -> Json<Vec<EnumItem>> {
    Json(Currency::catalog())
}

async fn job_sources() -> Json<Vec<EnumItem>> {
    Json(JobSource::catalog())
}

async fn priorities() -> Json<Vec<EnumItem>> {
    Json(Priority::catalog())
}

async fn rejection_reasons() -> Json<Vec<EnumItem>> {
    Json(RejectionReason::catalog())
}

async fn all_enums() -> Json<Value> {
    Json(json!({
        "actionTypes": ActionType::catalog(),
        "applicationStatuses": ApplicationStatus::catalog(),
        "contractTypes": ContractType::catalog(),
        "currencies": Currency::catalog(),
        "jobSources": JobSource::catalog(),
        "priorities": Priority::catalog(),
        "rejectionReasons": RejectionReason::catalog(),
    }))
}
