//! Filtering, sorting, and pagination over the raw record set.
//!
//! The store hands back every row, deleted ones included; the deletion-scope
//! split, the text search, the status/priority filters, and the paging window
//! are all applied here. Stateless and read-only, so concurrent requests need
//! no coordination.

use serde::Serialize;

use crate::models::application::ApplicationRow;
use crate::query::params::{QueryParameters, SortKey};

/// Which deletion partition a list request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Active,
    Trash,
}

impl Scope {
    fn includes(self, row: &ApplicationRow) -> bool {
        match self {
            Scope::Active => !row.is_deleted,
            Scope::Trash => row.is_deleted,
        }
    }
}

/// One page of results plus the pre-pagination match count.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub total_count: usize,
    pub page_index: usize,
    pub page_size: usize,
}

impl<T> PaginatedResult<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PaginatedResult<U> {
        PaginatedResult {
            items: self.items.into_iter().map(f).collect(),
            total_count: self.total_count,
            page_index: self.page_index,
            page_size: self.page_size,
        }
    }
}

/// Runs the full pipeline: scope split, filters, sort, then the paging window.
/// `total_count` is taken after filtering but before paging.
pub fn list_page(
    rows: Vec<ApplicationRow>,
    scope: Scope,
    params: &QueryParameters,
) -> PaginatedResult<ApplicationRow> {
    let mut matched: Vec<ApplicationRow> = rows
        .into_iter()
        .filter(|row| scope.includes(row) && matches_filters(row, params))
        .collect();

    sort_rows(&mut matched, params.sort_by);

    let total_count = matched.len();
    let skip = params
        .page_index
        .saturating_sub(1)
        .saturating_mul(params.page_size);
    let items: Vec<ApplicationRow> = matched
        .into_iter()
        .skip(skip)
        .take(params.page_size)
        .collect();

    PaginatedResult {
        items,
        total_count,
        page_index: params.page_index,
        page_size: params.page_size,
    }
}

fn matches_filters(row: &ApplicationRow, params: &QueryParameters) -> bool {
    if let Some(search) = &params.search {
        let needle = search.to_lowercase();
        let hit = row.job_title.to_lowercase().contains(&needle)
            || row.company_name.to_lowercase().contains(&needle)
            || row.location.to_lowercase().contains(&needle);
        if !hit {
            return false;
        }
    }

    if !params.statuses.is_empty() && !params.statuses.contains(&row.status) {
        return false;
    }

    if !params.priorities.is_empty() && !params.priorities.contains(&row.priority) {
        return false;
    }

    true
}

/// Ties always break on id so repeated calls page identically.
fn sort_rows(rows: &mut [ApplicationRow], key: SortKey) {
    match key {
        SortKey::NameAsc => rows.sort_by(|a, b| {
            a.job_title
                .to_lowercase()
                .cmp(&b.job_title.to_lowercase())
                .then(a.id.cmp(&b.id))
        }),
        SortKey::NameDesc => rows.sort_by(|a, b| {
            b.job_title
                .to_lowercase()
                .cmp(&a.job_title.to_lowercase())
                .then(a.id.cmp(&b.id))
        }),
        SortKey::DateAsc => {
            rows.sort_by(|a, b| a.application_date.cmp(&b.application_date).then(a.id.cmp(&b.id)))
        }
        SortKey::DateDesc => {
            rows.sort_by(|a, b| b.application_date.cmp(&a.application_date).then(a.id.cmp(&b.id)))
        }
    }
}
