use std::str::FromStr;

use serde::Deserialize;

use crate::enums::{ApplicationStatus, Priority};
use crate::errors::AppError;

pub const DEFAULT_PAGE_INDEX: usize = 1;
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Sort order for list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    NameAsc,
    NameDesc,
    DateAsc,
    #[default]
    DateDesc,
}

impl SortKey {
    /// Unknown or absent keys fall back to newest-first rather than erroring;
    /// the sort key is a presentation hint, not a filter.
    pub fn parse(raw: Option<&str>) -> SortKey {
        match raw.map(str::trim) {
            Some(s) if s.eq_ignore_ascii_case("name-asc") => SortKey::NameAsc,
            Some(s) if s.eq_ignore_ascii_case("name-desc") => SortKey::NameDesc,
            Some(s) if s.eq_ignore_ascii_case("date-asc") => SortKey::DateAsc,
            _ => SortKey::DateDesc,
        }
    }
}

/// Raw query string of the list endpoints, as Axum deserializes it.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub page_index: Option<usize>,
    pub page_size: Option<usize>,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    /// Comma-separated `ApplicationStatus` tokens.
    pub statuses: Option<String>,
    /// Comma-separated `Priority` tokens.
    pub priorities: Option<String>,
}

/// Validated list parameters consumed by the query engine.
#[derive(Debug, Clone, Default)]
pub struct QueryParameters {
    pub page_index: usize,
    pub page_size: usize,
    pub search: Option<String>,
    pub sort_by: SortKey,
    /// Empty means "no status restriction".
    pub statuses: Vec<ApplicationStatus>,
    /// Empty means "no priority restriction".
    pub priorities: Vec<Priority>,
}

impl TryFrom<ListQuery> for QueryParameters {
    type Error = AppError;

    fn try_from(raw: ListQuery) -> Result<Self, Self::Error> {
        Ok(QueryParameters {
            // A zero page index would be meaningless; clamp to the first page.
            page_index: raw.page_index.unwrap_or(DEFAULT_PAGE_INDEX).max(1),
            page_size: raw.page_size.unwrap_or(DEFAULT_PAGE_SIZE).max(1),
            search: raw.search.filter(|s| !s.trim().is_empty()),
            sort_by: SortKey::parse(raw.sort_by.as_deref()),
            statuses: parse_tokens(raw.statuses.as_deref())?,
            priorities: parse_tokens(raw.priorities.as_deref())?,
        })
    }
}

/// Splits a comma-separated filter list into enum members. Unknown tokens are
/// rejected with a validation error instead of silently degrading to a
/// default member.
fn parse_tokens<T>(raw: Option<&str>) -> Result<Vec<T>, AppError>
where
    T: FromStr<Err = String>,
{
    let Some(raw) = raw else {
        return Ok(Vec::new());
    };

    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| token.parse::<T>().map_err(AppError::Validation))
        .collect()
}
