//! Dashboard aggregation over the non-deleted record set.
//!
//! Pure and read-only: takes the raw rows plus an optional inclusive
//! `[start, end]` window on application date and reduces them to a stats
//! snapshot. Empty scopes degrade to zeros and empty collections, never to
//! errors.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::enums::Priority;
use crate::models::application::ApplicationRow;

const TOP_GROUP_LIMIT: usize = 5;
const UPCOMING_ACTION_LIMIT: usize = 5;
const RECENT_APPLICATION_LIMIT: usize = 5;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_applications: usize,
    pub applications_in_progress: usize,
    /// Percentage with two decimals; 0.0 on an empty scope.
    pub response_rate: f64,
    /// Mean days from application to first response, two decimals; 0.0 when
    /// no record has responded.
    pub average_response_time: f64,
    pub status_distribution: BTreeMap<&'static str, usize>,
    pub source_distribution: BTreeMap<&'static str, usize>,
    pub contract_type_distribution: BTreeMap<&'static str, usize>,
    /// Always carries all four priority levels, zero-filled.
    pub priority_distribution: BTreeMap<&'static str, usize>,
    /// Chronological month buckets, zero-filled across the window. A JSON
    /// object would not preserve month order, hence the array shape.
    pub monthly_distribution: Vec<MonthlyCount>,
    pub top_enterprises: Vec<GroupCount>,
    pub top_locations: Vec<GroupCount>,
    pub upcoming_actions: Vec<UpcomingAction>,
    pub recent_applications: Vec<RecentApplication>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyCount {
    pub month: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupCount {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingAction {
    pub id: i32,
    pub job_title: String,
    pub company_name: String,
    pub next_action: &'static str,
    pub next_action_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentApplication {
    pub id: i32,
    pub application_date: NaiveDate,
    pub company_name: String,
    pub job_title: String,
    pub status: &'static str,
}

/// Computes the full stats snapshot. Deleted rows are excluded here, and the
/// optional window is inclusive on both ends.
pub fn compute_dashboard(
    rows: &[ApplicationRow],
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
) -> DashboardStats {
    let scope: Vec<&ApplicationRow> = rows
        .iter()
        .filter(|row| !row.is_deleted)
        .filter(|row| start_date.map_or(true, |s| row.application_date >= s))
        .filter(|row| end_date.map_or(true, |e| row.application_date <= e))
        .collect();

    let total = scope.len();
    let in_progress = scope.iter().filter(|r| r.status.is_in_progress()).count();
    let responded = scope.iter().filter(|r| r.status.is_response()).count();

    let response_rate = if total == 0 {
        0.0
    } else {
        round2(responded as f64 / total as f64 * 100.0)
    };

    DashboardStats {
        total_applications: total,
        applications_in_progress: in_progress,
        response_rate,
        average_response_time: average_response_time(&scope),
        status_distribution: distribution(&scope, |r| r.status.label()),
        source_distribution: distribution(&scope, |r| r.source.label()),
        contract_type_distribution: distribution(&scope, |r| r.contract_type.label()),
        priority_distribution: priority_distribution(&scope),
        monthly_distribution: monthly_distribution(&scope, start_date, end_date),
        top_enterprises: top_groups(&scope, |r| r.company_name.as_str()),
        top_locations: top_groups(&scope, |r| r.location.as_str()),
        upcoming_actions: upcoming_actions(&scope),
        recent_applications: recent_applications(&scope),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn average_response_time(scope: &[&ApplicationRow]) -> f64 {
    let days: Vec<f64> = scope
        .iter()
        .filter_map(|r| {
            r.first_response_date
                .map(|resp| (resp - r.application_date).num_days() as f64)
        })
        .collect();

    if days.is_empty() {
        0.0
    } else {
        round2(days.iter().sum::<f64>() / days.len() as f64)
    }
}

/// Counts by label, covering only labels actually present.
fn distribution(
    scope: &[&ApplicationRow],
    label_of: impl Fn(&ApplicationRow) -> &'static str,
) -> BTreeMap<&'static str, usize> {
    let mut counts = BTreeMap::new();
    for row in scope {
        *counts.entry(label_of(row)).or_insert(0) += 1;
    }
    counts
}

/// Unlike the other distributions, every priority level is present even when
/// the data has none of it.
fn priority_distribution(scope: &[&ApplicationRow]) -> BTreeMap<&'static str, usize> {
    let mut counts: BTreeMap<&'static str, usize> =
        Priority::ALL.iter().map(|p| (p.label(), 0)).collect();
    for row in scope {
        *counts.entry(row.priority.label()).or_insert(0) += 1;
    }
    counts
}

fn month_label(year: i32, month: u32) -> String {
    // Unwrap is fine: month stays in 1..=12 and day 1 always exists.
    NaiveDate::from_ymd_opt(year, month, 1)
        .unwrap()
        .format("%b %y")
        .to_string()
}

/// Zero-filled month buckets over the requested window, or over the observed
/// min-max application-date range when a bound is absent. Empty scope yields
/// an empty sequence.
fn monthly_distribution(
    scope: &[&ApplicationRow],
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
) -> Vec<MonthlyCount> {
    if scope.is_empty() {
        return Vec::new();
    }

    let first = start_date
        .or_else(|| scope.iter().map(|r| r.application_date).min())
        .expect("non-empty scope has a minimum date");
    let last = end_date
        .or_else(|| scope.iter().map(|r| r.application_date).max())
        .expect("non-empty scope has a maximum date");

    let mut buckets = Vec::new();
    let (mut year, mut month) = (first.year(), first.month());
    loop {
        let count = scope
            .iter()
            .filter(|r| r.application_date.year() == year && r.application_date.month() == month)
            .count();
        buckets.push(MonthlyCount {
            month: month_label(year, month),
            count,
        });

        if (year, month) == (last.year(), last.month()) {
            break;
        }
        month += 1;
        if month > 12 {
            month = 1;
            year += 1;
        }
    }
    buckets
}

/// Top groups by descending count. Grouping preserves first-seen order and
/// the sort is stable, so ties resolve deterministically.
fn top_groups(
    scope: &[&ApplicationRow],
    group_of: impl Fn(&ApplicationRow) -> &str,
) -> Vec<GroupCount> {
    let mut groups: Vec<GroupCount> = Vec::new();
    for row in scope {
        let name = group_of(row);
        match groups.iter_mut().find(|g| g.name == name) {
            Some(group) => group.count += 1,
            None => groups.push(GroupCount {
                name: name.to_string(),
                count: 1,
            }),
        }
    }
    groups.sort_by(|a, b| b.count.cmp(&a.count));
    groups.truncate(TOP_GROUP_LIMIT);
    groups
}

fn upcoming_actions(scope: &[&ApplicationRow]) -> Vec<UpcomingAction> {
    let mut dated: Vec<&&ApplicationRow> = scope
        .iter()
        .filter(|r| r.next_action_date.is_some())
        .collect();
    dated.sort_by(|a, b| b.next_action_date.cmp(&a.next_action_date).then(a.id.cmp(&b.id)));

    dated
        .into_iter()
        .take(UPCOMING_ACTION_LIMIT)
        .map(|r| UpcomingAction {
            id: r.id,
            job_title: r.job_title.clone(),
            company_name: r.company_name.clone(),
            next_action: r.next_action.label(),
            next_action_date: r.next_action_date.expect("filtered on Some"),
        })
        .collect()
}

fn recent_applications(scope: &[&ApplicationRow]) -> Vec<RecentApplication> {
    let mut rows: Vec<&&ApplicationRow> = scope.iter().collect();
    rows.sort_by(|a, b| b.application_date.cmp(&a.application_date).then(b.id.cmp(&a.id)));

    rows.into_iter()
        .take(RECENT_APPLICATION_LIMIT)
        .map(|r| RecentApplication {
            id: r.id,
            application_date: r.application_date,
            company_name: r.company_name.clone(),
            job_title: r.job_title.clone(),
            status: r.status.label(),
        })
        .collect()
}
