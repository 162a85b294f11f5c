//! Listing query construction for GET /v1/forms
//!
//! Translates the optional filters, sort, and pagination of a listing
//! request into a bounded, fully parameterized query plan. Caller-supplied
//! values only ever appear as bind parameters; column names in the SQL text
//! come from fixed whitelists.

use serde::Deserialize;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

/// Columns that accept a case-insensitive substring filter
const FILTER_COLUMNS: [&str; 4] = ["question", "answer", "urgency", "status"];

/// Columns whose sort replaces the default urgency-rank ordering
const SORTABLE_COLUMNS: [&str; 4] = ["question", "answer", "status", "created_at"];

/// Ranks urgency high, medium, low, then anything else or absent
const URGENCY_RANK: &str =
    "CASE urgency WHEN 'high' THEN 1 WHEN 'medium' THEN 2 WHEN 'low' THEN 3 ELSE 4 END";

/// Query parameters accepted by the listing endpoint
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub question: Option<String>,
    pub answer: Option<String>,
    pub urgency: Option<String>,
    pub status: Option<String>,
    pub sort: Option<String>,
    pub direction: Option<String>,
}

/// A deterministic, injection-safe listing query
///
/// `binds` holds the filter values in predicate order; the executor binds
/// them first, then `limit`, then `offset`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPlan {
    pub sql: String,
    pub binds: Vec<String>,
    pub page: i64,
    pub limit: i64,
    pub offset: i64,
}

/// Build the query plan for a listing request
pub fn build_plan(params: &ListParams) -> QueryPlan {
    let mut page = params.page.unwrap_or(DEFAULT_PAGE);
    if page < 1 {
        page = DEFAULT_PAGE;
    }

    let mut limit = params.limit.unwrap_or(DEFAULT_LIMIT);
    if !(1..=MAX_LIMIT).contains(&limit) {
        limit = DEFAULT_LIMIT;
    }

    let offset = (page - 1) * limit;

    let mut predicates = Vec::new();
    let mut binds = Vec::new();
    let values = [
        &params.question,
        &params.answer,
        &params.urgency,
        &params.status,
    ];
    for (column, value) in FILTER_COLUMNS.iter().zip(values) {
        if let Some(value) = value {
            if !value.is_empty() {
                predicates.push(format!("{} LIKE ?", column));
                binds.push(format!("%{}%", value));
            }
        }
    }

    let where_clause = if predicates.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", predicates.join(" AND "))
    };

    let direction = match params.direction.as_deref() {
        Some(d) if d.eq_ignore_ascii_case("asc") => "ASC",
        _ => "DESC",
    };

    // Default: urgency rank ascending (high first, absent/unknown last).
    // sort=urgency keeps the rank expression and applies the direction to it;
    // a whitelisted column sort replaces the ordering entirely. Anything else
    // leaves the default untouched.
    let mut order_clause = format!(" ORDER BY {}", URGENCY_RANK);
    if let Some(sort) = params.sort.as_deref() {
        if sort == "urgency" {
            order_clause = format!(" ORDER BY {} {}", URGENCY_RANK, direction);
        } else if SORTABLE_COLUMNS.contains(&sort) {
            order_clause = format!(" ORDER BY {} {}", sort, direction);
        }
    }

    let sql = format!(
        "SELECT id, question, answer, urgency, status, created_at, updated_at FROM forms{}{} LIMIT ? OFFSET ?",
        where_clause, order_clause
    );

    QueryPlan {
        sql,
        binds,
        page,
        limit,
        offset,
    }
}
