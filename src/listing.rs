//! Generic filtered/sorted/paginated list-query engine.
//!
//! Both listing pages (events and users) follow the same shape: turn the
//! recognized query parameters into a `WHERE` clause with bound values, pick
//! an `ORDER BY` column from an allow-list, then run a COUNT query and a page
//! query against the table. This module holds the table-agnostic part; the
//! per-table [`RowStore`] implementations live in the repository layer.
//!
//! Invalid input never produces an error here: unrecognized parameters,
//! empty values, the `all` sentinel and unparseable flag values are all
//! treated as "filter absent", and an out-of-range sort request falls back to
//! the default column.

use diesel::query_builder::{BoxedSqlQuery, SqlQuery};
use diesel::sqlite::Sqlite;
use serde::Serialize;

use crate::repository::errors::RepositoryResult;

/// Reserved filter value meaning "no filter".
const ALL_SENTINEL: &str = "all";

/// How a filter value is bound into the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindType {
    Text,
    Integer,
}

/// Where a recognized query parameter lands in the `WHERE` clause.
#[derive(Debug)]
pub enum FilterTarget {
    /// Grouped `(a LIKE ? OR b LIKE ?)` over one or more columns, with the
    /// `%value%` pattern bound once per column.
    Like { columns: &'static [&'static str] },
    /// `column = ?` with the value bound as `bind`. When `allowed` is set the
    /// raw value must be one of the listed literals.
    Exact {
        column: &'static str,
        bind: BindType,
        allowed: Option<&'static [&'static str]>,
    },
}

/// Static description of one recognized filter parameter of a listing.
#[derive(Debug)]
pub struct FilterField {
    pub param: &'static str,
    pub target: FilterTarget,
}

impl FilterField {
    /// Substring search across the given columns.
    pub const fn like(param: &'static str, columns: &'static [&'static str]) -> Self {
        Self {
            param,
            target: FilterTarget::Like { columns },
        }
    }

    /// Equality filter on a text column, any non-empty value accepted.
    pub const fn text(param: &'static str, column: &'static str) -> Self {
        Self {
            param,
            target: FilterTarget::Exact {
                column,
                bind: BindType::Text,
                allowed: None,
            },
        }
    }

    /// Boolean-like filter accepting only the literals `0` and `1`.
    pub const fn flag(param: &'static str, column: &'static str) -> Self {
        Self {
            param,
            target: FilterTarget::Exact {
                column,
                bind: BindType::Integer,
                allowed: Some(&["0", "1"]),
            },
        }
    }
}

/// A value bound into a prepared statement, never interpolated.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundValue {
    Text(String),
    Integer(i64),
}

/// Read access to the raw request query parameters.
pub trait ParamSource {
    fn param(&self, name: &str) -> Option<&str>;
}

impl ParamSource for std::collections::HashMap<String, String> {
    fn param(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

/// Assembled `WHERE` clause: fragment text, bind values in placeholder order
/// and the accepted raw parameters (used to rebuild pagination/sort links).
#[derive(Debug, Default)]
pub struct WhereClause {
    fragments: Vec<String>,
    binds: Vec<BoundValue>,
    active: Vec<(&'static str, String)>,
}

impl WhereClause {
    /// SQL text to append after the table name: empty when no filter is
    /// active, otherwise ` WHERE a AND b`.
    pub fn sql(&self) -> String {
        if self.fragments.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.fragments.join(" AND "))
        }
    }

    pub fn binds(&self) -> &[BoundValue] {
        &self.binds
    }

    /// Accepted `(param, raw value)` pairs in field declaration order.
    pub fn active(&self) -> &[(&'static str, String)] {
        &self.active
    }
}

/// Builds the `WHERE` clause from the recognized fields and the request
/// parameters. Values are inspected in field declaration order so the bind
/// order always matches the placeholder order of the produced fragments.
pub fn build_filters(fields: &[FilterField], params: &impl ParamSource) -> WhereClause {
    let mut clause = WhereClause::default();

    for field in fields {
        let Some(raw) = params.param(field.param) else {
            continue;
        };
        let raw = raw.trim();
        if raw.is_empty() || raw == ALL_SENTINEL {
            continue;
        }

        match &field.target {
            FilterTarget::Like { columns } => {
                let fragment = columns
                    .iter()
                    .map(|c| format!("{c} LIKE ?"))
                    .collect::<Vec<_>>()
                    .join(" OR ");
                clause.fragments.push(format!("({fragment})"));
                let pattern = format!("%{raw}%");
                for _ in columns.iter() {
                    clause.binds.push(BoundValue::Text(pattern.clone()));
                }
            }
            FilterTarget::Exact {
                column,
                bind,
                allowed,
            } => {
                if let Some(allowed) = allowed
                    && !allowed.contains(&raw)
                {
                    continue;
                }
                let value = match bind {
                    BindType::Text => BoundValue::Text(raw.to_string()),
                    BindType::Integer => match raw.parse::<i64>() {
                        Ok(v) => BoundValue::Integer(v),
                        Err(_) => continue,
                    },
                };
                clause.fragments.push(format!("{column} = ?"));
                clause.binds.push(value);
            }
        }

        clause.active.push((field.param, raw.to_string()));
    }

    clause
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_sql(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

/// Resolved sort column and direction.
///
/// `field` is always a member of the allow-list passed to [`SortSpec::resolve`],
/// which is what makes it safe to interpolate into `ORDER BY`; free-form user
/// input can never reach it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SortSpec {
    pub field: &'static str,
    pub order: SortOrder,
}

impl SortSpec {
    /// Whitelists a requested field/direction pair. Field membership is
    /// case-sensitive; direction matching is case-insensitive. Anything
    /// invalid silently falls back to `default_field` / ascending.
    pub fn resolve(
        requested_field: Option<&str>,
        requested_order: Option<&str>,
        allowed_fields: &'static [&'static str],
        default_field: &'static str,
    ) -> Self {
        let field = requested_field
            .and_then(|f| allowed_fields.iter().find(|a| **a == f))
            .copied()
            .unwrap_or(default_field);

        let order = match requested_order.map(str::to_ascii_lowercase).as_deref() {
            Some("desc") => SortOrder::Desc,
            Some("asc") => SortOrder::Asc,
            _ => SortOrder::Asc,
        };

        Self { field, order }
    }
}

/// Requested page of a listing. Page numbers are 1-based; zero, negative or
/// missing values collapse to the first page.
#[derive(Debug, Clone, Copy)]
pub struct PageRequest {
    pub page: usize,
    pub per_page: usize,
}

impl PageRequest {
    pub fn new(page: Option<usize>, per_page: usize) -> Self {
        Self {
            page: page.filter(|p| *p > 0).unwrap_or(1),
            per_page,
        }
    }

    pub fn offset(&self) -> i64 {
        let rows_before = self.page.saturating_sub(1).saturating_mul(self.per_page);
        i64::try_from(rows_before).unwrap_or(i64::MAX)
    }
}

/// One page of rows plus the counts needed to render a pager.
#[derive(Debug)]
pub struct ListPage<R> {
    pub rows: Vec<R>,
    pub total: usize,
    pub page: usize,
    pub last_page: usize,
}

/// Parameterized read access to one table. Implementations run raw
/// `sql_query` statements so the dynamically assembled clause text stays
/// separate from the bound values.
pub trait RowStore {
    type Row;

    fn count(&self, clause: &WhereClause) -> RepositoryResult<i64>;

    fn select(
        &self,
        clause: &WhereClause,
        sort: &SortSpec,
        limit: i64,
        offset: i64,
    ) -> RepositoryResult<Vec<Self::Row>>;
}

/// Runs the COUNT query and the page query of one listing request.
///
/// Both queries use the same clause so they are logically consistent; they do
/// not share a transaction, a row inserted between the two calls only shifts
/// pagination cosmetics. An offset past the last row yields an empty page,
/// not an error. Store errors propagate unchanged; there is no retry.
pub fn fetch_page<S: RowStore>(
    store: &S,
    clause: &WhereClause,
    sort: &SortSpec,
    page: PageRequest,
) -> RepositoryResult<ListPage<S::Row>> {
    let total = store.count(clause)?;
    let total = usize::try_from(total).unwrap_or(0);
    let last_page = total.div_ceil(page.per_page.max(1));

    let rows = store.select(clause, sort, page.per_page as i64, page.offset())?;

    Ok(ListPage {
        rows,
        total,
        page: page.page,
        last_page,
    })
}

/// COUNT statement for a table and clause, aliased for [`CountRow`].
pub fn count_sql(table: &str, clause: &WhereClause) -> String {
    format!("SELECT COUNT(*) AS count FROM {table}{}", clause.sql())
}

/// Page SELECT statement. The sort column comes from an allow-list (see
/// [`SortSpec::resolve`]); everything user-supplied is bound.
pub fn select_sql(columns: &str, table: &str, clause: &WhereClause, sort: &SortSpec) -> String {
    format!(
        "SELECT {columns} FROM {table}{} ORDER BY {} {} LIMIT ? OFFSET ?",
        clause.sql(),
        sort.field,
        sort.order.as_sql()
    )
}

/// Appends the clause binds to a boxed `sql_query`.
pub fn bind_clause<'q>(
    mut query: BoxedSqlQuery<'q, Sqlite, SqlQuery>,
    clause: &WhereClause,
) -> BoxedSqlQuery<'q, Sqlite, SqlQuery> {
    for bind in clause.binds() {
        query = match bind {
            BoundValue::Text(s) => query.bind::<diesel::sql_types::Text, _>(s.clone()),
            BoundValue::Integer(i) => query.bind::<diesel::sql_types::BigInt, _>(*i),
        };
    }
    query
}

#[derive(diesel::QueryableByName)]
pub struct CountRow {
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    pub count: i64,
}
