// Materialized view model

use crate::ast::expr::Expression;
use crate::ast::select::SelectBody;
use crate::ast::table::{Partition, TableOptions};
use crate::ast::RelationFactor;

#[derive(Debug, Clone, PartialEq)]
pub struct CreateMaterializedView {
    pub relation: RelationFactor,
    pub view_options: MaterializedViewOptions,
    pub table_options: Option<TableOptions>,
    pub partition: Option<Partition>,
    pub as_query: SelectBody,
}

/// Materialized view option bag. Query-rewrite and on-query-computation are
/// recorded exactly as stated, in any order and any polarity; all four
/// combinations are accepted as pure structural capture.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MaterializedViewOptions {
    pub refresh: Option<MaterializedViewRefreshOpts>,
    pub enable_query_rewrite: Option<bool>,
    pub enable_on_query_computation: Option<bool>,
}

/// Refresh clause. `NEVER REFRESH` gates the rest: start/next and the
/// on-clause are never populated for it.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterializedViewRefreshOpts {
    pub method: RefreshMethod,
    pub start_with: Option<Expression>,
    pub next: Option<Expression>,
    pub on_clause: Option<RefreshOn>,
}

impl MaterializedViewRefreshOpts {
    pub fn new(method: RefreshMethod) -> Self {
        Self {
            method,
            start_with: None,
            next: None,
            on_clause: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshMethod {
    Complete,
    Fast,
    Force,
    Never,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOn {
    Demand,
    Commit,
    Statement,
}
