// Materialized view adaptation (MySQL mode only)

use crate::adapter::mysql::expr::ExpressionFactory;
use crate::adapter::mysql::relation::SelectFactory;
use crate::adapter::support::{adapt_partition, fold_table_options, relation_factor};
use crate::ast::{
    CreateMaterializedView, Expression, MaterializedViewOptions, MaterializedViewRefreshOpts,
    RefreshMethod, RefreshOn,
};
use crate::cst::{CreateMaterializedViewNode, ExprNode, MViewOptionNode};
use crate::error::AdaptError;

fn expr_fn(node: &ExprNode) -> Result<Expression, AdaptError> {
    ExpressionFactory::generate(node)
}

/// Folds the refresh and rewrite option run. The options arrive in source
/// order; each polarity is recorded exactly as stated, so all four
/// rewrite/computation combinations pass through. `NEVER REFRESH` carries
/// no start/next/on clause by construction.
pub struct MaterializedViewFactory;

impl MaterializedViewFactory {
    pub fn generate(node: &CreateMaterializedViewNode) -> Result<CreateMaterializedView, AdaptError> {
        let mut view_options = MaterializedViewOptions::default();
        for option in &node.options {
            match option {
                MViewOptionNode::NeverRefresh => {
                    Self::set_refresh(
                        &mut view_options,
                        MaterializedViewRefreshOpts::new(RefreshMethod::Never),
                    )?;
                }
                MViewOptionNode::Refresh {
                    method,
                    on,
                    start_with,
                    next,
                } => {
                    let mut refresh = MaterializedViewRefreshOpts::new(Self::method(method)?);
                    refresh.on_clause = on.as_deref().map(Self::on_clause).transpose()?;
                    refresh.start_with = start_with
                        .as_ref()
                        .map(ExpressionFactory::generate)
                        .transpose()?;
                    refresh.next = next.as_ref().map(ExpressionFactory::generate).transpose()?;
                    Self::set_refresh(&mut view_options, refresh)?;
                }
                MViewOptionNode::QueryRewrite(enabled) => {
                    view_options.enable_query_rewrite = Some(*enabled);
                }
                MViewOptionNode::OnQueryComputation(enabled) => {
                    view_options.enable_on_query_computation = Some(*enabled);
                }
            }
        }
        let table_options = if node.table_options.is_empty() {
            None
        } else {
            Some(fold_table_options(&node.table_options, &expr_fn)?)
        };
        Ok(CreateMaterializedView {
            relation: relation_factor(&node.view),
            view_options,
            table_options,
            partition: node
                .partition
                .as_ref()
                .map(|p| adapt_partition(p, &expr_fn))
                .transpose()?,
            as_query: SelectFactory::body(&node.select)?,
        })
    }

    fn set_refresh(
        options: &mut MaterializedViewOptions,
        refresh: MaterializedViewRefreshOpts,
    ) -> Result<(), AdaptError> {
        if options.refresh.is_some() {
            return Err(AdaptError::new(
                "materialized view",
                "more than one refresh clause",
            ));
        }
        options.refresh = Some(refresh);
        Ok(())
    }

    fn method(token: &str) -> Result<RefreshMethod, AdaptError> {
        match token {
            "complete" => Ok(RefreshMethod::Complete),
            "fast" => Ok(RefreshMethod::Fast),
            "force" => Ok(RefreshMethod::Force),
            other => Err(AdaptError::new(
                "materialized view",
                format!("unsupported refresh method '{other}'"),
            )),
        }
    }

    fn on_clause(token: &str) -> Result<RefreshOn, AdaptError> {
        match token {
            "demand" => Ok(RefreshOn::Demand),
            "commit" => Ok(RefreshOn::Commit),
            "statement" => Ok(RefreshOn::Statement),
            other => Err(AdaptError::new(
                "materialized view",
                format!("unsupported refresh trigger '{other}'"),
            )),
        }
    }
}
