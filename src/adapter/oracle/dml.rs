// Oracle-mode DML adaptation

use crate::adapter::oracle::relation::{FromReferenceFactory, SelectFactory};
use crate::adapter::oracle::expr::ExpressionFactory;
use crate::adapter::support::relation_factor;
use crate::ast::{ColumnReference, Delete, DeleteTarget, Insert, Update, UpdateAssign};
use crate::cst::{DeleteNode, InsertNode, UpdateNode};
use crate::error::AdaptError;

fn assign_column(chain: &[String]) -> Result<ColumnReference, AdaptError> {
    match chain {
        [c] => Ok(ColumnReference::new(None, None, c)),
        [r, c] => Ok(ColumnReference::new(None, Some(r), c)),
        [s, r, c] => Ok(ColumnReference::new(Some(s), Some(r), c)),
        _ => Err(AdaptError::new(
            "column reference",
            "assignment target has too many qualifier levels",
        )),
    }
}

pub struct InsertFactory;

impl InsertFactory {
    pub fn generate(node: &InsertNode) -> Result<Insert, AdaptError> {
        let mut stmt = Insert::new(relation_factor(&node.table));
        if node.partition.is_some() {
            return Err(AdaptError::new(
                "insert",
                "partition usage is not an Oracle construct",
            ));
        }
        stmt.columns = node
            .columns
            .as_deref()
            .map(|chains| chains.iter().map(|c| assign_column(c)).collect::<Result<_, _>>())
            .transpose()?;
        stmt.values = node
            .values
            .iter()
            .map(|row| row.iter().map(ExpressionFactory::generate).collect())
            .collect::<Result<_, _>>()?;
        stmt.as_query = node
            .select
            .as_deref()
            .map(SelectFactory::body)
            .transpose()?;
        Ok(stmt)
    }
}

pub struct UpdateFactory;

impl UpdateFactory {
    pub fn generate(node: &UpdateNode) -> Result<Update, AdaptError> {
        let table_references = node
            .table_refs
            .iter()
            .map(FromReferenceFactory::generate)
            .collect::<Result<_, _>>()?;
        let assigns = node
            .assigns
            .iter()
            .map(|(chain, value)| {
                Ok(UpdateAssign {
                    column: assign_column(chain)?,
                    value: ExpressionFactory::generate(value)?,
                })
            })
            .collect::<Result<_, AdaptError>>()?;
        let where_clause = node
            .where_clause
            .as_ref()
            .map(ExpressionFactory::generate)
            .transpose()?;
        Ok(Update {
            table_references,
            assigns,
            where_clause,
            source_text: node.raw_text.clone(),
        })
    }
}

pub struct DeleteFactory;

impl DeleteFactory {
    pub fn generate(node: &DeleteNode) -> Result<Delete, AdaptError> {
        if !node.relations.is_empty() {
            return Err(AdaptError::new(
                "delete",
                "multi-table DELETE is not an Oracle construct",
            ));
        }
        let single = node.table_refs.first().ok_or_else(|| {
            AdaptError::new("delete", "single-table DELETE carries no target")
        })?;
        let mut stmt = Delete::new(DeleteTarget::Single(FromReferenceFactory::generate(single)?));
        stmt.where_clause = node
            .where_clause
            .as_ref()
            .map(ExpressionFactory::generate)
            .transpose()?;
        stmt.source_text = node.raw_text.clone();
        Ok(stmt)
    }
}
