// MySQL-mode DML adaptation

use crate::adapter::mysql::expr::ExpressionFactory;
use crate::adapter::mysql::relation::{FromReferenceFactory, SelectFactory};
use crate::adapter::support::relation_factor;
use crate::ast::{
    Delete, DeleteRelation, DeleteTarget, Insert, MultiDelete, PartitionUsage, Update,
    UpdateAssign,
};
use crate::cst::{DeleteNode, InsertNode, UpdateNode};
use crate::error::AdaptError;

pub struct InsertFactory;

impl InsertFactory {
    pub fn generate(node: &InsertNode) -> Result<Insert, AdaptError> {
        let mut stmt = Insert::new(relation_factor(&node.table));
        stmt.partition_usage = node.partition.as_ref().map(|names| PartitionUsage {
            names: names.clone(),
        });
        stmt.columns = node
            .columns
            .as_deref()
            .map(|chains| {
                chains
                    .iter()
                    .map(|chain| ExpressionFactory::column_reference(chain, false))
                    .collect::<Result<_, _>>()
            })
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
                    column: ExpressionFactory::column_reference(chain, false)?,
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
        let target = if node.relations.is_empty() {
            let single = node.table_refs.first().ok_or_else(|| {
                AdaptError::new("delete", "single-table DELETE carries no target")
            })?;
            DeleteTarget::Single(FromReferenceFactory::generate(single)?)
        } else {
            DeleteTarget::Multi(MultiDelete {
                relations: node
                    .relations
                    .iter()
                    .map(|r| DeleteRelation {
                        schema: r.schema.clone(),
                        relation: r.relation.clone(),
                        star: r.star,
                    })
                    .collect(),
                using: node.using,
                table_references: node
                    .table_refs
                    .iter()
                    .map(FromReferenceFactory::generate)
                    .collect::<Result<_, _>>()?,
            })
        };
        let mut stmt = Delete::new(target);
        stmt.where_clause = node
            .where_clause
            .as_ref()
            .map(ExpressionFactory::generate)
            .transpose()?;
        stmt.source_text = node.raw_text.clone();
        Ok(stmt)
    }
}
