// Oracle-mode DDL adaptation

use crate::adapter::oracle::expr::ExpressionFactory;
use crate::adapter::oracle::relation::SelectFactory;
use crate::adapter::oracle::types::DataTypeFactory;
use crate::adapter::support::{
    adapt_partition, adapt_partition_elements, column_group, fold_index_options,
    fold_table_options, relation_factor, sort_column,
};
use crate::ast::{
    AlterTable, AlterTableAction, ColumnAttributes, ColumnDefinition, ColumnReference,
    CommentTarget, ConstraintKind, CreateIndex, CreateTable, DropColumnBehavior, DropIndex,
    DropTable, OutOfLineConstraint, OutOfLineIndex, RelationFactor, RenameTable,
    RenameTableAction, SetComment, SortColumn, TableElement, TruncateTable,
};
use crate::cst::{
    AlterActionNode, AlterTableNode, ColumnAttrNode, ColumnDefNode, CommentNode,
    ConstraintKindNode, ConstraintNode, CreateIndexNode, CreateTableNode, DropIndexNode,
    DropTableNode, ExprNode, IndexElementNode, RenameTableNode, TableElementNode,
    TruncateTableNode,
};
use crate::error::AdaptError;

fn expr_fn(node: &ExprNode) -> Result<crate::ast::Expression, AdaptError> {
    ExpressionFactory::generate(node)
}

pub struct CreateTableFactory;

impl CreateTableFactory {
    pub fn generate(node: &CreateTableNode) -> Result<CreateTable, AdaptError> {
        let mut stmt = CreateTable::new(relation_factor(&node.table));
        stmt.temporary = node.temporary;
        stmt.external = node.external;
        stmt.if_not_exists = node.if_not_exists;
        stmt.elements = node
            .elements
            .iter()
            .map(table_element)
            .collect::<Result<_, _>>()?;
        if !node.options.is_empty() {
            stmt.table_options = Some(fold_table_options(&node.options, &expr_fn)?);
        }
        stmt.partition = node
            .partition
            .as_ref()
            .map(|p| adapt_partition(p, &expr_fn))
            .transpose()?;
        stmt.column_groups = node
            .column_groups
            .as_deref()
            .map(|groups| groups.iter().map(column_group).collect());
        stmt.as_query = node
            .as_select
            .as_deref()
            .map(SelectFactory::body)
            .transpose()?;
        Ok(stmt)
    }
}

pub(crate) fn table_element(node: &TableElementNode) -> Result<TableElement, AdaptError> {
    match node {
        TableElementNode::Column(def) => Ok(TableElement::Column(column_definition(def)?)),
        TableElementNode::Constraint(c) => Ok(TableElement::Constraint(constraint(c)?)),
        TableElementNode::Index(i) => Ok(TableElement::Index(index_element(i)?)),
    }
}

pub(crate) fn column_definition(node: &ColumnDefNode) -> Result<ColumnDefinition, AdaptError> {
    let data_type = DataTypeFactory::generate(&node.data_type)?;
    let mut attributes = ColumnAttributes::default();
    for attr in &node.attrs {
        match attr {
            ColumnAttrNode::Null => attributes.nullable = Some(true),
            ColumnAttrNode::NotNull => attributes.nullable = Some(false),
            ColumnAttrNode::Default(e) => {
                attributes.default_value = Some(ExpressionFactory::generate(e)?)
            }
            ColumnAttrNode::AutoIncrement => attributes.auto_increment = true,
            ColumnAttrNode::PrimaryKey => attributes.primary_key = true,
            ColumnAttrNode::UniqueKey => attributes.unique = true,
            ColumnAttrNode::Comment(raw) => attributes.comment = Some(raw.clone()),
            ColumnAttrNode::OnUpdate(e) => {
                attributes.on_update = Some(ExpressionFactory::generate(e)?)
            }
        }
    }
    let mut def = ColumnDefinition::new(&node.name, data_type);
    def.attributes = attributes;
    Ok(def)
}

fn constraint(node: &ConstraintNode) -> Result<OutOfLineConstraint, AdaptError> {
    let kind = match &node.kind {
        ConstraintKindNode::PrimaryKey(cols) => ConstraintKind::PrimaryKey(sort_columns(cols)?),
        ConstraintKindNode::Unique(cols) => ConstraintKind::Unique(sort_columns(cols)?),
        ConstraintKindNode::ForeignKey {
            columns,
            ref_table,
            ref_columns,
        } => ConstraintKind::ForeignKey {
            columns: columns.clone(),
            ref_relation: relation_factor(ref_table),
            ref_columns: ref_columns.clone(),
        },
        ConstraintKindNode::Check(e) => ConstraintKind::Check(ExpressionFactory::generate(e)?),
    };
    Ok(OutOfLineConstraint {
        name: node.name.clone(),
        kind,
    })
}

fn index_element(node: &IndexElementNode) -> Result<OutOfLineIndex, AdaptError> {
    let options = if node.options.is_empty() {
        None
    } else {
        Some(fold_index_options(&node.options)?)
    };
    Ok(OutOfLineIndex {
        name: node.name.clone(),
        columns: sort_columns(&node.columns)?,
        options,
    })
}

fn sort_columns(nodes: &[crate::cst::SortColumnNode]) -> Result<Vec<SortColumn>, AdaptError> {
    nodes.iter().map(|n| sort_column(n, &expr_fn)).collect()
}

pub struct AlterTableFactory;

impl AlterTableFactory {
    pub fn generate(node: &AlterTableNode) -> Result<AlterTable, AdaptError> {
        let actions = node
            .actions
            .iter()
            .map(Self::action)
            .collect::<Result<_, _>>()?;
        Ok(AlterTable {
            relation: relation_factor(&node.table),
            actions,
        })
    }

    fn action(node: &AlterActionNode) -> Result<AlterTableAction, AdaptError> {
        match node {
            AlterActionNode::Options(opts) => Ok(AlterTableAction::TableOptions(
                fold_table_options(opts, &expr_fn)?,
            )),
            AlterActionNode::AddColumns(defs) => Ok(AlterTableAction::AddColumns(
                defs.iter().map(column_definition).collect::<Result<_, _>>()?,
            )),
            AlterActionNode::DropColumn { name, behavior } => Ok(AlterTableAction::DropColumn {
                column: name.clone(),
                behavior: behavior.as_deref().map(|b| {
                    if b.eq_ignore_ascii_case("cascade") {
                        DropColumnBehavior::Cascade
                    } else {
                        DropColumnBehavior::Restrict
                    }
                }),
            }),
            AlterActionNode::ModifyColumns(defs) => Ok(AlterTableAction::ModifyColumns(
                defs.iter().map(column_definition).collect::<Result<_, _>>()?,
            )),
            AlterActionNode::ChangeColumn { from, def } => Ok(AlterTableAction::ChangeColumn {
                from: from.clone(),
                definition: column_definition(def)?,
            }),
            AlterActionNode::RenameColumn { from, to } => Ok(AlterTableAction::RenameColumn {
                from: from.clone(),
                to: to.clone(),
            }),
            AlterActionNode::RenameTo(rf) => Ok(AlterTableAction::RenameTo(relation_factor(rf))),
            AlterActionNode::AddConstraint(c) => {
                Ok(AlterTableAction::AddConstraint(constraint(c)?))
            }
            AlterActionNode::DropConstraints(names) => {
                Ok(AlterTableAction::DropConstraints(names.clone()))
            }
            AlterActionNode::AddIndex(i) => Ok(AlterTableAction::AddIndex(index_element(i)?)),
            AlterActionNode::DropIndex(name) => Ok(AlterTableAction::DropIndex(name.clone())),
            AlterActionNode::RenameIndex { from, to } => Ok(AlterTableAction::RenameIndex {
                from: from.clone(),
                to: to.clone(),
            }),
            AlterActionNode::AddPartitions(els) => Ok(AlterTableAction::AddPartitions(
                adapt_partition_elements(els, &expr_fn)?,
            )),
            AlterActionNode::DropPartitions(names) => {
                Ok(AlterTableAction::DropPartitions(names.clone()))
            }
            AlterActionNode::TruncatePartitions(names) => {
                Ok(AlterTableAction::TruncatePartitions(names.clone()))
            }
            AlterActionNode::AddColumnGroups(groups) => Ok(AlterTableAction::AddColumnGroups(
                groups.iter().map(column_group).collect(),
            )),
            AlterActionNode::DropColumnGroups(groups) => Ok(AlterTableAction::DropColumnGroups(
                groups.iter().map(column_group).collect(),
            )),
            AlterActionNode::DropPrimaryKey => Ok(AlterTableAction::DropPrimaryKey),
            AlterActionNode::RemovePartitioning => Ok(AlterTableAction::RemovePartitioning),
            AlterActionNode::Refresh => Ok(AlterTableAction::Refresh),
        }
    }
}

pub struct CreateIndexFactory;

impl CreateIndexFactory {
    pub fn generate(node: &CreateIndexNode) -> Result<CreateIndex, AdaptError> {
        let mut stmt = CreateIndex::new(
            relation_factor(&node.index),
            relation_factor(&node.on),
            sort_columns(&node.columns)?,
        );
        stmt.unique = node.unique;
        if !node.options.is_empty() {
            stmt.options = Some(fold_index_options(&node.options)?);
        }
        Ok(stmt)
    }
}

pub struct DropTableFactory;

impl DropTableFactory {
    pub fn generate(node: &DropTableNode) -> Result<DropTable, AdaptError> {
        let mut stmt = DropTable::new(node.tables.iter().map(relation_factor).collect());
        stmt.temporary = node.temporary;
        stmt.materialized = node.materialized;
        stmt.if_exists = node.if_exists;
        stmt.cascade_constraints = node.cascade_constraints;
        stmt.purge = node.purge;
        Ok(stmt)
    }
}

pub struct DropIndexFactory;

impl DropIndexFactory {
    pub fn generate(node: &DropIndexNode) -> Result<DropIndex, AdaptError> {
        Ok(DropIndex {
            index: relation_factor(&node.index),
            on: node.on.as_ref().map(relation_factor),
        })
    }
}

pub struct RenameTableFactory;

impl RenameTableFactory {
    pub fn generate(node: &RenameTableNode) -> Result<RenameTable, AdaptError> {
        Ok(RenameTable {
            actions: node
                .pairs
                .iter()
                .map(|(from, to)| RenameTableAction {
                    from: relation_factor(from),
                    to: relation_factor(to),
                })
                .collect(),
        })
    }
}

pub struct TruncateTableFactory;

impl TruncateTableFactory {
    pub fn generate(node: &TruncateTableNode) -> Result<TruncateTable, AdaptError> {
        Ok(TruncateTable {
            relation: relation_factor(&node.table),
        })
    }
}

/// `COMMENT ON TABLE` targets a relation of at most schema.relation depth;
/// `COMMENT ON COLUMN` needs at least relation.column.
pub struct CommentFactory;

impl CommentFactory {
    pub fn generate(node: &CommentNode) -> Result<SetComment, AdaptError> {
        let chain: Vec<&str> = node.chain.iter().map(String::as_str).collect();
        let target = if node.on_column {
            match chain.as_slice() {
                [r, c] => CommentTarget::Column(ColumnReference::new(None, Some(r), c)),
                [s, r, c] => CommentTarget::Column(ColumnReference::new(Some(s), Some(r), c)),
                _ => {
                    return Err(AdaptError::new(
                        "comment",
                        "COMMENT ON COLUMN needs a relation-qualified column",
                    ))
                }
            }
        } else {
            match chain.as_slice() {
                [r] => CommentTarget::Table(RelationFactor::named(r)),
                [s, r] => CommentTarget::Table(RelationFactor::new(Some(s), r)),
                _ => {
                    return Err(AdaptError::new(
                        "comment",
                        "COMMENT ON TABLE target has too many qualifier levels",
                    ))
                }
            }
        };
        Ok(SetComment {
            target,
            comment: node.comment.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::oracle::parse_statement;
    use crate::cst::StatementNode;

    fn comment_node(sql: &str) -> CommentNode {
        match parse_statement(sql).unwrap() {
            StatementNode::Comment(n) => n,
            other => panic!("expected comment, got {other:?}"),
        }
    }

    #[test]
    fn comment_on_column_with_schema() {
        let stmt = CommentFactory::generate(&comment_node(
            "comment on column s.t.c is 'the c column'",
        ))
        .unwrap();
        assert_eq!(
            stmt.target,
            CommentTarget::Column(ColumnReference::new(Some("s"), Some("t"), "c"))
        );
        assert_eq!(stmt.comment, "'the c column'");
    }

    #[test]
    fn comment_on_bare_column_is_a_fault() {
        let err = CommentFactory::generate(&comment_node("comment on column c is 'x'"))
            .unwrap_err();
        assert_eq!(err.construct, "comment");
    }

    #[test]
    fn drop_table_cascade_constraints_purge() {
        let node = match parse_statement("drop table t cascade constraints purge").unwrap() {
            StatementNode::DropTable(n) => n,
            other => panic!("expected drop table, got {other:?}"),
        };
        let stmt = DropTableFactory::generate(&node).unwrap();
        assert!(stmt.cascade_constraints);
        assert!(stmt.purge);
        assert_eq!(stmt.relations, vec![RelationFactor::named("t")]);
    }
}
