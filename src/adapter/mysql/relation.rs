// MySQL-mode FROM references and SELECT adaptation

use crate::adapter::mysql::expr::ExpressionFactory;
use crate::adapter::support::{direction, join_type_for};
use crate::ast::{
    ExpressionReference, FromReference, JoinCondition, JoinReference, Limit, NameReference,
    PartitionUsage, Projection, Select, SelectBody, SelectQualifier, SortKey,
};
use crate::cst::{JoinConditionNode, ProjectionNode, SelectNode, TableRefNode};
use crate::error::AdaptError;

pub struct FromReferenceFactory;

impl FromReferenceFactory {
    pub fn generate(node: &TableRefNode) -> Result<FromReference, AdaptError> {
        match node {
            TableRefNode::Named {
                factor,
                alias,
                partition,
                flashback,
            } => {
                if flashback.is_some() {
                    return Err(AdaptError::new(
                        "table reference",
                        "flashback is not a MySQL construct",
                    ));
                }
                if factor.reverse_link {
                    return Err(AdaptError::new(
                        "table reference",
                        "reverse link is not a MySQL construct",
                    ));
                }
                let mut name = NameReference::new(
                    factor.schema.as_deref(),
                    &factor.relation,
                    alias.as_deref(),
                );
                name.user_variable = factor.user_variable.clone();
                name.partition_usage = partition
                    .as_ref()
                    .map(|names| PartitionUsage {
                        names: names.clone(),
                    });
                Ok(FromReference::Name(name))
            }
            TableRefNode::Joined {
                left,
                join_tokens,
                right,
                condition,
            } => {
                let join_type = join_type_for(join_tokens)?;
                let left = Self::generate(left)?;
                let right = Self::generate(right)?;
                let condition = condition
                    .as_ref()
                    .map(|c| Self::join_condition(c))
                    .transpose()?;
                Ok(JoinReference::new(left, right, join_type, condition))
            }
            // a parenthesized reference list collapses to its first element,
            // recursively, so ((a), b) resolves to a
            TableRefNode::Paren(refs) => match refs.first() {
                Some(first) => Self::generate(first),
                None => Err(AdaptError::new("table reference", "empty reference list")),
            },
            TableRefNode::Subquery { select, alias } => {
                Ok(FromReference::Expression(ExpressionReference {
                    query: Box::new(SelectFactory::body(select)?),
                    alias: alias.clone(),
                }))
            }
        }
    }

    fn join_condition(node: &JoinConditionNode) -> Result<JoinCondition, AdaptError> {
        match node {
            JoinConditionNode::On(e) => Ok(JoinCondition::On(ExpressionFactory::generate(e)?)),
            JoinConditionNode::Using(chains) => {
                let columns = chains
                    .iter()
                    .map(|chain| ExpressionFactory::column_reference(chain, false))
                    .collect::<Result<_, _>>()?;
                Ok(JoinCondition::Using(columns))
            }
        }
    }
}

pub struct SelectFactory;

impl SelectFactory {
    pub fn generate(node: &SelectNode) -> Result<Select, AdaptError> {
        let mut select = Select::new(Self::body(node)?);
        select.order_by = node
            .order_by
            .iter()
            .map(|key| {
                Ok(SortKey {
                    expr: ExpressionFactory::generate(&key.expr)?,
                    direction: direction(&key.direction),
                })
            })
            .collect::<Result<_, AdaptError>>()?;
        if let Some(limit) = &node.limit {
            select.limit = Some(Limit {
                count: ExpressionFactory::generate(&limit.count)?,
                offset: limit
                    .offset
                    .as_ref()
                    .map(ExpressionFactory::generate)
                    .transpose()?,
            });
        }
        Ok(select)
    }

    pub fn body(node: &SelectNode) -> Result<SelectBody, AdaptError> {
        let items = node
            .items
            .iter()
            .map(Self::projection)
            .collect::<Result<_, _>>()?;
        let froms = node
            .from
            .iter()
            .map(FromReferenceFactory::generate)
            .collect::<Result<_, _>>()?;
        let mut body = SelectBody::new(items, froms);
        body.qualifier = node.qualifier.as_deref().map(|q| {
            if q.eq_ignore_ascii_case("all") {
                SelectQualifier::All
            } else {
                SelectQualifier::Distinct
            }
        });
        body.where_clause = node
            .where_clause
            .as_ref()
            .map(ExpressionFactory::generate)
            .transpose()?;
        body.group_by = node
            .group_by
            .iter()
            .map(ExpressionFactory::generate)
            .collect::<Result<_, _>>()?;
        body.having = node
            .having
            .as_ref()
            .map(ExpressionFactory::generate)
            .transpose()?;
        Ok(body)
    }

    fn projection(node: &ProjectionNode) -> Result<Projection, AdaptError> {
        match node {
            ProjectionNode::Star => Ok(Projection::Star),
            ProjectionNode::Expr { expr, alias } => Ok(Projection::Expr {
                expr: ExpressionFactory::generate(expr)?,
                alias: alias.clone(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::JoinType;
    use crate::grammar::mysql::parse_table_reference;

    fn adapt(sql: &str) -> FromReference {
        FromReferenceFactory::generate(&parse_table_reference(sql).unwrap()).unwrap()
    }

    #[test]
    fn join_chain_is_left_deep() {
        let from = adapt("t1 join t2 join t3");
        let join = match from {
            FromReference::Join(j) => j,
            other => panic!("expected join, got {other:?}"),
        };
        assert_eq!(join.join_type, JoinType::Join);
        match &join.left {
            FromReference::Join(inner) => {
                assert_eq!(inner.join_type, JoinType::Join);
                assert_eq!(
                    inner.left,
                    FromReference::Name(NameReference::new(None, "t1", None))
                );
            }
            other => panic!("expected nested join, got {other:?}"),
        }
    }

    #[test]
    fn paren_list_collapses_to_first_element() {
        let from = adapt("((a), b)");
        assert_eq!(from, FromReference::Name(NameReference::new(None, "a", None)));
    }

    #[test]
    fn partition_usage_attaches_to_name() {
        let from = adapt("t partition (p0, p1) x");
        match from {
            FromReference::Name(name) => {
                assert_eq!(name.alias.as_deref(), Some("x"));
                assert_eq!(
                    name.partition_usage,
                    Some(PartitionUsage {
                        names: vec!["p0".into(), "p1".into()]
                    })
                );
            }
            other => panic!("expected name reference, got {other:?}"),
        }
    }
}
