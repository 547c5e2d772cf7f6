// Oracle-mode FROM references and SELECT adaptation

use crate::adapter::oracle::expr::ExpressionFactory;
use crate::adapter::support::{direction, join_type_for};
use crate::ast::{
    ColumnReference, ExpressionReference, Fetch, FlashbackType, FlashbackUsage, FromReference,
    JoinCondition, JoinReference, NameReference, Projection, Select, SelectBody, SelectQualifier,
    SortKey,
};
use crate::cst::{FlashbackNode, JoinConditionNode, ProjectionNode, SelectNode, TableRefNode};
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
                if partition.is_some() {
                    return Err(AdaptError::new(
                        "table reference",
                        "partition usage is not an Oracle construct",
                    ));
                }
                let mut name = NameReference::new(
                    factor.schema.as_deref(),
                    &factor.relation,
                    alias.as_deref(),
                );
                name.user_variable = factor.user_variable.clone();
                name.reverse_link = factor.reverse_link;
                name.flashback_usage = flashback
                    .as_ref()
                    .map(Self::flashback)
                    .transpose()?;
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
                    .map(Self::join_condition)
                    .transpose()?;
                Ok(JoinReference::new(left, right, join_type, condition))
            }
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

    fn flashback(node: &FlashbackNode) -> Result<FlashbackUsage, AdaptError> {
        let flashback_type = match node.kind.as_str() {
            "snapshot" => FlashbackType::AsOfSnapshot,
            "scn" => FlashbackType::AsOfScn,
            "timestamp" => FlashbackType::AsOfTimestamp,
            other => {
                return Err(AdaptError::new(
                    "table reference",
                    format!("unsupported flashback kind '{other}'"),
                ))
            }
        };
        Ok(FlashbackUsage {
            flashback_type,
            expr: ExpressionFactory::generate(&node.expr)?,
        })
    }

    fn join_condition(node: &JoinConditionNode) -> Result<JoinCondition, AdaptError> {
        match node {
            JoinConditionNode::On(e) => Ok(JoinCondition::On(ExpressionFactory::generate(e)?)),
            JoinConditionNode::Using(chains) => {
                let columns = chains
                    .iter()
                    .map(|chain| Self::using_column(chain))
                    .collect::<Result<_, _>>()?;
                Ok(JoinCondition::Using(columns))
            }
        }
    }

    fn using_column(chain: &[String]) -> Result<ColumnReference, AdaptError> {
        match chain {
            [c] => Ok(ColumnReference::new(None, None, c)),
            [r, c] => Ok(ColumnReference::new(None, Some(r), c)),
            [s, r, c] => Ok(ColumnReference::new(Some(s), Some(r), c)),
            _ => Err(AdaptError::new(
                "join",
                "USING column has too many qualifier levels",
            )),
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
        if let Some(fetch) = &node.fetch {
            select.fetch = Some(Fetch {
                count: fetch
                    .count
                    .as_ref()
                    .map(ExpressionFactory::generate)
                    .transpose()?,
                offset: fetch
                    .offset
                    .as_ref()
                    .map(ExpressionFactory::generate)
                    .transpose()?,
                percent: fetch.percent,
                with_ties: fetch.with_ties,
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
    use crate::grammar::oracle::parse_table_reference;

    #[test]
    fn natural_right_outer_join_chain() {
        let node =
            parse_table_reference("t1 natural right outer join t2 natural right outer join t3")
                .unwrap();
        let from = FromReferenceFactory::generate(&node).unwrap();
        let outer = match from {
            FromReference::Join(j) => j,
            other => panic!("expected join, got {other:?}"),
        };
        assert_eq!(outer.join_type, JoinType::NaturalRightOuterJoin);
        assert!(outer.condition.is_none());
        match &outer.left {
            FromReference::Join(inner) => {
                assert_eq!(inner.join_type, JoinType::NaturalRightOuterJoin);
            }
            other => panic!("expected nested join, got {other:?}"),
        }
    }

    #[test]
    fn flashback_as_of_scn() {
        let node = parse_table_reference("t as of scn 42 x").unwrap();
        let from = FromReferenceFactory::generate(&node).unwrap();
        match from {
            FromReference::Name(name) => {
                assert_eq!(name.alias.as_deref(), Some("x"));
                let fb = name.flashback_usage.unwrap();
                assert_eq!(fb.flashback_type, FlashbackType::AsOfScn);
            }
            other => panic!("expected name reference, got {other:?}"),
        }
    }
}
