// Oracle-mode expression adaptation

use crate::adapter::support::operator_for;
use crate::ast::{
    BoolValue, CollectionExpression, CompoundExpression, ConstExpression, Expression,
    FunctionCall, IntervalExpression, Operator, RelationReference,
};
use crate::cst::ExprNode;
use crate::error::AdaptError;

/// Oracle name chains nest instead of flattening: `a.b.c` becomes a
/// [`RelationReference`] chain of depth three, and any depth is legal.
pub struct ExpressionFactory;

impl ExpressionFactory {
    pub fn generate(node: &ExprNode) -> Result<Expression, AdaptError> {
        match node {
            ExprNode::Literal(text) => Ok(Expression::Const(ConstExpression::new(text))),
            ExprNode::True => Ok(Expression::Bool(BoolValue { value: true })),
            ExprNode::False => Ok(Expression::Bool(BoolValue { value: false })),
            ExprNode::UserVariable(name) => Ok(Expression::Const(ConstExpression::new(name))),
            ExprNode::NameChain { parts, star } => Ok(Expression::RelationRef(
                Self::relation_reference(parts, *star)?,
            )),
            ExprNode::Unary { op, operand } => Self::unary(op, operand),
            ExprNode::Binary { left, op, right } => Ok(CompoundExpression::binary(
                Self::generate(left)?,
                Self::generate(right)?,
                operator_for(op)?,
            )),
            ExprNode::FunctionCall { name, args } => {
                let params = args.iter().map(Self::generate).collect::<Result<_, _>>()?;
                Ok(Expression::FunctionCall(FunctionCall::new(name, params)))
            }
            ExprNode::List(items) => {
                let items = items.iter().map(Self::generate).collect::<Result<_, _>>()?;
                Ok(Expression::Collection(CollectionExpression { items }))
            }
            ExprNode::Interval { value, unit } => Ok(Expression::Interval(
                IntervalExpression::new(Self::generate(value)?, unit),
            )),
        }
    }

    pub fn relation_reference(
        parts: &[String],
        star: bool,
    ) -> Result<RelationReference, AdaptError> {
        let mut names: Vec<&str> = parts.iter().map(String::as_str).collect();
        if star {
            names.push("*");
        }
        if names.is_empty() {
            return Err(AdaptError::new("relation reference", "empty name chain"));
        }
        Ok(RelationReference::chain(&names))
    }

    fn unary(op: &str, operand: &ExprNode) -> Result<Expression, AdaptError> {
        if op == "-" {
            if let ExprNode::Literal(text) = operand {
                if text.starts_with(|c: char| c.is_ascii_digit()) {
                    return Ok(Expression::Const(ConstExpression::new(&format!("-{text}"))));
                }
            }
        }
        let operator = match op {
            "not" => Operator::Not,
            "-" => Operator::Sub,
            other => {
                return Err(AdaptError::new(
                    "expression",
                    format!("unsupported unary operator '{other}'"),
                ))
            }
        };
        Ok(Expression::Compound(CompoundExpression::new(
            Self::generate(operand)?,
            None,
            operator,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::oracle::parse_expression;

    #[test]
    fn deep_chain_nests_instead_of_flattening() {
        let node = parse_expression("a.b.ab.v").unwrap();
        let expr = ExpressionFactory::generate(&node).unwrap();
        match expr {
            Expression::RelationRef(chain) => {
                assert_eq!(chain.depth(), 4);
                assert_eq!(chain.name, "a");
            }
            other => panic!("expected relation reference, got {other:?}"),
        }
    }

    #[test]
    fn concat_operator_maps_to_cnnop() {
        let node = parse_expression("a || 'suffix'").unwrap();
        let expr = ExpressionFactory::generate(&node).unwrap();
        match expr {
            Expression::Compound(c) => assert_eq!(c.operator, Operator::Cnnop),
            other => panic!("expected compound, got {other:?}"),
        }
    }
}
