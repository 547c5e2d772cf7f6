// MySQL-mode expression adaptation

use crate::adapter::support::operator_for;
use crate::ast::{
    BoolValue, CollectionExpression, ColumnReference, CompoundExpression, ConstExpression,
    Expression, FunctionCall, IntervalExpression, Operator,
};
use crate::cst::ExprNode;
use crate::error::AdaptError;

/// Turns expression nodes into neutral expressions. MySQL name chains flatten
/// into the three-part [`ColumnReference`]; deeper chains are an adaptation
/// fault because the dialect has no fourth qualifier level.
pub struct ExpressionFactory;

impl ExpressionFactory {
    pub fn generate(node: &ExprNode) -> Result<Expression, AdaptError> {
        match node {
            ExprNode::Literal(text) => Ok(Expression::Const(ConstExpression::new(text))),
            ExprNode::True => Ok(Expression::Bool(BoolValue { value: true })),
            ExprNode::False => Ok(Expression::Bool(BoolValue { value: false })),
            ExprNode::UserVariable(name) => Ok(Expression::Const(ConstExpression::new(name))),
            ExprNode::NameChain { parts, star } => Self::column_ref(parts, *star),
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

    pub fn column_ref(parts: &[String], star: bool) -> Result<Expression, AdaptError> {
        let column = Self::column_reference(parts, star)?;
        Ok(Expression::ColumnRef(column))
    }

    pub fn column_reference(parts: &[String], star: bool) -> Result<ColumnReference, AdaptError> {
        let reference = match (parts, star) {
            ([], true) => ColumnReference::new(None, None, "*"),
            ([c], false) => ColumnReference::new(None, None, c),
            ([r], true) => ColumnReference::new(None, Some(r), "*"),
            ([r, c], false) => ColumnReference::new(None, Some(r), c),
            ([s, r], true) => ColumnReference::new(Some(s), Some(r), "*"),
            ([s, r, c], false) => ColumnReference::new(Some(s), Some(r), c),
            _ => {
                return Err(AdaptError::new(
                    "column reference",
                    format!("'{}' has too many qualifier levels", parts.join(".")),
                ))
            }
        };
        Ok(reference)
    }

    fn unary(op: &str, operand: &ExprNode) -> Result<Expression, AdaptError> {
        if op == "-" {
            // fold a negated numeric literal into the literal itself
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
    use crate::grammar::mysql::parse_expression;

    #[test]
    fn flattens_three_part_chain() {
        let node = parse_expression("s.t.c").unwrap();
        let expr = ExpressionFactory::generate(&node).unwrap();
        assert_eq!(
            expr,
            Expression::ColumnRef(ColumnReference::new(Some("s"), Some("t"), "c"))
        );
    }

    #[test]
    fn four_part_chain_is_an_adaptation_fault() {
        let node = parse_expression("a.b.c.d").unwrap();
        let err = ExpressionFactory::generate(&node).unwrap_err();
        assert_eq!(err.construct, "column reference");
    }

    #[test]
    fn in_list_becomes_collection() {
        let node = parse_expression("a in (1, 2, 3)").unwrap();
        let expr = ExpressionFactory::generate(&node).unwrap();
        match expr {
            Expression::Compound(c) => {
                assert_eq!(c.operator, Operator::In);
                match c.right.as_deref() {
                    Some(Expression::Collection(items)) => assert_eq!(items.items.len(), 3),
                    other => panic!("expected collection, got {other:?}"),
                }
            }
            other => panic!("expected compound, got {other:?}"),
        }
    }

    #[test]
    fn assignment_maps_to_set_var() {
        let node = parse_expression("@v := 1 + 2").unwrap();
        let expr = ExpressionFactory::generate(&node).unwrap();
        match expr {
            Expression::Compound(c) => {
                assert_eq!(c.operator, Operator::SetVar);
                assert_eq!(
                    *c.left,
                    Expression::Const(ConstExpression::new("@v"))
                );
            }
            other => panic!("expected compound, got {other:?}"),
        }
    }

    #[test]
    fn interval_arithmetic_keeps_unit() {
        let node = parse_expression("sysdate() + interval 1 day").unwrap();
        let expr = ExpressionFactory::generate(&node).unwrap();
        match expr {
            Expression::Compound(c) => {
                assert_eq!(c.operator, Operator::Add);
                match c.right.as_deref() {
                    Some(Expression::Interval(iv)) => assert_eq!(iv.unit, "day"),
                    other => panic!("expected interval, got {other:?}"),
                }
            }
            other => panic!("expected compound, got {other:?}"),
        }
    }
}
