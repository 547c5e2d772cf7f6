// Expression model shared by both dialects

/// A dialect-neutral expression. Operator precedence is already resolved by
/// the grammar's rule nesting, so the tree shape here is authoritative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    /// MySQL-style flat `schema.table.column` reference.
    ColumnRef(ColumnReference),
    /// Oracle-style nested name chain of arbitrary depth.
    RelationRef(RelationReference),
    /// Opaque literal text, quotes preserved as written.
    Const(ConstExpression),
    Bool(BoolValue),
    Compound(CompoundExpression),
    FunctionCall(FunctionCall),
    Collection(CollectionExpression),
    Interval(IntervalExpression),
}

impl Expression {
    /// Shorthand for a bare column reference.
    pub fn column(name: &str) -> Self {
        Expression::ColumnRef(ColumnReference::new(None, None, name))
    }

    pub fn literal(text: &str) -> Self {
        Expression::Const(ConstExpression::new(text))
    }
}

/// Flat MySQL column reference. `column` may be `*` for star-as-column
/// (`tab.*`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnReference {
    pub schema: Option<String>,
    pub relation: Option<String>,
    pub column: String,
}

impl ColumnReference {
    pub fn new(schema: Option<&str>, relation: Option<&str>, column: &str) -> Self {
        Self {
            schema: schema.map(str::to_owned),
            relation: relation.map(str::to_owned),
            column: column.to_owned(),
        }
    }
}

/// Oracle nested reference chain: `a.b.c` becomes
/// `RelationReference("a", Some("b" -> Some("c")))`. The chain depth equals
/// the number of dot-separated parts; Oracle allows arbitrary depth so this
/// cannot be flattened to a fixed tuple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationReference {
    pub name: String,
    pub reference: Option<Box<RelationReference>>,
}

impl RelationReference {
    pub fn new(name: &str, reference: Option<RelationReference>) -> Self {
        Self {
            name: name.to_owned(),
            reference: reference.map(Box::new),
        }
    }

    /// Build a chain from ordered parts. An empty slice yields an empty-name
    /// head; callers reject empty chains before reaching here.
    pub fn chain(parts: &[&str]) -> Self {
        match parts.split_first() {
            Some((first, rest)) if !rest.is_empty() => Self::new(first, Some(Self::chain(rest))),
            Some((first, _)) => Self::new(first, None),
            None => Self::new("", None),
        }
    }

    pub fn depth(&self) -> usize {
        1 + self.reference.as_ref().map_or(0, |r| r.depth())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstExpression {
    pub text: String,
}

impl ConstExpression {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_owned(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoolValue {
    pub value: bool,
}

/// Binary or unary compound expression. Unary operators leave `right` as
/// `None`. The operator tag comes straight from the matched grammar
/// alternative; this layer performs no precedence climbing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompoundExpression {
    pub left: Box<Expression>,
    pub right: Option<Box<Expression>>,
    pub operator: Operator,
}

impl CompoundExpression {
    pub fn new(left: Expression, right: Option<Expression>, operator: Operator) -> Self {
        Self {
            left: Box::new(left),
            right: right.map(Box::new),
            operator,
        }
    }

    pub fn binary(left: Expression, right: Expression, operator: Operator) -> Expression {
        Expression::Compound(Self::new(left, Some(right), operator))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionCall {
    pub name: String,
    pub params: Vec<Expression>,
}

impl FunctionCall {
    pub fn new(name: &str, params: Vec<Expression>) -> Self {
        Self {
            name: name.to_owned(),
            params,
        }
    }
}

/// Ordered list of sub-expressions, e.g. the right-hand side of `IN (…)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionExpression {
    pub items: Vec<Expression>,
}

/// `INTERVAL <value> <unit>`, unit kept as written (DAY, MONTH, …).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalExpression {
    pub value: Box<Expression>,
    pub unit: String,
}

impl IntervalExpression {
    pub fn new(value: Expression, unit: &str) -> Self {
        Self {
            value: Box::new(value),
            unit: unit.to_owned(),
        }
    }
}

/// Closed operator set with dialect-shared semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
    /// MySQL `<=>`.
    NullSafeEq,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    And,
    Or,
    Not,
    Like,
    NotLike,
    In,
    NotIn,
    Between,
    NotBetween,
    Is,
    IsNot,
    /// String concatenation `||`.
    Cnnop,
    /// MySQL `:=`.
    SetVar,
    BitAnd,
    BitOr,
    BitXor,
    LeftShift,
    RightShift,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relation_reference_chain_depth_matches_parts() {
        let chain = RelationReference::chain(&["a", "b", "ab", "v"]);
        assert_eq!(chain.depth(), 4);
        assert_eq!(chain.name, "a");
        let expect = RelationReference::new(
            "a",
            Some(RelationReference::new(
                "b",
                Some(RelationReference::new(
                    "ab",
                    Some(RelationReference::new("v", None)),
                )),
            )),
        );
        assert_eq!(chain, expect);
    }

    #[test]
    fn compound_expression_structural_equality() {
        let a = CompoundExpression::binary(
            Expression::column("id"),
            Expression::literal("1"),
            Operator::Eq,
        );
        let b = CompoundExpression::binary(
            Expression::column("id"),
            Expression::literal("1"),
            Operator::Eq,
        );
        assert_eq!(a, b);
    }
}
