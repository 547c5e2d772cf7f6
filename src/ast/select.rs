// SELECT statement model: projections, from references, joins, ordering

use crate::ast::expr::{ColumnReference, Expression};

#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    pub body: SelectBody,
    pub order_by: Vec<SortKey>,
    pub limit: Option<Limit>,
    pub fetch: Option<Fetch>,
}

impl Select {
    pub fn new(body: SelectBody) -> Self {
        Self {
            body,
            order_by: Vec::new(),
            limit: None,
            fetch: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectBody {
    pub qualifier: Option<SelectQualifier>,
    pub items: Vec<Projection>,
    pub froms: Vec<FromReference>,
    pub where_clause: Option<Expression>,
    pub group_by: Vec<Expression>,
    pub having: Option<Expression>,
}

impl SelectBody {
    pub fn new(items: Vec<Projection>, froms: Vec<FromReference>) -> Self {
        Self {
            qualifier: None,
            items,
            froms,
            where_clause: None,
            group_by: Vec::new(),
            having: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectQualifier {
    Distinct,
    All,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Projection {
    /// Bare `*`.
    Star,
    Expr {
        expr: Expression,
        alias: Option<String>,
    },
}

impl Projection {
    pub fn expr(expr: Expression) -> Self {
        Projection::Expr { expr, alias: None }
    }
}

/// One entry of a FROM clause. Joins form a left-deep binary tree matching
/// the grammar's left-associative nesting: `a JOIN b JOIN c` is
/// `Join(Join(a, b), c)`.
#[derive(Debug, Clone, PartialEq)]
pub enum FromReference {
    Name(NameReference),
    Join(Box<JoinReference>),
    Expression(ExpressionReference),
}

/// Plain table reference. Partition usage and flashback usage attach only
/// here, never to a join node.
#[derive(Debug, Clone, PartialEq)]
pub struct NameReference {
    pub schema: Option<String>,
    pub relation: String,
    pub alias: Option<String>,
    pub user_variable: Option<String>,
    /// Oracle dblink-style `@db!` marker.
    pub reverse_link: bool,
    pub partition_usage: Option<PartitionUsage>,
    pub flashback_usage: Option<FlashbackUsage>,
}

impl NameReference {
    pub fn new(schema: Option<&str>, relation: &str, alias: Option<&str>) -> Self {
        Self {
            schema: schema.map(str::to_owned),
            relation: relation.to_owned(),
            alias: alias.map(str::to_owned),
            user_variable: None,
            reverse_link: false,
            partition_usage: None,
            flashback_usage: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct JoinReference {
    pub left: FromReference,
    pub right: FromReference,
    pub join_type: JoinType,
    pub condition: Option<JoinCondition>,
}

impl JoinReference {
    pub fn new(
        left: FromReference,
        right: FromReference,
        join_type: JoinType,
        condition: Option<JoinCondition>,
    ) -> FromReference {
        FromReference::Join(Box::new(Self {
            left,
            right,
            join_type,
            condition,
        }))
    }
}

/// Subquery in FROM position.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionReference {
    pub query: Box<SelectBody>,
    pub alias: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum JoinCondition {
    On(Expression),
    Using(Vec<ColumnReference>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoinType {
    Join,
    InnerJoin,
    CrossJoin,
    StraightJoin,
    LeftJoin,
    LeftOuterJoin,
    RightJoin,
    RightOuterJoin,
    FullJoin,
    FullOuterJoin,
    NaturalJoin,
    NaturalInnerJoin,
    NaturalLeftJoin,
    NaturalLeftOuterJoin,
    NaturalRightJoin,
    NaturalRightOuterJoin,
    NaturalFullJoin,
    NaturalFullOuterJoin,
}

/// `PARTITION (p0, p1)` usage on a name reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionUsage {
    pub names: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FlashbackUsage {
    pub flashback_type: FlashbackType,
    pub expr: Expression,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashbackType {
    AsOfSnapshot,
    AsOfScn,
    AsOfTimestamp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// ORDER BY key.
#[derive(Debug, Clone, PartialEq)]
pub struct SortKey {
    pub expr: Expression,
    pub direction: Option<SortDirection>,
}

/// MySQL `LIMIT n [OFFSET m]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Limit {
    pub count: Expression,
    pub offset: Option<Expression>,
}

/// Oracle `[OFFSET n ROWS] FETCH FIRST|NEXT n [PERCENT] ROWS ONLY|WITH TIES`.
#[derive(Debug, Clone, PartialEq)]
pub struct Fetch {
    pub count: Option<Expression>,
    pub offset: Option<Expression>,
    pub percent: bool,
    pub with_ties: bool,
}
