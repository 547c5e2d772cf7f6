// Concrete parse tree
//
// The grammar layer produces these nodes as a faithful record of what the
// source said, shape only, no dialect semantics. Adaptation decisions
// (flat vs nested references, option-bag folding, refresh state machine)
// live in the adapter layer, which is the only consumer of this module.

/// Dotted relation name with optional user-variable / dblink suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationFactorNode {
    pub schema: Option<String>,
    pub relation: String,
    pub user_variable: Option<String>,
    pub reverse_link: bool,
}

impl RelationFactorNode {
    pub fn named(relation: &str) -> Self {
        Self {
            schema: None,
            relation: relation.to_owned(),
            user_variable: None,
            reverse_link: false,
        }
    }
}

/// Expression node. Operator text is kept verbatim (lowercased for word
/// operators) so the adapter owns the token-to-operator mapping.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprNode {
    /// Literal text, raw: numbers, quoted strings, NULL.
    Literal(String),
    True,
    False,
    /// `@uv` reference.
    UserVariable(String),
    /// Dotted name; `star` marks a trailing `.*` (or a bare `*` with no
    /// parts, as in `count(*)`).
    NameChain { parts: Vec<String>, star: bool },
    Unary {
        op: String,
        operand: Box<ExprNode>,
    },
    Binary {
        left: Box<ExprNode>,
        op: String,
        right: Box<ExprNode>,
    },
    FunctionCall {
        name: String,
        args: Vec<ExprNode>,
    },
    /// Parenthesized expression list of two or more elements.
    List(Vec<ExprNode>),
    Interval {
        value: Box<ExprNode>,
        unit: String,
    },
}

impl ExprNode {
    pub fn name(part: &str) -> Self {
        ExprNode::NameChain {
            parts: vec![part.to_owned()],
            star: false,
        }
    }

    pub fn binary(left: ExprNode, op: &str, right: ExprNode) -> Self {
        ExprNode::Binary {
            left: Box::new(left),
            op: op.to_owned(),
            right: Box::new(right),
        }
    }
}

/// Raw data type spelling: name keywords as written plus every trailing
/// piece the grammar recognizes. The adapter decides which combinations are
/// meaningful per dialect.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DataTypeNode {
    /// Type name keywords in source order (`varchar`, `double precision`).
    pub name: Vec<String>,
    /// Parenthesized arguments.
    pub args: Vec<TypeArgNode>,
    /// Oracle `CHAR` / `BYTE` length unit.
    pub length_unit: Option<String>,
    /// `UNSIGNED`, `SIGNED`, `ZEROFILL`, `BINARY` in source order.
    pub modifiers: Vec<String>,
    pub charset: Option<String>,
    pub collation: Option<String>,
    /// ENUM / SET literal list, raw quoted text.
    pub literals: Vec<String>,
    pub with_time_zone: bool,
    pub with_local_time_zone: bool,
    /// Oracle INTERVAL type shapes.
    pub interval: Option<IntervalTypeNode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeArgNode {
    Number(String),
    Star,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntervalTypeNode {
    YearToMonth {
        year_precision: Option<String>,
    },
    DayToSecond {
        day_precision: Option<String>,
        second_precision: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum StatementNode {
    CreateTable(CreateTableNode),
    AlterTable(AlterTableNode),
    DropTable(DropTableNode),
    DropIndex(DropIndexNode),
    CreateIndex(CreateIndexNode),
    RenameTable(RenameTableNode),
    TruncateTable(TruncateTableNode),
    Insert(InsertNode),
    Update(UpdateNode),
    Delete(DeleteNode),
    Select(SelectNode),
    CreateMaterializedView(CreateMaterializedViewNode),
    Comment(CommentNode),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateTableNode {
    pub temporary: bool,
    pub external: bool,
    pub if_not_exists: bool,
    pub table: RelationFactorNode,
    pub elements: Vec<TableElementNode>,
    pub options: Vec<TableOptionNode>,
    pub partition: Option<PartitionNode>,
    pub column_groups: Option<Vec<ColumnGroupNode>>,
    pub as_select: Option<Box<SelectNode>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TableElementNode {
    Column(ColumnDefNode),
    Constraint(ConstraintNode),
    Index(IndexElementNode),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDefNode {
    pub name: String,
    pub data_type: DataTypeNode,
    pub attrs: Vec<ColumnAttrNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ColumnAttrNode {
    Null,
    NotNull,
    Default(ExprNode),
    AutoIncrement,
    PrimaryKey,
    UniqueKey,
    Comment(String),
    OnUpdate(ExprNode),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintNode {
    pub name: Option<String>,
    pub kind: ConstraintKindNode,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConstraintKindNode {
    PrimaryKey(Vec<SortColumnNode>),
    Unique(Vec<SortColumnNode>),
    ForeignKey {
        columns: Vec<String>,
        ref_table: RelationFactorNode,
        ref_columns: Vec<String>,
    },
    Check(ExprNode),
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndexElementNode {
    pub name: Option<String>,
    pub columns: Vec<SortColumnNode>,
    pub options: Vec<TableOptionNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SortColumnNode {
    pub expr: ExprNode,
    /// `asc` / `desc` token if present.
    pub direction: Option<String>,
}

/// One table or index option as written: canonical uppercase key plus a
/// shape-typed value. Folding into the option bag happens in the adapter.
#[derive(Debug, Clone, PartialEq)]
pub struct TableOptionNode {
    pub name: String,
    pub value: OptionValueNode,
}

#[derive(Debug, Clone, PartialEq)]
pub enum OptionValueNode {
    None,
    Number(String),
    Str(String),
    Ident(String),
    Bool(bool),
    ExprList(Vec<ExprNode>),
    IdentList(Vec<String>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum PartitionNode {
    Hash {
        keys: Vec<ExprNode>,
        count: Option<String>,
        elements: Option<Vec<PartitionElementNode>>,
    },
    Key {
        columns: Vec<String>,
        count: Option<String>,
    },
    Range {
        keys: Vec<ExprNode>,
        columns: bool,
        elements: Vec<PartitionElementNode>,
    },
    List {
        keys: Vec<ExprNode>,
        columns: bool,
        elements: Vec<PartitionElementNode>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct PartitionElementNode {
    pub name: String,
    pub values: PartitionElementValuesNode,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PartitionElementValuesNode {
    Hash,
    LessThan(Vec<PartitionValueNode>),
    In(Vec<PartitionValueNode>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum PartitionValueNode {
    Expr(ExprNode),
    MaxValue,
    Default,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnGroupNode {
    AllColumns,
    EachColumn,
    Named { name: String, columns: Vec<String> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AlterTableNode {
    pub table: RelationFactorNode,
    pub actions: Vec<AlterActionNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AlterActionNode {
    Options(Vec<TableOptionNode>),
    AddColumns(Vec<ColumnDefNode>),
    DropColumn {
        name: String,
        /// `cascade` / `restrict` token if present.
        behavior: Option<String>,
    },
    ModifyColumns(Vec<ColumnDefNode>),
    ChangeColumn {
        from: String,
        def: ColumnDefNode,
    },
    RenameColumn {
        from: String,
        to: String,
    },
    RenameTo(RelationFactorNode),
    AddConstraint(ConstraintNode),
    DropConstraints(Vec<String>),
    AddIndex(IndexElementNode),
    DropIndex(String),
    RenameIndex {
        from: String,
        to: String,
    },
    AddPartitions(Vec<PartitionElementNode>),
    DropPartitions(Vec<String>),
    TruncatePartitions(Vec<String>),
    AddColumnGroups(Vec<ColumnGroupNode>),
    DropColumnGroups(Vec<ColumnGroupNode>),
    DropPrimaryKey,
    RemovePartitioning,
    Refresh,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropTableNode {
    pub temporary: bool,
    pub materialized: bool,
    pub if_exists: bool,
    pub tables: Vec<RelationFactorNode>,
    pub cascade_constraints: bool,
    pub purge: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropIndexNode {
    pub index: RelationFactorNode,
    pub on: Option<RelationFactorNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateIndexNode {
    pub unique: bool,
    pub index: RelationFactorNode,
    pub on: RelationFactorNode,
    pub columns: Vec<SortColumnNode>,
    pub options: Vec<TableOptionNode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameTableNode {
    pub pairs: Vec<(RelationFactorNode, RelationFactorNode)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruncateTableNode {
    pub table: RelationFactorNode,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InsertNode {
    pub table: RelationFactorNode,
    pub partition: Option<Vec<String>>,
    pub columns: Option<Vec<Vec<String>>>,
    pub values: Vec<Vec<ExprNode>>,
    pub select: Option<Box<SelectNode>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateNode {
    pub table_refs: Vec<TableRefNode>,
    /// Assignment targets as dotted name chains.
    pub assigns: Vec<(Vec<String>, ExprNode)>,
    pub where_clause: Option<ExprNode>,
    pub raw_text: String,
}

/// DELETE in either shape. `relations` empty means single-table delete and
/// `table_refs` holds the one target.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteNode {
    pub relations: Vec<DeleteRelationNode>,
    pub using: bool,
    pub table_refs: Vec<TableRefNode>,
    pub where_clause: Option<ExprNode>,
    pub raw_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteRelationNode {
    pub schema: Option<String>,
    pub relation: String,
    pub star: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectNode {
    pub qualifier: Option<String>,
    pub items: Vec<ProjectionNode>,
    pub from: Vec<TableRefNode>,
    pub where_clause: Option<ExprNode>,
    pub group_by: Vec<ExprNode>,
    pub having: Option<ExprNode>,
    pub order_by: Vec<SortColumnNode>,
    pub limit: Option<LimitNode>,
    pub fetch: Option<FetchNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProjectionNode {
    Star,
    Expr {
        expr: ExprNode,
        alias: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum TableRefNode {
    Named {
        factor: RelationFactorNode,
        alias: Option<String>,
        partition: Option<Vec<String>>,
        flashback: Option<FlashbackNode>,
    },
    /// `join_tokens` is the keyword run as written (`natural right outer
    /// join`), lowercased.
    Joined {
        left: Box<TableRefNode>,
        join_tokens: Vec<String>,
        right: Box<TableRefNode>,
        condition: Option<JoinConditionNode>,
    },
    /// Parenthesized reference list, possibly nested.
    Paren(Vec<TableRefNode>),
    Subquery {
        select: Box<SelectNode>,
        alias: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct FlashbackNode {
    /// `snapshot`, `scn` or `timestamp`.
    pub kind: String,
    pub expr: ExprNode,
}

#[derive(Debug, Clone, PartialEq)]
pub enum JoinConditionNode {
    On(ExprNode),
    /// USING column chains.
    Using(Vec<Vec<String>>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LimitNode {
    pub count: ExprNode,
    pub offset: Option<ExprNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FetchNode {
    pub count: Option<ExprNode>,
    pub offset: Option<ExprNode>,
    pub percent: bool,
    pub with_ties: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateMaterializedViewNode {
    pub view: RelationFactorNode,
    /// Refresh and rewrite options in source order; the adapter folds them.
    pub options: Vec<MViewOptionNode>,
    pub table_options: Vec<TableOptionNode>,
    pub partition: Option<PartitionNode>,
    pub select: Box<SelectNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MViewOptionNode {
    NeverRefresh,
    Refresh {
        /// `complete`, `fast` or `force`.
        method: String,
        /// `demand`, `commit` or `statement`.
        on: Option<String>,
        start_with: Option<ExprNode>,
        next: Option<ExprNode>,
    },
    /// ENABLE/DISABLE QUERY REWRITE, polarity as stated.
    QueryRewrite(bool),
    /// ENABLE/DISABLE ON QUERY COMPUTATION, polarity as stated.
    OnQueryComputation(bool),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentNode {
    pub on_column: bool,
    /// Dotted target name as written.
    pub chain: Vec<String>,
    /// Raw quoted comment text.
    pub comment: String,
}
