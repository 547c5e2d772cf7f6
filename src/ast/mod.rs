// Dialect-neutral AST types

pub mod datatype;
pub mod dml;
pub mod expr;
pub mod mview;
pub mod select;
pub mod table;

pub use datatype::{
    CharacterType, CollectionType, DataType, GeneralDataType, IntervalType, LengthOption,
    NumberType, TimestampType,
};
pub use dml::{Delete, DeleteRelation, DeleteTarget, Insert, MultiDelete, Update, UpdateAssign};
pub use expr::{
    BoolValue, CollectionExpression, ColumnReference, CompoundExpression, ConstExpression,
    Expression, FunctionCall, IntervalExpression, Operator, RelationReference,
};
pub use mview::{
    CreateMaterializedView, MaterializedViewOptions, MaterializedViewRefreshOpts, RefreshMethod,
    RefreshOn,
};
pub use select::{
    ExpressionReference, Fetch, FlashbackType, FlashbackUsage, FromReference, JoinCondition,
    JoinReference, JoinType, Limit, NameReference, PartitionUsage, Projection, Select, SelectBody,
    SelectQualifier, SortDirection, SortKey,
};
pub use table::{
    AlterTable, AlterTableAction, ColumnAttributes, ColumnDefinition, ColumnGroupElement,
    CommentTarget, ConstraintKind, CreateIndex, DropColumnBehavior, DropIndex, DropTable,
    HashPartition, IndexOptions, KeyPartition, ListPartition, OutOfLineConstraint, OutOfLineIndex,
    Partition, PartitionElement, PartitionValue, RangePartition, RenameTable, RenameTableAction,
    SetComment, SortColumn, TableElement, TableOptions, TruncateTable,
};

/// Supported SQL dialects. A caller selects the dialect up front; there is
/// no auto-detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    MySql,
    Oracle,
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dialect::MySql => write!(f, "MySQL"),
            Dialect::Oracle => write!(f, "Oracle"),
        }
    }
}

/// A qualified relation (table, view or index) identifier: relation name
/// with optional schema qualifier, optional user-variable suffix (`@name`)
/// and an optional reverse-link marker (Oracle dblink-style `!`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RelationFactor {
    pub schema: Option<String>,
    pub relation: String,
    pub user_variable: Option<String>,
    pub reverse_link: bool,
}

impl RelationFactor {
    pub fn new(schema: Option<&str>, relation: &str) -> Self {
        Self {
            schema: schema.map(str::to_owned),
            relation: relation.to_owned(),
            user_variable: None,
            reverse_link: false,
        }
    }

    pub fn named(relation: &str) -> Self {
        Self::new(None, relation)
    }

    pub fn with_user_variable(mut self, user_variable: &str) -> Self {
        self.user_variable = Some(user_variable.to_owned());
        self
    }
}

/// One parsed SQL statement. Each variant carries exactly the clauses that
/// were present in the source text; absent optional clauses stay `None`.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    CreateTable(CreateTable),
    AlterTable(AlterTable),
    DropTable(DropTable),
    DropIndex(DropIndex),
    CreateIndex(CreateIndex),
    RenameTable(RenameTable),
    TruncateTable(TruncateTable),
    Insert(Insert),
    Update(Update),
    Delete(Delete),
    Select(Select),
    CreateMaterializedView(CreateMaterializedView),
    SetComment(SetComment),
}

/// CREATE TABLE: table elements plus independently optional clauses. The
/// clauses are not mutually exclusive; each is probed and attached on its
/// own.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateTable {
    pub temporary: bool,
    pub external: bool,
    pub if_not_exists: bool,
    pub relation: RelationFactor,
    pub elements: Vec<TableElement>,
    pub table_options: Option<TableOptions>,
    pub partition: Option<Partition>,
    pub column_groups: Option<Vec<ColumnGroupElement>>,
    pub as_query: Option<SelectBody>,
}

impl CreateTable {
    pub fn new(relation: RelationFactor) -> Self {
        Self {
            temporary: false,
            external: false,
            if_not_exists: false,
            relation,
            elements: Vec::new(),
            table_options: None,
            partition: None,
            column_groups: None,
            as_query: None,
        }
    }
}
