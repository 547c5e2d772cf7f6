// DDL model: table elements, option bags, partitions, alter actions

use crate::ast::datatype::DataType;
use crate::ast::expr::{ColumnReference, Expression};
use crate::ast::select::SortDirection;
use crate::ast::RelationFactor;

#[derive(Debug, Clone, PartialEq)]
pub enum TableElement {
    Column(ColumnDefinition),
    Constraint(OutOfLineConstraint),
    Index(OutOfLineIndex),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDefinition {
    pub name: String,
    pub data_type: DataType,
    pub attributes: ColumnAttributes,
}

impl ColumnDefinition {
    pub fn new(name: &str, data_type: DataType) -> Self {
        Self {
            name: name.to_owned(),
            data_type,
            attributes: ColumnAttributes::default(),
        }
    }
}

/// In-line column attributes. `nullable` distinguishes an explicit NULL /
/// NOT NULL from silence.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColumnAttributes {
    pub nullable: Option<bool>,
    pub default_value: Option<Expression>,
    pub auto_increment: bool,
    pub primary_key: bool,
    pub unique: bool,
    pub comment: Option<String>,
    pub on_update: Option<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutOfLineConstraint {
    pub name: Option<String>,
    pub kind: ConstraintKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConstraintKind {
    PrimaryKey(Vec<SortColumn>),
    Unique(Vec<SortColumn>),
    ForeignKey {
        columns: Vec<String>,
        ref_relation: RelationFactor,
        ref_columns: Vec<String>,
    },
    Check(Expression),
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutOfLineIndex {
    pub name: Option<String>,
    pub columns: Vec<SortColumn>,
    pub options: Option<IndexOptions>,
}

/// Index or constraint key column with optional direction.
#[derive(Debug, Clone, PartialEq)]
pub struct SortColumn {
    pub column: Expression,
    pub direction: Option<SortDirection>,
}

impl SortColumn {
    pub fn new(column: Expression, direction: Option<SortDirection>) -> Self {
        Self { column, direction }
    }

    pub fn named(name: &str) -> Self {
        Self::new(Expression::column(name), None)
    }
}

/// Table option bag. Every field is independently optional and written only
/// when the corresponding clause token appeared in source; no field defaults
/// another.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableOptions {
    pub sort_keys: Option<Vec<ColumnReference>>,
    pub parallel: Option<u64>,
    pub no_parallel: Option<bool>,
    pub table_mode: Option<String>,
    pub duplicate_scope: Option<String>,
    pub comment: Option<String>,
    pub block_size: Option<u64>,
    pub replica_num: Option<u64>,
    pub use_bloom_filter: Option<bool>,
    pub tablet_size: Option<u64>,
    pub pct_free: Option<u64>,
    pub pct_used: Option<u64>,
    pub ini_trans: Option<u64>,
    pub max_trans: Option<u64>,
    pub storage: Option<Vec<String>>,
    pub tablespace: Option<String>,
    pub compress: Option<String>,
    pub no_compress: Option<bool>,
    pub compression: Option<String>,
    pub charset: Option<String>,
    pub collation: Option<String>,
    pub row_format: Option<String>,
    pub engine: Option<String>,
    pub auto_increment: Option<String>,
    pub primary_zone: Option<String>,
    pub table_group: Option<String>,
    pub read_only: Option<bool>,
    pub read_write: Option<bool>,
    pub enable_row_movement: Option<bool>,
    pub disable_row_movement: Option<bool>,
    pub key_block_size: Option<u64>,
    pub max_rows: Option<u64>,
    pub min_rows: Option<u64>,
    pub checksum: Option<u64>,
    pub avg_row_length: Option<u64>,
    pub expire_info: Option<Expression>,
    pub location: Option<String>,
}

impl TableOptions {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Index option bag, same write-only-what-was-stated discipline.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IndexOptions {
    pub global: Option<bool>,
    pub parallel: Option<u64>,
    pub no_parallel: Option<bool>,
    pub block_size: Option<u64>,
    pub comment: Option<String>,
    pub visible: Option<bool>,
}

impl IndexOptions {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Partition {
    Hash(HashPartition),
    Key(KeyPartition),
    Range(RangePartition),
    List(ListPartition),
}

/// Count-only, enumerated-element-list, or both.
#[derive(Debug, Clone, PartialEq)]
pub struct HashPartition {
    pub keys: Vec<Expression>,
    pub partition_count: Option<u64>,
    pub elements: Option<Vec<PartitionElement>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeyPartition {
    pub columns: Vec<String>,
    pub partition_count: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RangePartition {
    pub keys: Vec<Expression>,
    /// RANGE COLUMNS (…) vs plain RANGE (…).
    pub columns: bool,
    pub elements: Vec<PartitionElement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListPartition {
    pub keys: Vec<Expression>,
    pub columns: bool,
    pub elements: Vec<PartitionElement>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PartitionElement {
    Hash {
        name: String,
    },
    Range {
        name: String,
        less_than: Vec<PartitionValue>,
    },
    List {
        name: String,
        values: Vec<PartitionValue>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum PartitionValue {
    Expr(Expression),
    MaxValue,
    Default,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnGroupElement {
    AllColumns,
    EachColumn,
    Named {
        name: String,
        columns: Vec<String>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AlterTable {
    pub relation: RelationFactor,
    /// Actions in statement order; one ALTER TABLE may mix unrelated
    /// actions.
    pub actions: Vec<AlterTableAction>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AlterTableAction {
    TableOptions(TableOptions),
    AddColumns(Vec<ColumnDefinition>),
    DropColumn {
        column: String,
        behavior: Option<DropColumnBehavior>,
    },
    ModifyColumns(Vec<ColumnDefinition>),
    ChangeColumn {
        from: String,
        definition: ColumnDefinition,
    },
    RenameColumn {
        from: String,
        to: String,
    },
    RenameTo(RelationFactor),
    AddConstraint(OutOfLineConstraint),
    DropConstraints(Vec<String>),
    AddIndex(OutOfLineIndex),
    DropIndex(String),
    RenameIndex {
        from: String,
        to: String,
    },
    AddPartitions(Vec<PartitionElement>),
    DropPartitions(Vec<String>),
    TruncatePartitions(Vec<String>),
    AddColumnGroups(Vec<ColumnGroupElement>),
    DropColumnGroups(Vec<ColumnGroupElement>),
    DropPrimaryKey,
    RemovePartitioning,
    Refresh,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropColumnBehavior {
    Cascade,
    Restrict,
}

/// DROP TABLE. The keyword variants (TABLE/TABLES), TEMPORARY, MATERIALIZED
/// and IF EXISTS are independent orthogonal flags; CASCADE CONSTRAINTS and
/// PURGE are Oracle-only and distinct from each other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropTable {
    pub temporary: bool,
    pub materialized: bool,
    pub if_exists: bool,
    pub relations: Vec<RelationFactor>,
    pub cascade_constraints: bool,
    pub purge: bool,
}

impl DropTable {
    pub fn new(relations: Vec<RelationFactor>) -> Self {
        Self {
            temporary: false,
            materialized: false,
            if_exists: false,
            relations,
            cascade_constraints: false,
            purge: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropIndex {
    pub index: RelationFactor,
    /// MySQL `DROP INDEX idx ON tbl`; absent in Oracle mode.
    pub on: Option<RelationFactor>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateIndex {
    pub unique: bool,
    pub index: RelationFactor,
    pub on: RelationFactor,
    pub columns: Vec<SortColumn>,
    pub options: Option<IndexOptions>,
}

impl CreateIndex {
    pub fn new(index: RelationFactor, on: RelationFactor, columns: Vec<SortColumn>) -> Self {
        Self {
            unique: false,
            index,
            on,
            columns,
            options: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameTable {
    pub actions: Vec<RenameTableAction>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameTableAction {
    pub from: RelationFactor,
    pub to: RelationFactor,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruncateTable {
    pub relation: RelationFactor,
}

/// Oracle `COMMENT ON TABLE … IS …` / `COMMENT ON COLUMN … IS …`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetComment {
    pub target: CommentTarget,
    pub comment: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentTarget {
    Table(RelationFactor),
    Column(ColumnReference),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_table_options_is_empty() {
        assert!(TableOptions::default().is_empty());
        let opts = TableOptions {
            parallel: Some(12),
            ..Default::default()
        };
        assert!(!opts.is_empty());
    }
}
