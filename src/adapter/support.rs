// Pieces of adaptation logic identical in both dialects: token-to-tag
// maps and the option-bag folds. Anything with dialect-divergent shape
// stays in the dialect modules.

use crate::ast::{
    ColumnGroupElement, ColumnReference, Expression, IndexOptions, JoinType, Operator, Partition,
    PartitionElement, PartitionValue, RelationFactor, SortColumn, SortDirection, TableOptions,
};
use crate::ast::{HashPartition, KeyPartition, ListPartition, RangePartition};
use crate::cst::{
    ColumnGroupNode, ExprNode, OptionValueNode, PartitionElementNode, PartitionElementValuesNode,
    PartitionNode, PartitionValueNode, RelationFactorNode, SortColumnNode, TableOptionNode,
};
use crate::error::AdaptError;

/// Dialect-specific expression adaptation, injected where shared folds need
/// to adapt sub-expressions.
pub(crate) type ExprFn<'a> = &'a dyn Fn(&ExprNode) -> Result<Expression, AdaptError>;

pub(crate) fn operator_for(token: &str) -> Result<Operator, AdaptError> {
    let op = match token {
        "=" => Operator::Eq,
        "!=" | "<>" => Operator::Ne,
        ">" => Operator::Gt,
        ">=" => Operator::Ge,
        "<" => Operator::Lt,
        "<=" => Operator::Le,
        "<=>" => Operator::NullSafeEq,
        "+" => Operator::Add,
        "-" => Operator::Sub,
        "*" => Operator::Mul,
        "/" => Operator::Div,
        "%" => Operator::Mod,
        "and" => Operator::And,
        "or" => Operator::Or,
        "not" => Operator::Not,
        "like" => Operator::Like,
        "not like" => Operator::NotLike,
        "in" => Operator::In,
        "not in" => Operator::NotIn,
        "between" => Operator::Between,
        "not between" => Operator::NotBetween,
        "is" => Operator::Is,
        "is not" => Operator::IsNot,
        "||" => Operator::Cnnop,
        ":=" => Operator::SetVar,
        "&" => Operator::BitAnd,
        "|" => Operator::BitOr,
        "^" => Operator::BitXor,
        "<<" => Operator::LeftShift,
        ">>" => Operator::RightShift,
        other => {
            return Err(AdaptError::new(
                "expression",
                format!("unsupported operator '{other}'"),
            ))
        }
    };
    Ok(op)
}

pub(crate) fn join_type_for(tokens: &[String]) -> Result<JoinType, AdaptError> {
    let spelling = tokens.join(" ");
    let join_type = match spelling.as_str() {
        "join" => JoinType::Join,
        "inner join" => JoinType::InnerJoin,
        "cross join" => JoinType::CrossJoin,
        "straight_join" => JoinType::StraightJoin,
        "left join" => JoinType::LeftJoin,
        "left outer join" => JoinType::LeftOuterJoin,
        "right join" => JoinType::RightJoin,
        "right outer join" => JoinType::RightOuterJoin,
        "full join" => JoinType::FullJoin,
        "full outer join" => JoinType::FullOuterJoin,
        "natural join" => JoinType::NaturalJoin,
        "natural inner join" => JoinType::NaturalInnerJoin,
        "natural left join" => JoinType::NaturalLeftJoin,
        "natural left outer join" => JoinType::NaturalLeftOuterJoin,
        "natural right join" => JoinType::NaturalRightJoin,
        "natural right outer join" => JoinType::NaturalRightOuterJoin,
        "natural full join" => JoinType::NaturalFullJoin,
        "natural full outer join" => JoinType::NaturalFullOuterJoin,
        other => {
            return Err(AdaptError::new(
                "join",
                format!("unsupported join spelling '{other}'"),
            ))
        }
    };
    Ok(join_type)
}

pub(crate) fn relation_factor(node: &RelationFactorNode) -> RelationFactor {
    RelationFactor {
        schema: node.schema.clone(),
        relation: node.relation.clone(),
        user_variable: node.user_variable.clone(),
        reverse_link: node.reverse_link,
    }
}

pub(crate) fn direction(token: &Option<String>) -> Option<SortDirection> {
    token.as_deref().map(|t| {
        if t.eq_ignore_ascii_case("desc") {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    })
}

pub(crate) fn sort_column(node: &SortColumnNode, f: ExprFn) -> Result<SortColumn, AdaptError> {
    Ok(SortColumn::new(f(&node.expr)?, direction(&node.direction)))
}

pub(crate) fn column_group(node: &ColumnGroupNode) -> ColumnGroupElement {
    match node {
        ColumnGroupNode::AllColumns => ColumnGroupElement::AllColumns,
        ColumnGroupNode::EachColumn => ColumnGroupElement::EachColumn,
        ColumnGroupNode::Named { name, columns } => ColumnGroupElement::Named {
            name: name.clone(),
            columns: columns.clone(),
        },
    }
}

// ---------------------------------------------------------------------------
// Option bags

fn num_value(name: &str, value: &OptionValueNode) -> Result<u64, AdaptError> {
    match value {
        OptionValueNode::Number(n) => n.parse().map_err(|_| {
            AdaptError::new("table option", format!("{name} value '{n}' is not an integer"))
        }),
        _ => Err(AdaptError::new(
            "table option",
            format!("{name} requires an integer value"),
        )),
    }
}

fn text_value(name: &str, value: &OptionValueNode) -> Result<String, AdaptError> {
    match value {
        OptionValueNode::Str(raw) => Ok(raw.clone()),
        OptionValueNode::Ident(s) => Ok(s.clone()),
        OptionValueNode::Number(n) => Ok(n.clone()),
        _ => Err(AdaptError::new(
            "table option",
            format!("{name} requires a value"),
        )),
    }
}

fn bool_value(name: &str, value: &OptionValueNode) -> Result<bool, AdaptError> {
    match value {
        OptionValueNode::Bool(b) => Ok(*b),
        _ => Err(AdaptError::new(
            "table option",
            format!("{name} requires TRUE or FALSE"),
        )),
    }
}

/// Folds option nodes into the neutral option bag. Every arm writes exactly
/// one field; options never default or imply one another.
pub(crate) fn fold_table_options(
    nodes: &[TableOptionNode],
    f: ExprFn,
) -> Result<TableOptions, AdaptError> {
    let mut opts = TableOptions::default();
    for node in nodes {
        let name = node.name.as_str();
        let value = &node.value;
        match name {
            "SORTKEY" => match value {
                OptionValueNode::IdentList(names) => {
                    opts.sort_keys = Some(
                        names
                            .iter()
                            .map(|n| ColumnReference::new(None, None, n))
                            .collect(),
                    );
                }
                _ => return Err(AdaptError::new("table option", "SORTKEY requires columns")),
            },
            "PARALLEL" => opts.parallel = Some(num_value(name, value)?),
            "NOPARALLEL" => opts.no_parallel = Some(true),
            "TABLE_MODE" => opts.table_mode = Some(text_value(name, value)?),
            "DUPLICATE_SCOPE" => opts.duplicate_scope = Some(text_value(name, value)?),
            "COMMENT" => opts.comment = Some(text_value(name, value)?),
            "BLOCK_SIZE" => opts.block_size = Some(num_value(name, value)?),
            "REPLICA_NUM" => opts.replica_num = Some(num_value(name, value)?),
            "USE_BLOOM_FILTER" => opts.use_bloom_filter = Some(bool_value(name, value)?),
            "TABLET_SIZE" => opts.tablet_size = Some(num_value(name, value)?),
            "PCTFREE" => opts.pct_free = Some(num_value(name, value)?),
            "PCTUSED" => opts.pct_used = Some(num_value(name, value)?),
            "INITRANS" => opts.ini_trans = Some(num_value(name, value)?),
            "MAXTRANS" => opts.max_trans = Some(num_value(name, value)?),
            "STORAGE" => match value {
                OptionValueNode::IdentList(words) => opts.storage = Some(words.clone()),
                _ => return Err(AdaptError::new("table option", "STORAGE requires a clause")),
            },
            "TABLESPACE" => opts.tablespace = Some(text_value(name, value)?),
            "COMPRESS" => {
                opts.compress = Some(match value {
                    OptionValueNode::Ident(level) => level.clone(),
                    _ => String::new(),
                })
            }
            "NOCOMPRESS" => opts.no_compress = Some(true),
            "COMPRESSION" => opts.compression = Some(text_value(name, value)?),
            "CHARSET" => opts.charset = Some(text_value(name, value)?),
            "COLLATE" => opts.collation = Some(text_value(name, value)?),
            "ROW_FORMAT" => opts.row_format = Some(text_value(name, value)?),
            "ENGINE" => opts.engine = Some(text_value(name, value)?),
            "AUTO_INCREMENT" => opts.auto_increment = Some(text_value(name, value)?),
            "PRIMARY_ZONE" => opts.primary_zone = Some(text_value(name, value)?),
            "TABLEGROUP" => opts.table_group = Some(text_value(name, value)?),
            "READ_ONLY" => opts.read_only = Some(true),
            "READ_WRITE" => opts.read_write = Some(true),
            "ENABLE_ROW_MOVEMENT" => opts.enable_row_movement = Some(true),
            "DISABLE_ROW_MOVEMENT" => opts.disable_row_movement = Some(true),
            "KEY_BLOCK_SIZE" => opts.key_block_size = Some(num_value(name, value)?),
            "MAX_ROWS" => opts.max_rows = Some(num_value(name, value)?),
            "MIN_ROWS" => opts.min_rows = Some(num_value(name, value)?),
            "CHECKSUM" => opts.checksum = Some(num_value(name, value)?),
            "AVG_ROW_LENGTH" => opts.avg_row_length = Some(num_value(name, value)?),
            "EXPIRE_INFO" => match value {
                OptionValueNode::ExprList(exprs) if exprs.len() == 1 => {
                    opts.expire_info = Some(f(&exprs[0])?);
                }
                _ => {
                    return Err(AdaptError::new(
                        "table option",
                        "EXPIRE_INFO requires one expression",
                    ))
                }
            },
            "LOCATION" => opts.location = Some(text_value(name, value)?),
            other => {
                return Err(AdaptError::new(
                    "table option",
                    format!("unsupported option '{other}'"),
                ))
            }
        }
    }
    Ok(opts)
}

pub(crate) fn fold_index_options(nodes: &[TableOptionNode]) -> Result<IndexOptions, AdaptError> {
    let mut opts = IndexOptions::default();
    for node in nodes {
        let name = node.name.as_str();
        let value = &node.value;
        match name {
            "GLOBAL" => opts.global = Some(true),
            "LOCAL" => opts.global = Some(false),
            "BLOCK_SIZE" => opts.block_size = Some(num_value(name, value)?),
            "COMMENT" => opts.comment = Some(text_value(name, value)?),
            "VISIBLE" => opts.visible = Some(true),
            "INVISIBLE" => opts.visible = Some(false),
            "PARALLEL" => opts.parallel = Some(num_value(name, value)?),
            "NOPARALLEL" => opts.no_parallel = Some(true),
            // access-method hint carries no neutral meaning
            "USING" => {}
            other => {
                return Err(AdaptError::new(
                    "index option",
                    format!("unsupported option '{other}'"),
                ))
            }
        }
    }
    Ok(opts)
}

// ---------------------------------------------------------------------------
// Partitions

fn count_value(count: &Option<String>) -> Result<Option<u64>, AdaptError> {
    count
        .as_deref()
        .map(|n| {
            n.parse().map_err(|_| {
                AdaptError::new("partition", format!("partition count '{n}' is not an integer"))
            })
        })
        .transpose()
}

pub(crate) fn adapt_partition(node: &PartitionNode, f: ExprFn) -> Result<Partition, AdaptError> {
    match node {
        PartitionNode::Hash {
            keys,
            count,
            elements,
        } => Ok(Partition::Hash(HashPartition {
            keys: keys.iter().map(f).collect::<Result<_, _>>()?,
            partition_count: count_value(count)?,
            elements: elements
                .as_deref()
                .map(|els| adapt_partition_elements(els, f))
                .transpose()?,
        })),
        PartitionNode::Key { columns, count } => Ok(Partition::Key(KeyPartition {
            columns: columns.clone(),
            partition_count: count_value(count)?,
        })),
        PartitionNode::Range {
            keys,
            columns,
            elements,
        } => Ok(Partition::Range(RangePartition {
            keys: keys.iter().map(f).collect::<Result<_, _>>()?,
            columns: *columns,
            elements: adapt_partition_elements(elements, f)?,
        })),
        PartitionNode::List {
            keys,
            columns,
            elements,
        } => Ok(Partition::List(ListPartition {
            keys: keys.iter().map(f).collect::<Result<_, _>>()?,
            columns: *columns,
            elements: adapt_partition_elements(elements, f)?,
        })),
    }
}

pub(crate) fn adapt_partition_elements(
    nodes: &[PartitionElementNode],
    f: ExprFn,
) -> Result<Vec<PartitionElement>, AdaptError> {
    nodes.iter().map(|n| partition_element(n, f)).collect()
}

fn partition_element(
    node: &PartitionElementNode,
    f: ExprFn,
) -> Result<PartitionElement, AdaptError> {
    match &node.values {
        PartitionElementValuesNode::Hash => Ok(PartitionElement::Hash {
            name: node.name.clone(),
        }),
        PartitionElementValuesNode::LessThan(values) => Ok(PartitionElement::Range {
            name: node.name.clone(),
            less_than: values
                .iter()
                .map(|v| partition_value(v, f))
                .collect::<Result<_, _>>()?,
        }),
        PartitionElementValuesNode::In(values) => Ok(PartitionElement::List {
            name: node.name.clone(),
            values: values
                .iter()
                .map(|v| partition_value(v, f))
                .collect::<Result<_, _>>()?,
        }),
    }
}

fn partition_value(node: &PartitionValueNode, f: ExprFn) -> Result<PartitionValue, AdaptError> {
    match node {
        PartitionValueNode::Expr(e) => Ok(PartitionValue::Expr(f(e)?)),
        PartitionValueNode::MaxValue => Ok(PartitionValue::MaxValue),
        PartitionValueNode::Default => Ok(PartitionValue::Default),
    }
}
