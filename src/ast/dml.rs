// DML model: insert, update, delete

use crate::ast::expr::{ColumnReference, Expression};
use crate::ast::select::{FromReference, SelectBody};
use crate::ast::RelationFactor;

#[derive(Debug, Clone, PartialEq)]
pub struct Insert {
    pub relation: RelationFactor,
    pub partition_usage: Option<crate::ast::select::PartitionUsage>,
    pub columns: Option<Vec<ColumnReference>>,
    pub values: Vec<Vec<Expression>>,
    pub as_query: Option<SelectBody>,
}

impl Insert {
    pub fn new(relation: RelationFactor) -> Self {
        Self {
            relation,
            partition_usage: None,
            columns: None,
            values: Vec::new(),
            as_query: None,
        }
    }
}

/// UPDATE. `source_text` is an auxiliary attribute for raw-text recovery,
/// captured once from the statement's source span; it does not participate
/// in structural equality.
#[derive(Debug, Clone)]
pub struct Update {
    pub table_references: Vec<FromReference>,
    pub assigns: Vec<UpdateAssign>,
    pub where_clause: Option<Expression>,
    pub source_text: String,
}

impl PartialEq for Update {
    fn eq(&self, other: &Self) -> bool {
        self.table_references == other.table_references
            && self.assigns == other.assigns
            && self.where_clause == other.where_clause
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateAssign {
    pub column: ColumnReference,
    pub value: Expression,
}

/// DELETE. Same raw-text recovery arrangement as [`Update`].
#[derive(Debug, Clone)]
pub struct Delete {
    pub target: DeleteTarget,
    pub where_clause: Option<Expression>,
    pub source_text: String,
}

impl Delete {
    pub fn new(target: DeleteTarget) -> Self {
        Self {
            target,
            where_clause: None,
            source_text: String::new(),
        }
    }
}

impl PartialEq for Delete {
    fn eq(&self, other: &Self) -> bool {
        self.target == other.target && self.where_clause == other.where_clause
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeleteTarget {
    Single(FromReference),
    Multi(MultiDelete),
}

/// MySQL multi-table delete: `DELETE t1, t2 FROM …` or
/// `DELETE FROM t1, t2 USING …`.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiDelete {
    pub relations: Vec<DeleteRelation>,
    pub using: bool,
    pub table_references: Vec<FromReference>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteRelation {
    pub schema: Option<String>,
    pub relation: String,
    pub star: bool,
}

impl DeleteRelation {
    pub fn new(schema: Option<&str>, relation: &str, star: bool) -> Self {
        Self {
            schema: schema.map(str::to_owned),
            relation: relation.to_owned(),
            star,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::select::NameReference;

    #[test]
    fn delete_equality_ignores_source_text() {
        let target = DeleteTarget::Single(FromReference::Name(NameReference::new(
            None, "t1", None,
        )));
        let a = Delete {
            target: target.clone(),
            where_clause: None,
            source_text: "delete from t1".to_owned(),
        };
        let b = Delete {
            target,
            where_clause: None,
            source_text: "DELETE  FROM  t1".to_owned(),
        };
        assert_eq!(a, b);
    }
}
