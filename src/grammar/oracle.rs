// Oracle-mode statement grammar

use super::{
    alter_table_stmt, create_index_tail, create_table_tail, data_type, expr, insert_stmt,
    name_chain, parse_complete, relation_factor, select, table_ref, truncate_stmt, update_stmt,
    TokenStream,
};
use crate::ast::Dialect;
use crate::cst::*;
use crate::error::SyntaxError;

pub fn parse_statement(sql: &str) -> Result<StatementNode, SyntaxError> {
    parse_complete(sql, Dialect::Oracle, statement)
}

pub fn parse_statements(sql: &str) -> Result<Vec<StatementNode>, SyntaxError> {
    let mut ts = TokenStream::new(sql, Dialect::Oracle)?;
    let mut statements = Vec::new();
    loop {
        while ts.accept_symbol(";") {}
        if ts.at_eof() {
            return Ok(statements);
        }
        statements.push(statement(&mut ts)?);
    }
}

pub fn parse_expression(sql: &str) -> Result<ExprNode, SyntaxError> {
    parse_complete(sql, Dialect::Oracle, expr)
}

pub fn parse_data_type(sql: &str) -> Result<DataTypeNode, SyntaxError> {
    parse_complete(sql, Dialect::Oracle, data_type)
}

pub fn parse_table_reference(sql: &str) -> Result<TableRefNode, SyntaxError> {
    parse_complete(sql, Dialect::Oracle, table_ref)
}

fn statement(ts: &mut TokenStream) -> Result<StatementNode, SyntaxError> {
    if ts.peek_kw("create") {
        return create(ts);
    }
    if ts.peek_kw("alter") {
        return Ok(StatementNode::AlterTable(alter_table_stmt(ts)?));
    }
    if ts.peek_kw("drop") {
        return drop_stmt(ts);
    }
    if ts.peek_kw("rename") {
        return rename_stmt(ts);
    }
    if ts.peek_kw("truncate") {
        return Ok(StatementNode::TruncateTable(truncate_stmt(ts)?));
    }
    if ts.peek_kw("insert") {
        return Ok(StatementNode::Insert(insert_stmt(ts)?));
    }
    if ts.peek_kw("update") {
        return Ok(StatementNode::Update(update_stmt(ts)?));
    }
    if ts.peek_kw("delete") {
        return delete_stmt(ts);
    }
    if ts.peek_kw("select") {
        return Ok(StatementNode::Select(select(ts)?));
    }
    if ts.peek_kw("comment") {
        return comment_stmt(ts);
    }
    Err(ts.error("unsupported statement"))
}

fn create(ts: &mut TokenStream) -> Result<StatementNode, SyntaxError> {
    ts.expect_kw("create")?;
    if ts.accept_kw("unique") {
        return Ok(StatementNode::CreateIndex(create_index_tail(ts, true)?));
    }
    if ts.peek_kw("index") {
        return Ok(StatementNode::CreateIndex(create_index_tail(ts, false)?));
    }
    ts.accept_kw("global");
    let temporary = ts.accept_kw("temporary");
    Ok(StatementNode::CreateTable(create_table_tail(
        ts, temporary, false,
    )?))
}

fn drop_stmt(ts: &mut TokenStream) -> Result<StatementNode, SyntaxError> {
    ts.expect_kw("drop")?;
    if ts.accept_kw("index") {
        let index = relation_factor(ts)?;
        return Ok(StatementNode::DropIndex(DropIndexNode { index, on: None }));
    }
    let materialized = ts.accept_kw("materialized");
    if materialized {
        ts.expect_kw("view")?;
    } else {
        ts.expect_kw("table")?;
    }
    let if_exists = if ts.peek_kw("if") {
        ts.bump();
        ts.expect_kw("exists")?;
        true
    } else {
        false
    };
    let mut tables = vec![relation_factor(ts)?];
    while ts.accept_symbol(",") {
        tables.push(relation_factor(ts)?);
    }
    let cascade_constraints = if ts.accept_kw("cascade") {
        ts.expect_kw("constraints")?;
        true
    } else {
        false
    };
    let purge = ts.accept_kw("purge");
    Ok(StatementNode::DropTable(DropTableNode {
        temporary: false,
        materialized,
        if_exists,
        tables,
        cascade_constraints,
        purge,
    }))
}

fn rename_stmt(ts: &mut TokenStream) -> Result<StatementNode, SyntaxError> {
    ts.expect_kw("rename")?;
    let from = relation_factor(ts)?;
    ts.expect_kw("to")?;
    let to = relation_factor(ts)?;
    Ok(StatementNode::RenameTable(RenameTableNode {
        pairs: vec![(from, to)],
    }))
}

fn delete_stmt(ts: &mut TokenStream) -> Result<StatementNode, SyntaxError> {
    let start = ts.position();
    ts.expect_kw("delete")?;
    ts.accept_kw("from");
    let factor = relation_factor(ts)?;
    let alias = ts.alias()?;
    let where_clause = if ts.accept_kw("where") {
        Some(expr(ts)?)
    } else {
        None
    };
    let raw_text = ts.slice(start, ts.prev_end());
    Ok(StatementNode::Delete(DeleteNode {
        relations: Vec::new(),
        using: false,
        table_refs: vec![TableRefNode::Named {
            factor,
            alias,
            partition: None,
            flashback: None,
        }],
        where_clause,
        raw_text,
    }))
}

fn comment_stmt(ts: &mut TokenStream) -> Result<StatementNode, SyntaxError> {
    ts.expect_kw("comment")?;
    ts.expect_kw("on")?;
    let on_column = if ts.accept_kw("column") {
        true
    } else {
        ts.expect_kw("table")?;
        false
    };
    let chain = name_chain(ts)?;
    ts.expect_kw("is")?;
    let comment = ts.string_lit()?;
    Ok(StatementNode::Comment(CommentNode {
        on_column,
        chain,
        comment,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drop_table_cascade_constraints_purge() {
        let stmt = parse_statement("drop table a.b cascade constraints purge").unwrap();
        let drop = match stmt {
            StatementNode::DropTable(d) => d,
            other => panic!("expected drop table, got {other:?}"),
        };
        assert!(drop.cascade_constraints);
        assert!(drop.purge);
        assert_eq!(drop.tables[0].schema.as_deref(), Some("a"));
    }

    #[test]
    fn reverse_dblink_marker() {
        let stmt = parse_statement("select * from t@remote!").unwrap();
        let sel = match stmt {
            StatementNode::Select(s) => s,
            other => panic!("expected select, got {other:?}"),
        };
        match &sel.from[0] {
            TableRefNode::Named { factor, .. } => {
                assert_eq!(factor.user_variable.as_deref(), Some("@remote"));
                assert!(factor.reverse_link);
            }
            other => panic!("expected named reference, got {other:?}"),
        }
    }

    #[test]
    fn natural_join_chain_keeps_keyword_run() {
        let stmt = parse_statement(
            "select * from t1 natural right outer join t2 natural right outer join t3",
        )
        .unwrap();
        let sel = match stmt {
            StatementNode::Select(s) => s,
            other => panic!("expected select, got {other:?}"),
        };
        match &sel.from[0] {
            TableRefNode::Joined {
                left, join_tokens, ..
            } => {
                assert_eq!(join_tokens, &["natural", "right", "outer", "join"]);
                assert!(matches!(**left, TableRefNode::Joined { .. }));
            }
            other => panic!("expected join, got {other:?}"),
        }
    }

    #[test]
    fn number_star_precision_and_interval_types() {
        let dt = parse_data_type("number(*, 2)").unwrap();
        assert_eq!(dt.args[0], TypeArgNode::Star);
        assert_eq!(dt.args[1], TypeArgNode::Number("2".into()));

        let dt = parse_data_type("interval day (2) to second (6)").unwrap();
        assert_eq!(
            dt.interval,
            Some(IntervalTypeNode::DayToSecond {
                day_precision: Some("2".into()),
                second_precision: Some("6".into()),
            })
        );
    }

    #[test]
    fn comment_on_column() {
        let stmt = parse_statement("comment on column s.t.c is 'remark'").unwrap();
        let node = match stmt {
            StatementNode::Comment(c) => c,
            other => panic!("expected comment, got {other:?}"),
        };
        assert!(node.on_column);
        assert_eq!(node.chain, vec!["s", "t", "c"]);
        assert_eq!(node.comment, "'remark'");
    }
}
