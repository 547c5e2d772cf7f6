// MySQL-mode statement grammar

use super::{
    alter_table_stmt, create_index_tail, create_table_tail, data_type, expr, insert_stmt,
    parse_complete, partition_option, relation_factor, select, table_option, table_ref,
    table_refs, truncate_stmt, update_stmt, TokenStream,
};
use crate::ast::Dialect;
use crate::cst::*;
use crate::error::SyntaxError;
use crate::lexer::Token;

pub fn parse_statement(sql: &str) -> Result<StatementNode, SyntaxError> {
    parse_complete(sql, Dialect::MySql, statement)
}

pub fn parse_statements(sql: &str) -> Result<Vec<StatementNode>, SyntaxError> {
    let mut ts = TokenStream::new(sql, Dialect::MySql)?;
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
    parse_complete(sql, Dialect::MySql, expr)
}

pub fn parse_data_type(sql: &str) -> Result<DataTypeNode, SyntaxError> {
    parse_complete(sql, Dialect::MySql, data_type)
}

pub fn parse_table_reference(sql: &str) -> Result<TableRefNode, SyntaxError> {
    parse_complete(sql, Dialect::MySql, table_ref)
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
    if ts.peek_kw("materialized") {
        ts.bump();
        ts.expect_kw("view")?;
        return Ok(StatementNode::CreateMaterializedView(mview_tail(ts)?));
    }
    let temporary = ts.accept_kw("temporary");
    let external = ts.accept_kw("external");
    Ok(StatementNode::CreateTable(create_table_tail(
        ts, temporary, external,
    )?))
}

fn mview_tail(ts: &mut TokenStream) -> Result<CreateMaterializedViewNode, SyntaxError> {
    let view = relation_factor(ts)?;
    let mut options = Vec::new();
    let mut table_options = Vec::new();
    let mut partition = None;
    loop {
        if ts.peek_kw("partition") && ts.peek_kw_at(1, "by") {
            partition = Some(partition_option(ts)?);
            continue;
        }
        if ts.peek_kw("never") {
            ts.bump();
            ts.expect_kw("refresh")?;
            options.push(MViewOptionNode::NeverRefresh);
            continue;
        }
        if ts.peek_kw("refresh") {
            ts.bump();
            options.push(refresh_option(ts)?);
            continue;
        }
        if ts.peek_kw("enable") || ts.peek_kw("disable") {
            let enabled = ts.accept_kw("enable");
            if !enabled {
                ts.expect_kw("disable")?;
            }
            if ts.accept_kw("query") {
                ts.expect_kw("rewrite")?;
                options.push(MViewOptionNode::QueryRewrite(enabled));
            } else {
                ts.expect_kw("on")?;
                ts.expect_kw("query")?;
                ts.expect_kw("computation")?;
                options.push(MViewOptionNode::OnQueryComputation(enabled));
            }
            continue;
        }
        if ts.peek_kw("as") {
            break;
        }
        if let Some(opt) = table_option(ts)? {
            table_options.push(opt);
            ts.accept_symbol(",");
            continue;
        }
        return Err(ts.error("expected materialized view option or AS"));
    }
    ts.expect_kw("as")?;
    let select = select(ts)?;
    Ok(CreateMaterializedViewNode {
        view,
        options,
        table_options,
        partition,
        select: Box::new(select),
    })
}

fn refresh_option(ts: &mut TokenStream) -> Result<MViewOptionNode, SyntaxError> {
    let method = if ts.accept_kw("complete") {
        "complete"
    } else if ts.accept_kw("fast") {
        "fast"
    } else if ts.accept_kw("force") {
        "force"
    } else {
        return Err(ts.error("expected COMPLETE, FAST or FORCE after REFRESH"));
    };
    let mut on = None;
    let mut start_with = None;
    let mut next = None;
    loop {
        if ts.peek_kw("on")
            && (ts.peek_kw_at(1, "demand")
                || ts.peek_kw_at(1, "commit")
                || ts.peek_kw_at(1, "statement"))
        {
            ts.bump();
            on = Some(ts.ident()?.to_lowercase());
            continue;
        }
        if ts.peek_kw("start") && ts.peek_kw_at(1, "with") {
            ts.bump();
            ts.bump();
            start_with = Some(expr(ts)?);
            continue;
        }
        if ts.accept_kw("next") {
            next = Some(expr(ts)?);
            continue;
        }
        break;
    }
    Ok(MViewOptionNode::Refresh {
        method: method.to_owned(),
        on,
        start_with,
        next,
    })
}

fn drop_stmt(ts: &mut TokenStream) -> Result<StatementNode, SyntaxError> {
    ts.expect_kw("drop")?;
    let temporary = ts.accept_kw("temporary");
    if !temporary && ts.peek_kw("index") {
        ts.bump();
        let index = relation_factor(ts)?;
        ts.expect_kw("on")?;
        let on = relation_factor(ts)?;
        return Ok(StatementNode::DropIndex(DropIndexNode {
            index,
            on: Some(on),
        }));
    }
    let materialized = ts.accept_kw("materialized");
    if materialized {
        ts.expect_kw("view")?;
    } else if !ts.accept_kw("tables") {
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
    Ok(StatementNode::DropTable(DropTableNode {
        temporary,
        materialized,
        if_exists,
        tables,
        cascade_constraints: false,
        purge: false,
    }))
}

fn rename_stmt(ts: &mut TokenStream) -> Result<StatementNode, SyntaxError> {
    ts.expect_kw("rename")?;
    ts.expect_kw("table")?;
    let mut pairs = Vec::new();
    loop {
        let from = relation_factor(ts)?;
        ts.expect_kw("to")?;
        let to = relation_factor(ts)?;
        pairs.push((from, to));
        if !ts.accept_symbol(",") {
            break;
        }
    }
    Ok(StatementNode::RenameTable(RenameTableNode { pairs }))
}

fn delete_stmt(ts: &mut TokenStream) -> Result<StatementNode, SyntaxError> {
    let start = ts.position();
    ts.expect_kw("delete")?;
    let mut relations = Vec::new();
    let mut using = false;
    let table_refs_list;
    if ts.accept_kw("from") {
        let rels = delete_relation_list(ts)?;
        if ts.accept_kw("using") {
            using = true;
            relations = rels;
            table_refs_list = table_refs(ts)?;
        } else {
            if rels.len() != 1 || rels[0].star {
                return Err(ts.error("multi-table DELETE requires USING"));
            }
            let rel = &rels[0];
            let factor = RelationFactorNode {
                schema: rel.schema.clone(),
                relation: rel.relation.clone(),
                user_variable: None,
                reverse_link: false,
            };
            let alias = ts.alias()?;
            table_refs_list = vec![TableRefNode::Named {
                factor,
                alias,
                partition: None,
                flashback: None,
            }];
        }
    } else {
        relations = delete_relation_list(ts)?;
        ts.expect_kw("from")?;
        table_refs_list = table_refs(ts)?;
    }
    let where_clause = if ts.accept_kw("where") {
        Some(expr(ts)?)
    } else {
        None
    };
    let raw_text = ts.slice(start, ts.prev_end());
    Ok(StatementNode::Delete(DeleteNode {
        relations,
        using,
        table_refs: table_refs_list,
        where_clause,
        raw_text,
    }))
}

fn delete_relation_list(ts: &mut TokenStream) -> Result<Vec<DeleteRelationNode>, SyntaxError> {
    let mut rels = vec![delete_relation(ts)?];
    while ts.accept_symbol(",") {
        rels.push(delete_relation(ts)?);
    }
    Ok(rels)
}

fn delete_relation(ts: &mut TokenStream) -> Result<DeleteRelationNode, SyntaxError> {
    let first = ts.ident()?;
    let mut schema = None;
    let mut relation = first;
    let mut star = false;
    if ts.peek_symbol(".") {
        match ts.peek_at(1) {
            Token::Ident { .. } => {
                ts.bump();
                schema = Some(relation);
                relation = ts.ident()?;
            }
            Token::Symbol("*") => {}
            _ => {}
        }
    }
    if ts.peek_symbol(".") && ts.peek_at(1).is_symbol("*") {
        ts.bump();
        ts.bump();
        star = true;
    }
    Ok(DeleteRelationNode {
        schema,
        relation,
        star,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_multi_delete_into_left_deep_joins() {
        let stmt = parse_statement(
            "delete t1, t2 from t1 join t2 join t3 on t1.a = t3.a where t2.b > 1",
        )
        .unwrap();
        let del = match stmt {
            StatementNode::Delete(d) => d,
            other => panic!("expected delete, got {other:?}"),
        };
        assert_eq!(del.relations.len(), 2);
        assert!(!del.using);
        assert_eq!(del.table_refs.len(), 1);
        match &del.table_refs[0] {
            TableRefNode::Joined { left, .. } => {
                assert!(matches!(**left, TableRefNode::Joined { .. }));
            }
            other => panic!("expected join tree, got {other:?}"),
        }
        assert!(del.where_clause.is_some());
        assert!(del.raw_text.starts_with("delete t1, t2"));
    }

    #[test]
    fn parses_alter_with_options_and_add_column() {
        let stmt =
            parse_statement("alter table a.b table_mode='aaa' USE_BLOOM_FILTER=true, add id varchar(64)")
                .unwrap();
        let alter = match stmt {
            StatementNode::AlterTable(a) => a,
            other => panic!("expected alter table, got {other:?}"),
        };
        assert_eq!(alter.table.schema.as_deref(), Some("a"));
        assert_eq!(alter.actions.len(), 2);
        match &alter.actions[0] {
            AlterActionNode::Options(opts) => {
                assert_eq!(opts.len(), 2);
                assert_eq!(opts[0].name, "TABLE_MODE");
                assert_eq!(opts[0].value, OptionValueNode::Str("'aaa'".into()));
                assert_eq!(opts[1].name, "USE_BLOOM_FILTER");
                assert_eq!(opts[1].value, OptionValueNode::Bool(true));
            }
            other => panic!("expected options action, got {other:?}"),
        }
        match &alter.actions[1] {
            AlterActionNode::AddColumns(defs) => {
                assert_eq!(defs.len(), 1);
                assert_eq!(defs[0].name, "id");
                assert_eq!(defs[0].data_type.args, vec![TypeArgNode::Number("64".into())]);
            }
            other => panic!("expected add columns, got {other:?}"),
        }
    }

    #[test]
    fn parses_index_and_table_user_variables() {
        let stmt = parse_statement("create index idx@uv1 on tb@uv2 (a, b)").unwrap();
        let ci = match stmt {
            StatementNode::CreateIndex(c) => c,
            other => panic!("expected create index, got {other:?}"),
        };
        assert_eq!(ci.index.user_variable.as_deref(), Some("@uv1"));
        assert_eq!(ci.on.user_variable.as_deref(), Some("@uv2"));
        assert_eq!(ci.columns.len(), 2);
    }

    #[test]
    fn parses_refresh_options_in_any_order() {
        let stmt = parse_statement(
            "create materialized view mv refresh complete on demand start with sysdate() \
             next sysdate() + interval 1 day enable query rewrite \
             disable on query computation as select a from t",
        )
        .unwrap();
        let mv = match stmt {
            StatementNode::CreateMaterializedView(m) => m,
            other => panic!("expected create materialized view, got {other:?}"),
        };
        assert_eq!(mv.options.len(), 3);
        match &mv.options[0] {
            MViewOptionNode::Refresh {
                method,
                on,
                start_with,
                next,
            } => {
                assert_eq!(method, "complete");
                assert_eq!(on.as_deref(), Some("demand"));
                assert!(start_with.is_some());
                assert!(next.is_some());
            }
            other => panic!("expected refresh option, got {other:?}"),
        }
        assert_eq!(mv.options[1], MViewOptionNode::QueryRewrite(true));
        assert_eq!(mv.options[2], MViewOptionNode::OnQueryComputation(false));
    }

    #[test]
    fn limit_forms() {
        let sql = "select a from t limit 2, 10";
        let stmt = parse_statement(sql).unwrap();
        let sel = match stmt {
            StatementNode::Select(s) => s,
            other => panic!("expected select, got {other:?}"),
        };
        let limit = sel.limit.unwrap();
        assert_eq!(limit.count, ExprNode::Literal("10".into()));
        assert_eq!(limit.offset, Some(ExprNode::Literal("2".into())));
    }
}
