// End-to-end MySQL-mode coverage: text through the facade to the neutral AST.

use sqlfront::ast::{
    AlterTableAction, CharacterType, ColumnDefinition, ColumnReference, CompoundExpression,
    CreateIndex, DataType, DeleteRelation, DeleteTarget, Expression, FromReference, JoinType,
    Operator, PartitionUsage, RefreshMethod, RefreshOn, RelationFactor, SortColumn, Statement,
    TableOptions,
};
use sqlfront::{parse_statement, Dialect, FrontendError};

fn parse(sql: &str) -> Statement {
    parse_statement(sql, Dialect::MySql).unwrap()
}

#[test]
fn alter_table_mixes_options_and_column_adds() {
    let stmt = parse("alter table a.b table_mode='aaa' USE_BLOOM_FILTER=true, add id varchar(64)");
    let alter = match stmt {
        Statement::AlterTable(a) => a,
        other => panic!("expected alter table, got {other:?}"),
    };
    assert_eq!(alter.relation, RelationFactor::new(Some("a"), "b"));
    assert_eq!(
        alter.actions,
        vec![
            AlterTableAction::TableOptions(TableOptions {
                table_mode: Some("'aaa'".to_owned()),
                use_bloom_filter: Some(true),
                ..Default::default()
            }),
            AlterTableAction::AddColumns(vec![ColumnDefinition::new(
                "id",
                DataType::Character(CharacterType::new("varchar", Some("64"))),
            )]),
        ]
    );
}

#[test]
fn create_index_keeps_user_variable_suffixes() {
    let stmt = parse("create index abc@uv1 on tb@uv2 (col, col1)");
    let expect = CreateIndex::new(
        RelationFactor::named("abc").with_user_variable("@uv1"),
        RelationFactor::named("tb").with_user_variable("@uv2"),
        vec![SortColumn::named("col"), SortColumn::named("col1")],
    );
    assert_eq!(stmt, Statement::CreateIndex(expect));
}

#[test]
fn multi_table_delete_over_left_deep_join() {
    let stmt = parse("DELETE t1, t2 FROM t1 INNER JOIN t2 INNER JOIN t3 WHERE t1.id=t2.id");
    let delete = match stmt {
        Statement::Delete(d) => d,
        other => panic!("expected delete, got {other:?}"),
    };
    let multi = match &delete.target {
        DeleteTarget::Multi(m) => m,
        other => panic!("expected multi delete, got {other:?}"),
    };
    assert_eq!(
        multi.relations,
        vec![
            DeleteRelation::new(None, "t1", false),
            DeleteRelation::new(None, "t2", false),
        ]
    );
    assert!(!multi.using);
    assert_eq!(multi.table_references.len(), 1);
    let outer = match &multi.table_references[0] {
        FromReference::Join(j) => j,
        other => panic!("expected join tree, got {other:?}"),
    };
    assert_eq!(outer.join_type, JoinType::InnerJoin);
    assert!(matches!(outer.left, FromReference::Join(_)));
    assert_eq!(
        delete.where_clause,
        Some(CompoundExpression::binary(
            Expression::ColumnRef(ColumnReference::new(None, Some("t1"), "id")),
            Expression::ColumnRef(ColumnReference::new(None, Some("t2"), "id")),
            Operator::Eq,
        ))
    );
}

#[test]
fn delete_using_variant_records_star_relations() {
    let stmt = parse("delete from t1.*, t2 using t1 join t2 on t1.id = t2.id");
    let delete = match stmt {
        Statement::Delete(d) => d,
        other => panic!("expected delete, got {other:?}"),
    };
    let multi = match &delete.target {
        DeleteTarget::Multi(m) => m,
        other => panic!("expected multi delete, got {other:?}"),
    };
    assert!(multi.using);
    assert_eq!(
        multi.relations,
        vec![
            DeleteRelation::new(None, "t1", true),
            DeleteRelation::new(None, "t2", false),
        ]
    );
}

#[test]
fn delete_retains_raw_source_text() {
    let stmt = parse("delete from t1 where id = 3;");
    let delete = match stmt {
        Statement::Delete(d) => d,
        other => panic!("expected delete, got {other:?}"),
    };
    assert_eq!(delete.source_text, "delete from t1 where id = 3");
}

#[test]
fn update_retains_raw_source_text_and_assign_order() {
    let stmt = parse("update t set a = 1, b = b + 1 where id = 2");
    let update = match stmt {
        Statement::Update(u) => u,
        other => panic!("expected update, got {other:?}"),
    };
    assert_eq!(update.source_text, "update t set a = 1, b = b + 1 where id = 2");
    assert_eq!(update.assigns.len(), 2);
    assert_eq!(
        update.assigns[0].column,
        ColumnReference::new(None, None, "a")
    );
    assert_eq!(update.assigns[0].value, Expression::literal("1"));
    assert_eq!(
        update.assigns[1].value,
        CompoundExpression::binary(
            Expression::column("b"),
            Expression::literal("1"),
            Operator::Add,
        )
    );
}

#[test]
fn materialized_view_refresh_and_polarities() {
    let stmt = parse(
        "create materialized view mv refresh complete on demand start with sysdate() \
         next sysdate() + interval 1 day enable query rewrite \
         disable on query computation as select * from t",
    );
    let view = match stmt {
        Statement::CreateMaterializedView(v) => v,
        other => panic!("expected materialized view, got {other:?}"),
    };
    let refresh = view.view_options.refresh.unwrap();
    assert_eq!(refresh.method, RefreshMethod::Complete);
    assert_eq!(refresh.on_clause, Some(RefreshOn::Demand));
    assert!(refresh.start_with.is_some());
    assert!(refresh.next.is_some());
    assert_eq!(view.view_options.enable_query_rewrite, Some(true));
    assert_eq!(view.view_options.enable_on_query_computation, Some(false));
}

#[test]
fn never_refresh_carries_no_interval_or_trigger() {
    let stmt = parse("create materialized view mv never refresh as select * from t");
    let view = match stmt {
        Statement::CreateMaterializedView(v) => v,
        other => panic!("expected materialized view, got {other:?}"),
    };
    let refresh = view.view_options.refresh.unwrap();
    assert_eq!(refresh.method, RefreshMethod::Never);
    assert_eq!(refresh.start_with, None);
    assert_eq!(refresh.next, None);
    assert_eq!(refresh.on_clause, None);
    assert_eq!(view.view_options.enable_query_rewrite, None);
    assert_eq!(view.view_options.enable_on_query_computation, None);
}

#[test]
fn option_bag_sets_each_field_exactly_once() {
    let stmt = parse("create table t (id int) parallel 12, noparallel, table_mode='abcd'");
    let table = match stmt {
        Statement::CreateTable(c) => c,
        other => panic!("expected create table, got {other:?}"),
    };
    let opts = table.table_options.unwrap();
    assert_eq!(opts.parallel, Some(12));
    assert_eq!(opts.no_parallel, Some(true));
    assert_eq!(opts.table_mode, Some("'abcd'".to_owned()));
    assert_eq!(opts.comment, None);
    assert_eq!(opts.block_size, None);
}

#[test]
fn create_table_clauses_attach_independently() {
    let bare = parse("create table t (id int)");
    let with_options = parse("create table t (id int) parallel 12");
    let (bare, with_options) = match (bare, with_options) {
        (Statement::CreateTable(a), Statement::CreateTable(b)) => (a, b),
        other => panic!("expected create tables, got {other:?}"),
    };
    assert_eq!(bare.table_options, None);
    assert_eq!(bare.elements, with_options.elements);
    assert_eq!(bare.relation, with_options.relation);
    assert!(with_options.table_options.is_some());
}

#[test]
fn insert_with_partition_columns_and_rows() {
    let stmt = parse("insert into t partition (p0, p1) (a, b) values (1, 'x'), (2, 'y')");
    let insert = match stmt {
        Statement::Insert(i) => i,
        other => panic!("expected insert, got {other:?}"),
    };
    assert_eq!(insert.relation, RelationFactor::named("t"));
    assert_eq!(
        insert.partition_usage,
        Some(PartitionUsage {
            names: vec!["p0".into(), "p1".into()]
        })
    );
    assert_eq!(
        insert.columns,
        Some(vec![
            ColumnReference::new(None, None, "a"),
            ColumnReference::new(None, None, "b"),
        ])
    );
    assert_eq!(insert.values.len(), 2);
    assert_eq!(insert.values[1][1], Expression::literal("'y'"));
    assert_eq!(insert.as_query, None);
}

#[test]
fn four_part_chain_is_an_adapt_fault() {
    let err = parse_statement("select a.b.c.d from t", Dialect::MySql).unwrap_err();
    match err {
        FrontendError::Adapt(e) => assert_eq!(e.construct, "column reference"),
        other => panic!("expected adapt fault, got {other}"),
    }
}

#[test]
fn bare_varchar_is_accepted() {
    let stmt = parse("create table t (v varchar)");
    assert!(matches!(stmt, Statement::CreateTable(_)));
}

#[test]
fn limit_spellings_agree() {
    let comma = parse("select * from t limit 2, 10");
    let offset = parse("select * from t limit 10 offset 2");
    assert_eq!(comma, offset);
    let select = match comma {
        Statement::Select(s) => s,
        other => panic!("expected select, got {other:?}"),
    };
    let limit = select.limit.unwrap();
    assert_eq!(limit.count, Expression::literal("10"));
    assert_eq!(limit.offset, Some(Expression::literal("2")));
}

#[test]
fn drop_table_if_exists_list() {
    let stmt = parse("drop table if exists a, b.c");
    let drop = match stmt {
        Statement::DropTable(d) => d,
        other => panic!("expected drop table, got {other:?}"),
    };
    assert!(drop.if_exists);
    assert!(!drop.temporary);
    assert_eq!(
        drop.relations,
        vec![
            RelationFactor::named("a"),
            RelationFactor::new(Some("b"), "c"),
        ]
    );
}

#[test]
fn rename_table_keeps_pair_order() {
    let stmt = parse("rename table a to b, c.d to c.e");
    let rename = match stmt {
        Statement::RenameTable(r) => r,
        other => panic!("expected rename table, got {other:?}"),
    };
    assert_eq!(rename.actions.len(), 2);
    assert_eq!(rename.actions[0].from, RelationFactor::named("a"));
    assert_eq!(rename.actions[0].to, RelationFactor::named("b"));
    assert_eq!(rename.actions[1].from, RelationFactor::new(Some("c"), "d"));
}
