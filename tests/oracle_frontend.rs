// End-to-end Oracle-mode coverage: text through the facade to the neutral AST.

use sqlfront::ast::{
    CharacterType, CommentTarget, ColumnReference, DataType, DeleteTarget, Expression,
    FlashbackType, FromReference, IntervalType, JoinType, LengthOption, Operator, Projection,
    RelationFactor, Statement, TableElement,
};
use sqlfront::{parse_statement, Dialect, FrontendError};

fn parse(sql: &str) -> Statement {
    parse_statement(sql, Dialect::Oracle).unwrap()
}

fn column_types(stmt: Statement) -> Vec<DataType> {
    match stmt {
        Statement::CreateTable(c) => c
            .elements
            .into_iter()
            .map(|e| match e {
                TableElement::Column(def) => def.data_type,
                other => panic!("expected column, got {other:?}"),
            })
            .collect(),
        other => panic!("expected create table, got {other:?}"),
    }
}

#[test]
fn bare_varchar_is_an_adapt_fault() {
    for name in ["varchar", "varchar2", "nvarchar2"] {
        let err = parse_statement(&format!("create table t (v {name})"), Dialect::Oracle)
            .unwrap_err();
        match err {
            FrontendError::Adapt(e) => {
                assert_eq!(e.construct, "data_type");
                assert!(e.message.contains("length"), "message: {}", e.message);
            }
            other => panic!("expected adapt fault, got {other}"),
        }
    }
}

#[test]
fn natural_join_chain_stays_left_deep() {
    let stmt = parse(
        "select a from chz.tab1 a natural right outer join gsh.tab2 \
         natural right join sl.tab3",
    );
    let select = match stmt {
        Statement::Select(s) => s,
        other => panic!("expected select, got {other:?}"),
    };
    let outer = match &select.body.froms[0] {
        FromReference::Join(j) => j,
        other => panic!("expected join, got {other:?}"),
    };
    assert_eq!(outer.join_type, JoinType::NaturalRightJoin);
    assert!(outer.condition.is_none());
    match &outer.left {
        FromReference::Join(inner) => {
            assert_eq!(inner.join_type, JoinType::NaturalRightOuterJoin);
            assert!(inner.condition.is_none());
            match &inner.left {
                FromReference::Name(name) => {
                    assert_eq!(name.schema.as_deref(), Some("chz"));
                    assert_eq!(name.relation, "tab1");
                    assert_eq!(name.alias.as_deref(), Some("a"));
                }
                other => panic!("expected name reference, got {other:?}"),
            }
        }
        other => panic!("expected nested join, got {other:?}"),
    }
}

#[test]
fn name_chain_nests_to_source_depth() {
    let stmt = parse("select a.b.ab.v from t");
    let select = match stmt {
        Statement::Select(s) => s,
        other => panic!("expected select, got {other:?}"),
    };
    match &select.body.items[0] {
        Projection::Expr { expr, .. } => match expr {
            Expression::RelationRef(chain) => {
                assert_eq!(chain.depth(), 4);
                assert_eq!(chain.name, "a");
            }
            other => panic!("expected relation reference, got {other:?}"),
        },
        other => panic!("expected expression projection, got {other:?}"),
    }
}

#[test]
fn oracle_only_data_types_round_through() {
    let types = column_types(parse(
        "create table t (n number(*, 2), v varchar2(10 char), \
         d interval day (2) to second (6), ts timestamp(6) with local time zone)",
    ));
    match &types[0] {
        DataType::Number(n) => {
            assert!(n.star_precision);
            assert_eq!(n.precision, None);
            assert_eq!(n.scale.as_deref(), Some("2"));
        }
        other => panic!("expected number, got {other:?}"),
    }
    let mut varchar2 = CharacterType::new("varchar2", Some("10"));
    varchar2.length_option = Some(LengthOption::Char);
    assert_eq!(types[1], DataType::Character(varchar2));
    assert_eq!(
        types[2],
        DataType::Interval(IntervalType::DayToSecond {
            day_precision: Some("2".into()),
            second_precision: Some("6".into()),
        })
    );
    match &types[3] {
        DataType::Timestamp(ts) => {
            assert_eq!(ts.precision.as_deref(), Some("6"));
            assert!(!ts.with_time_zone);
            assert!(ts.with_local_time_zone);
        }
        other => panic!("expected timestamp, got {other:?}"),
    }
}

#[test]
fn drop_table_cascade_constraints_and_purge() {
    let stmt = parse("drop table s.t cascade constraints purge");
    let drop = match stmt {
        Statement::DropTable(d) => d,
        other => panic!("expected drop table, got {other:?}"),
    };
    assert!(drop.cascade_constraints);
    assert!(drop.purge);
    assert!(!drop.materialized);
    assert_eq!(drop.relations, vec![RelationFactor::new(Some("s"), "t")]);
}

#[test]
fn drop_index_has_no_on_clause() {
    let stmt = parse("drop index idx");
    let drop = match stmt {
        Statement::DropIndex(d) => d,
        other => panic!("expected drop index, got {other:?}"),
    };
    assert_eq!(drop.index, RelationFactor::named("idx"));
    assert_eq!(drop.on, None);
}

#[test]
fn drop_materialized_view_sets_the_flag() {
    let stmt = parse("drop materialized view mv");
    let drop = match stmt {
        Statement::DropTable(d) => d,
        other => panic!("expected drop, got {other:?}"),
    };
    assert!(drop.materialized);
    assert_eq!(drop.relations, vec![RelationFactor::named("mv")]);
}

#[test]
fn rename_is_a_single_pair() {
    let stmt = parse("rename a to b");
    let rename = match stmt {
        Statement::RenameTable(r) => r,
        other => panic!("expected rename, got {other:?}"),
    };
    assert_eq!(rename.actions.len(), 1);
    assert_eq!(rename.actions[0].from, RelationFactor::named("a"));
    assert_eq!(rename.actions[0].to, RelationFactor::named("b"));
}

#[test]
fn comment_on_table_and_column() {
    let table = parse("comment on table s.t is 'fact table'");
    match table {
        Statement::SetComment(c) => {
            assert_eq!(
                c.target,
                CommentTarget::Table(RelationFactor::new(Some("s"), "t"))
            );
            assert_eq!(c.comment, "'fact table'");
        }
        other => panic!("expected comment, got {other:?}"),
    }
    let column = parse("comment on column t.c is 'the c column'");
    match column {
        Statement::SetComment(c) => {
            assert_eq!(
                c.target,
                CommentTarget::Column(ColumnReference::new(None, Some("t"), "c"))
            );
        }
        other => panic!("expected comment, got {other:?}"),
    }
}

#[test]
fn reverse_link_survives_into_the_from_reference() {
    let stmt = parse("select * from t@remote!");
    let select = match stmt {
        Statement::Select(s) => s,
        other => panic!("expected select, got {other:?}"),
    };
    match &select.body.froms[0] {
        FromReference::Name(name) => {
            assert_eq!(name.relation, "t");
            assert_eq!(name.user_variable.as_deref(), Some("@remote"));
            assert!(name.reverse_link);
        }
        other => panic!("expected name reference, got {other:?}"),
    }
}

#[test]
fn flashback_usage_attaches_to_the_name() {
    let stmt = parse("select * from t as of scn 42 x");
    let select = match stmt {
        Statement::Select(s) => s,
        other => panic!("expected select, got {other:?}"),
    };
    match &select.body.froms[0] {
        FromReference::Name(name) => {
            assert_eq!(name.alias.as_deref(), Some("x"));
            let fb = name.flashback_usage.as_ref().unwrap();
            assert_eq!(fb.flashback_type, FlashbackType::AsOfScn);
            assert_eq!(fb.expr, Expression::literal("42"));
        }
        other => panic!("expected name reference, got {other:?}"),
    }
}

#[test]
fn offset_and_fetch_map_into_the_fetch_clause() {
    let stmt = parse("select * from t offset 5 rows fetch next 10 rows only");
    let select = match stmt {
        Statement::Select(s) => s,
        other => panic!("expected select, got {other:?}"),
    };
    assert_eq!(select.limit, None);
    let fetch = select.fetch.unwrap();
    assert_eq!(fetch.offset, Some(Expression::literal("5")));
    assert_eq!(fetch.count, Some(Expression::literal("10")));
    assert!(!fetch.percent);
    assert!(!fetch.with_ties);

    let stmt = parse("select * from t fetch first 10 percent rows with ties");
    let select = match stmt {
        Statement::Select(s) => s,
        other => panic!("expected select, got {other:?}"),
    };
    let fetch = select.fetch.unwrap();
    assert!(fetch.percent);
    assert!(fetch.with_ties);
    assert_eq!(fetch.offset, None);
}

#[test]
fn concat_operator_is_concatenation_not_or() {
    let stmt = parse("select a || 'x' from t");
    let select = match stmt {
        Statement::Select(s) => s,
        other => panic!("expected select, got {other:?}"),
    };
    match &select.body.items[0] {
        Projection::Expr { expr, .. } => match expr {
            Expression::Compound(c) => assert_eq!(c.operator, Operator::Cnnop),
            other => panic!("expected compound, got {other:?}"),
        },
        other => panic!("expected expression projection, got {other:?}"),
    }
}

#[test]
fn global_temporary_table_sets_the_flag() {
    let stmt = parse("create global temporary table t (id number)");
    let table = match stmt {
        Statement::CreateTable(c) => c,
        other => panic!("expected create table, got {other:?}"),
    };
    assert!(table.temporary);
    assert!(!table.external);
}

#[test]
fn single_table_delete_with_raw_text() {
    let stmt = parse("delete from s.t x where x.id = 1");
    let delete = match stmt {
        Statement::Delete(d) => d,
        other => panic!("expected delete, got {other:?}"),
    };
    match &delete.target {
        DeleteTarget::Single(FromReference::Name(name)) => {
            assert_eq!(name.schema.as_deref(), Some("s"));
            assert_eq!(name.relation, "t");
            assert_eq!(name.alias.as_deref(), Some("x"));
        }
        other => panic!("expected single name target, got {other:?}"),
    }
    assert_eq!(delete.source_text, "delete from s.t x where x.id = 1");
    assert!(delete.where_clause.is_some());
}

#[test]
fn partition_usage_is_rejected() {
    let err = parse_statement("select * from t partition (p0)", Dialect::Oracle).unwrap_err();
    assert!(matches!(err, FrontendError::Syntax(_) | FrontendError::Adapt(_)));
}
