// Main SqlFrontend

use crate::adapter;
use crate::ast::{Dialect, Statement};
use crate::cst::StatementNode;
use crate::error::{FrontendError, SyntaxError};
use crate::grammar;

/// Front-end facade: text in, neutral AST out. A caller picks the dialect
/// up front; the two stages (parse to a concrete tree, adapt to the AST)
/// run fail-fast and the first fault aborts the whole statement.
pub struct SqlFrontend {
    dialect: Dialect,
}

impl SqlFrontend {
    pub fn new(dialect: Dialect) -> Self {
        Self { dialect }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Parses exactly one statement, with an optional trailing `;`.
    pub fn parse_statement(&self, sql: &str) -> Result<Statement, FrontendError> {
        let node = self.grammar_statement(sql)?;
        Ok(adapter::adapt(&node, self.dialect)?)
    }

    /// Parses a `;`-separated script into statements, in source order.
    pub fn parse_statements(&self, sql: &str) -> Result<Vec<Statement>, FrontendError> {
        let nodes = self.grammar_statements(sql)?;
        nodes
            .iter()
            .map(|node| Ok(adapter::adapt(node, self.dialect)?))
            .collect()
    }

    fn grammar_statement(&self, sql: &str) -> Result<StatementNode, SyntaxError> {
        match self.dialect {
            Dialect::MySql => grammar::mysql::parse_statement(sql),
            Dialect::Oracle => grammar::oracle::parse_statement(sql),
        }
    }

    fn grammar_statements(&self, sql: &str) -> Result<Vec<StatementNode>, SyntaxError> {
        match self.dialect {
            Dialect::MySql => grammar::mysql::parse_statements(sql),
            Dialect::Oracle => grammar::oracle::parse_statements(sql),
        }
    }
}

/// One-shot convenience wrapper around [`SqlFrontend::parse_statement`].
pub fn parse_statement(sql: &str, dialect: Dialect) -> Result<Statement, FrontendError> {
    SqlFrontend::new(dialect).parse_statement(sql)
}

/// One-shot convenience wrapper around [`SqlFrontend::parse_statements`].
pub fn parse_statements(sql: &str, dialect: Dialect) -> Result<Vec<Statement>, FrontendError> {
    SqlFrontend::new(dialect).parse_statements(sql)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Statement;

    #[test]
    fn keyword_case_does_not_change_the_tree() {
        let lower = parse_statement("select id from t where id = 1", Dialect::MySql).unwrap();
        let upper = parse_statement("SELECT id FROM t WHERE id = 1", Dialect::MySql).unwrap();
        assert_eq!(lower, upper);
    }

    #[test]
    fn mysql_script_in_source_order() {
        let frontend = SqlFrontend::new(Dialect::MySql);
        let stmts = frontend
            .parse_statements("truncate table t1; drop table t2;")
            .unwrap();
        assert_eq!(stmts.len(), 2);
        assert!(matches!(stmts[0], Statement::TruncateTable(_)));
        assert!(matches!(stmts[1], Statement::DropTable(_)));
    }

    #[test]
    fn syntax_fault_surfaces_through_the_facade() {
        let err = parse_statement("create table", Dialect::MySql).unwrap_err();
        assert!(matches!(err, FrontendError::Syntax(_)));
    }

    #[test]
    fn adapt_fault_surfaces_through_the_facade() {
        let err = parse_statement("create table t (v varchar)", Dialect::Oracle).unwrap_err();
        match err {
            FrontendError::Adapt(e) => assert_eq!(e.construct, "data_type"),
            other => panic!("expected adapt fault, got {other}"),
        }
    }

    #[test]
    fn comment_on_is_rejected_in_mysql_mode() {
        let err = parse_statement("comment on table t is 'x'", Dialect::MySql).unwrap_err();
        assert!(matches!(err, FrontendError::Syntax(_)));
    }
}
