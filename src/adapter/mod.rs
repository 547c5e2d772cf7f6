// Grammar-to-AST adaptation layer. Each dialect carries its own factory
// family; the shared folding helpers live in `support`.

pub mod mysql;
pub mod oracle;
mod support;

use crate::ast::{Dialect, Statement};
use crate::cst::StatementNode;
use crate::error::AdaptError;

/// Adapts one parsed statement into the neutral AST under the rules of the
/// given dialect.
pub fn adapt(node: &StatementNode, dialect: Dialect) -> Result<Statement, AdaptError> {
    match dialect {
        Dialect::MySql => mysql::StatementFactory::generate(node),
        Dialect::Oracle => oracle::StatementFactory::generate(node),
    }
}
