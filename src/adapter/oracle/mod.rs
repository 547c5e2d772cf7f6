// Oracle-mode adaptation factories

mod ddl;
mod dml;
mod expr;
mod relation;
mod types;

pub use ddl::{
    AlterTableFactory, CommentFactory, CreateIndexFactory, CreateTableFactory, DropIndexFactory,
    DropTableFactory, RenameTableFactory, TruncateTableFactory,
};
pub use dml::{DeleteFactory, InsertFactory, UpdateFactory};
pub use expr::ExpressionFactory;
pub use relation::{FromReferenceFactory, SelectFactory};
pub use types::DataTypeFactory;

use crate::ast::Statement;
use crate::cst::StatementNode;
use crate::error::AdaptError;

/// Entry factory: dispatches a parsed statement to the per-construct
/// factories.
pub struct StatementFactory;

impl StatementFactory {
    pub fn generate(node: &StatementNode) -> Result<Statement, AdaptError> {
        match node {
            StatementNode::CreateTable(n) => {
                Ok(Statement::CreateTable(CreateTableFactory::generate(n)?))
            }
            StatementNode::AlterTable(n) => {
                Ok(Statement::AlterTable(AlterTableFactory::generate(n)?))
            }
            StatementNode::DropTable(n) => Ok(Statement::DropTable(DropTableFactory::generate(n)?)),
            StatementNode::DropIndex(n) => Ok(Statement::DropIndex(DropIndexFactory::generate(n)?)),
            StatementNode::CreateIndex(n) => {
                Ok(Statement::CreateIndex(CreateIndexFactory::generate(n)?))
            }
            StatementNode::RenameTable(n) => {
                Ok(Statement::RenameTable(RenameTableFactory::generate(n)?))
            }
            StatementNode::TruncateTable(n) => {
                Ok(Statement::TruncateTable(TruncateTableFactory::generate(n)?))
            }
            StatementNode::Insert(n) => Ok(Statement::Insert(InsertFactory::generate(n)?)),
            StatementNode::Update(n) => Ok(Statement::Update(UpdateFactory::generate(n)?)),
            StatementNode::Delete(n) => Ok(Statement::Delete(DeleteFactory::generate(n)?)),
            StatementNode::Select(n) => Ok(Statement::Select(SelectFactory::generate(n)?)),
            StatementNode::CreateMaterializedView(_) => Err(AdaptError::new(
                "statement",
                "CREATE MATERIALIZED VIEW is not an Oracle-mode construct",
            )),
            StatementNode::Comment(n) => Ok(Statement::SetComment(CommentFactory::generate(n)?)),
        }
    }
}
