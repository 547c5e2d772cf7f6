// Public API exports

pub mod adapter;
pub mod ast;
pub mod cst;
pub mod error;
pub mod frontend;
pub mod grammar;
pub mod lexer;

pub use ast::{Dialect, Statement};
pub use error::{AdaptError, FrontendError, SyntaxError};
pub use frontend::{parse_statement, parse_statements, SqlFrontend};
