use std::fs;
use std::process;

use clap::Parser;

use sqlfront::ast::Dialect;
use sqlfront::frontend::SqlFrontend;

/// SQL front end - parses MySQL-mode or Oracle-mode SQL into a neutral AST
#[derive(Parser)]
#[command(name = "sqlfront")]
#[command(about = "Parse SQL text into a dialect-neutral AST")]
struct Cli {
    /// SQL text to parse (use --file to read from a file instead)
    sql: Option<String>,

    /// Path to a SQL file
    #[arg(short = 'i', long)]
    file: Option<String>,

    /// Dialect the input is written in
    #[arg(short = 'd', long, default_value = "mysql")]
    dialect: String,
}

fn parse_dialect(name: &str) -> Result<Dialect, String> {
    match name.to_lowercase().as_str() {
        "mysql" => Ok(Dialect::MySql),
        "oracle" => Ok(Dialect::Oracle),
        _ => Err(format!(
            "Unknown dialect: '{}'. Supported: mysql, oracle",
            name
        )),
    }
}

fn main() {
    let cli = Cli::parse();

    let dialect = match parse_dialect(&cli.dialect) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let sql = match (&cli.sql, &cli.file) {
        (Some(text), None) => text.clone(),
        (None, Some(path)) => match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Error reading '{}': {}", path, e);
                process::exit(1);
            }
        },
        _ => {
            eprintln!("Error: pass SQL text or --file, not both");
            process::exit(1);
        }
    };

    let frontend = SqlFrontend::new(dialect);
    match frontend.parse_statements(&sql) {
        Ok(statements) => {
            for statement in &statements {
                println!("{:#?}", statement);
            }
        }
        Err(e) => {
            eprintln!("Parse error ({}): {}", dialect, e);
            process::exit(1);
        }
    }
}
