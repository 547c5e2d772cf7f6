// Recursive-descent grammar layer: SQL text to concrete parse tree.
//
// Statement grammars live in the per-dialect submodules; the token stream,
// expression grammar and the clause sub-grammars both dialects share are
// here, branched on `Dialect` where the dialects disagree.

pub mod mysql;
pub mod oracle;

use crate::ast::Dialect;
use crate::cst::*;
use crate::error::SyntaxError;
use crate::lexer::{Lexer, Spanned, Token};

/// Identifiers that terminate an implicit (no `AS`) alias position.
const ALIAS_STOP: &[&str] = &[
    "join", "inner", "cross", "straight_join", "left", "right", "full", "natural", "on", "using",
    "where", "group", "order", "having", "limit", "offset", "fetch", "union", "set", "values",
    "partition", "as", "of", "for", "when", "start", "connect", "with",
];

pub(crate) struct TokenStream {
    chars: Vec<char>,
    tokens: Vec<Spanned>,
    pos: usize,
    dialect: Dialect,
}

impl TokenStream {
    pub(crate) fn new(sql: &str, dialect: Dialect) -> Result<Self, SyntaxError> {
        let tokens = Lexer::new(sql, dialect).tokenize()?;
        Ok(Self {
            chars: sql.chars().collect(),
            tokens,
            pos: 0,
            dialect,
        })
    }

    pub(crate) fn peek(&self) -> &Token {
        &self.tokens[self.pos].token
    }

    pub(crate) fn peek_at(&self, n: usize) -> &Token {
        self.tokens
            .get(self.pos + n)
            .map(|s| &s.token)
            .unwrap_or(&Token::Eof)
    }

    pub(crate) fn bump(&mut self) {
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
    }

    pub(crate) fn position(&self) -> usize {
        self.tokens[self.pos].start
    }

    /// End of the last consumed token, for raw-text recovery.
    pub(crate) fn prev_end(&self) -> usize {
        if self.pos == 0 {
            0
        } else {
            self.tokens[self.pos - 1].end
        }
    }

    pub(crate) fn slice(&self, start: usize, end: usize) -> String {
        self.chars[start..end].iter().collect()
    }

    pub(crate) fn error(&self, message: impl Into<String>) -> SyntaxError {
        SyntaxError::new(message, self.position())
    }

    pub(crate) fn at_eof(&self) -> bool {
        matches!(self.peek(), Token::Eof)
    }

    pub(crate) fn peek_kw(&self, kw: &str) -> bool {
        self.peek().is_kw(kw)
    }

    pub(crate) fn peek_kw_at(&self, n: usize, kw: &str) -> bool {
        self.peek_at(n).is_kw(kw)
    }

    pub(crate) fn accept_kw(&mut self, kw: &str) -> bool {
        if self.peek_kw(kw) {
            self.bump();
            true
        } else {
            false
        }
    }

    pub(crate) fn expect_kw(&mut self, kw: &str) -> Result<(), SyntaxError> {
        if self.accept_kw(kw) {
            Ok(())
        } else {
            Err(self.error(format!("expected '{}'", kw.to_uppercase())))
        }
    }

    pub(crate) fn peek_symbol(&self, sym: &str) -> bool {
        self.peek().is_symbol(sym)
    }

    pub(crate) fn accept_symbol(&mut self, sym: &str) -> bool {
        if self.peek_symbol(sym) {
            self.bump();
            true
        } else {
            false
        }
    }

    pub(crate) fn expect_symbol(&mut self, sym: &str) -> Result<(), SyntaxError> {
        if self.accept_symbol(sym) {
            Ok(())
        } else {
            Err(self.error(format!("expected '{sym}'")))
        }
    }

    pub(crate) fn ident(&mut self) -> Result<String, SyntaxError> {
        match self.peek() {
            Token::Ident { value, .. } => {
                let value = value.clone();
                self.bump();
                Ok(value)
            }
            _ => Err(self.error("expected identifier")),
        }
    }

    pub(crate) fn number(&mut self) -> Result<String, SyntaxError> {
        match self.peek() {
            Token::Number(text) => {
                let text = text.clone();
                self.bump();
                Ok(text)
            }
            _ => Err(self.error("expected number")),
        }
    }

    pub(crate) fn string_lit(&mut self) -> Result<String, SyntaxError> {
        match self.peek() {
            Token::StringLit(raw) => {
                let raw = raw.clone();
                self.bump();
                Ok(raw)
            }
            _ => Err(self.error("expected string literal")),
        }
    }

    /// Implicit or explicit alias; implicit aliases stop at clause keywords.
    pub(crate) fn alias(&mut self) -> Result<Option<String>, SyntaxError> {
        if self.accept_kw("as") {
            return Ok(Some(self.ident()?));
        }
        if let Token::Ident { value, quoted } = self.peek() {
            let stop = !quoted && ALIAS_STOP.iter().any(|s| value.eq_ignore_ascii_case(s));
            if !stop {
                let value = value.clone();
                self.bump();
                return Ok(Some(value));
            }
        }
        Ok(None)
    }
}

/// Runs a sub-grammar over `sql` and requires it to consume everything.
pub(crate) fn parse_complete<T>(
    sql: &str,
    dialect: Dialect,
    f: impl FnOnce(&mut TokenStream) -> Result<T, SyntaxError>,
) -> Result<T, SyntaxError> {
    let mut ts = TokenStream::new(sql, dialect)?;
    let value = f(&mut ts)?;
    ts.accept_symbol(";");
    if !ts.at_eof() {
        return Err(ts.error("unexpected trailing input"));
    }
    Ok(value)
}

// ---------------------------------------------------------------------------
// Names

pub(crate) fn relation_factor(ts: &mut TokenStream) -> Result<RelationFactorNode, SyntaxError> {
    let first = ts.ident()?;
    let (schema, relation) = if ts.peek_symbol(".") && matches!(ts.peek_at(1), Token::Ident { .. })
    {
        ts.bump();
        (Some(first), ts.ident()?)
    } else {
        (None, first)
    };
    let mut node = RelationFactorNode {
        schema,
        relation,
        user_variable: None,
        reverse_link: false,
    };
    if let Token::UserVariable(name) = ts.peek() {
        node.user_variable = Some(name.clone());
        ts.bump();
        if ts.dialect == Dialect::Oracle && ts.accept_symbol("!") {
            node.reverse_link = true;
        }
    }
    Ok(node)
}

/// Dotted identifier chain without a star.
pub(crate) fn name_chain(ts: &mut TokenStream) -> Result<Vec<String>, SyntaxError> {
    let mut parts = vec![ts.ident()?];
    while ts.peek_symbol(".") && matches!(ts.peek_at(1), Token::Ident { .. }) {
        ts.bump();
        parts.push(ts.ident()?);
    }
    Ok(parts)
}

pub(crate) fn paren_ident_list(ts: &mut TokenStream) -> Result<Vec<String>, SyntaxError> {
    ts.expect_symbol("(")?;
    let mut names = vec![ts.ident()?];
    while ts.accept_symbol(",") {
        names.push(ts.ident()?);
    }
    ts.expect_symbol(")")?;
    Ok(names)
}

// ---------------------------------------------------------------------------
// Expressions

pub(crate) fn expr(ts: &mut TokenStream) -> Result<ExprNode, SyntaxError> {
    if ts.dialect == Dialect::MySql {
        if let Token::UserVariable(name) = ts.peek() {
            if ts.peek_at(1).is_symbol(":=") {
                let var = ExprNode::UserVariable(name.clone());
                ts.bump();
                ts.bump();
                let value = or_expr(ts)?;
                return Ok(ExprNode::binary(var, ":=", value));
            }
        }
    }
    or_expr(ts)
}

pub(crate) fn expr_list(ts: &mut TokenStream) -> Result<Vec<ExprNode>, SyntaxError> {
    let mut items = vec![expr(ts)?];
    while ts.accept_symbol(",") {
        items.push(expr(ts)?);
    }
    Ok(items)
}

fn or_expr(ts: &mut TokenStream) -> Result<ExprNode, SyntaxError> {
    let mut left = and_expr(ts)?;
    loop {
        let concat_is_or = ts.dialect == Dialect::MySql;
        if ts.accept_kw("or") || (concat_is_or && ts.accept_symbol("||")) {
            let right = and_expr(ts)?;
            left = ExprNode::binary(left, "or", right);
        } else {
            return Ok(left);
        }
    }
}

fn and_expr(ts: &mut TokenStream) -> Result<ExprNode, SyntaxError> {
    let mut left = not_expr(ts)?;
    while ts.accept_kw("and") {
        let right = not_expr(ts)?;
        left = ExprNode::binary(left, "and", right);
    }
    Ok(left)
}

fn not_expr(ts: &mut TokenStream) -> Result<ExprNode, SyntaxError> {
    if ts.accept_kw("not") {
        let operand = not_expr(ts)?;
        return Ok(ExprNode::Unary {
            op: "not".to_owned(),
            operand: Box::new(operand),
        });
    }
    predicate(ts)
}

const CMP_OPS: &[&str] = &["<=>", "<=", ">=", "<>", "!=", "=", "<", ">"];

fn predicate(ts: &mut TokenStream) -> Result<ExprNode, SyntaxError> {
    let left = bit_or(ts)?;
    for op in CMP_OPS {
        if ts.accept_symbol(op) {
            let right = bit_or(ts)?;
            return Ok(ExprNode::binary(left, op, right));
        }
    }
    let negated = ts.peek_kw("not")
        && (ts.peek_kw_at(1, "like") || ts.peek_kw_at(1, "in") || ts.peek_kw_at(1, "between"));
    if negated {
        ts.bump();
    }
    if ts.accept_kw("like") {
        let right = bit_or(ts)?;
        let op = if negated { "not like" } else { "like" };
        return Ok(ExprNode::binary(left, op, right));
    }
    if ts.accept_kw("in") {
        ts.expect_symbol("(")?;
        let items = expr_list(ts)?;
        ts.expect_symbol(")")?;
        let op = if negated { "not in" } else { "in" };
        return Ok(ExprNode::binary(left, op, ExprNode::List(items)));
    }
    if ts.accept_kw("between") {
        let low = bit_or(ts)?;
        ts.expect_kw("and")?;
        let high = bit_or(ts)?;
        let op = if negated { "not between" } else { "between" };
        return Ok(ExprNode::binary(left, op, ExprNode::binary(low, "and", high)));
    }
    if ts.accept_kw("is") {
        let op = if ts.accept_kw("not") { "is not" } else { "is" };
        let right = if ts.accept_kw("null") {
            ExprNode::Literal("NULL".to_owned())
        } else if ts.accept_kw("true") {
            ExprNode::True
        } else if ts.accept_kw("false") {
            ExprNode::False
        } else {
            return Err(ts.error("expected NULL, TRUE or FALSE after IS"));
        };
        return Ok(ExprNode::binary(left, op, right));
    }
    Ok(left)
}

fn bit_or(ts: &mut TokenStream) -> Result<ExprNode, SyntaxError> {
    let mut left = bit_and(ts)?;
    while ts.peek_symbol("|") {
        ts.bump();
        let right = bit_and(ts)?;
        left = ExprNode::binary(left, "|", right);
    }
    Ok(left)
}

fn bit_and(ts: &mut TokenStream) -> Result<ExprNode, SyntaxError> {
    let mut left = shift(ts)?;
    while ts.peek_symbol("&") {
        ts.bump();
        let right = shift(ts)?;
        left = ExprNode::binary(left, "&", right);
    }
    Ok(left)
}

fn shift(ts: &mut TokenStream) -> Result<ExprNode, SyntaxError> {
    let mut left = additive(ts)?;
    loop {
        let op = if ts.accept_symbol("<<") {
            "<<"
        } else if ts.accept_symbol(">>") {
            ">>"
        } else {
            return Ok(left);
        };
        let right = additive(ts)?;
        left = ExprNode::binary(left, op, right);
    }
}

fn additive(ts: &mut TokenStream) -> Result<ExprNode, SyntaxError> {
    let mut left = multiplicative(ts)?;
    loop {
        let concat = ts.dialect == Dialect::Oracle && ts.peek_symbol("||");
        let op = if ts.accept_symbol("+") {
            "+"
        } else if ts.accept_symbol("-") {
            "-"
        } else if concat && ts.accept_symbol("||") {
            "||"
        } else {
            return Ok(left);
        };
        let right = multiplicative(ts)?;
        left = ExprNode::binary(left, op, right);
    }
}

fn multiplicative(ts: &mut TokenStream) -> Result<ExprNode, SyntaxError> {
    let mut left = bit_xor(ts)?;
    loop {
        let op = if ts.accept_symbol("*") {
            "*"
        } else if ts.accept_symbol("/") {
            "/"
        } else if ts.accept_symbol("%") {
            "%"
        } else if ts.accept_kw("mod") {
            "%"
        } else if ts.accept_kw("div") {
            "/"
        } else {
            return Ok(left);
        };
        let right = bit_xor(ts)?;
        left = ExprNode::binary(left, op, right);
    }
}

fn bit_xor(ts: &mut TokenStream) -> Result<ExprNode, SyntaxError> {
    let mut left = unary(ts)?;
    while ts.peek_symbol("^") {
        ts.bump();
        let right = unary(ts)?;
        left = ExprNode::binary(left, "^", right);
    }
    Ok(left)
}

fn unary(ts: &mut TokenStream) -> Result<ExprNode, SyntaxError> {
    if ts.accept_symbol("-") {
        let operand = unary(ts)?;
        return Ok(ExprNode::Unary {
            op: "-".to_owned(),
            operand: Box::new(operand),
        });
    }
    if ts.accept_symbol("+") {
        return unary(ts);
    }
    if ts.dialect == Dialect::MySql && ts.accept_symbol("!") {
        let operand = unary(ts)?;
        return Ok(ExprNode::Unary {
            op: "not".to_owned(),
            operand: Box::new(operand),
        });
    }
    primary(ts)
}

fn primary(ts: &mut TokenStream) -> Result<ExprNode, SyntaxError> {
    match ts.peek().clone() {
        Token::Number(text) => {
            ts.bump();
            Ok(ExprNode::Literal(text))
        }
        Token::StringLit(raw) => {
            ts.bump();
            Ok(ExprNode::Literal(raw))
        }
        Token::UserVariable(name) => {
            ts.bump();
            Ok(ExprNode::UserVariable(name))
        }
        Token::Symbol("(") => {
            ts.bump();
            let mut items = expr_list(ts)?;
            ts.expect_symbol(")")?;
            if items.len() == 1 {
                Ok(items.remove(0))
            } else {
                Ok(ExprNode::List(items))
            }
        }
        Token::Symbol("*") => {
            ts.bump();
            Ok(ExprNode::NameChain {
                parts: Vec::new(),
                star: true,
            })
        }
        Token::Ident { .. } => {
            if ts.peek_kw("null") {
                ts.bump();
                return Ok(ExprNode::Literal("NULL".to_owned()));
            }
            if ts.peek_kw("true") {
                ts.bump();
                return Ok(ExprNode::True);
            }
            if ts.peek_kw("false") {
                ts.bump();
                return Ok(ExprNode::False);
            }
            if ts.peek_kw("interval") {
                ts.bump();
                let value = expr(ts)?;
                let unit = ts.ident()?;
                return Ok(ExprNode::Interval {
                    value: Box::new(value),
                    unit: unit.to_lowercase(),
                });
            }
            let mut parts = vec![ts.ident()?];
            let mut star = false;
            while ts.peek_symbol(".") {
                if ts.peek_at(1).is_symbol("*") {
                    ts.bump();
                    ts.bump();
                    star = true;
                    break;
                }
                if matches!(ts.peek_at(1), Token::Ident { .. }) {
                    ts.bump();
                    parts.push(ts.ident()?);
                } else {
                    break;
                }
            }
            if !star && ts.accept_symbol("(") {
                let args = if ts.peek_symbol(")") {
                    Vec::new()
                } else {
                    expr_list(ts)?
                };
                ts.expect_symbol(")")?;
                return Ok(ExprNode::FunctionCall {
                    name: parts.join("."),
                    args,
                });
            }
            Ok(ExprNode::NameChain { parts, star })
        }
        _ => Err(ts.error("expected expression")),
    }
}

// ---------------------------------------------------------------------------
// Table references

pub(crate) fn table_refs(ts: &mut TokenStream) -> Result<Vec<TableRefNode>, SyntaxError> {
    let mut refs = vec![table_ref(ts)?];
    while ts.accept_symbol(",") {
        refs.push(table_ref(ts)?);
    }
    Ok(refs)
}

pub(crate) fn table_ref(ts: &mut TokenStream) -> Result<TableRefNode, SyntaxError> {
    let mut left = table_factor(ts)?;
    while let Some(join_tokens) = join_keywords(ts) {
        let right = table_factor(ts)?;
        let condition = if ts.accept_kw("on") {
            Some(JoinConditionNode::On(expr(ts)?))
        } else if ts.accept_kw("using") {
            ts.expect_symbol("(")?;
            let mut chains = vec![name_chain(ts)?];
            while ts.accept_symbol(",") {
                chains.push(name_chain(ts)?);
            }
            ts.expect_symbol(")")?;
            Some(JoinConditionNode::Using(chains))
        } else {
            None
        };
        left = TableRefNode::Joined {
            left: Box::new(left),
            join_tokens,
            right: Box::new(right),
            condition,
        };
    }
    Ok(left)
}

/// Consumes one join keyword run (`natural right outer join`) if the stream
/// is positioned at one, returning the lowercased tokens.
fn join_keywords(ts: &mut TokenStream) -> Option<Vec<String>> {
    let mut tokens = Vec::new();
    if ts.accept_kw("straight_join") {
        return Some(vec!["straight_join".to_owned()]);
    }
    if ts.accept_kw("natural") {
        tokens.push("natural".to_owned());
    }
    for side in ["inner", "cross", "left", "right", "full"] {
        if ts.accept_kw(side) {
            tokens.push(side.to_owned());
            if ts.accept_kw("outer") {
                tokens.push("outer".to_owned());
            }
            break;
        }
    }
    if ts.accept_kw("join") {
        tokens.push("join".to_owned());
        Some(tokens)
    } else if tokens.is_empty() {
        None
    } else {
        // consumed join modifiers with no JOIN behind them; this is a
        // syntax error surfaced by the caller's next expectation
        Some(tokens)
    }
}

fn table_factor(ts: &mut TokenStream) -> Result<TableRefNode, SyntaxError> {
    if ts.accept_symbol("(") {
        if ts.peek_kw("select") {
            let select = select(ts)?;
            ts.expect_symbol(")")?;
            let alias = ts.alias()?;
            return Ok(TableRefNode::Subquery {
                select: Box::new(select),
                alias,
            });
        }
        let refs = table_refs(ts)?;
        ts.expect_symbol(")")?;
        return Ok(TableRefNode::Paren(refs));
    }
    let factor = relation_factor(ts)?;
    let mut partition = None;
    if ts.dialect == Dialect::MySql && ts.peek_kw("partition") && ts.peek_at(1).is_symbol("(") {
        ts.bump();
        partition = Some(paren_ident_list(ts)?);
    }
    let mut flashback = None;
    if ts.dialect == Dialect::Oracle && ts.peek_kw("as") && ts.peek_kw_at(1, "of") {
        ts.bump();
        ts.bump();
        let kind = if ts.accept_kw("snapshot") {
            "snapshot"
        } else if ts.accept_kw("scn") {
            "scn"
        } else if ts.accept_kw("timestamp") {
            "timestamp"
        } else {
            return Err(ts.error("expected SNAPSHOT, SCN or TIMESTAMP after AS OF"));
        };
        flashback = Some(FlashbackNode {
            kind: kind.to_owned(),
            expr: expr(ts)?,
        });
    }
    let alias = ts.alias()?;
    Ok(TableRefNode::Named {
        factor,
        alias,
        partition,
        flashback,
    })
}

// ---------------------------------------------------------------------------
// SELECT

pub(crate) fn select(ts: &mut TokenStream) -> Result<SelectNode, SyntaxError> {
    ts.expect_kw("select")?;
    let qualifier = if ts.accept_kw("distinct") {
        Some("distinct".to_owned())
    } else if ts.dialect == Dialect::Oracle && ts.accept_kw("unique") {
        Some("unique".to_owned())
    } else if ts.accept_kw("all") {
        Some("all".to_owned())
    } else {
        None
    };
    let mut items = vec![projection(ts)?];
    while ts.accept_symbol(",") {
        items.push(projection(ts)?);
    }
    let from = if ts.accept_kw("from") {
        table_refs(ts)?
    } else {
        Vec::new()
    };
    let where_clause = if ts.accept_kw("where") {
        Some(expr(ts)?)
    } else {
        None
    };
    let group_by = if ts.accept_kw("group") {
        ts.expect_kw("by")?;
        expr_list(ts)?
    } else {
        Vec::new()
    };
    let having = if ts.accept_kw("having") {
        Some(expr(ts)?)
    } else {
        None
    };
    let order_by = if ts.accept_kw("order") {
        ts.expect_kw("by")?;
        sort_columns(ts)?
    } else {
        Vec::new()
    };
    let mut limit = None;
    let mut fetch = None;
    match ts.dialect {
        Dialect::MySql => {
            if ts.accept_kw("limit") {
                let first = expr(ts)?;
                if ts.accept_symbol(",") {
                    let count = expr(ts)?;
                    limit = Some(LimitNode {
                        count,
                        offset: Some(first),
                    });
                } else if ts.accept_kw("offset") {
                    let offset = expr(ts)?;
                    limit = Some(LimitNode {
                        count: first,
                        offset: Some(offset),
                    });
                } else {
                    limit = Some(LimitNode {
                        count: first,
                        offset: None,
                    });
                }
            }
        }
        Dialect::Oracle => {
            let mut offset = None;
            if ts.accept_kw("offset") {
                offset = Some(expr(ts)?);
                if !ts.accept_kw("rows") {
                    ts.expect_kw("row")?;
                }
            }
            if ts.accept_kw("fetch") {
                if !ts.accept_kw("first") {
                    ts.expect_kw("next")?;
                }
                let count = if ts.peek_kw("row") || ts.peek_kw("rows") || ts.peek_kw("percent") {
                    None
                } else {
                    Some(expr(ts)?)
                };
                let percent = ts.accept_kw("percent");
                if !ts.accept_kw("rows") {
                    ts.expect_kw("row")?;
                }
                let with_ties = if ts.accept_kw("only") {
                    false
                } else {
                    ts.expect_kw("with")?;
                    ts.expect_kw("ties")?;
                    true
                };
                fetch = Some(FetchNode {
                    count,
                    offset,
                    percent,
                    with_ties,
                });
            } else if let Some(offset) = offset {
                fetch = Some(FetchNode {
                    count: None,
                    offset: Some(offset),
                    percent: false,
                    with_ties: false,
                });
            }
        }
    }
    Ok(SelectNode {
        qualifier,
        items,
        from,
        where_clause,
        group_by,
        having,
        order_by,
        limit,
        fetch,
    })
}

fn projection(ts: &mut TokenStream) -> Result<ProjectionNode, SyntaxError> {
    if ts.peek_symbol("*") {
        ts.bump();
        return Ok(ProjectionNode::Star);
    }
    let e = expr(ts)?;
    let alias = if ts.peek_kw("from") { None } else { ts.alias()? };
    Ok(ProjectionNode::Expr { expr: e, alias })
}

pub(crate) fn sort_columns(ts: &mut TokenStream) -> Result<Vec<SortColumnNode>, SyntaxError> {
    let mut cols = vec![sort_column(ts)?];
    while ts.accept_symbol(",") {
        cols.push(sort_column(ts)?);
    }
    Ok(cols)
}

fn sort_column(ts: &mut TokenStream) -> Result<SortColumnNode, SyntaxError> {
    let e = expr(ts)?;
    let direction = if ts.accept_kw("asc") {
        Some("asc".to_owned())
    } else if ts.accept_kw("desc") {
        Some("desc".to_owned())
    } else {
        None
    };
    Ok(SortColumnNode {
        expr: e,
        direction,
    })
}

// ---------------------------------------------------------------------------
// Data types

pub(crate) fn data_type(ts: &mut TokenStream) -> Result<DataTypeNode, SyntaxError> {
    let first = ts.ident()?;
    let upper = first.to_uppercase();
    let mut node = DataTypeNode {
        name: vec![first],
        ..Default::default()
    };
    if upper == "DOUBLE" && ts.accept_kw("precision") {
        node.name.push("precision".to_owned());
    }
    if ts.dialect == Dialect::Oracle && upper == "INTERVAL" {
        return interval_type(ts, node);
    }
    if ts.dialect == Dialect::MySql && (upper == "ENUM" || upper == "SET") {
        ts.expect_symbol("(")?;
        node.literals.push(ts.string_lit()?);
        while ts.accept_symbol(",") {
            node.literals.push(ts.string_lit()?);
        }
        ts.expect_symbol(")")?;
    } else if ts.accept_symbol("(") {
        loop {
            if ts.accept_symbol("*") {
                node.args.push(TypeArgNode::Star);
            } else {
                node.args.push(TypeArgNode::Number(ts.number()?));
                if ts.dialect == Dialect::Oracle {
                    if ts.accept_kw("char") {
                        node.length_unit = Some("char".to_owned());
                    } else if ts.accept_kw("byte") {
                        node.length_unit = Some("byte".to_owned());
                    }
                }
            }
            if !ts.accept_symbol(",") {
                break;
            }
        }
        ts.expect_symbol(")")?;
    }
    if upper == "TIMESTAMP" && ts.accept_kw("with") {
        if ts.accept_kw("local") {
            node.with_local_time_zone = true;
        } else {
            node.with_time_zone = true;
        }
        ts.expect_kw("time")?;
        ts.expect_kw("zone")?;
    }
    if ts.dialect == Dialect::MySql {
        loop {
            if ts.accept_kw("unsigned") {
                node.modifiers.push("unsigned".to_owned());
            } else if ts.accept_kw("signed") {
                node.modifiers.push("signed".to_owned());
            } else if ts.accept_kw("zerofill") {
                node.modifiers.push("zerofill".to_owned());
            } else if ts.peek_kw("binary") && !is_charset_position(&upper) {
                ts.bump();
                node.modifiers.push("binary".to_owned());
            } else {
                break;
            }
        }
        if ts.accept_kw("charset") {
            node.charset = Some(ts.ident()?);
        } else if ts.peek_kw("character") && ts.peek_kw_at(1, "set") {
            ts.bump();
            ts.bump();
            node.charset = Some(ts.ident()?);
        }
        if ts.accept_kw("collate") {
            node.collation = Some(ts.ident()?);
        }
    }
    Ok(node)
}

// BINARY after a non-character type name would be a column named `binary`
fn is_charset_position(type_name: &str) -> bool {
    !matches!(
        type_name,
        "CHAR" | "VARCHAR" | "TEXT" | "TINYTEXT" | "MEDIUMTEXT" | "LONGTEXT" | "ENUM" | "SET"
    )
}

fn interval_type(
    ts: &mut TokenStream,
    mut node: DataTypeNode,
) -> Result<DataTypeNode, SyntaxError> {
    if ts.accept_kw("year") {
        node.name.push("year".to_owned());
        let year_precision = paren_precision(ts)?;
        ts.expect_kw("to")?;
        ts.expect_kw("month")?;
        node.name.push("to".to_owned());
        node.name.push("month".to_owned());
        node.interval = Some(IntervalTypeNode::YearToMonth { year_precision });
        Ok(node)
    } else if ts.accept_kw("day") {
        node.name.push("day".to_owned());
        let day_precision = paren_precision(ts)?;
        ts.expect_kw("to")?;
        ts.expect_kw("second")?;
        node.name.push("to".to_owned());
        node.name.push("second".to_owned());
        let second_precision = paren_precision(ts)?;
        node.interval = Some(IntervalTypeNode::DayToSecond {
            day_precision,
            second_precision,
        });
        Ok(node)
    } else {
        Err(ts.error("expected YEAR or DAY after INTERVAL"))
    }
}

fn paren_precision(ts: &mut TokenStream) -> Result<Option<String>, SyntaxError> {
    if ts.accept_symbol("(") {
        let n = ts.number()?;
        ts.expect_symbol(")")?;
        Ok(Some(n))
    } else {
        Ok(None)
    }
}

// ---------------------------------------------------------------------------
// Table elements

pub(crate) fn table_element(ts: &mut TokenStream) -> Result<TableElementNode, SyntaxError> {
    if ts.accept_kw("constraint") {
        let name = if ts.peek_kw("primary")
            || ts.peek_kw("unique")
            || ts.peek_kw("foreign")
            || ts.peek_kw("check")
        {
            None
        } else {
            Some(ts.ident()?)
        };
        let kind = constraint_kind(ts)?;
        return Ok(TableElementNode::Constraint(ConstraintNode { name, kind }));
    }
    if ts.peek_kw("primary") || ts.peek_kw("foreign") || ts.peek_kw("check") {
        let kind = constraint_kind(ts)?;
        return Ok(TableElementNode::Constraint(ConstraintNode {
            name: None,
            kind,
        }));
    }
    if ts.peek_kw("unique") && (ts.peek_at(1).is_symbol("(") || unique_key_follows(ts)) {
        let kind = constraint_kind(ts)?;
        return Ok(TableElementNode::Constraint(ConstraintNode {
            name: None,
            kind,
        }));
    }
    if ts.peek_kw("key") || ts.peek_kw("index") {
        ts.bump();
        return Ok(TableElementNode::Index(index_element(ts)?));
    }
    Ok(TableElementNode::Column(column_def(ts)?))
}

fn unique_key_follows(ts: &TokenStream) -> bool {
    (ts.peek_kw_at(1, "key") || ts.peek_kw_at(1, "index"))
        && (ts.peek_at(2).is_symbol("(") || matches!(ts.peek_at(2), Token::Ident { .. }))
}

fn constraint_kind(ts: &mut TokenStream) -> Result<ConstraintKindNode, SyntaxError> {
    if ts.accept_kw("primary") {
        ts.expect_kw("key")?;
        ts.expect_symbol("(")?;
        let cols = sort_columns(ts)?;
        ts.expect_symbol(")")?;
        return Ok(ConstraintKindNode::PrimaryKey(cols));
    }
    if ts.accept_kw("unique") {
        if !ts.accept_kw("key") {
            ts.accept_kw("index");
        }
        if !ts.peek_symbol("(") {
            // index name in key position, recorded nowhere for constraints
            ts.ident()?;
        }
        ts.expect_symbol("(")?;
        let cols = sort_columns(ts)?;
        ts.expect_symbol(")")?;
        return Ok(ConstraintKindNode::Unique(cols));
    }
    if ts.accept_kw("foreign") {
        ts.expect_kw("key")?;
        let columns = if ts.peek_symbol("(") {
            paren_ident_list(ts)?
        } else {
            Vec::new()
        };
        ts.expect_kw("references")?;
        let ref_table = relation_factor(ts)?;
        let ref_columns = if ts.peek_symbol("(") {
            paren_ident_list(ts)?
        } else {
            Vec::new()
        };
        return Ok(ConstraintKindNode::ForeignKey {
            columns,
            ref_table,
            ref_columns,
        });
    }
    ts.expect_kw("check")?;
    ts.expect_symbol("(")?;
    let e = expr(ts)?;
    ts.expect_symbol(")")?;
    Ok(ConstraintKindNode::Check(e))
}

pub(crate) fn index_element(ts: &mut TokenStream) -> Result<IndexElementNode, SyntaxError> {
    let name = if ts.peek_symbol("(") {
        None
    } else {
        Some(ts.ident()?)
    };
    ts.expect_symbol("(")?;
    let columns = sort_columns(ts)?;
    ts.expect_symbol(")")?;
    let mut options = Vec::new();
    while let Some(opt) = index_option(ts)? {
        options.push(opt);
    }
    Ok(IndexElementNode {
        name,
        columns,
        options,
    })
}

pub(crate) fn column_def(ts: &mut TokenStream) -> Result<ColumnDefNode, SyntaxError> {
    let name = ts.ident()?;
    let dt = data_type(ts)?;
    let mut attrs = Vec::new();
    loop {
        if ts.peek_kw("not") && ts.peek_kw_at(1, "null") {
            ts.bump();
            ts.bump();
            attrs.push(ColumnAttrNode::NotNull);
        } else if ts.accept_kw("null") {
            attrs.push(ColumnAttrNode::Null);
        } else if ts.accept_kw("default") {
            attrs.push(ColumnAttrNode::Default(expr(ts)?));
        } else if ts.accept_kw("auto_increment") {
            attrs.push(ColumnAttrNode::AutoIncrement);
        } else if ts.peek_kw("primary") && ts.peek_kw_at(1, "key") {
            ts.bump();
            ts.bump();
            attrs.push(ColumnAttrNode::PrimaryKey);
        } else if ts.accept_kw("unique") {
            ts.accept_kw("key");
            attrs.push(ColumnAttrNode::UniqueKey);
        } else if ts.accept_kw("comment") {
            attrs.push(ColumnAttrNode::Comment(ts.string_lit()?));
        } else if ts.peek_kw("on") && ts.peek_kw_at(1, "update") {
            ts.bump();
            ts.bump();
            attrs.push(ColumnAttrNode::OnUpdate(expr(ts)?));
        } else {
            break;
        }
    }
    Ok(ColumnDefNode {
        name,
        data_type: dt,
        attrs,
    })
}

// ---------------------------------------------------------------------------
// Table and index options

const COMMON_OPTION_KEYS: &[&str] = &[
    "PARALLEL",
    "NOPARALLEL",
    "TABLESPACE",
    "BLOCK_SIZE",
    "REPLICA_NUM",
    "USE_BLOOM_FILTER",
    "PRIMARY_ZONE",
    "TABLEGROUP",
    "DUPLICATE_SCOPE",
    "TABLE_MODE",
    "COMMENT",
    "TABLET_SIZE",
    "LOCATION",
];

const MYSQL_OPTION_KEYS: &[&str] = &[
    "ENGINE",
    "AUTO_INCREMENT",
    "ROW_FORMAT",
    "KEY_BLOCK_SIZE",
    "MAX_ROWS",
    "MIN_ROWS",
    "CHECKSUM",
    "AVG_ROW_LENGTH",
    "COMPRESSION",
    "CHARSET",
    "COLLATE",
];

const ORACLE_OPTION_KEYS: &[&str] = &["PCTFREE", "PCTUSED", "INITRANS", "MAXTRANS"];

/// Parses one table option if the stream is positioned at one. Multi-word
/// spellings are canonicalized (`DEFAULT CHARSET` and `CHARACTER SET` both
/// become `CHARSET`).
pub(crate) fn table_option(
    ts: &mut TokenStream,
) -> Result<Option<TableOptionNode>, SyntaxError> {
    let word = match ts.peek() {
        Token::Ident { value, quoted: false } => value.to_uppercase(),
        _ => return Ok(None),
    };
    match word.as_str() {
        "DEFAULT" => {
            let key = if ts.peek_kw_at(1, "charset") {
                ts.bump();
                ts.bump();
                "CHARSET"
            } else if ts.peek_kw_at(1, "character") {
                ts.bump();
                ts.bump();
                ts.expect_kw("set")?;
                "CHARSET"
            } else if ts.peek_kw_at(1, "collate") {
                ts.bump();
                ts.bump();
                "COLLATE"
            } else {
                return Ok(None);
            };
            return Ok(Some(TableOptionNode {
                name: key.to_owned(),
                value: option_value(ts)?,
            }));
        }
        "CHARACTER" if ts.peek_kw_at(1, "set") => {
            ts.bump();
            ts.bump();
            return Ok(Some(TableOptionNode {
                name: "CHARSET".to_owned(),
                value: option_value(ts)?,
            }));
        }
        "READ" => {
            let key = if ts.peek_kw_at(1, "only") {
                "READ_ONLY"
            } else if ts.peek_kw_at(1, "write") {
                "READ_WRITE"
            } else {
                return Ok(None);
            };
            ts.bump();
            ts.bump();
            return Ok(Some(TableOptionNode {
                name: key.to_owned(),
                value: OptionValueNode::None,
            }));
        }
        "ENABLE" | "DISABLE" if ts.dialect == Dialect::Oracle => {
            if !(ts.peek_kw_at(1, "row") && ts.peek_kw_at(2, "movement")) {
                return Ok(None);
            }
            ts.bump();
            ts.bump();
            ts.bump();
            let key = if word == "ENABLE" {
                "ENABLE_ROW_MOVEMENT"
            } else {
                "DISABLE_ROW_MOVEMENT"
            };
            return Ok(Some(TableOptionNode {
                name: key.to_owned(),
                value: OptionValueNode::None,
            }));
        }
        "COMPRESS" if ts.dialect == Dialect::Oracle => {
            ts.bump();
            let value = match ts.peek() {
                Token::Ident { value, quoted: false }
                    if matches!(
                        value.to_uppercase().as_str(),
                        "BASIC" | "ADVANCED" | "ARCHIVE"
                    ) =>
                {
                    let v = value.clone();
                    ts.bump();
                    OptionValueNode::Ident(v)
                }
                _ => OptionValueNode::None,
            };
            return Ok(Some(TableOptionNode {
                name: "COMPRESS".to_owned(),
                value,
            }));
        }
        "NOCOMPRESS" if ts.dialect == Dialect::Oracle => {
            ts.bump();
            return Ok(Some(TableOptionNode {
                name: "NOCOMPRESS".to_owned(),
                value: OptionValueNode::None,
            }));
        }
        "STORAGE" if ts.dialect == Dialect::Oracle => {
            ts.bump();
            ts.expect_symbol("(")?;
            let mut words = Vec::new();
            let mut depth = 1usize;
            loop {
                match ts.peek() {
                    Token::Symbol("(") => {
                        depth += 1;
                        words.push("(".to_owned());
                        ts.bump();
                    }
                    Token::Symbol(")") => {
                        depth -= 1;
                        ts.bump();
                        if depth == 0 {
                            break;
                        }
                        words.push(")".to_owned());
                    }
                    Token::Ident { value, .. } => {
                        words.push(value.clone());
                        ts.bump();
                    }
                    Token::Number(n) => {
                        words.push(n.clone());
                        ts.bump();
                    }
                    Token::StringLit(s) => {
                        words.push(s.clone());
                        ts.bump();
                    }
                    Token::Symbol(s) => {
                        words.push((*s).to_owned());
                        ts.bump();
                    }
                    _ => return Err(ts.error("unterminated STORAGE clause")),
                }
            }
            return Ok(Some(TableOptionNode {
                name: "STORAGE".to_owned(),
                value: OptionValueNode::IdentList(words),
            }));
        }
        "SORTKEY" if ts.dialect == Dialect::MySql => {
            ts.bump();
            let names = paren_ident_list(ts)?;
            return Ok(Some(TableOptionNode {
                name: "SORTKEY".to_owned(),
                value: OptionValueNode::IdentList(names),
            }));
        }
        "EXPIRE_INFO" => {
            ts.bump();
            ts.accept_symbol("=");
            ts.expect_symbol("(")?;
            let e = expr(ts)?;
            ts.expect_symbol(")")?;
            return Ok(Some(TableOptionNode {
                name: "EXPIRE_INFO".to_owned(),
                value: OptionValueNode::ExprList(vec![e]),
            }));
        }
        _ => {}
    }
    let known = COMMON_OPTION_KEYS.contains(&word.as_str())
        || (ts.dialect == Dialect::MySql && MYSQL_OPTION_KEYS.contains(&word.as_str()))
        || (ts.dialect == Dialect::Oracle && ORACLE_OPTION_KEYS.contains(&word.as_str()));
    if !known {
        return Ok(None);
    }
    ts.bump();
    if word == "NOPARALLEL" {
        return Ok(Some(TableOptionNode {
            name: word,
            value: OptionValueNode::None,
        }));
    }
    Ok(Some(TableOptionNode {
        name: word,
        value: option_value(ts)?,
    }))
}

fn option_value(ts: &mut TokenStream) -> Result<OptionValueNode, SyntaxError> {
    ts.accept_symbol("=");
    match ts.peek().clone() {
        Token::Number(n) => {
            ts.bump();
            Ok(OptionValueNode::Number(n))
        }
        Token::StringLit(raw) => {
            ts.bump();
            Ok(OptionValueNode::Str(raw))
        }
        Token::Ident { value, quoted: false } if value.eq_ignore_ascii_case("true") => {
            ts.bump();
            Ok(OptionValueNode::Bool(true))
        }
        Token::Ident { value, quoted: false } if value.eq_ignore_ascii_case("false") => {
            ts.bump();
            Ok(OptionValueNode::Bool(false))
        }
        Token::Ident { value, .. } => {
            ts.bump();
            Ok(OptionValueNode::Ident(value))
        }
        _ => Err(ts.error("expected option value")),
    }
}

const INDEX_OPTION_KEYS: &[&str] = &["BLOCK_SIZE", "COMMENT", "PARALLEL"];

pub(crate) fn index_option(
    ts: &mut TokenStream,
) -> Result<Option<TableOptionNode>, SyntaxError> {
    let word = match ts.peek() {
        Token::Ident { value, quoted: false } => value.to_uppercase(),
        _ => return Ok(None),
    };
    match word.as_str() {
        "GLOBAL" | "LOCAL" | "VISIBLE" | "INVISIBLE" | "NOPARALLEL" => {
            ts.bump();
            Ok(Some(TableOptionNode {
                name: word,
                value: OptionValueNode::None,
            }))
        }
        "USING" => {
            ts.bump();
            let method = ts.ident()?;
            Ok(Some(TableOptionNode {
                name: "USING".to_owned(),
                value: OptionValueNode::Ident(method),
            }))
        }
        _ if INDEX_OPTION_KEYS.contains(&word.as_str()) => {
            ts.bump();
            Ok(Some(TableOptionNode {
                name: word,
                value: option_value(ts)?,
            }))
        }
        _ => Ok(None),
    }
}

// ---------------------------------------------------------------------------
// Partitions

pub(crate) fn partition_option(ts: &mut TokenStream) -> Result<PartitionNode, SyntaxError> {
    ts.expect_kw("partition")?;
    ts.expect_kw("by")?;
    if ts.accept_kw("hash") {
        ts.expect_symbol("(")?;
        let keys = expr_list(ts)?;
        ts.expect_symbol(")")?;
        let count = if ts.accept_kw("partitions") {
            Some(ts.number()?)
        } else {
            None
        };
        let elements = if ts.peek_symbol("(") {
            Some(partition_elements(ts)?)
        } else {
            None
        };
        return Ok(PartitionNode::Hash {
            keys,
            count,
            elements,
        });
    }
    if ts.dialect == Dialect::MySql && ts.accept_kw("key") {
        let columns = paren_ident_list(ts)?;
        let count = if ts.accept_kw("partitions") {
            Some(ts.number()?)
        } else {
            None
        };
        return Ok(PartitionNode::Key { columns, count });
    }
    let list = if ts.accept_kw("range") {
        false
    } else {
        ts.expect_kw("list")?;
        true
    };
    let columns = ts.accept_kw("columns");
    ts.expect_symbol("(")?;
    let keys = expr_list(ts)?;
    ts.expect_symbol(")")?;
    let elements = partition_elements(ts)?;
    if list {
        Ok(PartitionNode::List {
            keys,
            columns,
            elements,
        })
    } else {
        Ok(PartitionNode::Range {
            keys,
            columns,
            elements,
        })
    }
}

pub(crate) fn partition_elements(
    ts: &mut TokenStream,
) -> Result<Vec<PartitionElementNode>, SyntaxError> {
    ts.expect_symbol("(")?;
    let mut elements = vec![partition_element(ts)?];
    while ts.accept_symbol(",") {
        elements.push(partition_element(ts)?);
    }
    ts.expect_symbol(")")?;
    Ok(elements)
}

fn partition_element(ts: &mut TokenStream) -> Result<PartitionElementNode, SyntaxError> {
    ts.expect_kw("partition")?;
    let name = ts.ident()?;
    if !ts.accept_kw("values") {
        return Ok(PartitionElementNode {
            name,
            values: PartitionElementValuesNode::Hash,
        });
    }
    if ts.accept_kw("less") {
        ts.expect_kw("than")?;
        let values = if ts.peek_symbol("(") {
            partition_values(ts)?
        } else if ts.accept_kw("maxvalue") {
            vec![PartitionValueNode::MaxValue]
        } else {
            return Err(ts.error("expected partition bound"));
        };
        return Ok(PartitionElementNode {
            name,
            values: PartitionElementValuesNode::LessThan(values),
        });
    }
    ts.expect_kw("in")?;
    let values = partition_values(ts)?;
    Ok(PartitionElementNode {
        name,
        values: PartitionElementValuesNode::In(values),
    })
}

fn partition_values(ts: &mut TokenStream) -> Result<Vec<PartitionValueNode>, SyntaxError> {
    ts.expect_symbol("(")?;
    let mut values = vec![partition_value(ts)?];
    while ts.accept_symbol(",") {
        values.push(partition_value(ts)?);
    }
    ts.expect_symbol(")")?;
    Ok(values)
}

fn partition_value(ts: &mut TokenStream) -> Result<PartitionValueNode, SyntaxError> {
    if ts.accept_kw("maxvalue") {
        Ok(PartitionValueNode::MaxValue)
    } else if ts.accept_kw("default") {
        Ok(PartitionValueNode::Default)
    } else {
        Ok(PartitionValueNode::Expr(expr(ts)?))
    }
}

// ---------------------------------------------------------------------------
// Statement bodies shared by both dialects

pub(crate) fn create_table_tail(
    ts: &mut TokenStream,
    temporary: bool,
    external: bool,
) -> Result<CreateTableNode, SyntaxError> {
    ts.expect_kw("table")?;
    let if_not_exists = if ts.peek_kw("if") {
        ts.bump();
        ts.expect_kw("not")?;
        ts.expect_kw("exists")?;
        true
    } else {
        false
    };
    let table = relation_factor(ts)?;
    let mut elements = Vec::new();
    if ts.accept_symbol("(") {
        elements.push(table_element(ts)?);
        while ts.accept_symbol(",") {
            elements.push(table_element(ts)?);
        }
        ts.expect_symbol(")")?;
    }
    let mut options = Vec::new();
    while let Some(opt) = table_option(ts)? {
        options.push(opt);
        ts.accept_symbol(",");
    }
    let partition = if ts.peek_kw("partition") && ts.peek_kw_at(1, "by") {
        Some(partition_option(ts)?)
    } else {
        None
    };
    let column_groups = if ts.peek_kw("with") && ts.peek_kw_at(1, "column") {
        ts.bump();
        ts.bump();
        ts.expect_kw("group")?;
        Some(column_group_list(ts)?)
    } else {
        None
    };
    let as_select = if ts.accept_kw("as") {
        Some(Box::new(select(ts)?))
    } else if ts.peek_kw("select") {
        Some(Box::new(select(ts)?))
    } else {
        None
    };
    Ok(CreateTableNode {
        temporary,
        external,
        if_not_exists,
        table,
        elements,
        options,
        partition,
        column_groups,
        as_select,
    })
}

pub(crate) fn create_index_tail(
    ts: &mut TokenStream,
    unique: bool,
) -> Result<CreateIndexNode, SyntaxError> {
    ts.expect_kw("index")?;
    let index = relation_factor(ts)?;
    ts.expect_kw("on")?;
    let on = relation_factor(ts)?;
    ts.expect_symbol("(")?;
    let columns = sort_columns(ts)?;
    ts.expect_symbol(")")?;
    let mut options = Vec::new();
    while let Some(opt) = index_option(ts)? {
        options.push(opt);
    }
    Ok(CreateIndexNode {
        unique,
        index,
        on,
        columns,
        options,
    })
}

pub(crate) fn alter_table_stmt(ts: &mut TokenStream) -> Result<AlterTableNode, SyntaxError> {
    ts.expect_kw("alter")?;
    ts.expect_kw("table")?;
    let table = relation_factor(ts)?;
    let mut actions = vec![alter_action(ts)?];
    while ts.accept_symbol(",") {
        actions.push(alter_action(ts)?);
    }
    Ok(AlterTableNode { table, actions })
}

const ACTION_KWS: &[&str] = &[
    "add", "drop", "modify", "change", "rename", "truncate", "remove", "refresh", "set", "alter",
];

fn alter_action(ts: &mut TokenStream) -> Result<AlterActionNode, SyntaxError> {
    if ts.accept_kw("add") {
        return add_action(ts);
    }
    if ts.accept_kw("drop") {
        return drop_action(ts);
    }
    if ts.accept_kw("modify") {
        ts.accept_kw("column");
        return Ok(AlterActionNode::ModifyColumns(column_def_group(ts)?));
    }
    if ts.accept_kw("change") {
        ts.accept_kw("column");
        let from = ts.ident()?;
        let def = column_def(ts)?;
        return Ok(AlterActionNode::ChangeColumn { from, def });
    }
    if ts.accept_kw("rename") {
        if ts.accept_kw("column") {
            let from = ts.ident()?;
            ts.expect_kw("to")?;
            let to = ts.ident()?;
            return Ok(AlterActionNode::RenameColumn { from, to });
        }
        if ts.accept_kw("index") || ts.accept_kw("key") {
            let from = ts.ident()?;
            ts.expect_kw("to")?;
            let to = ts.ident()?;
            return Ok(AlterActionNode::RenameIndex { from, to });
        }
        if !ts.accept_kw("to") {
            ts.accept_kw("as");
        }
        return Ok(AlterActionNode::RenameTo(relation_factor(ts)?));
    }
    if ts.accept_kw("truncate") {
        ts.expect_kw("partition")?;
        return Ok(AlterActionNode::TruncatePartitions(action_ident_list(ts)?));
    }
    if ts.accept_kw("remove") {
        ts.expect_kw("partitioning")?;
        return Ok(AlterActionNode::RemovePartitioning);
    }
    if ts.accept_kw("refresh") {
        return Ok(AlterActionNode::Refresh);
    }
    let mut options = Vec::new();
    while let Some(opt) = table_option(ts)? {
        options.push(opt);
    }
    if options.is_empty() {
        Err(ts.error("unknown ALTER TABLE action"))
    } else {
        Ok(AlterActionNode::Options(options))
    }
}

fn add_action(ts: &mut TokenStream) -> Result<AlterActionNode, SyntaxError> {
    if ts.peek_kw("column") && ts.peek_kw_at(1, "group") {
        ts.bump();
        ts.bump();
        return Ok(AlterActionNode::AddColumnGroups(column_group_list(ts)?));
    }
    if ts.accept_kw("column") {
        return Ok(AlterActionNode::AddColumns(column_def_group(ts)?));
    }
    if ts.peek_kw("partition") {
        ts.bump();
        return Ok(AlterActionNode::AddPartitions(partition_elements(ts)?));
    }
    if ts.peek_symbol("(") {
        return Ok(AlterActionNode::AddColumns(column_def_group(ts)?));
    }
    match table_element(ts)? {
        TableElementNode::Column(def) => Ok(AlterActionNode::AddColumns(vec![def])),
        TableElementNode::Constraint(c) => Ok(AlterActionNode::AddConstraint(c)),
        TableElementNode::Index(i) => Ok(AlterActionNode::AddIndex(i)),
    }
}

fn drop_action(ts: &mut TokenStream) -> Result<AlterActionNode, SyntaxError> {
    if ts.peek_kw("column") && ts.peek_kw_at(1, "group") {
        ts.bump();
        ts.bump();
        return Ok(AlterActionNode::DropColumnGroups(column_group_list(ts)?));
    }
    if ts.accept_kw("column") {
        let name = ts.ident()?;
        return Ok(AlterActionNode::DropColumn {
            name,
            behavior: drop_behavior(ts),
        });
    }
    if ts.accept_kw("partition") {
        return Ok(AlterActionNode::DropPartitions(action_ident_list(ts)?));
    }
    if ts.accept_kw("index") || ts.accept_kw("key") {
        return Ok(AlterActionNode::DropIndex(ts.ident()?));
    }
    if ts.accept_kw("primary") {
        ts.expect_kw("key")?;
        return Ok(AlterActionNode::DropPrimaryKey);
    }
    if ts.accept_kw("constraint") {
        return Ok(AlterActionNode::DropConstraints(action_ident_list(ts)?));
    }
    if ts.accept_kw("foreign") {
        ts.expect_kw("key")?;
        return Ok(AlterActionNode::DropConstraints(vec![ts.ident()?]));
    }
    if ts.accept_kw("check") {
        return Ok(AlterActionNode::DropConstraints(action_ident_list(ts)?));
    }
    let name = ts.ident()?;
    Ok(AlterActionNode::DropColumn {
        name,
        behavior: drop_behavior(ts),
    })
}

fn drop_behavior(ts: &mut TokenStream) -> Option<String> {
    if ts.accept_kw("cascade") {
        Some("cascade".to_owned())
    } else if ts.accept_kw("restrict") {
        Some("restrict".to_owned())
    } else {
        None
    }
}

fn column_def_group(ts: &mut TokenStream) -> Result<Vec<ColumnDefNode>, SyntaxError> {
    if ts.accept_symbol("(") {
        let mut defs = vec![column_def(ts)?];
        while ts.accept_symbol(",") {
            defs.push(column_def(ts)?);
        }
        ts.expect_symbol(")")?;
        Ok(defs)
    } else {
        Ok(vec![column_def(ts)?])
    }
}

/// Identifier list inside an alter action; commas before another action
/// keyword end the list instead of extending it.
fn action_ident_list(ts: &mut TokenStream) -> Result<Vec<String>, SyntaxError> {
    let mut names = vec![ts.ident()?];
    while ts.peek_symbol(",") {
        match ts.peek_at(1) {
            Token::Ident { value, quoted } => {
                let is_action =
                    !quoted && ACTION_KWS.iter().any(|k| value.eq_ignore_ascii_case(k));
                if is_action {
                    break;
                }
                ts.bump();
                names.push(ts.ident()?);
            }
            _ => break,
        }
    }
    Ok(names)
}

pub(crate) fn insert_stmt(ts: &mut TokenStream) -> Result<InsertNode, SyntaxError> {
    ts.expect_kw("insert")?;
    ts.accept_kw("into");
    let table = relation_factor(ts)?;
    let partition = if ts.dialect == Dialect::MySql
        && ts.peek_kw("partition")
        && ts.peek_at(1).is_symbol("(")
    {
        ts.bump();
        Some(paren_ident_list(ts)?)
    } else {
        None
    };
    let columns = if ts.peek_symbol("(") {
        ts.bump();
        let mut chains = vec![name_chain(ts)?];
        while ts.accept_symbol(",") {
            chains.push(name_chain(ts)?);
        }
        ts.expect_symbol(")")?;
        Some(chains)
    } else {
        None
    };
    let mut values = Vec::new();
    let mut select_body = None;
    if ts.accept_kw("values") || ts.accept_kw("value") {
        loop {
            ts.expect_symbol("(")?;
            values.push(expr_list(ts)?);
            ts.expect_symbol(")")?;
            if !ts.accept_symbol(",") {
                break;
            }
        }
    } else if ts.peek_kw("select") {
        select_body = Some(Box::new(select(ts)?));
    } else {
        return Err(ts.error("expected VALUES or SELECT"));
    }
    Ok(InsertNode {
        table,
        partition,
        columns,
        values,
        select: select_body,
    })
}

pub(crate) fn update_stmt(ts: &mut TokenStream) -> Result<UpdateNode, SyntaxError> {
    let start = ts.position();
    ts.expect_kw("update")?;
    let refs = table_refs(ts)?;
    ts.expect_kw("set")?;
    let mut assigns = vec![update_assign(ts)?];
    while ts.accept_symbol(",") {
        assigns.push(update_assign(ts)?);
    }
    let where_clause = if ts.accept_kw("where") {
        Some(expr(ts)?)
    } else {
        None
    };
    let raw_text = ts.slice(start, ts.prev_end());
    Ok(UpdateNode {
        table_refs: refs,
        assigns,
        where_clause,
        raw_text,
    })
}

fn update_assign(ts: &mut TokenStream) -> Result<(Vec<String>, ExprNode), SyntaxError> {
    let chain = name_chain(ts)?;
    ts.expect_symbol("=")?;
    let value = expr(ts)?;
    Ok((chain, value))
}

pub(crate) fn truncate_stmt(ts: &mut TokenStream) -> Result<TruncateTableNode, SyntaxError> {
    ts.expect_kw("truncate")?;
    ts.accept_kw("table");
    Ok(TruncateTableNode {
        table: relation_factor(ts)?,
    })
}

// ---------------------------------------------------------------------------
// Column groups

pub(crate) fn column_group_list(
    ts: &mut TokenStream,
) -> Result<Vec<ColumnGroupNode>, SyntaxError> {
    ts.expect_symbol("(")?;
    let mut groups = vec![column_group(ts)?];
    while ts.accept_symbol(",") {
        groups.push(column_group(ts)?);
    }
    ts.expect_symbol(")")?;
    Ok(groups)
}

fn column_group(ts: &mut TokenStream) -> Result<ColumnGroupNode, SyntaxError> {
    if ts.peek_kw("all") && ts.peek_kw_at(1, "columns") {
        ts.bump();
        ts.bump();
        return Ok(ColumnGroupNode::AllColumns);
    }
    if ts.peek_kw("each") && ts.peek_kw_at(1, "column") {
        ts.bump();
        ts.bump();
        return Ok(ColumnGroupNode::EachColumn);
    }
    let name = ts.ident()?;
    let columns = paren_ident_list(ts)?;
    Ok(ColumnGroupNode::Named { name, columns })
}
