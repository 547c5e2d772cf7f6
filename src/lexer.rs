// Dialect-aware SQL lexer

use crate::ast::Dialect;
use crate::error::SyntaxError;

/// One lexical token. Literal tokens keep their raw source text, quotes
/// included, so downstream layers can stay opaque about literal syntax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Identifier or keyword; quoted identifiers arrive with quotes
    /// stripped and `quoted` set.
    Ident { value: String, quoted: bool },
    /// Numeric literal, raw text (`12`, `2E2`, `1.5`).
    Number(String),
    /// String literal, raw text including the surrounding quotes.
    StringLit(String),
    /// `@name` suffix used for user variables and dblinks.
    UserVariable(String),
    /// Punctuation or operator.
    Symbol(&'static str),
    Eof,
}

impl Token {
    /// Case-insensitive keyword test; quoted identifiers never match.
    pub fn is_kw(&self, kw: &str) -> bool {
        matches!(self, Token::Ident { value, quoted: false } if value.eq_ignore_ascii_case(kw))
    }

    pub fn is_symbol(&self, sym: &str) -> bool {
        matches!(self, Token::Symbol(s) if *s == sym)
    }
}

/// Token plus its character span in the source, used for error positions
/// and raw-text recovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spanned {
    pub token: Token,
    pub start: usize,
    pub end: usize,
}

const SYMBOLS: &[&str] = &[
    "<=>", ":=", "<<", ">>", "<=", ">=", "<>", "!=", "||", "(", ")", ",", ".", ";", "=", "<", ">",
    "+", "-", "*", "/", "%", "!", "&", "|", "^", "~",
];

/// Tokenizes one SQL text for one dialect. MySQL mode quotes identifiers
/// with backticks and treats double-quoted text as a string; Oracle mode
/// quotes identifiers with double quotes. Fail-fast: the first bad
/// character or unterminated literal aborts.
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    dialect: Dialect,
}

impl Lexer {
    pub fn new(input: &str, dialect: Dialect) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            dialect,
        }
    }

    pub fn tokenize(mut self) -> Result<Vec<Spanned>, SyntaxError> {
        let mut tokens = Vec::new();
        loop {
            self.skip_whitespace_and_comments()?;
            let start = self.position;
            if self.is_eof() {
                tokens.push(Spanned {
                    token: Token::Eof,
                    start,
                    end: start,
                });
                return Ok(tokens);
            }
            let token = self.next_token()?;
            tokens.push(Spanned {
                token,
                start,
                end: self.position,
            });
        }
    }

    fn next_token(&mut self) -> Result<Token, SyntaxError> {
        let ch = self.current();
        if ch == '\'' {
            return self.string_literal('\'');
        }
        if ch == '"' {
            return match self.dialect {
                Dialect::MySql => self.string_literal('"'),
                Dialect::Oracle => self.quoted_ident('"'),
            };
        }
        if ch == '`' && self.dialect == Dialect::MySql {
            return self.quoted_ident('`');
        }
        if ch == '@' {
            return self.user_variable();
        }
        if ch.is_ascii_digit() {
            return Ok(self.number());
        }
        if is_ident_start(ch) {
            return Ok(self.bare_ident());
        }
        for sym in SYMBOLS {
            if self.matches_str(sym) {
                self.position += sym.chars().count();
                return Ok(Token::Symbol(sym));
            }
        }
        Err(SyntaxError::new(
            format!("unexpected character '{ch}'"),
            self.position,
        ))
    }

    fn string_literal(&mut self, quote: char) -> Result<Token, SyntaxError> {
        let start = self.position;
        self.advance();
        while !self.is_eof() {
            if self.current() == quote {
                // doubled quote is an escaped quote inside the literal
                if self.peek_next() == Some(quote) {
                    self.advance();
                    self.advance();
                    continue;
                }
                self.advance();
                let raw: String = self.input[start..self.position].iter().collect();
                return Ok(Token::StringLit(raw));
            }
            if self.current() == '\\' && self.dialect == Dialect::MySql {
                self.advance();
            }
            self.advance();
        }
        Err(SyntaxError::new("unterminated string literal", start))
    }

    fn quoted_ident(&mut self, quote: char) -> Result<Token, SyntaxError> {
        let start = self.position;
        self.advance();
        let mut value = String::new();
        while !self.is_eof() {
            if self.current() == quote {
                self.advance();
                return Ok(Token::Ident {
                    value,
                    quoted: true,
                });
            }
            value.push(self.current());
            self.advance();
        }
        Err(SyntaxError::new("unterminated quoted identifier", start))
    }

    fn user_variable(&mut self) -> Result<Token, SyntaxError> {
        let start = self.position;
        self.advance();
        let mut name = String::from("@");
        while !self.is_eof() && is_ident_part(self.current()) {
            name.push(self.current());
            self.advance();
        }
        if name.len() == 1 {
            return Err(SyntaxError::new("dangling '@'", start));
        }
        Ok(Token::UserVariable(name))
    }

    fn number(&mut self) -> Token {
        let start = self.position;
        while !self.is_eof() && self.current().is_ascii_digit() {
            self.advance();
        }
        if !self.is_eof() && self.current() == '.' {
            self.advance();
            while !self.is_eof() && self.current().is_ascii_digit() {
                self.advance();
            }
        }
        if !self.is_eof() && matches!(self.current(), 'e' | 'E') {
            // exponent only when digits follow (possibly signed)
            let mut probe = self.position + 1;
            if probe < self.input.len() && matches!(self.input[probe], '+' | '-') {
                probe += 1;
            }
            if probe < self.input.len() && self.input[probe].is_ascii_digit() {
                self.position = probe;
                while !self.is_eof() && self.current().is_ascii_digit() {
                    self.advance();
                }
            }
        }
        Token::Number(self.input[start..self.position].iter().collect())
    }

    fn bare_ident(&mut self) -> Token {
        let start = self.position;
        while !self.is_eof() && is_ident_part(self.current()) {
            self.advance();
        }
        Token::Ident {
            value: self.input[start..self.position].iter().collect(),
            quoted: false,
        }
    }

    fn skip_whitespace_and_comments(&mut self) -> Result<(), SyntaxError> {
        loop {
            while !self.is_eof() && self.current().is_whitespace() {
                self.advance();
            }
            if self.matches_str("--") {
                while !self.is_eof() && self.current() != '\n' {
                    self.advance();
                }
                continue;
            }
            if self.dialect == Dialect::MySql && !self.is_eof() && self.current() == '#' {
                while !self.is_eof() && self.current() != '\n' {
                    self.advance();
                }
                continue;
            }
            if self.matches_str("/*") {
                let start = self.position;
                self.position += 2;
                loop {
                    if self.is_eof() {
                        return Err(SyntaxError::new("unterminated block comment", start));
                    }
                    if self.matches_str("*/") {
                        self.position += 2;
                        break;
                    }
                    self.advance();
                }
                continue;
            }
            return Ok(());
        }
    }

    fn current(&self) -> char {
        self.input[self.position]
    }

    fn peek_next(&self) -> Option<char> {
        self.input.get(self.position + 1).copied()
    }

    fn matches_str(&self, s: &str) -> bool {
        let chars: Vec<char> = s.chars().collect();
        self.input[self.position..]
            .iter()
            .take(chars.len())
            .copied()
            .eq(chars)
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn is_eof(&self) -> bool {
        self.position >= self.input.len()
    }
}

fn is_ident_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_' || ch == '$'
}

fn is_ident_part(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_' || ch == '$'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(sql: &str, dialect: Dialect) -> Vec<Token> {
        Lexer::new(sql, dialect)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|s| s.token)
            .collect()
    }

    #[test]
    fn lexes_user_variable_suffix() {
        let toks = lex("abc@uv1", Dialect::MySql);
        assert_eq!(
            toks,
            vec![
                Token::Ident {
                    value: "abc".into(),
                    quoted: false
                },
                Token::UserVariable("@uv1".into()),
                Token::Eof,
            ]
        );
    }

    #[test]
    fn string_literal_keeps_quotes() {
        let toks = lex("'aaa'", Dialect::MySql);
        assert_eq!(toks[0], Token::StringLit("'aaa'".into()));
    }

    #[test]
    fn mysql_backtick_is_identifier_oracle_double_quote_is_identifier() {
        let toks = lex("`users`", Dialect::MySql);
        assert_eq!(
            toks[0],
            Token::Ident {
                value: "users".into(),
                quoted: true
            }
        );
        let toks = lex("\"USERS\"", Dialect::Oracle);
        assert_eq!(
            toks[0],
            Token::Ident {
                value: "USERS".into(),
                quoted: true
            }
        );
        // double quote is a string in MySQL mode
        let toks = lex("\"text\"", Dialect::MySql);
        assert_eq!(toks[0], Token::StringLit("\"text\"".into()));
    }

    #[test]
    fn exponent_numbers_stay_raw_text() {
        let toks = lex("2E2 1.5 134217728", Dialect::Oracle);
        assert_eq!(toks[0], Token::Number("2E2".into()));
        assert_eq!(toks[1], Token::Number("1.5".into()));
        assert_eq!(toks[2], Token::Number("134217728".into()));
    }

    #[test]
    fn multi_char_symbols_win_over_single() {
        let toks = lex("a<=>b := <> != || <<", Dialect::MySql);
        let syms: Vec<&Token> = toks
            .iter()
            .filter(|t| matches!(t, Token::Symbol(_)))
            .collect();
        assert_eq!(
            syms,
            vec![
                &Token::Symbol("<=>"),
                &Token::Symbol(":="),
                &Token::Symbol("<>"),
                &Token::Symbol("!="),
                &Token::Symbol("||"),
                &Token::Symbol("<<"),
            ]
        );
    }

    #[test]
    fn fail_fast_on_unterminated_literal() {
        let err = Lexer::new("'abc", Dialect::MySql).tokenize().unwrap_err();
        assert_eq!(err.position, 0);
    }
}
