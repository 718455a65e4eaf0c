pub mod ast;
pub mod error;
pub mod lexer;

use std::borrow::Cow;

use tracing::debug;

use self::{
    ast::*,
    error::*,
    lexer::{Token, TokenKind},
};

/// How deeply parenthesized expressions and `while`/`if` blocks may nest.
pub const MAX_NESTING: usize = 256;

/// A recursive descent parser over a token slice.
///
/// Binary expressions must be fully parenthesized, so the grammar needs no precedence handling
/// and at most one token of lookahead.
#[derive(Debug)]
pub struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    /// Create a new parser for the given tokens.
    pub fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    /// Parse the tokens into a [`Program`].
    pub fn parse(mut self) -> Result<Program> {
        debug!("began parsing");

        let mut procs = vec![];
        while self.current().is_some() {
            procs.push(self.parse_proc()?);
        }

        debug!(procs = procs.len(), "finished parsing into AST");
        Ok(Program::new(procs))
    }

    fn parse_proc(&mut self) -> Result<ProcDef> {
        self.expect(TokenKind::Keyword, "proc")?;
        let name = self.expect_ident()?;
        debug!(%name, "began parsing procedure");

        self.expect(TokenKind::Paren, "(")?;
        let mut params = vec![];
        if !self.at(TokenKind::Paren, ")") {
            loop {
                params.push(self.expect_ident()?);
                if !self.eat(TokenKind::Comma, ",") {
                    break;
                }
            }
        }
        self.expect(TokenKind::Paren, ")")?;

        let body = self.parse_block(&["endproc"])?;
        self.expect(TokenKind::Keyword, "endproc")?;

        debug!(%name, "successfully parsed procedure");
        Ok(ProcDef { name, params, body })
    }

    /// Parse statements up to, but not including, one of the `terminators` keywords.
    fn parse_block(&mut self, terminators: &[&'static str]) -> Result<Vec<Stmt>> {
        let mut stmts = vec![];
        loop {
            match self.current() {
                Some(tok)
                    if tok.kind() == TokenKind::Keyword
                        && terminators.iter().any(|t| *t == tok.text()) =>
                {
                    return Ok(stmts);
                }
                Some(_) => stmts.push(self.parse_stmt()?),
                None => {
                    let expected = terminators
                        .iter()
                        .map(|t| format!("`{t}`"))
                        .collect::<Vec<_>>()
                        .join(" or ");
                    return Err(self.eof_error(expected));
                }
            }
        }
    }

    fn parse_stmt(&mut self) -> Result<Stmt> {
        debug!("began parsing statement");
        let tok = self.current_or_eof("a statement")?;
        let stmt = match (tok.kind(), tok.text()) {
            (TokenKind::Keyword, "print") => {
                self.next_token();
                let expr = self.parse_expr()?;
                Stmt::Print(Print { expr })
            }
            (TokenKind::Keyword, "var") => {
                self.next_token();
                let name = self.expect_ident()?;
                self.expect(TokenKind::Assignment, "=")?;
                let init = self.parse_expr()?;
                Stmt::VarDecl(VarDecl { name, init })
            }
            (TokenKind::Keyword, "while") => self.parse_while()?,
            (TokenKind::Keyword, "if") => self.parse_if()?,
            (TokenKind::Keyword, Call::SETPIXEL) => self.parse_call()?,
            (TokenKind::Keyword, kw) => {
                return Err(ParseError::new(
                    ParseErrorKind::UnknownKeyword(kw.into()),
                    tok,
                ))
            }
            (TokenKind::Identifier, _) => match self.peek() {
                Some(next) if next.is(TokenKind::Assignment, "=") => {
                    let name = self.expect_ident()?;
                    self.next_token();
                    let value = self.parse_expr()?;
                    Stmt::VarAssign(VarAssign { name, value })
                }
                Some(next) if next.is(TokenKind::Paren, "(") => self.parse_call()?,
                Some(next) => {
                    return Err(ParseError::new(
                        ParseErrorKind::UnexpectedToken {
                            expected: "`=` or `(`".into(),
                            found: next.text().into(),
                        },
                        next,
                    ))
                }
                None => return Err(self.eof_error("`=` or `(`")),
            },
            (kind, _) => {
                return Err(ParseError::new(
                    ParseErrorKind::ExpectedStatement(kind),
                    tok,
                ))
            }
        };
        debug!("successfully parsed statement");
        Ok(stmt)
    }

    fn parse_while(&mut self) -> Result<Stmt> {
        let tok = self.expect(TokenKind::Keyword, "while")?;
        self.enter(tok)?;
        let condition = self.parse_expr()?;
        let body = self.parse_block(&["endwhile"])?;
        self.expect(TokenKind::Keyword, "endwhile")?;
        self.depth -= 1;
        Ok(Stmt::While(While { condition, body }))
    }

    fn parse_if(&mut self) -> Result<Stmt> {
        let tok = self.expect(TokenKind::Keyword, "if")?;
        self.enter(tok)?;
        let condition = self.parse_expr()?;
        let consequent = self.parse_block(&["else", "endif"])?;
        let alternate = if self.eat(TokenKind::Keyword, "else") {
            self.parse_block(&["endif"])?
        } else {
            vec![]
        };
        self.expect(TokenKind::Keyword, "endif")?;
        self.depth -= 1;
        Ok(Stmt::If(If {
            condition,
            consequent,
            alternate,
        }))
    }

    /// Parse a call. The callee is either an identifier or the `setpixel` keyword.
    fn parse_call(&mut self) -> Result<Stmt> {
        let name = self.next_token().map(|tok| Ident::from(tok.text()));
        let name = name.ok_or_else(|| self.eof_error("a procedure name"))?;
        self.expect(TokenKind::Paren, "(")?;
        let mut args = vec![];
        if !self.at(TokenKind::Paren, ")") {
            loop {
                args.push(self.parse_expr()?);
                if !self.eat(TokenKind::Comma, ",") {
                    break;
                }
            }
        }
        self.expect(TokenKind::Paren, ")")?;
        Ok(Stmt::Call(Call { name, args }))
    }

    fn parse_expr(&mut self) -> Result<Expr> {
        let tok = self.current_or_eof("an expression")?;
        match tok.kind() {
            TokenKind::Number => {
                self.next_token();
                let n = tok.text().parse::<f32>().map_err(|_| {
                    ParseError::new(ParseErrorKind::InvalidNumber(tok.text().into()), tok)
                })?;
                Ok(Expr::Number(n))
            }
            TokenKind::Identifier => {
                self.next_token();
                Ok(Expr::Ident(tok.text().into()))
            }
            TokenKind::Paren if tok.text() == "(" => {
                self.next_token();
                self.enter(tok)?;
                let left = self.parse_expr()?;
                let op = self.expect_operator()?;
                let right = self.parse_expr()?;
                self.expect(TokenKind::Paren, ")")?;
                self.depth -= 1;
                Ok(Expr::Binary(Binary {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                }))
            }
            kind => Err(ParseError::new(
                ParseErrorKind::ExpectedExpression(kind),
                tok,
            )),
        }
    }

    /// Descend one nesting level, failing at `tok` once [`MAX_NESTING`] is exceeded.
    fn enter(&mut self, tok: &Token) -> Result<()> {
        if self.depth >= MAX_NESTING {
            return Err(ParseError::new(
                ParseErrorKind::NestingTooDeep(MAX_NESTING),
                tok,
            ));
        }
        self.depth += 1;
        Ok(())
    }

    fn expect_operator(&mut self) -> Result<BinaryOp> {
        let tok = self.current_or_eof("an operator")?;
        let op = match tok.kind() {
            TokenKind::Operator => BinaryOp::from_symbol(tok.text()),
            _ => None,
        };
        let Some(op) = op else {
            return Err(ParseError::new(
                ParseErrorKind::UnexpectedToken {
                    expected: "an operator".into(),
                    found: tok.text().into(),
                },
                tok,
            ));
        };
        self.next_token();
        Ok(op)
    }

    fn expect_ident(&mut self) -> Result<Ident> {
        let tok = self.current_or_eof("an identifier")?;
        if tok.kind() != TokenKind::Identifier {
            return Err(ParseError::new(
                ParseErrorKind::UnexpectedToken {
                    expected: "an identifier".into(),
                    found: tok.text().into(),
                },
                tok,
            ));
        }
        self.next_token();
        Ok(tok.text().into())
    }

    /// Consume the current token if it has the given kind and text. Otherwise, fail without
    /// consuming anything.
    fn expect(&mut self, kind: TokenKind, text: &'static str) -> Result<&'a Token> {
        let expected = || Cow::Owned(format!("`{text}`"));
        let tok = self.current().ok_or_else(|| self.eof_error(expected()))?;
        if !tok.is(kind, text) {
            return Err(ParseError::new(
                ParseErrorKind::UnexpectedToken {
                    expected: expected(),
                    found: tok.text().into(),
                },
                tok,
            ));
        }
        self.next_token();
        Ok(tok)
    }

    /// Consume the current token if it has the given kind and text, returning whether it did.
    fn eat(&mut self, kind: TokenKind, text: &str) -> bool {
        let matches = self.at(kind, text);
        if matches {
            self.next_token();
        }
        matches
    }

    fn at(&self, kind: TokenKind, text: &str) -> bool {
        self.current().is_some_and(|tok| tok.is(kind, text))
    }

    fn current(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn current_or_eof(&self, expected: &'static str) -> Result<&'a Token> {
        self.current().ok_or_else(|| self.eof_error(expected))
    }

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos + 1)
    }

    fn next_token(&mut self) -> Option<&'a Token> {
        let tok = self.current();
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn eof_error(&self, expected: impl Into<Cow<'static, str>>) -> ParseError {
        let end = self.tokens.last().map_or(0, |tok| tok.range().end);
        ParseError::eof(expected, end)
    }
}

/// Parse a token sequence into a [`Program`].
pub fn parse(tokens: &[Token]) -> Result<Program> {
    Parser::new(tokens).parse()
}
