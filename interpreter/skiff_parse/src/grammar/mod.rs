//! Grammar productions.
//!
//! One method per tier: `statement → expr → term → factor → primary`.
//! `expr` owns comparisons and the other loose binary operators, `term`
//! owns `+`/`-`, `factor` owns `*`/`/`/`%` plus the postfix chain
//! (assignment, member access, call, index), `primary` owns literals,
//! grouping, element lists, unary minus, and `fn` expressions.

use skiff_diagnostic::{Diagnostic, ErrorCode};
use skiff_ir::{
    BinaryOp, NodeId, NodeKind, NodeRange, StringInterner, SyntaxTree, TokenKind, TokenList,
    UnaryOp,
};

use crate::cursor::Cursor;


pub(crate) struct Parser<'a> {
    cursor: Cursor<'a>,
    tree: SyntaxTree,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(tokens: &'a TokenList, interner: &'a StringInterner) -> Self {
        Self {
            cursor: Cursor::new(tokens, interner),
            tree: SyntaxTree::with_capacity(tokens.len()),
        }
    }

    pub(crate) fn run(mut self) -> Result<SyntaxTree, Diagnostic> {
        let mut body = Vec::new();
        while !self.cursor.at_end() {
            if self.cursor.eat_text(TokenKind::Delimiter, ";") {
                continue;
            }
            body.push(self.parse_statement()?);
        }
        let body = self.tree.push_list(&body);
        let root = self.tree.push(NodeKind::Program { body }, 1);
        self.tree.set_root(root);
        Ok(self.tree)
    }

    fn parse_statement(&mut self) -> Result<NodeId, Diagnostic> {
        if let Some(token) = self.cursor.peek() {
            if token.kind == TokenKind::Keyword {
                match self.cursor.text(token) {
                    "if" => return self.parse_if(),
                    "while" => return self.parse_while(),
                    "return" => return self.parse_return(),
                    "fn" => return self.parse_fn(),
                    "class" => return self.parse_class(),
                    // Reserved words without a production (`for`, `break`,
                    // `continue`, dangling `else`) fall through and fail
                    // as expressions.
                    _ => {}
                }
            }
        }
        self.parse_expr()
    }

    /// Comparison tier, plus every loose binary operator the grammar does
    /// not rank: a left-associative chain over terms.
    fn parse_expr(&mut self) -> Result<NodeId, Diagnostic> {
        let mut lhs = self.parse_term()?;
        while let Some(token) = self.cursor.peek() {
            if token.kind != TokenKind::Operator {
                break;
            }
            let Some(op) = BinaryOp::from_symbol(self.cursor.text(token)) else {
                return Err(self.cursor.unexpected());
            };
            let line = token.line;
            self.cursor.advance();
            let rhs = self.parse_term()?;
            lhs = self.tree.push(NodeKind::Binary { op, lhs, rhs }, line);
        }
        Ok(lhs)
    }

    /// Additive tier.
    fn parse_term(&mut self) -> Result<NodeId, Diagnostic> {
        let mut lhs = self.parse_factor()?;
        while let Some(token) = self.cursor.peek() {
            if token.kind != TokenKind::Operator {
                break;
            }
            let op = match self.cursor.text(token) {
                "+" => BinaryOp::Add,
                "-" => BinaryOp::Sub,
                _ => break,
            };
            let line = token.line;
            self.cursor.advance();
            let rhs = self.parse_factor()?;
            lhs = self.tree.push(NodeKind::Binary { op, lhs, rhs }, line);
        }
        Ok(lhs)
    }

    /// Multiplicative tier and the postfix chain. Assignment nests here so
    /// `a.b = 1` and `xs[0] = 2` parse with the member/index as target;
    /// its value re-enters `parse_expr`, making `=` right-associative.
    fn parse_factor(&mut self) -> Result<NodeId, Diagnostic> {
        let mut lhs = self.parse_primary()?;
        while let Some(token) = self.cursor.peek() {
            let text = self.cursor.text(token);
            let line = token.line;
            match (token.kind, text) {
                (TokenKind::Operator, "*" | "/" | "%") => {
                    let op = match text {
                        "*" => BinaryOp::Mul,
                        "/" => BinaryOp::Div,
                        _ => BinaryOp::Mod,
                    };
                    self.cursor.advance();
                    let rhs = self.parse_primary()?;
                    lhs = self.tree.push(NodeKind::Binary { op, lhs, rhs }, line);
                }
                (TokenKind::Operator, "=") => {
                    self.cursor.advance();
                    let value = self.parse_expr()?;
                    lhs = self.tree.push(NodeKind::Assign { target: lhs, value }, line);
                }
                (TokenKind::Delimiter, ".") => {
                    self.cursor.advance();
                    let field = self.cursor.expect_ident()?.text;
                    lhs = self.tree.push(NodeKind::Member { object: lhs, field }, line);
                }
                (TokenKind::Delimiter, "(") => {
                    self.cursor.advance();
                    let args = self.parse_list(")")?;
                    lhs = self.tree.push(NodeKind::Call { callee: lhs, args }, line);
                }
                (TokenKind::Delimiter, "[") => {
                    self.cursor.advance();
                    let index = self.parse_expr()?;
                    self.cursor.expect_text(TokenKind::Delimiter, "]")?;
                    lhs = self.tree.push(NodeKind::Index { object: lhs, index }, line);
                }
                _ => break,
            }
        }
        Ok(lhs)
    }

    fn parse_primary(&mut self) -> Result<NodeId, Diagnostic> {
        let Some(token) = self.cursor.peek() else {
            return Err(self.cursor.unexpected());
        };
        let text = self.cursor.text(token);
        let line = token.line;
        match token.kind {
            TokenKind::Delimiter if text == "(" => {
                self.cursor.advance();
                let inner = self.parse_expr()?;
                self.cursor.expect_text(TokenKind::Delimiter, ")")?;
                Ok(inner)
            }
            TokenKind::Delimiter if text == "[" => {
                self.cursor.advance();
                let items = self.parse_list("]")?;
                Ok(self.tree.push(NodeKind::Elements { items }, line))
            }
            TokenKind::Operator if text == "-" => {
                self.cursor.advance();
                let operand = self.parse_primary()?;
                Ok(self.tree.push(
                    NodeKind::Unary {
                        op: UnaryOp::Neg,
                        operand,
                    },
                    line,
                ))
            }
            TokenKind::Numeric => {
                self.cursor.advance();
                let value = text.parse::<f64>().map_err(|_| {
                    Diagnostic::error(
                        ErrorCode::E1001,
                        format!("unexpected symbol near '{text}'"),
                        line,
                    )
                })?;
                Ok(self.tree.push(NodeKind::Number(value), line))
            }
            TokenKind::Str => {
                self.cursor.advance();
                Ok(self.tree.push(NodeKind::Str(token.text), line))
            }
            TokenKind::Bool => {
                self.cursor.advance();
                Ok(self.tree.push(NodeKind::Bool(text == "true"), line))
            }
            TokenKind::Nil => {
                self.cursor.advance();
                Ok(self.tree.push(NodeKind::Nil, line))
            }
            TokenKind::Ident => {
                self.cursor.advance();
                Ok(self.tree.push(NodeKind::Ident(token.text), line))
            }
            TokenKind::Keyword if text == "fn" => self.parse_fn(),
            _ => Err(self.cursor.unexpected()),
        }
    }

    /// Comma-separated expressions up to `closer`. Handles call argument
    /// lists and element literals.
    fn parse_list(&mut self, closer: &str) -> Result<NodeRange, Diagnostic> {
        if self.cursor.eat_text(TokenKind::Delimiter, closer) {
            return Ok(NodeRange::EMPTY);
        }
        let mut items = Vec::new();
        loop {
            items.push(self.parse_expr()?);
            if self.cursor.eat_text(TokenKind::Delimiter, ",") {
                continue;
            }
            self.cursor.expect_text(TokenKind::Delimiter, closer)?;
            break;
        }
        Ok(self.tree.push_list(&items))
    }

    fn parse_block(&mut self) -> Result<NodeId, Diagnostic> {
        let line = self.cursor.line();
        self.cursor.expect_text(TokenKind::Delimiter, "{")?;
        let mut body = Vec::new();
        loop {
            if self.cursor.eat_text(TokenKind::Delimiter, "}") {
                break;
            }
            if self.cursor.eat_text(TokenKind::Delimiter, ";") {
                continue;
            }
            body.push(self.parse_statement()?);
        }
        let body = self.tree.push_list(&body);
        Ok(self.tree.push(NodeKind::Block { body }, line))
    }

    fn parse_if(&mut self) -> Result<NodeId, Diagnostic> {
        let line = self.cursor.line();
        self.cursor.advance();
        self.cursor.expect_text(TokenKind::Delimiter, "(")?;
        let cond = self.parse_expr()?;
        self.cursor.expect_text(TokenKind::Delimiter, ")")?;
        let then_block = self.parse_block()?;
        let else_branch = if self.cursor.eat_text(TokenKind::Keyword, "else") {
            if self.cursor.check_text(TokenKind::Keyword, "if") {
                Some(self.parse_if()?)
            } else {
                Some(self.parse_block()?)
            }
        } else {
            None
        };
        Ok(self.tree.push(
            NodeKind::If {
                cond,
                then_block,
                else_branch,
            },
            line,
        ))
    }

    fn parse_while(&mut self) -> Result<NodeId, Diagnostic> {
        let line = self.cursor.line();
        self.cursor.advance();
        self.cursor.expect_text(TokenKind::Delimiter, "(")?;
        let cond = self.parse_expr()?;
        self.cursor.expect_text(TokenKind::Delimiter, ")")?;
        let body = self.parse_block()?;
        Ok(self.tree.push(NodeKind::While { cond, body }, line))
    }

    fn parse_return(&mut self) -> Result<NodeId, Diagnostic> {
        let line = self.cursor.line();
        self.cursor.advance();
        let value = if self.bare_return() {
            None
        } else {
            Some(self.parse_expr()?)
        };
        Ok(self.tree.push(NodeKind::Return { value }, line))
    }

    /// `return` with no operand: followed by `;`, `}`, or end of input.
    fn bare_return(&self) -> bool {
        match self.cursor.peek() {
            None => true,
            Some(t) => t.kind == TokenKind::Delimiter && matches!(self.cursor.text(t), ";" | "}"),
        }
    }

    /// `fn [name] ( params ) block`, usable as statement or expression.
    fn parse_fn(&mut self) -> Result<NodeId, Diagnostic> {
        let line = self.cursor.line();
        self.cursor.advance();
        let name = if self.cursor.check(TokenKind::Ident) {
            self.cursor.take().map(|t| t.text)
        } else {
            None
        };
        self.cursor.expect_text(TokenKind::Delimiter, "(")?;
        let params = self.parse_params()?;
        let body = self.parse_block()?;
        Ok(self.tree.push(NodeKind::Function { name, params, body }, line))
    }

    fn parse_params(&mut self) -> Result<NodeRange, Diagnostic> {
        if self.cursor.eat_text(TokenKind::Delimiter, ")") {
            return Ok(NodeRange::EMPTY);
        }
        let mut params = Vec::new();
        loop {
            let ident = self.cursor.expect_ident()?;
            params.push(self.tree.push(NodeKind::Ident(ident.text), ident.line));
            if self.cursor.eat_text(TokenKind::Delimiter, ",") {
                continue;
            }
            self.cursor.expect_text(TokenKind::Delimiter, ")")?;
            break;
        }
        Ok(self.tree.push_list(&params))
    }

    /// `class Name [: Base] { members }`.
    fn parse_class(&mut self) -> Result<NodeId, Diagnostic> {
        let line = self.cursor.line();
        self.cursor.advance();
        let name = self.cursor.expect_ident()?.text;
        let base = if self.cursor.eat_text(TokenKind::Delimiter, ":") {
            Some(self.cursor.expect_ident()?.text)
        } else {
            None
        };
        let body = self.parse_class_body()?;
        Ok(self.tree.push(NodeKind::Class { name, base, body }, line))
    }

    /// Class members are field initializers (assignment expressions) and
    /// `fn` methods, with stray `;` tolerated between them.
    fn parse_class_body(&mut self) -> Result<NodeId, Diagnostic> {
        let line = self.cursor.line();
        self.cursor.expect_text(TokenKind::Delimiter, "{")?;
        let mut members = Vec::new();
        loop {
            if self.cursor.eat_text(TokenKind::Delimiter, "}") {
                break;
            }
            if self.cursor.eat_text(TokenKind::Delimiter, ";") {
                continue;
            }
            if self.cursor.check_text(TokenKind::Keyword, "fn") {
                members.push(self.parse_fn()?);
            } else {
                members.push(self.parse_expr()?);
            }
        }
        let members = self.tree.push_list(&members);
        Ok(self.tree.push(NodeKind::ClassBody { members }, line))
    }
}
