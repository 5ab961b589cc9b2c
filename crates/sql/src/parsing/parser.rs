//! The parser takes tokens from the lexer and builds the AST.
//!
//! Expressions are parsed with precedence climbing: every token kind maps
//! to at most one prefix parse, one infix parse, and one postfix parse
//! (`IS [NOT] NULL`). The parser only checks that the syntax is
//! well-formed; whether tables and columns exist is the evaluator's job.

use super::ast::{
    CreateTableStatement, Expression, FromClause, InfixOperator, InsertStatement, Join, JoinKind,
    OrderBy, PostfixOperator, PrefixOperator, Program, SelectStatement, Statement,
};
use super::lexer::{Lexer, Token, TokenKind};
use crate::error::{Error, Result};
use crate::types::{Column, DataType};
use std::mem;

/// Operator precedence, low to high. Comparison-by-variant-order gives the
/// climbing loop its `<` test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Precedence {
    Lowest,
    Sum,
    Product,
    Exponent,
    Prefix,
}

/// The precedence a token binds with in infix (or postfix) position.
fn precedence_of(kind: TokenKind) -> Precedence {
    match kind {
        TokenKind::Plus
        | TokenKind::Minus
        | TokenKind::And
        | TokenKind::Or
        | TokenKind::LessThan
        | TokenKind::LessThanOrEquals
        | TokenKind::GreaterThan
        | TokenKind::GreaterThanOrEquals
        | TokenKind::Concat => Precedence::Sum,
        TokenKind::Asterisk
        | TokenKind::Slash
        | TokenKind::Percent
        | TokenKind::Equals
        | TokenKind::NotEquals
        | TokenKind::Is => Precedence::Product,
        TokenKind::Caret => Precedence::Exponent,
        _ => Precedence::Lowest,
    }
}

/// The infix operator a token parses as, if any.
fn infix_operator(kind: TokenKind) -> Option<InfixOperator> {
    let operator = match kind {
        TokenKind::Plus => InfixOperator::Add,
        TokenKind::Minus => InfixOperator::Subtract,
        TokenKind::Asterisk => InfixOperator::Multiply,
        TokenKind::Slash => InfixOperator::Divide,
        TokenKind::Percent => InfixOperator::Remainder,
        TokenKind::Caret => InfixOperator::Exponentiate,
        TokenKind::Equals => InfixOperator::Equal,
        TokenKind::NotEquals => InfixOperator::NotEqual,
        TokenKind::LessThan => InfixOperator::LessThan,
        TokenKind::LessThanOrEquals => InfixOperator::LessThanOrEqual,
        TokenKind::GreaterThan => InfixOperator::GreaterThan,
        TokenKind::GreaterThanOrEquals => InfixOperator::GreaterThanOrEqual,
        TokenKind::And => InfixOperator::And,
        TokenKind::Or => InfixOperator::Or,
        TokenKind::Concat => InfixOperator::Concat,
        _ => return None,
    };
    Some(operator)
}

pub struct Parser<'a> {
    lexer: Lexer<'a>,
    /// The token under examination.
    cur: Token,
    /// One token of lookahead.
    peek: Token,
    errors: Vec<String>,
}

impl<'a> Parser<'a> {
    /// Creates a parser for the given input, priming the current and
    /// lookahead tokens.
    pub fn new(input: &'a str) -> Parser<'a> {
        let mut lexer = Lexer::new(input);
        let cur = lexer.next_token();
        let peek = lexer.next_token();
        Parser { lexer, cur, peek, errors: Vec::new() }
    }

    /// Parses the input as a sequence of statements. On an error the
    /// current statement is abandoned and parsing stops; the statements
    /// parsed so far are returned alongside the error messages.
    pub fn parse_program(mut self) -> (Program, Vec<String>) {
        let mut program = Program::default();
        while self.cur.kind != TokenKind::Eof {
            match self.parse_statement() {
                Ok(statement) => program.statements.push(statement),
                Err(err) => {
                    self.errors.push(err.to_string());
                    break;
                }
            }
            self.next_token();
        }
        (program, self.errors)
    }

    fn next_token(&mut self) {
        self.cur = mem::replace(&mut self.peek, self.lexer.next_token());
    }

    fn peek_is(&self, kind: TokenKind) -> bool {
        self.peek.kind == kind
    }

    /// Advances if the lookahead token has the expected kind, or errors.
    fn expect_peek(&mut self, kind: TokenKind) -> Result<()> {
        if self.peek.kind != kind {
            return Err(Error::ParseError(format!(
                "expected next token to be {}, got {} '{}' instead",
                kind, self.peek.kind, self.peek.literal
            )));
        }
        self.next_token();
        Ok(())
    }

    /// A statement ends at a semicolon or at the end of the input.
    fn expect_end_of_statement(&mut self) -> Result<()> {
        if !self.peek_is(TokenKind::Semicolon) && !self.peek_is(TokenKind::Eof) {
            return Err(Error::ParseError(format!(
                "expected next token to be ; or EOF, got {} '{}' instead",
                self.peek.kind, self.peek.literal
            )));
        }
        self.next_token();
        Ok(())
    }

    fn parse_statement(&mut self) -> Result<Statement> {
        match self.cur.kind {
            TokenKind::Select => self.parse_select().map(Statement::Select),
            TokenKind::Create => self.parse_create_table().map(Statement::CreateTable),
            TokenKind::Insert => self.parse_insert().map(Statement::Insert),
            _ => Err(Error::ParseError(format!(
                "expected start of statement, got {} token with literal {}",
                self.cur.kind, self.cur.literal
            ))),
        }
    }

    fn parse_select(&mut self) -> Result<SelectStatement> {
        let mut statement = SelectStatement::default();

        statement.projections.push(self.parse_projection()?);
        while self.peek_is(TokenKind::Comma) {
            self.next_token();
            statement.projections.push(self.parse_projection()?);
        }

        if self.peek_is(TokenKind::From) {
            self.next_token();
            statement.from.push(self.parse_from_clause()?);
            while self.peek_is(TokenKind::Comma) {
                self.next_token();
                statement.from.push(self.parse_from_clause()?);
            }
        }

        if self.peek_is(TokenKind::Where) {
            self.next_token();
            self.next_token();
            statement.r#where = Some(self.parse_expression(Precedence::Lowest)?);
        }

        if self.peek_is(TokenKind::Order) {
            self.next_token();
            self.expect_peek(TokenKind::By)?;
            statement.order_by.push(self.parse_order_by()?);
            while self.peek_is(TokenKind::Comma) {
                self.next_token();
                statement.order_by.push(self.parse_order_by()?);
            }
        }

        if self.peek_is(TokenKind::Limit) {
            self.next_token();
            statement.limit = Some(self.parse_row_count("limit")?);
        }

        if self.peek_is(TokenKind::Offset) {
            self.next_token();
            statement.offset = Some(self.parse_row_count("offset")?);
        }

        self.expect_end_of_statement()?;
        Ok(statement)
    }

    /// One element of the SELECT list: an expression with an optional
    /// `AS alias`.
    fn parse_projection(&mut self) -> Result<(Expression, Option<String>)> {
        self.next_token();
        let expression = self.parse_expression(Precedence::Lowest)?;
        if self.peek_is(TokenKind::As) {
            self.next_token();
            self.expect_peek(TokenKind::Identifier)?;
            return Ok((expression, Some(self.cur.literal.clone())));
        }
        Ok((expression, None))
    }

    /// A FROM item: table, optional alias, and any `JOIN t [alias] ON p`
    /// chain.
    fn parse_from_clause(&mut self) -> Result<FromClause> {
        self.expect_peek(TokenKind::Identifier)?;
        let table = self.cur.literal.clone();
        let mut alias = None;
        if self.peek_is(TokenKind::Identifier) {
            self.next_token();
            alias = Some(self.cur.literal.clone());
        }
        let mut joins = Vec::new();
        while self.peek_is(TokenKind::Join) {
            self.next_token();
            joins.push(self.parse_join()?);
        }
        Ok(FromClause { table, alias, joins })
    }

    fn parse_join(&mut self) -> Result<Join> {
        self.expect_peek(TokenKind::Identifier)?;
        let table = self.cur.literal.clone();
        let mut alias = None;
        if self.peek_is(TokenKind::Identifier) {
            self.next_token();
            alias = Some(self.cur.literal.clone());
        }
        self.expect_peek(TokenKind::On)?;
        self.next_token();
        let predicate = self.parse_expression(Precedence::Lowest)?;
        Ok(Join { kind: JoinKind::Inner, table, alias, predicate: Some(predicate) })
    }

    fn parse_order_by(&mut self) -> Result<OrderBy> {
        self.next_token();
        let expression = self.parse_expression(Precedence::Lowest)?;
        let mut descending = false;
        if self.peek_is(TokenKind::Desc) {
            descending = true;
            self.next_token();
        } else if self.peek_is(TokenKind::Asc) {
            self.next_token();
        }
        Ok(OrderBy { expression, descending })
    }

    /// A LIMIT or OFFSET count: a non-negative integer literal.
    fn parse_row_count(&mut self, clause: &str) -> Result<usize> {
        self.expect_peek(TokenKind::Int)?;
        let n: i64 = self.cur.literal.parse().map_err(|_| {
            Error::ParseError(format!("could not parse {:?} as integer", self.cur.literal))
        })?;
        if n < 0 {
            return Err(Error::ParseError(format!("{clause} must be non-negative, got {n}")));
        }
        Ok(n as usize)
    }

    fn parse_create_table(&mut self) -> Result<CreateTableStatement> {
        self.expect_peek(TokenKind::Table)?;
        self.expect_peek(TokenKind::Identifier)?;
        let name = self.cur.literal.clone();
        self.expect_peek(TokenKind::Lparen)?;

        let mut columns = vec![self.parse_column()?];
        while self.peek_is(TokenKind::Comma) {
            self.next_token();
            columns.push(self.parse_column()?);
        }

        self.expect_peek(TokenKind::Rparen)?;
        self.expect_end_of_statement()?;
        Ok(CreateTableStatement { name, columns })
    }

    /// One column definition: a name followed by a type keyword.
    fn parse_column(&mut self) -> Result<Column> {
        self.expect_peek(TokenKind::Identifier)?;
        let name = self.cur.literal.clone();
        let datatype = match self.peek.kind {
            TokenKind::StringType => DataType::String,
            TokenKind::FloatType => DataType::Float,
            TokenKind::IntegerType => DataType::Integer,
            TokenKind::BooleanType => DataType::Boolean,
            _ => {
                return Err(Error::ParseError(format!(
                    "expected type, got {} token with literal {}",
                    self.peek.kind, self.peek.literal
                )));
            }
        };
        self.next_token();
        Ok(Column { name, datatype })
    }

    fn parse_insert(&mut self) -> Result<InsertStatement> {
        self.expect_peek(TokenKind::Into)?;
        self.expect_peek(TokenKind::Identifier)?;
        let table = self.cur.literal.clone();
        self.expect_peek(TokenKind::Values)?;

        let mut rows = vec![self.parse_value_tuple()?];
        while self.peek_is(TokenKind::Comma) {
            self.next_token();
            rows.push(self.parse_value_tuple()?);
        }

        self.expect_end_of_statement()?;
        Ok(InsertStatement { table, rows })
    }

    /// One parenthesised tuple of value expressions.
    fn parse_value_tuple(&mut self) -> Result<Vec<Expression>> {
        self.expect_peek(TokenKind::Lparen)?;
        self.next_token();
        let mut values = vec![self.parse_expression(Precedence::Lowest)?];
        while self.peek_is(TokenKind::Comma) {
            self.next_token();
            self.next_token();
            values.push(self.parse_expression(Precedence::Lowest)?);
        }
        self.expect_peek(TokenKind::Rparen)?;
        Ok(values)
    }

    /// Precedence climbing: parse a left-hand side with a prefix parse,
    /// then fold in postfix and infix operators binding tighter than the
    /// given minimum.
    fn parse_expression(&mut self, precedence: Precedence) -> Result<Expression> {
        let mut left = self.parse_prefix()?;

        while precedence < precedence_of(self.peek.kind) {
            if self.peek_is(TokenKind::Is) {
                return self.parse_is_null(left);
            }
            let Some(operator) = infix_operator(self.peek.kind) else {
                return Ok(left);
            };
            self.next_token();
            left = self.parse_infix(operator, left)?;
        }

        Ok(left)
    }

    /// Parses the expression atom (or prefix operator) at the current
    /// token.
    fn parse_prefix(&mut self) -> Result<Expression> {
        match self.cur.kind {
            TokenKind::Int => {
                let value: i64 = self.cur.literal.parse().map_err(|_| {
                    Error::ParseError(format!(
                        "could not parse {:?} as integer",
                        self.cur.literal
                    ))
                })?;
                Ok(Expression::Integer(value))
            }
            TokenKind::Float => {
                let value: f64 = self.cur.literal.parse().map_err(|_| {
                    Error::ParseError(format!("could not parse {:?} as float", self.cur.literal))
                })?;
                Ok(Expression::Float(value))
            }
            TokenKind::Bool => Ok(Expression::Boolean(self.cur.literal == "TRUE")),
            TokenKind::String => Ok(Expression::String(self.cur.literal.clone())),
            TokenKind::Null => Ok(Expression::Null),
            TokenKind::Identifier => Ok(Expression::Column(None, self.cur.literal.clone())),
            TokenKind::QualifiedIdentifier => {
                let (table, column) = self
                    .cur
                    .literal
                    .split_once('.')
                    .expect("qualified identifier contains a dot");
                Ok(Expression::Column(Some(table.to_string()), column.to_string()))
            }
            TokenKind::Minus => {
                self.next_token();
                let operand = self.parse_expression(Precedence::Prefix)?;
                Ok(Expression::Prefix(PrefixOperator::Negate, Box::new(operand)))
            }
            TokenKind::Not => {
                self.next_token();
                let operand = self.parse_expression(Precedence::Prefix)?;
                Ok(Expression::Prefix(PrefixOperator::Not, Box::new(operand)))
            }
            TokenKind::Lparen => {
                self.next_token();
                let expression = self.parse_expression(Precedence::Lowest)?;
                self.expect_peek(TokenKind::Rparen)?;
                Ok(expression)
            }
            _ => Err(Error::ParseError(format!(
                "no prefix parse function for {} token with literal '{}' found",
                self.cur.kind, self.cur.literal
            ))),
        }
    }

    fn parse_infix(&mut self, operator: InfixOperator, left: Expression) -> Result<Expression> {
        let precedence = precedence_of(self.cur.kind);
        self.next_token();
        if self.cur.kind == TokenKind::Eof {
            return Err(Error::ParseError("expected operand".to_string()));
        }
        let right = self.parse_expression(precedence)?;
        Ok(Expression::Infix(operator, Box::new(left), Box::new(right)))
    }

    /// `IS NULL` / `IS NOT NULL`. The postfix binds like `=` and ends the
    /// expression.
    fn parse_is_null(&mut self, left: Expression) -> Result<Expression> {
        self.next_token();
        let operator = if self.peek_is(TokenKind::Not) {
            self.next_token();
            PostfixOperator::IsNotNull
        } else {
            PostfixOperator::IsNull
        };
        self.expect_peek(TokenKind::Null)?;
        Ok(Expression::Postfix(Box::new(left), operator))
    }
}
