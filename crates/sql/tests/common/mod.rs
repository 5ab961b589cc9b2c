//! Common test utilities for the integration tests
#![allow(dead_code)]

use tabular_sql::{Error, Evaluator, MemoryBackend, ResultSet, StatementResult, Value, parsing};

/// Drives the engine through SQL strings against an in-memory backend.
pub struct TestContext {
    evaluator: Evaluator<MemoryBackend>,
}

impl TestContext {
    pub fn new() -> Self {
        TestContext { evaluator: Evaluator::new(MemoryBackend::new()) }
    }

    /// Executes an input, panicking on any parse or evaluation failure.
    pub fn exec(&mut self, sql: &str) -> StatementResult {
        match self.try_exec(sql) {
            Ok(result) => result,
            Err(err) => panic!("execution failed: {sql} - {err}"),
        }
    }

    /// Executes an input; parse failures still panic, evaluation failures
    /// are returned.
    pub fn try_exec(&mut self, sql: &str) -> Result<StatementResult, Error> {
        let (program, errors) = parsing::parse(sql);
        assert!(errors.is_empty(), "parse failed: {sql} - {errors:?}");
        self.evaluator.execute_program(program)
    }

    /// Runs a query and returns its result set.
    pub fn query(&mut self, sql: &str) -> ResultSet {
        match self.exec(sql) {
            StatementResult::Query(result) => result,
            other => panic!("expected rows from {sql}, got {other:?}"),
        }
    }

    /// Runs a query expected to return a single value.
    pub fn query_value(&mut self, sql: &str) -> Value {
        let result = self.query(sql);
        assert_eq!(result.rows.len(), 1, "expected one row from {sql}");
        assert_eq!(result.rows[0].len(), 1, "expected one column from {sql}");
        result.rows[0][0].clone()
    }

    /// Runs an input expected to fail evaluation, returning the message.
    pub fn error(&mut self, sql: &str) -> String {
        match self.try_exec(sql) {
            Err(err) => err.to_string(),
            Ok(result) => panic!("expected {sql} to fail, got {result:?}"),
        }
    }

    /// Parse errors for an input.
    pub fn parse_errors(sql: &str) -> Vec<String> {
        parsing::parse(sql).1
    }

    /// The string-table fixture most SELECT tests run against:
    /// `foo(a, b, c)` with two rows, `bar(a)` with rows `m` and `n`, and
    /// `baz(x)` with one row.
    pub fn seed_strings(&mut self) {
        self.exec("create table foo (a text, b text, c text)");
        self.exec("insert into foo values ('abc', 'efg', '1')");
        self.exec("insert into foo values ('bcd', 'def', '2')");
        self.exec("create table bar (a text)");
        self.exec("insert into bar values ('m')");
        self.exec("insert into bar values ('n')");
        self.exec("create table baz (x text)");
        self.exec("insert into baz values ('x')");
    }

    /// The fixture the error-message tests run against:
    /// `foo(a STRING, c INTEGER)` with two rows and an empty `bar(a)`.
    pub fn seed_typed(&mut self) {
        self.exec("create table foo (a text, c integer)");
        self.exec("insert into foo values ('abc', 1)");
        self.exec("insert into foo values ('bcd', 2)");
        self.exec("create table bar (a text)");
    }
}

pub fn s(v: &str) -> Value {
    Value::String(v.to_string())
}

pub fn i(v: i64) -> Value {
    Value::Integer(v)
}

pub fn f(v: f64) -> Value {
    Value::Float(v)
}

pub fn b(v: bool) -> Value {
    Value::Boolean(v)
}
