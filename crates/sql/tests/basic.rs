//! End-to-end programs over the in-memory backend

mod common;

use common::{TestContext, s};
use tabular_sql::{Error, StatementResult};

#[test]
fn a_program_returns_the_last_statement_result() {
    let mut ctx = TestContext::new();
    let result = ctx.exec(
        "create table foo (a text); \
         insert into foo values ('hello'); \
         select a from foo",
    );
    let StatementResult::Query(result) = result else {
        panic!("expected rows, got {result:?}");
    };
    assert_eq!(result.columns, vec!["a"]);
    assert_eq!(result.rows, vec![vec![s("hello")]]);

    assert_eq!(ctx.query_value("select 'x'; select 'y'"), s("y"));
}

#[test]
fn an_empty_program_is_ok() {
    let mut ctx = TestContext::new();
    assert_eq!(ctx.exec(""), StatementResult::Ok);
    assert_eq!(ctx.exec("   \n\t"), StatementResult::Ok);
}

#[test]
fn a_failing_statement_stops_the_program() {
    let mut ctx = TestContext::new();
    let err = ctx
        .try_exec("insert into foo values ('x'); create table foo (a text)")
        .unwrap_err();
    assert_eq!(err, Error::TableNotFound("foo".to_string()));
    // The CREATE after the failure never ran.
    assert_eq!(ctx.error("select a from foo"), "relation \"foo\" does not exist");
}

#[test]
fn statements_accept_trailing_semicolons() {
    let mut ctx = TestContext::new();
    ctx.exec("create table foo (a text);");
    ctx.exec("insert into foo values ('x');");
    assert_eq!(ctx.query_value("select a from foo;"), s("x"));
}
