//! INSERT validation and execution

mod common;

use common::{TestContext, b, f, i, s};
use tabular_sql::StatementResult;

#[test]
fn inserts_are_read_back_in_order() {
    let mut ctx = TestContext::new();
    ctx.exec("create table t (a text, b integer, c float)");
    assert_eq!(ctx.exec("insert into t values ('abc', 1, 3.14)"), StatementResult::Ok);
    ctx.exec("insert into t values ('def', 2, 6.28)");
    let result = ctx.query("select a, b, c from t");
    assert_eq!(
        result.rows,
        vec![vec![s("abc"), i(1), f(3.14)], vec![s("def"), i(2), f(6.28)]]
    );
}

#[test]
fn multi_row_insert() {
    let mut ctx = TestContext::new();
    ctx.exec("create table t (a text, b integer)");
    ctx.exec("insert into t values ('abc', 1), ('def', 2)");
    let result = ctx.query("select a, b from t");
    assert_eq!(result.rows, vec![vec![s("abc"), i(1)], vec![s("def"), i(2)]]);
}

#[test]
fn value_expressions_are_evaluated() {
    let mut ctx = TestContext::new();
    ctx.exec("create table t (a text, b integer, c boolean)");
    ctx.exec("insert into t values ('a' || 'b', 1 + 2 * 3, not false)");
    let result = ctx.query("select a, b, c from t");
    assert_eq!(result.rows, vec![vec![s("ab"), i(7), b(true)]]);
}

#[test]
fn arity_mismatch_pluralises_independently() {
    let mut ctx = TestContext::new();
    ctx.seed_typed();
    assert_eq!(
        ctx.error("insert into foo values (1)"),
        "table \"foo\" has 2 columns but 1 value were supplied"
    );
    assert_eq!(
        ctx.error("insert into bar values (1, 2)"),
        "table \"bar\" has 1 column but 2 values were supplied"
    );
}

#[test]
fn type_mismatches() {
    let mut ctx = TestContext::new();
    ctx.seed_typed();
    assert_eq!(
        ctx.error("insert into foo values ('hello', 'world')"),
        "cannot insert STRING with value 'world' in INTEGER column in table \"foo\""
    );
    assert_eq!(
        ctx.error("insert into foo values (1, 2)"),
        "cannot insert INTEGER with value 1 in STRING column in table \"foo\""
    );
    assert_eq!(
        ctx.error("insert into bar values (null)"),
        "cannot insert NULL with value NULL in STRING column in table \"bar\""
    );
}

#[test]
fn integers_do_not_coerce_to_floats() {
    let mut ctx = TestContext::new();
    ctx.exec("create table t (x float)");
    assert_eq!(
        ctx.error("insert into t values (1)"),
        "cannot insert INTEGER with value 1 in FLOAT column in table \"t\""
    );
}

#[test]
fn missing_table() {
    let mut ctx = TestContext::new();
    assert_eq!(ctx.error("insert into nope values (1)"), "relation \"nope\" does not exist");
}

#[test]
fn identifiers_in_values_fail() {
    let mut ctx = TestContext::new();
    ctx.seed_typed();
    assert_eq!(ctx.error("insert into bar values (a)"), "no such column: a");
}

#[test]
fn all_rows_validate_before_any_write() {
    let mut ctx = TestContext::new();
    ctx.seed_typed();
    assert_eq!(
        ctx.error("insert into bar values ('x'), (1)"),
        "cannot insert INTEGER with value 1 in STRING column in table \"bar\""
    );
    assert!(ctx.query("select a from bar").rows.is_empty());
}
