//! FROM clauses, cross joins, inner joins, and identifier resolution

mod common;

use common::{TestContext, i, s};

#[test]
fn cross_join_order_is_nested_iteration() {
    let mut ctx = TestContext::new();
    ctx.seed_strings();
    let result = ctx.query("select foo.a, bar.a from foo, bar");
    assert_eq!(result.columns, vec!["a", "a"]);
    assert_eq!(
        result.rows,
        vec![
            vec![s("abc"), s("m")],
            vec![s("abc"), s("n")],
            vec![s("bcd"), s("m")],
            vec![s("bcd"), s("n")],
        ]
    );
}

#[test]
fn join_on_true_is_the_cross_product() {
    let mut ctx = TestContext::new();
    ctx.seed_strings();
    let result = ctx.query("select foo.a, bar.a from foo join bar on true");
    assert_eq!(
        result.rows,
        vec![
            vec![s("abc"), s("m")],
            vec![s("abc"), s("n")],
            vec![s("bcd"), s("m")],
            vec![s("bcd"), s("n")],
        ]
    );
}

#[test]
fn aliased_tables_resolve_to_their_originals() {
    let mut ctx = TestContext::new();
    ctx.seed_strings();
    let result = ctx.query("select f.a, b.a from foo f join bar b on true");
    assert_eq!(result.columns, vec!["a", "a"]);
    assert_eq!(
        result.rows,
        vec![
            vec![s("abc"), s("m")],
            vec![s("abc"), s("n")],
            vec![s("bcd"), s("m")],
            vec![s("bcd"), s("n")],
        ]
    );
}

#[test]
fn leftmost_table_is_the_outer_loop() {
    let mut ctx = TestContext::new();
    ctx.seed_strings();
    let result = ctx.query("select f.a, b.a, c from bar b join foo f on true");
    assert_eq!(result.columns, vec!["a", "a", "c"]);
    assert_eq!(
        result.rows,
        vec![
            vec![s("abc"), s("m"), s("1")],
            vec![s("bcd"), s("m"), s("2")],
            vec![s("abc"), s("n"), s("1")],
            vec![s("bcd"), s("n"), s("2")],
        ]
    );
}

#[test]
fn join_chains() {
    let mut ctx = TestContext::new();
    ctx.seed_strings();
    let result = ctx.query("select f.a, b.a, c, x from bar b join foo f on true join baz on true");
    assert_eq!(
        result.rows,
        vec![
            vec![s("abc"), s("m"), s("1"), s("x")],
            vec![s("bcd"), s("m"), s("2"), s("x")],
            vec![s("abc"), s("n"), s("1"), s("x")],
            vec![s("bcd"), s("n"), s("2"), s("x")],
        ]
    );
}

#[test]
fn comma_separated_from_with_aliases() {
    let mut ctx = TestContext::new();
    ctx.seed_strings();
    let result = ctx.query("select f.a, b.a, c from bar b, foo f");
    assert_eq!(
        result.rows,
        vec![
            vec![s("abc"), s("m"), s("1")],
            vec![s("bcd"), s("m"), s("2")],
            vec![s("abc"), s("n"), s("1")],
            vec![s("bcd"), s("n"), s("2")],
        ]
    );
}

#[test]
fn inner_join_filters_on_the_predicate() {
    let mut ctx = TestContext::new();
    ctx.exec("create table orders (id integer, who text)");
    ctx.exec("insert into orders values (1, 'ada'), (2, 'bob'), (3, 'ada')");
    ctx.exec("create table users (name text)");
    ctx.exec("insert into users values ('ada'), ('eve')");
    let result = ctx.query("select id from orders join users on who = name");
    assert_eq!(result.rows, vec![vec![i(1)], vec![i(3)]]);
}

#[test]
fn non_boolean_join_condition_fails() {
    let mut ctx = TestContext::new();
    ctx.seed_strings();
    assert_eq!(
        ctx.error("select c from foo join bar on 1"),
        "join condition must be of type boolean, not INTEGER: 1"
    );
}

#[test]
fn resolution_errors() {
    let mut ctx = TestContext::new();
    ctx.seed_typed();
    let cases = [
        ("select foo", "column \"foo\" does not exist"),
        ("select bar.foo", "missing FROM-clause entry for table \"bar\""),
        ("select a from foo, bar", "column reference \"a\" is ambiguous"),
        ("select a from foo order by d", "column \"d\" does not exist"),
        (
            "select foo.a from foo f where 1",
            "invalid reference to FROM-clause entry for table \"foo\". \
             Perhaps you meant to reference the table alias \"f\"",
        ),
        ("select 1 from foo, foo", "table name \"foo\" specified more than once"),
        ("select a from nope", "relation \"nope\" does not exist"),
    ];
    for (input, expected) in cases {
        assert_eq!(ctx.error(input), expected, "input: {input}");
    }
}

#[test]
fn qualified_predicates_across_aliases() {
    let mut ctx = TestContext::new();
    ctx.exec("create table users (uid integer, name text)");
    ctx.exec("insert into users values (1, 'ada'), (2, 'bob')");
    ctx.exec("create table orders (oid integer, uid integer)");
    ctx.exec("insert into orders values (10, 1), (11, 2), (12, 1)");
    let result = ctx.query("select name, oid from users u join orders o on u.uid = o.uid");
    assert_eq!(
        result.rows,
        vec![
            vec![s("ada"), i(10)],
            vec![s("ada"), i(12)],
            vec![s("bob"), i(11)],
        ]
    );
}

#[test]
fn qualified_column_on_the_wrong_table_fails_at_evaluation() {
    let mut ctx = TestContext::new();
    ctx.exec("create table foo (c integer)");
    ctx.exec("insert into foo values (1)");
    ctx.exec("create table bar (a text)");
    ctx.exec("insert into bar values ('x')");
    // `a` exists in scope (via bar), so resolution passes; the row lookup
    // under `foo` then misses.
    assert_eq!(ctx.error("select foo.a from foo, bar"), "column foo.a does not exist");
}

#[test]
fn duplicate_alias_references_fail() {
    let mut ctx = TestContext::new();
    ctx.seed_typed();
    assert_eq!(
        ctx.error("select 1 from foo x, bar x"),
        "table name \"x\" specified more than once"
    );
}
