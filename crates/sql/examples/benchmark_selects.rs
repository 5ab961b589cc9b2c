//! Join and filter throughput over the in-memory backend.
//!
//! Seeds two tables, then repeatedly runs an inner join with a filter,
//! ordering, and a row window, reporting queries per second.

use std::time::Instant;
use tabular_sql::{Evaluator, MemoryBackend, StatementResult, parsing};

const USERS: usize = 200;
const ORDERS: usize = 2_000;
const ITERATIONS: usize = 100;

fn exec(evaluator: &mut Evaluator<MemoryBackend>, sql: &str) -> StatementResult {
    let (program, errors) = parsing::parse(sql);
    assert!(errors.is_empty(), "parse failed: {errors:?}");
    evaluator.execute_program(program).expect("execution failed")
}

fn main() {
    let mut evaluator = Evaluator::new(MemoryBackend::new());

    exec(&mut evaluator, "create table users (uid integer, name text)");
    exec(&mut evaluator, "create table orders (oid integer, uid integer, total integer)");

    println!("seeding {USERS} users and {ORDERS} orders...");
    for i in 0..USERS {
        exec(&mut evaluator, &format!("insert into users values ({i}, 'user-{i}')"));
    }
    for i in 0..ORDERS {
        let sql = format!(
            "insert into orders values ({i}, {}, {})",
            i % USERS,
            (i * 7) % 500
        );
        exec(&mut evaluator, &sql);
    }

    let query = "select name, total from users u join orders o on u.uid = o.uid \
                 where total > 250 order by total desc limit 10";
    println!("running {ITERATIONS} iterations of:\n  {query}");

    let start = Instant::now();
    let mut returned = 0;
    for _ in 0..ITERATIONS {
        let StatementResult::Query(result) = exec(&mut evaluator, query) else {
            panic!("expected rows");
        };
        returned = result.rows.len();
    }
    let elapsed = start.elapsed();

    println!(
        "{} rows per query, {:.2?} total ({:.1} queries/s)",
        returned,
        elapsed,
        ITERATIONS as f64 / elapsed.as_secs_f64()
    );
}
