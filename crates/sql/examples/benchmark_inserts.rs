//! Insert throughput over the persistent backend.
//!
//! Inserts a batch of rows through the full pipeline (parse, validate,
//! store) against a scratch keyspace and reports rows per second.

use std::time::Instant;
use tabular_sql::{Backend, Evaluator, PersistentBackend, StatementResult, parsing};

const NUM_INSERTS: usize = 10_000;
const STATUS_INTERVAL: usize = 1_000;

fn exec(evaluator: &mut Evaluator<PersistentBackend>, sql: &str) -> StatementResult {
    let (program, errors) = parsing::parse(sql);
    assert!(errors.is_empty(), "parse failed: {errors:?}");
    evaluator.execute_program(program).expect("execution failed")
}

fn main() {
    let temp_dir = tempfile::tempdir().expect("failed to create temporary directory");
    println!("data directory: {}", temp_dir.path().display());

    let mut evaluator = Evaluator::new(PersistentBackend::new(temp_dir.path().join("bench")));
    evaluator.open().expect("backend open failed");

    exec(&mut evaluator, "create table bench (id integer, label text, score float)");
    println!("table created, starting {NUM_INSERTS} inserts...");

    let start = Instant::now();
    for i in 0..NUM_INSERTS {
        let sql = format!(
            "insert into bench values ({i}, 'row-{i}', {}.5)",
            i % 100
        );
        exec(&mut evaluator, &sql);
        if (i + 1) % STATUS_INTERVAL == 0 {
            println!("  {} rows inserted", i + 1);
        }
    }
    let elapsed = start.elapsed();

    let rows = evaluator.backend().rows("bench").expect("rows");
    assert_eq!(rows.len(), NUM_INSERTS);

    println!(
        "inserted {} rows in {:.2?} ({:.0} rows/s)",
        NUM_INSERTS,
        elapsed,
        NUM_INSERTS as f64 / elapsed.as_secs_f64()
    );

    evaluator.close().expect("backend close failed");
}
