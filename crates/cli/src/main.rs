//! The `sql` shell: an interactive REPL over the query engine, or a
//! script runner when stdin is piped.
//!
//! With no argument statements run against an in-memory backend and are
//! gone when the process exits; with a database directory argument they
//! run against the persistent backend.

use std::env;
use std::io::{self, BufRead, IsTerminal, Read, Write};
use std::process::ExitCode;

use tabular_sql::{Backend, Evaluator, MemoryBackend, PersistentBackend, ResultSet, StatementResult, parsing};
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    match args.len() {
        1 => run(Evaluator::new(MemoryBackend::new())),
        2 => run(Evaluator::new(PersistentBackend::new(&args[1]))),
        _ => {
            eprintln!("usage: sql [database file]");
            ExitCode::FAILURE
        }
    }
}

fn run<B: Backend>(mut evaluator: Evaluator<B>) -> ExitCode {
    if let Err(err) = evaluator.open() {
        eprintln!("backend open: {err}");
        return ExitCode::FAILURE;
    }

    let stdin = io::stdin();
    if stdin.is_terminal() {
        run_interactive(&mut evaluator);
    } else {
        let mut input = String::new();
        if let Err(err) = stdin.lock().read_to_string(&mut input) {
            eprintln!("read stdin: {err}");
        } else {
            execute(&mut evaluator, &input);
        }
    }

    if let Err(err) = evaluator.close() {
        eprintln!("backend close: {err}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

/// Reads statements one line at a time until end of input.
fn run_interactive<B: Backend>(evaluator: &mut Evaluator<B>) {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!(">> ");
        if stdout.flush().is_err() {
            return;
        }
        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => return,
            Ok(_) => execute(evaluator, &line),
        }
    }
}

fn execute<B: Backend>(evaluator: &mut Evaluator<B>, input: &str) {
    let (program, errors) = parsing::parse(input);
    if !errors.is_empty() {
        for message in errors {
            println!("ERROR: {message}");
        }
        return;
    }
    if program.statements.is_empty() {
        return;
    }

    debug!(statements = program.statements.len(), "executing program");
    match evaluator.execute_program(program) {
        Ok(StatementResult::Ok) => println!("OK"),
        Ok(StatementResult::Query(result)) => println!("{}", render(&result)),
        Err(err) => println!("ERROR: {err}"),
    }
}

/// Renders a result as TAB-separated lines: the header first, then each
/// row. An empty result is just the header line.
fn render(result: &ResultSet) -> String {
    let mut lines = vec![result.columns.join("\t")];
    for row in &result.rows {
        lines.push(row.iter().map(ToString::to_string).collect::<Vec<_>>().join("\t"));
    }
    lines.join("\n")
}
