//! Reads a k x n matrix of `(value, delay_ms)` cells, computes each cell in
//! parallel (sleeping `delay_ms` before yielding `value`), and prints each
//! row's sum.
//!
//! Usage: `matrix [--pool-size N] [--log-level LEVEL] < input`
//! Input: `k n`, then k*n pairs `value delay_ms`, row-major. Output: one row
//! sum per line.

use std::io::Read;
use std::time::Duration;

use poolrt::{spawn, Pool};

struct Args {
    pool_size: usize,
    log_level: Option<poolrt::LogLevel>,
}

fn parse_args() -> Args {
    let argv: Vec<String> = std::env::args().collect();
    let mut pool_size = poolrt::PoolConfig::default().num_threads;
    let mut log_level = None;

    let mut i = 1;
    while i < argv.len() {
        match argv[i].as_str() {
            "--pool-size" | "-n" => {
                i += 1;
                if let Some(n) = argv.get(i).and_then(|s| s.parse().ok()) {
                    pool_size = n;
                }
            }
            "--log-level" | "-l" => {
                i += 1;
                if let Some(level) = argv.get(i).and_then(|s| parse_log_level(s)) {
                    log_level = Some(level);
                }
            }
            _ => {}
        }
        i += 1;
    }

    Args { pool_size, log_level }
}

fn parse_log_level(s: &str) -> Option<poolrt::LogLevel> {
    use poolrt::LogLevel::*;
    Some(match s.to_ascii_lowercase().as_str() {
        "off" => Off,
        "error" => Error,
        "warn" => Warn,
        "info" => Info,
        "debug" => Debug,
        "trace" => Trace,
        _ => return None,
    })
}

struct Tokens {
    rest: std::vec::IntoIter<String>,
}

impl Tokens {
    fn from_stdin() -> Self {
        let mut input = String::new();
        std::io::stdin()
            .read_to_string(&mut input)
            .expect("failed to read stdin");
        let tokens: Vec<String> = input.split_whitespace().map(str::to_string).collect();
        Tokens { rest: tokens.into_iter() }
    }

    fn next_i64(&mut self) -> i64 {
        self.rest
            .next()
            .expect("unexpected end of input")
            .parse()
            .expect("expected an integer")
    }

    fn next_u64(&mut self) -> u64 {
        self.rest
            .next()
            .expect("unexpected end of input")
            .parse()
            .expect("expected a non-negative integer")
    }
}

fn calc_cell(value: i64, delay_ms: u64) -> i64 {
    std::thread::sleep(Duration::from_millis(delay_ms));
    value
}

fn main() {
    let args = parse_args();
    if let Some(level) = args.log_level {
        poolrt::set_log_level(level);
    }

    let mut tokens = Tokens::from_stdin();
    let k = tokens.next_u64();
    let n = tokens.next_u64();

    let pool = Pool::new(args.pool_size).expect("failed to start worker pool");

    let mut rows = Vec::with_capacity(k as usize);
    for _ in 0..k {
        let mut row = Vec::with_capacity(n as usize);
        for _ in 0..n {
            let value = tokens.next_i64();
            let delay_ms = tokens.next_u64();
            let future = spawn(&pool, move || calc_cell(value, delay_ms))
                .expect("spawn should be accepted while the pool is running");
            row.push(future);
        }
        rows.push(row);
    }

    for row in rows {
        let sum: i64 = row
            .into_iter()
            .map(|future| future.join().expect("cell future should resolve"))
            .sum();
        println!("{sum}");
    }

    pool.shutdown();
}
