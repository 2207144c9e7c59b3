//! Computes n! by chaining n-1 `map` calls onto a seed future.
//!
//! Usage: `factorial [--pool-size N] [--log-level LEVEL] < input`
//! Input: a single integer `n` on stdin. Output: `n!` on stdout.

use std::io::Read;
use std::sync::Arc;

use poolrt::{map, spawn, Future, Pool};

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

fn read_n() -> u64 {
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .expect("failed to read stdin");
    input
        .split_whitespace()
        .next()
        .and_then(|tok| tok.parse().ok())
        .expect("expected a single integer n on stdin")
}

#[derive(Clone, Copy)]
struct Iter {
    k: u64,
    retval: u128,
}

fn multiply(mut iter: Iter) -> Iter {
    iter.retval *= iter.k as u128;
    iter.k += 1;
    iter
}

fn main() {
    let args = parse_args();
    if let Some(level) = args.log_level {
        poolrt::set_log_level(level);
    }

    let n = read_n();
    let pool = Pool::new(args.pool_size).expect("failed to start worker pool");

    let seed = Iter { k: 1, retval: 1 };
    let mut current: Arc<Future<Iter>> = spawn(&pool, move || multiply(seed))
        .expect("initial spawn should be accepted by a freshly-started pool");

    for _ in 1..n {
        current = map(&pool, &current, multiply)
            .expect("map should be accepted while the pool is running");
    }

    let result = current.join().expect("terminal future should resolve");
    println!("{}", result.retval);

    pool.shutdown();
}
