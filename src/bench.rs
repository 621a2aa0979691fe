/// Performance benchmarks for the validator.
/// Run with: cargo test --release bench_ -- --nocapture

use crate::core::{Utf8Validator, validate_whole};
use std::hint::black_box;
use std::time::Instant;

pub struct BenchResult {
    pub name: &'static str,
    pub iterations: usize,
    pub total_ms: f64,
    pub per_iter_us: f64,
    pub throughput_mb_s: Option<f64>,
}

impl std::fmt::Display for BenchResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {:.1}µs/iter ({} iters, {:.1}ms total",
               self.name, self.per_iter_us, self.iterations, self.total_ms)?;
        if let Some(tp) = self.throughput_mb_s {
            write!(f, ", {:.1} MB/s", tp)?;
        }
        write!(f, ")")
    }
}

fn run(name: &'static str, iterations: usize, bytes_per_iter: Option<usize>, mut f: impl FnMut()) -> BenchResult {
    let start = Instant::now();
    for _ in 0..iterations {
        f();
    }
    let elapsed = start.elapsed();
    BenchResult {
        name,
        iterations,
        total_ms: elapsed.as_secs_f64() * 1000.0,
        per_iter_us: elapsed.as_secs_f64() * 1_000_000.0 / iterations as f64,
        throughput_mb_s: bytes_per_iter
            .map(|n| (n * iterations) as f64 / elapsed.as_secs_f64() / 1_048_576.0),
    }
}

/// Whole-buffer validation of plain ASCII.
pub fn bench_ascii_throughput() -> BenchResult {
    let data: Vec<u8> = b"The quick brown fox jumps over the lazy dog.\r\n".repeat(20_000);
    let iterations = if cfg!(debug_assertions) { 5 } else { 100 };
    run("ascii_throughput", iterations, Some(data.len()), || {
        assert!(validate_whole(black_box(&data)));
    })
}

/// Whole-buffer validation of mixed 1-4 byte sequences.
pub fn bench_multibyte_throughput() -> BenchResult {
    let data: Vec<u8> = "héllo wörld, 中文字符, Ελληνικά, 😀🚀 ".repeat(10_000).into_bytes();
    let iterations = if cfg!(debug_assertions) { 5 } else { 100 };
    run("multibyte_throughput", iterations, Some(data.len()), || {
        assert!(validate_whole(black_box(&data)));
    })
}

/// Worst case for call overhead: one byte per feed.
pub fn bench_byte_at_a_time() -> BenchResult {
    let data: Vec<u8> = "abc é 中 😀 ".repeat(10_000).into_bytes();
    let iterations = if cfg!(debug_assertions) { 2 } else { 20 };
    run("byte_at_a_time", iterations, Some(data.len()), || {
        let mut v = Utf8Validator::new();
        for i in 0..data.len() {
            v.validate(black_box(&data), i, 1);
        }
        assert!(v.ends_on_codepoint());
    })
}

/// Resetting an instance between streams.
pub fn bench_reset() -> BenchResult {
    let mut v = Utf8Validator::new();
    run("reset", 100_000, None, || {
        v.feed(black_box(&[0xf0u8, 0x9f]));
        v.reset();
    })
}

/// Run all benchmarks and return results.
pub fn run_all() -> Vec<BenchResult> {
    vec![
        bench_reset(),
        bench_ascii_throughput(),
        bench_multibyte_throughput(),
        bench_byte_at_a_time(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bench_all_pass() {
        let results = run_all();
        for r in &results {
            println!("{}", r);
            assert!(r.total_ms >= 0.0);
            assert!(r.iterations > 0);
        }
        assert_eq!(results.len(), 4);
    }

    #[test]
    fn bench_ascii_over_50mbs() {
        let r = bench_ascii_throughput();
        println!("{}", r);
        // Only enforce threshold in release mode; debug is much slower
        #[cfg(not(debug_assertions))]
        {
            let tp = r.throughput_mb_s.unwrap();
            assert!(tp > 50.0, "validator too slow: {:.1} MB/s", tp);
        }
    }
}
